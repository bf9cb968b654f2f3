//! Insertion-ordered entity registry.
//!
//! Holds orders, equipment and materials keyed by their identifiers
//! while keeping registration order for iteration. Equipment feasibility
//! is first-fit over that order and order ties fall back to it, so the
//! order is part of the observable behavior.

use std::collections::HashMap;

use crate::models::{Equipment, Material, ProductionOrder};

/// An entity with a unique string key.
pub trait Keyed {
    /// The entity's identifier.
    fn key(&self) -> &str;
}

impl Keyed for ProductionOrder {
    fn key(&self) -> &str {
        &self.order_id
    }
}

impl Keyed for Equipment {
    fn key(&self) -> &str {
        &self.equipment_id
    }
}

impl Keyed for Material {
    fn key(&self) -> &str {
        &self.material_code
    }
}

/// Entities in registration order with keyed lookup.
#[derive(Debug, Clone)]
pub struct Registry<T: Keyed + Clone> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Keyed + Clone> Registry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Inserts an entity. Returns the entity back if its key is taken.
    pub fn insert(&mut self, item: T) -> Result<(), T> {
        if self.index.contains_key(item.key()) {
            return Err(item);
        }
        self.index.insert(item.key().to_string(), self.items.len());
        self.items.push(item);
        Ok(())
    }

    /// Inserts or replaces an entity. A replaced entity keeps its position.
    ///
    /// Returns the previous entity, if any.
    pub fn upsert(&mut self, item: T) -> Option<T> {
        if let Some(pos) = self.position(item.key()) {
            return Some(std::mem::replace(&mut self.items[pos], item));
        }
        self.index.insert(item.key().to_string(), self.items.len());
        self.items.push(item);
        None
    }

    /// Looks up an entity by key.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&pos| &self.items[pos])
    }

    /// Looks up an entity by key for mutation.
    ///
    /// The key field must not be changed through this reference.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        let pos = self.position(key)?;
        self.items.get_mut(pos)
    }

    /// Position of an entity in registration order.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Entities in registration order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Mutable access by position.
    pub(crate) fn get_index_mut(&mut self, pos: usize) -> Option<&mut T> {
        self.items.get_mut(pos)
    }

    /// Iterates in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Keyed + Clone> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed + Clone> From<Vec<T>> for Registry<T> {
    /// Builds a registry; later duplicates replace earlier ones in place.
    fn from(items: Vec<T>) -> Self {
        let mut registry = Self::new();
        for item in items {
            registry.upsert(item);
        }
        registry
    }
}
