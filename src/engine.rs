//! Thread-safe scheduler handle.
//!
//! Runs and reschedules mutate equipment load, material stock and order
//! status, so they take the write lock for their whole duration. Reports
//! take the read lock and may run concurrently with each other.

use chrono::NaiveDateTime;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{Equipment, Material, OrderPriority, ProductionOrder, RunResult};
use crate::scheduler::{GanttEntry, ProductionScheduler, ProductionSummary};

/// Cloneable, `Send + Sync` handle to a [`ProductionScheduler`].
///
/// # Example
///
/// ```
/// use u_production::SharedScheduler;
/// use u_production::models::Equipment;
///
/// let shared = SharedScheduler::default();
/// let handle = shared.clone();
/// std::thread::spawn(move || handle.add_equipment(Equipment::new("E1")).unwrap())
///     .join()
///     .unwrap();
/// assert!(shared.get_equipment_utilization().contains_key("E1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedScheduler {
    inner: Arc<RwLock<ProductionScheduler>>,
}

impl SharedScheduler {
    /// Wraps an existing scheduler.
    pub fn new(scheduler: ProductionScheduler) -> Self {
        Self {
            inner: Arc::new(RwLock::new(scheduler)),
        }
    }

    /// Registers an order.
    pub fn add_order(&self, order: ProductionOrder) -> Result<()> {
        self.inner.write().add_order(order)
    }

    /// Registers an equipment unit.
    pub fn add_equipment(&self, equipment: Equipment) -> Result<()> {
        self.inner.write().add_equipment(equipment)
    }

    /// Registers a material.
    pub fn add_material(&self, material: Material) -> Result<()> {
        self.inner.write().add_material(material)
    }

    /// Runs the scheduler under the write lock.
    pub fn schedule_orders(&self, start: Option<NaiveDateTime>) -> RunResult {
        self.inner.write().schedule_orders(start)
    }

    /// Runs the scheduler with a cancellation flag under the write lock.
    pub fn schedule_orders_until(&self, start: NaiveDateTime, cancel: &AtomicBool) -> RunResult {
        self.inner.write().schedule_orders_until(start, cancel)
    }

    /// Reschedules an order under the write lock.
    pub fn reschedule_order(
        &self,
        order_id: &str,
        new_priority: Option<OrderPriority>,
        new_due_date: Option<NaiveDateTime>,
    ) -> bool {
        self.inner
            .write()
            .reschedule_order(order_id, new_priority, new_due_date)
    }

    /// Gantt rows for every scheduled order.
    pub fn get_schedule_gantt_data(&self) -> Vec<GanttEntry> {
        self.inner.read().get_schedule_gantt_data()
    }

    /// Order counts by status and completion rate.
    pub fn get_production_summary(&self) -> ProductionSummary {
        self.inner.read().get_production_summary()
    }

    /// Utilization (%) per equipment unit.
    pub fn get_equipment_utilization(&self) -> BTreeMap<String, f64> {
        self.inner.read().get_equipment_utilization()
    }

    /// Copies of materials below safety stock.
    pub fn get_low_stock_materials(&self) -> Vec<Material> {
        self.inner
            .read()
            .get_low_stock_materials()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Copy of an order's current state.
    pub fn order(&self, order_id: &str) -> Option<ProductionOrder> {
        self.inner.read().order(order_id).cloned()
    }

    /// Runs `f` with shared access to the scheduler.
    pub fn read<R>(&self, f: impl FnOnce(&ProductionScheduler) -> R) -> R {
        f(&*self.inner.read())
    }

    /// Runs `f` with exclusive access to the scheduler.
    pub fn write<R>(&self, f: impl FnOnce(&mut ProductionScheduler) -> R) -> R {
        f(&mut *self.inner.write())
    }
}

impl From<ProductionScheduler> for SharedScheduler {
    fn from(scheduler: ProductionScheduler) -> Self {
        Self::new(scheduler)
    }
}
