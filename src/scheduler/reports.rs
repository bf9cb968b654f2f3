//! Read-only projections over scheduler state.
//!
//! Every view is recomputed from the registries on each call; nothing
//! is cached.
//!
//! | View | Definition |
//! |------|-----------|
//! | Gantt | One row per SCHEDULED order with a committed window |
//! | Utilization | `current_load / available_hours_per_day × 100`, 2 decimals |
//! | Summary | Order counts by status; `completed / total × 100` |
//! | Low stock | Materials with `current_stock < safety_stock` |

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Equipment, Material, OrderPriority, OrderStatus, ProductionOrder};

/// One bar of a Gantt chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttEntry {
    pub order_id: String,
    pub product_code: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub equipment_id: String,
    pub priority: OrderPriority,
    pub status: OrderStatus,
}

/// Order counts by status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionSummary {
    pub total_orders: usize,
    pub pending_orders: usize,
    pub scheduled_orders: usize,
    pub in_progress_orders: usize,
    pub completed_orders: usize,
    pub cancelled_orders: usize,
    /// Completed share of all orders (%), 2 decimals. 0 with no orders.
    pub completion_rate: f64,
}

impl ProductionSummary {
    /// Counts orders by status.
    pub fn calculate(orders: &[ProductionOrder]) -> Self {
        let mut summary = Self {
            total_orders: orders.len(),
            ..Self::default()
        };

        for order in orders {
            match order.status {
                OrderStatus::Pending => summary.pending_orders += 1,
                OrderStatus::Scheduled => summary.scheduled_orders += 1,
                OrderStatus::InProgress => summary.in_progress_orders += 1,
                OrderStatus::Completed => summary.completed_orders += 1,
                OrderStatus::Cancelled => summary.cancelled_orders += 1,
            }
        }

        if summary.total_orders > 0 {
            summary.completion_rate =
                round2(summary.completed_orders as f64 / summary.total_orders as f64 * 100.0);
        }
        summary
    }
}

/// Gantt rows for scheduled orders, in registration order.
pub fn gantt(orders: &[ProductionOrder]) -> Vec<GanttEntry> {
    orders
        .iter()
        .filter(|o| o.is_scheduled())
        .filter_map(|o| {
            Some(GanttEntry {
                order_id: o.order_id.clone(),
                product_code: o.product_code.clone(),
                start: o.scheduled_start?,
                end: o.scheduled_end?,
                equipment_id: o.assigned_equipment.clone().unwrap_or_default(),
                priority: o.priority,
                status: o.status,
            })
        })
        .collect()
}

/// Utilization (%) keyed by equipment id.
pub fn utilization(equipment: &[Equipment]) -> BTreeMap<String, f64> {
    equipment
        .iter()
        .map(|e| (e.equipment_id.clone(), e.utilization_percent()))
        .collect()
}

/// Materials below safety stock, in registration order.
pub fn low_stock(materials: &[Material]) -> Vec<&Material> {
    materials.iter().filter(|m| m.is_below_safety_stock()).collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn scheduled(id: &str, start: u32, end: u32, equipment: &str) -> ProductionOrder {
        let mut o = ProductionOrder::new(id, "P", at(23)).with_status(OrderStatus::Scheduled);
        o.scheduled_start = Some(at(start));
        o.scheduled_end = Some(at(end));
        o.assigned_equipment = Some(equipment.into());
        o
    }

    #[test]
    fn test_gantt_only_scheduled() {
        let orders = vec![
            scheduled("O1", 8, 10, "E1"),
            ProductionOrder::new("O2", "P", at(23)),
            scheduled("O3", 10, 12, "E2"),
        ];
        let rows = gantt(&orders);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].order_id, "O1");
        assert_eq!(rows[0].start, at(8));
        assert_eq!(rows[1].equipment_id, "E2");
        assert_eq!(rows[1].status, OrderStatus::Scheduled);
    }

    #[test]
    fn test_gantt_skips_missing_window() {
        let mut o = scheduled("O1", 8, 10, "E1");
        o.scheduled_end = None;
        assert!(gantt(&[o]).is_empty());
    }

    #[test]
    fn test_summary_counts() {
        let orders = vec![
            scheduled("O1", 8, 10, "E1"),
            ProductionOrder::new("O2", "P", at(23)).with_status(OrderStatus::Completed),
            ProductionOrder::new("O3", "P", at(23)).with_status(OrderStatus::InProgress),
            ProductionOrder::new("O4", "P", at(23)),
            ProductionOrder::new("O5", "P", at(23)).with_status(OrderStatus::Cancelled),
            ProductionOrder::new("O6", "P", at(23)).with_status(OrderStatus::Completed),
        ];
        let s = ProductionSummary::calculate(&orders);
        assert_eq!(s.total_orders, 6);
        assert_eq!(s.scheduled_orders, 1);
        assert_eq!(s.in_progress_orders, 1);
        assert_eq!(s.completed_orders, 2);
        assert_eq!(s.pending_orders, 1);
        assert_eq!(s.cancelled_orders, 1);
        assert!((s.completion_rate - 33.33).abs() < 1e-10);
    }

    #[test]
    fn test_summary_empty() {
        let s = ProductionSummary::calculate(&[]);
        assert_eq!(s.total_orders, 0);
        assert!((s.completion_rate - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_utilization() {
        let eq = vec![
            Equipment::new("E1").with_available_hours(8.0).with_current_load(4.0),
            Equipment::new("E2").with_available_hours(8.0),
        ];
        let u = utilization(&eq);
        assert!((u["E1"] - 50.0).abs() < 1e-10);
        assert!((u["E2"] - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_low_stock() {
        let materials = vec![
            Material::new("M1", 5.0).with_safety_stock(10.0),
            Material::new("M2", 50.0).with_safety_stock(10.0),
            Material::new("M3", 10.0).with_safety_stock(10.0),
        ];
        let low = low_stock(&materials);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].material_code, "M1");
    }
}
