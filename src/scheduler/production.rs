//! Greedy production scheduler.
//!
//! # Algorithm
//!
//! 1. Select orders with status PENDING.
//! 2. Rank them by score, descending; equal scores keep registration order.
//! 3. Start a time cursor at the run start.
//! 4. For each order in rank order:
//!    - decline if any material is missing or short;
//!    - decline if no equipment unit (first-fit, registration order) is
//!      free of maintenance over `[cursor, cursor + hours)` with budget left;
//!    - otherwise commit: assign the unit and window, add the hours to the
//!      unit's load, draw the materials from stock, move the cursor to the
//!      window end.
//!
//! Declines never move the cursor. With [`CursorMode::Global`] the cursor
//! is shared by every unit, so commits form one back-to-back sequence even
//! across different equipment. [`CursorMode::PerEquipment`] keeps one
//! cursor per unit instead.
//!
//! # Complexity
//! O(n log n + n * (m + r)) where n=pending orders, m=equipment units,
//! r=materials per order.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching

use chrono::NaiveDateTime;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, instrument, warn};

use super::reports::{self, GanttEntry, ProductionSummary};
use crate::config::{CursorMode, SchedulerConfig};
use crate::dispatching::{RuleEngine, SchedulingContext};
use crate::error::{Result, ScheduleError};
use crate::feasibility::{EquipmentChecker, EquipmentMatch, MaterialChecker};
use crate::models::{
    CommittedOrder, DeclineReason, DeclinedOrder, Equipment, Material, OrderPriority,
    OrderStatus, ProductionOrder, RunResult, TimeWindow,
};
use crate::registry::{Keyed, Registry};
use crate::validation;

/// Per-order decision reached during a run.
enum Decision {
    Commit(EquipmentMatch),
    Decline(DeclineReason),
}

/// Owns the order, equipment and material registries and schedules
/// pending orders onto equipment.
///
/// Not synchronised; wrap it in [`SharedScheduler`](crate::SharedScheduler)
/// when several threads need access.
///
/// # Example
///
/// ```
/// use chrono::{Duration, NaiveDate};
/// use u_production::models::{Equipment, Material, ProductionOrder};
/// use u_production::scheduler::ProductionScheduler;
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
///
/// let mut scheduler = ProductionScheduler::new();
/// scheduler.add_equipment(Equipment::new("E1").with_available_hours(8.0)).unwrap();
/// scheduler.add_material(Material::new("M1", 100.0)).unwrap();
/// scheduler
///     .add_order(
///         ProductionOrder::new("O1", "WIDGET", start + Duration::days(3))
///             .with_estimated_hours(4.0)
///             .with_material("M1", 20.0),
///     )
///     .unwrap();
///
/// let result = scheduler.schedule_orders(Some(start));
/// assert_eq!(result.scheduled_count, 1);
/// assert_eq!(result.scheduled_orders[0].end, start + Duration::hours(4));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProductionScheduler {
    config: SchedulerConfig,
    rule_engine: RuleEngine,
    orders: Registry<ProductionOrder>,
    equipment: Registry<Equipment>,
    materials: Registry<Material>,
}

impl ProductionScheduler {
    /// Creates an empty scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty scheduler with the given configuration.
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replaces the scoring rule engine.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    // ======================== Registration ========================

    /// Registers an order.
    ///
    /// # Errors
    /// [`ScheduleError::Validation`] for malformed orders and
    /// [`ScheduleError::DuplicateOrder`] when the id is taken and
    /// duplicates are rejected. The existing entry is left untouched.
    pub fn add_order(&mut self, order: ProductionOrder) -> Result<()> {
        validation::validate_order(&order).map_err(|errors| ScheduleError::Validation {
            entity: "order",
            id: order.order_id.clone(),
            errors,
        })?;
        let id = order.order_id.clone();
        register(&mut self.orders, order, self.config.reject_duplicates)
            .map_err(|_| ScheduleError::DuplicateOrder(id))
    }

    /// Registers an equipment unit.
    ///
    /// # Errors
    /// [`ScheduleError::Validation`] or [`ScheduleError::DuplicateEquipment`].
    pub fn add_equipment(&mut self, equipment: Equipment) -> Result<()> {
        validation::validate_equipment(&equipment).map_err(|errors| {
            ScheduleError::Validation {
                entity: "equipment",
                id: equipment.equipment_id.clone(),
                errors,
            }
        })?;
        let id = equipment.equipment_id.clone();
        register(&mut self.equipment, equipment, self.config.reject_duplicates)
            .map_err(|_| ScheduleError::DuplicateEquipment(id))
    }

    /// Registers a material.
    ///
    /// # Errors
    /// [`ScheduleError::Validation`] or [`ScheduleError::DuplicateMaterial`].
    pub fn add_material(&mut self, material: Material) -> Result<()> {
        validation::validate_material(&material).map_err(|errors| {
            ScheduleError::Validation {
                entity: "material",
                id: material.material_code.clone(),
                errors,
            }
        })?;
        let code = material.material_code.clone();
        register(&mut self.materials, material, self.config.reject_duplicates)
            .map_err(|_| ScheduleError::DuplicateMaterial(code))
    }

    // ======================== Lookup ========================

    /// Looks up an order.
    pub fn order(&self, order_id: &str) -> Option<&ProductionOrder> {
        self.orders.get(order_id)
    }

    /// Looks up an equipment unit.
    pub fn equipment(&self, equipment_id: &str) -> Option<&Equipment> {
        self.equipment.get(equipment_id)
    }

    /// Looks up a material.
    pub fn material(&self, material_code: &str) -> Option<&Material> {
        self.materials.get(material_code)
    }

    /// All orders in registration order.
    pub fn orders(&self) -> &[ProductionOrder] {
        self.orders.as_slice()
    }

    /// All equipment in registration order.
    pub fn equipment_list(&self) -> &[Equipment] {
        self.equipment.as_slice()
    }

    /// All materials in registration order.
    pub fn materials(&self) -> &[Material] {
        self.materials.as_slice()
    }

    /// Records a status transition made outside the engine: start of
    /// production, completion or cancellation.
    ///
    /// PENDING and SCHEDULED are owned by the engine (commit and
    /// [`reschedule_order`](Self::reschedule_order)) and are refused.
    /// Cancelling a committed order releases its equipment hours and
    /// materials. Returns `false` for unknown ids and refused statuses.
    pub fn set_order_status(&mut self, order_id: &str, status: OrderStatus) -> bool {
        if matches!(status, OrderStatus::Pending | OrderStatus::Scheduled) {
            warn!(order = order_id, ?status, "status is set by the engine only");
            return false;
        }
        let Some(order) = self.orders.get_mut(order_id) else {
            return false;
        };
        if status == OrderStatus::Cancelled && order.is_scheduled() {
            release(&mut self.equipment, &mut self.materials, order);
            order.reset_to_pending();
        }
        order.status = status;
        true
    }

    // ======================== Scheduling ========================

    /// Schedules all pending orders.
    ///
    /// `start` defaults to today at the configured start hour.
    pub fn schedule_orders(&mut self, start: Option<NaiveDateTime>) -> RunResult {
        let start = start.unwrap_or_else(|| self.config.default_start());
        self.run(start, || false)
    }

    /// Schedules pending orders, stopping between orders once `cancel`
    /// is set.
    ///
    /// Orders processed before the stop get exactly the outcome an
    /// uncancelled run would give them; the rest stay PENDING and are
    /// counted in [`RunResult::skipped_count`].
    pub fn schedule_orders_until(
        &mut self,
        start: NaiveDateTime,
        cancel: &AtomicBool,
    ) -> RunResult {
        self.run(start, || cancel.load(Ordering::Relaxed))
    }

    /// Runs one pass, asking `should_stop` before each order.
    #[instrument(skip(self, should_stop), fields(mode = ?self.config.cursor_mode))]
    fn run<F>(&mut self, start: NaiveDateTime, should_stop: F) -> RunResult
    where
        F: Fn() -> bool,
    {
        let mut result = RunResult::new(start);
        let context = SchedulingContext::at_time(start);
        let ranked = self
            .rule_engine
            .rank_where(self.orders.as_slice(), &context, ProductionOrder::is_pending);
        result.total_orders = ranked.len();

        let mut cursor = start;
        let mut unit_cursors: HashMap<String, NaiveDateTime> = HashMap::new();

        for (processed, ranked_order) in ranked.iter().enumerate() {
            if should_stop() {
                result.cancelled = true;
                result.skipped_count = ranked.len() - processed;
                warn!(skipped = result.skipped_count, "scheduling run cancelled");
                break;
            }

            let order = &self.orders.as_slice()[ranked_order.index];
            let material_check = MaterialChecker::new(&self.materials).check(order);
            let decision = match material_check.into_reason() {
                Some(reason) => Decision::Decline(reason),
                None => {
                    let checker = EquipmentChecker::new(&self.equipment);
                    let hours = order.estimated_hours;
                    let found = match self.config.cursor_mode {
                        CursorMode::Global => TimeWindow::from_hours(cursor, hours)
                            .and_then(|window| checker.find(window, hours)),
                        CursorMode::PerEquipment => checker.find_with(hours, |unit| {
                            let at = unit_cursors
                                .get(&unit.equipment_id)
                                .copied()
                                .unwrap_or(start);
                            TimeWindow::from_hours(at, hours)
                        }),
                    };
                    match found {
                        Some(m) => Decision::Commit(m),
                        None => Decision::Decline(DeclineReason::NoEquipmentAvailable),
                    }
                }
            };

            match decision {
                Decision::Commit(found) => {
                    let committed = self.commit(ranked_order.index, &found, ranked_order.score);
                    debug!(
                        order = %committed.order_id,
                        equipment = %committed.equipment_id,
                        start = %committed.start,
                        end = %committed.end,
                        "order committed"
                    );
                    match self.config.cursor_mode {
                        CursorMode::Global => cursor = found.window.end,
                        CursorMode::PerEquipment => {
                            unit_cursors.insert(found.equipment_id.clone(), found.window.end);
                        }
                    }
                    result.add_committed(committed);
                }
                Decision::Decline(reason) => {
                    debug!(order = %order.order_id, %reason, "order declined");
                    result.add_declined(DeclinedOrder {
                        order_id: order.order_id.clone(),
                        product_code: order.product_code.clone(),
                        priority: order.priority,
                        reason,
                    });
                }
            }
        }

        result.equipment_utilization = self.get_equipment_utilization();
        info!(
            total = result.total_orders,
            scheduled = result.scheduled_count,
            failed = result.failed_count,
            skipped = result.skipped_count,
            "scheduling run finished"
        );
        result
    }

    /// Applies a commitment: assigns the order and draws down resources.
    fn commit(&mut self, order_pos: usize, found: &EquipmentMatch, score: f64) -> CommittedOrder {
        let order = &self.orders.as_slice()[order_pos];
        let hours = order.estimated_hours;
        let requirements = order.material_requirements.clone();
        let committed = CommittedOrder {
            order_id: order.order_id.clone(),
            product_code: order.product_code.clone(),
            priority: order.priority,
            score,
            equipment_id: found.equipment_id.clone(),
            start: found.window.start,
            end: found.window.end,
        };

        if let Some(unit) = self.equipment.get_index_mut(found.position) {
            unit.current_load += hours;
        }
        for (code, qty) in &requirements {
            if let Some(material) = self.materials.get_mut(code) {
                material.current_stock = (material.current_stock - qty).max(0.0);
            }
        }
        if let Some(order) = self.orders.get_index_mut(order_pos) {
            order.status = OrderStatus::Scheduled;
            order.scheduled_start = Some(found.window.start);
            order.scheduled_end = Some(found.window.end);
            order.assigned_equipment = Some(found.equipment_id.clone());
        }

        committed
    }

    /// Returns an order to the backlog, optionally re-prioritising it.
    ///
    /// A SCHEDULED order releases its equipment hours and materials first.
    /// Other orders' commitments are not revisited. Returns `false` if
    /// the order is unknown, leaving every registry unchanged.
    #[instrument(skip(self))]
    pub fn reschedule_order(
        &mut self,
        order_id: &str,
        new_priority: Option<OrderPriority>,
        new_due_date: Option<NaiveDateTime>,
    ) -> bool {
        let Some(order) = self.orders.get_mut(order_id) else {
            debug!("reschedule of unknown order");
            return false;
        };

        if let Some(priority) = new_priority {
            order.priority = priority;
        }
        if let Some(due) = new_due_date {
            order.due_date = due;
        }

        if order.is_scheduled() {
            release(&mut self.equipment, &mut self.materials, order);
        }

        order.reset_to_pending();
        info!("order returned to backlog");
        true
    }

    // ======================== Reports ========================

    /// Gantt rows for every scheduled order.
    pub fn get_schedule_gantt_data(&self) -> Vec<GanttEntry> {
        reports::gantt(self.orders.as_slice())
    }

    /// Order counts by status and completion rate.
    pub fn get_production_summary(&self) -> ProductionSummary {
        ProductionSummary::calculate(self.orders.as_slice())
    }

    /// Utilization (%) per equipment unit.
    pub fn get_equipment_utilization(&self) -> BTreeMap<String, f64> {
        reports::utilization(self.equipment.as_slice())
    }

    /// Materials below their safety stock.
    pub fn get_low_stock_materials(&self) -> Vec<&Material> {
        reports::low_stock(self.materials.as_slice())
    }
}

/// Returns a committed order's hours and materials.
///
/// Only an order holding an equipment assignment has drawn anything down;
/// without one this is a no-op. Load is clamped at zero.
fn release(
    equipment: &mut Registry<Equipment>,
    materials: &mut Registry<Material>,
    order: &ProductionOrder,
) {
    let Some(unit) = order
        .assigned_equipment
        .as_deref()
        .and_then(|id| equipment.get_mut(id))
    else {
        return;
    };
    unit.current_load = (unit.current_load - order.estimated_hours).max(0.0);
    for (code, qty) in &order.material_requirements {
        if let Some(material) = materials.get_mut(code) {
            material.current_stock += qty;
        }
    }
    debug!(order = %order.order_id, hours = order.estimated_hours, "released held resources");
}

/// Inserts into a registry, rejecting or replacing duplicates.
fn register<T>(
    registry: &mut Registry<T>,
    item: T,
    reject_duplicates: bool,
) -> std::result::Result<(), T>
where
    T: Keyed + Clone,
{
    if reject_duplicates {
        registry.insert(item).map_err(|dup| {
            warn!(id = dup.key(), "rejected duplicate registration");
            dup
        })
    } else {
        if let Some(old) = registry.upsert(item) {
            warn!(id = old.key(), "replaced existing registration");
        }
        Ok(())
    }
}
