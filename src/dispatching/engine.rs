//! Rule engine for backlog ordering.
//!
//! Ranks orders by a scoring rule, highest score first. Ties keep their
//! input order: the sort is stable, so registration order is the final
//! tie-breaker.

use std::cmp::Ordering;
use std::sync::Arc;

use super::rules::UrgencyWeighted;
use super::{RuleScore, SchedulingContext, ScoringRule};
use crate::models::ProductionOrder;

/// An order position together with the score it was ranked by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedOrder {
    /// Index into the ranked slice.
    pub index: usize,
    /// Score assigned by the rule.
    pub score: RuleScore,
}

/// Orders a backlog by a scoring rule.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use u_production::dispatching::{RuleEngine, SchedulingContext};
/// use u_production::models::{OrderPriority, ProductionOrder};
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let due = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let orders = vec![
///     ProductionOrder::new("A", "P", due).with_priority(OrderPriority::Low),
///     ProductionOrder::new("B", "P", due).with_priority(OrderPriority::Urgent),
/// ];
///
/// let ranked = RuleEngine::new().rank(&orders, &SchedulingContext::at_time(now));
/// assert_eq!(ranked[0].index, 1);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rule: Arc<dyn ScoringRule>,
}

impl RuleEngine {
    /// Creates an engine using [`UrgencyWeighted`].
    pub fn new() -> Self {
        Self {
            rule: Arc::new(UrgencyWeighted),
        }
    }

    /// Replaces the scoring rule.
    pub fn with_rule<R: ScoringRule + 'static>(mut self, rule: R) -> Self {
        self.rule = Arc::new(rule);
        self
    }

    /// Name of the active rule.
    pub fn rule_name(&self) -> &'static str {
        self.rule.name()
    }

    /// Scores a single order.
    pub fn score(&self, order: &ProductionOrder, context: &SchedulingContext) -> RuleScore {
        self.rule.evaluate(order, context)
    }

    /// Ranks orders, highest score first.
    ///
    /// Every order is scored exactly once. Equal scores (and NaN, which
    /// compares as equal) preserve input order.
    pub fn rank(
        &self,
        orders: &[ProductionOrder],
        context: &SchedulingContext,
    ) -> Vec<RankedOrder> {
        self.rank_where(orders, context, |_| true)
    }

    /// Ranks only the orders accepted by `filter`.
    ///
    /// Indices still refer to positions in `orders`.
    pub fn rank_where<F>(
        &self,
        orders: &[ProductionOrder],
        context: &SchedulingContext,
        filter: F,
    ) -> Vec<RankedOrder>
    where
        F: Fn(&ProductionOrder) -> bool,
    {
        let mut ranked: Vec<RankedOrder> = orders
            .iter()
            .enumerate()
            .filter(|(_, order)| filter(*order))
            .map(|(index, order)| RankedOrder {
                index,
                score: self.rule.evaluate(order, context),
            })
            .collect();

        // `sort_by` is stable; do not switch to `sort_unstable_by`.
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rule", &self.rule.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderPriority, OrderStatus};
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn make_order(id: &str, due_days: i64, priority: OrderPriority) -> ProductionOrder {
        ProductionOrder::new(id, "P", now() + Duration::days(due_days)).with_priority(priority)
    }

    fn ids(orders: &[ProductionOrder], ranked: &[RankedOrder]) -> Vec<String> {
        ranked.iter().map(|r| orders[r.index].order_id.clone()).collect()
    }

    /// Scores by quantity, for exercising custom rules.
    #[derive(Debug)]
    struct ByQuantity;

    impl ScoringRule for ByQuantity {
        fn name(&self) -> &'static str {
            "QTY"
        }

        fn evaluate(&self, order: &ProductionOrder, _context: &SchedulingContext) -> RuleScore {
            order.quantity as f64
        }
    }

    #[test]
    fn test_rank_descending() {
        let orders = vec![
            make_order("low", 30, OrderPriority::Low),
            make_order("urgent", 30, OrderPriority::Urgent),
            make_order("normal", 30, OrderPriority::Normal),
        ];
        let ctx = SchedulingContext::at_time(now());
        let ranked = RuleEngine::new().rank(&orders, &ctx);
        assert_eq!(ids(&orders, &ranked), vec!["urgent", "normal", "low"]);
        assert!((ranked[0].score - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_stable_ties() {
        // HIGH due in 30 days (3.0) ties with LOW due tomorrow (3.0)
        let orders = vec![
            make_order("first", 30, OrderPriority::High),
            make_order("second", 1, OrderPriority::Low),
            make_order("third", 30, OrderPriority::High),
        ];
        let ctx = SchedulingContext::at_time(now());
        let ranked = RuleEngine::new().rank(&orders, &ctx);
        assert_eq!(ids(&orders, &ranked), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_rank_where_keeps_original_indices() {
        let orders = vec![
            make_order("done", 1, OrderPriority::Urgent).with_status(OrderStatus::Completed),
            make_order("a", 30, OrderPriority::Low),
            make_order("b", 30, OrderPriority::High),
        ];
        let ctx = SchedulingContext::at_time(now());
        let ranked = RuleEngine::new().rank_where(&orders, &ctx, |o| o.is_pending());
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].index, 2);
        assert_eq!(ranked[1].index, 1);
    }

    #[test]
    fn test_custom_rule() {
        let orders = vec![
            make_order("small", 30, OrderPriority::Urgent).with_quantity(5),
            make_order("large", 30, OrderPriority::Low).with_quantity(500),
        ];
        let ctx = SchedulingContext::at_time(now());
        let engine = RuleEngine::new().with_rule(ByQuantity);
        assert_eq!(engine.rule_name(), "QTY");
        let ranked = engine.rank(&orders, &ctx);
        assert_eq!(ids(&orders, &ranked), vec!["large", "small"]);
    }

    #[test]
    fn test_empty_orders() {
        let ctx = SchedulingContext::at_time(now());
        assert!(RuleEngine::new().rank(&[], &ctx).is_empty());
    }
}
