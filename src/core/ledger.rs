use crate::domain::model::{PriceItem, Route};
use serde::Serialize;
use std::fmt;

/// Itemized sum (`expected`) against the route's stated total (`actual`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub expected: u64,
    pub actual: u64,
    pub balanced: bool,
}

impl Reconciliation {
    pub fn imbalance(&self) -> Option<LedgerImbalance> {
        (!self.balanced).then_some(LedgerImbalance {
            expected: self.expected,
            actual: self.actual,
        })
    }
}

/// Warning raised when a route's stated total differs from its ledger. Not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerImbalance {
    pub expected: u64,
    pub actual: u64,
}

impl LedgerImbalance {
    /// `actual - expected`; positive when the stated total is higher.
    pub fn difference(&self) -> i128 {
        i128::from(self.actual) - i128::from(self.expected)
    }
}

impl fmt::Display for LedgerImbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stated total {} differs from itemized sum {} by {:+}",
            self.actual,
            self.expected,
            self.difference()
        )
    }
}

pub fn itemized_sum(items: &[PriceItem]) -> u64 {
    items.iter().map(|item| item.price).sum()
}

/// Compares the ledger with the stated total without touching either.
pub fn reconcile(route: &Route) -> Reconciliation {
    let expected = itemized_sum(&route.ledger);
    let actual = route.total_price;
    Reconciliation {
        expected,
        actual,
        balanced: expected == actual,
    }
}

/// Like `reconcile`, but logs a warning when the route is out of balance.
pub fn reconcile_and_report(route: &Route) -> Reconciliation {
    let reconciliation = reconcile(route);
    match reconciliation.imbalance() {
        Some(imbalance) => tracing::warn!("⚠️ Route {} '{}': {}", route.id, route.title, imbalance),
        None => tracing::debug!("Route {} ledger balanced at {}", route.id, reconciliation.actual),
    }
    reconciliation
}

/// Ledger lines in insertion order, for breakdown display.
pub fn list_items(route: &Route) -> &[PriceItem] {
    &route.ledger
}

pub fn items_for_stop(route: &Route, stop_id: u32) -> Vec<&PriceItem> {
    route
        .ledger
        .iter()
        .filter(|item| item.stop_id == Some(stop_id))
        .collect()
}
