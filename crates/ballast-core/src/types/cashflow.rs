//! Cash flow schedule for fixed-rate bonds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashflowKind {
    /// Regular coupon payment
    Coupon,
    /// Principal repayment at maturity (zero-coupon bonds)
    Principal,
    /// Combined coupon and principal (final payment)
    CouponAndPrincipal,
}

impl fmt::Display for CashflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashflowKind::Coupon => "Coupon",
            CashflowKind::Principal => "Principal",
            CashflowKind::CouponAndPrincipal => "Coupon+Principal",
        };
        write!(f, "{name}")
    }
}

/// A single scheduled payment, indexed by coupon period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cashflow {
    /// Period index, starting at 1.
    pub period: u32,
    /// Amount paid at the end of the period.
    pub amount: f64,
    /// Type of cash flow.
    pub kind: CashflowKind,
}

impl Cashflow {
    /// Creates a new cash flow.
    #[must_use]
    pub fn new(period: u32, amount: f64, kind: CashflowKind) -> Self {
        Self {
            period,
            amount,
            kind,
        }
    }

    /// Returns true if this flow repays principal.
    #[must_use]
    pub fn is_principal(&self) -> bool {
        matches!(
            self.kind,
            CashflowKind::Principal | CashflowKind::CouponAndPrincipal
        )
    }
}

/// Ordered sequence of cash flows, strictly increasing in period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashflowSchedule {
    flows: Vec<Cashflow>,
}

impl CashflowSchedule {
    /// Creates an empty schedule with room for `capacity` flows.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            flows: Vec::with_capacity(capacity),
        }
    }

    /// Appends a flow. Flows must be pushed in period order.
    pub fn push(&mut self, flow: Cashflow) {
        debug_assert!(
            self.flows.last().map_or(true, |last| last.period < flow.period),
            "cash flows must be pushed in increasing period order"
        );
        self.flows.push(flow);
    }

    /// Returns the flows as a slice.
    #[must_use]
    pub fn flows(&self) -> &[Cashflow] {
        &self.flows
    }

    /// Number of flows in the schedule.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Returns true if the schedule has no flows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Sum of all undiscounted amounts.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.flows.iter().map(|cf| cf.amount).sum()
    }

    /// Iterates over the flows.
    pub fn iter(&self) -> std::slice::Iter<'_, Cashflow> {
        self.flows.iter()
    }
}

impl<'a> IntoIterator for &'a CashflowSchedule {
    type Item = &'a Cashflow;
    type IntoIter = std::slice::Iter<'a, Cashflow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}
