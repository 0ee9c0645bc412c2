//! First-order price sensitivity.
//!
//! `ΔP ≈ -D_mod × Δy × P`. There is no convexity term, so the estimate
//! overstates losses and understates gains for large moves.

use serde::{Deserialize, Serialize};

/// Estimated price after a rate move of `delta_rate_pct` percentage points.
///
/// ```text
/// P' = P × (1 - D_mod × Δ / 100)
/// ```
#[must_use]
pub fn price_sensitivity(price: f64, modified_duration_years: f64, delta_rate_pct: f64) -> f64 {
    price * (1.0 - modified_duration_years * delta_rate_pct / 100.0)
}

/// One point of a price/yield profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Rate move in percentage points.
    pub delta_rate_pct: f64,
    /// Estimated price after the move.
    pub estimated_price: f64,
    /// Estimated change from the starting price.
    pub price_change: f64,
}

/// Rate moves from -2% to +2% in 0.5% steps.
pub const STANDARD_RATE_MOVES: [f64; 9] = [-2.0, -1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 2.0];

/// Estimates the price for each rate move, in input order.
#[must_use]
pub fn price_yield_profile(
    price: f64,
    modified_duration_years: f64,
    deltas_pct: &[f64],
) -> Vec<PricePoint> {
    deltas_pct
        .iter()
        .map(|&delta| {
            let estimated = price_sensitivity(price, modified_duration_years, delta);
            PricePoint {
                delta_rate_pct: delta,
                estimated_price: estimated,
                price_change: estimated - price,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_price_sensitivity() {
        // 4.26 modified duration, +1% moves the price down 4.26%.
        assert_relative_eq!(price_sensitivity(1000.0, 4.26, 1.0), 957.4, epsilon = 1e-9);
        assert_relative_eq!(price_sensitivity(1000.0, 4.26, 0.0), 1000.0);
        assert_relative_eq!(price_sensitivity(1000.0, 4.26, -1.0), 1042.6, epsilon = 1e-9);
    }

    #[test]
    fn test_profile_is_linear() {
        let profile = price_yield_profile(100.0, 5.0, &STANDARD_RATE_MOVES);
        assert_eq!(profile.len(), 9);
        assert_relative_eq!(profile[0].estimated_price, 110.0, epsilon = 1e-9);
        assert_relative_eq!(profile[4].price_change, 0.0);
        assert_relative_eq!(profile[8].estimated_price, 90.0, epsilon = 1e-9);
        assert!(profile.windows(2).all(|w| w[0].estimated_price > w[1].estimated_price));
    }
}
