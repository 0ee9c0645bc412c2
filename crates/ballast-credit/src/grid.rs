//! Threshold grids.

use ballast_core::validation;
use ballast_core::{BallastError, BallastResult};
use serde::{Deserialize, Serialize};

/// Sorted, de-duplicated decision thresholds in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ThresholdGrid {
    points: Vec<f64>,
}

impl ThresholdGrid {
    /// Evenly spaced points from `min` to `max` inclusive.
    ///
    /// Each point is `min + i × step`, so the grid does not drift from
    /// accumulated rounding. A single point yields `[min]`.
    pub fn linspace(min: f64, max: f64, points: usize) -> BallastResult<Self> {
        validation::unit_interval("grid.min", min)?;
        validation::unit_interval("grid.max", max)?;
        if min > max {
            return Err(BallastError::invalid_input(
                "grid",
                format!("min {min} exceeds max {max}"),
            ));
        }
        if points == 0 {
            return Err(BallastError::invalid_input(
                "grid.points",
                "at least one point is required",
            ));
        }
        Self::from_values(spaced(min, max, points))
    }

    /// Builds a grid from arbitrary values, sorting and removing duplicates.
    pub fn from_values(mut values: Vec<f64>) -> BallastResult<Self> {
        if values.is_empty() {
            return Err(BallastError::invalid_input(
                "grid.points",
                "at least one point is required",
            ));
        }
        for v in &values {
            validation::unit_interval("threshold", *v)?;
        }
        values.sort_by(f64::total_cmp);
        values.dedup();
        Ok(Self { points: values })
    }

    /// The thresholds, ascending.
    #[must_use]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Number of thresholds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a grid has at least one point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest threshold.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.points[0]
    }
}

impl Default for ThresholdGrid {
    /// Nine points from 0.1 to 0.9.
    fn default() -> Self {
        Self {
            points: spaced(0.1, 0.9, 9),
        }
    }
}

fn spaced(min: f64, max: f64, points: usize) -> Vec<f64> {
    if points <= 1 {
        return vec![min];
    }
    let step = (max - min) / (points - 1) as f64;
    (0..points)
        .map(|i| if i == points - 1 { max } else { min + i as f64 * step })
        .collect()
}

impl TryFrom<Vec<f64>> for ThresholdGrid {
    type Error = BallastError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_values(values)
    }
}

impl From<ThresholdGrid> for Vec<f64> {
    fn from(grid: ThresholdGrid) -> Self {
        grid.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_grid() {
        let grid = ThresholdGrid::default();
        assert_eq!(grid.len(), 9);
        assert_relative_eq!(grid.points()[0], 0.1);
        assert_relative_eq!(grid.points()[4], 0.5, epsilon = 1e-12);
        assert_relative_eq!(grid.points()[8], 0.9, epsilon = 1e-12);
        assert_eq!(grid, ThresholdGrid::linspace(0.1, 0.9, 9).unwrap());
    }

    #[test]
    fn test_linspace() {
        let grid = ThresholdGrid::linspace(0.0, 1.0, 5).unwrap();
        assert_eq!(grid.points(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(ThresholdGrid::linspace(0.3, 0.3, 4).unwrap().points(), &[0.3]);
        assert_eq!(ThresholdGrid::linspace(0.4, 0.9, 1).unwrap().points(), &[0.4]);
    }

    #[test]
    fn test_invalid_grids() {
        assert!(ThresholdGrid::linspace(0.9, 0.1, 9).is_err());
        assert!(ThresholdGrid::linspace(0.1, 0.9, 0).is_err());
        assert!(ThresholdGrid::linspace(-0.1, 0.9, 9).is_err());
        assert!(ThresholdGrid::from_values(vec![]).is_err());
        assert!(ThresholdGrid::from_values(vec![0.5, 1.5]).is_err());
    }

    #[test]
    fn test_from_values_sorts() {
        let grid = ThresholdGrid::from_values(vec![0.7, 0.2, 0.7, 0.5]).unwrap();
        assert_eq!(grid.points(), &[0.2, 0.5, 0.7]);
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, "[0.2,0.5,0.7]");
        let back: ThresholdGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
