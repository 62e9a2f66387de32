//! Measured-depth to true-vertical-depth lookup
//!
//! The engine treats the wellbore survey as an external collaborator: a pure
//! function from MD to TVD. `StationTrajectory` interpolates between known
//! (md, tvd) stations and is what the engine falls back to when the caller
//! does not plug in a survey library.

/// Resolves true vertical depth for a measured depth (both in ft).
pub trait Trajectory {
    fn tvd_at(&self, md: f64) -> f64;
}

impl<F> Trajectory for F
where
    F: Fn(f64) -> f64,
{
    fn tvd_at(&self, md: f64) -> f64 {
        self(md)
    }
}

/// Piecewise-linear trajectory through survey stations.
///
/// A (0, 0) tie-in is implied when no station sits at or above surface.
/// Beyond the last station the last segment's slope is extended.
#[derive(Debug, Clone, PartialEq)]
pub struct StationTrajectory {
    stations: Vec<(f64, f64)>,
}

impl StationTrajectory {
    /// Build from (md, tvd) pairs in any order. Non-finite pairs are dropped
    /// and, for repeated MDs, the first station wins.
    pub fn new(stations: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut stations: Vec<(f64, f64)> = stations
            .into_iter()
            .filter(|(md, tvd)| md.is_finite() && tvd.is_finite())
            .collect();
        stations.sort_by(|a, b| a.0.total_cmp(&b.0));
        stations.dedup_by(|later, earlier| later.0 == earlier.0);
        if stations.first().map_or(true, |&(md, _)| md > 0.0) {
            stations.insert(0, (0.0, 0.0));
        }
        Self { stations }
    }

    /// A vertical hole: TVD equals MD everywhere.
    pub fn vertical() -> Self {
        Self::new([(0.0, 0.0), (1.0, 1.0)])
    }

    pub fn stations(&self) -> &[(f64, f64)] {
        &self.stations
    }
}

impl Trajectory for StationTrajectory {
    fn tvd_at(&self, md: f64) -> f64 {
        let s = &self.stations;
        match s.len() {
            0 => md,
            1 => s[0].1 + (md - s[0].0),
            _ => {
                // First station strictly deeper than md, kept inside [1, len-1]
                let idx = s.partition_point(|&(m, _)| m <= md).clamp(1, s.len() - 1);
                let (md0, tvd0) = s[idx - 1];
                let (md1, tvd1) = s[idx];
                let slope = (tvd1 - tvd0) / (md1 - md0);
                tvd0 + slope * (md - md0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolates_between_stations() {
        let traj = StationTrajectory::new([(2_000.0, 2_000.0), (10_000.0, 9_000.0)]);
        assert!((traj.tvd_at(6_000.0) - 5_500.0).abs() < 1e-9);
        assert!((traj.tvd_at(1_000.0) - 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_extrapolates_with_last_slope() {
        let traj = StationTrajectory::new([(1_000.0, 1_000.0), (2_000.0, 1_500.0)]);
        assert!((traj.tvd_at(3_000.0) - 2_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_unsorted_and_duplicate_stations() {
        let traj = StationTrajectory::new([(5_000.0, 4_000.0), (0.0, 0.0), (5_000.0, 9_999.0)]);
        assert_eq!(traj.stations(), &[(0.0, 0.0), (5_000.0, 4_000.0)]);
    }

    #[test]
    fn test_vertical_is_identity() {
        let traj = StationTrajectory::vertical();
        assert_eq!(traj.tvd_at(8_000.0), 8_000.0);
    }

    #[test]
    fn test_closure_is_a_trajectory() {
        let traj = |md: f64| md * 0.9;
        assert!((traj.tvd_at(1_000.0) - 900.0).abs() < 1e-9);
    }
}
