use simcore::SimError;

use crate::profile::MotionProfile;
use crate::spline::{HermiteSpline, central_difference};

/// Derivative step for time-domain spline trajectories (seconds).
pub const TRAJECTORY_DERIVATIVE_STEP: f64 = 1e-6;

/// Smooth target through waypoints spaced `segment_duration` seconds apart.
///
/// Position comes from a Hermite spline evaluated at `t / segment_duration`;
/// velocity is its central-difference derivative.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryGenerator {
    spline: HermiteSpline,
    segment_duration: f64,
    derivative_step: f64,
}

impl TrajectoryGenerator {
    /// Waypoints with zero tangents.
    pub fn new(waypoints: Vec<f64>, segment_duration: f64) -> Result<Self, SimError> {
        Self::from_spline(HermiteSpline::new(waypoints)?, segment_duration)
    }

    pub fn with_tangents(
        waypoints: Vec<f64>,
        tangents: Vec<f64>,
        segment_duration: f64,
    ) -> Result<Self, SimError> {
        Self::from_spline(HermiteSpline::with_tangents(waypoints, tangents)?, segment_duration)
    }

    /// Spread `waypoints` evenly over `duration` seconds.
    pub fn spanning(waypoints: Vec<f64>, duration: f64) -> Result<Self, SimError> {
        let segments = waypoints.len().saturating_sub(1).max(1);
        Self::new(waypoints, duration / segments as f64)
    }

    pub fn from_spline(spline: HermiteSpline, segment_duration: f64) -> Result<Self, SimError> {
        if !(segment_duration.is_finite() && segment_duration > 0.0) {
            return Err(SimError::InvalidSegmentDuration(segment_duration));
        }
        Ok(Self {
            spline,
            segment_duration,
            derivative_step: TRAJECTORY_DERIVATIVE_STEP,
        })
    }

    /// Central-difference step used by [`velocity`](Self::velocity).
    pub fn with_derivative_step(mut self, h: f64) -> Result<Self, SimError> {
        if !(h.is_finite() && h > 0.0) {
            return Err(SimError::InvalidDerivativeStep(h));
        }
        self.derivative_step = h;
        Ok(self)
    }

    pub fn spline(&self) -> &HermiteSpline {
        &self.spline
    }

    pub fn segment_duration(&self) -> f64 {
        self.segment_duration
    }

    /// Time at which the last waypoint is reached.
    pub fn end_time(&self) -> f64 {
        self.spline.segments() as f64 * self.segment_duration
    }

    pub fn position(&self, t: f64) -> f64 {
        self.spline.sample(t / self.segment_duration)
    }

    pub fn velocity(&self, t: f64) -> f64 {
        central_difference(|x| self.position(x), t, self.derivative_step)
    }
}

impl MotionProfile for TrajectoryGenerator {
    fn value(&self, t: f64) -> f64 {
        self.position(t)
    }

    fn derivative(&self, t: f64) -> f64 {
        self.velocity(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_hits_waypoints_on_schedule() {
        let trajectory = TrajectoryGenerator::spanning(vec![0.0, 5.0, -2.0], 60.0).unwrap();
        assert_eq!(trajectory.segment_duration(), 30.0);
        assert_eq!(trajectory.end_time(), 60.0);
        assert_abs_diff_eq!(trajectory.position(0.0), 0.0);
        assert_abs_diff_eq!(trajectory.position(30.0), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(trajectory.position(60.0), -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(trajectory.position(90.0), -2.0);
        assert_abs_diff_eq!(trajectory.position(15.0), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_velocity_scales_with_segment_duration() {
        let trajectory = TrajectoryGenerator::new(vec![0.0, 5.0], 10.0).unwrap();
        // d/dt of 5 * h01(t / 10) at the midpoint: 5 * 1.5 / 10
        assert_abs_diff_eq!(trajectory.velocity(5.0), 0.75, epsilon = 1e-6);
        assert_abs_diff_eq!(trajectory.derivative(5.0), 0.75, epsilon = 1e-6);
        assert_abs_diff_eq!(trajectory.velocity(20.0), 0.0);
    }

    #[test]
    fn test_rejects_bad_segment_duration() {
        assert!(matches!(
            TrajectoryGenerator::new(vec![0.0, 1.0], 0.0),
            Err(SimError::InvalidSegmentDuration(_))
        ));
        assert!(matches!(
            TrajectoryGenerator::with_tangents(vec![0.0, 1.0], vec![0.0], 1.0),
            Err(SimError::TangentCountMismatch { .. })
        ));
    }

    #[test]
    fn test_custom_derivative_step() {
        let trajectory = TrajectoryGenerator::new(vec![0.0, 5.0], 1.0)
            .unwrap()
            .with_derivative_step(1e-3)
            .unwrap();
        assert_abs_diff_eq!(trajectory.velocity(0.5), 7.5, epsilon = 1e-4);
    }

    #[test]
    fn test_rejects_bad_derivative_step() {
        let trajectory = TrajectoryGenerator::new(vec![0.0, 5.0], 1.0).unwrap();
        for h in [0.0, -1e-3, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                trajectory.clone().with_derivative_step(h),
                Err(SimError::InvalidDerivativeStep(_))
            ));
        }
    }
}
