//! Reeds-Shepp curve computation entry points
//!
//! Ties the frame normalizer, word catalog, selector, and sampler together:
//! callers supply an (init, target) pose pair, a turning radius, and a
//! sampling step, and receive the shortest kinematically feasible path as a
//! metric length plus an ordered waypoint sequence. The turning radius is
//! an explicit per-call value (or captured once by the immutable
//! [`ReedsShepp`] helper), never shared mutable state, so every operation
//! here is safe to run concurrently.

use crate::common::{CurveError, CurveResult, Pose2D};
use crate::frame::CanonicalFrame;
use crate::geometry::angle_difference;
use crate::sampler::sample_word;
use crate::selector::shortest_word;
use crate::words::Word;

/// Poses closer than this, in position and normalized heading, are the
/// same query point and yield the degenerate single-pose path
const POSE_MATCH_EPS: f64 = 1e-12;

/// A computed curve: total metric length and the sampled waypoints from
/// init to target. `word` identifies the selected Reeds-Shepp word; it is
/// `None` only for the degenerate init == target query.
#[derive(Debug, Clone)]
pub struct Curve {
    pub length: f64,
    pub poses: Vec<Pose2D>,
    pub word: Option<Word>,
}

/// Strategy for deriving the sampling step from the query instead of
/// taking it from the caller. The two variants come from the original
/// engine, which never reconciled them; both are preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoDelta {
    /// Half the sum of the chord distance and the radius-scaled heading
    /// swing, capped at `delta_max`
    ChordAndHeading,
    /// One fifth of the computed path length, capped at `delta_max`
    LengthFraction,
}

fn validate_radius(radius: f64) -> CurveResult<()> {
    if radius > 0.0 && radius.is_finite() {
        Ok(())
    } else {
        Err(CurveError::InvalidRadius(radius))
    }
}

fn validate_step(delta: f64) -> CurveResult<()> {
    if delta > 0.0 && delta.is_finite() {
        Ok(())
    } else {
        Err(CurveError::InvalidStepSize(delta))
    }
}

fn validate_poses(init: Pose2D, target: Pose2D) -> CurveResult<()> {
    if init.is_finite() && target.is_finite() {
        Ok(())
    } else {
        Err(CurveError::NonFinitePose)
    }
}

fn poses_coincide(init: Pose2D, target: Pose2D) -> bool {
    (init.x - target.x).abs() < POSE_MATCH_EPS
        && (init.y - target.y).abs() < POSE_MATCH_EPS
        && angle_difference(init.yaw, target.yaw) < POSE_MATCH_EPS
}

fn degenerate_curve(init: Pose2D) -> Curve {
    Curve { length: 0.0, poses: vec![init], word: None }
}

/// Solve for the shortest word between two distinct poses
fn plan(init: Pose2D, target: Pose2D, radius: f64) -> CurveResult<(CanonicalFrame, Word)> {
    let frame = CanonicalFrame::new(init, radius);
    let (x, y, phi) = frame.normalize(target);
    let word = shortest_word(x, y, phi)?;
    Ok((frame, word))
}

/// Sample a solved word back into world-frame waypoints
fn build_curve(frame: &CanonicalFrame, word: &Word, radius: f64, delta: f64) -> Curve {
    let canonical = sample_word(word, delta / radius);
    let poses = canonical.into_iter().map(|p| frame.denormalize(p)).collect();
    Curve { length: word.length * radius, poses, word: Some(*word) }
}

/// Shortest Reeds-Shepp curve between two poses, sampled every `delta`
/// length units.
///
/// Preconditions: `radius > 0`, `delta > 0`, finite poses. Identical init
/// and target poses yield `length = 0` and the single-element path.
pub fn compute_curve(
    init: Pose2D,
    target: Pose2D,
    radius: f64,
    delta: f64,
) -> CurveResult<Curve> {
    validate_radius(radius)?;
    validate_step(delta)?;
    validate_poses(init, target)?;
    if poses_coincide(init, target) {
        return Ok(degenerate_curve(init));
    }
    let (frame, word) = plan(init, target, radius)?;
    Ok(build_curve(&frame, &word, radius, delta))
}

/// Shortest Reeds-Shepp curve with the sampling step derived from the
/// query, capped at `delta_max`. See [`AutoDelta`] for the two strategies.
pub fn compute_curve_auto_delta(
    init: Pose2D,
    target: Pose2D,
    radius: f64,
    delta_max: f64,
    mode: AutoDelta,
) -> CurveResult<Curve> {
    validate_radius(radius)?;
    validate_step(delta_max)?;
    validate_poses(init, target)?;
    if poses_coincide(init, target) {
        return Ok(degenerate_curve(init));
    }
    let (frame, word) = plan(init, target, radius)?;
    let delta = match mode {
        AutoDelta::ChordAndHeading => {
            let chord = init.position().distance(&target.position());
            let swing = radius * angle_difference(init.yaw, target.yaw);
            let blend = 0.5 * (chord + swing);
            if blend > 0.0 {
                delta_max.min(blend)
            } else {
                delta_max
            }
        }
        AutoDelta::LengthFraction => {
            let length = word.length * radius;
            if length > 0.0 {
                delta_max.min(length / 5.0)
            } else {
                delta_max
            }
        }
    };
    Ok(build_curve(&frame, &word, radius, delta))
}

/// Immutable, thread-safe handle carrying a validated turning radius.
///
/// Holds no other state; the radius is checked once at construction and
/// every computation receives it by value.
#[derive(Debug, Clone, Copy)]
pub struct ReedsShepp {
    radius: f64,
}

impl ReedsShepp {
    pub fn new(radius: f64) -> CurveResult<Self> {
        validate_radius(radius)?;
        Ok(Self { radius })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn compute_curve(
        &self,
        init: Pose2D,
        target: Pose2D,
        delta: f64,
    ) -> CurveResult<Curve> {
        compute_curve(init, target, self.radius, delta)
    }

    pub fn compute_curve_auto_delta(
        &self,
        init: Pose2D,
        target: Pose2D,
        delta_max: f64,
        mode: AutoDelta,
    ) -> CurveResult<Curve> {
        compute_curve_auto_delta(init, target, self.radius, delta_max, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::normalize_angle;
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::PI;

    fn pose_close(a: &Pose2D, b: &Pose2D, tol: f64) -> bool {
        (a.x - b.x).abs() < tol
            && (a.y - b.y).abs() < tol
            && angle_difference(a.yaw, b.yaw) < tol
    }

    fn rigid_transform(pose: &Pose2D, tx: f64, ty: f64, beta: f64) -> Pose2D {
        Pose2D::new(
            pose.x * beta.cos() - pose.y * beta.sin() + tx,
            pose.x * beta.sin() + pose.y * beta.cos() + ty,
            pose.yaw + beta,
        )
    }

    #[test]
    fn test_basic_query_reaches_target() {
        let init = Pose2D::new(0.0, 0.0, 0.0);
        let target = Pose2D::new(1.0, 1.0, 0.0);
        let curve = compute_curve(init, target, 1.0, 0.1).unwrap();
        assert!(curve.length > 0.0);
        assert!(pose_close(&curve.poses[0], &init, 1e-6));
        assert!(pose_close(curve.poses.last().unwrap(), &target, 1e-6));
    }

    #[test]
    fn test_identical_poses_give_zero_length_single_pose() {
        let pose = Pose2D::new(2.0, 3.0, 1.2);
        let curve = compute_curve(pose, pose, 1.0, 0.1).unwrap();
        assert_eq!(curve.length, 0.0);
        assert_eq!(curve.poses.len(), 1);
        assert!(pose_close(&curve.poses[0], &pose, 1e-12));
        assert!(curve.word.is_none());
    }

    #[test]
    fn test_collinear_poses_reduce_to_straight_line() {
        let init = Pose2D::new(0.0, 0.0, 0.0);
        let target = Pose2D::new(5.0, 0.0, 0.0);
        for &radius in &[0.5, 1.0, 4.0] {
            let curve = compute_curve(init, target, radius, 0.1).unwrap();
            assert!((curve.length - 5.0).abs() < 1e-9, "radius {}", radius);
            for pose in &curve.poses {
                assert!(pose.y.abs() < 1e-9);
                assert!(angle_difference(pose.yaw, 0.0) < 1e-9);
            }
        }
    }

    #[test]
    fn test_length_scales_with_radius() {
        // same relative geometry, radius 1 vs radius 5
        let a1 = Pose2D::new(0.0, 0.0, 0.0);
        let b1 = Pose2D::new(1.0, 2.0, 1.5);
        let a5 = Pose2D::new(0.0, 0.0, 0.0);
        let b5 = Pose2D::new(5.0, 10.0, 1.5);
        let c1 = compute_curve(a1, b1, 1.0, 0.05).unwrap();
        let c5 = compute_curve(a5, b5, 5.0, 0.25).unwrap();
        assert!((c5.length - 5.0 * c1.length).abs() < 1e-6);
    }

    #[test]
    fn test_rigid_motion_invariance() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..50 {
            let init = Pose2D::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(0.0..2.0 * PI),
            );
            let target = Pose2D::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(0.0..2.0 * PI),
            );
            let (tx, ty, beta) = (
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(0.0..2.0 * PI),
            );
            let base = compute_curve(init, target, 1.5, 0.2).unwrap();
            let moved = compute_curve(
                rigid_transform(&init, tx, ty, beta),
                rigid_transform(&target, tx, ty, beta),
                1.5,
                0.2,
            )
            .unwrap();
            assert!(
                (base.length - moved.length).abs() < 1e-6,
                "lengths {} vs {}",
                base.length,
                moved.length
            );
        }
    }

    #[test]
    fn test_endpoints_over_random_queries() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let init = Pose2D::new(
                rng.gen_range(-8.0..8.0),
                rng.gen_range(-8.0..8.0),
                rng.gen_range(0.0..2.0 * PI),
            );
            let target = Pose2D::new(
                rng.gen_range(-8.0..8.0),
                rng.gen_range(-8.0..8.0),
                rng.gen_range(0.0..2.0 * PI),
            );
            let radius = rng.gen_range(0.3..3.0);
            let curve = compute_curve(init, target, radius, 0.1).unwrap();
            assert!(curve.length >= 0.0);
            assert!(pose_close(&curve.poses[0], &init, 1e-6));
            assert!(pose_close(curve.poses.last().unwrap(), &target, 1e-6));
        }
    }

    #[test]
    fn test_sample_density_and_spacing() {
        let init = Pose2D::new(-1.0, -4.0, -0.35);
        let target = Pose2D::new(5.0, 5.0, 0.44);
        let delta = 0.05;
        let curve = compute_curve(init, target, 10.0, delta).unwrap();
        let expected = curve.length / delta + 1.0;
        assert!((curve.poses.len() as f64 - expected).abs() < 8.0);
        for (a, b) in curve.poses.iter().tuple_windows() {
            assert!(a.position().distance(&b.position()) <= delta + 1e-9);
        }
    }

    #[test]
    fn test_mirror_symmetry() {
        let init = Pose2D::new(0.5, 1.0, 0.8);
        let target = Pose2D::new(4.0, -2.0, 2.0);
        let mirror = |p: &Pose2D| Pose2D::new(p.x, -p.y, normalize_angle(-p.yaw));
        let curve = compute_curve(init, target, 1.0, 0.1).unwrap();
        let mirrored = compute_curve(mirror(&init), mirror(&target), 1.0, 0.1).unwrap();
        assert!((curve.length - mirrored.length).abs() < 1e-9);
        assert_eq!(curve.poses.len(), mirrored.poses.len());
        for (p, m) in curve.poses.iter().zip(&mirrored.poses) {
            assert!((p.x - m.x).abs() < 1e-9);
            assert!((p.y + m.y).abs() < 1e-9);
            assert!(angle_difference(p.yaw, normalize_angle(-m.yaw)) < 1e-9);
        }
    }

    #[test]
    fn test_invalid_arguments() {
        let a = Pose2D::origin();
        let b = Pose2D::new(1.0, 0.0, 0.0);
        assert_eq!(
            compute_curve(a, b, 0.0, 0.1).unwrap_err(),
            CurveError::InvalidRadius(0.0)
        );
        assert_eq!(
            compute_curve(a, b, -2.0, 0.1).unwrap_err(),
            CurveError::InvalidRadius(-2.0)
        );
        assert_eq!(
            compute_curve(a, b, 1.0, 0.0).unwrap_err(),
            CurveError::InvalidStepSize(0.0)
        );
        assert_eq!(
            compute_curve(Pose2D::new(f64::NAN, 0.0, 0.0), b, 1.0, 0.1).unwrap_err(),
            CurveError::NonFinitePose
        );
    }

    #[test]
    fn test_auto_delta_chord_and_heading() {
        let init = Pose2D::new(0.0, 0.0, 0.0);
        let target = Pose2D::new(4.0, 0.0, 0.0);
        // blend = chord / 2 = 2, capped at delta_max = 0.5
        let capped =
            compute_curve_auto_delta(init, target, 1.0, 0.5, AutoDelta::ChordAndHeading)
                .unwrap();
        assert!((capped.length - 4.0).abs() < 1e-9);
        assert!(capped.poses.len() >= 9);
        // generous cap: the blend itself drives the step
        let coarse =
            compute_curve_auto_delta(init, target, 1.0, 10.0, AutoDelta::ChordAndHeading)
                .unwrap();
        assert!(coarse.poses.len() < capped.poses.len());
        assert!(pose_close(coarse.poses.last().unwrap(), &target, 1e-6));
    }

    #[test]
    fn test_auto_delta_length_fraction() {
        let init = Pose2D::new(0.0, 0.0, 0.0);
        let target = Pose2D::new(3.0, 3.0, 1.0);
        let curve =
            compute_curve_auto_delta(init, target, 1.0, 100.0, AutoDelta::LengthFraction)
                .unwrap();
        // a fifth of the length per step gives five intervals plus segment
        // endpoints
        assert!(curve.poses.len() >= 6);
        assert!(curve.poses.len() <= 12);
        assert!(pose_close(curve.poses.last().unwrap(), &target, 1e-6));
    }

    #[test]
    fn test_auto_delta_identical_poses() {
        let pose = Pose2D::new(1.0, 1.0, 0.5);
        for &mode in &[AutoDelta::ChordAndHeading, AutoDelta::LengthFraction] {
            let curve = compute_curve_auto_delta(pose, pose, 1.0, 0.5, mode).unwrap();
            assert_eq!(curve.length, 0.0);
            assert_eq!(curve.poses.len(), 1);
        }
    }

    #[test]
    fn test_configured_instance_matches_free_function() {
        let planner = ReedsShepp::new(2.0).unwrap();
        assert_eq!(planner.radius(), 2.0);
        let init = Pose2D::new(0.0, 0.0, 0.0);
        let target = Pose2D::new(3.0, 1.0, 0.7);
        let via_instance = planner.compute_curve(init, target, 0.1).unwrap();
        let via_free = compute_curve(init, target, 2.0, 0.1).unwrap();
        assert_eq!(via_instance.length, via_free.length);
        assert_eq!(via_instance.poses.len(), via_free.poses.len());
    }

    #[test]
    fn test_configured_instance_rejects_bad_radius() {
        assert!(ReedsShepp::new(0.0).is_err());
        assert!(ReedsShepp::new(-1.0).is_err());
        assert!(ReedsShepp::new(f64::INFINITY).is_err());
    }
}
