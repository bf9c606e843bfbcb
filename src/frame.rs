//! Canonical frame normalization
//!
//! Every Reeds-Shepp word formula is written for a car starting at the
//! origin with zero heading and a turning radius of one. This module maps
//! an arbitrary (init, target) pose pair into that frame and maps sampled
//! poses back out. The denormalization is the exact algebraic inverse
//! (scale, rotate by +yaw, translate) of the normalization (translate,
//! rotate by -yaw, scale), so sampled paths accumulate no systematic drift.

use nalgebra::{Rotation2, Vector2};

use crate::common::Pose2D;
use crate::geometry::normalize_angle;

/// Rigid transform + scaling between world frame and the canonical
/// radius-one frame anchored at an initial pose.
///
/// Immutable once built; the radius is validated by the caller before
/// construction, once per radius, not per candidate evaluation.
#[derive(Debug, Clone, Copy)]
pub struct CanonicalFrame {
    init: Pose2D,
    radius: f64,
}

impl CanonicalFrame {
    pub fn new(init: Pose2D, radius: f64) -> Self {
        Self { init, radius }
    }

    /// Express `target` relative to `init`: translate so init sits at the
    /// origin, rotate so init faces heading zero, scale so one unit equals
    /// the turning radius. Returns (x, y, phi) with phi in [0, 2*pi).
    pub fn normalize(&self, target: Pose2D) -> (f64, f64, f64) {
        let d = Vector2::new(target.x - self.init.x, target.y - self.init.y);
        let local = Rotation2::new(-self.init.yaw) * d / self.radius;
        let phi = normalize_angle(target.yaw - self.init.yaw);
        (local.x, local.y, phi)
    }

    /// Map a canonical pose back into the world frame
    pub fn denormalize(&self, pose: Pose2D) -> Pose2D {
        let world = Rotation2::new(self.init.yaw) * Vector2::new(pose.x, pose.y) * self.radius;
        Pose2D::new(
            world.x + self.init.x,
            world.y + self.init.y,
            normalize_angle(pose.yaw + self.init.yaw),
        )
    }
}
