//! Reeds-Shepp shortest paths for car-like vehicles
//!
//! This crate computes the shortest kinematically feasible path between two
//! oriented planar poses for a vehicle with a bounded minimum turning
//! radius that can drive both forwards and backwards, then discretizes the
//! path into waypoints at a caller-chosen resolution. It is intended as a
//! local steering primitive inside a higher-level motion planner; collision
//! checking and trajectory timing are the caller's concern.
//!
//! The computation runs in a canonical frame (start pose at the origin,
//! unit turning radius), evaluates the 48 canonical Reeds-Shepp words in
//! closed form, picks the shortest feasible one, and samples it back into
//! the original frame.
//!
//! Reference: Reeds, J.A., and Shepp, L.A. (1990).
//! "Optimal paths for a car that goes both forwards and backwards",
//! Pacific Journal of Mathematics, 145(2).

// Core modules
pub mod common;
pub mod geometry;

// Engine modules
pub mod frame;
pub mod words;
pub mod selector;
pub mod sampler;
pub mod planner;

// Re-export the public surface for convenience
pub use common::{CurveError, CurveResult, Point2D, Pose2D};
pub use planner::{compute_curve, compute_curve_auto_delta, AutoDelta, Curve, ReedsShepp};
pub use words::{Segment, Steering, Symmetry, Word};
