//! Reeds-Shepp word catalog
//!
//! A word is a sequence of 2-5 motion primitives (left turn, right turn,
//! straight), each driven forward or backward, forming one of the 48
//! canonical shortest-path shapes for a car with bounded turning radius.
//! Twelve base shapes are solved in closed form for a left-turning,
//! forward-starting car; the remaining 36 words are obtained by applying a
//! symmetry transform to the input pose and mapping the transform back onto
//! the resulting segments (time reversal flips every motion direction,
//! reflection swaps left and right turns).
//!
//! All formulas operate in the canonical frame: the car starts at the
//! origin with zero heading and the turning radius is one, so arc lengths
//! equal swept angles.
//!
//! Reference: Reeds, J.A., and Shepp, L.A. (1990).
//! "Optimal paths for a car that goes both forwards and backwards"

use std::f64::consts::{FRAC_PI_2, PI};

use crate::geometry::{normalize_angle, polar};

/// Tolerance for acos/asin arguments pushed out of range by floating error
const DOMAIN_EPS: f64 = 1e-10;

/// Below this, the translated circle centers coincide and the shape is
/// geometrically degenerate
const DEGENERATE_EPS: f64 = 1e-12;

/// Steering primitive of one path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steering {
    Left,
    Right,
    Straight,
}

impl Steering {
    /// Mirror across the x-axis: left turns become right turns
    fn mirrored(self) -> Self {
        match self {
            Steering::Left => Steering::Right,
            Steering::Right => Steering::Left,
            Steering::Straight => Steering::Straight,
        }
    }
}

/// Drive direction of one path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Forward,
    Backward,
}

impl Motion {
    fn sign(self) -> f64 {
        match self {
            Motion::Forward => 1.0,
            Motion::Backward => -1.0,
        }
    }

    fn reversed(self) -> Self {
        match self {
            Motion::Forward => Motion::Backward,
            Motion::Backward => Motion::Forward,
        }
    }
}

/// Input transform applied before a base solver, and inverse-applied to the
/// resulting segments. The enumeration order here is the documented
/// tie-break order of the selector, together with ascending shape index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    Identity,
    TimeFlip,
    Reflect,
    TimeFlipReflect,
}

impl Symmetry {
    /// Transform a canonical relative pose into the base solver's frame
    pub fn apply(self, x: f64, y: f64, phi: f64) -> (f64, f64, f64) {
        match self {
            Symmetry::Identity => (x, y, phi),
            Symmetry::TimeFlip => (-x, y, -phi),
            Symmetry::Reflect => (x, -y, -phi),
            Symmetry::TimeFlipReflect => (-x, -y, phi),
        }
    }

    fn flips_time(self) -> bool {
        matches!(self, Symmetry::TimeFlip | Symmetry::TimeFlipReflect)
    }

    fn mirrors(self) -> bool {
        matches!(self, Symmetry::Reflect | Symmetry::TimeFlipReflect)
    }
}

/// Fixed evaluation order of the symmetry group
pub const SYMMETRIES: [Symmetry; 4] = [
    Symmetry::Identity,
    Symmetry::TimeFlip,
    Symmetry::Reflect,
    Symmetry::TimeFlipReflect,
];

/// Which solved unknown (or fixed quarter turn) a template segment spans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Magnitude {
    T,
    U,
    V,
    QuarterTurn,
}

/// One segment of a base shape before symmetry is applied
#[derive(Debug, Clone, Copy)]
struct SegmentTemplate {
    steering: Steering,
    motion: Motion,
    magnitude: Magnitude,
}

const fn seg(steering: Steering, motion: Motion, magnitude: Magnitude) -> SegmentTemplate {
    SegmentTemplate { steering, motion, magnitude }
}

use Magnitude::{QuarterTurn, T, U, V};
use Motion::{Backward, Forward};
use Steering::{Left, Right, Straight};

/// One concrete segment of a selected word: steering plus signed canonical
/// arc length (negative = backward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub steering: Steering,
    pub length: f64,
}

/// A base word shape: display name, closed-form solver, segment template
pub struct WordShape {
    pub name: &'static str,
    solve: fn(f64, f64, f64) -> Option<[f64; 3]>,
    template: &'static [SegmentTemplate],
}

/// The twelve base shapes in fixed enumeration order. Together with the
/// four symmetries this spans the full 48-word space.
pub const SHAPES: [WordShape; 12] = [
    WordShape {
        name: "C|C|C",
        solve: left_x_right_x_left,
        template: &[seg(Left, Forward, T), seg(Right, Backward, U), seg(Left, Forward, V)],
    },
    WordShape {
        name: "C|CC",
        solve: left_x_right_left,
        template: &[seg(Left, Forward, T), seg(Right, Backward, U), seg(Left, Backward, V)],
    },
    WordShape {
        name: "CSC",
        solve: left_straight_left,
        template: &[seg(Left, Forward, T), seg(Straight, Forward, U), seg(Left, Forward, V)],
    },
    WordShape {
        name: "CSC",
        solve: left_straight_right,
        template: &[seg(Left, Forward, T), seg(Straight, Forward, U), seg(Right, Forward, V)],
    },
    WordShape {
        name: "CCu|CuC",
        solve: left_right_x_left_right,
        template: &[
            seg(Left, Forward, T),
            seg(Right, Forward, U),
            seg(Left, Backward, U),
            seg(Right, Backward, V),
        ],
    },
    WordShape {
        name: "C|CuCu|C",
        solve: left_x_right_left_x_right,
        template: &[
            seg(Left, Forward, T),
            seg(Right, Backward, U),
            seg(Left, Backward, U),
            seg(Right, Forward, V),
        ],
    },
    WordShape {
        name: "C|C2SC",
        solve: left_x_right90_straight_left,
        template: &[
            seg(Left, Forward, T),
            seg(Right, Backward, QuarterTurn),
            seg(Straight, Backward, U),
            seg(Left, Backward, V),
        ],
    },
    WordShape {
        name: "C|C2SC",
        solve: left_x_right90_straight_right,
        template: &[
            seg(Left, Forward, T),
            seg(Right, Backward, QuarterTurn),
            seg(Straight, Backward, U),
            seg(Right, Backward, V),
        ],
    },
    WordShape {
        name: "C|C2SC2|C",
        solve: left_x_right90_straight_left90_x_right,
        template: &[
            seg(Left, Forward, T),
            seg(Right, Backward, QuarterTurn),
            seg(Straight, Backward, U),
            seg(Left, Backward, QuarterTurn),
            seg(Right, Forward, V),
        ],
    },
    WordShape {
        name: "CC|C",
        solve: left_right_x_left,
        template: &[seg(Left, Forward, T), seg(Right, Forward, U), seg(Left, Backward, V)],
    },
    WordShape {
        name: "CSC2|C",
        solve: left_straight_right90_x_left,
        template: &[
            seg(Left, Forward, T),
            seg(Straight, Forward, U),
            seg(Right, Forward, QuarterTurn),
            seg(Left, Backward, V),
        ],
    },
    WordShape {
        name: "CSC2|C",
        solve: left_straight_left90_x_right,
        template: &[
            seg(Left, Forward, T),
            seg(Straight, Forward, U),
            seg(Left, Forward, QuarterTurn),
            seg(Right, Backward, V),
        ],
    },
];

/// A solved candidate word: shape index, symmetry, unsigned segment
/// magnitudes t, u, v and total canonical length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Word {
    pub shape: usize,
    pub symmetry: Symmetry,
    pub t: f64,
    pub u: f64,
    pub v: f64,
    pub length: f64,
}

impl Word {
    pub fn name(&self) -> &'static str {
        SHAPES[self.shape].name
    }

    /// Concrete segments with symmetry applied: signed lengths and
    /// possibly mirrored steering
    pub fn segments(&self) -> Vec<Segment> {
        SHAPES[self.shape]
            .template
            .iter()
            .map(|tpl| {
                let value = match tpl.magnitude {
                    Magnitude::T => self.t,
                    Magnitude::U => self.u,
                    Magnitude::V => self.v,
                    Magnitude::QuarterTurn => FRAC_PI_2,
                };
                let motion = if self.symmetry.flips_time() {
                    tpl.motion.reversed()
                } else {
                    tpl.motion
                };
                let steering = if self.symmetry.mirrors() {
                    tpl.steering.mirrored()
                } else {
                    tpl.steering
                };
                Segment { steering, length: motion.sign() * value }
            })
            .collect()
    }
}

/// Evaluate one (shape, symmetry) candidate against a canonical relative
/// pose. Returns None when the geometric configuration is inadmissible for
/// this shape.
pub fn evaluate(shape: usize, symmetry: Symmetry, x: f64, y: f64, phi: f64) -> Option<Word> {
    let (bx, by, bphi) = symmetry.apply(x, y, phi);
    let [t, u, v] = (SHAPES[shape].solve)(bx, by, bphi)?;
    let mut word = Word { shape, symmetry, t, u, v, length: 0.0 };
    word.length = word.segments().iter().map(|s| s.length.abs()).sum();
    Some(word)
}

fn clamped_acos(value: f64) -> Option<f64> {
    if value.abs() > 1.0 + DOMAIN_EPS {
        None
    } else {
        Some(value.clamp(-1.0, 1.0).acos())
    }
}

fn clamped_asin(value: f64) -> Option<f64> {
    if value.abs() > 1.0 + DOMAIN_EPS {
        None
    } else {
        Some(value.clamp(-1.0, 1.0).asin())
    }
}

// The solvers below express each base shape in terms of the displacement
// (a, b) between the start and goal turning-circle centers. Same-turn
// shapes use the left circle of both poses, opposite-turn shapes the left
// circle of the start and the right circle of the goal.

fn left_x_right_x_left(x: f64, y: f64, phi: f64) -> Option<[f64; 3]> {
    let a = x - phi.sin();
    let b = y + phi.cos() - 1.0;
    if a.abs() < DEGENERATE_EPS && b.abs() < DEGENERATE_EPS {
        return None;
    }
    let (u1, theta) = polar(a, b);
    if u1 > 4.0 {
        return None;
    }
    let alpha = clamped_acos(u1 / 4.0)?;
    let t = normalize_angle(FRAC_PI_2 + alpha + theta);
    let u = normalize_angle(PI - 2.0 * alpha);
    let v = normalize_angle(phi - t - u);
    Some([t, u, v])
}

fn left_x_right_left(x: f64, y: f64, phi: f64) -> Option<[f64; 3]> {
    let a = x - phi.sin();
    let b = y + phi.cos() - 1.0;
    if a.abs() < DEGENERATE_EPS && b.abs() < DEGENERATE_EPS {
        return None;
    }
    let (u1, theta) = polar(a, b);
    if u1 > 4.0 {
        return None;
    }
    let alpha = clamped_acos(u1 / 4.0)?;
    let t = normalize_angle(FRAC_PI_2 + alpha + theta);
    let u = normalize_angle(PI - 2.0 * alpha);
    let v = normalize_angle(t + u - phi);
    Some([t, u, v])
}

fn left_straight_left(x: f64, y: f64, phi: f64) -> Option<[f64; 3]> {
    let a = x - phi.sin();
    let b = y + phi.cos() - 1.0;
    let (u, theta) = polar(a, b);
    let t = normalize_angle(theta);
    let v = normalize_angle(phi - t);
    Some([t, u, v])
}

fn left_straight_right(x: f64, y: f64, phi: f64) -> Option<[f64; 3]> {
    let a = x + phi.sin();
    let b = y - phi.cos() - 1.0;
    let (u1, theta) = polar(a, b);
    if u1 < 2.0 {
        return None;
    }
    let u = (u1 * u1 - 4.0).sqrt();
    let alpha = (2.0f64).atan2(u);
    let t = normalize_angle(theta + alpha);
    let v = normalize_angle(t - phi);
    Some([t, u, v])
}

fn left_right_x_left_right(x: f64, y: f64, phi: f64) -> Option<[f64; 3]> {
    let a = x + phi.sin();
    let b = y - phi.cos() - 1.0;
    if a.abs() < DEGENERATE_EPS && b.abs() < DEGENERATE_EPS {
        return None;
    }
    let (u1, theta) = polar(a, b);
    if u1 > 4.0 {
        return None;
    }
    // the tangent geometry differs depending on whether the two middle
    // arcs overlap (u1 <= 2) or not
    let (t, u) = if u1 > 2.0 {
        let alpha = clamped_acos(u1 / 4.0 - 0.5)?;
        (
            normalize_angle(FRAC_PI_2 + theta - alpha),
            normalize_angle(PI - alpha),
        )
    } else {
        let alpha = clamped_acos(u1 / 4.0 + 0.5)?;
        (
            normalize_angle(FRAC_PI_2 + theta + alpha),
            normalize_angle(alpha),
        )
    };
    let v = normalize_angle(phi - t + 2.0 * u);
    Some([t, u, v])
}

fn left_x_right_left_x_right(x: f64, y: f64, phi: f64) -> Option<[f64; 3]> {
    let a = x + phi.sin();
    let b = y - phi.cos() - 1.0;
    if a.abs() < DEGENERATE_EPS && b.abs() < DEGENERATE_EPS {
        return None;
    }
    let (u1, theta) = polar(a, b);
    if u1 > 6.0 {
        return None;
    }
    let va = 1.25 - u1 * u1 / 16.0;
    if va < -DOMAIN_EPS || va > 1.0 + DOMAIN_EPS {
        return None;
    }
    let u = va.clamp(0.0, 1.0).acos();
    let alpha = clamped_asin(2.0 * u.sin() / u1)?;
    let t = normalize_angle(FRAC_PI_2 + theta + alpha);
    let v = normalize_angle(t - phi);
    Some([t, u, v])
}

fn left_x_right90_straight_left(x: f64, y: f64, phi: f64) -> Option<[f64; 3]> {
    let a = x - phi.sin();
    let b = y + phi.cos() - 1.0;
    let (u1, theta) = polar(a, b);
    if u1 < 2.0 {
        return None;
    }
    let u = (u1 * u1 - 4.0).sqrt() - 2.0;
    if u < 0.0 {
        return None;
    }
    let alpha = (2.0f64).atan2(u + 2.0);
    let t = normalize_angle(FRAC_PI_2 + theta + alpha);
    let v = normalize_angle(t + FRAC_PI_2 - phi);
    Some([t, u, v])
}

fn left_x_right90_straight_right(x: f64, y: f64, phi: f64) -> Option<[f64; 3]> {
    let a = x + phi.sin();
    let b = y - phi.cos() - 1.0;
    let (u1, theta) = polar(a, b);
    if u1 < 2.0 {
        return None;
    }
    let t = normalize_angle(FRAC_PI_2 + theta);
    let u = u1 - 2.0;
    let v = normalize_angle(phi - t - FRAC_PI_2);
    Some([t, u, v])
}

fn left_x_right90_straight_left90_x_right(x: f64, y: f64, phi: f64) -> Option<[f64; 3]> {
    let a = x + phi.sin();
    let b = y - phi.cos() - 1.0;
    let (u1, theta) = polar(a, b);
    if u1 < 4.0 {
        return None;
    }
    let u = (u1 * u1 - 4.0).sqrt() - 4.0;
    if u < 0.0 {
        return None;
    }
    let alpha = (2.0f64).atan2(u + 4.0);
    let t = normalize_angle(FRAC_PI_2 + theta + alpha);
    let v = normalize_angle(t - phi);
    Some([t, u, v])
}

fn left_right_x_left(x: f64, y: f64, phi: f64) -> Option<[f64; 3]> {
    let a = x - phi.sin();
    let b = y + phi.cos() - 1.0;
    if a.abs() < DEGENERATE_EPS && b.abs() < DEGENERATE_EPS {
        return None;
    }
    let (u1, theta) = polar(a, b);
    if u1 > 4.0 {
        return None;
    }
    let u = clamped_acos(1.0 - u1 * u1 / 8.0)?;
    let mut su = u.sin();
    // near-zero sine with a near-zero center distance leaves the tangent
    // direction undefined
    if su.abs() < 1e-3 {
        su = 0.0;
    }
    if su == 0.0 && u1 < 1e-3 {
        return None;
    }
    let alpha = clamped_asin(2.0 * su / u1)?;
    let t = normalize_angle(FRAC_PI_2 - alpha + theta);
    let v = normalize_angle(t - u - phi);
    Some([t, u, v])
}

fn left_straight_right90_x_left(x: f64, y: f64, phi: f64) -> Option<[f64; 3]> {
    let a = x - phi.sin();
    let b = y + phi.cos() - 1.0;
    let (u1, theta) = polar(a, b);
    if u1 < 2.0 {
        return None;
    }
    let u = (u1 * u1 - 4.0).sqrt() - 2.0;
    if u < 0.0 {
        return None;
    }
    let alpha = (u + 2.0).atan2(2.0);
    let t = normalize_angle(FRAC_PI_2 + theta - alpha);
    let v = normalize_angle(t - FRAC_PI_2 - phi);
    Some([t, u, v])
}

fn left_straight_left90_x_right(x: f64, y: f64, phi: f64) -> Option<[f64; 3]> {
    let a = x + phi.sin();
    let b = y - phi.cos() - 1.0;
    let (u1, theta) = polar(a, b);
    if u1 < 2.0 {
        return None;
    }
    let t = normalize_angle(theta);
    let u = u1 - 2.0;
    let v = normalize_angle(phi - t - FRAC_PI_2);
    Some([t, u, v])
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PI: f64 = 2.0 * PI;

    #[test]
    fn test_catalog_spans_48_words() {
        assert_eq!(SHAPES.len() * SYMMETRIES.len(), 48);
    }

    #[test]
    fn test_straight_ahead_is_pure_s_segment() {
        let word = evaluate(2, Symmetry::Identity, 5.0, 0.0, 0.0).unwrap();
        assert!(word.t.abs() < 1e-12);
        assert!((word.u - 5.0).abs() < 1e-12);
        assert!(word.v.abs() < 1e-12);
        assert!((word.length - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_time_flip_handles_pure_reverse() {
        // straight backward: the identity CSC solution goes the long way
        // around, the time-flipped one is a plain reversed S segment
        let word = evaluate(2, Symmetry::TimeFlip, -5.0, 0.0, 0.0).unwrap();
        assert!((word.length - 5.0).abs() < 1e-12);
        let segments = word.segments();
        assert_eq!(segments[1].steering, Steering::Straight);
        assert!((segments[1].length + 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_magnitudes_are_unsigned() {
        for shape in 0..SHAPES.len() {
            for &symmetry in SYMMETRIES.iter() {
                if let Some(word) = evaluate(shape, symmetry, 1.3, -0.4, 2.1) {
                    assert!(word.t >= 0.0 && word.t < TWO_PI);
                    assert!(word.u >= 0.0);
                    assert!(word.v >= 0.0 && word.v < TWO_PI);
                    assert!(word.length >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_reflect_mirrors_steering() {
        let base = evaluate(3, Symmetry::Identity, 4.0, 1.0, 0.5);
        let mirrored = evaluate(3, Symmetry::Reflect, 4.0, -1.0, -0.5);
        let (base, mirrored) = (base.unwrap(), mirrored.unwrap());
        assert!((base.length - mirrored.length).abs() < 1e-12);
        for (b, m) in base.segments().iter().zip(mirrored.segments()) {
            assert_eq!(b.steering, m.steering.mirrored());
            assert!((b.length - m.length).abs() < 1e-12);
        }
    }

    #[test]
    fn test_length_counts_fixed_quarter_turns() {
        // C|C2SC carries a fixed pi/2 arc that must appear in the length
        if let Some(word) = evaluate(6, Symmetry::Identity, 6.0, 3.0, 1.0) {
            let expected = word.t + FRAC_PI_2 + word.u + word.v;
            assert!((word.length - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        // C|C|C requires the circle centers within four radii
        assert!(left_x_right_x_left(20.0, 0.0, 0.0).is_none());
        // opposite-turn CSC needs at least two radii between centers
        assert!(left_straight_right(0.1, 0.1, 0.0).is_none());
    }
}
