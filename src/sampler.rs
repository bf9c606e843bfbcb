//! Path reconstruction and discretization
//!
//! Walks the segments of a selected word in canonical space (unit turning
//! radius, start at the origin), emitting a pose every `step` canonical
//! length units. The exact segment endpoint always closes a segment, so
//! quantization error never crosses a segment boundary, and segment-start
//! poses are not re-emitted. The first sample is therefore the origin pose
//! and the last is the canonical target.

use crate::common::Pose2D;
use crate::words::{Segment, Steering, Word};

/// Segments shorter than this contribute no motion and are skipped
const MIN_SEGMENT: f64 = 1e-12;

/// Pose after driving a signed arc length `s` from `start` under one
/// steering primitive. Unit curvature, so `s` is also the swept angle on
/// turning segments; negative `s` is backward motion.
fn advance(start: &Pose2D, steering: Steering, s: f64) -> Pose2D {
    let (x, y, yaw) = (start.x, start.y, start.yaw);
    match steering {
        Steering::Straight => Pose2D::new(x + s * yaw.cos(), y + s * yaw.sin(), yaw),
        Steering::Left => Pose2D::new(
            x + (yaw + s).sin() - yaw.sin(),
            y - (yaw + s).cos() + yaw.cos(),
            yaw + s,
        ),
        Steering::Right => Pose2D::new(
            x - (yaw - s).sin() + yaw.sin(),
            y + (yaw - s).cos() - yaw.cos(),
            yaw - s,
        ),
    }
}

/// Discretize a word into canonical poses at the given canonical step.
///
/// The running pose is kept unnormalized between segments so headings stay
/// continuous; callers normalize on output.
pub fn sample_word(word: &Word, step: f64) -> Vec<Pose2D> {
    let mut poses = vec![Pose2D::origin()];
    let mut cursor = Pose2D::origin();

    for segment in word.segments() {
        cursor = sample_segment(&segment, cursor, step, &mut poses);
    }
    poses
}

fn sample_segment(
    segment: &Segment,
    start: Pose2D,
    step: f64,
    poses: &mut Vec<Pose2D>,
) -> Pose2D {
    let span = segment.length.abs();
    if span < MIN_SEGMENT {
        return start;
    }
    let sign = segment.length.signum();
    let count = (span / step).ceil() as usize;
    for k in 1..count {
        poses.push(advance(&start, segment.steering, sign * (k as f64) * step));
    }
    let end = advance(&start, segment.steering, segment.length);
    poses.push(end);
    end
}
