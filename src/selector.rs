//! Minimum-length word selection
//!
//! Evaluates all 48 (shape x symmetry) candidates against a canonical
//! relative pose and keeps the shortest valid one. Enumeration order is
//! shape index ascending, then symmetry index ascending, and only a
//! strictly shorter candidate replaces the current best, so ties resolve
//! deterministically to the earliest candidate.

use ordered_float::OrderedFloat;

use crate::common::{CurveError, CurveResult};
use crate::words::{evaluate, Word, SHAPES, SYMMETRIES};

/// Shortest feasible word for a canonical relative pose.
///
/// `NoFeasiblePath` should be unreachable for finite poses (the 48-word
/// family is complete for the Reeds-Shepp car); when it surfaces it points
/// at a domain-tolerance defect and is reported rather than defaulted.
pub fn shortest_word(x: f64, y: f64, phi: f64) -> CurveResult<Word> {
    let mut best: Option<Word> = None;
    for shape in 0..SHAPES.len() {
        for &symmetry in SYMMETRIES.iter() {
            let word = match evaluate(shape, symmetry, x, y, phi) {
                Some(word) if word.length.is_finite() => word,
                _ => continue,
            };
            let shorter = match &best {
                None => true,
                Some(current) => OrderedFloat(word.length) < OrderedFloat(current.length),
            };
            if shorter {
                best = Some(word);
            }
        }
    }
    best.ok_or(CurveError::NoFeasiblePath)
}
