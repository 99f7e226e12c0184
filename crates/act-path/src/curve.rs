use act_core::Vec2;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BezierPath, Polyline};

/// Parameter step used for finite-difference speed and tangent estimates.
pub const DEFAULT_PARAM_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("polyline needs at least two points, got {0}")]
    TooFewPoints(usize),

    #[error("bezier path has no curves")]
    NoCurves,

    #[error("control point {0} is not finite")]
    NonFinite(usize),
}

/// A curve parameterized over `[0, 1]`.
pub trait Curve {
    /// Point at `t`, clamped into `[0, 1]`.
    fn point(&self, t: f32) -> Vec2;

    /// World distance per unit of parameter near `t`, by forward difference.
    ///
    /// Returns `0.0` at the end of the curve and on degenerate spans
    /// (coincident control points).
    fn parametric_speed(&self, t: f32, epsilon: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let t1 = (t + epsilon).min(1.0);
        let span = t1 - t;
        if span <= 0.0 {
            return 0.0;
        }
        let speed = self.point(t1).distance(self.point(t)) / span;
        if speed.is_finite() {
            speed
        } else {
            0.0
        }
    }

    /// Unit tangent near `t`. Uses a backward difference at the very end.
    fn tangent(&self, t: f32, epsilon: f32) -> Option<Vec2> {
        let t = t.clamp(0.0, 1.0);
        let (a, b) = if t + epsilon <= 1.0 {
            (t, t + epsilon)
        } else {
            ((t - epsilon).max(0.0), t)
        };
        (self.point(b) - self.point(a)).try_normalize()
    }

    /// Arc length approximated with `samples` chords.
    fn approximate_length(&self, samples: usize) -> f32 {
        let samples = samples.max(1);
        let mut length = 0.0;
        let mut prev = self.point(0.0);
        for i in 1..=samples {
            let p = self.point(i as f32 / samples as f32);
            length += p.distance(prev);
            prev = p;
        }
        length
    }
}

/// Authored path shape.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "shape", rename_all = "snake_case"))]
pub enum Path {
    Polyline(Polyline),
    Bezier(BezierPath),
}

impl Path {
    pub fn validate(&self) -> Result<(), PathError> {
        match self {
            Path::Polyline(p) => p.validate(),
            Path::Bezier(b) => b.validate(),
        }
    }
}

impl Curve for Path {
    fn point(&self, t: f32) -> Vec2 {
        match self {
            Path::Polyline(p) => p.point(t),
            Path::Bezier(b) => b.point(t),
        }
    }
}

impl From<Polyline> for Path {
    fn from(value: Polyline) -> Self {
        Path::Polyline(value)
    }
}

impl From<BezierPath> for Path {
    fn from(value: BezierPath) -> Self {
        Path::Bezier(value)
    }
}

pub(crate) fn check_finite<'a>(
    points: impl IntoIterator<Item = &'a Vec2>,
) -> Result<(), PathError> {
    match points.into_iter().position(|p| !p.is_finite()) {
        Some(i) => Err(PathError::NonFinite(i)),
        None => Ok(()),
    }
}

/// Split `t` into a segment index in `0..count` and the local parameter within it.
pub(crate) fn segment_of(t: f32, count: usize) -> (usize, f32) {
    debug_assert!(count > 0);
    let scaled = t.clamp(0.0, 1.0) * count as f32;
    let index = (scaled.floor() as usize).min(count - 1);
    (index, scaled - index as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_of_clamps_to_last_segment() {
        assert_eq!(segment_of(0.0, 4), (0, 0.0));
        assert_eq!(segment_of(0.5, 4), (2, 0.0));
        assert_eq!(segment_of(1.0, 4), (3, 1.0));
        assert_eq!(segment_of(2.0, 4), (3, 1.0));
    }
}
