use act_core::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::curve::{check_finite, segment_of};
use crate::{Curve, PathError};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CubicBezier {
    pub start: Vec2,
    pub start_handle: Vec2,
    pub end_handle: Vec2,
    pub end: Vec2,
}

impl CubicBezier {
    pub fn new(start: Vec2, start_handle: Vec2, end_handle: Vec2, end: Vec2) -> Self {
        Self {
            start,
            start_handle,
            end_handle,
            end,
        }
    }

    /// Straight segment with handles at the thirds, so parameter speed is uniform.
    pub fn line(start: Vec2, end: Vec2) -> Self {
        Self::new(start, start.lerp(end, 1.0 / 3.0), start.lerp(end, 2.0 / 3.0), end)
    }

    pub fn eval(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        self.start * (u * u * u)
            + self.start_handle * (3.0 * u * u * t)
            + self.end_handle * (3.0 * u * t * t)
            + self.end * (t * t * t)
    }
}

/// Chain of cubic curves, each taking an equal share of `[0, 1]`.
///
/// Curves are not re-parameterized by arc length: a follower moving at
/// constant parameter rate covers each curve in the same time, whatever its
/// length.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BezierPath {
    pub curves: Vec<CubicBezier>,
}

impl BezierPath {
    pub fn new(curves: Vec<CubicBezier>) -> Self {
        Self { curves }
    }

    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    pub fn validate(&self) -> Result<(), PathError> {
        if self.curves.is_empty() {
            return Err(PathError::NoCurves);
        }
        check_finite(
            self.curves
                .iter()
                .flat_map(|c| [&c.start, &c.start_handle, &c.end_handle, &c.end]),
        )
    }
}

impl Curve for BezierPath {
    fn point(&self, t: f32) -> Vec2 {
        if self.curves.is_empty() {
            return Vec2::ZERO;
        }
        let (i, local) = segment_of(t, self.curves.len());
        self.curves[i].eval(local)
    }
}
