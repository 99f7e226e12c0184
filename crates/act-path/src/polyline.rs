use act_core::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::curve::{check_finite, segment_of};
use crate::{Curve, PathError};

/// Straight segments through `points`, each segment taking an equal share of `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polyline {
    pub points: Vec<Vec2>,
}

impl Polyline {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn validate(&self) -> Result<(), PathError> {
        if self.points.len() < 2 {
            return Err(PathError::TooFewPoints(self.points.len()));
        }
        check_finite(&self.points)
    }

    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Exact length.
    pub fn length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

impl Curve for Polyline {
    fn point(&self, t: f32) -> Vec2 {
        match self.points.len() {
            0 => Vec2::ZERO,
            1 => self.points[0],
            n => {
                let (i, local) = segment_of(t, n - 1);
                self.points[i].lerp(self.points[i + 1], local)
            }
        }
    }
}
