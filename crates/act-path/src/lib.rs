//! Path geometry for path-following actions.
//!
//! Paths are evaluated at a normalized parameter `t` in `[0, 1]`. Nothing
//! here knows about ticks or intentions; the interpreter calls in to sample
//! points and estimate how fast the parameter moves through world space.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod bezier;
pub mod curve;
pub mod polyline;

pub use bezier::{BezierPath, CubicBezier};
pub use curve::{Curve, Path, PathError, DEFAULT_PARAM_EPSILON};
pub use polyline::Polyline;
