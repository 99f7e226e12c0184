use act_core::{Capability, OwnerMut, OwnerView, TickContext, Vec2};
use act_path::{BezierPath, Curve, Path, DEFAULT_PARAM_EPSILON};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{require, require_positive, set_velocity, Leaf, Lifecycle};
use crate::ConfigError;

/// Parametric speeds at or below this are treated as a degenerate path.
const MIN_PARAMETRIC_SPEED: f32 = 1e-6;

/// Parameters this close to the end snap onto it.
const END_SNAP: f32 = 1e-4;

/// Open-loop follower shared by the path leaves.
///
/// The owner's position at `start` becomes the path's origin: the point the
/// follower aims for at parameter `t` is `origin + curve(t) + offset(t)`,
/// and the velocity written each tick is the change in that point over `dt`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct PathFollower {
    t: f32,
    origin: Vec2,
    last: Vec2,
}

impl PathFollower {
    fn start<C: Curve>(&mut self, curve: &C, offset: Vec2, position: Vec2) {
        self.t = 0.0;
        self.origin = position - (curve.point(0.0) + local_offset(curve, 0.0, offset));
        self.last = position;
    }

    fn target<C: Curve>(&self, curve: &C, offset: Vec2, t: f32) -> Vec2 {
        self.origin + curve.point(t) + local_offset(curve, t, offset)
    }

    /// Move the parameter to `t` and return the velocity that gets there in `dt`.
    fn advance_to<C: Curve>(&mut self, curve: &C, offset: Vec2, t: f32, dt: f32) -> Vec2 {
        let t = if 1.0 - t <= END_SNAP { 1.0 } else { t.min(1.0) };
        let next = self.target(curve, offset, t);
        let velocity = (next - self.last) / dt;
        self.last = next;
        self.t = t;
        velocity
    }

    fn snap_to_end(&mut self) {
        self.t = 1.0;
    }

    fn is_finished(&self) -> bool {
        self.t >= 1.0
    }
}

/// `offset` expressed in the curve's tangent frame at `t`: `x` along the
/// tangent, `y` along its left normal.
fn local_offset<C: Curve>(curve: &C, t: f32, offset: Vec2) -> Vec2 {
    if offset == Vec2::ZERO {
        return Vec2::ZERO;
    }
    let tangent = curve.tangent(t, DEFAULT_PARAM_EPSILON).unwrap_or(Vec2::X);
    tangent * offset.x + tangent.perp() * offset.y
}

/// Follow `path` at a constant world `speed`.
///
/// Each tick the local parametric speed is estimated by finite difference
/// and the requested world speed divided by it to get the parameter rate.
/// `offset` lets several entities trace parallel curves off one authored path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveAlongPath {
    pub path: Path,
    pub speed: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub offset: Vec2,
    #[cfg_attr(feature = "serde", serde(skip))]
    follower: PathFollower,
}

impl MoveAlongPath {
    pub fn new(path: impl Into<Path>, speed: f32) -> Self {
        Self {
            path: path.into(),
            speed,
            offset: Vec2::ZERO,
            follower: PathFollower::default(),
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Current path parameter in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.follower.t
    }
}

impl Lifecycle for MoveAlongPath {
    fn start<O>(&mut self, _ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        let position = owner.position();
        self.follower.start(&self.path, self.offset, position);
    }

    fn update<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        if self.follower.is_finished() {
            set_velocity(owner, Vec2::ZERO);
            return;
        }
        if !ctx.has_duration() {
            tracing::warn!(
                dt = ctx.dt_seconds,
                "move_along_path: non-positive tick duration, completing"
            );
            self.follower.snap_to_end();
            set_velocity(owner, Vec2::ZERO);
            return;
        }

        let parametric_speed = self
            .path
            .parametric_speed(self.follower.t, DEFAULT_PARAM_EPSILON);
        if parametric_speed <= MIN_PARAMETRIC_SPEED {
            tracing::warn!(
                t = self.follower.t,
                "move_along_path: degenerate path, snapping to end"
            );
            self.follower.snap_to_end();
            set_velocity(owner, Vec2::ZERO);
            return;
        }

        let t = self.follower.t + self.speed * ctx.dt_seconds / parametric_speed;
        let velocity = self
            .follower
            .advance_to(&self.path, self.offset, t, ctx.dt_seconds);
        set_velocity(owner, velocity + owner.scroll_velocity());
    }

    fn is_over(&self) -> bool {
        self.follower.is_finished()
    }

    fn end<O>(&mut self, _ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        set_velocity(owner, Vec2::ZERO);
    }
}

impl Leaf for MoveAlongPath {
    const KIND: &'static str = "move_along_path";

    fn init<O>(&mut self, owner: &O) -> Result<(), ConfigError>
    where
        O: OwnerView + ?Sized,
    {
        require(owner, Self::KIND, Capability::Move)?;
        require_positive(Self::KIND, "speed", self.speed)?;
        self.path.validate().map_err(|source| ConfigError::Path {
            kind: Self::KIND,
            source,
        })
    }
}

/// Follow a Bezier chain in exactly `duration` seconds.
///
/// The curvilinear speed (curves per second) is fixed at `init`, so every
/// curve takes the same time whatever its length. World speed is therefore
/// only uniform when tangents are symmetric at shared joints.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveAlongBezierPath {
    pub path: BezierPath,
    pub duration: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub offset: Vec2,
    #[cfg_attr(feature = "serde", serde(skip))]
    curve_speed: f32,
    #[cfg_attr(feature = "serde", serde(skip))]
    follower: PathFollower,
}

impl MoveAlongBezierPath {
    pub fn new(path: BezierPath, duration: f32) -> Self {
        Self {
            path,
            duration,
            offset: Vec2::ZERO,
            curve_speed: 0.0,
            follower: PathFollower::default(),
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn progress(&self) -> f32 {
        self.follower.t
    }

    /// Curves traversed per second, as computed at `init`.
    pub fn curve_speed(&self) -> f32 {
        self.curve_speed
    }
}

impl Lifecycle for MoveAlongBezierPath {
    fn start<O>(&mut self, _ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        let position = owner.position();
        self.follower.start(&self.path, self.offset, position);
    }

    fn update<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        if self.follower.is_finished() {
            set_velocity(owner, Vec2::ZERO);
            return;
        }
        if !ctx.has_duration() {
            tracing::warn!(
                dt = ctx.dt_seconds,
                "move_along_bezier_path: non-positive tick duration, completing"
            );
            self.follower.snap_to_end();
            set_velocity(owner, Vec2::ZERO);
            return;
        }

        let curves = self.path.curve_count() as f32;
        let t = self.follower.t + self.curve_speed * ctx.dt_seconds / curves;
        let velocity = self
            .follower
            .advance_to(&self.path, self.offset, t, ctx.dt_seconds);
        set_velocity(owner, velocity + owner.scroll_velocity());
    }

    fn is_over(&self) -> bool {
        self.follower.is_finished()
    }

    fn end<O>(&mut self, _ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        set_velocity(owner, Vec2::ZERO);
    }
}

impl Leaf for MoveAlongBezierPath {
    const KIND: &'static str = "move_along_bezier_path";

    fn init<O>(&mut self, owner: &O) -> Result<(), ConfigError>
    where
        O: OwnerView + ?Sized,
    {
        require(owner, Self::KIND, Capability::Move)?;
        require_positive(Self::KIND, "duration", self.duration)?;
        self.path.validate().map_err(|source| ConfigError::Path {
            kind: Self::KIND,
            source,
        })?;
        self.curve_speed = self.path.curve_count() as f32 / self.duration;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use act_path::Polyline;

    #[test]
    fn follower_starts_at_owner_position_with_offset() {
        let line = Polyline::new(vec![Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0)]);
        let mut follower = PathFollower::default();
        follower.start(&line, Vec2::new(0.0, 2.0), Vec2::new(1.0, 1.0));

        assert_eq!(follower.target(&line, Vec2::new(0.0, 2.0), 0.0), Vec2::new(1.0, 1.0));
        // Offset is perpendicular to a horizontal tangent, so the end sits 10 units right.
        let end = follower.target(&line, Vec2::new(0.0, 2.0), 1.0);
        assert!(end.distance(Vec2::new(11.0, 1.0)) < 1e-4);
    }

    #[test]
    fn advance_snaps_near_end() {
        let line = Polyline::new(vec![Vec2::ZERO, Vec2::new(1.0, 0.0)]);
        let mut follower = PathFollower::default();
        follower.start(&line, Vec2::ZERO, Vec2::ZERO);
        follower.advance_to(&line, Vec2::ZERO, 1.0 - 1e-5, 0.1);
        assert!(follower.is_finished());
    }
}
