use act_core::{Capability, OwnerMut, OwnerView, TickContext, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{require, require_finite, require_positive, set_velocity, Leaf, Lifecycle};
use crate::ConfigError;

/// Remaining distances below this are covered in the current step.
const ARRIVAL_SNAP: f32 = 1e-4;

/// Move by `vector` at `speed` units per second through the velocity intention.
///
/// Progress is tracked as distance travelled along `vector`, so the last
/// step is shortened to land exactly on target instead of overshooting.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveBy {
    pub vector: Vec2,
    pub speed: f32,
    #[cfg_attr(feature = "serde", serde(skip))]
    direction: Vec2,
    #[cfg_attr(feature = "serde", serde(skip))]
    distance: f32,
    #[cfg_attr(feature = "serde", serde(skip))]
    travelled: f32,
}

impl MoveBy {
    pub fn new(vector: Vec2, speed: f32) -> Self {
        Self {
            vector,
            speed,
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> f32 {
        (self.distance - self.travelled).max(0.0)
    }
}

impl Lifecycle for MoveBy {
    fn start<O>(&mut self, _ctx: &TickContext, _owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        self.travelled = 0.0;
    }

    fn update<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        let remaining = self.remaining();
        if remaining <= 0.0 {
            set_velocity(owner, Vec2::ZERO);
            return;
        }
        if !ctx.has_duration() {
            tracing::warn!(dt = ctx.dt_seconds, "move_by: non-positive tick duration, completing");
            self.travelled = self.distance;
            set_velocity(owner, Vec2::ZERO);
            return;
        }

        let mut step = self.speed * ctx.dt_seconds;
        if step + ARRIVAL_SNAP >= remaining {
            step = remaining;
            self.travelled = self.distance;
        } else {
            self.travelled += step;
        }
        set_velocity(owner, self.direction * (step / ctx.dt_seconds));
    }

    fn is_over(&self) -> bool {
        self.travelled >= self.distance
    }

    fn end<O>(&mut self, _ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        set_velocity(owner, Vec2::ZERO);
    }
}

impl Leaf for MoveBy {
    const KIND: &'static str = "move_by";

    fn init<O>(&mut self, owner: &O) -> Result<(), ConfigError>
    where
        O: OwnerView + ?Sized,
    {
        require(owner, Self::KIND, Capability::Move)?;
        require_positive(Self::KIND, "speed", self.speed)?;
        if !self.vector.is_finite() {
            return Err(ConfigError::InvalidParameter {
                kind: Self::KIND,
                parameter: "vector",
                reason: "must be finite",
            });
        }
        // Zero vector: direction stays zero and the node is over at start.
        self.direction = self.vector.normalize_or_zero();
        self.distance = if self.direction == Vec2::ZERO {
            0.0
        } else {
            self.vector.length()
        };
        Ok(())
    }
}

/// Set a signed ground speed and finish at once.
///
/// The speed is deliberately left in place after `end`; whatever runs next
/// overrides or clears it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StartMoveToward {
    pub speed: f32,
}

impl StartMoveToward {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }
}

impl Lifecycle for StartMoveToward {
    fn start<O>(&mut self, _ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        if let Some(movement) = owner.intentions_mut().movement.as_mut() {
            movement.ground_speed = self.speed;
        }
    }

    fn update<O>(&mut self, _ctx: &TickContext, _owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
    }

    fn is_over(&self) -> bool {
        true
    }
}

impl Leaf for StartMoveToward {
    const KIND: &'static str = "start_move_toward";

    fn init<O>(&mut self, owner: &O) -> Result<(), ConfigError>
    where
        O: OwnerView + ?Sized,
    {
        require(owner, Self::KIND, Capability::Move)?;
        require_finite(Self::KIND, "speed", self.speed)
    }
}

/// Request a jump with `impulse`. Over after its first update.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Jump {
    pub impulse: f32,
    #[cfg_attr(feature = "serde", serde(skip))]
    requested: bool,
}

impl Jump {
    pub fn new(impulse: f32) -> Self {
        Self {
            impulse,
            requested: false,
        }
    }
}

impl Lifecycle for Jump {
    fn start<O>(&mut self, _ctx: &TickContext, _owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        self.requested = false;
    }

    fn update<O>(&mut self, _ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        if self.requested {
            return;
        }
        if let Some(movement) = owner.intentions_mut().movement.as_mut() {
            movement.jump_impulse = self.impulse;
        }
        self.requested = true;
    }

    fn is_over(&self) -> bool {
        self.requested
    }
}

impl Leaf for Jump {
    const KIND: &'static str = "jump";

    fn init<O>(&mut self, owner: &O) -> Result<(), ConfigError>
    where
        O: OwnerView + ?Sized,
    {
        require(owner, Self::KIND, Capability::Move)?;
        require_finite(Self::KIND, "impulse", self.impulse)
    }
}
