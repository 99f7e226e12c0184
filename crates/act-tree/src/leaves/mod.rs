//! Leaf actions.
//!
//! Leaves steer their owner only by writing intention records. Completion
//! is always derived from a leaf's own progress counters, never from reading
//! an intention back.

use act_core::{Capability, OwnerMut, OwnerView, TickContext, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ConfigError;

mod movement;
mod path;
mod shoot;
mod strike;
mod wait;

pub use movement::{Jump, MoveBy, StartMoveToward};
pub use path::{MoveAlongBezierPath, MoveAlongPath};
pub use shoot::{ShootPattern, ShootSingle};
pub use strike::{MeleeAttack, Throw};
pub use wait::Wait;

/// The four runtime operations every node kind provides.
pub trait Lifecycle {
    /// Reset progress to its initial value.
    fn start<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized;

    /// Advance by one tick.
    fn update<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized;

    /// Pure completion query.
    fn is_over(&self) -> bool;

    /// Clear any continuous intention this node was driving.
    fn end<O>(&mut self, _ctx: &TickContext, _owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
    }
}

pub trait Leaf: Lifecycle {
    const KIND: &'static str;

    /// Validate parameters against `owner` and precompute derived constants.
    fn init<O>(&mut self, _owner: &O) -> Result<(), ConfigError>
    where
        O: OwnerView + ?Sized,
    {
        Ok(())
    }
}

/// Where a directional leaf takes its reference heading from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Aim {
    /// The owner's fixed forward.
    #[default]
    Forward,
    /// Toward the live target, falling back to forward when there is none.
    Target,
}

impl Aim {
    pub fn direction<O>(self, owner: &O) -> Vec2
    where
        O: OwnerView + ?Sized,
    {
        let forward = owner.forward().try_normalize().unwrap_or(Vec2::X);
        match self {
            Aim::Forward => forward,
            Aim::Target => match owner
                .target_position()
                .and_then(|target| (target - owner.position()).try_normalize())
            {
                Some(direction) => direction,
                None => {
                    tracing::debug!("no live target, aiming forward");
                    forward
                }
            },
        }
    }
}

pub(crate) fn require<O>(
    owner: &O,
    kind: &'static str,
    capability: Capability,
) -> Result<(), ConfigError>
where
    O: OwnerView + ?Sized,
{
    if owner.has_capability(capability) {
        Ok(())
    } else {
        Err(ConfigError::MissingCapability { kind, capability })
    }
}

pub(crate) fn require_finite(
    kind: &'static str,
    parameter: &'static str,
    value: f32,
) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            kind,
            parameter,
            reason: "must be finite",
        })
    }
}

pub(crate) fn require_positive(
    kind: &'static str,
    parameter: &'static str,
    value: f32,
) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            kind,
            parameter,
            reason: "must be positive and finite",
        })
    }
}

pub(crate) fn set_velocity<O>(owner: &mut O, velocity: Vec2)
where
    O: OwnerMut + ?Sized,
{
    if let Some(movement) = owner.intentions_mut().movement.as_mut() {
        movement.velocity = velocity;
    }
}
