use core::fmt;

use crate::{Intentions, TraceEvent, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An intention record an owner may or may not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Capability {
    Move,
    Fire,
    Throw,
    Melee,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::Move,
        Capability::Fire,
        Capability::Throw,
        Capability::Melee,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Move => "move",
            Capability::Fire => "fire",
            Capability::Throw => "throw",
            Capability::Melee => "melee",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read access to the entity an action tree is attached to.
///
/// World lookups that leaves need (the live target, the scrolling frame)
/// are capabilities of the owner, so tests can supply fakes.
pub trait OwnerView {
    fn position(&self) -> Vec2;

    /// Fixed facing used by `Forward` aiming.
    fn forward(&self) -> Vec2 {
        Vec2::X
    }

    /// Position of the live target, if one exists this tick.
    fn target_position(&self) -> Option<Vec2> {
        None
    }

    /// Velocity of the scrolling frame that path-following leaves compensate for.
    fn scroll_velocity(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// `false` once the entity is disabled or despawning. Folded into every
    /// node's over-or-deactivated check.
    fn is_active(&self) -> bool {
        true
    }

    fn intentions(&self) -> &Intentions;

    fn has_capability(&self, capability: Capability) -> bool {
        self.intentions().has(capability)
    }
}

/// Write access: the intention records leaves steer the entity through.
pub trait OwnerMut: OwnerView {
    fn intentions_mut(&mut self) -> &mut Intentions;

    /// Lifecycle trace hook. Dropped unless the owner records it.
    fn trace(&mut self, _event: TraceEvent) {}
}
