//! Intention records.
//!
//! Plain data owned by the entity. Leaves only write these; actuators
//! outside the interpreter read and clear them once per tick.

use crate::{Capability, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Movement request. `velocity` is used by flying movers, `ground_speed`
/// and `jump_impulse` by grounded ones.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveIntention {
    pub velocity: Vec2,
    pub ground_speed: f32,
    pub jump_impulse: f32,
}

impl MoveIntention {
    /// Consume a pending jump.
    pub fn take_jump(&mut self) -> Option<f32> {
        let impulse = core::mem::take(&mut self.jump_impulse);
        (impulse != 0.0).then_some(impulse)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FireIntention {
    /// Continuous fire, held until someone clears it.
    pub hold: bool,
    /// One-shot request, consumed on read.
    pub fire_once: bool,
    /// Heading for `hold` and `fire_once` shots.
    pub aim: Vec2,
    /// Explicit per-bullet headings for patterns. Cleared every tick.
    pub directions: Vec<Vec2>,
}

impl FireIntention {
    pub fn request_once(&mut self, aim: Vec2) {
        self.fire_once = true;
        self.aim = aim;
    }

    pub fn take_once(&mut self) -> Option<Vec2> {
        if core::mem::take(&mut self.fire_once) {
            Some(self.aim)
        } else {
            None
        }
    }

    pub fn drain_directions(&mut self) -> Vec<Vec2> {
        core::mem::take(&mut self.directions)
    }

    pub fn clear(&mut self) {
        self.hold = false;
        self.fire_once = false;
        self.aim = Vec2::ZERO;
        self.directions.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThrowIntention {
    pub start: bool,
    pub direction: Vec2,
    pub speed: f32,
}

impl ThrowIntention {
    pub fn request(&mut self, direction: Vec2, speed: f32) {
        self.start = true;
        self.direction = direction;
        self.speed = speed;
    }

    /// Consume a pending throw as `(direction, speed)`.
    pub fn take(&mut self) -> Option<(Vec2, f32)> {
        if core::mem::take(&mut self.start) {
            Some((self.direction, self.speed))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeleeIntention {
    pub start: bool,
    pub direction: Vec2,
}

impl MeleeIntention {
    pub fn request(&mut self, direction: Vec2) {
        self.start = true;
        self.direction = direction;
    }

    pub fn take(&mut self) -> Option<Vec2> {
        if core::mem::take(&mut self.start) {
            Some(self.direction)
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The set of intention records one entity owns. A `None` slot means the
/// entity lacks that capability.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Intentions {
    pub movement: Option<MoveIntention>,
    pub fire: Option<FireIntention>,
    pub throw: Option<ThrowIntention>,
    pub melee: Option<MeleeIntention>,
}

impl Intentions {
    pub fn with_capabilities(capabilities: &[Capability]) -> Self {
        let mut intentions = Self::default();
        for capability in capabilities {
            match capability {
                Capability::Move => intentions.movement = Some(MoveIntention::default()),
                Capability::Fire => intentions.fire = Some(FireIntention::default()),
                Capability::Throw => intentions.throw = Some(ThrowIntention::default()),
                Capability::Melee => intentions.melee = Some(MeleeIntention::default()),
            }
        }
        intentions
    }

    pub fn all() -> Self {
        Self::with_capabilities(&Capability::ALL)
    }

    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Move => self.movement.is_some(),
            Capability::Fire => self.fire.is_some(),
            Capability::Throw => self.throw.is_some(),
            Capability::Melee => self.melee.is_some(),
        }
    }

    /// Zero every record the entity carries, as on (re)spawn.
    pub fn reset(&mut self) {
        if let Some(m) = self.movement.as_mut() {
            m.clear();
        }
        if let Some(f) = self.fire.as_mut() {
            f.clear();
        }
        if let Some(t) = self.throw.as_mut() {
            t.clear();
        }
        if let Some(m) = self.melee.as_mut() {
            m.clear();
        }
    }
}
