//! One-shot attack requests. These only ask for the attack; hit detection
//! and animation timing belong to whatever consumes the intention.

use act_core::{Capability, OwnerMut, OwnerView, TickContext};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{require, require_finite, require_positive, Aim, Leaf, Lifecycle};
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeleeAttack {
    #[cfg_attr(feature = "serde", serde(default))]
    pub aim: Aim,
    #[cfg_attr(feature = "serde", serde(default))]
    pub angle: f32,
    #[cfg_attr(feature = "serde", serde(skip))]
    done: bool,
}

impl MeleeAttack {
    pub fn new(aim: Aim) -> Self {
        Self {
            aim,
            ..Self::default()
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }
}

impl Lifecycle for MeleeAttack {
    fn start<O>(&mut self, _ctx: &TickContext, _owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        self.done = false;
    }

    fn update<O>(&mut self, _ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        if self.done {
            return;
        }
        let direction = self.aim.direction(&*owner).rotate_deg(self.angle);
        if let Some(melee) = owner.intentions_mut().melee.as_mut() {
            melee.request(direction);
        }
        self.done = true;
    }

    fn is_over(&self) -> bool {
        self.done
    }
}

impl Leaf for MeleeAttack {
    const KIND: &'static str = "melee_attack";

    fn init<O>(&mut self, owner: &O) -> Result<(), ConfigError>
    where
        O: OwnerView + ?Sized,
    {
        require(owner, Self::KIND, Capability::Melee)?;
        require_finite(Self::KIND, "angle", self.angle)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Throw {
    #[cfg_attr(feature = "serde", serde(default))]
    pub aim: Aim,
    #[cfg_attr(feature = "serde", serde(default))]
    pub angle: f32,
    pub speed: f32,
    #[cfg_attr(feature = "serde", serde(skip))]
    done: bool,
}

impl Throw {
    pub fn new(aim: Aim, speed: f32) -> Self {
        Self {
            aim,
            speed,
            ..Self::default()
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }
}

impl Lifecycle for Throw {
    fn start<O>(&mut self, _ctx: &TickContext, _owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        self.done = false;
    }

    fn update<O>(&mut self, _ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        if self.done {
            return;
        }
        let direction = self.aim.direction(&*owner).rotate_deg(self.angle);
        if let Some(throw) = owner.intentions_mut().throw.as_mut() {
            throw.request(direction, self.speed);
        }
        self.done = true;
    }

    fn is_over(&self) -> bool {
        self.done
    }
}

impl Leaf for Throw {
    const KIND: &'static str = "throw";

    fn init<O>(&mut self, owner: &O) -> Result<(), ConfigError>
    where
        O: OwnerView + ?Sized,
    {
        require(owner, Self::KIND, Capability::Throw)?;
        require_finite(Self::KIND, "angle", self.angle)?;
        require_positive(Self::KIND, "speed", self.speed)
    }
}
