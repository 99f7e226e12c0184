use act_core::{Capability, OwnerMut, OwnerView, TickContext, TIME_EPSILON};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{require, require_finite, Aim, Leaf, Lifecycle};
use crate::ConfigError;

/// Fire one bullet, `angle` degrees off the aim direction. Over after its
/// first update.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShootSingle {
    #[cfg_attr(feature = "serde", serde(default))]
    pub angle: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub aim: Aim,
    #[cfg_attr(feature = "serde", serde(skip))]
    fired: bool,
}

impl ShootSingle {
    pub fn new(angle: f32, aim: Aim) -> Self {
        Self {
            angle,
            aim,
            fired: false,
        }
    }
}

impl Lifecycle for ShootSingle {
    fn start<O>(&mut self, _ctx: &TickContext, _owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        self.fired = false;
    }

    fn update<O>(&mut self, _ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        if self.fired {
            return;
        }
        let direction = self.aim.direction(&*owner).rotate_deg(self.angle);
        if let Some(fire) = owner.intentions_mut().fire.as_mut() {
            fire.request_once(direction);
        }
        self.fired = true;
    }

    fn is_over(&self) -> bool {
        self.fired
    }
}

impl Leaf for ShootSingle {
    const KIND: &'static str = "shoot_single";

    fn init<O>(&mut self, owner: &O) -> Result<(), ConfigError>
    where
        O: OwnerView + ?Sized,
    {
        require(owner, Self::KIND, Capability::Fire)?;
        require_finite(Self::KIND, "angle", self.angle)
    }
}

/// Spread `bullet_count` shots linearly from `angle_start` to `angle_end`,
/// both inclusive, over `duration` seconds.
///
/// The first shot leaves on the first update and the rest at uniform
/// intervals of `duration / (bullet_count - 1)`. Each tick emits every shot
/// that has come due, each with a freshly resolved aim direction. With
/// `duration <= 0` the whole pattern fires on the first update.
///
/// The end angle is inclusive even for a full turn, so `-180..180` fires
/// its first and last bullets along the same heading.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShootPattern {
    pub angle_start: f32,
    pub angle_end: f32,
    pub bullet_count: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub aim: Aim,
    #[cfg_attr(feature = "serde", serde(skip))]
    elapsed: f32,
    #[cfg_attr(feature = "serde", serde(skip))]
    fired: u32,
}

impl ShootPattern {
    pub fn new(angle_start: f32, angle_end: f32, bullet_count: u32, duration: f32) -> Self {
        Self {
            angle_start,
            angle_end,
            bullet_count,
            duration,
            ..Self::default()
        }
    }

    pub fn with_aim(mut self, aim: Aim) -> Self {
        self.aim = aim;
        self
    }

    pub fn fired(&self) -> u32 {
        self.fired
    }

    /// Shots that should have left by `elapsed` seconds into the pattern.
    pub fn shots_due(&self, elapsed: f32) -> u32 {
        let count = self.bullet_count;
        if count == 0 {
            return 0;
        }
        if self.duration <= 0.0 || count == 1 {
            return count;
        }
        let interval = self.duration / (count - 1) as f32;
        // Clamp before the cast: a tiny interval makes the quotient huge.
        let steps = ((elapsed + TIME_EPSILON) / interval)
            .floor()
            .min((count - 1) as f32);
        steps as u32 + 1
    }

    /// Angle of shot `index`, in degrees relative to the aim direction.
    pub fn angle_of(&self, index: u32) -> f32 {
        if self.bullet_count <= 1 {
            return self.angle_start;
        }
        let fraction = index as f32 / (self.bullet_count - 1) as f32;
        self.angle_start + (self.angle_end - self.angle_start) * fraction
    }

    fn emit<O>(&mut self, owner: &mut O, due: u32)
    where
        O: OwnerMut + ?Sized,
    {
        while self.fired < due {
            let direction = self
                .aim
                .direction(&*owner)
                .rotate_deg(self.angle_of(self.fired));
            if let Some(fire) = owner.intentions_mut().fire.as_mut() {
                fire.directions.push(direction);
            }
            self.fired += 1;
        }
    }
}

impl Lifecycle for ShootPattern {
    fn start<O>(&mut self, _ctx: &TickContext, _owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        self.elapsed = 0.0;
        self.fired = 0;
    }

    fn update<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        if self.is_over() {
            return;
        }
        let due = if self.duration > 0.0 && !ctx.has_duration() {
            tracing::warn!(
                dt = ctx.dt_seconds,
                "shoot_pattern: non-positive tick duration, firing the rest"
            );
            self.bullet_count
        } else {
            self.shots_due(self.elapsed)
        };
        self.emit(owner, due);
        if ctx.has_duration() {
            self.elapsed += ctx.dt_seconds;
        }
    }

    fn is_over(&self) -> bool {
        self.fired >= self.bullet_count
    }
}

impl Leaf for ShootPattern {
    const KIND: &'static str = "shoot_pattern";

    fn init<O>(&mut self, owner: &O) -> Result<(), ConfigError>
    where
        O: OwnerView + ?Sized,
    {
        require(owner, Self::KIND, Capability::Fire)?;
        require_finite(Self::KIND, "angle_start", self.angle_start)?;
        require_finite(Self::KIND, "angle_end", self.angle_end)?;
        require_finite(Self::KIND, "duration", self.duration)
    }
}
