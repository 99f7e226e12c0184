use act_core::{OwnerMut, OwnerView, TickContext, TIME_EPSILON};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{require_finite, Leaf, Lifecycle};
use crate::ConfigError;

/// Idles for `duration` seconds. Writes nothing.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Wait {
    pub duration: f32,
    #[cfg_attr(feature = "serde", serde(skip))]
    elapsed: f32,
}

impl Wait {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl Lifecycle for Wait {
    fn start<O>(&mut self, _ctx: &TickContext, _owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        self.elapsed = 0.0;
    }

    fn update<O>(&mut self, ctx: &TickContext, _owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        if ctx.has_duration() {
            self.elapsed += ctx.dt_seconds;
        }
    }

    fn is_over(&self) -> bool {
        self.elapsed + TIME_EPSILON >= self.duration
    }
}

impl Leaf for Wait {
    const KIND: &'static str = "wait";

    fn init<O>(&mut self, _owner: &O) -> Result<(), ConfigError>
    where
        O: OwnerView + ?Sized,
    {
        require_finite(Self::KIND, "duration", self.duration)
    }
}
