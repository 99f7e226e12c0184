//! Run configuration for the headless simulator.

use std::path::Path;

use act_core::{Capability, Vec2};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// How one simulated entity is set up and how long it runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Maximum ticks to simulate
    pub ticks: u64,

    /// Fixed step in seconds
    pub dt_seconds: f32,

    pub start_position: Vec2,

    /// Facing used by forward-aimed leaves and ground movement
    pub forward: Vec2,

    /// Fixed live target, if any
    pub target: Option<Vec2>,

    pub scroll_velocity: Vec2,

    /// Intention records the entity owns
    pub capabilities: Vec<Capability>,

    /// Deactivate the entity at this tick
    pub deactivate_at_tick: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            dt_seconds: default_dt(),
            start_position: Vec2::ZERO,
            forward: Vec2::X,
            target: None,
            scroll_velocity: Vec2::ZERO,
            capabilities: Capability::ALL.to_vec(),
            deactivate_at_tick: None,
        }
    }
}

fn default_ticks() -> u64 {
    600
}

fn default_dt() -> f32 {
    1.0 / 60.0
}

impl RunConfig {
    /// Load from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read run config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse run config from {}", path.display()))?;
        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.dt_seconds.is_finite() && self.dt_seconds > 0.0) {
            bail!("dt_seconds must be positive, got {}", self.dt_seconds);
        }
        if !self.start_position.is_finite() || !self.forward.is_finite() {
            bail!("start_position and forward must be finite");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: RunConfig = serde_yaml::from_str(
            "ticks: 90\ntarget: { x: 3, y: 4 }\ncapabilities: [move, fire]\n",
        )
        .unwrap();

        assert_eq!(config.ticks, 90);
        assert_eq!(config.dt_seconds, 1.0 / 60.0);
        assert_eq!(config.target, Some(Vec2::new(3.0, 4.0)));
        assert_eq!(config.capabilities, vec![Capability::Move, Capability::Fire]);
        assert_eq!(config.forward, Vec2::X);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_step() {
        let config = RunConfig {
            dt_seconds: 0.0,
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
