//! A kinematic entity and the actuator that consumes its intentions.

use std::io::Write;

use act_core::{Intentions, OwnerMut, OwnerView, TickContext, TraceEvent, TraceSink, Vec2};
use serde::Serialize;

use crate::config::RunConfig;

/// What the actuator did with one tick's intentions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickRecord {
    pub tick: u64,
    pub position: Vec2,
    pub velocity: Vec2,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shots: Vec<Vec2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throw: Option<(Vec2, f32)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub melee: Option<Vec2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jump: Option<f32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub holding_fire: bool,
}

impl TickRecord {
    /// `true` when the entity moved or requested anything this tick.
    pub fn is_eventful(&self) -> bool {
        self.velocity != Vec2::ZERO
            || !self.shots.is_empty()
            || self.throw.is_some()
            || self.melee.is_some()
            || self.jump.is_some()
            || self.holding_fire
    }
}

/// Writes lifecycle events to stdout as they happen.
pub struct PrintSink {
    pub json: bool,
}

impl TraceSink for PrintSink {
    fn emit(&mut self, event: TraceEvent) {
        let mut out = std::io::stdout().lock();
        let written = if self.json {
            serde_json::to_string(&event)
                .map_err(std::io::Error::from)
                .and_then(|line| writeln!(out, "{line}"))
        } else {
            match event.node {
                Some(node) => writeln!(out, "{:>6}  {} #{}", event.tick, event.tag, node),
                None => writeln!(out, "{:>6}  {}", event.tick, event.tag),
            }
        };
        if let Err(err) = written {
            tracing::warn!(%err, "failed to write trace event");
        }
    }
}

pub struct SimEntity {
    position: Vec2,
    forward: Vec2,
    target: Option<Vec2>,
    scroll: Vec2,
    active: bool,
    intentions: Intentions,
    sink: Box<dyn TraceSink>,
}

impl SimEntity {
    /// Spawn with freshly reset intention records.
    pub fn spawn(config: &RunConfig, sink: Box<dyn TraceSink>) -> Self {
        Self {
            position: config.start_position,
            forward: config.forward.try_normalize().unwrap_or(Vec2::X),
            target: config.target,
            scroll: config.scroll_velocity,
            active: true,
            intentions: Intentions::with_capabilities(&config.capabilities),
            sink,
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Apply and clear the intentions written this tick.
    ///
    /// Velocity and ground speed are continuous and stay set; one-shot
    /// requests are consumed and pattern directions drained.
    pub fn actuate(&mut self, ctx: &TickContext) -> TickRecord {
        let mut record = TickRecord {
            tick: ctx.tick,
            ..TickRecord::default()
        };

        if let Some(movement) = self.intentions.movement.as_mut() {
            let velocity = movement.velocity + self.forward * movement.ground_speed;
            record.velocity = velocity;
            record.jump = movement.take_jump();
            if ctx.has_duration() {
                self.position += velocity * ctx.dt_seconds;
            }
        }
        if let Some(fire) = self.intentions.fire.as_mut() {
            record.shots.extend(fire.take_once());
            record.shots.extend(fire.drain_directions());
            record.holding_fire = fire.hold;
        }
        if let Some(throw) = self.intentions.throw.as_mut() {
            record.throw = throw.take();
        }
        if let Some(melee) = self.intentions.melee.as_mut() {
            record.melee = melee.take();
        }

        record.position = self.position;
        record
    }
}

impl OwnerView for SimEntity {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn forward(&self) -> Vec2 {
        self.forward
    }

    fn target_position(&self) -> Option<Vec2> {
        self.target
    }

    fn scroll_velocity(&self) -> Vec2 {
        self.scroll
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn intentions(&self) -> &Intentions {
        &self.intentions
    }
}

impl OwnerMut for SimEntity {
    fn intentions_mut(&mut self) -> &mut Intentions {
        &mut self.intentions
    }

    fn trace(&mut self, event: TraceEvent) {
        self.sink.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use act_core::{Capability, NullTraceSink};

    fn entity(capabilities: &[Capability]) -> SimEntity {
        let config = RunConfig {
            capabilities: capabilities.to_vec(),
            ..RunConfig::default()
        };
        SimEntity::spawn(&config, Box::new(NullTraceSink))
    }

    #[test]
    fn actuator_consumes_one_shot_requests() {
        let mut sim = entity(&Capability::ALL);
        let fire = sim.intentions_mut().fire.as_mut().unwrap();
        fire.request_once(Vec2::Y);
        fire.directions.push(Vec2::X);
        sim.intentions_mut().throw.as_mut().unwrap().request(Vec2::X, 4.0);

        let ctx = TickContext::new(1, 0.5);
        let first = sim.actuate(&ctx);
        assert_eq!(first.shots, vec![Vec2::Y, Vec2::X]);
        assert_eq!(first.throw, Some((Vec2::X, 4.0)));
        assert!(first.is_eventful());

        let second = sim.actuate(&ctx.next());
        assert!(!second.is_eventful());
    }

    #[test]
    fn velocity_and_ground_speed_integrate() {
        let mut sim = entity(&[Capability::Move]);
        let movement = sim.intentions_mut().movement.as_mut().unwrap();
        movement.velocity = Vec2::new(0.0, 2.0);
        movement.ground_speed = 1.0;

        let record = sim.actuate(&TickContext::new(1, 0.5));

        assert_eq!(record.position, Vec2::new(0.5, 1.0));
        // Continuous intentions persist.
        assert_eq!(sim.actuate(&TickContext::new(2, 0.5)).position, Vec2::new(1.0, 2.0));
    }
}
