#![allow(dead_code)]

use act_core::{
    Capability, Intentions, OwnerMut, OwnerView, TickContext, TraceEvent, TraceLog, TraceSink,
    Vec2,
};
use act_tree::{ActionNode, InitReport};

pub const DT: f32 = 1.0 / 60.0;

/// A kinematic test entity that records every lifecycle trace.
#[derive(Debug)]
pub struct Body {
    pub position: Vec2,
    pub forward: Vec2,
    pub target: Option<Vec2>,
    pub scroll: Vec2,
    pub active: bool,
    pub intentions: Intentions,
    pub trace: TraceLog,
}

impl Default for Body {
    fn default() -> Self {
        Self::with_capabilities(&Capability::ALL)
    }
}

impl Body {
    pub fn with_capabilities(capabilities: &[Capability]) -> Self {
        Self {
            position: Vec2::ZERO,
            forward: Vec2::X,
            target: None,
            scroll: Vec2::ZERO,
            active: true,
            intentions: Intentions::with_capabilities(capabilities),
            trace: TraceLog::default(),
        }
    }

    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.intentions
            .movement
            .map(|m| m.velocity)
            .unwrap_or(Vec2::ZERO)
    }

    /// Apply the movement intention for one step.
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity() * dt;
    }

    pub fn fire_directions(&mut self) -> Vec<Vec2> {
        self.intentions
            .fire
            .as_mut()
            .map(|fire| fire.drain_directions())
            .unwrap_or_default()
    }

    pub fn take_fire_once(&mut self) -> Option<Vec2> {
        self.intentions.fire.as_mut().and_then(|fire| fire.take_once())
    }
}

impl OwnerView for Body {
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

impl OwnerMut for Body {
    fn intentions_mut(&mut self) -> &mut Intentions {
        &mut self.intentions
    }

    fn trace(&mut self, event: TraceEvent) {
        self.trace.emit(event);
    }
}

pub fn ctx(tick: u64, dt: f32) -> TickContext {
    TickContext::new(tick, dt)
}

/// Init and start `node` at tick 0, the way a driver would.
pub fn begin(node: &mut ActionNode, body: &mut Body, dt: f32) -> InitReport {
    let ctx = ctx(0, dt);
    let mut report = InitReport::default();
    node.init(&ctx, body, &mut report);
    node.start(&ctx, body);
    report
}

pub fn approx(a: Vec2, b: Vec2) -> bool {
    a.distance(b) < 1e-3
}
