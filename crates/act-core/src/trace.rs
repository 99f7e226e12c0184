#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Tags emitted by the interpreter.
pub mod tags {
    pub const NODE_START: &str = "node.start";
    pub const NODE_END: &str = "node.end";
    pub const NODE_FAULT: &str = "node.fault";
    pub const SCRIPT_ACTIVATE: &str = "script.activate";
    pub const SCRIPT_FINISH: &str = "script.finish";
    pub const SCRIPT_STOP: &str = "script.stop";
}

/// A small lifecycle event.
///
/// Plain data so it can be recorded during simulation and rendered later by
/// tooling. `node` is the pre-order id assigned at init (root = 0).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub tag: Cow<'static, str>,
    pub node: Option<u32>,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            node: None,
        }
    }

    pub fn with_node(mut self, node: u32) -> Self {
        self.node = Some(node);
        self
    }
}

/// Where an owner forwards lifecycle events from `OwnerMut::trace`.
pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

/// Discards every event. The sink for runs that do not trace.
#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

/// Events recorded in emission order, queryable by tag and node.
#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn record(&mut self, tick: u64, tag: &'static str, node: Option<u32>) {
        self.events.push(TraceEvent {
            tick,
            tag: tag.into(),
            node,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Ids of nodes carrying `tag`, in emission order.
    pub fn nodes_tagged(&self, tag: &str) -> Vec<u32> {
        self.events
            .iter()
            .filter(|e| e.tag == tag)
            .filter_map(|e| e.node)
            .collect()
    }

    pub fn count(&self, tag: &str, node: u32) -> usize {
        self.events
            .iter()
            .filter(|e| e.tag == tag && e.node == Some(node))
            .count()
    }
}

impl TraceSink for TraceLog {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}
