use act_core::Capability;
use act_path::PathError;
use thiserror::Error;

/// Authoring mistakes found at `init`. The faulted node is treated as
/// permanently over; the rest of the tree keeps running.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{kind} requires a child node")]
    MissingChild { kind: &'static str },

    #[error("{kind} requires the `{capability}` intention on its owner")]
    MissingCapability {
        kind: &'static str,
        capability: Capability,
    },

    #[error("{kind}: `{parameter}` {reason}")]
    InvalidParameter {
        kind: &'static str,
        parameter: &'static str,
        reason: &'static str,
    },

    #[error("{kind}: invalid path: {source}")]
    Path {
        kind: &'static str,
        #[source]
        source: PathError,
    },

    #[error("composite `{kind}` cannot appear in a flat sequence")]
    NestedInFlatSequence { kind: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeFault {
    /// Pre-order id of the faulted node.
    pub node: u32,
    pub kind: &'static str,
    pub error: ConfigError,
}

/// Outcome of one activation's `init` pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitReport {
    pub faults: Vec<NodeFault>,
    node_count: u32,
}

impl InitReport {
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }

    /// Number of nodes that received an id.
    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    pub(crate) fn next_id(&mut self) -> u32 {
        let id = self.node_count;
        self.node_count += 1;
        id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivationError {
    #[error("no script to activate: the default script is missing and no override was given")]
    MissingScript,
}
