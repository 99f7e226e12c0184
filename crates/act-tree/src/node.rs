use act_core::{tags, OwnerMut, OwnerView, TickContext, TraceEvent};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::composite::{Parallel, Repeat, Sequence};
use crate::leaves::{
    Jump, Leaf, Lifecycle, MeleeAttack, MoveAlongBezierPath, MoveAlongPath, MoveBy, ShootPattern,
    ShootSingle, StartMoveToward, Throw, Wait,
};
use crate::{ConfigError, InitReport, NodeFault};

/// The closed set of node kinds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum NodeKind {
    Wait(Wait),
    MoveBy(MoveBy),
    MoveAlongPath(MoveAlongPath),
    MoveAlongBezierPath(MoveAlongBezierPath),
    Jump(Jump),
    ShootSingle(ShootSingle),
    ShootPattern(ShootPattern),
    MeleeAttack(MeleeAttack),
    Throw(Throw),
    StartMoveToward(StartMoveToward),
    Sequence(Sequence),
    Parallel(Parallel),
    Repeat(Repeat),
}

/// Run `$body` with `$node` bound to whichever variant `$kind` holds.
macro_rules! dispatch {
    ($kind:expr, $node:ident => $body:expr) => {
        match $kind {
            NodeKind::Wait($node) => $body,
            NodeKind::MoveBy($node) => $body,
            NodeKind::MoveAlongPath($node) => $body,
            NodeKind::MoveAlongBezierPath($node) => $body,
            NodeKind::Jump($node) => $body,
            NodeKind::ShootSingle($node) => $body,
            NodeKind::ShootPattern($node) => $body,
            NodeKind::MeleeAttack($node) => $body,
            NodeKind::Throw($node) => $body,
            NodeKind::StartMoveToward($node) => $body,
            NodeKind::Sequence($node) => $body,
            NodeKind::Parallel($node) => $body,
            NodeKind::Repeat($node) => $body,
        }
    };
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Wait(_) => Wait::KIND,
            NodeKind::MoveBy(_) => MoveBy::KIND,
            NodeKind::MoveAlongPath(_) => MoveAlongPath::KIND,
            NodeKind::MoveAlongBezierPath(_) => MoveAlongBezierPath::KIND,
            NodeKind::Jump(_) => Jump::KIND,
            NodeKind::ShootSingle(_) => ShootSingle::KIND,
            NodeKind::ShootPattern(_) => ShootPattern::KIND,
            NodeKind::MeleeAttack(_) => MeleeAttack::KIND,
            NodeKind::Throw(_) => Throw::KIND,
            NodeKind::StartMoveToward(_) => StartMoveToward::KIND,
            NodeKind::Sequence(_) => Sequence::KIND,
            NodeKind::Parallel(_) => Parallel::KIND,
            NodeKind::Repeat(_) => Repeat::KIND,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            NodeKind::Sequence(_) | NodeKind::Parallel(_) | NodeKind::Repeat(_)
        )
    }

    fn init_leaf<O>(&mut self, owner: &O) -> Result<(), ConfigError>
    where
        O: OwnerView + ?Sized,
    {
        match self {
            NodeKind::Wait(n) => n.init(owner),
            NodeKind::MoveBy(n) => n.init(owner),
            NodeKind::MoveAlongPath(n) => n.init(owner),
            NodeKind::MoveAlongBezierPath(n) => n.init(owner),
            NodeKind::Jump(n) => n.init(owner),
            NodeKind::ShootSingle(n) => n.init(owner),
            NodeKind::ShootPattern(n) => n.init(owner),
            NodeKind::MeleeAttack(n) => n.init(owner),
            NodeKind::Throw(n) => n.init(owner),
            NodeKind::StartMoveToward(n) => n.init(owner),
            NodeKind::Sequence(_) | NodeKind::Parallel(_) | NodeKind::Repeat(_) => Ok(()),
        }
    }
}

macro_rules! impl_from_kind {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for NodeKind {
                fn from(value: $variant) -> Self {
                    NodeKind::$variant(value)
                }
            }

            impl From<$variant> for ActionNode {
                fn from(value: $variant) -> Self {
                    ActionNode::new(NodeKind::$variant(value))
                }
            }
        )*
    };
}

impl_from_kind!(
    Wait,
    MoveBy,
    MoveAlongPath,
    MoveAlongBezierPath,
    Jump,
    ShootSingle,
    ShootPattern,
    MeleeAttack,
    Throw,
    StartMoveToward,
    Sequence,
    Parallel,
    Repeat,
);

#[cfg(feature = "serde")]
fn enabled_by_default() -> bool {
    true
}

/// One element of an action tree.
///
/// Wraps a [`NodeKind`] with the state every node shares: an authored label
/// and `enabled` switch, the id and fault assigned at `init`, and whether the
/// node is between `start` and `end`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActionNode {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub label: Option<String>,

    /// A disabled node is over-or-deactivated regardless of its progress.
    #[cfg_attr(feature = "serde", serde(default = "enabled_by_default"))]
    pub enabled: bool,

    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: NodeKind,

    #[cfg_attr(feature = "serde", serde(skip))]
    id: u32,
    #[cfg_attr(feature = "serde", serde(skip))]
    fault: Option<ConfigError>,
    #[cfg_attr(feature = "serde", serde(skip))]
    active: bool,
    /// The kind's own `start` ran and its `end` has not yet.
    #[cfg_attr(feature = "serde", serde(skip))]
    live: bool,
}

impl ActionNode {
    pub fn new(kind: impl Into<NodeKind>) -> Self {
        Self {
            label: None,
            enabled: true,
            kind: kind.into(),
            id: 0,
            fault: None,
            active: false,
            live: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Pre-order id assigned by the last `init` (root = 0).
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn fault(&self) -> Option<&ConfigError> {
        self.fault.as_ref()
    }

    /// `true` between `start` and `end`.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Wire the subtree to `owner`: assign ids, validate parameters and
    /// capabilities, precompute derived constants. Faults are logged,
    /// recorded in `report`, and leave the faulted node permanently over.
    pub fn init<O>(&mut self, ctx: &TickContext, owner: &mut O, report: &mut InitReport)
    where
        O: OwnerMut + ?Sized,
    {
        self.id = report.next_id();
        self.fault = None;
        self.active = false;
        self.live = false;

        let result = match &mut self.kind {
            NodeKind::Sequence(Sequence { children, .. })
            | NodeKind::Parallel(Parallel { children, .. }) => {
                for child in children.iter_mut() {
                    child.init(ctx, owner, report);
                }
                Ok(())
            }
            NodeKind::Repeat(repeat) => match repeat.child.as_deref_mut() {
                Some(child) => {
                    child.init(ctx, owner, report);
                    Ok(())
                }
                None => Err(ConfigError::MissingChild { kind: Repeat::KIND }),
            },
            leaf => leaf.init_leaf(&*owner),
        };

        if let Err(error) = result {
            self.record_fault(ctx, owner, report, error);
        }
    }

    /// Assign an id and fault without initializing the subtree.
    pub(crate) fn reject<O>(
        &mut self,
        ctx: &TickContext,
        owner: &mut O,
        report: &mut InitReport,
        error: ConfigError,
    ) where
        O: OwnerMut + ?Sized,
    {
        self.id = report.next_id();
        self.active = false;
        self.live = false;
        self.record_fault(ctx, owner, report, error);
    }

    fn record_fault<O>(
        &mut self,
        ctx: &TickContext,
        owner: &mut O,
        report: &mut InitReport,
        error: ConfigError,
    ) where
        O: OwnerMut + ?Sized,
    {
        tracing::warn!(
            node = self.id,
            kind = self.kind.name(),
            label = self.label.as_deref(),
            %error,
            "action node misconfigured, treating it as over"
        );
        owner.trace(TraceEvent::new(ctx.tick, tags::NODE_FAULT).with_node(self.id));
        report.faults.push(NodeFault {
            node: self.id,
            kind: self.kind.name(),
            error: error.clone(),
        });
        self.fault = Some(error);
    }

    pub fn start<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        debug_assert!(!self.active, "node {} started again before end", self.id);
        self.active = true;
        self.live = self.enabled && self.fault.is_none();
        tracing::trace!(node = self.id, kind = self.kind.name(), live = self.live, "start");
        owner.trace(TraceEvent::new(ctx.tick, tags::NODE_START).with_node(self.id));

        if self.live {
            dispatch!(&mut self.kind, node => node.start(ctx, owner));
        }
    }

    pub fn update<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        debug_assert!(self.active, "node {} updated outside start/end", self.id);
        if self.live {
            dispatch!(&mut self.kind, node => node.update(ctx, owner));
        }
    }

    /// The node's own completion condition. Parents use
    /// [`is_over_or_deactivated`](Self::is_over_or_deactivated) instead.
    pub fn is_over(&self) -> bool {
        !self.live || dispatch!(&self.kind, node => node.is_over())
    }

    /// Completion folded with every reason a node stops: disabled,
    /// misconfigured, or an inactive owner. Pure; safe to call repeatedly.
    pub fn is_over_or_deactivated<O>(&self, owner: &O) -> bool
    where
        O: OwnerView + ?Sized,
    {
        !self.enabled || self.fault.is_some() || !owner.is_active() || self.is_over()
    }

    /// Stop the node. A no-op unless the node is active, so cleanup runs
    /// exactly once per `start`.
    pub fn end<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        if !self.active {
            return;
        }
        self.active = false;
        if core::mem::take(&mut self.live) {
            dispatch!(&mut self.kind, node => node.end(ctx, owner));
        }
        tracing::trace!(node = self.id, kind = self.kind.name(), "end");
        owner.trace(TraceEvent::new(ctx.tick, tags::NODE_END).with_node(self.id));
    }
}
