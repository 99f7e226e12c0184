use act_core::{OwnerMut, OwnerView, TickContext};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::composite::SequenceCursor;
use crate::{ActionNode, ConfigError, InitReport};

/// A flat list of leaf actions run in order.
///
/// Behaves exactly like a root [`Sequence`](crate::Sequence) whose children
/// are all leaves. Composites are rejected at `init` and skipped.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionSequence {
    pub actions: Vec<ActionNode>,
    #[cfg_attr(feature = "serde", serde(skip))]
    cursor: SequenceCursor,
}

impl ActionSequence {
    pub fn new(actions: Vec<ActionNode>) -> Self {
        Self {
            actions,
            cursor: SequenceCursor::default(),
        }
    }

    pub fn active_action(&self) -> Option<&ActionNode> {
        self.cursor.active().and_then(|index| self.actions.get(index))
    }

    pub fn init<O>(&mut self, ctx: &TickContext, owner: &mut O, report: &mut InitReport)
    where
        O: OwnerMut + ?Sized,
    {
        self.cursor.reset();
        for action in &mut self.actions {
            if action.kind.is_composite() {
                let kind = action.kind_name();
                action.reject(ctx, owner, report, ConfigError::NestedInFlatSequence { kind });
            } else {
                action.init(ctx, owner, report);
            }
        }
    }

    pub fn start<O>(&mut self, _ctx: &TickContext, _owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        self.cursor.reset();
    }

    pub fn update<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        self.cursor.step(&mut self.actions, ctx, owner);
    }

    pub fn is_over(&self) -> bool {
        self.cursor.is_finished()
    }

    /// A flat sequence has no enabled switch of its own; only the owner can
    /// deactivate it.
    pub fn is_over_or_deactivated<O>(&self, owner: &O) -> bool
    where
        O: OwnerView + ?Sized,
    {
        !owner.is_active() || self.is_over()
    }

    pub fn end<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        self.cursor.stop(&mut self.actions, ctx, owner);
    }
}
