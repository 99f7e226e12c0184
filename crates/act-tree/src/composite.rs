//! Composite operators.
//!
//! Composites own their children and only ever consult
//! [`ActionNode::is_over_or_deactivated`] when deciding whether a child has
//! stopped, so a disabled or faulted branch never stalls its parent.

use act_core::{OwnerMut, TickContext};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::leaves::Lifecycle;
use crate::ActionNode;

/// Walks an ordered child list one active child at a time.
///
/// Shared by [`Sequence`] and the flat [`ActionSequence`](crate::ActionSequence).
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct SequenceCursor {
    active: Option<usize>,
    next: usize,
    finished: bool,
}

impl SequenceCursor {
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn active(&self) -> Option<usize> {
        self.active
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    /// One tick: retire the active child if it stopped, advance past any
    /// children that stop instantly, then update whichever child is active.
    pub(crate) fn step<O>(&mut self, children: &mut [ActionNode], ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        if self.finished {
            return;
        }

        if let Some(child) = self.active.and_then(|index| children.get_mut(index)) {
            if child.is_over_or_deactivated(&*owner) {
                child.end(ctx, owner);
                self.active = None;
            }
        }

        if self.active.is_none() {
            self.advance(children, ctx, owner);
        }

        // A child started this tick is updated this tick.
        if let Some(child) = self.active.and_then(|index| children.get_mut(index)) {
            child.update(ctx, owner);
        }
    }

    fn advance<O>(&mut self, children: &mut [ActionNode], ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        while let Some(child) = children.get_mut(self.next) {
            let index = self.next;
            self.next += 1;

            child.start(ctx, owner);
            if child.is_over_or_deactivated(&*owner) {
                child.end(ctx, owner);
                continue;
            }
            self.active = Some(index);
            return;
        }
        self.active = None;
        self.finished = true;
    }

    /// End the active child, if any.
    pub(crate) fn stop<O>(&mut self, children: &mut [ActionNode], ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        if let Some(child) = self.active.take().and_then(|index| children.get_mut(index)) {
            child.end(ctx, owner);
        }
    }
}

/// Run children one after another in authored order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sequence {
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<ActionNode>,
    #[cfg_attr(feature = "serde", serde(skip))]
    cursor: SequenceCursor,
}

impl Sequence {
    pub const KIND: &'static str = "sequence";

    pub fn new(children: Vec<ActionNode>) -> Self {
        Self {
            children,
            cursor: SequenceCursor::default(),
        }
    }

    /// Index of the child currently running.
    pub fn active_child(&self) -> Option<usize> {
        self.cursor.active()
    }
}

impl Lifecycle for Sequence {
    fn start<O>(&mut self, _ctx: &TickContext, _owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        self.cursor.reset();
    }

    fn update<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        self.cursor.step(&mut self.children, ctx, owner);
    }

    fn is_over(&self) -> bool {
        self.cursor.is_finished()
    }

    fn end<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        self.cursor.stop(&mut self.children, ctx, owner);
    }
}

/// Run every child from the same `start`; each finishes on its own.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Parallel {
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<ActionNode>,
    #[cfg_attr(feature = "serde", serde(skip))]
    running: Vec<bool>,
}

impl Parallel {
    pub const KIND: &'static str = "parallel";

    pub fn new(children: Vec<ActionNode>) -> Self {
        Self {
            children,
            running: Vec::new(),
        }
    }

    pub fn running_count(&self) -> usize {
        self.running.iter().filter(|running| **running).count()
    }
}

impl Lifecycle for Parallel {
    fn start<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        self.running.clear();
        for child in &mut self.children {
            child.start(ctx, owner);
            self.running.push(true);
        }
    }

    fn update<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        for (child, running) in self.children.iter_mut().zip(self.running.iter_mut()) {
            if !*running {
                continue;
            }
            if child.is_over_or_deactivated(&*owner) {
                child.end(ctx, owner);
                *running = false;
            } else {
                child.update(ctx, owner);
            }
        }
    }

    fn is_over(&self) -> bool {
        !self.running.iter().any(|running| *running)
    }

    fn end<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        for (child, running) in self.children.iter_mut().zip(self.running.iter_mut()) {
            if core::mem::take(running) {
                child.end(ctx, owner);
            }
        }
    }
}

/// Restart a single child forever. Never over on its own.
///
/// A child that stops is ended and started again on the following tick,
/// never the same one, so an instantly finishing child costs one start per
/// tick at most.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Repeat {
    #[cfg_attr(feature = "serde", serde(default))]
    pub child: Option<Box<ActionNode>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    running: bool,
}

impl Repeat {
    pub const KIND: &'static str = "repeat";

    pub fn new(child: impl Into<ActionNode>) -> Self {
        Self {
            child: Some(Box::new(child.into())),
            running: false,
        }
    }

    pub fn is_child_running(&self) -> bool {
        self.running
    }
}

impl Lifecycle for Repeat {
    fn start<O>(&mut self, _ctx: &TickContext, _owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        self.running = false;
    }

    fn update<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        let Some(child) = self.child.as_deref_mut() else {
            return;
        };

        if !self.running {
            child.start(ctx, owner);
            self.running = true;
        }

        if child.is_over_or_deactivated(&*owner) {
            child.end(ctx, owner);
            self.running = false;
        } else {
            child.update(ctx, owner);
        }
    }

    fn is_over(&self) -> bool {
        false
    }

    fn end<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        if let Some(child) = self.child.as_deref_mut() {
            if core::mem::take(&mut self.running) {
                child.end(ctx, owner);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cursor_is_idle() {
        let cursor = SequenceCursor::default();
        assert_eq!(cursor.active(), None);
        assert!(!cursor.is_finished());
    }

    #[test]
    fn repeat_is_never_over() {
        let repeat = Repeat::new(crate::Wait::new(0.0));
        assert!(!repeat.is_over());
        assert!(!repeat.is_child_running());
    }
}
