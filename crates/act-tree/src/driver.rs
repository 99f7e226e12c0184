use act_core::{tags, OwnerMut, OwnerView, TickContext, TraceEvent};

use crate::{ActionNode, ActionSequence, ActivationError, InitReport};

/// What a [`ScriptDriver`] runs: a full tree or a flat list of leaves.
#[derive(Debug, Clone, PartialEq)]
pub enum Script {
    Tree(ActionNode),
    Sequence(ActionSequence),
}

impl Script {
    fn init<O>(&mut self, ctx: &TickContext, owner: &mut O, report: &mut InitReport)
    where
        O: OwnerMut + ?Sized,
    {
        match self {
            Script::Tree(root) => root.init(ctx, owner, report),
            Script::Sequence(sequence) => sequence.init(ctx, owner, report),
        }
    }

    fn start<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        match self {
            Script::Tree(root) => root.start(ctx, owner),
            Script::Sequence(sequence) => sequence.start(ctx, owner),
        }
    }

    fn update<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        match self {
            Script::Tree(root) => root.update(ctx, owner),
            Script::Sequence(sequence) => sequence.update(ctx, owner),
        }
    }

    pub fn is_over_or_deactivated<O>(&self, owner: &O) -> bool
    where
        O: OwnerView + ?Sized,
    {
        match self {
            Script::Tree(root) => root.is_over_or_deactivated(owner),
            Script::Sequence(sequence) => sequence.is_over_or_deactivated(owner),
        }
    }

    fn end<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        match self {
            Script::Tree(root) => root.end(ctx, owner),
            Script::Sequence(sequence) => sequence.end(ctx, owner),
        }
    }
}

impl From<ActionNode> for Script {
    fn from(root: ActionNode) -> Self {
        Script::Tree(root)
    }
}

impl From<ActionSequence> for Script {
    fn from(sequence: ActionSequence) -> Self {
        Script::Sequence(sequence)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverStatus {
    /// Never activated, or activation failed.
    #[default]
    Idle,
    Running,
    /// The script completed on its own.
    Finished,
    /// Ended early by the owner deactivating or by [`ScriptDriver::stop`].
    Stopped,
}

/// Ticks one script for one entity.
///
/// The default script is authored data and is never run directly: every
/// activation clones it (or takes a per-spawn override), so the same
/// driver can be reactivated after a respawn.
#[derive(Debug, Clone, Default)]
pub struct ScriptDriver {
    default: Option<Script>,
    active: Option<Script>,
    status: DriverStatus,
    report: InitReport,
}

impl ScriptDriver {
    pub fn new(default: Option<Script>) -> Self {
        Self {
            default,
            ..Self::default()
        }
    }

    pub fn with_tree(root: impl Into<ActionNode>) -> Self {
        Self::new(Some(Script::Tree(root.into())))
    }

    pub fn with_sequence(actions: Vec<ActionNode>) -> Self {
        Self::new(Some(Script::Sequence(ActionSequence::new(actions))))
    }

    pub fn status(&self) -> DriverStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == DriverStatus::Running
    }

    /// Faults found by the last activation.
    pub fn report(&self) -> &InitReport {
        &self.report
    }

    /// The script of the current or last activation.
    pub fn script(&self) -> Option<&Script> {
        self.active.as_ref()
    }

    /// Init and start a script on `owner`.
    ///
    /// `override_script` replaces the default for this activation only. A
    /// script that is already running is stopped first. Misconfigured nodes
    /// do not fail activation; they are listed in the returned report.
    pub fn activate<O>(
        &mut self,
        ctx: &TickContext,
        owner: &mut O,
        override_script: Option<Script>,
    ) -> Result<&InitReport, ActivationError>
    where
        O: OwnerMut + ?Sized,
    {
        if self.is_running() {
            self.stop(ctx, owner);
        }

        let Some(mut script) = override_script.or_else(|| self.default.clone()) else {
            tracing::warn!(tick = ctx.tick, "no script to activate, entity stays idle");
            self.active = None;
            self.status = DriverStatus::Idle;
            return Err(ActivationError::MissingScript);
        };

        let mut report = InitReport::default();
        script.init(ctx, owner, &mut report);
        script.start(ctx, owner);
        owner.trace(TraceEvent::new(ctx.tick, tags::SCRIPT_ACTIVATE));
        tracing::debug!(
            tick = ctx.tick,
            nodes = report.node_count(),
            faults = report.faults.len(),
            "script activated"
        );

        self.active = Some(script);
        self.status = DriverStatus::Running;
        self.report = report;
        Ok(&self.report)
    }

    /// Advance the running script by one tick.
    pub fn tick<O>(&mut self, ctx: &TickContext, owner: &mut O) -> DriverStatus
    where
        O: OwnerMut + ?Sized,
    {
        if self.status != DriverStatus::Running {
            return self.status;
        }
        let Some(script) = self.active.as_mut() else {
            self.status = DriverStatus::Idle;
            return self.status;
        };

        if script.is_over_or_deactivated(&*owner) {
            script.end(ctx, owner);
            if owner.is_active() {
                self.status = DriverStatus::Finished;
                owner.trace(TraceEvent::new(ctx.tick, tags::SCRIPT_FINISH));
                tracing::debug!(tick = ctx.tick, "script finished");
            } else {
                self.status = DriverStatus::Stopped;
                owner.trace(TraceEvent::new(ctx.tick, tags::SCRIPT_STOP));
                tracing::debug!(tick = ctx.tick, "owner deactivated, script stopped");
            }
        } else {
            script.update(ctx, owner);
        }
        self.status
    }

    /// End the running script now, cascading `end` through every active node.
    pub fn stop<O>(&mut self, ctx: &TickContext, owner: &mut O)
    where
        O: OwnerMut + ?Sized,
    {
        if self.status != DriverStatus::Running {
            return;
        }
        if let Some(script) = self.active.as_mut() {
            script.end(ctx, owner);
        }
        self.status = DriverStatus::Stopped;
        owner.trace(TraceEvent::new(ctx.tick, tags::SCRIPT_STOP));
        tracing::debug!(tick = ctx.tick, "script stopped");
    }
}
