//! Action-tree interpreter for scripted entity behavior.
//!
//! A tree of [`ActionNode`]s is ticked once per fixed simulation step by a
//! [`ScriptDriver`]. Leaves steer their entity by writing intention records
//! through [`act_core::OwnerMut`]; composites ([`Sequence`], [`Parallel`],
//! [`Repeat`]) decide which children run.
//!
//! Every node follows the same lifecycle: `init` once per activation,
//! `start`, zero or more `update`s, then exactly one `end`. Parents only
//! ever consult [`ActionNode::is_over_or_deactivated`], so disabled nodes,
//! misconfigured nodes and despawning owners all unwind through the same
//! `end` path.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod composite;
pub mod driver;
pub mod error;
pub mod leaves;
#[cfg(feature = "serde")]
pub mod load;
pub mod node;
pub mod sequence;

pub use composite::{Parallel, Repeat, Sequence};
pub use driver::{DriverStatus, Script, ScriptDriver};
pub use error::{ActivationError, ConfigError, InitReport, NodeFault};
pub use leaves::{
    Aim, Jump, Leaf, Lifecycle, MeleeAttack, MoveAlongBezierPath, MoveAlongPath, MoveBy,
    ShootPattern, ShootSingle, StartMoveToward, Throw, Wait,
};
#[cfg(feature = "serde")]
pub use load::{load_script, LoadError, ScriptFile};
pub use node::{ActionNode, NodeKind};
pub use sequence::ActionSequence;
