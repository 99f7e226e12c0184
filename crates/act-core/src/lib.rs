//! Engine-agnostic primitives for scripted entity actions.
//!
//! Nothing in this crate decides behavior. It defines the data that flows
//! between an action tree and the entity it drives: the per-tick context,
//! the intention records leaves write into, and the owner traits through
//! which a tree reaches its entity.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod intent;
pub mod math;
pub mod owner;
pub mod tick;
pub mod trace;

pub use intent::{FireIntention, Intentions, MeleeIntention, MoveIntention, ThrowIntention};
pub use math::Vec2;
pub use owner::{Capability, OwnerMut, OwnerView};
pub use tick::{TickContext, TIME_EPSILON};
pub use trace::{tags, NullTraceSink, TraceEvent, TraceLog, TraceSink};
