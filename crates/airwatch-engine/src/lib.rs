//! # Airwatch Engine
//!
//! The surveillance and conflict-alert core: authoritative in-memory
//! aircraft state, the motion model that advances it, the pairwise conflict
//! detector, and the snapshot broadcast that feeds live viewers.
//!
//! ## Architecture
//!
//! ```text
//! feed commands ──► ┌─────────────────────────────────────┐
//!  (upsert/remove)  │            engine task              │
//!                   │  Registry ─► motion ─► detector     │
//! subscribe ──────► │        └──── Snapshot ────┐         │
//!                   │                     Broadcaster     │
//!                   └───────────────┬─────────┬───────────┘
//!                            viewer ▼  viewer ▼   (bounded queues,
//!                                                  slow viewers dropped)
//! ```
//!
//! One task owns all mutable state; everything else communicates with it
//! through the [`EngineHandle`] command queue and receives immutable
//! [`airwatch_domain::Snapshot`] values.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod broadcast;
pub mod config;
pub mod detector;
pub mod engine;
pub mod error;
pub mod motion;
pub mod registry;

pub use broadcast::{Broadcaster, Subscription};
pub use config::EngineConfig;
pub use engine::{Engine, EngineHandle};
pub use error::{EngineError, EngineResult};
pub use registry::Registry;
