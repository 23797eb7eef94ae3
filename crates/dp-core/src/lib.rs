//! `dp-core` — foundational types for the `rust_dp` dining-philosophers engine.
//!
//! This crate is a dependency of every other `dp-*` crate.  It intentionally
//! has no `dp-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                          |
//! |-------------|---------------------------------------------------|
//! | [`ids`]     | `AgentId`, `ForkId`                               |
//! | [`ring`]    | `Ring` seat/fork/neighbor arithmetic              |
//! | [`time`]    | `Tick`, `SimClock`, `DurationRange`, `SimConfig`  |
//! | [`rng`]     | `AgentRng` (per-agent), `SimRng` (global)         |
//! | [`error`]   | `CoreError`, `CoreResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod ids;
pub mod ring;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, ForkId};
pub use ring::Ring;
pub use rng::{AgentRng, SimRng};
pub use time::{DurationRange, SimClock, SimConfig, Tick};
