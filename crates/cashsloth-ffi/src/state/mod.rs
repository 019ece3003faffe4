//! # State Module
//!
//! Process-wide state behind the C boundary.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  cs_init() ── config_from_env() ──► install(config)                     │
//! │                                           │                             │
//! │                                           ▼                             │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  ENGINE: Mutex<EngineState>                                      │  │
//! │  │    no engine ── every command fails NotInitialized               │  │
//! │  │    engine    ── commands run under the lock, one at a time       │  │
//! │  │    generation_floor survives shutdown, so old handles stay dead  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                           ▲                             │
//! │  cs_shutdown() ── take() ─────────────────┘ (drops catalog + carts)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Holding the lock for the whole command makes handle validation atomic
//! with release.

mod config;
mod engine;

pub use config::{config_from_env, config_from_lookup, log_filter_from_env};
pub(crate) use engine::{install, take, with_engine, with_engine_mut, Installed};
