//! # touchline_core - Minute-by-minute Football Match Simulation
//!
//! Simulates a single match one minute at a time and drives a coach AI on
//! each bench that reacts to the live game state.
//!
//! ## Features
//! - Seeded, reproducible simulation (same seed = same event stream)
//! - Lazy event stream: `MatchEngine` is an `Iterator<Item = MatchEvent>`
//! - Pre-match coach: opponent scouting, formation, starting XI, kickoff tactic
//! - Reactive in-match AI: throttled tactic changes and substitutions
//! - JSON API for host applications

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod coach;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod rng;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{simulate_match, simulate_match_json, MatchRequest};
pub use coach::{CoachAi, InMatchAi, MatchContext, Preparation, TacticalAi};
pub use config::SimConfig;
pub use engine::{quick_simulate, MatchEngine, MatchSide};
pub use error::{MatchError, Result};
pub use models::{Club, EventPayload, EventType, MatchEvent, MatchResult, Player, Position, Tactic, TeamSide};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
