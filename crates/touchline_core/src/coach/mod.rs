//! Coaching layer
//!
//! - `preparation`: pre-match strategy, formation and starting XI
//! - `opponent_analysis`: scouting report the preparation works from
//! - `formations`: slot layouts and the formation matchup table
//! - `in_match`: the reactive touchline AI consulted every minute

pub mod formations;
pub mod in_match;
pub mod opponent_analysis;
pub mod preparation;

pub use in_match::{Decision, InMatchAi, MatchView, PassiveAi, TacticalAi};
pub use opponent_analysis::{OpponentAnalysis, VulnerableArea};
pub use preparation::{Approach, CoachAi, MatchContext, MatchImportance, Preparation, Strategy};
