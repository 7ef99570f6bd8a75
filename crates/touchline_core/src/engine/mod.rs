//! Match engine: attribute evaluation, action choice, duels, the match clock
//! and everything that mutates a side during play.

pub mod action_decision;
pub mod attributes;
pub mod duel;
pub mod lineup;
pub mod match_sim;
pub mod substitutions;
pub mod tactical_state;

pub use action_decision::{decide_next_move, Action, ActionScores, MoveContext};
pub use attributes::{effective, Attribute, AttributeCategory};
pub use duel::{resolve_shot, DuelScores, ShotOutcome, ShotResolution};
pub use lineup::{validate_squad, LineupSlot, SideSquad, LINEUP_SIZE};
pub use match_sim::{quick_simulate, MatchEngine, MatchPhase, MatchSide};
pub use substitutions::SubstitutionPlan;
pub use tactical_state::{TacticChangeRecord, TacticalState};
