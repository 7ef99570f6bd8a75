pub mod club;
pub mod events;
pub mod match_result;
pub mod match_state;
pub mod player;
pub mod tactic;

pub use club::{Club, ClubTactics, PlayStyle, Squad};
pub use events::{
    CoachMessage, EventPayload, EventType, MatchEvent, MidfieldFlavor, ShotKind, SubstitutionReason,
};
pub use match_result::{MatchResult, PlayerRating, TeamResult};
pub use match_state::{MatchState, SidePair, SubstitutionState, TeamSide, TeamStats};
pub use player::{
    GoalkeeperAttributes, MentalAttributes, PhysicalAttributes, Player, Position, TechnicalAttributes,
};
pub use tactic::{TacticalModifier, Tactic};
