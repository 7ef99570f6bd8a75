use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::events::MatchEvent;
use super::match_state::{TeamSide, TeamStats};
use super::tactic::Tactic;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamResult {
    pub club: String,
    pub club_id: String,
    pub score: u8,
    pub stats: TeamStats,
    pub final_tactic: Tactic,
    pub substitutions: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerRating {
    pub player_id: String,
    pub side: TeamSide,
    pub rating: f32,
    pub condition: f32,
}

/// Final output of one simulated match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub home: TeamResult,
    pub away: TeamResult,
    pub events: Vec<MatchEvent>,
    /// Keyed by player name (`name [player_id]` when two participants share
    /// a name); includes players substituted off
    pub player_ratings: BTreeMap<String, PlayerRating>,
    pub man_of_the_match: Option<String>,
    /// Fixture date, when the caller supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub seed: Option<u64>,
}

impl MatchResult {
    /// `None` for a draw.
    pub fn winner(&self) -> Option<TeamSide> {
        match self.home.score.cmp(&self.away.score) {
            std::cmp::Ordering::Greater => Some(TeamSide::Home),
            std::cmp::Ordering::Less => Some(TeamSide::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn team(&self, side: TeamSide) -> &TeamResult {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn side_of_club(&self, club_id: &str) -> Option<TeamSide> {
        if self.home.club_id == club_id {
            Some(TeamSide::Home)
        } else if self.away.club_id == club_id {
            Some(TeamSide::Away)
        } else {
            None
        }
    }

    /// Goals scored and conceded by `side`
    pub fn goals_for_against(&self, side: TeamSide) -> (u8, u8) {
        match side {
            TeamSide::Home => (self.home.score, self.away.score),
            TeamSide::Away => (self.away.score, self.home.score),
        }
    }
}
