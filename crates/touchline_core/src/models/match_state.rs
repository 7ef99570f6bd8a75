//! Live match state: score, cumulative stats and substitution counters per side.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub const BOTH: [TeamSide; 2] = [TeamSide::Home, TeamSide::Away];

    pub fn opponent(&self) -> TeamSide {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

/// One value per side, indexable by `TeamSide`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct SidePair<T> {
    pub home: T,
    pub away: T,
}

impl<T> SidePair<T> {
    pub fn new(home: T, away: T) -> Self {
        Self { home, away }
    }

    pub fn map<U>(self, mut f: impl FnMut(TeamSide, T) -> U) -> SidePair<U> {
        SidePair { home: f(TeamSide::Home, self.home), away: f(TeamSide::Away, self.away) }
    }

    pub fn as_ref(&self) -> SidePair<&T> {
        SidePair { home: &self.home, away: &self.away }
    }
}

impl<T> Index<TeamSide> for SidePair<T> {
    type Output = T;

    fn index(&self, side: TeamSide) -> &T {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }
}

impl<T> IndexMut<TeamSide> for SidePair<T> {
    fn index_mut(&mut self, side: TeamSide) -> &mut T {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }
}

/// Cumulative per-side counters. `possession` counts minutes in possession.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct TeamStats {
    pub possession: u32,
    pub shots: u32,
    pub shots_on_target: u32,
    pub xg: f32,
    pub corners: u32,
    pub fouls: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SubstitutionState {
    pub used: u8,
    pub max: u8,
    pub last_sub_minute: Option<u16>,
}

impl SubstitutionState {
    pub fn new(max: u8) -> Self {
        Self { used: 0, max, last_sub_minute: None }
    }

    pub fn remaining(&self) -> u8 {
        self.max.saturating_sub(self.used)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchState {
    pub minute: u16,
    pub score: SidePair<u8>,
    pub stats: SidePair<TeamStats>,
    pub substitutions: SidePair<SubstitutionState>,
}

impl MatchState {
    pub fn new(max_subs: u8) -> Self {
        Self {
            minute: 0,
            score: SidePair::default(),
            stats: SidePair::default(),
            substitutions: SidePair::new(SubstitutionState::new(max_subs), SubstitutionState::new(max_subs)),
        }
    }

    /// Goals for minus goals against, from `side`'s point of view.
    pub fn score_diff(&self, side: TeamSide) -> i32 {
        self.score[side] as i32 - self.score[side.opponent()] as i32
    }

    /// Possession share in percent (0-100). 50 before any minute is played.
    pub fn possession_share(&self, side: TeamSide) -> f32 {
        let own = self.stats[side].possession;
        let total = own + self.stats[side.opponent()].possession;
        if total == 0 {
            return 50.0;
        }
        own as f32 / total as f32 * 100.0
    }
}
