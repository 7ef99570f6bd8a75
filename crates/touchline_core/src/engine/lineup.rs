//! Simulation-local lineup and bench for one side.
//!
//! Players are copied in at kickoff; condition and rating changes during the
//! match never touch the club's canonical records.

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};
use crate::models::{Club, Player, Position, SubstitutionReason};
use crate::rng::RandomSource;

pub const LINEUP_SIZE: usize = 11;

/// A club can field a side: at least eleven available players, one of them a keeper.
pub fn validate_squad(club: &Club) -> Result<()> {
    let available: Vec<&Player> = club.available_players().collect();
    if available.len() < LINEUP_SIZE {
        return Err(MatchError::MissingData(format!(
            "{} has only {} available players",
            club.name,
            available.len()
        )));
    }
    if !available.iter().any(|p| p.is_goalkeeper()) {
        return Err(MatchError::MissingData(format!("{} has no available goalkeeper", club.name)));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineupSlot {
    /// Position the player is fielded in (may differ from their primary)
    pub position: Position,
    pub player: Player,
}

impl LineupSlot {
    pub fn new(position: Position, player: Player) -> Self {
        Self { position, player }
    }

    /// Fielded in, or listed for, any of `positions`.
    pub fn covers(&self, positions: &[Position]) -> bool {
        positions.contains(&self.position) || self.player.plays_any(positions)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletedSubstitution {
    pub player_in: String,
    pub player_out: String,
    pub position: Position,
    pub reason: SubstitutionReason,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SideSquad {
    lineup: Vec<LineupSlot>,
    bench: Vec<Player>,
    substituted_off: Vec<Player>,
}

impl SideSquad {
    /// Validates the lineup (11 slots, a goalkeeper) and takes match copies:
    /// condition 100, rating `initial_rating`. Unavailable bench players are dropped.
    pub fn new(lineup: Vec<LineupSlot>, bench: Vec<Player>, initial_rating: f32) -> Result<Self> {
        if lineup.len() != LINEUP_SIZE {
            return Err(MatchError::InvalidLineupSize { expected: LINEUP_SIZE, found: lineup.len() });
        }
        let has_keeper = lineup
            .iter()
            .any(|slot| slot.position.is_goalkeeper() || slot.player.is_goalkeeper());
        if !has_keeper {
            return Err(MatchError::MissingData("no goalkeeper in lineup".to_string()));
        }

        let lineup = lineup
            .into_iter()
            .map(|slot| LineupSlot::new(slot.position, slot.player.match_copy(initial_rating)))
            .collect();
        let bench = bench.into_iter().filter(|p| p.is_available()).collect();

        Ok(Self { lineup, bench, substituted_off: Vec::new() })
    }

    /// First eleven available squad players, fielded at their primary position.
    pub fn from_club(club: &Club, initial_rating: f32) -> Result<Self> {
        let mut available: Vec<Player> = club.available_players().cloned().collect();
        if available.len() < LINEUP_SIZE {
            return Err(MatchError::InvalidLineupSize { expected: LINEUP_SIZE, found: available.len() });
        }
        let bench = available.split_off(LINEUP_SIZE);
        let lineup = available
            .into_iter()
            .map(|player| {
                let position = player.primary_position().unwrap_or_else(|| {
                    log::warn!("{} has no listed position, fielded as CM", player.name);
                    Position::CM
                });
                LineupSlot::new(position, player)
            })
            .collect();
        Self::new(lineup, bench, initial_rating)
    }

    pub fn lineup(&self) -> &[LineupSlot] {
        &self.lineup
    }

    pub fn bench(&self) -> &[Player] {
        &self.bench
    }

    pub fn substituted_off(&self) -> &[Player] {
        &self.substituted_off
    }

    pub fn player(&self, slot: usize) -> &Player {
        &self.lineup[slot].player
    }

    pub fn player_mut(&mut self, slot: usize) -> &mut Player {
        &mut self.lineup[slot].player
    }

    /// Slot of the goalkeeper (fielded GK first, then anyone listing GK, then slot 0).
    pub fn goalkeeper_slot(&self) -> usize {
        self.lineup
            .iter()
            .position(|slot| slot.position.is_goalkeeper())
            .or_else(|| self.lineup.iter().position(|slot| slot.player.is_goalkeeper()))
            .unwrap_or(0)
    }

    pub fn goalkeeper(&self) -> &Player {
        self.player(self.goalkeeper_slot())
    }

    /// Random slot among players covering `positions`; slot 0 when nobody does.
    pub fn pick_slot(&self, positions: &[Position], rng: &mut dyn RandomSource) -> usize {
        let candidates: Vec<usize> = self
            .lineup
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.covers(positions))
            .map(|(i, _)| i)
            .collect();

        if candidates.is_empty() {
            log::debug!("no lineup player covers {:?}, falling back to slot 0", positions);
            return 0;
        }
        candidates[rng.index(candidates.len())]
    }

    pub fn drain_condition(&mut self, amount: f32) {
        for slot in &mut self.lineup {
            slot.player.drain_condition(amount);
        }
    }

    /// Possession weight
    pub fn total_short_passing(&self) -> f32 {
        self.lineup.iter().map(|slot| slot.player.technical.short_passing.max(0.0)).sum()
    }

    /// Swap a bench player into `out_slot`. The outgoing player is recorded
    /// as substituted off and never returns to the bench.
    pub fn apply_substitution(
        &mut self,
        out_slot: usize,
        bench_index: usize,
        incoming_rating: f32,
        reason: SubstitutionReason,
    ) -> Option<CompletedSubstitution> {
        if out_slot >= self.lineup.len() || bench_index >= self.bench.len() {
            log::warn!("substitution indices out of range (slot {out_slot}, bench {bench_index})");
            return None;
        }

        let incoming = self.bench.remove(bench_index).match_copy(incoming_rating);
        let slot = &mut self.lineup[out_slot];
        let outgoing = std::mem::replace(&mut slot.player, incoming);

        let completed = CompletedSubstitution {
            player_in: slot.player.name.clone(),
            player_out: outgoing.name.clone(),
            position: slot.position,
            reason,
        };
        self.substituted_off.push(outgoing);
        Some(completed)
    }

    /// Everyone who took part: current lineup then substituted-off players.
    pub fn participants(&self) -> impl Iterator<Item = &Player> {
        self.lineup.iter().map(|slot| &slot.player).chain(self.substituted_off.iter())
    }
}
