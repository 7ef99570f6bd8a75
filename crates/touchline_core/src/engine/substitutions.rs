//! Substitution Engine
//!
//! Triggers (in priority order):
//! 1. Exhaustion: on-field players below the condition floor, most tired first
//!    (outfielders before the keeper on a tie)
//! 2. Performance: after the rating check minute, players below the rating floor, worst first
//!
//! Candidates without a bench replacement are skipped; the next one is tried.
//!
//! Replacement: the best unused bench player listing the same primary position,
//! else the best in the positional family. A missing replacement is a
//! [`MatchError::PositionalGap`], which the caller logs and treats as "no substitution".

use std::cmp::Ordering;

use super::lineup::LineupSlot;
use crate::config::SubstitutionConfig;
use crate::error::{MatchError, Result};
use crate::models::{Player, SubstitutionReason, SubstitutionState};

#[derive(Debug, Clone, PartialEq)]
pub struct SubstitutionPlan {
    pub out_slot: usize,
    pub bench_index: usize,
    pub player_out: String,
    pub player_in: String,
    pub reason: SubstitutionReason,
}

/// Cap, earliest minute and minimum gap since the side's last substitution.
pub fn can_substitute(state: &SubstitutionState, minute: u16, config: &SubstitutionConfig) -> bool {
    if state.remaining() == 0 || minute < config.earliest_minute {
        return false;
    }
    match state.last_sub_minute {
        Some(last) => minute.saturating_sub(last) >= config.min_gap,
        None => true,
    }
}

pub fn evaluate(
    lineup: &[LineupSlot],
    bench: &[Player],
    state: &SubstitutionState,
    minute: u16,
    config: &SubstitutionConfig,
) -> Option<SubstitutionPlan> {
    if lineup.is_empty() || !can_substitute(state, minute, config) {
        return None;
    }

    let mut exhausted: Vec<usize> = (0..lineup.len())
        .filter(|&i| lineup[i].player.condition < config.exhausted_condition)
        .collect();
    exhausted.sort_by(|&a, &b| {
        cmp_f32(lineup[a].player.condition, lineup[b].player.condition)
            .then_with(|| is_keeper(&lineup[a]).cmp(&is_keeper(&lineup[b])))
            .then_with(|| cmp_f32(lineup[a].player.match_rating, lineup[b].player.match_rating))
    });
    for slot in exhausted {
        let reason = SubstitutionReason::Exhausted { condition: lineup[slot].player.condition };
        if let Some(plan) = plan_for(lineup, bench, slot, reason) {
            return Some(plan);
        }
    }

    if minute > config.rating_check_after {
        let mut struggling: Vec<usize> = (0..lineup.len())
            .filter(|&i| lineup[i].player.match_rating < config.poor_rating)
            .collect();
        struggling.sort_by(|&a, &b| cmp_f32(lineup[a].player.match_rating, lineup[b].player.match_rating));
        for slot in struggling {
            let reason = SubstitutionReason::Tactical { rating: lineup[slot].player.match_rating };
            if let Some(plan) = plan_for(lineup, bench, slot, reason) {
                return Some(plan);
            }
        }
    }

    None
}

fn plan_for(
    lineup: &[LineupSlot],
    bench: &[Player],
    out_slot: usize,
    reason: SubstitutionReason,
) -> Option<SubstitutionPlan> {
    let slot = &lineup[out_slot];
    match find_best_replacement(slot, bench) {
        Ok(bench_index) => Some(SubstitutionPlan {
            out_slot,
            bench_index,
            player_out: slot.player.name.clone(),
            player_in: bench[bench_index].name.clone(),
            reason,
        }),
        Err(e) => {
            log::debug!("substitution skipped: {e}");
            None
        }
    }
}

/// Bench index of the best replacement for the player in `slot`.
pub fn find_best_replacement(slot: &LineupSlot, bench: &[Player]) -> Result<usize> {
    let role = slot.player.primary_position().unwrap_or(slot.position);

    let best_of = |filter: &dyn Fn(&Player) -> bool| {
        bench
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_available() && filter(p))
            .max_by(|(_, a), (_, b)| cmp_f32(a.current_rating, b.current_rating))
            .map(|(i, _)| i)
    };

    if let Some(index) = best_of(&|p| p.plays(role)) {
        return Ok(index);
    }

    if let Some(family) = role.substitution_family() {
        if let Some(index) = best_of(&|p| p.plays_any(family)) {
            return Ok(index);
        }
    }

    Err(MatchError::PositionalGap { player: slot.player.name.clone(), position: role })
}

/// Keepers sort after outfielders among equally tired players.
fn is_keeper(slot: &LineupSlot) -> bool {
    slot.position.is_goalkeeper() || slot.player.is_goalkeeper()
}

fn cmp_f32(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
