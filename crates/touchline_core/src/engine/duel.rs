//! Duel Resolver: shot vs save, dribble vs tackle, aerial duels.

use serde::{Deserialize, Serialize};

use super::attributes::{base_value, effective, Attribute};
use crate::models::{Player, ShotKind};
use crate::rng::RandomSource;

/// Shot must beat the save by this margin to score
pub const GOAL_MARGIN: f32 = 10.0;
/// Shots within this margin below the save are still on target
pub const SAVE_MARGIN: f32 = 20.0;
pub const MAX_XG_PER_SHOT: f32 = 0.8;
pub const XG_DIVISOR: f32 = 300.0;
pub const KEEPER_REFERENCE_HEIGHT: f32 = 180.0;
/// Keeper form factor range
pub const SAVE_FORM_MIN: f32 = 0.9;
pub const SAVE_FORM_MAX: f32 = 1.1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShotOutcome {
    Goal,
    Save,
    Miss,
}

impl ShotOutcome {
    pub fn is_on_target(&self) -> bool {
        matches!(self, ShotOutcome::Goal | ShotOutcome::Save)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotResolution {
    pub outcome: ShotOutcome,
    pub shot_quality: f32,
    pub save_quality: f32,
    pub xg: f32,
}

/// Raw contest scores; the attacker wins only on a strictly greater score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuelScores {
    pub attacker: f32,
    pub defender: f32,
}

impl DuelScores {
    pub fn attacker_wins(&self) -> bool {
        self.attacker > self.defender
    }
}

// ========== Shot vs Save ==========

/// Shot quality under `pressure`, scaled by the chain multiplier of `kind`.
/// Headers use heading in place of finishing.
pub fn shot_quality(shooter: &Player, pressure: f32, kind: ShotKind) -> f32 {
    let strike = match kind {
        ShotKind::Header => Attribute::Heading,
        _ => Attribute::Finishing,
    };
    let raw = effective(shooter, strike, pressure) * 0.4
        + effective(shooter, Attribute::ShotPower, pressure) * 0.3
        + effective(shooter, Attribute::Balance, pressure) * 0.1
        + effective(shooter, Attribute::Composure, pressure) * 0.2;
    raw * kind.quality_multiplier()
}

/// Keeper save quality before the form factor.
pub fn base_save_quality(keeper: &Player) -> f32 {
    base_value(keeper, Attribute::Reflexes) * 0.45
        + base_value(keeper, Attribute::GkPositioning) * 0.35
        + base_value(keeper, Attribute::Handling) * 0.1
        + (keeper.physical.height_cm - KEEPER_REFERENCE_HEIGHT) * 0.5
        + base_value(keeper, Attribute::Jumping) * 0.2
}

pub fn save_quality(keeper: &Player, rng: &mut dyn RandomSource) -> f32 {
    base_save_quality(keeper) * rng.uniform(SAVE_FORM_MIN, SAVE_FORM_MAX)
}

pub fn classify_shot(shot_quality: f32, save_quality: f32) -> ShotOutcome {
    if shot_quality > save_quality + GOAL_MARGIN {
        ShotOutcome::Goal
    } else if shot_quality > save_quality - SAVE_MARGIN {
        ShotOutcome::Save
    } else {
        ShotOutcome::Miss
    }
}

/// xG added by one attempt, in [0, 0.8].
pub fn xg_contribution(shot_quality: f32) -> f32 {
    (shot_quality / XG_DIVISOR).clamp(0.0, MAX_XG_PER_SHOT)
}

pub fn resolve_shot(
    shooter: &Player,
    keeper: &Player,
    kind: ShotKind,
    pressure: f32,
    rng: &mut dyn RandomSource,
) -> ShotResolution {
    let shot_quality = shot_quality(shooter, pressure, kind);
    let save_quality = save_quality(keeper, rng);
    ShotResolution {
        outcome: classify_shot(shot_quality, save_quality),
        shot_quality,
        save_quality,
        xg: xg_contribution(shot_quality),
    }
}

// ========== 1v1 Contests ==========

pub fn dribble_vs_tackle(attacker: &Player, defender: &Player) -> DuelScores {
    let a = |attr| base_value(attacker, attr);
    let d = |attr| base_value(defender, attr);
    DuelScores {
        attacker: a(Attribute::Dribbling) * 0.4
            + a(Attribute::Agility) * 0.3
            + a(Attribute::Acceleration) * 0.2
            + a(Attribute::Balance) * 0.1,
        defender: d(Attribute::Tackling) * 0.4
            + d(Attribute::Strength) * 0.3
            + d(Attribute::Positioning) * 0.2
            + d(Attribute::Pace) * 0.1,
    }
}

fn air_score(player: &Player) -> f32 {
    player.physical.height_cm * 0.4
        + base_value(player, Attribute::Jumping) * 0.3
        + base_value(player, Attribute::Strength) * 0.2
        + base_value(player, Attribute::Heading) * 0.1
}

/// Ties go to the defender.
pub fn aerial_duel(attacker: &Player, defender: &Player) -> DuelScores {
    DuelScores { attacker: air_score(attacker), defender: air_score(defender) }
}
