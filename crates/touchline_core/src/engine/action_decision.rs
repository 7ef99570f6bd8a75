//! Action Selector: shoot, pass or dribble for the ball carrier.
//!
//! Each action gets a score from effective attributes plus positional
//! bonuses, then a roulette-wheel draw picks one. [`ActionScores::select`]
//! is pure so a fixed roll always maps to the same action.

use serde::{Deserialize, Serialize};

use super::attributes::{effective, Attribute};
use crate::models::{Player, Position};
use crate::rng::RandomSource;

pub const STRIKER_SHOT_BONUS: f32 = 30.0;
pub const WINGER_SHOT_BONUS: f32 = 15.0;
pub const PLAYMAKER_PASS_BONUS: f32 = 25.0;
pub const WINGER_DRIBBLE_BONUS: f32 = 20.0;
/// Shot urgency when trailing late
pub const DESPERATION_MULTIPLIER: f32 = 1.5;
pub const DESPERATION_MINUTE: u16 = 80;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Shoot,
    Pass,
    Dribble,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveContext {
    pub position: Position,
    /// Own goals minus opponent goals
    pub score_diff: i32,
    pub minute: u16,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionScores {
    pub shoot: f32,
    pub pass: f32,
    pub dribble: f32,
}

impl ActionScores {
    pub fn compute(player: &Player, ctx: &MoveContext) -> Self {
        let eff = |attr| effective(player, attr, 0.0);

        let mut shoot = eff(Attribute::Finishing) * 0.4 + eff(Attribute::Aggression) * 0.2;
        if ctx.position.is_central_forward() {
            shoot += STRIKER_SHOT_BONUS;
        }
        if ctx.position.is_wide_forward() {
            shoot += WINGER_SHOT_BONUS;
        }
        if ctx.score_diff < 0 && ctx.minute > DESPERATION_MINUTE {
            shoot *= DESPERATION_MULTIPLIER;
        }

        let mut pass = eff(Attribute::Vision) * 0.6 + eff(Attribute::WorkRate) * 0.3;
        if ctx.position.is_central_midfielder() {
            pass += PLAYMAKER_PASS_BONUS;
        }

        let mut dribble = eff(Attribute::Dribbling) * 0.5
            + eff(Attribute::Agility) * 0.3
            + eff(Attribute::Acceleration) * 0.2;
        if ctx.position.is_wide_forward() {
            dribble += WINGER_DRIBBLE_BONUS;
        }

        Self { shoot, pass, dribble }
    }

    pub fn total(&self) -> f32 {
        self.shoot + self.pass + self.dribble
    }

    /// Map a roll in [0, total) onto shoot → pass → dribble intervals.
    pub fn select(&self, roll: f32) -> Action {
        if roll < self.shoot {
            Action::Shoot
        } else if roll < self.shoot + self.pass {
            Action::Pass
        } else {
            Action::Dribble
        }
    }
}

pub fn decide_next_move(player: &Player, ctx: &MoveContext, rng: &mut dyn RandomSource) -> Action {
    let scores = ActionScores::compute(player, ctx);
    let roll = rng.uniform(0.0, scores.total());
    scores.select(roll)
}
