//! Attribute Evaluator
//!
//! 경기 중 실효 능력치 = 기본 능력치 × 피로 보정 (− 기술 능력치는 압박 보정).
//! Base values outside [0, 100] are clamped, never rejected.

use crate::models::Player;

/// Condition at or above which fatigue has no effect
pub const FATIGUE_THRESHOLD: f32 = 50.0;
/// Share of the pressure effect subtracted from technical attributes
pub const TECHNICAL_PRESSURE_WEIGHT: f32 = 0.5;
pub const MIN_EFFECTIVE_VALUE: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeCategory {
    Technical,
    Mental,
    Physical,
    Goalkeeper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    // Technical
    Finishing,
    ShotPower,
    ShortPassing,
    Dribbling,
    Tackling,
    Marking,
    Heading,
    Crossing,
    // Mental
    Vision,
    Aggression,
    Composure,
    WorkRate,
    Positioning,
    // Physical
    Pace,
    Acceleration,
    Agility,
    Balance,
    Strength,
    Stamina,
    Jumping,
    // Goalkeeper
    Reflexes,
    GkPositioning,
    Handling,
}

impl Attribute {
    pub fn category(&self) -> AttributeCategory {
        use Attribute::*;
        match self {
            Finishing | ShotPower | ShortPassing | Dribbling | Tackling | Marking | Heading
            | Crossing => AttributeCategory::Technical,
            Vision | Aggression | Composure | WorkRate | Positioning => AttributeCategory::Mental,
            Pace | Acceleration | Agility | Balance | Strength | Stamina | Jumping => {
                AttributeCategory::Physical
            }
            Reflexes | GkPositioning | Handling => AttributeCategory::Goalkeeper,
        }
    }

    /// Raw stored value, unclamped.
    pub fn raw_value(&self, player: &Player) -> f32 {
        use Attribute::*;
        let t = &player.technical;
        let m = &player.mental;
        let p = &player.physical;
        let g = &player.goalkeeper;
        match self {
            Finishing => t.finishing,
            ShotPower => t.shot_power,
            ShortPassing => t.short_passing,
            Dribbling => t.dribbling,
            Tackling => t.tackling,
            Marking => t.marking,
            Heading => t.heading,
            Crossing => t.crossing,
            Vision => m.vision,
            Aggression => m.aggression,
            Composure => m.composure,
            WorkRate => m.work_rate,
            Positioning => m.positioning,
            Pace => p.pace,
            Acceleration => p.acceleration,
            Agility => p.agility,
            Balance => p.balance,
            Strength => p.strength,
            Stamina => p.stamina,
            Jumping => p.jumping,
            Reflexes => g.reflexes,
            GkPositioning => g.positioning,
            Handling => g.handling,
        }
    }
}

/// Base value clamped into [0, 100].
pub fn base_value(player: &Player, attribute: Attribute) -> f32 {
    let raw = attribute.raw_value(player);
    if !(0.0..=100.0).contains(&raw) {
        log::trace!("{}: {:?}={} outside 0-100, clamped", player.name, attribute, raw);
    }
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 100.0)
}

/// 1.0 when fresh; below the threshold scales linearly down to 0.5 at condition 0.
pub fn fatigue_penalty(condition: f32) -> f32 {
    if condition >= FATIGUE_THRESHOLD {
        1.0
    } else {
        0.5 + condition.max(0.0) / 100.0
    }
}

/// Context-adjusted attribute value (never below 1).
///
/// - Every category is scaled by the fatigue penalty
/// - Technical attributes additionally lose half of
///   `pressure × (1 − composure/100)`
pub fn effective(player: &Player, attribute: Attribute, pressure: f32) -> f32 {
    let mut value = base_value(player, attribute) * fatigue_penalty(player.condition);

    if attribute.category() == AttributeCategory::Technical {
        let resilience = base_value(player, Attribute::Composure) / 100.0;
        let pressure_effect = pressure.max(0.0) * (1.0 - resilience);
        value -= pressure_effect * TECHNICAL_PRESSURE_WEIGHT;
    }

    value.max(MIN_EFFECTIVE_VALUE)
}
