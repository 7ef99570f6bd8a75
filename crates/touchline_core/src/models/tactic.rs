use serde::{Deserialize, Serialize};

/// In-match tactical preset. Exactly one is active per side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tactic {
    #[default]
    Balanced,
    AllOutAttack,
    ParkTheBus,
    CounterAttack,
    HighPress,
    Possession,
}

/// Multipliers applied by the match clock.
/// - `attack`: pass success weight for the side in possession
/// - `defense`: interception weight for the side out of possession
/// - `tempo`: scales the per-minute attack chance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TacticalModifier {
    pub attack: f32,
    pub defense: f32,
    pub tempo: f32,
}

impl TacticalModifier {
    pub const NEUTRAL: TacticalModifier = TacticalModifier { attack: 1.0, defense: 1.0, tempo: 1.0 };
}

impl Default for TacticalModifier {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl Tactic {
    pub const ALL: [Tactic; 6] = [
        Tactic::Balanced,
        Tactic::AllOutAttack,
        Tactic::ParkTheBus,
        Tactic::CounterAttack,
        Tactic::HighPress,
        Tactic::Possession,
    ];

    pub fn modifier(&self) -> TacticalModifier {
        match self {
            Tactic::AllOutAttack => TacticalModifier { attack: 1.5, defense: 0.5, tempo: 1.5 },
            Tactic::ParkTheBus => TacticalModifier { attack: 0.3, defense: 2.0, tempo: 0.5 },
            Tactic::HighPress => TacticalModifier { attack: 1.2, defense: 0.8, tempo: 1.3 },
            Tactic::CounterAttack => TacticalModifier { attack: 1.1, defense: 1.2, tempo: 1.2 },
            Tactic::Possession | Tactic::Balanced => TacticalModifier::NEUTRAL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tactic::Balanced => "BALANCED",
            Tactic::AllOutAttack => "ALL_OUT_ATTACK",
            Tactic::ParkTheBus => "PARK_THE_BUS",
            Tactic::CounterAttack => "COUNTER_ATTACK",
            Tactic::HighPress => "HIGH_PRESS",
            Tactic::Possession => "POSSESSION",
        }
    }
}

impl std::fmt::Display for Tactic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
