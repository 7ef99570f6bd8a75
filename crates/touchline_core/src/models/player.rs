use serde::{Deserialize, Serialize};

/// Lowest and highest match rating a player can hold.
pub const MIN_MATCH_RATING: f32 = 1.0;
pub const MAX_MATCH_RATING: f32 = 10.0;

/// Squad member as consumed by the simulation.
///
/// # Boundary Contract
/// - Canonical records belong to the club collaborator and are never mutated here
/// - The engine works on copies taken at kickoff (see `SideSquad`)
/// - Attribute categories are validated by serde at load time; missing
///   categories fall back to neutral 50s
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: String,
    pub name: String,
    /// 첫 번째 포지션이 주 포지션
    pub positions: Vec<Position>,

    /// Overall ability (0-100), used for squad ranking and bench selection
    #[serde(default = "default_current_rating", alias = "currentRating")]
    pub current_rating: f32,

    #[serde(default)]
    pub technical: TechnicalAttributes,
    #[serde(default)]
    pub mental: MentalAttributes,
    #[serde(default)]
    pub physical: PhysicalAttributes,
    #[serde(default)]
    pub goalkeeper: GoalkeeperAttributes,

    /// Match-time fatigue scalar (0 = exhausted, 100 = fresh)
    #[serde(default = "default_condition")]
    pub condition: f32,

    /// Live match rating (1.0-10.0)
    #[serde(default = "default_match_rating", alias = "matchRating")]
    pub match_rating: f32,

    /// Recent form (1-10)
    #[serde(default = "default_form", alias = "currentForm")]
    pub current_form: f32,

    /// Pre-match fitness (0-100)
    #[serde(default = "default_condition")]
    pub fitness: f32,

    #[serde(default)]
    pub injured: bool,
    #[serde(default)]
    pub suspended: bool,
}

fn default_current_rating() -> f32 {
    65.0
}

fn default_condition() -> f32 {
    100.0
}

fn default_match_rating() -> f32 {
    6.0
}

fn default_form() -> f32 {
    7.0
}

impl Player {
    pub fn primary_position(&self) -> Option<Position> {
        self.positions.first().copied()
    }

    pub fn plays(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }

    pub fn plays_any(&self, positions: &[Position]) -> bool {
        positions.iter().any(|p| self.plays(*p))
    }

    pub fn is_goalkeeper(&self) -> bool {
        self.plays(Position::GK)
    }

    /// Neither injured nor suspended.
    pub fn is_available(&self) -> bool {
        !self.injured && !self.suspended
    }

    /// Shift the live rating, staying inside [1, 10].
    pub fn adjust_rating(&mut self, delta: f32) {
        self.match_rating = (self.match_rating + delta).clamp(MIN_MATCH_RATING, MAX_MATCH_RATING);
    }

    /// Per-minute fatigue. Condition never drops below zero and never rises here.
    pub fn drain_condition(&mut self, amount: f32) {
        self.condition = (self.condition - amount.max(0.0)).max(0.0);
    }

    /// Simulation-local copy with a fresh condition and the given starting rating.
    pub fn match_copy(&self, match_rating: f32) -> Player {
        Player {
            condition: 100.0,
            match_rating: match_rating.clamp(MIN_MATCH_RATING, MAX_MATCH_RATING),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    GK,
    LB,
    CB,
    RB,
    LWB,
    RWB,
    CDM,
    CM,
    CAM,
    LM,
    RM,
    LW,
    RW,
    CF,
    ST,
}

impl Position {
    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::GK)
    }

    pub fn is_defender(&self) -> bool {
        matches!(
            self,
            Position::LB | Position::CB | Position::RB | Position::LWB | Position::RWB
        )
    }

    pub fn is_midfielder(&self) -> bool {
        matches!(
            self,
            Position::CDM | Position::CM | Position::CAM | Position::LM | Position::RM
        )
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Position::LW | Position::RW | Position::CF | Position::ST)
    }

    /// ST/CF: shoot-first roles
    pub fn is_central_forward(&self) -> bool {
        matches!(self, Position::ST | Position::CF)
    }

    /// LW/RW: wide forwards (shoot and dribble bonuses)
    pub fn is_wide_forward(&self) -> bool {
        matches!(self, Position::LW | Position::RW)
    }

    /// CM/CDM/CAM: pass-first roles
    pub fn is_central_midfielder(&self) -> bool {
        matches!(self, Position::CM | Position::CDM | Position::CAM)
    }

    /// Wide creators deliver crosses instead of feeding the striker's feet.
    pub fn is_wide(&self) -> bool {
        matches!(self, Position::LW | Position::RW | Position::LM | Position::RM)
    }

    /// Broader family used when the bench has no exact positional match.
    /// Midfielders and goalkeepers have no fallback family.
    pub fn substitution_family(&self) -> Option<&'static [Position]> {
        const FORWARDS: &[Position] = &[Position::ST, Position::CF, Position::RW, Position::LW];
        const DEFENDERS: &[Position] = &[Position::CB, Position::LB, Position::RB];

        match self {
            Position::ST | Position::CF | Position::RW | Position::LW => Some(FORWARDS),
            Position::CB | Position::LB | Position::RB => Some(DEFENDERS),
            _ => None,
        }
    }

    /// Check if position change is compatible (allows for reasonable transitions)
    pub fn is_compatible_position(&self, target: Position) -> bool {
        match (self, target) {
            (a, b) if *a == b => true,

            // GK conversions are never compatible
            (Position::GK, _) | (_, Position::GK) => false,

            (a, b) if a.is_defender() && b.is_defender() => true,
            (a, b) if a.is_midfielder() && b.is_midfielder() => true,
            (a, b) if a.is_forward() && b.is_forward() => true,

            // Adjacent lines
            (Position::CB, Position::CDM) | (Position::CDM, Position::CB) => true,
            (Position::LB, Position::LM) | (Position::LM, Position::LB) => true,
            (Position::RB, Position::RM) | (Position::RM, Position::RB) => true,
            (Position::LWB, Position::LM) | (Position::LM, Position::LWB) => true,
            (Position::RWB, Position::RM) | (Position::RM, Position::RWB) => true,
            (Position::LM, Position::LW) | (Position::LW, Position::LM) => true,
            (Position::RM, Position::RW) | (Position::RW, Position::RM) => true,
            (Position::CAM, Position::CF) | (Position::CF, Position::CAM) => true,

            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TechnicalAttributes {
    pub finishing: f32,
    #[serde(alias = "shotPower")]
    pub shot_power: f32,
    #[serde(alias = "shortPassing")]
    pub short_passing: f32,
    pub dribbling: f32,
    pub tackling: f32,
    pub marking: f32,
    pub heading: f32,
    pub crossing: f32,
}

impl Default for TechnicalAttributes {
    fn default() -> Self {
        Self {
            finishing: 50.0,
            shot_power: 50.0,
            short_passing: 50.0,
            dribbling: 50.0,
            tackling: 50.0,
            marking: 50.0,
            heading: 50.0,
            crossing: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MentalAttributes {
    pub vision: f32,
    pub aggression: f32,
    pub composure: f32,
    #[serde(alias = "workRate")]
    pub work_rate: f32,
    pub positioning: f32,
}

impl Default for MentalAttributes {
    fn default() -> Self {
        Self { vision: 50.0, aggression: 50.0, composure: 50.0, work_rate: 50.0, positioning: 50.0 }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicalAttributes {
    pub pace: f32,
    pub acceleration: f32,
    pub agility: f32,
    pub balance: f32,
    pub strength: f32,
    pub stamina: f32,
    pub jumping: f32,
    /// Centimetres, not a 0-100 score
    #[serde(alias = "height")]
    pub height_cm: f32,
}

impl Default for PhysicalAttributes {
    fn default() -> Self {
        Self {
            pace: 50.0,
            acceleration: 50.0,
            agility: 50.0,
            balance: 50.0,
            strength: 50.0,
            stamina: 50.0,
            jumping: 50.0,
            height_cm: 180.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GoalkeeperAttributes {
    pub reflexes: f32,
    pub positioning: f32,
    pub handling: f32,
}

impl Default for GoalkeeperAttributes {
    fn default() -> Self {
        // Outfield players in goal are poor keepers
        Self { reflexes: 20.0, positioning: 20.0, handling: 20.0 }
    }
}
