//! Match event stream records.
//!
//! Events are append-only and carry structured payloads (names, numbers,
//! tactics, message kinds). Turning them into text is the presentation
//! layer's job.

use serde::{Deserialize, Serialize};

use super::match_state::{SidePair, TeamSide, TeamStats};
use super::tactic::Tactic;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    KickOff,
    Goal,
    Save,
    Miss,
    Pass,
    Dribble,
    Defense,
    Intercept,
    Foul,
    YellowCard,
    RedCard,
    Commentary,
    Substitution,
    StatsUpdate,
    HalfTime,
    FullTime,
}

impl EventType {
    /// Shot outcomes
    pub fn is_shot(&self) -> bool {
        matches!(self, EventType::Goal | EventType::Save | EventType::Miss)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEvent {
    pub minute: u16,
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Side credited with the event; `None` for whistles
    pub side: Option<TeamSide>,
    pub payload: EventPayload,
    /// Score after the event, attached to goals, whistles and stats updates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<SidePair<u8>>,
}

impl MatchEvent {
    pub fn new(minute: u16, event_type: EventType, side: Option<TeamSide>, payload: EventPayload) -> Self {
        Self { minute, event_type, side, payload, score: None }
    }

    pub fn with_score(mut self, score: SidePair<u8>) -> Self {
        self.score = Some(score);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventPayload {
    KickOff {
        stadium: String,
        tactics: SidePair<Tactic>,
        injury_time: u16,
    },
    Whistle,
    Pass {
        passer: String,
        counter_attack: bool,
    },
    Cross {
        crosser: String,
        target: String,
    },
    Dribble {
        dribbler: String,
        defender: String,
    },
    Tackle {
        defender: String,
        attacker: String,
    },
    Clearance {
        defender: String,
        crosser: String,
    },
    Intercept {
        defender: String,
        passer: String,
    },
    Shot {
        shooter: String,
        keeper: String,
        shot: ShotKind,
        shot_quality: f32,
        save_quality: f32,
        xg: f32,
    },
    Foul {
        player: String,
    },
    Card {
        player: String,
    },
    MidfieldPlay {
        player: String,
        flavor: MidfieldFlavor,
    },
    CoachMessage {
        message: CoachMessage,
    },
    TacticChange {
        from: Tactic,
        to: Tactic,
        message: Option<CoachMessage>,
    },
    Substitution {
        player_in: String,
        player_out: String,
        reason: SubstitutionReason,
    },
    Stats {
        stats: SidePair<TeamStats>,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ShotKind {
    /// Through ball into the box
    Open,
    Counter,
    Dribble,
    LongShot,
    Header,
}

impl ShotKind {
    /// Chain quality multiplier applied to the raw shot quality.
    pub fn quality_multiplier(&self) -> f32 {
        match self {
            ShotKind::Counter => 1.3,
            ShotKind::Open => 1.1,
            ShotKind::Dribble | ShotKind::Header => 1.0,
            ShotKind::LongShot => 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MidfieldFlavor {
    ReadsTheGame,
    SafeBackPass,
    ContestsPossession,
}

impl MidfieldFlavor {
    pub const ALL: [MidfieldFlavor; 3] =
        [MidfieldFlavor::ReadsTheGame, MidfieldFlavor::SafeBackPass, MidfieldFlavor::ContestsPossession];
}

/// Touchline message kinds produced by the in-match AI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CoachMessage {
    WinningTight,
    LosingTight,
    LosingBadly,
    Wasteful,
    UnderPressure,
    NeedTheBall,
    DrawingBoring,
    WinningComfortable,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "trigger", rename_all = "snake_case")]
pub enum SubstitutionReason {
    Exhausted { condition: f32 },
    Tactical { rating: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_shape() {
        let event = MatchEvent::new(
            12,
            EventType::Goal,
            Some(TeamSide::Home),
            EventPayload::Shot {
                shooter: "Nine".to_string(),
                keeper: "One".to_string(),
                shot: ShotKind::Counter,
                shot_quality: 90.0,
                save_quality: 60.0,
                xg: 0.3,
            },
        )
        .with_score(SidePair::new(1, 0));

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "GOAL");
        assert_eq!(value["side"], "home");
        assert_eq!(value["payload"]["kind"], "shot");
        assert_eq!(value["payload"]["shot"], "counter");
        assert_eq!(value["score"]["home"], 1);
    }

    #[test]
    fn test_score_omitted_when_absent() {
        let event = MatchEvent::new(3, EventType::Foul, Some(TeamSide::Away), EventPayload::Foul { player: "Five".into() });
        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("score").is_none());
        let back: MatchEvent = serde_json::from_value(value).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_shot_multipliers() {
        assert_eq!(ShotKind::Counter.quality_multiplier(), 1.3);
        assert_eq!(ShotKind::Open.quality_multiplier(), 1.1);
        assert_eq!(ShotKind::LongShot.quality_multiplier(), 0.8);
        assert!(EventType::Save.is_shot());
        assert!(!EventType::Intercept.is_shot());
    }
}
