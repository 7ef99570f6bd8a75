//! In-Match AI (reactive touchline coach)
//!
//! Consulted once per side per simulated minute. Tactical analysis is
//! throttled so a side never flip-flops; substitutions are evaluated on every
//! tick with their own gates.
//!
//! ## Decision precedence
//! - Late game (80'+): lead by one ⇒ PARK_THE_BUS, trail by one ⇒ ALL_OUT_ATTACK,
//!   trail by two or more ⇒ message only. Nothing else is considered.
//! - High xG without a goal ⇒ message only
//! - Starved of the ball ⇒ COUNTER_ATTACK (level/ahead, coin flip) or HIGH_PRESS (behind)
//! - Dominant but level ⇒ ALL_OUT_ATTACK
//! - Comfortable lead ⇒ POSSESSION, overriding the two possession rules

use crate::config::{InMatchAiConfig, SimConfig, SubstitutionConfig};
use crate::engine::lineup::SideSquad;
use crate::engine::substitutions::{self, SubstitutionPlan};
use crate::models::{CoachMessage, MatchState, Tactic, TeamSide};
use crate::rng::RandomSource;

/// Read-only snapshot handed to a [`TacticalAi`].
#[derive(Debug, Clone, Copy)]
pub struct MatchView<'a> {
    pub side: TeamSide,
    pub minute: u16,
    pub state: &'a MatchState,
    pub squad: &'a SideSquad,
    pub active_tactic: Tactic,
}

impl<'a> MatchView<'a> {
    pub fn score_diff(&self) -> i32 {
        self.state.score_diff(self.side)
    }

    pub fn possession_share(&self) -> f32 {
        self.state.possession_share(self.side)
    }

    pub fn own_goals(&self) -> u8 {
        self.state.score[self.side]
    }

    pub fn own_xg(&self) -> f32 {
        self.state.stats[self.side].xg
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decision {
    pub tactic_change: Option<Tactic>,
    pub substitution: Option<SubstitutionPlan>,
    pub message: Option<CoachMessage>,
}

impl Decision {
    pub fn is_empty(&self) -> bool {
        self.tactic_change.is_none() && self.substitution.is_none() && self.message.is_none()
    }
}

/// Port through which the match clock hands control to a coach.
pub trait TacticalAi {
    fn evaluate(&mut self, view: &MatchView<'_>, rng: &mut dyn RandomSource) -> Decision;
}

/// Never changes anything. Useful for fixed-tactic sides.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveAi;

impl TacticalAi for PassiveAi {
    fn evaluate(&mut self, _view: &MatchView<'_>, _rng: &mut dyn RandomSource) -> Decision {
        Decision::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Analysis {
    tactic: Option<Tactic>,
    message: Option<CoachMessage>,
}

impl Analysis {
    const NONE: Analysis = Analysis { tactic: None, message: None };

    fn say(message: CoachMessage) -> Self {
        Self { tactic: None, message: Some(message) }
    }

    fn switch(tactic: Tactic, message: CoachMessage) -> Self {
        Self { tactic: Some(tactic), message: Some(message) }
    }
}

#[derive(Debug, Clone)]
pub struct InMatchAi {
    config: InMatchAiConfig,
    substitutions: SubstitutionConfig,
    /// Minute of the last touchline message (0 = never)
    last_talk_minute: u16,
}

impl InMatchAi {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            config: config.in_match_ai.clone(),
            substitutions: config.substitutions.clone(),
            last_talk_minute: 0,
        }
    }

    pub fn last_talk_minute(&self) -> u16 {
        self.last_talk_minute
    }

    /// Enough time since the last message for another tactical look.
    pub fn throttle_open(&self, minute: u16) -> bool {
        let since = minute.saturating_sub(self.last_talk_minute);
        let normal = since >= self.config.normal_interval;
        let crunch = minute >= self.config.crunch_time_minute && since >= self.config.crunch_interval;
        normal || crunch
    }

    fn analyze(&self, view: &MatchView<'_>, rng: &mut dyn RandomSource) -> Analysis {
        let cfg = &self.config;
        let minute = view.minute;
        let diff = view.score_diff();

        // only a share of looks before the late game turn into analysis
        if minute < cfg.late_game_minute && rng.next_f32() <= cfg.evaluation_gate {
            return Analysis::NONE;
        }

        if minute >= cfg.late_game_minute {
            return match diff {
                1 => Analysis::switch(Tactic::ParkTheBus, CoachMessage::WinningTight),
                -1 => Analysis::switch(Tactic::AllOutAttack, CoachMessage::LosingTight),
                d if d <= -2 => Analysis::say(CoachMessage::LosingBadly),
                _ => Analysis::NONE,
            };
        }

        if view.own_xg() > cfg.wasteful_xg && view.own_goals() == 0 {
            return Analysis::say(CoachMessage::Wasteful);
        }

        let possession = view.possession_share();
        let mut analysis = Analysis::NONE;

        if possession < cfg.low_possession {
            if diff >= 0 {
                if rng.chance(cfg.counter_switch_chance) {
                    analysis = Analysis::switch(Tactic::CounterAttack, CoachMessage::UnderPressure);
                }
            } else {
                analysis = Analysis::switch(Tactic::HighPress, CoachMessage::NeedTheBall);
            }
        } else if possession > cfg.high_possession && diff == 0 {
            analysis = Analysis::switch(Tactic::AllOutAttack, CoachMessage::DrawingBoring);
        }

        if diff >= cfg.comfortable_lead {
            analysis = Analysis::switch(Tactic::Possession, CoachMessage::WinningComfortable);
        }

        analysis
    }
}

impl TacticalAi for InMatchAi {
    fn evaluate(&mut self, view: &MatchView<'_>, rng: &mut dyn RandomSource) -> Decision {
        let mut decision = Decision::default();

        if self.throttle_open(view.minute) {
            let analysis = self.analyze(view, rng);
            if let Some(message) = analysis.message {
                self.last_talk_minute = view.minute;
                decision.message = Some(message);
                decision.tactic_change = analysis.tactic.filter(|t| *t != view.active_tactic);
                log::debug!(
                    "{:?} coach at {}': {:?} (tactic {:?})",
                    view.side,
                    view.minute,
                    message,
                    decision.tactic_change
                );
            }
        }

        decision.substitution = substitutions::evaluate(
            view.squad.lineup(),
            view.squad.bench(),
            &view.state.substitutions[view.side],
            view.minute,
            &self.substitutions,
        );

        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SidePair;
    use crate::rng::ScriptedRandom;
    use crate::test_support::starting_eleven;

    fn squad() -> SideSquad {
        SideSquad::new(starting_eleven("h"), vec![], 6.0).unwrap()
    }

    fn state(minute: u16, home: u8, away: u8, home_poss: u32, away_poss: u32) -> MatchState {
        let mut s = MatchState::new(5);
        s.minute = minute;
        s.score = SidePair::new(home, away);
        s.stats.home.possession = home_poss;
        s.stats.away.possession = away_poss;
        s
    }

    fn view<'a>(state: &'a MatchState, squad: &'a SideSquad, active: Tactic) -> MatchView<'a> {
        MatchView { side: TeamSide::Home, minute: state.minute, state, squad, active_tactic: active }
    }

    #[test]
    fn test_trailing_by_one_late_goes_all_out() {
        let squad = squad();
        let st = state(85, 0, 1, 40, 45);
        let mut ai = InMatchAi::new(&SimConfig::default());
        let mut rng = ScriptedRandom::constant(0.0);

        let decision = ai.evaluate(&view(&st, &squad, Tactic::Balanced), &mut rng);
        assert_eq!(decision.tactic_change, Some(Tactic::AllOutAttack));
        assert_eq!(decision.message, Some(CoachMessage::LosingTight));
        assert_eq!(ai.last_talk_minute(), 85);
    }

    #[test]
    fn test_leading_by_one_late_parks_the_bus() {
        let squad = squad();
        let st = state(82, 2, 1, 40, 42);
        let mut ai = InMatchAi::new(&SimConfig::default());
        let decision = ai.evaluate(&view(&st, &squad, Tactic::Balanced), &mut ScriptedRandom::constant(0.0));
        assert_eq!(decision.tactic_change, Some(Tactic::ParkTheBus));
    }

    #[test]
    fn test_losing_badly_late_is_message_only() {
        let squad = squad();
        let st = state(88, 0, 3, 40, 48);
        let mut ai = InMatchAi::new(&SimConfig::default());
        let decision = ai.evaluate(&view(&st, &squad, Tactic::Balanced), &mut ScriptedRandom::constant(0.0));
        assert_eq!(decision.tactic_change, None);
        assert_eq!(decision.message, Some(CoachMessage::LosingBadly));
    }

    #[test]
    fn test_comfortable_lead_overrides_possession_rules() {
        let squad = squad();
        // 70% possession would otherwise be irrelevant (not level); 20% would mean counter
        for (home_poss, away_poss) in [(14u32, 6u32), (4, 16)] {
            let st = state(40, 3, 1, home_poss, away_poss);
            let mut ai = InMatchAi::new(&SimConfig::default());
            // gate draw 0.9 passes, coin flip 0.0 would pick the counter
            let mut rng = ScriptedRandom::new(vec![0.9, 0.0]);
            let decision = ai.evaluate(&view(&st, &squad, Tactic::Balanced), &mut rng);
            assert_eq!(decision.tactic_change, Some(Tactic::Possession));
            assert_eq!(decision.message, Some(CoachMessage::WinningComfortable));
        }
    }

    #[test]
    fn test_random_gate_blocks_early_analysis() {
        let squad = squad();
        let st = state(40, 3, 0, 10, 10);
        let mut ai = InMatchAi::new(&SimConfig::default());
        let decision = ai.evaluate(&view(&st, &squad, Tactic::Balanced), &mut ScriptedRandom::constant(0.5));
        assert!(decision.is_empty());
        assert_eq!(ai.last_talk_minute(), 0);
    }

    #[test]
    fn test_wasteful_message_only() {
        let squad = squad();
        let mut st = state(30, 0, 0, 25, 5);
        st.stats.home.xg = 1.4;
        let mut ai = InMatchAi::new(&SimConfig::default());
        let decision = ai.evaluate(&view(&st, &squad, Tactic::Balanced), &mut ScriptedRandom::constant(0.9));
        assert_eq!(decision.message, Some(CoachMessage::Wasteful));
        assert_eq!(decision.tactic_change, None);
    }

    #[test]
    fn test_starved_and_behind_presses_high() {
        let squad = squad();
        let st = state(30, 0, 1, 6, 24);
        let mut ai = InMatchAi::new(&SimConfig::default());
        let decision = ai.evaluate(&view(&st, &squad, Tactic::Balanced), &mut ScriptedRandom::constant(0.9));
        assert_eq!(decision.tactic_change, Some(Tactic::HighPress));
        assert_eq!(decision.message, Some(CoachMessage::NeedTheBall));
    }

    #[test]
    fn test_dominant_and_level_goes_all_out() {
        let squad = squad();
        let st = state(30, 1, 1, 24, 6);
        let mut ai = InMatchAi::new(&SimConfig::default());
        let decision = ai.evaluate(&view(&st, &squad, Tactic::Balanced), &mut ScriptedRandom::constant(0.9));
        assert_eq!(decision.tactic_change, Some(Tactic::AllOutAttack));
        assert_eq!(decision.message, Some(CoachMessage::DrawingBoring));
    }

    #[test]
    fn test_same_tactic_is_not_reported() {
        let squad = squad();
        let st = state(85, 0, 1, 40, 45);
        let mut ai = InMatchAi::new(&SimConfig::default());
        let decision = ai.evaluate(&view(&st, &squad, Tactic::AllOutAttack), &mut ScriptedRandom::constant(0.0));
        assert_eq!(decision.tactic_change, None);
        assert_eq!(decision.message, Some(CoachMessage::LosingTight));
    }

    #[test]
    fn test_throttle_windows() {
        let squad = squad();
        let mut ai = InMatchAi::new(&SimConfig::default());
        let mut rng = ScriptedRandom::constant(0.0);

        let first = state(81, 0, 1, 40, 41);
        assert!(ai.evaluate(&view(&first, &squad, Tactic::Balanced), &mut rng).message.is_some());

        // 4 minutes later, before crunch time: closed
        assert!(!ai.throttle_open(84));
        let blocked = state(84, 0, 1, 40, 44);
        assert!(ai.evaluate(&view(&blocked, &squad, Tactic::AllOutAttack), &mut rng).message.is_none());

        // crunch time reopens after 3 minutes
        assert!(ai.throttle_open(85));
        assert!(!InMatchAi::new(&SimConfig::default()).throttle_open(7));
        assert!(InMatchAi::new(&SimConfig::default()).throttle_open(8));
    }

    #[test]
    fn test_passive_ai_never_acts() {
        let squad = squad();
        let st = state(85, 0, 1, 40, 45);
        let decision = PassiveAi.evaluate(&view(&st, &squad, Tactic::Balanced), &mut ScriptedRandom::constant(0.0));
        assert!(decision.is_empty());
    }
}
