//! Whole-match invariants over random seeds.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use super::MatchEngine;
use crate::config::SimConfig;
use crate::engine::duel::GOAL_MARGIN;
use crate::models::{EventPayload, EventType, TeamSide};
use crate::test_support::sample_club;

fn engine(seed: u64, config: SimConfig) -> MatchEngine {
    let home = sample_club("home", "Home FC");
    let away = sample_club("away", "Away United");
    MatchEngine::from_clubs(&home, &away, config, seed).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Property: minute advances by exactly one per simulated step and
    /// on-field condition never rises for the same player
    #[test]
    fn prop_clock_and_condition(seed in any::<u64>()) {
        let mut engine = engine(seed, SimConfig::default());
        let mut last_minute = 0u16;
        let mut last_condition: HashMap<(TeamSide, String), f32> = HashMap::new();

        while engine.next().is_some() {
            let minute = engine.state().minute;
            prop_assert!(minute == last_minute || minute == last_minute + 1);
            last_minute = minute;

            for side in TeamSide::BOTH {
                let squad = engine.squad(side);
                prop_assert_eq!(squad.lineup().len(), 11);
                for slot in squad.lineup() {
                    let key = (side, slot.player.id.clone());
                    if let Some(previous) = last_condition.get(&key) {
                        prop_assert!(slot.player.condition <= *previous);
                    }
                    last_condition.insert(key, slot.player.condition);
                }
            }
        }
        prop_assert_eq!(last_minute, 90 + engine.injury_time());
    }

    /// Property: xG only grows, each attempt adds at most 0.8, and GOAL ⇔ shot > save + 10
    #[test]
    fn prop_shots_and_xg(seed in any::<u64>()) {
        let mut engine = engine(seed, SimConfig::default());
        let mut last_xg = [0.0f32; 2];

        while let Some(event) = engine.next() {
            for (i, side) in TeamSide::BOTH.iter().enumerate() {
                let xg = engine.state().stats[*side].xg;
                prop_assert!(xg >= last_xg[i]);
                last_xg[i] = xg;
            }

            if let EventPayload::Shot { shot_quality, save_quality, xg, .. } = event.payload {
                prop_assert!((0.0..=0.8).contains(&xg));
                let is_goal = shot_quality > save_quality + GOAL_MARGIN;
                prop_assert_eq!(is_goal, event.event_type == EventType::Goal);
            }
        }
    }

    /// Property: substitutions stay within the cap and nobody comes back on
    #[test]
    fn prop_substitution_limits(seed in any::<u64>(), drain in 0.6f32..1.5f32) {
        let mut config = SimConfig::default();
        config.clock.condition_drain_per_minute = drain;
        let max = config.substitutions.max_subs;
        let mut engine = engine(seed, config);

        let mut gone: HashSet<String> = HashSet::new();
        while engine.next().is_some() {
            for side in TeamSide::BOTH {
                let squad = engine.squad(side);
                prop_assert!(engine.state().substitutions[side].used <= max);
                for player in squad.substituted_off() {
                    gone.insert(player.id.clone());
                }
                for slot in squad.lineup() {
                    prop_assert!(!gone.contains(&slot.player.id));
                }
            }
        }
        let result = engine.into_result();
        for rating in result.player_ratings.values() {
            prop_assert!((1.0..=10.0).contains(&rating.rating));
        }
    }

    /// Property: a side's tactic changes at most once per throttling window
    #[test]
    fn prop_tactic_change_throttle(seed in any::<u64>()) {
        let result = engine(seed, SimConfig::default()).into_result();
        let mut last_change: HashMap<TeamSide, u16> = HashMap::new();

        for event in &result.events {
            if let (EventPayload::TacticChange { .. }, Some(side)) = (&event.payload, event.side) {
                if let Some(previous) = last_change.get(&side) {
                    let gap = event.minute - previous;
                    prop_assert!(gap >= 8 || (event.minute >= 85 && gap >= 3));
                }
                last_change.insert(side, event.minute);
            }
        }
    }
}
