//! Match Clock & Event Stream
//!
//! `MatchEngine` is a lazy iterator over [`MatchEvent`]s. Every `next()`
//! either pops a buffered event or advances the match by one phase step
//! (kick-off, one simulated minute, a whistle).
//!
//! ```text
//!  KickOff ──► FirstHalf ──► HalfTime ──► SecondHalf ──► FullTime ──► Finished
//!    │            │  1..=45                  │ 46..=90+injury
//!    │            ▼                          ▼
//!    │     ┌──────────────────── one minute ─────────────────────┐
//!    │     │ drain condition → possession draw → roll            │
//!    │     │   roll < 0.30×tempo   attack chain (attack_chain.rs)│
//!    │     │   roll < 0.60         midfield commentary           │
//!    │     │   roll < 0.62         foul / yellow card            │
//!    │     │ stats every 10' → TacticalAi (home, then away)      │
//!    │     └─────────────────────────────────────────────────────┘
//!    ▼
//!  injury time drawn once (2-5')
//! ```
//!
//! The stream is finite and not resumable; a new match needs a new engine.

mod attack_chain;
#[cfg(test)]
mod invariant_tests;

use chrono::NaiveDate;
use std::collections::{BTreeMap, VecDeque};

use super::lineup::SideSquad;
use super::substitutions;
use super::tactical_state::TacticalState;
use crate::coach::in_match::{Decision, InMatchAi, MatchView, TacticalAi};
use crate::coach::preparation::Preparation;
use crate::config::SimConfig;
use crate::error::Result;
use crate::models::{
    Club, EventPayload, EventType, MatchEvent, MatchResult, MatchState, PlayerRating, SidePair,
    Tactic, TeamResult, TeamSide,
};
use crate::rng::{RandomSource, SeededRandom};

/// Trials per side in [`quick_simulate`]
pub const QUICK_SIM_TRIALS: u32 = 10;
/// A trial scores when the draw exceeds this
pub const QUICK_SIM_THRESHOLD: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    KickOff,
    FirstHalf,
    HalfTime,
    SecondHalf,
    FullTime,
    Finished,
}

/// One side as it walks out: identity, match squad and starting tactic.
#[derive(Debug, Clone)]
pub struct MatchSide {
    pub club_id: String,
    pub name: String,
    pub stadium: String,
    pub squad: SideSquad,
    pub tactic: Tactic,
}

impl MatchSide {
    /// First eleven available players in squad order, BALANCED.
    pub fn from_club(club: &Club, config: &SimConfig) -> Result<Self> {
        Ok(Self {
            club_id: club.club_id.clone(),
            name: club.name.clone(),
            stadium: club.stadium_name(),
            squad: SideSquad::from_club(club, config.clock.initial_match_rating)?,
            tactic: Tactic::Balanced,
        })
    }

    /// Lineup, bench and initial tactic chosen by the pre-match coach.
    pub fn prepared(club: &Club, preparation: &Preparation, config: &SimConfig) -> Result<Self> {
        Ok(Self {
            club_id: club.club_id.clone(),
            name: club.name.clone(),
            stadium: club.stadium_name(),
            squad: SideSquad::new(
                preparation.lineup.clone(),
                preparation.bench.clone(),
                config.clock.initial_match_rating,
            )?,
            tactic: preparation.initial_tactic,
        })
    }
}

pub struct MatchEngine {
    config: SimConfig,
    rng: Box<dyn RandomSource>,
    ais: SidePair<Box<dyn TacticalAi>>,
    teams: SidePair<MatchSide>,
    tactics: TacticalState,
    state: MatchState,
    phase: MatchPhase,
    injury_time: u16,
    buffer: VecDeque<MatchEvent>,
    history: Vec<MatchEvent>,
    seed: Option<u64>,
    date: Option<NaiveDate>,
}

impl MatchEngine {
    pub fn new(
        home: MatchSide,
        away: MatchSide,
        config: SimConfig,
        rng: Box<dyn RandomSource>,
        ais: SidePair<Box<dyn TacticalAi>>,
    ) -> Result<Self> {
        config.validate()?;
        let tactics = TacticalState::new(SidePair::new(home.tactic, away.tactic));
        let state = MatchState::new(config.substitutions.max_subs);

        Ok(Self {
            config,
            rng,
            ais,
            teams: SidePair::new(home, away),
            tactics,
            state,
            phase: MatchPhase::KickOff,
            injury_time: 0,
            buffer: VecDeque::new(),
            history: Vec::new(),
            seed: None,
            date: None,
        })
    }

    /// ChaCha8 source and the stock in-match AI on both benches.
    pub fn seeded(home: MatchSide, away: MatchSide, config: SimConfig, seed: u64) -> Result<Self> {
        let ais: SidePair<Box<dyn TacticalAi>> =
            SidePair::new(Box::new(InMatchAi::new(&config)), Box::new(InMatchAi::new(&config)));
        let mut engine = Self::new(home, away, config, Box::new(SeededRandom::new(seed)), ais)?;
        engine.seed = Some(seed);
        Ok(engine)
    }

    /// Squad-order lineups for both clubs. Fails before kickoff on a club
    /// without eleven available players or without a goalkeeper.
    pub fn from_clubs(home: &Club, away: &Club, config: SimConfig, seed: u64) -> Result<Self> {
        let home = MatchSide::from_club(home, &config)?;
        let away = MatchSide::from_club(away, &config)?;
        Self::seeded(home, away, config, seed)
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn squad(&self, side: TeamSide) -> &SideSquad {
        &self.teams[side].squad
    }

    pub fn team_name(&self, side: TeamSide) -> &str {
        &self.teams[side].name
    }

    pub fn tactics(&self) -> &TacticalState {
        &self.tactics
    }

    /// Events already handed out by the iterator.
    pub fn events(&self) -> &[MatchEvent] {
        &self.history
    }

    /// 0 until kick-off.
    pub fn injury_time(&self) -> u16 {
        self.injury_time
    }

    pub fn is_finished(&self) -> bool {
        self.phase == MatchPhase::Finished && self.buffer.is_empty()
    }

    fn final_minute(&self) -> u16 {
        self.config.clock.regulation_minutes + self.injury_time
    }

    fn push(&mut self, event: MatchEvent) {
        self.buffer.push_back(event);
    }

    // ========== Phase steps ==========

    fn step(&mut self) {
        match self.phase {
            MatchPhase::KickOff => self.kick_off(),
            MatchPhase::FirstHalf => {
                self.simulate_minute();
                if self.state.minute >= self.config.clock.half_time_minute {
                    self.phase = MatchPhase::HalfTime;
                }
            }
            MatchPhase::HalfTime => {
                self.whistle(EventType::HalfTime);
                self.phase = MatchPhase::SecondHalf;
            }
            MatchPhase::SecondHalf => {
                self.simulate_minute();
                if self.state.minute >= self.final_minute() {
                    self.phase = MatchPhase::FullTime;
                }
            }
            MatchPhase::FullTime => {
                self.whistle(EventType::FullTime);
                log::info!(
                    "Full time: {} {}-{} {}",
                    self.teams.home.name,
                    self.state.score.home,
                    self.state.score.away,
                    self.teams.away.name
                );
                self.phase = MatchPhase::Finished;
            }
            MatchPhase::Finished => {}
        }
    }

    fn kick_off(&mut self) {
        let clock = &self.config.clock;
        self.injury_time = self.rng.range_inclusive(clock.injury_time_min, clock.injury_time_max);

        log::info!(
            "Kick-off: {} vs {} at {} (+{}' injury time)",
            self.teams.home.name,
            self.teams.away.name,
            self.teams.home.stadium,
            self.injury_time
        );

        let event = MatchEvent::new(
            0,
            EventType::KickOff,
            None,
            EventPayload::KickOff {
                stadium: self.teams.home.stadium.clone(),
                tactics: self.tactics.both(),
                injury_time: self.injury_time,
            },
        )
        .with_score(self.state.score);
        self.push(event);
        self.phase = MatchPhase::FirstHalf;
    }

    fn whistle(&mut self, event_type: EventType) {
        let event = MatchEvent::new(self.state.minute, event_type, None, EventPayload::Whistle)
            .with_score(self.state.score);
        self.push(event);
    }

    fn simulate_minute(&mut self) {
        self.state.minute += 1;
        let minute = self.state.minute;
        let clock = self.config.clock.clone();

        for side in TeamSide::BOTH {
            self.teams[side].squad.drain_condition(clock.condition_drain_per_minute);
        }

        let attacking = self.draw_possession();
        self.state.stats[attacking].possession += 1;

        let roll = self.rng.next_f32();
        let attack_chance = clock.base_attack_chance * self.tactics.modifier(attacking).tempo;

        if roll < attack_chance {
            self.run_attack_chain(attacking);
        } else if roll < clock.midfield_play_threshold {
            self.midfield_play(attacking);
        } else if roll < clock.foul_threshold {
            self.commit_foul(attacking.opponent());
        }

        if minute % clock.stats_interval == 0 {
            let event = MatchEvent::new(
                minute,
                EventType::StatsUpdate,
                None,
                EventPayload::Stats { stats: self.state.stats },
            )
            .with_score(self.state.score);
            self.push(event);
        }

        self.consult_ai();
    }

    /// Weighted by each side's summed short passing.
    fn draw_possession(&mut self) -> TeamSide {
        let home = self.teams.home.squad.total_short_passing();
        let away = self.teams.away.squad.total_short_passing();
        let total = home + away;
        if total <= 0.0 {
            return if self.rng.chance(0.5) { TeamSide::Home } else { TeamSide::Away };
        }
        if self.rng.next_f32() * total < home {
            TeamSide::Home
        } else {
            TeamSide::Away
        }
    }

    // ========== Coach port ==========

    fn consult_ai(&mut self) {
        let minute = self.state.minute;
        for side in TeamSide::BOTH {
            let decision = {
                let view = MatchView {
                    side,
                    minute,
                    state: &self.state,
                    squad: &self.teams[side].squad,
                    active_tactic: self.tactics.active(side),
                };
                self.ais[side].evaluate(&view, &mut *self.rng)
            };
            self.apply_decision(side, decision);
        }
    }

    fn apply_decision(&mut self, side: TeamSide, decision: Decision) {
        let minute = self.state.minute;

        let changed = decision
            .tactic_change
            .and_then(|to| self.tactics.apply(side, to, minute).map(|from| (from, to)));

        if let Some((from, to)) = changed {
            log::debug!("{} switch to {} at {}'", self.teams[side].name, to, minute);
            self.push(MatchEvent::new(
                minute,
                EventType::Commentary,
                Some(side),
                EventPayload::TacticChange { from, to, message: decision.message },
            ));
        } else if let Some(message) = decision.message {
            self.push(MatchEvent::new(
                minute,
                EventType::Commentary,
                Some(side),
                EventPayload::CoachMessage { message },
            ));
        }

        if let Some(plan) = decision.substitution {
            let sub_state = self.state.substitutions[side];
            if !substitutions::can_substitute(&sub_state, minute, &self.config.substitutions) {
                log::warn!("{} substitution refused at {}': gates closed", self.teams[side].name, minute);
                return;
            }

            let incoming_rating = self.config.substitutions.incoming_match_rating;
            let completed = self.teams[side].squad.apply_substitution(
                plan.out_slot,
                plan.bench_index,
                incoming_rating,
                plan.reason,
            );

            if let Some(done) = completed {
                let sub_state = &mut self.state.substitutions[side];
                sub_state.used += 1;
                sub_state.last_sub_minute = Some(minute);
                log::debug!(
                    "{} sub {}': {} on, {} off ({:?})",
                    self.teams[side].name,
                    minute,
                    done.player_in,
                    done.player_out,
                    done.reason
                );
                self.push(MatchEvent::new(
                    minute,
                    EventType::Substitution,
                    Some(side),
                    EventPayload::Substitution {
                        player_in: done.player_in,
                        player_out: done.player_out,
                        reason: done.reason,
                    },
                ));
            }
        }
    }

    // ========== Result ==========

    /// Play out whatever is left and build the final result.
    pub fn into_result(mut self) -> MatchResult {
        while self.next().is_some() {}

        let mut player_ratings = BTreeMap::new();
        let mut man_of_the_match: Option<(String, f32)> = None;

        for side in TeamSide::BOTH {
            for player in self.teams[side].squad.participants() {
                let key = rating_key(&player_ratings, &player.name, &player.id);
                let is_better = man_of_the_match
                    .as_ref()
                    .map_or(true, |(_, best)| player.match_rating > *best);
                if is_better {
                    man_of_the_match = Some((key.clone(), player.match_rating));
                }
                player_ratings.insert(
                    key,
                    PlayerRating {
                        player_id: player.id.clone(),
                        side,
                        rating: player.match_rating,
                        condition: player.condition,
                    },
                );
            }
        }

        let teams = self.teams.as_ref().map(|side, team| TeamResult {
            club: team.name.clone(),
            club_id: team.club_id.clone(),
            score: self.state.score[side],
            stats: self.state.stats[side],
            final_tactic: self.tactics.active(side),
            substitutions: self.state.substitutions[side].used,
        });

        MatchResult {
            home: teams.home,
            away: teams.away,
            events: self.history.clone(),
            player_ratings,
            man_of_the_match: man_of_the_match.map(|(name, _)| name),
            date: self.date,
            seed: self.seed,
        }
    }
}

impl Iterator for MatchEngine {
    type Item = MatchEvent;

    fn next(&mut self) -> Option<MatchEvent> {
        loop {
            if let Some(event) = self.buffer.pop_front() {
                self.history.push(event.clone());
                return Some(event);
            }
            if self.phase == MatchPhase::Finished {
                return None;
            }
            self.step();
        }
    }
}

/// Player name, or `name [id]` when the name is already taken.
fn rating_key(ratings: &BTreeMap<String, PlayerRating>, name: &str, id: &str) -> String {
    if ratings.contains_key(name) {
        format!("{name} [{id}]")
    } else {
        name.to_string()
    }
}

/// Score-only fast path for fixtures nobody watches.
pub fn quick_simulate(rng: &mut dyn RandomSource) -> SidePair<u8> {
    let mut score = SidePair::new(0u8, 0u8);
    for _ in 0..QUICK_SIM_TRIALS {
        if rng.next_f32() > QUICK_SIM_THRESHOLD {
            score.home += 1;
        }
        if rng.next_f32() > QUICK_SIM_THRESHOLD {
            score.away += 1;
        }
    }
    score
}
