//! 공격 체인: creator → (pass | dribble | long shot) → shot.
//!
//! A failed pass can flip the chain into a counter-attack for the other side.
//! Counters run in the same loop, bounded by `max_counter_depth`.

use super::MatchEngine;
use crate::engine::action_decision::{decide_next_move, Action, MoveContext};
use crate::engine::attributes::{effective, Attribute};
use crate::engine::duel::{aerial_duel, dribble_vs_tackle, resolve_shot, ShotOutcome};
use crate::models::{EventPayload, EventType, MatchEvent, MidfieldFlavor, Position, ShotKind, TeamSide};

pub const CREATOR_POSITIONS: [Position; 4] = [Position::CAM, Position::CM, Position::LW, Position::RW];
pub const CHAIN_DEFENDER_POSITIONS: [Position; 4] = [Position::CB, Position::LB, Position::RB, Position::CDM];
pub const FINISHER_POSITIONS: [Position; 3] = [Position::ST, Position::RW, Position::LW];
pub const CROSS_TARGET_POSITIONS: [Position; 2] = [Position::ST, Position::CF];
pub const AERIAL_DEFENDER_POSITIONS: [Position; 1] = [Position::CB];
pub const MIDFIELD_POSITIONS: [Position; 2] = [Position::CM, Position::CDM];
pub const FOUL_POSITIONS: [Position; 2] = [Position::CB, Position::CDM];

/// Pass weight bonus on a counter (open space)
pub const COUNTER_PASS_BONUS: f32 = 1.5;

pub const GOAL_RATING_BONUS: f32 = 1.5;
pub const CONCEDED_RATING_PENALTY: f32 = -1.0;
pub const SAVE_RATING_BONUS: f32 = 0.5;

impl MatchEngine {
    pub(super) fn run_attack_chain(&mut self, first_attacker: TeamSide) {
        let minute = self.state.minute;
        let max_depth = self.config.clock.max_counter_depth;
        let counter_chance = self.config.clock.counter_attack_chance;

        let mut attacking = first_attacker;
        let mut counter = false;
        let mut depth = 0u8;

        loop {
            let defending = attacking.opponent();
            let creator_slot = self.teams[attacking].squad.pick_slot(&CREATOR_POSITIONS, &mut *self.rng);
            let defender_slot =
                self.teams[defending].squad.pick_slot(&CHAIN_DEFENDER_POSITIONS, &mut *self.rng);

            let action = if counter {
                Action::Pass
            } else {
                let squad = &self.teams[attacking].squad;
                let ctx = MoveContext {
                    position: squad.lineup()[creator_slot].position,
                    score_diff: self.state.score_diff(attacking),
                    minute,
                };
                decide_next_move(squad.player(creator_slot), &ctx, &mut *self.rng)
            };

            match action {
                Action::Pass => {
                    if self.pass_succeeds(attacking, creator_slot, defender_slot, counter) {
                        self.after_completed_pass(attacking, creator_slot, counter);
                        return;
                    }

                    let event = MatchEvent::new(
                        minute,
                        EventType::Intercept,
                        Some(defending),
                        EventPayload::Intercept {
                            defender: self.teams[defending].squad.player(defender_slot).name.clone(),
                            passer: self.teams[attacking].squad.player(creator_slot).name.clone(),
                        },
                    );
                    self.push(event);

                    if depth < max_depth && self.rng.chance(counter_chance) {
                        depth += 1;
                        counter = true;
                        attacking = defending;
                        continue;
                    }
                    return;
                }
                Action::Dribble => {
                    let duel = dribble_vs_tackle(
                        self.teams[attacking].squad.player(creator_slot),
                        self.teams[defending].squad.player(defender_slot),
                    );
                    let dribbler = self.teams[attacking].squad.player(creator_slot).name.clone();
                    let defender = self.teams[defending].squad.player(defender_slot).name.clone();

                    if duel.attacker_wins() {
                        self.push(MatchEvent::new(
                            minute,
                            EventType::Dribble,
                            Some(attacking),
                            EventPayload::Dribble { dribbler, defender },
                        ));
                        self.execute_shot(attacking, creator_slot, ShotKind::Dribble);
                    } else {
                        self.push(MatchEvent::new(
                            minute,
                            EventType::Defense,
                            Some(defending),
                            EventPayload::Tackle { defender, attacker: dribbler },
                        ));
                    }
                    return;
                }
                Action::Shoot => {
                    self.execute_shot(attacking, creator_slot, ShotKind::LongShot);
                    return;
                }
            }
        }
    }

    /// `(short_passing + vision) × bonus × attack × U` against
    /// `(positioning + marking) × defense × U`.
    fn pass_succeeds(&mut self, attacking: TeamSide, creator_slot: usize, defender_slot: usize, counter: bool) -> bool {
        let defending = attacking.opponent();
        let passer = self.teams[attacking].squad.player(creator_slot);
        let defender = self.teams[defending].squad.player(defender_slot);

        let bonus = if counter { COUNTER_PASS_BONUS } else { 1.0 };
        let pass_skill = (effective(passer, Attribute::ShortPassing, 0.0) + effective(passer, Attribute::Vision, 0.0))
            * bonus
            * self.tactics.modifier(attacking).attack;
        let intercept_skill = (effective(defender, Attribute::Positioning, 0.0)
            + effective(defender, Attribute::Marking, 0.0))
            * self.tactics.modifier(defending).defense;

        pass_skill * self.rng.next_f32() > intercept_skill * self.rng.next_f32()
    }

    fn after_completed_pass(&mut self, attacking: TeamSide, creator_slot: usize, counter: bool) {
        let minute = self.state.minute;
        let defending = attacking.opponent();
        let creator_position = self.teams[attacking].squad.lineup()[creator_slot].position;
        let passer = self.teams[attacking].squad.player(creator_slot).name.clone();

        let crossing = !counter
            && creator_position.is_wide()
            && self.rng.chance(self.config.clock.cross_chance);

        if !crossing {
            let event_type = if counter { EventType::Dribble } else { EventType::Pass };
            self.push(MatchEvent::new(
                minute,
                event_type,
                Some(attacking),
                EventPayload::Pass { passer, counter_attack: counter },
            ));

            let finisher = self.teams[attacking].squad.pick_slot(&FINISHER_POSITIONS, &mut *self.rng);
            let kind = if counter { ShotKind::Counter } else { ShotKind::Open };
            self.execute_shot(attacking, finisher, kind);
            return;
        }

        let target_slot = self.teams[attacking].squad.pick_slot(&CROSS_TARGET_POSITIONS, &mut *self.rng);
        let marker_slot = self.teams[defending].squad.pick_slot(&AERIAL_DEFENDER_POSITIONS, &mut *self.rng);
        let target = self.teams[attacking].squad.player(target_slot).name.clone();

        self.push(MatchEvent::new(
            minute,
            EventType::Pass,
            Some(attacking),
            EventPayload::Cross { crosser: passer.clone(), target },
        ));

        let duel = aerial_duel(
            self.teams[attacking].squad.player(target_slot),
            self.teams[defending].squad.player(marker_slot),
        );
        if duel.attacker_wins() {
            self.execute_shot(attacking, target_slot, ShotKind::Header);
        } else {
            let defender = self.teams[defending].squad.player(marker_slot).name.clone();
            self.push(MatchEvent::new(
                minute,
                EventType::Defense,
                Some(defending),
                EventPayload::Clearance { defender, crosser: passer },
            ));
        }
    }

    pub(super) fn execute_shot(&mut self, attacking: TeamSide, shooter_slot: usize, kind: ShotKind) {
        let minute = self.state.minute;
        let defending = attacking.opponent();
        let clock = &self.config.clock;

        let pressure = if kind == ShotKind::Counter {
            clock.counter_pressure
        } else {
            self.rng.uniform(0.0, clock.open_play_max_pressure)
        };

        let keeper_slot = self.teams[defending].squad.goalkeeper_slot();
        let resolution = resolve_shot(
            self.teams[attacking].squad.player(shooter_slot),
            self.teams[defending].squad.player(keeper_slot),
            kind,
            pressure,
            &mut *self.rng,
        );

        let stats = &mut self.state.stats[attacking];
        stats.shots += 1;
        stats.xg += resolution.xg;
        if resolution.outcome.is_on_target() {
            stats.shots_on_target += 1;
        }

        let event_type = match resolution.outcome {
            ShotOutcome::Goal => {
                self.state.score[attacking] += 1;
                self.teams[attacking].squad.player_mut(shooter_slot).adjust_rating(GOAL_RATING_BONUS);
                self.teams[defending].squad.player_mut(keeper_slot).adjust_rating(CONCEDED_RATING_PENALTY);
                EventType::Goal
            }
            ShotOutcome::Save => {
                self.state.stats[attacking].corners += 1;
                self.teams[defending].squad.player_mut(keeper_slot).adjust_rating(SAVE_RATING_BONUS);
                EventType::Save
            }
            ShotOutcome::Miss => EventType::Miss,
        };

        let mut event = MatchEvent::new(
            minute,
            event_type,
            Some(attacking),
            EventPayload::Shot {
                shooter: self.teams[attacking].squad.player(shooter_slot).name.clone(),
                keeper: self.teams[defending].squad.player(keeper_slot).name.clone(),
                shot: kind,
                shot_quality: resolution.shot_quality,
                save_quality: resolution.save_quality,
                xg: resolution.xg,
            },
        );
        if event_type == EventType::Goal {
            event = event.with_score(self.state.score);
            log::debug!("Goal {:?} at {}' ({:?})", attacking, minute, kind);
        }
        self.push(event);
    }

    pub(super) fn midfield_play(&mut self, side: TeamSide) {
        let slot = self.teams[side].squad.pick_slot(&MIDFIELD_POSITIONS, &mut *self.rng);
        let flavor = MidfieldFlavor::ALL[self.rng.index(MidfieldFlavor::ALL.len())];
        let player = self.teams[side].squad.player(slot).name.clone();
        self.push(MatchEvent::new(
            self.state.minute,
            EventType::Commentary,
            Some(side),
            EventPayload::MidfieldPlay { player, flavor },
        ));
    }

    /// Foul by the side out of possession; some become yellow cards.
    pub(super) fn commit_foul(&mut self, offender: TeamSide) {
        let slot = self.teams[offender].squad.pick_slot(&FOUL_POSITIONS, &mut *self.rng);
        let player = self.teams[offender].squad.player(slot).name.clone();
        let booked = self.rng.chance(self.config.clock.yellow_card_chance);

        let stats = &mut self.state.stats[offender];
        stats.fouls += 1;

        let (event_type, payload) = if booked {
            stats.yellow_cards += 1;
            (EventType::YellowCard, EventPayload::Card { player })
        } else {
            (EventType::Foul, EventPayload::Foul { player })
        };
        self.push(MatchEvent::new(self.state.minute, event_type, Some(offender), payload));
    }
}
