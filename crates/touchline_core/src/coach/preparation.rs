//! Pre-match Coach AI
//!
//! Builds a [`Preparation`] for one fixture:
//! 1. scout the opponent ([`OpponentAnalysis`])
//! 2. assess our own squad and the fixture's importance
//! 3. pick a strategy from the strength difference, then exploit weaknesses
//! 4. pick a formation that counters the opponent's, fill the XI slot by slot
//! 5. hand out roles, team instructions and the kickoff tactic
//!
//! Strategy reasoning is emitted as keys; rendering them is the client's job.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

use super::formations::{formation_slots, select_formation};
use super::opponent_analysis::{OpponentAnalysis, VulnerableArea};
use crate::engine::lineup::{validate_squad, LineupSlot, LINEUP_SIZE};
use crate::error::Result;
use crate::models::{Club, MatchResult, Player, Position, Tactic};
use crate::rng::RandomSource;

/// Strength gap (either way) inside which two sides count as even
pub const EVEN_STRENGTH_MARGIN: f32 = 10.0;
pub const PRESSING_BYPASS_THRESHOLD: f32 = 75.0;
/// Results kept in coach memory
pub const MEMORY_SIZE: usize = 10;

const FORM_WEIGHT: f32 = 2.0;
const FITNESS_DIVISOR: f32 = 10.0;
const TACTICAL_FIT_WEIGHT: f32 = 0.1;
const LATE_SEASON_MATCHDAY: u32 = 30;
const TITLE_RACE_POSITION: u32 = 4;

// ========== Strategy vocabulary ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Approach {
    Attacking,
    Counter,
    Defensive,
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mentality {
    Defensive,
    Standard,
    Attacking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tempo {
    Medium,
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Width {
    Balanced,
    Wide,
}

/// Used for both defensive line height and pressing intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildUp {
    Short,
    Direct,
}

/// Why the strategy looks the way it does (translation keys for the client)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyReason {
    OpponentMuchStronger,
    HomeAdvantagePressHigh,
    EvenlyMatched,
    WeAreStronger,
    ExploitWeakFlanks,
    ExploitPaceInBehind,
    BypassTheirPress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub approach: Approach,
    pub mentality: Mentality,
    pub tempo: Tempo,
    pub width: Width,
    pub defensive_line: Intensity,
    pub pressing: Intensity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_up: Option<BuildUp>,
    pub reasoning: Vec<StrategyReason>,
}

impl Default for Strategy {
    fn default() -> Self {
        Self {
            approach: Approach::Balanced,
            mentality: Mentality::Standard,
            tempo: Tempo::Medium,
            width: Width::Balanced,
            defensive_line: Intensity::Medium,
            pressing: Intensity::Medium,
            build_up: None,
            reasoning: Vec::new(),
        }
    }
}

impl Strategy {
    /// Strategy from our rating against the scouted opponent.
    pub fn determine(own_rating: f32, analysis: &OpponentAnalysis, is_home: bool) -> Self {
        let diff = own_rating - analysis.overall_strength();
        let mut strategy = Strategy::default();

        if diff < -EVEN_STRENGTH_MARGIN {
            strategy.approach = Approach::Counter;
            strategy.mentality = Mentality::Defensive;
            strategy.defensive_line = Intensity::Low;
            strategy.pressing = Intensity::Low;
            strategy.reasoning.push(StrategyReason::OpponentMuchStronger);
        } else if diff.abs() <= EVEN_STRENGTH_MARGIN {
            if is_home {
                strategy.approach = Approach::Attacking;
                strategy.mentality = Mentality::Attacking;
                strategy.pressing = Intensity::High;
                strategy.reasoning.push(StrategyReason::HomeAdvantagePressHigh);
            } else {
                strategy.reasoning.push(StrategyReason::EvenlyMatched);
            }
        } else {
            strategy.approach = Approach::Attacking;
            strategy.mentality = Mentality::Attacking;
            strategy.tempo = Tempo::Fast;
            strategy.pressing = Intensity::High;
            strategy.defensive_line = Intensity::High;
            strategy.width = Width::Wide;
            strategy.reasoning.push(StrategyReason::WeAreStronger);
        }

        if analysis.has_vulnerability(VulnerableArea::Flanks) {
            strategy.width = Width::Wide;
            strategy.reasoning.push(StrategyReason::ExploitWeakFlanks);
        }
        if analysis.has_vulnerability(VulnerableArea::PaceBehindDefense) {
            strategy.tempo = Tempo::Fast;
            strategy.reasoning.push(StrategyReason::ExploitPaceInBehind);
        }
        if analysis.play_style.pressing_intensity > PRESSING_BYPASS_THRESHOLD {
            strategy.build_up = Some(BuildUp::Direct);
            strategy.reasoning.push(StrategyReason::BypassTheirPress);
        }

        strategy
    }

    /// Kickoff tactic for the match engine.
    pub fn initial_tactic(&self) -> Tactic {
        match self.approach {
            Approach::Counter => Tactic::CounterAttack,
            Approach::Attacking if self.pressing == Intensity::High => Tactic::HighPress,
            Approach::Attacking => Tactic::Possession,
            Approach::Defensive => Tactic::ParkTheBus,
            Approach::Balanced => Tactic::Balanced,
        }
    }
}

// ========== Fixture context ==========

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchContext {
    pub is_home: bool,
    /// e.g. "champions_league", "league"
    pub competition: Option<String>,
    pub round: Option<String>,
    pub matchday: Option<u32>,
    pub league_position: Option<u32>,
    pub derby: bool,
}

impl MatchContext {
    pub fn home() -> Self {
        Self { is_home: true, ..Self::default() }
    }

    pub fn away() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchImportance {
    Normal,
    Important,
    Crucial,
}

impl MatchImportance {
    pub fn evaluate(context: &MatchContext) -> Self {
        let is_final = context.competition.as_deref() == Some("champions_league")
            && context.round.as_deref() == Some("final");
        if is_final {
            return MatchImportance::Crucial;
        }

        let title_run_in = matches!(
            (context.matchday, context.league_position),
            (Some(day), Some(pos)) if day > LATE_SEASON_MATCHDAY && pos <= TITLE_RACE_POSITION
        );
        if title_run_in || context.derby {
            return MatchImportance::Important;
        }

        MatchImportance::Normal
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadStatus {
    pub total_players: usize,
    pub average_rating: f32,
    pub average_fitness: f32,
    pub injuries: usize,
    pub suspensions: usize,
    pub form: f32,
}

impl SquadStatus {
    pub fn assess(club: &Club) -> Self {
        let players = &club.squad.current_players;
        let count = players.len().max(1) as f32;

        Self {
            total_players: players.len(),
            average_rating: club.average_rating(),
            average_fitness: players.iter().map(|p| p.fitness).sum::<f32>() / count,
            injuries: players.iter().filter(|p| p.injured).count(),
            suspensions: players.iter().filter(|p| p.suspended).count(),
            form: players.iter().map(|p| p.current_form).sum::<f32>() / count,
        }
    }
}

// ========== Roles & instructions ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    Goalkeeper,
    FullBack,
    CentralDefender,
    WingBack,
    DefensiveMidfielder,
    CentralMidfielder,
    AttackingMidfielder,
    WideMidfielder,
    Winger,
    Striker,
}

impl PlayerRole {
    pub fn for_position(position: Position) -> Self {
        match position {
            Position::GK => PlayerRole::Goalkeeper,
            Position::LB | Position::RB => PlayerRole::FullBack,
            Position::CB => PlayerRole::CentralDefender,
            Position::LWB | Position::RWB => PlayerRole::WingBack,
            Position::CDM => PlayerRole::DefensiveMidfielder,
            Position::CM => PlayerRole::CentralMidfielder,
            Position::CAM => PlayerRole::AttackingMidfielder,
            Position::LM | Position::RM => PlayerRole::WideMidfielder,
            Position::LW | Position::RW => PlayerRole::Winger,
            Position::ST | Position::CF => PlayerRole::Striker,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleInstruction {
    PressMore,
    StayWide,
    ShootMore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub position: Position,
    pub player_id: String,
    pub role: PlayerRole,
    pub instructions: Vec<RoleInstruction>,
}

impl RoleAssignment {
    fn new(slot: &LineupSlot, strategy: &Strategy) -> Self {
        let position = slot.position;
        let mut instructions = Vec::new();

        if strategy.pressing == Intensity::High {
            instructions.push(RoleInstruction::PressMore);
        }
        if strategy.width == Width::Wide && position.is_wide() {
            instructions.push(RoleInstruction::StayWide);
        }
        if strategy.mentality == Mentality::Attacking && matches!(position, Position::ST | Position::CAM) {
            instructions.push(RoleInstruction::ShootMore);
        }

        Self { position, player_id: slot.player.id.clone(), role: PlayerRole::for_position(position), instructions }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Creativity {
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunType {
    RunAtDefense,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crossing {
    CrossOften,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shooting {
    ShootMore,
    WorkIntoBox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralInstructions {
    pub tempo: Tempo,
    pub width: Width,
    pub passing_style: BuildUp,
    pub creativity: Creativity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackingInstructions {
    pub run_type: RunType,
    pub crossing: Crossing,
    pub shooting: Shooting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefendingInstructions {
    pub defensive_line: Intensity,
    pub pressing: Intensity,
    /// Always medium for now
    pub tackling: Intensity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchInstructions {
    pub general: GeneralInstructions,
    pub attacking: AttackingInstructions,
    pub defending: DefendingInstructions,
}

impl MatchInstructions {
    pub fn from_strategy(strategy: &Strategy) -> Self {
        let attacking_mentality = strategy.mentality == Mentality::Attacking;
        let wide = strategy.width == Width::Wide;

        Self {
            general: GeneralInstructions {
                tempo: strategy.tempo,
                width: strategy.width,
                passing_style: strategy.build_up.unwrap_or(BuildUp::Short),
                creativity: if attacking_mentality { Creativity::High } else { Creativity::Medium },
            },
            attacking: AttackingInstructions {
                run_type: if strategy.approach == Approach::Attacking {
                    RunType::RunAtDefense
                } else {
                    RunType::Mixed
                },
                crossing: if wide { Crossing::CrossOften } else { Crossing::Mixed },
                shooting: if attacking_mentality { Shooting::ShootMore } else { Shooting::WorkIntoBox },
            },
            defending: DefendingInstructions {
                defensive_line: strategy.defensive_line,
                pressing: strategy.pressing,
                tackling: Intensity::Medium,
            },
        }
    }
}

// ========== Preparation ==========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preparation {
    pub formation: String,
    pub strategy: Strategy,
    pub lineup: Vec<LineupSlot>,
    pub bench: Vec<Player>,
    pub roles: Vec<RoleAssignment>,
    pub instructions: MatchInstructions,
    pub analysis: OpponentAnalysis,
    pub importance: MatchImportance,
    pub squad_status: SquadStatus,
    pub initial_tactic: Tactic,
}

/// What the coach remembers about the last meeting with a club.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentProfile {
    pub last_played: Option<NaiveDate>,
    pub goals_for: u8,
    pub goals_against: u8,
    pub tactic_used: Tactic,
}

#[derive(Debug, Clone, Default)]
pub struct CoachMemory {
    pub previous_matches: VecDeque<MatchResult>,
    pub opponent_profiles: HashMap<String, OpponentProfile>,
}

pub struct CoachAi {
    club: Club,
    memory: CoachMemory,
}

impl CoachAi {
    pub fn new(club: Club) -> Self {
        Self { club, memory: CoachMemory::default() }
    }

    pub fn club(&self) -> &Club {
        &self.club
    }

    pub fn memory(&self) -> &CoachMemory {
        &self.memory
    }

    pub fn opponent_profile(&self, club_id: &str) -> Option<&OpponentProfile> {
        self.memory.opponent_profiles.get(club_id)
    }

    pub fn prepare_for_match(
        &self,
        opponent: &Club,
        context: &MatchContext,
        rng: &mut dyn RandomSource,
    ) -> Result<Preparation> {
        validate_squad(&self.club)?;
        let available: Vec<&Player> = self.club.available_players().collect();

        let analysis = OpponentAnalysis::analyze(opponent, rng);
        let squad_status = SquadStatus::assess(&self.club);
        let importance = MatchImportance::evaluate(context);
        let strategy = Strategy::determine(squad_status.average_rating, &analysis, context.is_home);

        let formation = select_formation(strategy.approach, &analysis.play_style.formation);
        log::debug!(
            "{} vs {}: {:?} in {} (counters {})",
            self.club.name,
            opponent.name,
            strategy.approach,
            formation,
            analysis.play_style.formation
        );

        let lineup = select_starting_eleven(&available, formation, &strategy);
        let picked: HashSet<&str> = lineup.iter().map(|slot| slot.player.id.as_str()).collect();
        let bench = available.iter().filter(|p| !picked.contains(p.id.as_str())).map(|p| (*p).clone()).collect();
        let roles = lineup.iter().map(|slot| RoleAssignment::new(slot, &strategy)).collect();

        Ok(Preparation {
            formation: formation.to_string(),
            instructions: MatchInstructions::from_strategy(&strategy),
            initial_tactic: strategy.initial_tactic(),
            strategy,
            lineup,
            bench,
            roles,
            analysis,
            importance,
            squad_status,
        })
    }

    /// Remember a finished match; keeps the last [`MEMORY_SIZE`] results.
    pub fn learn_from_match(&mut self, result: &MatchResult, opponent_id: &str) {
        self.memory.previous_matches.push_back(result.clone());
        while self.memory.previous_matches.len() > MEMORY_SIZE {
            self.memory.previous_matches.pop_front();
        }

        match result.side_of_club(opponent_id) {
            Some(their_side) => {
                let (goals_against, goals_for) = result.goals_for_against(their_side);
                self.memory.opponent_profiles.insert(
                    opponent_id.to_string(),
                    OpponentProfile {
                        last_played: result.date,
                        goals_for,
                        goals_against,
                        tactic_used: result.team(their_side).final_tactic,
                    },
                );
            }
            None => log::warn!("{} did not play in this match, profile not updated", opponent_id),
        }
        log::debug!("{} coach remembers {} matches", self.club.name, self.memory.previous_matches.len());
    }
}

// ========== Starting XI ==========

fn selection_score(player: &Player, slot: Position, strategy: &Strategy) -> f32 {
    let mut score = player.current_rating + player.current_form * FORM_WEIGHT + player.fitness / FITNESS_DIVISOR;

    if strategy.approach == Approach::Attacking && matches!(slot, Position::ST | Position::LW | Position::RW | Position::CAM)
    {
        score += (player.technical.finishing + player.physical.pace) * TACTICAL_FIT_WEIGHT;
    }
    if strategy.pressing == Intensity::High {
        score += (player.physical.stamina + player.mental.work_rate) * TACTICAL_FIT_WEIGHT;
    }
    score
}

/// Highest-scoring unused player passing `eligible`; earlier squad order wins ties.
fn best_candidate<'a>(
    available: &[&'a Player],
    used: &HashSet<&str>,
    slot: Position,
    strategy: &Strategy,
    eligible: impl Fn(&Player) -> bool,
) -> Option<&'a Player> {
    let mut best: Option<(&'a Player, f32)> = None;
    for player in available.iter().copied() {
        if used.contains(player.id.as_str()) || !eligible(player) {
            continue;
        }
        let score = selection_score(player, slot, strategy);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((player, score));
        }
    }
    best.map(|(player, _)| player)
}

/// Callers guarantee at least [`LINEUP_SIZE`] available players.
fn select_starting_eleven(available: &[&Player], formation: &str, strategy: &Strategy) -> Vec<LineupSlot> {
    let mut used: HashSet<&str> = HashSet::new();
    let mut lineup = Vec::with_capacity(LINEUP_SIZE);

    for slot in formation_slots(formation) {
        let chosen = best_candidate(available, &used, slot, strategy, |p| p.plays(slot))
            .or_else(|| {
                best_candidate(available, &used, slot, strategy, |p| {
                    p.positions.iter().any(|listed| listed.is_compatible_position(slot))
                })
            })
            .or_else(|| best_candidate(available, &used, slot, strategy, |_| true));

        if let Some(player) = chosen {
            if !player.plays(slot) {
                log::debug!("{} covers {:?} out of position", player.name, slot);
            }
            used.insert(player.id.as_str());
            lineup.push(LineupSlot::new(slot, player.clone()));
        }
    }
    lineup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::engine::match_sim::MatchEngine;
    use crate::error::MatchError;
    use crate::rng::ScriptedRandom;
    use crate::test_support::{player, sample_club};

    fn scouted(threat: f32, solidity: f32) -> OpponentAnalysis {
        let mut analysis =
            OpponentAnalysis::analyze(&sample_club("opp", "Opponents"), &mut ScriptedRandom::constant(0.5));
        analysis.attacking_threat = threat;
        analysis.defensive_solidity = solidity;
        analysis.vulnerable_areas.clear();
        analysis.play_style.pressing_intensity = 50.0;
        analysis
    }

    #[test]
    fn test_strategy_by_strength() {
        let weaker = Strategy::determine(60.0, &scouted(80.0, 70.0), true);
        assert_eq!(weaker.approach, Approach::Counter);
        assert_eq!(weaker.pressing, Intensity::Low);
        assert_eq!(weaker.initial_tactic(), Tactic::CounterAttack);

        let even_home = Strategy::determine(70.0, &scouted(70.0, 70.0), true);
        assert_eq!(even_home.approach, Approach::Attacking);
        assert_eq!(even_home.initial_tactic(), Tactic::HighPress);

        let even_away = Strategy::determine(70.0, &scouted(70.0, 70.0), false);
        assert_eq!(even_away.approach, Approach::Balanced);
        assert_eq!(even_away.reasoning, vec![StrategyReason::EvenlyMatched]);
        assert_eq!(even_away.initial_tactic(), Tactic::Balanced);

        let stronger = Strategy::determine(85.0, &scouted(60.0, 60.0), false);
        assert_eq!(stronger.tempo, Tempo::Fast);
        assert_eq!(stronger.width, Width::Wide);
        assert_eq!(stronger.defensive_line, Intensity::High);
    }

    #[test]
    fn test_strategy_exploits_weaknesses() {
        let mut analysis = scouted(70.0, 70.0);
        analysis.vulnerable_areas = vec![VulnerableArea::Flanks, VulnerableArea::PaceBehindDefense];
        analysis.play_style.pressing_intensity = 80.0;

        let strategy = Strategy::determine(70.0, &analysis, false);
        assert_eq!(strategy.width, Width::Wide);
        assert_eq!(strategy.tempo, Tempo::Fast);
        assert_eq!(strategy.build_up, Some(BuildUp::Direct));
        assert_eq!(
            strategy.reasoning,
            vec![
                StrategyReason::EvenlyMatched,
                StrategyReason::ExploitWeakFlanks,
                StrategyReason::ExploitPaceInBehind,
                StrategyReason::BypassTheirPress
            ]
        );
    }

    #[test]
    fn test_tactic_for_remaining_approaches() {
        let attacking = Strategy { approach: Approach::Attacking, ..Strategy::default() };
        assert_eq!(attacking.initial_tactic(), Tactic::Possession);
        let defensive = Strategy { approach: Approach::Defensive, ..Strategy::default() };
        assert_eq!(defensive.initial_tactic(), Tactic::ParkTheBus);
    }

    #[test]
    fn test_match_importance() {
        let final_ctx = MatchContext {
            competition: Some("champions_league".into()),
            round: Some("final".into()),
            ..MatchContext::default()
        };
        assert_eq!(MatchImportance::evaluate(&final_ctx), MatchImportance::Crucial);

        let run_in = MatchContext { matchday: Some(34), league_position: Some(2), ..MatchContext::default() };
        assert_eq!(MatchImportance::evaluate(&run_in), MatchImportance::Important);

        let mid_table = MatchContext { matchday: Some(34), league_position: Some(9), ..MatchContext::default() };
        assert_eq!(MatchImportance::evaluate(&mid_table), MatchImportance::Normal);

        let derby = MatchContext { derby: true, ..MatchContext::default() };
        assert_eq!(MatchImportance::evaluate(&derby), MatchImportance::Important);
    }

    #[test]
    fn test_squad_status() {
        let mut club = sample_club("home", "Home FC");
        club.squad.current_players[3].injured = true;
        club.squad.current_players[4].suspended = true;
        let status = SquadStatus::assess(&club);
        assert_eq!(status.total_players, 18);
        assert_eq!(status.injuries, 1);
        assert_eq!(status.suspensions, 1);
        assert_eq!(status.average_fitness, 100.0);
        assert_eq!(status.form, 7.0);
    }

    #[test]
    fn test_prepare_fills_eleven_unique_slots() {
        let coach = CoachAi::new(sample_club("home", "Home FC"));
        let opponent = sample_club("away", "Away United");
        let prep = coach
            .prepare_for_match(&opponent, &MatchContext::home(), &mut ScriptedRandom::constant(0.5))
            .unwrap();

        assert_eq!(prep.lineup.len(), LINEUP_SIZE);
        assert_eq!(prep.lineup[0].position, Position::GK);
        assert!(prep.lineup[0].player.is_goalkeeper());

        let ids: HashSet<&str> = prep.lineup.iter().map(|s| s.player.id.as_str()).collect();
        assert_eq!(ids.len(), LINEUP_SIZE);
        assert_eq!(prep.bench.len(), 7);
        assert!(prep.bench.iter().all(|p| !ids.contains(p.id.as_str())));

        let slots = formation_slots(&prep.formation);
        let fielded: Vec<Position> = prep.lineup.iter().map(|s| s.position).collect();
        assert_eq!(fielded, slots.to_vec());
        assert_eq!(prep.roles.len(), LINEUP_SIZE);
        assert_eq!(prep.initial_tactic, prep.strategy.initial_tactic());
    }

    #[test]
    fn test_prepared_side_plays_a_match() {
        let config = SimConfig::default();
        let home_club = sample_club("home", "Home FC");
        let away_club = sample_club("away", "Away United");
        let mut rng = ScriptedRandom::constant(0.5);

        let home_prep = CoachAi::new(home_club.clone())
            .prepare_for_match(&away_club, &MatchContext::home(), &mut rng)
            .unwrap();
        let away_prep = CoachAi::new(away_club.clone())
            .prepare_for_match(&home_club, &MatchContext::away(), &mut rng)
            .unwrap();

        let home = crate::engine::match_sim::MatchSide::prepared(&home_club, &home_prep, &config).unwrap();
        let away = crate::engine::match_sim::MatchSide::prepared(&away_club, &away_prep, &config).unwrap();
        let result = MatchEngine::seeded(home, away, config, 77).unwrap().into_result();
        assert!(result.events.len() > 3);
    }

    #[test]
    fn test_selection_prefers_form_and_fitness() {
        let mut club = sample_club("home", "Home FC");
        // the bench keeper is in better shape than the starter
        let bench_keeper = club.squad.current_players.iter().position(|p| p.id == "home_gk2").unwrap();
        club.squad.current_players[bench_keeper].current_form = 9.0;

        let prep = CoachAi::new(club)
            .prepare_for_match(&sample_club("away", "Away"), &MatchContext::away(), &mut ScriptedRandom::constant(0.5))
            .unwrap();
        assert_eq!(prep.lineup[0].player.id, "home_gk2");
    }

    #[test]
    fn test_missing_keeper_or_short_squad() {
        let opponent = sample_club("away", "Away United");

        let mut no_keeper = sample_club("home", "Home FC");
        no_keeper.squad.current_players.retain(|p| !p.is_goalkeeper());
        let err = CoachAi::new(no_keeper)
            .prepare_for_match(&opponent, &MatchContext::home(), &mut ScriptedRandom::constant(0.5))
            .unwrap_err();
        assert!(matches!(err, MatchError::MissingData(_)));

        let mut short = sample_club("home", "Home FC");
        for p in short.squad.current_players.iter_mut().skip(5) {
            p.injured = true;
        }
        let err = CoachAi::new(short)
            .prepare_for_match(&opponent, &MatchContext::home(), &mut ScriptedRandom::constant(0.5))
            .unwrap_err();
        assert!(matches!(err, MatchError::MissingData(_)));
    }

    #[test]
    fn test_out_of_position_fallback() {
        // nobody lists CDM, so 4-3-3 has to borrow from a compatible line
        let slots = formation_slots("4-3-3");
        let mut players: Vec<Player> = vec![player("gk", Position::GK)];
        for (i, pos) in slots.iter().skip(1).enumerate() {
            let pos = if *pos == Position::CDM { Position::CM } else { *pos };
            players.push(player(&format!("p{i}"), pos));
        }
        players.push(player("spare_st", Position::ST));
        let refs: Vec<&Player> = players.iter().collect();

        let strategy = Strategy { approach: Approach::Attacking, ..Strategy::default() };
        let lineup = select_starting_eleven(&refs, "4-3-3", &strategy);
        assert_eq!(lineup.len(), LINEUP_SIZE);
        let cdm = lineup.iter().find(|s| s.position == Position::CDM).unwrap();
        assert!(cdm.player.plays(Position::CM));
    }

    #[test]
    fn test_roles_and_instructions() {
        let strategy = Strategy {
            approach: Approach::Attacking,
            mentality: Mentality::Attacking,
            pressing: Intensity::High,
            width: Width::Wide,
            ..Strategy::default()
        };
        let winger = RoleAssignment::new(&LineupSlot::new(Position::LW, player("w", Position::LW)), &strategy);
        assert_eq!(winger.role, PlayerRole::Winger);
        assert_eq!(winger.instructions, vec![RoleInstruction::PressMore, RoleInstruction::StayWide]);

        let striker = RoleAssignment::new(&LineupSlot::new(Position::ST, player("s", Position::ST)), &strategy);
        assert_eq!(striker.instructions, vec![RoleInstruction::PressMore, RoleInstruction::ShootMore]);

        let team = MatchInstructions::from_strategy(&strategy);
        assert_eq!(team.general.passing_style, BuildUp::Short);
        assert_eq!(team.general.creativity, Creativity::High);
        assert_eq!(team.attacking.run_type, RunType::RunAtDefense);
        assert_eq!(team.attacking.crossing, Crossing::CrossOften);
        assert_eq!(team.defending.pressing, Intensity::High);

        let calm = MatchInstructions::from_strategy(&Strategy::default());
        assert_eq!(calm.attacking.shooting, Shooting::WorkIntoBox);
        assert_eq!(calm.attacking.run_type, RunType::Mixed);
    }

    #[test]
    fn test_learn_from_match_is_bounded() {
        let home = sample_club("home", "Home FC");
        let away = sample_club("away", "Away United");
        let result = MatchEngine::from_clubs(&home, &away, SimConfig::default(), 3)
            .unwrap()
            .with_date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
            .into_result();

        let mut coach = CoachAi::new(home);
        for _ in 0..12 {
            coach.learn_from_match(&result, "away");
        }
        assert_eq!(coach.memory().previous_matches.len(), MEMORY_SIZE);

        let profile = coach.opponent_profile("away").unwrap();
        assert_eq!(profile.goals_for, result.home.score);
        assert_eq!(profile.goals_against, result.away.score);
        assert_eq!(profile.tactic_used, result.away.final_tactic);
        assert_eq!(profile.last_played, NaiveDate::from_ymd_opt(2024, 5, 1));

        coach.learn_from_match(&result, "nobody");
        assert!(coach.opponent_profile("nobody").is_none());
    }
}
