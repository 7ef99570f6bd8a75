//! Opponent analysis for pre-match preparation
//!
//! Scouts an opponent's squad record and default tactics for threats,
//! weaknesses and play style.

use serde::{Deserialize, Serialize};

use crate::models::{Club, Player, Position};
use crate::rng::RandomSource;

/// Score used when a squad has nobody in the relevant positions
pub const NEUTRAL_SCORE: f32 = 50.0;
pub const KEY_PLAYER_COUNT: usize = 3;
pub const TALL_PLAYER_CM: f32 = 185.0;
pub const TALL_PLAYERS_FOR_HIGH_THREAT: usize = 4;
pub const WEAK_FULL_BACK_RATING: f32 = 70.0;
pub const SHORT_CENTRE_BACK_CM: f32 = 185.0;
pub const SLOW_CENTRE_BACK_PACE: f32 = 70.0;
pub const WEAK_POSITION_RATING: f32 = 68.0;
pub const HIGH_LINE: f32 = 70.0;
pub const HEAVY_PRESSING: f32 = 75.0;
pub const DIRECT_TEMPO: f32 = 70.0;

const SCOUTED_POSITIONS: [Position; 10] = [
    Position::GK,
    Position::LB,
    Position::CB,
    Position::RB,
    Position::CDM,
    Position::CM,
    Position::CAM,
    Position::LW,
    Position::RW,
    Position::ST,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VulnerableArea {
    /// Weak full-backs
    Flanks,
    /// Short centre-backs
    AerialDuels,
    /// Slow centre-backs
    PaceBehindDefense,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TacticalFlaw {
    HighLineSlowDefenders,
    VulnerableToLongBalls,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetPieceThreat {
    High,
    Medium,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildUpStyle {
    Direct,
    ShortPassing,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyPlayer {
    pub name: String,
    pub rating: f32,
    pub positions: Vec<Position>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayStyleProfile {
    pub formation: String,
    pub mentality: String,
    pub possession: f32,
    pub pressing_intensity: f32,
    pub attacking_width: f32,
    pub build_up: BuildUpStyle,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentAnalysis {
    pub attacking_threat: f32,
    pub defensive_solidity: f32,
    pub key_players: Vec<KeyPlayer>,
    pub set_pieces: SetPieceThreat,
    pub vulnerable_areas: Vec<VulnerableArea>,
    pub weak_positions: Vec<Position>,
    pub tactical_flaws: Vec<TacticalFlaw>,
    pub play_style: PlayStyleProfile,
    /// 1-10
    pub form: f32,
}

impl OpponentAnalysis {
    pub fn analyze(opponent: &Club, rng: &mut dyn RandomSource) -> Self {
        let squad = &opponent.squad.current_players;
        let style = &opponent.tactics.play_style;

        let build_up = if style.tempo > DIRECT_TEMPO { BuildUpStyle::Direct } else { BuildUpStyle::ShortPassing };

        let analysis = Self {
            attacking_threat: attacking_threat(squad),
            defensive_solidity: defensive_solidity(squad),
            key_players: key_players(squad),
            set_pieces: set_piece_threat(squad),
            vulnerable_areas: vulnerable_areas(squad),
            weak_positions: weak_positions(squad),
            tactical_flaws: tactical_flaws(opponent),
            play_style: PlayStyleProfile {
                formation: opponent.tactics.default_formation.clone(),
                mentality: opponent.tactics.mentality.clone(),
                possession: style.possession,
                pressing_intensity: style.pressing,
                attacking_width: style.width,
                build_up,
            },
            form: recent_form(opponent, rng),
        };

        log::debug!(
            "Scouted {}: threat {}, solidity {}, weaknesses {:?}",
            opponent.name,
            analysis.attacking_threat,
            analysis.defensive_solidity,
            analysis.vulnerable_areas
        );
        analysis
    }

    pub fn has_vulnerability(&self, area: VulnerableArea) -> bool {
        self.vulnerable_areas.contains(&area)
    }

    /// Mean of attacking threat and defensive solidity
    pub fn overall_strength(&self) -> f32 {
        (self.attacking_threat + self.defensive_solidity) / 2.0
    }
}

fn in_positions<'a>(squad: &'a [Player], positions: &'a [Position]) -> impl Iterator<Item = &'a Player> {
    squad.iter().filter(move |p| p.plays_any(positions))
}

/// Mean of `value` over `players`, or `None` when empty.
fn mean<'a>(players: impl Iterator<Item = &'a Player>, value: impl Fn(&Player) -> f32) -> Option<f32> {
    let (sum, count) = players.fold((0.0, 0usize), |(sum, count), p| (sum + value(p), count + 1));
    (count > 0).then(|| sum / count as f32)
}

fn attacking_threat(squad: &[Player]) -> f32 {
    const ATTACKERS: [Position; 5] = [Position::ST, Position::CF, Position::LW, Position::RW, Position::CAM];
    mean(in_positions(squad, &ATTACKERS), |p| (p.technical.finishing + p.physical.pace) / 2.0)
        .map_or(NEUTRAL_SCORE, f32::round)
}

fn defensive_solidity(squad: &[Player]) -> f32 {
    const DEFENDERS: [Position; 5] = [Position::GK, Position::CB, Position::LB, Position::RB, Position::CDM];
    mean(in_positions(squad, &DEFENDERS), |p| (p.technical.marking + p.technical.tackling) / 2.0)
        .map_or(NEUTRAL_SCORE, f32::round)
}

fn key_players(squad: &[Player]) -> Vec<KeyPlayer> {
    let mut ranked: Vec<&Player> = squad.iter().collect();
    ranked.sort_by(|a, b| b.current_rating.partial_cmp(&a.current_rating).unwrap_or(std::cmp::Ordering::Equal));
    ranked
        .into_iter()
        .take(KEY_PLAYER_COUNT)
        .map(|p| KeyPlayer { name: p.name.clone(), rating: p.current_rating, positions: p.positions.clone() })
        .collect()
}

fn set_piece_threat(squad: &[Player]) -> SetPieceThreat {
    let tall = squad.iter().filter(|p| p.physical.height_cm > TALL_PLAYER_CM).count();
    if tall >= TALL_PLAYERS_FOR_HIGH_THREAT {
        SetPieceThreat::High
    } else {
        SetPieceThreat::Medium
    }
}

fn vulnerable_areas(squad: &[Player]) -> Vec<VulnerableArea> {
    let mut areas = Vec::new();

    // An empty group counts as a zero average, so a missing unit is always a weakness
    let full_backs = mean(in_positions(squad, &[Position::LB, Position::RB]), |p| p.current_rating).unwrap_or(0.0);
    if full_backs < WEAK_FULL_BACK_RATING {
        areas.push(VulnerableArea::Flanks);
    }

    let centre_backs = [Position::CB];
    let height = mean(in_positions(squad, &centre_backs), |p| p.physical.height_cm).unwrap_or(0.0);
    if height < SHORT_CENTRE_BACK_CM {
        areas.push(VulnerableArea::AerialDuels);
    }

    let pace = mean(in_positions(squad, &centre_backs), |p| p.physical.pace).unwrap_or(0.0);
    if pace < SLOW_CENTRE_BACK_PACE {
        areas.push(VulnerableArea::PaceBehindDefense);
    }

    areas
}

fn weak_positions(squad: &[Player]) -> Vec<Position> {
    SCOUTED_POSITIONS
        .iter()
        .copied()
        .filter(|pos| {
            let listed = [*pos];
            match mean(in_positions(squad, &listed), |p| p.current_rating) {
                None => true,
                Some(avg) => avg < WEAK_POSITION_RATING,
            }
        })
        .collect()
}

fn tactical_flaws(opponent: &Club) -> Vec<TacticalFlaw> {
    let mut flaws = Vec::new();
    let style = &opponent.tactics.play_style;

    if style.defensive_line > HIGH_LINE {
        let pace = mean(in_positions(&opponent.squad.current_players, &[Position::CB]), |p| p.physical.pace)
            .unwrap_or(0.0);
        if pace < SLOW_CENTRE_BACK_PACE {
            flaws.push(TacticalFlaw::HighLineSlowDefenders);
        }
    }

    if style.pressing > HEAVY_PRESSING {
        flaws.push(TacticalFlaw::VulnerableToLongBalls);
    }

    flaws
}

/// Squad average / 10 with a ±1 swing, clamped to 1-10.
fn recent_form(opponent: &Club, rng: &mut dyn RandomSource) -> f32 {
    (opponent.average_rating() / 10.0 + rng.uniform(-1.0, 1.0)).clamp(1.0, 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;
    use crate::test_support::{player, sample_club};

    #[test]
    fn test_threat_and_solidity() {
        let mut club = sample_club("opp", "Opponents");
        for p in club.squad.current_players.iter_mut() {
            p.technical.finishing = 80.0;
            p.physical.pace = 70.0;
            p.technical.marking = 60.0;
            p.technical.tackling = 70.0;
        }
        let analysis = OpponentAnalysis::analyze(&club, &mut ScriptedRandom::constant(0.5));
        assert_eq!(analysis.attacking_threat, 75.0);
        assert_eq!(analysis.defensive_solidity, 65.0);
        assert_eq!(analysis.overall_strength(), 70.0);
    }

    #[test]
    fn test_empty_groups_are_neutral_or_weak() {
        let mut club = sample_club("opp", "Opponents");
        club.squad.current_players = vec![player("lonely", Position::CM)];
        let analysis = OpponentAnalysis::analyze(&club, &mut ScriptedRandom::constant(0.5));

        assert_eq!(analysis.attacking_threat, NEUTRAL_SCORE);
        assert_eq!(analysis.defensive_solidity, NEUTRAL_SCORE);
        assert!(analysis.has_vulnerability(VulnerableArea::Flanks));
        assert!(analysis.has_vulnerability(VulnerableArea::AerialDuels));
        assert!(analysis.has_vulnerability(VulnerableArea::PaceBehindDefense));
        assert!(analysis.weak_positions.contains(&Position::GK));
        assert_eq!(analysis.key_players.len(), 1);
    }

    #[test]
    fn test_set_pieces_and_key_players() {
        let mut club = sample_club("opp", "Opponents");
        for p in club.squad.current_players.iter_mut().take(4) {
            p.physical.height_cm = 190.0;
        }
        club.squad.current_players[7].current_rating = 95.0;

        let analysis = OpponentAnalysis::analyze(&club, &mut ScriptedRandom::constant(0.5));
        assert_eq!(analysis.set_pieces, SetPieceThreat::High);
        assert_eq!(analysis.key_players.len(), KEY_PLAYER_COUNT);
        assert_eq!(analysis.key_players[0].name, club.squad.current_players[7].name);
    }

    #[test]
    fn test_flaws_and_build_up() {
        let mut club = sample_club("opp", "Opponents");
        club.tactics.play_style.defensive_line = 80.0;
        club.tactics.play_style.pressing = 80.0;
        club.tactics.play_style.tempo = 75.0;
        for p in club.squad.current_players.iter_mut().filter(|p| p.plays(Position::CB)) {
            p.physical.pace = 60.0;
        }

        let analysis = OpponentAnalysis::analyze(&club, &mut ScriptedRandom::constant(0.5));
        assert_eq!(
            analysis.tactical_flaws,
            vec![TacticalFlaw::HighLineSlowDefenders, TacticalFlaw::VulnerableToLongBalls]
        );
        assert_eq!(analysis.play_style.build_up, BuildUpStyle::Direct);
    }

    #[test]
    fn test_form_is_clamped() {
        let mut club = sample_club("opp", "Opponents");
        club.squad.average_rating = Some(99.0);
        let high = OpponentAnalysis::analyze(&club, &mut ScriptedRandom::constant(0.99));
        assert_eq!(high.form, 10.0);

        club.squad.average_rating = Some(70.0);
        let mid = OpponentAnalysis::analyze(&club, &mut ScriptedRandom::constant(0.5));
        assert!((mid.form - 7.0).abs() < 1e-4);
    }
}
