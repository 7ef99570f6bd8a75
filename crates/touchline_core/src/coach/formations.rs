//! Formation knowledge: slot layouts, matchup table and candidates per approach.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::preparation::Approach;
use crate::models::Position;

pub const FALLBACK_FORMATION: &str = "4-4-2";

#[derive(Debug, Clone, PartialEq)]
pub struct FormationProfile {
    /// 1-10
    pub attacking: u8,
    /// 1-10
    pub defensive: u8,
    pub good_against: &'static [&'static str],
    pub weak_against: &'static [&'static str],
    pub strengths: &'static [&'static str],
}

static FORMATION_KNOWLEDGE: Lazy<HashMap<&'static str, FormationProfile>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(
        "4-3-3",
        FormationProfile {
            attacking: 9,
            defensive: 6,
            good_against: &["4-4-2", "3-5-2"],
            weak_against: &["5-4-1", "4-5-1"],
            strengths: &["wide_play", "high_press", "wing_dominance"],
        },
    );
    table.insert(
        "4-2-3-1",
        FormationProfile {
            attacking: 8,
            defensive: 7,
            good_against: &["4-3-3", "4-5-1"],
            weak_against: &["3-5-2", "4-4-2"],
            strengths: &["central_control", "counter_attack", "flexibility"],
        },
    );
    table.insert(
        "4-4-2",
        FormationProfile {
            attacking: 7,
            defensive: 7,
            good_against: &["4-3-3", "3-4-3"],
            weak_against: &["4-2-3-1", "3-5-2"],
            strengths: &["balance", "compactness", "simplicity"],
        },
    );
    table.insert(
        "4-1-4-1",
        FormationProfile {
            attacking: 7,
            defensive: 8,
            good_against: &["4-2-3-1", "4-3-3"],
            weak_against: &["4-4-2"],
            strengths: &["defensive_stability", "midfield_numbers"],
        },
    );
    table.insert(
        "5-4-1",
        FormationProfile {
            attacking: 5,
            defensive: 9,
            good_against: &["4-3-3", "3-5-2"],
            weak_against: &["4-4-2"],
            strengths: &["defensive_solidity", "wide_coverage"],
        },
    );
    table.insert(
        "4-5-1",
        FormationProfile {
            attacking: 6,
            defensive: 8,
            good_against: &["4-4-2", "4-2-3-1"],
            weak_against: &["3-5-2"],
            strengths: &["midfield_control", "counter", "compactness"],
        },
    );
    table.insert(
        "3-5-2",
        FormationProfile {
            attacking: 8,
            defensive: 7,
            good_against: &["4-4-2", "4-5-1"],
            weak_against: &["4-3-3"],
            strengths: &["wing_backs", "central_overload", "width"],
        },
    );
    table.insert(
        "3-4-3",
        FormationProfile {
            attacking: 9,
            defensive: 5,
            good_against: &["4-4-2", "5-4-1"],
            weak_against: &["4-3-3", "3-5-2"],
            strengths: &["attacking_width", "pressing", "forward_numbers"],
        },
    );
    table
});

pub fn profile(formation: &str) -> Option<&'static FormationProfile> {
    FORMATION_KNOWLEDGE.get(formation)
}

pub fn is_good_against(formation: &str, opponent_formation: &str) -> bool {
    profile(formation).is_some_and(|p| p.good_against.contains(&opponent_formation))
}

/// Slot positions for a formation label; unknown labels get the 4-4-2 layout.
pub fn formation_slots(formation: &str) -> [Position; 11] {
    use Position::*;
    match formation {
        "4-3-3" => [GK, LB, CB, CB, RB, CDM, CM, CM, LW, ST, RW],
        "4-2-3-1" => [GK, LB, CB, CB, RB, CDM, CDM, LW, CAM, RW, ST],
        "4-5-1" => [GK, LB, CB, CB, RB, LM, CDM, CM, CM, RM, ST],
        "4-1-4-1" => [GK, LB, CB, CB, RB, CDM, LM, CM, CM, RM, ST],
        "5-4-1" => [GK, LWB, CB, CB, CB, RWB, CM, CM, CM, CM, ST],
        "3-5-2" => [GK, CB, CB, CB, LWB, CDM, CM, CM, RWB, ST, ST],
        "3-4-3" => [GK, CB, CB, CB, LM, CM, CM, RM, LW, ST, RW],
        _ => [GK, LB, CB, CB, RB, LM, CM, CM, RM, ST, ST],
    }
}

pub fn candidates_for(approach: Approach) -> [&'static str; 3] {
    match approach {
        Approach::Attacking => ["4-3-3", "4-2-3-1", "3-4-3"],
        Approach::Counter => ["4-5-1", "5-4-1", "4-4-2"],
        Approach::Defensive => ["5-4-1", "4-5-1", "4-1-4-1"],
        Approach::Balanced => ["4-2-3-1", "4-4-2", "4-1-4-1"],
    }
}

/// First candidate that is good against the opponent's formation, else the first candidate.
pub fn select_formation(approach: Approach, opponent_formation: &str) -> &'static str {
    let candidates = candidates_for(approach);
    candidates
        .iter()
        .copied()
        .find(|f| is_good_against(f, opponent_formation))
        .unwrap_or(candidates[0])
}
