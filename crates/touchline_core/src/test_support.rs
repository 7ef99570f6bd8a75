//! Shared squad fixtures for unit tests.

use crate::engine::lineup::LineupSlot;
use crate::models::{
    Club, ClubTactics, GoalkeeperAttributes, MentalAttributes, PhysicalAttributes, Player, Position, Squad,
    TechnicalAttributes,
};

const FIXTURE_KEEPER_SKILL: f32 = 70.0;

/// Neutral player: every attribute 50, name equal to id.
pub fn player(id: &str, position: Position) -> Player {
    Player {
        id: id.to_string(),
        name: id.to_string(),
        positions: vec![position],
        current_rating: 65.0,
        technical: TechnicalAttributes::default(),
        mental: MentalAttributes::default(),
        physical: PhysicalAttributes::default(),
        goalkeeper: GoalkeeperAttributes::default(),
        condition: 100.0,
        match_rating: 6.0,
        current_form: 7.0,
        fitness: 100.0,
        injured: false,
        suspended: false,
    }
}

fn keeper(id: &str) -> Player {
    let mut gk = player(id, Position::GK);
    gk.goalkeeper = GoalkeeperAttributes {
        reflexes: FIXTURE_KEEPER_SKILL,
        positioning: FIXTURE_KEEPER_SKILL,
        handling: FIXTURE_KEEPER_SKILL,
    };
    gk
}

/// 4-4-2 eleven of neutral players, ids `{prefix}-{pos}{n}`.
pub fn starting_eleven(prefix: &str) -> Vec<LineupSlot> {
    use Position::*;
    [GK, LB, CB, CB, RB, LM, CM, CM, RM, ST, ST]
        .iter()
        .enumerate()
        .map(|(i, pos)| {
            let id = format!("{prefix}-{}{i}", format!("{pos:?}").to_lowercase());
            LineupSlot::new(*pos, player(&id, *pos))
        })
        .collect()
}

/// Eighteen-man squad: a 4-4-2 starting eleven first, then seven reserves
/// (including a second keeper `{club_id}_gk2`).
pub fn sample_club(club_id: &str, name: &str) -> Club {
    use Position::*;
    let outfield = [LB, CB, CB, RB, LM, CM, CM, RM, ST, ST, CB, LB, CM, CAM, LW, ST];

    let mut players = vec![keeper(&format!("{club_id}_gk"))];
    for (i, pos) in outfield.iter().enumerate() {
        players.push(player(&format!("{club_id}_{}{i}", format!("{pos:?}").to_lowercase()), *pos));
        if i == 9 {
            players.push(keeper(&format!("{club_id}_gk2")));
        }
    }

    Club {
        club_id: club_id.to_string(),
        name: name.to_string(),
        league: None,
        stadium: None,
        squad: Squad { current_players: players, average_rating: None },
        tactics: ClubTactics::default(),
    }
}
