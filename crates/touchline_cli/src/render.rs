//! Plain-text rendering of match events and coach output.

use touchline_core::coach::preparation::Preparation;
use touchline_core::engine::tactical_state::TacticChangeRecord;
use touchline_core::models::{
    CoachMessage, EventPayload, EventType, MatchEvent, MatchResult, MidfieldFlavor, ShotKind, SidePair,
    SubstitutionReason, TeamSide, TeamStats,
};

pub fn coach_line(message: CoachMessage) -> &'static str {
    match message {
        CoachMessage::WinningTight => "Hold on to this, stay compact!",
        CoachMessage::LosingTight => "One goal, we need one goal. Everybody forward!",
        CoachMessage::LosingBadly => "Keep your heads up, play for pride.",
        CoachMessage::Wasteful => "Calm down in front of goal, pick your spot!",
        CoachMessage::UnderPressure => "Press them, win it back higher up!",
        CoachMessage::NeedTheBall => "Get on the ball, we need possession!",
        CoachMessage::DrawingBoring => "Take a risk, go for the win!",
        CoachMessage::WinningComfortable => "Keep the ball, let them chase.",
    }
}

fn shot_line(kind: ShotKind, shooter: &str) -> String {
    match kind {
        ShotKind::Open => format!("{shooter} gets in behind and shoots"),
        ShotKind::Counter => format!("{shooter} finishes off the break"),
        ShotKind::Dribble => format!("{shooter} goes past the defender and strikes"),
        ShotKind::LongShot => format!("{shooter} tries a shot from distance"),
        ShotKind::Header => format!("{shooter} rises for the header"),
    }
}

/// One commentary line, or `None` for events that have no text (stats snapshots).
pub fn render_event(event: &MatchEvent, clubs: &SidePair<String>) -> Option<String> {
    let club = event.side.map(|side| clubs[side].as_str()).unwrap_or("");
    let minute = event.minute;

    let body = match &event.payload {
        EventPayload::KickOff { stadium, tactics, injury_time } => format!(
            "Kick-off at {stadium}! {} ({}) vs {} ({}). {injury_time}' added at the end.",
            clubs.home, tactics.home, clubs.away, tactics.away
        ),
        EventPayload::Whistle => match event.event_type {
            EventType::HalfTime => "Half-time.".to_string(),
            _ => "Full-time!".to_string(),
        },
        EventPayload::Pass { passer, counter_attack: true } => format!("{club} break! {passer} plays it forward"),
        EventPayload::Pass { passer, .. } => format!("{passer} threads a pass for {club}"),
        EventPayload::Cross { crosser, target } => format!("{crosser} whips in a cross looking for {target}"),
        EventPayload::Dribble { dribbler, defender } => format!("{dribbler} skips past {defender}"),
        EventPayload::Tackle { defender, attacker } => format!("{defender} wins it cleanly from {attacker}"),
        EventPayload::Clearance { defender, crosser } => format!("{defender} heads {crosser}'s cross clear"),
        EventPayload::Intercept { defender, passer } => format!("{defender} cuts out {passer}'s pass"),
        EventPayload::Shot { shooter, keeper, shot, .. } => {
            let attempt = shot_line(*shot, shooter);
            match event.event_type {
                EventType::Goal => {
                    let score = event.score.map(|s| format!(" {}-{}", s.home, s.away)).unwrap_or_default();
                    format!("{attempt}... GOAL for {club}!{score}")
                }
                EventType::Save => format!("{attempt}, but {keeper} saves"),
                _ => format!("{attempt}, wide of the post"),
            }
        }
        EventPayload::Foul { player } => format!("Foul by {player}"),
        EventPayload::Card { player } => format!("Yellow card for {player}"),
        EventPayload::MidfieldPlay { player, flavor } => match flavor {
            MidfieldFlavor::ReadsTheGame => format!("{player} reads the game well in midfield"),
            MidfieldFlavor::SafeBackPass => format!("{player} plays it safe, back to the defence"),
            MidfieldFlavor::ContestsPossession => format!("{player} fights for possession in the middle"),
        },
        EventPayload::CoachMessage { message } => format!("{club} coach: \"{}\"", coach_line(*message)),
        EventPayload::TacticChange { from, to, message } => {
            let shout = message.map(|m| format!(" \"{}\"", coach_line(m))).unwrap_or_default();
            format!("{club} switch from {from} to {to}.{shout}")
        }
        EventPayload::Substitution { player_in, player_out, reason } => {
            let why = match reason {
                SubstitutionReason::Exhausted { condition } => format!("exhausted, {condition:.0}% condition"),
                SubstitutionReason::Tactical { rating } => format!("tactical, rated {rating:.1}"),
            };
            format!("{club} substitution: {player_in} on, {player_out} off ({why})")
        }
        EventPayload::Stats { .. } => return None,
    };

    Some(format!("{minute:>3}' {body}"))
}

fn stats_row(label: &str, home: String, away: String) -> String {
    format!("   {home:>8}  {label:^16}  {away:<8}")
}

pub fn render_stats(stats: &SidePair<TeamStats>) -> Vec<String> {
    let possession = |side: TeamSide| {
        let total = stats.home.possession + stats.away.possession;
        if total == 0 {
            50
        } else {
            stats[side].possession * 100 / total
        }
    };
    vec![
        stats_row("Possession", format!("{}%", possession(TeamSide::Home)), format!("{}%", possession(TeamSide::Away))),
        stats_row("Shots", stats.home.shots.to_string(), stats.away.shots.to_string()),
        stats_row("On target", stats.home.shots_on_target.to_string(), stats.away.shots_on_target.to_string()),
        stats_row("xG", format!("{:.2}", stats.home.xg), format!("{:.2}", stats.away.xg)),
        stats_row("Corners", stats.home.corners.to_string(), stats.away.corners.to_string()),
        stats_row("Fouls", stats.home.fouls.to_string(), stats.away.fouls.to_string()),
        stats_row("Yellow cards", stats.home.yellow_cards.to_string(), stats.away.yellow_cards.to_string()),
    ]
}

pub fn render_summary(result: &MatchResult) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} - {} {}",
        result.home.club, result.home.score, result.away.score, result.away.club
    )];
    if let Some(date) = result.date {
        lines.push(format!("   {}", date.format("%d %b %Y")));
    }
    lines.extend(render_stats(&SidePair::new(result.home.stats, result.away.stats)));
    if let Some(motm) = &result.man_of_the_match {
        let rating = result.player_ratings.get(motm).map(|r| r.rating).unwrap_or_default();
        lines.push(format!("Man of the match: {motm} ({rating:.1})"));
    }
    lines
}

/// Touchline log of tactic switches, in match order.
pub fn render_tactic_changes(history: &[TacticChangeRecord], clubs: &SidePair<String>) -> Vec<String> {
    if history.is_empty() {
        return vec!["No tactical changes.".to_string()];
    }
    let mut lines = vec!["Tactical changes:".to_string()];
    for change in history {
        lines.push(format!("   {:>3}' {}: {} -> {}", change.minute, clubs[change.side], change.from, change.to));
    }
    lines
}

pub fn render_preparation(club: &str, prep: &Preparation) -> Vec<String> {
    let mut lines = vec![
        format!("{club}: {} ({:?}), kickoff tactic {}", prep.formation, prep.strategy.approach, prep.initial_tactic),
        format!("   Importance: {:?}", prep.importance),
    ];
    for slot in &prep.lineup {
        lines.push(format!("   {:<4} {}", format!("{:?}", slot.position), slot.player.name));
    }
    if !prep.bench.is_empty() {
        let bench: Vec<&str> = prep.bench.iter().map(|p| p.name.as_str()).collect();
        lines.push(format!("   Bench: {}", bench.join(", ")));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use touchline_core::models::Tactic;

    fn clubs() -> SidePair<String> {
        SidePair::new("Home FC".to_string(), "Away United".to_string())
    }

    #[test]
    fn test_goal_line_carries_score() {
        let event = MatchEvent::new(
            23,
            EventType::Goal,
            Some(TeamSide::Away),
            EventPayload::Shot {
                shooter: "Striker".into(),
                keeper: "Keeper".into(),
                shot: ShotKind::Header,
                shot_quality: 80.0,
                save_quality: 60.0,
                xg: 0.2,
            },
        )
        .with_score(SidePair::new(0, 1));

        let line = render_event(&event, &clubs()).unwrap();
        assert_eq!(line, " 23' Striker rises for the header... GOAL for Away United! 0-1");
    }

    #[test]
    fn test_stats_snapshot_is_silent() {
        let event = MatchEvent::new(
            10,
            EventType::StatsUpdate,
            None,
            EventPayload::Stats { stats: SidePair::new(TeamStats::default(), TeamStats::default()) },
        );
        assert!(render_event(&event, &clubs()).is_none());
    }

    #[test]
    fn test_tactic_change_line() {
        let event = MatchEvent::new(
            86,
            EventType::Commentary,
            Some(TeamSide::Home),
            EventPayload::TacticChange {
                from: Tactic::Balanced,
                to: Tactic::AllOutAttack,
                message: Some(CoachMessage::LosingTight),
            },
        );
        let line = render_event(&event, &clubs()).unwrap();
        assert!(line.starts_with(" 86' Home FC switch from"));
        assert!(line.contains("Everybody forward"));
    }

    #[test]
    fn test_tactic_change_log() {
        assert_eq!(render_tactic_changes(&[], &clubs()), vec!["No tactical changes."]);

        let history = [TacticChangeRecord {
            minute: 81,
            side: TeamSide::Away,
            from: Tactic::Balanced,
            to: Tactic::AllOutAttack,
        }];
        let lines = render_tactic_changes(&history, &clubs());
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("    81' Away United: "));
        assert!(lines[1].contains(" -> "));
    }

    #[test]
    fn test_empty_stats_split_possession_evenly() {
        let rows = render_stats(&SidePair::new(TeamStats::default(), TeamStats::default()));
        assert!(rows[0].contains("50%"));
    }
}
