use serde::{Deserialize, Serialize};

use super::player::Player;

/// Club record handed over by the data layer. Read-only for the simulation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Club {
    #[serde(alias = "clubId")]
    pub club_id: String,
    pub name: String,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub stadium: Option<String>,
    pub squad: Squad,
    #[serde(default)]
    pub tactics: ClubTactics,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Squad {
    #[serde(alias = "currentPlayers")]
    pub current_players: Vec<Player>,
    /// Falls back to the mean of `current_rating` when absent
    #[serde(default, alias = "averageRating")]
    pub average_rating: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClubTactics {
    #[serde(alias = "defaultFormation")]
    pub default_formation: String,
    pub mentality: String,
    #[serde(alias = "playStyle")]
    pub play_style: PlayStyle,
}

impl Default for ClubTactics {
    fn default() -> Self {
        Self {
            default_formation: "4-4-2".to_string(),
            mentality: "balanced".to_string(),
            play_style: PlayStyle::default(),
        }
    }
}

/// 0-100 sliders
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayStyle {
    pub possession: f32,
    pub pressing: f32,
    pub width: f32,
    pub tempo: f32,
    #[serde(alias = "defensiveLine")]
    pub defensive_line: f32,
}

impl Default for PlayStyle {
    fn default() -> Self {
        Self { possession: 50.0, pressing: 50.0, width: 50.0, tempo: 50.0, defensive_line: 50.0 }
    }
}

impl Club {
    pub fn stadium_name(&self) -> String {
        self.stadium.clone().unwrap_or_else(|| format!("{} Stadium", self.name))
    }

    /// Declared squad average, or the mean `current_rating` of the squad (0 when empty).
    pub fn average_rating(&self) -> f32 {
        if let Some(avg) = self.squad.average_rating {
            return avg;
        }
        let players = &self.squad.current_players;
        if players.is_empty() {
            return 0.0;
        }
        players.iter().map(|p| p.current_rating).sum::<f32>() / players.len() as f32
    }

    pub fn available_players(&self) -> impl Iterator<Item = &Player> {
        self.squad.current_players.iter().filter(|p| p.is_available())
    }
}
