//! # Simulation Configuration
//!
//! Every tunable constant of the match clock, the substitution engine and the
//! in-match AI lives here. Defaults reproduce the stock behaviour; a JSON or
//! YAML file (optionally named by `TOUCHLINE_CONFIG_PATH`) can override any
//! subset of fields.
//!
//! ```rust,ignore
//! let config = SimConfig::load("tuning/fast_tempo.yaml")?;
//! let engine = MatchEngine::seeded(home, away, config, 42)?;
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::error::{MatchError, Result};

pub const CONFIG_PATH_ENV: &str = "TOUCHLINE_CONFIG_PATH";

// ========== SimConfig ==========

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SimConfig {
    pub clock: ClockConfig,
    pub substitutions: SubstitutionConfig,
    pub in_match_ai: InMatchAiConfig,
}

/// Match clock probabilities and timings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    /// Attack chance per minute before the tempo multiplier
    pub base_attack_chance: f32,
    /// Upper bound of the midfield commentary band
    pub midfield_play_threshold: f32,
    /// Upper bound of the foul band
    pub foul_threshold: f32,
    /// P(yellow | foul)
    pub yellow_card_chance: f32,
    pub condition_drain_per_minute: f32,
    /// P(counter-attack | interception)
    pub counter_attack_chance: f32,
    /// Counter links allowed in one chain
    pub max_counter_depth: u8,
    /// P(cross | wide creator completes a pass)
    pub cross_chance: f32,
    pub injury_time_min: u16,
    pub injury_time_max: u16,
    pub stats_interval: u16,
    pub half_time_minute: u16,
    pub regulation_minutes: u16,
    pub initial_match_rating: f32,
    /// Open play pressure is drawn from [0, this)
    pub open_play_max_pressure: f32,
    pub counter_pressure: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            base_attack_chance: 0.30,
            midfield_play_threshold: 0.60,
            foul_threshold: 0.62,
            yellow_card_chance: 0.2,
            condition_drain_per_minute: 0.6,
            counter_attack_chance: 0.2,
            max_counter_depth: 2,
            cross_chance: 0.5,
            injury_time_min: 2,
            injury_time_max: 5,
            stats_interval: 10,
            half_time_minute: 45,
            regulation_minutes: 90,
            initial_match_rating: 6.0,
            open_play_max_pressure: 60.0,
            counter_pressure: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SubstitutionConfig {
    pub max_subs: u8,
    pub earliest_minute: u16,
    /// Minutes required between two substitutions of the same side
    pub min_gap: u16,
    /// Condition below which a player counts as exhausted
    pub exhausted_condition: f32,
    pub poor_rating: f32,
    /// Rating-based substitutions only after this minute
    pub rating_check_after: u16,
    pub incoming_match_rating: f32,
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self {
            max_subs: 5,
            earliest_minute: 50,
            min_gap: 5,
            exhausted_condition: 55.0,
            poor_rating: 6.0,
            rating_check_after: 70,
            incoming_match_rating: 6.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InMatchAiConfig {
    /// Minutes between two touchline messages
    pub normal_interval: u16,
    pub crunch_interval: u16,
    pub crunch_time_minute: u16,
    /// From this minute only the late-game rules apply and the random gate is off
    pub late_game_minute: u16,
    /// Before the late game, an evaluation needs a draw above this value
    pub evaluation_gate: f32,
    pub wasteful_xg: f32,
    /// Possession share (percent) below which the side is under pressure
    pub low_possession: f32,
    pub high_possession: f32,
    pub counter_switch_chance: f32,
    pub comfortable_lead: i32,
}

impl Default for InMatchAiConfig {
    fn default() -> Self {
        Self {
            normal_interval: 8,
            crunch_interval: 3,
            crunch_time_minute: 85,
            late_game_minute: 80,
            evaluation_gate: 0.7,
            wasteful_xg: 1.2,
            low_possession: 35.0,
            high_possession: 65.0,
            counter_switch_chance: 0.5,
            comfortable_lead: 2,
        }
    }
}

impl SimConfig {
    /// Parse from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SimConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.yaml`/`.yml` parse as YAML, anything else as JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Config named by `TOUCHLINE_CONFIG_PATH`, or `None` when the variable is unset/blank.
    pub fn from_env() -> Result<Option<Self>> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(None);
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(None);
        }

        let config = Self::load(path).map_err(|e| {
            MatchError::Config(format!("Failed to load config from {CONFIG_PATH_ENV}='{path}': {e}"))
        })?;
        log::info!("Loaded simulation config from {path}");
        Ok(Some(config))
    }

    /// Validate configuration bounds
    pub fn validate(&self) -> Result<()> {
        let clock = &self.clock;
        check_probability("clock.base_attack_chance", clock.base_attack_chance)?;
        check_probability("clock.midfield_play_threshold", clock.midfield_play_threshold)?;
        check_probability("clock.foul_threshold", clock.foul_threshold)?;
        check_probability("clock.yellow_card_chance", clock.yellow_card_chance)?;
        check_probability("clock.counter_attack_chance", clock.counter_attack_chance)?;
        check_probability("clock.cross_chance", clock.cross_chance)?;

        if clock.foul_threshold < clock.midfield_play_threshold {
            return Err(MatchError::Config(format!(
                "clock.foul_threshold ({}) must not be below clock.midfield_play_threshold ({})",
                clock.foul_threshold, clock.midfield_play_threshold
            )));
        }
        if clock.condition_drain_per_minute < 0.0 || clock.condition_drain_per_minute > 5.0 {
            return Err(MatchError::Config(format!(
                "clock.condition_drain_per_minute must be 0.0-5.0, got {}",
                clock.condition_drain_per_minute
            )));
        }
        if clock.injury_time_min > clock.injury_time_max {
            return Err(MatchError::Config(format!(
                "clock.injury_time_min ({}) exceeds clock.injury_time_max ({})",
                clock.injury_time_min, clock.injury_time_max
            )));
        }
        if clock.half_time_minute == 0 || clock.half_time_minute >= clock.regulation_minutes {
            return Err(MatchError::Config(format!(
                "clock.half_time_minute must be 1-{}, got {}",
                clock.regulation_minutes.saturating_sub(1),
                clock.half_time_minute
            )));
        }
        if clock.stats_interval == 0 {
            return Err(MatchError::Config("clock.stats_interval must be positive".to_string()));
        }
        check_rating("clock.initial_match_rating", clock.initial_match_rating)?;
        if clock.open_play_max_pressure < 0.0 || clock.counter_pressure < 0.0 {
            return Err(MatchError::Config("pressure values must be non-negative".to_string()));
        }

        let subs = &self.substitutions;
        if subs.max_subs > 11 {
            return Err(MatchError::Config(format!("substitutions.max_subs must be 0-11, got {}", subs.max_subs)));
        }
        if subs.exhausted_condition < 0.0 || subs.exhausted_condition > 100.0 {
            return Err(MatchError::Config(format!(
                "substitutions.exhausted_condition must be 0-100, got {}",
                subs.exhausted_condition
            )));
        }
        check_rating("substitutions.poor_rating", subs.poor_rating)?;
        check_rating("substitutions.incoming_match_rating", subs.incoming_match_rating)?;

        let ai = &self.in_match_ai;
        check_probability("in_match_ai.evaluation_gate", ai.evaluation_gate)?;
        check_probability("in_match_ai.counter_switch_chance", ai.counter_switch_chance)?;
        if ai.low_possession > ai.high_possession {
            return Err(MatchError::Config(format!(
                "in_match_ai.low_possession ({}) exceeds in_match_ai.high_possession ({})",
                ai.low_possession, ai.high_possession
            )));
        }
        if ai.crunch_interval > ai.normal_interval {
            return Err(MatchError::Config(format!(
                "in_match_ai.crunch_interval ({}) exceeds in_match_ai.normal_interval ({})",
                ai.crunch_interval, ai.normal_interval
            )));
        }

        Ok(())
    }
}

fn check_probability(name: &str, value: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(MatchError::Config(format!("{name} must be 0.0-1.0, got {value}")));
    }
    Ok(())
}

fn check_rating(name: &str, value: f32) -> Result<()> {
    if !(1.0..=10.0).contains(&value) {
        return Err(MatchError::Config(format!("{name} must be 1.0-10.0, got {value}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.clock.base_attack_chance, 0.30);
        assert_eq!(config.substitutions.max_subs, 5);
        assert_eq!(config.in_match_ai.normal_interval, 8);
    }

    #[test]
    fn test_partial_json_with_defaults() {
        let config = SimConfig::from_json(r#"{ "clock": { "base_attack_chance": 0.4 } }"#).unwrap();
        assert_eq!(config.clock.base_attack_chance, 0.4);
        assert_eq!(config.clock.foul_threshold, 0.62);
        assert_eq!(config.substitutions, SubstitutionConfig::default());
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = "substitutions:\n  max_subs: 3\nin_match_ai:\n  crunch_interval: 2\n";
        let config = SimConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.substitutions.max_subs, 3);
        assert_eq!(config.in_match_ai.crunch_interval, 2);
    }

    #[test]
    fn test_validation_bounds() {
        let mut config = SimConfig::default();
        config.clock.yellow_card_chance = 1.5;
        assert!(matches!(config.validate(), Err(MatchError::Config(_))));

        let mut config = SimConfig::default();
        config.clock.injury_time_min = 6;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.substitutions.incoming_match_rating = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.in_match_ai.low_possession = 80.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = SimConfig::from_json(r#"{ "clock": { "foul_threshold": 0.1 } }"#).unwrap_err();
        assert!(err.to_string().contains("foul_threshold"));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("tuning.yml");
        let mut file = fs::File::create(&yaml_path).unwrap();
        writeln!(file, "clock:\n  stats_interval: 15").unwrap();
        assert_eq!(SimConfig::load(&yaml_path).unwrap().clock.stats_interval, 15);

        let json_path = dir.path().join("tuning.json");
        fs::write(&json_path, r#"{"clock":{"stats_interval":5}}"#).unwrap();
        assert_eq!(SimConfig::load(&json_path).unwrap().clock.stats_interval, 5);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SimConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, MatchError::Io(_)));
    }
}
