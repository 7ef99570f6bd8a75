use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::coach::preparation::{CoachAi, MatchContext};
use crate::config::SimConfig;
use crate::engine::match_sim::{MatchEngine, MatchSide};
use crate::error::Result;
use crate::models::{Club, MatchResult};
use crate::rng::SeededRandom;

/// One fixture as the host application sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub seed: u64,
    pub home: Club,
    pub away: Club,
    /// Fixture context from the home side's point of view
    #[serde(default)]
    pub context: Option<MatchContext>,
    /// Overrides `TOUCHLINE_CONFIG_PATH` and the built-in defaults
    #[serde(default)]
    pub config: Option<SimConfig>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Coach preparation for both sides, then a full seeded match.
pub fn simulate_match(request: &MatchRequest) -> Result<MatchResult> {
    let config = match &request.config {
        Some(config) => config.clone(),
        None => SimConfig::from_env()?.unwrap_or_default(),
    };
    config.validate()?;

    let home_context = MatchContext { is_home: true, ..request.context.clone().unwrap_or_default() };
    let away_context = MatchContext { is_home: false, ..home_context.clone() };

    // Preparation draws come from their own stream so the match stream
    // depends on the seed alone.
    let mut prep_rng = SeededRandom::new(request.seed);
    let home_prep = CoachAi::new(request.home.clone()).prepare_for_match(&request.away, &home_context, &mut prep_rng)?;
    let away_prep = CoachAi::new(request.away.clone()).prepare_for_match(&request.home, &away_context, &mut prep_rng)?;

    let home = MatchSide::prepared(&request.home, &home_prep, &config)?;
    let away = MatchSide::prepared(&request.away, &away_prep, &config)?;

    let mut engine = MatchEngine::seeded(home, away, config, request.seed)?;
    if let Some(date) = request.date {
        engine = engine.with_date(date);
    }
    Ok(engine.into_result())
}

pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    let result = simulate_match(&request)?;
    Ok(serde_json::to_string(&result)?)
}
