//! Operator settings: where the data and score file live, and round shape.
//!
//! Defaults need no setup. A `.env` file or the process environment can
//! override them:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `GEO_TRIVIA_DATA_DIR` | `country-json/src` |
//! | `GEO_TRIVIA_SCORES` | `scores.json` |
//! | `GEO_TRIVIA_QUESTIONS` | `10` |
//! | `GEO_TRIVIA_HOLD_FEEDBACK` | `true` |
//! | `GEO_TRIVIA_SEED` | unset (entropy) |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use log::debug;

use crate::trivia_engine::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub data_dir: PathBuf,
    pub scores_path: PathBuf,
    /// Questions per round.
    pub question_limit: usize,
    /// Hold detailed feedback until the end of the round.
    pub hold_feedback: bool,
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            data_dir: PathBuf::from("country-json/src"),
            scores_path: PathBuf::from("scores.json"),
            question_limit: 10,
            hold_feedback: true,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Defaults, then `.env`, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("loaded {}", path.display());
        }
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = GameConfig::default();
        if let Some(dir) = lookup("GEO_TRIVIA_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("GEO_TRIVIA_SCORES") {
            config.scores_path = PathBuf::from(path);
        }
        if let Some(n) = parse_var::<_, usize>(&lookup, "GEO_TRIVIA_QUESTIONS")? {
            if n == 0 {
                return Err(ConfigError { var: "GEO_TRIVIA_QUESTIONS", value: n.to_string() });
            }
            config.question_limit = n;
        }
        if let Some(hold) = parse_var::<_, bool>(&lookup, "GEO_TRIVIA_HOLD_FEEDBACK")? {
            config.hold_feedback = hold;
        }
        config.rng_seed = parse_var(&lookup, "GEO_TRIVIA_SEED")?;
        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError { var, value }),
    }
}
