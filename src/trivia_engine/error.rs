//! Typed failures for every fallible operation in the engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::trivia_engine::models::{Category, Region};

/// A reference data source is missing or malformed. Fatal at startup.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("record for {country:?} in {path} has no {key:?} field")]
    MissingField {
        path: PathBuf,
        country: String,
        key: &'static str,
    },
}

/// Which sampling step ran out of candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingStage {
    Answer,
    Distractor,
}

impl std::fmt::Display for SamplingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SamplingStage::Answer     => write!(f, "an answer"),
            SamplingStage::Distractor => write!(f, "a wrong choice"),
        }
    }
}

/// No eligible country/item pair remained within the attempt cap.
#[derive(Debug, Clone, Error)]
#[error("could not find {stage} for {category} in {region} after {attempts} attempts")]
pub struct ExhaustedPoolError {
    pub region: Region,
    pub category: Category,
    pub stage: SamplingStage,
    pub attempts: usize,
}

/// The score file could not be read or written.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("score file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("score file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("score file version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Player typed something outside the expected set. Always recovered by re-prompting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputValidationError {
    #[error("Please enter a valid digit.")]
    NotANumber,

    #[error("Please enter a number from {min} to {max}.")]
    OutOfRange { min: usize, max: usize },

    #[error("Invalid input, try again!")]
    NotALetter,

    #[error("Please type a name.")]
    EmptyName,
}

/// An environment override could not be parsed.
#[derive(Debug, Error)]
#[error("invalid value {value:?} for {var}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Everything the binary can fail with.
#[derive(Debug, Error)]
pub enum TriviaError {
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
