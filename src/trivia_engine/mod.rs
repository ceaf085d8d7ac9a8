//! Core trivia engine: reference data, question generation, feedback, and scores.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Shared types: categories, regions, letters, questions |
//! | `data`      | Loads country-json sources into the country and item indices |
//! | `helpers`   | Question wording table and natural-language item lists |
//! | `generator` | Rejection-sampled answer pairs and distractors, `next_question()` |
//! | `feedback`  | Explanations for answered questions |
//! | `round`     | Per-round used-items context and the `Round` driver |
//! | `scores`    | Persistent personal bests and leaderboard |
//! | `error`     | Typed errors |

pub mod data;
pub mod error;
pub mod feedback;
pub mod generator;
pub mod helpers;
pub mod models;
pub mod round;
pub mod scores;

#[cfg(test)]
pub(crate) mod fixtures;

pub use data::{CountryIndex, CountryRecord, ItemIndex, ReferenceData};
pub use error::{DataLoadError, ExhaustedPoolError, PersistenceError, TriviaError};
pub use generator::{next_question, QuestionRequest};
pub use models::{
    AnswerChoice, AnswerPair, Category, Direction, Feedback, Letter, Question, Region,
    TopicSelection,
};
pub use round::{Round, RoundContext, RoundSettings};
pub use scores::{RecordStore, ScoreKey, ScoreReport};
