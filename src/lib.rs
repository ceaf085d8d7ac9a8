//! # geo_trivia
//!
//! A console trivia quiz over world-geography facts: capitals, languages,
//! and national dishes, with best scores kept per player and per
//! (region, topic).
//!
//! ## How it works
//!
//! 1. [`ReferenceData::load`] reads the four country-json files once and builds
//!    a country → facts index and an item → countries index.
//! 2. A [`Round`] asks a fixed number of questions. Each call to
//!    [`Round::next_question`] samples a fresh (country, item) pair from the
//!    chosen region plus three wrong choices that cannot also be right.
//! 3. [`Round::submit`] records the player's letter and composes feedback.
//! 4. [`RecordStore::update`] folds the round's score into the ledger and
//!    returns a [`ScoreReport`] describing how it compares.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use geo_trivia::{Letter, ReferenceData, Region, Round, RoundSettings, TopicSelection};
//!
//! let data = ReferenceData::load("country-json/src".as_ref())?;
//! let settings = RoundSettings {
//!     username: "Ann".into(),
//!     region: Region::Europe,
//!     topic: TopicSelection::Capitals,
//! };
//! let mut round = Round::new(settings, 10, Some(42));
//! while !round.is_complete() {
//!     let question = round.next_question(&data)?;
//!     println!("{}", question.text);
//!     round.submit(question, Letter::A);
//! }
//! println!("score: {}", round.score());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod console;
pub mod trivia_engine;

pub use config::GameConfig;
pub use trivia_engine::{
    next_question, AnswerChoice, AnswerPair, Category, DataLoadError, Direction,
    ExhaustedPoolError, Feedback, Letter, PersistenceError, Question, QuestionRequest,
    RecordStore, ReferenceData, Region, Round, RoundContext, RoundSettings, ScoreKey,
    ScoreReport, TopicSelection, TriviaError,
};
