//! Round state: the used-items context threaded through the generator, and
//! the [`Round`] driver that owns it together with the RNG and the tally.

use std::collections::BTreeSet;

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::trivia_engine::{
    data::ReferenceData,
    error::ExhaustedPoolError,
    feedback,
    generator::{next_question, QuestionRequest},
    models::{AnswerPair, Letter, Question, Region, TopicSelection},
    scores::ScoreKey,
};

/// Known-bad data values that must never be asked about.
pub const DENYLISTED_COUNTRIES: &[&str] = &["Luxembourg"];
pub const DENYLISTED_ITEMS: &[&str] = &["", " ", "English", "its Thai name)", "S"];

/// Countries and items already presented this round.
///
/// Both sets only grow. A fresh context is seeded with the denylists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundContext {
    used_countries: BTreeSet<String>,
    used_items: BTreeSet<String>,
}

impl Default for RoundContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundContext {
    pub fn new() -> Self {
        RoundContext {
            used_countries: DENYLISTED_COUNTRIES.iter().map(|s| s.to_string()).collect(),
            used_items: DENYLISTED_ITEMS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn is_country_used(&self, country: &str) -> bool {
        self.used_countries.contains(country)
    }

    pub fn is_item_used(&self, item: &str) -> bool {
        self.used_items.contains(item)
    }

    pub fn used_countries(&self) -> &BTreeSet<String> {
        &self.used_countries
    }

    pub fn used_items(&self) -> &BTreeSet<String> {
        &self.used_items
    }

    pub fn record(&mut self, pair: &AnswerPair) {
        self.used_countries.insert(pair.country.clone());
        self.used_items.insert(pair.item.clone());
    }
}

/// Who is playing what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSettings {
    pub username: String,
    pub region: Region,
    pub topic: TopicSelection,
}

impl RoundSettings {
    pub fn score_key(&self) -> ScoreKey {
        ScoreKey::new(self.region, self.topic)
    }
}

/// One round of `question_limit` questions.
pub struct Round {
    settings: RoundSettings,
    question_limit: usize,
    context: RoundContext,
    questions: Vec<Question>,
    rng: StdRng,
}

impl Round {
    /// `rng_seed: Some(_)` makes the whole round reproducible.
    pub fn new(settings: RoundSettings, question_limit: usize, rng_seed: Option<u64>) -> Self {
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        info!(
            "round started: {} playing {} / {}",
            settings.username, settings.region, settings.topic
        );
        Round {
            settings,
            question_limit,
            context: RoundContext::new(),
            questions: Vec::with_capacity(question_limit),
            rng,
        }
    }

    pub fn settings(&self) -> &RoundSettings {
        &self.settings
    }

    pub fn context(&self) -> &RoundContext {
        &self.context
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_limit(&self) -> usize {
        self.question_limit
    }

    pub fn is_complete(&self) -> bool {
        self.questions.len() >= self.question_limit
    }

    pub fn score(&self) -> u32 {
        self.questions
            .iter()
            .filter(|q| q.answered_correctly() == Some(true))
            .count() as u32
    }

    /// Generate the next question. Its answer pair is recorded in the round
    /// context as soon as the question is complete.
    pub fn next_question(&mut self, data: &ReferenceData) -> Result<Question, ExhaustedPoolError> {
        let request = QuestionRequest {
            category: self.settings.topic.pick_category(&mut self.rng),
            region: self.settings.region,
            number: self.questions.len() + 1,
        };
        next_question(&mut self.rng, data, request, &mut self.context)
    }

    /// Record the player's letter, compose feedback, and keep the question.
    pub fn submit(&mut self, mut question: Question, choice: Letter) -> &Question {
        question.user_choice = Some(choice);
        question.feedback = feedback::compose(&question);
        debug!(
            "question {} answered {choice} (correct: {:?})",
            question.number,
            question.answered_correctly()
        );
        self.questions.push(question);
        if self.is_complete() {
            info!(
                "round finished: {} scored {}/{}",
                self.settings.username,
                self.score(),
                self.question_limit
            );
        }
        &self.questions[self.questions.len() - 1]
    }
}
