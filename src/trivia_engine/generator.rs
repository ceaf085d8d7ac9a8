use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::trivia_engine::{
    data::ReferenceData,
    error::{ExhaustedPoolError, SamplingStage},
    helpers::{choice, question_text},
    models::{AnswerPair, Category, Direction, Letter, Question, Region},
    round::RoundContext,
};

/// Upper bound on draws per sampled pair before giving up.
pub const MAX_ATTEMPTS: usize = 10_000;

/// What to ask about next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionRequest {
    pub category: Category,
    pub region: Region,
    /// 1-based position in the round.
    pub number: usize,
}

/// Rejection-sample one (country, item) pair from the region.
///
/// A draw is rejected when the country or item was already used this round,
/// when the country has no data for the category, or when `accept` says no.
/// `accept` receives the country, its full item list, and the drawn item.
fn sample_pair<R, F>(
    rng: &mut R,
    data: &ReferenceData,
    request: &QuestionRequest,
    context: &RoundContext,
    stage: SamplingStage,
    accept: F,
) -> Result<AnswerPair, ExhaustedPoolError>
where
    R: Rng + ?Sized,
    F: Fn(&str, &[String], &str) -> bool,
{
    let members = data.countries.members(request.region);
    let mut attempts = 0;
    while attempts < MAX_ATTEMPTS && !members.is_empty() {
        attempts += 1;
        let Some(country) = members.choose(rng) else { break };
        if context.is_country_used(country) {
            continue;
        }
        let Some(items) = data.countries.items(country, request.category) else {
            continue;
        };
        let Some(item) = items.choose(rng) else { continue };
        if context.is_item_used(item) || !accept(country.as_str(), items, item.as_str()) {
            continue;
        }
        debug!(
            "question {}: {stage} {country} / {item} after {attempts} draws",
            request.number
        );
        return Ok(AnswerPair {
            country: country.clone(),
            item: item.clone(),
        });
    }
    Err(ExhaustedPoolError {
        region: request.region,
        category: request.category,
        stage,
        attempts,
    })
}

/// Build the next question and record its answer pair in `context`.
///
/// The three distractors come from distinct countries other than the answer's,
/// carry distinct items, and share no item with the answer's country for this
/// category, so exactly one choice is ever true. `context` is only touched
/// once the whole question has been built.
pub fn next_question<R: Rng + ?Sized>(
    rng: &mut R,
    data: &ReferenceData,
    request: QuestionRequest,
    context: &mut RoundContext,
) -> Result<Question, ExhaustedPoolError> {
    let direction = Direction::random(rng);
    let answer = sample_pair(rng, data, &request, context, SamplingStage::Answer, |_, _, _| true)?;
    let correct_items: Vec<String> = data
        .countries
        .items(&answer.country, request.category)
        .map(<[String]>::to_vec)
        .unwrap_or_default();
    let item_countries = data
        .items
        .countries_with(request.category, &answer.item)
        .to_vec();

    let correct_letter = Letter::ALL[rng.gen_range(0..Letter::ALL.len())];
    let mut distractors: Vec<AnswerPair> = Vec::with_capacity(Letter::ALL.len() - 1);
    let mut choices = Vec::with_capacity(Letter::ALL.len());

    for letter in Letter::ALL {
        if letter == correct_letter {
            choices.push(choice(letter, answer.clone(), correct_letter));
            continue;
        }
        let pair = sample_pair(
            rng,
            data,
            &request,
            context,
            SamplingStage::Distractor,
            |country, items, item| {
                country != answer.country
                    && !distractors.iter().any(|d| d.country == country || d.item == item)
                    && !items.iter().any(|i| correct_items.contains(i))
            },
        )?;
        distractors.push(pair.clone());
        choices.push(choice(letter, pair, correct_letter));
    }

    context.record(&answer);

    Ok(Question {
        number: request.number,
        category: request.category,
        direction,
        text: question_text(request.category, direction, &answer),
        answer,
        correct_items,
        item_countries,
        choices,
        user_choice: None,
        feedback: None,
    })
}
