//! Shared text builders used by the generator and the feedback composer.
//!
//! Question wording lives in one exhaustive table keyed by
//! (category, direction), so adding a category without wording fails to
//! compile instead of producing an empty prompt.

use crate::trivia_engine::models::{AnswerChoice, AnswerPair, Category, Direction, Letter};

/// Join items as natural English: "A", "A and B", "A, B, and C".
pub fn format_item_list<S: AsRef<str>>(items: &[S]) -> String {
    let items: Vec<&str> = items.iter().map(|s| s.as_ref().trim()).collect();
    match items.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
    }
}

/// Prompt text for one question.
pub fn question_text(category: Category, direction: Direction, pair: &AnswerPair) -> String {
    let country = pair.country.trim();
    let item = pair.item.trim();
    match (category, direction) {
        (Category::Capital, Direction::CountryIsSubject) =>
            format!("What is the capital of {country}?"),
        (Category::Capital, Direction::ItemIsSubject) =>
            format!("{item} is the capital of which country?"),
        (Category::Languages, Direction::CountryIsSubject) =>
            format!("Which language is more commonly spoken in {country}?"),
        (Category::Languages, Direction::ItemIsSubject) =>
            format!("{item} is a language most commonly spoken in which country?"),
        (Category::Dishes, Direction::CountryIsSubject) =>
            format!("Which food is considered a typical dish in {country}?"),
        (Category::Dishes, Direction::ItemIsSubject) =>
            format!("{item} is a dish most typical of which country?"),
    }
}

/// Build one answer choice.
///
/// `is_correct` is set by comparing `letter == correct`.
pub fn choice(letter: Letter, pair: AnswerPair, correct: Letter) -> AnswerChoice {
    AnswerChoice {
        letter,
        pair,
        is_correct: letter == correct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_lists_read_as_english() {
        assert_eq!(format_item_list(&["Paris"]), "Paris");
        assert_eq!(format_item_list(&["English", "French"]), "English and French");
        assert_eq!(format_item_list(&["A", "B", "C"]), "A, B, and C");
        assert_eq!(format_item_list(&["A", "B", "C", "D"]), "A, B, C, and D");
    }

    #[test]
    fn item_lists_trim_whitespace() {
        assert_eq!(format_item_list(&[" Paella "]), "Paella");
        assert_eq!(format_item_list(&["Bigos ", " Pierogi"]), "Bigos and Pierogi");
    }

    #[test]
    fn empty_item_list_is_empty_string() {
        let empty: [&str; 0] = [];
        assert_eq!(format_item_list(&empty), "");
    }

    #[test]
    fn every_category_direction_pair_has_distinct_wording() {
        let pair = AnswerPair { country: "France".into(), item: "Paris".into() };
        let mut seen = std::collections::HashSet::new();
        for category in Category::ALL {
            for direction in [Direction::CountryIsSubject, Direction::ItemIsSubject] {
                let text = question_text(category, direction, &pair);
                assert!(text.ends_with('?'), "{text}");
                match direction {
                    Direction::CountryIsSubject => assert!(text.contains("France")),
                    Direction::ItemIsSubject => assert!(text.contains("Paris")),
                }
                assert!(seen.insert(text), "duplicate wording for {category:?}/{direction:?}");
            }
        }
        assert_eq!(seen.len(), 6);
    }
}
