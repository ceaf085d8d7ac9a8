//! Natural-language explanations for answered questions.

use crate::trivia_engine::{
    helpers::format_item_list,
    models::{Category, Direction, Feedback, Question},
};

/// Sentence listing every item true for the answer's country.
fn correct_items_statement(question: &Question) -> String {
    let country = question.answer.country.trim();
    let items = format_item_list(&question.correct_items);
    let several = question.correct_items.len() > 1;
    match question.category {
        Category::Capital => format!("{items} is the capital of {country}."),
        Category::Languages if several => format!("The major languages spoken in {country} are: {items}"),
        Category::Languages => format!("The major language spoken in {country} is {items}."),
        Category::Dishes if several => format!("The typical national dishes of {country} include: {items}"),
        Category::Dishes => format!("The national dish of {country} is {items}."),
    }
}

/// Which countries share the answer item, for questions that named a
/// language or a dish.
fn shared_item_statement(question: &Question) -> Option<String> {
    if question.direction != Direction::ItemIsSubject || question.item_countries.is_empty() {
        return None;
    }
    let item = question.answer.item.trim();
    let countries = format_item_list(&question.item_countries);
    match question.category {
        Category::Capital   => None,
        Category::Languages => Some(format!("{item} is most commonly spoken in: {countries}")),
        Category::Dishes    => Some(format!("{item} is considered a national dish in: {countries}")),
    }
}

/// Compose feedback for an answered question; `None` if it has no answer yet.
pub fn compose(question: &Question) -> Option<Feedback> {
    let letter = question.user_choice?;
    let picked = question.choice(letter)?;
    let correct = question.correct_choice()?;

    let looking_for = (!picked.is_correct).then(|| {
        format!(
            "The answer we were looking for was {}.",
            question.choice_text(correct)
        )
    });

    let shared = looking_for
        .as_ref()
        .and_then(|_| shared_item_statement(question));

    Some(Feedback {
        correct_items_statement: correct_items_statement(question),
        you_said: format!("You said {}", question.choice_text(picked)),
        looking_for,
        shared_item_statement: shared,
    })
}

impl Feedback {
    /// Shown right after the answer: only the looking-for line, and only when wrong.
    pub fn immediate(&self) -> Option<&str> {
        self.looking_for.as_deref()
    }

    /// Lines for the end-of-round report.
    ///
    /// A correct answer only restates "You said" when the country has several
    /// items, since the player picked one of many.
    pub fn detailed(&self, several_items: bool) -> Vec<&str> {
        match &self.looking_for {
            Some(looking_for) => {
                let mut lines = vec![
                    looking_for.as_str(),
                    self.correct_items_statement.as_str(),
                    self.you_said.as_str(),
                ];
                lines.extend(self.shared_item_statement.as_deref());
                lines
            }
            None if several_items => vec![
                self.correct_items_statement.as_str(),
                self.you_said.as_str(),
            ],
            None => vec![self.correct_items_statement.as_str()],
        }
    }
}
