use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::trivia_engine::error::InputValidationError;

// ---------------------------------------------------------------------------
// Topics
// ---------------------------------------------------------------------------

/// The fact type a single question is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Capital,
    Languages,
    Dishes,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Capital, Category::Languages, Category::Dishes];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Capital   => write!(f, "capital"),
            Category::Languages => write!(f, "languages"),
            Category::Dishes    => write!(f, "dishes"),
        }
    }
}

/// What the player chooses to be quizzed on for a whole round.
///
/// `All` draws a fresh [`Category`] for every question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TopicSelection {
    All,
    Capitals,
    Languages,
    Dishes,
}

impl TopicSelection {
    /// Menu order.
    pub const ALL: [TopicSelection; 4] = [
        TopicSelection::All,
        TopicSelection::Capitals,
        TopicSelection::Languages,
        TopicSelection::Dishes,
    ];

    /// Categories a question in this selection may be drawn from.
    pub fn categories(self) -> &'static [Category] {
        match self {
            TopicSelection::All       => &Category::ALL,
            TopicSelection::Capitals  => &[Category::Capital],
            TopicSelection::Languages => &[Category::Languages],
            TopicSelection::Dishes    => &[Category::Dishes],
        }
    }

    /// Pick the category for the next question.
    pub fn pick_category<R: Rng + ?Sized>(self, rng: &mut R) -> Category {
        let categories = self.categories();
        categories[rng.gen_range(0..categories.len())]
    }

    /// Stable identifier used in the score file.
    pub fn key(self) -> &'static str {
        match self {
            TopicSelection::All       => "all",
            TopicSelection::Capitals  => "capitals",
            TopicSelection::Languages => "languages",
            TopicSelection::Dishes    => "dishes",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }
}

impl fmt::Display for TopicSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TopicSelection::All       => "All Topics",
            TopicSelection::Capitals  => "Capital Cities",
            TopicSelection::Languages => "Languages",
            TopicSelection::Dishes    => "National Dishes",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Regions
// ---------------------------------------------------------------------------

/// A major geographic grouping. `World` is synthetic and holds every country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    World,
    Africa,
    Americas,
    AsiaMiddleEast,
    Oceania,
    Europe,
}

impl Region {
    /// Menu order.
    pub const ALL: [Region; 6] = [
        Region::World,
        Region::Africa,
        Region::Americas,
        Region::AsiaMiddleEast,
        Region::Oceania,
        Region::Europe,
    ];

    /// Minor regions grouped under this major region. Empty for `World`.
    pub fn minor_regions(self) -> &'static [&'static str] {
        match self {
            Region::World => &[],
            Region::Africa => &[
                "Western Africa", "Southern Africa", "Northern Africa",
                "Central Africa", "Eastern Africa",
            ],
            Region::Americas => &[
                "Caribbean", "Central America", "North America", "South America",
            ],
            Region::AsiaMiddleEast => &[
                "Middle East", "Southern and Central Asia", "Eastern Asia", "Southeast Asia",
            ],
            Region::Oceania => &[
                "Polynesia", "Micronesia", "Melanesia", "Australia and New Zealand",
            ],
            Region::Europe => &[
                "Western Europe", "Nordic Countries", "Baltic Countries",
                "Central and Southeast Europe", "Eastern Europe", "British Isles",
                "Southern Europe",
            ],
        }
    }

    /// Major region a minor region belongs to, if it is in the table.
    pub fn for_minor_region(minor: &str) -> Option<Region> {
        Self::ALL
            .into_iter()
            .find(|r| r.minor_regions().contains(&minor))
    }

    /// Stable identifier used in the score file.
    pub fn key(self) -> &'static str {
        match self {
            Region::World          => "world",
            Region::Africa         => "africa",
            Region::Americas       => "americas",
            Region::AsiaMiddleEast => "asia_middle_east",
            Region::Oceania        => "oceania",
            Region::Europe         => "europe",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.key() == key)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Region::World          => "World",
            Region::Africa         => "Africa",
            Region::Americas       => "Americas",
            Region::AsiaMiddleEast => "Asia & Middle East",
            Region::Oceania        => "Oceania",
            Region::Europe         => "Europe",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Question shape
// ---------------------------------------------------------------------------

/// Which side of the answer pair the question names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// "What is the capital of France?" -- choices are items.
    CountryIsSubject,
    /// "Paris is the capital of which country?" -- choices are countries.
    ItemIsSubject,
}

impl Direction {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen::<bool>() {
            Direction::CountryIsSubject
        } else {
            Direction::ItemIsSubject
        }
    }
}

/// Display letter of a multiple-choice option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
}

impl Letter {
    pub const ALL: [Letter; 4] = [Letter::A, Letter::B, Letter::C, Letter::D];
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Letter::A => write!(f, "A"),
            Letter::B => write!(f, "B"),
            Letter::C => write!(f, "C"),
            Letter::D => write!(f, "D"),
        }
    }
}

impl FromStr for Letter {
    type Err = InputValidationError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Letter::A),
            "B" => Ok(Letter::B),
            "C" => Ok(Letter::C),
            "D" => Ok(Letter::D),
            _   => Err(InputValidationError::NotALetter),
        }
    }
}

/// A (country, item) pair forming the basis of one question's correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPair {
    pub country: String,
    pub item: String,
}

impl AnswerPair {
    /// The value shown as a choice for the given direction.
    pub fn choice_text(&self, direction: Direction) -> &str {
        match direction {
            Direction::CountryIsSubject => &self.item,
            Direction::ItemIsSubject    => &self.country,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerChoice {
    pub letter: Letter,
    pub pair: AnswerPair,
    pub is_correct: bool,
}

/// Composed explanations for an answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Every item true for the correct country, as a sentence.
    pub correct_items_statement: String,
    /// What the player picked.
    pub you_said: String,
    /// Only present when the player picked a distractor.
    pub looking_for: Option<String>,
    /// Every country sharing the answer item. Only for a missed question
    /// that named a language or dish.
    pub shared_item_statement: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// 1-based position in the round.
    pub number: usize,
    pub category: Category,
    pub direction: Direction,
    pub answer: AnswerPair,
    /// All items the correct country has for `category`, in data order.
    pub correct_items: Vec<String>,
    /// Every country whose `category` items include the answer item.
    pub item_countries: Vec<String>,
    pub text: String,
    /// Always four, in letter order.
    pub choices: Vec<AnswerChoice>,
    pub user_choice: Option<Letter>,
    pub feedback: Option<Feedback>,
}

impl Question {
    /// `None` only for a hand-built question without a correct choice.
    pub fn correct_choice(&self) -> Option<&AnswerChoice> {
        self.choices.iter().find(|c| c.is_correct)
    }

    pub fn wrong_choices(&self) -> impl Iterator<Item = &AnswerChoice> {
        self.choices.iter().filter(|c| !c.is_correct)
    }

    pub fn choice(&self, letter: Letter) -> Option<&AnswerChoice> {
        self.choices.iter().find(|c| c.letter == letter)
    }

    /// Text shown for a choice under this question's direction.
    pub fn choice_text(&self, choice: &AnswerChoice) -> String {
        choice.pair.choice_text(self.direction).trim().to_string()
    }

    /// `None` until the player has answered.
    pub fn answered_correctly(&self) -> Option<bool> {
        self.user_choice
            .map(|letter| self.choice(letter).is_some_and(|c| c.is_correct))
    }
}
