//! Console front end: menus, lettered prompts, the round loop, and reports.
//!
//! Generic over `BufRead`/`Write` so whole sessions can be scripted in tests.
//! Invalid input never advances the round; it prints a hint and asks again.
//! End of input ends the session cleanly.

use std::fmt::Display;
use std::io::{self, BufRead, ErrorKind, Write};

use log::warn;

use crate::config::GameConfig;
use crate::trivia_engine::{
    data::ReferenceData,
    error::InputValidationError,
    models::{Letter, Question, Region, TopicSelection},
    round::{Round, RoundSettings},
    scores::RecordStore,
};

const RULE: &str = "========================";

/// Parse a 1-based menu answer into a 0-based index.
pub fn parse_menu_choice(input: &str, len: usize) -> Result<usize, InputValidationError> {
    let n: usize = input
        .trim()
        .parse()
        .map_err(|_| InputValidationError::NotANumber)?;
    if n == 0 || n > len {
        return Err(InputValidationError::OutOfRange { min: 1, max: len });
    }
    Ok(n - 1)
}

pub fn parse_username(input: &str) -> Result<String, InputValidationError> {
    let name = input.trim();
    if name.is_empty() {
        Err(InputValidationError::EmptyName)
    } else {
        Ok(name.to_string())
    }
}

/// What to do after a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    SameSettings,
    NewSettings,
    Quit,
}

pub fn parse_next_step(input: &str) -> Option<NextStep> {
    match input.trim().to_ascii_lowercase().as_str() {
        "s" => Some(NextStep::SameSettings),
        "d" => Some(NextStep::NewSettings),
        "q" => Some(NextStep::Quit),
        _   => None,
    }
}

// ---------------------------------------------------------------------------
// Line I/O
// ---------------------------------------------------------------------------

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Print `prompt` and read one line. End of input is `UnexpectedEof`.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Ask until `parse` accepts the answer, printing its error each time.
    pub fn ask<T, F>(&mut self, prompt: &str, parse: F) -> io::Result<T>
    where
        F: Fn(&str) -> Result<T, InputValidationError>,
    {
        loop {
            let line = self.read_line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    self.say(e)?;
                    self.say("")?;
                }
            }
        }
    }

    /// Print a numbered menu and return the chosen option.
    pub fn option_menu<T: Display + Copy>(&mut self, options: &[T]) -> io::Result<T> {
        for (i, option) in options.iter().enumerate() {
            self.say(format_args!("{}: {option}", i + 1))?;
        }
        self.say("")?;
        let index = self.ask("Your choice? ", |s| parse_menu_choice(s, options.len()))?;
        Ok(options[index])
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Repeated rounds until the player quits.
pub struct Session<'a, R, W> {
    console: Console<R, W>,
    data: &'a ReferenceData,
    config: &'a GameConfig,
    ledger: RecordStore,
    rounds_played: u64,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(console: Console<R, W>, data: &'a ReferenceData, config: &'a GameConfig) -> Self {
        Session {
            console,
            data,
            config,
            ledger: RecordStore::default(),
            rounds_played: 0,
        }
    }

    pub fn ledger(&self) -> &RecordStore {
        &self.ledger
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Play until the player quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        match self.play() {
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                self.console.say("\nGoodbye!")?;
                Ok(())
            }
            other => other,
        }
    }

    fn play(&mut self) -> io::Result<()> {
        self.console.say("\nWorld Geography Trivia Game \n")?;
        self.load_ledger()?;

        let mut settings = self.choose_settings(None)?;
        loop {
            let Some(round) = self.play_round(settings.clone())? else {
                settings = self.choose_settings(Some(settings.username.clone()))?;
                continue;
            };
            if self.config.hold_feedback {
                let choice = self.console.read_line(
                    "\nSee detailed report? Enter S to skip, anything else to continue: ",
                )?;
                if !choice.trim().eq_ignore_ascii_case("s") {
                    self.final_report(&round)?;
                }
            }
            self.console.read_line("Press Enter to see score report")?;
            self.record_scores(&round)?;

            let next = loop {
                let line = self.console.read_line(
                    "\nPlay again as [s]ame user and settings, [d]ifferent user / settings, or [q]uit game? ",
                )?;
                if let Some(step) = parse_next_step(&line) {
                    break step;
                }
            };
            match next {
                NextStep::SameSettings => {}
                NextStep::NewSettings => settings = self.choose_settings(None)?,
                NextStep::Quit => {
                    self.console.say("\nThanks for playing!")?;
                    return Ok(());
                }
            }
        }
    }

    fn load_ledger(&mut self) -> io::Result<()> {
        match RecordStore::load(&self.config.scores_path) {
            Ok(store) => self.ledger = store,
            Err(e) => {
                warn!("score file unusable, starting empty: {e}");
                self.console.say(format_args!(
                    "Warning: could not read past scores ({e}). Scores from this session start fresh."
                ))?;
                self.ledger = RecordStore::default();
            }
        }
        Ok(())
    }

    /// Username (unless kept), region and topic; refuses combinations the data cannot fill.
    fn choose_settings(&mut self, username: Option<String>) -> io::Result<RoundSettings> {
        let username = match username {
            Some(name) => name,
            None => self.console.ask("Who's playing [type your name]? \n", parse_username)?,
        };
        let needed = self.config.question_limit + 3;
        loop {
            self.console.say("Choose the region you will play. \n")?;
            let region = self.console.option_menu(&Region::ALL)?;
            self.console.say("Choose the topics you will play. \n")?;
            let topic = self.console.option_menu(&TopicSelection::ALL)?;
            if self.data.supports(region, topic, needed) {
                return Ok(RoundSettings { username, region, topic });
            }
            self.console.say(format_args!(
                "Sorry, insufficient data available to play {topic} for the region {region}. \
                 Please make a different selection."
            ))?;
        }
    }

    /// Ask every question of one round. `None` when the round had to be abandoned.
    fn play_round(&mut self, settings: RoundSettings) -> io::Result<Option<Round>> {
        let seed = self.config.rng_seed.map(|s| s.wrapping_add(self.rounds_played));
        self.rounds_played += 1;
        let mut round = Round::new(settings, self.config.question_limit, seed);

        while !round.is_complete() {
            let question = match round.next_question(self.data) {
                Ok(q) => q,
                Err(e) => {
                    warn!("round abandoned: {e}");
                    self.console.say(format_args!(
                        "\nSorry, this round cannot continue: {e}. Please choose different settings."
                    ))?;
                    return Ok(None);
                }
            };
            self.show_question(&question)?;
            let letter = self.console.ask("\nYour answer? ", |s| s.parse::<Letter>())?;
            let answered = round.submit(question, letter);
            show_result(&mut self.console, answered, self.config.hold_feedback)?;
        }
        Ok(Some(round))
    }

    fn show_question(&mut self, question: &Question) -> io::Result<()> {
        self.console.say(format_args!("\n{RULE}"))?;
        self.console.say(format_args!("Question {} :", question.number))?;
        self.console.say(format_args!("{}\n", question.text))?;
        for choice in &question.choices {
            self.console
                .say(format_args!("{}: {}", choice.letter, question.choice_text(choice)))?;
        }
        Ok(())
    }

    fn final_report(&mut self, round: &Round) -> io::Result<()> {
        let (correct, incorrect): (Vec<&Question>, Vec<&Question>) = round
            .questions()
            .iter()
            .partition(|q| q.answered_correctly() == Some(true));

        self.console
            .say(format_args!("\nYou answered {} questions correctly.\n", correct.len()))?;
        for q in &correct {
            self.report_question(q)?;
        }
        self.console.read_line("\nPress Enter to review incorrect answers\n")?;
        self.console
            .say(format_args!("You answered {} questions incorrectly.", incorrect.len()))?;
        for q in &incorrect {
            self.report_question(q)?;
        }
        Ok(())
    }

    fn report_question(&mut self, question: &Question) -> io::Result<()> {
        self.console.say(format_args!("\nQuestion {}:", question.number))?;
        if let Some(feedback) = &question.feedback {
            for line in feedback.detailed(question.correct_items.len() > 1) {
                self.console.say(line)?;
            }
        }
        Ok(())
    }

    fn record_scores(&mut self, round: &Round) -> io::Result<()> {
        let settings = round.settings();
        let report = self
            .ledger
            .update(&settings.username, settings.score_key(), round.score());
        self.console.say("")?;
        for line in report.lines() {
            self.console.say(line)?;
        }
        if let Err(e) = self.ledger.save(&self.config.scores_path) {
            warn!("could not save scores: {e}");
            self.console
                .say(format_args!("Warning: your score could not be saved ({e})."))?;
        }
        Ok(())
    }
}

fn show_result<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    question: &Question,
    hold_feedback: bool,
) -> io::Result<()> {
    let Some(feedback) = &question.feedback else {
        return Ok(());
    };
    if question.answered_correctly() == Some(true) {
        console.say("\nCorrect, you gain a point!\n")?;
    } else {
        console.say("\nIncorrect!")?;
    }
    if hold_feedback {
        if let Some(looking_for) = feedback.immediate() {
            console.say(looking_for)?;
        }
        return Ok(());
    }
    // The detailed lines already open with the looking-for line.
    for line in feedback.detailed(question.correct_items.len() > 1) {
        console.say(line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trivia_engine::fixtures::fixture_data;
    use crate::trivia_engine::scores::ScoreKey;
    use std::io::Cursor;
    use std::path::Path;

    fn config(scores: &Path) -> GameConfig {
        GameConfig {
            scores_path: scores.to_path_buf(),
            question_limit: 3,
            rng_seed: Some(11),
            ..GameConfig::default()
        }
    }

    fn run_script(script: &str, config: &GameConfig) -> (String, RecordStore) {
        let data = fixture_data();
        let console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let mut session = Session::new(console, &data, config);
        session.run().unwrap();
        let ledger = session.ledger().clone();
        let output = String::from_utf8(session.into_console().into_output()).unwrap();
        (output, ledger)
    }

    #[test]
    fn menu_choice_rejects_non_numbers_and_out_of_range() {
        assert_eq!(parse_menu_choice("2", 4), Ok(1));
        assert_eq!(parse_menu_choice(" 4\n", 4), Ok(3));
        assert_eq!(parse_menu_choice("x", 4), Err(InputValidationError::NotANumber));
        assert_eq!(parse_menu_choice("-1", 4), Err(InputValidationError::NotANumber));
        assert_eq!(
            parse_menu_choice("0", 4),
            Err(InputValidationError::OutOfRange { min: 1, max: 4 })
        );
        assert_eq!(
            parse_menu_choice("5", 4),
            Err(InputValidationError::OutOfRange { min: 1, max: 4 })
        );
    }

    #[test]
    fn letters_are_case_insensitive() {
        assert_eq!("b".parse::<Letter>(), Ok(Letter::B));
        assert_eq!(" D ".parse::<Letter>(), Ok(Letter::D));
        assert_eq!("E".parse::<Letter>(), Err(InputValidationError::NotALetter));
        assert_eq!("".parse::<Letter>(), Err(InputValidationError::NotALetter));
    }

    #[test]
    fn next_step_parses_single_letters() {
        assert_eq!(parse_next_step("S"), Some(NextStep::SameSettings));
        assert_eq!(parse_next_step("d\n"), Some(NextStep::NewSettings));
        assert_eq!(parse_next_step("q"), Some(NextStep::Quit));
        assert_eq!(parse_next_step("quit"), None);
    }

    #[test]
    fn option_menu_reprompts_until_valid() {
        let mut console = Console::new(Cursor::new(b"9\nabc\n2\n".to_vec()), Vec::new());
        let region = console.option_menu(&Region::ALL).unwrap();
        assert_eq!(region, Region::Africa);
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("1: World"));
        assert!(out.contains("4: Asia & Middle East"));
        assert!(out.contains("Please enter a number from 1 to 6."));
        assert!(out.contains("Please enter a valid digit."));
    }

    #[test]
    fn full_session_plays_a_round_and_records_the_score() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir.path().join("scores.json"));
        // name, Europe, Capital Cities, three answers (one invalid first),
        // skip report, enter for score report, quit.
        let script = "Ann\n6\n2\nz\na\nb\nc\ns\n\nq\n";
        let (out, ledger) = run_script(script, &config);

        assert!(out.contains("Question 3 :"));
        assert!(!out.contains("Question 4 :"));
        assert!(out.contains("Invalid input, try again!"));
        assert!(out.contains("playing the Europe region and Capital Cities category."));
        assert!(out.contains("This is your first time playing this region and category."));
        assert!(out.contains("Thanks for playing!"));

        let key = ScoreKey::new(Region::Europe, TopicSelection::Capitals);
        let best = ledger.personal_best("Ann", key).expect("score recorded");
        assert!(best <= 3);
        assert_eq!(RecordStore::load(&config.scores_path).unwrap(), ledger);
    }

    #[test]
    fn unheld_feedback_prints_detail_once_per_question() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig {
            hold_feedback: false,
            ..config(&dir.path().join("scores.json"))
        };

        // Replay the round the session will play to pick a wrong letter for each question.
        let data = fixture_data();
        let settings = RoundSettings {
            username: "Ann".into(),
            region: Region::Europe,
            topic: TopicSelection::Capitals,
        };
        let mut round = Round::new(settings, config.question_limit, config.rng_seed);
        let mut script = String::from("Ann\n6\n2\n");
        while !round.is_complete() {
            let q = round.next_question(&data).unwrap();
            let wrong = q.wrong_choices().next().unwrap().letter;
            script.push_str(&format!("{wrong}\n"));
            round.submit(q, wrong);
        }
        script.push_str("\nq\n");

        let (out, ledger) = run_script(&script, &config);

        assert!(!out.contains("See detailed report?"));
        assert!(!out.contains("Correct, you gain a point!"));
        assert_eq!(out.matches("\nIncorrect!\n").count(), 3);
        assert_eq!(out.matches("The answer we were looking for was").count(), 3);
        for block in out.split("\nIncorrect!\n").skip(1) {
            let mut lines = block.lines();
            assert!(lines.next().unwrap().starts_with("The answer we were looking for was "));
            assert!(lines.next().unwrap().contains(" is the capital of "));
            assert!(lines.next().unwrap().starts_with("You said "));
        }
        let key = ScoreKey::new(Region::Europe, TopicSelection::Capitals);
        assert_eq!(ledger.personal_best("Ann", key), Some(0));
    }

    #[test]
    fn unsupported_selection_is_refused_before_the_round() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir.path().join("scores.json"));
        // Oceania + National Dishes is refused, then Europe + Languages is accepted;
        // input ends mid-round.
        let script = "Ann\n5\n4\n6\n3\n";
        let (out, _) = run_script(script, &config);
        assert!(out.contains(
            "Sorry, insufficient data available to play National Dishes for the region Oceania."
        ));
        assert!(out.contains("Question 1 :"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn corrupt_score_file_degrades_to_empty_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "not json").unwrap();
        let config = config(&path);
        let (out, ledger) = run_script("Ann\n", &config);
        assert!(out.contains("Warning: could not read past scores"));
        assert_eq!(ledger, RecordStore::default());
    }

    #[test]
    fn end_of_input_ends_the_session_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir.path().join("scores.json"));
        let (out, _) = run_script("", &config);
        assert!(out.contains("Goodbye!"));
    }
}
