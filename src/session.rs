use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, QuizError};
use crate::options::generate_options;
use crate::vocab::{VocabStore, WordEntry};

/// Upper bound on questions in one session
pub const MAX_QUESTIONS: usize = 50;

/// Which side of an entry is shown as the prompt
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    #[strum(serialize = "古文単語 → 意味")]
    TermToMeaning,
    #[strum(serialize = "意味 → 古文単語")]
    MeaningToTerm,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Direction::TermToMeaning => Direction::MeaningToTerm,
            Direction::MeaningToTerm => Direction::TermToMeaning,
        }
    }

    /// The text shown to the user for `entry`
    pub fn prompt_of(self, entry: &WordEntry) -> &str {
        match self {
            Direction::TermToMeaning => &entry.term,
            Direction::MeaningToTerm => &entry.meaning,
        }
    }

    /// The value the user must pick for `entry`
    pub fn answer_of(self, entry: &WordEntry) -> &str {
        match self {
            Direction::TermToMeaning => &entry.meaning,
            Direction::MeaningToTerm => &entry.term,
        }
    }
}

/// Largest question count allowed for a filtered pool of `pool_len` entries
pub fn max_question_count(pool_len: usize) -> usize {
    pool_len.min(MAX_QUESTIONS)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub direction: Direction,
    pub range_start: u32,
    pub range_end: u32,
    pub question_count: usize,
}

impl QuizConfig {
    /// Filter `store` down to this config's range and check the question count fits.
    pub fn select_pool(&self, store: &VocabStore) -> Result<Vec<WordEntry>, ConfigError> {
        let pool = store.filter_by_range(self.range_start, self.range_end)?;
        if pool.is_empty() {
            return Err(ConfigError::EmptyPool);
        }
        check_question_count(self.question_count, pool.len())?;
        Ok(pool)
    }
}

fn check_question_count(requested: usize, pool_len: usize) -> Result<(), ConfigError> {
    let max = max_question_count(pool_len);
    if requested == 0 || requested > max {
        return Err(ConfigError::QuestionCount { requested, max });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Finished,
}

/// One incorrectly answered question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongAnswer {
    pub prompt: String,
    pub correct_answer: String,
    pub given_answer: String,
}

/// What happened when a single answer was submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_answer: String,
}

/// A running multiple-choice quiz: `start`, then one `answer` per question.
#[derive(Debug)]
pub struct QuizSession<R: Rng = StdRng> {
    direction: Direction,
    state: SessionState,
    pool: Vec<WordEntry>,
    position: usize,
    score: usize,
    wrong_log: Vec<WrongAnswer>,
    current_options: Vec<String>,
    rng: R,
}

impl QuizSession<StdRng> {
    pub fn new(direction: Direction) -> Self {
        Self::with_rng(direction, StdRng::from_entropy())
    }
}

impl<R: Rng> QuizSession<R> {
    pub fn with_rng(direction: Direction, rng: R) -> Self {
        Self {
            direction,
            state: SessionState::NotStarted,
            pool: Vec::new(),
            position: 0,
            score: 0,
            wrong_log: Vec::new(),
            current_options: Vec::new(),
            rng,
        }
    }

    /// Sample `question_count` questions from `pool` and present the first one.
    ///
    /// On error the session is left exactly as it was.
    pub fn start(&mut self, pool: Vec<WordEntry>, question_count: usize) -> Result<(), QuizError> {
        if pool.is_empty() {
            return Err(ConfigError::EmptyPool.into());
        }
        check_question_count(question_count, pool.len())?;

        let mut sampled: Vec<WordEntry> = pool
            .choose_multiple(&mut self.rng, question_count)
            .cloned()
            .collect();
        sampled.shuffle(&mut self.rng);

        self.pool = sampled;
        self.position = 0;
        self.score = 0;
        self.wrong_log.clear();
        self.state = SessionState::InProgress;
        self.refresh_options();

        log::info!(
            "quiz started: {} questions, {}",
            question_count,
            self.direction
        );
        Ok(())
    }

    /// Grade `given` against the current question and move on.
    pub fn answer(&mut self, given: &str) -> Result<AnswerOutcome, QuizError> {
        if self.state != SessionState::InProgress {
            return Err(QuizError::NotInProgress);
        }

        let entry = &self.pool[self.position];
        let correct_answer = self.direction.answer_of(entry).trim().to_string();
        let given = given.trim();
        let correct = given == correct_answer;

        if correct {
            self.score += 1;
        } else {
            self.wrong_log.push(WrongAnswer {
                prompt: self.direction.prompt_of(entry).to_string(),
                correct_answer: correct_answer.clone(),
                given_answer: given.to_string(),
            });
        }

        self.position += 1;
        if self.position == self.pool.len() {
            self.state = SessionState::Finished;
            self.current_options.clear();
            log::info!("quiz finished: {}/{}", self.score, self.pool.len());
        } else {
            self.refresh_options();
        }

        Ok(AnswerOutcome {
            correct,
            correct_answer,
        })
    }

    /// Drop all session data and return to `NotStarted`.
    pub fn reset(&mut self) {
        self.state = SessionState::NotStarted;
        self.pool.clear();
        self.position = 0;
        self.score = 0;
        self.wrong_log.clear();
        self.current_options.clear();
    }

    fn refresh_options(&mut self) {
        self.current_options =
            generate_options(&self.pool, self.position, self.direction, &mut self.rng);
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Prompt for the active question, if any
    pub fn prompt(&self) -> Option<&str> {
        match self.state {
            SessionState::InProgress => Some(self.direction.prompt_of(&self.pool[self.position])),
            _ => None,
        }
    }

    pub fn current_options(&self) -> &[String] {
        &self.current_options
    }

    pub fn pool(&self) -> &[WordEntry] {
        &self.pool
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn question_count(&self) -> usize {
        self.pool.len()
    }

    pub fn wrong_log(&self) -> &[WrongAnswer] {
        &self.wrong_log
    }
}
