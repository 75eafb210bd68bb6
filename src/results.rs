use rand::Rng;

use crate::error::QuizError;
use crate::session::{Direction, QuizSession, WrongAnswer};

/// Read-only projection of a finished quiz
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSummary {
    pub direction: Direction,
    pub score: usize,
    pub question_count: usize,
    pub wrong_log: Vec<WrongAnswer>,
}

impl QuizSummary {
    pub fn from_session<R: Rng>(session: &QuizSession<R>) -> Result<Self, QuizError> {
        if !session.is_finished() {
            return Err(QuizError::NotFinished);
        }
        Ok(Self {
            direction: session.direction(),
            score: session.score(),
            question_count: session.question_count(),
            wrong_log: session.wrong_log().to_vec(),
        })
    }

    /// Fraction of correct answers in `[0, 1]`
    pub fn accuracy(&self) -> f64 {
        if self.question_count == 0 {
            return 0.0;
        }
        self.score as f64 / self.question_count as f64
    }

    pub fn accuracy_percent(&self) -> String {
        format!("{:.1}%", self.accuracy() * 100.0)
    }

    pub fn is_perfect(&self) -> bool {
        self.question_count > 0 && self.wrong_log.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::WordEntry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn finished_session(wrong: usize, total: usize) -> QuizSession {
        let pool: Vec<WordEntry> = (1..=total as u32)
            .map(|i| WordEntry::new(i, format!("語{i}"), format!("意味{i}")))
            .collect();
        let mut session = QuizSession::with_rng(Direction::TermToMeaning, StdRng::seed_from_u64(3));
        session.start(pool, total).unwrap();
        for i in 0..total {
            let answer = if i < wrong {
                "wrong".to_string()
            } else {
                let entry = &session.pool()[session.position()];
                entry.meaning.clone()
            };
            session.answer(&answer).unwrap();
        }
        session
    }

    #[test]
    fn test_summary_of_unfinished_session() {
        let session = QuizSession::new(Direction::TermToMeaning);
        assert_eq!(
            QuizSummary::from_session(&session),
            Err(QuizError::NotFinished)
        );
    }

    #[test]
    fn test_perfect_summary() {
        let summary = QuizSummary::from_session(&finished_session(0, 5)).unwrap();
        assert_eq!(summary.score, 5);
        assert_eq!(summary.question_count, 5);
        assert_eq!(summary.accuracy(), 1.0);
        assert_eq!(summary.accuracy_percent(), "100.0%");
        assert!(summary.is_perfect());
    }

    #[test]
    fn test_partial_summary() {
        let summary = QuizSummary::from_session(&finished_session(1, 3)).unwrap();
        assert_eq!(summary.score, 2);
        assert_eq!(summary.wrong_log.len(), 1);
        assert!((summary.accuracy() - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.accuracy_percent(), "66.7%");
        assert!(!summary.is_perfect());
        assert_eq!(summary.wrong_log[0].given_answer, "wrong");
    }

    #[test]
    fn test_zero_accuracy() {
        let summary = QuizSummary::from_session(&finished_session(4, 4)).unwrap();
        assert_eq!(summary.accuracy(), 0.0);
        assert_eq!(summary.accuracy_percent(), "0.0%");
    }
}
