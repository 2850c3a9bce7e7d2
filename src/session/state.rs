//! Quiz session state.
//!
//! Holds which question the player is on and what they have answered.
//! Correctness is never judged here; the backend scores on submission.

use chrono::NaiveTime;

use crate::models::{OptionLetter, Question, QuizId, QuizMode};

/// Questions in one head-to-head game.
pub const HEAD_TO_HEAD_ROUNDS: usize = 10;

/// Outcome of asking the session to move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Now on the question at this index.
    Moved(usize),
    /// Head-to-head has nothing buffered; fetch a question, push it, then
    /// advance again.
    NeedsQuestion,
    /// No further question; the quiz can be submitted.
    AtEnd,
}

/// Payload for `/submit_quiz`, frozen at finalize time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub quiz_id: QuizId,
    pub theme: String,
    /// One entry per question, `""` where unanswered.
    pub responses: Vec<String>,
    pub start_time: String,
    pub end_time: String,
}

impl Submission {
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("quiz_id".to_string(), self.quiz_id.to_string()),
            ("theme".to_string(), self.theme.clone()),
            ("start_time".to_string(), self.start_time.clone()),
            ("end_time".to_string(), self.end_time.clone()),
        ];
        fields.extend(
            self.responses
                .iter()
                .map(|response| ("user_response".to_string(), response.clone())),
        );
        fields
    }
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    mode: QuizMode,
    theme: String,
    quiz_id: Option<QuizId>,
    questions: Vec<Question>,
    responses: Vec<Option<OptionLetter>>,
    current_index: usize,
    score: u32,
    started_at: NaiveTime,
    submission: Option<Submission>,
}

impl QuizSession {
    /// Fresh session. Theme challenges reserve `question_count` empty answer
    /// slots; head-to-head grows one question at a time.
    pub fn initialize(
        mode: QuizMode,
        theme: impl Into<String>,
        question_count: usize,
        started_at: NaiveTime,
    ) -> Self {
        let responses = match mode {
            QuizMode::ThemeChallenge => vec![None; question_count],
            QuizMode::HeadToHead => Vec::new(),
        };
        Self {
            mode,
            theme: theme.into(),
            quiz_id: None,
            questions: Vec::new(),
            responses,
            current_index: 0,
            score: 0,
            started_at,
            submission: None,
        }
    }

    /// Install the quiz's questions. Answer slots are resized to match.
    pub fn load_questions(&mut self, quiz_id: QuizId, questions: Vec<Question>) {
        self.quiz_id = Some(quiz_id);
        self.responses = vec![None; questions.len()];
        self.questions = questions;
        self.current_index = 0;
    }

    /// Append a head-to-head question together with its empty answer slot.
    pub fn push_question(&mut self, question: Question) {
        self.questions.push(question);
        self.responses.push(None);
    }

    /// Store the answer for `index`, replacing any earlier one.
    pub fn record_answer(&mut self, index: usize, letter: OptionLetter) {
        if self.is_finalized() {
            tracing::warn!("Ignoring answer for question {} after finalize", index);
            return;
        }
        let Some(slot) = self.responses.get_mut(index) else {
            tracing::warn!(
                "Ignoring answer for question {} of {}",
                index,
                self.responses.len()
            );
            return;
        };
        let first_answer = slot.is_none();
        *slot = Some(letter);

        // Head-to-head has no answer check; the score counts answered
        // questions and drives the backend's difficulty ramp.
        if self.mode == QuizMode::HeadToHead && first_answer {
            self.score += 1;
        }
    }

    pub fn advance(&mut self) -> Advance {
        if self.is_finalized() {
            return Advance::AtEnd;
        }
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            tracing::debug!("Advanced to question {}", self.current_index + 1);
            return Advance::Moved(self.current_index);
        }
        match self.mode {
            QuizMode::HeadToHead if self.questions.len() < HEAD_TO_HEAD_ROUNDS => {
                Advance::NeedsQuestion
            }
            _ => Advance::AtEnd,
        }
    }

    /// Freeze the answers and produce the submission. Later calls return the
    /// same submission.
    pub fn finalize(&mut self, end_time: NaiveTime) -> Submission {
        if let Some(submission) = &self.submission {
            return submission.clone();
        }
        let quiz_id = self
            .quiz_id
            .clone()
            .unwrap_or_else(|| QuizId::Ephemeral(String::new()));
        let responses = (0..self.questions.len().max(self.responses.len()))
            .map(|index| {
                self.responses
                    .get(index)
                    .copied()
                    .flatten()
                    .map(|letter| letter.to_string())
                    .unwrap_or_default()
            })
            .collect();
        let submission = Submission {
            quiz_id,
            theme: self.theme.clone(),
            responses,
            start_time: format_clock(self.started_at),
            end_time: format_clock(end_time),
        };
        tracing::info!(
            "Finalized quiz {} with {} responses",
            submission.quiz_id,
            submission.responses.len()
        );
        self.submission = Some(submission.clone());
        submission
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn quiz_id(&self) -> Option<&QuizId> {
        self.quiz_id.as_ref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn responses(&self) -> &[Option<OptionLetter>] {
        &self.responses
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn current_response(&self) -> Option<OptionLetter> {
        self.responses.get(self.current_index).copied().flatten()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_last_question(&self) -> bool {
        match self.mode {
            QuizMode::ThemeChallenge => self.current_index + 1 >= self.questions.len(),
            QuizMode::HeadToHead => self.current_index + 1 >= HEAD_TO_HEAD_ROUNDS,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.submission.is_some()
    }

    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }
}

/// Wall-clock time as the backend expects it, `HH:MM:SS`.
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn letter(option: &str) -> OptionLetter {
        OptionLetter::from_option(option).unwrap()
    }

    fn questions(count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| {
                Question::new(
                    format!("Question {}", i + 1),
                    vec!["A) one".into(), "B) two".into(), "C) three".into(), "D) four".into()],
                )
            })
            .collect()
    }

    #[test]
    fn test_theme_challenge_slots_match_questions() {
        let mut session = QuizSession::initialize(QuizMode::ThemeChallenge, "history", 5, clock(9, 0, 0));
        assert_eq!(session.responses().len(), 5);

        session.load_questions(QuizId::Bank(42), questions(3));
        assert_eq!(session.responses().len(), session.questions().len());
    }

    #[test]
    fn test_head_to_head_grows_together() {
        let mut session = QuizSession::initialize(QuizMode::HeadToHead, "random", 0, clock(9, 0, 0));
        assert!(session.responses().is_empty());

        session.push_question(questions(1).remove(0));
        assert_eq!(session.advance(), Advance::NeedsQuestion);
        session.push_question(questions(1).remove(0));
        assert_eq!(session.responses().len(), 2);
        assert_eq!(session.advance(), Advance::Moved(1));
    }

    #[test]
    fn test_head_to_head_stops_after_round_limit() {
        let mut session = QuizSession::initialize(QuizMode::HeadToHead, "random", 0, clock(9, 0, 0));
        for question in questions(HEAD_TO_HEAD_ROUNDS) {
            session.push_question(question);
        }
        for _ in 1..HEAD_TO_HEAD_ROUNDS {
            assert!(matches!(session.advance(), Advance::Moved(_)));
        }
        assert_eq!(session.advance(), Advance::AtEnd);
    }

    #[test]
    fn test_record_answer_overwrites_slot() {
        let mut session = QuizSession::initialize(QuizMode::ThemeChallenge, "history", 3, clock(9, 0, 0));
        session.load_questions(QuizId::Bank(1), questions(3));
        session.record_answer(0, letter("A) one"));
        session.record_answer(0, letter("C) three"));
        assert_eq!(session.responses()[0], Some(letter("C")));
        assert_eq!(session.score(), 0);

        session.record_answer(7, letter("B"));
        assert_eq!(session.responses().len(), 3);
    }

    #[test]
    fn test_head_to_head_score_counts_first_answers() {
        let mut session = QuizSession::initialize(QuizMode::HeadToHead, "random", 0, clock(9, 0, 0));
        session.push_question(questions(1).remove(0));
        session.record_answer(0, letter("A"));
        session.record_answer(0, letter("B"));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_theme_challenge_advance_stops_at_end() {
        let mut session = QuizSession::initialize(QuizMode::ThemeChallenge, "history", 2, clock(9, 0, 0));
        session.load_questions(QuizId::Bank(1), questions(2));
        assert_eq!(session.advance(), Advance::Moved(1));
        assert!(session.is_last_question());
        assert_eq!(session.advance(), Advance::AtEnd);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn test_finalize_pads_and_freezes() {
        let mut session = QuizSession::initialize(QuizMode::ThemeChallenge, "history", 5, clock(9, 15, 0));
        session.load_questions(QuizId::Bank(42), questions(5));
        session.record_answer(0, letter("A"));
        session.record_answer(2, letter("B"));

        let submission = session.finalize(clock(9, 17, 30));
        assert_eq!(submission.responses, vec!["A", "", "B", "", ""]);
        assert_eq!(submission.start_time, "09:15:00");
        assert_eq!(submission.end_time, "09:17:30");

        session.record_answer(1, letter("D"));
        assert_eq!(session.responses()[1], None);
        assert_eq!(session.finalize(clock(10, 0, 0)), submission);
        assert_eq!(session.advance(), Advance::AtEnd);
    }

    #[test]
    fn test_submission_form_fields_repeat_responses() {
        let submission = Submission {
            quiz_id: QuizId::Bank(42),
            theme: "history".into(),
            responses: vec!["A".into(), "C".into()],
            start_time: "09:00:00".into(),
            end_time: "09:05:00".into(),
        };
        let fields = submission.form_fields();
        assert_eq!(fields[0], ("quiz_id".to_string(), "42".to_string()));
        let responses: Vec<&str> = fields
            .iter()
            .filter(|(name, _)| name == "user_response")
            .map(|(_, value)| value.as_str())
            .collect();
        assert_eq!(responses, vec!["A", "C"]);
    }
}
