use std::collections::BTreeMap;

use crate::model::bank::QuestionBank;

//
// ─── ANSWER SHEET ──────────────────────────────────────────────────────────────
//

/// Sparse mapping from question index to the chosen option index.
///
/// Only questions the user answered are present; a missing key means
/// "no option selected".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    choices: BTreeMap<usize, usize>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `option_index` for `question_index`, returning the previous choice.
    ///
    /// Bounds are the caller's concern; the session validates against the bank.
    pub fn record(&mut self, question_index: usize, option_index: usize) -> Option<usize> {
        self.choices.insert(question_index, option_index)
    }

    #[must_use]
    pub fn get(&self, question_index: usize) -> Option<usize> {
        self.choices.get(&question_index).copied()
    }

    #[must_use]
    pub fn contains(&self, question_index: usize) -> bool {
        self.choices.contains_key(&question_index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Iterate `(question_index, option_index)` pairs in question order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.choices.iter().map(|(q, o)| (*q, *o))
    }
}

impl FromIterator<(usize, usize)> for AnswerSheet {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self {
            choices: iter.into_iter().collect(),
        }
    }
}

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// Outcome for a single question, in bank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionResult {
    pub question_index: usize,
    pub chosen_option_index: Option<usize>,
    pub correct_option_index: usize,
    pub is_correct: bool,
}

/// Score for an answer sheet against a bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizScore {
    question_count: usize,
    answered_count: usize,
    correct_count: usize,
    results: Vec<QuestionResult>,
}

impl QuizScore {
    /// Score `answers` against `bank`.
    ///
    /// Unanswered questions count as incorrect. Entries keyed past the end of
    /// the bank are ignored.
    #[must_use]
    pub fn compute(bank: &QuestionBank, answers: &AnswerSheet) -> Self {
        let results: Vec<QuestionResult> = bank
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let chosen = answers.get(index);
                QuestionResult {
                    question_index: index,
                    chosen_option_index: chosen,
                    correct_option_index: question.correct_option_index(),
                    is_correct: chosen.is_some_and(|c| question.is_correct(c)),
                }
            })
            .collect();

        let answered_count = results
            .iter()
            .filter(|r| r.chosen_option_index.is_some())
            .count();
        let correct_count = results.iter().filter(|r| r.is_correct).count();

        Self {
            question_count: bank.len(),
            answered_count,
            correct_count,
            results,
        }
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answered_count
    }

    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.question_count.saturating_sub(self.answered_count)
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn incorrect_count(&self) -> usize {
        self.question_count.saturating_sub(self.correct_count)
    }

    /// Percentage of correct answers, rounded half-up to an integer.
    #[must_use]
    pub fn percent(&self) -> u8 {
        percent_half_up(self.correct_count, self.question_count)
    }

    #[must_use]
    pub fn results(&self) -> &[QuestionResult] {
        &self.results
    }
}

/// `round(100 * correct / total)` with halves rounded up, in integer arithmetic.
///
/// Returns 0 when `total` is 0. `correct` is clamped to `total`.
#[must_use]
pub fn percent_half_up(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let total = total as u128;
    let correct = (correct as u128).min(total);
    let percent = (200 * correct + total) / (2 * total);
    u8::try_from(percent).unwrap_or(100)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, QuestionId};

    fn bank(correct: &[usize]) -> QuestionBank {
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Question::new(
                    QuestionId::new(i as u64 + 1),
                    format!("Q{i}"),
                    vec!["a".into(), "b".into(), "c".into()],
                    *c,
                )
                .unwrap()
            })
            .collect();
        QuestionBank::new(questions).unwrap()
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent_half_up(2, 3), 67);
        assert_eq!(percent_half_up(1, 3), 33);
        assert_eq!(percent_half_up(1, 8), 13);
        assert_eq!(percent_half_up(1, 200), 1);
        assert_eq!(percent_half_up(1, 201), 0);
        assert_eq!(percent_half_up(0, 5), 0);
        assert_eq!(percent_half_up(5, 5), 100);
        assert_eq!(percent_half_up(0, 0), 0);
    }

    #[test]
    fn three_question_scenario() {
        let bank = bank(&[1, 0, 2]);
        let answers: AnswerSheet = [(0, 1), (1, 1), (2, 2)].into_iter().collect();

        let score = QuizScore::compute(&bank, &answers);

        assert_eq!(score.correct_count(), 2);
        assert_eq!(score.incorrect_count(), 1);
        assert_eq!(score.percent(), 67);
        assert_eq!(
            score.results(),
            &[
                QuestionResult {
                    question_index: 0,
                    chosen_option_index: Some(1),
                    correct_option_index: 1,
                    is_correct: true,
                },
                QuestionResult {
                    question_index: 1,
                    chosen_option_index: Some(1),
                    correct_option_index: 0,
                    is_correct: false,
                },
                QuestionResult {
                    question_index: 2,
                    chosen_option_index: Some(2),
                    correct_option_index: 2,
                    is_correct: true,
                },
            ]
        );
    }

    #[test]
    fn unanswered_counts_as_incorrect() {
        let bank = bank(&[0, 0]);
        let answers: AnswerSheet = [(0, 0)].into_iter().collect();

        let score = QuizScore::compute(&bank, &answers);

        assert_eq!(score.answered_count(), 1);
        assert_eq!(score.unanswered_count(), 1);
        assert_eq!(score.correct_count(), 1);
        assert_eq!(score.incorrect_count(), 1);
        assert_eq!(score.results()[1].chosen_option_index, None);
        assert!(!score.results()[1].is_correct);
    }

    #[test]
    fn identical_sheets_score_identically() {
        let bank = bank(&[2, 1, 0, 1]);
        let a: AnswerSheet = [(0, 2), (1, 0), (2, 0), (3, 1)].into_iter().collect();
        let mut b = AnswerSheet::new();
        // same answers, different recording order and an overwrite
        b.record(3, 1);
        b.record(1, 2);
        b.record(0, 2);
        b.record(2, 0);
        b.record(1, 0);

        assert_eq!(a, b);
        assert_eq!(QuizScore::compute(&bank, &a), QuizScore::compute(&bank, &b));
    }

    #[test]
    fn record_returns_previous_choice() {
        let mut sheet = AnswerSheet::new();
        assert_eq!(sheet.record(0, 1), None);
        assert_eq!(sheet.record(0, 2), Some(1));
        assert_eq!(sheet.get(0), Some(2));
        assert_eq!(sheet.len(), 1);
        assert!(!sheet.contains(1));
    }
}
