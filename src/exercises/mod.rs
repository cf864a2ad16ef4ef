//! Exercise generators and graders, one module per exercise kind.
//!
//! Dispatch is a plain `match` on `ExerciseKind`: the set of exercises is
//! closed and every `Question` records its kind, so grading always reaches
//! the grader of the generator that produced it.

use rand::Rng;
use tracing::debug;

use crate::algebra::normalize_expression;
use crate::domain::{Difficulty, ExerciseKind, ExerciseResult, Question, Submission};

pub mod identity_expand;
pub mod identity_factor;
pub mod monomial_ops;
pub mod monomial_parts;
pub mod polynomial_eval;

/// The three notable identities shared by expansion and factoring exercises.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Identity {
  /// (a + b)² = a² + 2ab + b²
  SumSquared,
  /// (a - b)² = a² - 2ab + b²
  DifferenceSquared,
  /// (a + b)(a - b) = a² - b²
  SumTimesDifference,
}

impl Identity {
  pub const ALL: [Identity; 3] = [
    Identity::SumSquared,
    Identity::DifferenceSquared,
    Identity::SumTimesDifference,
  ];

  pub fn formula(self) -> &'static str {
    match self {
      Identity::SumSquared => "(a+b)² = a² + 2ab + b²",
      Identity::DifferenceSquared => "(a-b)² = a² - 2ab + b²",
      Identity::SumTimesDifference => "(a+b)(a-b) = a² - b²",
    }
  }
}

/// Generate a fresh question of `kind`.
pub fn generate<R: Rng + ?Sized>(kind: ExerciseKind, difficulty: Difficulty, rng: &mut R) -> Question {
  let q = match kind {
    ExerciseKind::MonomialParts => monomial_parts::generate(difficulty, rng),
    ExerciseKind::MonomialOps => monomial_ops::generate(difficulty, rng),
    ExerciseKind::IdentityExpand => identity_expand::generate(difficulty, rng),
    ExerciseKind::IdentityFactor => identity_factor::generate(difficulty, rng),
    ExerciseKind::PolynomialEval => polynomial_eval::generate(difficulty, rng),
  };
  debug!(target: "exercise", kind = %kind, %difficulty, id = %q.id, display = %q.display, "Generated question");
  q
}

/// Grade `submission` against the question's recorded answer. Never fails.
pub fn check_answer(question: &Question, submission: &Submission) -> ExerciseResult {
  match question.kind {
    ExerciseKind::MonomialParts => monomial_parts::check_answer(question, submission),
    ExerciseKind::MonomialOps => monomial_ops::check_answer(question, submission),
    ExerciseKind::IdentityExpand => identity_expand::check_answer(question, submission),
    ExerciseKind::IdentityFactor => identity_factor::check_answer(question, submission),
    ExerciseKind::PolynomialEval => polynomial_eval::check_answer(question, submission),
  }
}

/// Shared grader: normalized string equality against `question.answer`.
pub(crate) fn check_normalized(question: &Question, submission: &Submission) -> ExerciseResult {
  let is_correct = match submission {
    Submission::Text(text) => normalize_expression(text) == normalize_expression(&question.answer),
    Submission::Parts(_) => false,
  };
  text_result(question, submission, is_correct, None)
}

pub(crate) fn text_result(
  question: &Question,
  submission: &Submission,
  is_correct: bool,
  feedback: Option<String>,
) -> ExerciseResult {
  ExerciseResult {
    is_correct,
    user_answer: submission.summary(),
    correct_answer: question.answer.clone(),
    feedback,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::registry;
  use rand::{rngs::StdRng, SeedableRng};

  #[test]
  fn every_generator_self_grades_correct() {
    let mut rng = StdRng::seed_from_u64(2024);
    for info in registry::all() {
      for difficulty in Difficulty::ALL {
        for _ in 0..200 {
          let q = generate(info.kind, difficulty, &mut rng);
          assert_eq!(q.kind, info.kind);
          let res = check_answer(&q, &q.expected_submission());
          assert!(res.is_correct, "{} ({difficulty}) rejected its own answer: {q:?}", info.kind);
        }
      }
    }
  }

  #[test]
  fn wrong_submission_shape_grades_incorrect() {
    let mut rng = StdRng::seed_from_u64(5);
    for info in registry::all() {
      let q = generate(info.kind, Difficulty::Medium, &mut rng);
      let wrong = match q.expected_submission() {
        Submission::Text(_) => Submission::Parts(Default::default()),
        Submission::Parts(_) => Submission::Text("x".into()),
      };
      assert!(!check_answer(&q, &wrong).is_correct, "{}", info.kind);
    }
  }

  #[test]
  fn empty_answer_grades_incorrect() {
    let mut rng = StdRng::seed_from_u64(9);
    for info in registry::all().iter().filter(|i| !i.kind.is_multi_part()) {
      for _ in 0..50 {
        let q = generate(info.kind, Difficulty::Hard, &mut rng);
        assert!(!check_answer(&q, &Submission::from("")).is_correct, "{q:?}");
      }
    }
  }
}
