//! Factor an expanded notable identity back into its product form.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::algebra::normalize_expression;
use crate::domain::{Difficulty, ExerciseKind, ExerciseResult, Question, Submission};
use crate::exercises::{text_result, Identity};
use crate::util::random_int;

pub fn generate<R: Rng + ?Sized>(_difficulty: Difficulty, rng: &mut R) -> Question {
  let identity = Identity::ALL.choose(rng).copied().unwrap_or(Identity::SumSquared);
  build(identity, random_int(rng, 2, 8))
}

/// Factoring exercise for `identity` with `a = x` and constant `b`.
pub fn build(identity: Identity, b: i64) -> Question {
  let b_sq = b * b;
  let two_b = 2 * b;
  let (display, answer) = match identity {
    Identity::SumSquared => (format!("x² + {two_b}x + {b_sq}"), format!("(x+{b})²")),
    Identity::DifferenceSquared => (format!("x² - {two_b}x + {b_sq}"), format!("(x-{b})²")),
    Identity::SumTimesDifference => (format!("x² - {b_sq}"), format!("(x+{b})(x-{b})")),
  };

  Question::new(ExerciseKind::IdentityFactor, display, answer).with_hints([
    "Look for the perfect squares at both ends.",
    "Check the sign of the middle term.",
  ])
}

/// `(p)(q)` becomes `(q)(p)`; anything else has no alternate form.
fn swap_factors(expr: &str) -> Option<String> {
  let inner = expr.strip_prefix('(')?.strip_suffix(')')?;
  let (p, q) = inner.split_once(")(")?;
  if [p, q].iter().any(|f| f.contains('(') || f.contains(')')) {
    return None;
  }
  Some(format!("({q})({p})"))
}

pub fn check_answer(question: &Question, submission: &Submission) -> ExerciseResult {
  let Submission::Text(text) = submission else {
    return text_result(question, submission, false, None);
  };

  let given = normalize_expression(text);
  let expected = normalize_expression(&question.answer);
  let is_correct = given == expected
    || swap_factors(&expected).is_some_and(|alt| normalize_expression(&alt) == given);
  text_result(question, submission, is_correct, None)
}
