//! Expand a notable identity: (ax ± b)² or (ax + b)(ax - b).

use rand::seq::SliceRandom;
use rand::Rng;

use crate::algebra::{format_monomial, Power};
use crate::domain::{Difficulty, ExerciseKind, ExerciseResult, Question, Submission};
use crate::exercises::{check_normalized, Identity};
use crate::util::random_int;

pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Question {
  let identity = Identity::ALL.choose(rng).copied().unwrap_or(Identity::SumSquared);
  let a = if difficulty == Difficulty::Hard { random_int(rng, 2, 4) } else { 1 };
  let b = random_int(rng, 2, 6);
  build(identity, a, b)
}

/// Expansion of `identity` with first term `a·x` and second term `b` (both positive).
pub fn build(identity: Identity, a: i64, b: i64) -> Question {
  let a_str = format_monomial(a, &[Power::new('x', 1)]);
  let square = format_monomial(a * a, &[Power::new('x', 2)]);
  let cross = format_monomial(2 * a * b, &[Power::new('x', 1)]);
  let b_sq = b * b;

  let (display, answer) = match identity {
    Identity::SumSquared => (format!("({a_str} + {b})²"), format!("{square} + {cross} + {b_sq}")),
    Identity::DifferenceSquared => (format!("({a_str} - {b})²"), format!("{square} - {cross} + {b_sq}")),
    Identity::SumTimesDifference => (format!("({a_str} + {b})({a_str} - {b})"), format!("{square} - {b_sq}")),
  };

  let mut hints = vec![identity.formula().to_string()];
  if identity != Identity::SumTimesDifference {
    hints.push(format!("a = {a_str}, b = {b}"));
  }

  Question::new(ExerciseKind::IdentityExpand, display, answer).with_hints(hints)
}

pub fn check_answer(question: &Question, submission: &Submission) -> ExerciseResult {
  check_normalized(question, submission)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};

  #[test]
  fn sum_squared_with_bare_x() {
    let q = build(Identity::SumSquared, 1, 4);
    assert_eq!(q.display, "(x + 4)²");
    assert_eq!(q.answer, "x² + 8x + 16");
    assert!(check_answer(&q, &Submission::from("x^2+8x+16")).is_correct);
    assert!(!check_answer(&q, &Submission::from("16 + 8x + x^2")).is_correct);
    assert_eq!(q.hints, vec!["(a+b)² = a² + 2ab + b²".to_string(), "a = x, b = 4".to_string()]);
  }

  #[test]
  fn difference_squared_with_leading_coefficient() {
    let q = build(Identity::DifferenceSquared, 3, 2);
    assert_eq!(q.display, "(3x - 2)²");
    assert_eq!(q.answer, "9x² - 12x + 4");
  }

  #[test]
  fn sum_times_difference() {
    let q = build(Identity::SumTimesDifference, 2, 5);
    assert_eq!(q.display, "(2x + 5)(2x - 5)");
    assert_eq!(q.answer, "4x² - 25");
    assert_eq!(q.hints.len(), 1);
  }

  #[test]
  fn leading_coefficient_only_on_hard() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..100 {
      let easy = generate(Difficulty::Medium, &mut rng);
      assert!(easy.display.starts_with("(x "), "{}", easy.display);
      let hard = generate(Difficulty::Hard, &mut rng);
      assert!(!hard.display.starts_with("(x "), "{}", hard.display);
    }
  }
}
