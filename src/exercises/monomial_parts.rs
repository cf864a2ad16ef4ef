//! Identify the coefficient, literal part and degree of a monomial.

use std::collections::BTreeMap;

use rand::Rng;

use crate::algebra::{format_monomial, literal_part, normalize_expression, Power};
use crate::domain::{Difficulty, ExerciseKind, ExerciseResult, Question, Submission};
use crate::util::{random_coefficient, random_int};

pub const FIELD_COEF: &str = "coef";
pub const FIELD_LITERAL: &str = "literal";
pub const FIELD_DEGREE: &str = "degree";

pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Question {
  let easy = difficulty == Difficulty::Easy;
  let coef = random_coefficient(rng, if easy { 9 } else { 19 });
  let names: &[char] = if easy { &['x'] } else { &['x', 'y'] };
  let max_exp = if easy { 3 } else { 5 };
  let vars: Vec<Power> = names
    .iter()
    .map(|&v| Power::new(v, random_int(rng, 1, max_exp) as u32))
    .collect();
  build(coef, &vars)
}

/// Question for the monomial `coef · vars`.
pub fn build(coef: i64, vars: &[Power]) -> Question {
  let literal = literal_part(vars);
  let degree: u32 = vars.iter().map(|p| p.exp).sum();

  let parts = BTreeMap::from([
    (FIELD_COEF.to_string(), coef.to_string()),
    (FIELD_LITERAL.to_string(), literal.clone()),
    (FIELD_DEGREE.to_string(), degree.to_string()),
  ]);
  let summary = format!("coefficient {coef}, literal part {literal}, degree {degree}");

  Question::new(ExerciseKind::MonomialParts, format_monomial(coef, vars), summary)
    .with_hints([
      "The coefficient is the number in front, including its sign.",
      "The degree is the sum of all the exponents.",
    ])
    .with_parts(parts)
}

pub fn check_answer(question: &Question, submission: &Submission) -> ExerciseResult {
  let (Some(expected), Submission::Parts(given)) = (&question.parts, submission) else {
    return ExerciseResult {
      is_correct: false,
      user_answer: submission.summary(),
      correct_answer: question.answer.clone(),
      feedback: Some("Fill in the coefficient, literal part and degree separately.".into()),
    };
  };

  let field = |m: &BTreeMap<String, String>, k: &str| m.get(k).map(|s| s.trim().to_string()).unwrap_or_default();

  let coef_ok = field(given, FIELD_COEF) == field(expected, FIELD_COEF);
  let literal_ok =
    normalize_expression(&field(given, FIELD_LITERAL)) == normalize_expression(&field(expected, FIELD_LITERAL));
  let degree_ok = field(given, FIELD_DEGREE) == field(expected, FIELD_DEGREE);

  let feedback = if !coef_ok {
    "Wrong coefficient."
  } else if !literal_ok {
    "Wrong literal part."
  } else if !degree_ok {
    "Wrong degree."
  } else {
    "Correct!"
  };

  ExerciseResult {
    is_correct: coef_ok && literal_ok && degree_ok,
    user_answer: submission.summary(),
    correct_answer: question.answer.clone(),
    feedback: Some(feedback.into()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};

  fn parts(coef: &str, literal: &str, degree: &str) -> Submission {
    Submission::Parts(BTreeMap::from([
      (FIELD_COEF.to_string(), coef.to_string()),
      (FIELD_LITERAL.to_string(), literal.to_string()),
      (FIELD_DEGREE.to_string(), degree.to_string()),
    ]))
  }

  #[test]
  fn records_coefficient_literal_and_degree() {
    let q = build(5, &[Power::new('x', 2)]);
    assert_eq!(q.display, "5x²");
    let expected = q.parts.clone().expect("parts");
    assert_eq!(expected[FIELD_COEF], "5");
    assert_eq!(expected[FIELD_LITERAL], "x²");
    assert_eq!(expected[FIELD_DEGREE], "2");
  }

  #[test]
  fn caret_literal_is_accepted() {
    let q = build(5, &[Power::new('x', 2)]);
    let res = check_answer(&q, &parts("5", "x^2", "2"));
    assert!(res.is_correct);
    assert_eq!(res.feedback.as_deref(), Some("Correct!"));
  }

  #[test]
  fn feedback_names_first_failing_field() {
    let q = build(-3, &[Power::new('x', 1), Power::new('y', 4)]);
    assert_eq!(q.display, "-3xy⁴");

    let res = check_answer(&q, &parts("3", "xy", "2"));
    assert!(!res.is_correct);
    assert_eq!(res.feedback.as_deref(), Some("Wrong coefficient."));

    let res = check_answer(&q, &parts("-3", "xy", "5"));
    assert_eq!(res.feedback.as_deref(), Some("Wrong literal part."));

    let res = check_answer(&q, &parts("-3", "x y^4", "4"));
    assert_eq!(res.feedback.as_deref(), Some("Wrong degree."));

    assert!(check_answer(&q, &parts(" -3 ", "XY⁴", "5")).is_correct);
  }

  #[test]
  fn missing_fields_grade_incorrect() {
    let q = build(1, &[Power::new('x', 1)]);
    let only_coef = Submission::Parts(BTreeMap::from([(FIELD_COEF.to_string(), "1".to_string())]));
    assert!(!check_answer(&q, &only_coef).is_correct);
  }

  #[test]
  fn easy_uses_only_x() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
      let q = generate(Difficulty::Easy, &mut rng);
      let literal = &q.parts.as_ref().expect("parts")[FIELD_LITERAL];
      assert!(literal.starts_with('x') && !literal.contains('y'), "{literal}");
      let degree: u32 = q.parts.as_ref().expect("parts")[FIELD_DEGREE].parse().expect("degree");
      assert!((1..=3).contains(&degree));
    }
  }
}
