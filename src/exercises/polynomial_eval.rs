//! Evaluate a polynomial P(x) at a given integer point.

use rand::Rng;

use crate::algebra::{format_monomial, Power};
use crate::domain::{Difficulty, ExerciseKind, ExerciseResult, Question, QuestionMeta, Submission};
use crate::exercises::text_result;
use crate::util::{random_coefficient, random_int};

/// One `coef · x^exp` term.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolyTerm {
  pub coef: i64,
  pub exp: u32,
}

pub fn generate<R: Rng + ?Sized>(_difficulty: Difficulty, rng: &mut R) -> Question {
  let count = random_int(rng, 2, 4);
  let terms: Vec<PolyTerm> = (0..count)
    .map(|_| PolyTerm {
      coef: random_coefficient(rng, 5),
      exp: random_int(rng, 0, 3) as u32,
    })
    .collect();
  let x = random_int(rng, -3, 3);
  build(&terms, x)
}

/// Keep the first term seen for each exponent, highest exponent first.
///
/// Later terms sharing an exponent are dropped, not added together.
pub fn canonical_terms(terms: &[PolyTerm]) -> Vec<PolyTerm> {
  let mut kept: Vec<PolyTerm> = Vec::with_capacity(terms.len());
  for t in terms {
    if !kept.iter().any(|k| k.exp == t.exp) {
      kept.push(*t);
    }
  }
  kept.sort_by(|a, b| b.exp.cmp(&a.exp));
  kept
}

/// Display string for a polynomial in `x`, with signs joining the terms.
pub fn format_polynomial(terms: &[PolyTerm]) -> String {
  let mut out = String::new();
  for t in terms.iter().filter(|t| t.coef != 0) {
    let body = format_monomial(t.coef.abs(), &[Power::new('x', t.exp)]);
    match (out.is_empty(), t.coef < 0) {
      (true, true) => out.push('-'),
      (true, false) => {}
      (false, true) => out.push_str(" - "),
      (false, false) => out.push_str(" + "),
    }
    out.push_str(&body);
  }
  if out.is_empty() {
    out.push('0');
  }
  out
}

/// Exact value of the polynomial at `x`.
pub fn evaluate(terms: &[PolyTerm], x: i64) -> i64 {
  terms.iter().map(|t| t.coef * x.pow(t.exp)).sum()
}

/// Evaluation question for `terms` at `x`, after duplicate exponents are dropped.
pub fn build(terms: &[PolyTerm], x: i64) -> Question {
  let terms = canonical_terms(terms);
  let display = format!("P(x) = {}", format_polynomial(&terms));
  let value = evaluate(&terms, x);

  Question::new(ExerciseKind::PolynomialEval, display, value.to_string())
    .with_hints([
      format!("Substitute x = {x}."),
      "Work out the powers first, then the products.".to_string(),
    ])
    .with_meta(QuestionMeta::Evaluation { x })
}

/// Integer comparison: "05" and "+5" match "5"; "5.0" does not parse and grades incorrect.
pub fn check_answer(question: &Question, submission: &Submission) -> ExerciseResult {
  let Submission::Text(text) = submission else {
    return text_result(question, submission, false, None);
  };

  let expected = question.answer.trim().parse::<i64>().ok();
  match text.trim().parse::<i64>() {
    Ok(given) => text_result(question, submission, expected == Some(given), None),
    Err(_) => text_result(
      question,
      submission,
      false,
      Some("Answer must be a whole number.".into()),
    ),
  }
}
