//! Add, subtract or multiply two monomials.

use std::collections::BTreeMap;

use rand::Rng;

use crate::algebra::{format_monomial, literal_part, Power, Term};
use crate::domain::{Difficulty, ExerciseKind, ExerciseResult, Question, Submission};
use crate::exercises::{check_normalized, text_result};
use crate::util::{random_coefficient, random_int, DEFAULT_COEF_RANGE};

/// Recorded answer for sums of unlike terms.
pub const NOT_COMBINABLE: &str = "not-combinable";

const NOT_COMBINABLE_TEXT: &str = "Not possible (different literal parts)";

/// Words that count as "cannot be done" for unlike terms. Substring match, case-insensitive.
const REFUSAL_WORDS: [&str; 2] = ["no", "impossible"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
  Add,
  Sub,
}

impl Op {
  pub fn symbol(self) -> &'static str {
    match self {
      Op::Add => "+",
      Op::Sub => "-",
    }
  }
}

pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Question {
  if rng.gen_bool(0.4) {
    let like_terms = rng.gen_bool(0.7);
    let exp = random_int(rng, 1, 3) as u32;
    let m1 = Term::single(random_coefficient(rng, DEFAULT_COEF_RANGE), 'x', exp);
    let m2 = Term::single(
      random_coefficient(rng, DEFAULT_COEF_RANGE),
      'x',
      if like_terms { exp } else { exp + 1 },
    );
    let op = if rng.gen_bool(0.5) { Op::Add } else { Op::Sub };
    build_sum(&m1, &m2, op)
  } else {
    let m1 = Term::single(random_coefficient(rng, 5), 'x', random_int(rng, 1, 3) as u32);
    let mut m2 = Term::single(random_coefficient(rng, 5), 'x', random_int(rng, 1, 3) as u32);
    if difficulty != Difficulty::Easy {
      m2.vars.push(Power::new('y', random_int(rng, 1, 2) as u32));
    }
    build_product(&m1, &m2)
  }
}

/// `m1 ± m2`. Only terms with the same literal part combine.
pub fn build_sum(m1: &Term, m2: &Term, op: Op) -> Question {
  let rhs = if m2.coef < 0 { format!("({m2})") } else { m2.to_string() };
  let display = format!("{m1} {} {rhs}", op.symbol());

  let answer = if literal_part(&m1.vars) != literal_part(&m2.vars) {
    NOT_COMBINABLE.to_string()
  } else {
    let coef = match op {
      Op::Add => m1.coef + m2.coef,
      Op::Sub => m1.coef - m2.coef,
    };
    if coef == 0 { "0".to_string() } else { format_monomial(coef, &m1.vars) }
  };

  Question::new(ExerciseKind::MonomialOps, display, answer)
    .with_hints(["Only monomials with the same literal part can be added or subtracted."])
}

/// `m1 · m2`: coefficients multiply, exponents of the same variable add up.
pub fn build_product(m1: &Term, m2: &Term) -> Question {
  let display = format!("({m1}) · ({m2})");

  let mut exps: BTreeMap<char, u32> = BTreeMap::new();
  for p in m1.vars.iter().chain(&m2.vars) {
    *exps.entry(p.var).or_default() += p.exp;
  }
  let vars: Vec<Power> = exps.into_iter().map(|(var, exp)| Power::new(var, exp)).collect();
  let answer = format_monomial(m1.coef * m2.coef, &vars);

  Question::new(ExerciseKind::MonomialOps, display, answer)
    .with_hints(["Multiply the coefficients and add the exponents of equal letters."])
}

pub fn check_answer(question: &Question, submission: &Submission) -> ExerciseResult {
  if question.answer != NOT_COMBINABLE {
    return check_normalized(question, submission);
  }

  let is_correct = match submission {
    Submission::Text(text) => {
      let lower = text.to_lowercase();
      REFUSAL_WORDS.iter().any(|w| lower.contains(*w))
    }
    Submission::Parts(_) => false,
  };
  let mut result = text_result(question, submission, is_correct, None);
  result.correct_answer = NOT_COMBINABLE_TEXT.into();
  result
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};

  fn grade(q: &Question, answer: &str) -> bool {
    check_answer(q, &Submission::from(answer)).is_correct
  }

  #[test]
  fn like_terms_combine() {
    let m1 = Term::single(3, 'x', 2);
    let m2 = Term::single(2, 'x', 2);

    let sum = build_sum(&m1, &m2, Op::Add);
    assert_eq!(sum.display, "3x² + 2x²");
    assert_eq!(sum.answer, "5x²");
    assert!(grade(&sum, "5x^2"));

    let diff = build_sum(&m1, &m2, Op::Sub);
    assert_eq!(diff.answer, "x²");
    assert!(grade(&diff, "x²"));
    assert!(!grade(&diff, "1x"));
  }

  #[test]
  fn cancelling_terms_give_zero() {
    let q = build_sum(&Term::single(4, 'x', 1), &Term::single(4, 'x', 1), Op::Sub);
    assert_eq!(q.answer, "0");
    assert!(grade(&q, " 0 "));
  }

  #[test]
  fn negative_second_term_is_parenthesized() {
    let q = build_sum(&Term::single(3, 'x', 1), &Term::single(-2, 'x', 1), Op::Sub);
    assert_eq!(q.display, "3x - (-2x)");
    assert_eq!(q.answer, "5x");
  }

  #[test]
  fn unlike_terms_accept_refusal_words() {
    let q = build_sum(&Term::single(3, 'x', 2), &Term::single(2, 'x', 3), Op::Add);
    assert_eq!(q.answer, NOT_COMBINABLE);
    assert!(grade(&q, "no"));
    assert!(grade(&q, "It is IMPOSSIBLE"));
    assert!(grade(&q, "No es pot"));
    assert!(!grade(&q, "5x²"));

    let res = check_answer(&q, &Submission::from("5x²"));
    assert_eq!(res.correct_answer, NOT_COMBINABLE_TEXT);
  }

  #[test]
  fn product_merges_and_sorts_variables() {
    let m1 = Term::single(-2, 'x', 2);
    let m2 = Term::new(3, vec![Power::new('x', 1), Power::new('y', 2)]);
    let q = build_product(&m1, &m2);
    assert_eq!(q.display, "(-2x²) · (3xy²)");
    assert_eq!(q.answer, "-6x³y²");
    assert!(grade(&q, "-6x^3y^2"));
    assert!(!grade(&q, "-6y^2x^3"));

    let q = build_product(&Term::single(-1, 'x', 1), &Term::single(1, 'x', 1));
    assert_eq!(q.answer, "-x²");
  }

  #[test]
  fn easy_products_use_only_x() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..200 {
      let q = generate(Difficulty::Easy, &mut rng);
      assert!(!q.display.contains('y'), "{}", q.display);
    }
  }
}
