//! Monomial formatting and answer normalization.
//!
//! Everything here is pure: same input, same output. Generators use
//! `format_monomial` to build display strings and canonical answers, and the
//! graders compare answers through `normalize_expression`.

use std::fmt;

/// One variable raised to an exponent, e.g. `x³`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Power {
  pub var: char,
  pub exp: u32,
}

impl Power {
  pub fn new(var: char, exp: u32) -> Self {
    Self { var, exp }
  }
}

/// A monomial term: coefficient times an ordered list of powers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term {
  pub coef: i64,
  pub vars: Vec<Power>,
}

impl Term {
  pub fn new(coef: i64, vars: Vec<Power>) -> Self {
    Self { coef, vars }
  }

  /// Single-variable shorthand.
  pub fn single(coef: i64, var: char, exp: u32) -> Self {
    Self { coef, vars: vec![Power::new(var, exp)] }
  }

  /// Sum of all exponents.
  pub fn degree(&self) -> u32 {
    self.vars.iter().map(|p| p.exp).sum()
  }
}

impl fmt::Display for Term {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&format_monomial(self.coef, &self.vars))
  }
}

fn superscript_of(ch: char) -> Option<char> {
  let sup = match ch {
    '0' => '⁰',
    '1' => '¹',
    '2' => '²',
    '3' => '³',
    '4' => '⁴',
    '5' => '⁵',
    '6' => '⁶',
    '7' => '⁷',
    '8' => '⁸',
    '9' => '⁹',
    '-' => '⁻',
    _ => return None,
  };
  Some(sup)
}

fn digit_of_superscript(ch: char) -> Option<char> {
  let digit = match ch {
    '⁰' => '0',
    '¹' => '1',
    '²' => '2',
    '³' => '3',
    '⁴' => '4',
    '⁵' => '5',
    '⁶' => '6',
    '⁷' => '7',
    '⁸' => '8',
    '⁹' => '9',
    _ => return None,
  };
  Some(digit)
}

/// Map digits and '-' to their Unicode superscript forms; other chars pass through.
pub fn to_superscript(text: &str) -> String {
  text.chars().map(|c| superscript_of(c).unwrap_or(c)).collect()
}

/// Variable portion of a monomial (no coefficient). Zero exponents are skipped.
pub fn literal_part(vars: &[Power]) -> String {
  let mut out = String::new();
  for p in vars.iter().filter(|p| p.exp > 0) {
    out.push(p.var);
    if p.exp > 1 {
      out.push_str(&to_superscript(&p.exp.to_string()));
    }
  }
  out
}

/// Canonical display of `coef · vars`.
///
/// A coefficient of 1 is elided and -1 becomes a bare sign, unless no variable
/// is printed, in which case the number itself is shown.
pub fn format_monomial(coef: i64, vars: &[Power]) -> String {
  let mut out = match coef {
    -1 => "-".to_string(),
    1 => String::new(),
    c => c.to_string(),
  };

  let literal = literal_part(vars);
  if literal.is_empty() {
    match out.as_str() {
      "-" => return "-1".into(),
      "" => return "1".into(),
      _ => {}
    }
  }
  out.push_str(&literal);
  out
}

/// Canonical form of a free-text answer, used for equality-based grading.
///
/// Lowercases and drops all whitespace, turns caret exponents (`x^2`) and
/// superscripts (`x²`) into plain digit runs and strips a leading `+`.
/// This is literal comparison, not algebraic equivalence: `2x+3` and `3+2x`
/// stay different.
pub fn normalize_expression(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }
  let mut current: String = input
    .to_lowercase()
    .chars()
    .filter(|c| !c.is_whitespace())
    .collect();

  // Rewrites can expose new matches ("^^2", "++x"); run to a fixed point.
  loop {
    let next = rewrite_once(&current);
    if next == current {
      return current;
    }
    current = next;
  }
}

fn rewrite_once(s: &str) -> String {
  let carets = carets_to_superscript(s);
  let digits: String = carets
    .chars()
    .map(|c| digit_of_superscript(c).unwrap_or(c))
    .collect();
  match digits.strip_prefix('+') {
    Some(rest) => rest.to_string(),
    None => digits,
  }
}

fn carets_to_superscript(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut chars = s.chars().peekable();
  while let Some(c) = chars.next() {
    if c != '^' {
      out.push(c);
      continue;
    }
    let mut exponent = String::new();
    while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
      exponent.push(d);
      chars.next();
    }
    if exponent.is_empty() {
      out.push('^');
    } else {
      out.push_str(&to_superscript(&exponent));
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn format_monomial_elides_unit_coefficients() {
    assert_eq!(format_monomial(1, &[Power::new('x', 2)]), "x²");
    assert_eq!(format_monomial(-1, &[Power::new('x', 1)]), "-x");
    assert_eq!(format_monomial(-7, &[Power::new('x', 1), Power::new('y', 3)]), "-7xy³");
    assert_eq!(format_monomial(12, &[Power::new('a', 10)]), "12a¹⁰");
  }

  #[test]
  fn format_monomial_keeps_number_without_variables() {
    assert_eq!(format_monomial(1, &[]), "1");
    assert_eq!(format_monomial(-1, &[Power::new('x', 0)]), "-1");
    assert_eq!(format_monomial(4, &[Power::new('x', 0)]), "4");
    assert_eq!(format_monomial(0, &[]), "0");
  }

  #[test]
  fn superscript_round_trips_through_normalization() {
    assert_eq!(to_superscript("12-a"), "¹²⁻a");
    assert_eq!(normalize_expression(&to_superscript("2047")), "2047");
  }

  #[test]
  fn caret_and_superscript_notations_agree() {
    assert_eq!(normalize_expression("x^2"), normalize_expression("x²"));
    assert_eq!(normalize_expression("X²"), normalize_expression("x²"));
    assert_eq!(normalize_expression("x^2y^3"), normalize_expression("x²y³"));
    assert_eq!(normalize_expression("x^12"), "x12");
  }

  #[test]
  fn whitespace_and_leading_plus_are_ignored() {
    assert_eq!(normalize_expression(" +3x "), normalize_expression("3x"));
    assert_eq!(normalize_expression("x² + 8x + 16"), "x2+8x+16");
    assert_eq!(normalize_expression(""), "");
    assert_eq!(normalize_expression("   "), "");
  }

  #[test]
  fn caret_without_digits_is_kept() {
    assert_eq!(normalize_expression("x^y"), "x^y");
    assert_eq!(normalize_expression("x^"), "x^");
  }

  #[test]
  fn term_order_still_matters() {
    assert_ne!(normalize_expression("2x+3"), normalize_expression("3+2x"));
  }

  #[test]
  fn normalization_is_idempotent() {
    let samples = [
      "x^2", " +3x ", "++x", "^^2", "x^²", "(X + 5)(x - 5)", "P(x) = 2x² - 3x + 1",
      "no es pot", "+", "⁻²", "a^^^3b", "  +  + 4 ",
    ];
    for s in samples {
      let once = normalize_expression(s);
      assert_eq!(normalize_expression(&once), once, "input {s:?}");
    }
  }

  #[test]
  fn term_reports_degree_and_display() {
    let t = Term::new(-3, vec![Power::new('x', 2), Power::new('y', 1)]);
    assert_eq!(t.degree(), 3);
    assert_eq!(t.to_string(), "-3x²y");
    assert_eq!(Term::single(1, 'x', 1).to_string(), "x");
  }
}
