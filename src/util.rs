//! Small utility helpers used across modules.

use rand::Rng;

/// Coefficient range used when a generator does not ask for a specific one.
pub const DEFAULT_COEF_RANGE: i64 = 9;

/// Uniform integer in `[min, max]` (both inclusive).
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
  rng.gen_range(min..=max)
}

/// Nonzero coefficient in `[-range, range]`.
///
/// A zero draw becomes 1, so 1 is twice as likely as any other value.
/// Good enough for exercises; not a uniform distribution over nonzero values.
pub fn random_coefficient<R: Rng + ?Sized>(rng: &mut R, range: i64) -> i64 {
  match random_int(rng, -range, range) {
    0 => 1,
    c => c,
  }
}

/// Log-safe truncation for user-provided strings.
/// Cuts on a char boundary so multi-byte superscripts never split.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};

  #[test]
  fn random_int_stays_in_bounds() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
      let v = random_int(&mut rng, -3, 3);
      assert!((-3..=3).contains(&v));
    }
    assert_eq!(random_int(&mut rng, 4, 4), 4);
  }

  #[test]
  fn random_coefficient_is_never_zero() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..1000 {
      let c = random_coefficient(&mut rng, 2);
      assert!(c != 0 && (-2..=2).contains(&c));
    }
    // range 0 can only land on zero, which is remapped
    assert_eq!(random_coefficient(&mut rng, 0), 1);
  }

  #[test]
  fn trunc_for_log_respects_char_boundaries() {
    assert_eq!(trunc_for_log("x²", 10), "x²");
    let long = "x²".repeat(10);
    let cut = trunc_for_log(&long, 2);
    assert!(cut.starts_with('x'));
    assert!(cut.ends_with("(30 bytes total)"));
  }
}
