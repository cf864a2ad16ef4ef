//! The fixed exercise catalog. Order is stable and drives home-page listing.

use crate::domain::{Category, ExerciseKind, Icon};

/// Catalog entry describing one exercise kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExerciseInfo {
  pub kind: ExerciseKind,
  pub title: &'static str,
  pub description: &'static str,
  pub icon: Icon,
  pub category: Category,
}

impl ExerciseInfo {
  pub fn id(&self) -> &'static str {
    self.kind.id()
  }
}

static EXERCISES: [ExerciseInfo; 5] = [
  ExerciseInfo {
    kind: ExerciseKind::MonomialParts,
    title: "Parts of a monomial",
    description: "Identify the coefficient, the literal part and the degree.",
    icon: Icon::Target,
    category: Category::Monomials,
  },
  ExerciseInfo {
    kind: ExerciseKind::MonomialOps,
    title: "Add, subtract and multiply",
    description: "Solve basic operations with monomials.",
    icon: Icon::Calculator,
    category: Category::Monomials,
  },
  ExerciseInfo {
    kind: ExerciseKind::IdentityExpand,
    title: "Expand identities",
    description: "(a+b)², (a-b)², (a+b)(a-b)",
    icon: Icon::Maximize,
    category: Category::Identities,
  },
  ExerciseInfo {
    kind: ExerciseKind::IdentityFactor,
    title: "Factor identities",
    description: "Find the original expression: a² + 2ab + b² = (a+b)²",
    icon: Icon::Minimize,
    category: Category::Identities,
  },
  ExerciseInfo {
    kind: ExerciseKind::PolynomialEval,
    title: "Numeric value",
    description: "Compute P(x) for a given value.",
    icon: Icon::FunctionSquare,
    category: Category::Polynomials,
  },
];

/// Every exercise, in catalog order.
pub fn all() -> &'static [ExerciseInfo] {
  &EXERCISES
}

/// Exact lookup by exercise id (e.g. "identity-factor").
pub fn find(id: &str) -> Option<&'static ExerciseInfo> {
  EXERCISES.iter().find(|e| e.id() == id)
}

/// Catalog entry for a kind. Every kind is registered.
pub fn info(kind: ExerciseKind) -> &'static ExerciseInfo {
  EXERCISES
    .iter()
    .find(|e| e.kind == kind)
    .unwrap_or(&EXERCISES[0])
}

/// Exercises of one category, in catalog order. May be empty.
pub fn by_category(category: Category) -> Vec<&'static ExerciseInfo> {
  EXERCISES.iter().filter(|e| e.category == category).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn ids_are_unique() {
    let ids: HashSet<&str> = all().iter().map(|e| e.id()).collect();
    assert_eq!(ids.len(), all().len());
  }

  #[test]
  fn categories_partition_the_catalog() {
    let mut seen = Vec::new();
    for c in Category::ALL {
      seen.extend(by_category(c).into_iter().map(|e| e.kind));
    }
    assert_eq!(seen.len(), all().len());
    for e in all() {
      assert_eq!(seen.iter().filter(|k| **k == e.kind).count(), 1, "{}", e.id());
    }
  }

  #[test]
  fn lookup_by_id_and_category() {
    assert_eq!(find("polynomial-eval").map(|e| e.category), Some(Category::Polynomials));
    assert!(find("polinomis-eval").is_none());
    assert!(find("").is_none());

    let identities: Vec<&str> = by_category(Category::Identities).iter().map(|e| e.id()).collect();
    assert_eq!(identities, vec!["identity-expand", "identity-factor"]);
    assert_eq!(info(ExerciseKind::IdentityFactor).icon, Icon::Minimize);
  }
}
