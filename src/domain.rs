//! Domain models: difficulty, categories, icons, exercise kinds, questions and results.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How hard a generated exercise is. Drives value ranges and variable sets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  #[default]
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

  pub fn as_str(self) -> &'static str {
    match self {
      Difficulty::Easy => "easy",
      Difficulty::Medium => "medium",
      Difficulty::Hard => "hard",
    }
  }
}

impl fmt::Display for Difficulty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Home-page grouping of exercises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Monomials,
  Identities,
  Polynomials,
}

impl Category {
  pub const ALL: [Category; 3] = [Category::Monomials, Category::Identities, Category::Polynomials];
}

/// Closed set of icons a client can render for an exercise card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
  Target,
  Calculator,
  Maximize,
  Minimize,
  FunctionSquare,
  BookOpen,
}

impl Icon {
  pub fn as_str(self) -> &'static str {
    match self {
      Icon::Target => "target",
      Icon::Calculator => "calculator",
      Icon::Maximize => "maximize",
      Icon::Minimize => "minimize",
      Icon::FunctionSquare => "function-square",
      Icon::BookOpen => "book-open",
    }
  }

  /// Resolve an icon by name. Unknown names get `BookOpen`.
  pub fn from_name(name: &str) -> Icon {
    match name.trim().to_ascii_lowercase().as_str() {
      "target" => Icon::Target,
      "calculator" => Icon::Calculator,
      "maximize" => Icon::Maximize,
      "minimize" => Icon::Minimize,
      "function-square" | "functionsquare" => Icon::FunctionSquare,
      _ => Icon::BookOpen,
    }
  }
}

/// Type tag of an exercise. Every `Question` carries one; grading dispatches on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
  MonomialParts,
  MonomialOps,
  IdentityExpand,
  IdentityFactor,
  PolynomialEval,
}

impl ExerciseKind {
  pub fn id(self) -> &'static str {
    match self {
      ExerciseKind::MonomialParts => "monomial-parts",
      ExerciseKind::MonomialOps => "monomial-ops",
      ExerciseKind::IdentityExpand => "identity-expand",
      ExerciseKind::IdentityFactor => "identity-factor",
      ExerciseKind::PolynomialEval => "polynomial-eval",
    }
  }

  /// Whether answers come as several named fields instead of one string.
  pub fn is_multi_part(self) -> bool {
    matches!(self, ExerciseKind::MonomialParts)
  }
}

impl fmt::Display for ExerciseKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.id())
  }
}

impl FromStr for ExerciseKind {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "monomial-parts" => Ok(ExerciseKind::MonomialParts),
      "monomial-ops" => Ok(ExerciseKind::MonomialOps),
      "identity-expand" => Ok(ExerciseKind::IdentityExpand),
      "identity-factor" => Ok(ExerciseKind::IdentityFactor),
      "polynomial-eval" => Ok(ExerciseKind::PolynomialEval),
      other => Err(format!("unknown exercise kind: {other}")),
    }
  }
}

/// Per-kind auxiliary data recorded at generation time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionMeta {
  #[default]
  None,
  /// Polynomial evaluation: the substitution point.
  Evaluation { x: i64 },
}

/// A generated exercise instance. Holds everything needed to grade it later.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub id: String,
  pub kind: ExerciseKind,
  pub display: String,
  /// Canonical answer text (for multi-part questions, a readable summary of `parts`).
  pub answer: String,
  #[serde(default)]
  pub hints: Vec<String>,
  /// Expected value per named field, for multi-part answers.
  #[serde(default)]
  pub parts: Option<BTreeMap<String, String>>,
  #[serde(default)]
  pub meta: QuestionMeta,
}

impl Question {
  pub fn new(kind: ExerciseKind, display: impl Into<String>, answer: impl Into<String>) -> Self {
    Self {
      id: Uuid::new_v4().to_string(),
      kind,
      display: display.into(),
      answer: answer.into(),
      hints: Vec::new(),
      parts: None,
      meta: QuestionMeta::None,
    }
  }

  pub fn with_hints<I, S>(mut self, hints: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.hints = hints.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_parts(mut self, parts: BTreeMap<String, String>) -> Self {
    self.parts = Some(parts);
    self
  }

  pub fn with_meta(mut self, meta: QuestionMeta) -> Self {
    self.meta = meta;
    self
  }

  /// The answer a perfect student would submit.
  pub fn expected_submission(&self) -> Submission {
    match &self.parts {
      Some(parts) => Submission::Parts(parts.clone()),
      None => Submission::Text(self.answer.clone()),
    }
  }
}

/// What the user handed in: one string, or named sub-fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Submission {
  Text(String),
  Parts(BTreeMap<String, String>),
}

impl Submission {
  /// Flat rendering for logs and result echoes.
  pub fn summary(&self) -> String {
    match self {
      Submission::Text(t) => t.clone(),
      Submission::Parts(parts) => parts
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(", "),
    }
  }
}

impl From<&str> for Submission {
  fn from(s: &str) -> Self {
    Submission::Text(s.to_string())
  }
}

/// Outcome of one grading call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseResult {
  pub is_correct: bool,
  pub user_answer: String,
  pub correct_answer: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub feedback: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn icon_lookup_falls_back_to_default() {
    assert_eq!(Icon::from_name("Target"), Icon::Target);
    assert_eq!(Icon::from_name("function-square"), Icon::FunctionSquare);
    assert_eq!(Icon::from_name("sparkles"), Icon::BookOpen);
    assert_eq!(Icon::from_name(Icon::Minimize.as_str()), Icon::Minimize);
  }

  #[test]
  fn exercise_kind_ids_round_trip() {
    for kind in [
      ExerciseKind::MonomialParts,
      ExerciseKind::MonomialOps,
      ExerciseKind::IdentityExpand,
      ExerciseKind::IdentityFactor,
      ExerciseKind::PolynomialEval,
    ] {
      assert_eq!(kind.id().parse::<ExerciseKind>(), Ok(kind));
      let json = serde_json::to_string(&kind).expect("serialize");
      assert_eq!(json, format!("\"{}\"", kind.id()));
    }
    assert!("nope".parse::<ExerciseKind>().is_err());
  }

  #[test]
  fn submission_deserializes_untagged() {
    let text: Submission = serde_json::from_str("\"x^2\"").expect("text");
    assert_eq!(text, Submission::Text("x^2".into()));
    let parts: Submission = serde_json::from_str(r#"{"coef":"5","degree":"2"}"#).expect("parts");
    assert_eq!(parts.summary(), "coef: 5, degree: 2");
  }

  #[test]
  fn question_meta_is_tagged() {
    let json = serde_json::to_value(QuestionMeta::Evaluation { x: -2 }).expect("serialize");
    assert_eq!(json, serde_json::json!({ "kind": "evaluation", "x": -2 }));
    assert_eq!(Difficulty::default(), Difficulty::Easy);
  }
}
