//! Loading service settings (exam rules + question store) from TOML.
//!
//! Every field is optional; anything missing keeps its default. Example:
//!
//! ```toml
//! [exam]
//! question_count = 12
//! time_limit_secs = 600
//! difficulty = "hard"
//! exclude = ["polynomial-eval"]
//!
//! [store]
//! max_questions = 5000
//! ```

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{Difficulty, ExerciseKind};

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Settings {
  #[serde(default)]
  pub exam: ExamSettings,
  #[serde(default)]
  pub store: StoreSettings,
}

/// Rules for timed exams.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExamSettings {
  pub question_count: usize,
  pub time_limit_secs: u64,
  pub difficulty: Difficulty,
  /// Kinds never drawn for exams. Multi-part kinds are always left out.
  pub exclude: Vec<ExerciseKind>,
}

impl Default for ExamSettings {
  fn default() -> Self {
    Self {
      question_count: 10,
      time_limit_secs: 15 * 60,
      difficulty: Difficulty::Medium,
      exclude: Vec::new(),
    }
  }
}

/// Bounds for the in-memory question store.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreSettings {
  pub max_questions: usize,
}

impl Default for StoreSettings {
  fn default() -> Self {
    Self { max_questions: 10_000 }
  }
}

pub fn parse_settings(s: &str) -> Result<Settings, toml::de::Error> {
  toml::from_str::<Settings>(s)
}

/// Attempt to load `Settings` from ALGEBRA_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_settings_from_env() -> Option<Settings> {
  let path = std::env::var("ALGEBRA_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_settings(&s) {
      Ok(cfg) => {
        info!(target: "algebra_trainer", %path, "Loaded settings (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "algebra_trainer", %path, error = %e, "Failed to parse TOML settings");
        None
      }
    },
    Err(e) => {
      error!(target: "algebra_trainer", %path, error = %e, "Failed to read TOML settings file");
      None
    }
  }
}
