//! Algebra Trainer · exercise generation and grading
//!
//! The library core (`algebra`, `exercises`, `registry`, `exam`) generates
//! algebra exercises, records their canonical answers and grades free-text or
//! multi-field submissions. The service modules wrap it in an axum HTTP +
//! WebSocket API (see `main.rs`).
//!
//! ```
//! use algebra_trainer::domain::{Difficulty, ExerciseKind, Submission};
//! use algebra_trainer::exercises::{check_answer, generate};
//!
//! let q = generate(ExerciseKind::IdentityExpand, Difficulty::Easy, &mut rand::thread_rng());
//! assert!(check_answer(&q, &Submission::Text(q.answer.clone())).is_correct);
//! ```

pub mod algebra;
pub mod config;
pub mod domain;
pub mod error;
pub mod exam;
pub mod exercises;
pub mod logic;
pub mod protocol;
pub mod registry;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod util;
