//! `qs-eval`: batch evaluation of decision policies.
//!
//! Loads instances from JSON files ([`loader`]), runs each one in a `Test`
//! mode environment, writes and validates the schedule of every run, and
//! averages the run scores ([`batch`]).  A single invalid schedule makes the
//! whole batch fail with [`SENTINEL_SCORE`].
//!
//! # Features
//!
//! | Feature    | Effect                                          |
//! |------------|-------------------------------------------------|
//! | `parallel` | evaluate instances concurrently on rayon        |

pub mod batch;
pub mod error;
pub mod loader;


pub use batch::{
    BatchConfig, BatchFailure, BatchReport, RunReport, RunScorer, SENTINEL_SCORE,
    TotalRewardScorer, evaluate_batch, run_to_file,
};
pub use error::{EvalError, EvalResult};
pub use loader::{InstancePaths, load_instance, load_json, save_instance};
