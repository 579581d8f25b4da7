//! JSON instance loading.
//!
//! An instance `i` is spread over four files in the data directory:
//!
//! | File                       | Contents                                   |
//! |----------------------------|--------------------------------------------|
//! | `timeline_{i}.json`        | `[ArrivalStep]`                            |
//! | `average_matrix_{i}.json`  | `[[f64]]`, one row per server              |
//! | `appointments_{i}.json`    | `[Appointment]` (optional)                 |
//! | `unavailability_{i}.json`  | `[Unavailability]` (optional)              |
//!
//! An instance without a timeline file does not exist; the optional files
//! default to empty when absent.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use qs_core::Instance;

use crate::{EvalError, EvalResult};

/// The four file paths of instance `id` under `dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstancePaths {
    pub timeline:       PathBuf,
    pub average_matrix: PathBuf,
    pub appointments:   PathBuf,
    pub unavailability: PathBuf,
}

impl InstancePaths {
    pub fn new(dir: &Path, id: u32) -> Self {
        Self {
            timeline:       dir.join(format!("timeline_{id}.json")),
            average_matrix: dir.join(format!("average_matrix_{id}.json")),
            appointments:   dir.join(format!("appointments_{id}.json")),
            unavailability: dir.join(format!("unavailability_{id}.json")),
        }
    }
}

/// Deserialize one JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> EvalResult<T> {
    let file = File::open(path).map_err(|source| EvalError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|source| EvalError::Json { path: path.to_path_buf(), source })
}

fn load_optional<T: DeserializeOwned + Default>(path: &Path) -> EvalResult<T> {
    if path.exists() { load_json(path) } else { Ok(T::default()) }
}

/// Load and check instance `id` from `dir`.
///
/// Returns `Ok(None)` when the timeline file is missing.
pub fn load_instance(dir: &Path, id: u32) -> EvalResult<Option<Instance>> {
    let paths = InstancePaths::new(dir, id);
    if !paths.timeline.exists() {
        return Ok(None);
    }

    let instance = Instance {
        timeline:       load_json(&paths.timeline)?,
        average_matrix: load_json(&paths.average_matrix)?,
        appointments:   load_optional(&paths.appointments)?,
        unavailability: load_optional(&paths.unavailability)?,
    };
    instance.check().map_err(|source| EvalError::Instance { id, source })?;
    Ok(Some(instance))
}

/// Write `instance` as the four files of instance `id` under `dir`.
pub fn save_instance(dir: &Path, id: u32, instance: &Instance) -> EvalResult<()> {
    let paths = InstancePaths::new(dir, id);
    save_json(&paths.timeline, &instance.timeline)?;
    save_json(&paths.average_matrix, &instance.average_matrix)?;
    save_json(&paths.appointments, &instance.appointments)?;
    save_json(&paths.unavailability, &instance.unavailability)
}

fn save_json<T: serde::Serialize>(path: &Path, value: &T) -> EvalResult<()> {
    let file = File::create(path).map_err(|source| EvalError::Io { path: path.to_path_buf(), source })?;
    serde_json::to_writer_pretty(file, value)
        .map_err(|source| EvalError::Json { path: path.to_path_buf(), source })
}
