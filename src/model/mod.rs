//! Inventory data model.
//!
//! Applications, their dependencies and rule bundles, as exported by the
//! inventory REST API (camelCase JSON). All collections are loaded from
//! files through [`load_json`].
//!
//! ```no_run
//! use std::path::Path;
//! use migration_planner::model::{Application, load_json};
//!
//! let apps: Vec<Application> = load_json(Path::new("applications.json"))?;
//! println!("{} applications", apps.len());
//! # Ok::<(), migration_planner::PlannerError>(())
//! ```

mod application;
mod bundle;
mod dependency;

pub use application::*;
pub use bundle::*;
pub use dependency::*;

use crate::error::{ErrorContext, PlannerError, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Upper bound on export file size.
pub const MAX_EXPORT_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Read and deserialize a JSON export.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let metadata = std::fs::metadata(path).map_err(|e| PlannerError::io(path, e))?;
    if metadata.len() > MAX_EXPORT_FILE_SIZE {
        return Err(PlannerError::validation(format!(
            "{} is {} MB, exceeding the {} MB limit",
            path.display(),
            metadata.len() / (1024 * 1024),
            MAX_EXPORT_FILE_SIZE / (1024 * 1024),
        )));
    }
    let content = std::fs::read_to_string(path).map_err(|e| PlannerError::io(path, e))?;
    let value = serde_json::from_str(&content)
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "loaded export");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_json_reports_path_on_bad_content() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "[{{\"id\": 1,").expect("write");

        let err = load_json::<Vec<Application>>(file.path()).unwrap_err();
        assert!(matches!(err, PlannerError::Load { .. }));
        assert!(err.to_string().contains("reading"));
    }

    #[test]
    fn test_load_json_missing_file_is_io_error() {
        let err = load_json::<Vec<Application>>(Path::new("/nonexistent/apps.json")).unwrap_err();
        assert!(matches!(err, PlannerError::Io { .. }));
    }
}
