use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

/// Overrides the data directory when set.
pub const HOME_ENV: &str = "ASSESSMENT_HOME";

const DEFAULT_DIR_NAME: &str = ".assessment_core";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const PENDING_FILE: &str = "pending_assessment.json";
const SUBMISSIONS_FILE: &str = "submissions.json";

/// Returns the application data directory, defaulting to `~/.assessment_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(app_data_dir)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Snapshot of the form kept across the checkout round trip.
pub fn pending_file_in(base: &Path) -> PathBuf {
    base.join(PENDING_FILE)
}

/// Idempotency keys of returns that were already processed.
pub fn submissions_file_in(base: &Path) -> PathBuf {
    base.join(SUBMISSIONS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_the_base() {
        let base = Path::new("/tmp/assessment");
        assert_eq!(
            config_file_in(base),
            Path::new("/tmp/assessment/config/config.json")
        );
        assert_eq!(
            pending_file_in(base),
            Path::new("/tmp/assessment/pending_assessment.json")
        );
        assert_eq!(
            resolve_base(Some(base.to_path_buf())),
            base.to_path_buf()
        );
    }
}
