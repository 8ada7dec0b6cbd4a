//! # Cache Path Construction
//!
//! Pure helpers mapping a `(window, user, suffix)` cache key to its
//! deterministic location on disk, plus the multi-directory search used to
//! locate both configuration and cached data files.
//!
//! The layout is `<data-root>/<YYYY>/<Mon>/<YYYY>.<M>.<D>-<span>.<user><suffix>`,
//! e.g. `2016/Mar/2016.3.1-31.alice.yaml`. The directory component depends
//! only on the window; the file name additionally encodes the span and user,
//! so every source kind shares the same construction and differs only in the
//! suffix.

use std::path::{Path, PathBuf};

use chrono::Datelike;

use crate::report::window::TimeWindow;

/// Report-period subdirectory for a window: `<YYYY>/<Mon>`.
pub fn report_subdir(window: &TimeWindow) -> PathBuf {
    PathBuf::from(window.start.format("%Y").to_string())
        .join(window.start.format("%b").to_string())
}

/// Cache file name for a `(window, user, suffix)` key:
/// `<YYYY>.<M>.<D>-<span_days>.<user><suffix>`.
pub fn cache_file_name(window: &TimeWindow, user: &str, suffix: &str) -> String {
    format!(
        "{}.{}.{}-{}.{}{}",
        window.start.year(),
        window.start.month(),
        window.start.day(),
        window.span_days(),
        user,
        suffix
    )
}

/// Full cache path for a key, relative to a data root.
pub fn cache_rel_path(window: &TimeWindow, user: &str, suffix: &str) -> PathBuf {
    report_subdir(window).join(cache_file_name(window, user, suffix))
}

/// Expands a leading `~` to the user's home directory.
pub fn expand_user(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// # File In Paths
///
/// Searches `paths` in order for an existing entry at the relative location
/// `file`, expanding `~` in each base. Returns the absolute location of the
/// first match, or `None` when no candidate exists.
pub fn file_in_paths(file: &Path, paths: &[String]) -> Option<PathBuf> {
    for base in paths {
        let candidate = expand_user(base).join(file);
        if candidate.exists() {
            return Some(candidate.canonicalize().unwrap_or(candidate));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn march_2016() -> TimeWindow {
        TimeWindow::new(
            NaiveDate::from_ymd_opt(2016, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2016, 3, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn rel_path_matches_expected_layout() {
        let w = march_2016();
        assert_eq!(
            cache_rel_path(&w, "alice", ".yaml"),
            PathBuf::from("2016/Mar/2016.3.1-31.alice.yaml")
        );
        assert_eq!(
            cache_rel_path(&w, "alice", ".open.yaml"),
            PathBuf::from("2016/Mar/2016.3.1-31.alice.open.yaml")
        );
    }

    #[test]
    fn path_construction_is_deterministic() {
        let w = march_2016();
        assert_eq!(
            cache_rel_path(&w, "bob", ".yaml"),
            cache_rel_path(&w, "bob", ".yaml")
        );
    }

    #[test]
    fn subdir_uses_month_abbreviation() {
        let w = TimeWindow::new(
            NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        )
        .unwrap();
        assert_eq!(report_subdir(&w), PathBuf::from("2023/Dec"));
    }

    #[test]
    fn file_in_paths_honors_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(first.path().join("hit"), "1").unwrap();
        std::fs::write(second.path().join("hit"), "2").unwrap();

        let paths = vec![
            first.path().to_string_lossy().into_owned(),
            second.path().to_string_lossy().into_owned(),
        ];
        let found = file_in_paths(Path::new("hit"), &paths).unwrap();
        assert_eq!(std::fs::read_to_string(found).unwrap(), "1");
    }

    #[test]
    fn file_in_paths_misses_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![dir.path().to_string_lossy().into_owned()];
        assert!(file_in_paths(Path::new("absent"), &paths).is_none());
    }
}
