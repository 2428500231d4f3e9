// src/sources/loader.rs
use crate::utils::error::ScoutError;
use std::fs;
use std::path::Path;

/// Reads one source list into an ordered sequence of usable lines
///
/// Every line is whitespace-trimmed; blank lines and lines whose first
/// character is `#` are dropped. No validation is applied beyond UTF-8
/// text; classification happens later, in the table builder.
///
/// # Arguments
/// * `path` - Path of the feed to read
///
/// # Returns
/// * `Ok(Vec<String>)` - Usable lines in file order
/// * `Err(ScoutError)` - The feed could not be opened or read; this is
///   fatal for the run, a missing feed is never silently skipped
pub fn load_source_list(path: &Path) -> Result<Vec<String>, ScoutError> {
    let raw = fs::read_to_string(path).map_err(|e| ScoutError::SourceList {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_strips_blanks_and_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "pool.example.com:3333\n\n   \n# comment line\n  spaced.example.com:4444  \n"
        )
        .unwrap();

        let lines = load_source_list(file.path()).unwrap();
        assert_eq!(
            lines,
            vec!["pool.example.com:3333", "spaced.example.com:4444"]
        );
    }

    #[test]
    fn test_comment_detection_follows_trimming() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "   # indented comment\nkeep.example.com:1\n").unwrap();

        let lines = load_source_list(file.path()).unwrap();
        assert_eq!(lines, vec!["keep.example.com:1"]);
    }

    #[test]
    fn test_missing_feed_is_fatal() {
        let result = load_source_list(Path::new("/nonexistent/feed.txt"));
        assert!(matches!(result, Err(ScoutError::SourceList { .. })));
    }
}
