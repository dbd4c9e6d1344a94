use super::types::OUTPUT_EXTENSION;
use crate::modules::error::SplitError;
use std::path::{is_separator, Path, PathBuf};

/// Derives output file names from the configured target and a sequence number.
///
/// `"" + 3` gives `3.csv`, `"custom_filename-" + 1` gives
/// `custom_filename-1.csv` and `"stuff/" + 1` gives `stuff/1.csv`.
#[derive(Debug, Clone)]
pub struct OutputNamer {
    target: String,
}

impl OutputNamer {
    /// Create a namer, failing if the directory part of `target` does not exist
    pub fn new(target: impl Into<String>) -> Result<Self, SplitError> {
        let target = target.into();
        if let Some(dir) = directory_part(&target) {
            if !dir.is_dir() {
                return Err(SplitError::NoSuchDirectory { target });
            }
        }
        Ok(Self { target })
    }

    /// Name for the chunk with the given sequence number
    pub fn name_for(&self, sequence: usize) -> PathBuf {
        PathBuf::from(format!("{}{}{}", self.target, sequence, OUTPUT_EXTENSION))
    }
}

/// Everything up to and including the last separator, if any
fn directory_part(target: &str) -> Option<&Path> {
    let idx = target.rfind(is_separator)?;
    Some(Path::new(&target[..=idx]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_target_names_by_counter_only() {
        let namer = OutputNamer::new("").unwrap();
        assert_eq!(namer.name_for(1), PathBuf::from("1.csv"));
        assert_eq!(namer.name_for(3), PathBuf::from("3.csv"));
        assert_eq!(namer.name_for(10), PathBuf::from("10.csv"));
    }

    #[test]
    fn test_prefix_is_used_verbatim() {
        let namer = OutputNamer::new("custom_filename-").unwrap();
        assert_eq!(namer.name_for(1), PathBuf::from("custom_filename-1.csv"));
        assert_eq!(namer.name_for(2), PathBuf::from("custom_filename-2.csv"));
    }

    #[test]
    fn test_existing_directory_target() {
        let dir = tempdir().unwrap();
        let target = format!("{}/", dir.path().display());
        let namer = OutputNamer::new(target.clone()).unwrap();
        assert_eq!(namer.name_for(1), PathBuf::from(format!("{}1.csv", target)));
        assert_eq!(namer.name_for(1), dir.path().join("1.csv"));
    }

    #[test]
    fn test_directory_with_prefix() {
        let dir = tempdir().unwrap();
        let target = format!("{}/part-", dir.path().display());
        let namer = OutputNamer::new(target).unwrap();
        assert_eq!(namer.name_for(7), dir.path().join("part-7.csv"));
    }

    #[test]
    fn test_missing_directory_is_rejected() {
        let dir = tempdir().unwrap();
        let target = format!("{}/stuff/", dir.path().display());
        let err = OutputNamer::new(target.clone()).unwrap_err();
        assert!(matches!(err, SplitError::NoSuchDirectory { target: ref t } if *t == target));
        assert_eq!(err.to_string(), format!("no such directory: {}", target));
    }

    #[test]
    fn test_directory_part() {
        assert_eq!(directory_part("plain-"), None);
        assert_eq!(directory_part(""), None);
        assert_eq!(directory_part("stuff/"), Some(Path::new("stuff/")));
        assert_eq!(directory_part("a/b/pre-"), Some(Path::new("a/b/")));
        assert_eq!(directory_part("/pre-"), Some(Path::new("/")));
    }
}
