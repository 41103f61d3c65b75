use std::path::PathBuf;

/// Returns the root autoclass directory path.
///
/// Resolution order:
/// 1. `AUTOCLASS_ROOT` environment variable (if set)
/// 2. Current working directory + `.autoclass`
pub fn autoclass_root() -> PathBuf {
    if let Ok(root) = std::env::var("AUTOCLASS_ROOT") {
        PathBuf::from(root)
    } else {
        PathBuf::from(".autoclass")
    }
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    autoclass_root().join("config.yaml")
}

/// Returns the directory holding the last-run snapshot.
pub fn snapshot_dir() -> PathBuf {
    autoclass_root().join("snapshot")
}

/// Returns the directory holding contact workbook sheets.
pub fn workbook_dir() -> PathBuf {
    autoclass_root().join("workbook")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_autoclass_root_default() {
        // SAFETY: We use #[serial] to ensure single-threaded access
        unsafe { std::env::remove_var("AUTOCLASS_ROOT") };
        assert_eq!(autoclass_root(), PathBuf::from(".autoclass"));
        assert_eq!(config_path(), PathBuf::from(".autoclass/config.yaml"));
    }

    #[test]
    #[serial]
    fn test_autoclass_root_with_env_var() {
        // SAFETY: We use #[serial] to ensure single-threaded access
        unsafe { std::env::set_var("AUTOCLASS_ROOT", "/custom/path/.autoclass") };
        assert_eq!(autoclass_root(), PathBuf::from("/custom/path/.autoclass"));
        assert_eq!(
            snapshot_dir(),
            PathBuf::from("/custom/path/.autoclass/snapshot")
        );
        assert_eq!(
            workbook_dir(),
            PathBuf::from("/custom/path/.autoclass/workbook")
        );
        unsafe { std::env::remove_var("AUTOCLASS_ROOT") };
    }
}
