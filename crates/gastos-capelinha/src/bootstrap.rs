use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.gastos-capelinha/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.gastos-capelinha/`
/// - `~/.gastos-capelinha/logs/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let app_dir = home.join(".gastos-capelinha");
    std::fs::create_dir_all(&app_dir)?;
    std::fs::create_dir_all(app_dir.join("logs"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
///
/// The `log_file` parameter is accepted for forward-compatibility but file
/// logging is not yet wired – all output currently goes to stderr.
pub fn setup_logging(log_level: &str, _log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let normalised = match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "WARNING" => "warn",
        "ERROR" => "error",
        _ => "info",
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Data-path discovery ────────────────────────────────────────────────────────

/// Attempt to locate the open-data export directory under `base_dir`.
///
/// Checks the following paths in order and returns the first that exists:
/// 1. `data/dadosabertos/2022/`
/// 2. `dadosabertos/2022/`
///
/// Returns `None` when neither path exists.
pub fn discover_data_dir_in(base_dir: &std::path::Path) -> Option<PathBuf> {
    let candidates = [
        base_dir.join("data").join("dadosabertos").join("2022"),
        base_dir.join("dadosabertos").join("2022"),
    ];
    candidates.into_iter().find(|p| p.exists())
}

/// Locate the open-data export directory relative to the working directory.
pub fn discover_data_dir() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    discover_data_dir_in(&cwd)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── test_ensure_directories ───────────────────────────────────────────────

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let result = ensure_directories();

        // Restore HOME.
        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        result.expect("ensure_directories should succeed");

        let app_dir = tmp.path().join(".gastos-capelinha");
        assert!(app_dir.is_dir(), ".gastos-capelinha dir must exist");
        assert!(app_dir.join("logs").is_dir(), "logs subdir must exist");
    }

    // ── test_discover_data_dir ────────────────────────────────────────────────

    #[test]
    fn test_discover_data_dir_returns_none_when_absent() {
        let tmp = TempDir::new().expect("tempdir");
        assert!(
            discover_data_dir_in(tmp.path()).is_none(),
            "should return None when neither candidate exists"
        );
    }

    #[test]
    fn test_discover_data_dir_finds_data_dadosabertos() {
        let tmp = TempDir::new().expect("tempdir");
        let dir = tmp.path().join("data").join("dadosabertos").join("2022");
        std::fs::create_dir_all(&dir).expect("create data dir");

        assert_eq!(discover_data_dir_in(tmp.path()), Some(dir));
    }

    #[test]
    fn test_discover_data_dir_falls_back_to_bare_dadosabertos() {
        let tmp = TempDir::new().expect("tempdir");
        // Create only the bare candidate (not the data/ one).
        let dir = tmp.path().join("dadosabertos").join("2022");
        std::fs::create_dir_all(&dir).expect("create data dir");

        assert_eq!(discover_data_dir_in(tmp.path()), Some(dir));
    }

    #[test]
    fn test_discover_data_dir_prefers_data_prefix() {
        let tmp = TempDir::new().expect("tempdir");
        let preferred = tmp.path().join("data").join("dadosabertos").join("2022");
        let fallback = tmp.path().join("dadosabertos").join("2022");
        std::fs::create_dir_all(&preferred).unwrap();
        std::fs::create_dir_all(&fallback).unwrap();

        assert_eq!(discover_data_dir_in(tmp.path()), Some(preferred));
    }
}
