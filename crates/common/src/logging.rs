//! Logging and tracing initialization.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::LoggingConfig;
use crate::error::LumafxResult;

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` takes precedence over `config.level` when set. Fails only if
/// the configured log file cannot be opened.
pub fn init_logging(config: &LoggingConfig) -> LumafxResult<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let writer = make_writer(config)?;
    // ANSI escapes only make sense on a terminal.
    let ansi = config.file.is_none();

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
    Ok(())
}

/// Log destination: the configured file in append mode, else stderr so
/// stdout stays free for command output.
fn make_writer(config: &LoggingConfig) -> LumafxResult<BoxMakeWriter> {
    match &config.file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Ok(BoxMakeWriter::new(Mutex::new(file)))
        }
        None => Ok(BoxMakeWriter::new(std::io::stderr)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn test_log_file_is_created_and_appended() {
        let dir = std::env::temp_dir().join("lumafx_test_log_file");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("logs").join("lumafx.log");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "earlier\n").unwrap();

        let config = LoggingConfig {
            file: Some(path.clone()),
            ..LoggingConfig::default()
        };
        let writer = make_writer(&config).unwrap();
        writer.make_writer().write_all(b"later\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "earlier\nlater\n");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_log_file_parent_directories_created() {
        let dir = std::env::temp_dir().join("lumafx_test_log_dirs");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("a").join("b").join("lumafx.log");

        let config = LoggingConfig {
            file: Some(path.clone()),
            ..LoggingConfig::default()
        };
        make_writer(&config).unwrap();
        assert!(path.exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unwritable_log_path_is_an_error() {
        let dir = std::env::temp_dir().join("lumafx_test_log_is_dir");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        // A directory cannot be opened for appending.
        let config = LoggingConfig {
            file: Some(dir.clone()),
            ..LoggingConfig::default()
        };
        assert!(make_writer(&config).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }
}
