use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::Layer;
use tracing_subscriber::prelude::*;

#[cfg(feature = "dev")]
use super::filter::InfoAndAboveFilter;
use super::filter::DebugOnlyFilter;
#[cfg(feature = "prod")]
use super::filter::ErrorOnlyFilter;
use super::filter::ErrorWarnFilter;
use super::format::FraudshieldFormat;
use crate::config::LoggingConfig;
use crate::config::load_config;

/// Keeps the non-blocking file writers alive. Drop it only at shutdown, or
/// buffered log lines are lost.
#[must_use = "dropping the guard stops file logging"]
pub struct TracingGuard {
    _guards: Vec<WorkerGuard>,
}

/// Installs the global subscriber using the logging section of `Config.toml`
/// (defaults when the file is absent).
pub fn setup_tracing(engine_name: &str) -> TracingGuard { setup_tracing_from(engine_name, "Config.toml") }

/// Same as [`setup_tracing`], reading the logging section from `config_path`.
pub fn setup_tracing_from(
    engine_name: &str,
    config_path: impl AsRef<Path>,
) -> TracingGuard {
    setup_tracing_with(engine_name, &logging_config_from(config_path.as_ref()))
}

fn logging_config_from(config_path: &Path) -> LoggingConfig {
    load_config(config_path).map(|config| config.logging).unwrap_or_default()
}

pub fn setup_tracing_with(
    engine_name: &str,
    logging_config: &LoggingConfig,
) -> TracingGuard {
    let base_logs_dir = Path::new(logging_config.directory.as_deref().unwrap_or(".logs"));

    let logs_dirs = [base_logs_dir.to_path_buf(), base_logs_dir.join("debug"), base_logs_dir.join("error")];
    for dir in &logs_dirs {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Failed to create logs directory {}: {}", dir.display(), e);
        }
    }

    let file_name = format!("{}.log", engine_name);

    #[cfg(feature = "dev")]
    let info_appender = RollingFileAppender::new(Rotation::DAILY, base_logs_dir, &file_name);
    let debug_appender = RollingFileAppender::new(Rotation::DAILY, base_logs_dir.join("debug"), &file_name);
    let error_appender = RollingFileAppender::new(Rotation::DAILY, base_logs_dir.join("error"), &file_name);

    #[cfg(feature = "dev")]
    let (non_blocking_info, info_guard) = tracing_appender::non_blocking(info_appender);
    let (non_blocking_debug, debug_guard) = tracing_appender::non_blocking(debug_appender);
    let (non_blocking_error, error_guard) = tracing_appender::non_blocking(error_appender);

    #[allow(unused_mut)]
    let mut guards = vec![debug_guard, error_guard];
    #[cfg(feature = "dev")]
    guards.push(info_guard);

    let format = FraudshieldFormat::new(engine_name);

    let subscriber = tracing_subscriber::registry()
        // DEBUG log file
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(false)
                .event_format(format.clone())
                .with_writer(non_blocking_debug)
                .with_filter(DebugOnlyFilter),
        )
        // ERROR log file - warn and error
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(false)
                .event_format(format.clone())
                .with_writer(non_blocking_error)
                .with_filter(ErrorWarnFilter),
        );

    #[cfg(feature = "prod")]
    let subscriber = subscriber.with(
        tracing_subscriber::fmt::Layer::default()
            .with_ansi(true)
            .event_format(format.clone())
            .with_writer(std::io::stderr)
            .with_filter(ErrorOnlyFilter),
    );

    #[cfg(feature = "dev")]
    let subscriber = subscriber
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(true)
                .event_format(format.clone())
                .with_writer(std::io::stderr)
                .with_filter(InfoAndAboveFilter),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(false)
                .event_format(format.clone())
                .with_writer(non_blocking_info)
                .with_filter(InfoAndAboveFilter),
        );

    match tracing::subscriber::set_global_default(subscriber) {
        Ok(_) => {
            tracing::info!(
                "{}_logging_started::debug_logs::{}",
                engine_name,
                base_logs_dir.join("debug").join(&file_name).display()
            );
            tracing::info!(
                "{}_logging_started::error_logs::{}",
                engine_name,
                base_logs_dir.join("error").join(&file_name).display()
            );
        },
        Err(e) => {
            eprintln!("Error setting up logging: {}", e);
        },
    }

    TracingGuard { _guards: guards }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn logging_section_comes_from_the_given_file() {
        let path = std::env::temp_dir().join(format!("fraudshield-logging-{}.toml", std::process::id()));
        std::fs::write(&path, "[logging]\ndirectory = \"/var/log/fraudshield\"\n").unwrap();

        let config = logging_config_from(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.directory.as_deref(), Some("/var/log/fraudshield"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        assert_eq!(logging_config_from(Path::new("no/such/Config.toml")), LoggingConfig::default());
    }
}
