//! Logging Infrastructure
//!
//! Structured logging setup for development and production environments.

use crate::core::Config;

/// Initialize the logger
///
/// In production, logs also roll daily into `WORK_DIR/logs`. Calling this
/// twice is a no-op apart from a warning from the subscriber.
pub fn init_logger(config: &Config) {
    let level = config
        .log_level
        .parse()
        .unwrap_or(tracing::Level::INFO);

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if config.is_production() {
        let log_dir = config.log_dir();
        if log_dir.exists()
            && let Some(dir) = log_dir.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir, "desk-server");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
