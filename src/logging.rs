//! Logging setup shared by the binaries

/// Install the tracing subscriber
///
/// LOGGING (or LOG_LEVEL) takes an env-filter directive such as
/// `debug` or `container_builder=debug,info`; otherwise `--verbose`
/// picks between debug and info.
pub fn init(verbose: bool) {
    let log_level = std::env::var("LOGGING")
        .or_else(|_| std::env::var("LOG_LEVEL"))
        .unwrap_or_else(|_| {
            if verbose {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false)
        .init();
}
