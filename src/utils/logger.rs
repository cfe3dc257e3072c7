use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log targets owned by this package: the library (and `mlm-earnings` binary)
/// plus the `batch-earnings` binary.
const TARGETS: [&str; 2] = ["mlm_earnings", "batch_earnings"];

/// Default filter directive used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    let mut directives: Vec<String> = TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect();
    if verbose {
        directives.push("info".to_string());
    }
    directives.join(",")
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// JSON lines for scheduled batch runs whose logs get shipped elsewhere.
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(env_filter(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    fn enabled_with(directive: &str, check: impl FnOnce() -> bool) -> bool {
        let subscriber = tracing_subscriber::registry().with(EnvFilter::new(directive));
        tracing::subscriber::with_default(subscriber, check)
    }

    #[test]
    fn test_default_directive_enables_both_binaries() {
        let directive = default_directive(false);
        assert_eq!(directive, "mlm_earnings=info,batch_earnings=info");

        assert!(enabled_with(&directive, || tracing::enabled!(
            target: "batch_earnings",
            Level::INFO
        )));
        assert!(enabled_with(&directive, || tracing::enabled!(
            target: "batch_earnings",
            Level::ERROR
        )));
        assert!(enabled_with(&directive, || tracing::enabled!(
            target: "mlm_earnings::core::engine",
            Level::INFO
        )));
        assert!(!enabled_with(&directive, || tracing::enabled!(
            target: "batch_earnings",
            Level::DEBUG
        )));
        assert!(!enabled_with(&directive, || tracing::enabled!(
            target: "hyper",
            Level::INFO
        )));
    }

    #[test]
    fn test_verbose_directive_enables_debug() {
        let directive = default_directive(true);
        assert_eq!(directive, "mlm_earnings=debug,batch_earnings=debug,info");

        assert!(enabled_with(&directive, || tracing::enabled!(
            target: "batch_earnings",
            Level::DEBUG
        )));
        assert!(!enabled_with(&directive, || tracing::enabled!(
            target: "mlm_earnings",
            Level::TRACE
        )));
    }
}
