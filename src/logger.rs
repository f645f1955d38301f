//! Process-wide tracing setup for the CLI. UCI owns stdout, so log lines go
//! to stderr (or a file when a path is given), filterable via `RUST_LOG`.

use std::path::Path;
use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, fmt};

static GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
static INIT: OnceLock<()> = OnceLock::new();

fn filter_from(filter: &str) -> EnvFilter {
    if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize logging to stderr. Idempotent; later calls are no-ops.
pub fn init(filter: &str) {
    INIT.get_or_init(|| {
        let subscriber = fmt()
            .with_env_filter(filter_from(filter))
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(true)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Initialize logging to an append-only file, e.g. `logs/search.log`.
pub fn init_file<P: AsRef<Path>>(path: P, filter: &str) {
    INIT.get_or_init(|| {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        let file = match std::fs::OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => file,
            Err(_) => {
                // Fall back to stderr rather than dying over a log file.
                let subscriber = fmt()
                    .with_env_filter(filter_from(filter))
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .finish();
                let _ = tracing::subscriber::set_global_default(subscriber);
                return;
            }
        };

        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let _ = GUARD.set(guard);

        let subscriber = fmt()
            .with_env_filter(filter_from(filter))
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
