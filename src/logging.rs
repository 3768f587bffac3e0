use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, Once};
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber. `RUST_LOG` overrides `default_directive`.
/// With a `log_file` the output goes there so a full-screen UI is not
/// painted over; otherwise it goes to stderr.
pub(crate) fn init_tracing(default_directive: &str, log_file: Option<&Path>) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        match log_file {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path);
                match file {
                    Ok(file) => fmt()
                        .with_env_filter(filter)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file))
                        .init(),
                    Err(_) => fmt()
                        .with_env_filter(filter)
                        .with_writer(std::io::sink)
                        .init(),
                }
            }
            None => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init(),
        }
    });
}
