//! Tracing setup for the relay bot: one plain-text line per event, on stdout and appended to `LOG_FILE`.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt::format::{Format, Writer};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Used when `RUST_LOG` is unset: our crates at info, chatty HTTP and Telegram internals at warn.
const DEFAULT_DIRECTIVES: &str = "info,teloxide=warn,hyper=warn,reqwest=warn";

/// Wall-clock prefix, e.g. `2024-05-01 13:37:00`.
struct LocalClock;

impl FormatTime for LocalClock {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{} ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Appends to `path`; a missing parent directory (e.g. `logs/`) is created first.
fn open_log_file(path: &str) -> io::Result<File> {
    match Path::new(path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)?,
        _ => {}
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn filter_from(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

fn line_format() -> Format<tracing_subscriber::fmt::format::Full, LocalClock> {
    tracing_subscriber::fmt::format()
        .with_timer(LocalClock)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(false)
}

/// Installs the global subscriber. Call once, after `.env` is loaded so `RUST_LOG` is visible.
///
/// Session lifecycle, gateway calls and delivery steps all end up in `log_file_path` as well as on
/// stdout; ANSI colouring is off so the file stays greppable.
pub fn init_tracing(log_file_path: &str) -> anyhow::Result<()> {
    let file = Arc::new(open_log_file(log_file_path)?);
    let rust_log = std::env::var("RUST_LOG").ok();

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout.and(file))
        .event_format(line_format())
        .with_ansi(false);

    Registry::default()
        .with(filter_from(rust_log.as_deref()))
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))
}
