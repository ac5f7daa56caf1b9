use env_logger::{Builder, Env};
use log::Record;
use std::io::Write;

/// Installs the global logger. `RUST_LOG` takes precedence; otherwise
/// `default_level` (e.g. `info`) filters the output.
pub fn init_logging(default_level: &str) {
    let logging_env = Env::default().filter_or("RUST_LOG", default_level);
    Builder::from_env(logging_env)
        .format(|buf, record| writeln!(buf, "{}", format_record(record)))
        .init();
}

/// Formats a log line as `HH:MM:SS target message`.
fn format_record(record: &Record) -> String {
    format!(
        "{} {} {}",
        chrono::Local::now().format("%H:%M:%S"),
        record.target().to_ascii_lowercase(),
        record.args()
    )
}
