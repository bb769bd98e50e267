use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;

/// Appends one line to a debug trail file under `logs/`, stamped with the
/// local wall-clock time. Used for the per-event trail when debug logging is
/// enabled.
pub fn log_to_file(filename: &str, message: &str) -> io::Result<()> {
    let log_dir = "logs";
    if !Path::new(log_dir).exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let path = format!("{}/{}", log_dir, filename);

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    writeln!(file, "[{}] {}", timestamp, message)?;
    file.flush()?;

    Ok(())
}
