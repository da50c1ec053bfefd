//! Output formatting and logging utilities

use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{
    fmt::format::Writer, fmt::layer, fmt::time::FormatTime, layer::SubscriberExt,
    util::SubscriberInitExt, Registry,
};

/// Timestamps as seconds elapsed since logging was set up, e.g. `   1.042s`
struct ElapsedTimer {
    start: Instant,
}

impl ElapsedTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl FormatTime for ElapsedTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{:>8.3}s", self.start.elapsed().as_secs_f64())
    }
}

/// Route log output to `output_path`, or to stdout when none is given.
pub fn setup_output(output_path: Option<&str>) -> Result<()> {
    match output_path {
        Some(path) => {
            let log = File::create(path)
                .wrap_err_with(|| format!("Could not create output file: {}", path))?;
            let file_layer = layer()
                .with_writer(log)
                .with_timer(ElapsedTimer::new())
                .with_ansi(false);
            Registry::default()
                .with(file_layer)
                .try_init()
                .wrap_err("Failed to install log subscriber")?;
        }
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(ElapsedTimer::new())
                .with_ansi(true);
            Registry::default()
                .with(stdout_layer)
                .try_init()
                .wrap_err("Failed to install log subscriber")?;
        }
    }
    Ok(())
}

/// Serialize `report` as pretty-printed JSON.
pub fn write_json_report<W: Write, T: Serialize>(writer: &mut W, report: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report).wrap_err("Failed to serialize report")?;
    writeln!(writer)?;
    Ok(())
}

pub fn save_json_report<T: Serialize>(path: &str, report: &T) -> Result<()> {
    let file =
        File::create(path).wrap_err_with(|| format!("Could not create JSON report: {}", path))?;
    let mut writer = BufWriter::new(file);
    write_json_report(&mut writer, report)?;
    writer.flush()?;
    info!("JSON report written to: {}", path);
    Ok(())
}
