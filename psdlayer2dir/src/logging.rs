//! Logger setup for the command line tool.

use anyhow::{Context, Result};
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::{
	fs::{File, OpenOptions},
	io::{self, Write},
	path::PathBuf,
};

#[derive(Clone, Debug, PartialEq)]
pub struct LogConfig {
	pub level: LevelFilter,
	/// Log lines are appended to this file in addition to stderr.
	pub file: Option<PathBuf>,
}

impl Default for LogConfig {
	fn default() -> Self {
		LogConfig {
			level: LevelFilter::Info,
			file: None,
		}
	}
}

impl LogConfig {
	pub fn builder(&self) -> Result<Builder> {
		let mut builder = Builder::new();
		builder.filter_level(self.level).format_timestamp(None);

		if let Some(path) = &self.file {
			let file = OpenOptions::new()
				.create(true)
				.append(true)
				.open(path)
				.with_context(|| format!("Failed to open log file {path:?}"))?;
			builder.target(Target::Pipe(Box::new(StderrAndFile { file })));
		}

		Ok(builder)
	}

	/// Installs the global logger.
	pub fn init(&self) -> Result<()> {
		self.builder()?.try_init()?;
		Ok(())
	}
}

/// Parses a log level given by name (`off`, `error`, `warn`, `info`, `debug`, `trace`) or as a
/// numeric level (`10` debug, `20` info, `30` warning, `40` error, `50` critical).
///
/// Numbers between the named steps round up to the next step; `0` enables everything and
/// anything above `50` disables logging.
pub fn parse_level(value: &str) -> Result<LevelFilter, String> {
	let value = value.trim();
	if let Ok(number) = value.parse::<u32>() {
		return Ok(match number {
			0 => LevelFilter::Trace,
			1..=10 => LevelFilter::Debug,
			11..=20 => LevelFilter::Info,
			21..=30 => LevelFilter::Warn,
			31..=50 => LevelFilter::Error,
			_ => LevelFilter::Off,
		});
	}
	match value.to_ascii_lowercase().as_str() {
		"warning" => Ok(LevelFilter::Warn),
		"critical" => Ok(LevelFilter::Error),
		name => name
			.parse()
			.map_err(|_| format!("unknown log level \"{value}\", expected a name like \"info\" or a number like 20")),
	}
}

/// Writes every log line to stderr and to the log file.
struct StderrAndFile {
	file: File,
}

impl Write for StderrAndFile {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		io::stderr().write_all(buf)?;
		self.file.write_all(buf)?;
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		io::stderr().flush()?;
		self.file.flush()
	}
}
