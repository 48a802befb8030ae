use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::LevelFilter;
use psdlayer2dir::{
	convert_file,
	core::{DuplicatePolicy, ExportConfig, FlipFlags, FlipPolicy},
	logging::{LogConfig, parse_level},
};
use std::path::{Path, PathBuf};

// Define the command-line interface using the clap crate
#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
)]
struct Cli {
	/// Photoshop file to export
	#[arg()]
	psd_file: PathBuf,

	/// destination directory, must not exist yet [default: the PSD file name without extension]
	#[arg(long, short, env = "PSDLAYER2DIR_OUTPUT_DIR", value_name = "DIR", display_order = 1)]
	output_dir: Option<PathBuf>,

	/// mirror every layer horizontally
	#[arg(long, display_order = 2)]
	flipx: bool,

	/// flip every layer vertically
	#[arg(long, display_order = 2)]
	flipy: bool,

	/// mirror and flip every layer, same as --flipx --flipy
	#[arg(long, display_order = 2)]
	flipxy: bool,

	/// flip each layer according to ":flipx", ":flipy" and ":flipxy" markers in its own or its groups' names
	#[arg(long, conflicts_with_all = ["flipx", "flipy", "flipxy"], display_order = 2)]
	flip_from_markers: bool,

	/// what to do when two layers end up with the same file name
	#[arg(long, value_enum, value_name = "POLICY", default_value_t = DuplicatePolicy::Suffix, display_order = 3)]
	on_duplicate: DuplicatePolicy,

	/// log what would be written without writing anything
	#[arg(long, display_order = 3)]
	dry_run: bool,

	/// log level (off, error, warn, info, debug, trace) or its number (10 debug, 20 info, 30 warn, 40 error); overrides -v and -q
	#[arg(long, env = "PSDLAYER2DIR_LOG_LEVEL", value_name = "LEVEL", value_parser = parse_level, display_order = 4)]
	log_level: Option<LevelFilter>,

	/// also append log output to this file
	#[arg(long, env = "PSDLAYER2DIR_LOG_FILE", value_name = "FILE", display_order = 4)]
	log_file: Option<PathBuf>,

	#[command(flatten)]
	verbose: Verbosity<InfoLevel>,
}

impl Cli {
	fn flip_policy(&self) -> FlipPolicy {
		if self.flip_from_markers {
			FlipPolicy::Markers
		} else {
			FlipPolicy::Global(FlipFlags::new(self.flipx || self.flipxy, self.flipy || self.flipxy))
		}
	}

	fn output_dir(&self) -> PathBuf {
		self.output_dir.clone().unwrap_or_else(|| default_output_dir(&self.psd_file))
	}

	fn export_config(&self) -> ExportConfig {
		ExportConfig::new(self.output_dir())
			.with_flip(self.flip_policy())
			.with_duplicates(self.on_duplicate)
			.with_dry_run(self.dry_run)
	}

	fn log_config(&self) -> LogConfig {
		LogConfig {
			level: self.log_level.unwrap_or_else(|| self.verbose.log_level_filter()),
			file: self.log_file.clone(),
		}
	}
}

/// `path/to/character.psd` exports into `./character`.
fn default_output_dir(psd_file: &Path) -> PathBuf {
	match psd_file.file_stem() {
		Some(stem) => PathBuf::from(stem),
		None => PathBuf::from("layers"),
	}
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	cli.log_config().init()?;

	run(cli)
}

fn run(cli: Cli) -> Result<()> {
	convert_file(&cli.psd_file, &cli.export_config())?;
	Ok(())
}

// Unit tests for the command-line interface
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	fn parse(args: &[&str]) -> Result<Cli> {
		Ok(Cli::try_parse_from(std::iter::once("psdlayer2dir").chain(args.iter().copied()))?)
	}

	#[test]
	fn help() {
		let err = parse(&["--help"]).unwrap_err().to_string();
		assert!(err.contains("Usage: psdlayer2dir [OPTIONS] <PSD_FILE>"), "{err}");
	}

	#[test]
	fn version() {
		let err = parse(&["-V"]).unwrap_err().to_string();
		assert!(err.starts_with("psdlayer2dir "), "{err}");
	}

	#[test]
	fn psd_file_is_required() {
		assert!(parse(&[]).is_err());
	}

	#[rstest]
	#[case(&[], FlipPolicy::Global(FlipFlags::NONE))]
	#[case(&["--flipx"], FlipPolicy::Global(FlipFlags::X))]
	#[case(&["--flipy"], FlipPolicy::Global(FlipFlags::Y))]
	#[case(&["--flipxy"], FlipPolicy::Global(FlipFlags::XY))]
	#[case(&["--flipx", "--flipy"], FlipPolicy::Global(FlipFlags::XY))]
	#[case(&["--flipx", "--flipxy"], FlipPolicy::Global(FlipFlags::XY))]
	#[case(&["--flip-from-markers"], FlipPolicy::Markers)]
	fn flip_flags(#[case] flags: &[&str], #[case] expected: FlipPolicy) -> Result<()> {
		let mut args = vec!["a.psd"];
		args.extend_from_slice(flags);
		assert_eq!(parse(&args)?.flip_policy(), expected);
		Ok(())
	}

	#[rstest]
	#[case("--flipx")]
	#[case("--flipy")]
	#[case("--flipxy")]
	fn marker_flips_exclude_global_flips(#[case] global: &str) {
		let err = parse(&["a.psd", "--flip-from-markers", global]).unwrap_err();
		assert!(err.to_string().contains("cannot be used with"), "{err}");
	}

	#[test]
	fn export_config_from_arguments() -> Result<()> {
		let cli = parse(&["in/character.psd", "-o", "out", "--on-duplicate", "error", "--dry-run"])?;
		let config = cli.export_config();
		assert_eq!(config.output_dir(), Path::new("out"));
		assert_eq!(config.duplicates, DuplicatePolicy::Error);
		assert!(config.dry_run);
		Ok(())
	}

	#[test]
	fn output_dir_defaults_to_file_stem() {
		assert_eq!(default_output_dir(Path::new("in/character.psd")), PathBuf::from("character"));
		assert_eq!(default_output_dir(Path::new("/")), PathBuf::from("layers"));
	}

	#[rstest]
	#[case(&[], LevelFilter::Info)]
	#[case(&["-v"], LevelFilter::Debug)]
	#[case(&["-q"], LevelFilter::Warn)]
	#[case(&["--log-level", "trace"], LevelFilter::Trace)]
	#[case(&["-q", "--log-level", "debug"], LevelFilter::Debug)]
	#[case(&["--log-level", "20"], LevelFilter::Info)]
	#[case(&["--log-level", "40"], LevelFilter::Error)]
	fn log_level(#[case] flags: &[&str], #[case] expected: LevelFilter) -> Result<()> {
		let mut args = vec!["a.psd"];
		args.extend_from_slice(flags);
		assert_eq!(parse(&args)?.log_config().level, expected);
		Ok(())
	}
}
