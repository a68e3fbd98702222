//! `casm` -- command-line front end for the 6809 assembler.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use coco_compiler::output::{containers, listing, symbols};
use coco_compiler::{assemble, AssemblyError, Config};

#[derive(Parser)]
#[command(
	name = "casm",
	version = coco_compiler::VERSION,
	about = "A two-pass Motorola 6809 assembler",
	long_about = "A two-pass Motorola 6809 assembler, EDTASM+-compatible at the source-\
	              statement level, targeting the Tandy Color Computer."
)]
struct Cli {
	/// Input assembly file
	#[arg(value_name = "INPUT")]
	input: PathBuf,

	/// Print a listing record for every assembled statement
	#[arg(long)]
	print: bool,

	/// Print the symbol table after assembly
	#[arg(long)]
	symbols: bool,

	/// Write the assembled image as a raw binary to PATH
	#[arg(long = "to_bin", value_name = "PATH")]
	to_bin: Option<PathBuf>,

	/// Write the assembled image as a `.CAS` cassette container to PATH
	#[arg(long = "to_cas", value_name = "PATH")]
	to_cas: Option<PathBuf>,

	/// Write the assembled image as a `.DSK` disk container to PATH
	#[arg(long = "to_dsk", value_name = "PATH")]
	to_dsk: Option<PathBuf>,

	/// Program name stamped into cassette/disk container metadata
	#[arg(long, value_name = "NAME")]
	name: Option<String>,

	/// Append to an existing `.CAS`/`.DSK` container instead of overwriting it
	#[arg(long)]
	append: bool,

	/// Log level (overrides `RUST_LOG`); one of error, warn, info, debug, trace
	#[arg(long, value_name = "LEVEL")]
	log: Option<log::LevelFilter>,
}

fn main() {
	let cli = Cli::parse();
	init_logging(cli.log);

	if let Err(e) = run(&cli) {
		eprint_error(&e);
		process::exit(1);
	}
}

fn init_logging(level: Option<log::LevelFilter>) {
	let mut builder = env_logger::Builder::from_default_env();
	if let Some(level) = level {
		builder.filter_level(level);
	}
	builder.init();
}

fn run(cli: &Cli) -> Result<(), AssemblyError> {
	let mut config = Config::default();
	if let Some(name) = &cli.name {
		config = config.with_name(name.clone());
	}
	config.output.append_by_default = cli.append;

	let program = assemble(&cli.input, &config)?;

	if cli.print {
		print!("{}", listing::render(&program.statements));
	}
	if cli.symbols {
		print!("{}", symbols::render(&program.symbols));
	}

	let name = program.program_name.clone().unwrap_or_else(|| config.output.default_name.clone());
	let append = cli.append || config.output.append_by_default;

	if let Some(path) = &cli.to_bin {
		containers::write_bin(&program, path, append)?;
	}
	if let Some(path) = &cli.to_cas {
		containers::write_cas(&program, path, &name, append, config.output.cassette_leader_len)?;
	}
	if let Some(path) = &cli.to_dsk {
		containers::write_dsk(&program, path, &name, append)?;
	}

	if !cli.print && !cli.symbols {
		println!("assembled {} bytes", program.image.flatten().len());
	}

	Ok(())
}

fn eprint_error(error: &AssemblyError) {
	match error {
		AssemblyError::Multiple(errors) => {
			for e in errors {
				eprintln!("{e}");
			}
		}
		other => eprintln!("{other}"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn cli_declaration_is_valid() {
		Cli::command().debug_assert();
	}

	#[test]
	fn parses_required_flags() {
		let cli = Cli::parse_from([
			"casm",
			"game.asm",
			"--print",
			"--symbols",
			"--to_bin",
			"out.bin",
			"--to_cas",
			"out.cas",
			"--to_dsk",
			"out.dsk",
			"--name",
			"HELLO",
			"--append",
			"--log",
			"debug",
		]);
		assert_eq!(cli.input, PathBuf::from("game.asm"));
		assert!(cli.print);
		assert!(cli.symbols);
		assert_eq!(cli.to_bin, Some(PathBuf::from("out.bin")));
		assert_eq!(cli.to_cas, Some(PathBuf::from("out.cas")));
		assert_eq!(cli.to_dsk, Some(PathBuf::from("out.dsk")));
		assert_eq!(cli.name.as_deref(), Some("HELLO"));
		assert!(cli.append);
		assert_eq!(cli.log, Some(log::LevelFilter::Debug));
	}
}
