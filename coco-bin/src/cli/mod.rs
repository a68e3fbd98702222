mod list;
mod version;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use coco_common::{cst::LOGO, env};

use crate::logging::{CustomEnvFilter, CustomEnvFilterParser};

const INFO: &str = r"
Inspect CoCo cassette (.CAS) and disk (.DSK) container images
";

#[derive(Parser, Debug)]
#[command(name = "coco-tools command-line interface", bin_name = "coco-tools")]
#[command(author, version, about = INFO, before_help = LOGO)]
#[command(disable_version_flag = true, arg_required_else_help = true)]
struct Cli {
	#[arg(help = "The logging level")]
	#[arg(env = "COCO_LOG", short = 'l', long = "log")]
	#[arg(default_value = "info")]
	#[arg(value_parser = CustomEnvFilterParser::new())]
	#[arg(global = true)]
	log: CustomEnvFilter,

	#[command(subcommand)]
	command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
	#[command(about = "List the programs stored on a cassette image")]
	ListCas { path: std::path::PathBuf },
	#[command(about = "List the files stored on a disk image")]
	ListDsk { path: std::path::PathBuf },
	#[command(about = "Print version information")]
	Version,
}

pub(crate) fn prepare(log: CustomEnvFilter) -> Option<tracing_appender::non_blocking::WorkerGuard> {
	crate::logging::builder()
		.with_filter(log)
		.with_file_appender(std::path::PathBuf::from(".logs"))
		.build()
}

pub async fn init() -> ExitCode {
	env::init();

	let args = Cli::parse();

	if let Some(Commands::Version) = args.command {
		version::init();
		return ExitCode::SUCCESS;
	}

	let _guard = prepare(args.log);

	let output = match args.command {
		Some(Commands::ListCas { path }) => list::list_cassette(&path),
		Some(Commands::ListDsk { path }) => list::list_disk(&path),
		_ => Ok(()),
	};

	if let Err(e) = output {
		error!("{}", e);
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	}
}
