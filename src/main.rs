#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "wrapreg", about = "Wrapped object registry tools")]
struct Cli {
	/// Verbose logging
	#[arg(short, long, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// List registered types and their fields.
	Types(cmd::types::Args),
	/// Validate a document against a registered type.
	Check(cmd::check::Args),
	/// Decode a document and print the wrapped tree.
	Show(cmd::show::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> wrapreg::wrap::Result<()> {
	match command {
		Commands::Types(args) => cmd::types::run(args),
		Commands::Check(args) => cmd::check::run(args),
		Commands::Show(args) => cmd::show::run(args),
	}
}

fn init_tracing(verbose: bool) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(if verbose { "wrapreg=debug,info" } else { "warn" }));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
