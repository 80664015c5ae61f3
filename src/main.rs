use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() {
	let filter = EnvFilter::try_from_env("MATERIALIZE_BASE_LOG")
		.unwrap_or_else(|_| EnvFilter::new("error"));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();

	let cli = cli::Cli::parse();
	match cli::run(cli) {
		Ok(output) => print!("{output}"),
		Err(e) => {
			// Print the full cause chain, blank-line separated
			let chain: Vec<String> = e.chain().map(|cause| cause.to_string()).collect();
			eprintln!("{}", chain.join("\n\n"));
			std::process::exit(1);
		}
	}
}
