use clap::Parser;

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = lexdraft::Args::parse();
	lexdraft::run(args)
}
