use clap::Parser;
use miette::Result;
use rastervec::cli::{Cli, Commands};
use rastervec::logging::init_logging;
use rastervec::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let printer = Printer::new();

    match cli.command {
        Commands::Convert(args) => rastervec::cli::convert::run(args, &printer)?,
        Commands::Inspect(args) => rastervec::cli::inspect::run(args, &printer)?,
        Commands::Init(args) => rastervec::cli::init::run(args, &printer)?,
        Commands::Completions(args) => rastervec::cli::completions::run(args)?,
    }

    Ok(())
}
