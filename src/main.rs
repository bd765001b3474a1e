use anyhow::Result;
use clap::Parser;
use kmer_assembler::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    cli.execute()
}
