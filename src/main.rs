use clap::Parser;
use stockbench::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
