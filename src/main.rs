use clap::Parser;
use cryptosig::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
