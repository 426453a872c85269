use clap::Parser;
use grist_cli::{CliArgs, GristCli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let result = match GristCli::from_args(&args) {
        Ok(cli) => cli.run(args),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("grist: {e}");
            ExitCode::FAILURE
        }
    }
}
