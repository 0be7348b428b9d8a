use clap::{CommandFactory, Parser};
use helixmd::{Cli, Commands, HelixError, vs_bps};
use log::info;
use simple_logger::init_with_level;

use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::VsBps(args) => {
            init_with_level(args.level).unwrap_or_else(|e| panic!("{}", e));
            info!("Starting vs-bps with args: {}", args);

            match vs_bps(&args) {
                Ok(_) => ExitCode::SUCCESS,
                Err(err) => {
                    show_error("vs-bps", &err);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

/// Prints the sub-command usage for invocation errors, then the error itself.
fn show_error(subcommand: &str, err: &HelixError) {
    if err.is_usage_error() {
        let mut cmd = Cli::command();
        if let Some(sub) = cmd.find_subcommand_mut(subcommand) {
            let _ = sub.print_help();
        }
    }

    println!("\n===== ERROR =======");
    println!("{}", err);
    if err.is_usage_error() {
        println!("See Usage Above!!!");
    }
}
