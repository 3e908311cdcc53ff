mod cli;
mod execute;

use clap::Parser;
use colored::Colorize;

use crate::cli::CLI;

fn main() {
    env_logger::init();
    let cli = CLI::parse();

    if let Err(e) = binfetch::interrupt::install_signal_handlers() {
        eprintln!("{} {e:#}", "error:".red());
        std::process::exit(1);
    }

    match execute::execute(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red());
            std::process::exit(1);
        }
    }
}
