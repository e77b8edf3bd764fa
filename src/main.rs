use clap::Parser;
use colored::Colorize;
use std::process;
use textload::cli::{args::Args, commands};

fn main() {
    let args = Args::parse();

    if let Err(error) = commands::run(args) {
        eprintln!("{} {:#}", "Error:".red().bold(), error);
        process::exit(1);
    }
}
