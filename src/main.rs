use clap::Parser;
use std::process;

use sprintboard::cli;
use sprintboard::cli::commands::{Cli, Commands};

fn main() {
    let cli_args = Cli::parse();
    let json_output = cli_args.json;
    let assume_yes = cli_args.yes;

    let exit_code = match cli_args.command {
        Commands::Init => cli::init::run(json_output),
        Commands::Project(cmd) => cli::project::run(cmd, json_output),
        Commands::Sprint(cmd) => cli::sprint::run(cmd, json_output, assume_yes),
        Commands::Task(cmd) => cli::task::run(cmd, json_output, assume_yes),
        Commands::Board(cmd) => cli::board::run(cmd, json_output, assume_yes),
        Commands::Backlog(cmd) => cli::backlog::run(cmd, json_output),
        Commands::Burndown { project } => cli::burndown::run(&project, json_output),
    };

    process::exit(exit_code);
}
