use colored::Colorize;

use healthmon::cli::build_cli;
use healthmon::commands;
use healthmon::commands::check::EXIT_CONFIG_ERROR;

fn main() {
    let matches = build_cli().get_matches();

    healthmon::init_logging(matches.get_flag("verbose"));

    // Panics inside probes are reported as UNKNOWN results; keep stderr to one log line
    std::panic::set_hook(Box::new(|info| {
        log::error!("panic: {}", info);
    }));

    let outcome = match matches.subcommand() {
        Some(("check", sub_matches)) => commands::check::execute(sub_matches),
        Some(("config", sub_matches)) => commands::config::execute(sub_matches),
        _ => {
            println!("Use 'healthmon --help' for more information.");
            Ok(0)
        }
    };

    match outcome {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    }
}
