use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

pub fn build_cli() -> Command {
    Command::new("healthmon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Single-host health-check monitor")
        .long_about(
            "Checks disk usage, memory usage, CPU usage and process liveness, \
             prints a report and writes it to a file.\n\n\
             Exit status: 0 all checks passed, 1 some checks failed, \
             2 report could not be written, 3 configuration error.",
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging (RUST_LOG also works)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("JSON config file (default: <config dir>/healthmon/config.json)")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(
            Command::new("check")
                .about("Run all checks once and write the report")
                .arg(
                    Arg::new("report")
                        .short('o')
                        .long("report")
                        .value_name("PATH")
                        .help("Report file to overwrite")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("no-report")
                        .long("no-report")
                        .help("Do not write the report file")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("disk")
                        .short('d')
                        .long("disk")
                        .value_name("PATH")
                        .help("Filesystem path to check (repeatable, replaces configured disks)")
                        .value_parser(value_parser!(PathBuf))
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("disk-warning")
                        .long("disk-warning")
                        .value_name("PCT")
                        .help("Disk usage warning threshold in percent")
                        .value_parser(value_parser!(f64)),
                )
                .arg(
                    Arg::new("disk-critical")
                        .long("disk-critical")
                        .value_name("PCT")
                        .help("Disk usage critical threshold in percent")
                        .value_parser(value_parser!(f64)),
                )
                .arg(
                    Arg::new("memory-warning")
                        .long("memory-warning")
                        .value_name("PCT")
                        .help("Memory usage warning threshold in percent")
                        .value_parser(value_parser!(f64)),
                )
                .arg(
                    Arg::new("memory-critical")
                        .long("memory-critical")
                        .value_name("PCT")
                        .help("Memory usage critical threshold in percent")
                        .value_parser(value_parser!(f64)),
                )
                .arg(
                    Arg::new("no-memory")
                        .long("no-memory")
                        .help("Skip the memory check")
                        .action(ArgAction::SetTrue)
                        .conflicts_with_all(["memory-warning", "memory-critical"]),
                )
                .arg(
                    Arg::new("cpu")
                        .long("cpu")
                        .help("Also check global CPU usage")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("process")
                        .short('p')
                        .long("process")
                        .value_name("NAME")
                        .help("Process that must be running (repeatable)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("timeout")
                        .short('t')
                        .long("timeout")
                        .value_name("SECS")
                        .help("Per-check deadline; expired checks are reported UNKNOWN")
                        .value_parser(value_parser!(u64).range(1..)),
                )
                .arg(
                    Arg::new("parallel")
                        .long("parallel")
                        .help("Run checks concurrently")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the results as JSON instead of the console report")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no-color")
                        .long("no-color")
                        .help("Disable colored output")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Inspect or create the configuration (use 'healthmon config --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("show").about("Print the effective configuration as JSON"),
                )
                .subcommand(Command::new("path").about("Print the default config file location"))
                .subcommand(
                    Command::new("init")
                        .about("Write the default configuration to the config file")
                        .arg(
                            Arg::new("force")
                                .short('f')
                                .long("force")
                                .help("Overwrite an existing config file")
                                .action(ArgAction::SetTrue),
                        ),
                ),
        )
}
