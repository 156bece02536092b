use clap::{Arg, ArgAction, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("mlboard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect experiment status, durations and live 'time ago' labels")
        .long_about("mlboard exposes the dashboard's display helpers on the command line: relative time labels that keep themselves fresh, silent-death detection for running experiments, compact duration text, structural comparison of JSON records and result-name filtering.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("ago")
                .about("Show how long ago a timestamp was")
                .arg(
                    Arg::new("timestamp")
                        .help("Seconds since the Unix epoch")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64))
                        .index(1)
                )
                .arg(
                    Arg::new("watch")
                        .long("watch")
                        .short('w')
                        .help("Keep printing the label as it changes")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("count")
                        .long("count")
                        .short('n')
                        .help("Stop watching after this many updates")
                        .value_parser(value_parser!(usize))
                        .requires("watch")
                )
        )
        .subcommand(
            Command::new("duration")
                .about("Format a number of seconds as compact duration text")
                .arg(
                    Arg::new("seconds")
                        .help("Duration in seconds (negative means 'ago')")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64))
                        .index(1)
                )
                .arg(
                    Arg::new("precision")
                        .long("precision")
                        .short('p')
                        .help("Fractional digits to keep (overrides config)")
                        .value_parser(value_parser!(u32))
                )
        )
        .subcommand(
            Command::new("status")
                .about("Derive the extended status and badge class of an experiment")
                .arg(
                    Arg::new("status")
                        .help("Status reported by the backend (RUNNING, COMPLETED, FAILED, ...)")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("exit-code")
                        .long("exit-code")
                        .short('e')
                        .help("Process exit code, if the experiment has exited")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i64))
                )
                .arg(
                    Arg::new("age")
                        .long("age")
                        .help("Seconds since the last heartbeat")
                        .value_parser(value_parser!(u64))
                        .conflicts_with("heartbeat")
                )
                .arg(
                    Arg::new("heartbeat")
                        .long("heartbeat")
                        .help("Last heartbeat as seconds since the Unix epoch")
                        .value_parser(value_parser!(f64))
                )
                .arg(
                    Arg::new("complete-class")
                        .long("complete-class")
                        .help("Badge class for finished experiments (overrides config)")
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("diff")
                .about("Compare two JSON documents structurally")
                .arg(
                    Arg::new("left")
                        .help("First JSON file")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("right")
                        .help("Second JSON file")
                        .required(true)
                        .index(2)
                )
        )
        .subcommand(
            Command::new("filter")
                .about("Print the result names the dashboard would display")
                .arg(
                    Arg::new("names")
                        .help("Result names to check")
                        .required(true)
                        .num_args(1..)
                        .index(1)
                )
                .arg(
                    Arg::new("pattern")
                        .long("pattern")
                        .help("Filter regex (overrides config)")
                )
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_build() {
        let app = build_cli();
        assert_eq!(app.get_name(), "mlboard");
        app.debug_assert();
    }

    #[test]
    fn test_cli_ago_command() {
        let matches = build_cli()
            .try_get_matches_from(vec!["mlboard", "ago", "1592222400", "--watch", "-n", "3"])
            .unwrap();
        let sub = matches.subcommand_matches("ago").unwrap();
        assert_eq!(sub.get_one::<f64>("timestamp"), Some(&1_592_222_400.0));
        assert!(sub.get_flag("watch"));
        assert_eq!(sub.get_one::<usize>("count"), Some(&3));
    }

    #[test]
    fn test_cli_count_requires_watch() {
        let result = build_cli().try_get_matches_from(vec!["mlboard", "ago", "0", "--count", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_duration_accepts_negative_seconds() {
        let matches = build_cli()
            .try_get_matches_from(vec!["mlboard", "duration", "-5", "--precision", "2"])
            .unwrap();
        let sub = matches.subcommand_matches("duration").unwrap();
        assert_eq!(sub.get_one::<f64>("seconds"), Some(&-5.0));
        assert_eq!(sub.get_one::<u32>("precision"), Some(&2));
    }

    #[test]
    fn test_cli_status_age_conflicts_with_heartbeat() {
        let result = build_cli().try_get_matches_from(vec![
            "mlboard",
            "status",
            "RUNNING",
            "--age",
            "10",
            "--heartbeat",
            "1592222400",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_filter_takes_many_names() {
        let matches = build_cli()
            .try_get_matches_from(vec!["mlboard", "filter", "loss", "step", "lr"])
            .unwrap();
        let names: Vec<&String> = matches
            .subcommand_matches("filter")
            .unwrap()
            .get_many::<String>("names")
            .unwrap()
            .collect();
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn test_cli_verbose_is_global() {
        let matches = build_cli()
            .try_get_matches_from(vec!["mlboard", "duration", "5", "-v"])
            .unwrap();
        assert!(matches.get_flag("verbose"));
    }
}
