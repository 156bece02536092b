use std::cell::{Cell, RefCell};
use std::fs;
use std::rc::Rc;

use chrono::Utc;
use clap::ArgMatches;
use serde_json::Value;
use tracing::{error, info, warn};

use mlboard_core::config::MlboardConfig;
use mlboard_core::events;
use mlboard_core::results::ResultFilter;
use mlboard_core::status::{ExtendedStatus, JobRecord, JobStatus, classify_color};
use mlboard_core::time_diff::{Clock, LiveLabel, SystemClock, TimerQueue, age_seconds};
use mlboard_core::{deep_equal, format_duration, timestamp_to_datetime};

#[derive(serde::Serialize)]
struct StatusResponse<'a> {
    status: &'a JobStatus,
    exit_code: Option<i64>,
    extended_status: &'a ExtendedStatus,
    label: &'a str,
    badge_class: &'a str,
    age_seconds: u64,
}

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
fn load_config_with_warning() -> MlboardConfig {
    match MlboardConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.mlboard/config.toml and ./.mlboard/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            MlboardConfig::default()
        }
    }
}

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let Some((name, sub_matches)) = matches.subcommand() else {
        error!(event = "cli.command_missing");
        return Err("No command given".into());
    };

    events::log_command_started(name);
    let result = match name {
        "ago" => handle_ago_command(sub_matches),
        "duration" => handle_duration_command(sub_matches),
        "status" => handle_status_command(sub_matches),
        "diff" => handle_diff_command(sub_matches),
        "filter" => handle_filter_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown", command = name);
            Err(format!("Unknown command '{}'", name).into())
        }
    };
    events::log_command_finished(name, result.is_ok());
    result
}

fn handle_ago_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let timestamp = *matches
        .get_one::<f64>("timestamp")
        .ok_or("Timestamp argument is required")?;
    let watch = matches.get_flag("watch");
    let limit = matches.get_one::<usize>("count").copied();

    info!(
        event = "cli.ago_started",
        timestamp = timestamp,
        watch = watch
    );

    let Some(target) = timestamp_to_datetime(timestamp) else {
        eprintln!("❌ Invalid timestamp '{}'", timestamp);
        error!(event = "cli.ago_failed", timestamp = timestamp);
        return Err(format!("Invalid timestamp '{}'", timestamp).into());
    };

    let config = load_config_with_warning();
    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let timers = Rc::new(TimerQueue::new(clock.clone()));
    let label = LiveLabel::with_date_format(
        clock,
        timers.clone(),
        Some(config.display.date_format.clone()),
    );

    if !watch {
        label.set_target(target);
        println!("{}", label.text());
        info!(event = "cli.ago_completed", age_seconds = label.age_seconds());
        return Ok(());
    }

    // Only print when the text actually changes.
    let printed = Rc::new(Cell::new(0usize));
    let last = Rc::new(RefCell::new(String::new()));
    {
        let printed = printed.clone();
        label.add_watcher(move |text, _age| {
            let mut last = last.borrow_mut();
            if *last != text {
                println!("{}", text);
                *last = text.to_string();
                printed.set(printed.get() + 1);
            }
        });
    }
    label.set_target(target);

    let ticks = timers.run_blocking(|| limit.is_some_and(|n| printed.get() >= n));
    label.destroy();

    info!(
        event = "cli.ago_completed",
        ticks = ticks,
        updates = printed.get()
    );
    Ok(())
}

fn handle_duration_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let seconds = *matches
        .get_one::<f64>("seconds")
        .ok_or("Seconds argument is required")?;
    let precision = match matches.get_one::<u32>("precision") {
        Some(precision) => *precision,
        None => load_config_with_warning().display.duration_precision,
    };

    println!("{}", format_duration(seconds, precision));
    info!(
        event = "cli.duration_completed",
        seconds = seconds,
        precision = precision
    );
    Ok(())
}

fn handle_status_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let raw_status = matches
        .get_one::<String>("status")
        .ok_or("Status argument is required")?;
    let exit_code = matches.get_one::<i64>("exit-code").copied();
    let json_output = matches.get_flag("json");

    let age = match (
        matches.get_one::<u64>("age"),
        matches.get_one::<f64>("heartbeat"),
    ) {
        (Some(age), _) => *age,
        (None, Some(heartbeat)) => {
            let Some(heartbeat_at) = timestamp_to_datetime(*heartbeat) else {
                eprintln!("❌ Invalid heartbeat timestamp '{}'", heartbeat);
                error!(event = "cli.status_failed", heartbeat = *heartbeat);
                return Err(format!("Invalid heartbeat timestamp '{}'", heartbeat).into());
            };
            age_seconds(heartbeat_at, Utc::now())
        }
        (None, None) => 0,
    };

    let config = load_config_with_warning();
    let record = JobRecord::new(raw_status.as_str(), exit_code);
    let extended = record.extended_status_with(&config.status_thresholds(), age);
    let complete_class = matches
        .get_one::<String>("complete-class")
        .cloned()
        .unwrap_or_else(|| config.display.complete_class.clone());
    let badge_class = classify_color(&extended, &complete_class);

    if json_output {
        let response = StatusResponse {
            status: &record.status,
            exit_code,
            extended_status: &extended,
            label: extended.label(),
            badge_class,
            age_seconds: age,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!(
            "{}\t{}\theartbeat {}",
            extended.label(),
            badge_class,
            format_duration(-(age as f64), 0)
        );
    }

    info!(
        event = "cli.status_completed",
        status = %record.status,
        extended_status = %extended,
        age_seconds = age
    );
    Ok(())
}

fn read_json(path: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path, e))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse '{}' as JSON: {}", path, e))?;
    Ok(value)
}

fn handle_diff_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let left_path = matches
        .get_one::<String>("left")
        .ok_or("Left file argument is required")?;
    let right_path = matches
        .get_one::<String>("right")
        .ok_or("Right file argument is required")?;

    let documents = read_json(left_path).and_then(|left| Ok((left, read_json(right_path)?)));
    let (left, right) = match documents {
        Ok(documents) => documents,
        Err(e) => {
            eprintln!("❌ {}", e);
            error!(event = "cli.diff_failed", error = %e);
            events::log_app_error(e.as_ref());
            return Err(e);
        }
    };

    let equal = deep_equal(&left, &right);
    println!("{}", if equal { "equal" } else { "different" });
    info!(event = "cli.diff_completed", equal = equal);
    Ok(())
}

fn handle_filter_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let names: Vec<&str> = matches
        .get_many::<String>("names")
        .ok_or("At least one result name is required")?
        .map(String::as_str)
        .collect();

    let filter = match matches.get_one::<String>("pattern") {
        Some(pattern) => ResultFilter::new(pattern),
        None => load_config_with_warning().result_filter(),
    };
    let filter = match filter {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("❌ {}", e);
            error!(event = "cli.filter_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let shown = filter.filter(names.iter().copied());
    for name in &shown {
        println!("{}", name);
    }
    info!(
        event = "cli.filter_completed",
        total = names.len(),
        shown = shown.len()
    );
    Ok(())
}
