//! Application lifecycle log events shared by the CLI and embedders.

use tracing::{error, info};

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION")
    );
}

pub fn log_command_started(command: &str) {
    info!(event = "core.app.command_started", command = command);
}

pub fn log_command_finished(command: &str, success: bool) {
    if success {
        info!(event = "core.app.command_completed", command = command);
    } else {
        error!(event = "core.app.command_failed", command = command);
    }
}

pub fn log_app_error(error: &dyn std::error::Error) {
    error!(
        event = "core.app.error_occurred",
        error = %error,
        error_type = std::any::type_name_of_val(error)
    );
}
