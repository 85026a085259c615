//! Handler for the `run` command.

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::{operator, output};
use crate::error::Result;
use crate::port::inbound::operator::runtime::{RunRequest, RunStartupSnapshot};

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let config_toml = operator::read_config_toml(&args.config.config)?;
    let machine_output = output::is_json();
    let request = build_run_request(args, config_toml, machine_output);
    let service = operator::operator();

    if !output::is_quiet() || machine_output {
        let startup = service.prepare_run(&request)?;
        output::header(env!("CARGO_PKG_VERSION"));
        print_startup_config(&startup);
    }

    service.execute_run(request).await
}

fn build_run_request(args: &RunArgs, config_toml: String, force_json_logs: bool) -> RunRequest {
    RunRequest {
        config_toml,
        log_level: args.log_level.clone(),
        json_logs: args.json_logs || force_json_logs,
    }
}

fn print_startup_config(startup: &RunStartupSnapshot) {
    output::section("Configuration");
    output::field("Database", &startup.database_url);
    output::field("Bus", &startup.bus_url);
    output::field("Subject", &startup.subject);
    output::field("Timeout", format!("{}ms", startup.persist_timeout_ms));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::inbound::cli::command::ConfigPathArg;
    use std::path::PathBuf;

    fn args(log_level: Option<&str>, json_logs: bool) -> RunArgs {
        RunArgs {
            config: ConfigPathArg {
                config: PathBuf::from("config.toml"),
            },
            log_level: log_level.map(str::to_string),
            json_logs,
        }
    }

    #[test]
    fn request_carries_flags() {
        let request = build_run_request(&args(Some("debug"), false), "x = 1".into(), false);
        assert_eq!(request.config_toml, "x = 1");
        assert_eq!(request.log_level.as_deref(), Some("debug"));
        assert!(!request.json_logs);
    }

    #[test]
    fn json_output_forces_json_logs() {
        let request = build_run_request(&args(None, false), String::new(), true);
        assert!(request.json_logs);
    }
}
