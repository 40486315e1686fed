// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Terminal dashboard for a webhouse controller.
//!
//! Prints every status update as it arrives and reads commands from stdin,
//! one per line. Type `help` for the list.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt};
use webhouse_client::display::render::{self, Rendered, render_connection, render_field};
use webhouse_client::{
    Appliance, Command, Connection, ConnectionStatus, ControllerConfig, DisplaySink, LampId,
    StatusKey, SwitchState,
};

const HELP: &str = "\
commands:
  dim <lamp> <value>        set a lamp's dimmer level
  temp <value>              set the target temperature
  <heat|l1|l2|tv|alarm> <on|off>
  status                    request a status frame
  reconnect                 reopen the connection
  quit";

/// Webhouse dashboard
#[derive(Parser, Debug)]
#[command(name = "webhouse-dash")]
#[command(about = "Terminal dashboard for a webhouse home-automation controller")]
#[command(version)]
struct Args {
    /// Controller host name or IP address
    #[arg(long)]
    host: Option<String>,

    /// Controller WebSocket port
    #[arg(short, long)]
    port: Option<u16>,

    /// Interval between status polls in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// JSON configuration file; command-line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn controller_config(&self) -> Result<ControllerConfig, webhouse_client::ConfigError> {
        let mut config = match &self.config {
            Some(path) => ControllerConfig::from_json_file(path)?,
            None => ControllerConfig::default(),
        };
        if let Some(host) = &self.host {
            config = ControllerConfig::new(host.clone())
                .with_port(config.port())
                .with_poll_interval(config.poll_interval())
                .with_connect_timeout(config.connect_timeout());
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(ms) = self.poll_interval_ms {
            config = config.with_poll_interval(Duration::from_millis(ms));
        }
        config.validate()?;
        Ok(config)
    }
}

/// Prints rendered updates to stdout.
struct TerminalSink;

impl DisplaySink for TerminalSink {
    fn set_connection_status(&mut self, status: ConnectionStatus) {
        println!("{}", paint(&render_connection(status)));
    }

    fn set_field(&mut self, key: StatusKey, raw_value: &str) {
        println!("{key}: {}", paint(&render_field(key, raw_value)));
    }
}

/// Maps a palette color onto an ANSI foreground code.
fn foreground(color: &str) -> Option<&'static str> {
    match color {
        render::GREEN => Some("32"),
        render::RED => Some("31"),
        render::ORANGE => Some("33"),
        render::GREY => Some("90"),
        render::WHITE => Some("97"),
        _ => None,
    }
}

/// Maps a palette color onto an ANSI background code.
fn background(color: &str) -> Option<&'static str> {
    match color {
        render::GREEN => Some("42"),
        render::RED => Some("41"),
        render::ORANGE => Some("43"),
        render::GREY => Some("100"),
        render::WHITE => Some("107"),
        _ => None,
    }
}

fn paint(rendered: &Rendered) -> String {
    let mut codes = Vec::new();
    if rendered.style.bold {
        codes.push("1");
    }
    codes.extend(rendered.style.color.and_then(foreground));
    codes.extend(rendered.style.background.and_then(background));

    if codes.is_empty() {
        rendered.text.clone()
    } else {
        format!("\x1b[{}m{}\x1b[0m", codes.join(";"), rendered.text)
    }
}

#[derive(Debug, PartialEq)]
enum Intent {
    Send(Command),
    Reconnect,
    Help,
    Quit,
}

fn parse_intent(line: &str) -> Result<Option<Intent>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let intent = match words.as_slice() {
        [] => return Ok(None),
        ["quit" | "exit"] => Intent::Quit,
        ["help" | "?"] => Intent::Help,
        ["reconnect"] => Intent::Reconnect,
        ["status"] => Intent::Send(Command::GetStatus),
        ["dim", lamp, value] => {
            let lamp: LampId = lamp.parse().map_err(|e| format!("{e}"))?;
            let value: i64 = value
                .parse()
                .map_err(|_| format!("dimmer value must be an integer: {value}"))?;
            Intent::Send(Command::set_dimmer(lamp, value))
        }
        ["temp", value] => {
            let value: f64 = value
                .parse()
                .map_err(|_| format!("temperature must be a number: {value}"))?;
            Intent::Send(Command::set_target_temp(value))
        }
        [appliance, state] => {
            let appliance: Appliance = appliance.parse().map_err(|e| format!("{e}"))?;
            let state: SwitchState = state.parse().map_err(|e| format!("{e}"))?;
            Intent::Send(Command::switch(appliance, state))
        }
        _ => return Err(format!("unrecognized command: {line}")),
    };
    Ok(Some(intent))
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,webhouse_client=debug"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args = Args::parse();
    let config = match args.controller_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Dashboard failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &ControllerConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Controller: {}", config.url());

    let mut connection = Connection::open(config, TerminalSink)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match parse_intent(&line) {
            Ok(None) => {}
            Ok(Some(Intent::Send(command))) => {
                if let Err(e) = connection.send(&command) {
                    if e.is_not_connected() {
                        eprintln!("not connected; type `reconnect` to try again");
                    } else {
                        eprintln!("send failed: {e}");
                    }
                }
            }
            Ok(Some(Intent::Reconnect)) => {
                connection.close().await;
                connection = Connection::open(config, TerminalSink)?;
            }
            Ok(Some(Intent::Help)) => println!("{HELP}"),
            Ok(Some(Intent::Quit)) => break,
            Err(message) => eprintln!("{message}"),
        }
    }

    connection.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dimmer() {
        let intent = parse_intent("dim 1 75").unwrap();
        assert_eq!(
            intent,
            Some(Intent::Send(Command::set_dimmer(LampId::first(), 75)))
        );
    }

    #[test]
    fn parses_switches() {
        assert_eq!(
            parse_intent("heat on").unwrap(),
            Some(Intent::Send(Command::switch(Appliance::Heating, SwitchState::On)))
        );
        assert_eq!(
            parse_intent("  L2   off ").unwrap(),
            Some(Intent::Send(Command::switch(Appliance::Lamp2, SwitchState::Off)))
        );
    }

    #[test]
    fn parses_control_words() {
        assert_eq!(parse_intent("").unwrap(), None);
        assert_eq!(parse_intent("quit").unwrap(), Some(Intent::Quit));
        assert_eq!(parse_intent("reconnect").unwrap(), Some(Intent::Reconnect));
        assert_eq!(
            parse_intent("status").unwrap(),
            Some(Intent::Send(Command::GetStatus))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_intent("dim 1 bright").is_err());
        assert!(parse_intent("dim 1:2 10").is_err());
        assert!(parse_intent("temp warm").is_err());
        assert!(parse_intent("fridge on").is_err());
        assert!(parse_intent("tv maybe").is_err());
        assert!(parse_intent("a b c d").is_err());
    }

    #[test]
    fn paints_alarm_banner() {
        let banner = paint(&render_field(StatusKey::AlarmTriggered, "1"));
        assert_eq!(banner, "\x1b[97;41mALARM!\x1b[0m");
    }

    #[test]
    fn every_palette_color_has_ansi_codes() {
        for color in render::PALETTE {
            assert!(foreground(color).is_some(), "no foreground for {color}");
            assert!(background(color).is_some(), "no background for {color}");
        }
    }

    #[test]
    fn flags_override_config_file() {
        let args = Args {
            host: Some("10.0.0.7".to_string()),
            port: Some(8080),
            poll_interval_ms: None,
            config: None,
        };
        let config = args.controller_config().unwrap();
        assert_eq!(config.url(), "ws://10.0.0.7:8080");
        assert_eq!(config.poll_interval(), Duration::from_millis(2000));
    }
}
