use std::fs::File;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use iotctl::Mode;
use iotctl::core::action::{Action, Direction};
use iotctl::core::config::{self, CliOverrides};
use iotctl::core::handler::ActionHandler;
use iotctl::core::sink::{LogSink, OutputSink, StdoutSink};
use iotctl::transport::ReqwestTransport;
use iotctl::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "iotctl", about = "Trigger simulated or real IoT device requests")]
struct Args {
    /// How actions are carried out
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Backend root used in real-backend mode, e.g. http://192.168.1.50:5000
    #[arg(long)]
    base_url: Option<String>,

    /// Full URL hit by the `command` action in real-backend mode
    #[arg(long)]
    device_url: Option<String>,

    /// Send one-shot output to iotctl.log only; the exit code reports the result
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Read the temperature sensor
    Temperature,
    /// Read the humidity sensor
    Humidity,
    /// Switch the light
    Light {
        #[arg(value_enum)]
        state: LightState,
    },
    /// Read the light state
    LightStatus,
    /// Turn the servo
    Motion {
        #[arg(value_enum)]
        direction: Direction,
        /// Angle in degrees (0-90)
        angle: u8,
    },
    /// Read the servo position
    MotionStatus,
    /// Backend connection status
    Status,
    /// Send the single device command
    Command,
    /// Interactive button panel (default)
    Panel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LightState {
    On,
    Off,
}

fn build_action(command: &Command, device_url: &str) -> Result<Option<Action>, Box<dyn std::error::Error>> {
    let action = match command {
        Command::Temperature => Action::get_temperature(),
        Command::Humidity => Action::get_humidity(),
        Command::Light { state: LightState::On } => Action::light_on(),
        Command::Light { state: LightState::Off } => Action::light_off(),
        Command::LightStatus => Action::light_status(),
        Command::Motion { direction, angle } => Action::motion(*direction, *angle)?,
        Command::MotionStatus => Action::motion_status(),
        Command::Status => Action::backend_status(),
        Command::Command => Action::device_command(device_url),
        Command::Panel => return Ok(None),
    };
    Ok(Some(action))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to iotctl.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("iotctl.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Failed to load config: {}, using defaults", e);
            eprintln!("warning: {e}, using defaults");
            config::IotConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            mode: args.mode,
            base_url: args.base_url.as_deref(),
            device_url: args.device_url.as_deref(),
        },
    );

    log::info!("iotctl starting up in {:?} mode", resolved.mode);

    let transport = Arc::new(ReqwestTransport::new(resolved.timeout));
    let handler = Arc::new(ActionHandler::from_config(transport, &resolved));

    let command = args.command.unwrap_or(Command::Panel);
    let action = match build_action(&command, &resolved.device_url) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("✗ {e}");
            return ExitCode::FAILURE;
        }
    };

    match action {
        None => match tui::run(resolved, handler) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("Panel exited with error: {}", e);
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        },
        Some(action) => {
            let sink: &dyn OutputSink = if args.quiet { &LogSink } else { &StdoutSink };
            match handler
                .dispatch(&action, resolved.mode, &resolved.base_url, sink)
                .await
            {
                Ok(outcome) if !outcome.is_failure() => ExitCode::SUCCESS,
                Ok(_) => ExitCode::FAILURE,
                Err(e) => {
                    log::error!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
