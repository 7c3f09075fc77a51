use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use blueiris_rs::{
    Authentication, BlueIris, CamPause, Cameras, Clips, PTZ, PTZCommand, Status, SystemLog,
};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "blueiris")]
#[command(about = "Query and control a Blue Iris server")]
struct Cli {
    /// Server host name or address
    #[arg(long, env = "BLUEIRIS_HOST")]
    host: String,

    #[arg(long, env = "BLUEIRIS_PORT")]
    port: Option<u16>,

    #[arg(long, env = "BLUEIRIS_SCHEME", default_value = "http")]
    scheme: String,

    #[arg(short, long, env = "BLUEIRIS_USER")]
    user: String,

    #[arg(short, long, env = "BLUEIRIS_PASSWORD", hide_env_values = true)]
    password: String,

    /// Request timeout in seconds
    #[arg(
        long,
        env = "BLUEIRIS_TIMEOUT",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show system name, profile, signal and schedule
    Status,
    /// Show or change the active profile
    Profile {
        #[command(subcommand)]
        action: Option<SetAction>,
    },
    /// Show or change the signal (red, green, yellow)
    Signal {
        #[command(subcommand)]
        action: Option<SetAction>,
    },
    /// Show or change the active schedule
    Schedule {
        #[command(subcommand)]
        action: Option<ScheduleAction>,
    },
    /// List cameras
    Cameras {
        /// Include the synthetic "Index" group
        #[arg(long)]
        all: bool,
    },
    /// List alerts, for one camera or all of them
    Alerts { camera: Option<String> },
    /// List clips, for one camera or all of them
    Clips { camera: Option<String> },
    /// Fire a camera's motion trigger (admin only)
    Trigger { camera: String },
    /// Send a PTZ command, e.g. `left`, `zoom-in`, `PRESET_3` or a button code
    Ptz { camera: String, command: String },
    /// Pause a camera: indefinitely, cancel, 30s, 1m, 1h (admin only)
    Pause { camera: String, duration: String },
    /// Print the server log
    Log,
}

#[derive(Subcommand, Debug)]
enum SetAction {
    Set { name: String },
}

#[derive(Subcommand, Debug)]
enum ScheduleAction {
    Set { name: String },
    /// Toggle the schedule between run and hold
    Hold,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut client = BlueIris::new(&cli.host)
        .with_scheme(&cli.scheme)
        .with_timeout(Duration::from_secs(cli.timeout));
    if let Some(port) = cli.port {
        client = client.with_port(port);
    }

    client
        .login(&cli.user, &cli.password)
        .await
        .with_context(|| format!("logging in to {}", cli.host))?;

    let result = dispatch(&mut client, cli.command).await;

    if let Err(e) = client.logout().await {
        warn!(error = %e, "logout failed");
    }
    result
}

async fn dispatch(client: &mut BlueIris, command: Command) -> Result<()> {
    match command {
        Command::Status => {
            let status = client.status().await?;
            println!("System:   {} ({})", client.system_name(), client.version());
            println!("Profile:  {}", status.profile_name(client.profiles())?);
            println!("Signal:   {}", status.signal()?);
            if let Some(schedule) = status.schedule() {
                println!("Schedule: {}", schedule);
            }
            for (field, value) in status.fields() {
                println!("  {}: {}", field, value);
            }
        }

        Command::Profile { action: None } => {
            println!("{}", client.active_profile().await?);
            println!("Available: {}", client.profiles().join(", "));
        }
        Command::Profile {
            action: Some(SetAction::Set { name }),
        } => {
            client.set_profile(&name).await?;
            println!("Profile set to {}", name);
        }

        Command::Signal { action: None } => {
            println!("{}", client.active_signal().await?);
        }
        Command::Signal {
            action: Some(SetAction::Set { name }),
        } => {
            client.set_signal(&name).await?;
            println!("Signal set to {}", name.to_lowercase());
        }

        Command::Schedule { action: None } => {
            println!("{}", client.active_schedule().await?);
            if !client.schedules().is_empty() {
                println!("Available: {}", client.schedules().join(", "));
            }
        }
        Command::Schedule {
            action: Some(ScheduleAction::Set { name }),
        } => {
            client.set_schedule(&name).await?;
            println!("Schedule set to {}", name);
        }
        Command::Schedule {
            action: Some(ScheduleAction::Hold),
        } => {
            client.toggle_schedule_hold().await?;
            println!("Schedule run/hold toggled");
        }

        Command::Cameras { all } => {
            for camera in client.camera_list(all).await? {
                let state = if camera.is_enabled() { "" } else { " (disabled)" };
                println!("{:<12} {}{}", camera.code, camera.name, state);
            }
        }

        Command::Alerts { camera } => {
            for alert in client.alert_list(camera.as_deref()).await? {
                print_clip(&alert);
            }
        }
        Command::Clips { camera } => {
            for clip in client.clip_list(camera.as_deref()).await? {
                print_clip(&clip);
            }
        }

        Command::Trigger { camera } => {
            client.trigger_camera(&camera).await?;
            println!("Triggered {}", camera);
        }

        Command::Ptz { camera, command } => {
            let command = PTZCommand::from_input(&command)?;
            client.ptz(&camera, command).await?;
            println!("Sent {} to {}", command, camera);
        }

        Command::Pause { camera, duration } => {
            let pause = CamPause::from_str(&duration)
                .map_err(|_| anyhow::anyhow!("unknown pause duration '{}'", duration))?;
            client.pause_camera(&camera, pause).await?;
            println!("Pause {} applied to {}", pause, camera);
        }

        Command::Log => {
            for entry in client.system_log().await? {
                let when = entry
                    .timestamp()
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default();
                let severity = entry
                    .severity()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| entry.level.to_string());
                println!("{} {:<5} {:<12} {}", when, severity, entry.obj, entry.msg);
            }
        }
    }
    Ok(())
}

fn print_clip(clip: &blueiris_rs::Clip) {
    let when = clip
        .timestamp()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default();
    println!("{} {:<12} {}", when, clip.camera, clip.path);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(timeout: &str) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from([
            "blueiris", "--host", "bi.local", "-u", "admin", "-p", "secret", "--timeout", timeout,
            "status",
        ])
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(parse("0").is_err());
    }

    #[test]
    fn timeout_is_whole_seconds() {
        let cli = parse("5").unwrap();
        assert_eq!(cli.timeout, 5);
        assert!(matches!(cli.command, Command::Status));
        assert!(parse("1.5").is_err());
    }
}
