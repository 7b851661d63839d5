//! FGP daemon for GitHub year-in-review statistics.
//!
//! Computes streaks, peak periods, language shares and totals from data the
//! caller already fetched. The daemon never talks to GitHub itself.
//!
//! # Usage
//! ```bash
//! fgp-wrapped start           # Start daemon in background
//! fgp-wrapped start -f        # Start in foreground
//! fgp-wrapped stop            # Stop daemon
//! fgp-wrapped status          # Check daemon status
//! ```
//!
//! # Configuration
//! Optional YAML file, resolved in order:
//! 1. FGP_WRAPPED_CONFIG environment variable
//! 2. $XDG_CONFIG_HOME/fgp/wrapped.yml
//! 3. ~/.config/fgp/wrapped.yml
//!
//! # Methods
//! - `wrapped.streaks` - Longest and current contribution streaks
//! - `wrapped.peaks` - Busiest day, week and month
//! - `wrapped.languages` - Language percentage breakdown
//! - `wrapped.stars` - Total stars across repositories
//! - `wrapped.summary` - Full year-in-review summary
//!
//! # Test
//! ```bash
//! fgp call wrapped.stars -p '{"repositories": [{"stars": 5}, {"stars": 12}]}'
//! fgp call wrapped.summary -p "$(cat wrapped-input.json)"
//! ```
//!
//! CHANGELOG (recent first, max 5 entries)
//! 02/03/2026 - Load YAML config, RUST_LOG overrides the configured filter
//! 01/28/2026 - Initial implementation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fgp_daemon::{cleanup_socket, FgpServer};
use std::path::Path;
use std::process::Command;
use tracing_subscriber::EnvFilter;

use fgp_wrapped::{WrappedConfig, WrappedService};

const DEFAULT_SOCKET: &str = "~/.fgp/services/wrapped/daemon.sock";

#[derive(Parser)]
#[command(name = "fgp-wrapped")]
#[command(about = "FGP daemon for GitHub year-in-review statistics")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the FGP daemon
    Start {
        /// Socket path (default: ~/.fgp/services/wrapped/daemon.sock)
        #[arg(short, long, default_value = DEFAULT_SOCKET)]
        socket: String,

        /// Run in foreground (don't daemonize)
        #[arg(short, long)]
        foreground: bool,
    },

    /// Stop the running daemon
    Stop {
        /// Socket path
        #[arg(short, long, default_value = DEFAULT_SOCKET)]
        socket: String,
    },

    /// Check daemon status
    Status {
        /// Socket path
        #[arg(short, long, default_value = DEFAULT_SOCKET)]
        socket: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start { socket, foreground } => cmd_start(socket, foreground),
        Commands::Stop { socket } => cmd_stop(socket),
        Commands::Status { socket } => cmd_status(socket),
    }
}

fn init_logging(config: &WrappedConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_server(config: WrappedConfig, socket_path: &str) -> Result<()> {
    init_logging(&config);

    let service = WrappedService::new(config).context("Failed to create WrappedService")?;
    let server = FgpServer::new(service, socket_path).context("Failed to create FGP server")?;
    server.serve().context("Server error")?;

    Ok(())
}

fn cmd_start(socket: String, foreground: bool) -> Result<()> {
    let socket_path = shellexpand::tilde(&socket).to_string();
    let config = WrappedConfig::load().context("Failed to load configuration")?;

    // Create parent directory
    if let Some(parent) = Path::new(&socket_path).parent() {
        std::fs::create_dir_all(parent).context("Failed to create socket directory")?;
    }

    let pid_file = format!("{}.pid", socket_path);

    println!("Starting fgp-wrapped daemon...");
    println!("Socket: {}", socket_path);
    println!();
    println!("Available methods:");
    println!("  wrapped.streaks    - Longest and current contribution streaks");
    println!("  wrapped.peaks      - Busiest day, week and month");
    println!("  wrapped.languages  - Language percentage breakdown");
    println!("  wrapped.stars      - Total stars across repositories");
    println!("  wrapped.summary    - Full year-in-review summary");
    println!();
    println!("Test with:");
    println!("  fgp call wrapped.stars -p '{{\"repositories\": [{{\"stars\": 5}}]}}'");
    println!();

    if foreground {
        run_server(config, &socket_path)?;
    } else {
        // Tokio runtime inside the service must be created AFTER fork
        use daemonize::Daemonize;

        let daemonize = Daemonize::new()
            .pid_file(&pid_file)
            .working_directory("/tmp");

        match daemonize.start() {
            Ok(_) => run_server(config, &socket_path)?,
            Err(e) => {
                eprintln!("Failed to daemonize: {}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn cmd_stop(socket: String) -> Result<()> {
    let socket_path = shellexpand::tilde(&socket).to_string();
    let pid_file = format!("{}.pid", socket_path);

    if Path::new(&socket_path).exists() {
        if let Ok(client) = fgp_daemon::FgpClient::new(&socket_path) {
            if let Ok(response) = client.stop() {
                if response.ok {
                    println!("Daemon stopped.");
                    return Ok(());
                }
            }
        }
    }

    let pid_str = std::fs::read_to_string(&pid_file)
        .context("Failed to read PID file - daemon may not be running")?;
    let pid: i32 = pid_str.trim().parse().context("Invalid PID in file")?;

    if !pid_matches_process(pid, "fgp-wrapped") {
        anyhow::bail!("Refusing to stop PID {}: unexpected process", pid);
    }

    println!("Stopping fgp-wrapped daemon (PID: {})...", pid);

    unsafe {
        libc::kill(pid, libc::SIGTERM);
    }

    // Give the server a moment to unlink its socket
    std::thread::sleep(std::time::Duration::from_millis(500));

    let _ = cleanup_socket(&socket_path, Some(Path::new(&pid_file)));
    let _ = std::fs::remove_file(&pid_file);

    println!("Daemon stopped.");

    Ok(())
}

fn pid_matches_process(pid: i32, expected_name: &str) -> bool {
    let output = Command::new("ps")
        .args(["-p", &pid.to_string(), "-o", "comm="])
        .output();

    match output {
        Ok(output) if output.status.success() => {
            let command = String::from_utf8_lossy(&output.stdout);
            command.trim().contains(expected_name)
        }
        _ => false,
    }
}

fn cmd_status(socket: String) -> Result<()> {
    let socket_path = shellexpand::tilde(&socket).to_string();

    if !Path::new(&socket_path).exists() {
        println!("Status: NOT RUNNING");
        println!("Socket {} does not exist", socket_path);
        return Ok(());
    }

    use std::io::{BufRead, BufReader, Write};
    use std::os::unix::net::UnixStream;

    match UnixStream::connect(&socket_path) {
        Ok(mut stream) => {
            let request = r#"{"id":"status","v":1,"method":"health","params":{}}"#;
            writeln!(stream, "{}", request)?;
            stream.flush()?;

            let mut reader = BufReader::new(stream);
            let mut response = String::new();
            reader.read_line(&mut response)?;

            println!("Status: RUNNING");
            println!("Socket: {}", socket_path);
            println!("Health: {}", response.trim());
        }
        Err(e) => {
            println!("Status: NOT RESPONDING");
            println!("Socket exists but connection failed: {}", e);
        }
    }

    Ok(())
}
