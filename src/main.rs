//! Binary entrypoint for the Venture CLI.
//!
//! Commands:
//! - `serve [--port <n>] [--bind <addr>]` - run the adventure server
//! - `init` - write a starter `config.toml`
//! - `connect [--host <h>] [--port <n>]` - play against a running server
//! - `check-world [--world <file>]` - validate a world file and summarize it
//!
//! See the library crate docs for module-level details: `venture::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{error, info};
use std::str::FromStr;

use venture::config::Config;
use venture::game::{canonical_world, load_world_from_json, WorldDefinition};
use venture::server::{client, GameServer};

#[derive(Parser)]
#[command(name = "venture")]
#[command(about = "A text adventure served over a plain TCP text protocol")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the adventure server
    Serve {
        /// TCP port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind (overrides config)
        #[arg(short, long)]
        bind: Option<String>,

        /// Keep accepting new players after a session ends
        #[arg(long)]
        forever: bool,
    },
    /// Write a default configuration file
    Init,
    /// Connect to a running server and play
    Connect {
        /// Server host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Server port
        #[arg(short, long, default_value_t = 50000)]
        port: u16,
    },
    /// Load and validate a world file, then print a summary
    CheckWorld {
        /// World JSON file (defaults to the configured one, or the built-in world)
        #[arg(short, long)]
        world: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing config file is fine for everything except an explicit load error.
    let config = match cli.command {
        Commands::Init => Config::default(),
        _ => match Config::load(&cli.config).await {
            Ok(config) => config,
            Err(e) if std::path::Path::new(&cli.config).exists() => return Err(e),
            Err(_) => Config::default(),
        },
    };
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Serve {
            port,
            bind,
            forever,
        } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            if forever {
                config.server.single_session = false;
            }
            info!("Starting Venture v{}", env!("CARGO_PKG_VERSION"));
            let server = GameServer::new(config)?;
            server.run().await?;
        }
        Commands::Init => {
            if std::path::Path::new(&cli.config).exists() {
                error!("{} already exists; not overwriting", cli.config);
                std::process::exit(1);
            }
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
        }
        Commands::Connect { host, port } => {
            client::connect(&host, port).await?;
        }
        Commands::CheckWorld { world } => {
            let path = world.or(config.game.world_file.clone());
            let definition = match &path {
                Some(path) => load_world_from_json(path)?,
                None => canonical_world(),
            };
            definition.check_start_room(&config.game.start_room)?;
            print_world_summary(path.as_deref().unwrap_or("<built-in>"), &definition);
        }
    }

    Ok(())
}

fn print_world_summary(origin: &str, world: &WorldDefinition) {
    println!("=== World: {} ===", origin);
    println!("Rooms: {}", world.graph.len());
    for room in world.graph.rooms() {
        let exits: Vec<String> = room
            .exits
            .iter()
            .map(|(dir, target)| format!("{}->{}", dir, target))
            .collect();
        println!(
            "  {} {}{}  [{}]",
            room.id,
            room.name,
            if room.dark { " (dark)" } else { "" },
            exits.join(" ")
        );
    }
    println!("Objects: {}", world.objects.len());
    for object in &world.objects {
        println!("  {} in room {}", object.id, object.room);
    }
    println!("Light source: {}", world.light_source);
}

fn init_logging(config: &Config, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => log::LevelFilter::from_str(&config.logging.level).unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config.logging.file.as_ref().and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Foreground runs also echo to the console
        let is_tty = atty::is(atty::Stream::Stdout);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            writeln!(
                fmt,
                "{} [{}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.args()
            )
        });
    }
    let _ = builder.try_init();
}
