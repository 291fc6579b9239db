use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::config::Config;
use crate::node::Node;
use crate::util;

#[derive(Parser)]
#[command(name = "haltnet")]
#[command(version, about = "Peer-to-peer node with a coordinated shutdown broadcast", long_about = None)]
struct Cli {
    /// Path to the node config file (defaults to HALTNET_CONFIG or ./haltnet.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the node until Ctrl+C or a received exit command
    Run,

    /// Send an exit command to every known peer, then terminate this node
    Broadcast {
        /// Exit code the whole network should terminate with
        #[arg(short, long, default_value_t = 0)]
        exit_code: i32,
    },

    /// Show version information
    Version,
}

pub async fn cli() -> anyhow::Result<()> {
    util::logging::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            let config = Config::load(cli.config.as_deref())?;
            let node = Node::start(config).await?;
            node.run().await?
        }
        Commands::Broadcast { exit_code } => {
            let config = Config::load(cli.config.as_deref())?;
            let node = Node::start(config).await?;
            // When the node is armed this terminates the process and never
            // returns here.
            let armed = node.broadcaster().broadcast(exit_code).await?;
            if !armed {
                warn!(
                    "shutdown mechanism is not armed on node {}; nothing sent",
                    node.id()
                );
            }
        }
        Commands::Version => {
            println!("haltnet version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
