//! nhctl - next-hop and route control
//!
//! Thin front end over `nhmgr_common`; every subcommand maps to one
//! `NextHopMgr` operation.

use std::net::IpAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use nhmgr_common::{
    is_command_available, NextHopId, NextHopIdAllocator, NextHopMgr, NhMgrConfig, RouteOptions,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Manage kernel next-hops and routes through iproute2
#[derive(Parser, Debug)]
#[command(name = "nhctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Program used for `ip` invocations (overrides the config file)
    #[arg(long, global = true)]
    ip_cmd: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report whether the configured `ip` program is available
    Check,
    /// Next-hop operations
    #[command(subcommand)]
    Nexthop(NexthopCommand),
    /// Next-hop group operations
    #[command(subcommand)]
    Group(GroupCommand),
    /// Route operations
    #[command(subcommand)]
    Route(RouteCommand),
}

#[derive(Subcommand, Debug)]
enum NexthopCommand {
    /// Create a next-hop
    Add {
        /// Next-hop ID
        #[arg(long)]
        id: NextHopId,
        /// Gateway address
        #[arg(long)]
        via: IpAddr,
        /// Egress device
        #[arg(long)]
        dev: String,
    },
}

#[derive(Subcommand, Debug)]
enum GroupCommand {
    /// Create a next-hop group
    Add {
        /// Group ID (allocated after the highest member if omitted)
        #[arg(long)]
        id: Option<NextHopId>,
        /// Member next-hop IDs
        #[arg(required = true)]
        members: Vec<NextHopId>,
    },
}

#[derive(Subcommand, Debug)]
enum RouteCommand {
    /// Add a route through a next-hop or group
    Add {
        /// Destination network, e.g. 10.0.0.0/24
        network: String,
        /// Next-hop or group ID
        #[arg(long)]
        nhid: NextHopId,
        #[command(flatten)]
        opts: RouteArgs,
    },
    /// Delete a route
    Del {
        /// Destination network
        network: String,
        /// Routing table ID
        #[arg(long)]
        table: Option<u32>,
    },
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Routing table ID
    #[arg(long)]
    table: Option<u32>,
    /// Route metric
    #[arg(long)]
    metric: Option<u32>,
    /// Route protocol number
    #[arg(long)]
    proto: Option<u8>,
    /// Route scope number
    #[arg(long)]
    scope: Option<u8>,
    /// Preferred source address
    #[arg(long)]
    src: Option<IpAddr>,
}

impl From<RouteArgs> for RouteOptions {
    fn from(args: RouteArgs) -> Self {
        RouteOptions {
            table: args.table,
            metric: args.metric,
            proto: args.proto,
            scope: args.scope,
            source: args.src,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<NhMgrConfig> {
    let mut config = match &cli.config {
        Some(path) => NhMgrConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => NhMgrConfig::default(),
    };
    if let Some(ip_cmd) = &cli.ip_cmd {
        config = config.with_ip_cmd(ip_cmd.clone());
    }
    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;

    let mgr = NextHopMgr::new(config);
    if mgr.config().check_binary && !matches!(cli.command, Command::Check) {
        mgr.ensure_ip_available()?;
    }

    match cli.command {
        Command::Check => {
            let ip_cmd = &mgr.config().ip_cmd;
            let available = is_command_available(ip_cmd);
            println!("{}: {}", ip_cmd, if available { "available" } else { "missing" });
            anyhow::ensure!(available, "'{}' not found", ip_cmd);
        }
        Command::Nexthop(NexthopCommand::Add { id: nhid, via, dev }) => {
            mgr.create_next_hop(nhid, via, &dev)
                .await
                .with_context(|| format!("creating nexthop {}", nhid))?;
            println!("{}", nhid);
        }
        Command::Group(GroupCommand::Add { id, members }) => {
            // Each invocation is its own process, so an omitted ID is
            // allocated above the highest member rather than from 1.
            let nhid = match id {
                Some(id) => id,
                None => {
                    let highest = members.iter().copied().max().unwrap_or(0);
                    NextHopIdAllocator::starting_after(highest).next_id()?
                }
            };
            mgr.create_next_hop_group(nhid, &members)
                .await
                .with_context(|| format!("creating nexthop group {}", nhid))?;
            println!("{}", nhid);
        }
        Command::Route(RouteCommand::Add {
            network,
            nhid,
            opts,
        }) => {
            let opts = RouteOptions::from(opts);
            mgr.route_add_next_hop(&network, nhid, &opts)
                .await
                .with_context(|| format!("adding route to {}", network))?;
            info!("Route to {} installed via nhid {}", network, nhid);
        }
        Command::Route(RouteCommand::Del { network, table }) => {
            mgr.route_delete(&network, table)
                .await
                .with_context(|| format!("deleting route to {}", network))?;
        }
    }

    Ok(())
}
