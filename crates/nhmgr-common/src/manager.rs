//! Next-hop manager: next-hop, next-hop group and route operations.

use std::net::IpAddr;

use tracing::{debug, info, instrument};

use crate::commands::*;
use crate::config::NhMgrConfig;
use crate::error::{NhMgrError, NhMgrResult};
use crate::shell::{self, render_command, CommandRunner, ShellRunner};
use crate::types::{NextHopId, RouteOptions};

/// Next-hop Manager
///
/// Each operation issues one `ip` invocation and waits for it. Nothing is
/// cached between calls; ID allocation lives in
/// [`crate::NextHopIdAllocator`], which callers own.
pub struct NextHopMgr<R = ShellRunner> {
    config: NhMgrConfig,
    runner: R,
}

impl NextHopMgr<ShellRunner> {
    /// Create a manager that spawns real `ip` processes
    pub fn new(config: NhMgrConfig) -> Self {
        Self::with_runner(config, ShellRunner)
    }
}

impl Default for NextHopMgr<ShellRunner> {
    fn default() -> Self {
        Self::new(NhMgrConfig::default())
    }
}

impl<R: CommandRunner> NextHopMgr<R> {
    /// Create a manager over an arbitrary command runner
    pub fn with_runner(config: NhMgrConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Configuration in effect
    pub fn config(&self) -> &NhMgrConfig {
        &self.config
    }

    /// Runner that executes the built commands
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Fails with [`NhMgrError::CommandNotFound`] if the configured `ip`
    /// program cannot be resolved
    pub fn ensure_ip_available(&self) -> NhMgrResult<()> {
        if shell::is_command_available(&self.config.ip_cmd) {
            Ok(())
        } else {
            Err(NhMgrError::command_not_found(&self.config.ip_cmd))
        }
    }

    /// Create a next-hop entry
    ///
    /// Not idempotent: an existing `nhid` makes the kernel reject the call.
    #[instrument(skip(self))]
    pub async fn create_next_hop(
        &self,
        nhid: NextHopId,
        gateway: IpAddr,
        dev: &str,
    ) -> NhMgrResult<()> {
        let cmd = build_nexthop_add_cmd(&self.config.ip_cmd, nhid, gateway, dev);
        self.exec(&cmd, "Error adding nexthop").await?;
        info!("Created nexthop {} via {} dev {}", nhid, gateway, dev);
        Ok(())
    }

    /// Create a next-hop group over existing next-hops
    ///
    /// An empty member list is passed through and rejected by the kernel.
    #[instrument(skip(self))]
    pub async fn create_next_hop_group(
        &self,
        nhid: NextHopId,
        members: &[NextHopId],
    ) -> NhMgrResult<()> {
        let cmd = build_nexthop_group_add_cmd(&self.config.ip_cmd, nhid, members);
        self.exec(&cmd, "Error adding nexthop group").await?;
        info!(
            "Created nexthop group {} with members {}",
            nhid,
            group_member_list(members)
        );
        Ok(())
    }

    /// Delete the route to `network`, optionally within `table`
    #[instrument(skip(self))]
    pub async fn route_delete(&self, network: &str, table: Option<u32>) -> NhMgrResult<()> {
        let cmd = build_route_delete_cmd(&self.config.ip_cmd, network, table);
        info!(command = %render_command(&cmd), "RouteDelete");
        self.exec(&cmd, "Error deleting ip route").await
    }

    /// Best-effort removal of any route to `network` ahead of an add.
    ///
    /// The usual failure is that no such route exists, which is the desired
    /// state, so every failure is logged and dropped.
    pub async fn clear_existing_route(&self, network: &str, table: Option<u32>) {
        if let Err(e) = self.route_delete(network, table).await {
            debug!(network = %network, error = %e, "Ignoring route cleanup failure");
        }
    }

    /// Add a route to `network` resolved through next-hop (or group) `nhid`
    ///
    /// Any existing route to the same network in the same table is removed
    /// first via [`Self::clear_existing_route`].
    #[instrument(skip(self))]
    pub async fn route_add_next_hop(
        &self,
        network: &str,
        nhid: NextHopId,
        opts: &RouteOptions,
    ) -> NhMgrResult<()> {
        self.clear_existing_route(network, opts.table).await;

        let cmd = build_route_add_nhid_cmd(&self.config.ip_cmd, network, nhid, opts);
        info!(command = %render_command(&cmd), "RouteAddNextHop");
        self.exec(&cmd, "Error adding ip route").await
    }

    async fn exec(&self, cmd: &[String], context: &str) -> NhMgrResult<()> {
        match self.runner.run(cmd).await {
            Ok(_) => Ok(()),
            Err(e) => {
                info!("{}: {}", context, e.output().unwrap_or_default().trim_end());
                info!("{}: {}", context, e);
                Err(e)
            }
        }
    }
}
