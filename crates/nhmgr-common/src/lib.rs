//! Next-hop and route management through the iproute2 `ip` utility.
//!
//! This crate drives kernel next-hop objects by shelling out to `ip`:
//!
//! - [`allocator`]: Process-local next-hop ID allocation
//! - [`shell`]: Command execution and PATH lookup
//! - [`commands`]: Argument vectors for `ip nexthop` / `ip route`
//! - [`NextHopMgr`]: The operations, with failure logging
//! - [`error`]: Error types
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use nhmgr_common::{NextHopIdAllocator, NextHopMgr, NhMgrConfig, RouteOptions};
//!
//! let ids = Arc::new(NextHopIdAllocator::new());
//! let mgr = NextHopMgr::new(NhMgrConfig::default());
//!
//! let a = ids.next_id()?;
//! let b = ids.next_id()?;
//! mgr.create_next_hop(a, "10.1.0.1".parse()?, "eth0").await?;
//! mgr.create_next_hop(b, "10.2.0.1".parse()?, "eth1").await?;
//!
//! let group = ids.next_id()?;
//! mgr.create_next_hop_group(group, &[a, b]).await?;
//! mgr.route_add_next_hop("10.0.0.0/24", group, &RouteOptions::new().metric(10))
//!     .await?;
//! ```

pub mod allocator;
pub mod commands;
pub mod config;
pub mod error;
pub mod manager;
pub mod shell;
pub mod types;

// Re-export commonly used items at crate root
pub use allocator::NextHopIdAllocator;
pub use config::NhMgrConfig;
pub use error::{NhMgrError, NhMgrResult};
pub use manager::NextHopMgr;
pub use shell::{is_command_available, run_command, CommandRunner, ShellRunner};
pub use types::{NextHopId, RouteOptions, RT_TABLE_MAIN};
