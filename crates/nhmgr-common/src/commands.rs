//! Command builders for `ip nexthop` and `ip route` operations

use std::net::IpAddr;

use crate::types::{NextHopId, RouteOptions};

/// Build next-hop creation command
///
/// `<ip> nexthop add id <id> via <gateway> dev <dev>`
pub fn build_nexthop_add_cmd(
    ip_cmd: &str,
    nhid: NextHopId,
    gateway: IpAddr,
    dev: &str,
) -> Vec<String> {
    vec![
        ip_cmd.to_string(),
        "nexthop".to_string(),
        "add".to_string(),
        "id".to_string(),
        nhid.to_string(),
        "via".to_string(),
        gateway.to_string(),
        "dev".to_string(),
        dev.to_string(),
    ]
}

/// Joins group members into the `ip nexthop ... group` token, e.g. `5/7/9`
pub fn group_member_list(members: &[NextHopId]) -> String {
    members
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Build next-hop group creation command
///
/// `<ip> nexthop add id <id> group <id1>/<id2>/...`
pub fn build_nexthop_group_add_cmd(
    ip_cmd: &str,
    nhid: NextHopId,
    members: &[NextHopId],
) -> Vec<String> {
    vec![
        ip_cmd.to_string(),
        "nexthop".to_string(),
        "add".to_string(),
        "id".to_string(),
        nhid.to_string(),
        "group".to_string(),
        group_member_list(members),
    ]
}

/// Build route deletion command
///
/// `<ip> route delete to <network> [table <table>]`
pub fn build_route_delete_cmd(ip_cmd: &str, network: &str, table: Option<u32>) -> Vec<String> {
    let mut cmd = vec![
        ip_cmd.to_string(),
        "route".to_string(),
        "delete".to_string(),
        "to".to_string(),
        network.to_string(),
    ];

    if let Some(table) = table {
        cmd.extend(["table".to_string(), table.to_string()]);
    }

    cmd
}

/// Build route-via-next-hop creation command
///
/// `<ip> route add to <network> nhid <nhid> [table] [metric] [proto] [scope] [src]`,
/// clauses in that order and only when set.
pub fn build_route_add_nhid_cmd(
    ip_cmd: &str,
    network: &str,
    nhid: NextHopId,
    opts: &RouteOptions,
) -> Vec<String> {
    let mut cmd = vec![
        ip_cmd.to_string(),
        "route".to_string(),
        "add".to_string(),
        "to".to_string(),
        network.to_string(),
        "nhid".to_string(),
        nhid.to_string(),
    ];

    if let Some(table) = opts.table {
        cmd.extend(["table".to_string(), table.to_string()]);
    }
    if let Some(metric) = opts.metric {
        cmd.extend(["metric".to_string(), metric.to_string()]);
    }
    if let Some(proto) = opts.proto {
        cmd.extend(["proto".to_string(), proto.to_string()]);
    }
    if let Some(scope) = opts.scope {
        cmd.extend(["scope".to_string(), scope.to_string()]);
    }
    if let Some(source) = opts.source {
        cmd.extend(["src".to_string(), source.to_string()]);
    }

    cmd
}
