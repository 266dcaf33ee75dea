//! Type definitions for next-hop and route operations

use std::net::IpAddr;

/// Kernel next-hop (and next-hop group) identifier. 0 is never valid.
pub type NextHopId = u32;

/// Main routing table ID.
pub const RT_TABLE_MAIN: u32 = 254;

/// Optional attributes of a route pointing at a next-hop.
///
/// Each field left as `None` is omitted from the `ip route` command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteOptions {
    /// Routing table ID
    pub table: Option<u32>,
    /// Route preference
    pub metric: Option<u32>,
    /// Route origin protocol number
    pub proto: Option<u8>,
    /// Route scope number
    pub scope: Option<u8>,
    /// Preferred source address
    pub source: Option<IpAddr>,
}

impl RouteOptions {
    /// Create options with every attribute omitted
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the routing table
    pub fn table(mut self, table: u32) -> Self {
        self.table = Some(table);
        self
    }

    /// Set the route metric
    pub fn metric(mut self, metric: u32) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Set the route protocol number
    pub fn proto(mut self, proto: u8) -> Self {
        self.proto = Some(proto);
        self
    }

    /// Set the route scope number
    pub fn scope(mut self, scope: u8) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Set the preferred source address
    pub fn source(mut self, source: IpAddr) -> Self {
        self.source = Some(source);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_options_default() {
        let opts = RouteOptions::new();
        assert_eq!(opts.table, None);
        assert_eq!(opts.metric, None);
        assert_eq!(opts.proto, None);
        assert_eq!(opts.scope, None);
        assert_eq!(opts.source, None);
    }

    #[test]
    fn test_route_options_builder() {
        let src: IpAddr = "192.168.1.1".parse().unwrap();
        let opts = RouteOptions::new()
            .table(RT_TABLE_MAIN)
            .metric(10)
            .proto(186)
            .scope(0)
            .source(src);
        assert_eq!(opts.table, Some(254));
        assert_eq!(opts.metric, Some(10));
        assert_eq!(opts.proto, Some(186));
        assert_eq!(opts.scope, Some(0));
        assert_eq!(opts.source, Some(src));
    }
}
