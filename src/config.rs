// Server settings
// Fixed defaults, overridable only from code

use chrono::NaiveTime;
use std::net::{Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Local wall-clock time of the daily summary
    pub summary_time: NaiveTime,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            summary_time: NaiveTime::MIN,
        }
    }
}

impl ServerConfig {
    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    pub fn with_summary_time(mut self, summary_time: NaiveTime) -> Self {
        self.summary_time = summary_time;
        self
    }
}
