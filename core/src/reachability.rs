//! Synchronous "is there a usable network path" probe.
//!
//! A UDP socket `connect` performs a route lookup without sending anything.
//! If the OS can pick a route to a public address and a non-loopback local
//! address to send from, a default route exists. Interfaces that are up but
//! still waiting on a setup step (captive portal, on-demand VPN) usually have
//! no default route yet and report as disconnected. Nothing is cached.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use tracing::trace;

/// TEST-NET-1; only the route lookup matters, nothing is sent.
const DEFAULT_TARGET: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)), 53);

/// True when a default route to the network is currently available.
pub fn is_connected() -> bool {
    RouteProbe::default().is_connected()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteProbe {
    target: SocketAddr,
}

impl Default for RouteProbe {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET)
    }
}

impl RouteProbe {
    pub fn new(target: SocketAddr) -> Self {
        Self { target }
    }

    pub fn is_connected(&self) -> bool {
        let bind: SocketAddr = match self.target {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };

        let local = UdpSocket::bind(bind).and_then(|socket| {
            socket.connect(self.target)?;
            socket.local_addr()
        });

        match local {
            Ok(addr) => {
                let ip = addr.ip();
                trace!(probe = %self.target, local = %ip, "route lookup");
                !ip.is_unspecified() && !ip.is_loopback()
            }
            Err(error) => {
                trace!(probe = %self.target, %error, "no route");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_target_is_not_a_network_path() {
        let probe = RouteProbe::new((Ipv4Addr::LOCALHOST, 9).into());
        assert!(!probe.is_connected());
    }

    #[test]
    fn probe_is_repeatable() {
        let probe = RouteProbe::default();
        assert_eq!(probe.is_connected(), probe.is_connected());
    }
}
