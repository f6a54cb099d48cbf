//! Port allocation by bind probing.
//!
//! # Responsibilities
//! - Probe consecutive ports on one interface
//! - Return the first port that can be bound
//! - Report the exhausted range when none can
//!
//! # Design Decisions
//! - Probe sockets are dropped immediately; the real bind happens later
//! - Probing uses the same std/tokio bind semantics as the real listener,
//!   leaving only a narrow race between probe and bind
//! - The candidate range stops at 65535 instead of wrapping

use std::net::{Ipv4Addr, SocketAddrV4, TcpListener};

use thiserror::Error;

/// Error type for port allocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    /// Every candidate port was already taken.
    #[error("could not find an available port on {host} in range {first}-{last}")]
    Exhausted { host: Ipv4Addr, first: u16, last: u16 },

    /// The allocator was asked to probe zero ports.
    #[error("port allocation needs at least one attempt")]
    NoAttempts,
}

/// Finds a free TCP port by binding candidates in order.
#[derive(Debug, Clone, Copy)]
pub struct PortAllocator {
    host: Ipv4Addr,
    max_attempts: u16,
}

impl PortAllocator {
    /// Allocator probing `max_attempts` ports on `host`.
    pub fn new(host: Ipv4Addr, max_attempts: u16) -> Self {
        Self { host, max_attempts }
    }

    /// Allocator probing on `127.0.0.1`.
    pub fn loopback(max_attempts: u16) -> Self {
        Self::new(Ipv4Addr::LOCALHOST, max_attempts)
    }

    /// Ports probed for `start_port`, in order.
    pub fn candidates(&self, start_port: u16) -> impl Iterator<Item = u16> {
        (0..self.max_attempts).map_while(move |offset| start_port.checked_add(offset))
    }

    /// Return the first bindable port in `[start_port, start_port + max_attempts - 1]`.
    pub fn allocate(&self, start_port: u16) -> Result<u16, PortError> {
        if self.max_attempts == 0 {
            return Err(PortError::NoAttempts);
        }

        let mut last = start_port;
        for port in self.candidates(start_port) {
            last = port;
            if self.probe(port) {
                tracing::debug!(host = %self.host, port, "Port available");
                return Ok(port);
            }
        }

        Err(PortError::Exhausted {
            host: self.host,
            first: start_port,
            last,
        })
    }

    /// Whether `port` can be bound right now. The probe socket is released on return.
    pub fn probe(&self, port: u16) -> bool {
        match TcpListener::bind(SocketAddrV4::new(self.host, port)) {
            Ok(_probe) => true,
            Err(e) => {
                tracing::debug!(host = %self.host, port, error = %e, "Port unavailable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hold `count` consecutive loopback ports, returning the first one.
    fn occupy_consecutive(count: u16) -> (u16, Vec<TcpListener>) {
        let mut base = 42_000u16;
        loop {
            let held: Vec<_> = (0..count)
                .filter_map(|i| TcpListener::bind((Ipv4Addr::LOCALHOST, base + i)).ok())
                .collect();
            if held.len() == count as usize {
                return (base, held);
            }
            base += count + 7;
        }
    }

    #[test]
    fn candidates_are_consecutive() {
        let allocator = PortAllocator::loopback(3);
        assert_eq!(allocator.candidates(9001).collect::<Vec<_>>(), vec![9001, 9002, 9003]);
    }

    #[test]
    fn candidates_stop_at_highest_port() {
        let allocator = PortAllocator::loopback(5);
        assert_eq!(allocator.candidates(65534).collect::<Vec<_>>(), vec![65534, 65535]);
    }

    #[test]
    fn skips_occupied_port() {
        let (base, held) = occupy_consecutive(1);
        let allocator = PortAllocator::loopback(4);

        let port = allocator.allocate(base).unwrap();
        assert!(port > base && port <= base + 3);
        drop(held);
    }

    #[test]
    fn returned_port_is_bindable() {
        let (base, held) = occupy_consecutive(1);
        drop(held);

        let port = PortAllocator::loopback(10).allocate(base).unwrap();
        assert!((base..base + 10).contains(&port));
        assert!(TcpListener::bind((Ipv4Addr::LOCALHOST, port)).is_ok());
    }

    #[test]
    fn exhausted_range_is_reported() {
        let (base, _held) = occupy_consecutive(3);
        let err = PortAllocator::loopback(3).allocate(base).unwrap_err();

        assert_eq!(
            err,
            PortError::Exhausted {
                host: Ipv4Addr::LOCALHOST,
                first: base,
                last: base + 2,
            }
        );
        assert!(err.to_string().contains(&format!("{}-{}", base, base + 2)));
    }

    #[test]
    fn zero_attempts_is_an_error() {
        assert_eq!(PortAllocator::loopback(0).allocate(9001), Err(PortError::NoAttempts));
    }
}
