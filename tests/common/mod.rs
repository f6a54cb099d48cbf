//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::{Ipv4Addr, SocketAddr, TcpListener as StdListener};
use std::sync::Arc;
use std::time::Duration;

use echo_target::lifecycle::startup;
use echo_target::observability::MemorySink;
use echo_target::{EchoServer, Shutdown, Target, TargetConfig};

/// An in-process target serving on loopback.
pub struct RunningTarget {
    pub target: Target,
    pub addr: SocketAddr,
    pub diagnostics: Arc<MemorySink>,
    pub shutdown: Shutdown,
}

impl RunningTarget {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for RunningTarget {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Allocate, bind and serve a target whose port search begins at `start_port`.
pub async fn start_target(start_port: u16) -> RunningTarget {
    let config = TargetConfig::with_start_port(start_port);
    let target = startup::prepare(&config).unwrap();
    let listener = startup::bind(&config, &target).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let diagnostics = Arc::new(MemorySink::new());
    let shutdown = Shutdown::new();
    let server = EchoServer::with_diagnostics(&config, &target, diagnostics.clone());
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    RunningTarget {
        target,
        addr,
        diagnostics,
        shutdown,
    }
}

/// A loopback port that was free a moment ago.
pub fn free_port() -> u16 {
    let probe = StdListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    probe.local_addr().unwrap().port()
}

/// Hold `count` consecutive loopback ports, returning the first one.
pub fn occupy_consecutive(count: u16) -> (u16, Vec<StdListener>) {
    let mut base = 47_000u16;
    loop {
        let held: Vec<_> = (0..count)
            .filter_map(|i| StdListener::bind((Ipv4Addr::LOCALHOST, base + i)).ok())
            .collect();
        if held.len() == count as usize {
            return (base, held);
        }
        base += count + 3;
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
