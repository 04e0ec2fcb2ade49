//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use readysrv::{NoopLogger, ReadyServer, ServerBuilder, ServerError};
use tokio::task::JoinHandle;

/// A server running on an ephemeral localhost port.
pub struct RunningServer {
    pub server: Arc<ReadyServer>,
    pub handle: JoinHandle<Result<(), ServerError>>,
    pub addr: SocketAddr,
}

impl RunningServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a server from `builder`, bound to 127.0.0.1 on a free port.
pub async fn start(builder: ServerBuilder) -> RunningServer {
    let server = Arc::new(builder.address("127.0.0.1:0").logger(NoopLogger).build());

    let handle = {
        let server = server.clone();
        tokio::spawn(async move { server.run().await })
    };

    let addr = tokio::time::timeout(Duration::from_secs(5), server.wait_serving())
        .await
        .expect("server did not start in time")
        .expect("server halted before serving");

    RunningServer {
        server,
        handle,
        addr,
    }
}

/// HTTP client without connection pooling or proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
