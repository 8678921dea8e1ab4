//! Server execution logic.

use std::{future::Future, io, net::SocketAddr, sync::Arc};

use tokio::net::{TcpListener, UdpSocket};

use super::{
    handler::{control::handle_control_connection, dispatcher::run_dispatcher},
    signal::shutdown_signal,
    state::AppState,
};

/// Largest datagram the dispatcher accepts by default
pub const DEFAULT_MAX_DATAGRAM_SIZE: usize = 1024;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address shared by the TCP and UDP endpoints
    pub host: String,
    /// Port shared by the TCP and UDP endpoints (0 picks a free port)
    pub port: u16,
    /// Receive buffer size of the dispatcher
    pub max_datagram_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8888,
            max_datagram_size: DEFAULT_MAX_DATAGRAM_SIZE,
        }
    }
}

/// Chat server bound to its control (TCP) and data (UDP) endpoints
///
/// # Example
///
/// ```ignore
/// let server = Server::bind(&ServerConfig::default()).await?;
/// let pusher = Arc::new(UdpDatagramPusher::new(server.datagram_socket()));
/// // ... build the use cases and AppState ...
/// server.run(app_state).await;
/// ```
pub struct Server {
    listener: TcpListener,
    socket: Arc<UdpSocket>,
    max_datagram_size: usize,
}

impl Server {
    /// Bind both endpoints to the same address.
    ///
    /// The UDP socket is bound to the port the TCP listener actually got, so
    /// port 0 yields one free port shared by both transports.
    ///
    /// Fails with `InvalidInput` when `max_datagram_size` is 0.
    pub async fn bind(config: &ServerConfig) -> io::Result<Self> {
        if config.max_datagram_size == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "max datagram size must be at least 1 byte",
            ));
        }

        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr).await?;
        let local_addr = listener.local_addr()?;
        let socket = UdpSocket::bind(local_addr).await?;

        tracing::info!("Control plane (TCP) listening on {}", local_addr);
        tracing::info!("Data plane (UDP) listening on {}", socket.local_addr()?);

        Ok(Self {
            listener,
            socket: Arc::new(socket),
            max_datagram_size: config.max_datagram_size,
        })
    }

    /// Address of the control endpoint
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Address of the data endpoint
    pub fn datagram_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Shared datagram socket, for building the outbound pusher
    pub fn datagram_socket(&self) -> Arc<UdpSocket> {
        self.socket.clone()
    }

    /// Serve until Ctrl+C (or SIGTERM).
    pub async fn run(self, state: AppState) {
        tracing::info!("Press Ctrl+C to shutdown");
        self.run_until(state, shutdown_signal()).await;
    }

    /// Serve until `shutdown` resolves.
    ///
    /// Spawns the single dispatcher task, then accepts control connections,
    /// one task each. On shutdown the dispatcher is aborted and open sessions
    /// are left to die with the runtime.
    pub async fn run_until<F>(self, state: AppState, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        let state = Arc::new(state);
        let dispatcher = tokio::spawn(run_dispatcher(
            self.socket.clone(),
            state.clone(),
            self.max_datagram_size,
        ));

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        tracing::info!("Received request from {}", peer);
                        tokio::spawn(handle_control_connection(stream, peer, state.clone()));
                    }
                    Err(e) => tracing::error!("Failed to accept connection: {}", e),
                },
            }
        }

        dispatcher.abort();
        tracing::info!("Server stopped.");
    }
}
