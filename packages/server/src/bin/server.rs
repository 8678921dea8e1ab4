//! Multi-room chat server.
//!
//! Rooms are created, listed and joined over TCP; chat messages are relayed
//! over UDP on the same host and port.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 9000
//! ```

use std::sync::Arc;

use clap::Parser;

use hiroba_server::{
    infrastructure::{datagram_pusher::UdpDatagramPusher, repository::InMemoryRoomRepository},
    ui::{AppState, DEFAULT_MAX_DATAGRAM_SIZE, Server, ServerConfig},
    usecase::{CreateRoomUseCase, JoinRoomUseCase, ListRoomsUseCase, RelayMessageUseCase},
};
use hiroba_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Multi-room chat server (TCP control plane, UDP relay)", long_about = None)]
struct Args {
    /// Host address to bind both endpoints to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number shared by the TCP and UDP endpoints
    #[arg(short = 'p', long, default_value = "8888")]
    port: u16,

    /// Largest accepted datagram in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_DATAGRAM_SIZE)]
    max_datagram_size: usize,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            max_datagram_size: args.max_datagram_size,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::from(Args::parse());

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize dependencies in order:
    // 1. Sockets
    // 2. Repository and DatagramPusher
    // 3. UseCases
    // 4. AppState

    // 1. Bind TCP and UDP on the same address
    let server = Server::bind(&config).await?;

    // 2. In-memory registry and the pusher sharing the dispatcher's socket
    let repository = Arc::new(InMemoryRoomRepository::new());
    let datagram_pusher = Arc::new(UdpDatagramPusher::new(server.datagram_socket()));
    let clock = Arc::new(SystemClock);

    // 3. UseCases
    let create_room_usecase = Arc::new(CreateRoomUseCase::new(repository.clone(), clock.clone()));
    let list_rooms_usecase = Arc::new(ListRoomsUseCase::new(repository.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(repository.clone()));
    let relay_message_usecase = Arc::new(RelayMessageUseCase::new(
        repository,
        datagram_pusher,
        clock,
    ));

    // 4. Run
    let state = AppState {
        create_room_usecase,
        list_rooms_usecase,
        join_room_usecase,
        relay_message_usecase,
    };
    server.run(state).await;

    Ok(())
}
