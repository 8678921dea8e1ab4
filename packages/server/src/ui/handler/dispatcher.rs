//! UDP broadcast dispatcher.
//!
//! Exactly one dispatcher task exists per server. It is the only reader of the
//! shared datagram socket; every room is served from this one loop.

use std::{net::SocketAddr, sync::Arc};

use thiserror::Error;
use tokio::net::UdpSocket;

use crate::{
    domain::ParticipantId,
    infrastructure::dto::{
        FrameError,
        datagram::{DatagramFrame, RelayedMessage},
    },
    ui::state::AppState,
    usecase::{InboundDatagram, RelayError, RelayOutcome},
};

/// Reason a datagram was dropped
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

/// Receive datagrams forever, dispatching each one in arrival order.
pub async fn run_dispatcher(
    socket: Arc<UdpSocket>,
    state: Arc<AppState>,
    max_datagram_size: usize,
) {
    let mut buf = vec![0u8; max_datagram_size];

    loop {
        let (len, from) = match socket.recv_from(&mut buf).await {
            Ok(received) => received,
            Err(e) => {
                tracing::warn!("Failed to receive datagram: {}", e);
                continue;
            }
        };

        if let Err(e) = dispatch_datagram(&state, from, &buf[..len]).await {
            tracing::warn!("Dropped datagram from {}: {}", from, e);
        }
    }
}

/// Parse one datagram, enroll its sender if needed, and relay it.
///
/// The handshake payload only enrolls a new sender; from an enrolled member it
/// is relayed like any other text.
///
/// Errors never reach the sender; the caller logs them and moves on.
pub async fn dispatch_datagram(
    state: &AppState,
    from: SocketAddr,
    bytes: &[u8],
) -> Result<RelayOutcome, DispatchError> {
    let frame = DatagramFrame::parse(bytes)?;
    let sender = ParticipantId::new(from);

    let relayed = RelayedMessage {
        sender: &sender.key(),
        payload: &frame.payload,
    }
    .to_string();
    let datagram = if frame.is_handshake() {
        tracing::debug!("Handshake from {} for '{}'", sender, frame.room_name);
        InboundDatagram::Handshake { relayed }
    } else {
        InboundDatagram::Chat { relayed }
    };

    let outcome = state
        .relay_message_usecase
        .execute(sender, &frame.room_name, datagram)
        .await?;

    Ok(outcome)
}
