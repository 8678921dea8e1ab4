//! Control-plane connection to the server.

use std::net::SocketAddr;

use hiroba_server::infrastructure::dto::control::{ControlRequest, ControlResponse};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines},
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
};

use crate::error::ClientError;

/// One TCP control connection; each request is answered by one response line
pub struct ControlClient {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl ControlClient {
    pub async fn connect(addr: SocketAddr) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| ClientError::ConnectionError(format!("{}: {}", addr, e)))?;
        let (reader, writer) = stream.into_split();

        Ok(Self {
            lines: BufReader::new(reader).lines(),
            writer,
        })
    }

    /// Send `request` and wait for its response
    pub async fn request(
        &mut self,
        request: &ControlRequest,
    ) -> Result<ControlResponse, ClientError> {
        let line = format!("{}\n", request);
        tracing::debug!("Sending control request: {}", line.trim_end());
        self.writer.write_all(line.as_bytes()).await?;

        let Some(response) = self.lines.next_line().await? else {
            return Err(ClientError::ConnectionClosed);
        };
        ControlResponse::from_line(&response)
            .map_err(|e| ClientError::ProtocolError(format!("{}: {}", e, response)))
    }
}
