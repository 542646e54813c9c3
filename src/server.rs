//! Newline-delimited JSON-RPC 2.0 transport.
//!
//! [`McpServer::serve`] works on any buffered reader and writer; [`McpServer::run`]
//! binds it to stdin and stdout.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::client::YandexClient;
use crate::handlers;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Maximum bytes per JSON-RPC message (1 MiB), not counting the newline.
pub const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// What one read from the input produced.
#[derive(Debug, PartialEq, Eq)]
enum Frame {
    /// A line (or a final unterminated line) is in the buffer.
    Message,
    /// The line exceeded [`MAX_MESSAGE_BYTES`] and was skipped.
    Oversized,
    /// End of input.
    Closed,
}

/// MCP server speaking JSON-RPC 2.0, one message per line.
pub struct McpServer {
    client: YandexClient,
    initialized: bool,
}

impl McpServer {
    pub fn new(client: YandexClient) -> Self {
        Self {
            client,
            initialized: false,
        }
    }

    /// Serve stdin/stdout until stdin closes.
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Answer every message read from `reader` on `writer` until the input ends.
    pub async fn serve<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<(), Box<dyn std::error::Error>>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = Vec::new();

        loop {
            let response = match read_frame(&mut reader, &mut line).await? {
                Frame::Closed => {
                    debug!("input closed, shutting down");
                    break;
                }
                Frame::Oversized => {
                    warn!(limit = MAX_MESSAGE_BYTES, "message too large, skipped");
                    Some(JsonRpcResponse::error(None, JsonRpcError::parse_error()))
                }
                Frame::Message => self.handle_message(&line).await,
            };

            if let Some(response) = response {
                let out = serde_json::to_string(&response)?;
                writer.write_all(out.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        Ok(())
    }

    /// Decode one line and produce its response, if it gets one.
    async fn handle_message(&mut self, raw: &[u8]) -> Option<JsonRpcResponse> {
        let Ok(text) = std::str::from_utf8(raw) else {
            warn!("message is not valid UTF-8");
            return Some(JsonRpcResponse::error(None, JsonRpcError::parse_error()));
        };
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let req: JsonRpcRequest = match serde_json::from_str(text) {
            Ok(req) => req,
            Err(e) => {
                warn!("parse error: {e}");
                return Some(JsonRpcResponse::error(None, JsonRpcError::parse_error()));
            }
        };

        // Notifications are never answered, whatever their state.
        if req.jsonrpc != "2.0" {
            return (!req.is_notification())
                .then(|| JsonRpcResponse::error(req.id.clone(), JsonRpcError::invalid_request()));
        }

        if !self.initialized && req.method != "initialize" {
            return (!req.is_notification()).then(|| {
                JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::invalid_request_with("Server not initialized"),
                )
            });
        }

        let response = handlers::dispatch(&req, &self.client).await;

        // The handshake completes only once the client has received our capabilities.
        if req.method == "initialize" && response.as_ref().is_some_and(|r| r.result.is_some()) {
            self.initialized = true;
        }
        response
    }
}

/// Read one line into `line`, holding at most `MAX_MESSAGE_BYTES + 1` bytes.
///
/// A longer line is skipped up to and including its newline.
async fn read_frame<R>(reader: &mut R, line: &mut Vec<u8>) -> io::Result<Frame>
where
    R: AsyncBufRead + Unpin,
{
    line.clear();
    let limit = MAX_MESSAGE_BYTES as u64 + 1;
    let n = (&mut *reader).take(limit).read_until(b'\n', line).await?;

    if n == 0 {
        return Ok(Frame::Closed);
    }
    if line.last() == Some(&b'\n') || (n as u64) < limit {
        return Ok(Frame::Message);
    }

    line.clear();
    skip_line(reader).await?;
    Ok(Frame::Oversized)
}

/// Consume input up to and including the next newline, one buffer at a time.
async fn skip_line<R>(reader: &mut R) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let chunk = reader.fill_buf().await?;
        if chunk.is_empty() {
            return Ok(());
        }
        let (used, found) = match chunk.iter().position(|&b| b == b'\n') {
            Some(i) => (i + 1, true),
            None => (chunk.len(), false),
        };
        reader.consume(used);
        if found {
            return Ok(());
        }
    }
}
