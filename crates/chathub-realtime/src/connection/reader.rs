//! Inbound half of a connection: liveness tracking and chat relay.

use std::fmt::Display;
use std::time::Duration;

use futures::{Stream, StreamExt};
use tokio::sync::oneshot;
use tokio::time;
use tracing::{debug, trace};

use crate::error::ConnectionError;
use crate::hub::HubHandle;
use crate::message::serializer::parse_inbound;
use crate::message::types::{InboundMessage, OutboundMessage};

use super::frame::Frame;
use super::handle::ConnectionId;

/// Reads frames until the peer leaves, goes silent, or the write loop stops.
///
/// Every inbound frame, of any kind, restarts the `read_timeout` window.
/// Chat text is handed to the hub tagged with `username`; heartbeats and
/// transport pongs only count as activity.
pub(crate) async fn read_loop<S, E>(
    mut stream: S,
    hub: &HubHandle,
    conn_id: ConnectionId,
    username: &str,
    read_timeout: Duration,
    mut writer_done: oneshot::Receiver<ConnectionError>,
) -> ConnectionError
where
    S: Stream<Item = Result<Frame, E>> + Unpin,
    E: Display,
{
    loop {
        let next = tokio::select! {
            biased;
            reason = &mut writer_done => {
                return reason.unwrap_or(ConnectionError::Closed);
            }
            next = time::timeout(read_timeout, stream.next()) => next,
        };

        let frame = match next {
            Err(_) => return ConnectionError::ReadTimeout(read_timeout),
            Ok(None) => return ConnectionError::Closed,
            Ok(Some(Err(e))) => return ConnectionError::Transport(e.to_string()),
            Ok(Some(Ok(frame))) => frame,
        };

        let text = match frame {
            Frame::Text(text) => text,
            Frame::Binary(bytes) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(_) => {
                    debug!(conn_id = %conn_id, "Ignoring non-UTF-8 binary frame");
                    continue;
                }
            },
            Frame::Ping(_) | Frame::Pong(_) => {
                trace!(conn_id = %conn_id, "Transport heartbeat");
                continue;
            }
            Frame::Close => return ConnectionError::Closed,
        };

        match parse_inbound(&text) {
            InboundMessage::Heartbeat => {
                trace!(conn_id = %conn_id, "Application heartbeat");
            }
            InboundMessage::Chat(content) => {
                let message = OutboundMessage::Chat {
                    username: username.to_string(),
                    content,
                };
                if let Err(e) = hub.broadcast(message).await {
                    return e.into();
                }
            }
        }
    }
}
