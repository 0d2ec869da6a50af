//! Outbound half of a connection: drains the queue and keeps the peer alive.

use std::fmt::Display;
use std::time::Duration;

use futures::{Sink, SinkExt};
use tokio::sync::{mpsc, oneshot};
use tokio::time;
use tracing::{debug, trace};

use crate::error::ConnectionError;
use crate::message::types::Payload;

use super::frame::Frame;
use super::handle::ConnectionId;
use super::heartbeat::HeartbeatConfig;

/// Runs the write loop and reports why it ended to the read loop.
pub(crate) async fn write_loop<K>(
    queue: mpsc::Receiver<Payload>,
    sink: K,
    heartbeat: HeartbeatConfig,
    max_batch: usize,
    conn_id: ConnectionId,
    done: oneshot::Sender<ConnectionError>,
) where
    K: Sink<Frame> + Unpin,
    K::Error: Display,
{
    let reason = drive(queue, sink, heartbeat, max_batch, conn_id).await;
    debug!(conn_id = %conn_id, reason = %reason, "Write loop finished");
    let _ = done.send(reason);
}

async fn drive<K>(
    mut queue: mpsc::Receiver<Payload>,
    mut sink: K,
    heartbeat: HeartbeatConfig,
    max_batch: usize,
    conn_id: ConnectionId,
) -> ConnectionError
where
    K: Sink<Frame> + Unpin,
    K::Error: Display,
{
    let deadline = heartbeat.write_timeout;
    let mut ticker = heartbeat.ping_ticker();

    loop {
        tokio::select! {
            next = queue.recv() => match next {
                Some(first) => {
                    match write_batch(&mut sink, &mut queue, first, max_batch, deadline).await {
                        Ok(written) => trace!(conn_id = %conn_id, written, "Batch flushed"),
                        Err(e) => return e,
                    }
                }
                None => {
                    // Best effort; the peer may already be gone.
                    let _ = time::timeout(deadline, sink.send(Frame::Close)).await;
                    return ConnectionError::QueueClosed;
                }
            },
            _ = ticker.tick() => {
                match time::timeout(deadline, sink.send(Frame::Ping(Vec::new()))).await {
                    Ok(Ok(())) => trace!(conn_id = %conn_id, "Ping sent"),
                    Ok(Err(e)) => return ConnectionError::Transport(e.to_string()),
                    Err(_) => return ConnectionError::WriteTimeout(deadline),
                }
            }
        }
    }
}

/// Writes `first` plus whatever is already queued, up to `max_batch`
/// payloads, as separate frames with a single flush. The whole batch shares
/// one deadline.
async fn write_batch<K>(
    sink: &mut K,
    queue: &mut mpsc::Receiver<Payload>,
    first: Payload,
    max_batch: usize,
    deadline: Duration,
) -> Result<usize, ConnectionError>
where
    K: Sink<Frame> + Unpin,
    K::Error: Display,
{
    let write = async {
        sink.feed(Frame::Text(first.to_string())).await?;
        let mut written = 1;
        while written < max_batch {
            let Ok(next) = queue.try_recv() else {
                break;
            };
            sink.feed(Frame::Text(next.to_string())).await?;
            written += 1;
        }
        sink.flush().await?;
        Ok::<_, K::Error>(written)
    };

    match time::timeout(deadline, write).await {
        Ok(Ok(written)) => Ok(written),
        Ok(Err(e)) => Err(ConnectionError::Transport(e.to_string())),
        Err(_) => Err(ConnectionError::WriteTimeout(deadline)),
    }
}
