//! Adapts an Axum [`WebSocket`] to the connection loops' [`Frame`] stream and sink.

use axum::extract::ws::{Message, WebSocket};
use futures::{Sink, SinkExt, Stream, StreamExt, future};

use chathub_realtime::Frame;

/// Splits `socket` into a frame stream and a frame sink.
pub fn split_frames(
    socket: WebSocket,
) -> (
    impl Stream<Item = Result<Frame, axum::Error>> + Unpin + Send,
    impl Sink<Frame, Error = axum::Error> + Unpin + Send + 'static,
) {
    let (sink, stream) = socket.split();
    let stream = stream.map(|result| result.map(frame_from_message));
    let sink = sink.with(|frame: Frame| future::ready(Ok::<_, axum::Error>(message_from_frame(frame))));
    (stream, sink)
}

fn frame_from_message(message: Message) -> Frame {
    match message {
        Message::Text(text) => Frame::Text(text.as_str().to_owned()),
        Message::Binary(bytes) => Frame::Binary(bytes.to_vec()),
        Message::Ping(bytes) => Frame::Ping(bytes.to_vec()),
        Message::Pong(bytes) => Frame::Pong(bytes.to_vec()),
        Message::Close(_) => Frame::Close,
    }
}

fn message_from_frame(frame: Frame) -> Message {
    match frame {
        Frame::Text(text) => Message::Text(text.into()),
        Frame::Binary(bytes) => Message::Binary(bytes.into()),
        Frame::Ping(bytes) => Message::Ping(bytes.into()),
        Frame::Pong(bytes) => Message::Pong(bytes.into()),
        Frame::Close => Message::Close(None),
    }
}
