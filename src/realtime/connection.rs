use crate::realtime::protocol::{ClientEvent, ServerEvent};
use crate::session::{ConnectionId, SessionManager};
use axum::extract::ws::{close_code, CloseFrame, Message, WebSocket};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

/// Drive one WebSocket for its whole lifetime.
///
/// Registers the connection, forwards queued events to the socket and client
/// pings to the session manager, and disconnects it on close or transport
/// failure. When the session manager drops the connection (eviction or
/// shutdown) the outbound queue closes and the socket is closed from our side.
pub async fn handle_connection(
    mut socket: WebSocket,
    sessions: Arc<SessionManager>,
    outbox_capacity: usize,
) {
    let id = ConnectionId::new();
    let (outbox, mut inbox) = mpsc::channel(outbox_capacity.max(1));
    if !sessions.accept(id, outbox) {
        let _ = socket.send(Message::Close(Some(server_close_frame()))).await;
        return;
    }

    let (mut sink, mut stream) = socket.split();

    let reason = loop {
        tokio::select! {
            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => handle_client_text(&sessions, &id, &text),
                    Some(Ok(Message::Ping(data))) => {
                        sessions.refresh(&id);
                        if let Err(e) = sink.send(Message::Pong(data)).await {
                            break format!("failed to send pong frame: {}", e);
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        break close_reason(frame);
                    }
                    Some(Ok(_)) => {
                        // Ignore binary and pong frames
                    }
                    Some(Err(e)) => {
                        warn!(connection_id = %id, error = %e, "WebSocket error");
                        break format!("transport error: {}", e);
                    }
                    None => break "transport closed".to_string(),
                }
            }

            outgoing = inbox.recv() => {
                match outgoing {
                    Some(event) => {
                        if let Err(e) = send_event(&mut sink, &event).await {
                            break e;
                        }
                    }
                    None => {
                        // Registry dropped us: evicted as idle, or server shutdown
                        let _ = sink.send(Message::Close(Some(server_close_frame()))).await;
                        break "session closed by server".to_string();
                    }
                }
            }
        }
    };

    sessions.disconnect(&id, &reason);
}

fn server_close_frame() -> CloseFrame<'static> {
    CloseFrame {
        code: close_code::AWAY,
        reason: "session closed by server".into(),
    }
}

fn handle_client_text(sessions: &SessionManager, id: &ConnectionId, text: &str) {
    match serde_json::from_str::<ClientEvent>(text) {
        Ok(ClientEvent::Ping) => {
            sessions.touch(id);
        }
        Err(e) => {
            warn!(connection_id = %id, error = %e, "Ignoring unrecognized client message");
        }
    }
}

async fn send_event<S>(sink: &mut S, event: &ServerEvent) -> Result<(), String>
where
    S: futures::Sink<Message, Error = axum::Error> + Unpin,
{
    let json = match event.to_json() {
        Ok(json) => json,
        Err(e) => {
            error!(error = %e, "Failed to serialize server event");
            return Ok(());
        }
    };

    sink.send(Message::Text(json))
        .await
        .map_err(|e| format!("send failed: {}", e))
}

fn close_reason(frame: Option<CloseFrame<'static>>) -> String {
    match frame {
        Some(frame) if !frame.reason.is_empty() => {
            debug!(code = frame.code, "Close frame received");
            frame.reason.into_owned()
        }
        Some(frame) => format!("client closed (code {})", frame.code),
        None => "client closed".to_string(),
    }
}
