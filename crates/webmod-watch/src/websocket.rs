use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use webmod_core::{WebmodError, WebmodResult};

/// Message pushed to connected browsers when a watched file changes.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ReloadMessage {
    Connected,
    Reload { path: String },
}

/// Broadcast channel for browser live-reload.
///
/// Browsers open a WebSocket against the watcher; every file change is
/// fanned out to all connected clients as a JSON reload message.
pub struct LiveReload {
    port: u16,
    reload_tx: broadcast::Sender<String>,
    clients: Arc<AtomicUsize>,
}

impl LiveReload {
    pub fn new(port: u16) -> Self {
        let (reload_tx, _) = broadcast::channel(16);
        Self {
            port,
            reload_tx,
            clients: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Bind the reload socket and start accepting clients in the background
    pub async fn start(&self) -> WebmodResult<()> {
        let addr = format!("127.0.0.1:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| WebmodError::Path(format!("Failed to bind reload socket: {}", e)))?;

        let reload_tx = self.reload_tx.clone();
        let clients = Arc::clone(&self.clients);

        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((stream, _)) => {
                        let reload_rx = reload_tx.subscribe();
                        let clients = Arc::clone(&clients);
                        tokio::spawn(async move {
                            clients.fetch_add(1, Ordering::SeqCst);
                            handle_client(stream, reload_rx).await;
                            clients.fetch_sub(1, Ordering::SeqCst);
                        });
                    }
                    Err(e) => {
                        eprintln!("Reload socket accept error: {}", e);
                    }
                }
            }
        });

        Ok(())
    }

    /// Fan a reload for `path` out to all connected clients
    pub fn notify(&self, path: &str) {
        let message = ReloadMessage::Reload {
            path: path.to_string(),
        };
        if let Ok(text) = serde_json::to_string(&message) {
            let _ = self.reload_tx.send(text);
        }
    }

    /// Number of currently connected clients
    pub fn client_count(&self) -> usize {
        self.clients.load(Ordering::SeqCst)
    }
}

async fn handle_client(stream: tokio::net::TcpStream, mut reload_rx: broadcast::Receiver<String>) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            eprintln!("Reload socket handshake error: {}", e);
            return;
        }
    };

    let (mut write, mut read) = ws_stream.split();

    if let Ok(hello) = serde_json::to_string(&ReloadMessage::Connected) {
        let _ = write.send(Message::Text(hello)).await;
    }

    loop {
        tokio::select! {
            reload = reload_rx.recv() => {
                match reload {
                    Ok(text) => {
                        if write.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_message_shape() {
        let text = serde_json::to_string(&ReloadMessage::Reload {
            path: "app/index.html".to_string(),
        })
        .unwrap();
        assert_eq!(text, r#"{"type":"reload","path":"app/index.html"}"#);

        let hello = serde_json::to_string(&ReloadMessage::Connected).unwrap();
        assert_eq!(hello, r#"{"type":"connected"}"#);
    }

    #[tokio::test]
    async fn test_notify_without_clients_is_harmless() {
        let live = LiveReload::new(0);
        live.notify("app/index.html");
        assert_eq!(live.client_count(), 0);
    }
}
