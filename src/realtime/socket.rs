//! socket.io namespace handlers.
//!
//! Each connection gets its own change-bus subscription, forwarded by a
//! per-connection task. The task exits as soon as an emit fails (socket
//! gone), which ends the subscription with the connection.

use serde_json::Value;
use socketioxide::SocketIo;
use socketioxide::extract::{Data, SocketRef, State};
use tokio::sync::broadcast::error::RecvError;

use crate::core::ServerState;
use crate::message::BusEvent;
use crate::models::ProductCreate;

/// Register the root namespace on the socket.io layer.
pub fn register(io: &SocketIo) {
    io.ns("/", on_connect);
}

async fn on_connect(socket: SocketRef, State(state): State<ServerState>) {
    tracing::info!(sid = %socket.id, "realtime client connected");

    spawn_product_feed(&socket, &state);

    socket.on("addProduct", handle_add_product);
    socket.on("deleteProduct", handle_delete_product);

    socket.on_disconnect(|socket: SocketRef| async move {
        tracing::info!(sid = %socket.id, "realtime client disconnected");
    });
}

/// Forward `ProductsChanged` events to this socket until it goes away.
///
/// A lagging connection drops its oldest events (bounded broadcast queue);
/// this is logged and never blocks the publisher or other connections.
fn spawn_product_feed(socket: &SocketRef, state: &ServerState) {
    let mut rx = state.catalog.bus().subscribe();
    let socket = socket.clone();

    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(BusEvent::ProductsChanged { products }) => {
                    if socket.emit("updateProducts", &products).is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(sid = %socket.id, skipped, "product feed lagging, dropped events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

/// `addProduct` - same create path as POST /api/products.
async fn handle_add_product(
    socket: SocketRef,
    Data(payload): Data<Value>,
    State(state): State<ServerState>,
) {
    let create: ProductCreate = match serde_json::from_value(payload) {
        Ok(create) => create,
        Err(e) => {
            emit_error(&socket, format!("malformed product payload: {e}"));
            return;
        }
    };

    if let Err(e) = state.catalog.create_product(create).await {
        emit_error(&socket, e.to_string());
    }
}

/// `deleteProduct` - same delete path as DELETE /api/products/:id.
async fn handle_delete_product(
    socket: SocketRef,
    Data(product_id): Data<String>,
    State(state): State<ServerState>,
) {
    if let Err(e) = state.catalog.delete_product(&product_id).await {
        emit_error(&socket, e.to_string());
    }
}

/// Errors go back to the emitting socket only; other clients are unaffected.
fn emit_error(socket: &SocketRef, message: String) {
    tracing::debug!(sid = %socket.id, %message, "realtime mutation rejected");
    let _ = socket.emit("error", &serde_json::json!({ "message": message }));
}
