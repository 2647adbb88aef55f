//! Chat hub: decode once, render once, fan out.

use askama::Template;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::message::{ChatError, InboundMessage};
use super::registry::{BroadcastReport, ConnectionId, ConnectionRegistry};
use crate::config::ChatConfig;
use crate::render::ChatMessageFragment;

pub struct ChatHub {
    registry: Arc<ConnectionRegistry>,
    echo_to_sender: bool,
}

impl ChatHub {
    pub fn new(registry: Arc<ConnectionRegistry>, config: &ChatConfig) -> Self {
        Self {
            registry,
            echo_to_sender: config.echo_to_sender,
        }
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Register a new connection. The receiver feeds its writer task.
    pub fn join(&self) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (self.registry.register(tx), rx)
    }

    pub fn leave(&self, conn_id: ConnectionId) {
        self.registry.unregister(conn_id);
    }

    /// Relay one inbound text frame from `from` to the room.
    ///
    /// Decode and render errors are returned to the caller and nothing is
    /// sent; they never affect other connections.
    pub fn relay_text(&self, from: ConnectionId, raw: &str) -> Result<BroadcastReport, ChatError> {
        let inbound = InboundMessage::decode(raw)?;
        self.relay(from, &inbound)
    }

    pub fn relay_bytes(
        &self,
        from: ConnectionId,
        raw: &[u8],
    ) -> Result<BroadcastReport, ChatError> {
        let inbound = InboundMessage::decode_bytes(raw)?;
        self.relay(from, &inbound)
    }

    fn relay(
        &self,
        from: ConnectionId,
        inbound: &InboundMessage,
    ) -> Result<BroadcastReport, ChatError> {
        let fragment = ChatMessageFragment {
            message: &inbound.message,
        }
        .render()?;

        let exclude = if self.echo_to_sender { None } else { Some(from) };
        Ok(self.registry.broadcast(&fragment, exclude))
    }
}
