//! Broadcast chat room
//!
//! Every message received on `/chat/ws` is rendered once and pushed to all
//! open chat sockets. Delivery is best-effort: a recipient that cannot take
//! the frame is dropped from the room.

pub mod handler;
pub mod hub;
pub mod message;
pub mod registry;

pub use handler::ws_handler;
pub use hub::ChatHub;
pub use message::{ChatError, InboundMessage};
pub use registry::{BroadcastReport, ConnectionId, ConnectionRegistry, ConnectionState};
