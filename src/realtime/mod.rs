// Real-time emissions channel (WebSocket transport)

pub mod connection;
pub mod protocol;

pub use connection::handle_connection;
pub use protocol::{ClientEvent, ServerEvent};
