// Network adapter for player WebSocket connections.

pub mod client;

pub use client::ws_handler;
