//! Server client module for HTTP communication

mod client;
mod traits;

pub use client::{ServerClient, StatusError, DEFAULT_ADDRESS};
pub use traits::ServerClientTrait;

#[cfg(test)]
pub use traits::MockServerClientTrait;
