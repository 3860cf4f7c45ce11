pub mod bridge;
pub mod config;
pub mod editor;
pub mod errors;
pub mod events;
pub mod host;
pub mod render;
pub mod storage;
pub mod theme;

pub use bridge::*;
pub use errors::BridgeError;
