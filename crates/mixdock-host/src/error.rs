//! Error types for the host facade

use mixdock_core::HotkeyId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Unknown signal: {0}")]
    UnknownSignal(&'static str),
    #[error("Hotkey not registered: {0}")]
    UnknownHotkey(HotkeyId),
}

pub type Result<T> = std::result::Result<T, HostError>;
