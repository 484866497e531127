//! Core types for driving RF fan/light receivers through an RF bridge.
//!
//! Provides:
//! - Command code tables for the supported receivers
//! - Fixed-width bit encoding for command words
//! - Raw waveform descriptor assembly (the `rfraw` payload)
//! - Bridge configuration

pub mod bits;
pub mod codes;
pub mod config;
pub mod frame;

// Re-exports
pub use bits::{COMMAND_BITS, EncodeError, complement, encode};

pub use codes::{CommandCode, MAX_CODE, fan, light, receiver};

pub use config::{BridgeConfig, ConfigError, TEST_SENTINEL};

pub use frame::{FrameError, RawCommand};
