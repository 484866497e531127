//! Device models for RF fan/light receivers.
//!
//! These are the accessory-facing halves of the pipeline: each model
//! caches its characteristic state so reads answer synchronously from
//! the cache, while writes map onto command codes and are submitted
//! fire-and-forget. A write reports success once its command is
//! accepted; transmission outcome never propagates back.

pub mod fan;
pub mod light;

// Re-exports
pub use fan::{CeilingFan, FanState, speed_code};

pub use light::{FanLight, LightState, brightness_code};
