//! Ceiling fan model.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use rfcast_commands::CommandService;
use rfcast_core::{CommandCode, FrameError, fan};

/// Cached fan characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanState {
    /// Whether the motor is running.
    pub on: bool,
    /// Rotation speed percentage, 0-100.
    pub rotation_speed: u8,
}

impl Default for FanState {
    fn default() -> Self {
        // A fan switched on before any speed write runs at full speed.
        Self {
            on: false,
            rotation_speed: 100,
        }
    }
}

/// Map a rotation speed percentage onto the motor codes.
///
/// The receiver knows three speeds; the percentage range splits evenly
/// across them, with 0 meaning off.
pub fn speed_code(percent: u8) -> CommandCode {
    match percent {
        0 => fan::OFF,
        1..=33 => fan::LOW,
        34..=66 => fan::MEDIUM,
        _ => fan::HIGH,
    }
}

/// A ceiling fan driven through the command service.
pub struct CeilingFan {
    service: Arc<CommandService>,
    state: RwLock<FanState>,
}

impl CeilingFan {
    /// Create a fan bound to a command service.
    pub fn new(service: Arc<CommandService>) -> Self {
        Self {
            service,
            state: RwLock::new(FanState::default()),
        }
    }

    /// Last-known power state, answered from the cache.
    pub async fn on(&self) -> bool {
        self.state.read().await.on
    }

    /// Last-known rotation speed, answered from the cache.
    pub async fn rotation_speed(&self) -> u8 {
        self.state.read().await.rotation_speed
    }

    /// Switch the motor on or off.
    ///
    /// A write that does not change the cached power state submits
    /// nothing.
    pub async fn set_on(&self, on: bool) -> Result<(), FrameError> {
        let mut state = self.state.write().await;
        if state.on == on {
            debug!(on, "fan power unchanged, nothing to transmit");
            return Ok(());
        }
        state.on = on;

        let code = if on {
            let percent = if state.rotation_speed == 0 {
                100
            } else {
                state.rotation_speed
            };
            speed_code(percent)
        } else {
            fan::OFF
        };
        drop(state);

        self.service.submit(code).await
    }

    /// Set the rotation speed. Zero switches the motor off.
    pub async fn set_rotation_speed(&self, percent: u8) -> Result<(), FrameError> {
        let percent = percent.min(100);
        let mut state = self.state.write().await;
        state.rotation_speed = percent;
        state.on = percent > 0;
        drop(state);

        self.service.submit(speed_code(percent)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_mapping_boundaries() {
        assert_eq!(speed_code(0), fan::OFF);
        assert_eq!(speed_code(1), fan::LOW);
        assert_eq!(speed_code(33), fan::LOW);
        assert_eq!(speed_code(34), fan::MEDIUM);
        assert_eq!(speed_code(66), fan::MEDIUM);
        assert_eq!(speed_code(67), fan::HIGH);
        assert_eq!(speed_code(100), fan::HIGH);
    }

    #[test]
    fn default_state_is_off_at_full_speed() {
        let state = FanState::default();
        assert!(!state.on);
        assert_eq!(state.rotation_speed, 100);
    }
}
