//! Fan light model.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use rfcast_commands::CommandService;
use rfcast_core::{CommandCode, FrameError, light};

/// Cached light characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightState {
    /// Whether the light is lit.
    pub on: bool,
    /// Brightness percentage, 0-100.
    pub brightness: u8,
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            on: false,
            brightness: 100,
        }
    }
}

/// Map a brightness percentage onto the dimmer step codes.
///
/// The eight steps split the 1-100 range into even 12.5% bands; 0 maps
/// to the light-off code.
pub fn brightness_code(percent: u8) -> CommandCode {
    if percent == 0 {
        return light::OFF;
    }
    let step = usize::from(u16::from(percent.min(100)) * 8).div_ceil(100);
    light::BRIGHTNESS_LEVELS[step - 1]
}

/// A fan light driven through the command service.
pub struct FanLight {
    service: Arc<CommandService>,
    state: RwLock<LightState>,
}

impl FanLight {
    /// Create a light bound to a command service.
    pub fn new(service: Arc<CommandService>) -> Self {
        Self {
            service,
            state: RwLock::new(LightState::default()),
        }
    }

    /// Last-known power state, answered from the cache.
    pub async fn on(&self) -> bool {
        self.state.read().await.on
    }

    /// Last-known brightness, answered from the cache.
    pub async fn brightness(&self) -> u8 {
        self.state.read().await.brightness
    }

    /// Switch the light on or off.
    ///
    /// A write that does not change the cached power state submits
    /// nothing. The receiver restores its last dimmer level on power-on.
    pub async fn set_on(&self, on: bool) -> Result<(), FrameError> {
        let mut state = self.state.write().await;
        if state.on == on {
            debug!(on, "light power unchanged, nothing to transmit");
            return Ok(());
        }
        state.on = on;
        drop(state);

        let code = if on { light::ON } else { light::OFF };
        self.service.submit(code).await
    }

    /// Set the brightness. Zero switches the light off.
    pub async fn set_brightness(&self, percent: u8) -> Result<(), FrameError> {
        let percent = percent.min(100);
        let mut state = self.state.write().await;
        state.brightness = percent;
        state.on = percent > 0;
        drop(state);

        self.service.submit(brightness_code(percent)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_mapping_boundaries() {
        assert_eq!(brightness_code(0), light::OFF);
        assert_eq!(brightness_code(1), light::BRIGHTNESS_LEVELS[0]);
        assert_eq!(brightness_code(12), light::BRIGHTNESS_LEVELS[0]);
        assert_eq!(brightness_code(13), light::BRIGHTNESS_LEVELS[1]);
        assert_eq!(brightness_code(25), light::BRIGHTNESS_LEVELS[1]);
        assert_eq!(brightness_code(26), light::BRIGHTNESS_LEVELS[2]);
        assert_eq!(brightness_code(50), light::BRIGHTNESS_LEVELS[3]);
        assert_eq!(brightness_code(51), light::BRIGHTNESS_LEVELS[4]);
        assert_eq!(brightness_code(88), light::BRIGHTNESS_LEVELS[7]);
        assert_eq!(brightness_code(100), light::BRIGHTNESS_LEVELS[7]);
    }

    #[test]
    fn every_percentage_maps_to_a_table_code() {
        for percent in 0..=100u8 {
            let code = brightness_code(percent);
            let known = code == light::OFF || light::BRIGHTNESS_LEVELS.contains(&code);
            assert!(known, "percent {percent} mapped to unknown code {code}");
        }
    }
}
