//! Raw waveform descriptor assembly for the RF bridge.
//!
//! The bridge firmware accepts a `rfraw` command whose payload describes
//! the transmission as a string of hex byte pairs. Each logical bit is
//! written as one of two pulse tokens (`82` short, `A0` long); the
//! surrounding header, block wrappers, and trailer are a fixed wire
//! convention expected by the receiver hardware and must be reproduced
//! exactly. The command word is always followed by its bitwise
//! complement as a parity-style redundancy check.

use thiserror::Error;

use crate::bits::{self, COMMAND_BITS, EncodeError};
use crate::codes::CommandCode;

/// Fixed descriptor header: sync preamble, bucket timings, and the data
/// lead-in. Constant table, not derivable.
pub const HEADER: &str = "AAB0580403018813E803106510808080808080808080808081";

/// Fixed descriptor trailer.
pub const TRAILER: &str = "55";

/// Pulse token transmitted for a logical `0`.
const PULSE_ZERO: &str = "82";
/// Pulse token transmitted for a logical `1`.
const PULSE_ONE: &str = "A0";

/// Errors from descriptor assembly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("device address `{0}` must contain only binary digits")]
    BadAddress(String),

    #[error("device address `{address}` is longer than {width} digits")]
    AddressTooLong { address: String, width: usize },
}

/// A fully assembled raw command, ready for one transmission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommand {
    code: CommandCode,
    descriptor: String,
}

impl RawCommand {
    /// Assemble the descriptor for `code` addressed to `address`.
    ///
    /// `address` is the receiver's remote id as a string of binary
    /// digits; it is left-padded with zeros to `address_width`.
    pub fn build(
        code: CommandCode,
        address: &str,
        address_width: usize,
    ) -> Result<Self, FrameError> {
        let word = bits::encode(code.value(), COMMAND_BITS)?;

        let mut descriptor = String::with_capacity(
            HEADER.len() + TRAILER.len() + 2 * (address_width + 2 * COMMAND_BITS) + 12,
        );
        descriptor.push_str(HEADER);
        descriptor.push_str(&room_block(address, address_width)?);
        descriptor.push_str(&command_block(&word));
        descriptor.push_str(&inverse_block(&word));
        descriptor.push_str(TRAILER);

        Ok(Self { code, descriptor })
    }

    /// The command code this descriptor transmits.
    pub fn code(&self) -> CommandCode {
        self.code
    }

    /// The raw waveform descriptor string.
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// The bridge endpoint that transmits this descriptor.
    pub fn bridge_url(&self, host: &str) -> String {
        let cmnd = format!("rfraw {}", self.descriptor);
        format!("http://{}/cm?cmnd={}", host, urlencoding::encode(&cmnd))
    }
}

/// Substitute each binary digit with a pulse token.
fn substitute(word: &str, zero: &str, one: &str) -> String {
    word.chars()
        .map(|c| if c == '0' { zero } else { one })
        .collect()
}

/// Address block: padded address digits substituted `0` -> `82`,
/// `1` -> `A0`, wrapped in `A0` / `82`.
fn room_block(address: &str, width: usize) -> Result<String, FrameError> {
    if address.is_empty() || !address.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(FrameError::BadAddress(address.to_string()));
    }
    if address.len() > width {
        return Err(FrameError::AddressTooLong {
            address: address.to_string(),
            width,
        });
    }
    let padded = format!("{address:0>width$}");
    Ok(format!(
        "{PULSE_ONE}{}{PULSE_ZERO}",
        substitute(&padded, PULSE_ZERO, PULSE_ONE)
    ))
}

/// Command block: word bits substituted `0` -> `82`, `1` -> `A0`,
/// wrapped in `82` / `A0`.
fn command_block(word: &str) -> String {
    format!(
        "{PULSE_ZERO}{}{PULSE_ONE}",
        substitute(word, PULSE_ZERO, PULSE_ONE)
    )
}

/// Inverse-command block: the complement word substituted with the
/// swapped mapping (`1` -> `82`, `0` -> `A0`), wrapped in `A0` / `83`.
/// The swap is part of the wire convention, not a restatement of the
/// command block.
fn inverse_block(word: &str) -> String {
    let inverse = bits::complement(word);
    format!(
        "{PULSE_ONE}{}83",
        substitute(&inverse, PULSE_ONE, PULSE_ZERO)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::fan;

    /// Golden descriptor for fan-off (code 98) addressed to remote "0"
    /// at the default 40-digit address width.
    const FAN_OFF_REMOTE_ZERO: &str = concat!(
        // header
        "AAB0580403018813E803106510808080808080808080808081",
        // room block: A0, forty zero digits, 82
        "A0",
        "82828282828282828282828282828282828282828282828282828282828282828282828282828282",
        "82",
        // command block for 0001100010
        "82",
        "828282A0A0828282A082",
        "A0",
        // inverse block for 1110011101
        "A0",
        "828282A0A0828282A082",
        "83",
        // trailer
        "55",
    );

    #[test]
    fn golden_fan_off_descriptor() {
        let raw = RawCommand::build(fan::OFF, "0", 40).unwrap();
        assert_eq!(raw.descriptor(), FAN_OFF_REMOTE_ZERO);
    }

    #[test]
    fn golden_fan_off_url() {
        let raw = RawCommand::build(fan::OFF, "0", 40).unwrap();
        let url = raw.bridge_url("192.168.1.40");
        assert_eq!(
            url,
            format!(
                "http://192.168.1.40/cm?cmnd=rfraw%20{}",
                FAN_OFF_REMOTE_ZERO
            )
        );
    }

    #[test]
    fn descriptor_structure() {
        let raw = RawCommand::build(fan::HIGH, "0110", 40).unwrap();
        let descriptor = raw.descriptor();
        assert!(descriptor.starts_with(HEADER));
        assert!(descriptor.ends_with("8355"));
        // header + room (84) + command (24) + inverse (24) + trailer
        assert_eq!(
            descriptor.len(),
            HEADER.len() + 84 + 24 + 24 + TRAILER.len()
        );
    }

    #[test]
    fn command_and_inverse_blocks_differ_only_in_wrapping() {
        // The swapped substitution applied to the complement word yields
        // the same token body as the command block; the wrappers are
        // what distinguish the two on the wire.
        let word = "0001100010";
        assert_eq!(command_block(word), "82828282A0A0828282A082A0");
        assert_eq!(inverse_block(word), "A0828282A0A0828282A08283");
    }

    #[test]
    fn room_block_pads_and_substitutes() {
        let block = room_block("1", 4).unwrap();
        assert_eq!(block, "A0828282A082");
    }

    #[test]
    fn room_block_rejects_non_binary_address() {
        assert_eq!(
            room_block("42", 40),
            Err(FrameError::BadAddress("42".to_string()))
        );
        assert_eq!(
            room_block("", 40),
            Err(FrameError::BadAddress(String::new()))
        );
    }

    #[test]
    fn room_block_rejects_overlong_address() {
        assert_eq!(
            room_block("10101", 4),
            Err(FrameError::AddressTooLong {
                address: "10101".to_string(),
                width: 4,
            })
        );
    }
}
