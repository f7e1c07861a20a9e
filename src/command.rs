// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Robot command definitions and serial token mappings.
//!
//! This module defines the command set for robot control and provides
//! mapping from text tokens received over the serial link to robot actions.
//!
//! # Serial Tokens
//!
//! Each command is one newline-terminated line. Leading and trailing ASCII
//! whitespace (space, `\t`, `\n`, `\v`, `\f`, `\r`) is stripped, then the
//! token is matched case-sensitively. Other Unicode spaces such as NBSP are
//! part of the token, so a line padded with them is unknown:
//!
//! ```text
//!   FWD   - Both motors forward
//!   BACK  - Both motors reverse
//!   TURN  - Pivot turn (motor A forward, motor B reverse)
//!   STOP  - All drive pins low
//!   BEEP  - Three-tone alert
//!   TILT  - Head sweep left, right, center
//! ```
//!
//! Anything else maps to [`Command::Unknown`] and is ignored.

/// Robot motion and actuator commands.
///
/// Represents all possible actions the robot can perform in response to a
/// serial line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Drive both motors forward
    Forward,
    /// Drive both motors in reverse
    Back,
    /// Pivot turn: motor A forward, motor B reverse
    Turn,
    /// De-energize all four drive pins
    Stop,
    /// Play the three-tone alert
    Beep,
    /// Sweep the head left, right, then back to center
    Tilt,
    /// Unrecognized or empty token
    Unknown,
}

impl Command {
    /// Every recognized command, in dispatch-table order.
    pub const ALL: [Command; 6] = [
        Command::Forward,
        Command::Back,
        Command::Turn,
        Command::Stop,
        Command::Beep,
        Command::Tilt,
    ];

    /// Parses one raw serial line into a command.
    ///
    /// Invalid UTF-8 maps to `Command::Unknown`, as does anything that is
    /// not exactly one of the six tokens after trimming.
    ///
    /// # Examples
    ///
    /// ```
    /// use serial_robot::command::Command;
    ///
    /// assert_eq!(Command::parse(b" FWD \r"), Command::Forward);
    /// assert_eq!(Command::parse(b"fwd"), Command::Unknown);
    /// ```
    pub fn parse(line: &[u8]) -> Self {
        match core::str::from_utf8(line) {
            Ok(text) => Self::from_token(text),
            Err(_) => Command::Unknown,
        }
    }

    /// Converts a text token to a robot command.
    pub fn from_token(token: &str) -> Self {
        match token.trim_matches(is_line_space) {
            "FWD" => Command::Forward,
            "BACK" => Command::Back,
            "TURN" => Command::Turn,
            "STOP" => Command::Stop,
            "BEEP" => Command::Beep,
            "TILT" => Command::Tilt,
            _ => Command::Unknown,
        }
    }

    /// Returns the wire token for this command.
    ///
    /// Returns `None` for `Command::Unknown`.
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Command::Forward => Some("FWD"),
            Command::Back => Some("BACK"),
            Command::Turn => Some("TURN"),
            Command::Stop => Some("STOP"),
            Command::Beep => Some("BEEP"),
            Command::Tilt => Some("TILT"),
            Command::Unknown => None,
        }
    }
}

/// The C `isspace` set: ASCII whitespace plus vertical tab.
fn is_line_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}
