// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Error type shared by the line reader and the actuator routines.
//!
//! None of these errors ever reach the serial link. The command loop logs
//! them, bumps the matching [`Stats`](crate::controller::Stats) counter and
//! goes back to waiting for the next line.

use embedded_io_async::ErrorKind;
use thiserror::Error;

/// Failures observed while reading commands or driving actuators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Writing one of the H-bridge direction pins failed
    #[error("drive pin write failed")]
    Drive,
    /// Updating the head servo duty cycle failed
    #[error("servo duty update failed")]
    Servo,
    /// The serial reader reported an error other than an idle timeout
    #[error("serial read failed: {0:?}")]
    Serial(ErrorKind),
    /// A line grew past the line buffer capacity and was discarded
    #[error("line exceeded {0} bytes and was dropped")]
    LineOverflow(usize),
}
