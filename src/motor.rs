// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Motor control module for dual DC motor H-bridge driver.
//!
//! This module drives two DC motors through the four direction inputs of an
//! H-bridge driver. There is no speed control: each motor is either stopped
//! (both inputs LOW) or driven in one direction (exactly one input HIGH).
//!
//! # Motor Pin Configuration
//!
//! ## Motor A (left)
//! - Forward: A1 (GPIO 9)
//! - Reverse: A2 (GPIO 8)
//!
//! ## Motor B (right)
//! - Forward: B1 (GPIO 7)
//! - Reverse: B2 (GPIO 6)
//!
//! # Examples
//!
//! ```ignore
//! use serial_robot::motor::MotorController;
//!
//! let mut motors = MotorController::new(a_fwd, a_rev, b_fwd, b_rev);
//!
//! motors.forward()?;
//! motors.stop()?;
//! ```

use embedded_hal::digital::{OutputPin, PinState};

/// Direction of a single motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Drive {
    /// Both inputs LOW
    Stopped,
    /// Forward input HIGH, reverse input LOW
    Forward,
    /// Forward input LOW, reverse input HIGH
    Reverse,
}

impl Drive {
    /// Pin levels for `(forward, reverse)`.
    fn levels(self) -> (PinState, PinState) {
        match self {
            Drive::Stopped => (PinState::Low, PinState::Low),
            Drive::Forward => (PinState::High, PinState::Low),
            Drive::Reverse => (PinState::Low, PinState::High),
        }
    }
}

/// Dual DC motor controller with H-bridge driver support.
///
/// # Safety
///
/// Opposing direction pins of one motor are never HIGH at the same time.
/// Every pair is updated LOW side first, so even the instant between the two
/// writes of a direction change leaves the bridge open rather than shorted.
pub struct MotorController<P> {
    /// Motor A forward direction pin (A1)
    a_fwd: P,
    /// Motor A reverse direction pin (A2)
    a_rev: P,
    /// Motor B forward direction pin (B1)
    b_fwd: P,
    /// Motor B reverse direction pin (B2)
    b_rev: P,
}

impl<P: OutputPin> MotorController<P> {
    /// Creates a new motor controller from the four direction pins.
    ///
    /// The pins are expected to already be configured as outputs driven LOW.
    pub fn new(a_fwd: P, a_rev: P, b_fwd: P, b_rev: P) -> Self {
        Self {
            a_fwd,
            a_rev,
            b_fwd,
            b_rev,
        }
    }

    /// Drives both motors forward.
    pub fn forward(&mut self) -> Result<(), P::Error> {
        self.drive(Drive::Forward, Drive::Forward)
    }

    /// Drives both motors in reverse.
    pub fn back(&mut self) -> Result<(), P::Error> {
        self.drive(Drive::Reverse, Drive::Reverse)
    }

    /// Pivot turn: motor A forward, motor B reverse.
    pub fn turn(&mut self) -> Result<(), P::Error> {
        self.drive(Drive::Forward, Drive::Reverse)
    }

    /// Stops both motors by pulling all four direction pins LOW.
    pub fn stop(&mut self) -> Result<(), P::Error> {
        self.drive(Drive::Stopped, Drive::Stopped)
    }

    /// Applies a direction to each motor.
    ///
    /// Motor A is written before motor B, each pair LOW side first.
    ///
    /// # Arguments
    ///
    /// * `a` - Direction for motor A
    /// * `b` - Direction for motor B
    ///
    /// # Returns
    ///
    /// `Ok(())`, or the first pin error. Pins after a failed write keep
    /// their previous level.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Pivot turn
    /// motors.drive(Drive::Forward, Drive::Reverse)?;
    /// ```
    pub fn drive(&mut self, a: Drive, b: Drive) -> Result<(), P::Error> {
        set_pair(&mut self.a_fwd, &mut self.a_rev, a)?;
        set_pair(&mut self.b_fwd, &mut self.b_rev, b)
    }
}

/// Writes one H-bridge pair, LOW side before HIGH side.
fn set_pair<P: OutputPin>(fwd: &mut P, rev: &mut P, drive: Drive) -> Result<(), P::Error> {
    let (fwd_level, rev_level) = drive.levels();
    if fwd_level == PinState::High {
        rev.set_state(rev_level)?;
        fwd.set_state(fwd_level)
    } else {
        fwd.set_state(fwd_level)?;
        rev.set_state(rev_level)
    }
}
