// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Head servo driver.
//!
//! Standard hobby servos expect a 50 Hz PWM signal whose pulse width encodes
//! the target angle:
//!
//! ```text
//!     0 deg  ->  544 us
//!    90 deg  -> 1472 us
//!   180 deg  -> 2400 us
//! ```
//!
//! [`Servo`] converts degrees to a pulse width and writes it as a fraction of
//! the 20 ms period through any `embedded_hal::pwm::SetDutyCycle` channel, so
//! it does not care how the PWM slice itself was configured.

use embedded_hal::pwm::SetDutyCycle;

use crate::config::{
    SERVO_MAX_DEGREES, SERVO_MAX_PULSE_US, SERVO_MIN_PULSE_US, SERVO_PERIOD_US,
};

/// Positional actuator for the robot's head.
pub trait HeadServo {
    type Error: core::fmt::Debug;

    /// Commands the head to `degrees` (0-180, larger values clamp to 180).
    fn set_degrees(&mut self, degrees: u8) -> Result<(), Self::Error>;
}

/// Converts an angle to the servo pulse width in microseconds.
pub fn pulse_width_us(degrees: u8) -> u16 {
    let degrees = u32::from(degrees.min(SERVO_MAX_DEGREES));
    let span = u32::from(SERVO_MAX_PULSE_US - SERVO_MIN_PULSE_US);
    SERVO_MIN_PULSE_US + (span * degrees / u32::from(SERVO_MAX_DEGREES)) as u16
}

/// Hobby servo on a 50 Hz PWM channel.
pub struct Servo<P> {
    pwm: P,
    degrees: Option<u8>,
}

impl<P: SetDutyCycle> Servo<P> {
    /// Wraps a PWM channel already running at a 20 ms period.
    ///
    /// The servo is not moved until the first [`HeadServo::set_degrees`].
    pub fn new(pwm: P) -> Self {
        Self { pwm, degrees: None }
    }

    /// Last commanded angle, if any.
    pub fn degrees(&self) -> Option<u8> {
        self.degrees
    }
}

impl<P: SetDutyCycle> HeadServo for Servo<P> {
    type Error = P::Error;

    fn set_degrees(&mut self, degrees: u8) -> Result<(), Self::Error> {
        let degrees = degrees.min(SERVO_MAX_DEGREES);
        self.pwm
            .set_duty_cycle_fraction(pulse_width_us(degrees), SERVO_PERIOD_US)?;
        self.degrees = Some(degrees);
        Ok(())
    }
}
