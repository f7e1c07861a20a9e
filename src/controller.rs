// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Robot controller: actuator routines and the serial command loop.
//!
//! This module implements the main robot controller logic, managing:
//! - Ownership of every actuator (drive pins, head servo, buzzer)
//! - The six actuation routines
//! - Command dispatch
//! - The read-dispatch loop and its counters
//!
//! # Execution Model
//!
//! One command runs at a time and always to completion. `BEEP` and `TILT`
//! await their delays (about 800 ms and 1000 ms), and no line is read until
//! they return; bytes that arrive meanwhile wait in the serial driver's
//! receive buffer.
//!
//! # Timing
//!
//! ```text
//! BEEP: tone 1000 Hz/200 ms, wait 300 | tone 1500 Hz/300 ms, wait 300 | tone 800 Hz/150 ms, wait 200 | off
//! TILT: 60 deg, hold 500 | 120 deg, hold 500 | 90 deg
//! ```

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::Read;

use crate::buzzer::Buzzer;
use crate::command::Command;
use crate::config::{BEEP_SEQUENCE, SERVO_NEUTRAL_DEGREES, TILT_SEQUENCE};
use crate::error::Error;
use crate::motor::MotorController;
use crate::serial::LineReader;
use crate::servo::HeadServo;

/// Counters kept by the command loop.
///
/// Purely observational: none of them changes how input is handled. Each
/// counter wraps to zero after `u32::MAX`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stats {
    /// Recognized commands dispatched
    pub executed: u32,
    /// Lines that matched no command
    pub unrecognized: u32,
    /// Lines dropped for exceeding the line buffer
    pub overflowed: u32,
    /// Serial read failures
    pub read_errors: u32,
    /// Routines aborted by a pin or servo failure
    pub actuator_errors: u32,
}

/// Counts one event, wrapping instead of overflowing.
fn bump(counter: &mut u32) {
    *counter = counter.wrapping_add(1);
}

/// The robot's complete actuator surface plus the command loop state.
pub struct RobotController<P, S, B, D> {
    motors: MotorController<P>,
    head: S,
    buzzer: B,
    delay: D,
    stats: Stats,
}

impl<P, S, B, D> RobotController<P, S, B, D>
where
    P: OutputPin,
    S: HeadServo,
    B: Buzzer,
    D: DelayNs,
{
    /// Creates a controller from its actuators and a delay source.
    ///
    /// Call [`RobotController::init`] before processing commands.
    ///
    /// # Arguments
    ///
    /// * `motors` - H-bridge controller for the two drive motors
    /// * `head` - Head servo
    /// * `buzzer` - Buzzer port; `tone` must not block
    /// * `delay` - Delay source for the pauses inside `BEEP` and `TILT`
    ///
    /// # Returns
    ///
    /// A new `RobotController` with all counters at zero.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let motors = MotorController::new(a_fwd, a_rev, b_fwd, b_rev);
    /// let mut robot = RobotController::new(motors, servo, SignalBuzzer, Delay);
    /// robot.init()?;
    /// ```
    pub fn new(motors: MotorController<P>, head: S, buzzer: B, delay: D) -> Self {
        Self {
            motors,
            head,
            buzzer,
            delay,
            stats: Stats::default(),
        }
    }

    /// Puts every actuator in its rest state: motors stopped, buzzer
    /// silent, head centered.
    pub fn init(&mut self) -> Result<(), Error> {
        self.motors.stop().map_err(|_| Error::Drive)?;
        self.buzzer.no_tone();
        self.head
            .set_degrees(SERVO_NEUTRAL_DEGREES)
            .map_err(|_| Error::Servo)?;
        info!("Actuators initialized, head at {}", SERVO_NEUTRAL_DEGREES);
        Ok(())
    }

    /// Returns the loop counters.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Drives both motors forward.
    pub fn forward(&mut self) -> Result<(), Error> {
        self.motors.forward().map_err(|_| Error::Drive)
    }

    /// Drives both motors in reverse.
    pub fn back(&mut self) -> Result<(), Error> {
        self.motors.back().map_err(|_| Error::Drive)
    }

    /// Pivot turn: motor A forward, motor B reverse.
    pub fn turn(&mut self) -> Result<(), Error> {
        self.motors.turn().map_err(|_| Error::Drive)
    }

    /// De-energizes all four drive pins.
    pub fn stop_motors(&mut self) -> Result<(), Error> {
        self.motors.stop().map_err(|_| Error::Drive)
    }

    /// Plays the three-tone alert, then silences the buzzer.
    pub async fn beep(&mut self) {
        for pulse in BEEP_SEQUENCE {
            self.buzzer.tone(pulse.frequency_hz, pulse.duration_ms);
            self.delay.delay_ms(pulse.pause_ms).await;
        }
        self.buzzer.no_tone();
    }

    /// Sweeps the head left, right, and back to center.
    pub async fn tilt_head(&mut self) -> Result<(), Error> {
        for step in TILT_SEQUENCE {
            self.head
                .set_degrees(step.degrees)
                .map_err(|_| Error::Servo)?;
            if step.hold_ms > 0 {
                self.delay.delay_ms(step.hold_ms).await;
            }
        }
        Ok(())
    }

    /// Executes a robot command to completion.
    ///
    /// `Command::Unknown` is a silent no-op apart from the counter.
    ///
    /// # Arguments
    ///
    /// * `command` - Command to execute
    ///
    /// # Returns
    ///
    /// `Ok(())` once the routine has finished, or the actuator error that
    /// aborted it. A failed routine is not counted as executed.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// robot.execute(Command::parse(b"BEEP")).await?;
    /// ```
    pub async fn execute(&mut self, command: Command) -> Result<(), Error> {
        match command {
            Command::Forward => self.forward()?,
            Command::Back => self.back()?,
            Command::Turn => self.turn()?,
            Command::Stop => self.stop_motors()?,
            Command::Beep => self.beep().await,
            Command::Tilt => self.tilt_head().await?,
            Command::Unknown => {
                bump(&mut self.stats.unrecognized);
                debug!("Ignoring unrecognized line");
                return Ok(());
            }
        }
        bump(&mut self.stats.executed);
        info!("{:?}", command);
        Ok(())
    }

    /// Reads lines and executes them until the input ends.
    ///
    /// On the robot the UART never ends, so this only returns in host
    /// simulations. Errors are logged and counted; the loop keeps going.
    ///
    /// # Arguments
    ///
    /// * `lines` - Line reader over the serial input
    ///
    /// # Returns
    ///
    /// The counters at the moment the input reported end of stream.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut lines: LineReader<_, LINE_CAPACITY> = LineReader::new(uart_rx);
    /// let stats = robot.run(&mut lines).await;
    /// ```
    pub async fn run<R: Read, const N: usize>(&mut self, lines: &mut LineReader<R, N>) -> Stats {
        loop {
            let command = match lines.next_line().await {
                Ok(Some(line)) => Command::parse(line),
                Ok(None) => {
                    info!("Input closed");
                    return self.stats;
                }
                Err(Error::LineOverflow(capacity)) => {
                    bump(&mut self.stats.overflowed);
                    warn!("Dropped line longer than {} bytes", capacity);
                    continue;
                }
                Err(e) => {
                    bump(&mut self.stats.read_errors);
                    warn!("Serial read failed: {:?}", e);
                    continue;
                }
            };

            if let Err(e) = self.execute(command).await {
                bump(&mut self.stats.actuator_errors);
                error!("{:?} failed: {:?}", command, e);
            }
        }
    }
}
