// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Serial-commanded robot with drive motors, head servo and buzzer.
//!
//! This crate holds everything hardware-independent: command parsing, line
//! framing, the H-bridge, servo and buzzer drivers, and the controller that
//! ties them together. The drivers sit on `embedded-hal` / `embedded-io-async`
//! traits, so the same code runs on the RP2350 (see `main.rs`) and against
//! recording fakes in host tests.
//!
//! # Modules
//!
//! | Module | Purpose |
//! | ------ | ------- |
//! | [`command`] | `Command` enum and token parser |
//! | [`config`] | Pins, serial settings, servo and sequence constants |
//! | [`serial`] | Newline framing and idle timeout over an async byte stream |
//! | [`motor`] | Dual H-bridge direction control |
//! | [`servo`] | Head servo port and PWM driver |
//! | [`buzzer`] | Buzzer port and tone PWM math |
//! | [`controller`] | Routines, dispatch and the command loop |
//! | [`error`] | Crate error type |
//!
//! # Features
//!
//! - `rp2350`: builds the firmware binary (embassy runtime, defmt logging)
//! - `defmt`: library logging through `defmt`
//! - `log`: library logging through `log`, for host tools

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module.
mod fmt;

pub mod buzzer;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod motor;
pub mod serial;
pub mod servo;

pub use command::Command;
pub use controller::{RobotController, Stats};
pub use error::Error;
