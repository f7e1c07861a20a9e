// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Hardware configuration, pin mappings and routine timing for the robot.
//!
//! This module defines every fixed parameter of the firmware:
//! - GPIO pin assignments
//! - Serial link settings
//! - Servo pulse and PWM parameters
//! - Beep and tilt sequences
//!
//! # Pin Mapping Summary
//!
//! ## Motors
//! - **Motor A Forward**: GPIO 9
//! - **Motor A Reverse**: GPIO 8
//! - **Motor B Forward**: GPIO 7
//! - **Motor B Reverse**: GPIO 6
//!
//! ## Actuators
//! - **Buzzer**: GPIO 5 (PWM_SLICE2 Channel B)
//! - **Head Servo**: GPIO 10 (PWM_SLICE5 Channel A)
//!
//! ## Serial
//! - **UART0 RX**: GPIO 1, 9600 baud, 8N1, receive only
//!
//! The binary wires the peripherals listed here by hand; changing a pin
//! means changing both the constant and the matching `p.PIN_n` in `main.rs`.

/// GPIO pin number for motor A forward direction (A1)
pub const MOTOR_A_FORWARD_PIN: u8 = 9;

/// GPIO pin number for motor A reverse direction (A2)
pub const MOTOR_A_REVERSE_PIN: u8 = 8;

/// GPIO pin number for motor B forward direction (B1)
pub const MOTOR_B_FORWARD_PIN: u8 = 7;

/// GPIO pin number for motor B reverse direction (B2)
pub const MOTOR_B_REVERSE_PIN: u8 = 6;

/// GPIO pin number for the buzzer PWM output
pub const BUZZER_PIN: u8 = 5;

/// GPIO pin number for the head servo PWM output
pub const SERVO_PIN: u8 = 10;

/// GPIO pin number for the UART0 receive line
pub const UART_RX_PIN: u8 = 1;

/// Serial link baud rate
pub const BAUD_RATE: u32 = 9600;

/// Size of the UART driver's receive ring buffer in bytes
pub const UART_RX_BUFFER_SIZE: usize = 256;

/// Longest accepted command line, newline excluded
pub const LINE_CAPACITY: usize = 64;

/// Silence after which a partially received line is treated as complete
pub const LINE_IDLE_TIMEOUT_MS: u32 = 1000;

/// Servo pulse width at 0 degrees
pub const SERVO_MIN_PULSE_US: u16 = 544;

/// Servo pulse width at 180 degrees
pub const SERVO_MAX_PULSE_US: u16 = 2400;

/// Servo PWM period (50 Hz)
pub const SERVO_PERIOD_US: u16 = 20_000;

/// Largest servo angle; larger requests are clamped
pub const SERVO_MAX_DEGREES: u8 = 180;

/// Neutral (centered) head position
pub const SERVO_NEUTRAL_DEGREES: u8 = 90;

/// PWM clock divider for the servo slice (150 MHz / 64 = 2.34375 MHz)
pub const SERVO_PWM_DIVIDER: u8 = 64;

/// PWM top value for the servo slice, giving a 20 ms period at 150 MHz
pub const SERVO_PWM_TOP: u16 = 46_874;

/// One step of the beep routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TonePulse {
    /// Tone frequency in hertz
    pub frequency_hz: u32,
    /// How long the buzzer sounds before silencing itself
    pub duration_ms: u32,
    /// Delay from tone start until the next step
    pub pause_ms: u32,
}

/// Three-tone alert played on `BEEP`.
pub const BEEP_SEQUENCE: [TonePulse; 3] = [
    TonePulse {
        frequency_hz: 1000,
        duration_ms: 200,
        pause_ms: 300,
    },
    TonePulse {
        frequency_hz: 1500,
        duration_ms: 300,
        pause_ms: 300,
    },
    TonePulse {
        frequency_hz: 800,
        duration_ms: 150,
        pause_ms: 200,
    },
];

/// One step of the tilt routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiltStep {
    /// Servo angle to command
    pub degrees: u8,
    /// Hold time after commanding the angle (0 = none)
    pub hold_ms: u32,
}

/// Left, right, center sweep played on `TILT`.
pub const TILT_SEQUENCE: [TiltStep; 3] = [
    TiltStep {
        degrees: 60,
        hold_ms: 500,
    },
    TiltStep {
        degrees: 120,
        hold_ms: 500,
    },
    TiltStep {
        degrees: SERVO_NEUTRAL_DEGREES,
        hold_ms: 0,
    },
];
