// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Piezo buzzer interface and tone PWM calculation.
//!
//! A tone is a 50 % duty square wave at the requested frequency. The
//! [`Buzzer`] port is fire-and-forget: `tone` starts the wave and returns at
//! once, and the implementation silences it after the requested duration.
//! The caller paces a melody with its own delays.
//!
//! # PWM Parameters
//!
//! The RP2350 PWM counter runs at `sys_clk / divider` and wraps at `top`, so
//!
//! ```text
//! f = sys_clk / (divider * (top + 1))
//! ```
//!
//! [`tone_pwm`] picks the smallest integer divider that keeps `top` within
//! 16 bits, which gives the finest frequency resolution.

/// Tone output.
pub trait Buzzer {
    /// Starts a tone that stops by itself after `duration_ms`.
    ///
    /// A new tone replaces one that is still sounding.
    fn tone(&mut self, frequency_hz: u32, duration_ms: u32);

    /// Silences the buzzer immediately.
    fn no_tone(&mut self);
}

/// PWM slice settings for one tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TonePwm {
    /// Integer clock divider (1-255)
    pub divider: u8,
    /// Counter wrap value
    pub top: u16,
}

impl TonePwm {
    /// Compare value for a 50 % duty cycle.
    pub fn half_duty(&self) -> u16 {
        ((u32::from(self.top) + 1) / 2) as u16
    }
}

/// Computes the PWM divider and wrap value for `frequency_hz`.
///
/// Returns `None` for 0 Hz and for frequencies too low to reach with the
/// largest divider, or too high to produce at least a two-step counter.
pub fn tone_pwm(sys_clk_hz: u32, frequency_hz: u32) -> Option<TonePwm> {
    if frequency_hz == 0 {
        return None;
    }
    let counts = u64::from(sys_clk_hz) / u64::from(frequency_hz);
    if counts < 2 {
        return None;
    }
    let divider = counts.div_ceil(1 << 16).max(1);
    if divider > u64::from(u8::MAX) {
        return None;
    }
    let top = counts / divider - 1;
    Some(TonePwm {
        divider: divider as u8,
        top: top as u16,
    })
}
