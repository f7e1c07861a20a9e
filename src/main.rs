// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! RP2350A Robot Controller with Serial Commands
//!
//! This firmware drives a two-motor robot with a tilting head servo and a
//! buzzer from text commands received over UART, using the Embassy async
//! runtime.
//!
//! # Hardware Configuration
//! - **Microcontroller**: RP2350A (ARM Cortex-M33)
//! - **Motors**: Dual DC motors with H-bridge driver
//!   - Motor A: forward on GPIO 9, reverse on GPIO 8
//!   - Motor B: forward on GPIO 7, reverse on GPIO 6
//! - **Buzzer**: PWM on GPIO 5 (PWM_SLICE2 Channel B)
//! - **Head Servo**: 50 Hz PWM on GPIO 10 (PWM_SLICE5 Channel A)
//! - **Serial**: UART0 RX on GPIO 1, 9600 baud
//!
//! # Features
//! - Six line commands: `FWD`, `BACK`, `TURN`, `STOP`, `BEEP`, `TILT`
//! - Unknown lines are ignored without any reply
//! - Commands run strictly one after another; input arriving during a
//!   routine is buffered and handled afterwards
//! - Real-time defmt logging for debugging
//!
//! # Build
//! ```bash
//! cargo build --release --features rp2350 --target thumbv8m.main-none-eabihf
//! ```
//!
//! # Flash
//! ```bash
//! cargo run --release --features rp2350 --target thumbv8m.main-none-eabihf
//! ```

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUartRx, Config as UartConfig};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use serial_robot::buzzer::{Buzzer, tone_pwm};
use serial_robot::config::{
    BAUD_RATE, BUZZER_PIN, LINE_CAPACITY, LINE_IDLE_TIMEOUT_MS, MOTOR_A_FORWARD_PIN,
    MOTOR_A_REVERSE_PIN, MOTOR_B_FORWARD_PIN, MOTOR_B_REVERSE_PIN, SERVO_PIN, SERVO_PWM_DIVIDER,
    SERVO_PWM_TOP, UART_RX_BUFFER_SIZE, UART_RX_PIN,
};
use serial_robot::motor::MotorController;
use serial_robot::serial::{IdleTimeout, LineReader};
use serial_robot::servo::Servo;
use serial_robot::RobotController;

/// Program metadata for picotool info command
///
/// This information is embedded in the binary and can be read by picotool
/// to display program information when querying the firmware.
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"Serial Robot"),
    embassy_rp::binary_info::rp_program_description!(c"RP2350A Robot with Serial Commands"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// Requests handed from the controller to the buzzer task.
#[derive(Clone, Copy, Format)]
enum ToneRequest {
    Play { frequency_hz: u32, duration_ms: u32 },
    Silence,
}

static TONE_SIGNAL: Signal<CriticalSectionRawMutex, ToneRequest> = Signal::new();

/// Buzzer port backed by [`buzzer_task`].
///
/// `tone` returns immediately; the task times the tone and turns it off.
struct SignalBuzzer;

impl Buzzer for SignalBuzzer {
    fn tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        TONE_SIGNAL.signal(ToneRequest::Play {
            frequency_hz,
            duration_ms,
        });
    }

    fn no_tone(&mut self) {
        TONE_SIGNAL.signal(ToneRequest::Silence);
    }
}

/// Owns the buzzer PWM slice and plays one tone at a time.
///
/// A request arriving while a tone sounds replaces it immediately.
#[embassy_executor::task]
async fn buzzer_task(mut pwm: Pwm<'static>) {
    let mut config = PwmConfig::default();
    let mut request = TONE_SIGNAL.wait().await;

    loop {
        let ToneRequest::Play {
            frequency_hz,
            duration_ms,
        } = request
        else {
            silence(&mut pwm, &mut config);
            request = TONE_SIGNAL.wait().await;
            continue;
        };

        let Some(tone) = tone_pwm(clk_sys_freq(), frequency_hz) else {
            warn!("Tone {} Hz out of range", frequency_hz);
            silence(&mut pwm, &mut config);
            request = TONE_SIGNAL.wait().await;
            continue;
        };

        config.divider = tone.divider.into();
        config.top = tone.top;
        config.compare_b = tone.half_duty();
        pwm.set_config(&config);
        debug!("Tone {} Hz for {} ms", frequency_hz, duration_ms);

        request = match select(
            Timer::after_millis(u64::from(duration_ms)),
            TONE_SIGNAL.wait(),
        )
        .await
        {
            Either::First(()) => ToneRequest::Silence,
            Either::Second(next) => next,
        };
    }
}

/// Drops the buzzer output to a constant low level.
fn silence(pwm: &mut Pwm<'static>, config: &mut PwmConfig) {
    config.compare_b = 0;
    pwm.set_config(config);
}

/// Main robot controller task
///
/// Initializes all hardware peripherals and enters the command loop, which
/// reads serial lines and executes them one at a time.
///
/// # Initialization Sequence
/// 1. Configure the four drive pins as outputs, driven LOW
/// 2. Configure buzzer and servo PWM slices and start the buzzer task
/// 3. Open UART0 for reception at 9600 baud
/// 4. Center the head and enter the command loop
///
/// # Safety
/// Never returns. Runs indefinitely until power loss or reset.
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("RP2350A Serial Robot Starting!");
    let p = embassy_rp::init(Default::default());

    // Motor direction pins
    let a_fwd = Output::new(p.PIN_9, Level::Low);
    let a_rev = Output::new(p.PIN_8, Level::Low);
    let b_fwd = Output::new(p.PIN_7, Level::Low);
    let b_rev = Output::new(p.PIN_6, Level::Low);
    let motors = MotorController::new(a_fwd, a_rev, b_fwd, b_rev);
    info!(
        "Drive pins A={}/{} B={}/{}",
        MOTOR_A_FORWARD_PIN, MOTOR_A_REVERSE_PIN, MOTOR_B_FORWARD_PIN, MOTOR_B_REVERSE_PIN
    );

    // Buzzer on GPIO 5, silent until the first tone
    let buzzer_pwm = Pwm::new_output_b(p.PWM_SLICE2, p.PIN_5, PwmConfig::default());
    unwrap!(spawner.spawn(buzzer_task(buzzer_pwm)));
    info!("Buzzer on GPIO {}", BUZZER_PIN);

    // Head servo on GPIO 10, 50 Hz
    let mut servo_config = PwmConfig::default();
    servo_config.divider = SERVO_PWM_DIVIDER.into();
    servo_config.top = SERVO_PWM_TOP;
    servo_config.compare_a = 0;
    let servo = Servo::new(Pwm::new_output_a(p.PWM_SLICE5, p.PIN_10, servo_config));
    info!("Head servo on GPIO {}", SERVO_PIN);

    // Receive-only UART
    static RX_BUFFER: StaticCell<[u8; UART_RX_BUFFER_SIZE]> = StaticCell::new();
    let rx_buffer = RX_BUFFER.init([0; UART_RX_BUFFER_SIZE]);
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BAUD_RATE;
    let uart_rx = BufferedUartRx::new(p.UART0, Irqs, p.PIN_1, rx_buffer, uart_config);
    let mut lines: LineReader<_, LINE_CAPACITY> =
        LineReader::new(IdleTimeout::new(uart_rx, Delay, LINE_IDLE_TIMEOUT_MS));
    info!("UART0 RX on GPIO {} at {} baud", UART_RX_PIN, BAUD_RATE);

    let mut robot = RobotController::new(motors, servo, SignalBuzzer, Delay);
    if let Err(e) = robot.init() {
        error!("Actuator init failed: {:?}", e);
    }

    info!("Robot ready! Waiting for serial commands...");

    loop {
        let stats = robot.run(&mut lines).await;
        warn!("Command loop returned: {:?}", stats);
    }
}
