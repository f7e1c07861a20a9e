//! Mock hardware for integration tests.
//!
//! Every fake actuator appends to one shared [`Journal`], so tests can
//! assert on the exact interleaving of pin writes, tones, servo moves and
//! delays without touching real GPIO/PWM registers or waiting on a clock.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{self, OutputPin};
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::{ErrorKind, ErrorType, Read};

use serial_robot::buzzer::Buzzer;
use serial_robot::config::LINE_CAPACITY;
use serial_robot::motor::MotorController;
use serial_robot::serial::LineReader;
use serial_robot::servo::HeadServo;
use serial_robot::RobotController;

// ── Call record ───────────────────────────────────────────────

/// The four H-bridge inputs, in `[a_fwd, a_rev, b_fwd, b_rev]` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrivePin {
    AFwd,
    ARev,
    BFwd,
    BRev,
}

impl DrivePin {
    fn index(self) -> usize {
        match self {
            DrivePin::AFwd => 0,
            DrivePin::ARev => 1,
            DrivePin::BFwd => 2,
            DrivePin::BRev => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Pin { pin: DrivePin, high: bool },
    Tone { frequency_hz: u32, duration_ms: u32 },
    NoTone,
    Servo { degrees: u8 },
    Delay { ms: u32 },
}

// ── Journal ───────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct Journal {
    calls: Rc<RefCell<Vec<Call>>>,
}

#[allow(dead_code)]
impl Journal {
    pub fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Pin levels after each drive pin write, starting from all LOW.
    pub fn drive_snapshots(&self) -> Vec<[bool; 4]> {
        let mut levels = [false; 4];
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Pin { pin, high } => {
                    levels[pin.index()] = *high;
                    Some(levels)
                }
                _ => None,
            })
            .collect()
    }

    /// Current drive pin levels, `[a_fwd, a_rev, b_fwd, b_rev]`.
    pub fn drive_levels(&self) -> [bool; 4] {
        self.drive_snapshots().last().copied().unwrap_or([false; 4])
    }

    pub fn servo_angles(&self) -> Vec<u8> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Servo { degrees } => Some(*degrees),
                _ => None,
            })
            .collect()
    }
}

// ── Drive pins ────────────────────────────────────────────────

#[derive(Debug)]
pub struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

pub struct MockPin {
    pin: DrivePin,
    journal: Journal,
    broken: bool,
}

impl digital::ErrorType for MockPin {
    type Error = PinFault;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), PinFault> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), PinFault> {
        self.write(true)
    }
}

impl MockPin {
    fn write(&mut self, high: bool) -> Result<(), PinFault> {
        if self.broken {
            return Err(PinFault);
        }
        self.journal.record(Call::Pin {
            pin: self.pin,
            high,
        });
        Ok(())
    }
}

// ── Servo, buzzer, delay ─────────────────────────────────────

pub struct MockServo {
    journal: Journal,
}

impl HeadServo for MockServo {
    type Error = Infallible;

    fn set_degrees(&mut self, degrees: u8) -> Result<(), Infallible> {
        self.journal.record(Call::Servo { degrees });
        Ok(())
    }
}

pub struct MockBuzzer {
    journal: Journal,
}

impl Buzzer for MockBuzzer {
    fn tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        self.journal.record(Call::Tone {
            frequency_hz,
            duration_ms,
        });
    }

    fn no_tone(&mut self) {
        self.journal.record(Call::NoTone);
    }
}

/// Records requested delays instead of sleeping.
pub struct MockDelay {
    journal: Journal,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.journal.record(Call::Delay {
            ms: ns / 1_000_000,
        });
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.journal.record(Call::Delay { ms });
    }
}

// ── Serial input ─────────────────────────────────────────────

#[derive(Debug)]
pub struct SerialFault(pub ErrorKind);

impl embedded_io_async::Error for SerialFault {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Replays scripted reads, then reports end of stream.
pub struct ScriptedSerial {
    reads: VecDeque<Result<Vec<u8>, ErrorKind>>,
}

#[allow(dead_code)]
impl ScriptedSerial {
    pub fn new() -> Self {
        Self {
            reads: VecDeque::new(),
        }
    }

    pub fn bytes(mut self, data: &[u8]) -> Self {
        self.reads.push_back(Ok(data.to_vec()));
        self
    }

    pub fn fault(mut self, kind: ErrorKind) -> Self {
        self.reads.push_back(Err(kind));
        self
    }

    pub fn into_lines(self) -> LineReader<Self, LINE_CAPACITY> {
        LineReader::new(self)
    }
}

impl ErrorType for ScriptedSerial {
    type Error = SerialFault;
}

impl Read for ScriptedSerial {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, SerialFault> {
        match self.reads.pop_front() {
            None => Ok(0),
            Some(Err(kind)) => Err(SerialFault(kind)),
            Some(Ok(mut data)) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                if n < data.len() {
                    self.reads.push_front(Ok(data.split_off(n)));
                }
                Ok(n)
            }
        }
    }
}

// ── Assembled robot ──────────────────────────────────────────

pub type MockRobot = RobotController<MockPin, MockServo, MockBuzzer, MockDelay>;

/// A robot wired entirely to mocks sharing one journal.
pub fn mock_robot() -> (MockRobot, Journal) {
    build(false)
}

/// Same as [`mock_robot`], but every drive pin write fails.
#[allow(dead_code)]
pub fn robot_with_broken_pins() -> (MockRobot, Journal) {
    build(true)
}

fn build(broken: bool) -> (MockRobot, Journal) {
    let journal = Journal::default();
    let pin = |pin| MockPin {
        pin,
        journal: journal.clone(),
        broken,
    };
    let motors = MotorController::new(
        pin(DrivePin::AFwd),
        pin(DrivePin::ARev),
        pin(DrivePin::BFwd),
        pin(DrivePin::BRev),
    );
    let robot = RobotController::new(
        motors,
        MockServo {
            journal: journal.clone(),
        },
        MockBuzzer {
            journal: journal.clone(),
        },
        MockDelay {
            journal: journal.clone(),
        },
    );
    (robot, journal)
}
