// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Line assembler for the serial command link.
//!
//! The host sends one command per line:
//!
//! ```text
//! F W D \n B E E P \r \n ...
//! ```
//!
//! [`LineReader`] pulls chunks from any `embedded_io_async::Read` and hands
//! out complete lines one at a time, without the terminating `\n`. Bytes
//! that arrive after a newline stay queued for the following call, so lines
//! received while the robot is busy are processed later, in order.
//!
//! # Framing Rules
//!
//! - A line longer than `N` bytes is discarded up to its newline and
//!   reported once as [`Error::LineOverflow`].
//! - A read error of kind `TimedOut` completes whatever partial line is
//!   buffered; with nothing buffered it is ignored.
//! - Any other read error drops the partial line and is returned as
//!   [`Error::Serial`].
//! - End of stream completes a buffered partial line, then yields `None`.
//!
//! # Idle Timeout
//!
//! [`IdleTimeout`] wraps a reader and fails a read with `TimedOut` when no
//! byte arrives within a fixed quiet period, so a line sent without a
//! newline still runs about one second after its last byte.

use embassy_futures::select::{Either, select};
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::{Error as _, ErrorKind, ErrorType, Read};
use heapless::Vec;

use crate::error::Error;

/// Bytes requested from the underlying reader per call.
const CHUNK_SIZE: usize = 32;

/// Splits a byte stream into newline-terminated lines of at most `N` bytes.
pub struct LineReader<R, const N: usize> {
    reader: R,
    line: Vec<u8, N>,
    chunk: [u8; CHUNK_SIZE],
    start: usize,
    end: usize,
    overflowed: bool,
    completed: bool,
}

impl<R: Read, const N: usize> LineReader<R, N> {
    /// Creates a line reader on top of `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            chunk: [0; CHUNK_SIZE],
            start: 0,
            end: 0,
            overflowed: false,
            completed: false,
        }
    }

    /// Waits for the next complete line.
    ///
    /// Returns `Ok(None)` once the underlying reader reports end of stream
    /// and no partial line is left.
    pub async fn next_line(&mut self) -> Result<Option<&[u8]>, Error> {
        if core::mem::take(&mut self.completed) {
            self.line.clear();
        }

        loop {
            while self.start < self.end {
                let byte = self.chunk[self.start];
                self.start += 1;

                if byte == b'\n' {
                    return self.complete_line().map(Some);
                }
                if self.line.push(byte).is_err() {
                    self.overflowed = true;
                }
            }

            match self.reader.read(&mut self.chunk).await {
                Ok(0) => {
                    if self.line.is_empty() && !self.overflowed {
                        return Ok(None);
                    }
                    trace!("end of stream with {} bytes pending", self.line.len());
                    return self.complete_line().map(Some);
                }
                Ok(n) => {
                    self.start = 0;
                    self.end = n;
                }
                Err(e) => match e.kind() {
                    ErrorKind::TimedOut => {
                        if !self.line.is_empty() || self.overflowed {
                            debug!("idle timeout, completing {} byte line", self.line.len());
                            return self.complete_line().map(Some);
                        }
                    }
                    kind => {
                        self.line.clear();
                        self.overflowed = false;
                        return Err(Error::Serial(kind));
                    }
                },
            }
        }
    }

    /// Finishes the buffered line; it is cleared on the next call.
    fn complete_line(&mut self) -> Result<&[u8], Error> {
        self.completed = true;
        if core::mem::take(&mut self.overflowed) {
            return Err(Error::LineOverflow(N));
        }
        Ok(&self.line)
    }
}

/// Read error of [`IdleTimeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleError<E> {
    /// The wrapped reader failed
    Read(E),
    /// Nothing arrived within the quiet period
    TimedOut,
}

impl<E: embedded_io_async::Error> embedded_io_async::Error for IdleError<E> {
    fn kind(&self) -> ErrorKind {
        match self {
            IdleError::Read(e) => e.kind(),
            IdleError::TimedOut => ErrorKind::TimedOut,
        }
    }
}

/// Fails a read with `TimedOut` when the line stays quiet for too long.
///
/// The quiet period is measured by `delay`, restarted on every read. Data
/// that is already available wins over an expired timer.
pub struct IdleTimeout<R, D> {
    inner: R,
    delay: D,
    timeout_ms: u32,
}

impl<R: Read, D: DelayNs> IdleTimeout<R, D> {
    /// Wraps `inner`, timing out reads after `timeout_ms` of silence.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let rx = IdleTimeout::new(uart_rx, Delay, LINE_IDLE_TIMEOUT_MS);
    /// let mut lines: LineReader<_, LINE_CAPACITY> = LineReader::new(rx);
    /// ```
    pub fn new(inner: R, delay: D, timeout_ms: u32) -> Self {
        Self {
            inner,
            delay,
            timeout_ms,
        }
    }
}

impl<R: Read, D> ErrorType for IdleTimeout<R, D> {
    type Error = IdleError<R::Error>;
}

impl<R: Read, D: DelayNs> Read for IdleTimeout<R, D> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        match select(self.inner.read(buf), self.delay.delay_ms(self.timeout_ms)).await {
            Either::First(result) => result.map_err(IdleError::Read),
            Either::Second(()) => Err(IdleError::TimedOut),
        }
    }
}
