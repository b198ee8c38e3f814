// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::command::{CAR_USAGE_SIZE, Command, CommandError};
use park_alloc_model::prelude::{Car, SlotNumber, Vehicle};
use park_alloc_registry::registry::ParkingRegistry;
use std::{
    fmt::Display,
    io::{self, BufRead, Write},
};
use tracing::{debug, error, instrument, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Exited,
    EndOfInput,
}

#[derive(Debug)]
pub enum SessionError {
    Read(io::Error),
    Write(io::Error),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Read(e) => write!(f, "Failed to read command: {e}"),
            SessionError::Write(e) => write!(f, "Failed to write output: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Read(e) | SessionError::Write(e) => Some(e),
        }
    }
}

fn join<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Interprets command lines against a registry and writes one response per
/// command to `out`.
pub struct Session<R, W> {
    registry: R,
    out: W,
}

impl<R, W> Session<R, W>
where
    R: ParkingRegistry<Vehicle = Car>,
    W: Write,
{
    #[inline]
    pub fn new(registry: R, out: W) -> Self {
        Self { registry, out }
    }

    #[inline]
    pub fn into_parts(self) -> (R, W) {
        (self.registry, self.out)
    }

    #[instrument(level = "debug", skip_all)]
    pub fn run<I: BufRead>(&mut self, mut input: I) -> Result<SessionEnd, SessionError> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = input
                .read_until(b'\n', &mut buf)
                .inspect_err(|e| error!(error = %e, "reading input failed"))
                .map_err(SessionError::Read)?;
            if read == 0 {
                break;
            }
            // Invalid UTF-8 is replaced rather than ending the session.
            let line = String::from_utf8_lossy(&buf);
            if self.handle_line(&line)? == Flow::Exit {
                self.flush()?;
                return Ok(SessionEnd::Exited);
            }
        }
        self.flush()?;
        Ok(SessionEnd::EndOfInput)
    }

    pub fn handle_line(&mut self, line: &str) -> Result<Flow, SessionError> {
        match Command::parse(line) {
            Ok(None) => Ok(Flow::Continue),
            Ok(Some(command)) => self.execute(command),
            Err(err) => {
                match &err {
                    CommandError::UnknownVerb(verb) => debug!(verb = %verb, "unknown verb"),
                    other => {
                        trace!(error = %other, argument = other.argument(), "rejected command")
                    }
                }
                self.emit(err)?;
                Ok(Flow::Continue)
            }
        }
    }

    #[instrument(level = "debug", skip_all, fields(verb = command.verb()))]
    pub fn execute(&mut self, command: Command) -> Result<Flow, SessionError> {
        match command {
            Command::CreateParkingLot { count } => match self.registry.create_slots(count) {
                Ok(_) => self.emit(format_args!("Created a parking lot with {count} slots"))?,
                Err(err) => self.emit(err)?,
            },
            Command::Park {
                plate_number,
                color,
            } => {
                let car = Car::new(plate_number, color, CAR_USAGE_SIZE);
                match self.registry.park(car) {
                    Ok(slot) => self.emit(format_args!("Allocated slot number: {slot}"))?,
                    Err(err) => self.emit(err)?,
                }
            }
            Command::Leave { slot } => match self.registry.leave(slot) {
                Ok(_) => self.emit(format_args!("Slot number {slot} is free"))?,
                Err(err) => self.emit(err)?,
            },
            Command::Status => {
                let report = self.registry.occupancy_report();
                write!(self.out, "{report}").map_err(|e| self.write_failed(e))?;
            }
            Command::RegistrationNumbersForColor { color } => {
                let plates = join(
                    self.registry
                        .slots_by_color(&color)
                        .into_iter()
                        .filter_map(|slot| slot.occupant())
                        .map(|car| car.plate_number()),
                );
                self.emit(plates)?;
            }
            Command::SlotNumbersForColor { color } => {
                let numbers = join(
                    self.registry
                        .slots_by_color(&color)
                        .into_iter()
                        .map(|slot| slot.number()),
                );
                self.emit(numbers)?;
            }
            Command::SlotNumberForRegistrationNumber { plate_number } => {
                let numbers: Vec<SlotNumber> = self
                    .registry
                    .slots_by_plate(&plate_number)
                    .into_iter()
                    .map(|slot| slot.number())
                    .collect();
                if numbers.is_empty() {
                    self.emit("Not found")?;
                } else {
                    self.emit(join(numbers))?;
                }
            }
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn emit(&mut self, line: impl Display) -> Result<(), SessionError> {
        writeln!(self.out, "{line}").map_err(|e| self.write_failed(e))
    }

    fn flush(&mut self) -> Result<(), SessionError> {
        self.out.flush().map_err(|e| self.write_failed(e))
    }

    fn write_failed(&self, e: io::Error) -> SessionError {
        error!(error = %e, "writing output failed");
        SessionError::Write(e)
    }
}
