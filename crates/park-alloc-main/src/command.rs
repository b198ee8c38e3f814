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

use park_alloc_model::prelude::SlotNumber;
use std::fmt::Display;

/// Usage size of every vehicle parked through the front end.
pub const CAR_USAGE_SIZE: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateParkingLot { count: i64 },
    Park { plate_number: String, color: String },
    Leave { slot: SlotNumber },
    Status,
    RegistrationNumbersForColor { color: String },
    SlotNumbersForColor { color: String },
    SlotNumberForRegistrationNumber { plate_number: String },
    Exit,
}

/// A line that names a known verb but carries a missing or malformed
/// argument, or a line whose verb is unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    MissingCapacity,
    InvalidCapacity(String),
    MissingPlateNumber,
    MissingSlotNumber,
    InvalidSlotNumber(String),
    MissingColor,
    MissingRegistrationNumber,
    UnknownVerb(String),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::MissingCapacity => write!(f, "Please input parking lot amount"),
            CommandError::InvalidCapacity(_) => write!(
                f,
                "Please input parking lot number after parking lot command"
            ),
            CommandError::MissingPlateNumber => write!(
                f,
                "Please input registration number and car color (optional)"
            ),
            CommandError::MissingSlotNumber => write!(f, "Please input slot number"),
            CommandError::InvalidSlotNumber(_) => {
                write!(f, "Please input parking lot number after a command")
            }
            CommandError::MissingColor => write!(f, "Please input car colour"),
            CommandError::MissingRegistrationNumber => {
                write!(f, "Please input registration number")
            }
            CommandError::UnknownVerb(_) => write!(f, "Invalid parking lot command."),
        }
    }
}

impl std::error::Error for CommandError {}

impl CommandError {
    /// The offending word, when there was one.
    pub fn argument(&self) -> Option<&str> {
        match self {
            CommandError::InvalidCapacity(raw)
            | CommandError::InvalidSlotNumber(raw)
            | CommandError::UnknownVerb(raw) => Some(raw),
            _ => None,
        }
    }
}

impl Command {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();
        let first = args.first().copied();

        let command = match verb {
            "create_parking_lot" => {
                let raw = first.ok_or(CommandError::MissingCapacity)?;
                let count = raw
                    .parse::<i64>()
                    .map_err(|_| CommandError::InvalidCapacity(raw.to_owned()))?;
                Command::CreateParkingLot { count }
            }
            "park" => {
                let plate_number = first.ok_or(CommandError::MissingPlateNumber)?;
                // A color is only taken from a plate-and-color pair.
                let color = match args.as_slice() {
                    [_, color] => *color,
                    _ => "",
                };
                Command::Park {
                    plate_number: plate_number.to_owned(),
                    color: color.to_owned(),
                }
            }
            "leave" => {
                let raw = first.ok_or(CommandError::MissingSlotNumber)?;
                let number = raw
                    .parse::<i64>()
                    .map_err(|_| CommandError::InvalidSlotNumber(raw.to_owned()))?;
                // Non-positive numbers collapse to 0, which names no slot.
                let slot = usize::try_from(number).map_or(SlotNumber::new(0), SlotNumber::new);
                Command::Leave { slot }
            }
            "status" => Command::Status,
            "registration_numbers_for_cars_with_colour" => {
                let color = first.ok_or(CommandError::MissingColor)?;
                Command::RegistrationNumbersForColor {
                    color: color.to_owned(),
                }
            }
            "slot_numbers_for_cars_with_colour" => {
                let color = first.ok_or(CommandError::MissingColor)?;
                Command::SlotNumbersForColor {
                    color: color.to_owned(),
                }
            }
            "slot_number_for_registration_number" => {
                let plate_number = first.ok_or(CommandError::MissingRegistrationNumber)?;
                Command::SlotNumberForRegistrationNumber {
                    plate_number: plate_number.to_owned(),
                }
            }
            "exit" => Command::Exit,
            other => return Err(CommandError::UnknownVerb(other.to_owned())),
        };
        Ok(Some(command))
    }

    #[inline]
    pub fn verb(&self) -> &'static str {
        match self {
            Command::CreateParkingLot { .. } => "create_parking_lot",
            Command::Park { .. } => "park",
            Command::Leave { .. } => "leave",
            Command::Status => "status",
            Command::RegistrationNumbersForColor { .. } => {
                "registration_numbers_for_cars_with_colour"
            }
            Command::SlotNumbersForColor { .. } => "slot_numbers_for_cars_with_colour",
            Command::SlotNumberForRegistrationNumber { .. } => {
                "slot_number_for_registration_number"
            }
            Command::Exit => "exit",
        }
    }
}
