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

use park_alloc_core::slot::SlotNumber;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidCapacityError {
    requested: i64,
}

impl InvalidCapacityError {
    #[inline]
    pub fn new(requested: i64) -> Self {
        Self { requested }
    }

    #[inline]
    pub fn requested(&self) -> i64 {
        self.requested
    }
}

impl Display for InvalidCapacityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sorry, parking lot capacity must be positive (got {})",
            self.requested
        )
    }
}

impl std::error::Error for InvalidCapacityError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotParkedError {
    slot: SlotNumber,
}

impl NotParkedError {
    #[inline]
    pub fn new(slot: SlotNumber) -> Self {
        Self { slot }
    }

    #[inline]
    pub fn slot(&self) -> SlotNumber {
        self.slot
    }
}

impl Display for NotParkedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sorry, vehicle not parking here")
    }
}

impl std::error::Error for NotParkedError {}

/// Raised when the registry finds its own bookkeeping inconsistent, or when a
/// shared registry's lock was poisoned by a panicking holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InternalError {
    reason: &'static str,
}

impl InternalError {
    #[inline]
    pub fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    #[inline]
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

impl Display for InternalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Internal server error")
    }
}

impl std::error::Error for InternalError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParkingError {
    InvalidCapacity(InvalidCapacityError),
    LotFull,
    NotParked(NotParkedError),
    Internal(InternalError),
}

impl Display for ParkingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParkingError::InvalidCapacity(e) => write!(f, "{e}"),
            ParkingError::LotFull => write!(f, "Sorry, parking lot is full"),
            ParkingError::NotParked(e) => write!(f, "{e}"),
            ParkingError::Internal(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParkingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParkingError::InvalidCapacity(e) => Some(e),
            ParkingError::LotFull => None,
            ParkingError::NotParked(e) => Some(e),
            ParkingError::Internal(e) => Some(e),
        }
    }
}

impl From<InvalidCapacityError> for ParkingError {
    fn from(err: InvalidCapacityError) -> Self {
        Self::InvalidCapacity(err)
    }
}

impl From<NotParkedError> for ParkingError {
    fn from(err: NotParkedError) -> Self {
        Self::NotParked(err)
    }
}

impl From<InternalError> for ParkingError {
    fn from(err: InternalError) -> Self {
        Self::Internal(err)
    }
}
