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

use crate::registry::ParkingRegistry;
use park_alloc_model::prelude::*;
use std::sync::{Mutex, MutexGuard};
use tracing::error;

/// A registry shared between threads.
///
/// The slot table and the free set change together, so the whole registry
/// sits behind a single lock taken once per operation. Lookups return owned
/// data because nothing borrowed from the registry may outlive the lock.
#[derive(Debug, Default)]
pub struct SharedRegistry<R> {
    inner: Mutex<R>,
}

impl<R: ParkingRegistry> SharedRegistry<R> {
    pub fn new(registry: R) -> Self {
        Self {
            inner: Mutex::new(registry),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, R>, ParkingError> {
        self.inner.lock().map_err(|_| {
            let internal = InternalError::new("registry lock poisoned");
            error!(reason = internal.reason(), "internal error");
            internal.into()
        })
    }

    pub fn capacity(&self) -> Result<SlotCount, ParkingError> {
        Ok(self.lock()?.capacity())
    }

    pub fn create_slots(&self, count: i64) -> Result<SlotCount, ParkingError> {
        self.lock()?.create_slots(count)
    }

    pub fn park(&self, vehicle: R::Vehicle) -> Result<SlotNumber, ParkingError> {
        self.lock()?.park(vehicle)
    }

    pub fn leave(&self, slot: SlotNumber) -> Result<R::Vehicle, ParkingError> {
        self.lock()?.leave(slot)
    }

    pub fn available_slot_numbers(&self) -> Result<Vec<SlotNumber>, ParkingError> {
        Ok(self.lock()?.available_slot_numbers())
    }

    pub fn slot_numbers_by_color(&self, color: &str) -> Result<Vec<SlotNumber>, ParkingError> {
        Ok(self
            .lock()?
            .slots_by_color(color)
            .into_iter()
            .map(Slot::number)
            .collect())
    }

    pub fn slot_numbers_by_plate(&self, plate: &str) -> Result<Vec<SlotNumber>, ParkingError> {
        Ok(self
            .lock()?
            .slots_by_plate(plate)
            .into_iter()
            .map(Slot::number)
            .collect())
    }

    pub fn occupancy_report(&self) -> Result<OccupancyReport, ParkingError> {
        Ok(self.lock()?.occupancy_report())
    }

    /// Runs `f` against the registry while holding the lock.
    pub fn with<T>(&self, f: impl FnOnce(&R) -> T) -> Result<T, ParkingError> {
        Ok(f(&*self.lock()?))
    }

    pub fn into_inner(self) -> Result<R, ParkingError> {
        self.inner
            .into_inner()
            .map_err(|_| InternalError::new("registry lock poisoned").into())
    }
}

impl<R: ParkingRegistry> From<R> for SharedRegistry<R> {
    fn from(registry: R) -> Self {
        Self::new(registry)
    }
}
