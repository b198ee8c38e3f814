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

use crate::vehicle::Vehicle;
use park_alloc_core::slot::SlotNumber;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotStatus {
    Available,
    Occupied,
    /// Held back for a specific vehicle. No operation enters this state yet.
    Reserved,
}

impl Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotStatus::Available => write!(f, "available"),
            SlotStatus::Occupied => write!(f, "occupied"),
            SlotStatus::Reserved => write!(f, "reserved"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotOccupiedError {
    slot: SlotNumber,
    status: SlotStatus,
}

impl SlotOccupiedError {
    #[inline]
    pub fn new(slot: SlotNumber, status: SlotStatus) -> Self {
        Self { slot, status }
    }

    #[inline]
    pub fn slot(&self) -> SlotNumber {
        self.slot
    }

    #[inline]
    pub fn status(&self) -> SlotStatus {
        self.status
    }
}

impl Display for SlotOccupiedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Slot {} cannot take a vehicle while {}",
            self.slot, self.status
        )
    }
}

impl std::error::Error for SlotOccupiedError {}

/// A single numbered parking space.
///
/// The status and the occupant only change together through [`Slot::occupy`]
/// and [`Slot::vacate`], so a slot holds a vehicle exactly when it is
/// [`SlotStatus::Occupied`].
#[derive(Debug, Clone, PartialEq)]
pub struct Slot<V> {
    number: SlotNumber,
    status: SlotStatus,
    size: f32,
    occupant: Option<V>,
}

impl<V: Vehicle> Slot<V> {
    #[inline]
    pub fn new(number: SlotNumber) -> Self {
        Self {
            number,
            status: SlotStatus::Available,
            size: Self::STANDARD_SIZE,
            occupant: None,
        }
    }

    /// The size every slot is created with. Allocation never looks at it.
    pub const STANDARD_SIZE: f32 = 1.0;

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn number(&self) -> SlotNumber {
        self.number
    }

    #[inline]
    pub fn status(&self) -> SlotStatus {
        self.status
    }

    #[inline]
    pub fn occupant(&self) -> Option<&V> {
        self.occupant.as_ref()
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == SlotStatus::Available
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.status == SlotStatus::Occupied
    }

    /// Parks `vehicle` here. Only an available slot accepts a vehicle; on
    /// failure the vehicle is handed back alongside the error.
    #[inline]
    pub fn occupy(&mut self, vehicle: V) -> Result<(), (SlotOccupiedError, V)> {
        if !self.is_available() {
            return Err((SlotOccupiedError::new(self.number, self.status), vehicle));
        }
        self.occupant = Some(vehicle);
        self.status = SlotStatus::Occupied;
        Ok(())
    }

    /// Removes and returns the occupant, making the slot available again.
    /// Returns `None` and leaves the slot untouched if nobody is parked here.
    #[inline]
    pub fn vacate(&mut self) -> Option<V> {
        if !self.is_occupied() {
            return None;
        }
        let vehicle = self.occupant.take();
        self.status = SlotStatus::Available;
        vehicle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::Car;

    #[test]
    fn test_new_slot_is_available_and_empty() {
        let slot: Slot<Car> = Slot::new(SlotNumber::new(4));
        assert_eq!(slot.number(), SlotNumber::new(4));
        assert_eq!(slot.status(), SlotStatus::Available);
        assert_eq!(slot.size(), Slot::<Car>::STANDARD_SIZE);
        assert!(slot.occupant().is_none());
    }

    #[test]
    fn test_occupy_then_vacate() {
        let mut slot = Slot::new(SlotNumber::new(1));
        slot.occupy(Car::new("A-1", "Red", 1.0)).unwrap();
        assert!(slot.is_occupied());
        assert_eq!(slot.occupant().map(|c| c.plate_number()), Some("A-1"));

        let car = slot.vacate().expect("occupant");
        assert_eq!(car.plate_number(), "A-1");
        assert!(slot.is_available());
        assert!(slot.occupant().is_none());
    }

    #[test]
    fn test_occupy_twice_hands_vehicle_back() {
        let mut slot = Slot::new(SlotNumber::new(2));
        slot.occupy(Car::new("A-1", "Red", 1.0)).unwrap();
        let (err, rejected) = slot.occupy(Car::new("B-2", "Blue", 1.0)).unwrap_err();
        assert_eq!(err.slot(), SlotNumber::new(2));
        assert_eq!(err.status(), SlotStatus::Occupied);
        assert_eq!(rejected.plate_number(), "B-2");
        assert_eq!(slot.occupant().map(|c| c.plate_number()), Some("A-1"));
    }

    #[test]
    fn test_vacate_empty_slot_is_noop() {
        let mut slot: Slot<Car> = Slot::new(SlotNumber::new(3));
        assert!(slot.vacate().is_none());
        assert!(slot.is_available());
    }
}
