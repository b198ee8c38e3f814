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

//! # Parking Model (`park-alloc-model`)
//!
//! Domain values for a single parking facility, built on the slot primitives
//! of `park-alloc-core`.
//!
//! ## Key Data Structures
//!
//! - **`Vehicle`**: The read-only contract of anything that can occupy a slot:
//!   a plate number, a color and a usage size. **`Car`** is the concrete vehicle
//!   used by the command front end.
//!
//! - **`Slot<V>`**: A numbered parking space with a `SlotStatus` and an optional
//!   occupant. The occupant is present exactly when the status is `Occupied`.
//!
//! - **`ParkingError`**: The failure kinds of registry operations
//!   (`InvalidCapacity`, `LotFull`, `NotParked`, `Internal`).
//!
//! - **`OccupancyReport`**: An ordered snapshot of all occupied slots, rendered
//!   as the status table.
//!
//! - **`WorkloadGenerator`**: A seeded generator of park/leave streams used to
//!   exercise and benchmark allocator implementations.

pub mod err;
pub mod generator;
pub mod report;
pub mod slot;
pub mod vehicle;

pub mod prelude {
    pub use crate::err::{InternalError, InvalidCapacityError, NotParkedError, ParkingError};
    pub use crate::generator::{
        WorkloadGenConfig, WorkloadGenConfigBuildError, WorkloadGenConfigBuilder,
        WorkloadGenerator, WorkloadOp,
    };
    pub use crate::report::{OccupancyReport, OccupancyRow};
    pub use crate::slot::{Slot, SlotOccupiedError, SlotStatus};
    pub use crate::vehicle::{Car, Vehicle, colors_match};
    pub use park_alloc_core::slot::{SlotCount, SlotNumber};
}
