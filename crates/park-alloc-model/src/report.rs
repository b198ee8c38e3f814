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

use crate::{slot::Slot, vehicle::Vehicle};
use park_alloc_core::slot::SlotNumber;
use std::fmt::Display;

const SLOT_COLUMN_WIDTH: usize = 12;
const PLATE_COLUMN_WIDTH: usize = 19;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OccupancyRow {
    slot: SlotNumber,
    plate_number: String,
    color: String,
}

impl OccupancyRow {
    #[inline]
    pub fn new(slot: SlotNumber, plate_number: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            slot,
            plate_number: plate_number.into(),
            color: color.into(),
        }
    }

    /// Builds the row for `slot`, or `None` if nobody is parked there.
    #[inline]
    pub fn from_slot<V: Vehicle>(slot: &Slot<V>) -> Option<Self> {
        slot.occupant()
            .map(|v| Self::new(slot.number(), v.plate_number(), v.color()))
    }

    #[inline]
    pub fn slot(&self) -> SlotNumber {
        self.slot
    }

    #[inline]
    pub fn plate_number(&self) -> &str {
        &self.plate_number
    }

    #[inline]
    pub fn color(&self) -> &str {
        &self.color
    }
}

/// Snapshot of every occupied slot in ascending slot order.
///
/// `Display` renders the status table: a header line followed by one line per
/// row, each terminated by a newline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct OccupancyReport {
    rows: Vec<OccupancyRow>,
}

impl OccupancyReport {
    /// Creates a report, sorting `rows` by slot number.
    pub fn new(mut rows: Vec<OccupancyRow>) -> Self {
        rows.sort_by_key(|r| r.slot);
        Self { rows }
    }

    #[inline]
    pub fn rows(&self) -> &[OccupancyRow] {
        &self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &OccupancyRow> {
        self.rows.iter()
    }
}

impl<'a, V: Vehicle + 'a> FromIterator<&'a Slot<V>> for OccupancyReport {
    fn from_iter<I: IntoIterator<Item = &'a Slot<V>>>(iter: I) -> Self {
        Self::new(iter.into_iter().filter_map(OccupancyRow::from_slot).collect())
    }
}

impl Display for OccupancyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:<sw$}{:<pw$}{}",
            "Slot No.",
            "Registration No",
            "Colour",
            sw = SLOT_COLUMN_WIDTH,
            pw = PLATE_COLUMN_WIDTH
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<sw$}{:<pw$}{}",
                row.slot.value(),
                row.plate_number,
                row.color,
                sw = SLOT_COLUMN_WIDTH,
                pw = PLATE_COLUMN_WIDTH
            )?;
        }
        Ok(())
    }
}
