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

use num_traits::CheckedAdd;
use std::ops::Add;

/// The number of a parking slot.
///
/// Slot numbers start at 1 and are handed out in ascending order as the lot
/// grows. A number never changes and is never reused for a different slot.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct SlotNumber(usize);

impl std::fmt::Display for SlotNumber {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl SlotNumber {
    #[inline]
    pub const fn new(v: usize) -> Self {
        SlotNumber(v)
    }

    #[inline]
    pub const fn value(self) -> usize {
        self.0
    }

    /// Zero-based position of this slot in a dense slot table, or `None` for
    /// the number `0`, which never names a slot.
    #[inline]
    pub const fn index(self) -> Option<usize> {
        self.0.checked_sub(1)
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        SlotNumber(index + 1)
    }
}

/// A number of slots, used both for the capacity of a lot and for the size of
/// an extension.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct SlotCount(usize);

impl std::fmt::Display for SlotCount {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl SlotCount {
    #[inline]
    pub const fn new(v: usize) -> Self {
        SlotCount(v)
    }

    #[inline]
    pub const fn value(self) -> usize {
        self.0
    }

    /// Iterates over all slot numbers `1..=self`.
    #[inline]
    pub fn numbers(self) -> impl DoubleEndedIterator<Item = SlotNumber> {
        (1..=self.0).map(SlotNumber)
    }
}

impl Add for SlotCount {
    type Output = SlotCount;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        SlotCount(
            self.0
                .checked_add(rhs.0)
                .expect("overflow in SlotCount + SlotCount"),
        )
    }
}

impl CheckedAdd for SlotCount {
    #[inline]
    fn checked_add(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(SlotCount)
    }
}
