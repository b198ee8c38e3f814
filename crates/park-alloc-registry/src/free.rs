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
use std::{
    cmp::Reverse,
    collections::{BTreeSet, BinaryHeap, binary_heap, btree_set},
    iter::Copied,
};

/// Read access to a set of free slot numbers.
///
/// `nearest` is always the smallest number in the set, whatever order the
/// numbers were inserted in. Iteration order is implementation defined.
pub trait FreeSlotsRead {
    type Iter<'a>: Iterator<Item = SlotNumber> + 'a
    where
        Self: 'a;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, slot: SlotNumber) -> bool;

    fn nearest(&self) -> Option<SlotNumber>;

    fn iter(&self) -> Self::Iter<'_>;
}

pub trait FreeSlotsWrite {
    /// Adds `slot` to the set. Returns `false` if it was already present or
    /// is the number `0`, which never names a slot.
    fn insert(&mut self, slot: SlotNumber) -> bool;

    /// Removes and returns the smallest number in the set.
    fn take_nearest(&mut self) -> Option<SlotNumber>;
}

pub trait FreeSlots: FreeSlotsRead + FreeSlotsWrite + Default {}
impl<T: FreeSlotsRead + FreeSlotsWrite + Default> FreeSlots for T {}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BTreeSetFreeSlots {
    free: BTreeSet<SlotNumber>,
}

impl FreeSlotsRead for BTreeSetFreeSlots {
    type Iter<'a>
        = Copied<btree_set::Iter<'a, SlotNumber>>
    where
        Self: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.free.len()
    }

    #[inline]
    fn contains(&self, slot: SlotNumber) -> bool {
        self.free.contains(&slot)
    }

    #[inline]
    fn nearest(&self) -> Option<SlotNumber> {
        self.free.first().copied()
    }

    #[inline]
    fn iter(&self) -> Self::Iter<'_> {
        self.free.iter().copied()
    }
}

impl FreeSlotsWrite for BTreeSetFreeSlots {
    #[inline]
    fn insert(&mut self, slot: SlotNumber) -> bool {
        slot.index().is_some() && self.free.insert(slot)
    }

    #[inline]
    fn take_nearest(&mut self) -> Option<SlotNumber> {
        self.free.pop_first()
    }
}

/// Binary min-heap of free numbers with a membership table so duplicate
/// inserts are rejected in constant time.
#[derive(Debug, Clone, Default)]
pub struct MinHeapFreeSlots {
    heap: BinaryHeap<Reverse<SlotNumber>>,
    present: Vec<bool>,
}

pub struct MinHeapFreeIter<'a> {
    inner: binary_heap::Iter<'a, Reverse<SlotNumber>>,
}

impl<'a> Iterator for MinHeapFreeIter<'a> {
    type Item = SlotNumber;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|Reverse(slot)| *slot)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl FreeSlotsRead for MinHeapFreeSlots {
    type Iter<'a>
        = MinHeapFreeIter<'a>
    where
        Self: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    fn contains(&self, slot: SlotNumber) -> bool {
        slot.index()
            .and_then(|i| self.present.get(i).copied())
            .unwrap_or(false)
    }

    #[inline]
    fn nearest(&self) -> Option<SlotNumber> {
        self.heap.peek().map(|Reverse(slot)| *slot)
    }

    #[inline]
    fn iter(&self) -> Self::Iter<'_> {
        MinHeapFreeIter {
            inner: self.heap.iter(),
        }
    }
}

impl FreeSlotsWrite for MinHeapFreeSlots {
    fn insert(&mut self, slot: SlotNumber) -> bool {
        let Some(ix) = slot.index() else {
            return false;
        };
        if ix >= self.present.len() {
            self.present.resize(ix + 1, false);
        }
        if self.present[ix] {
            return false;
        }
        self.present[ix] = true;
        self.heap.push(Reverse(slot));
        true
    }

    fn take_nearest(&mut self) -> Option<SlotNumber> {
        let Reverse(slot) = self.heap.pop()?;
        if let Some(ix) = slot.index() {
            self.present[ix] = false;
        }
        Some(slot)
    }
}

/// Packed bitmap over slot indices, one bit per slot (set = free).
///
/// `first_word` is a lower bound on the first word holding a set bit, so the
/// scan for the nearest slot skips the fully occupied prefix of the lot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitmapFreeSlots {
    words: Vec<u64>,
    count: usize,
    first_word: usize,
}

impl BitmapFreeSlots {
    const BITS: usize = u64::BITS as usize;

    #[inline]
    fn locate(ix: usize) -> (usize, u64) {
        (ix / Self::BITS, 1u64 << (ix % Self::BITS))
    }

    #[inline]
    fn first_set(&self) -> Option<(usize, u32)> {
        self.words
            .iter()
            .enumerate()
            .skip(self.first_word)
            .find(|(_, w)| **w != 0)
            .map(|(wi, w)| (wi, w.trailing_zeros()))
    }
}

pub struct BitmapFreeIter<'a> {
    words: &'a [u64],
    word_ix: usize,
    current: u64,
}

impl<'a> Iterator for BitmapFreeIter<'a> {
    type Item = SlotNumber;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(SlotNumber::from_index(
                    self.word_ix * BitmapFreeSlots::BITS + bit,
                ));
            }
            self.word_ix += 1;
            self.current = *self.words.get(self.word_ix)?;
        }
    }
}

impl FreeSlotsRead for BitmapFreeSlots {
    type Iter<'a>
        = BitmapFreeIter<'a>
    where
        Self: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.count
    }

    #[inline]
    fn contains(&self, slot: SlotNumber) -> bool {
        let Some(ix) = slot.index() else {
            return false;
        };
        let (wi, mask) = Self::locate(ix);
        self.words.get(wi).is_some_and(|w| w & mask != 0)
    }

    #[inline]
    fn nearest(&self) -> Option<SlotNumber> {
        self.first_set()
            .map(|(wi, bit)| SlotNumber::from_index(wi * Self::BITS + bit as usize))
    }

    #[inline]
    fn iter(&self) -> Self::Iter<'_> {
        BitmapFreeIter {
            words: &self.words,
            word_ix: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }
}

impl FreeSlotsWrite for BitmapFreeSlots {
    fn insert(&mut self, slot: SlotNumber) -> bool {
        let Some(ix) = slot.index() else {
            return false;
        };
        let (wi, mask) = Self::locate(ix);
        if wi >= self.words.len() {
            self.words.resize(wi + 1, 0);
        }
        if self.words[wi] & mask != 0 {
            return false;
        }
        self.words[wi] |= mask;
        self.count += 1;
        self.first_word = self.first_word.min(wi);
        true
    }

    fn take_nearest(&mut self) -> Option<SlotNumber> {
        let (wi, bit) = self.first_set()?;
        self.words[wi] &= !(1u64 << bit);
        self.count -= 1;
        self.first_word = wi;
        Some(SlotNumber::from_index(wi * Self::BITS + bit as usize))
    }
}
