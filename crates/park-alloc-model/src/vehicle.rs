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

use std::fmt::Debug;

/// Compares two colors the way occupancy queries do: case-insensitively,
/// using full Unicode lowercasing.
#[inline]
pub fn colors_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Anything that can occupy a parking slot.
///
/// Implementors are immutable values. The registry never compares vehicles
/// with each other, only their attributes.
pub trait Vehicle: Debug {
    fn plate_number(&self) -> &str;

    fn color(&self) -> &str;

    /// How much of a slot the vehicle uses. Stored but never consulted when
    /// choosing a slot.
    fn usage_size(&self) -> f32;

    #[inline]
    fn has_color(&self, color: &str) -> bool {
        colors_match(self.color(), color)
    }

    #[inline]
    fn has_plate_number(&self, plate_number: &str) -> bool {
        self.plate_number() == plate_number
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    plate_number: String,
    color: String,
    usage_size: f32,
}

impl Car {
    #[inline]
    pub fn new(plate_number: impl Into<String>, color: impl Into<String>, usage_size: f32) -> Self {
        Self {
            plate_number: plate_number.into(),
            color: color.into(),
            usage_size,
        }
    }
}

impl Vehicle for Car {
    #[inline]
    fn plate_number(&self) -> &str {
        &self.plate_number
    }

    #[inline]
    fn color(&self) -> &str {
        &self.color
    }

    #[inline]
    fn usage_size(&self) -> f32 {
        self.usage_size
    }
}

impl<V: Vehicle + ?Sized> Vehicle for Box<V> {
    #[inline]
    fn plate_number(&self) -> &str {
        (**self).plate_number()
    }

    #[inline]
    fn color(&self) -> &str {
        (**self).color()
    }

    #[inline]
    fn usage_size(&self) -> f32 {
        (**self).usage_size()
    }
}
