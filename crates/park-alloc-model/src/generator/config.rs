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

use super::err::WorkloadGenConfigBuildError;
use park_alloc_core::slot::SlotCount;
use rand::Rng;

const DEFAULT_PALETTE: [&str; 6] = ["White", "Black", "Red", "Blue", "Silver", "Green"];

/// Configuration for synthetic park/leave workloads.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadGenConfig {
    pub(crate) capacity: SlotCount,
    pub(crate) operations: usize,
    pub(crate) leave_probability: f64,
    pub(crate) palette: Vec<String>,
    pub(crate) plate_pool: usize,
    pub(crate) seed: u64,
}

impl Default for WorkloadGenConfig {
    fn default() -> Self {
        Self {
            capacity: SlotCount::new(100),
            operations: 1_000,
            leave_probability: 0.4,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            plate_pool: 50,
            seed: 42,
        }
    }
}

impl WorkloadGenConfig {
    #[inline]
    pub fn capacity(&self) -> SlotCount {
        self.capacity
    }

    #[inline]
    pub fn operations(&self) -> usize {
        self.operations
    }

    #[inline]
    pub fn leave_probability(&self) -> f64 {
        self.leave_probability
    }

    #[inline]
    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    #[inline]
    pub fn plate_pool(&self) -> usize {
        self.plate_pool
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Builder for `WorkloadGenConfig`.
#[derive(Debug, Clone)]
pub struct WorkloadGenConfigBuilder {
    // Required
    capacity: Option<SlotCount>,
    operations: Option<usize>,

    // Optional with defaults
    leave_probability: f64,
    palette: Vec<String>,
    plate_pool: usize,
    seed: u64,
}

impl Default for WorkloadGenConfigBuilder {
    fn default() -> Self {
        let defaults = WorkloadGenConfig::default();
        Self {
            capacity: None,
            operations: None,
            leave_probability: defaults.leave_probability,
            palette: defaults.palette,
            plate_pool: defaults.plate_pool,
            seed: rand::rng().random(),
        }
    }
}

impl WorkloadGenConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn capacity(mut self, capacity: SlotCount) -> Self {
        self.capacity = Some(capacity);
        self
    }

    #[inline]
    pub fn operations(mut self, operations: usize) -> Self {
        self.operations = Some(operations);
        self
    }

    #[inline]
    pub fn leave_probability(mut self, p: f64) -> Self {
        self.leave_probability = p;
        self
    }

    #[inline]
    pub fn palette<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = colors.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn plate_pool(mut self, size: usize) -> Self {
        self.plate_pool = size;
        self
    }

    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<WorkloadGenConfig, WorkloadGenConfigBuildError> {
        use WorkloadGenConfigBuildError::*;
        let capacity = self.capacity.ok_or(MissingCapacity)?;
        let operations = self.operations.ok_or(MissingOperations)?;

        if !(0.0..=1.0).contains(&self.leave_probability) {
            return Err(InvalidLeaveProbability(self.leave_probability));
        }
        if self.palette.is_empty() {
            return Err(EmptyPalette);
        }
        if self.plate_pool == 0 {
            return Err(EmptyPlatePool);
        }

        Ok(WorkloadGenConfig {
            capacity,
            operations,
            leave_probability: self.leave_probability,
            palette: self.palette,
            plate_pool: self.plate_pool,
            seed: self.seed,
        })
    }
}
