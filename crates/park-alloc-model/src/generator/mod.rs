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

mod config;
mod err;

pub use config::{WorkloadGenConfig, WorkloadGenConfigBuilder};
pub use err::WorkloadGenConfigBuildError;

use crate::vehicle::Car;
use park_alloc_core::slot::SlotNumber;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One step of a synthetic workload.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkloadOp {
    Park(Car),
    Leave(SlotNumber),
}

/// Produces reproducible park/leave streams for a lot of a given capacity.
///
/// Leave targets are drawn uniformly from `1..=capacity` without regard to
/// which slots are taken, so a stream also exercises the "not parked" path.
/// Likewise parks are not throttled, so a small lot will run full.
pub struct WorkloadGenerator {
    config: WorkloadGenConfig,
    rng: ChaCha8Rng,
}

impl From<WorkloadGenConfig> for WorkloadGenerator {
    fn from(config: WorkloadGenConfig) -> Self {
        Self::new(config)
    }
}

impl WorkloadGenerator {
    pub fn new(config: WorkloadGenConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed());
        Self { config, rng }
    }

    #[inline]
    pub fn config(&self) -> &WorkloadGenConfig {
        &self.config
    }

    fn sample_car(&mut self) -> Car {
        let plate = self.rng.random_range(0..self.config.plate_pool);
        let color_ix = self.rng.random_range(0..self.config.palette.len());
        Car::new(
            format!("KA-01-{:04}", plate),
            self.config.palette[color_ix].clone(),
            1.0,
        )
    }

    fn sample_slot(&mut self) -> SlotNumber {
        let capacity = self.config.capacity.value();
        // Capacity zero still yields slot 1, which then never exists.
        SlotNumber::new(self.rng.random_range(1..=capacity.max(1)))
    }

    pub fn next_op(&mut self) -> WorkloadOp {
        if self.rng.random_bool(self.config.leave_probability) {
            WorkloadOp::Leave(self.sample_slot())
        } else {
            WorkloadOp::Park(self.sample_car())
        }
    }

    pub fn generate(&mut self) -> Vec<WorkloadOp> {
        (0..self.config.operations).map(|_| self.next_op()).collect()
    }
}
