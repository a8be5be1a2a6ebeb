// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per-channel seed derivation.
//!
//! A seed depends on the channel id, its position in the registry and the UTC
//! calendar day. The same channel therefore renders identically across
//! restarts within a day and changes from one day to the next.

use crate::clock::Clock;
use crate::prng::hash_string_to_seed;

/// Knuth's multiplicative hashing constant, used to spread the day number.
pub const DAY_MIX: u32 = 2_654_435_761;

/// Spreads a calendar day number over all 32 bits.
///
/// Only the low 32 bits of `day` participate; the product wraps.
#[inline]
pub fn mix_day(day: u64) -> u32 {
    (day as u32).wrapping_mul(DAY_MIX)
}

/// Derives the seed for channel `id` at registry position `index` on `day`.
pub fn derive_seed(id: &str, index: usize, day: u64) -> u32 {
    let base = hash_string_to_seed(&format!("{id}:{index}"));
    base ^ mix_day(day)
}

/// Derives the seed for today according to `clock`.
pub fn seed_for_channel(id: &str, index: usize, clock: &dyn Clock) -> u32 {
    derive_seed(id, index, clock.calendar_day())
}
