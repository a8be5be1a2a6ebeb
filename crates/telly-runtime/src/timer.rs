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

//! Cancellable one-shot timers polled from the frame loop.
//!
//! A timer is only a deadline plus the action to run when it passes. The
//! runtime polls its timers once per frame, so expiry is quantized to frame
//! boundaries and never preempts anything.

use std::time::Duration;
use tokio::time::Instant;

/// A one-shot deadline carrying the action to perform when it expires.
#[derive(Debug)]
pub struct OneShotTimer<T> {
    name: &'static str,
    deadline: Option<Instant>,
    on_fire: Option<T>,
}

impl<T> OneShotTimer<T> {
    /// A disarmed timer. `name` only shows up in logs.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            deadline: None,
            on_fire: None,
        }
    }

    /// Arms the timer `after` from now, replacing any pending deadline.
    pub fn arm(&mut self, after: Duration, on_fire: T) {
        self.arm_at(Instant::now() + after, on_fire);
    }

    /// Arms the timer for an absolute deadline, replacing any pending one.
    pub fn arm_at(&mut self, deadline: Instant, on_fire: T) {
        log::trace!("Timer '{}' armed.", self.name);
        self.deadline = Some(deadline);
        self.on_fire = Some(on_fire);
    }

    /// Cancels the pending deadline. Returns whether one was pending.
    pub fn disarm(&mut self) -> bool {
        self.on_fire = None;
        let was_armed = self.deadline.take().is_some();
        if was_armed {
            log::trace!("Timer '{}' disarmed.", self.name);
        }
        was_armed
    }

    /// Whether a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fires the timer if its deadline is at or before `now`.
    ///
    /// Returns the action exactly once; the timer is disarmed afterwards.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                log::trace!("Timer '{}' fired.", self.name);
                self.on_fire.take()
            }
            _ => None,
        }
    }
}
