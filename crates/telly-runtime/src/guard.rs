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

//! Containment of channel failures.
//!
//! Every call into a channel goes through [`guarded`]: an `Err` or a panic
//! coming out of a hook becomes a [`PluginFault`] and never reaches the
//! frame loop.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// The channel entry point that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    /// The factory call.
    Factory,
    /// `init`.
    Init,
    /// `on_resize`.
    Resize,
    /// `on_show`.
    Show,
    /// `on_hide`.
    Hide,
    /// `update`.
    Update,
    /// `render`.
    Render,
    /// `on_audio_on`.
    AudioOn,
    /// `on_audio_off`.
    AudioOff,
    /// `destroy`.
    Destroy,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Hook::Factory => "factory",
            Hook::Init => "init",
            Hook::Resize => "on_resize",
            Hook::Show => "on_show",
            Hook::Hide => "on_hide",
            Hook::Update => "update",
            Hook::Render => "render",
            Hook::AudioOn => "on_audio_on",
            Hook::AudioOff => "on_audio_off",
            Hook::Destroy => "destroy",
        };
        f.write_str(name)
    }
}

/// A failure raised by a channel hook.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("channel '{channel}' failed in {hook}: {reason}")]
pub struct PluginFault {
    /// Id of the channel.
    pub channel: String,
    /// Hook that failed.
    pub hook: Hook,
    /// Error or panic message.
    pub reason: String,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}

/// Runs one channel hook, turning errors and panics into a [`PluginFault`].
pub fn guarded<T>(
    channel: &str,
    hook: Hook,
    call: impl FnOnce() -> anyhow::Result<T>,
) -> Result<T, PluginFault> {
    let reason = match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => return Ok(value),
        Ok(Err(err)) => format!("{err:#}"),
        Err(payload) => panic_message(payload.as_ref()),
    };
    Err(PluginFault {
        channel: channel.to_string(),
        hook,
        reason,
    })
}
