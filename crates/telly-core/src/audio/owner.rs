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

//! Single-owner access to the shared audio output.
//!
//! The [`AudioResourceOwner`] is the only component allowed to toggle audio
//! enablement or talk to the [`AudioDevice`]. It keeps at most one "current"
//! sound registered at any time. Channels see it through the narrower
//! [`AudioAccessor`].

use super::device::{AudioDevice, BeepSpec, DroneSpec, NoiseSpec};
use super::sound::{SoundHandle, SoundId};
use super::AudioError;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Platform audio policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Whether enabling audio requires a [`UserGesture`].
    pub require_gesture: bool,
    /// Master output gain applied by the backend.
    pub master_gain: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            require_gesture: true,
            master_gain: 0.55,
        }
    }
}

/// Proof that an operation was triggered directly by user input.
///
/// Only the input layer should create these. Timers and other internal
/// events never carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserGesture(());

impl UserGesture {
    /// Marks the current operation as user-initiated.
    pub fn from_input() -> Self {
        Self(())
    }
}

struct OwnerState {
    device: Box<dyn AudioDevice>,
    settings: AudioSettings,
    acquired: bool,
    enabled: bool,
    current: Option<SoundHandle>,
    next_id: u64,
}

/// Gatekeeper for the shared audio device.
///
/// Cloning yields another reference to the same owner. The owner lives on a
/// single thread.
#[derive(Clone)]
pub struct AudioResourceOwner {
    state: Rc<RefCell<OwnerState>>,
}

impl fmt::Debug for AudioResourceOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("AudioResourceOwner")
            .field("enabled", &state.enabled)
            .field("acquired", &state.acquired)
            .field("current", &state.current.as_ref().map(SoundHandle::id))
            .finish()
    }
}

impl AudioResourceOwner {
    /// Wraps `device`. Audio starts disabled and nothing is acquired yet.
    pub fn new(device: Box<dyn AudioDevice>, settings: AudioSettings) -> Self {
        Self {
            state: Rc::new(RefCell::new(OwnerState {
                device,
                settings,
                acquired: false,
                enabled: false,
                current: None,
                next_id: 1,
            })),
        }
    }

    /// Whether audio output is enabled.
    pub fn is_enabled(&self) -> bool {
        self.state.borrow().enabled
    }

    /// The currently registered sound, if any.
    pub fn current_id(&self) -> Option<SoundId> {
        self.state.borrow().current.as_ref().map(SoundHandle::id)
    }

    /// The active policy.
    pub fn settings(&self) -> AudioSettings {
        self.state.borrow().settings
    }

    /// Lazily acquires the underlying device without enabling output.
    pub fn ensure(&self) -> Result<(), AudioError> {
        let mut state = self.state.borrow_mut();
        if state.acquired {
            return Ok(());
        }
        state
            .device
            .acquire()
            .map_err(|e| AudioError::Device(e.to_string()))?;
        state.acquired = true;
        log::debug!("Audio device acquired.");
        Ok(())
    }

    /// Enables audio output. A no-op when already enabled.
    ///
    /// Fails with [`AudioError::GestureRequired`] when the policy demands a
    /// gesture and none was supplied, and with [`AudioError::Device`] when the
    /// backend cannot start. Either way audio stays disabled.
    pub fn enable(&self, gesture: Option<UserGesture>) -> Result<(), AudioError> {
        {
            let state = self.state.borrow();
            if state.enabled {
                return Ok(());
            }
            if state.settings.require_gesture && gesture.is_none() {
                log::warn!("Audio enable refused: no user gesture.");
                return Err(AudioError::GestureRequired);
            }
        }
        self.ensure()?;
        let mut state = self.state.borrow_mut();
        state
            .device
            .resume()
            .map_err(|e| AudioError::Device(e.to_string()))?;
        state.enabled = true;
        log::info!("Audio enabled.");
        Ok(())
    }

    /// Stops the current sound, suspends the device and disables output.
    /// Idempotent. A failing suspend is logged and audio still ends up
    /// disabled.
    pub fn disable(&self) {
        self.stop_current();
        let mut state = self.state.borrow_mut();
        if !state.enabled {
            return;
        }
        state.enabled = false;
        if state.acquired {
            if let Err(e) = state.device.suspend() {
                log::warn!("Audio suspend failed: {e}");
            }
        }
        log::info!("Audio disabled.");
    }

    /// Flips enablement and returns the new state.
    pub fn toggle(&self, gesture: Option<UserGesture>) -> Result<bool, AudioError> {
        if self.is_enabled() {
            self.disable();
            Ok(false)
        } else {
            self.enable(gesture)?;
            Ok(true)
        }
    }

    /// Registers `handle` as the current sound.
    ///
    /// Any previously registered sound is stopped first. While audio is
    /// disabled the incoming handle is stopped instead of stored.
    pub fn set_current(&self, handle: SoundHandle) {
        let previous = {
            let mut state = self.state.borrow_mut();
            if !state.enabled {
                drop(state);
                log::debug!("Audio disabled; dropping {} instead of registering.", handle.id());
                stop_quietly(handle);
                return;
            }
            state.current.replace(handle)
        };
        if let Some(previous) = previous {
            log::debug!("Replacing current sound {}.", previous.id());
            stop_quietly(previous);
        }
    }

    /// Stops and clears the current sound. Safe when nothing is current.
    pub fn stop_current(&self) {
        let previous = self.state.borrow_mut().current.take();
        if let Some(previous) = previous {
            stop_quietly(previous);
        }
    }

    /// Creates a noise source bound to this owner's device.
    pub fn noise_source(&self, spec: NoiseSpec) -> Result<SoundHandle, AudioError> {
        self.ensure()?;
        let mut state = self.state.borrow_mut();
        let sound = state
            .device
            .noise(spec)
            .map_err(|e| AudioError::Device(e.to_string()))?;
        let id = next_id(&mut state);
        Ok(SoundHandle::new(id, sound))
    }

    /// Creates a drone bound to this owner's device.
    pub fn drone(&self, spec: DroneSpec) -> Result<SoundHandle, AudioError> {
        self.ensure()?;
        let mut state = self.state.borrow_mut();
        let sound = state
            .device
            .drone(spec)
            .map_err(|e| AudioError::Device(e.to_string()))?;
        let id = next_id(&mut state);
        Ok(SoundHandle::new(id, sound))
    }

    /// Plays a transient beep. Silent while disabled; errors are logged.
    pub fn beep(&self, spec: BeepSpec) {
        if !self.is_enabled() {
            return;
        }
        if let Err(e) = self.state.borrow_mut().device.beep(spec) {
            log::warn!("Beep failed: {e}");
        }
    }

    /// The channel-facing view of this owner.
    pub fn accessor(&self) -> AudioAccessor {
        AudioAccessor {
            owner: self.clone(),
        }
    }
}

fn next_id(state: &mut OwnerState) -> SoundId {
    let id = SoundId(state.next_id);
    state.next_id += 1;
    id
}

fn stop_quietly(handle: SoundHandle) {
    let id = handle.id();
    if let Err(e) = handle.stop() {
        log::warn!("Failed to stop {id}: {e}");
    }
}

/// What a channel is allowed to do with audio.
///
/// Channels can request playback and manage their current sound, but they
/// cannot enable or disable output.
#[derive(Clone, Debug)]
pub struct AudioAccessor {
    owner: AudioResourceOwner,
}

impl AudioAccessor {
    /// Whether audio output is enabled right now.
    pub fn enabled(&self) -> bool {
        self.owner.is_enabled()
    }

    /// See [`AudioResourceOwner::noise_source`].
    pub fn noise_source(&self, spec: NoiseSpec) -> Result<SoundHandle, AudioError> {
        self.owner.noise_source(spec)
    }

    /// See [`AudioResourceOwner::drone`].
    pub fn drone(&self, spec: DroneSpec) -> Result<SoundHandle, AudioError> {
        self.owner.drone(spec)
    }

    /// See [`AudioResourceOwner::beep`].
    pub fn beep(&self, spec: BeepSpec) {
        self.owner.beep(spec)
    }

    /// See [`AudioResourceOwner::set_current`].
    pub fn set_current(&self, handle: SoundHandle) {
        self.owner.set_current(handle)
    }

    /// See [`AudioResourceOwner::stop_current`].
    pub fn stop_current(&self) {
        self.owner.stop_current()
    }

    /// See [`AudioResourceOwner::ensure`].
    pub fn ensure(&self) -> Result<(), AudioError> {
        self.owner.ensure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::device::StreamInfo;
    use crate::audio::sound::Sound;
    use anyhow::{anyhow, Result};
    use std::cell::Cell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Calls {
        acquires: Cell<u32>,
        resumes: Cell<u32>,
        suspends: Cell<u32>,
        beeps: Cell<u32>,
        stops: RefCell<HashMap<u64, u32>>,
        created: Cell<u64>,
        fail_resume: Cell<bool>,
        fail_suspend: Cell<bool>,
        fail_stop: Cell<bool>,
    }

    struct FakeDevice(Rc<Calls>);

    struct FakeSound {
        n: u64,
        calls: Rc<Calls>,
    }

    impl Sound for FakeSound {
        fn start(&mut self) -> Result<()> {
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            *self.calls.stops.borrow_mut().entry(self.n).or_default() += 1;
            if self.calls.fail_stop.get() {
                return Err(anyhow!("node already stopped"));
            }
            Ok(())
        }
    }

    impl FakeDevice {
        fn sound(&self) -> Box<dyn Sound> {
            let n = self.0.created.get() + 1;
            self.0.created.set(n);
            Box::new(FakeSound {
                n,
                calls: self.0.clone(),
            })
        }
    }

    impl AudioDevice for FakeDevice {
        fn acquire(&mut self) -> Result<()> {
            self.0.acquires.set(self.0.acquires.get() + 1);
            Ok(())
        }

        fn resume(&mut self) -> Result<()> {
            if self.0.fail_resume.get() {
                return Err(anyhow!("no output device"));
            }
            self.0.resumes.set(self.0.resumes.get() + 1);
            Ok(())
        }

        fn suspend(&mut self) -> Result<()> {
            self.0.suspends.set(self.0.suspends.get() + 1);
            if self.0.fail_suspend.get() {
                return Err(anyhow!("stream lost"));
            }
            Ok(())
        }

        fn stream_info(&self) -> Option<StreamInfo> {
            None
        }

        fn noise(&mut self, _spec: NoiseSpec) -> Result<Box<dyn Sound>> {
            Ok(self.sound())
        }

        fn drone(&mut self, _spec: DroneSpec) -> Result<Box<dyn Sound>> {
            Ok(self.sound())
        }

        fn beep(&mut self, _spec: BeepSpec) -> Result<()> {
            self.0.beeps.set(self.0.beeps.get() + 1);
            Ok(())
        }
    }

    fn owner() -> (AudioResourceOwner, Rc<Calls>) {
        let calls = Rc::new(Calls::default());
        let owner = AudioResourceOwner::new(
            Box::new(FakeDevice(calls.clone())),
            AudioSettings::default(),
        );
        (owner, calls)
    }

    fn stops(calls: &Calls, n: u64) -> u32 {
        calls.stops.borrow().get(&n).copied().unwrap_or(0)
    }

    #[test]
    fn enable_requires_gesture() {
        let (owner, calls) = owner();
        assert!(matches!(owner.enable(None), Err(AudioError::GestureRequired)));
        assert!(!owner.is_enabled());
        assert_eq!(calls.resumes.get(), 0);
    }

    #[test]
    fn enable_is_idempotent() {
        let (owner, calls) = owner();
        owner.enable(Some(UserGesture::from_input())).unwrap();
        owner.enable(Some(UserGesture::from_input())).unwrap();
        assert!(owner.is_enabled());
        assert_eq!(calls.acquires.get(), 1);
        assert_eq!(calls.resumes.get(), 1);
    }

    #[test]
    fn device_failure_keeps_audio_off() {
        let (owner, calls) = owner();
        calls.fail_resume.set(true);
        let err = owner.enable(Some(UserGesture::from_input())).unwrap_err();
        assert!(matches!(err, AudioError::Device(_)));
        assert!(!owner.is_enabled());
    }

    #[test]
    fn gesture_not_needed_when_policy_allows() {
        let calls = Rc::new(Calls::default());
        let owner = AudioResourceOwner::new(
            Box::new(FakeDevice(calls)),
            AudioSettings {
                require_gesture: false,
                ..AudioSettings::default()
            },
        );
        owner.enable(None).unwrap();
        assert!(owner.is_enabled());
    }

    #[test]
    fn replacing_current_stops_previous_exactly_once() {
        let (owner, calls) = owner();
        owner.enable(Some(UserGesture::from_input())).unwrap();
        let audio = owner.accessor();

        let a = audio.noise_source(NoiseSpec::default()).unwrap();
        let b = audio.noise_source(NoiseSpec::default()).unwrap();
        let b_id = b.id();
        audio.set_current(a);
        audio.set_current(b);

        assert_eq!(stops(&calls, 1), 1);
        assert_eq!(stops(&calls, 2), 0);
        assert_eq!(owner.current_id(), Some(b_id));

        audio.stop_current();
        audio.stop_current();
        assert_eq!(stops(&calls, 1), 1);
        assert_eq!(stops(&calls, 2), 1);
        assert_eq!(owner.current_id(), None);
    }

    #[test]
    fn disable_releases_current() {
        let (owner, calls) = owner();
        owner.enable(Some(UserGesture::from_input())).unwrap();
        let handle = owner.drone(DroneSpec::default()).unwrap();
        owner.set_current(handle);
        owner.disable();
        owner.disable();
        assert!(!owner.is_enabled());
        assert_eq!(owner.current_id(), None);
        assert_eq!(stops(&calls, 1), 1);
        assert_eq!(calls.suspends.get(), 1);

        owner.enable(Some(UserGesture::from_input())).unwrap();
        assert_eq!(calls.resumes.get(), 2);
    }

    #[test]
    fn disable_before_enable_leaves_device_alone() {
        let (owner, calls) = owner();
        owner.disable();
        assert_eq!(calls.acquires.get(), 0);
        assert_eq!(calls.suspends.get(), 0);
    }

    #[test]
    fn failed_suspend_still_disables() {
        let (owner, calls) = owner();
        owner.enable(Some(UserGesture::from_input())).unwrap();
        calls.fail_suspend.set(true);
        owner.disable();
        assert!(!owner.is_enabled());
        assert_eq!(calls.suspends.get(), 1);
    }

    #[test]
    fn set_current_while_disabled_stops_incoming() {
        let (owner, calls) = owner();
        let handle = owner.noise_source(NoiseSpec::default()).unwrap();
        owner.set_current(handle);
        assert_eq!(owner.current_id(), None);
        assert_eq!(stops(&calls, 1), 1);
    }

    #[test]
    fn stop_errors_are_swallowed() {
        let (owner, calls) = owner();
        owner.enable(Some(UserGesture::from_input())).unwrap();
        calls.fail_stop.set(true);
        let handle = owner.noise_source(NoiseSpec::default()).unwrap();
        owner.set_current(handle);
        owner.stop_current();
        assert_eq!(owner.current_id(), None);
        assert_eq!(stops(&calls, 1), 1);
    }

    #[test]
    fn beeps_bypass_ownership_and_respect_enablement() {
        let (owner, calls) = owner();
        owner.beep(BeepSpec::default());
        assert_eq!(calls.beeps.get(), 0);
        owner.enable(Some(UserGesture::from_input())).unwrap();
        let handle = owner.noise_source(NoiseSpec::default()).unwrap();
        let id = handle.id();
        owner.set_current(handle);
        owner.beep(BeepSpec::default());
        assert_eq!(calls.beeps.get(), 1);
        assert_eq!(owner.current_id(), Some(id));
    }

    #[test]
    fn toggle_flips_state() {
        let (owner, _calls) = owner();
        assert!(owner.toggle(Some(UserGesture::from_input())).unwrap());
        assert!(!owner.toggle(None).unwrap());
        assert!(owner.toggle(None).is_err());
    }
}
