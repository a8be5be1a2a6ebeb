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

mod common;

use common::*;
use telly_core::audio::{AudioError, UserGesture};
use telly_core::channel::{derive_seed, PluginLoadError};
use telly_core::render::Viewport;
use telly_runtime::{Hook, Phase, RuntimeCommand, RuntimeError};
use std::time::Duration;
use tokio::time::Instant;

fn gesture() -> Option<UserGesture> {
    Some(UserGesture::from_input())
}

#[tokio::test(start_paused = true)]
async fn power_on_tunes_current_channel() {
    let mut h = harness();
    assert_eq!(h.runtime.phase(), Phase::Off);
    assert!(h.runtime.active_channel().is_none());

    h.runtime.toggle_power().await.unwrap();

    assert_eq!(h.runtime.phase(), Phase::Idle);
    let active = h.runtime.active_channel().unwrap();
    assert_eq!(active.id, "ch0");
    assert_eq!(active.seed, derive_seed("ch0", 0, DAY));
    assert_eq!(
        events(&h.log)
            .into_iter()
            .filter(|e| !matches!(e, Ev::Opacity(_)))
            .collect::<Vec<_>>(),
        vec![
            Ev::Load("mod0".into()),
            Ev::Create("ch0".into(), derive_seed("ch0", 0, DAY)),
            Ev::Init("ch0".into()),
            Ev::Show("ch0".into()),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn step_up_replaces_channel_with_fresh_seed() {
    let mut h = harness();
    h.runtime.toggle_power().await.unwrap();
    h.runtime.toggle_audio(gesture()).unwrap();
    clear(&h.log);

    h.runtime.channel_step(1).await.unwrap();

    assert_eq!(h.runtime.state().current_index, 1);
    let seed = derive_seed("ch1", 1, DAY);
    assert_eq!(h.runtime.active_channel().unwrap().seed, seed);
    let destroyed = position(&h.log, &Ev::Destroy("ch0".into())).unwrap();
    let created = position(&h.log, &Ev::Create("ch1".into(), seed)).unwrap();
    let init = position(&h.log, &Ev::Init("ch1".into())).unwrap();
    assert!(destroyed < created && created < init);
    assert_eq!(count(&h.log, |e| matches!(e, Ev::AudioOn(_))), 1);
}

#[tokio::test(start_paused = true)]
async fn step_wraps_both_ways() {
    let mut h = harness();
    h.runtime.toggle_power().await.unwrap();
    h.runtime.channel_step(-1).await.unwrap();
    assert_eq!(h.runtime.state().current_index, 4);
    h.runtime.channel_step(1).await.unwrap();
    assert_eq!(h.runtime.state().current_index, 0);
}

#[tokio::test(start_paused = true)]
async fn switch_index_is_clamped() {
    let mut h = harness();
    h.runtime.toggle_power().await.unwrap();
    h.runtime.switch_to(99).await.unwrap();
    assert_eq!(h.runtime.state().current_index, 4);
}

#[tokio::test(start_paused = true)]
async fn seeds_agree_across_runtimes_on_the_same_day() {
    let mut a = harness();
    let mut b = harness();
    for h in [&mut a, &mut b] {
        h.runtime.toggle_power().await.unwrap();
        h.runtime.switch_to(3).await.unwrap();
    }
    let sa = a.runtime.active_channel().unwrap().seed;
    let sb = b.runtime.active_channel().unwrap().seed;
    assert_eq!(sa, sb);
    assert_eq!(sa, derive_seed("ch3", 3, DAY));
}

#[tokio::test(start_paused = true)]
async fn teardown_stops_sound_the_channel_left_behind() {
    let mut h = harness();
    h.runtime.toggle_power().await.unwrap();
    h.runtime.toggle_audio(gesture()).unwrap();
    assert_eq!(count(&h.log, |e| *e == Ev::SoundStart(1)), 1);

    h.runtime.channel_step(1).await.unwrap();
    assert_eq!(count(&h.log, |e| *e == Ev::SoundStop(1)), 1);
    assert_eq!(count(&h.log, |e| *e == Ev::SoundStart(2)), 1);
    assert_eq!(h.audio.current_id().map(|id| id.0), Some(2));

    h.runtime.toggle_power().await.unwrap();
    assert_eq!(count(&h.log, |e| *e == Ev::SoundStop(2)), 1);
    assert_eq!(h.audio.current_id(), None);
}

#[tokio::test(start_paused = true)]
async fn audio_needs_a_gesture() {
    let mut h = harness();
    h.runtime.toggle_power().await.unwrap();

    let err = h.runtime.toggle_audio(None).unwrap_err();
    assert_eq!(err, AudioError::GestureRequired);
    assert!(!h.runtime.state().audio_enabled);
    assert_eq!(count(&h.log, |e| matches!(e, Ev::AudioOn(_))), 0);

    assert!(h.runtime.toggle_audio(gesture()).unwrap());
    assert!(h.runtime.state().audio_enabled);
    assert_eq!(count(&h.log, |e| *e == Ev::AudioOn("ch0".into())), 1);

    assert!(!h.runtime.toggle_audio(gesture()).unwrap());
    assert_eq!(count(&h.log, |e| *e == Ev::AudioOff("ch0".into())), 1);
    assert_eq!(h.audio.current_id(), None);
}

#[tokio::test(start_paused = true)]
async fn cues_play_only_with_audio_on() {
    let mut h = harness();
    h.runtime.toggle_power().await.unwrap();
    h.runtime.channel_step(1).await.unwrap();
    assert_eq!(count(&h.log, |e| matches!(e, Ev::Beep(_))), 0);

    h.runtime.toggle_audio(gesture()).unwrap();
    h.runtime.channel_step(1).await.unwrap();
    assert_eq!(count(&h.log, |e| *e == Ev::Beep(620.0)), 1);
    h.runtime.toggle_scan();
    assert_eq!(count(&h.log, |e| *e == Ev::Beep(880.0)), 1);
}

#[tokio::test(start_paused = true)]
async fn missing_module_leaves_set_on_without_channel() {
    let mut h = Setup {
        missing: vec!["mod1"],
        ..Setup::default()
    }
    .build();
    h.runtime.toggle_power().await.unwrap();

    let err = h.runtime.channel_step(1).await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Load(PluginLoadError::ModuleNotFound { ref module }) if module == "mod1"
    ));
    assert!(h.runtime.state().powered);
    assert_eq!(h.runtime.phase(), Phase::Idle);
    assert!(h.runtime.active_channel().is_none());
    assert_eq!(count(&h.log, |e| *e == Ev::Destroy("ch0".into())), 1);
    assert_eq!(h.runtime.stats().switches_failed, 1);

    // The broken channel can be stepped past.
    h.runtime.channel_step(1).await.unwrap();
    assert_eq!(h.runtime.active_channel().unwrap().id, "ch2");

    // Frames keep running while channel-less.
    h.runtime.switch_to(1).await.unwrap_err();
    h.runtime.tick(Instant::now()).await;
}

#[tokio::test(start_paused = true)]
async fn failed_init_is_destroyed_and_surfaced() {
    let mut h = harness();
    h.fail(
        "ch1",
        Faults {
            init: true,
            ..Faults::default()
        },
    );
    h.runtime.toggle_power().await.unwrap();

    let err = h.runtime.channel_step(1).await.unwrap_err();
    match err {
        RuntimeError::Instantiate(fault) => {
            assert_eq!(fault.hook, Hook::Init);
            assert_eq!(fault.channel, "ch1");
        }
        other => panic!("unexpected error: {other}"),
    }
    let init = position(&h.log, &Ev::Init("ch1".into())).unwrap();
    let destroy = position(&h.log, &Ev::Destroy("ch1".into())).unwrap();
    assert!(init < destroy);
    assert!(h.runtime.active_channel().is_none());
    assert_eq!(h.runtime.state().current_index, 1);
}

#[tokio::test(start_paused = true)]
async fn failed_factory_is_surfaced() {
    let mut h = harness();
    h.fail(
        "ch0",
        Faults {
            factory: true,
            ..Faults::default()
        },
    );
    let err = h.runtime.toggle_power().await.unwrap_err();
    assert!(matches!(err, RuntimeError::Instantiate(ref f) if f.hook == Hook::Factory));
    assert!(h.runtime.state().powered);
    assert_eq!(count(&h.log, |e| matches!(e, Ev::Init(_))), 0);
}

#[tokio::test(start_paused = true)]
async fn panicking_render_is_contained_per_frame() {
    let mut h = harness();
    h.fail(
        "ch0",
        Faults {
            render_panics: true,
            ..Faults::default()
        },
    );
    h.runtime.toggle_power().await.unwrap();
    for _ in 0..3 {
        h.runtime.tick(Instant::now()).await;
        tokio::time::advance(std::time::Duration::from_millis(16)).await;
    }
    assert_eq!(count(&h.log, |e| matches!(e, Ev::Render(_))), 3);
    assert_eq!(h.runtime.active_channel().unwrap().faults, 3);
    assert_eq!(h.runtime.stats().plugin_faults, 3);
}

#[tokio::test(start_paused = true)]
async fn failed_update_skips_render() {
    let mut h = harness();
    h.fail(
        "ch0",
        Faults {
            update: true,
            ..Faults::default()
        },
    );
    h.runtime.toggle_power().await.unwrap();
    h.runtime.tick(Instant::now()).await;
    assert_eq!(count(&h.log, |e| matches!(e, Ev::Update(_))), 1);
    assert_eq!(count(&h.log, |e| matches!(e, Ev::Render(_))), 0);
}

#[tokio::test(start_paused = true)]
async fn power_off_tears_down_and_blocks_channel_ops() {
    let mut h = harness();
    h.runtime.toggle_power().await.unwrap();
    h.runtime.toggle_power().await.unwrap();

    assert_eq!(h.runtime.phase(), Phase::Off);
    assert!(h.runtime.active_channel().is_none());
    let hide = position(&h.log, &Ev::Hide("ch0".into())).unwrap();
    let destroy = position(&h.log, &Ev::Destroy("ch0".into())).unwrap();
    assert!(hide < destroy);

    assert!(matches!(h.runtime.channel_step(1).await, Err(RuntimeError::PoweredOff)));
    assert!(matches!(h.runtime.add_digit(1), Err(RuntimeError::PoweredOff)));
    assert!(matches!(h.runtime.switch_to(2).await, Err(RuntimeError::PoweredOff)));

    clear(&h.log);
    h.runtime.tick(Instant::now()).await;
    assert_eq!(count(&h.log, |e| matches!(e, Ev::Render(_) | Ev::Update(_))), 0);
}

#[tokio::test(start_paused = true)]
async fn resize_reaches_channel_once() {
    let mut h = harness();
    h.runtime.toggle_power().await.unwrap();
    let _ = h
        .runtime
        .handle(RuntimeCommand::Resize(Viewport::new(80, 60, 1.0)))
        .await;
    h.runtime.tick(Instant::now()).await;
    h.runtime.tick(Instant::now()).await;
    assert_eq!(count(&h.log, |e| matches!(e, Ev::Resize(..))), 1);
    assert!(position(&h.log, &Ev::Resize("ch0".into(), 80, 60)).is_some());
}

#[tokio::test(start_paused = true)]
async fn load_errors_are_surfaced_unchanged() {
    let missing_factory = PluginLoadError::MissingFactory {
        module: "mod1".into(),
    };
    let failed = PluginLoadError::Failed {
        module: "mod2".into(),
        reason: "truncated module".into(),
    };
    let mut h = Setup {
        load_errors: vec![("mod1", missing_factory.clone()), ("mod2", failed.clone())],
        ..Setup::default()
    }
    .build();
    h.runtime.toggle_power().await.unwrap();

    match h.runtime.switch_to(1).await {
        Err(RuntimeError::Load(err)) => assert_eq!(err, missing_factory),
        other => panic!("expected a load error, got {other:?}"),
    }
    assert!(h.runtime.active_channel().is_none());
    match h.runtime.switch_to(2).await {
        Err(RuntimeError::Load(err)) => {
            assert_eq!(err, failed);
            assert!(err.to_string().contains("truncated module"));
        }
        other => panic!("expected a load error, got {other:?}"),
    }
    assert!(h.runtime.state().powered);
    assert_eq!(h.runtime.stats().switches_failed, 2);

    h.runtime.switch_to(3).await.unwrap();
    assert_eq!(h.runtime.active_channel().unwrap().id, "ch3");
}

#[tokio::test(start_paused = true)]
async fn out_of_range_resize_is_ignored() {
    let mut h = harness();
    h.runtime.toggle_power().await.unwrap();
    let before = h.runtime.target().viewport();
    let huge = Viewport::new(u32::MAX, u32::MAX, 1.0);
    assert!(h.runtime.handle(RuntimeCommand::Resize(huge)).await.is_continue());
    let empty = Viewport::new(0, 60, 1.0);
    assert!(h.runtime.handle(RuntimeCommand::Resize(empty)).await.is_continue());
    h.runtime.tick(Instant::now()).await;
    assert_eq!(h.runtime.target().viewport(), before);
    assert_eq!(count(&h.log, |e| matches!(e, Ev::Resize(..))), 0);
}

#[tokio::test(start_paused = true)]
async fn power_on_flashes_the_banner() {
    let mut h = harness();
    let _ = h.runtime.handle(RuntimeCommand::PowerToggle).await;
    assert!(h.runtime.overlays().flash_until.is_some());
    assert!(h.runtime.osd(Instant::now()).visible);

    tokio::time::advance(Duration::from_millis(1_300)).await;
    assert!(!h.runtime.osd(Instant::now()).visible);

    let _ = h.runtime.handle(RuntimeCommand::PowerToggle).await;
    assert!(h.runtime.overlays().flash_until.is_none());
}

#[tokio::test(start_paused = true)]
async fn osd_and_guide_follow_state() {
    let mut h = harness();
    let _ = h.runtime.handle(RuntimeCommand::ToggleGuide).await;
    assert!(!h.runtime.overlays().show_guide);

    let _ = h.runtime.handle(RuntimeCommand::PowerToggle).await;
    let now = Instant::now();
    let osd = h.runtime.osd(now);
    assert_eq!(osd.power, "ON");
    assert_eq!(osd.channel, "CH 01");
    assert_eq!(osd.status, "CH 01 ch0");
    assert_eq!(osd.audio, "AUDIO: OFF");
    assert_eq!(osd.seed, Some(derive_seed("ch0", 0, DAY)));

    let _ = h.runtime.handle(RuntimeCommand::Digit(4)).await;
    assert_eq!(h.runtime.phase(), Phase::Tuning);
    let osd = h.runtime.osd(Instant::now());
    assert_eq!(osd.status, "4");
    assert!(osd.visible);

    let _ = h.runtime.handle(RuntimeCommand::ToggleGuide).await;
    let guide = h.runtime.guide();
    assert_eq!(guide.len(), 5);
    assert!(guide[0].active);
    assert_eq!(guide[2].number, "CH 03");

    let _ = h.runtime.handle(RuntimeCommand::PowerToggle).await;
    assert!(!h.runtime.overlays().show_guide);
    assert!(!h.runtime.osd(Instant::now()).visible);
}

#[tokio::test(start_paused = true)]
async fn quit_breaks_the_loop() {
    let mut h = harness();
    assert!(h.runtime.handle(RuntimeCommand::Quit).await.is_break());
    assert!(h.runtime.handle(RuntimeCommand::ToggleInfo).await.is_continue());
    assert!(h.runtime.overlays().show_info);
}
