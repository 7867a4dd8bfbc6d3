mod common;

use std::{
    sync::{Arc, atomic::AtomicUsize},
    time::Duration,
};

use common::{Fixture, TRACK_PX};
use slider_config::{OptionsRegistry, RawOptions};
use slider_core::{HandleId, InputResponse, Key, ModelValue};
use slider_engine::{
    CountingObserver, Error, InteractionKind, LabelSlot, SharedModel, Signal, SignalBus, Slider,
    SliderMsg,
};

const STEP_TEN: &str = "(floor: 0.0, ceil: 100.0, step: 10.0)";

fn count(c: &AtomicUsize) -> usize {
    CountingObserver::count(c)
}

#[tokio::test(start_paused = true)]
async fn single_slider_renders_ticks_for_every_step() {
    let mut fx = Fixture::single(10.0, "(floor: 0.0, ceil: 100.0, step: 10.0, showTicks: true)");
    let frames = fx.frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].ticks.len(), 11);
    assert_eq!(frames[0].handles.len(), 1);
    assert_eq!(frames[0].handles[0].pixel, 100.0);
}

#[tokio::test(start_paused = true)]
async fn single_slider_rounds_model_value_to_step() {
    let fx = Fixture::single(10.0, STEP_TEN);

    fx.model.set_single(54.0);
    assert_eq!(fx.model.get(), ModelValue::Single(50.0));

    fx.model.set_single(55.0);
    assert!(fx.slider.is_render_pending());
    assert_eq!(fx.model.get(), ModelValue::Single(55.0));
    assert!(fx.slider.flush());
    assert_eq!(fx.model.get(), ModelValue::Single(60.0));
}

#[tokio::test(start_paused = true)]
async fn trailing_pass_fires_after_window() {
    let fx = Fixture::single(10.0, STEP_TEN);
    fx.model.set_single(54.0);
    fx.model.set_single(55.0);
    fx.settle().await;
    assert_eq!(fx.model.get(), ModelValue::Single(60.0));
    assert!(!fx.slider.is_render_pending());
}

#[tokio::test(start_paused = true)]
async fn burst_of_writes_renders_only_the_last() {
    let mut fx = Fixture::single(10.0, STEP_TEN);
    fx.model.set_single(30.0);
    fx.drain();
    for v in [41.0, 57.0, 71.0, 88.0] {
        fx.model.set_single(v);
    }
    assert!(fx.frames().is_empty());
    fx.settle().await;
    let frames = fx.frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].handles[0].value, 90.0);
    assert_eq!(fx.model.get(), ModelValue::Single(90.0));
}

#[tokio::test(start_paused = true)]
async fn range_slider_rounds_both_bounds() {
    let fx = Fixture::range(10.0, 90.0, STEP_TEN);

    fx.model.set_range(13.0, 94.0);
    assert_eq!(
        fx.model.get(),
        ModelValue::Range {
            low: 10.0,
            high: 90.0
        }
    );

    fx.model.set_range(15.0, 95.0);
    fx.slider.flush();
    assert_eq!(
        fx.model.get(),
        ModelValue::Range {
            low: 20.0,
            high: 100.0
        }
    );
}

#[tokio::test(start_paused = true)]
async fn inverted_external_range_is_reordered() {
    let fx = Fixture::range(10.0, 90.0, STEP_TEN);
    fx.model.set_range(80.0, 20.0);
    assert_eq!(
        fx.model.get(),
        ModelValue::Range {
            low: 20.0,
            high: 80.0
        }
    );
}

#[tokio::test(start_paused = true)]
async fn initial_value_is_normalised_and_written_back() {
    let fx = Fixture::single(137.0, STEP_TEN);
    assert_eq!(fx.model.get(), ModelValue::Single(100.0));
    assert_eq!(fx.slider.value(), ModelValue::Single(100.0));
}

#[tokio::test(start_paused = true)]
async fn recalc_view_dimensions_remeasures_synchronously() {
    let fx = Fixture::single(10.0, STEP_TEN);
    fx.observer.reset();
    fx.track.set(400.0);
    fx.bus.broadcast(Signal::RecalcViewDimensions);
    assert_eq!(count(&fx.observer.calc_view_dimensions), 1);
    assert_eq!(fx.slider.track_length(), 400.0);
}

#[tokio::test(start_paused = true)]
async fn window_resize_remeasures() {
    let fx = Fixture::single(10.0, STEP_TEN);
    fx.observer.reset();
    fx.bus.broadcast(Signal::WindowResize);
    assert_eq!(count(&fx.observer.calc_view_dimensions), 1);
}

#[tokio::test(start_paused = true)]
async fn force_render_resets_everything_for_single_slider() {
    let fx = Fixture::single(10.0, STEP_TEN);
    fx.observer.reset();
    fx.bus.broadcast(Signal::ForceRender);
    assert_eq!(count(&fx.observer.reset_labels_value), 1);
    assert_eq!(count(&fx.observer.reset_slider), 1);
    assert_eq!(count(&fx.observer.low_handle_changes), 1);
    assert_eq!(count(&fx.observer.high_handle_changes), 0);
}

#[tokio::test(start_paused = true)]
async fn force_render_resets_everything_for_range_slider() {
    let mut fx = Fixture::range(10.0, 90.0, STEP_TEN);
    fx.drain();
    fx.observer.reset();
    fx.bus.broadcast(Signal::ForceRender);
    assert_eq!(count(&fx.observer.reset_labels_value), 1);
    assert_eq!(count(&fx.observer.reset_slider), 1);
    assert_eq!(count(&fx.observer.low_handle_changes), 1);
    assert_eq!(count(&fx.observer.high_handle_changes), 1);

    // Label caches were dropped, so every label is reported again.
    let frames = fx.frames();
    let slots: Vec<LabelSlot> = frames[0].labels.iter().map(|l| l.slot).collect();
    assert_eq!(
        slots,
        vec![
            LabelSlot::Floor,
            LabelSlot::Ceil,
            LabelSlot::Low,
            LabelSlot::High
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn unchanged_labels_are_not_repeated() {
    let mut fx = Fixture::single(10.0, STEP_TEN);
    fx.drain();
    fx.model.set_single(40.0);
    let frames = fx.frames();
    assert_eq!(frames.len(), 1);
    let slots: Vec<LabelSlot> = frames[0].labels.iter().map(|l| l.slot).collect();
    assert_eq!(slots, vec![LabelSlot::Low]);
}

#[tokio::test(start_paused = true)]
async fn destroy_unregisters_everything() {
    let fx = Fixture::single(10.0, STEP_TEN);
    fx.observer.reset();

    fx.bus.broadcast(Signal::Destroy);
    fx.bus.broadcast(Signal::WindowResize);

    assert_eq!(count(&fx.observer.calc_view_dimensions), 0);
    assert_eq!(count(&fx.observer.unbind_events), 1);
    assert_eq!(fx.bus.subscriber_count(), 0);
    assert_eq!(fx.model.listener_count(), 0);
    assert!(fx.slider.is_destroyed());

    // Idempotent teardown.
    assert!(!fx.slider.destroy());
    assert_eq!(count(&fx.observer.unbind_events), 1);

    assert!(matches!(fx.slider.window_resize(), Err(Error::Destroyed)));
    assert_eq!(count(&fx.observer.calc_view_dimensions), 0);
}

#[tokio::test(start_paused = true)]
async fn destroy_cancels_pending_render() {
    let mut fx = Fixture::single(10.0, STEP_TEN);
    fx.model.set_single(30.0);
    fx.model.set_single(55.0);
    fx.drain();
    fx.slider.destroy();
    fx.settle().await;
    assert!(fx.frames().is_empty());
    assert_eq!(fx.model.get(), ModelValue::Single(55.0));

    fx.model.set_single(77.0);
    assert_eq!(fx.model.get(), ModelValue::Single(77.0));
}

#[tokio::test(start_paused = true)]
async fn options_resolve_through_registry_layers() {
    let registry = OptionsRegistry::new();
    registry.options(RawOptions {
        step: Some(10.0),
        show_ticks: Some(true),
        ..RawOptions::default()
    });
    let model = SharedModel::single(33.0);
    let (slider, _rx) = Slider::builder(Arc::new(model.clone()))
        .registry(&registry)
        .options(RawOptions {
            show_ticks: Some(false),
            ..RawOptions::default()
        })
        .build()
        .expect("slider builds");
    let opts = slider.options();
    assert_eq!(opts.step, 10.0);
    assert!(!opts.show_ticks);
    assert_eq!(model.get(), ModelValue::Single(30.0));
}

#[tokio::test(start_paused = true)]
async fn invalid_configuration_is_rejected() {
    let model = SharedModel::single(10.0);
    let res = Slider::builder(Arc::new(model))
        .registry(&OptionsRegistry::new())
        .options(RawOptions {
            floor: Some(10.0),
            ceil: Some(0.0),
            ..RawOptions::default()
        })
        .build();
    assert!(matches!(res, Err(Error::Config(_))));
}

#[tokio::test(start_paused = true)]
async fn set_options_keeps_last_valid_configuration() {
    let fx = Fixture::single(40.0, STEP_TEN);
    let err = fx.slider.set_options(RawOptions {
        step: Some(0.0),
        ..RawOptions::default()
    });
    assert!(matches!(err, Err(Error::Config(_))));
    assert_eq!(fx.slider.options().step, 10.0);

    fx.slider
        .set_options(RawOptions {
            step: Some(25.0),
            ..RawOptions::default()
        })
        .expect("valid options apply");
    assert_eq!(fx.model.get(), ModelValue::Single(50.0));
}

#[tokio::test(start_paused = true)]
async fn zero_track_length_collapses_positions() {
    let mut fx = Fixture::range(20.0, 80.0, STEP_TEN);
    fx.drain();
    fx.track.set(0.0);
    fx.slider.recalc_view_dimensions().expect("live slider");
    fx.settle().await;
    let frames = fx.frames();
    let last = frames.last().expect("a frame after remeasure");
    assert_eq!(last.track_length, 0.0);
    assert!(last.handles.iter().all(|h| h.pixel == 0.0));
}

#[tokio::test(start_paused = true)]
async fn vertical_track_inverts_pixels() {
    let mut fx = Fixture::single(30.0, "(floor: 0.0, ceil: 100.0, step: 10.0, vertical: true)");
    let frames = fx.frames();
    assert_eq!(frames[0].handles[0].pixel, TRACK_PX * (1.0 - 0.3));
}

#[tokio::test(start_paused = true)]
async fn pointer_drag_emits_interactions() {
    let mut fx = Fixture::single(
        0.0,
        "(floor: 0.0, ceil: 100.0, step: 1.0, id: \"volume\")",
    );
    fx.drain();
    fx.slider.pointer_down(HandleId::Min, 0.0).expect("live");
    fx.slider.pointer_move(1.0).expect("live");
    assert_eq!(fx.model.get(), ModelValue::Single(0.0));
    fx.slider.pointer_move(250.0).expect("live");
    assert_eq!(fx.model.get(), ModelValue::Single(25.0));
    assert_eq!(fx.slider.pointer_up().expect("live"), Some(HandleId::Min));

    let kinds: Vec<(InteractionKind, Option<String>)> = fx
        .drain()
        .into_iter()
        .filter_map(|m| match m {
            SliderMsg::Interaction { kind, id, .. } => Some((kind, id)),
            SliderMsg::Frame(_) => None,
        })
        .collect();
    let id = Some("volume".to_string());
    assert_eq!(
        kinds,
        vec![
            (InteractionKind::Start, id.clone()),
            (InteractionKind::Change, id.clone()),
            (InteractionKind::End, id),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn track_press_moves_nearest_handle() {
    let fx = Fixture::range(20.0, 80.0, "(floor: 0.0, ceil: 100.0, step: 1.0)");
    fx.slider.pointer_down_on_track(700.0).expect("live");
    assert_eq!(
        fx.model.get(),
        ModelValue::Range {
            low: 20.0,
            high: 70.0
        }
    );
    assert!(
        fx.slider
            .handle_state(HandleId::Max)
            .is_some_and(|h| h.dragging())
    );
    fx.slider.pointer_up().expect("live");
    assert!(
        fx.slider
            .handle_state(HandleId::Max)
            .is_some_and(|h| h.active() && !h.dragging())
    );
}

#[tokio::test(start_paused = true)]
async fn disabled_slider_ignores_pointer() {
    let fx = Fixture::single(40.0, "(floor: 0.0, ceil: 100.0, disabled: true)");
    fx.slider.pointer_down(HandleId::Min, 400.0).expect("live");
    fx.slider.pointer_move(900.0).expect("live");
    fx.slider.pointer_down_on_track(100.0).expect("live");
    assert_eq!(fx.model.get(), ModelValue::Single(40.0));
    assert_eq!(fx.slider.pointer_up().expect("live"), None);
}

#[tokio::test(start_paused = true)]
async fn closed_receiver_does_not_block_host_writes() {
    let model = SharedModel::single(10.0);
    let (slider, rx) = Slider::builder(Arc::new(model.clone()))
        .registry(&OptionsRegistry::new())
        .build()
        .expect("slider builds");
    drop(rx);
    model.set_single(12.0);
    assert_eq!(model.get(), ModelValue::Single(12.0));
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(slider.value(), ModelValue::Single(12.0));
}

#[tokio::test(start_paused = true)]
async fn closed_receiver_still_commits_and_redraws_input() {
    let fx = Fixture::single(100.0, "(floor: 0.0, ceil: 200.0)");
    let Fixture { slider, model, rx, .. } = fx;
    drop(rx);
    slider.focus(HandleId::Min).expect("live");
    let r = slider.key(Key::Right).expect("input succeeds");
    assert!(matches!(r, InputResponse::Moved { .. }));
    assert_eq!(model.get(), ModelValue::Single(101.0));
    assert!(slider.is_render_pending());
    assert!(slider.pointer_down(HandleId::Min, 505.0).is_ok());
    assert!(slider.pointer_move(600.0).is_ok());
    assert_eq!(slider.pointer_up().expect("live"), Some(HandleId::Min));
}

#[tokio::test(start_paused = true)]
async fn dropped_sliders_release_their_subscriptions() {
    let model = SharedModel::single(10.0);
    let bus = SignalBus::new();
    for _ in 0..5 {
        let (slider, _rx) = Slider::builder(Arc::new(model.clone()))
            .registry(&OptionsRegistry::new())
            .signals(&bus)
            .build()
            .expect("slider builds");
        drop(slider);
    }
    assert_eq!(model.listener_count(), 0);
    assert_eq!(bus.subscriber_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn dropped_slider_cancels_pending_render() {
    let mut fx = Fixture::single(10.0, STEP_TEN);
    fx.drain();
    fx.model.set_single(20.0);
    fx.model.set_single(30.0);
    assert!(fx.slider.is_render_pending());
    let Fixture { slider, model, mut rx, .. } = fx;
    drop(slider);
    assert_eq!(model.listener_count(), 0);
    tokio::time::sleep(Duration::from_millis(1000)).await;
    let mut frames = 0;
    while let Ok(msg) = rx.try_recv() {
        if let SliderMsg::Frame(_) = msg {
            frames += 1;
        }
    }
    assert_eq!(frames, 1);
}

#[tokio::test(start_paused = true)]
async fn disabling_mid_drag_ends_the_press() {
    let mut fx = Fixture::single(0.0, "(floor: 0.0, ceil: 100.0)");
    fx.slider.pointer_down(HandleId::Min, 0.0).expect("live");
    fx.drain();
    fx.slider
        .set_options(RawOptions {
            disabled: Some(true),
            ..RawOptions::default()
        })
        .expect("valid options");
    fx.slider.pointer_move(500.0).expect("live");
    assert_eq!(fx.model.get(), ModelValue::Single(0.0));
    assert_eq!(fx.slider.pointer_up().expect("live"), None);
    let ended = fx.drain().into_iter().any(|m| {
        matches!(
            m,
            SliderMsg::Interaction {
                kind: InteractionKind::End,
                handle: HandleId::Min,
                ..
            }
        )
    });
    assert!(ended);
}
