//=========================================================================
// Context Lifecycle Tests
//=========================================================================
//
// Drives a context end to end through the headless host: bind a surface,
// load resources, wait for readiness, tick the frame loop with input.
//
//=========================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use momo::core::graphics::DrawCommand;
use momo::prelude::*;
use momo::DEFAULT_COMMAND_LIMIT;

fn setup() -> (Context, HeadlessHost) {
    let host = HeadlessHost::new().with_surface("screen");
    let mut ctx = Context::new(host.clone()).unwrap();
    ctx.bind_surface("screen", 200, 100).unwrap();
    ctx.install_keyboard();
    (ctx, host)
}

/// Pumps exactly at the next deadline so one tick runs.
fn tick(ctx: &mut Context) {
    let due = ctx.next_deadline().expect("loop running");
    assert!(ctx.pump(due), "tick should run at its deadline");
}

//=== Readiness ===========================================================

#[test_log::test]
fn gate_waits_for_late_resource() {
    let (mut ctx, host) = setup();
    let fired = Rc::new(Cell::new(0));

    let hero = ctx.load_image("hero.png");
    let counter = fired.clone();
    ctx.when_all_ready(move |_| counter.set(counter.get() + 1));

    host.finish_image(hero.id(), 32, 32);
    let music = ctx.load_sound("theme.ogg").unwrap();

    ctx.pump(Instant::now());
    assert_eq!(fired.get(), 0, "Sound loaded before firing holds the gate");
    assert_eq!(ctx.pending_resources(), 1);

    host.finish_sound(music.id());
    ctx.pump(Instant::now());
    assert_eq!(fired.get(), 1);

    ctx.pump(Instant::now());
    assert_eq!(fired.get(), 1, "Continuation runs once");
}

#[test_log::test]
fn buffered_sound_releases_gate() {
    let (mut ctx, host) = setup();
    let fired = Rc::new(Cell::new(false));

    let sfx = ctx.load_sound("jump.wav").unwrap();
    let flag = fired.clone();
    ctx.when_all_ready(move |_| flag.set(true));

    host.buffer_sound(sfx.id());
    ctx.pump(Instant::now());

    assert!(fired.get());
    assert!(sfx.is_ready());
}

#[test_log::test]
fn continuation_starts_frame_loop() {
    let (mut ctx, host) = setup();
    let img = ctx.load_image("bg.png");
    let img_id = img.id();
    ctx.set_frame_rate(60).unwrap();

    ctx.when_all_ready(move |ctx| {
        ctx.start(move |ctx| {
            if let Some(surface) = ctx.surface_mut() {
                surface.draw_image(&img, 0.0, 0.0);
            }
        })
        .unwrap();
    });

    host.finish_image(img_id, 10, 10);
    ctx.pump(Instant::now());
    assert!(ctx.is_running());

    host.clear_commands("screen");
    tick(&mut ctx);

    assert!(matches!(
        host.commands("screen").as_slice(),
        [DrawCommand::DrawImage { x, y, .. }] if *x == 0.0 && *y == 0.0
    ));
}

//=== Frame Loop ==========================================================

#[test_log::test]
fn sixty_fps_ticks_every_sixteen_ms() {
    let (mut ctx, _) = setup();
    ctx.set_frame_rate(60).unwrap();
    ctx.start(|_| {}).unwrap();

    let first = ctx.next_deadline().unwrap();
    ctx.pump(first);
    let second = ctx.next_deadline().unwrap();

    let period = second - first;
    assert!(
        period >= Duration::from_micros(16_666) && period <= Duration::from_micros(16_667),
        "period was {:?}",
        period
    );
}

#[test_log::test]
fn pump_before_deadline_does_not_tick() {
    let (mut ctx, _) = setup();
    ctx.set_frame_rate(10).unwrap();
    ctx.start(|_| {}).unwrap();

    let due = ctx.next_deadline().unwrap();
    assert!(!ctx.pump(due - Duration::from_millis(1)));
    assert_eq!(ctx.tick_count(), 0);
}

#[test_log::test]
fn start_without_rate_fails() {
    let (mut ctx, _) = setup();
    assert!(matches!(ctx.start(|_| {}), Err(MomoError::FrameRateUnset)));
}

//=== Input ===============================================================

#[test_log::test]
fn pressed_true_for_exactly_one_tick() {
    let (mut ctx, _) = setup();
    let log = Rc::new(RefCell::new(Vec::new()));
    ctx.set_frame_rate(30).unwrap();

    let seen = log.clone();
    ctx.start(move |ctx| {
        let input = ctx.input();
        seen.borrow_mut().push((
            input.is_key_pressed(KeyCode::Space),
            input.is_key_down(KeyCode::Space),
        ));
    })
    .unwrap();

    let sender = ctx.event_sender();
    sender.push(InputEvent::KeyDown(KeyCode::Space));
    tick(&mut ctx);

    // Key repeat delivers more downs without an up.
    sender.push(InputEvent::KeyDown(KeyCode::Space));
    tick(&mut ctx);

    sender.push(InputEvent::KeyUp(KeyCode::Space));
    tick(&mut ctx);

    assert_eq!(*log.borrow(), vec![(true, true), (false, true), (false, false)]);
}

#[test_log::test]
fn released_and_wheel_reset_after_tick() {
    let (mut ctx, _) = setup();
    let log = Rc::new(RefCell::new(Vec::new()));
    ctx.set_frame_rate(30).unwrap();

    let seen = log.clone();
    ctx.start(move |ctx| {
        let input = ctx.input();
        seen.borrow_mut().push((input.is_button_released(MouseButton::Left), input.mouse_z()));
    })
    .unwrap();

    let sender = ctx.event_sender();
    sender.push(InputEvent::ButtonDown(MouseButton::Left));
    sender.push(InputEvent::ButtonUp(MouseButton::Left));
    sender.push(InputEvent::Wheel { delta: 40.0 });
    sender.push(InputEvent::Wheel { delta: -80.0 });
    tick(&mut ctx);
    tick(&mut ctx);

    assert_eq!(*log.borrow(), vec![(true, -80.0), (false, 0.0)]);
    assert_eq!(ctx.input().mouse_z(), 0.0);
}

#[test_log::test]
fn pointer_position_persists_across_ticks() {
    let (mut ctx, _) = setup();
    ctx.set_frame_rate(30).unwrap();
    ctx.start(|_| {}).unwrap();

    ctx.event_sender().push(InputEvent::PointerMoved { x: 12.0, y: 34.0 });
    tick(&mut ctx);
    tick(&mut ctx);

    assert_eq!((ctx.input().mouse_x(), ctx.input().mouse_y()), (12.0, 34.0));
}

#[test_log::test]
fn key_events_dropped_after_uninstall() {
    let (mut ctx, _) = setup();
    ctx.uninstall_keyboard();

    ctx.event_sender().push(InputEvent::KeyDown(KeyCode::KeyA));
    ctx.pump(Instant::now());

    assert!(!ctx.input().is_key_down_by_name("a"));
}

//=== Drawing =============================================================

#[test_log::test]
fn polygon_join_controls_closing() {
    let (mut ctx, host) = setup();
    let points = [0.0, 0.0, 10.0, 0.0, 10.0, 10.0];

    let surface = ctx.surface_mut().unwrap();
    surface.draw_polygon(&points, Color::WHITE, 1.0, true);
    assert!(host.commands("screen").contains(&DrawCommand::ClosePath));

    host.clear_commands("screen");
    let surface = ctx.surface_mut().unwrap();
    surface.draw_polygon(&points, Color::WHITE, 1.0, false);
    assert!(!host.commands("screen").contains(&DrawCommand::ClosePath));
}

#[test_log::test]
fn missing_surface_reports_error() {
    let host = HeadlessHost::new();
    let mut ctx = Context::new(host).unwrap();

    assert!(matches!(
        ctx.bind_surface("missing-id", 100, 100),
        Err(MomoError::SurfaceUnavailable { .. })
    ));
    assert!(ctx.surface_mut().is_none());
    assert_eq!(ctx.surface_width(), None);
}

#[test_log::test]
fn text_uses_loaded_font_family() {
    let (mut ctx, host) = setup();
    let font = ctx.load_font("fonts/pixel.ttf");
    host.clear_commands("screen");

    ctx.surface_mut().unwrap().draw_text(
        &font,
        12.0,
        4.0,
        4.0,
        "score",
        Color::WHITE,
        TextAlign::Right,
        Some((Color::BLACK, 1.0)),
    );

    let commands = host.commands("screen");
    assert_eq!(
        commands.first(),
        Some(&DrawCommand::SetFont {
            family: font.family().to_owned(),
            size: 12.0
        })
    );
    assert!(commands.contains(&DrawCommand::StrokeText {
        text: "score".into(),
        x: 4.0,
        y: 16.0
    }));
}

#[test_log::test]
fn command_log_stays_bounded_while_running() {
    let (mut ctx, host) = setup();
    ctx.set_frame_rate(60).unwrap();
    ctx.start(|ctx| {
        if let Some(surface) = ctx.surface_mut() {
            surface.clear(Color::BLACK);
        }
    })
    .unwrap();

    for _ in 0..1000 {
        tick(&mut ctx);
    }

    let commands = host.commands("screen");
    assert_eq!(ctx.tick_count(), 1000);
    assert_eq!(commands.len(), DEFAULT_COMMAND_LIMIT);
    assert_eq!(
        commands.last(),
        Some(&DrawCommand::FillRect(Rect::new(0.0, 0.0, 200.0, 100.0)))
    );
}

//=== Audio ===============================================================

#[test_log::test]
fn unknown_extension_is_rejected() {
    let (mut ctx, _) = setup();
    assert!(matches!(
        ctx.load_sound("x.unknownext"),
        Err(MomoError::UnsupportedAudioFormat { .. })
    ));
}

#[test_log::test]
fn playback_lifecycle() {
    let (mut ctx, host) = setup();
    let sfx = ctx.load_sound("coin.mp3").unwrap();

    assert!(ctx.is_sound_paused(&sfx));

    ctx.play_sound(&sfx, 0.5, 1.0, false);
    assert!(ctx.is_sound_playing(&sfx));

    ctx.play_sound(&sfx, 0.5, 1.0, false);
    assert_eq!(host.sound(sfx.id()).unwrap().reloads, 1, "Replay restarts");

    ctx.stop_sound(&sfx);
    let state = host.sound(sfx.id()).unwrap();
    assert!(state.paused);
    assert_eq!(state.rewinds, 1);

    ctx.resume_sound(&sfx);
    assert!(ctx.is_sound_playing(&sfx));
    ctx.pause_sound(&sfx);
    assert!(ctx.is_sound_paused(&sfx));
}

//=== Misc ================================================================

#[test_log::test]
fn request_exit_is_observable() {
    let (mut ctx, _) = setup();
    assert!(!ctx.exit_requested());
    ctx.request_exit();
    assert!(ctx.exit_requested());
    assert!(ctx.elapsed_secs() >= 0.0);
}
