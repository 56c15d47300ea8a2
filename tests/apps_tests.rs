//! Integration tests for the device apps

mod common;
use common::*;

use trinkey_touch::apps::{
    Blinker, ClipboardHelper, Feedback, Flashlight, Gesture, GestureHandler, MediaKey, Mode,
    Modifier, SerialControl, Shortcut, TouchPad, TouchPads, VolumeControl,
};
use trinkey_touch::color::{BLACK, BLUE, GREEN, RED, WHITE};
use trinkey_touch::{ClickConfig, Milliseconds, Scheduler, TaskSlot, Timestamp};

type Volume = VolumeControl<MockMedia, MockBus, Timestamp>;
type Clipboard = ClipboardHelper<MockKeyboard, MockBus, Timestamp>;

fn feedback(bus: MockBus) -> Feedback<MockBus, Timestamp> {
    Feedback::new(bus, Blinker::default())
}

fn pads(one: &MockTouch, two: &MockTouch) -> TouchPads<MockTouch, MockTouch, Timestamp> {
    TouchPads::new(one.clone(), two.clone(), ClickConfig::default(), Timestamp(0))
}

/// A touch held from `from` until `to`, in milliseconds.
struct Press {
    pad: MockTouch,
    from: u32,
    to: u32,
}

fn tap(pad: &MockTouch, at: u32) -> Press {
    Press {
        pad: pad.clone(),
        from: at,
        to: at + 50,
    }
}

/// Ticks `scheduler` once per millisecond over `0..end`, driving the presses.
fn simulate<C, const N: usize>(
    scheduler: &mut Scheduler<'_, C, Timestamp, N>,
    ctx: &mut C,
    presses: &[Press],
    end: u32,
) {
    for t in 0..end {
        for press in presses {
            if t == press.from {
                press.pad.set(true);
            }
            if t == press.to {
                press.pad.set(false);
            }
        }
        scheduler.tick(ctx, Timestamp(t));
    }
}

fn gesture(pad: TouchPad, num_clicks: u32) -> Gesture {
    Gesture { pad, num_clicks }
}

// ============================================================================
// Volume
// ============================================================================

fn run_volume(app: &mut Volume, one: &MockTouch, two: &MockTouch, presses: &[Press], end: u32) {
    let mut pads = pads(one, two);
    let mut blink = |app: &mut Volume, now: Timestamp| app.feedback_mut().tick(now);
    let mut scheduler: Scheduler<'_, Volume, Timestamp, 2> = Scheduler::new(
        Timestamp(0),
        [
            TaskSlot::every(Milliseconds(10), &mut pads),
            TaskSlot::every(Milliseconds(10), &mut blink),
        ],
    );

    simulate(&mut scheduler, app, presses, end);
}

#[test]
fn volume_click_sends_key_and_blinks() {
    let one = MockTouch::new();
    let two = MockTouch::new();
    let mut app: Volume = VolumeControl::new(MockMedia::default(), feedback(MockBus::new()));

    run_volume(&mut app, &one, &two, &[tap(&one, 100)], 1000);

    assert_eq!(app.media().sent, vec![MediaKey::VolumeUp]);

    // Blank at startup, red flash, blank again once the blink expires.
    let frames = app.feedback().bus().frames();
    assert_eq!(frames.len(), 3);
    assert!(frame_is_dark(&frames[0]));
    assert!(frames[1].iter().all(|p| p.r > 0 && p.g == 0 && p.b == 0));
    assert!(frame_is_dark(&frames[2]));
    assert!(!app.feedback().is_flashing());
}

#[test]
fn volume_double_click_on_second_pad_mutes() {
    let one = MockTouch::new();
    let two = MockTouch::new();
    let mut app: Volume = VolumeControl::new(MockMedia::default(), feedback(MockBus::new()));

    run_volume(&mut app, &one, &two, &[tap(&two, 100), tap(&two, 200)], 1000);

    assert_eq!(app.media().sent, vec![MediaKey::Mute]);
}

#[test]
fn volume_long_press_does_nothing() {
    let one = MockTouch::new();
    let two = MockTouch::new();
    let mut app: Volume = VolumeControl::new(MockMedia::default(), feedback(MockBus::new()));

    let hold = Press {
        pad: one.clone(),
        from: 100,
        to: 700,
    };
    run_volume(&mut app, &one, &two, &[hold], 1500);

    assert!(app.media().sent.is_empty());
    assert_eq!(app.feedback().bus().frames().len(), 1);
}

#[test]
fn volume_ignores_triple_click() {
    let mut app: Volume = VolumeControl::new(MockMedia::default(), feedback(MockBus::new()));

    app.on_gesture(gesture(TouchPad::One, 3), Timestamp(0));

    assert!(app.media().sent.is_empty());
    assert!(!app.feedback().is_flashing());
}

#[test]
fn volume_gesture_map() {
    let mut app: Volume = VolumeControl::new(MockMedia::default(), feedback(MockBus::new()));

    app.on_gesture(gesture(TouchPad::One, 1), Timestamp(0));
    app.on_gesture(gesture(TouchPad::One, 2), Timestamp(100));
    app.on_gesture(gesture(TouchPad::Two, 1), Timestamp(200));
    app.on_gesture(gesture(TouchPad::Two, 2), Timestamp(300));

    assert_eq!(
        app.media().sent,
        vec![
            MediaKey::VolumeUp,
            MediaKey::PlayPause,
            MediaKey::VolumeDown,
            MediaKey::Mute,
        ]
    );
    assert_eq!(app.feedback().bank().color(0), Some(BLUE));
}

// ============================================================================
// Clipboard
// ============================================================================

#[test]
fn clipboard_modifier_toggle_applies_to_later_shortcuts() {
    let one = MockTouch::new();
    let two = MockTouch::new();
    let mut pads = pads(&one, &two);
    let mut app: Clipboard = ClipboardHelper::new(MockKeyboard::default(), feedback(MockBus::new()));
    assert_eq!(app.modifier(), Modifier::Command);

    let mut blink = |app: &mut Clipboard, now: Timestamp| app.feedback_mut().tick(now);
    let mut scheduler: Scheduler<'_, Clipboard, Timestamp, 2> = Scheduler::new(
        Timestamp(0),
        [
            TaskSlot::every(Milliseconds(10), &mut pads),
            TaskSlot::every(Milliseconds(10), &mut blink),
        ],
    );

    let presses = [tap(&two, 100), tap(&two, 200), tap(&one, 800)];
    simulate(&mut scheduler, &mut app, &presses, 1500);

    assert_eq!(app.modifier(), Modifier::Control);
    assert_eq!(app.keyboard().sent, vec![(Modifier::Control, Shortcut::Copy)]);
}

#[test]
fn clipboard_gesture_map() {
    let mut app: Clipboard = ClipboardHelper::new(MockKeyboard::default(), feedback(MockBus::new()));

    app.on_gesture(gesture(TouchPad::One, 2), Timestamp(0));
    assert_eq!(app.feedback().bank().color(0), Some(RED));

    app.on_gesture(gesture(TouchPad::Two, 1), Timestamp(100));
    assert_eq!(app.feedback().bank().color(0), Some(GREEN));

    app.on_gesture(gesture(TouchPad::Two, 2), Timestamp(200));
    app.on_gesture(gesture(TouchPad::Two, 2), Timestamp(300));
    assert_eq!(app.modifier(), Modifier::Command);

    assert_eq!(
        app.keyboard().sent,
        vec![
            (Modifier::Command, Shortcut::Cut),
            (Modifier::Command, Shortcut::Paste),
        ]
    );
}

#[test]
fn failing_bus_is_absorbed() {
    let mut app: Clipboard =
        ClipboardHelper::new(MockKeyboard::default(), feedback(MockBus::failing()));

    app.on_gesture(gesture(TouchPad::One, 1), Timestamp(0));
    app.feedback_mut().tick(Timestamp(60));

    assert_eq!(app.keyboard().sent.len(), 1);
    assert!(app.feedback().bus().frames().is_empty());
    assert_eq!(app.feedback().bank().color(0), Some(BLACK));
}

// ============================================================================
// Flashlight
// ============================================================================

#[test]
fn flashlight_cycles_intensity() {
    let mut app = Flashlight::new(MockBus::new());
    let mut seen = vec![app.intensity()];

    for t in 0..4 {
        app.on_gesture(gesture(TouchPad::One, 1), Timestamp(t));
        seen.push(app.intensity());
    }

    assert_eq!(seen, vec![1.0, 0.66, 0.33, 0.0, 1.0]);
}

#[test]
fn flashlight_mode_ignored_while_off() {
    let mut app = Flashlight::new(MockBus::new());

    app.on_gesture(gesture(TouchPad::Two, 1), Timestamp(0));
    assert_eq!(app.mode(), Mode::Solid(1));

    for _ in 0..3 {
        app.on_gesture(gesture(TouchPad::One, 1), Timestamp(0));
    }
    assert_eq!(app.intensity(), 0.0);

    app.on_gesture(gesture(TouchPad::Two, 1), Timestamp(0));
    assert_eq!(app.mode(), Mode::Solid(1));
}

#[test]
fn flashlight_renders_only_active_mode() {
    let mut app = Flashlight::new(MockBus::new());

    app.render_rainbow();
    assert!(app.bus().frames().is_empty());

    app.render_solid();
    assert_eq!(app.bank().colors(), &[WHITE; 4]);
    assert_eq!(app.bus().frames().len(), 1);

    app.on_gesture(gesture(TouchPad::Two, 1), Timestamp(0));
    app.render_solid();
    assert_eq!(app.bank().colors(), &[RED; 4]);

    for _ in 0..6 {
        app.on_gesture(gesture(TouchPad::Two, 1), Timestamp(0));
    }
    assert_eq!(app.mode(), Mode::Rainbow);

    app.render_solid();
    assert_eq!(app.bus().frames().len(), 2);

    app.render_rainbow();
    let first = *app.bank().colors();
    app.render_rainbow();
    assert_ne!(app.bank().colors(), &first);
    assert_eq!(app.bus().frames().len(), 4);
}

#[test]
fn flashlight_polls_pads_every_tick() {
    let one = MockTouch::new();
    let two = MockTouch::new();
    let mut pads = pads(&one, &two);
    let mut app = Flashlight::new(MockBus::new());

    let mut solid = |app: &mut Flashlight<MockBus>, _now: Timestamp| app.render_solid();
    let mut rainbow = |app: &mut Flashlight<MockBus>, _now: Timestamp| app.render_rainbow();
    let mut scheduler = Scheduler::new(
        Timestamp(0),
        Flashlight::<MockBus>::tasks(&mut pads, &mut solid, &mut rainbow),
    );

    // A 5 ms touch fits between two 10 ms polls; only ungated polling sees it.
    let brief = Press {
        pad: one.clone(),
        from: 3,
        to: 8,
    };
    simulate(&mut scheduler, &mut app, &[brief], 600);

    assert_eq!(app.intensity(), 0.66);
    assert_eq!(app.bank().colors(), &[WHITE; 4]);
    assert!(!app.bus().frames().is_empty());
}

#[test]
fn flashlight_rainbow_spreads_across_pixels() {
    let mut app = Flashlight::new(MockBus::new());
    for _ in 0..7 {
        app.on_gesture(gesture(TouchPad::Two, 1), Timestamp(0));
    }
    assert_eq!(app.mode(), Mode::Rainbow);

    app.render_rainbow();

    let colors = app.bank().colors();
    assert_eq!(colors[0], RED);
    for i in 1..4 {
        assert_ne!(colors[i], colors[i - 1]);
    }
}

// ============================================================================
// Serial
// ============================================================================

#[test]
fn serial_line_updates_bank() {
    let rx = MockRx::default();
    rx.feed(b"1:r:10,2:g:\r\n");
    let mut app = SerialControl::new(rx, MockBus::new());

    assert_eq!(app.poll(), 2);

    let bank = app.bank();
    assert_eq!(bank.color(0), Some(RED));
    assert_eq!(bank.intensity(0), Some(1.0));
    assert_eq!(bank.color(1), Some(GREEN));
    assert!(intensity_equal(bank.intensity(1).unwrap(), 0.5));
    assert_eq!(bank.color(2), Some(BLACK));

    // Blank at startup, then one frame for the line.
    assert_eq!(app.bus().frames().len(), 2);
    assert!(!frame_is_dark(&app.bus().frames()[1]));
}

#[test]
fn serial_rejected_line_leaves_leds_alone() {
    let rx = MockRx::default();
    rx.feed(b"9:r:\n1:zz:\n");
    let mut app = SerialControl::new(rx, MockBus::new());

    assert_eq!(app.poll(), 0);
    assert_eq!(app.bus().frames().len(), 1);
    assert_eq!(app.bank().colors(), &[BLACK; 4]);
}

#[test]
fn serial_line_split_across_polls() {
    let rx = MockRx::default();
    let mut app = SerialControl::new(rx.clone(), MockBus::new());

    rx.feed(b"4:b");
    assert_eq!(app.poll(), 0);
    assert_eq!(app.bank().color(3), Some(BLACK));

    rx.feed(b":5\r");
    assert_eq!(app.poll(), 1);
    assert_eq!(app.bank().color(3), Some(BLUE));
    assert_eq!(app.bank().intensity(3), Some(0.5));
}

#[test]
fn serial_poll_is_bounded() {
    let rx = MockRx::default();
    let mut app = SerialControl::new(rx.clone(), MockBus::new());

    rx.feed(&[b'1'; 600]);
    app.poll();

    assert!(rx.pending() > 0);
}
