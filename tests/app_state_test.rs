// App state: mode transitions, selector inputs and click-to-copy
use std::cell::RefCell;
use std::io::Cursor;
use std::rc::Rc;

use color_loupe::app::{AppMode, AppState};
use color_loupe::clipboard::{
    ClipboardConfig, ClipboardSink, ClipboardWriteFailure, ClipboardWriter, CopyPath,
};
use color_loupe::color::{Channel, Color};
use color_loupe::error::AppError;
use color_loupe::image_loader::ImageSource;
use color_loupe::sampler::DisplayRect;
use color_loupe::settings::Settings;
use image::{ImageFormat, Rgba, RgbaImage};

type Log = Rc<RefCell<Vec<String>>>;

struct MemorySink {
    written: Log,
    fail: bool,
}

impl ClipboardSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardWriteFailure> {
        if self.fail {
            return Err(ClipboardWriteFailure::busy("occupied"));
        }
        self.written.borrow_mut().push(text.to_string());
        Ok(())
    }
}

fn state_with_sinks(primary_fails: bool) -> (AppState, Log, Log) {
    let primary: Log = Rc::default();
    let fallback: Log = Rc::default();
    let writer = ClipboardWriter::with_sinks(
        Box::new(MemorySink {
            written: primary.clone(),
            fail: primary_fails,
        }),
        Box::new(MemorySink {
            written: fallback.clone(),
            fail: false,
        }),
        ClipboardConfig::default(),
    );
    let state = AppState::with_clipboard(Settings::default(), writer).expect("default settings");
    (state, primary, fallback)
}

/// 4x2：第一行 红 绿 蓝 白，第二行全灰。
fn small_png() -> ImageSource {
    let colors = [
        Rgba([255, 0, 0, 255]),
        Rgba([0, 255, 0, 255]),
        Rgba([0, 0, 255, 255]),
        Rgba([255, 255, 255, 255]),
    ];
    let image = RgbaImage::from_fn(4, 2, |x, y| {
        if y == 0 {
            colors[x as usize]
        } else {
            Rgba([128, 128, 128, 255])
        }
    });
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png");
    ImageSource::Bytes(bytes)
}

#[test]
fn starts_in_color_select_with_initial_color() {
    let (state, _, _) = state_with_sinks(false);
    assert!(matches!(state.mode(), AppMode::ColorSelect));
    assert_eq!(state.color(), Color::BLACK);
    assert_eq!(state.selector_view().hex, "#000000");
}

#[test]
fn channel_inputs_replace_color_and_refresh_fields() {
    let (mut state, _, _) = state_with_sinks(false);

    let view = state.set_channels("255", 0, "128").expect("color select accepts channels");
    assert_eq!(view.hex, "#FF0080");
    assert_eq!(view.rgb_text, "255, 0, 128");
    assert_eq!(view.hex_field.as_deref(), Some("#FF0080"));
    assert_eq!(view.picker_field.as_deref(), Some("#FF0080"));

    let view = state.set_channel(Channel::Green, "").expect("empty channel");
    assert_eq!(view.color, Color::new(255, 0, 128));

    let view = state.set_channel(Channel::Blue, "999").expect("clamped channel");
    assert_eq!(view.color, Color::new(255, 0, 255));
}

#[test]
fn hex_field_waits_for_a_complete_value() {
    let (mut state, _, _) = state_with_sinks(false);

    assert!(state.hex_input("#12").is_none());
    assert!(state.hex_input("#12345").is_none());
    assert_eq!(state.color(), Color::BLACK);

    let view = state.hex_input("#12abEF").expect("complete hex applies");
    assert_eq!(state.color(), Color::new(0x12, 0xAB, 0xEF));
    assert_eq!(view.hex_field, None);
    assert_eq!(view.picker_field.as_deref(), Some("#12ABEF"));
}

#[test]
fn failed_hex_submit_keeps_previous_color() {
    let (mut state, _, _) = state_with_sinks(false);
    state.set_channels(1, 2, 3);

    let result = state.hex_submit("#XYZ");
    assert!(matches!(result, Err(AppError::Color(_))));
    assert_eq!(state.color(), Color::new(1, 2, 3));

    let view = state.hex_submit("#abc").expect("short hex").expect("color select");
    assert_eq!(view.color, Color::new(0xAA, 0xBB, 0xCC));
}

#[test]
fn picker_input_leaves_picker_field_alone() {
    let (mut state, _, _) = state_with_sinks(false);
    let view = state.picker_input("#00ff00").expect("valid").expect("color select");
    assert_eq!(view.picker_field, None);
    assert_eq!(view.hex_field.as_deref(), Some("#00FF00"));
}

#[test]
fn pointer_events_are_ignored_before_an_image_loads() {
    let (mut state, primary, _) = state_with_sinks(false);
    let rect = DisplayRect::sized(4.0, 2.0);

    assert!(state.pointer_move(1.0, 1.0, &rect).is_none());
    assert!(state.pointer_click(1.0, 1.0, &rect).is_none());
    assert!(!state.pointer_leave());
    assert!(matches!(state.magnifier_background(), Err(AppError::Mode(_))));
    assert!(primary.borrow().is_empty());
}

#[test]
fn loading_an_image_switches_mode_and_locks_selector() {
    let (mut state, _, _) = state_with_sinks(false);
    state.set_channels(10, 20, 30);

    let summary = state.load_image(small_png()).expect("load png");
    assert_eq!((summary.width, summary.height), (4, 2));
    assert!(state.is_inspecting());

    assert!(state.set_channels(0, 0, 0).is_none());
    assert!(state.hex_input("#FFFFFF").is_none());
    assert!(state.hex_submit("#FFFFFF").expect("ignored").is_none());
    assert!(state.picker_input("#FFFFFF").expect("ignored").is_none());
    assert_eq!(state.color(), Color::new(10, 20, 30));
}

#[test]
fn failed_load_keeps_color_select() {
    let (mut state, _, _) = state_with_sinks(false);
    let result = state.load_image(ImageSource::Bytes(b"plain text".to_vec()));
    assert!(matches!(result, Err(AppError::Image(_))));
    assert!(!state.is_inspecting());
}

#[test]
fn pointer_move_samples_and_syncs_selector() {
    let (mut state, _, _) = state_with_sinks(false);
    state.load_image(small_png()).expect("load png");

    // 显示为 8x4，缩放 2 倍
    let rect = DisplayRect::new(100.0, 50.0, 8.0, 4.0);
    let view = state.pointer_move(103.0, 51.0, &rect).expect("inspecting");

    assert_eq!((view.reading.x, view.reading.y), (1, 0));
    assert_eq!(view.reading.hex, "#00FF00");
    assert!(view.magnifier_visible);
    assert_eq!(view.selector.hex, "#00FF00");
    assert_eq!(state.color(), Color::new(0, 255, 0));

    assert!(state.pointer_leave());
    assert!(!state.pointer_leave());
}

#[test]
fn click_copies_sampled_pixel() {
    let (mut state, primary, fallback) = state_with_sinks(false);
    state.load_image(small_png()).expect("load png");

    let ack = state
        .pointer_click(2.5, 0.5, &DisplayRect::sized(4.0, 2.0))
        .expect("inspecting");
    assert_eq!(ack.text, "#0000FF");
    assert_eq!(ack.path, CopyPath::Native);
    assert_eq!(ack.message, "已复制 #0000FF");
    assert_eq!(primary.borrow().as_slice(), ["#0000FF"]);
    assert!(fallback.borrow().is_empty());
}

#[test]
fn click_outside_image_copies_black() {
    let (mut state, primary, _) = state_with_sinks(false);
    state.load_image(small_png()).expect("load png");

    let ack = state
        .pointer_click(-3.0, 0.5, &DisplayRect::sized(4.0, 2.0))
        .expect("inspecting");
    assert_eq!(ack.text, "#000000");
    assert_eq!(primary.borrow().as_slice(), ["#000000"]);
}

#[test]
fn busy_clipboard_falls_back_once() {
    let (mut state, primary, fallback) = state_with_sinks(true);
    state.set_channels(255, 255, 0);

    let ack = state.copy_current_hex();
    assert_eq!(ack.path, CopyPath::Fallback);
    assert_eq!(ack.message, "已复制 #FFFF00");
    assert!(primary.borrow().is_empty());
    assert_eq!(fallback.borrow().as_slice(), ["#FFFF00"]);
}

#[test]
fn magnifier_background_is_cached_per_session() {
    let (mut state, _, _) = state_with_sinks(false);
    state.load_image(small_png()).expect("load png");

    let first = state.magnifier_background().expect("encode");
    assert!(first.starts_with("data:image/png;base64,"));
    assert_eq!(state.magnifier_background().expect("cached"), first);
}
