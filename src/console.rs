//! # 控制台命令层
//!
//! ## 设计思路
//!
//! 命令层仅做文本参数解析与结果输出，不承载业务逻辑。
//! 每行一个命令，所有实际处理交由 `AppState`，结果序列化为一行 JSON。
//!
//! ```text
//! rgb R G B                          设置三个通道
//! channel r|g|b VALUE                设置单个通道
//! hex TEXT                           十六进制框输入（预过滤）
//! hex! TEXT                          十六进制框回车
//! picker #rrggbb                     原生取色器
//! copy                               复制当前颜色
//! load PATH                          加载图片
//! move X Y LEFT TOP WIDTH HEIGHT     指针移动
//! leave                              指针离开
//! click X Y LEFT TOP WIDTH HEIGHT    点击复制
//! render X Y OUT.png                 渲染放大镜到文件
//! background                         放大镜背景 Data URL
//! state                              当前状态
//! quit                               退出
//! ```

use serde_json::{json, Value};

use crate::app::AppState;
use crate::color::Channel;
use crate::error::AppError;
use crate::image_loader::ImageSource;
use crate::sampler::{DisplayRect, PointerSample};

/// 解析后的控制台命令。
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Rgb(String, String, String),
    Channel(Channel, String),
    HexInput(String),
    HexSubmit(String),
    Picker(String),
    Copy,
    Load(String),
    Move(f64, f64, DisplayRect),
    Leave,
    Click(f64, f64, DisplayRect),
    Render(PointerSample, String),
    Background,
    State,
    Quit,
}

/// 分发结果。
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Output(Value),
    Quit,
}

fn parse_f64(token: &str, name: &str) -> Result<f64, AppError> {
    token
        .parse::<f64>()
        .map_err(|_| AppError::Command(format!("{} 不是数字: {}", name, token)))
}

fn parse_i64(token: &str, name: &str) -> Result<i64, AppError> {
    token
        .parse::<i64>()
        .map_err(|_| AppError::Command(format!("{} 不是整数: {}", name, token)))
}

fn expect_args<'a>(args: &'a [&'a str], count: usize, usage: &str) -> Result<&'a [&'a str], AppError> {
    if args.len() != count {
        return Err(AppError::Command(format!("用法: {}", usage)));
    }
    Ok(args)
}

fn parse_pointer(args: &[&str], usage: &str) -> Result<(f64, f64, DisplayRect), AppError> {
    let args = expect_args(args, 6, usage)?;
    let x = parse_f64(args[0], "X")?;
    let y = parse_f64(args[1], "Y")?;
    let rect = DisplayRect::new(
        parse_f64(args[2], "LEFT")?,
        parse_f64(args[3], "TOP")?,
        parse_f64(args[4], "WIDTH")?,
        parse_f64(args[5], "HEIGHT")?,
    );
    Ok((x, y, rect))
}

impl Command {
    /// 解析一行输入；空行返回 `Ok(None)`。
    pub fn parse(line: &str) -> Result<Option<Self>, AppError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match name.to_lowercase().as_str() {
            "rgb" => {
                let args = expect_args(&args, 3, "rgb R G B")?;
                Self::Rgb(args[0].to_string(), args[1].to_string(), args[2].to_string())
            }
            "channel" => {
                if args.is_empty() || args.len() > 2 {
                    return Err(AppError::Command("用法: channel r|g|b VALUE".to_string()));
                }
                let channel = Channel::parse(args[0])
                    .ok_or_else(|| AppError::Command(format!("未知通道: {}", args[0])))?;
                Self::Channel(channel, args.get(1).copied().unwrap_or("").to_string())
            }
            // 十六进制文本保留原样（含空白），交给预过滤判断
            "hex" => Self::HexInput(rest.to_string()),
            "hex!" => Self::HexSubmit(rest.to_string()),
            "picker" => Self::Picker(expect_args(&args, 1, "picker #rrggbb")?[0].to_string()),
            "copy" => Self::Copy,
            "load" => {
                if rest.is_empty() {
                    return Err(AppError::Command("用法: load PATH".to_string()));
                }
                Self::Load(rest.to_string())
            }
            "move" => {
                let (x, y, rect) = parse_pointer(&args, "move X Y LEFT TOP WIDTH HEIGHT")?;
                Self::Move(x, y, rect)
            }
            "leave" => Self::Leave,
            "click" => {
                let (x, y, rect) = parse_pointer(&args, "click X Y LEFT TOP WIDTH HEIGHT")?;
                Self::Click(x, y, rect)
            }
            "render" => {
                let args = expect_args(&args, 3, "render X Y OUT.png")?;
                let coord = PointerSample::new(parse_i64(args[0], "X")?, parse_i64(args[1], "Y")?);
                Self::Render(coord, args[2].to_string())
            }
            "background" => Self::Background,
            "state" => Self::State,
            "quit" | "exit" => Self::Quit,
            other => return Err(AppError::Command(format!("未知命令: {}", other))),
        };

        Ok(Some(command))
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, AppError> {
    serde_json::to_value(value).map_err(|e| AppError::Command(format!("序列化输出失败: {}", e)))
}

/// 忽略的输入统一输出为 `{"ignored": true, "mode": ...}`。
fn ignored(state: &AppState) -> Value {
    json!({ "ignored": true, "mode": state.mode().name() })
}

/// 执行命令。
pub fn dispatch(state: &mut AppState, command: Command) -> Result<Outcome, AppError> {
    let value = match command {
        Command::Rgb(r, g, b) => match state.set_channels(r.as_str(), g.as_str(), b.as_str()) {
            Some(view) => to_value(&view)?,
            None => ignored(state),
        },
        Command::Channel(channel, raw) => match state.set_channel(channel, &raw) {
            Some(view) => to_value(&view)?,
            None => ignored(state),
        },
        Command::HexInput(raw) => match state.hex_input(&raw) {
            Some(view) => to_value(&view)?,
            None => ignored(state),
        },
        Command::HexSubmit(raw) => match state.hex_submit(&raw)? {
            Some(view) => to_value(&view)?,
            None => ignored(state),
        },
        Command::Picker(raw) => match state.picker_input(&raw)? {
            Some(view) => to_value(&view)?,
            None => ignored(state),
        },
        Command::Copy => to_value(&state.copy_current_hex())?,
        Command::Load(path) => to_value(&state.load_image(ImageSource::FilePath(path))?)?,
        Command::Move(x, y, rect) => match state.pointer_move(x, y, &rect) {
            Some(view) => to_value(&view)?,
            None => ignored(state),
        },
        Command::Leave => json!({ "magnifier_hidden": state.pointer_leave() }),
        Command::Click(x, y, rect) => match state.pointer_click(x, y, &rect) {
            Some(ack) => to_value(&ack)?,
            None => ignored(state),
        },
        Command::Render(coord, out) => {
            let image = state.render_magnifier_at(coord)?;
            image
                .save(&out)
                .map_err(|e| AppError::Image(crate::image_loader::ImageError::Encode(e.to_string())))?;
            log::info!("放大镜图像已写入 {}", out);
            json!({ "written": out, "width": image.width(), "height": image.height() })
        }
        Command::Background => json!({ "background_image": state.magnifier_background()? }),
        Command::State => json!({
            "mode": state.mode().name(),
            "selector": to_value(&state.selector_view())?,
        }),
        Command::Quit => return Ok(Outcome::Quit),
    };

    Ok(Outcome::Output(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_color_commands() {
        assert_eq!(
            Command::parse("rgb 1 2 3").expect("parse"),
            Some(Command::Rgb("1".into(), "2".into(), "3".into()))
        );
        assert_eq!(
            Command::parse("channel G 200").expect("parse"),
            Some(Command::Channel(Channel::Green, "200".into()))
        );
        assert_eq!(
            Command::parse("channel b").expect("parse"),
            Some(Command::Channel(Channel::Blue, String::new()))
        );
        assert_eq!(
            Command::parse("hex  #abc").expect("parse"),
            Some(Command::HexInput("#abc".into()))
        );
        assert_eq!(
            Command::parse("hex! #ABCDEF").expect("parse"),
            Some(Command::HexSubmit("#ABCDEF".into()))
        );
    }

    #[test]
    fn parses_pointer_commands() {
        assert_eq!(
            Command::parse("move 50 25 0 0 100 50").expect("parse"),
            Some(Command::Move(50.0, 25.0, DisplayRect::sized(100.0, 50.0)))
        );
        assert_eq!(
            Command::parse("render 3 4 out.png").expect("parse"),
            Some(Command::Render(PointerSample::new(3, 4), "out.png".into()))
        );
    }

    #[test]
    fn blank_line_is_noop() {
        assert_eq!(Command::parse("   ").expect("parse"), None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(Command::parse("rgb 1 2"), Err(AppError::Command(_))));
        assert!(matches!(Command::parse("move a 1 2 3 4 5"), Err(AppError::Command(_))));
        assert!(matches!(Command::parse("channel x 1"), Err(AppError::Command(_))));
        assert!(matches!(Command::parse("teleport"), Err(AppError::Command(_))));
        assert!(matches!(Command::parse("load"), Err(AppError::Command(_))));
    }

    use crate::clipboard::testing::RecordingSink;
    use crate::clipboard::{ClipboardConfig, ClipboardWriter};
    use crate::settings::Settings;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("color-loupe-console-{}-{}", std::process::id(), name))
    }

    /// 4x2：左半红、右半蓝。
    fn write_sample_png(name: &str) -> PathBuf {
        let path = temp_path(name);
        RgbaImage::from_fn(4, 2, |x, _| {
            if x < 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        })
        .save_with_format(&path, ImageFormat::Png)
        .expect("write sample png");
        path
    }

    fn recording_state() -> (AppState, std::rc::Rc<std::cell::RefCell<Vec<String>>>) {
        let (primary, written) = RecordingSink::new("primary", false);
        let (fallback, _) = RecordingSink::new("fallback", false);
        let writer = ClipboardWriter::with_sinks(
            Box::new(primary),
            Box::new(fallback),
            ClipboardConfig::default(),
        );
        let state = AppState::with_clipboard(Settings::default(), writer).expect("default settings");
        (state, written)
    }

    fn run(state: &mut AppState, line: &str) -> Value {
        let command = Command::parse(line).expect("parse").expect("non-empty");
        match dispatch(state, command).expect("dispatch") {
            Outcome::Output(value) => value,
            Outcome::Quit => panic!("unexpected quit for {:?}", line),
        }
    }

    #[test]
    fn dispatch_walks_both_modes() {
        let (mut state, _) = recording_state();
        let png = write_sample_png("walk.png");

        let value = run(&mut state, "rgb 1 2 3");
        assert_eq!(value["hex"], "#010203");
        assert_eq!(value["rgb_text"], "1, 2, 3");

        let value = run(&mut state, &format!("load {}", png.display()));
        assert_eq!(value, json!({ "width": 4, "height": 2, "mode": "image_inspect" }));

        let value = run(&mut state, "move 3 1 0 0 4 2");
        assert_eq!(value["reading"]["hex"], "#0000FF");
        assert_eq!(value["magnifier_visible"], true);
        assert_eq!(value["selector"]["hex"], "#0000FF");

        let value = run(&mut state, "rgb 9 9 9");
        assert_eq!(value, json!({ "ignored": true, "mode": "image_inspect" }));

        assert_eq!(run(&mut state, "leave"), json!({ "magnifier_hidden": true }));
        assert_eq!(run(&mut state, "leave"), json!({ "magnifier_hidden": false }));

        let value = run(&mut state, "state");
        assert_eq!(value["mode"], "image_inspect");
        assert_eq!(value["selector"]["hex"], "#0000FF");

        let _ = std::fs::remove_file(&png);
    }

    #[test]
    fn pointer_commands_are_ignored_before_load() {
        let (mut state, written) = recording_state();

        assert_eq!(
            run(&mut state, "move 1 1 0 0 4 2"),
            json!({ "ignored": true, "mode": "color_select" })
        );
        assert_eq!(
            run(&mut state, "click 1 1 0 0 4 2"),
            json!({ "ignored": true, "mode": "color_select" })
        );
        assert_eq!(run(&mut state, "leave"), json!({ "magnifier_hidden": false }));
        assert!(written.borrow().is_empty());

        let command = Command::parse("background").expect("parse").expect("non-empty");
        assert!(matches!(dispatch(&mut state, command), Err(AppError::Mode(_))));
    }

    #[test]
    fn click_and_copy_report_ack() {
        let (mut state, written) = recording_state();
        let png = write_sample_png("click.png");
        run(&mut state, &format!("load {}", png.display()));

        let value = run(&mut state, "click 0.5 0.5 0 0 4 2");
        assert_eq!(value["text"], "#FF0000");
        assert_eq!(value["path"], "native");
        assert_eq!(value["message"], "已复制 #FF0000");
        assert_eq!(*written.borrow(), vec!["#FF0000".to_string()]);

        let _ = std::fs::remove_file(&png);
    }

    #[test]
    fn render_writes_png_and_background_is_data_url() {
        let (mut state, _) = recording_state();
        let png = write_sample_png("render-src.png");
        let out = temp_path("render-out.png");
        run(&mut state, &format!("load {}", png.display()));

        let value = run(&mut state, &format!("render 1 1 {}", out.display()));
        assert_eq!(value["width"], 150);
        assert_eq!(value["height"], 150);
        let rendered = image::open(&out).expect("rendered file decodes");
        assert_eq!((rendered.width(), rendered.height()), (150, 150));

        let value = run(&mut state, "background");
        let url = value["background_image"].as_str().expect("string");
        assert!(url.starts_with("data:image/png;base64,"));

        let _ = std::fs::remove_file(&png);
        let _ = std::fs::remove_file(&out);
    }

    #[test]
    fn render_to_unknown_extension_is_encode_error() {
        let (mut state, _) = recording_state();
        let png = write_sample_png("render-bad.png");
        run(&mut state, &format!("load {}", png.display()));

        let out = temp_path("render-out.notanimage");
        let command = Command::parse(&format!("render 0 0 {}", out.display()))
            .expect("parse")
            .expect("non-empty");
        let result = dispatch(&mut state, command);
        assert!(matches!(
            result,
            Err(AppError::Image(crate::image_loader::ImageError::Encode(_)))
        ));

        let _ = std::fs::remove_file(&png);
    }

    #[test]
    fn quit_command_ends_session() {
        let (mut state, _) = recording_state();
        let command = Command::parse("quit").expect("parse").expect("non-empty");
        assert_eq!(dispatch(&mut state, command).expect("dispatch"), Outcome::Quit);
    }

    #[test]
    fn quit_aliases() {
        assert_eq!(Command::parse("quit").expect("parse"), Some(Command::Quit));
        assert_eq!(Command::parse("EXIT").expect("parse"), Some(Command::Quit));
    }
}
