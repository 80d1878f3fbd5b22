//! # 颜色放大镜：应用入口
//!
//! 本文件仅负责日志、设置与状态的初始化，然后逐行读取标准输入的命令。
//! 每条命令输出一行 JSON，错误输出为 `{"error": "...", "code": "..."}`。

use std::io::{self, BufRead, Write};

use color_loupe::app::AppState;
use color_loupe::console::{dispatch, Command, Outcome};
use color_loupe::error::AppError;
use color_loupe::settings::{settings_path_from_env, Settings};
use serde_json::json;

fn run_line(state: &mut AppState, line: &str) -> Result<Option<Outcome>, AppError> {
    match Command::parse(line)? {
        Some(command) => dispatch(state, command).map(Some),
        None => Ok(None),
    }
}

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = settings_path_from_env();
    let settings = Settings::load(&path)?;
    let mut state = AppState::new(settings)?;
    log::info!("setup: complete");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        let output = match run_line(&mut state, &line) {
            Ok(Some(Outcome::Quit)) => break,
            Ok(Some(Outcome::Output(value))) => value,
            Ok(None) => continue,
            Err(err) => {
                log::warn!("命令执行失败: {err}");
                json!({ "error": err, "code": err.code() })
            }
        };
        writeln!(stdout, "{}", output)?;
        stdout.flush()?;
    }

    log::info!("退出");
    Ok(())
}
