//! # RGB ↔ 十六进制换算
//!
//! ## 设计思路
//!
//! 输入宽松、输出收敛：
//! - 数值通道一律先 `clamp` 到 `[0, 255]`，非法输入视为 0，从不报错。
//! - 十六进制文本只接受 3 位简写或 6 位完整形式，非法时返回 `ColorError`，
//!   不会静默产生无意义的数值。
//!
//! ## 实现思路
//!
//! - `ChannelInput` 统一数字与文本两类输入，文本按“前缀整数”规则宽松解析
//!   （允许前导空白、正负号、`0x` 前缀，忽略尾随字符）。
//! - 文本框的预过滤使用 `once_cell::sync::Lazy` 预编译正则。

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Color, ColorError};

/// 通道下限。
pub const CHANNEL_MIN: i64 = 0;
/// 通道上限。
pub const CHANNEL_MAX: i64 = 255;

/// 十六进制文本框的完整输入模式（已大写、已去掉 `#`）。
static HEX_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-F]{6}$").expect("十六进制正则编译失败"));

/// 可被解释为通道数值的输入。
///
/// 数字按截断取整，文本按前缀整数解析，解析失败统一视为 0。
pub trait ChannelInput {
    fn to_int(&self) -> i64;
}

impl ChannelInput for i64 {
    fn to_int(&self) -> i64 {
        *self
    }
}

impl ChannelInput for i32 {
    fn to_int(&self) -> i64 {
        i64::from(*self)
    }
}

impl ChannelInput for u32 {
    fn to_int(&self) -> i64 {
        i64::from(*self)
    }
}

impl ChannelInput for u8 {
    fn to_int(&self) -> i64 {
        i64::from(*self)
    }
}

impl ChannelInput for f64 {
    fn to_int(&self) -> i64 {
        if self.is_finite() {
            // `as` 对越界值做饱和转换
            self.trunc() as i64
        } else {
            0
        }
    }
}

impl ChannelInput for str {
    fn to_int(&self) -> i64 {
        parse_leading_int(self).unwrap_or(0)
    }
}

impl ChannelInput for String {
    fn to_int(&self) -> i64 {
        self.as_str().to_int()
    }
}

impl<T: ChannelInput + ?Sized> ChannelInput for &T {
    fn to_int(&self) -> i64 {
        (**self).to_int()
    }
}

/// 按前缀整数规则解析文本。
///
/// `"42px"` → 42，`" -7"` → -7，`"0x1f"` → 31，`"abc"` → `None`。
/// 超长数字做饱和处理。
fn parse_leading_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            break;
        };
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(d));
        seen_digit = true;
    }

    if !seen_digit {
        return None;
    }

    Some(if negative { -value } else { value })
}

/// 解析输入并收敛到 `[min, max]`。
///
/// # 示例
/// ```
/// use color_loupe::color::clamp;
///
/// assert_eq!(clamp(-5, 0, 255), 0);
/// assert_eq!(clamp(999, 0, 255), 255);
/// assert_eq!(clamp("abc", 0, 255), 0);
/// ```
pub fn clamp(n: impl ChannelInput, min: i64, max: i64) -> i64 {
    n.to_int().max(min).min(max)
}

/// `clamp` 的通道版本，直接返回 `u8`。
pub fn clamp_channel(n: impl ChannelInput) -> u8 {
    // 收敛后必然落在 u8 范围内
    clamp(n, CHANNEL_MIN, CHANNEL_MAX) as u8
}

/// 单通道 → 两位大写十六进制（补零）。
pub fn to_hex(n: impl ChannelInput) -> String {
    format!("{:02X}", clamp_channel(n))
}

/// RGB → `#RRGGBB`，输出恒为 7 个字符。
///
/// # 示例
/// ```
/// use color_loupe::color::rgb_to_hex;
///
/// assert_eq!(rgb_to_hex(171, 205, 239), "#ABCDEF");
/// assert_eq!(rgb_to_hex(-1, "300", "12abc"), "#00FF0C");
/// ```
pub fn rgb_to_hex(r: impl ChannelInput, g: impl ChannelInput, b: impl ChannelInput) -> String {
    format!("#{}{}{}", to_hex(r), to_hex(g), to_hex(b))
}

/// 十六进制文本 → `Color`。
///
/// 接受 `#RGB`、`#RRGGBB`（`#` 可省略，大小写不敏感，首尾空白忽略）。
/// 3 位简写按位翻倍展开（`"A"` → `"AA"`）。
///
/// # 错误
/// 长度不是 3/6 位或包含非十六进制字符时返回 `ColorError::InvalidFormat`。
pub fn hex_to_rgb(hex: &str) -> Result<Color, ColorError> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidFormat(format!(
            "包含非十六进制字符：{:?}",
            hex
        )));
    }

    let expanded = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => digits.to_string(),
        other => {
            return Err(ColorError::InvalidFormat(format!(
                "十六进制长度应为 3 或 6 位，实际为 {} 位：{:?}",
                other, hex
            )));
        }
    };

    let num = u32::from_str_radix(&expanded, 16)
        .map_err(|e| ColorError::InvalidFormat(format!("无法解析 {:?}：{}", hex, e)))?;

    Ok(Color::new(
        ((num >> 16) & 0xFF) as u8,
        ((num >> 8) & 0xFF) as u8,
        (num & 0xFF) as u8,
    ))
}

/// 十六进制文本框的输入预过滤。
///
/// 只有完整的 `#RRGGBB`（去空白、转大写后）才会触发颜色更新，
/// 输入过程中的半成品文本直接忽略。
pub fn is_complete_hex(input: &str) -> bool {
    let value = input.trim().to_uppercase();
    value.len() == 7 && value.starts_with('#') && HEX_DIGITS.is_match(&value[1..])
}
