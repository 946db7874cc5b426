//! ### 工具函数
//!

use std::{io, path::Path};

use chrono::{DateTime, FixedOffset};
use crossterm::execute;

use crate::core::config::SourceEncoding;

/// 把外部命令的输出字节转换成去掉首尾空白的 UTF-8 文本
#[derive(Debug, Clone, Copy)]
pub struct OutputDecoder {
    encoding: SourceEncoding,
}

impl OutputDecoder {
    pub fn new(encoding: SourceEncoding) -> Self {
        OutputDecoder { encoding }
    }

    /// Never fails: undecodable sequences become U+FFFD.
    pub fn decode(&self, input: &[u8]) -> String {
        match self.encoding {
            SourceEncoding::Auto => auto_decode(input),
            SourceEncoding::Fixed(encoding) => {
                let (decoded, _, _) = encoding.decode(input);
                decoded.trim().to_string()
            }
        }
    }
}

fn auto_decode(input: &[u8]) -> String {
    // First, try UTF-8, which is the most common.
    if let Ok(s) = std::str::from_utf8(input) {
        return s.trim().to_string();
    }

    // Fallback to chardetng for other encodings if UTF-8 fails.
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(input, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(input);
    decoded.trim().to_string()
}

/// ### svnlook date 输出解析
/// `2024-06-01 10:00:00 +0900 (Sat, 01 Jun 2024)`，括号里的部分忽略
pub fn parse_svn_date(text: &str) -> Option<DateTime<FixedOffset>> {
    let stamp = text.split(" (").next()?.trim();
    DateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S %z")
        .or_else(|_| DateTime::parse_from_rfc3339(stamp))
        .ok()
}

/// 本地路径转换为 file:// URL，每一段都做百分号编码
pub fn file_url(path: &Path) -> String {
    let path_str = path.to_string_lossy().replace('\\', "/");
    let encoded = path_str
        .split('/')
        .map(|segment| {
            // Windows 盘符保持原样
            if segment.len() == 2 && segment.ends_with(':') {
                segment.to_string()
            } else {
                urlencoding::encode(segment).into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("/");

    // Windows 盘符前通常需要加一个 /，例如 file:///C:/...
    if encoded.starts_with('/') {
        format!("file://{}", encoded)
    } else {
        format!("file:///{}", encoded)
    }
}

pub struct CursorGuard;

impl CursorGuard {
    pub fn new() -> Self {
        execute!(io::stderr(), crossterm::cursor::Hide).ok();
        CursorGuard
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        execute!(io::stderr(), crossterm::cursor::Show).ok();
    }
}
