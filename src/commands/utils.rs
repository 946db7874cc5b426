//! 工具函数集合

use std::{ffi::OsStr, io::IsTerminal};

use crate::core::{error::{AppError, AppResult}, utils::OutputDecoder};

/// 命令行参数按配置的编码转换为 UTF-8
pub fn decode_arg(decoder: &OutputDecoder, arg: &OsStr) -> String {
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        decoder.decode(arg.as_bytes())
    }
    #[cfg(not(unix))]
    {
        let _ = decoder;
        arg.to_string_lossy().trim().to_string()
    }
}

/// 当前认证用户：优先使用 --user，其次是 REMOTE_USER
pub fn resolve_user(user: Option<&str>) -> AppResult<String> {
    user.map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| AppError::Validation("no authenticated user: pass --user or set REMOTE_USER".to_string()))
}

pub fn can_prompt() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::*;
    use crate::core::config::SourceEncoding;

    #[test]
    fn user_must_be_present() {
        assert_eq!(resolve_user(Some(" alice ")).unwrap(), "alice");
        assert!(matches!(resolve_user(Some("  ")), Err(AppError::Validation(_))));
        assert!(matches!(resolve_user(None), Err(AppError::Validation(_))));
    }

    #[test]
    fn arg_is_trimmed_utf8() {
        let decoder = OutputDecoder::new(SourceEncoding::Auto);
        assert_eq!(decode_arg(&decoder, &OsString::from(" 共有リポジトリ ")), "共有リポジトリ");
    }

    #[cfg(unix)]
    #[test]
    fn legacy_arg_is_transcoded() {
        use std::os::unix::ffi::OsStringExt;

        let (bytes, _, _) = encoding_rs::EUC_JP.encode("説明文");
        let arg = OsString::from_vec(bytes.into_owned());
        let decoder = OutputDecoder::new(SourceEncoding::Fixed(encoding_rs::EUC_JP));
        assert_eq!(decode_arg(&decoder, &arg), "説明文");
    }
}
