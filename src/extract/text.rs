// extract/text.rs - 文本清理工具

/// 单个字段保留的最大字符数
pub const FIELD_MAX_CHARS: usize = 240;

/// 解码原始字节：UTF-8 宽松解码，去掉 BOM，统一换行符
pub fn decode(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text[..]);
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// 把连续空白压缩为单个空格并去掉首尾空白
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 按字符数截断（保证落在 UTF-8 字符边界上）
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_normalizes() {
        let raw = "\u{feff}a\r\nb\rc".as_bytes();
        assert_eq!(decode(raw), "a\nb\nc");
        assert_eq!(decode(&[0x61, 0xff, 0x62]), "a\u{fffd}b");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("文献管理", 2), "文献");
        assert_eq!(truncate_chars("ab", 5), "ab");
        assert_eq!(collapse_whitespace("  a \n\t b "), "a b");
    }
}
