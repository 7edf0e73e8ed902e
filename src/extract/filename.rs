// extract/filename.rs - 从文件名推断标题/作者/年份
//! 适用于 `2021_Smith_Transformer Survey` 这类命名

use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(19|20)\d{2}").unwrap());

static SEPARATOR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_\-]+").unwrap());

/// 从文件名中推断出的字段，空字符串表示没有推断结果
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FilenameGuess {
    pub title: String,
    pub author: String,
    pub year: String,
}

/// `stem` 为去掉扩展名的文件名
pub fn infer_from_stem(stem: &str) -> FilenameGuess {
    let year = YEAR_PATTERN
        .find(stem)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let mut author = String::new();
    let mut title_parts: Vec<&str> = Vec::new();
    for part in SEPARATOR_PATTERN.split(stem) {
        let cleaned = part.trim();
        if cleaned.is_empty() {
            continue;
        }
        if author.is_empty() && looks_like_name(cleaned) {
            author = cleaned.to_string();
            continue;
        }
        title_parts.push(cleaned);
    }

    let mut title = if title_parts.is_empty() {
        stem.to_string()
    } else {
        title_parts.join(" ")
    };
    if !year.is_empty() {
        title = title.replacen(&year, "", 1);
        title = title.trim_matches(|c: char| c == ' ' || c == '_' || c == '-').to_string();
        title = title.split_whitespace().collect::<Vec<_>>().join(" ");
    }
    if title.is_empty() {
        title = stem.trim().to_string();
    }

    FilenameGuess { title, author, year }
}

/// 首字母大写、其余小写、全为字母且长度大于 2
fn looks_like_name(part: &str) -> bool {
    let mut chars = part.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    part.chars().count() > 2
        && part.chars().all(char::is_alphabetic)
        && first.is_uppercase()
        && chars.all(|c| !c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_author_title() {
        let guess = infer_from_stem("2021_Smith_Transformer Survey");
        assert_eq!(guess.year, "2021");
        assert_eq!(guess.author, "Smith");
        assert_eq!(guess.title, "Transformer Survey");
    }

    #[test]
    fn test_plain_stem() {
        let guess = infer_from_stem("深度学习综述");
        assert_eq!(guess.title, "深度学习综述");
        assert_eq!(guess.author, "");
        assert_eq!(guess.year, "");
    }

    #[test]
    fn test_year_only_stem_keeps_stem_as_title() {
        let guess = infer_from_stem("2020");
        assert_eq!(guess.year, "2020");
        assert_eq!(guess.title, "2020");
    }
}
