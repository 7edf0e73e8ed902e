// extract/bib.rs - BibTeX 轻量解析
//! 只解析文件中的第一个条目：`@type{key, name = {value}, ...}`。
//! 字段值支持 `{...}`（可嵌套）、`"..."` 与裸值三种写法，字段名不区分大小写

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::text::collapse_whitespace;

/// 摘要里形如 "关键词：a, b" / "Keywords: a, b" 的片段
static ABSTRACT_KEYWORDS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:关键词|关键字|key\s*words?|index terms)\s*[:：]\s*([^。\n]+)").unwrap()
});

/// 第一个条目中提取到的字段
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BibFields {
    pub entry_type: String,
    pub cite_key: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<String>,
    pub abstract_text: Option<String>,
    pub keywords: Option<String>,
}

/// 解析第一个条目；没有任何条目时返回 None
pub fn parse_first_entry(content: &str) -> Option<BibFields> {
    let mut cursor = Cursor::new(content);

    // 跳过 @comment / @preamble / @string，找到第一个真正的条目
    let (entry_type, body) = loop {
        cursor.skip_until('@')?;
        cursor.bump();
        let entry_type = cursor.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        cursor.skip_whitespace();
        let close = match cursor.peek()? {
            '{' => '}',
            '(' => ')',
            _ => continue,
        };
        cursor.bump();
        let body = cursor.take_balanced(close);
        let lowered = entry_type.to_ascii_lowercase();
        if matches!(lowered.as_str(), "comment" | "preamble" | "string") || entry_type.is_empty() {
            continue;
        }
        break (lowered, body);
    };

    let (cite_key, fields_part) = match body.find(',') {
        Some(idx) if !body[..idx].contains('=') => (body[..idx].trim().to_string(), &body[idx + 1..]),
        _ => (String::new(), body.as_str()),
    };

    let fields = parse_fields(fields_part);
    let take = |name: &str| fields.get(name).filter(|v| !v.is_empty()).cloned();

    let abstract_text = take("abstract");
    let keywords = take("keywords")
        .or_else(|| take("keyword"))
        .or_else(|| abstract_text.as_deref().and_then(keywords_from_abstract));

    Some(BibFields {
        entry_type,
        cite_key,
        title: take("title"),
        author: take("author"),
        year: take("year"),
        abstract_text,
        keywords,
    })
}

/// 从摘要文本中按模式提取关键词
pub fn keywords_from_abstract(text: &str) -> Option<String> {
    ABSTRACT_KEYWORDS_PATTERN
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| collapse_whitespace(m.as_str().trim_end_matches(['.', ';', '；'])))
        .filter(|s| !s.is_empty())
}

/// 解析 `name = value` 列表，字段名统一为小写，先出现的同名字段优先
fn parse_fields(body: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    let mut cursor = Cursor::new(body);

    loop {
        cursor.skip_while(|c| c.is_whitespace() || c == ',');
        if cursor.peek().is_none() {
            break;
        }
        let name = cursor.take_while(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.'));
        cursor.skip_whitespace();
        if name.is_empty() || cursor.peek() != Some('=') {
            // 格式错误：跳到下一个逗号继续尝试
            if cursor.skip_until(',').is_none() {
                break;
            }
            continue;
        }
        cursor.bump();
        cursor.skip_whitespace();

        let raw = match cursor.peek() {
            Some('{') => {
                cursor.bump();
                cursor.take_balanced('}')
            }
            Some('"') => {
                cursor.bump();
                cursor.take_quoted()
            }
            Some(_) => cursor.take_while(|c| c != ',').trim().to_string(),
            None => String::new(),
        };

        fields
            .entry(name.to_ascii_lowercase())
            .or_insert_with(|| clean_value(&raw));
    }

    fields
}

/// 去掉内部花括号并压缩空白
fn clean_value(raw: &str) -> String {
    let without_braces: String = raw.chars().filter(|c| *c != '{' && *c != '}').collect();
    collapse_whitespace(&without_braces)
}

/// 基于字符的简单游标
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.rest = &self.rest[c.len_utf8()..];
        Some(c)
    }

    fn skip_until(&mut self, target: char) -> Option<()> {
        let idx = self.rest.find(target)?;
        self.rest = &self.rest[idx..];
        Some(())
    }

    fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        let idx = self.rest.find(|c: char| !pred(c)).unwrap_or(self.rest.len());
        self.rest = &self.rest[idx..];
    }

    fn skip_whitespace(&mut self) {
        self.skip_while(char::is_whitespace);
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let idx = self.rest.find(|c: char| !pred(c)).unwrap_or(self.rest.len());
        let (taken, rest) = self.rest.split_at(idx);
        self.rest = rest;
        taken.to_string()
    }

    /// 读到与已消费的开括号配对的 `close` 为止；未闭合时读到末尾
    fn take_balanced(&mut self, close: char) -> String {
        let open = if close == ')' { '(' } else { '{' };
        let mut depth = 0usize;
        let mut out = String::new();
        while let Some(c) = self.bump() {
            if c == open {
                depth += 1;
            } else if c == close {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            out.push(c);
        }
        out
    }

    /// 读到下一个不在花括号内的 `"` 为止
    fn take_quoted(&mut self) -> String {
        let mut depth = 0usize;
        let mut out = String::new();
        while let Some(c) = self.bump() {
            match c {
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                '"' if depth == 0 => break,
                _ => {}
            }
            out.push(c);
        }
        out
    }
}
