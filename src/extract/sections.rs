// extract/sections.rs - TXT/MD 章节标题提取
//! 逐行扫描，遇到词表中的标题后把后续非标题行累加到对应字段，
//! 直到下一个可识别的标题或文件结束。同一字段只认第一次出现的标题

use std::collections::HashMap;

use super::text::{collapse_whitespace, truncate_chars, FIELD_MAX_CHARS};

/// 章节对应的记录字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionField {
    Purpose,
    Keywords,
    Method,
    Results,
    Novelty,
}

/// 标题词表：词 -> 字段。按顺序匹配，较长、较具体的词排在前面
pub static HEADING_VOCABULARY: &[(&str, SectionField)] = &[
    ("创新点与不足", SectionField::Novelty),
    ("研究目的", SectionField::Purpose),
    ("研究方法", SectionField::Method),
    ("主要结果", SectionField::Results),
    ("关键词", SectionField::Keywords),
    ("关键字", SectionField::Keywords),
    ("创新点", SectionField::Novelty),
    ("不足", SectionField::Novelty),
    ("目的", SectionField::Purpose),
    ("摘要", SectionField::Purpose),
    ("方法", SectionField::Method),
    ("结论", SectionField::Results),
    ("Objective", SectionField::Purpose),
    ("objective", SectionField::Purpose),
    ("Abstract", SectionField::Purpose),
    ("abstract", SectionField::Purpose),
    ("Keywords", SectionField::Keywords),
    ("keywords", SectionField::Keywords),
    ("Keyword", SectionField::Keywords),
    ("Methods", SectionField::Method),
    ("methods", SectionField::Method),
    ("Method", SectionField::Method),
    ("Results", SectionField::Results),
    ("results", SectionField::Results),
    ("Conclusion", SectionField::Results),
    ("conclusion", SectionField::Results),
    ("Limitations", SectionField::Novelty),
    ("limitations", SectionField::Novelty),
];

/// 标题部分允许的最大字符数，超过则视为正文
const MAX_HEADING_CHARS: usize = 20;

/// 无冒号的标题行中不应出现的句读符号
const SENTENCE_PUNCTUATION: &[char] = &['。', '，', ',', '；', ';', '！', '？', '.', '!', '?'];

/// 提取结果：只包含扫描到内容的字段
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Sections {
    values: HashMap<SectionField, String>,
}

impl Sections {
    pub fn get(&self, field: SectionField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 扫描整段文本
pub fn extract_sections(text: &str) -> Sections {
    let mut buffers: HashMap<SectionField, Vec<String>> = HashMap::new();
    let mut current: Option<SectionField> = None;

    for line in text.lines() {
        if let Some((field, inline)) = match_heading(line) {
            if buffers.contains_key(&field) {
                // 重复标题：其后内容丢弃，直到下一个新标题
                current = None;
            } else {
                let buffer = buffers.entry(field).or_default();
                if !inline.is_empty() {
                    buffer.push(inline);
                }
                current = Some(field);
            }
            continue;
        }

        if let Some(field) = current {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                buffers.entry(field).or_default().push(trimmed.to_string());
            }
        }
    }

    let values = buffers
        .into_iter()
        .filter_map(|(field, lines)| {
            let joined = collapse_whitespace(&lines.join(" "));
            let cleaned = joined.trim_matches(|c: char| matches!(c, ' ' | ':' | '：' | ';' | '；'));
            if cleaned.is_empty() {
                None
            } else {
                Some((field, truncate_chars(cleaned, FIELD_MAX_CHARS)))
            }
        })
        .collect();

    Sections { values }
}

/// 判断一行是否为标题；是则返回字段与冒号后的同行内容。
/// 带冒号时冒号前的部分包含词表中的词即可；无冒号时整行必须以词表中的词开头
pub fn match_heading(line: &str) -> Option<(SectionField, String)> {
    let stripped = strip_decoration(line);
    if stripped.is_empty() {
        return None;
    }

    let (heading, inline, has_colon) = match stripped.find([':', '：']) {
        Some(idx) => {
            let sep_len = stripped[idx..].chars().next().map(char::len_utf8).unwrap_or(1);
            (&stripped[..idx], stripped[idx + sep_len..].trim(), true)
        }
        None => {
            let heading = strip_numbering(stripped);
            if heading.contains(SENTENCE_PUNCTUATION) {
                return None;
            }
            (heading, "", false)
        }
    };

    let heading = heading.trim().trim_end_matches(['*', '_']);
    if heading.is_empty() || heading.chars().count() > MAX_HEADING_CHARS {
        return None;
    }

    HEADING_VOCABULARY
        .iter()
        .find(|(term, _)| {
            if has_colon {
                heading.contains(term)
            } else {
                heading.starts_with(term)
            }
        })
        .map(|(_, field)| (*field, inline.trim_matches(['*', '_', ' ']).to_string()))
}

/// 去掉 "1." / "2、" / "3)" 形式的序号；不是序号时原样返回
fn strip_numbering(text: &str) -> &str {
    let rest = text.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == text.len() {
        return text;
    }
    match rest.chars().next() {
        Some(c @ ('.' | '、' | ')' | '）')) => rest[c.len_utf8()..].trim_start(),
        _ => text,
    }
}

/// 去掉 Markdown 标题、引用、列表与加粗标记
fn strip_decoration(line: &str) -> &str {
    line.trim()
        .trim_start_matches(|c: char| matches!(c, '#' | '>' | '-' | '+' | '*' | '_') || c.is_whitespace())
        .trim_end_matches(|c: char| matches!(c, '#' | '*' | '_') || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_on_own_lines() {
        let sections = extract_sections("研究目的\n提高效率\n关键词\nAI, 管理");
        assert!(sections.get(SectionField::Purpose).unwrap().contains("提高效率"));
        assert!(sections.get(SectionField::Keywords).unwrap().contains("AI, 管理"));
        assert_eq!(sections.get(SectionField::Method), None);
    }

    #[test]
    fn test_inline_headings() {
        let text = "
        研究目的：验证自动化文献整理流程。
        关键词：文献管理, 自动化
        研究方法：规则提取与文件监控。
        主要结果与结论：可以提升检索和综述效率。
        创新点与不足：轻量易用，但 PDF 深度解析待增强。
        ";
        let sections = extract_sections(text);
        assert!(sections.get(SectionField::Purpose).unwrap().contains("自动化文献整理"));
        assert!(sections.get(SectionField::Keywords).unwrap().contains("文献管理"));
        assert!(sections.get(SectionField::Method).unwrap().contains("规则提取"));
        assert!(sections.get(SectionField::Results).unwrap().contains("检索"));
        assert!(sections.get(SectionField::Novelty).unwrap().contains("轻量易用"));
    }

    #[test]
    fn test_multiline_accumulation_and_markdown() {
        let text = "# 论文笔记\n无关的开头\n## 方法\n第一步采集数据\n\n第二步人工标注\n## 结论\n效果明显";
        let sections = extract_sections(text);
        assert_eq!(sections.get(SectionField::Method), Some("第一步采集数据 第二步人工标注"));
        assert_eq!(sections.get(SectionField::Results), Some("效果明显"));
        assert_eq!(sections.get(SectionField::Purpose), None);
    }

    #[test]
    fn test_first_heading_wins() {
        let text = "关键词\n第一组\n方法\n对比实验\n关键词\n第二组";
        let sections = extract_sections(text);
        assert_eq!(sections.get(SectionField::Keywords), Some("第一组"));
        assert_eq!(sections.get(SectionField::Method), Some("对比实验"));
    }

    #[test]
    fn test_long_or_punctuated_lines_are_not_headings() {
        assert!(match_heading("本文采用的方法并不复杂，效果却很好").is_none());
        assert!(match_heading("这是一段非常非常非常非常长的描述其中提到了研究方法的细节：略").is_none());
        assert_eq!(match_heading("**Keywords:** nlp"), Some((SectionField::Keywords, "nlp".to_string())));
    }

    #[test]
    fn test_body_lines_mentioning_a_term_stay_in_their_section() {
        let sections = extract_sections("方法\n采用问卷调查方法\n结论\n效果明显");
        assert_eq!(sections.get(SectionField::Method), Some("采用问卷调查方法"));
        assert_eq!(sections.get(SectionField::Results), Some("效果明显"));

        let text = "Methods\nWe ran experiments.\nOur results.\nMore text here\nConclusion\nDone";
        let sections = extract_sections(text);
        assert_eq!(
            sections.get(SectionField::Method),
            Some("We ran experiments. Our results. More text here")
        );
        assert_eq!(sections.get(SectionField::Results), Some("Done"));
    }

    #[test]
    fn test_numbered_headings() {
        assert_eq!(match_heading("1. 方法"), Some((SectionField::Method, String::new())));
        assert_eq!(match_heading("## 2、研究目的"), Some((SectionField::Purpose, String::new())));
        assert!(match_heading("2020年的方法").is_none());
    }

    #[test]
    fn test_case_sensitive_match() {
        assert!(match_heading("KEYWORDS").is_none());
        assert!(match_heading("Keywords").is_some());
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_sections("").is_empty());
        assert!(extract_sections("没有任何标题的正文").is_empty());
    }
}
