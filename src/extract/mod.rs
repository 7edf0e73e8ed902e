// extract/mod.rs - 字段提取
//! 根据文件类型从内容中提取文献字段。提取永不失败：
//! 任何解析问题都回退到占位文本，记录本身总会生成

mod bib;
mod filename;
mod sections;
mod text;

pub use bib::{keywords_from_abstract, parse_first_entry, BibFields};
pub use filename::{infer_from_stem, FilenameGuess};
pub use sections::{extract_sections, match_heading, SectionField, Sections, HEADING_VOCABULARY};
pub use text::{collapse_whitespace, decode, truncate_chars, FIELD_MAX_CHARS};

use std::fs;

use tracing::{debug, warn};

use crate::models::{or_unknown, FileType, LiteratureRecord, ScanCandidate, UNKNOWN};

/// 字段提取器（无状态，每次调用互不影响）
#[derive(Debug, Default, Clone, Copy)]
pub struct FieldExtractor;

impl FieldExtractor {
    pub fn new() -> Self {
        Self
    }

    /// 读取文件内容并提取；读取失败时只保留元数据
    pub fn extract_from_disk(&self, candidate: &ScanCandidate) -> LiteratureRecord {
        if !candidate.file_type.reads_content() {
            return self.extract(candidate, None);
        }

        match fs::read(&candidate.path) {
            Ok(raw) => self.extract(candidate, Some(&raw)),
            Err(e) => {
                warn!("无法读取文件 {:?}: {}", candidate.path, e);
                self.extract(candidate, None)
            }
        }
    }

    /// 从已读取的内容提取字段；`content` 为 None 表示文件不可读
    pub fn extract(&self, candidate: &ScanCandidate, content: Option<&[u8]>) -> LiteratureRecord {
        debug!("正在解析文件: {:?} ({})", candidate.path, candidate.file_type);

        let mut record = LiteratureRecord::placeholder(candidate);
        let text = content.map(decode);

        match (candidate.file_type, text.as_deref()) {
            (FileType::Bib, Some(text)) => apply_bib(&mut record, text),
            (FileType::Txt | FileType::Md, Some(text)) => apply_sections(&mut record, &extract_sections(text)),
            _ => {}
        }

        apply_filename_fallback(&mut record, &candidate.stem());
        record
    }
}

/// 便捷函数：等价于 `FieldExtractor::new().extract(..)`
pub fn extract(candidate: &ScanCandidate, content: Option<&[u8]>) -> LiteratureRecord {
    FieldExtractor::new().extract(candidate, content)
}

fn apply_bib(record: &mut LiteratureRecord, text: &str) {
    let Some(fields) = parse_first_entry(text) else {
        debug!("BibTeX 中没有可识别的条目: {}", record.path);
        return;
    };

    let clip = |value: Option<String>| {
        value
            .map(|v| truncate_chars(&v, FIELD_MAX_CHARS))
            .map(or_unknown)
            .unwrap_or_else(|| UNKNOWN.to_string())
    };

    record.title = clip(fields.title);
    record.authors = clip(fields.author);
    record.year = clip(fields.year);
    record.purpose = clip(fields.abstract_text);
    record.keywords = clip(fields.keywords);
}

fn apply_sections(record: &mut LiteratureRecord, sections: &Sections) {
    let targets: [(SectionField, &mut String); 5] = [
        (SectionField::Purpose, &mut record.purpose),
        (SectionField::Keywords, &mut record.keywords),
        (SectionField::Method, &mut record.method_summary),
        (SectionField::Results, &mut record.results_summary),
        (SectionField::Novelty, &mut record.novelty_and_limitations),
    ];
    for (field, slot) in targets {
        if let Some(value) = sections.get(field) {
            *slot = value.to_string();
        }
    }
}

/// 标题/作者/年份缺失时从文件名推断
fn apply_filename_fallback(record: &mut LiteratureRecord, stem: &str) {
    let missing = |value: &str| value == UNKNOWN;
    if !(missing(&record.title) || missing(&record.authors) || missing(&record.year)) {
        return;
    }

    let guess = infer_from_stem(stem);
    if missing(&record.title) {
        record.title = or_unknown(guess.title);
    }
    if missing(&record.authors) {
        record.authors = or_unknown(guess.author);
    }
    if missing(&record.year) {
        record.year = or_unknown(guess.year);
    }
}
