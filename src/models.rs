// models.rs - 文献记录与扫描候选
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// 提取失败或缺失时的占位文本
pub const UNKNOWN: &str = "未知";

/// 更新时间的显示格式
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 文献文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Bib,
    Txt,
    Md,
    Doc,
    Docx,
    Other,
}

impl FileType {
    /// 根据扩展名判断类型（不区分大小写，不含点号）
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "bib" => Self::Bib,
            "txt" => Self::Txt,
            "md" | "markdown" => Self::Md,
            "doc" => Self::Doc,
            "docx" => Self::Docx,
            _ => Self::Other,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Bib => "bib",
            Self::Txt => "txt",
            Self::Md => "md",
            Self::Doc => "doc",
            Self::Docx => "docx",
            Self::Other => "other",
        }
    }

    /// 是否需要读取文件内容（其余类型只填充文件系统元数据）
    pub fn reads_content(&self) -> bool {
        matches!(self, Self::Bib | Self::Txt | Self::Md)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 遍历得到的候选文件：路径 + 类型 + 文件系统元数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanCandidate {
    pub path: PathBuf,
    pub file_type: FileType,
    pub size_bytes: u64,
    pub modified: SystemTime,
}

impl ScanCandidate {
    /// 从文件路径读取元数据
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        // 规范化路径：统一使用绝对路径，避免同一文件出现两条记录
        let canonical_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        Ok(Self {
            file_type: FileType::from_path(&canonical_path),
            path: canonical_path,
            size_bytes: metadata.len(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        })
    }

    pub fn path_string(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// 文件名去掉扩展名
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// 一个文献文件的完整记录，所有字段都有值（缺失时为占位文本）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteratureRecord {
    pub path: String,
    pub filename: String,
    pub file_type: FileType,
    pub size_bytes: u64,
    pub modified_time: DateTime<Local>,
    pub title: String,
    pub authors: String,
    pub year: String,
    pub purpose: String,
    pub keywords: String,
    pub method_summary: String,
    pub results_summary: String,
    pub novelty_and_limitations: String,
}

impl LiteratureRecord {
    /// 只含元数据的记录，所有文本字段都是占位符
    pub fn placeholder(candidate: &ScanCandidate) -> Self {
        Self {
            path: candidate.path_string(),
            filename: candidate.filename(),
            file_type: candidate.file_type,
            size_bytes: candidate.size_bytes,
            modified_time: DateTime::<Local>::from(candidate.modified),
            title: UNKNOWN.to_string(),
            authors: UNKNOWN.to_string(),
            year: UNKNOWN.to_string(),
            purpose: UNKNOWN.to_string(),
            keywords: UNKNOWN.to_string(),
            method_summary: UNKNOWN.to_string(),
            results_summary: UNKNOWN.to_string(),
            novelty_and_limitations: UNKNOWN.to_string(),
        }
    }

    pub fn modified_display(&self) -> String {
        self.modified_time.format(TIME_FORMAT).to_string()
    }
}

/// 空字符串替换为占位符
pub fn or_unknown(value: impl Into<String>) -> String {
    let value = value.into();
    if value.trim().is_empty() {
        UNKNOWN.to_string()
    } else {
        value
    }
}
