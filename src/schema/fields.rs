// schema/fields.rs - 列键名常量定义
//! 统一管理表格列的键名（即 JSON 键名与 `data-key` 属性值），避免魔法字符串

/// 完整文件路径
pub const FIELD_PATH: &str = "path";
/// 文件名（含扩展名）
pub const FIELD_FILENAME: &str = "filename";
/// 文件类型
pub const FIELD_FILE_TYPE: &str = "fileType";
/// 文件大小（字节）
pub const FIELD_SIZE_BYTES: &str = "sizeBytes";
/// 文件修改时间
pub const FIELD_MODIFIED_TIME: &str = "modifiedTime";
/// 标题
pub const FIELD_TITLE: &str = "title";
/// 作者
pub const FIELD_AUTHORS: &str = "authors";
/// 年份
pub const FIELD_YEAR: &str = "year";
/// 研究目的
pub const FIELD_PURPOSE: &str = "purpose";
/// 关键词
pub const FIELD_KEYWORDS: &str = "keywords";
/// 研究方法概述
pub const FIELD_METHOD_SUMMARY: &str = "methodSummary";
/// 主要结果与结论
pub const FIELD_RESULTS_SUMMARY: &str = "resultsSummary";
/// 创新点与不足
pub const FIELD_NOVELTY: &str = "noveltyAndLimitations";
