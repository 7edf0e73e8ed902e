// schema/mod.rs - 表格列定义
//! 固定的列表结构：顺序、表头、筛选提示与排序方式都在这里集中定义，
//! 渲染器与行过滤器都由这张表驱动

pub mod fields;

pub use fields::*;

use crate::models::LiteratureRecord;

/// 列的排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    /// 按显示文本做字典序比较
    Text,
    /// 两侧都能解析为数字时按数值比较，否则退回字典序
    Numeric,
}

impl SortKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Numeric => "numeric",
        }
    }
}

/// 一列的静态描述
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub filter_placeholder: &'static str,
    pub sort: SortKind,
    /// 长文本列，渲染时允许换行
    pub wrap: bool,
    value: fn(&LiteratureRecord) -> String,
}

impl Column {
    /// 该列在表格中显示的文本
    pub fn value(&self, record: &LiteratureRecord) -> String {
        (self.value)(record)
    }
}

/// 所有列，按记录字段的固定顺序排列
pub static COLUMNS: &[Column] = &[
    Column {
        key: FIELD_PATH,
        label: "路径",
        filter_placeholder: "筛选路径",
        sort: SortKind::Text,
        wrap: true,
        value: |r| r.path.clone(),
    },
    Column {
        key: FIELD_FILENAME,
        label: "文件名",
        filter_placeholder: "筛选文件名",
        sort: SortKind::Text,
        wrap: false,
        value: |r| r.filename.clone(),
    },
    Column {
        key: FIELD_FILE_TYPE,
        label: "类型",
        filter_placeholder: "筛选类型",
        sort: SortKind::Text,
        wrap: false,
        value: |r| r.file_type.to_string(),
    },
    Column {
        key: FIELD_SIZE_BYTES,
        label: "大小(字节)",
        filter_placeholder: "筛选大小",
        sort: SortKind::Numeric,
        wrap: false,
        value: |r| r.size_bytes.to_string(),
    },
    Column {
        key: FIELD_MODIFIED_TIME,
        label: "更新时间",
        filter_placeholder: "筛选更新时间",
        sort: SortKind::Text,
        wrap: false,
        value: |r| r.modified_display(),
    },
    Column {
        key: FIELD_TITLE,
        label: "标题",
        filter_placeholder: "筛选标题",
        sort: SortKind::Text,
        wrap: true,
        value: |r| r.title.clone(),
    },
    Column {
        key: FIELD_AUTHORS,
        label: "作者",
        filter_placeholder: "筛选作者",
        sort: SortKind::Text,
        wrap: false,
        value: |r| r.authors.clone(),
    },
    Column {
        key: FIELD_YEAR,
        label: "年份",
        filter_placeholder: "筛选年份",
        sort: SortKind::Numeric,
        wrap: false,
        value: |r| r.year.clone(),
    },
    Column {
        key: FIELD_PURPOSE,
        label: "研究目的",
        filter_placeholder: "筛选研究目的",
        sort: SortKind::Text,
        wrap: true,
        value: |r| r.purpose.clone(),
    },
    Column {
        key: FIELD_KEYWORDS,
        label: "关键词",
        filter_placeholder: "筛选关键词",
        sort: SortKind::Text,
        wrap: true,
        value: |r| r.keywords.clone(),
    },
    Column {
        key: FIELD_METHOD_SUMMARY,
        label: "研究方法概述",
        filter_placeholder: "筛选研究方法",
        sort: SortKind::Text,
        wrap: true,
        value: |r| r.method_summary.clone(),
    },
    Column {
        key: FIELD_RESULTS_SUMMARY,
        label: "主要结果与结论",
        filter_placeholder: "筛选结果结论",
        sort: SortKind::Text,
        wrap: true,
        value: |r| r.results_summary.clone(),
    },
    Column {
        key: FIELD_NOVELTY,
        label: "创新点与不足",
        filter_placeholder: "筛选创新不足",
        sort: SortKind::Text,
        wrap: true,
        value: |r| r.novelty_and_limitations.clone(),
    },
];

/// 按键名查找列下标
pub fn column_index(key: &str) -> Option<usize> {
    COLUMNS.iter().position(|c| c.key == key)
}

/// 一条记录在所有列上的显示文本
pub fn row_values(record: &LiteratureRecord) -> Vec<String> {
    COLUMNS.iter().map(|c| c.value(record)).collect()
}
