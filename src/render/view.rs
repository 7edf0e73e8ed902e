// render/view.rs - 表格视图状态
//! 全局搜索、逐列筛选与排序状态机。页面内嵌脚本实现同样的规则，
//! 这里的实现用于生成页面时的初始视图（预排序、预筛选、计数）

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ScanError, ScanResult};
use crate::schema::{column_index, SortKind, COLUMNS};

/// 与页面脚本中的数字判定保持一致
static NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").unwrap());

/// 排序状态：只由表头点击驱动
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortState {
    /// 原始顺序
    #[default]
    Unsorted,
    Ascending(usize),
    Descending(usize),
}

impl SortState {
    /// 点击第 `col` 列表头：同一列切换方向，换列则从升序开始
    pub fn on_header_click(self, col: usize) -> Self {
        match self {
            Self::Ascending(c) if c == col => Self::Descending(col),
            Self::Descending(c) if c == col => Self::Ascending(col),
            _ => Self::Ascending(col),
        }
    }

    pub fn column(&self) -> Option<usize> {
        match self {
            Self::Unsorted => None,
            Self::Ascending(c) | Self::Descending(c) => Some(*c),
        }
    }

    /// 解析 "key"、"key:asc" 或 "key:desc"，空字符串为原始顺序
    pub fn parse(spec: &str) -> ScanResult<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Ok(Self::Unsorted);
        }
        let (key, direction) = spec.split_once(':').unwrap_or((spec, "asc"));
        let col = column_index(key.trim())
            .ok_or_else(|| ScanError::InvalidView(format!("未知的排序列 {:?}", key)))?;
        match direction.trim() {
            "asc" => Ok(Self::Ascending(col)),
            "desc" => Ok(Self::Descending(col)),
            other => Err(ScanError::InvalidView(format!("未知的排序方向 {:?}", other))),
        }
    }
}

/// 比较两个单元格的显示文本
pub fn compare_cells(kind: SortKind, a: &str, b: &str) -> Ordering {
    if kind == SortKind::Numeric {
        if let (Some(x), Some(y)) = (as_number(a), as_number(b)) {
            return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
        }
    }
    a.cmp(b)
}

fn as_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if NUMBER_PATTERN.is_match(text) {
        text.parse().ok()
    } else {
        None
    }
}

/// 一个表格视图：搜索词 + 列筛选（逻辑与）+ 排序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    pub global_search: String,
    /// (列下标, 筛选词)
    pub column_filters: Vec<(usize, String)>,
    pub sort: SortState,
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.global_search = text.into();
        self
    }

    /// 按列键名设置筛选；同一列再次设置时覆盖之前的筛选词
    pub fn with_filter(mut self, key: &str, text: impl Into<String>) -> ScanResult<Self> {
        let col = column_index(key)
            .ok_or_else(|| ScanError::InvalidView(format!("未知的筛选列 {:?}", key)))?;
        let text = text.into();
        match self.column_filters.iter_mut().find(|(c, _)| *c == col) {
            Some(entry) => entry.1 = text,
            None => self.column_filters.push((col, text)),
        }
        Ok(self)
    }

    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }

    /// 解析 "key=text" 形式的筛选
    pub fn with_filter_spec(self, spec: &str) -> ScanResult<Self> {
        let (key, text) = spec
            .split_once('=')
            .ok_or_else(|| ScanError::InvalidView(format!("筛选应为 列名=内容: {:?}", spec)))?;
        self.with_filter(key.trim(), text)
    }

    pub fn filter_for(&self, col: usize) -> Option<&str> {
        self.column_filters
            .iter()
            .find(|(c, _)| *c == col)
            .map(|(_, text)| text.as_str())
    }

    /// 一行（各列显示文本）是否同时满足全局搜索与所有列筛选
    pub fn matches(&self, cells: &[String]) -> bool {
        let needle = self.global_search.trim().to_lowercase();
        let lowered: Vec<String> = cells.iter().map(|c| c.to_lowercase()).collect();

        let pass_global = needle.is_empty() || lowered.iter().any(|c| c.contains(&needle));
        pass_global
            && self.column_filters.iter().all(|(col, text)| {
                let text = text.trim().to_lowercase();
                text.is_empty() || lowered.get(*col).is_some_and(|c| c.contains(&text))
            })
    }

    /// 排序后的行下标（全部行）；相等时保持原顺序
    pub fn order(&self, rows: &[Vec<String>]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..rows.len()).collect();
        let (col, descending) = match self.sort {
            SortState::Unsorted => return order,
            SortState::Ascending(c) => (c, false),
            SortState::Descending(c) => (c, true),
        };
        let kind = COLUMNS.get(col).map(|c| c.sort).unwrap_or(SortKind::Text);
        let cell = |row: usize| rows[row].get(col).map(String::as_str).unwrap_or("");

        order.sort_by(|&a, &b| {
            let ord = compare_cells(kind, cell(a), cell(b));
            if descending { ord.reverse() } else { ord }
        });
        order
    }

    /// 经过排序与筛选后可见的行下标
    pub fn visible(&self, rows: &[Vec<String>]) -> Vec<usize> {
        self.order(rows)
            .into_iter()
            .filter(|&idx| self.matches(&rows[idx]))
            .collect()
    }
}
