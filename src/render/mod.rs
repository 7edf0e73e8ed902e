// render/mod.rs - HTML 表格渲染
//! 把记录序列化为一个自包含的 HTML 文档（内联样式与脚本，无外部请求）。
//! 行在服务端按初始视图排好序并打上 `hidden`，页面脚本从同一状态开始交互

mod template;
pub mod view;

pub use view::{compare_cells, SortState, TableView};

use crate::models::LiteratureRecord;
use crate::schema::{row_values, COLUMNS};

/// 渲染选项
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub page_title: String,
    /// 显示在页面顶部的来源目录
    pub source_dir: Option<String>,
    /// 初始视图
    pub view: TableView,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_title: "文献动态表格".to_string(),
            source_dir: None,
            view: TableView::default(),
        }
    }
}

pub struct TableRenderer {
    options: RenderOptions,
}

impl TableRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn render(&self, records: &[LiteratureRecord]) -> String {
        let view = &self.options.view;
        let rows: Vec<Vec<String>> = records.iter().map(row_values).collect();
        let order = view.order(&rows);
        let visible = order.iter().filter(|&&idx| view.matches(&rows[idx])).count();

        let title = escape_html(&self.options.page_title);
        let (sort_col, sort_dir) = match view.sort {
            SortState::Unsorted => (String::new(), "asc"),
            SortState::Ascending(c) => (c.to_string(), "asc"),
            SortState::Descending(c) => (c.to_string(), "desc"),
        };

        let mut html = String::with_capacity(4096 + rows.len() * 512);
        html.push_str("<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n");
        html.push_str("  <meta charset=\"UTF-8\" />\n");
        html.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n");
        html.push_str(&format!("  <title>{}</title>\n", title));
        html.push_str(&format!("  <style>{}  </style>\n", template::STYLE));
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("  <h1>{}</h1>\n", title));

        html.push_str("  <div class=\"meta\">");
        if let Some(source_dir) = &self.options.source_dir {
            html.push_str(&format!("来源目录: {} | ", escape_html(source_dir)));
        }
        html.push_str(&format!(
            "当前显示: <span id=\"count\">{}</span> / {} 篇</div>\n",
            visible,
            rows.len()
        ));
        html.push_str(&format!(
            "  <input id=\"globalSearch\" class=\"global-search\" placeholder=\"全局搜索（标题/作者/年份/关键词等）...\" value=\"{}\" />\n",
            escape_html(&view.global_search)
        ));

        html.push_str("  <div class=\"table-wrap\">\n");
        html.push_str(&format!(
            "    <table id=\"literatureTable\" data-sort-col=\"{}\" data-sort-dir=\"{}\">\n",
            sort_col, sort_dir
        ));
        html.push_str("      <thead>\n");
        html.push_str(&self.header_row());
        html.push_str(&self.filter_row());
        html.push_str("      </thead>\n      <tbody>\n");
        for &idx in &order {
            html.push_str(&body_row(idx, &rows[idx], !view.matches(&rows[idx])));
        }
        html.push_str("      </tbody>\n    </table>\n  </div>\n");
        html.push_str(&format!("<script>{}</script>\n", template::SCRIPT));
        html.push_str("</body>\n</html>\n");
        html
    }

    fn header_row(&self) -> String {
        let sort = self.options.view.sort;
        let mut row = String::from("        <tr>\n");
        for (i, column) in COLUMNS.iter().enumerate() {
            let aria = match sort {
                SortState::Ascending(c) if c == i => "ascending",
                SortState::Descending(c) if c == i => "descending",
                _ => "none",
            };
            row.push_str(&format!(
                "          <th data-key=\"{}\" data-col=\"{}\" data-sort=\"{}\" aria-sort=\"{}\">{}</th>\n",
                column.key,
                i,
                column.sort.as_str(),
                aria,
                escape_html(column.label)
            ));
        }
        row.push_str("        </tr>\n");
        row
    }

    fn filter_row(&self) -> String {
        let mut row = String::from("        <tr class=\"filter-row\">\n");
        for (i, column) in COLUMNS.iter().enumerate() {
            let value = self.options.view.filter_for(i).unwrap_or("");
            row.push_str(&format!(
                "          <th><input data-filter=\"{}\" data-col=\"{}\" placeholder=\"{}\" value=\"{}\" /></th>\n",
                column.key,
                i,
                escape_html(column.filter_placeholder),
                escape_html(value)
            ));
        }
        row.push_str("        </tr>\n");
        row
    }
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

/// 使用默认选项渲染
pub fn render(records: &[LiteratureRecord]) -> String {
    TableRenderer::default().render(records)
}

fn body_row(index: usize, cells: &[String], hidden: bool) -> String {
    let mut row = format!(
        "        <tr data-index=\"{}\"{}>",
        index,
        if hidden { " hidden" } else { "" }
    );
    for (column, value) in COLUMNS.iter().zip(cells) {
        if column.wrap {
            row.push_str(&format!("<td class=\"wrap\">{}</td>", escape_html(value)));
        } else {
            row.push_str(&format!("<td>{}</td>", escape_html(value)));
        }
    }
    row.push_str("</tr>\n");
    row
}

/// HTML 转义（文本与属性值通用）
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileType, ScanCandidate};
    use crate::schema::{column_index, FIELD_AUTHORS, FIELD_SIZE_BYTES};
    use std::path::PathBuf;
    use std::time::SystemTime;

    fn record(path: &str, title: &str, authors: &str, size: u64) -> LiteratureRecord {
        let candidate = ScanCandidate {
            path: PathBuf::from(path),
            file_type: FileType::Md,
            size_bytes: size,
            modified: SystemTime::UNIX_EPOCH,
        };
        let mut record = LiteratureRecord::placeholder(&candidate);
        record.title = title.to_string();
        record.authors = authors.to_string();
        record
    }

    fn fixture() -> Vec<LiteratureRecord> {
        vec![
            record("/lib/a.md", "Deep Learning Survey", "Alice", 300),
            record("/lib/b.md", "Deep Tables", "Bob", 20),
            record("/lib/c.md", "Shallow Learning", "Bob", 1000),
        ]
    }

    fn count(html: &str, needle: &str) -> usize {
        html.matches(needle).count()
    }

    #[test]
    fn test_empty_record_set() {
        let html = render(&[]);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(count(&html, "<th data-key="), COLUMNS.len());
        assert_eq!(count(&html, "<input data-filter="), COLUMNS.len());
        assert_eq!(count(&html, "<tr data-index="), 0);
        assert!(html.contains("<tbody>\n      </tbody>"));
        assert!(html.contains("<span id=\"count\">0</span> / 0"));
        assert_eq!(count(&html, "<tr"), count(&html, "</tr>"));
        assert_eq!(count(&html, "<script>"), 1);
        assert!(!html.contains("src=\"http"));
    }

    #[test]
    fn test_header_follows_column_order() {
        let html = render(&[]);
        let mut last = 0;
        for column in COLUMNS {
            let pos = html.find(&format!("data-key=\"{}\"", column.key)).unwrap();
            assert!(pos > last);
            last = pos;
        }
        assert!(html.contains(">研究方法概述</th>"));
    }

    #[test]
    fn test_rows_are_escaped() {
        let records = vec![record("/lib/x.md", "含\"引号\"标题 <b>&</b>", "O'Brien", 1)];
        let html = render(&records);
        assert!(html.contains("含&quot;引号&quot;标题 &lt;b&gt;&amp;&lt;/b&gt;"));
        assert!(html.contains("O&#39;Brien"));
        assert!(!html.contains("<b>&</b>"));
        assert_eq!(count(&html, "<tr data-index="), 1);
    }

    #[test]
    fn test_one_row_per_record_in_original_order() {
        let html = render(&fixture());
        assert_eq!(count(&html, "<tr data-index="), 3);
        let a = html.find("<tr data-index=\"0\">").unwrap();
        let b = html.find("<tr data-index=\"1\">").unwrap();
        let c = html.find("<tr data-index=\"2\">").unwrap();
        assert!(a < b && b < c);
        assert!(html.contains("data-sort-col=\"\""));
    }

    #[test]
    fn test_initial_view_hides_non_matching_rows() {
        let view = TableView::new()
            .with_search("learning")
            .with_filter(FIELD_AUTHORS, "Bob")
            .unwrap();
        let renderer = TableRenderer::new(RenderOptions { view, ..RenderOptions::default() });
        let html = renderer.render(&fixture());

        assert!(html.contains("<tr data-index=\"0\" hidden>"));
        assert!(html.contains("<tr data-index=\"1\" hidden>"));
        assert!(html.contains("<tr data-index=\"2\">"));
        assert!(html.contains("<span id=\"count\">1</span> / 3"));
        assert!(html.contains("value=\"learning\""));
        assert!(html.contains("data-filter=\"authors\" data-col=\"6\" placeholder=\"筛选作者\" value=\"Bob\""));
    }

    #[test]
    fn test_initial_sort_orders_rows() {
        let size = column_index(FIELD_SIZE_BYTES).unwrap();
        let view = TableView::new().with_sort(SortState::Descending(size));
        let renderer = TableRenderer::new(RenderOptions {
            view,
            source_dir: Some("/lib".to_string()),
            ..RenderOptions::default()
        });
        let html = renderer.render(&fixture());

        let c = html.find("<tr data-index=\"2\">").unwrap();
        let a = html.find("<tr data-index=\"0\">").unwrap();
        let b = html.find("<tr data-index=\"1\">").unwrap();
        assert!(c < a && a < b);
        assert!(html.contains(&format!("data-sort-col=\"{}\" data-sort-dir=\"desc\"", size)));
        assert!(html.contains("aria-sort=\"descending\">大小(字节)</th>"));
        assert!(html.contains("来源目录: /lib"));
    }

    #[test]
    fn test_script_refilters_on_every_keystroke() {
        let html = render(&fixture());
        assert!(html.contains("globalSearch.addEventListener('input', applyView)"));
        assert!(html.contains("input.addEventListener('input', applyView)"));
        assert!(html.contains("passGlobal && passColumns"));
        assert!(html.contains("filters.every("));
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(render(&fixture()), render(&fixture()));
    }
}
