// orchestrator.rs - 扫描流程编排
// 遍历 -> 提取 -> 汇总 -> 渲染 -> 写出。每一轮都是同步、阻塞的；
// 监控模式按固定间隔重复，只有文件发生变化时才重新生成页面

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::aggregator::RecordAggregator;
use crate::config::AppConfig;
use crate::error::{ScanError, ScanResult};
use crate::extract::FieldExtractor;
use crate::models::LiteratureRecord;
use crate::registry::{ChangeSet, ScanRegistry};
use crate::render::{RenderOptions, SortState, TableRenderer, TableView};
use crate::scanner::Scanner;

/// 一轮扫描的结果
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// 本轮的文献总数
    pub total: usize,
    /// 相对上一轮的变化
    pub changes: ChangeSet,
    /// 是否重新写出了页面
    pub written: bool,
    pub output_path: PathBuf,
}

pub struct Orchestrator {
    source_dir: PathBuf,
    output_path: PathBuf,
    scanner: Scanner,
    extractor: FieldExtractor,
    renderer: TableRenderer,
    registry: ScanRegistry,
    /// 上一轮的记录，未变化的文件直接复用
    previous: RecordAggregator,
}

impl Orchestrator {
    /// 使用配置中的初始排序；`view` 中已设置排序时以 `view` 为准
    pub fn new(config: &AppConfig, view: TableView) -> ScanResult<Self> {
        let source_dir = PathBuf::from(&config.paths.source_dir);
        let output_path = PathBuf::from(&config.paths.output_path);

        let view = if view.sort == SortState::Unsorted {
            let sort = SortState::parse(&config.display.initial_sort)?;
            view.with_sort(sort)
        } else {
            view
        };

        let source_display = source_dir
            .canonicalize()
            .unwrap_or_else(|_| source_dir.clone())
            .to_string_lossy()
            .to_string();
        let renderer = TableRenderer::new(RenderOptions {
            page_title: config.display.page_title.clone(),
            source_dir: Some(source_display),
            view,
        });

        Ok(Self {
            source_dir,
            output_path,
            scanner: Scanner::new(config.walker.clone()),
            extractor: FieldExtractor::new(),
            renderer,
            registry: ScanRegistry::new(),
            previous: RecordAggregator::new(),
        })
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// 最近一轮生成的记录
    pub fn records(&self) -> &[LiteratureRecord] {
        self.previous.all()
    }

    /// 执行一轮扫描。首轮总会写出页面；之后只在有变化或输出文件丢失时写出
    pub fn scan_pass(&mut self) -> ScanResult<ScanReport> {
        let candidates = self.scanner.scan(&self.source_dir)?;
        let first_pass = !self.registry.is_primed();
        let changes = self.registry.update(&candidates);

        if !first_pass && changes.is_empty() && self.output_path.exists() {
            info!(" [扫描] 无变化 ({} 篇)", candidates.len());
            return Ok(ScanReport {
                total: candidates.len(),
                changes,
                written: false,
                output_path: self.output_path.clone(),
            });
        }

        let changed: HashSet<&PathBuf> = changes.new.iter().chain(changes.modified.iter()).collect();
        let mut aggregator = RecordAggregator::new();
        for candidate in &candidates {
            let reused = if changed.contains(&candidate.path) {
                None
            } else {
                self.previous.get(&candidate.path_string()).cloned()
            };
            let record = match reused {
                Some(record) => record,
                None => self.extractor.extract_from_disk(candidate),
            };
            aggregator.add(record);
        }
        debug!(
            " [扫描] 新增 {} / 修改 {} / 删除 {} / 未变 {}",
            changes.new.len(),
            changes.modified.len(),
            changes.removed.len(),
            changes.unchanged
        );

        let html = self.renderer.render(aggregator.all());
        write_output(&self.output_path, &html)?;
        info!(" [扫描] 已更新表格，文献数: {} -> {:?}", aggregator.len(), self.output_path);

        let total = aggregator.len();
        self.previous = aggregator;
        Ok(ScanReport {
            total,
            changes,
            written: true,
            output_path: self.output_path.clone(),
        })
    }

    /// 按固定间隔循环扫描，直到遇到致命错误（或进程被中断）
    pub fn watch(&mut self, interval: Duration) -> ScanResult<()> {
        info!(" [监控] 开始监控目录: {:?}，间隔 {:?}", self.source_dir, interval);
        loop {
            if let Err(e) = self.scan_pass() {
                error!(" [监控] 扫描失败: {}", e);
                return Err(e);
            }
            thread::sleep(interval);
        }
    }
}

/// 单次扫描：按配置生成一次页面
pub fn scan_once(config: &AppConfig, view: TableView) -> ScanResult<ScanReport> {
    Orchestrator::new(config, view)?.scan_pass()
}

/// 整体覆盖写出文件，必要时创建父目录
fn write_output(path: &Path, html: &str) -> ScanResult<()> {
    let to_error = |source| ScanError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, html).map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNKNOWN;
    use std::time::SystemTime;

    fn config_for(root: &Path, output: &Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.paths.source_dir = root.to_string_lossy().to_string();
        config.paths.output_path = output.to_string_lossy().to_string();
        config
    }

    fn touch_later(path: &Path, content: &str) {
        fs::write(path, content).unwrap();
        // 保证修改时间与上一轮不同
        let later = SystemTime::now() + Duration::from_secs(5);
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(later).unwrap();
    }

    #[test]
    fn test_scan_pass_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("library");
        fs::create_dir_all(&root).unwrap();
        fs::write(
            root.join("sample.md"),
            "研究目的：验证\n关键词：测试\n研究方法：脚本\n主要结果与结论：可行\n创新点与不足：简单\n",
        )
        .unwrap();
        fs::write(root.join("refs.bib"), "@article{x, title={A}, author={B}, year={2020}}").unwrap();
        fs::write(root.join("paper.pdf"), b"%PDF-1.4").unwrap();

        let output = dir.path().join("out").join("table.html");
        let report = scan_once(&config_for(&root, &output), TableView::new()).unwrap();

        assert_eq!(report.total, 3);
        assert!(report.written);
        let html = fs::read_to_string(&output).unwrap();
        assert!(html.contains("文献动态表格"));
        assert!(html.contains("研究方法概述"));
        assert!(html.contains(">脚本</td>"));
        assert_eq!(html.matches("<tr data-index=").count(), 3);
    }

    #[test]
    fn test_rescan_skips_unchanged_and_replaces_modified() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("library");
        fs::create_dir_all(&root).unwrap();
        let note = root.join("note.txt");
        fs::write(&note, "关键词\n旧内容").unwrap();
        fs::write(root.join("other.md"), "方法\n实验").unwrap();

        let output = dir.path().join("table.html");
        let mut orchestrator = Orchestrator::new(&config_for(&root, &output), TableView::new()).unwrap();

        let first = orchestrator.scan_pass().unwrap();
        assert!(first.written);
        assert_eq!(first.total, 2);
        let before: Vec<LiteratureRecord> = orchestrator.records().to_vec();

        let second = orchestrator.scan_pass().unwrap();
        assert!(!second.written);
        assert!(second.changes.is_empty());
        assert_eq!(orchestrator.records(), before.as_slice());

        touch_later(&note, "关键词\n新内容");
        let third = orchestrator.scan_pass().unwrap();
        assert!(third.written);
        assert_eq!(third.changes.modified.len(), 1);
        assert_eq!(third.total, 2);
        assert_eq!(orchestrator.records().len(), 2);
        let keywords: Vec<&str> = orchestrator.records().iter().map(|r| r.keywords.as_str()).collect();
        assert!(keywords.contains(&"新内容"));
        assert!(!keywords.contains(&"旧内容"));
    }

    #[test]
    fn test_removed_file_drops_row_and_missing_output_is_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("library");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("a.txt"), "x").unwrap();
        fs::write(root.join("b.txt"), "y").unwrap();

        let output = dir.path().join("table.html");
        let mut orchestrator = Orchestrator::new(&config_for(&root, &output), TableView::new()).unwrap();
        orchestrator.scan_pass().unwrap();

        fs::remove_file(root.join("b.txt")).unwrap();
        let report = orchestrator.scan_pass().unwrap();
        assert_eq!(report.changes.removed.len(), 1);
        assert_eq!(report.total, 1);
        assert_eq!(orchestrator.records()[0].purpose, UNKNOWN);

        fs::remove_file(&output).unwrap();
        let report = orchestrator.scan_pass().unwrap();
        assert!(report.written);
        assert!(output.exists());
    }

    #[test]
    fn test_missing_source_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("absent"), &dir.path().join("t.html"));
        let result = scan_once(&config, TableView::new());
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn test_invalid_initial_sort_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for(dir.path(), &dir.path().join("t.html"));
        config.display.initial_sort = "nope:desc".to_string();
        assert!(matches!(
            Orchestrator::new(&config, TableView::new()),
            Err(ScanError::InvalidView(_))
        ));
    }
}
