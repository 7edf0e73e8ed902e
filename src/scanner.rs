// scanner.rs - 文献目录遍历
// 两种遍历方式：ignore（ripgrep 风格，遵循 .gitignore）或 walkdir。
// 输出按文件名（不区分大小写）排序的候选列表

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use ignore::WalkBuilder;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::WalkerConfig;
use crate::error::{ScanError, ScanResult};
use crate::models::ScanCandidate;

pub struct Scanner {
    config: WalkerConfig,
    excludes: Vec<Pattern>,
}

impl Scanner {
    pub fn new(config: WalkerConfig) -> Self {
        let excludes = config
            .custom_ignore_patterns
            .iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!("忽略无效的忽略模式 {:?}: {}", p, e);
                    None
                }
            })
            .collect();
        Self { config, excludes }
    }

    /// 遍历根目录，返回所有支持的文件
    pub fn scan(&self, root: &Path) -> ScanResult<Vec<ScanCandidate>> {
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }
        fs::read_dir(root).map_err(|source| ScanError::ReadRoot {
            path: root.to_path_buf(),
            source,
        })?;

        let paths = if self.config.use_ripgrep_walker {
            self.walk_with_ignore(root)
        } else {
            self.walk_with_walkdir(root)
        };

        let mut candidates: Vec<ScanCandidate> = paths
            .into_iter()
            .filter(|path| self.accepts(root, path))
            .filter_map(|path| match ScanCandidate::from_path(&path) {
                Ok(candidate) => Some(candidate),
                Err(e) => {
                    warn!("无法读取文件元数据 {:?}: {}", path, e);
                    None
                }
            })
            .collect();

        candidates.sort_by(|a, b| {
            a.filename()
                .to_lowercase()
                .cmp(&b.filename().to_lowercase())
                .then_with(|| a.path.cmp(&b.path))
        });
        candidates.dedup_by(|a, b| a.path == b.path);

        debug!("在 {:?} 中发现 {} 个文献文件", root, candidates.len());
        Ok(candidates)
    }

    fn max_depth(&self) -> Option<usize> {
        (self.config.max_depth > 0).then_some(self.config.max_depth)
    }

    fn walk_with_ignore(&self, root: &Path) -> Vec<PathBuf> {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(self.config.skip_hidden)
            .git_ignore(self.config.respect_gitignore)
            .git_global(self.config.respect_gitignore)
            .git_exclude(self.config.respect_gitignore)
            .require_git(false)
            .ignore(self.config.respect_ignore)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.max_depth());

        builder
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("遍历出错: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .map(|entry| entry.into_path())
            .collect()
    }

    fn walk_with_walkdir(&self, root: &Path) -> Vec<PathBuf> {
        let mut walker = WalkDir::new(root).follow_links(self.config.follow_symlinks);
        if let Some(depth) = self.max_depth() {
            walker = walker.max_depth(depth);
        }
        let skip_hidden = self.config.skip_hidden;

        walker
            .into_iter()
            .filter_entry(|entry| !(skip_hidden && entry.depth() > 0 && is_hidden(entry.file_name())))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("遍历出错: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect()
    }

    /// 扩展名过滤 + 自定义忽略模式
    fn accepts(&self, root: &Path, path: &Path) -> bool {
        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.config.is_supported_extension(ext));
        supported && !self.is_excluded(root, path)
    }

    fn is_excluded(&self, root: &Path, path: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.excludes.iter().any(|pattern| {
            pattern.matches_path(relative)
                || relative
                    .components()
                    .any(|c| pattern.matches(&c.as_os_str().to_string_lossy()))
        })
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
