// registry.rs - 文件状态注册表
// 记录上一轮扫描时每个文件的大小与修改时间，用于增量重扫：
// 只在进程内存中保存，不会写入磁盘

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::SystemTime;

use crate::models::ScanCandidate;

/// 文件状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileState {
    /// 文件大小（字节）
    pub size_bytes: u64,
    /// 最后修改时间
    pub modified: SystemTime,
}

impl FileState {
    pub fn of(candidate: &ScanCandidate) -> Self {
        Self {
            size_bytes: candidate.size_bytes,
            modified: candidate.modified,
        }
    }

    /// 比对规则：大小变化或修改时间不同都视为内容已变
    pub fn needs_rescan(&self, current: &FileState) -> bool {
        self.size_bytes != current.size_bytes || self.modified != current.modified
    }
}

/// 文件状态检查结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// 新文件
    New,
    /// 文件已修改
    Modified,
    /// 文件未变化
    Unchanged,
}

/// 一轮扫描相对上一轮的变化
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChangeSet {
    pub new: Vec<PathBuf>,
    pub modified: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
    pub unchanged: usize,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }

    /// 需要重新提取的文件数
    pub fn changed(&self) -> usize {
        self.new.len() + self.modified.len()
    }
}

/// 文件注册表
#[derive(Debug, Default, Clone)]
pub struct ScanRegistry {
    files: HashMap<PathBuf, FileState>,
    /// 是否已完成过至少一轮扫描
    primed: bool,
}

impl ScanRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check_file_status(&self, candidate: &ScanCandidate) -> FileStatus {
        match self.files.get(&candidate.path) {
            None => FileStatus::New,
            Some(previous) if previous.needs_rescan(&FileState::of(candidate)) => FileStatus::Modified,
            Some(_) => FileStatus::Unchanged,
        }
    }

    /// 用本轮候选列表替换注册表内容，返回相对上一轮的变化
    pub fn update(&mut self, candidates: &[ScanCandidate]) -> ChangeSet {
        let mut changes = ChangeSet::default();
        let mut current: HashMap<PathBuf, FileState> = HashMap::with_capacity(candidates.len());

        for candidate in candidates {
            match self.check_file_status(candidate) {
                FileStatus::New => changes.new.push(candidate.path.clone()),
                FileStatus::Modified => changes.modified.push(candidate.path.clone()),
                FileStatus::Unchanged => changes.unchanged += 1,
            }
            current.insert(candidate.path.clone(), FileState::of(candidate));
        }

        let seen: HashSet<&PathBuf> = current.keys().collect();
        let mut removed: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|path| !seen.contains(path))
            .cloned()
            .collect();
        removed.sort();
        changes.removed = removed;

        self.files = current;
        self.primed = true;
        changes
    }

    /// 是否已完成过至少一轮扫描
    pub fn is_primed(&self) -> bool {
        self.primed
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
