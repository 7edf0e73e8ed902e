// error.rs - 扫描流程的错误类型
//! 只有根目录不可读、输出文件写不出去、配置无效这几种情况会让一轮扫描失败；
//! 单个文件的问题都在提取阶段转成占位文本

use std::path::PathBuf;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("目录不存在或不是文件夹: {0:?}")]
    NotADirectory(PathBuf),

    #[error("无法读取目录 {path:?}: {source}")]
    ReadRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("无法写入输出文件 {path:?}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("无效的表格视图设置: {0}")]
    InvalidView(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type ScanResult<T> = Result<T, ScanError>;
