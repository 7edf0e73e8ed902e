// 配置模块 - 支持外部配置文件
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 默认配置文件路径
pub const CONFIG_FILE: &str = "./config.toml";

/// 配置加载错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("无法读取配置文件 {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误 {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("无法写入配置文件 {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ============== 配置结构体 ==============

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub walker: WalkerConfig,
    pub scan: ScanConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// 文献目录
    pub source_dir: String,
    /// 输出 HTML 文件
    pub output_path: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WalkerConfig {
    /// 是否启用 ripgrep 风格遍历
    pub use_ripgrep_walker: bool,
    /// 是否遵循 .gitignore 规则
    pub respect_gitignore: bool,
    /// 是否遵循 .ignore 文件规则
    pub respect_ignore: bool,
    /// 是否跳过隐藏文件
    pub skip_hidden: bool,
    /// 是否跟随符号链接
    pub follow_symlinks: bool,
    /// 最大遍历深度 (0 表示无限制)
    pub max_depth: usize,
    /// 自定义忽略模式
    pub custom_ignore_patterns: Vec<String>,
    /// 支持的文件扩展名
    pub supported_extensions: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// 轮询间隔（秒）
    pub interval_secs: u64,
    /// 是否持续监控（否则只扫描一次）
    pub watch: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// 页面标题
    pub page_title: String,
    /// 初始排序列，如 "year" 或 "year:desc"，空字符串表示保持原顺序
    pub initial_sort: String,
}

// ============== 默认配置 ==============

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_dir: "./literature".to_string(),
            output_path: "./output/literature_table.html".to_string(),
        }
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            use_ripgrep_walker: true,
            respect_gitignore: true,
            respect_ignore: true,
            skip_hidden: true,
            follow_symlinks: false,
            max_depth: 0,
            custom_ignore_patterns: vec![
                "*.tmp".to_string(),
                "~$*".to_string(),
                ".git".to_string(),
                "node_modules".to_string(),
            ],
            supported_extensions: ["pdf", "bib", "txt", "md", "doc", "docx"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            watch: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_title: "文献动态表格".to_string(),
            initial_sort: String::new(),
        }
    }
}

// ============== 配置加载 ==============

impl AppConfig {
    /// 从默认位置加载，文件不存在则使用默认配置
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_or_default(CONFIG_FILE)
    }

    /// 文件不存在时回退到默认配置；文件存在但格式错误时报错
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(" [Config] 配置文件 {:?} 不存在，使用默认配置", path);
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// 从指定文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(" [Config] 配置已加载: {:?}", path);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 生成默认配置文件
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let default_content = include_str!("../config.toml");
        fs::write(path, default_content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl WalkerConfig {
    /// 扩展名是否在支持列表中（不区分大小写）
    pub fn is_supported_extension(&self, ext: &str) -> bool {
        self.supported_extensions
            .iter()
            .any(|s| s.eq_ignore_ascii_case(ext))
    }
}
