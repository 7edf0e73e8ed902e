// main.rs
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use literature_table::config::{AppConfig, CONFIG_FILE};
use literature_table::{Orchestrator, SortState, TableView};

const DEFAULT_LOG_FILTER: &str = "literature_table=info";

/// 监控文献目录并生成动态交互表格
#[derive(Parser, Debug)]
#[command(name = "literature-table", version)]
struct Args {
    /// 文献文件夹路径（缺省时使用配置文件中的 source_dir）
    source_dir: Option<PathBuf>,

    /// 输出 HTML 文件
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// 持续监控目录
    #[arg(short, long)]
    watch: bool,

    /// 轮询间隔（秒）
    #[arg(long)]
    interval: Option<u64>,

    /// 扫描后把记录以 JSON 输出到标准输出（仅单次扫描）
    #[arg(long, conflicts_with = "watch")]
    json: bool,

    /// 页面初始的全局搜索词
    #[arg(long)]
    search: Option<String>,

    /// 页面初始的列筛选，可重复，如 --filter authors=Smith
    #[arg(long = "filter", value_name = "KEY=TEXT")]
    filters: Vec<String>,

    /// 页面初始排序，如 year 或 year:desc
    #[arg(long)]
    sort: Option<String>,

    /// 在配置文件路径生成默认配置后退出
    #[arg(long)]
    init_config: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("literature_table=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.init_config {
        AppConfig::generate_default_config(&args.config)?;
        println!("已生成默认配置: {}", args.config.display());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&args.config)?;
    if let Some(source_dir) = &args.source_dir {
        config.paths.source_dir = source_dir.to_string_lossy().to_string();
    }
    if let Some(output) = &args.output {
        config.paths.output_path = output.to_string_lossy().to_string();
    }
    if let Some(interval) = args.interval {
        config.scan.interval_secs = interval;
    }
    config.scan.watch |= args.watch;
    if config.scan.watch && args.json {
        bail!("--json 只能用于单次扫描，配置中已开启 watch");
    }

    let mut view = TableView::new().with_search(args.search.clone().unwrap_or_default());
    for spec in &args.filters {
        view = view.with_filter_spec(spec)?;
    }
    if let Some(sort) = &args.sort {
        view = view.with_sort(SortState::parse(sort)?);
    }

    let mut orchestrator = Orchestrator::new(&config, view)?;
    info!(" [启动] 文献目录: {}", config.paths.source_dir);
    info!(" [启动] 输出文件: {:?}", orchestrator.output_path());

    if config.scan.watch {
        let interval = Duration::from_secs(config.scan.interval_secs.max(1));
        orchestrator.watch(interval)?;
        return Ok(());
    }

    let report = orchestrator.scan_pass()?;
    println!(
        "手动扫描完成，文献数: {}，输出: {}",
        report.total,
        report.output_path.display()
    );

    if args.json {
        let json = serde_json::to_string_pretty(orchestrator.records())
            .context("无法序列化记录")?;
        println!("{}", json);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_conflicts_with_watch() {
        assert!(Args::try_parse_from(["literature-table", "--json", "--watch"]).is_err());
        let args = Args::try_parse_from(["literature-table", "--json", "./papers"]).unwrap();
        assert!(args.json && !args.watch);
    }

    #[test]
    fn test_repeated_filters_are_collected() {
        let args =
            Args::try_parse_from(["literature-table", "--filter", "year=2020", "--filter", "authors=Bob"])
                .unwrap();
        assert_eq!(args.filters, vec!["year=2020", "authors=Bob"]);
    }
}
