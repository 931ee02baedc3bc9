use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::ConversionError;
use crate::infrastructure::OutputWriter;
use crate::models::{collect_item_sources, load_item_mapping, RubricInputs};
use crate::orchestrator::{ConvertOptions, Converter};

/// 应用主结构
pub struct App {
    config: Config,
    cli: Cli,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config, cli: Cli) -> Result<Self> {
        log_startup(&config, &cli);
        Ok(Self { config, cli })
    }

    /// 运行应用主逻辑
    pub fn run(&self) -> Result<()> {
        // 读取输入
        let csv_text = read_input(&self.cli)?;

        // 装载评分素材
        let rubric = load_rubric_inputs(&self.cli)?;

        // 转换
        let timezone = self
            .cli
            .timezone
            .clone()
            .unwrap_or_else(|| self.config.timezone.clone());
        let options = ConvertOptions { timezone, rubric };
        let converter = Converter::new(&options)?;
        let documents = converter.convert(&csv_text)?;

        // 落盘
        let out_dir = self.cli.resolve_out_dir(&self.config.out_dirname);
        let written = OutputWriter::new(&out_dir).write_documents(&documents)?;

        // 输出最终统计
        print_final_stats(written.len(), &out_dir);

        Ok(())
    }
}

/// 读取 CSV 输入，'-' 表示标准输入
fn read_input(cli: &Cli) -> Result<String> {
    if cli.reads_stdin() {
        info!("📥 正在从标准输入读取 CSV...");
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("无法读取标准输入")?;
        Ok(text)
    } else {
        info!("📥 正在读取 CSV: {}", cli.input);
        fs::read_to_string(&cli.input).with_context(|| format!("无法读取输入文件: {}", cli.input))
    }
}

/// 装载评分素材输入
///
/// 题目文件与目录先合并装载，映射文件其后；只给映射不给题目是错误。
fn load_rubric_inputs(cli: &Cli) -> Result<Option<RubricInputs>> {
    let item_sources = collect_item_sources(&cli.item, cli.items_dir.as_deref())?;
    let item_mapping = match &cli.item_map {
        Some(path) => Some(load_item_mapping(path)?),
        None => None,
    };
    match (item_sources, item_mapping) {
        (None, Some(_)) => Err(ConversionError::ItemMapWithoutSources.into()),
        (None, None) => Ok(None),
        (Some(sources), mapping) => Ok(Some(RubricInputs::new(sources, mapping))),
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config, cli: &Cli) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - Track LMS 结果转换模式");
    info!(
        "📊 时区: {}",
        cli.timezone.as_deref().unwrap_or(&config.timezone)
    );
    info!("{}", "=".repeat(60));
}

fn print_final_stats(count: usize, out_dir: &Path) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部转换完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已写出 {} 份 QTI 结果文档", count);
    info!("📁 输出目录: {}", out_dir.display());
    info!("{}", "=".repeat(60));
}
