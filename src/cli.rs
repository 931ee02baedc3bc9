//! CLI 参数定义

use std::path::{Path, PathBuf};

use clap::Parser;

/// CLI arguments for tracklms-to-qti
#[derive(Parser, Debug)]
#[command(name = "tracklms-to-qti")]
#[command(
    version,
    about = "Convert Track LMS CSV exports into QTI 3.0 Results Reporting XML."
)]
pub struct Cli {
    /// Path to Track LMS CSV export, or '-' to read from stdin
    pub input: String,

    /// Output directory for XML files (default: next to the input file)
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Timezone for timestamps (default: Asia/Tokyo, or the configured one)
    #[arg(long, value_name = "TZ")]
    pub timezone: Option<String>,

    /// Path to a QTI item XML file used for rubric scoring (can be specified
    /// multiple times, requires --item-map)
    #[arg(long, value_name = "PATH")]
    pub item: Vec<PathBuf>,

    /// Directory containing QTI item XML files for rubric scoring (requires --item-map)
    #[arg(long, value_name = "DIR")]
    pub items_dir: Option<PathBuf>,

    /// CSV mapping file for result item identifiers to item identifiers
    #[arg(long, value_name = "PATH")]
    pub item_map: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 是否从标准输入读取
    pub fn reads_stdin(&self) -> bool {
        self.input == "-"
    }

    /// 解析输出目录
    ///
    /// 优先级：--out-dir、标准输入时的 <当前目录>/<默认目录名>、
    /// 输入文件所在目录下的 <默认目录名>。
    pub fn resolve_out_dir(&self, out_dirname: &str) -> PathBuf {
        if let Some(out_dir) = &self.out_dir {
            return out_dir.clone();
        }
        if self.reads_stdin() {
            return std::env::current_dir()
                .map(|cwd| cwd.join(out_dirname))
                .unwrap_or_else(|_| PathBuf::from(out_dirname));
        }
        let input_path = Path::new(&self.input);
        // 输入文件此前已读取成功，规范化一般不会失败，失败时按原路径算
        let resolved = input_path
            .canonicalize()
            .unwrap_or_else(|_| input_path.to_path_buf());
        match resolved.parent() {
            Some(parent) => parent.join(out_dirname),
            None => PathBuf::from(out_dirname),
        }
    }
}
