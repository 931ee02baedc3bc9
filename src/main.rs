use anyhow::Result;
use clap::Parser;

use tracklms_to_qti::logger;
use tracklms_to_qti::{App, Cli, Config};

fn main() -> Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load();

    // 初始化日志
    logger::init(cli.verbose || config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config, cli)?.run()?;

    Ok(())
}
