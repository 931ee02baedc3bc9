//! 日志初始化
//!
//! 全局只初始化一次，测试里重复调用不会 panic。

use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅器
///
/// 过滤级别优先读 RUST_LOG 环境变量，未设置时普通模式用 info，
/// 详细模式（--verbose）用 debug。
pub fn init(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
