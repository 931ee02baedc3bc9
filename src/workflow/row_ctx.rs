//! 结果行处理上下文
//!
//! 封装"我正在处理第几条结果、它在文件里第几行"这一信息

use std::fmt::Display;

/// 结果行处理上下文
///
/// 包含处理单条结果行所需的所有上下文信息
#[derive(Debug, Clone)]
pub struct RowCtx {
    /// 数据行序号（从1开始，不含表头）
    pub row_index: usize,

    /// CSV 物理行号（仅用于日志显示，读不到时为0）
    pub line: u64,
}

impl RowCtx {
    /// 创建新的结果行上下文
    pub fn new(row_index: usize, line: u64) -> Self {
        Self { row_index, line }
    }
}

impl Display for RowCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[结果行#{} 文件行#{}]", self.row_index, self.line)
    }
}
