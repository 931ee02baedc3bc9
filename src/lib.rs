//! # Track LMS to QTI
//!
//! 把 Track LMS 的 CSV 成绩导出转换成 QTI 3.0 Results Reporting XML 的 Rust 库与命令行工具
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有输出目录资源，只暴露能力
//! - `OutputWriter` - 唯一写文件的模块，提供 write_documents() 能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个表头 / 行 / 槽位
//! - `HeaderValidator` - 表头校验与槽位发现能力
//! - `RowNormalizer` - 行修剪与必填校验能力
//! - `FieldMapper` - 行到结果块的映射能力
//! - `DocumentBuilder` - 结果块到 XML 的序列化能力
//! - `TimestampService` - 时间戳本地化能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一条结果行"的完整处理流程
//! - `RowCtx` - 上下文封装（row_index + line）
//! - `RowFlow` - 流程编排（normalize → map → build）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/converter` - 批量转换器，管理选项与表头复用
//!
//! 应用壳（`cli` / `config` / `app`）在库之外包一层 I/O：
//! 读输入、装载评分素材、落盘输出。

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use cli::Cli;
pub use config::Config;
pub use error::{ConversionError, Result};
pub use infrastructure::OutputWriter;
pub use models::{QtiResultDocument, RubricInputs};
pub use orchestrator::{convert_csv_text, ConvertOptions, Converter};
pub use workflow::{RowCtx, RowFlow};
