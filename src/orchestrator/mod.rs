//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责整批 CSV 的转换调度，是转换库的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `converter` - 批量转换器
//! - 解析转换选项（时区、评分素材）
//! - 校验表头并复用校验结果
//! - 逐行委托 workflow 转换
//! - 汇总输出文档列表
//!
//! ## 层次关系
//!
//! ```text
//! converter (处理整段 CSV 文本)
//!     ↓
//! workflow::RowFlow (处理单条结果行)
//!     ↓
//! services (能力层：校验 / 规范化 / 映射 / 序列化)
//!     ↓
//! models (数据模型：行 / 槽位 / 结果块 / 文档)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：converter 管整批，RowFlow 管单行
//! 2. **无 I/O**：本层只做内存转换，读写文件归应用层
//! 3. **向下依赖**：编排层 → workflow → services → models
//! 4. **无业务逻辑**：只做调度和汇总，不做具体字段判断

pub mod converter;

// 重新导出主要类型
pub use converter::{convert_csv_text, ConvertOptions, Converter};
