//! 输出文档模型

/// 单个 QTI 3.0 Results Reporting XML 文档
///
/// 一行输入对应一个文档。`result_id` 原样取自该行的 resultId 列，
/// 多行共用同一个 resultId 时会产出多个同名文档，这里不做去重，
/// 写文件时由调用方自行处理同名覆盖。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QtiResultDocument {
    /// 结果标识符（resultId 列原值）
    pub result_id: String,
    /// 序列化后的完整 XML 文本
    pub xml: String,
}

impl QtiResultDocument {
    pub fn new(result_id: impl Into<String>, xml: impl Into<String>) -> Self {
        Self {
            result_id: result_id.into(),
            xml: xml.into(),
        }
    }

    /// 输出文件名，与 CLI 的落盘约定一致
    pub fn file_name(&self) -> String {
        format!("assessmentResult-{}.xml", self.result_id)
    }
}
