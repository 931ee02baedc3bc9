//! 结果行处理流程 - 流程层
//!
//! 核心职责：定义"一条结果行"的完整处理流程
//!
//! 流程顺序：
//! 1. 行规范化（修剪、去空、必填校验）
//! 2. 字段映射（context / testResult / itemResult*）
//! 3. 文档序列化

use csv::StringRecord;
use tracing::debug;

use crate::error::Result;
use crate::models::QtiResultDocument;
use crate::services::{
    DocumentBuilder, FieldMapper, RowNormalizer, TimestampService, ValidatedHeader,
};
use crate::workflow::row_ctx::RowCtx;

/// 结果行处理流程

/// - 编排单条结果行的完整转换流程
/// - 决定规范化、映射、序列化的先后
/// - 不持有任何 I/O 资源
/// - 只依赖业务能力（services）
pub struct RowFlow {
    normalizer: RowNormalizer,
    mapper: FieldMapper,
    builder: DocumentBuilder,
}

impl RowFlow {
    /// 创建新的结果行处理流程
    pub fn new(timestamps: TimestampService) -> Self {
        Self {
            normalizer: RowNormalizer::new(),
            mapper: FieldMapper::new(timestamps),
            builder: DocumentBuilder::new(),
        }
    }

    pub fn run(
        &self,
        ctx: &RowCtx,
        header: &ValidatedHeader,
        record: &StringRecord,
    ) -> Result<QtiResultDocument> {
        // ========== 流程 1: 行规范化 ==========
        let row = self.normalizer.normalize(header, record)?;
        debug!("{} ✓ 行规范化完成", ctx);

        // ========== 流程 2: 字段映射 ==========
        let context = self.mapper.map_context(&row)?;
        let test_result = self.mapper.map_test_result(&row)?;
        let item_results = self.mapper.map_item_results(&row, &header.slots)?;
        debug!("{} ✓ 字段映射完成，单题结果 {} 个", ctx, item_results.len());

        // ========== 流程 3: 文档序列化 ==========
        let result_id = row.require("resultId")?.to_string();
        let xml = self.builder.build(&context, &test_result, &item_results)?;
        debug!("{} ✓ 文档序列化完成（{} 字节）", ctx, xml.len());

        Ok(QtiResultDocument::new(result_id, xml))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::HeaderValidator;

    fn create_test_flow() -> RowFlow {
        RowFlow::new(TimestampService::new("Asia/Tokyo").unwrap())
    }

    fn create_test_header() -> (ValidatedHeader, Vec<&'static str>) {
        let columns = vec![
            "classId",
            "className",
            "traineeId",
            "account",
            "traineeName",
            "traineeKlassId",
            "matrerialId",
            "materialTitle",
            "materialType",
            "MaterialVersionNumber",
            "resultId",
            "status",
            "endAt",
            "id",
            "q1/title",
            "q1/correct",
            "q1/answer",
            "q1/score",
        ];
        let header = HeaderValidator::new()
            .validate(&StringRecord::from(columns.clone()))
            .unwrap();
        (header, columns)
    }

    #[test]
    fn test_full_row_produces_document() {
        let flow = create_test_flow();
        let (header, _) = create_test_header();
        let record = StringRecord::from(vec![
            "1",
            "Sample Class",
            "2",
            "sample.user@example.com",
            "Sample User",
            "3",
            "4",
            "Sample Test",
            "Challenge",
            "1.0",
            "200",
            "Completed",
            "2026/01/02 10:30:00",
            "999",
            "descriptive-question-1",
            "",
            "console.log('hello');",
            "1",
        ]);
        let document = flow
            .run(&RowCtx::new(1, 2), &header, &record)
            .unwrap();
        assert_eq!(document.result_id, "200");
        assert_eq!(document.file_name(), "assessmentResult-200.xml");
        assert!(document
            .xml
            .contains("<testResult identifier=\"999\" datestamp=\"2026-01-02T10:30:00+09:00\">"));
        assert!(document.xml.contains("sessionStatus=\"final\""));
    }

    #[test]
    fn test_missing_required_field_fails() {
        let flow = create_test_flow();
        let (header, columns) = create_test_header();
        let mut cells: Vec<&str> = columns.iter().map(|_| "x").collect();
        let end_at = columns.iter().position(|c| *c == "endAt").unwrap();
        cells[end_at] = "";
        let err = flow
            .run(&RowCtx::new(1, 2), &header, &StringRecord::from(cells))
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing required value: endAt");
    }

    #[test]
    fn test_ctx_display_format() {
        let ctx = RowCtx::new(3, 4);
        assert_eq!(ctx.to_string(), "[结果行#3 文件行#4]");
    }
}
