//! 批量转换器 - 编排层
//!
//! ## 职责
//!
//! 本模块是转换库的入口，负责一次完整的 CSV 到 QTI 批转换。
//!
//! ## 核心功能
//!
//! 1. **选项解析**：时区名在这里一次性解析成 `TimestampService`
//! 2. **表头校验**：首行交给 `HeaderValidator`，结果供全部数据行复用
//! 3. **逐行委托**：每条数据行交给 `workflow::RowFlow` 处理
//! 4. **整体语义**：文档顺序与数据行顺序一致，任意一行失败整体失败
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单行转换的细节
//! - **无 I/O**：输入输出都是内存中的字符串，读写文件归应用层
//! - **向下委托**：orchestrator → workflow → services → models

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::config;
use crate::error::{ConversionError, Result};
use crate::models::{QtiResultDocument, RubricInputs};
use crate::services::{HeaderValidator, TimestampService};
use crate::workflow::{RowCtx, RowFlow};

/// 转换选项
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// IANA 时区名，时间戳本地化用
    pub timezone: String,

    /// 评分素材输入，随转换器透传给后续评分环节
    pub rubric: Option<RubricInputs>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            timezone: config::DEFAULT_TIMEZONE.to_string(),
            rubric: None,
        }
    }
}

/// 批量转换器
pub struct Converter {
    flow: RowFlow,
    rubric: Option<RubricInputs>,
}

impl Converter {
    /// 创建新的批量转换器
    pub fn new(options: &ConvertOptions) -> Result<Self> {
        let timestamps = TimestampService::new(&options.timezone)?;
        Ok(Self {
            flow: RowFlow::new(timestamps),
            rubric: options.rubric.clone(),
        })
    }

    /// 本次转换携带的评分素材输入
    pub fn rubric(&self) -> Option<&RubricInputs> {
        self.rubric.as_ref()
    }

    /// 把一段 CSV 文本整体转换成 QTI 结果文档列表
    pub fn convert(&self, csv_text: &str) -> Result<Vec<QtiResultDocument>> {
        if csv_text.trim().is_empty() {
            return Err(ConversionError::EmptyInput);
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_text.as_bytes());

        let header_record = reader.headers()?.clone();
        let header = HeaderValidator::new().validate(&header_record)?;
        debug!(
            "✓ 表头校验通过，共 {} 列，题目槽位 {} 个",
            header.columns.len(),
            header.slots.len()
        );

        let mut documents = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let line = record.position().map_or(0, |position| position.line());
            let ctx = RowCtx::new(index + 1, line);
            documents.push(self.flow.run(&ctx, &header, &record)?);
        }

        info!("✓ 转换完成，共 {} 份文档", documents.len());
        Ok(documents)
    }
}

/// 一步到位的便捷入口：建转换器、转换、返回文档列表
pub fn convert_csv_text(
    csv_text: &str,
    options: &ConvertOptions,
) -> Result<Vec<QtiResultDocument>> {
    Converter::new(options)?.convert(csv_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER_LINE: &str = "classId,className,traineeId,account,traineeName,traineeKlassId,\
        matrerialId,materialTitle,materialType,MaterialVersionNumber,resultId,status,endAt,id";

    fn data_line(result_id: &str) -> String {
        format!(
            "1,Sample Class,2,sample.user@example.com,Sample User,3,4,Sample Test,Challenge,1.0,\
             {},Completed,2026/01/02 10:30:00,999",
            result_id
        )
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = convert_csv_text("", &ConvertOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "CSV input is empty.");

        let err = convert_csv_text("  \n \n", &ConvertOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "CSV input is empty.");
    }

    #[test]
    fn test_missing_columns_are_reported() {
        let err = convert_csv_text("classId,endAt\n1,2026/01/02 10:30:00\n", &ConvertOptions::default())
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Missing required columns: className"));
    }

    #[test]
    fn test_documents_follow_row_order() {
        let csv_text = format!("{}\n{}\n{}\n", HEADER_LINE, data_line("200"), data_line("201"));
        let documents = convert_csv_text(&csv_text, &ConvertOptions::default()).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].result_id, "200");
        assert_eq!(documents[1].result_id, "201");
    }

    #[test]
    fn test_duplicate_result_ids_pass_through() {
        let csv_text = format!("{}\n{}\n{}\n", HEADER_LINE, data_line("200"), data_line("200"));
        let documents = convert_csv_text(&csv_text, &ConvertOptions::default()).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].file_name(), documents[1].file_name());
    }

    #[test]
    fn test_unresolvable_timezone_falls_back_to_utc() {
        let options = ConvertOptions {
            timezone: "Not/AZone".to_string(),
            rubric: None,
        };
        let csv_text = format!("{}\n{}\n", HEADER_LINE, data_line("200"));
        let documents = convert_csv_text(&csv_text, &options).unwrap();
        assert!(documents[0].xml.contains("2026-01-02T10:30:00+00:00"));
    }

    #[test]
    fn test_converter_carries_rubric_inputs() {
        let options = ConvertOptions {
            timezone: config::DEFAULT_TIMEZONE.to_string(),
            rubric: Some(RubricInputs::new(
                vec!["<assessmentItem/>".to_string()],
                None,
            )),
        };
        let converter = Converter::new(&options).unwrap();
        let rubric = converter.rubric().unwrap();
        assert_eq!(rubric.item_source_xmls.len(), 1);
    }
}
