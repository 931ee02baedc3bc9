//! 表头校验服务 - 业务能力层
//!
//! 只看第一行：去 BOM、确认必需列齐全、发现题目槽位。
//! 校验结果供后面每一行复用。

use std::collections::BTreeSet;

use csv::StringRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{ConversionError, Result};

/// 必需列，大小写敏感
///
/// matrerialId 与 MaterialVersionNumber 沿用导出端的历史拼写，不要修正。
pub const REQUIRED_HEADERS: [&str; 14] = [
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
];

/// 题目槽位列名模式：q + 数字 + / + 四个固定字段之一
static SLOT_COLUMN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^q(\d+)/(?:title|correct|answer|score)$").unwrap());

/// 校验通过的表头
#[derive(Debug, Clone)]
pub struct ValidatedHeader {
    /// 各列原名，首列已去 BOM，其余不做任何修剪
    pub columns: Vec<String>,
    /// 发现的槽位序号，升序去重
    pub slots: Vec<u32>,
}

/// 表头校验服务
pub struct HeaderValidator;

impl HeaderValidator {
    pub fn new() -> Self {
        Self
    }

    /// 校验表头行
    pub fn validate(&self, header: &StringRecord) -> Result<ValidatedHeader> {
        let mut columns: Vec<String> = header.iter().map(String::from).collect();
        if let Some(first) = columns.first_mut() {
            *first = first.trim_start_matches('\u{feff}').to_string();
        }
        if columns.is_empty() {
            return Err(ConversionError::MissingHeader);
        }

        let missing: Vec<&str> = REQUIRED_HEADERS
            .into_iter()
            .filter(|name| !columns.iter().any(|column| column.as_str() == *name))
            .collect();
        if !missing.is_empty() {
            return Err(ConversionError::MissingColumns {
                columns: missing.join(", "),
            });
        }

        let mut slots: BTreeSet<u32> = BTreeSet::new();
        for column in &columns {
            if let Some(caps) = SLOT_COLUMN_RE.captures(column) {
                if let Some(index) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
                    slots.insert(index);
                }
            }
        }
        let slots: Vec<u32> = slots.into_iter().collect();
        debug!(
            "表头校验通过，共 {} 列，发现 {} 个题目槽位",
            columns.len(),
            slots.len()
        );

        Ok(ValidatedHeader { columns, slots })
    }
}

impl Default for HeaderValidator {
    fn default() -> Self {
        Self::new()
    }
}
