//! 行规范化服务 - 业务能力层
//!
//! 把一条 CSV 记录变成按列名取值的 ResultRow：
//! 修剪所有单元格，空结果折叠为缺失，再校验必需字段。

use std::collections::BTreeMap;

use csv::StringRecord;

use crate::error::Result;
use crate::models::ResultRow;
use crate::services::header_validator::ValidatedHeader;

/// 每行必须非空的字段，报错时按这个顺序取第一个缺失的
pub const REQUIRED_ROW_FIELDS: [&str; 4] = ["account", "id", "resultId", "endAt"];

/// 行规范化服务
pub struct RowNormalizer;

impl RowNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// 规范化一条记录
    ///
    /// 短行按缺失补齐，超出表头的单元格忽略，重名列保留最后一个值。
    pub fn normalize(&self, header: &ValidatedHeader, record: &StringRecord) -> Result<ResultRow> {
        let mut values: BTreeMap<String, Option<String>> = BTreeMap::new();
        for (index, column) in header.columns.iter().enumerate() {
            let trimmed = record.get(index).unwrap_or("").trim();
            let value = (!trimmed.is_empty()).then(|| trimmed.to_string());
            values.insert(column.clone(), value);
        }
        let row = ResultRow::new(values);

        for field in REQUIRED_ROW_FIELDS {
            row.require(field)?;
        }

        Ok(row)
    }
}

impl Default for RowNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_header(columns: &[&str]) -> ValidatedHeader {
        ValidatedHeader {
            columns: columns.iter().map(|s| s.to_string()).collect(),
            slots: Vec::new(),
        }
    }

    fn full_header() -> ValidatedHeader {
        create_test_header(&["account", "id", "resultId", "endAt", "note"])
    }

    #[test]
    fn test_cells_are_trimmed() {
        let normalizer = RowNormalizer::new();
        let record = StringRecord::from(vec![
            "  user@example.com ",
            "999",
            "200",
            "2026/01/02 10:30:00",
            " hello ",
        ]);
        let row = normalizer.normalize(&full_header(), &record).unwrap();
        assert_eq!(row.get("account"), Some("user@example.com"));
        assert_eq!(row.get("note"), Some("hello"));
    }

    #[test]
    fn test_whitespace_only_cell_becomes_absent() {
        let normalizer = RowNormalizer::new();
        let record =
            StringRecord::from(vec!["u", "999", "200", "2026/01/02 10:30:00", "   "]);
        let row = normalizer.normalize(&full_header(), &record).unwrap();
        assert_eq!(row.get("note"), None);
    }

    #[test]
    fn test_short_row_padded_with_absent() {
        let normalizer = RowNormalizer::new();
        let record = StringRecord::from(vec!["u", "999", "200", "2026/01/02 10:30:00"]);
        let row = normalizer.normalize(&full_header(), &record).unwrap();
        assert_eq!(row.get("note"), None);
    }

    #[test]
    fn test_extra_cells_ignored() {
        let normalizer = RowNormalizer::new();
        let record = StringRecord::from(vec![
            "u",
            "999",
            "200",
            "2026/01/02 10:30:00",
            "n",
            "spill",
        ]);
        let row = normalizer.normalize(&full_header(), &record).unwrap();
        assert_eq!(row.get("note"), Some("n"));
    }

    #[test]
    fn test_duplicate_column_keeps_last_value() {
        let normalizer = RowNormalizer::new();
        let header =
            create_test_header(&["account", "id", "resultId", "endAt", "note", "note"]);
        let record = StringRecord::from(vec![
            "u",
            "999",
            "200",
            "2026/01/02 10:30:00",
            "first",
            "second",
        ]);
        let row = normalizer.normalize(&header, &record).unwrap();
        assert_eq!(row.get("note"), Some("second"));
    }

    #[test]
    fn test_first_missing_required_field_is_reported() {
        let normalizer = RowNormalizer::new();
        let record = StringRecord::from(vec!["u", "", "", "2026/01/02 10:30:00", "n"]);
        let err = normalizer.normalize(&full_header(), &record).unwrap_err();
        assert_eq!(err.to_string(), "Missing required value: id");
    }
}
