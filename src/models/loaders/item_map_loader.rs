//! 评分映射 CSV 装载器
//!
//! 映射文件固定两列：resultItemIdentifier,itemIdentifier。
//! 双向都不允许重复，空表（只有表头）视为错误。

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use anyhow::Context;
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{ConversionError, Result};

/// 映射 CSV 的固定表头
const ITEM_MAP_HEADER: [&str; 2] = ["resultItemIdentifier", "itemIdentifier"];

/// 从文件装载映射
///
/// 文件不存在属于转换错误（消息固定），读取失败属于 I/O 错误，
/// 由调用方的 anyhow 链路对外报告。
pub fn load_item_mapping(path: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    if !path.is_file() {
        return Err(ConversionError::ItemMapNotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("无法读取映射文件: {}", path.display()))?;
    let mapping = parse_item_mapping_csv_text(&text)?;
    debug!("映射文件 {} 共 {} 条", path.display(), mapping.len());
    Ok(mapping)
}

/// 解析映射 CSV 文本
pub fn parse_item_mapping_csv_text(text: &str) -> Result<BTreeMap<String, String>> {
    if text.trim().is_empty() {
        return Err(ConversionError::ItemMapEmpty);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record?,
        // 非空文本至少产出一条记录，保留兜底分支
        None => return Err(ConversionError::ItemMapHeaderMissing),
    };

    let mut cells: Vec<String> = header.iter().map(|cell| cell.trim().to_string()).collect();
    if let Some(first) = cells.first_mut() {
        *first = first.trim_start_matches('\u{feff}').to_string();
    }
    let header_matches =
        cells.len() == 2 && cells[0] == ITEM_MAP_HEADER[0] && cells[1] == ITEM_MAP_HEADER[1];
    if !header_matches {
        return Err(ConversionError::ItemMapHeaderMismatch);
    }

    let mut mapping: BTreeMap<String, String> = BTreeMap::new();
    let mut item_ids: BTreeSet<String> = BTreeSet::new();

    for record in records {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());

        if record.is_empty() {
            return Err(ConversionError::ItemMapRowEmpty { line });
        }
        if record.len() < 2 {
            return Err(ConversionError::ItemMapRowMissingFields { line });
        }
        if record.len() > 2 && record.iter().skip(2).any(|cell| !cell.trim().is_empty()) {
            return Err(ConversionError::ItemMapRowExtraColumns { line });
        }

        let result_id = record.get(0).unwrap_or("").trim();
        let item_id = record.get(1).unwrap_or("").trim();
        if result_id.is_empty() || item_id.is_empty() {
            return Err(ConversionError::ItemMapRowMissingIdentifiers { line });
        }
        if mapping.contains_key(result_id) {
            return Err(ConversionError::DuplicateResultItemIdentifier {
                identifier: result_id.to_string(),
            });
        }
        if item_ids.contains(item_id) {
            return Err(ConversionError::DuplicateItemIdentifier {
                identifier: item_id.to_string(),
            });
        }
        mapping.insert(result_id.to_string(), item_id.to_string());
        item_ids.insert(item_id.to_string());
    }

    if mapping.is_empty() {
        return Err(ConversionError::ItemMapNoEntries);
    }

    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_mapping() {
        let text = "resultItemIdentifier,itemIdentifier\nQ1,item-001\nQ2,item-002\n";
        let mapping = parse_item_mapping_csv_text(text).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("Q1").map(String::as_str), Some("item-001"));
        assert_eq!(mapping.get("Q2").map(String::as_str), Some("item-002"));
    }

    #[test]
    fn test_parse_strips_bom_from_header() {
        let text = "\u{feff}resultItemIdentifier,itemIdentifier\nQ1,item-001\n";
        let mapping = parse_item_mapping_csv_text(text).unwrap();
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let err = parse_item_mapping_csv_text("   \n  ").unwrap_err();
        assert_eq!(err.to_string(), "Item mapping CSV is empty.");
    }

    #[test]
    fn test_wrong_header_is_rejected() {
        let err = parse_item_mapping_csv_text("a,b\nQ1,item-001\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Item mapping CSV header must be: resultItemIdentifier,itemIdentifier"
        );
    }

    #[test]
    fn test_row_with_single_field_is_rejected() {
        let err =
            parse_item_mapping_csv_text("resultItemIdentifier,itemIdentifier\nQ1\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Item mapping row is missing fields at line 2."
        );
    }

    #[test]
    fn test_extra_nonempty_column_is_rejected() {
        let err = parse_item_mapping_csv_text(
            "resultItemIdentifier,itemIdentifier\nQ1,item-001,extra\n",
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Item mapping row has extra columns at line 2."
        );
    }

    #[test]
    fn test_trailing_empty_columns_are_tolerated() {
        let text = "resultItemIdentifier,itemIdentifier\nQ1,item-001,,\n";
        let mapping = parse_item_mapping_csv_text(text).unwrap();
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn test_blank_identifier_is_rejected() {
        let err = parse_item_mapping_csv_text("resultItemIdentifier,itemIdentifier\nQ1, \n")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Item mapping row must define both identifiers at line 2."
        );
    }

    #[test]
    fn test_duplicate_result_identifier_is_rejected() {
        let err = parse_item_mapping_csv_text(
            "resultItemIdentifier,itemIdentifier\nQ1,item-001\nQ1,item-002\n",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Duplicate result item identifier: Q1");
    }

    #[test]
    fn test_duplicate_item_identifier_is_rejected() {
        let err = parse_item_mapping_csv_text(
            "resultItemIdentifier,itemIdentifier\nQ1,item-001\nQ2,item-001\n",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Duplicate item identifier: item-001");
    }

    #[test]
    fn test_header_only_is_rejected() {
        let err =
            parse_item_mapping_csv_text("resultItemIdentifier,itemIdentifier\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Item mapping CSV must contain at least one entry."
        );
    }

    #[test]
    fn test_line_numbers_follow_input_lines() {
        let err = parse_item_mapping_csv_text(
            "resultItemIdentifier,itemIdentifier\nQ1,item-001\nQ2\n",
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Item mapping row is missing fields at line 3."
        );
    }
}
