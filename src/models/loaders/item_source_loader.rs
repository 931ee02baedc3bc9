//! 题目定义文件收集器

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::error::ConversionError;

/// 收集评分用的 QTI 题目定义 XML 文本
///
/// 两个来源合并：--items-dir 目录下的 *.xml（按文件名排序），
/// 然后是 --item 参数（按出现顺序）。两者都没给时返回 None，
/// 给了却一个文件都没收集到是错误。
pub fn collect_item_sources(
    item_paths: &[PathBuf],
    items_dir: Option<&Path>,
) -> anyhow::Result<Option<Vec<String>>> {
    if item_paths.is_empty() && items_dir.is_none() {
        return Ok(None);
    }

    let mut sources: Vec<PathBuf> = Vec::new();

    if let Some(dir) = items_dir {
        if !dir.is_dir() {
            return Err(ConversionError::ItemsDirNotFound {
                path: dir.display().to_string(),
            }
            .into());
        }
        let mut xml_files: Vec<PathBuf> = Vec::new();
        for entry in
            fs::read_dir(dir).with_context(|| format!("无法读取题目目录: {}", dir.display()))?
        {
            let path = entry
                .with_context(|| format!("无法遍历题目目录: {}", dir.display()))?
                .path();
            if path.extension().and_then(|s| s.to_str()) == Some("xml") {
                xml_files.push(path);
            }
        }
        xml_files.sort();
        sources.extend(xml_files);
    }

    sources.extend(item_paths.iter().cloned());

    if sources.is_empty() {
        return Err(ConversionError::NoItemSources.into());
    }

    let mut texts = Vec::with_capacity(sources.len());
    for path in &sources {
        debug!("正在读取题目文件: {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("无法读取题目文件: {}", path.display()))?;
        texts.push(text);
    }

    Ok(Some(texts))
}
