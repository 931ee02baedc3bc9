//! 输出写入器 - 基础设施层
//!
//! 持有输出目录这一资源，只暴露"落盘文档"的能力

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::QtiResultDocument;

/// 输出写入器
///
/// 职责：
/// - 确保输出目录存在
/// - 把每份文档按固定文件名写出
/// - 不认识 CSV / 结果行
/// - 不处理转换流程
pub struct OutputWriter {
    out_dir: PathBuf,
}

impl OutputWriter {
    /// 创建新的输出写入器
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// 输出目录
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// 写入全部文档，返回写出的文件路径
    ///
    /// 同名文件直接覆盖，resultId 重复时后写的留存。
    pub fn write_documents(&self, documents: &[QtiResultDocument]) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("无法创建输出目录: {}", self.out_dir.display()))?;

        let mut written = Vec::with_capacity(documents.len());
        for document in documents {
            let path = self.out_dir.join(document.file_name());
            fs::write(&path, &document.xml)
                .with_context(|| format!("无法写入文档: {}", path.display()))?;
            debug!("✓ 已写出 {}", path.display());
            written.push(path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_directory_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("nested").join("qti-results");
        let writer = OutputWriter::new(&out_dir);
        let documents = vec![
            QtiResultDocument::new("200", "<a/>"),
            QtiResultDocument::new("201", "<b/>"),
        ];
        let written = writer.write_documents(&documents).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(
            fs::read_to_string(out_dir.join("assessmentResult-200.xml")).unwrap(),
            "<a/>"
        );
        assert_eq!(
            fs::read_to_string(out_dir.join("assessmentResult-201.xml")).unwrap(),
            "<b/>"
        );
    }

    #[test]
    fn test_same_file_name_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path());
        writer
            .write_documents(&[QtiResultDocument::new("200", "<first/>")])
            .unwrap();
        writer
            .write_documents(&[QtiResultDocument::new("200", "<second/>")])
            .unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("assessmentResult-200.xml")).unwrap(),
            "<second/>"
        );
    }
}
