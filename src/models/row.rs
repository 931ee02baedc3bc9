//! 规范化后的结果行模型

use std::collections::BTreeMap;

use crate::error::{ConversionError, Result};

/// 一行学习结果数据
///
/// 列名到修剪后取值的映射。空串与纯空白在规范化阶段统一折叠为
/// `None`（"缺失"），下游一律用存在性判断，禁止用空串判断，
/// 否则无法区分"没填"和"填了空内容"。
#[derive(Debug, Clone, Default)]
pub struct ResultRow {
    values: BTreeMap<String, Option<String>>,
}

impl ResultRow {
    pub fn new(values: BTreeMap<String, Option<String>>) -> Self {
        Self { values }
    }

    /// 取某列的值，列不存在与值缺失同样返回 None
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).and_then(|v| v.as_deref())
    }

    /// 取必需列的值，缺失时报出列名
    pub fn require(&self, column: &str) -> Result<&str> {
        self.get(column).ok_or_else(|| ConversionError::MissingValue {
            field: column.to_string(),
        })
    }
}
