//! 评分素材输入模型

use std::collections::BTreeMap;

/// 评分素材
///
/// 为外挂的评分扩展准备的输入：QTI 题目定义 XML 原文，以及可选的
/// "结果项标识符 → 题目标识符" 映射。核心转换路径不读取这些数据，
/// 只负责装载校验后原样携带。映射必须伴随题目文件出现，反之不限，
/// 所以映射挂在这个结构体内部而不是与之并列。
#[derive(Debug, Clone, Default)]
pub struct RubricInputs {
    /// 题目定义 XML 文本，目录内文件按文件名排序在前，--item 参数按出现顺序在后
    pub item_source_xmls: Vec<String>,
    /// resultItemIdentifier → itemIdentifier
    pub item_identifier_map: Option<BTreeMap<String, String>>,
}

impl RubricInputs {
    pub fn new(
        item_source_xmls: Vec<String>,
        item_identifier_map: Option<BTreeMap<String, String>>,
    ) -> Self {
        Self {
            item_source_xmls,
            item_identifier_map,
        }
    }
}
