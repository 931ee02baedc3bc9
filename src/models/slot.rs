//! 题目槽位模型

use crate::models::ResultRow;

/// 题目槽位
///
/// 按 `qN/title`、`qN/correct`、`qN/answer`、`qN/score` 四列约定
/// 从一行数据里读出的第 N 题数据。四个字段全部缺失的槽位不参与输出。
#[derive(Debug, Clone, Default)]
pub struct QuestionSlot {
    /// 槽位序号（列名里的 N）
    pub index: u32,
    pub title: Option<String>,
    pub correct: Option<String>,
    pub answer: Option<String>,
    pub score: Option<String>,
}

impl QuestionSlot {
    /// 从规范化行中读出第 index 题的四个字段
    pub fn from_row(row: &ResultRow, index: u32) -> Self {
        let field = |name: &str| row.get(&format!("q{}/{}", index, name)).map(String::from);
        Self {
            index,
            title: field("title"),
            correct: field("correct"),
            answer: field("answer"),
            score: field("score"),
        }
    }

    /// 四个字段是否全部缺失
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.correct.is_none()
            && self.answer.is_none()
            && self.score.is_none()
    }
}

/// 题型分类
///
/// 按槽位即时判定，不落盘不缓存。判定顺序固定：
/// 填空（correct 含 `${...}` 占位符）优先于选择（纯数字），
/// correct 缺失一律视为主观题。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// 填空题
    Cloze,
    /// 主观题（自由作答）
    Descriptive,
    /// 选择题
    Choice,
}
