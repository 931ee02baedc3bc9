//! 字段映射服务 - 业务能力层
//!
//! 核心职责：把规范化后的一行数据翻译成三类 QTI 结果块
//!
//! 1. context 块 - 11 个固定来源标识符
//! 2. testResult 块 - 时长、作答次数、完成状态、整卷结果变量
//! 3. itemResult 块 - 逐槽位判定题型后生成作答变量
//!
//! 固定映射关系全部放在常量表里，不要写成散落的分支。

use once_cell::sync::Lazy;
use phf::phf_map;
use regex::Regex;

use crate::error::{ConversionError, Result};
use crate::models::{
    BaseType, Cardinality, ContextBlock, ItemResultBlock, OutcomeVariable, QuestionKind,
    QuestionSlot, ResponseVariable, ResultRow, SessionIdentifier, TestResultBlock,
};
use crate::services::timestamp_service::TimestampService;

/// 作答变量统一使用的标识符
const RESPONSE_IDENTIFIER: &str = "RESPONSE";
/// itemResult 的会话状态
const SESSION_STATUS_FINAL: &str = "final";
/// 完成状态映射表外取值
const COMPLETION_STATUS_UNKNOWN: &str = "unknown";

/// context 条目配置：固定来源 URI 与取值列
struct ContextSource {
    source_id: &'static str,
    column: &'static str,
}

/// 11 个固定 context 条目
///
/// matrerialId 列沿用导出端的历史拼写，URI 一侧用规范拼写 materialId。
const CONTEXT_SOURCES: [ContextSource; 11] = [
    ContextSource {
        source_id: "https://tracklms.example.com/classId",
        column: "classId",
    },
    ContextSource {
        source_id: "https://tracklms.example.com/className",
        column: "className",
    },
    ContextSource {
        source_id: "https://tracklms.example.com/traineeId",
        column: "traineeId",
    },
    ContextSource {
        source_id: "https://tracklms.example.com/account",
        column: "account",
    },
    ContextSource {
        source_id: "https://tracklms.example.com/traineeName",
        column: "traineeName",
    },
    ContextSource {
        source_id: "https://tracklms.example.com/traineeKlassId",
        column: "traineeKlassId",
    },
    ContextSource {
        source_id: "https://tracklms.example.com/materialId",
        column: "matrerialId",
    },
    ContextSource {
        source_id: "https://tracklms.example.com/materialTitle",
        column: "materialTitle",
    },
    ContextSource {
        source_id: "https://tracklms.example.com/materialType",
        column: "materialType",
    },
    ContextSource {
        source_id: "https://tracklms.example.com/MaterialVersionNumber",
        column: "MaterialVersionNumber",
    },
    ContextSource {
        source_id: "https://tracklms.example.com/resultId",
        column: "resultId",
    },
];

/// 整卷结果变量配置：标识符、取值列、类型
struct OutcomeColumn {
    identifier: &'static str,
    column: &'static str,
    base_type: BaseType,
}

/// 列值原样转写的整卷结果变量，列缺失时整个元素省略
const TEST_OUTCOME_COLUMNS: [OutcomeColumn; 6] = [
    OutcomeColumn {
        identifier: "SCORE",
        column: "score",
        base_type: BaseType::Float,
    },
    OutcomeColumn {
        identifier: "TRACKLMS_QUESTION_COUNT",
        column: "questionCount",
        base_type: BaseType::Integer,
    },
    OutcomeColumn {
        identifier: "TRACKLMS_CORRECT_COUNT",
        column: "correctCount",
        base_type: BaseType::Integer,
    },
    OutcomeColumn {
        identifier: "TRACKLMS_TITLE",
        column: "title",
        base_type: BaseType::String,
    },
    OutcomeColumn {
        identifier: "TRACKLMS_IS_OPTIONAL",
        column: "isOptional",
        base_type: BaseType::Boolean,
    },
    OutcomeColumn {
        identifier: "TRACKLMS_TIME_LIMIT_MINUTES",
        column: "materialTimeLimitMinutes",
        base_type: BaseType::Integer,
    },
];

/// 完成状态映射，表外取值与缺失一律 unknown
static COMPLETION_STATUS: phf::Map<&'static str, &'static str> = phf_map! {
    "Completed" => "completed",
    "DeadlineExpired" => "incomplete",
};

/// 填空题占位符模式，捕获组是 token 内容
static CLOZE_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

/// 字段映射服务
pub struct FieldMapper {
    timestamps: TimestampService,
}

impl FieldMapper {
    pub fn new(timestamps: TimestampService) -> Self {
        Self { timestamps }
    }

    // ========== context 块 ==========

    /// 构建 context 块
    ///
    /// account 在规范化阶段已经查过一遍，这里必须再查：
    /// 组装环节自己保证不变量成立，不依赖上游恰好调用过校验。
    pub fn map_context(&self, row: &ResultRow) -> Result<ContextBlock> {
        let account = row.require("account")?;
        let session_identifiers = CONTEXT_SOURCES
            .iter()
            .filter_map(|source| {
                row.get(source.column).map(|value| SessionIdentifier {
                    source_id: source.source_id.to_string(),
                    identifier: value.to_string(),
                })
            })
            .collect();
        Ok(ContextBlock {
            sourced_id: account.to_string(),
            session_identifiers,
        })
    }

    // ========== testResult 块 ==========

    /// 构建整卷结果块
    pub fn map_test_result(&self, row: &ResultRow) -> Result<TestResultBlock> {
        let identifier = row.require("id")?.to_string();
        let datestamp = self.timestamps.localize("endAt", row.require("endAt")?)?;

        let mut response_variables = Vec::new();
        if let Some(seconds) = row.get("timeSpentSeconds") {
            let seconds = parse_integer("timeSpentSeconds", seconds)?;
            response_variables.push(ResponseVariable {
                identifier: "duration".to_string(),
                cardinality: Cardinality::Single,
                base_type: BaseType::Duration,
                correct_values: None,
                candidate_values: Some(vec![format!("PT{}S", seconds)]),
            });
        }
        if let Some(restarts) = row.get("restartCount") {
            // 重开 0 次等于作答 1 次
            let attempts = parse_integer("restartCount", restarts)? + 1;
            response_variables.push(ResponseVariable {
                identifier: "numAttempts".to_string(),
                cardinality: Cardinality::Single,
                base_type: BaseType::Integer,
                correct_values: None,
                candidate_values: Some(vec![attempts.to_string()]),
            });
        }

        let mut outcome_variables = vec![OutcomeVariable::single(
            "completionStatus",
            BaseType::Identifier,
            completion_status(row.get("status")),
        )];
        for outcome in &TEST_OUTCOME_COLUMNS {
            if let Some(value) = row.get(outcome.column) {
                outcome_variables.push(OutcomeVariable::single(
                    outcome.identifier,
                    outcome.base_type,
                    value,
                ));
            }
        }
        if let Some(start_at) = row.get("startAt") {
            outcome_variables.push(OutcomeVariable::single(
                "TRACKLMS_START_AT",
                BaseType::String,
                self.timestamps.localize("startAt", start_at)?,
            ));
        }
        outcome_variables.push(OutcomeVariable::single(
            "TRACKLMS_END_AT",
            BaseType::String,
            datestamp.clone(),
        ));

        Ok(TestResultBlock {
            identifier,
            datestamp,
            response_variables,
            outcome_variables,
        })
    }

    // ========== itemResult 块 ==========

    /// 按槽位序构建全部单题结果块，四字段全缺的槽位静默跳过
    pub fn map_item_results(&self, row: &ResultRow, slots: &[u32]) -> Result<Vec<ItemResultBlock>> {
        let datestamp = self.timestamps.localize("endAt", row.require("endAt")?)?;
        let mut items = Vec::new();
        for &index in slots {
            let slot = QuestionSlot::from_row(row, index);
            if slot.is_empty() {
                continue;
            }
            items.push(self.map_item_result(&slot, &datestamp)?);
        }
        Ok(items)
    }

    fn map_item_result(&self, slot: &QuestionSlot, datestamp: &str) -> Result<ItemResultBlock> {
        let response_variable = build_response_variable(slot)?;

        let mut outcome_variables = Vec::new();
        if let Some(score) = &slot.score {
            outcome_variables.push(OutcomeVariable::single("SCORE", BaseType::Float, score));
        }
        if let Some(title) = &slot.title {
            outcome_variables.push(OutcomeVariable::single(
                "TRACKLMS_ITEM_TITLE",
                BaseType::String,
                title,
            ));
        }

        Ok(ItemResultBlock {
            identifier: format!("Q{}", slot.index),
            sequence_index: slot.index,
            datestamp: datestamp.to_string(),
            session_status: SESSION_STATUS_FINAL.to_string(),
            response_variable,
            outcome_variables,
        })
    }
}

// ========== 题型判定 ==========

/// 判定槽位题型
///
/// 固定顺序，先到先得：填空（correct 含占位符）优先于一切，
/// correct 缺失是主观题，剩下只接受纯数字的选择题编码。
pub fn detect_question_kind(slot: &QuestionSlot) -> Result<QuestionKind> {
    match slot.correct.as_deref() {
        Some(correct) if CLOZE_TOKEN_RE.is_match(correct) => Ok(QuestionKind::Cloze),
        None => Ok(QuestionKind::Descriptive),
        Some(correct) => {
            let answer_is_numeric = slot.answer.as_deref().map_or(true, is_digit_string);
            if is_digit_string(correct) && answer_is_numeric {
                Ok(QuestionKind::Choice)
            } else {
                Err(ConversionError::InvalidQuestionFormat)
            }
        }
    }
}

fn build_response_variable(slot: &QuestionSlot) -> Result<ResponseVariable> {
    match detect_question_kind(slot)? {
        QuestionKind::Cloze => build_cloze_response(slot),
        QuestionKind::Descriptive => Ok(build_descriptive_response(slot)),
        QuestionKind::Choice => Ok(build_choice_response(slot)),
    }
}

fn build_cloze_response(slot: &QuestionSlot) -> Result<ResponseVariable> {
    let correct = slot
        .correct
        .as_deref()
        .ok_or(ConversionError::InvalidClozeFormat)?;
    let tokens: Vec<String> = CLOZE_TOKEN_RE
        .captures_iter(correct)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect();
    if tokens.is_empty() {
        // 模式已匹配却提取不到 token，结构上不会发生，保留兜底
        return Err(ConversionError::InvalidClozeFormat);
    }
    let candidate_values = slot.answer.as_deref().map(|answer| {
        answer
            .split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect()
    });
    Ok(ResponseVariable {
        identifier: RESPONSE_IDENTIFIER.to_string(),
        cardinality: Cardinality::Ordered,
        base_type: BaseType::String,
        correct_values: Some(tokens),
        candidate_values,
    })
}

fn build_descriptive_response(slot: &QuestionSlot) -> ResponseVariable {
    ResponseVariable {
        identifier: RESPONSE_IDENTIFIER.to_string(),
        cardinality: Cardinality::Single,
        base_type: BaseType::String,
        correct_values: None,
        candidate_values: slot.answer.as_ref().map(|answer| vec![answer.clone()]),
    }
}

fn build_choice_response(slot: &QuestionSlot) -> ResponseVariable {
    ResponseVariable {
        identifier: RESPONSE_IDENTIFIER.to_string(),
        cardinality: Cardinality::Single,
        base_type: BaseType::Identifier,
        correct_values: slot
            .correct
            .as_ref()
            .map(|correct| vec![format!("CHOICE_{}", correct)]),
        candidate_values: slot
            .answer
            .as_ref()
            .map(|answer| vec![format!("CHOICE_{}", answer)]),
    }
}

// ========== 取值辅助 ==========

fn completion_status(status: Option<&str>) -> &'static str {
    status
        .and_then(|value| COMPLETION_STATUS.get(value).copied())
        .unwrap_or(COMPLETION_STATUS_UNKNOWN)
}

/// 纯数字判定：非空且全为 0-9，不接受符号、小数点和空白
fn is_digit_string(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn parse_integer(field: &str, value: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .map_err(|_| ConversionError::InvalidInteger {
            field: field.to_string(),
            value: value.to_string(),
        })
}
