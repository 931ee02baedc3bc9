//! QTI 结果报文的中间模型
//!
//! 字段映射层产出这些块，文档构建层把它们序列化成 XML。
//! 属性取值的拼写（single/ordered、baseType 等）由这里的枚举统一管理。

/// 变量基数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Single,
    Ordered,
}

impl Cardinality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::Single => "single",
            Cardinality::Ordered => "ordered",
        }
    }
}

/// 变量基础类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    String,
    Identifier,
    Integer,
    Float,
    Boolean,
    Duration,
}

impl BaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseType::String => "string",
            BaseType::Identifier => "identifier",
            BaseType::Integer => "integer",
            BaseType::Float => "float",
            BaseType::Boolean => "boolean",
            BaseType::Duration => "duration",
        }
    }
}

/// 会话标识符条目（context 块的子元素）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentifier {
    /// 固定的来源 URI
    pub source_id: String,
    /// 该列在当前行的取值
    pub identifier: String,
}

/// context 块：这次作答属于谁、哪个班级、哪份教材
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextBlock {
    /// 学员账号（sourcedId 属性）
    pub sourced_id: String,
    pub session_identifiers: Vec<SessionIdentifier>,
}

/// 作答变量
///
/// `correct_values` / `candidate_values` 为 `None` 时对应的
/// correctResponse / candidateResponse 元素整个省略；
/// `Some(vec![])` 表示元素存在但没有 value 子元素，两者语义不同。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseVariable {
    pub identifier: String,
    pub cardinality: Cardinality,
    pub base_type: BaseType,
    pub correct_values: Option<Vec<String>>,
    pub candidate_values: Option<Vec<String>>,
}

/// 结果变量（成绩、状态等计算值）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeVariable {
    pub identifier: String,
    pub cardinality: Cardinality,
    pub base_type: BaseType,
    pub value: String,
}

impl OutcomeVariable {
    /// 单值结果变量（本转换器产出的结果变量全部是单值）
    pub fn single(
        identifier: impl Into<String>,
        base_type: BaseType,
        value: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            cardinality: Cardinality::Single,
            base_type,
            value: value.into(),
        }
    }
}

/// testResult 块：整卷级别的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResultBlock {
    /// 测验标识符（id 列）
    pub identifier: String,
    /// 结束时间，已本地化格式化
    pub datestamp: String,
    pub response_variables: Vec<ResponseVariable>,
    pub outcome_variables: Vec<OutcomeVariable>,
}

/// itemResult 块：单题级别的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemResultBlock {
    /// 形如 Q{index} 的题目标识符
    pub identifier: String,
    /// 槽位序号
    pub sequence_index: u32,
    /// 与整卷相同的结束时间
    pub datestamp: String,
    /// 会话状态，当前固定为 final
    pub session_status: String,
    pub response_variable: ResponseVariable,
    pub outcome_variables: Vec<OutcomeVariable>,
}
