//! 转换错误类型
//!
//! 所有校验与格式化失败共用一个错误类型，错误消息是对外契约的一部分，
//! 调用方和测试都会对消息原文做断言，修改前务必同步更新测试。

use thiserror::Error;

/// 转换错误
///
/// 任意一行数据失败都会中止整个转换，不存在跳过坏行继续处理的模式。
/// 文件读写等 I/O 失败不属于本类型，由外层（app 层）用 anyhow 包装。
#[derive(Error, Debug)]
pub enum ConversionError {
    // ========== CSV 结构 ==========
    /// 输入为空或仅包含空白字符
    #[error("CSV input is empty.")]
    EmptyInput,

    /// 没有表头行（理论上被 EmptyInput 先拦截，保留兜底分支）
    #[error("CSV header row is missing.")]
    MissingHeader,

    /// 缺少必需列，一次性报告全部缺失列
    #[error("Missing required columns: {columns}")]
    MissingColumns { columns: String },

    /// 底层 CSV 解析失败
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    // ========== 行字段 ==========
    /// 必需字段缺失（首个缺失字段）
    #[error("Missing required value: {field}")]
    MissingValue { field: String },

    /// 数值字段无法解析为整数
    #[error("Invalid integer value for {field}: {value}")]
    InvalidInteger { field: String, value: String },

    // ========== 时间与时区 ==========
    /// 时间戳不符合 YYYY/MM/DD HH:MM:SS 格式，或对应本地时间不存在
    #[error("Invalid timestamp for {field}: {value}")]
    InvalidTimestamp { field: String, value: String },

    /// 时区名称无法识别，且两个回退时区也都失败
    #[error("Unknown timezone: {timezone}")]
    UnknownTimezone { timezone: String },

    // ========== 题目编码 ==========
    /// 填空题 correct 匹配了占位符模式但提取不到任何 token
    #[error("Invalid cloze correct response format.")]
    InvalidClozeFormat,

    /// correct/answer 组合不属于任何已知题型
    #[error("Invalid question format.")]
    InvalidQuestionFormat,

    // ========== 评分素材输入 ==========
    /// --items-dir 指定的目录不存在
    #[error("Items directory not found: {path}")]
    ItemsDirNotFound { path: String },

    /// 给了 --item/--items-dir 但最终没有收集到任何文件
    #[error("No QTI item sources were provided.")]
    NoItemSources,

    /// --item-map 指定的文件不存在
    #[error("Item mapping file not found: {path}")]
    ItemMapNotFound { path: String },

    /// 映射 CSV 内容为空
    #[error("Item mapping CSV is empty.")]
    ItemMapEmpty,

    /// 映射 CSV 没有表头行
    #[error("Item mapping CSV header is missing.")]
    ItemMapHeaderMissing,

    /// 映射 CSV 表头不是固定的两列
    #[error("Item mapping CSV header must be: resultItemIdentifier,itemIdentifier")]
    ItemMapHeaderMismatch,

    /// 映射行没有任何字段
    #[error("Item mapping row is empty at line {line}.")]
    ItemMapRowEmpty { line: u64 },

    /// 映射行字段数不足两列
    #[error("Item mapping row is missing fields at line {line}.")]
    ItemMapRowMissingFields { line: u64 },

    /// 映射行第三列以后出现非空内容
    #[error("Item mapping row has extra columns at line {line}.")]
    ItemMapRowExtraColumns { line: u64 },

    /// 映射行两个标识符有一个为空
    #[error("Item mapping row must define both identifiers at line {line}.")]
    ItemMapRowMissingIdentifiers { line: u64 },

    /// 结果项标识符重复
    #[error("Duplicate result item identifier: {identifier}")]
    DuplicateResultItemIdentifier { identifier: String },

    /// 题目标识符重复
    #[error("Duplicate item identifier: {identifier}")]
    DuplicateItemIdentifier { identifier: String },

    /// 映射 CSV 只有表头没有数据行
    #[error("Item mapping CSV must contain at least one entry.")]
    ItemMapNoEntries,

    /// 提供了映射却没有提供任何题目文件
    #[error("Item mapping provided without item sources.")]
    ItemMapWithoutSources,

    // ========== XML 序列化 ==========
    /// XML 写出失败
    #[error("XML write error: {0}")]
    XmlWrite(String),
}

// ========== 从第三方库错误转换 ==========

impl From<csv::Error> for ConversionError {
    fn from(err: csv::Error) -> Self {
        ConversionError::CsvParse(err.to_string())
    }
}

impl From<quick_xml::Error> for ConversionError {
    fn from(err: quick_xml::Error) -> Self {
        ConversionError::XmlWrite(err.to_string())
    }
}

// ========== Result 类型别名 ==========

/// 转换结果类型
pub type Result<T> = std::result::Result<T, ConversionError>;
