//! QTI 文档构建服务 - 业务能力层
//!
//! 核心职责：把三类结果块序列化成一份 QTI 3.0 assessmentResult 文档
//!
//! 输出是单行 XML，不做缩进美化，保证同一输入字节级可复现。
//! 子元素顺序固定：context、testResult、itemResult*。

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{ConversionError, Result};
use crate::models::{
    ContextBlock, ItemResultBlock, OutcomeVariable, ResponseVariable, TestResultBlock,
};

/// QTI 3.0 结果命名空间
const QTI_RESULT_NAMESPACE: &str = "http://www.imsglobal.org/xsd/imsqti_result_v3p0";
/// XML Schema 实例命名空间
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// schemaLocation 取值，命名空间与 XSD 地址成对
const SCHEMA_LOCATION: &str = "http://www.imsglobal.org/xsd/imsqti_result_v3p0 \
    https://purl.imsglobal.org/spec/qti/v3p0/schema/xsd/imsqti_resultv3p0_v1p0.xsd";

/// QTI 文档构建服务
#[derive(Default)]
pub struct DocumentBuilder;

impl DocumentBuilder {
    pub fn new() -> Self {
        Self
    }

    /// 序列化一份完整的 assessmentResult 文档
    pub fn build(
        &self,
        context: &ContextBlock,
        test_result: &TestResultBlock,
        item_results: &[ItemResultBlock],
    ) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut root = BytesStart::new("assessmentResult");
        root.push_attribute(("xmlns", QTI_RESULT_NAMESPACE));
        root.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
        root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
        writer.write_event(Event::Start(root))?;

        write_context(&mut writer, context)?;
        write_test_result(&mut writer, test_result)?;
        for item in item_results {
            write_item_result(&mut writer, item)?;
        }

        writer.write_event(Event::End(BytesEnd::new("assessmentResult")))?;
        String::from_utf8(writer.into_inner())
            .map_err(|err| ConversionError::XmlWrite(err.to_string()))
    }
}

// ========== 块级元素 ==========

fn write_context(writer: &mut Writer<Vec<u8>>, context: &ContextBlock) -> Result<()> {
    let mut start = BytesStart::new("context");
    start.push_attribute(("sourcedId", context.sourced_id.as_str()));
    writer.write_event(Event::Start(start))?;
    for session in &context.session_identifiers {
        let mut element = BytesStart::new("sessionIdentifier");
        element.push_attribute(("sourceID", session.source_id.as_str()));
        element.push_attribute(("identifier", session.identifier.as_str()));
        writer.write_event(Event::Empty(element))?;
    }
    writer.write_event(Event::End(BytesEnd::new("context")))?;
    Ok(())
}

fn write_test_result(writer: &mut Writer<Vec<u8>>, test_result: &TestResultBlock) -> Result<()> {
    let mut start = BytesStart::new("testResult");
    start.push_attribute(("identifier", test_result.identifier.as_str()));
    start.push_attribute(("datestamp", test_result.datestamp.as_str()));
    writer.write_event(Event::Start(start))?;
    for variable in &test_result.response_variables {
        write_response_variable(writer, variable)?;
    }
    for variable in &test_result.outcome_variables {
        write_outcome_variable(writer, variable)?;
    }
    writer.write_event(Event::End(BytesEnd::new("testResult")))?;
    Ok(())
}

fn write_item_result(writer: &mut Writer<Vec<u8>>, item: &ItemResultBlock) -> Result<()> {
    let sequence_index = item.sequence_index.to_string();
    let mut start = BytesStart::new("itemResult");
    start.push_attribute(("identifier", item.identifier.as_str()));
    start.push_attribute(("sequenceIndex", sequence_index.as_str()));
    start.push_attribute(("datestamp", item.datestamp.as_str()));
    start.push_attribute(("sessionStatus", item.session_status.as_str()));
    writer.write_event(Event::Start(start))?;
    write_response_variable(writer, &item.response_variable)?;
    for variable in &item.outcome_variables {
        write_outcome_variable(writer, variable)?;
    }
    writer.write_event(Event::End(BytesEnd::new("itemResult")))?;
    Ok(())
}

// ========== 变量元素 ==========

fn write_response_variable(
    writer: &mut Writer<Vec<u8>>,
    variable: &ResponseVariable,
) -> Result<()> {
    let mut start = BytesStart::new("responseVariable");
    start.push_attribute(("identifier", variable.identifier.as_str()));
    start.push_attribute(("cardinality", variable.cardinality.as_str()));
    start.push_attribute(("baseType", variable.base_type.as_str()));
    writer.write_event(Event::Start(start))?;
    // correctResponse 必须先于 candidateResponse
    if let Some(values) = &variable.correct_values {
        write_value_list(writer, "correctResponse", values)?;
    }
    if let Some(values) = &variable.candidate_values {
        write_value_list(writer, "candidateResponse", values)?;
    }
    writer.write_event(Event::End(BytesEnd::new("responseVariable")))?;
    Ok(())
}

fn write_outcome_variable(writer: &mut Writer<Vec<u8>>, variable: &OutcomeVariable) -> Result<()> {
    let mut start = BytesStart::new("outcomeVariable");
    start.push_attribute(("identifier", variable.identifier.as_str()));
    start.push_attribute(("cardinality", variable.cardinality.as_str()));
    start.push_attribute(("baseType", variable.base_type.as_str()));
    writer.write_event(Event::Start(start))?;
    write_value(writer, &variable.value)?;
    writer.write_event(Event::End(BytesEnd::new("outcomeVariable")))?;
    Ok(())
}

/// 空列表也要输出元素本身，只是没有 value 子元素
fn write_value_list(writer: &mut Writer<Vec<u8>>, name: &str, values: &[String]) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    for value in values {
        write_value(writer, value)?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_value(writer: &mut Writer<Vec<u8>>, value: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("value")))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new("value")))?;
    Ok(())
}
