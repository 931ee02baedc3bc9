pub mod document_builder;
pub mod field_mapper;
pub mod header_validator;
pub mod row_normalizer;
pub mod timestamp_service;

pub use document_builder::DocumentBuilder;
pub use field_mapper::{detect_question_kind, FieldMapper};
pub use header_validator::{HeaderValidator, ValidatedHeader, REQUIRED_HEADERS};
pub use row_normalizer::{RowNormalizer, REQUIRED_ROW_FIELDS};
pub use timestamp_service::TimestampService;
