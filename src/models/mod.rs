pub mod document;
pub mod loaders;
pub mod result;
pub mod row;
pub mod rubric;
pub mod slot;

pub use document::QtiResultDocument;
pub use loaders::{collect_item_sources, load_item_mapping, parse_item_mapping_csv_text};
pub use result::{
    BaseType, Cardinality, ContextBlock, ItemResultBlock, OutcomeVariable, ResponseVariable,
    SessionIdentifier, TestResultBlock,
};
pub use row::ResultRow;
pub use rubric::RubricInputs;
pub use slot::{QuestionKind, QuestionSlot};
