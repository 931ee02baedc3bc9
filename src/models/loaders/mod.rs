pub mod item_map_loader;
pub mod item_source_loader;

pub use item_map_loader::{load_item_mapping, parse_item_mapping_csv_text};
pub use item_source_loader::collect_item_sources;
