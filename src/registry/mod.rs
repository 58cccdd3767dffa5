pub mod client;
mod domain;
mod map_twin;
mod reader;
mod writer;

pub use domain::TwinCollection;
pub use map_twin::{ConversionError, collection_to_map, from_external_twin, to_external_twin};
pub use reader::{fetch_module_twin, fetch_twin};
pub use writer::push_twin;
