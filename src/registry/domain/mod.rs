mod collection;
mod twin_get;
mod twin_update;

pub use collection::{CollectionError, CollectionValue, TwinCollection};
pub use twin_get::{TwinGet, TwinProperties};
pub use twin_update::{TwinUpdate, WriteProperties};
