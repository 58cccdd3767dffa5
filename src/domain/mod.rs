mod twin;

pub use twin::TwinRecord;
