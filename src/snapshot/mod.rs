mod snapshot_sink;

pub use snapshot_sink::*;
