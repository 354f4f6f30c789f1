//! Bucket sinks
//!
//! A sink receives the six ordered buckets of a run. `FileSink` writes the
//! classic `<prefix>.<suffix>` files; `MemorySink` keeps them in memory.

mod file;
mod memory;
mod traits;

pub use file::FileSink;
pub use memory::MemorySink;
pub use traits::{BucketSink, SinkError, SinkResult};
