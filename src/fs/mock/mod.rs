//! Mock filesystem and output sinks for testing without a real `/proc`.

mod filesystem;
mod scenarios;
mod sink;

pub use filesystem::MockFs;
pub use sink::{FailingWriter, ShortWriter};
