// Adapters layer: concrete implementations of the domain ports (files, stdio, stderr).

pub mod diagnostics;
pub mod lines;
pub mod storage;

pub use diagnostics::StderrSink;
pub use lines::LineReader;
pub use storage::LocalStorage;
