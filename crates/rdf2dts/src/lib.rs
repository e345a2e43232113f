pub mod compile;
pub mod diagnostics;
pub mod emitter;
pub mod error;
pub mod loader;
pub mod model;
