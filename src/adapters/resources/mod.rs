//! Resource library adapters.

mod static_library;

pub use static_library::StaticResourceLibrary;
