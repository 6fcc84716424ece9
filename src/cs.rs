pub mod selection;

// Re-export the engines and their trace types
pub use selection::*;
