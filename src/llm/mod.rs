pub mod analyze;
pub mod generate;
pub mod query_enhance;

pub use generate::{GenerateError, GenerationParams, HttpGenerator, TextGenerator};
