pub mod context;
pub mod gemini;
pub mod traits;
pub mod types;

pub use context::ModelContext;
pub use traits::TextModel;
pub use types::{ModelConfig, ModelError};
