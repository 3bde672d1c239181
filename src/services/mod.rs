// Service exports
pub mod gemini;
pub mod postgres;
pub mod profiles;

pub use gemini::{GeminiClient, InferenceError, InferenceTransport};
pub use postgres::PostgresProfileStore;
pub use profiles::{MemoryProfileStore, ProfileStore, StoreError};
