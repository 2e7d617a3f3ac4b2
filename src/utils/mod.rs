pub mod chat_session;
pub mod extraction;
pub mod file_operations;
pub mod groq;
pub mod prompts;

pub use chat_session::*;
pub use extraction::*;
pub use file_operations::*;
pub use groq::*;
pub use prompts::*;
