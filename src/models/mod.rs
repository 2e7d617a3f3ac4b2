pub mod chat_message;
pub mod step_row;
pub mod test_case;

pub use chat_message::*;
pub use step_row::*;
pub use test_case::*;
