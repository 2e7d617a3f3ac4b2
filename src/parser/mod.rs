pub mod response;
pub mod steps;

pub use response::*;
pub use steps::*;
