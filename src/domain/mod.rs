pub mod models;
pub mod errors;
pub mod format;
pub mod engine;
pub mod steps;
pub mod table;

pub use models::*;
pub use errors::*;
pub use format::*;
pub use engine::*;
pub use steps::*;
pub use table::*;
