pub mod aggregate;
pub mod config;
pub mod error;
pub mod error_utils;
pub mod filter;
pub mod pagination;
pub mod pipeline;
pub mod rank;
pub mod report;
pub mod types;

pub use aggregate::*;
pub use config::*;
pub use error::*;
pub use error_utils::*;
pub use filter::*;
pub use pagination::*;
pub use pipeline::*;
pub use rank::*;
pub use report::*;
pub use types::*;
