// 特定の警告を無効化
#![allow(clippy::needless_lifetimes)]
#![allow(clippy::new_without_default)]

#[macro_use]
mod macros;

pub mod config;
pub mod core;
pub mod dataframe;
pub mod error;
pub mod index;
pub mod ops;
pub mod scalar;
pub mod series;

// Re-export commonly used types
pub use config::{get_options, set_options, ChainedAssignment, OpsConfig, OpsConfigBuilder};
pub use dataframe::DataFrame;
pub use error::{Error, PandRSError, Result};
pub use index::{Index, RangeIndex, StringIndex};
pub use ops::{install, OpOutput, Operand, OperationSurface, OpsContainer, Primitive};
pub use scalar::Scalar;
pub use series::Series;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
