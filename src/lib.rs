pub mod cli;
pub mod dataset;
pub mod error;
pub mod plot;
pub mod scripts;
pub mod style;

pub use dataset::{Dataset, Layout, RawDataset, Schema, Series};
pub use error::{PlotError, Result};
pub use plot::{render, Plot};

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");
