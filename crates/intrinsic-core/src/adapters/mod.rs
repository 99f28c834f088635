pub mod fmp;

pub use fmp::{FmpAdapter, FmpConfig};
