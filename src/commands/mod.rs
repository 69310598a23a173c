pub mod output;
pub mod spatial;
pub mod temporal;

pub use spatial::run_spatial;
pub use temporal::run_temporal;
