mod date;
mod float;

pub use date::Date;
pub use float::{Float32, Float64};
