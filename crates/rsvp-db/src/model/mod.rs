pub mod admission;
pub mod rate_limit;
pub mod sheet;
