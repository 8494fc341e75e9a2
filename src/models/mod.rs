pub mod time;
pub mod tracker;
pub mod weekday;

pub use tracker::*;
pub use weekday::*;
