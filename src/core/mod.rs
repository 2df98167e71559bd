pub mod clock;
pub mod errors;
pub mod services;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
