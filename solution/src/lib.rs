pub mod assignment;
pub mod json_serialisation;
pub mod logic;
mod schedule;
pub mod test_utilities;

pub use schedule::{Schedule, ScheduleError};
