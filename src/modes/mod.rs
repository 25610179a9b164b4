pub mod clock;
pub mod headless;
pub mod human;

pub use clock::{Clock, IntervalClock, Unpaced};
pub use headless::{HeadlessMode, HeadlessReport};
pub use human::HumanMode;
