pub mod histogram;
pub mod stats;
pub mod window;

pub use histogram::Histogram;
pub use stats::StatsHelper;
pub use window::RollingWindow;
