pub mod interpolate;
pub mod orbit_cache;
pub mod time;
pub mod units;
