pub mod camera;
pub mod disc;
pub mod traits;
#[cfg(feature = "vectors")]
pub mod frame;
