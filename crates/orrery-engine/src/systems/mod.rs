pub mod pick;
pub mod scene;
pub mod starfield;
#[cfg(feature = "vectors")]
pub mod vector;
