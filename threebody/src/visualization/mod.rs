pub mod animation;
#[cfg(feature = "viewer")]
pub mod viewer;
