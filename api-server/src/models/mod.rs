//! Request / response models

pub mod advisory;
pub mod weather;

pub use advisory::*;
pub use weather::*;
