mod base64;
mod error;
mod generator;
mod id;
mod rand;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::base64::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::rand::*;
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
