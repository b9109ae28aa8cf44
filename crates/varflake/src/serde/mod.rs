mod native;
mod string;

pub use native::*;
pub use string::*;
