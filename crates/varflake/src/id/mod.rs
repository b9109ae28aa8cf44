mod interface;
mod layout;
mod shuffle;

pub use interface::*;
pub use layout::*;
pub use shuffle::*;
