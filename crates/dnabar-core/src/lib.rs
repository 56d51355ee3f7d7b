pub mod base;
pub mod encode;
pub mod naming;
pub mod sequence;

pub use base::*;
pub use encode::*;
pub use sequence::*;
