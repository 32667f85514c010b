mod kind;
mod scale;

pub use kind::*;
pub use scale::*;
