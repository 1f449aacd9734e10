//! Scoring primitives: names, key properties and method signatures.

mod method;
mod name;
mod property;
mod score;


pub use method::*;
pub use name::*;
pub use property::*;
pub use score::*;
