//! Small, dependency-light helpers shared by the DtoLink crates.

pub mod case;
