//! Pure helpers shared by state, pages and components.

pub mod route_gate;
pub mod storage;
pub mod usage;
pub mod validation;
