//! Reusable UI components: shell chrome, the route gate, form pieces and
//! usage bars.

pub mod footer;
pub mod form;
pub mod gate;
pub mod header;
pub mod sidebar;
pub mod usage_bars;
