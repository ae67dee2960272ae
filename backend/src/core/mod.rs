//! Clock, head and the context that bundles them

pub mod context;
pub mod head;
pub mod time;
