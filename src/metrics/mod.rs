//! Training metrics calculator. Every function here is pure: sessions in,
//! derived values out, nothing cached between calls.

pub mod dashboard;
pub mod flags;
pub mod readiness;
pub mod series;
pub mod session;
pub mod targets;
pub mod weekly;
