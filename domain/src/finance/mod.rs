//! Financial domain: runway snapshots, monthly records and the dashboard
//! metrics derived from them.

pub mod dashboard;
pub mod format;
pub mod records;
