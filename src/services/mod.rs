pub mod ai;
pub mod session;
