pub mod classify;
pub mod cluster;
pub mod compare;
pub mod dispatch;
pub mod process;
