// bellatrix_rt/src/init/mod.rs

//! Early boot setup that must run before the trap system.

pub mod alloc;
