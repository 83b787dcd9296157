// bellatrix_rt/src/trap/infrastructure/mod.rs

//! # Trap Infrastructure Module
//!
//! Handler tables, the dispatcher container, the interrupt controller and
//! its register backends, and the fatal halt path.

pub mod di;

// Hardware entry point and machine CSR backend.
pub mod low_level;
pub mod simulated;

pub mod controller;
pub mod fatal;
pub mod handler_table;

pub use di::initialize_trap_system;
