// bellatrix_rt/src/util/htif/mod.rs

mod api;

pub use api::*;
