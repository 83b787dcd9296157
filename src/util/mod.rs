// bellatrix_rt/src/util/mod.rs

pub mod htif;
