//! ### 指令集合


pub mod utils;
pub mod workspace;
