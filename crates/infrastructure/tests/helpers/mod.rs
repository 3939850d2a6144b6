#![allow(dead_code)]

mod seed;

pub use seed::*;
