#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod algebraic;
pub mod board;
pub mod client;
pub mod coord;
pub mod display;
pub mod event;
pub mod force;
pub mod grid;
pub mod piece;
pub mod test_util;
pub mod util;
