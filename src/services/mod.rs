pub mod bingo_service;

pub use bingo_service::{BingoService, Statistics};
