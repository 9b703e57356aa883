pub mod bingo_card;
pub mod shuffle;
pub mod template;

pub use bingo_card::{Card, Grid, GRID_SIZE};
pub use shuffle::{shuffle_grid, RandomIndex};
pub use template::default_template;
