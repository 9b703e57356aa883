use serde::{Deserialize, Serialize};

/// Number of rows and columns of a bingo grid
pub const GRID_SIZE: usize = 4;

/// Fixed 4×4 grid; the shape is part of the type so it can never be resized
pub type Grid<T> = [[T; GRID_SIZE]; GRID_SIZE];

/// A bingo card as submitted by a user and persisted in the store.
///
/// `id` is assigned by the store on creation; whatever a client sends in
/// that field is overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub fields: Grid<String>,
}

impl Card {
    pub fn new(title: impl Into<String>, fields: Grid<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            fields,
        }
    }

    /// All 16 cell values in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().flatten().map(String::as_str)
    }
}
