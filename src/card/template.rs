use crate::card::bingo_card::{Card, Grid};

/// Id carried by the built-in card; never assigned to a stored card
pub const TEMPLATE_ID: &str = "template";

pub const TEMPLATE_TITLE: &str = "Anna Bingo";

const TEMPLATE_FIELDS: Grid<&str> = [
    ["Someone is late", "Coffee spill", "\"Can you hear me?\"", "Dog barks"],
    ["Wrong slide", "Phone rings", "Frozen video", "Muted speaker"],
    ["Echo", "\"Let's take this offline\"", "Awkward silence", "Child appears"],
    ["Doorbell", "Bad connection", "Someone eats", "Meeting overruns"],
];

/// Card served by the front page before a user has created their own
pub fn default_template() -> Card {
    Card {
        id: TEMPLATE_ID.to_string(),
        title: TEMPLATE_TITLE.to_string(),
        fields: TEMPLATE_FIELDS.map(|row| row.map(str::to_string)),
    }
}
