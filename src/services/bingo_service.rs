//! Bingo service: the operations the HTTP boundary calls into.
//!
//! Combines the card store with the grid shuffle. Shuffling is a
//! presentation step applied to the copy handed back to the caller; stored
//! cards are never rewritten by a read.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

use crate::card::{default_template, shuffle_grid, Card, RandomIndex};
use crate::storage::CardStore;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub count: u64,
}

pub struct BingoService<R = StdRng> {
    store: CardStore,
    rng: Mutex<R>,
}

impl BingoService<StdRng> {
    /// Service with a generator seeded from the operating system
    pub fn new(store: CardStore) -> Self {
        Self::with_rng(store, StdRng::from_os_rng())
    }
}

impl<R: RandomIndex> BingoService<R> {
    /// Service drawing its shuffles from `rng`
    pub fn with_rng(store: CardStore, rng: R) -> Self {
        Self {
            store,
            rng: Mutex::new(rng),
        }
    }

    pub fn store(&self) -> &CardStore {
        &self.store
    }

    fn shuffle(&self, card: &mut Card) {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        shuffle_grid(&mut card.fields, &mut *rng);
    }

    /// Built-in template with a freshly shuffled grid
    pub fn get_shuffled_template(&self) -> Card {
        let mut card = default_template();
        self.shuffle(&mut card);
        card
    }

    /// Stored card with its grid shuffled for this response only
    pub fn get_by_id(&self, id: &str) -> Result<Card> {
        let mut card = self.store.get(id)?;
        self.shuffle(&mut card);
        Ok(card)
    }

    /// Persist a submitted card and return its new id
    pub fn create(&self, card: Card) -> Result<String> {
        self.store.put(card)
    }

    /// Cards matching `title`; no match is an empty list, not an error
    pub fn search(&self, title: &str) -> Result<Vec<Card>> {
        self.store.search_by_title(title)
    }

    pub fn statistics(&self) -> Result<Statistics> {
        Ok(Statistics {
            count: self.store.count()?,
        })
    }

    pub fn rebuild_title_index(&self) -> Result<()> {
        self.store.ensure_title_index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::shuffle::tests::Scripted;
    use crate::card::template::TEMPLATE_TITLE;
    use crate::card::{Grid, GRID_SIZE};
    use crate::BingoError;
    use assert_matches::assert_matches;

    fn numbered() -> Grid<String> {
        std::array::from_fn(|r| std::array::from_fn(|c| (r * GRID_SIZE + c).to_string()))
    }

    fn sorted_cells(card: &Card) -> Vec<String> {
        let mut cells: Vec<String> = card.cells().map(str::to_string).collect();
        cells.sort();
        cells
    }

    fn seeded_service() -> BingoService<StdRng> {
        let store = CardStore::open_in_memory().unwrap();
        BingoService::with_rng(store, StdRng::seed_from_u64(11))
    }

    #[test]
    fn test_shuffled_template() {
        let service = seeded_service();
        let card = service.get_shuffled_template();

        assert_eq!(card.title, TEMPLATE_TITLE);
        assert_eq!(sorted_cells(&card), sorted_cells(&default_template()));
        assert_eq!(service.statistics().unwrap().count, 0);
    }

    #[test]
    fn test_get_by_id_applies_scripted_shuffle() {
        let store = CardStore::open_in_memory().unwrap();
        let id = store.put(Card::new("Scripted", numbered())).unwrap();

        let service = BingoService::with_rng(store, Scripted::zeros());
        let card = service.get_by_id(&id).unwrap();

        let expected = [[5, 1, 2, 3], [4, 6, 7, 9], [8, 10, 11, 13], [12, 14, 15, 0]]
            .map(|row| row.map(|cell: usize| cell.to_string()));
        assert_eq!(card.fields, expected);

        // Shuffling is presentation only
        assert_eq!(service.store().get(&id).unwrap().fields, numbered());
    }

    #[test]
    fn test_round_trip() {
        let service = seeded_service();
        let submitted = Card::new("Road trip", numbered());

        let id = service.create(submitted.clone()).unwrap();
        let card = service.get_by_id(&id).unwrap();

        assert_eq!(card.id, id);
        assert_eq!(card.title, submitted.title);
        assert_eq!(sorted_cells(&card), sorted_cells(&submitted));
    }

    #[test]
    fn test_identical_submissions_get_distinct_ids() {
        let service = seeded_service();
        let card = Card::new("Twins", numbered());

        let first = service.create(card.clone()).unwrap();
        let second = service.create(card).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_search() {
        let service = seeded_service();
        let id = service.create(Card::new("Birthday Bash", numbered())).unwrap();
        service.create(Card::new("Wedding", numbered())).unwrap();

        let found = service.search("Birthday").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);

        assert!(service.search("zzz-nomatch").unwrap().is_empty());
    }

    #[test]
    fn test_count_consistency() {
        let service = seeded_service();
        let mut expected = service.statistics().unwrap().count;

        for title in ["a", "b", "c"] {
            let id = service.create(Card::new(title, numbered())).unwrap();
            expected += 1;
            assert_eq!(service.statistics().unwrap().count, expected);

            service.get_by_id(&id).unwrap();
            service.search(title).unwrap();
            assert_eq!(service.statistics().unwrap().count, expected);
        }
    }

    #[test]
    fn test_rebuild_index_is_idempotent() {
        let service = seeded_service();
        service.create(Card::new("Game night", numbered())).unwrap();
        service.create(Card::new("Night shift", numbered())).unwrap();

        service.rebuild_title_index().unwrap();
        let before = service.search("night").unwrap();
        service.rebuild_title_index().unwrap();
        let after = service.search("night").unwrap();

        assert_eq!(before, after);
        assert_eq!(before.len(), 1);
    }

    #[test]
    fn test_not_found_passes_through() {
        let service = seeded_service();
        assert_matches!(
            service.get_by_id("nonexistent-id"),
            Err(BingoError::NotFound { .. })
        );
    }
}
