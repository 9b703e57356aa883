//! On-disk store behaviour: persistence across reopen and concurrent access

use annabingo::{BingoError, BingoService, Card, CardStore, Grid};
use assert_matches::assert_matches;
use std::sync::Arc;
use std::thread;

fn fields(prefix: &str) -> Grid<String> {
    std::array::from_fn(|r| std::array::from_fn(|c| format!("{}-{}{}", prefix, r, c)))
}

#[test]
fn test_cards_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("annabingo.db");

    let id = {
        let store = CardStore::open(&path).unwrap();
        store.put(Card::new("Birthday Bash", fields("cake"))).unwrap()
    };

    let store = CardStore::open(&path).unwrap();
    assert_eq!(store.count().unwrap(), 1);
    assert!(store.has_title_index().unwrap());

    let card = store.get(&id).unwrap();
    assert_eq!(card.title, "Birthday Bash");
    assert_eq!(card.fields, fields("cake"));

    let found = store.search_by_title("Birthday").unwrap();
    assert_eq!(found, vec![card]);
}

#[test]
fn test_search_after_index_drop_and_rebuild() {
    let dir = tempfile::tempdir().unwrap();
    let store = CardStore::open(dir.path().join("cards.db")).unwrap();
    let service = BingoService::new(store.clone());

    for title in ["Zoo trip", "Beach day", "Bus ride"] {
        service.create(Card::new(title, fields("x"))).unwrap();
    }
    let before = service.search("B").unwrap();

    store.drop_title_index().unwrap();
    assert_eq!(service.search("B").unwrap(), before);

    service.rebuild_title_index().unwrap();
    service.rebuild_title_index().unwrap();
    assert_eq!(service.search("B").unwrap(), before);

    let titles: Vec<&str> = before.iter().map(|card| card.title.as_str()).collect();
    assert_eq!(titles, ["Beach day", "Bus ride"]);
}

#[test]
fn test_concurrent_writers_and_readers() {
    let dir = tempfile::tempdir().unwrap();
    let store = CardStore::open(dir.path().join("cards.db")).unwrap();
    let service = Arc::new(BingoService::new(store));

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                let mut ids = Vec::new();
                for n in 0..10 {
                    let title = format!("writer {} card {}", w, n);
                    ids.push(service.create(Card::new(title, fields("w"))).unwrap());
                }
                ids
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for _ in 0..10 {
                    service.search("writer").unwrap();
                    service.statistics().unwrap();
                    assert_matches!(
                        service.get_by_id("nonexistent-id"),
                        Err(BingoError::NotFound { .. })
                    );
                }
            })
        })
        .collect();

    let mut ids: Vec<String> = writers
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    for handle in readers {
        handle.join().unwrap();
    }

    assert_eq!(service.statistics().unwrap().count, 40);
    assert_eq!(service.search("writer").unwrap().len(), 40);

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 40);
}
