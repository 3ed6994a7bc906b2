use research_core::db::open_db_in_memory;
use research_core::{
    seed_documents, LoadStatus, MemorySlotStore, RepoError, ResearchItem, ResearchRepository,
    SlotResearchRepository, SlotStore, SqliteSlotStore,
};

const KEY: &str = "imene_research_data";
const OWNER: &str = "Imene Ahmed Omar";

fn item(id: &str, views: u64) -> ResearchItem {
    ResearchItem {
        id: id.to_string(),
        title: format!("title {id}"),
        authors: "Y".to_string(),
        date: "2024-01-01".to_string(),
        content: "Z".to_string(),
        views,
    }
}

#[test]
fn first_list_seeds_slot_with_exact_seed_set() {
    let store = MemorySlotStore::new();
    let repo = SlotResearchRepository::new(&store, KEY, OWNER);

    let loaded = repo.load().unwrap();
    assert_eq!(loaded.status, LoadStatus::Seeded);
    assert_eq!(loaded.items, seed_documents(OWNER));
    assert_eq!(loaded.items.len(), 3);

    let persisted = store.read_slot(KEY).unwrap().expect("seed should be written");
    let decoded: Vec<ResearchItem> = serde_json::from_str(&persisted).unwrap();
    assert_eq!(decoded, seed_documents(OWNER));

    assert_eq!(repo.load().unwrap().status, LoadStatus::Loaded);
}

#[test]
fn corrupt_slot_falls_back_to_seed_without_overwriting() {
    let store = MemorySlotStore::with_slot(KEY, "{broken");
    let repo = SlotResearchRepository::new(&store, KEY, OWNER);

    for _ in 0..2 {
        let loaded = repo.load().unwrap();
        assert_eq!(loaded.status, LoadStatus::CorruptFallback);
        assert_eq!(loaded.items, seed_documents(OWNER));
    }
    assert_eq!(store.read_slot(KEY).unwrap().as_deref(), Some("{broken"));
}

#[test]
fn creates_prepend_with_zero_views() {
    let store = MemorySlotStore::with_slot(KEY, "[]");
    let repo = SlotResearchRepository::new(&store, KEY, OWNER);

    for n in 0..5 {
        let id = format!("doc-{n}");
        let items = repo.create(item(&id, 99)).unwrap();
        assert_eq!(items.len(), n + 1);
        assert_eq!(items[0].id, id);
        assert_eq!(items[0].views, 0);
    }
    assert!(repo.list_all().unwrap().iter().all(|doc| doc.views == 0));
}

#[test]
fn create_reports_views_zero_not_caller_value() {
    let store = MemorySlotStore::new();
    let repo = SlotResearchRepository::new(&store, KEY, OWNER);

    let items = repo.create(item("x", 99)).unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0].title, "title x");
    assert_eq!(items[0].views, 0);
}

#[test]
fn create_rejects_duplicate_id() {
    let store = MemorySlotStore::new();
    let repo = SlotResearchRepository::new(&store, KEY, OWNER);
    let before = repo.list_all().unwrap();

    let err = repo.create(item("1", 0)).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateId(ref id) if id == "1"));
    assert_eq!(repo.list_all().unwrap(), before);
}

#[test]
fn increment_touches_only_target_counter() {
    let store = MemorySlotStore::new();
    let repo = SlotResearchRepository::new(&store, KEY, OWNER);
    let before = repo.list_all().unwrap();

    for doc in &before {
        let after = repo.increment_views(&doc.id).unwrap();
        let target = after.iter().find(|d| d.id == doc.id).unwrap();
        assert_eq!(target.views, doc.views + 1);
        assert_eq!(target.title, doc.title);
        assert_eq!(target.content, doc.content);
    }

    let after = repo.list_all().unwrap();
    assert_eq!(after.len(), before.len());
    for (old, new) in before.iter().zip(&after) {
        assert_eq!(old.id, new.id);
        assert_eq!(new.views, old.views + 1);
    }
}

#[test]
fn update_replaces_in_place_including_views() {
    let store = MemorySlotStore::new();
    let repo = SlotResearchRepository::new(&store, KEY, OWNER);

    let mut edited = repo.get("2").unwrap().unwrap();
    edited.title = "Edited".to_string();
    edited.views = 7;
    let items = repo.update(edited).unwrap();

    assert_eq!(items[1].id, "2");
    assert_eq!(items[1].title, "Edited");
    assert_eq!(items[1].views, 7);
    assert_eq!(repo.list_all().unwrap(), items);
}

#[test]
fn operations_after_delete_are_no_ops() {
    let store = MemorySlotStore::new();
    let repo = SlotResearchRepository::new(&store, KEY, OWNER);
    repo.list_all().unwrap();

    let after_delete = repo.delete("2").unwrap();
    assert_eq!(after_delete.len(), 2);
    assert!(after_delete.iter().all(|d| d.id != "2"));
    let blob = store.read_slot(KEY).unwrap();

    assert_eq!(repo.update(item("2", 5)).unwrap(), after_delete);
    assert_eq!(repo.increment_views("2").unwrap(), after_delete);
    assert_eq!(store.read_slot(KEY).unwrap(), blob);
    assert_eq!(repo.delete("2").unwrap(), after_delete);
}

#[test]
fn sqlite_backend_persists_across_repositories() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSlotStore::new(&conn);

    {
        let repo = SlotResearchRepository::new(&store, KEY, OWNER);
        repo.create(item("fresh", 0)).unwrap();
        repo.increment_views("fresh").unwrap();
    }

    let repo = SlotResearchRepository::new(&store, KEY, OWNER);
    let items = repo.list_all().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0].id, "fresh");
    assert_eq!(items[0].views, 1);
}

#[test]
fn mutation_on_corrupt_slot_rewrites_from_seed() {
    let store = MemorySlotStore::with_slot(KEY, "not json");
    let repo = SlotResearchRepository::new(&store, KEY, OWNER);

    let items = repo.create(item("new", 0)).unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(repo.load().unwrap().status, LoadStatus::Loaded);
}
