use animgroup_core::{
    AnimGroupError, AnimationGroupList, Config, ErrorKind, GroupId, MemoryStore, NodeHandle,
    PropertyStore, StoreError, TickRange,
};
use animgroup_test_fixtures::stores;

const INDEX: &str = "babylonjs_AnimationList";

fn seeded_store(name: &str) -> MemoryStore {
    let snapshot = stores::load(name).expect("load store fixture");
    let mut store = MemoryStore::new();
    for (key, value) in &snapshot.properties {
        store.set_string(key, value).unwrap();
    }
    store.set_string_array(INDEX, &snapshot.index).unwrap();
    store
}

/// Store whose properties cannot be deleted.
struct LockedStore(MemoryStore);

impl PropertyStore for LockedStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.0.get_string(key)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0.set_string(key, value)
    }

    fn delete(&mut self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::new("locked"))
    }

    fn get_string_array(&self, key: &str) -> Result<Vec<String>, StoreError> {
        self.0.get_string_array(key)
    }

    fn set_string_array(&mut self, key: &str, values: &[String]) -> Result<(), StoreError> {
        self.0.set_string_array(key, values)
    }
}

fn list_with_groups(store: &mut MemoryStore) -> AnimationGroupList {
    let mut list = AnimationGroupList::new();
    for (name, start, end, members) in [
        ("Walk", 0, 30, vec![NodeHandle(1), NodeHandle(2)]),
        ("Run", 10, 20, vec![NodeHandle(3)]),
        ("Idle", 0, 1, vec![]),
    ] {
        let mut g = list.create_group(TickRange::default());
        g.set_name(name);
        g.set_frame_start(start);
        g.set_frame_end(end);
        g.set_members(&members);
        list.push(g);
    }
    list.save_to_store(store).unwrap();
    list
}

/// Range of the third group, the legacy fixture's bodiless entry.
fn dangling_range(list: &AnimationGroupList) -> TickRange {
    let g = list.get(2).unwrap();
    TickRange::new(g.ticks_start(), g.ticks_end())
}

#[test]
fn legacy_store_loads_in_index_order_with_permissive_names() {
    let store = seeded_store("legacy");
    let mut list = AnimationGroupList::new();
    list.load_from_store(&store).unwrap();

    assert_eq!(list.len(), 3);
    let first = list.get(0).unwrap();
    assert_eq!(first.name(), "Old Walk");
    assert_eq!(first.members(), &[NodeHandle(1), NodeHandle(2), NodeHandle(3)]);
    assert!(!first.is_dirty());

    let second = list.get(1).unwrap();
    assert_eq!(second.name(), "Empty");
    assert_eq!((second.frame_start(), second.frame_end()), (1, 2));
    assert!(second.members().is_empty());
    assert!(!second.is_dirty());

    // Index entry without a body: default group under the indexed id.
    let dangling = list.get(2).unwrap();
    assert_eq!(
        dangling.id(),
        GroupId::parse("e4b1c2d3-0000-4000-8000-000000000003").unwrap()
    );
    assert_eq!(dangling.name(), "Animation");
    assert!(dangling.members().is_empty());
    assert_eq!(dangling_range(&list), TickRange::default());
}

#[test]
fn dangling_entry_takes_the_configured_default_range() {
    let store = seeded_store("legacy");
    let mut list = AnimationGroupList::new();
    list.set_default_range(TickRange::new(320, 16000));
    list.load_from_store(&store).unwrap();

    assert_eq!(dangling_range(&list), TickRange::new(320, 16000));
    assert!(list.get(2).unwrap().is_dirty());
    // Stored bodies keep their own range.
    assert_eq!(list.get(1).unwrap().ticks_start(), 160);
}

#[test]
fn failed_delete_keeps_the_group_in_the_list() {
    let mut inner = MemoryStore::new();
    let list_keys = list_with_groups(&mut inner).keys();
    let mut store = LockedStore(inner);
    let mut list = AnimationGroupList::new();
    list.load_from_store(&store).unwrap();

    let err = list.remove(0, &mut store).unwrap_err();
    assert!(matches!(err, AnimGroupError::Store(_)));
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(list.len(), 3);

    list.save_to_store(&mut store).unwrap();
    assert_eq!(store.get_string_array(INDEX).unwrap(), list_keys);
    assert!(store.0.contains(&list_keys[0]));
}

#[test]
fn one_bad_record_fails_the_whole_load() {
    let store = seeded_store("bad-member");
    let mut list = AnimationGroupList::new();
    let err = list.load_from_store(&store).unwrap_err();
    assert!(matches!(err, AnimGroupError::MemberHandles { failed: 3 }));
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn save_then_load_reproduces_the_list() {
    let mut store = MemoryStore::new();
    let saved = list_with_groups(&mut store);
    assert!(saved.iter().all(|g| !g.is_dirty()));

    let mut loaded = AnimationGroupList::new();
    loaded.load_from_store(&store).unwrap();
    assert_eq!(loaded.keys(), saved.keys());
    for (a, b) in saved.iter().zip(loaded.iter()) {
        assert_eq!(a.name(), b.name());
        assert_eq!(a.ticks_start(), b.ticks_start());
        assert_eq!(a.ticks_end(), b.ticks_end());
        assert_eq!(a.members(), b.members());
        assert!(!b.is_dirty());
    }
    assert_eq!(
        store.get_string(&saved.get(2).unwrap().key()).unwrap().as_deref(),
        Some("Idle;0;160;")
    );
}

#[test]
fn clean_save_writes_no_bodies_but_rewrites_index() {
    let mut store = MemoryStore::new();
    let mut list = list_with_groups(&mut store);
    let writes = store.string_writes();

    store.set_string_array(INDEX, &[]).unwrap();
    list.save_to_store(&mut store).unwrap();

    assert_eq!(store.string_writes(), writes);
    assert_eq!(store.get_string_array(INDEX).unwrap(), list.keys());
}

#[test]
fn only_dirty_groups_are_written() {
    let mut store = MemoryStore::new();
    let mut list = list_with_groups(&mut store);
    let writes = store.string_writes();

    list.get_mut(1).unwrap().set_frame_end(25);
    list.save_to_store(&mut store).unwrap();

    assert_eq!(store.string_writes(), writes + 1);
    let key = list.get(1).unwrap().key();
    assert_eq!(store.get_string(&key).unwrap().as_deref(), Some("Run;1600;4000;3"));
}

#[test]
fn invalid_name_aborts_save_before_index_is_written() {
    let mut store = MemoryStore::new();
    let mut list = AnimationGroupList::new();
    let mut good = list.create_group(TickRange::new(0, 160));
    good.set_name("Good");
    let mut bad = list.create_group(TickRange::new(0, 160));
    bad.set_name("Bad Name");
    list.push(good);
    list.push(bad);

    let err = list.save_to_store(&mut store).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(store.get_string_array(INDEX).unwrap().is_empty());
    assert!(list.get(1).unwrap().is_dirty());
}

#[test]
fn remove_deletes_the_record_property() {
    let mut store = MemoryStore::new();
    let mut list = list_with_groups(&mut store);
    let key = list.get(0).unwrap().key();

    let removed = list.remove(0, &mut store).unwrap().expect("group removed");
    assert!(removed.is_dirty());
    assert!(!store.contains(&key));
    assert!(list.remove(10, &mut store).unwrap().is_none());

    list.save_to_store(&mut store).unwrap();
    assert_eq!(store.get_string_array(INDEX).unwrap().len(), 2);
}

#[test]
fn custom_index_property_and_frame_rate() {
    let config = Config {
        ticks_per_frame: 200,
        index_property: "anim_groups".to_string(),
        ..Config::default()
    };
    let mut store = MemoryStore::new();
    let mut list = AnimationGroupList::with_config(config.clone());
    let mut g = list.create_group(TickRange::default());
    g.set_name("Clip");
    g.set_frame_end(3);
    assert_eq!(g.ticks_end(), 600);
    list.push(g);
    list.save_to_store(&mut store).unwrap();

    assert!(store.get_string_array(INDEX).unwrap().is_empty());
    assert_eq!(store.get_string_array("anim_groups").unwrap().len(), 1);

    let mut loaded = AnimationGroupList::with_config(config);
    loaded.load_from_store(&store).unwrap();
    assert_eq!(loaded.get(0).unwrap().frame_end(), 3);
}
