use chrono::NaiveDate;
use petreg_core::{
    CollectionRepository, KeyValueStore, MemoryStore, Owner, Pet, RepoError, SqliteStore,
    StoreError, OWNERS_KEY, PETS_KEY,
};
use std::collections::HashSet;

fn owner(id: &str, name: &str) -> Owner {
    Owner {
        identification: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", id.to_lowercase()),
        phone: String::new(),
        address: format!("{id} Main St"),
    }
}

fn pet(id: &str, owner_id: &str, date: &str) -> Pet {
    Pet {
        pet_id: id.to_string(),
        pet_name: "Luna".to_string(),
        pet_type: "cat".to_string(),
        birth_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        owner_id: owner_id.to_string(),
    }
}

#[test]
fn never_written_collection_is_empty() {
    let store = MemoryStore::new();
    let owners = CollectionRepository::<Owner, _>::new(&store);
    assert!(owners.load_all().is_empty());
    assert!(!owners.exists_by_key("anything"));
    assert_eq!(owners.find_by_key("anything"), None);
}

#[test]
fn persist_then_load_round_trips_order_and_fields() {
    let store = MemoryStore::new();
    let pets = CollectionRepository::<Pet, _>::new(&store);
    let original = vec![
        pet("B2", "X", "2019-12-31"),
        pet("A1", "", "2020-02-29"),
        pet("C3", "Y", "2001-01-01"),
    ];

    pets.persist_all(&original).unwrap();
    let loaded = pets.load_all();
    assert_eq!(loaded, original);

    pets.persist_all(&loaded).unwrap();
    assert_eq!(pets.load_all(), original);
}

#[test]
fn repeated_loads_without_writes_are_identical() {
    let store = MemoryStore::new();
    let owners = CollectionRepository::<Owner, _>::new(&store);
    owners.append(&owner("A1", "Ann")).unwrap();
    owners.append(&owner("B2", "Bob")).unwrap();

    assert_eq!(owners.load_all(), owners.load_all());
}

#[test]
fn keys_stay_unique_across_any_append_sequence() {
    let store = MemoryStore::new();
    let owners = CollectionRepository::<Owner, _>::new(&store);

    for id in ["A1", "B2", "A1", "C3", "B2", "a1", "C3"] {
        let _ = owners.append(&owner(id, "Name"));
    }

    let stored = owners.load_all();
    let keys: Vec<_> = stored.iter().map(|o| o.identification.as_str()).collect();
    assert_eq!(keys, vec!["A1", "B2", "C3", "a1"]);
    let unique: HashSet<_> = keys.iter().collect();
    assert_eq!(unique.len(), keys.len());
}

#[test]
fn collections_are_independent_under_one_store() {
    let store = MemoryStore::new();
    CollectionRepository::<Owner, _>::new(&store)
        .append(&owner("K1", "Kim"))
        .unwrap();
    CollectionRepository::<Pet, _>::new(&store)
        .append(&pet("K1", "K1", "2020-01-01"))
        .unwrap();

    assert!(store.read(OWNERS_KEY).unwrap().is_some());
    assert!(store.read(PETS_KEY).unwrap().is_some());
    assert_eq!(CollectionRepository::<Pet, _>::new(&store).load_all().len(), 1);
}

#[test]
fn stored_text_uses_persisted_field_names() {
    let store = MemoryStore::new();
    CollectionRepository::<Owner, _>::new(&store)
        .append(&owner("A1", "Ann Lee"))
        .unwrap();
    CollectionRepository::<Pet, _>::new(&store)
        .append(&pet("P9", "A1", "2021-06-15"))
        .unwrap();

    let owners: serde_json::Value =
        serde_json::from_str(&store.read(OWNERS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(
        owners,
        serde_json::json!([{
            "identificacion": "A1",
            "nombre": "Ann Lee",
            "correo": "a1@example.com",
            "telefono": "",
            "direccion": "A1 Main St"
        }])
    );

    let pets: serde_json::Value =
        serde_json::from_str(&store.read(PETS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(pets[0]["idMascota"], "P9");
    assert_eq!(pets[0]["tipoMascota"], "cat");
    assert_eq!(pets[0]["fechaNacimiento"], "2021-06-15");
    assert_eq!(pets[0]["duenoAsignado"], "A1");
}

#[test]
fn existing_stored_layout_loads() {
    let store = MemoryStore::new();
    store.seed(
        PETS_KEY,
        r#"[{"idMascota":"M1","nombreMascota":"Toby","tipoMascota":"Perro","fechaNacimiento":"2018-07-04","duenoAsignado":""}]"#,
    );

    let pets = CollectionRepository::<Pet, _>::new(&store).load_all();
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].pet_name, "Toby");
    assert_eq!(pets[0].owner_id, "");
}

#[test]
fn undecodable_collection_degrades_to_empty() {
    let store = MemoryStore::new();
    store.seed(OWNERS_KEY, r#"{"identificacion":"A1"}"#);
    store.seed(
        PETS_KEY,
        r#"[{"idMascota":"M1","nombreMascota":"Toby","tipoMascota":"x","fechaNacimiento":"not a date","duenoAsignado":""}]"#,
    );

    assert!(CollectionRepository::<Owner, _>::new(&store).load_all().is_empty());
    assert!(CollectionRepository::<Pet, _>::new(&store).load_all().is_empty());
}

#[test]
fn rejected_write_propagates_store_error() {
    let store = MemoryStore::read_only();
    let err = CollectionRepository::<Owner, _>::new(&store)
        .append(&owner("A1", "Ann"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Store(StoreError::Unavailable(_))));
}

#[test]
fn sqlite_store_keeps_collections_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.sqlite3");

    {
        let store = SqliteStore::open(&path).unwrap();
        let owners = CollectionRepository::<Owner, _>::new(&store);
        owners.append(&owner("A1", "Ann")).unwrap();
        owners.append(&owner("B2", "Bob")).unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    let owners = CollectionRepository::<Owner, _>::new(&store);
    let names: Vec<_> = owners.load_all().into_iter().map(|o| o.name).collect();
    assert_eq!(names, vec!["Ann", "Bob"]);
    assert!(matches!(
        owners.append(&owner("A1", "Again")),
        Err(RepoError::DuplicateKey { .. })
    ));
}
