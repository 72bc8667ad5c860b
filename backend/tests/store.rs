mod support;

use pretty_assertions::assert_eq;
use sportsdesk::store::{StoreError, StudentOrder};
use support::{form, temp_store};

#[test]
fn insert_then_get_maps_blank_fields_to_none() {
    let (_dir, store) = temp_store();
    let id = store
        .insert(&form("Asha Rao", "1DS21CS001"), Some("asha.png"))
        .expect("insert");

    let record = store.get(id).expect("get").expect("record present");
    assert_eq!(record.name, "Asha Rao");
    assert_eq!(record.usn, "1DS21CS001");
    assert_eq!(record.photo_ref.as_deref(), Some("asha.png"));
    assert_eq!(record.blood_group, None);
    assert_eq!(record.sports.as_deref(), Some("Chess, Kabaddi"));
}

#[test]
fn duplicate_usn_is_rejected_without_writing() {
    let (_dir, store) = temp_store();
    store.insert(&form("Asha Rao", "1DS21CS001"), None).expect("first insert");

    let err = store
        .insert(&form("Someone Else", "1DS21CS001"), None)
        .expect_err("duplicate usn");
    assert!(matches!(err, StoreError::DuplicateUsn));
    assert_eq!(
        err.to_string(),
        "USN must be unique. A student with this USN already exists."
    );
    assert_eq!(store.count().expect("count"), 1);
}

#[test]
fn update_without_photo_keeps_stored_photo() {
    let (_dir, store) = temp_store();
    let id = store
        .insert(&form("Asha Rao", "1DS21CS001"), Some("asha.png"))
        .expect("insert");

    let mut edited = form("Asha R", "1DS21CS001");
    edited.blood_group = "B+".to_string();
    store.update(id, &edited, None).expect("update");

    let record = store.get(id).expect("get").expect("record present");
    assert_eq!(record.name, "Asha R");
    assert_eq!(record.blood_group.as_deref(), Some("B+"));
    assert_eq!(record.photo_ref.as_deref(), Some("asha.png"));

    store.update(id, &edited, Some("new.png")).expect("update photo");
    let record = store.get(id).expect("get").expect("record present");
    assert_eq!(record.photo_ref.as_deref(), Some("new.png"));
}

#[test]
fn update_to_taken_usn_fails_and_missing_id_is_not_found() {
    let (_dir, store) = temp_store();
    store.insert(&form("Asha Rao", "1DS21CS001"), None).expect("insert");
    let id = store.insert(&form("Bhavya N", "1DS21CS002"), None).expect("insert");

    let err = store
        .update(id, &form("Bhavya N", "1DS21CS001"), None)
        .expect_err("taken usn");
    assert!(matches!(err, StoreError::DuplicateUsn));
    let unchanged = store.get(id).expect("get").expect("record present");
    assert_eq!(unchanged.usn, "1DS21CS002");

    let err = store
        .update(999, &form("Nobody", "1DS21CS099"), None)
        .expect_err("missing id");
    assert!(matches!(err, StoreError::NotFound(999)));
    assert_eq!(err.to_string(), "Student not found.");
}

#[test]
fn select_by_ids_follows_requested_order() {
    let (_dir, store) = temp_store();
    let a = store.insert(&form("Asha", "1DS21CS001"), None).expect("insert");
    let b = store.insert(&form("Bhavya", "1DS21CS002"), None).expect("insert");
    let c = store.insert(&form("Chetan", "1DS21CS003"), None).expect("insert");

    let names: Vec<String> = store
        .select_by_ids(&[c, a, 404, b, a])
        .expect("select")
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["Chetan", "Asha", "Bhavya"]);
    assert!(store.select_by_ids(&[]).expect("select").is_empty());
}

#[test]
fn listings_order_by_name_or_newest() {
    let (_dir, store) = temp_store();
    store.insert(&form("chetan", "1DS21CS003"), None).expect("insert");
    store.insert(&form("Asha", "1DS21CS001"), None).expect("insert");
    store.insert(&form("Bhavya", "1DS21CS002"), None).expect("insert");

    let by_name: Vec<String> = store
        .select_all(StudentOrder::Name)
        .expect("select")
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(by_name, vec!["Asha", "Bhavya", "chetan"]);

    let newest: Vec<String> = store
        .select_all(StudentOrder::Newest)
        .expect("select")
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(newest, vec!["Bhavya", "Asha", "chetan"]);
}

#[test]
fn search_is_case_insensitive_substring() {
    let (_dir, store) = temp_store();
    store.insert(&form("Asha Rao", "1DS21CS001"), None).expect("insert");
    store.insert(&form("Rahul Rao", "1DS21CS002"), None).expect("insert");
    store.insert(&form("Bhavya N", "1DS21CS003"), None).expect("insert");

    let hits: Vec<String> = store
        .search_by_name("RAO")
        .expect("search")
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(hits, vec!["Asha Rao", "Rahul Rao"]);
    assert!(store.search_by_name("100%").expect("search").is_empty());
    assert_eq!(store.search_by_name("  ").expect("search").len(), 3);
}

#[test]
fn delete_removes_record_and_tolerates_missing_id() {
    let (_dir, store) = temp_store();
    let id = store.insert(&form("Asha", "1DS21CS001"), None).expect("insert");

    store.delete(id).expect("delete");
    store.delete(id).expect("delete again");
    assert_eq!(store.get(id).expect("get"), None);
    assert_eq!(store.count().expect("count"), 0);
}
