use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use touchbase::db::*;
use touchbase::error::TouchError;
use touchbase::model::*;
use touchbase::ops::*;
use touchbase::store::*;

fn setup() -> (Arc<dyn KeyValueStore>, ContactStore, GroupLabelStore) {
    let kv: Arc<dyn KeyValueStore> = Arc::new(SqliteKv::open_in_memory().unwrap());
    let contacts = ContactStore::open(kv.clone());
    let groups = GroupLabelStore::open(kv.clone());
    (kv, contacts, groups)
}

fn t0() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
}

fn alice() -> NewContact {
    NewContact::new("Alice", "1", "days", "Spain")
}

// ==========================================================================
// CONTACT STORE TESTS
// ==========================================================================

#[test]
fn open_on_empty_storage_is_empty() {
    let (_, contacts, _) = setup();
    assert!(contacts.contacts().is_empty());
}

#[test]
fn add_appends_and_persists() {
    let (kv, mut contacts, _) = setup();
    let added = contacts.add(&alice()).unwrap();

    assert_eq!(contacts.contacts(), &[added.clone()]);
    assert_eq!(contact_repo::load(kv.as_ref()).unwrap(), vec![added]);
}

#[test]
fn add_rejects_invalid_input_without_writing() {
    let (kv, mut contacts, _) = setup();
    let err = contacts.add(&NewContact::new("Alice", "", "days", "Spain")).unwrap_err();

    assert!(err.is_validation());
    assert!(contacts.contacts().is_empty());
    assert_eq!(kv.get(contact_repo::PEOPLE_KEY).unwrap(), None);
}

#[test]
fn insert_rejects_duplicate_id() {
    let (_, mut contacts, _) = setup();
    let added = contacts.add(&alice()).unwrap();

    let err = contacts.insert(added).unwrap_err();
    assert!(matches!(err, TouchError::AlreadyExists { .. }));
    assert_eq!(contacts.contacts().len(), 1);
}

#[test]
fn add_then_delete_restores_previous_list() {
    let (kv, mut contacts, _) = setup();
    contacts.add(&NewContact::new("Bob", "2", "hours", "Korea")).unwrap();
    let before = contacts.load().to_vec();

    let added = contacts.add(&alice()).unwrap();
    contacts.delete(&added.id).unwrap();

    assert_eq!(contacts.load(), before.as_slice());
    assert_eq!(contact_repo::load(kv.as_ref()).unwrap(), before);
}

#[test]
fn update_changes_only_the_matching_record() {
    let (_, mut contacts, _) = setup();
    let a = contacts.add(&alice()).unwrap();
    let b = contacts.add(&NewContact::new("Bob", "2", "hours", "Korea")).unwrap();

    let patch = ContactPatch {
        period: Some(3.0),
        period_unit: Some(PeriodUnit::Minutes),
    };
    let updated = contacts.update(&b.id, patch).unwrap();

    assert_eq!(updated.period, 3.0);
    assert_eq!(updated.period_unit, PeriodUnit::Minutes);
    assert_eq!(contacts.get(&a.id).unwrap(), &a);
}

#[test]
fn update_applies_partial_patch() {
    let (_, mut contacts, _) = setup();
    let a = contacts.add(&alice()).unwrap();

    let patch = ContactPatch {
        period: None,
        period_unit: Some(PeriodUnit::Hours),
    };
    let updated = contacts.update(&a.id, patch).unwrap();
    assert_eq!(updated.period, 1.0);
    assert_eq!(updated.period_unit, PeriodUnit::Hours);
}

#[test]
fn update_rejects_non_positive_period() {
    let (_, mut contacts, _) = setup();
    let a = contacts.add(&alice()).unwrap();

    let patch = ContactPatch {
        period: Some(0.0),
        period_unit: None,
    };
    assert!(matches!(
        contacts.update(&a.id, patch),
        Err(TouchError::NonPositive { .. })
    ));
    assert_eq!(contacts.get(&a.id).unwrap().period, 1.0);
}

#[test]
fn unknown_id_is_not_found() {
    let (_, mut contacts, _) = setup();
    contacts.add(&alice()).unwrap();
    let missing = Id::<Contact>::generate();

    assert!(matches!(
        contacts.update(&missing, ContactPatch::default()),
        Err(TouchError::NotFound { .. })
    ));
    assert!(matches!(
        contacts.mark_contacted(&missing, t0()),
        Err(TouchError::NotFound { .. })
    ));
    assert!(matches!(contacts.delete(&missing), Err(TouchError::NotFound { .. })));
    assert_eq!(contacts.contacts().len(), 1);
}

#[test]
fn mark_contacted_sets_timestamp_and_persists() {
    let (kv, mut contacts, _) = setup();
    let a = contacts.add(&alice()).unwrap();

    let marked = contacts.mark_contacted(&a.id, t0()).unwrap();
    assert_eq!(marked.last_contacted_at, Some(t0()));

    let stored = contact_repo::load(kv.as_ref()).unwrap();
    assert_eq!(stored[0].last_contacted_at, Some(t0()));
}

#[test]
fn reopened_store_sees_previous_writes() {
    let (kv, mut contacts, _) = setup();
    let a = contacts.add(&alice()).unwrap();
    contacts.mark_contacted(&a.id, t0()).unwrap();

    let reopened = ContactStore::open(kv);
    assert_eq!(reopened.contacts(), contacts.contacts());
}

#[test]
fn failed_write_is_returned_and_change_kept_in_memory() {
    let kv = Arc::new(MemoryKv::new());
    let mut contacts = ContactStore::open(kv.clone());

    kv.set_fail_writes(true);
    let err = contacts.add(&alice()).unwrap_err();
    assert!(matches!(err, TouchError::StorageWrite { .. }));
    assert_eq!(contacts.contacts().len(), 1);

    kv.set_fail_writes(false);
    contacts.save().unwrap();
    assert_eq!(contact_repo::load(kv.as_ref()).unwrap().len(), 1);
}

#[test]
fn failed_read_keeps_current_list() {
    let kv = Arc::new(MemoryKv::new());
    let mut contacts = ContactStore::open(kv.clone());
    contacts.add(&alice()).unwrap();

    kv.set_fail_reads(true);
    assert_eq!(contacts.load().len(), 1);
}

#[test]
fn failed_read_on_open_starts_empty() {
    let kv = Arc::new(MemoryKv::new());
    kv.set(contact_repo::PEOPLE_KEY, "not json").unwrap();

    let contacts = ContactStore::open(kv);
    assert!(contacts.contacts().is_empty());
}

#[test]
fn legacy_text_periods_load_and_survive_the_next_add() {
    let kv = Arc::new(MemoryKv::new());
    kv.set(
        contact_repo::PEOPLE_KEY,
        r#"[{"id":"a","name":"Ana","period":"","periodUnit":"days","country":"Spain"},
            {"id":"b","name":"Ben","period":"3","periodUnit":"days","country":"Korea"}]"#,
    )
    .unwrap();

    let mut contacts = ContactStore::open(kv.clone());
    assert_eq!(contacts.contacts().len(), 2);
    assert_eq!(contacts.contacts()[0].period, 0.0);
    assert_eq!(contacts.contacts()[1].period, 3.0);

    contacts.add(&NewContact::new("Cat", "1", "days", "Spain")).unwrap();
    let stored: Vec<String> = contact_repo::load(kv.as_ref())
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(stored, vec!["Ana", "Ben", "Cat"]);
}

#[test]
fn failed_first_load_refuses_to_overwrite_storage() {
    let kv = Arc::new(MemoryKv::new());
    kv.set(contact_repo::PEOPLE_KEY, "not json").unwrap();
    let mut contacts = ContactStore::open(kv.clone());
    assert!(!contacts.is_loaded());

    let err = contacts.add(&alice()).unwrap_err();
    assert!(matches!(err, TouchError::StorageRead { .. }));
    assert!(matches!(contacts.save(), Err(TouchError::StorageRead { .. })));
    assert!(contacts.contacts().is_empty());
    assert_eq!(kv.get(contact_repo::PEOPLE_KEY).unwrap().as_deref(), Some("not json"));

    kv.set(contact_repo::PEOPLE_KEY, "[]").unwrap();
    contacts.load();
    assert!(contacts.is_loaded());
    contacts.add(&alice()).unwrap();
    assert_eq!(contact_repo::load(kv.as_ref()).unwrap().len(), 1);
}

#[test]
fn failed_read_after_a_good_load_still_allows_writes() {
    let kv = Arc::new(MemoryKv::new());
    let mut contacts = ContactStore::open(kv.clone());
    contacts.add(&alice()).unwrap();

    kv.set_fail_reads(true);
    contacts.load();
    contacts.add(&NewContact::new("Bob", "2", "hours", "Korea")).unwrap();
    kv.set_fail_reads(false);
    assert_eq!(contact_repo::load(kv.as_ref()).unwrap().len(), 2);
}

#[test]
fn duplicate_stored_ids_are_replaced_on_load() {
    let kv = Arc::new(MemoryKv::new());
    kv.set(
        contact_repo::PEOPLE_KEY,
        r#"[{"id":"a","name":"Ana","period":1,"periodUnit":"days"},
            {"id":"a","name":"Ada","period":1,"periodUnit":"days"},
            {"id":"","name":"Bea","period":1,"periodUnit":"days"}]"#,
    )
    .unwrap();

    let mut contacts = ContactStore::open(kv.clone());
    let ids: Vec<Id<Contact>> = contacts.contacts().iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids[0].as_str(), "a");
    assert_ne!(ids[1], ids[0]);
    assert!(!ids[2].as_str().is_empty());
    assert_ne!(ids[2], ids[1]);

    let ada = contacts.delete(&ids[1]).unwrap();
    assert_eq!(ada.name, "Ada");
    assert_eq!(contacts.get(&ids[0]).unwrap().name, "Ana");

    let stored: Vec<String> = contact_repo::load(kv.as_ref())
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(stored, vec!["Ana", "Bea"]);
}

#[test]
fn find_by_name_is_case_insensitive() {
    let (_, mut contacts, _) = setup();
    contacts.add(&NewContact::new("Alice Smith", "1", "days", "Spain")).unwrap();
    contacts.add(&NewContact::new("Bob", "1", "days", "Spain")).unwrap();

    let found = contacts.find_by_name("alice");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Alice Smith");
}

// ==========================================================================
// GROUP LABEL STORE TESTS
// ==========================================================================

#[test]
fn groups_default_when_absent() {
    let (_, _, groups) = setup();
    assert_eq!(groups.labels(), &["Spain".to_string(), "Korea".to_string()]);
}

#[test]
fn add_group_appends_and_persists() {
    let (kv, _, mut groups) = setup();
    assert!(groups.add(" Peru ").unwrap());

    assert_eq!(groups.labels().last().map(String::as_str), Some("Peru"));
    assert_eq!(
        group_repo::load(kv.as_ref()).unwrap(),
        Some(vec!["Spain".to_string(), "Korea".to_string(), "Peru".to_string()])
    );
}

#[test]
fn add_existing_group_is_noop() {
    let (kv, _, mut groups) = setup();
    assert!(!groups.add("Spain").unwrap());
    assert_eq!(groups.labels().len(), 2);
    assert_eq!(group_repo::load(kv.as_ref()).unwrap(), None);
}

#[test]
fn add_blank_group_is_rejected() {
    let (_, _, mut groups) = setup();
    assert!(matches!(groups.add("  "), Err(TouchError::BlankField { .. })));
}

#[test]
fn remove_group_removes_and_persists() {
    let (kv, _, mut groups) = setup();
    assert!(groups.remove("Spain").unwrap());
    assert_eq!(groups.labels(), &["Korea".to_string()]);
    assert_eq!(
        group_repo::load(kv.as_ref()).unwrap(),
        Some(vec!["Korea".to_string()])
    );

    assert!(!groups.remove("Spain").unwrap());
}

#[test]
fn removing_all_groups_is_persisted_as_empty() {
    let (kv, _, mut groups) = setup();
    groups.remove("Spain").unwrap();
    groups.remove("Korea").unwrap();

    let reopened = GroupLabelStore::open(kv);
    assert!(reopened.labels().is_empty());
}

#[test]
fn removing_group_leaves_contacts_alone() {
    let (_, mut contacts, mut groups) = setup();
    let a = contacts.add(&alice()).unwrap();
    groups.remove("Spain").unwrap();

    assert_eq!(contacts.get(&a.id).unwrap().group, "Spain");
}

#[test]
fn stored_duplicate_groups_are_dropped_on_load() {
    let kv = Arc::new(MemoryKv::new());
    kv.set(group_repo::GROUP_OPTIONS_KEY, r#"["Spain","Spain","Peru"]"#).unwrap();

    let groups = GroupLabelStore::open(kv);
    assert_eq!(groups.labels(), &["Spain".to_string(), "Peru".to_string()]);
}

#[test]
fn failed_first_group_load_refuses_to_overwrite_storage() {
    let kv = Arc::new(MemoryKv::new());
    kv.set(group_repo::GROUP_OPTIONS_KEY, "{").unwrap();
    let mut groups = GroupLabelStore::open(kv.clone());

    assert!(matches!(groups.add("Peru"), Err(TouchError::StorageRead { .. })));
    assert!(matches!(groups.remove("Spain"), Err(TouchError::StorageRead { .. })));
    assert!(!groups.contains("Peru"));
    assert_eq!(kv.get(group_repo::GROUP_OPTIONS_KEY).unwrap().as_deref(), Some("{"));
}

// ==========================================================================
// CONTACT OPS TESTS
// ==========================================================================

#[test]
fn add_contact_with_known_group() {
    let (_, mut contacts, mut groups) = setup();
    let added = contact_ops::add_contact(&mut contacts, &mut groups, &alice()).unwrap();

    assert_eq!(added.group, "Spain");
    assert_eq!(groups.labels().len(), 2);
}

#[test]
fn add_contact_creates_unknown_group() {
    let (kv, mut contacts, mut groups) = setup();
    let input = NewContact::new("Rosa", "3", "days", "Peru");
    contact_ops::add_contact(&mut contacts, &mut groups, &input).unwrap();

    assert!(groups.contains("Peru"));
    let reopened = GroupLabelStore::open(kv);
    assert!(reopened.contains("Peru"));
}

#[test]
fn store_add_does_not_register_the_group() {
    let (kv, mut contacts, _) = setup();
    contacts.add(&NewContact::new("Rosa", "3", "days", "Peru")).unwrap();

    assert!(!GroupLabelStore::open(kv).contains("Peru"));
}

#[test]
fn invalid_add_contact_touches_neither_store() {
    let (_, mut contacts, mut groups) = setup();
    let input = NewContact::new("", "3", "days", "Peru");

    assert!(contact_ops::add_contact(&mut contacts, &mut groups, &input).is_err());
    assert!(contacts.contacts().is_empty());
    assert!(!groups.contains("Peru"));
}

#[test]
fn add_contact_keeps_contact_when_group_write_fails() {
    let kv = Arc::new(MemoryKv::new());
    let mut contacts = ContactStore::open(kv.clone());
    let mut groups = GroupLabelStore::open(kv.clone());

    kv.set_fail_writes(true);
    let input = NewContact::new("Rosa", "3", "days", "Peru");
    let err = contact_ops::add_contact(&mut contacts, &mut groups, &input).unwrap_err();
    assert!(matches!(err, TouchError::StorageWrite { .. }));
    assert_eq!(contacts.contacts().len(), 1);
    assert_eq!(contacts.contacts()[0].name, "Rosa");
    assert!(groups.contains("Peru"));

    kv.set_fail_writes(false);
    contacts.save().unwrap();
    groups.save().unwrap();
    assert_eq!(ContactStore::open(kv.clone()).contacts().len(), 1);
    assert!(GroupLabelStore::open(kv).contains("Peru"));
}

#[test]
fn add_contact_refused_before_contacts_load() {
    let kv = Arc::new(MemoryKv::new());
    kv.set(contact_repo::PEOPLE_KEY, "not json").unwrap();
    let mut contacts = ContactStore::open(kv.clone());
    let mut groups = GroupLabelStore::open(kv.clone());

    let input = NewContact::new("Rosa", "3", "days", "Peru");
    let err = contact_ops::add_contact(&mut contacts, &mut groups, &input).unwrap_err();
    assert!(matches!(err, TouchError::StorageRead { .. }));
    assert!(!groups.contains("Peru"));
}

#[test]
fn edit_period_parses_text_and_keeps_blank_fields() {
    let (_, mut contacts, _) = setup();
    let a = contacts.add(&alice()).unwrap();

    let edited = contact_ops::edit_period(&mut contacts, &a.id, Some(" 4 "), Some("")).unwrap();
    assert_eq!(edited.period, 4.0);
    assert_eq!(edited.period_unit, PeriodUnit::Days);

    let edited = contact_ops::edit_period(&mut contacts, &a.id, None, Some("Hours")).unwrap();
    assert_eq!(edited.period, 4.0);
    assert_eq!(edited.period_unit, PeriodUnit::Hours);
}

#[test]
fn edit_period_rejects_garbage() {
    let (_, mut contacts, _) = setup();
    let a = contacts.add(&alice()).unwrap();

    assert!(contact_ops::edit_period(&mut contacts, &a.id, Some("x"), None).is_err());
    assert!(contact_ops::edit_period(&mut contacts, &a.id, None, Some("weeks")).is_err());
    assert_eq!(contacts.get(&a.id).unwrap().period, 1.0);
}

#[test]
fn mark_contacted_now_uses_current_time() {
    let (_, mut contacts, _) = setup();
    let a = contacts.add(&alice()).unwrap();

    let before = Utc::now();
    let marked = contact_ops::mark_contacted_now(&mut contacts, &a.id).unwrap();
    let at = marked.last_contacted_at.unwrap();

    assert!(at >= before);
    assert!(at <= Utc::now());
}
