use slrg_core::db::open_db_in_memory;
use slrg_core::{
    Appearances, Assessment, CrudEndpoint, Education, EntityStore, FurtherEducation, Member,
    MemoryStore, RelatedListEndpoint, SqliteStore,
};

#[test]
fn missing_member_yields_none() {
    let members = MemoryStore::<Member>::new();
    let assessments = MemoryStore::<Assessment>::new();
    let related = RelatedListEndpoint::new(&members, &assessments);

    assert_eq!(related.list_by_parent(9).unwrap(), None);
}

#[test]
fn member_without_records_yields_empty_list() {
    let members = MemoryStore::<Member>::new();
    let educations = MemoryStore::<Education>::new();
    members.insert(&Member::new("Alice", "Keller")).unwrap();

    let related = RelatedListEndpoint::new(&members, &educations);
    assert_eq!(related.list_by_parent(1).unwrap(), Some(Vec::new()));
}

#[test]
fn lists_only_records_of_requested_member() {
    let members = MemoryStore::<Member>::new();
    let assessments = MemoryStore::<Assessment>::new();
    members.insert(&Member::new("Alice", "Keller")).unwrap();
    members.insert(&Member::new("Bruno", "Meier")).unwrap();

    let endpoint = CrudEndpoint::new(&assessments);
    endpoint.create(Assessment::new(1, 60)).unwrap();
    endpoint.create(Assessment::new(2, 75)).unwrap();
    endpoint.create(Assessment::new(1, 95)).unwrap();

    let related = RelatedListEndpoint::new(&members, &assessments);
    let alice = related.list_by_parent(1).unwrap().unwrap();
    let ids: Vec<Option<i64>> = alice.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![Some(1), Some(3)]);

    let bruno = related.list_by_parent(2).unwrap().unwrap();
    assert_eq!(bruno.len(), 1);
    assert_eq!(bruno[0].score, 75);
}

#[test]
fn sqlite_related_lists_cover_every_owned_entity() {
    let conn = open_db_in_memory().unwrap();
    let members = SqliteStore::<Member>::try_new(&conn).unwrap();
    let alice = members.insert(&Member::new("Alice", "Keller")).unwrap();
    let alice_id = alice.id.unwrap();

    let appearances = SqliteStore::<Appearances>::try_new(&conn).unwrap();
    let mut gala = Appearances::new(alice_id, "Lake Zurich crossing");
    gala.hours = Some(6);
    appearances.insert(&gala).unwrap();

    let further = SqliteStore::<FurtherEducation>::try_new(&conn).unwrap();
    further
        .insert(&FurtherEducation::new(alice_id, "CPR refresher"))
        .unwrap();

    let listed = RelatedListEndpoint::new(&members, &appearances)
        .list_by_parent(alice_id)
        .unwrap()
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].hours, Some(6));

    let listed = RelatedListEndpoint::new(&members, &further)
        .list_by_parent(alice_id)
        .unwrap()
        .unwrap();
    assert_eq!(listed[0].course, "CPR refresher");

    members.delete(alice_id).unwrap();
    let after_delete = RelatedListEndpoint::new(&members, &further)
        .list_by_parent(alice_id)
        .unwrap();
    assert_eq!(after_delete, None);
}
