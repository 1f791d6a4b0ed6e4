use pick_contact::db::contact_repo::{self, NewContact};
use pick_contact::db::{schema, SqliteDirectory};
use pick_contact::directory::{columns, Directory, PhotoSource, Table};
use pick_contact::model::*;
use pick_contact::ContactError;

fn setup() -> SqliteDirectory {
    SqliteDirectory::new(schema::test_connection())
}

// ==========================================================================
// CONTACT REPO TESTS
// ==========================================================================

#[test]
fn contact_insert_and_find() {
    let dir = setup();
    let (id, r) = contact_repo::insert(dir.connection(), &NewContact::named("  Alice  ")).unwrap();

    let found = contact_repo::find_by_id(dir.connection(), &id).unwrap().unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.name.as_deref(), Some("Alice"));

    // The listed reference resolves to the same lookup key as the one
    // returned at insert time.
    assert_eq!(found.contact_ref.target().unwrap(), r.target().unwrap());
}

#[test]
fn contact_insert_rejects_blank_name() {
    let dir = setup();
    let err = contact_repo::insert(dir.connection(), &NewContact::named("   ")).unwrap_err();
    assert!(matches!(err, ContactError::BlankField { .. }));
    assert!(contact_repo::list_all(dir.connection()).unwrap().is_empty());
}

#[test]
fn contact_insert_generates_distinct_references() {
    let dir = setup();
    let (_, a) = contact_repo::insert(dir.connection(), &NewContact::named("A")).unwrap();
    let (_, b) = contact_repo::insert(dir.connection(), &NewContact::named("A")).unwrap();
    assert_ne!(a, b);
}

#[test]
fn contact_list_is_sorted_by_name() {
    let dir = setup();
    for name in ["charlie", "Alice", "bob"] {
        contact_repo::insert(dir.connection(), &NewContact::named(name)).unwrap();
    }

    let names: Vec<_> = contact_repo::list_all(dir.connection())
        .unwrap()
        .into_iter()
        .filter_map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Alice", "bob", "charlie"]);
}

#[test]
fn contact_find_by_name_is_case_insensitive_substring() {
    let dir = setup();
    contact_repo::insert(dir.connection(), &NewContact::named("Ada Lovelace")).unwrap();
    contact_repo::insert(dir.connection(), &NewContact::named("Alan Turing")).unwrap();
    contact_repo::insert(dir.connection(), &NewContact::default()).unwrap();

    let found = contact_repo::find_by_name(dir.connection(), "LOVE").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name.as_deref(), Some("Ada Lovelace"));

    let found = contact_repo::find_by_name(dir.connection(), "a").unwrap();
    assert_eq!(found.len(), 2);
}

#[test]
fn contact_find_by_name_orders_matches_by_name() {
    let dir = setup();
    for name in ["Zara Adams", "ada", "Bob"] {
        contact_repo::insert(dir.connection(), &NewContact::named(name)).unwrap();
    }

    let names: Vec<_> = contact_repo::find_by_name(dir.connection(), " AD ")
        .unwrap()
        .into_iter()
        .filter_map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["ada", "Zara Adams"]);
}

#[test]
fn contact_insert_in_commits_with_caller() {
    let dir = setup();
    {
        let tx = dir.connection().unchecked_transaction().unwrap();
        contact_repo::insert_in(&tx, &NewContact::named("Ada")).unwrap();
        // Dropped without commit.
    }
    assert!(contact_repo::list_all(dir.connection()).unwrap().is_empty());

    let tx = dir.connection().unchecked_transaction().unwrap();
    contact_repo::insert_in(&tx, &NewContact::named("Ada")).unwrap();
    tx.commit().unwrap();
    assert_eq!(contact_repo::list_all(dir.connection()).unwrap().len(), 1);
}

#[test]
fn contact_rename_and_clear_name() {
    let dir = setup();
    let (id, r) = contact_repo::insert(dir.connection(), &NewContact::named("Ada")).unwrap();

    contact_repo::rename(dir.connection(), &id, Some("Ada King")).unwrap();
    let row = dir.query_primary(&r).unwrap().unwrap();
    assert_eq!(row.get_str(columns::DISPLAY_NAME), Some("Ada King".into()));

    contact_repo::rename(dir.connection(), &id, Some("  ")).unwrap();
    let row = dir.query_primary(&r).unwrap().unwrap();
    assert_eq!(row.get_str(columns::DISPLAY_NAME), None);
}

#[test]
fn contact_delete_cascades_to_details() {
    let dir = setup();
    let mut contact = NewContact::named("Ada");
    contact.phones = vec![PhoneNumber::new("555", PhoneLabel::Home)];
    contact.emails = vec![EmailAddress::new("a@x", EmailLabel::Home)];
    let (id, _) = contact_repo::insert(dir.connection(), &contact).unwrap();
    let photo_ref = contact_repo::insert_photo(dir.connection(), &id, &[1, 2]).unwrap();

    contact_repo::delete(dir.connection(), &id).unwrap();

    for table in Table::ALL {
        assert!(dir.query_by_contact_id(*table, &id).unwrap().is_empty());
    }
    assert!(dir.open_photo(&photo_ref).is_err());
    assert!(contact_repo::find_by_id(dir.connection(), &id).unwrap().is_none());
}

// ==========================================================================
// DETAIL TABLE TESTS
// ==========================================================================

#[test]
fn details_are_scoped_to_their_contact() {
    let dir = setup();
    let mut ada = NewContact::named("Ada");
    ada.emails = vec![EmailAddress::new("ada@example.com", EmailLabel::Home)];
    let mut alan = NewContact::named("Alan");
    alan.emails = vec![EmailAddress::new("alan@example.com", EmailLabel::Work)];

    let (ada_id, _) = contact_repo::insert(dir.connection(), &ada).unwrap();
    let (alan_id, _) = contact_repo::insert(dir.connection(), &alan).unwrap();

    let rows = dir.query_by_contact_id(Table::Email, &ada_id).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_str(columns::ADDRESS), Some("ada@example.com".into()));
    assert_eq!(rows[0].get_int(columns::TYPE), Some(EmailLabel::Home.code()));

    let rows = dir.query_by_contact_id(Table::Email, &alan_id).unwrap();
    assert_eq!(rows[0].get_str(columns::ADDRESS), Some("alan@example.com".into()));
}

#[test]
fn postal_rows_carry_every_column() {
    let dir = setup();
    let mut contact = NewContact::named("Ada");
    contact.addresses = vec![PostalAddress {
        street: "1 Main St".into(),
        city: "Springfield".into(),
        region: "IL".into(),
        postal_code: "62701".into(),
        country: "USA".into(),
        label: AddressLabel::Work,
    }];
    let (id, _) = contact_repo::insert(dir.connection(), &contact).unwrap();

    let rows = dir.query_by_contact_id(Table::PostalAddress, &id).unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.get_str(columns::STREET), Some("1 Main St".into()));
    assert_eq!(row.get_str(columns::CITY), Some("Springfield".into()));
    assert_eq!(row.get_str(columns::REGION), Some("IL".into()));
    assert_eq!(row.get_str(columns::POSTCODE), Some("62701".into()));
    assert_eq!(row.get_str(columns::COUNTRY), Some("USA".into()));
    assert_eq!(row.get_int(columns::TYPE), Some(2));
}

#[test]
fn photo_insert_sets_contact_photo_uri() {
    let dir = setup();
    let (id, r) = contact_repo::insert(dir.connection(), &NewContact::named("Ada")).unwrap();
    let photo_ref = contact_repo::insert_photo(dir.connection(), &id, &[9, 9, 9]).unwrap();

    let row = dir.query_primary(&r).unwrap().unwrap();
    assert_eq!(row.get_str(columns::PHOTO_URI), Some(photo_ref.as_str().to_string()));
    assert_eq!(dir.open_photo(&photo_ref).unwrap(), vec![9, 9, 9]);

    // Replacing the photo keeps a single blob under the same reference.
    let again = contact_repo::insert_photo(dir.connection(), &id, &[7]).unwrap();
    assert_eq!(again, photo_ref);
    assert_eq!(dir.open_photo(&photo_ref).unwrap(), vec![7]);
}

#[test]
fn schema_initialize_is_repeatable() {
    let dir = setup();
    schema::initialize(dir.connection()).unwrap();
    contact_repo::insert(dir.connection(), &NewContact::named("Ada")).unwrap();
    schema::initialize(dir.connection()).unwrap();
    assert_eq!(contact_repo::list_all(dir.connection()).unwrap().len(), 1);
}

#[test]
fn open_creates_database_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("contacts.db");

    {
        let dir = SqliteDirectory::open(&path).unwrap();
        contact_repo::insert(dir.connection(), &NewContact::named("Ada")).unwrap();
    }
    assert!(path.exists());

    let dir = SqliteDirectory::open(&path).unwrap();
    assert_eq!(contact_repo::list_all(dir.connection()).unwrap().len(), 1);
}
