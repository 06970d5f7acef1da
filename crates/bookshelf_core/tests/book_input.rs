use bookshelf_core::{Book, BookInput, BookService, InMemoryBookRepository};
use serde_json::json;

fn parse(value: serde_json::Value) -> BookInput {
    serde_json::from_value(value).unwrap()
}

#[test]
fn valid_payload_becomes_draft() {
    let draft = parse(json!({
        "title": "Title1",
        "author": "Author1",
        "publishYear": 1,
        "isbn": "232434"
    }))
    .validate()
    .unwrap();

    assert_eq!(draft.id, None);
    assert_eq!(draft.title, "Title1");
    assert_eq!(draft.author, "Author1");
    assert_eq!(draft.publish_year, 1);
    assert_eq!(draft.isbn.as_deref(), Some("232434"));
}

#[test]
fn isbn_is_optional_and_any_year_is_accepted() {
    let draft = parse(json!({
        "title": "Old",
        "author": "Anon",
        "publishYear": -500
    }))
    .validate()
    .unwrap();

    assert_eq!(draft.isbn, None);
    assert_eq!(draft.publish_year, -500);
}

#[test]
fn blank_fields_and_bad_isbn_are_rejected_per_field() {
    let rejection = parse(json!({
        "title": "   ",
        "author": "",
        "isbn": "978-X"
    }))
    .validate()
    .unwrap_err();

    let pairs: Vec<_> = rejection
        .violations
        .iter()
        .map(|violation| (violation.field, violation.message))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("title", "Title is mandatory"),
            ("author", "Author is mandatory"),
            ("publishYear", "Publish Year is mandatory"),
            ("isbn", "ISBN should be valid"),
        ]
    );
}

#[test]
fn empty_isbn_is_rejected() {
    let rejection = parse(json!({
        "title": "T",
        "author": "A",
        "publishYear": 2000,
        "isbn": ""
    }))
    .validate()
    .unwrap_err();

    assert!(rejection.has_field("isbn"));
    assert_eq!(rejection.violations.len(), 1);
}

#[test]
fn rejection_serializes_as_structured_field_list() {
    let rejection = parse(json!({ "author": "A", "publishYear": 1 }))
        .validate()
        .unwrap_err();

    let value = serde_json::to_value(&rejection).unwrap();
    assert_eq!(
        value,
        json!({ "violations": [{ "field": "title", "message": "Title is mandatory" }] })
    );
}

#[test]
fn book_serializes_with_camel_case_keys() {
    let service = BookService::new(InMemoryBookRepository::new());
    let draft = parse(json!({
        "id": "ignored",
        "title": "Title1",
        "author": "Author1",
        "publishYear": 1
    }))
    .validate()
    .unwrap();
    assert_eq!(draft.id.as_deref(), Some("ignored"));

    let book = service.create(draft).unwrap();
    let value = serde_json::to_value(&book).unwrap();

    assert_eq!(value["publishYear"], json!(1));
    assert_ne!(value["id"], json!("ignored"));
    assert!(value.get("isbn").is_none());

    let decoded: Book = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, book);
}
