use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{
    Book, BookDraft, BookRepository, BookService, InMemoryBookRepository, RepoResult,
    SqliteBookRepository,
};
use std::cell::RefCell;
use std::collections::HashSet;

/// Store double that records every call before delegating to memory.
#[derive(Default)]
struct RecordingRepository {
    inner: InMemoryBookRepository,
    calls: RefCell<Vec<&'static str>>,
}

impl RecordingRepository {
    fn calls(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|call| **call == name).count()
    }

    fn record(&self, name: &'static str) {
        self.calls.borrow_mut().push(name);
    }
}

impl BookRepository for RecordingRepository {
    fn save(&self, draft: BookDraft) -> RepoResult<Book> {
        self.record("save");
        self.inner.save(draft)
    }

    fn find_by_id(&self, id: &str) -> RepoResult<Option<Book>> {
        self.record("find_by_id");
        self.inner.find_by_id(id)
    }

    fn exists_by_id(&self, id: &str) -> RepoResult<bool> {
        self.record("exists_by_id");
        self.inner.exists_by_id(id)
    }

    fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        self.record("delete_by_id");
        self.inner.delete_by_id(id)
    }

    fn find_all(&self) -> RepoResult<Vec<Book>> {
        self.record("find_all");
        self.inner.find_all()
    }

    fn find_by_title_containing_or_author_containing(
        &self,
        title: &str,
        author: &str,
    ) -> RepoResult<Vec<Book>> {
        self.record("find_by_title_containing_or_author_containing");
        self.inner
            .find_by_title_containing_or_author_containing(title, author)
    }
}

fn title1() -> BookDraft {
    BookDraft::new("Title1", "Author1", 1).with_isbn("232434")
}

fn title2() -> BookDraft {
    BookDraft::new("Title2", "Author2", 2).with_isbn("4342")
}

#[test]
fn create_returns_same_fields_with_assigned_id() {
    let service = BookService::new(RecordingRepository::default());

    let created = service.create(title1()).unwrap();

    assert!(!created.id.is_empty());
    assert_eq!(created.title, "Title1");
    assert_eq!(created.author, "Author1");
    assert_eq!(created.publish_year, 1);
    assert_eq!(created.isbn.as_deref(), Some("232434"));
    assert_eq!(service.repository().calls("save"), 1);
}

#[test]
fn create_ignores_caller_supplied_id() {
    let service = BookService::new(InMemoryBookRepository::new());
    let existing = service.create(title1()).unwrap();

    let created = service
        .create(title2().with_id(existing.id.clone()))
        .unwrap();

    assert_ne!(created.id, existing.id);
    let kept = service.get_by_id(&existing.id).unwrap().unwrap();
    assert_eq!(kept.title, "Title1");
    assert_eq!(service.list_all().unwrap().len(), 2);
}

#[test]
fn get_by_id_after_create_returns_same_book() {
    let service = BookService::new(RecordingRepository::default());
    let created = service.create(title1()).unwrap();

    let fetched = service.get_by_id(&created.id).unwrap();

    assert_eq!(fetched, Some(created));
    assert_eq!(service.repository().calls("find_by_id"), 1);
}

#[test]
fn get_by_id_missing_is_absent_not_error() {
    let service = BookService::new(InMemoryBookRepository::new());
    assert_eq!(service.get_by_id("1").unwrap(), None);
}

#[test]
fn update_missing_id_returns_none_without_saving() {
    let service = BookService::new(RecordingRepository::default());

    let updated = service.update("1", title1()).unwrap();

    assert!(updated.is_none());
    assert_eq!(service.repository().calls("exists_by_id"), 1);
    assert_eq!(service.repository().calls("save"), 0);
    assert!(service.list_all().unwrap().is_empty());
}

#[test]
fn update_existing_id_forces_path_id_over_body_id() {
    let service = BookService::new(RecordingRepository::default());
    let created = service.create(title1()).unwrap();

    let updated = service
        .update(&created.id, title2().with_id("some-other-id"))
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Title2");
    assert_eq!(service.repository().calls("exists_by_id"), 1);
    assert_eq!(service.repository().calls("save"), 2);
    assert!(service.get_by_id("some-other-id").unwrap().is_none());
}

#[test]
fn delete_then_get_is_absent_regardless_of_prior_state() {
    let service = BookService::new(RecordingRepository::default());
    let created = service.create(title1()).unwrap();

    service.delete(&created.id).unwrap();
    assert!(service.get_by_id(&created.id).unwrap().is_none());

    service.delete(&created.id).unwrap();
    service.delete("never-existed").unwrap();
    assert!(service.get_by_id("never-existed").unwrap().is_none());
    assert_eq!(service.repository().calls("delete_by_id"), 3);
}

#[test]
fn list_all_delegates_to_find_all() {
    let service = BookService::new(RecordingRepository::default());
    service.create(title1()).unwrap();
    service.create(title2()).unwrap();

    let books = service.list_all().unwrap();

    assert_eq!(books.len(), 2);
    assert_eq!(books[0].title, "Title1");
    assert_eq!(books[1].title, "Title2");
    assert_eq!(service.repository().calls("find_all"), 1);
}

/// Store double that deletes the row right after answering an existence
/// check, simulating a concurrent delete between update's check and write.
#[derive(Default)]
struct DeleteAfterExistsCheck {
    inner: InMemoryBookRepository,
}

impl BookRepository for DeleteAfterExistsCheck {
    fn save(&self, draft: BookDraft) -> RepoResult<Book> {
        self.inner.save(draft)
    }

    fn find_by_id(&self, id: &str) -> RepoResult<Option<Book>> {
        self.inner.find_by_id(id)
    }

    fn exists_by_id(&self, id: &str) -> RepoResult<bool> {
        let exists = self.inner.exists_by_id(id)?;
        self.inner.delete_by_id(id)?;
        Ok(exists)
    }

    fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        self.inner.delete_by_id(id)
    }

    fn find_all(&self) -> RepoResult<Vec<Book>> {
        self.inner.find_all()
    }

    fn find_by_title_containing_or_author_containing(
        &self,
        title: &str,
        author: &str,
    ) -> RepoResult<Vec<Book>> {
        self.inner
            .find_by_title_containing_or_author_containing(title, author)
    }
}

#[test]
fn update_racing_a_delete_resurrects_the_record() {
    let service = BookService::new(DeleteAfterExistsCheck::default());
    let created = service.create(title1()).unwrap();

    let updated = service.update(&created.id, title2()).unwrap();

    let updated = updated.expect("update should report success after a passing check");
    assert_eq!(updated.id, created.id);
    let reloaded = service.get_by_id(&created.id).unwrap().unwrap();
    assert_eq!(reloaded.title, "Title2");
    assert_eq!(reloaded.author, "Author2");
    assert_eq!(service.list_all().unwrap().len(), 1);
}

#[test]
fn end_to_end_lifecycle_over_sqlite() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let first = service.create(title1()).unwrap();
    let second = service.create(title2()).unwrap();

    let listed: HashSet<_> = service
        .list_all()
        .unwrap()
        .into_iter()
        .map(|book| book.id)
        .collect();
    let expected: HashSet<_> = [first.id.clone(), second.id.clone()].into_iter().collect();
    assert_eq!(listed, expected);

    let updated = service
        .update(
            &first.id,
            BookDraft::new("Title1 Revised", "Author1", 3).with_isbn("978-0"),
        )
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, first.id);

    let reloaded = service
        .list_all()
        .unwrap()
        .into_iter()
        .find(|book| book.id == first.id)
        .unwrap();
    assert_eq!(reloaded.title, "Title1 Revised");
    assert_eq!(reloaded.publish_year, 3);
    assert_eq!(reloaded.isbn.as_deref(), Some("978-0"));

    service.delete(&first.id).unwrap();
    service.delete(&second.id).unwrap();
    assert!(service.list_all().unwrap().is_empty());
}
