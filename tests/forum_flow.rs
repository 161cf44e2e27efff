//! End-to-end forum flows against a real PostgreSQL instance.
//!
//! These tests spin up one PostgreSQL container each and are skipped by
//! default. Run them with a local Docker daemon:
//!
//! ```bash
//! cargo test -- --ignored
//! ```

mod common;

use common::TestStore;
use crossbeam_channel::unbounded;
use testcontainers::clients::Cli;

use umbrella::entity::account::{self, Account};
use umbrella::schema;
use umbrella::{
    ColumnTrait, EntityTrait, Forum, ForumError, MayPostgresExecutor, NewAccount, NewPost,
    PageError, UpdatePost, UpdateProfile,
};

fn account_form(name: &str) -> NewAccount {
    NewAccount {
        username: name.to_string(),
        email: format!("{name}@example.com"),
        password: "hunter2".to_string(),
        bio: None,
    }
}

fn post_form(title: &str, category: &str) -> NewPost {
    NewPost {
        title: title.to_string(),
        content: "Some body text.".to_string(),
        category_title: category.to_string(),
    }
}

fn bootstrapped(store: &TestStore<'_>) -> Forum<MayPostgresExecutor> {
    let executor = store.executor();
    schema::create_all_tables(&executor).expect("schema bootstraps");
    Forum::new(executor)
}

#[test]
#[ignore = "requires a local Docker daemon"]
fn bootstrap_creates_every_table() {
    let docker = Cli::default();
    let store = TestStore::new(&docker);
    let executor = store.executor();

    schema::create_all_tables(&executor).unwrap();
    for table in ["profile", "category", "post", "comment"] {
        assert!(
            schema::table_exists(&executor, table).unwrap(),
            "{table} missing"
        );
    }
    assert!(!schema::table_exists(&executor, "missing_table").unwrap());

    // A second bootstrap is a no-op thanks to IF NOT EXISTS.
    schema::create_all_tables(&executor).unwrap();
}

#[test]
#[ignore = "requires a local Docker daemon"]
fn insert_round_trips_with_store_generated_fields() {
    let docker = Cli::default();
    let store = TestStore::new(&docker);
    let forum = bootstrapped(&store);

    let mut form = account_form("ferris");
    form.bio = Some("Writes Rust.".to_string());
    let created = forum.register_account(form).unwrap();
    assert!(created.id >= 1);
    assert!(!created.is_deleted);
    assert_eq!(created.bio.as_deref(), Some("Writes Rust."));

    let fetched = forum.find_account_by_username("ferris").unwrap();
    assert_eq!(fetched, created);
}

#[test]
#[ignore = "requires a local Docker daemon"]
fn soft_deleted_accounts_leave_default_reads() {
    let docker = Cli::default();
    let store = TestStore::new(&docker);
    let forum = bootstrapped(&store);

    let created = forum.register_account(account_form("casper")).unwrap();
    forum.delete_account(created.id).unwrap();

    assert!(matches!(
        forum.get_account(created.id),
        Err(ForumError::NotFound("account"))
    ));
    assert!(matches!(
        forum.find_account_by_username("casper"),
        Err(ForumError::NotFound(_))
    ));

    // The row is still there, flagged.
    let ghost = Account::find_with_deleted()
        .filter(account::Column::Id.eq(created.id))
        .one(forum.executor())
        .unwrap();
    assert!(ghost.is_deleted);
}

#[test]
#[ignore = "requires a local Docker daemon"]
fn duplicates_are_rejected_without_touching_the_table() {
    let docker = Cli::default();
    let store = TestStore::new(&docker);
    let forum = bootstrapped(&store);

    forum.register_account(account_form("sam")).unwrap();

    let err = forum.register_account(account_form("sam")).unwrap_err();
    assert!(matches!(err, ForumError::DuplicateUsername(name) if name == "sam"));

    let mut form = account_form("another");
    form.email = "sam@example.com".to_string();
    let err = forum.register_account(form).unwrap_err();
    assert!(matches!(err, ForumError::DuplicateEmail(_)));

    let total = Account::find_with_deleted().count(forum.executor()).unwrap();
    assert_eq!(total, 1);
}

#[test]
#[ignore = "requires a local Docker daemon"]
fn posting_requires_a_category_and_a_unique_title() {
    let docker = Cli::default();
    let store = TestStore::new(&docker);
    let forum = bootstrapped(&store);

    let author = forum.register_account(account_form("ada")).unwrap();

    let err = forum
        .create_post(author.id, post_form("First", "nowhere"))
        .unwrap_err();
    assert!(matches!(err, ForumError::UnknownCategory(title) if title == "nowhere"));

    let category = forum.create_category("general", Some("Anything goes")).unwrap();
    let post = forum
        .create_post(author.id, post_form("First", "general"))
        .unwrap();
    assert_eq!(post.category_id, category.id);
    assert_eq!(post.author_id, author.id);

    let err = forum
        .create_post(author.id, post_form("First", "general"))
        .unwrap_err();
    assert!(matches!(err, ForumError::DuplicateTitle(_)));

    let after = forum.get_category(category.id).unwrap();
    assert!(after.post_count > category.post_count);
}

#[test]
#[ignore = "requires a local Docker daemon"]
fn search_matches_substrings_literally() {
    let docker = Cli::default();
    let store = TestStore::new(&docker);
    let forum = bootstrapped(&store);

    let author = forum.register_account(account_form("quinn")).unwrap();
    forum.create_category("general", None).unwrap();
    for title in ["Rust is 100% safe", "Totally 100x safe", "Unrelated"] {
        forum
            .create_post(author.id, post_form(title, "general"))
            .unwrap();
    }

    // `%` in the needle matches itself, not anything.
    let hits = forum.search_posts("100%", None).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Rust is 100% safe");

    let hits = forum.search_posts("safe", None).unwrap();
    assert_eq!(hits.len(), 2);

    assert!(forum.search_posts("zzz", None).unwrap().is_empty());
}

#[test]
#[ignore = "requires a local Docker daemon"]
fn concurrent_views_all_count() {
    let docker = Cli::default();
    let store = TestStore::new(&docker);
    let forum = bootstrapped(&store);

    let author = forum.register_account(account_form("busy")).unwrap();
    forum.create_category("general", None).unwrap();
    let post = forum
        .create_post(author.id, post_form("Hot take", "general"))
        .unwrap();

    let workers = 8;
    let (tx, rx) = unbounded();
    let db = store.database();
    let mut handles = Vec::new();
    for _ in 0..workers {
        let tx = tx.clone();
        let db = db.clone();
        let post_id = post.id;
        handles.push(std::thread::spawn(move || {
            tx.send(Forum::new(db).record_view(post_id)).unwrap();
        }));
    }
    drop(tx);
    for handle in handles {
        handle.join().unwrap();
    }
    for result in rx.iter() {
        result.unwrap();
    }

    let after = forum.get_post(post.id).unwrap();
    assert!(after.view_count >= post.view_count + workers as i64);
}

#[test]
#[ignore = "requires a local Docker daemon"]
fn concurrent_posting_never_loses_count_bumps() {
    let docker = Cli::default();
    let store = TestStore::new(&docker);
    let forum = bootstrapped(&store);

    let author = forum.register_account(account_form("prolific")).unwrap();
    let category = forum.create_category("general", None).unwrap();

    let writers = 6;
    let (tx, rx) = unbounded();
    let db = store.database();
    let mut handles = Vec::new();
    for i in 0..writers {
        let tx = tx.clone();
        let db = db.clone();
        let author_id = author.id;
        handles.push(std::thread::spawn(move || {
            let result = Forum::new(db).create_post(
                author_id,
                post_form(&format!("Concurrent {i}"), "general"),
            );
            tx.send(result.map(|_| ())).unwrap();
        }));
    }
    drop(tx);
    for handle in handles {
        handle.join().unwrap();
    }
    let successes = rx.iter().filter(|result| result.is_ok()).count();
    assert_eq!(successes, writers);

    let after = forum.get_category(category.id).unwrap();
    assert!(after.post_count >= category.post_count + writers as i64);
}

#[test]
#[ignore = "requires a local Docker daemon"]
fn browsing_pages_partition_store_rows() {
    let docker = Cli::default();
    let store = TestStore::new(&docker);
    let forum = bootstrapped(&store);

    let author = forum.register_account(account_form("paige")).unwrap();
    forum.create_category("general", None).unwrap();
    for i in 0..7 {
        forum
            .create_post(author.id, post_form(&format!("Post {i}"), "general"))
            .unwrap();
    }

    let mut seen = Vec::new();
    for number in 0..=2 {
        let page = forum.browse_posts(3, number).unwrap();
        assert_eq!(page.last_page, 2);
        assert_eq!(page.total, 7);
        seen.extend(page.items.into_iter().map(|post| post.title));
    }
    let expected: Vec<String> = (0..7).map(|i| format!("Post {i}")).collect();
    assert_eq!(seen, expected);

    assert!(matches!(
        forum.browse_posts(3, 3),
        Err(ForumError::Page(PageError::OutOfRange {
            page: 3,
            last_page: 2
        }))
    ));
}

#[test]
#[ignore = "requires a local Docker daemon"]
fn listings_scope_by_category_and_author() {
    let docker = Cli::default();
    let store = TestStore::new(&docker);
    let forum = bootstrapped(&store);

    let alice = forum.register_account(account_form("alice")).unwrap();
    let bob = forum.register_account(account_form("bob")).unwrap();
    let general = forum.create_category("general", None).unwrap();
    let meta = forum
        .create_category("meta", Some("about the forum"))
        .unwrap();

    forum
        .create_post(alice.id, post_form("General one", "general"))
        .unwrap();
    forum
        .create_post(bob.id, post_form("General two", "general"))
        .unwrap();
    forum
        .create_post(alice.id, post_form("Meta one", "meta"))
        .unwrap();

    let categories = forum.list_categories().unwrap();
    let titles: Vec<&str> = categories.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["general", "meta"]);

    assert_eq!(forum.list_posts(None).unwrap().len(), 3);
    assert_eq!(forum.list_posts(Some(2)).unwrap().len(), 2);

    let in_general = forum.posts_by_category(general.id).unwrap();
    let titles: Vec<&str> = in_general.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["General one", "General two"]);

    let in_meta = forum.posts_by_category(meta.id).unwrap();
    assert_eq!(in_meta.len(), 1);
    assert_eq!(in_meta[0].title, "Meta one");

    let by_alice = forum.posts_by_author(alice.id).unwrap();
    assert_eq!(by_alice.len(), 2);
    assert!(by_alice.iter().all(|p| p.author_id == alice.id));
}

#[test]
#[ignore = "requires a local Docker daemon"]
fn only_the_author_may_change_a_post() {
    let docker = Cli::default();
    let store = TestStore::new(&docker);
    let forum = bootstrapped(&store);

    let alice = forum.register_account(account_form("alice")).unwrap();
    let bob = forum.register_account(account_form("bob")).unwrap();
    forum.create_category("general", None).unwrap();
    let post = forum
        .create_post(alice.id, post_form("Alice writes", "general"))
        .unwrap();

    let err = forum
        .update_post(
            bob.id,
            post.id,
            UpdatePost {
                title: None,
                content: Some("hijacked".to_string()),
            },
        )
        .unwrap_err();
    assert!(
        matches!(err, ForumError::Forbidden { actor, author } if actor == bob.id && author == alice.id)
    );

    let err = forum.delete_post(bob.id, post.id).unwrap_err();
    assert!(matches!(err, ForumError::Forbidden { .. }));

    let updated = forum
        .update_post(
            alice.id,
            post.id,
            UpdatePost {
                title: Some("Alice edits".to_string()),
                content: None,
            },
        )
        .unwrap();
    assert_eq!(updated.title, "Alice edits");
    assert_eq!(updated.content, post.content);
    assert_eq!(updated.created_at, post.created_at);
}

#[test]
#[ignore = "requires a local Docker daemon"]
fn comment_deletion_is_author_or_thread_owner() {
    let docker = Cli::default();
    let store = TestStore::new(&docker);
    let forum = bootstrapped(&store);

    let alice = forum.register_account(account_form("alice")).unwrap();
    let bob = forum.register_account(account_form("bob")).unwrap();
    let carol = forum.register_account(account_form("carol")).unwrap();
    forum.create_category("general", None).unwrap();
    let post = forum
        .create_post(alice.id, post_form("Discuss", "general"))
        .unwrap();

    let comment = forum.add_comment(bob.id, post.id, "first!").unwrap();
    let err = forum.delete_comment(carol.id, comment.id).unwrap_err();
    assert!(
        matches!(err, ForumError::Forbidden { actor, author } if actor == carol.id && author == bob.id)
    );

    // The post author moderates their own thread.
    forum.delete_comment(alice.id, comment.id).unwrap();
    assert!(forum.post_with_comments(post.id).unwrap().comments.is_empty());

    // The comment author deletes their own.
    let comment = forum.add_comment(bob.id, post.id, "again").unwrap();
    forum.delete_comment(bob.id, comment.id).unwrap();
    assert!(forum.post_with_comments(post.id).unwrap().comments.is_empty());
}

#[test]
#[ignore = "requires a local Docker daemon"]
fn profile_updates_exclude_the_actor_from_uniqueness() {
    let docker = Cli::default();
    let store = TestStore::new(&docker);
    let forum = bootstrapped(&store);

    let kim = forum.register_account(account_form("kim")).unwrap();

    // Keeping one's own username is not a collision.
    let updated = forum
        .update_profile(
            kim.id,
            UpdateProfile {
                bio: Some("Hello".to_string()),
                ..UpdateProfile::default()
            },
        )
        .unwrap();
    assert_eq!(updated.username, "kim");
    assert_eq!(updated.bio.as_deref(), Some("Hello"));
    assert_eq!(updated.created_at, kim.created_at);

    let lee = forum.register_account(account_form("lee")).unwrap();
    let err = forum
        .update_profile(
            lee.id,
            UpdateProfile {
                username: Some("kim".to_string()),
                ..UpdateProfile::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, ForumError::DuplicateUsername(_)));
}

#[test]
#[ignore = "requires a local Docker daemon"]
fn profile_updates_carry_a_never_set_bio_as_null() {
    let docker = Cli::default();
    let store = TestStore::new(&docker);
    let forum = bootstrapped(&store);

    // Registered without a bio, so the stored column is NULL.
    let created = forum.register_account(account_form("nia")).unwrap();
    assert_eq!(created.bio, None);

    // Changing only the password rewrites the full row; the merged bio is
    // still None and must reach the store as a NULL of the right type.
    let updated = forum
        .update_profile(
            created.id,
            UpdateProfile {
                password: Some("n3w-hash".to_string()),
                ..UpdateProfile::default()
            },
        )
        .unwrap();
    assert_eq!(updated.password, "n3w-hash");
    assert_eq!(updated.bio, None);

    let fetched = forum.get_account(created.id).unwrap();
    assert_eq!(fetched, updated);
    assert_eq!(fetched.bio, None);
}

#[test]
#[ignore = "requires a local Docker daemon"]
fn composite_reads_resolve_relations_lazily() {
    let docker = Cli::default();
    let store = TestStore::new(&docker);
    let forum = bootstrapped(&store);

    let alice = forum.register_account(account_form("alice")).unwrap();
    let bob = forum.register_account(account_form("bob")).unwrap();
    let category = forum.create_category("general", None).unwrap();
    let post = forum
        .create_post(alice.id, post_form("Thread", "general"))
        .unwrap();

    forum.add_comment(bob.id, post.id, "one").unwrap();
    forum.add_comment(alice.id, post.id, "two").unwrap();

    let view = forum.post_with_comments(post.id).unwrap();
    assert_eq!(view.post.id, post.id);
    let contents: Vec<&str> = view
        .comments
        .iter()
        .map(|comment| comment.content.as_str())
        .collect();
    assert_eq!(contents, vec!["one", "two"]);

    assert_eq!(forum.post_author(&view.post).unwrap().id, alice.id);
    assert_eq!(forum.post_category(&view.post).unwrap().id, category.id);

    // Deleting the post hides it and stops the view counter.
    forum.delete_post(alice.id, post.id).unwrap();
    assert!(matches!(
        forum.post_with_comments(post.id),
        Err(ForumError::NotFound("post"))
    ));
    assert!(matches!(
        forum.record_view(post.id),
        Err(ForumError::NotFound("post"))
    ));
}
