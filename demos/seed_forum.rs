//! Seed a forum database and browse it.
//!
//! Expects a reachable PostgreSQL instance; settings come from
//! `config/config.toml` and `UMBRELLA_*` environment variables.
//!
//! Run with:
//! ```bash
//! UMBRELLA_PORT=5433 cargo run --example seed_forum
//! ```

use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;
use rand::seq::SliceRandom;
use rand::thread_rng;

use umbrella::schema;
use umbrella::{run_blocking, Database, Forum, ForumError, NewAccount, NewPost};

const CATEGORIES_CSV: &str = include_str!("seed_categories.csv");

type DemoError = Box<dyn std::error::Error + Send + Sync>;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    #[cfg(feature = "tracing")]
    umbrella::tracing_helpers::init_tracing();

    if let Err(err) = run_blocking(seed) {
        eprintln!("Seeding failed: {err}");
        std::process::exit(1);
    }
}

fn seed() -> Result<(), DemoError> {
    let database = Database::from_env()?;
    println!(
        "Connecting to {}:{}/{}",
        database.config().host,
        database.config().port,
        database.config().dbname
    );
    schema::create_all_tables(&database)?;
    let forum = Forum::new(database);

    // Categories from the bundled CSV; rerunning the demo reuses them.
    let mut reader = csv::Reader::from_reader(CATEGORIES_CSV.as_bytes());
    let mut categories = Vec::new();
    for record in reader.records() {
        let record = record?;
        let title = record.get(0).unwrap_or_default().trim().to_string();
        let description = record
            .get(1)
            .map(str::trim)
            .filter(|text| !text.is_empty());
        match forum.create_category(&title, description) {
            Ok(category) => categories.push(category),
            Err(ForumError::DuplicateTitle(_)) => {
                categories.push(forum.find_category_by_title(&title)?)
            }
            Err(err) => return Err(err.into()),
        }
    }
    println!("{} categories ready", categories.len());

    let mut rng = thread_rng();

    let mut accounts = Vec::new();
    for i in 0..5 {
        let username = format!("user{i}");
        let form = NewAccount {
            username: username.clone(),
            email: SafeEmail().fake(),
            password: "changeme".to_string(),
            bio: Some(Sentence(3..8).fake()),
        };
        match forum.register_account(form) {
            Ok(account) => accounts.push(account),
            Err(ForumError::DuplicateUsername(_)) => {
                accounts.push(forum.find_account_by_username(&username)?)
            }
            Err(err) => return Err(err.into()),
        }
    }
    println!("{} accounts ready", accounts.len());

    for i in 0..12 {
        let author = accounts.choose(&mut rng).expect("accounts seeded");
        let category = categories.choose(&mut rng).expect("categories seeded");
        let form = NewPost {
            title: format!("{} #{i}", Sentence(2..5).fake::<String>()),
            content: Paragraph(2..4).fake(),
            category_title: category.title.clone(),
        };
        match forum.create_post(author.id, form) {
            Ok(post) => {
                let commenter = accounts.choose(&mut rng).expect("accounts seeded");
                let remark: String = Sentence(4..9).fake();
                forum.add_comment(commenter.id, post.id, &remark)?;
                forum.record_view(post.id)?;
            }
            Err(ForumError::DuplicateTitle(_)) => continue,
            Err(err) => return Err(err.into()),
        }
    }

    let mut number = 0;
    loop {
        let page = forum.browse_posts(5, number)?;
        println!(
            "-- page {} of {} ({} posts total)",
            page.page, page.last_page, page.total
        );
        for post in &page.items {
            let author = forum.post_author(post)?;
            let category = forum.post_category(post)?;
            println!(
                "  [{}] {} by {} ({} views)",
                category.title, post.title, author.username, post.view_count
            );
        }
        if !page.has_next() {
            break;
        }
        number += 1;
    }

    let hits = forum.search_posts("the", Some(5))?;
    println!("{} titles contain 'the'", hits.len());

    Ok(())
}
