use anyhow::Result;

use inkwell_db::{Client, Database};
use inkwell_scripts::{runner, Script};
use inkwell_types::{NewPost, NewUser, Role};

fn fresh_database() -> Result<Database> {
    let db = Database::in_memory()?;
    db.initialize()?;
    Ok(db)
}

/// Run a script on a shared in-memory database and return what it printed
fn run(db: &Database, script: Script) -> Result<String> {
    let mut out = Vec::new();
    runner::execute(script, || Ok(Client::from_database(db.clone())), &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn inspect(db: &Database) -> Client {
    Client::from_database(db.clone())
}

#[test]
fn test_seed_users_replaces_all_users() -> Result<()> {
    let db = fresh_database()?;
    inspect(&db)
        .users()
        .create(&NewUser::new("Old", "old@test.com", 70))?;

    let output = run(&db, Script::SeedUsers)?;

    assert!(output.contains("user.createMany:\n{\n  \"count\": 2\n}"));
    let client = inspect(&db);
    assert_eq!(client.users().count(None)?, 2);
    assert!(client.users().find_unique_by_email("old@test.com")?.is_none());
    assert!(client.users().find_unique_by_email("bryan@test.com")?.is_some());
    Ok(())
}

#[test]
fn test_create_script() -> Result<()> {
    let db = fresh_database()?;
    let output = run(&db, Script::Create)?;

    let counts = inspect(&db).counts()?;
    assert_eq!(counts.users, 2);
    assert_eq!(counts.user_preferences, 1);
    assert!(output.contains("\"emailUpdates\": true"));

    let sally = inspect(&db)
        .users()
        .find_unique_by_email("sally@test.com")?
        .expect("Sally should exist");
    assert_eq!(sally.role, Role::Admin);
    Ok(())
}

#[test]
fn test_create_script_is_repeatable() -> Result<()> {
    let db = fresh_database()?;
    run(&db, Script::Create)?;
    run(&db, Script::Create)?;
    assert_eq!(inspect(&db).counts()?.users, 2);
    Ok(())
}

#[test]
fn test_read_script_prints_each_step() -> Result<()> {
    let db = fresh_database()?;
    let output = run(&db, Script::Read)?;

    for label in [
        "user.findUnique (email):",
        "user.findUnique (age_name):",
        "user.findFirst:",
        "user.findMany:",
        "user.findMany (take 2, skip 1):",
    ] {
        assert!(output.contains(label), "missing step {}", label);
    }

    // the page holds the 2nd and 3rd youngest users
    let page = output
        .split("user.findMany (take 2, skip 1):\n")
        .nth(1)
        .expect("page step should be printed");
    let page: serde_json::Value = serde_json::from_str(page.trim())?;
    let names: Vec<&str> = page
        .as_array()
        .expect("page should be an array")
        .iter()
        .filter_map(|u| u["name"].as_str())
        .collect();
    assert_eq!(names, vec!["John", "Kyle"]);
    Ok(())
}

#[test]
fn test_filter_script() -> Result<()> {
    let db = fresh_database()?;
    let output = run(&db, Script::Filter)?;
    assert!(output.contains("user.findMany (NOT):"));
    assert_eq!(inspect(&db).users().count(None)?, 4);
    Ok(())
}

#[test]
fn test_update_script_nets_age_changes() -> Result<()> {
    let db = fresh_database()?;
    let output = run(&db, Script::Update)?;

    let kyle = inspect(&db)
        .users()
        .find_unique_by_email("kyle@test3.com")?
        .expect("Kyle should have the new email");
    assert_eq!(kyle.age, 27 + 5 - 2);
    assert_eq!(kyle.role, Role::Admin);
    assert!(output.contains("user.updateMany:\n{\n  \"count\": 2\n}"));
    Ok(())
}

#[test]
fn test_relate_script_connects_post_to_author() -> Result<()> {
    let db = fresh_database()?;
    run(&db, Script::Relate)?;

    let client = inspect(&db);
    let author = client
        .users()
        .find_unique_by_email("kyle@test.com")?
        .expect("author should exist");
    let posts = client.posts().find_by_author(&author.id)?;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].average_rating, 4.8);
    assert_eq!(client.categories().count()?, 1);
    Ok(())
}

#[test]
fn test_delete_script() -> Result<()> {
    let db = fresh_database()?;
    let output = run(&db, Script::Delete)?;

    let client = inspect(&db);
    assert_eq!(client.users().count(None)?, 2);
    assert!(client.users().find_unique_by_email("kyle@test.com")?.is_none());
    assert!(client.users().find_unique_by_email("bryan@example.com")?.is_none());
    assert!(output.contains("\"users\": 2"));
    Ok(())
}

#[test]
fn test_all_scripts_run_back_to_back() -> Result<()> {
    let db = fresh_database()?;
    let output = run(&db, Script::All)?;
    assert!(output.starts_with("user.deleteMany:"));
    assert!(output.trim_end().ends_with('}'));
    Ok(())
}

#[test]
fn test_failure_stops_remaining_steps() -> Result<()> {
    let db = fresh_database()?;
    let client = inspect(&db);
    let author = client
        .users()
        .create(&NewUser::new("Kyle", "kyle@test.com", 27))?;
    client.posts().create(&NewPost {
        title: "Blocks user deletion".to_string(),
        average_rating: 3.0,
        author_id: author.id,
    })?;

    // seed-users deletes users without touching posts first
    let mut out = Vec::new();
    let err = runner::execute(
        Script::SeedUsers,
        || Ok(Client::from_database(db.clone())),
        &mut out,
    )
    .unwrap_err();

    let message = format!("{:#}", err);
    assert!(message.contains("script `seed-users` failed"));
    assert!(message.contains("step `user.deleteMany` failed"));
    assert!(message.contains("foreign key constraint failed"));

    assert!(out.is_empty(), "no step should have printed");
    assert_eq!(inspect(&db).users().count(None)?, 1);
    Ok(())
}

#[test]
fn test_all_stops_at_first_failing_script() -> Result<()> {
    let db = fresh_database()?;
    let author = inspect(&db)
        .users()
        .create(&NewUser::new("Kyle", "kyle@test.com", 27))?;
    inspect(&db).posts().create(&NewPost {
        title: "Blocks user deletion".to_string(),
        average_rating: 3.0,
        author_id: author.id,
    })?;

    let mut opened = 0;
    let mut out = Vec::new();
    let result = runner::execute(
        Script::All,
        || {
            opened += 1;
            Ok(Client::from_database(db.clone()))
        },
        &mut out,
    );

    assert!(result.is_err());
    assert_eq!(opened, 1);
    Ok(())
}

#[test]
fn test_file_database_persists_between_runs() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("inkwell.db");

    let mut out = Vec::new();
    runner::execute(Script::SeedUsers, || Client::open(&path, 2), &mut out)?;

    let reopened = Client::open(&path, 2)?;
    assert_eq!(reopened.users().count(None)?, 2);
    Ok(())
}
