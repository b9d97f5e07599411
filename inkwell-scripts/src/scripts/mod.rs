//! The demonstration scripts.
//!
//! Each script is a fixed, linear list of steps. Apart from `seed-users`,
//! every script starts by emptying all four tables so runs are repeatable.

use anyhow::Result;
use clap::ValueEnum;
use inkwell_types::NewUser;

use crate::context::ScriptContext;

mod create;
mod delete;
mod filter;
mod read;
mod relate;
mod seed_users;
mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Script {
    /// Replace all users with two freshly inserted ones
    SeedUsers,
    /// Single and nested inserts
    Create,
    /// Unique, first, all and paginated reads
    Read,
    /// Membership, substring and boolean filters
    Filter,
    /// Updates by unique key and by predicate
    Update,
    /// Posts and categories connected to existing rows
    Relate,
    /// Deletes by unique key and by predicate
    Delete,
    /// Every script above, in order
    All,
}

impl Script {
    const SEQUENCE: [Script; 7] = [
        Script::SeedUsers,
        Script::Create,
        Script::Read,
        Script::Filter,
        Script::Update,
        Script::Relate,
        Script::Delete,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Script::SeedUsers => "seed-users",
            Script::Create => "create",
            Script::Read => "read",
            Script::Filter => "filter",
            Script::Update => "update",
            Script::Relate => "relate",
            Script::Delete => "delete",
            Script::All => "all",
        }
    }

    /// The single scripts this selection runs, in order
    pub fn expand(self) -> Vec<Script> {
        match self {
            Script::All => Self::SEQUENCE.to_vec(),
            single => vec![single],
        }
    }

    /// Run the steps of a single script; `All` must be expanded first
    pub fn run(self, ctx: &mut ScriptContext<'_>) -> Result<()> {
        match self {
            Script::SeedUsers => seed_users::run(ctx),
            Script::Create => create::run(ctx),
            Script::Read => read::run(ctx),
            Script::Filter => filter::run(ctx),
            Script::Update => update::run(ctx),
            Script::Relate => relate::run(ctx),
            Script::Delete => delete::run(ctx),
            Script::All => anyhow::bail!("`all` is a selection of scripts, not a script"),
        }
    }
}

/// Users shared by the read, filter, update and delete scripts
pub fn sample_users() -> Vec<NewUser> {
    vec![
        NewUser::new("Kyle", "kyle@test.com", 27),
        NewUser::new("Sally", "sally@TEST.com", 32),
        NewUser::new("Bryan", "bryan@example.com", 23),
        NewUser::new("John", "john@test.com", 25),
    ]
}

/// Empty every table, dependents first
pub(crate) fn cleanup(ctx: &mut ScriptContext<'_>) -> Result<()> {
    ctx.step("post.deleteMany", |c| c.posts().delete_many())?;
    ctx.step("userPreference.deleteMany", |c| c.preferences().delete_many())?;
    ctx.step("user.deleteMany", |c| c.users().delete_many(None))?;
    ctx.step("category.deleteMany", |c| c.categories().delete_many())?;
    Ok(())
}

pub(crate) fn seed(ctx: &mut ScriptContext<'_>) -> Result<()> {
    let users = sample_users();
    ctx.step("user.createMany", |c| c.users().create_many(&users))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_expands_to_every_script() {
        let expanded = Script::All.expand();
        assert_eq!(expanded.len(), 7);
        assert!(!expanded.contains(&Script::All));
        assert_eq!(Script::Read.expand(), vec![Script::Read]);
    }

    #[test]
    fn test_names_match_cli_values() {
        for script in Script::SEQUENCE.into_iter().chain([Script::All]) {
            let parsed = Script::from_str(script.name(), false).expect("name should parse");
            assert_eq!(parsed, script);
        }
    }
}
