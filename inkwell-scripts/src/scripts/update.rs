use anyhow::Result;
use inkwell_types::{IntChange, IntFilter, Role, UserFilter, UserUpdate};

use super::{cleanup, seed};
use crate::context::ScriptContext;

pub fn run(ctx: &mut ScriptContext<'_>) -> Result<()> {
    cleanup(ctx)?;
    seed(ctx)?;

    let renamed = ctx.step("user.update (email)", |c| {
        c.users().update_by_email(
            "kyle@test.com",
            &UserUpdate {
                email: Some("kyle@test3.com".to_string()),
                ..Default::default()
            },
        )
    })?;

    ctx.step("user.update (age increment)", |c| {
        c.users().update_by_email(
            &renamed.email,
            &UserUpdate {
                age: Some(IntChange::Increment(5)),
                ..Default::default()
            },
        )
    })?;

    ctx.step("user.update (age decrement)", |c| {
        c.users().update_by_email(
            &renamed.email,
            &UserUpdate {
                age: Some(IntChange::Decrement(2)),
                ..Default::default()
            },
        )
    })?;

    ctx.step("user.updateMany", |c| {
        c.users().update_many(
            &UserFilter::Age(IntFilter::Gte(30)),
            &UserUpdate {
                role: Some(Role::Admin),
                ..Default::default()
            },
        )
    })?;
    Ok(())
}
