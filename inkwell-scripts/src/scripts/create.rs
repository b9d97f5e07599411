use anyhow::Result;
use inkwell_types::{NewUser, Role};

use super::cleanup;
use crate::context::ScriptContext;

pub fn run(ctx: &mut ScriptContext<'_>) -> Result<()> {
    cleanup(ctx)?;

    ctx.step("user.create", |c| {
        c.users()
            .create(&NewUser::new("Kyle", "kyle@test.com", 27))
    })?;

    let sally = ctx.step("user.create (with userPreference)", |c| {
        c.users().create_with_preference(
            &NewUser::new("Sally", "sally@test.com", 32).with_role(Role::Admin),
            true,
        )
    })?;

    ctx.step("user.findUnique (include userPreference)", |c| {
        c.users().find_unique_with_preference(&sally.user.email)
    })?;
    Ok(())
}
