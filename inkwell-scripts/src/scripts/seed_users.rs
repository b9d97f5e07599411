use anyhow::Result;
use inkwell_types::NewUser;

use crate::context::ScriptContext;

/// Replace every user with Bryan and John
pub fn run(ctx: &mut ScriptContext<'_>) -> Result<()> {
    ctx.step("user.deleteMany", |c| c.users().delete_many(None))?;

    let users = [
        NewUser::new("Bryan", "bryan@test.com", 23),
        NewUser::new("John", "john@test.com", 25),
    ];
    ctx.step("user.createMany", |c| c.users().create_many(&users))?;
    Ok(())
}
