use anyhow::Result;
use inkwell_types::{IntFilter, UserFilter};

use super::{cleanup, seed};
use crate::context::ScriptContext;

pub fn run(ctx: &mut ScriptContext<'_>) -> Result<()> {
    cleanup(ctx)?;
    seed(ctx)?;

    ctx.step("user.delete", |c| c.users().delete_by_email("kyle@test.com"))?;
    ctx.step("user.deleteMany (age < 25)", |c| {
        c.users()
            .delete_many(Some(&UserFilter::Age(IntFilter::Lt(25))))
    })?;
    ctx.step("counts", |c| c.counts())?;
    Ok(())
}
