use anyhow::Result;
use inkwell_types::{FindOptions, StringFilter, UserField, UserFilter, UserOrder};

use super::{cleanup, seed};
use crate::context::ScriptContext;

pub fn run(ctx: &mut ScriptContext<'_>) -> Result<()> {
    cleanup(ctx)?;
    seed(ctx)?;

    ctx.step("user.findUnique (email)", |c| {
        c.users().find_unique_by_email("kyle@test.com")
    })?;
    ctx.step("user.findUnique (age_name)", |c| {
        c.users().find_unique_by_age_and_name(27, "Kyle")
    })?;
    ctx.step("user.findFirst", |c| {
        c.users()
            .find_first(&UserFilter::Name(StringFilter::equals("Sally")))
    })?;
    ctx.step("user.findMany", |c| c.users().find_many(&FindOptions::default()))?;

    let page = FindOptions::default()
        .order_by(UserOrder::asc(UserField::Age))
        .take(2)
        .skip(1);
    ctx.step("user.findMany (take 2, skip 1)", |c| c.users().find_many(&page))?;
    Ok(())
}
