use anyhow::Result;
use inkwell_types::{FindOptions, IntFilter, QueryMode, StringFilter, UserFilter};

use super::{cleanup, seed};
use crate::context::ScriptContext;

pub fn run(ctx: &mut ScriptContext<'_>) -> Result<()> {
    cleanup(ctx)?;
    seed(ctx)?;

    let in_names = FindOptions::filtered(UserFilter::Name(StringFilter::one_of(["Sally", "Kyle"])));
    ctx.step("user.findMany (name in)", |c| c.users().find_many(&in_names))?;

    let not_in_names =
        FindOptions::filtered(UserFilter::Name(StringFilter::none_of(["Sally", "Kyle"])));
    ctx.step("user.findMany (name notIn)", |c| c.users().find_many(&not_in_names))?;

    let contains = FindOptions::filtered(UserFilter::Email(StringFilter::contains(
        "@test.com",
        QueryMode::Insensitive,
    )));
    ctx.step("user.findMany (email contains, insensitive)", |c| {
        c.users().find_many(&contains)
    })?;

    let and = FindOptions::filtered(UserFilter::And(vec![
        UserFilter::Email(StringFilter::starts_with("kyle", QueryMode::Default)),
        UserFilter::Email(StringFilter::ends_with("test.com", QueryMode::Default)),
    ]));
    ctx.step("user.findMany (AND)", |c| c.users().find_many(&and))?;

    let or = FindOptions::filtered(UserFilter::Or(vec![
        UserFilter::Email(StringFilter::starts_with("sally", QueryMode::Default)),
        UserFilter::Age(IntFilter::Gt(26)),
    ]));
    ctx.step("user.findMany (OR)", |c| c.users().find_many(&or))?;

    let not = FindOptions::filtered(UserFilter::Name(StringFilter::equals("Sally")).negate());
    ctx.step("user.findMany (NOT)", |c| c.users().find_many(&not))?;
    Ok(())
}
