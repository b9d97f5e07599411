use anyhow::Result;
use inkwell_types::{NewPost, NewUser};

use super::cleanup;
use crate::context::ScriptContext;

pub fn run(ctx: &mut ScriptContext<'_>) -> Result<()> {
    cleanup(ctx)?;

    let author = ctx.step("user.create", |c| {
        c.users()
            .create(&NewUser::new("Kyle", "kyle@test.com", 27))
    })?;

    let post = ctx.step("post.create (connect author)", |c| {
        c.posts().create(&NewPost {
            title: "Getting started with SQLite".to_string(),
            average_rating: 4.5,
            author_id: author.id,
        })
    })?;

    ctx.step("post.update (averageRating)", |c| {
        c.posts().update_average_rating(&post.id, 4.8)
    })?;
    ctx.step("post.findMany (author)", |c| c.posts().find_by_author(&author.id))?;

    ctx.step("category.create", |c| c.categories().create("Tutorials"))?;
    ctx.step("category.findMany", |c| c.categories().find_many())?;
    Ok(())
}
