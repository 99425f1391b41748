use super::lookup::enrich_draft;
use super::prompts;
use crate::context::AppContext;
use crate::output::{movie_json, Output};
use crate::MovieFieldArgs;
use color_eyre::Result;
use movie_catalog_core::{CatalogError, FilterMode, Flag, MovieId, Query, SortMode};
use movie_catalog_models::{Movie, MovieDraft};
use serde_json::json;

fn require_movie(ctx: &AppContext, id: MovieId) -> Result<&Movie> {
    ctx.catalog
        .get(id)
        .ok_or_else(|| CatalogError::NotFound(id).into())
}

pub fn run_list(ctx: &AppContext, search: String, filter: FilterMode, sort: SortMode, output: &Output) -> Result<()> {
    let query = Query::new(search, filter, sort);
    let movies = ctx.catalog.query(&query);
    tracing::debug!(
        total = ctx.catalog.len(),
        shown = movies.len(),
        filter = %filter,
        sort = %sort,
        "Listing catalog"
    );
    output.movies(&movies);
    Ok(())
}

pub async fn run_add(
    ctx: &mut AppContext,
    title: String,
    fields: MovieFieldArgs,
    fetch: bool,
    output: &Output,
) -> Result<()> {
    let mut draft = MovieDraft {
        title,
        ..MovieDraft::new()
    };
    fields.apply_to(&mut draft);

    if fetch && enrich_draft(ctx, &mut draft, output).await? {
        // values given on the command line win over fetched ones
        fields.apply_to(&mut draft);
    }

    let changes = draft.build()?;
    let id = ctx.catalog.create(changes.into_movie())?;

    if output.is_human() {
        output.success(format!("Added '{}' as #{}", draft.title.trim(), id));
    } else if let Some(movie) = ctx.catalog.get(id) {
        output.json(&movie_json(id, movie));
    }
    Ok(())
}

pub async fn run_edit(
    ctx: &mut AppContext,
    id: MovieId,
    title: Option<String>,
    fields: MovieFieldArgs,
    fetch: bool,
    output: &Output,
) -> Result<()> {
    let mut draft = MovieDraft::from_movie(require_movie(ctx, id)?);
    if let Some(title) = &title {
        draft.title = title.clone();
    }
    fields.apply_to(&mut draft);

    if fetch && enrich_draft(ctx, &mut draft, output).await? {
        fields.apply_to(&mut draft);
    }

    let changes = draft.build()?;
    ctx.catalog.update(id, &changes)?;

    if output.is_human() {
        output.success(format!("Updated #{} '{}'", id, changes.title));
    } else if let Some(movie) = ctx.catalog.get(id) {
        output.json(&movie_json(id, movie));
    }
    Ok(())
}

pub fn run_delete(ctx: &mut AppContext, id: MovieId, yes: bool, output: &Output) -> Result<()> {
    let title = match ctx.catalog.get(id) {
        Some(movie) => movie.title.clone(),
        None => {
            output.warn(format!("No movie with id {}", id));
            return Ok(());
        }
    };

    if !yes && !prompts::prompt_yes_no(&format!("Delete '{}'?", title), false)? {
        output.info("Cancelled.");
        return Ok(());
    }

    let deleted = ctx.catalog.delete(id)?;
    if output.is_human() {
        output.success(format!("Deleted '{}'", title));
    } else {
        output.json(&json!({ "id": id, "deleted": deleted }));
    }
    Ok(())
}

pub fn run_toggle(ctx: &mut AppContext, id: MovieId, flag: Flag, output: &Output) -> Result<()> {
    let value = ctx.catalog.toggle_flag(id, flag)?;
    let movie = require_movie(ctx, id)?;

    if output.is_human() {
        let state = if value { "on" } else { "off" };
        output.success(format!("'{}': {} {}", movie.title, flag, state));
        if flag == Flag::Watched && value {
            output.info("Removed from watchlist.");
        }
    } else {
        output.json(&movie_json(id, movie));
    }
    Ok(())
}

pub fn run_show(ctx: &AppContext, id: MovieId, output: &Output) -> Result<()> {
    let movie = require_movie(ctx, id)?;
    output.movie_details(id, movie);
    Ok(())
}

pub fn run_trailer(ctx: &AppContext, id: MovieId, output: &Output) -> Result<()> {
    let movie = require_movie(ctx, id)?;
    let link = movie.trailer_link();
    if output.is_human() {
        output.info(link);
    } else {
        output.json(&json!({ "id": id, "title": movie.title, "trailer_url": link }));
    }
    Ok(())
}
