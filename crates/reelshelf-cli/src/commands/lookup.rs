use super::lookup_ui::LookupSpinner;
use crate::context::AppContext;
use crate::output::Output;
use color_eyre::Result;
use movie_catalog_models::MovieDraft;
use movie_catalog_sources::{start_lookup, LookupOutcome};
use serde_json::json;

/// Run a lookup for the draft's title and year and wait for it.
///
/// Failures never abort the caller; they come back as a non-found outcome.
async fn fetch(ctx: &AppContext, draft: &MovieDraft, output: &Output) -> Result<LookupOutcome> {
    let provider = ctx.lookup_provider()?;
    let task = match start_lookup(provider, draft) {
        Ok(task) => task,
        Err(e) => return Ok(LookupOutcome::Failed(e)),
    };

    let spinner = LookupSpinner::start(draft.title.trim(), output.is_human() && !output.is_quiet());
    let outcome = task.outcome().await;
    spinner.finish();
    Ok(outcome)
}

/// Fill `draft` from TMDB, reporting the status line.
///
/// Returns whether the draft changed.
pub async fn enrich_draft(ctx: &AppContext, draft: &mut MovieDraft, output: &Output) -> Result<bool> {
    let outcome = fetch(ctx, draft, output).await?;
    let message = outcome.status_message();
    match &outcome {
        LookupOutcome::Found(_) => output.success(message),
        LookupOutcome::Failed(e) if !e.is_precondition() => output.error(message),
        _ => output.warn(message),
    }
    Ok(outcome.apply_to(draft))
}

pub async fn run_lookup(ctx: &AppContext, title: String, year: Option<String>, output: &Output) -> Result<()> {
    let draft = MovieDraft {
        title,
        year: year.unwrap_or_default(),
        ..MovieDraft::new()
    };

    let outcome = fetch(ctx, &draft, output).await?;
    let status = outcome.status_message();

    if !output.is_human() {
        output.json(&json!({
            "title": draft.title.trim(),
            "found": outcome.is_found(),
            "status": status,
            "metadata": outcome.metadata(),
        }));
        return exit_status(&outcome);
    }

    match &outcome {
        LookupOutcome::Found(metadata) => {
            output.success(status);
            output.info(format!("  Year:   {}", if metadata.year.is_empty() { "-" } else { &metadata.year }));
            output.info(format!("  Rating: {:.1}", metadata.rating));
            output.info(format!(
                "  Poster: {}",
                if metadata.poster_url.is_empty() { "-" } else { &metadata.poster_url }
            ));
        }
        LookupOutcome::NoMatch => output.warn(status),
        LookupOutcome::Failed(_) => {}
    }
    exit_status(&outcome)
}

/// A failed lookup is an error whatever the output format; no match is not
fn exit_status(outcome: &LookupOutcome) -> Result<()> {
    match outcome {
        LookupOutcome::Failed(_) => Err(color_eyre::eyre::eyre!(outcome.status_message())),
        LookupOutcome::Found(_) | LookupOutcome::NoMatch => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_catalog_models::MovieMetadata;
    use movie_catalog_sources::LookupError;

    #[test]
    fn test_exit_status_fails_only_for_failed_lookups() {
        assert!(exit_status(&LookupOutcome::Found(MovieMetadata::default())).is_ok());
        assert!(exit_status(&LookupOutcome::NoMatch).is_ok());

        let err = exit_status(&LookupOutcome::Failed(LookupError::RateLimited)).unwrap_err();
        assert_eq!(err.to_string(), "TMDB error: TMDB rate limit exceeded");

        let err = exit_status(&LookupOutcome::Failed(LookupError::MissingApiKey)).unwrap_err();
        assert_eq!(err.to_string(), "Set TMDB API key first.");
    }
}
