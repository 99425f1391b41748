use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use commands::{catalog, config, lookup};
use movie_catalog_config::PathManager;
use movie_catalog_core::{FilterMode, Flag, MovieId, SortMode};
use movie_catalog_models::MovieDraft;
use std::path::PathBuf;

mod commands;
mod context;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelshelf")]
#[command(about = "ReelShelf - Keep track of the movies you own, want, and have seen")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a file (rotated daily) instead of stderr; without PATH, logs/reelshelf.log under the app directory
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    /// Use this movies file instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Optional field values shared by `add` and `edit`
#[derive(Args, Debug, Default, Clone)]
pub struct MovieFieldArgs {
    /// Release year
    #[arg(long)]
    year: Option<String>,

    /// Rating from 0 to 10 (invalid values become 0, out-of-range values are clamped)
    #[arg(long)]
    rating: Option<String>,

    /// Poster image URL
    #[arg(long)]
    poster_url: Option<String>,

    /// Trailer URL (a YouTube search is used when empty)
    #[arg(long)]
    trailer_url: Option<String>,

    /// Path to a local copy of the movie
    #[arg(long)]
    local_file: Option<String>,

    /// Free-form notes
    #[arg(long)]
    notes: Option<String>,

    /// Mark as watched (true/false)
    #[arg(long)]
    watched: Option<bool>,

    /// Mark as favorite (true/false)
    #[arg(long)]
    favorite: Option<bool>,

    /// Keep on the watchlist (true/false)
    #[arg(long)]
    watchlist: Option<bool>,
}

impl MovieFieldArgs {
    /// Copy every value given on the command line into `draft`
    pub fn apply_to(&self, draft: &mut MovieDraft) {
        let text_fields = [
            (&self.year, &mut draft.year),
            (&self.rating, &mut draft.rating),
            (&self.poster_url, &mut draft.poster_url),
            (&self.trailer_url, &mut draft.trailer_url),
            (&self.local_file, &mut draft.local_file),
            (&self.notes, &mut draft.notes),
        ];
        for (arg, field) in text_fields {
            if let Some(value) = arg {
                *field = value.clone();
            }
        }
        if let Some(watched) = self.watched {
            draft.watched = watched;
        }
        if let Some(favorite) = self.favorite {
            draft.favorite = favorite;
        }
        if let Some(watchlist) = self.watchlist {
            draft.watchlist = watchlist;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List movies
    #[command(long_about = "List the catalog. Search matches title or notes case-insensitively; filters and sort order can be combined.")]
    List {
        /// Only movies whose title or notes contain this text
        #[arg(long, short, default_value = "")]
        search: String,

        /// all, watched, favorite, or watchlist
        #[arg(long, short, default_value = "all")]
        filter: FilterMode,

        /// title, year, or rating
        #[arg(long, default_value = "title")]
        sort: SortMode,
    },
    /// Add a movie
    #[command(long_about = "Add a movie to the catalog. With --fetch, year, rating and poster are filled from TMDB before saving.")]
    Add {
        /// Movie title
        #[arg(long)]
        title: String,

        #[command(flatten)]
        fields: MovieFieldArgs,

        /// Fill missing details from TMDB first
        #[arg(long, action = ArgAction::SetTrue)]
        fetch: bool,
    },
    /// Edit a movie
    Edit {
        /// Movie id as shown by `list`
        id: MovieId,

        /// New title
        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        fields: MovieFieldArgs,

        /// Refresh details from TMDB before saving
        #[arg(long, action = ArgAction::SetTrue)]
        fetch: bool,
    },
    /// Delete a movie
    Delete {
        /// Movie id as shown by `list`
        id: MovieId,

        /// Do not ask for confirmation
        #[arg(long, short, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Flip the watched or favorite flag
    #[command(long_about = "Flip the watched or favorite flag of a movie. Marking a movie watched also removes it from the watchlist.")]
    Toggle {
        /// Movie id as shown by `list`
        id: MovieId,

        /// watched or favorite
        flag: Flag,
    },
    /// Show all details of a movie
    Show {
        /// Movie id as shown by `list`
        id: MovieId,
    },
    /// Print the trailer URL of a movie
    Trailer {
        /// Movie id as shown by `list`
        id: MovieId,
    },
    /// Look a title up on TMDB without saving anything
    Lookup {
        /// Title to search for
        #[arg(long)]
        title: String,

        /// Narrow the search to a release year
        #[arg(long)]
        year: Option<String>,
    },
    /// View or change settings
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Dark,
    Light,
    Toggle,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current settings (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Set the TMDB API key (prompts when not given; an empty key clears it)
    ApiKey {
        key: Option<String>,
    },
    /// Write a config.toml with default values
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Set or toggle the dark theme preference
    Theme {
        #[arg(value_enum, default_value = "toggle")]
        choice: ThemeChoice,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .map(|path| path.unwrap_or_else(|| PathManager::default().log_file()));
    logging::init_logging(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let mut ctx = context::AppContext::load(cli.data_file)?;

    match cli.command {
        Commands::List { search, filter, sort } => catalog::run_list(&ctx, search, filter, sort, &output),
        Commands::Add { title, fields, fetch } => catalog::run_add(&mut ctx, title, fields, fetch, &output).await,
        Commands::Edit { id, title, fields, fetch } => {
            catalog::run_edit(&mut ctx, id, title, fields, fetch, &output).await
        }
        Commands::Delete { id, yes } => catalog::run_delete(&mut ctx, id, yes, &output),
        Commands::Toggle { id, flag } => catalog::run_toggle(&mut ctx, id, flag, &output),
        Commands::Show { id } => catalog::run_show(&ctx, id, &output),
        Commands::Trailer { id } => catalog::run_trailer(&ctx, id, &output),
        Commands::Lookup { title, year } => lookup::run_lookup(&ctx, title, year, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(&mut ctx, cmd, &output)
        }
    }
}
