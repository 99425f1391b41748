use clap::ValueEnum;
use comfy_table::{Cell, Table};
use movie_catalog_core::MovieId;
use movie_catalog_models::Movie;
use owo_colors::OwoColorize;
use serde_json::{json, Value};

pub const EMPTY_CATALOG_MESSAGE: &str = "No movies found. Add your first movie.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.message("success", "✓".green().to_string(), msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{}", msg.as_ref()),
            _ => self.print_json(&json!({ "type": "info", "message": msg.as_ref() })),
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.message("warning", "⚠".yellow().to_string(), msg.as_ref());
    }

    /// Errors are shown even in quiet mode
    pub fn error(&self, msg: impl AsRef<str>) {
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red(), msg.as_ref()),
            _ => self.print_json(&json!({ "type": "error", "message": msg.as_ref() })),
        }
    }

    pub fn json(&self, data: &Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }
        self.print_json(data);
    }

    fn message(&self, kind: &str, marker: String, msg: &str) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{} {}", marker, msg),
            _ => self.print_json(&json!({ "type": kind, "message": msg })),
        }
    }

    fn print_json(&self, data: &Value) {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(data).unwrap_or_default()),
            OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(data).unwrap_or_default()),
            OutputFormat::Human => println!("{}", data),
        }
    }

    /// Print a list of movies as a table, or as a JSON array
    pub fn movies(&self, movies: &[(MovieId, &Movie)]) {
        if self.is_human() {
            if self.quiet {
                return;
            }
            if movies.is_empty() {
                println!("{}", EMPTY_CATALOG_MESSAGE);
                return;
            }
            println!("{}", movie_table(movies));
        } else {
            let items: Vec<Value> = movies.iter().map(|(id, movie)| movie_json(*id, movie)).collect();
            self.json(&Value::Array(items));
        }
    }

    /// Print every field of a single movie
    pub fn movie_details(&self, id: MovieId, movie: &Movie) {
        if !self.is_human() {
            self.json(&movie_json(id, movie));
            return;
        }
        if self.quiet {
            return;
        }

        let mut table = Table::new();
        table.set_header(vec![
            Cell::new(format!("#{}", id)).add_attribute(comfy_table::Attribute::Bold),
            Cell::new(&movie.title)
                .fg(comfy_table::Color::Cyan)
                .add_attribute(comfy_table::Attribute::Bold),
        ]);
        let rows = [
            ("Year", display_or_dash(&movie.year)),
            ("Rating", format!("{:.1}", movie.rating)),
            ("Watched", yes_no(movie.watched).to_string()),
            ("Favorite", yes_no(movie.favorite).to_string()),
            ("Watchlist", yes_no(movie.watchlist).to_string()),
            ("Poster", display_or_dash(&movie.poster_url)),
            ("Trailer", movie.trailer_link()),
            ("Local file", display_or_dash(&movie.local_file)),
            ("Notes", display_or_dash(&movie.notes)),
            ("Added", movie.created_at().to_string()),
        ];
        for (label, value) in rows {
            table.add_row(vec![Cell::new(label), Cell::new(value)]);
        }
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        println!("{}", table);
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn display_or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

pub fn movie_table(movies: &[(MovieId, &Movie)]) -> Table {
    let mut table = Table::new();
    table.set_header(
        ["#", "Title", "Year", "Rating", "Watched", "Favorite", "Watchlist"]
            .into_iter()
            .map(|h| Cell::new(h).add_attribute(comfy_table::Attribute::Bold)),
    );
    for (id, movie) in movies {
        table.add_row(vec![
            Cell::new(id.to_string()),
            Cell::new(&movie.title),
            Cell::new(display_or_dash(&movie.year)),
            Cell::new(format!("{:.1}", movie.rating)),
            Cell::new(yes_no(movie.watched)),
            Cell::new(yes_no(movie.favorite)),
            Cell::new(yes_no(movie.watchlist)),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

/// The stored record plus its handle
pub fn movie_json(id: MovieId, movie: &Movie) -> Value {
    let mut value = serde_json::to_value(movie).unwrap_or_else(|_| json!({}));
    if let Value::Object(fields) = &mut value {
        fields.insert("id".to_string(), json!(id));
    }
    value
}
