const YOUTUBE_SEARCH_URL: &str = "https://www.youtube.com/results?search_query=";

/// YouTube search URL for "`<title>` official trailer"
pub fn trailer_search_url(title: &str) -> String {
    let query = format!("{} official trailer", title.trim());
    format!("{}{}", YOUTUBE_SEARCH_URL, quote_plus(&query))
}

// Form encoding: spaces become '+', everything else percent-encoded
fn quote_plus(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}
