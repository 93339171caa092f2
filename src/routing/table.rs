//! Static endpoint table.
//!
//! Every upstream endpoint the templated proxy exposes, with the query
//! defaults applied when the caller leaves them out. The table is a
//! process-wide constant; nothing mutates it after startup.

/// A named upstream endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Human-readable name used in logs and metrics.
    pub name: &'static str,
    /// Upstream path with `:name` placeholders.
    pub pattern: &'static str,
    /// Default query values in the order they are serialized.
    pub defaults: &'static [(&'static str, &'static str)],
}

const PAGE_ONE: &[(&str, &str)] = &[("page", "1")];
const NONE: &[(&str, &str)] = &[];

const fn endpoint(
    name: &'static str,
    pattern: &'static str,
    defaults: &'static [(&'static str, &'static str)],
) -> Endpoint {
    Endpoint { name, pattern, defaults }
}

/// All endpoints, in registration order.
pub static ENDPOINTS: &[Endpoint] = &[
    endpoint("Home", "/home", NONE),
    endpoint("A-Z List", "/animes/az-list/:letter", PAGE_ONE),
    endpoint("Top Airing", "/animes/top-airing", PAGE_ONE),
    endpoint("Most Popular", "/animes/most-popular", PAGE_ONE),
    endpoint("Most Favorite", "/animes/most-favorite", PAGE_ONE),
    endpoint("Completed", "/animes/completed", PAGE_ONE),
    endpoint("Recently Added", "/animes/recently-added", PAGE_ONE),
    endpoint("Recently Updated", "/animes/recently-updated", PAGE_ONE),
    endpoint("Top Upcoming", "/animes/top-upcoming", PAGE_ONE),
    endpoint("Genre", "/animes/genre/:genre", PAGE_ONE),
    endpoint("Subbed Anime", "/animes/subbed-anime", PAGE_ONE),
    endpoint("Dubbed Anime", "/animes/dubbed-anime", PAGE_ONE),
    endpoint("Movie", "/animes/movie", PAGE_ONE),
    endpoint("TV", "/animes/tv", PAGE_ONE),
    endpoint("OVA", "/animes/ova", PAGE_ONE),
    endpoint("ONA", "/animes/ona", PAGE_ONE),
    endpoint("Special", "/animes/special", PAGE_ONE),
    endpoint("Events", "/animes/events", PAGE_ONE),
    endpoint("Details", "/anime/:id", NONE),
    endpoint("Search", "/search", PAGE_ONE),
    endpoint("Search Suggestions", "/suggestion", PAGE_ONE),
    endpoint("Characters", "/characters/:id", PAGE_ONE),
    endpoint("Character Detail", "/character/:id", NONE),
    endpoint("Actor Detail", "/character/:id", NONE),
    endpoint("Episodes", "/episodes/:id", NONE),
    endpoint("Servers", "/servers", NONE),
    endpoint("Stream", "/stream", &[("type", "sub"), ("server", "hd-2")]),
];

/// Default query values for a pattern. Unknown patterns have none.
///
/// When two entries share a pattern the first one wins.
pub fn default_query(pattern: &str) -> &'static [(&'static str, &'static str)] {
    ENDPOINTS
        .iter()
        .find(|e| e.pattern == pattern)
        .map_or(NONE, |e| e.defaults)
}

/// Endpoints with one entry per distinct pattern, plus the entries that
/// were folded into an earlier one.
pub fn unique_endpoints() -> (Vec<&'static Endpoint>, Vec<&'static Endpoint>) {
    let mut unique: Vec<&'static Endpoint> = Vec::with_capacity(ENDPOINTS.len());
    let mut aliases = Vec::new();
    for endpoint in ENDPOINTS {
        if unique.iter().any(|u| u.pattern == endpoint.pattern) {
            aliases.push(endpoint);
        } else {
            unique.push(endpoint);
        }
    }
    (unique, aliases)
}
