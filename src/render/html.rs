//! HTML page generation.
//!
//! This module renders the artist listing, the artist detail page and the
//! error pages. Every piece of remote data is escaped before it lands in
//! the markup.

use crate::models::{Aggregate, MergedEntity};
use anyhow::Result;

/// Shared stylesheet, inlined so the server has no static file route.
const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #101418; color: #e8e8e8; }
header { padding: 1.5rem 2rem; background: #1b2128; }
header a { color: inherit; text-decoration: none; }
main { padding: 2rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 1.5rem; }
.card { background: #1b2128; border-radius: 8px; overflow: hidden; color: inherit; text-decoration: none; }
.card img { width: 100%; display: block; }
.card h2 { font-size: 1.1rem; margin: 0.75rem; }
.card p { margin: 0 0.75rem 0.75rem; color: #9aa4ae; }
.artist { display: flex; gap: 2rem; flex-wrap: wrap; }
.artist img { width: 300px; border-radius: 8px; }
table { border-collapse: collapse; }
td, th { padding: 0.4rem 0.8rem; border-bottom: 1px solid #2c343d; text-align: left; vertical-align: top; }
footer { padding: 1rem 2rem; color: #6c7680; }
"#;

/// Render the listing page for every artist.
pub fn render_index(aggregate: &Aggregate) -> String {
    let mut body = String::new();

    body.push_str(&format!("<p>{} artists</p>\n", aggregate.len()));

    if aggregate.is_empty() {
        body.push_str("<p>No artists are available right now.</p>\n");
        return page("Groupie Tracker", &body);
    }

    body.push_str("<div class=\"grid\">\n");
    for artist in &aggregate.artists {
        body.push_str(&render_card(artist));
    }
    body.push_str("</div>\n");

    page("Groupie Tracker", &body)
}

/// Render one artist card for the listing grid.
fn render_card(artist: &MergedEntity) -> String {
    format!(
        "<a class=\"card\" href=\"/artist?id={id}\">\n\
         <img src=\"{image}\" alt=\"{name}\">\n\
         <h2>{name}</h2>\n\
         <p>Since {created} · First album {album}</p>\n\
         </a>\n",
        id = artist.id,
        image = escape_html(&artist.image),
        name = escape_html(&artist.name),
        created = artist.creation_date,
        album = escape_html(&artist.first_album),
    )
}

/// Render the detail page for one artist.
pub fn render_artist(artist: &MergedEntity) -> String {
    let mut body = String::new();

    body.push_str("<section class=\"artist\">\n");
    body.push_str(&format!(
        "<img src=\"{}\" alt=\"{}\">\n",
        escape_html(&artist.image),
        escape_html(&artist.name)
    ));

    body.push_str("<div>\n");
    body.push_str(&format!("<h1>{}</h1>\n", escape_html(&artist.name)));
    body.push_str(&format!(
        "<p>Created in {} · First album {}</p>\n",
        artist.creation_date,
        escape_html(&artist.first_album)
    ));

    body.push_str("<h2>Members</h2>\n<ul>\n");
    for member in &artist.members {
        body.push_str(&format!("<li>{}</li>\n", escape_html(member)));
    }
    body.push_str("</ul>\n</div>\n</section>\n");

    body.push_str(&render_schedule(artist));

    body.push_str("<h2>Locations</h2>\n<ul>\n");
    for location in &artist.locations {
        body.push_str(&format!(
            "<li>{}</li>\n",
            escape_html(&format_location(location))
        ));
    }
    body.push_str("</ul>\n");

    body.push_str("<h2>Concert dates</h2>\n<ul>\n");
    for date in &artist.concert_dates {
        body.push_str(&format!("<li>{}</li>\n", escape_html(format_date(date))));
    }
    body.push_str("</ul>\n");

    body.push_str("<p><a href=\"/\">Back to all artists</a></p>\n");

    page(&artist.name, &body)
}

/// Render the location to dates table.
fn render_schedule(artist: &MergedEntity) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "<h2>Tour schedule ({} concerts)</h2>\n",
        artist.concert_count()
    ));

    if artist.dates_locations.is_empty() {
        section.push_str("<p>No concerts scheduled.</p>\n");
        return section;
    }

    section.push_str("<table>\n<tr><th>Location</th><th>Dates</th></tr>\n");
    for (location, dates) in &artist.dates_locations {
        let dates: Vec<String> = dates
            .iter()
            .map(|d| escape_html(format_date(d)))
            .collect();
        section.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape_html(&format_location(location)),
            dates.join("<br>")
        ));
    }
    section.push_str("</table>\n");

    section
}

/// Render the page shown for unknown paths and unknown artist ids.
pub fn render_not_found() -> String {
    page(
        "Not found",
        "<h1>404</h1>\n<p>This page does not exist.</p>\n<p><a href=\"/\">Back to all artists</a></p>\n",
    )
}

/// Render the page shown for a malformed request.
pub fn render_bad_request(message: &str) -> String {
    page(
        "Bad request",
        &format!(
            "<h1>400</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to all artists</a></p>\n",
            escape_html(message)
        ),
    )
}

/// Render the page shown when the artist data could not be assembled.
pub fn render_error(message: &str) -> String {
    page(
        "Service unavailable",
        &format!(
            "<h1>503</h1>\n<p>Artist data is unavailable right now.</p>\n<p><small>{}</small></p>\n",
            escape_html(message)
        ),
    )
}

/// Wrap a body in the shared layout.
fn page(title: &str, body: &str) -> String {
    let mut output = String::new();

    output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    output.push_str("<meta charset=\"utf-8\">\n");
    output.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    output.push_str(&format!("<style>{}</style>\n", STYLE));
    output.push_str("</head>\n<body>\n");
    output.push_str("<header><a href=\"/\"><strong>Groupie Tracker</strong></a></header>\n");
    output.push_str("<main>\n");
    output.push_str(body);
    output.push_str("</main>\n");
    output.push_str(&format!(
        "<footer>groupie-tracker v{}</footer>\n",
        env!("CARGO_PKG_VERSION")
    ));
    output.push_str("</body>\n</html>\n");

    output
}

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `north_carolina-usa` becomes `North Carolina, USA`.
pub fn format_location(raw: &str) -> String {
    let (place, country) = match raw.rsplit_once('-') {
        Some((place, country)) => (place, Some(country)),
        None => (raw, None),
    };

    let place = place
        .split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    match country {
        Some(country) if country.len() <= 3 => format!("{}, {}", place, country.to_uppercase()),
        Some(country) => format!(
            "{}, {}",
            place,
            country
                .split('_')
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" ")
        ),
        None => place,
    }
}

/// Upstream marks some dates with a leading `*`.
fn format_date(raw: &str) -> &str {
    raw.trim_start_matches('*')
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Pretty JSON of the whole aggregate.
pub fn render_json(aggregate: &Aggregate) -> Result<String> {
    serde_json::to_string_pretty(aggregate).map_err(Into::into)
}
