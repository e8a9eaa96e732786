//! Page rendering.
//!
//! Turns the aggregate and its artists into HTML pages, and the aggregate
//! into JSON for `--dump`.

pub mod html;

pub use html::{
    render_artist, render_bad_request, render_error, render_index, render_json, render_not_found,
};
