//! Top-level rendering coordinator.
//!
//! Renders a [`UIViewModel`] as plain text. Layout:
//!
//! ```text
//! Search: <term>
//!
//! Trending Movies
//!   1. <term>
//!   ...
//!
//! All Movies
//!   <card> | <spinner> | <error>
//! ```

use std::io::{self, Write};

use crate::ui::viewmodel::{MovieCard, MovieSection, UIViewModel};

const PLACEHOLDER_POSTER: &str = "no-movie.png";

/// Writes the view model to `out`.
///
/// # Errors
///
/// Returns any error raised by the underlying writer.
pub fn render<W: Write>(vm: &UIViewModel, out: &mut W) -> io::Result<()> {
    writeln!(out, "Search: {}", vm.search_term)?;

    if !vm.trending.is_empty() {
        writeln!(out)?;
        writeln!(out, "Trending Movies")?;
        for item in &vm.trending {
            writeln!(out, "  {}. {}", item.rank, item.term)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "All Movies")?;
    match &vm.movies {
        MovieSection::Loading => writeln!(out, "  Loading...")?,
        MovieSection::Error(message) => writeln!(out, "  {message}")?,
        MovieSection::Cards(cards) => {
            for card in cards {
                render_card(card, out)?;
            }
        }
    }

    out.flush()
}

fn render_card<W: Write>(card: &MovieCard, out: &mut W) -> io::Result<()> {
    let poster = card.poster_url.as_deref().unwrap_or(PLACEHOLDER_POSTER);
    let language = if card.language.is_empty() { "-" } else { &card.language };
    writeln!(
        out,
        "  {} [{}] {} | {} | {}",
        card.title, card.rating, language, card.year, poster
    )
}
