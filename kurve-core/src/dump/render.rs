use std::io::{self, Write};

use crate::dump::arrow::arrow_for_direction;
use crate::player::{PlayerId, PlayerState};

pub const COLUMN_WIDTH: usize = 20;
pub const NAME_WIDTH: usize = 7;

/// Width of the glyph and name columns together, as they line up in a terminal.
const LABEL_WIDTH: usize = 10;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TableStyle {
    /// Shows a compass arrow next to each direction.
    #[default]
    Arrows,
    Plain,
}

impl TableStyle {
    fn direction_header(self) -> &'static str {
        match self {
            TableStyle::Arrows => "Direction (0 = down)",
            TableStyle::Plain => "Direction",
        }
    }
}

pub fn header(style: TableStyle) -> String {
    let line = format!(
        "{:label$} {:<w$} {:<w$} {:<w$}",
        "",
        "x",
        "y",
        style.direction_header(),
        label = LABEL_WIDTH,
        w = COLUMN_WIDTH
    );
    line.trim_end().to_string()
}

pub fn row(player: PlayerId, state: &PlayerState, style: TableStyle) -> String {
    let line = match style {
        TableStyle::Arrows => format!(
            "{} {:<name$} {:<w$} {:<w$} {} {:<w$}",
            player.glyph(),
            player.name(),
            state.x,
            state.y,
            arrow_for_direction(state.direction).unwrap_or("?"),
            state.direction,
            name = NAME_WIDTH,
            w = COLUMN_WIDTH
        ),
        TableStyle::Plain => format!(
            "{} {:<name$} {:<w$} {:<w$} {:<w$}",
            player.glyph(),
            player.name(),
            state.x,
            state.y,
            state.direction,
            name = NAME_WIDTH,
            w = COLUMN_WIDTH
        ),
    };
    line.trim_end().to_string()
}

pub fn render_to<W: Write>(
    writer: &mut W,
    states: &[(PlayerId, PlayerState)],
    style: TableStyle,
) -> io::Result<()> {
    writeln!(writer, "{}", header(style))?;
    for (player, state) in states {
        writeln!(writer, "{}", row(*player, state, style))?;
    }
    Ok(())
}

pub fn render(states: &[(PlayerId, PlayerState)], style: TableStyle) -> String {
    let mut table = header(style);
    table.push('\n');
    for (player, state) in states {
        table.push_str(&row(*player, state, style));
        table.push('\n');
    }
    table
}
