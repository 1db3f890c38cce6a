//! Utilities for printing and everything related to "UI".

use std::iter;

use term_painter::{Color, Style, ToStyle};

macro_rules! print_msg {
    ($kind:ident: $icon:literal => $fmt:literal $($args:tt)*) => {{
        use crate::ui::MsgKind;
        use term_painter::ToStyle;

        let icon_style = MsgKind::$kind.icon_style();
        icon_style.with(|| {
            print!("[{}] ", $icon);
        });

        // Split body into lines (rewrapping for terminal size)
        let body_style = MsgKind::$kind.body_style();
        let lines = crate::ui::wrap_lines(&format!($fmt $($args)*), crate::ui::terminal_width());

        // Print all lines
        for (i, line) in lines.iter().enumerate() {
            let prefix = match i {
                0 => "",
                _ if i == lines.len() - 1 => "    └ ",
                _ => "    │ ",
            };

            println!("{}{}", icon_style.paint(prefix), body_style.paint(line));

        }
    }};
}

macro_rules! progress {
    ([$fmt:literal $($args:tt)*] => $body:tt) => {{
        use std::{
            io::{stdout, Write},
            time::Instant,
        };
        use crate::ui::MsgKind;
        use term_painter::ToStyle;

        let print_body = || {
            MsgKind::Progress.body_style().with(|| {
                print!($fmt $($args)*);
                print!(" ... ");
            });
        };

        MsgKind::Progress.icon_style().with(|| print!("[…] "));
        print_body();
        let _ = stdout().flush();

        let before = Instant::now();
        let out = $body;
        let time = before.elapsed();

        print!("\r{} ", MsgKind::Progress.icon_style().paint("[✓]"));
        print_body();
        MsgKind::Progress.body_style().with(|| {
            println!("{} (in {:.2?})", MsgKind::Progress.icon_style().paint("done"), time);
        });

        out
    }};
}

macro_rules! info {
    () => { info!("") };
    ($($t:tt)*) => {
        print_msg!(Info: 'i' => $($t)*);
    };
}

macro_rules! warn {
    () => { warn!("") };
    ($($t:tt)*) => {
        print_msg!(Warning: 'w' => $($t)*);
    };
}

macro_rules! error {
    () => { error!("") };
    ($($t:tt)*) => {
        print_msg!(Error: '!' => $($t)*);
    };
}

pub enum MsgKind {
    Error,
    Warning,
    Info,
    Progress,
}

impl MsgKind {
    pub fn icon_style(&self) -> Style {
        match self {
            MsgKind::Error => Color::Red.bold(),
            MsgKind::Warning => Color::Yellow.bold(),
            MsgKind::Info => Color::Blue.bold(),
            MsgKind::Progress => Color::Green.bold(),
        }
    }

    pub fn body_style(&self) -> Style {
        match self {
            MsgKind::Error => Color::BrightRed.to_style(),
            MsgKind::Warning => Color::BrightYellow.to_style(),
            MsgKind::Info => Color::NotSet.to_style(),
            MsgKind::Progress => Color::NotSet.to_style(),
        }
    }
}

/// Width used for wrapping and charts: the terminal width, but at most 100
/// columns. 80 if the width can't be determined.
pub fn terminal_width() -> usize {
    std::cmp::min(100, term_size::dimensions().map(|(w, _)| w).unwrap_or(80))
}

/// Splits `body` into lines that fit a message printed into a terminal with
/// `width` columns. The icon prefix takes up 7 of them.
pub fn wrap_lines(body: &str, width: usize) -> Vec<String> {
    let line_len = width.saturating_sub(7).max(1);
    let mut lines = Vec::new();

    let mut current_line = String::new();
    for word in body.split_whitespace() {
        if !current_line.is_empty()
            && current_line.chars().count() + word.chars().count() >= line_len
        {
            lines.push(current_line.clone());
            current_line.clear();
        }

        current_line.push_str(word);
        current_line.push(' ');
    }
    lines.push(current_line);

    lines
}

/// Formats the given integer with `,` as thousand separator.
pub fn fmt_with_thousand_sep(v: u64) -> String {
    let digits = v.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}


// ===========================================================================
// ===== Tables
// ===========================================================================

/// Defines the characters to draw a table.
#[derive(Copy, Clone)]
struct TableStyle {
    horizontal: char,
    vertical: char,
    cross: char,
    vertical_double: char,
    cross_vertical_double: char,
}

/// A nice unicode table.
const UNICODE_TABLE: TableStyle = TableStyle {
    horizontal: '─',
    vertical: '│',
    cross: '┼',
    vertical_double: '║',
    cross_vertical_double: '╫',
};

/// Prints a table with a header row. The first column is treated as label
/// column and separated by a double line. All other cells are right
/// aligned.
pub fn print_table(header: &[&str], rows: &[Vec<String>]) {
    let style = UNICODE_TABLE;
    let num_cols = header.len();
    let col_widths = (0..num_cols).map(|col| {
        rows.iter()
            .map(|row| row.get(col).map(|c| c.chars().count()).unwrap_or(0))
            .chain(iter::once(header[col].chars().count()))
            .max()
            .unwrap_or(0)
    }).collect::<Vec<_>>();

    let separator = |col: usize, single: char, double: char| {
        match col {
            _ if col == num_cols - 1 => None,
            0 => Some(double),
            _ => Some(single),
        }
    };

    // ----- Print header ----------------------------------------------------
    print!("    ");
    for (col, title) in header.iter().enumerate() {
        print!(" {} ", Color::BrightWhite.bold().paint(format!("{: ^1$}", title, col_widths[col])));
        if let Some(c) = separator(col, style.vertical, style.vertical_double) {
            print!("{}", c);
        }
    }
    println!();

    // ----- Print separator -------------------------------------------------
    print!("    ");
    for col in 0..num_cols {
        let line = iter::repeat(style.horizontal)
            .take(col_widths[col] + 2)
            .collect::<String>();
        print!("{}", line);
        if let Some(c) = separator(col, style.cross, style.cross_vertical_double) {
            print!("{}", c);
        }
    }
    println!();

    // ----- Print table body ------------------------------------------------
    let label_style = Color::White.bold();
    for row in rows {
        print!("    ");
        for col in 0..num_cols {
            let cell = row.get(col).map(|s| s.as_str()).unwrap_or("");
            if col == 0 {
                print!(" {} ", label_style.paint(format!("{: <1$}", cell, col_widths[col])));
            } else {
                print!(" {: >1$} ", cell, col_widths[col]);
            }
            if let Some(c) = separator(col, style.vertical, style.vertical_double) {
                print!("{}", c);
            }
        }
        println!();
    }
}


// ===========================================================================
// ===== Bar chart
// ===========================================================================

/// Block characters for eighths of a cell, from 1/8 to 8/8.
const BAR_EIGHTHS: [char; 8] = ['▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Returns a bar of `value / max * width` cells with sub-cell resolution.
fn bar(value: f64, max: f64, width: usize) -> String {
    if !(max > 0.0) || !(value > 0.0) {
        return String::new();
    }

    let eighths = ((value / max).min(1.0) * (width * 8) as f64).round() as usize;
    let mut out = iter::repeat(BAR_EIGHTHS[7]).take(eighths / 8).collect::<String>();
    if eighths % 8 != 0 {
        out.push(BAR_EIGHTHS[eighths % 8 - 1]);
    }

    out
}

/// Prints a horizontal bar chart, one bar per `(label, value)` pair. All bars
/// are scaled relative to the largest value.
pub fn print_bar_chart(title: &str, bars: &[(&str, f64)]) {
    const COLORS: [Color; 3] = [Color::Red, Color::Green, Color::Blue];

    let max = bars.iter().map(|&(_, v)| v).fold(0.0, f64::max);
    let label_width = bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let width = terminal_width().saturating_sub(label_width + 24).max(10);

    println!("    {}", Color::BrightWhite.bold().paint(title));
    for (i, &(label, value)) in bars.iter().enumerate() {
        let cells = bar(value, max, width);
        println!(
            "    {: >5$} {} {}{} {:.3e}",
            label,
            UNICODE_TABLE.vertical,
            COLORS[i % COLORS.len()].paint(&cells),
            " ".repeat(width - cells.chars().count()),
            value,
            label_width,
        );
    }
}
