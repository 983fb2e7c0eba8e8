//! ui::table
//!
//! Plain-ASCII table rendering for ticket detail and list views.
//!
//! vTiger field values arrive as untrimmed strings of wildly varying
//! length, so titles are clipped to keep rows on one terminal line.

/// Maximum rendered width for ticket titles.
const TITLE_WIDTH: usize = 60;

/// Clip a value to [`TITLE_WIDTH`] characters, marking the cut with `...`.
pub fn clip(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() > TITLE_WIDTH {
        let mut s: String = chars[..TITLE_WIDTH - 3].iter().collect();
        s.push_str("...");
        s
    } else {
        value.to_string()
    }
}

/// Render a bordered two-column label/value table (the `show` view).
pub fn detail(rows: &[(&str, String)]) -> String {
    let label_w = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    let value_w = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);

    let border = format!(
        "+{}+{}+",
        "-".repeat(label_w + 2),
        "-".repeat(value_w + 2)
    );

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    for (label, value) in rows {
        out.push_str(&format!(
            "| {:label_w$} | {:value_w$} |\n",
            label, value
        ));
    }
    out.push_str(&border);
    out.push('\n');
    out
}

/// Render a headered list table with a single separator under the headers.
pub fn listing(headers: &[&str], rows: &[Vec<String>]) -> String {
    let cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for (i, header) in headers.iter().enumerate() {
        out.push_str(&format!("{:w$}  ", header, w = widths[i]));
    }
    out.push('\n');
    for (i, _) in headers.iter().enumerate() {
        out.push_str(&"-".repeat(widths[i]));
        out.push_str("  ");
    }
    out.push('\n');
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols) {
            out.push_str(&format!("{:w$}  ", cell, w = widths[i]));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_leaves_short_values_alone() {
        assert_eq!(clip("hello"), "hello");
    }

    #[test]
    fn clip_truncates_at_sixty() {
        let long = "x".repeat(80);
        let clipped = clip(&long);
        assert_eq!(clipped.chars().count(), 60);
        assert!(clipped.ends_with("..."));
    }

    #[test]
    fn detail_has_matching_borders() {
        let out = detail(&[("Ticket #", "TT9886".to_string()), ("Status", "Open".to_string())]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.first(), lines.last());
        assert!(lines[1].contains("TT9886"));
    }

    #[test]
    fn listing_aligns_columns() {
        let out = listing(
            &["#", "Status"],
            &[
                vec!["TT1".to_string(), "Open".to_string()],
                vec!["TT9886".to_string(), "Closed".to_string()],
            ],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("#"));
        assert!(lines[3].contains("Closed"));
    }
}
