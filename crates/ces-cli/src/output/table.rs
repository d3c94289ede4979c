//! Plain aligned tables for `--format table`.

/// Narrowest a column is ever squeezed to.
const MIN_COLUMN: usize = 6;
const SEPARATOR: &str = "  ";

/// Render `rows` under `headers`, right-aligning numeric cells.
///
/// With `max_width`, the widest columns give up characters until the table
/// fits (or every column is at its minimum); cut cells end in `…`.
#[must_use]
pub fn render(headers: &[&str], rows: &[Vec<String>], max_width: Option<usize>) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    if let Some(max_width) = max_width {
        shrink_to_fit(&mut widths, headers, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&clip(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = vec![header_line.trim_end().to_string(), divider];
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = row.get(index).map_or("-", String::as_str);
                pad(&clip(cell, *width), *width, is_numeric(cell))
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let separators = widths.len().saturating_sub(1) * SEPARATOR.len();
    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].chars().count().max(MIN_COLUMN))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec!["Acme".to_string(), "3".to_string()],
            vec!["A much longer brand".to_string(), "12".to_string()],
        ]
    }

    #[test]
    fn columns_align_and_numbers_right_align() {
        let table = render(&["brand", "campaigns"], &rows(), None);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("brand"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].ends_with("        3"));
        assert!(lines[3].ends_with("       12"));
    }

    #[test]
    fn wide_tables_are_clipped() {
        let table = render(&["brand", "campaigns"], &rows(), Some(20));
        assert!(table.contains('…'));
        for line in table.lines().skip(2) {
            assert!(line.chars().count() <= 20, "{line}");
        }
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let table = render(&["a", "b"], &[vec!["x".to_string()]], None);
        assert!(table.lines().nth(2).is_some_and(|line| line.ends_with('-')));
    }
}
