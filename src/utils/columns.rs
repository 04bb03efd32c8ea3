//! Multi-column text layout

/// Lay out `items` row by row in as many columns as fit in `term_width`
///
/// Each column is as wide as the longest item plus two spaces of gutter.
/// At least one column is always used.
pub fn format_columns(items: &[String], term_width: usize) -> String {
    let Some(longest) = items.iter().map(|item| item.chars().count()).max() else {
        return String::new();
    };
    let col_width = longest + 2;
    let num_cols = (term_width / col_width).max(1);

    items
        .chunks(num_cols)
        .map(|row| {
            row.iter()
                .map(|item| format!("{item:<col_width$}"))
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_columns_empty() {
        assert_eq!(format_columns(&[], 80), "");
    }

    #[test]
    fn test_format_columns_wraps_to_width() {
        let items = names(&["bpm", "hits1", "octane"]);
        // col width 8, two columns fit in 16
        assert_eq!(format_columns(&items, 16), "bpm     hits1\noctane");
    }

    #[test]
    fn test_format_columns_narrow_terminal() {
        let items = names(&["siriusxmhits1", "bpm"]);
        assert_eq!(format_columns(&items, 4), "siriusxmhits1\nbpm");
    }
}
