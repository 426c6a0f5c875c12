//! Text grid of the dataset with one occurrence highlighted.
//!
//! Rows are series, columns are slices. Matched cells are bracketed and
//! Missing cells print as `.`.

use crate::input::Dataset;
use crate::store::Position;
use crate::tree::NetTree;
use std::collections::HashSet;
use std::fmt::Write;

/// Renders occurrence `index` of `tree` over `dataset`, or `None` when the
/// index is out of range.
pub fn render_occurrence(dataset: &Dataset, tree: &NetTree, index: usize) -> Option<String> {
    let occurrence = tree.patterns().get(index)?;
    let matched: HashSet<Position> = occurrence.iter().map(|&id| tree.node(id).position()).collect();

    let cell_text = |series: usize, slice: usize| -> String {
        let text = dataset
            .symbol(series, slice)
            .value()
            .map_or_else(|| ".".to_string(), |v| v.to_string());
        if matched.contains(&Position { slice, series }) {
            format!("[{}]", text)
        } else {
            text
        }
    };

    let cells: Vec<Vec<String>> = (0..dataset.series_count())
        .map(|series| (0..dataset.slice_count()).map(|slice| cell_text(series, slice)).collect())
        .collect();

    let width = cells.iter().flatten().map(|c| c.chars().count()).max().unwrap_or(1);
    let label_width = dataset.series_names().iter().map(|n| n.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "Occurrence {} of {}", index, tree.patterns().len());
    for (series, row) in cells.iter().enumerate() {
        let _ = write!(out, "{:>lw$} |", dataset.series_name(series), lw = label_width);
        for cell in row {
            let _ = write!(out, " {:^w$}", cell, w = width);
        }
        let _ = writeln!(out);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;
    use crate::input::SubruleSpec;
    use crate::symbol::Value;

    #[test]
    fn test_highlights_matched_cells() {
        let data = Dataset::with_unit_steps(vec![
            ("A".to_string(), vec![Some(Value::Number(4.0)), None, Some(Value::Number(0.0))]),
            ("B".to_string(), vec![Some("x".into()), Some("y".into()), Some("x".into())]),
        ])
        .unwrap();
        let specs = [SubruleSpec::new("A", 3, ">"), SubruleSpec::new("B", "y", "=")];
        let tree = NetTree::from_specs(&data, &specs, &MatchConfig::default()).unwrap();

        let out = render_occurrence(&data, &tree, 0).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Occurrence 0 of 1");
        assert_eq!(lines[1], "A | [4]  .   0 ");
        assert_eq!(lines[2], "B |  x  [y]  x ");
        assert!(render_occurrence(&data, &tree, 1).is_none());
    }

    #[test]
    fn test_columns_align_on_characters_not_bytes() {
        let data = Dataset::with_unit_steps(vec![(
            "Ä".to_string(),
            vec![Some("ab".into()), Some("é".into()), Some("x".into())],
        )])
        .unwrap();
        let specs = [SubruleSpec::new("Ä", "é", "=")];
        let tree = NetTree::from_specs(&data, &specs, &MatchConfig::default()).unwrap();

        let out = render_occurrence(&data, &tree, 0).unwrap();
        assert_eq!(out.lines().nth(1), Some("Ä | ab  [é]  x "));
    }
}
