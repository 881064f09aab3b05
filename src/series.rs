use crate::data::{parse_number, ColumnIndex, Row};
use log::debug;

/// A requested column that exists in the data.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    /// Position of the column inside a row.
    pub column: usize,
    /// Position in the requested column list; selects the palette color.
    pub position: usize,
}

/// Outcome of looking up one requested column name.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesResolution {
    Found(Series),
    /// The name is not a header. The series is skipped, not reported.
    Missing { name: String, position: usize },
}

pub fn resolve(name: &str, position: usize, index: &ColumnIndex) -> SeriesResolution {
    match index.get(name) {
        Some(column) => SeriesResolution::Found(Series {
            name: name.to_string(),
            column,
            position,
        }),
        None => SeriesResolution::Missing {
            name: name.to_string(),
            position,
        },
    }
}

/// Resolve every requested column, dropping the unknown ones.
pub fn resolve_all(columns: &[String], index: &ColumnIndex) -> Vec<Series> {
    columns
        .iter()
        .enumerate()
        .filter_map(|(position, name)| match resolve(name, position, index) {
            SeriesResolution::Found(series) => Some(series),
            SeriesResolution::Missing { name, position } => {
                debug!("column '{}' (#{}) not found, skipping series", name, position);
                None
            }
        })
        .collect()
}

impl Series {
    /// Every numeric Y value of this series, whether or not X parses.
    pub fn values<'a>(&'a self, rows: &'a [&'a Row]) -> impl Iterator<Item = f64> + 'a {
        rows.iter()
            .filter_map(move |row| row.get(self.column).and_then(|field| parse_number(field)))
    }

    /// Data-space points; a row drops out when its X or Y does not parse.
    pub fn points(&self, rows: &[&Row], x_index: usize) -> Vec<(f64, f64)> {
        rows.iter()
            .filter_map(|row| {
                let x = row.get(x_index).and_then(|field| parse_number(field))?;
                let y = row.get(self.column).and_then(|field| parse_number(field))?;
                Some((x, y))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(headers: &[&str]) -> ColumnIndex {
        let headers: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        ColumnIndex::from_headers(&headers)
    }

    fn make_rows(rows: &[&[&str]]) -> Vec<Row> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_resolve_found_and_missing() {
        let index = index(&["_", "a", "b"]);
        assert_eq!(
            resolve("b", 0, &index),
            SeriesResolution::Found(Series {
                name: "b".to_string(),
                column: 2,
                position: 0
            })
        );
        assert_eq!(
            resolve("zzz", 1, &index),
            SeriesResolution::Missing {
                name: "zzz".to_string(),
                position: 1
            }
        );
    }

    #[test]
    fn test_resolve_all_keeps_requested_positions() {
        let index = index(&["_", "a", "b"]);
        let columns = vec!["nope".to_string(), "b".to_string(), "a".to_string()];
        let series = resolve_all(&columns, &index);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "b");
        assert_eq!(series[0].position, 1);
        assert_eq!(series[1].name, "a");
        assert_eq!(series[1].position, 2);
    }

    #[test]
    fn test_resolve_all_none_valid() {
        let index = index(&["_", "a"]);
        let columns = vec!["x".to_string()];
        assert!(resolve_all(&columns, &index).is_empty());
    }

    #[test]
    fn test_points_skip_bad_cells() {
        let rows = make_rows(&[&["1", "10"], &["x", "20"], &["3", "n/a"], &["4", "40"]]);
        let refs: Vec<&Row> = rows.iter().collect();
        let series = Series {
            name: "v".to_string(),
            column: 1,
            position: 0,
        };
        assert_eq!(series.points(&refs, 0), vec![(1.0, 10.0), (4.0, 40.0)]);
        let values: Vec<f64> = series.values(&refs).collect();
        assert_eq!(values, vec![10.0, 20.0, 40.0]);
    }
}
