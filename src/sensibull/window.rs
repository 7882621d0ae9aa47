use super::config::{WINDOW_AFTER, WINDOW_BEFORE};
use super::models::{OptionRow, Window};
use crate::error::{Result, ScrapeError};

/// Index and value of the largest parseable call OI; the first one wins on ties
pub fn find_max_calls_oi(rows: &[OptionRow]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, row) in rows.iter().enumerate() {
        let Some(oi) = row.calls_oi_value() else {
            continue;
        };
        match best {
            Some((_, max)) if oi <= max => {}
            _ => best = Some((idx, oi)),
        }
    }

    best
}

/// Half-open range `[start, end)` of `WINDOW_BEFORE` rows before `center` and
/// `WINDOW_AFTER` rows from it, clipped to `len`
pub fn window_bounds(center: usize, len: usize) -> (usize, usize) {
    let start = center.saturating_sub(WINDOW_BEFORE);
    let end = (center + WINDOW_AFTER).min(len);
    (start.min(end), end)
}

/// Pick the rows around the strike with the largest call OI
pub fn select_window(rows: &[OptionRow]) -> Result<Window> {
    let (extremum_index, max_calls_oi) =
        find_max_calls_oi(rows).ok_or(ScrapeError::NoValidCallsOi)?;

    let (start, end) = window_bounds(extremum_index, rows.len());

    Ok(Window {
        extremum_index,
        max_calls_oi,
        start,
        rows: rows[start..end].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_with_oi(values: &[&str]) -> Vec<OptionRow> {
        values
            .iter()
            .enumerate()
            .map(|(i, oi)| OptionRow {
                calls_oi_change: "0%".to_string(),
                calls_oi: oi.to_string(),
                calls_ltp: "1".to_string(),
                strike: (17000 + i * 50).to_string(),
                iv: "12".to_string(),
                puts_ltp: "1".to_string(),
                puts_oi: "10".to_string(),
                puts_oi_change: "0%".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_window_bounds() {
        assert_eq!(window_bounds(5, 20), (3, 10));
        assert_eq!(window_bounds(0, 10), (0, 5));
        assert_eq!(window_bounds(1, 10), (0, 6));
        assert_eq!(window_bounds(8, 10), (6, 10));
        assert_eq!(window_bounds(0, 1), (0, 1));
    }

    #[test]
    fn test_unparseable_values_are_skipped() {
        let rows = rows_with_oi(&["-", "300", "abc", "200"]);
        assert_eq!(find_max_calls_oi(&rows), Some((1, 300.0)));
    }

    #[test]
    fn test_first_max_wins_on_tie() {
        let rows = rows_with_oi(&["10", "50", "50", "5"]);
        assert_eq!(find_max_calls_oi(&rows), Some((1, 50.0)));
    }

    #[test]
    fn test_window_keeps_extremum_row() {
        let rows = rows_with_oi(&["1", "2", "3", "4", "90", "5", "6", "7", "8", "9", "10"]);
        let window = select_window(&rows).unwrap();

        assert_eq!(window.extremum_index, 4);
        assert_eq!(window.start, 2);
        assert_eq!(window.len(), 7);
        assert_eq!(window.extremum_row().unwrap().calls_oi, "90");
        assert_eq!(window.rows.first().unwrap().calls_oi, "3");
        assert_eq!(window.rows.last().unwrap().calls_oi, "8");
    }

    #[test]
    fn test_empty_rows_have_no_window() {
        assert!(matches!(select_window(&[]), Err(ScrapeError::NoValidCallsOi)));
    }
}
