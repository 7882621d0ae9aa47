mod common;

use common::{as_strs, cells, sample_rows, table, FakeBrowser};
use oi_analyzer::sensibull::{extract_rows, find_max_calls_oi, parse_row, select_window, OptionRow};
use oi_analyzer::ScrapeError;

fn rows_with_calls_oi(values: &[&str]) -> Vec<OptionRow> {
    values
        .iter()
        .enumerate()
        .map(|(i, oi)| {
            let raw = cells(&(17000 + i * 50).to_string(), oi, "10");
            parse_row(i + 1, &raw).unwrap()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_clamps_at_upper_bound() {
        let rows = rows_with_calls_oi(&["5", "20", "3", "50", "9", "1", "7", "2", "100", "4"]);
        let window = select_window(&rows).unwrap();

        assert_eq!(window.extremum_index, 8);
        assert_eq!(window.max_calls_oi, 100.0);
        assert_eq!(window.start, 6);
        assert_eq!(window.len(), 4);
        assert_eq!(window.rows, rows[6..10].to_vec());
    }

    #[test]
    fn test_window_clamps_negative_start_to_zero() {
        let rows = rows_with_calls_oi(&["900", "20", "3", "50", "9", "1", "7", "2", "100", "4"]);
        let window = select_window(&rows).unwrap();

        assert_eq!(window.extremum_index, 0);
        assert_eq!(window.start, 0);
        assert_eq!(window.len(), 5);
        assert_eq!(window.rows, rows[0..5].to_vec());
        // Never wraps around to the tail of the list
        assert!(!window.rows.contains(&rows[9]));
    }

    #[test]
    fn test_full_window_in_the_middle() {
        let rows = rows_with_calls_oi(&["1", "2", "3", "4", "5", "500", "6", "7", "8", "9", "10", "11"]);
        let window = select_window(&rows).unwrap();

        assert_eq!(window.start, 3);
        assert_eq!(window.len(), 7);
        assert_eq!(window.rows, rows[3..10].to_vec());
        assert_eq!(window.extremum_row().unwrap().strike, "17250");
    }

    #[test]
    fn test_unparseable_calls_oi_skipped_but_kept_in_window() {
        let rows = rows_with_calls_oi(&["-", "40", "n/a", "60", "-"]);
        let window = select_window(&rows).unwrap();

        assert_eq!(window.extremum_index, 3);
        assert_eq!(window.rows.len(), 4);
        assert_eq!(window.rows[0].calls_oi, "40");
        assert_eq!(window.rows[1].calls_oi, "n/a");
        assert_eq!(window.rows[3].calls_oi, "-");
    }

    #[test]
    fn test_infinite_calls_oi_never_wins() {
        let rows = rows_with_calls_oi(&["inf", "40", "NaN", "30"]);
        let window = select_window(&rows).unwrap();

        assert_eq!(window.extremum_index, 1);
        assert_eq!(window.max_calls_oi, 40.0);
        assert_eq!(window.rows[0].calls_oi, "inf");
    }

    #[test]
    fn test_all_unparseable_is_no_valid_data() {
        let rows = rows_with_calls_oi(&["-", "--", "n/a"]);

        assert_eq!(find_max_calls_oi(&rows), None);
        assert!(matches!(select_window(&rows), Err(ScrapeError::NoValidCallsOi)));
    }

    #[tokio::test]
    async fn test_window_over_extracted_table() {
        let browser = FakeBrowser::with_table(table(&as_strs(&sample_rows())));
        let rows = extract_rows(&browser).await.unwrap();
        let window = select_window(&rows).unwrap();

        let strikes: Vec<&str> = window.rows.iter().map(|r| r.strike.as_str()).collect();
        assert_eq!(strikes, vec!["17300", "17350", "17400", "17450"]);
    }
}
