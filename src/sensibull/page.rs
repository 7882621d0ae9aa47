use super::models::ChainSnapshot;
use crate::error::ScrapeError;

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;background:#fafafa;color:#222}\
    .charts{display:flex;flex-wrap:wrap;gap:1.5rem}\
    .charts img{background:#fff;border:1px solid #ddd}\
    .error{color:#b00020}";

/// Page showing both charts for a successful cycle
pub fn render_dashboard(snapshot: &ChainSnapshot) -> String {
    // Same file names every cycle, so bust the browser cache per capture
    let version = snapshot.captured_at.timestamp_millis();
    let captured = snapshot.captured_at.format("%d-%b-%Y %H:%M:%S");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Option Chain OI</title>
<style>{style}</style>
</head>
<body>
<h1>Option Chain OI</h1>
<p>Captured {captured} &middot; {total} strikes &middot; max calls OI {max_oi} at strike {strike}</p>
<div class="charts">
<img src="/static/{oi_chart}?v={version}" alt="Calls OI and Puts OI">
<img src="/static/{change_chart}?v={version}" alt="Calls OI Change and Puts OI Change">
</div>
</body>
</html>
"#,
        style = STYLE,
        captured = captured,
        total = snapshot.total_rows,
        max_oi = snapshot.max_calls_oi,
        strike = escape_html(&snapshot.max_calls_oi_strike),
        oi_chart = escape_html(&snapshot.oi_comparison_chart),
        change_chart = escape_html(&snapshot.oi_change_chart),
        version = version,
    )
}

/// Page shown when a cycle produced no charts
pub fn render_error(err: &ScrapeError) -> String {
    let heading = if err.is_no_data() {
        "No option chain data this cycle"
    } else {
        "Option chain refresh failed"
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Option Chain OI</title>
<style>{style}</style>
</head>
<body>
<h1>{heading}</h1>
<p class="error">{reason}</p>
</body>
</html>
"#,
        style = STYLE,
        heading = heading,
        reason = escape_html(&err.to_string()),
    )
}
