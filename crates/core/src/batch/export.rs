//! CSV export of batch results.

use chrono::Utc;

use super::types::BatchResult;

const HEADERS: [&str; 8] = [
    "Title/Query",
    "Status",
    "Suggestion",
    "Found Count",
    "Lowest Price",
    "Avg Price",
    "Search URL",
    "eBay URL",
];

/// Render a batch as CSV, headers first, one row per result.
pub fn to_csv(results: &[BatchResult]) -> String {
    let mut lines = vec![HEADERS.join(",")];

    for result in results {
        let row = [
            quote(&result.original),
            result.verdict.label().to_string(),
            quote(result.suggestion.as_deref().unwrap_or("")),
            result
                .stats
                .as_ref()
                .map(|s| s.count.to_string())
                .unwrap_or_else(|| "0".to_string()),
            result
                .stats
                .as_ref()
                .map(|s| s.min.to_string())
                .unwrap_or_default(),
            result
                .stats
                .as_ref()
                .map(|s| s.avg.to_string())
                .unwrap_or_default(),
            result.google_url.clone(),
            result.ebay_url.clone(),
        ];
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// Dated download filename for an export.
pub fn export_filename() -> String {
    format!("book_scout_batch_{}.csv", Utc::now().format("%Y-%m-%d"))
}

/// CSV quoting with embedded quotes doubled.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::MarketStats;
    use crate::resolver::Verdict;

    fn result(original: &str, suggestion: Option<&str>, stats: Option<MarketStats>) -> BatchResult {
        BatchResult {
            original: original.to_string(),
            verdict: if suggestion.is_some() {
                Verdict::Suggestion
            } else {
                Verdict::Verified
            },
            suggestion: suggestion.map(str::to_string),
            stats,
            read_online: None,
            ebay_url: "https://ebay.example/search".to_string(),
            abebooks_url: "https://abebooks.example/search".to_string(),
            google_url: "https://google.example/search".to_string(),
        }
    }

    #[test]
    fn test_header_row() {
        let csv = to_csv(&[]);
        assert_eq!(
            csv,
            "Title/Query,Status,Suggestion,Found Count,Lowest Price,Avg Price,Search URL,eBay URL"
        );
    }

    #[test]
    fn test_row_with_stats() {
        let csv = to_csv(&[result(
            "moby dick",
            None,
            Some(MarketStats {
                count: 4,
                min: 42.5,
                avg: 90.0,
            }),
        )]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "\"moby dick\",verified,\"\",4,42.5,90,https://google.example/search,https://ebay.example/search"
        );
    }

    #[test]
    fn test_row_without_stats_leaves_prices_blank() {
        let csv = to_csv(&[result("lost folio", None, None)]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains(",0,,,"));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let csv = to_csv(&[result("the \"whale\" book", Some("Moby \"Dick\""), None)]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("\"the \"\"whale\"\" book\""));
        assert!(row.contains("\"Moby \"\"Dick\"\"\""));
    }

    #[test]
    fn test_filename_is_dated() {
        let name = export_filename();
        assert!(name.starts_with("book_scout_batch_"));
        assert!(name.ends_with(".csv"));
    }
}
