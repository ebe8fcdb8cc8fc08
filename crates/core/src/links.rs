//! Outbound search URL builders for the supported marketplaces.
//!
//! These mirror the exact URL shapes users expect to land on; the eBay
//! category 29223 is "Antiquarian & Collectible" books.

/// eBay keyword search, scoped to the collectible books category.
pub fn ebay_search_url(term: &str) -> String {
    format!(
        "https://www.ebay.com/sch/i.html?_nkw={}&_category=29223",
        urlencoding::encode(term)
    )
}

/// AbeBooks full-text title search.
pub fn abebooks_search_url(term: &str) -> String {
    format!(
        "https://www.abebooks.com/servlet/SearchResults?sts=t&tn={}",
        urlencoding::encode(term)
    )
}

/// Plain web search fallback.
pub fn google_search_url(term: &str) -> String {
    format!(
        "https://www.google.com/search?q={}",
        urlencoding::encode(term)
    )
}

/// Source-appropriate search URL for a title/author pair.
///
/// Used as the listing link for synthetic results, where no real listing
/// page exists to point at.
pub fn market_search_url(source: &str, title: &str, author: &str) -> String {
    let combined = format!("{} {}", title, author);
    if source.contains("eBay") {
        ebay_search_url(&combined)
    } else if source.contains("AbeBooks") {
        format!(
            "https://www.abebooks.com/servlet/SearchResults?sts=t&tn={}&an={}",
            urlencoding::encode(title),
            urlencoding::encode(author)
        )
    } else if source.contains("Biblio") {
        format!(
            "https://www.biblio.com/search.php?stage=1&title={}&author={}",
            urlencoding::encode(title),
            urlencoding::encode(author)
        )
    } else {
        google_search_url(&combined)
    }
}

/// "Read online" link: the catalog's preview page when one exists, else a
/// full-text archive search keyed on title and author.
pub fn read_online_url(title: &str, author: &str, preview_link: Option<&str>) -> String {
    if let Some(preview) = preview_link {
        if !preview.is_empty() {
            return preview.to_string();
        }
    }
    format!(
        "https://archive.org/search.php?query=title:({}) AND creator:({})&mediatype=texts",
        urlencoding::encode(title),
        urlencoding::encode(author)
    )
}
