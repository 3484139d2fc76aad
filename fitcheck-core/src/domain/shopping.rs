//! Shopping recommendation domain types

use serde::{Deserialize, Serialize};

/// Seller shown when the search result names none
pub const UNKNOWN_RETAILER: &str = "Unknown retailer";

/// A purchasable item returned by the shopping search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub title: String,
    pub price: String,
    pub seller: String,
    pub link: String,
    pub image_url: String,
}

/// Normalizes a listed price to pounds sterling
///
/// Prices already carrying `£` are kept as-is; dollar signs are dropped and a
/// pound sign prefixed otherwise.
pub fn format_gbp_price(price: &str) -> String {
    if price.contains('£') {
        price.to_string()
    } else {
        format!("£{}", price.replace('$', ""))
    }
}

/// Steers a free-text query towards menswear
///
/// Queries that already mention "men" (any case) are left untouched.
pub fn menswear_query(query: &str) -> String {
    if query.to_lowercase().contains("men") {
        query.to_string()
    } else {
        format!("men's {}", query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_gbp_price() {
        assert_eq!(format_gbp_price("£45.00"), "£45.00");
        assert_eq!(format_gbp_price("$30.99"), "£30.99");
        assert_eq!(format_gbp_price("12"), "£12");
    }

    #[test]
    fn test_menswear_query() {
        assert_eq!(menswear_query("leather jacket"), "men's leather jacket");
        assert_eq!(menswear_query("Men's chinos"), "Men's chinos");
        // "women" contains "men" and is left alone too
        assert_eq!(menswear_query("women's boots"), "women's boots");
    }
}
