//! Product catalog
//!
//! Static per-locale product data. Lookups fall back to [`DEFAULT_LOCALE`]
//! when the request locale has no entry.

use serde::{Deserialize, Serialize};

/// Locale whose entries back every product
pub const DEFAULT_LOCALE: &str = "en-US";

/// Product offered by the cart and buy flows
pub const FEATURED_PRODUCT: &str = "yoga-mat";

/// A product as offered to one user: display title plus catalog identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferedItem {
    pub title: String,
    pub asin: String,
}

/// Per-locale listing of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listing {
    pub locale: &'static str,
    pub title: &'static str,
    pub asin: &'static str,
}

/// A product key with its locale listings
#[derive(Debug, Clone, Copy)]
pub struct Product {
    pub key: &'static str,
    pub listings: &'static [Listing],
}

static PRODUCTS: &[Product] = &[
    Product {
        key: "yoga-blocks",
        listings: &[
            Listing { locale: "en-US", title: "Yoga Blocks", asin: "B01FN7X7KE" },
            Listing { locale: "en-GB", title: "Yoga Blocks", asin: "B08FRKDTXV" },
        ],
    },
    Product {
        key: "yoga-mat",
        listings: &[
            Listing { locale: "en-US", title: "Yoga Mat", asin: "B01LP0U5X0" },
            Listing { locale: "en-GB", title: "Yoga Mat", asin: "B0749TDKJN" },
        ],
    },
];

impl Product {
    /// Listing for `locale`, or the default-locale listing
    pub fn listing_for(&self, locale: Option<&str>) -> Option<&'static Listing> {
        locale
            .and_then(|l| self.listings.iter().find(|listing| listing.locale == l))
            .or_else(|| self.listings.iter().find(|listing| listing.locale == DEFAULT_LOCALE))
    }
}

impl From<&Listing> for OfferedItem {
    fn from(listing: &Listing) -> Self {
        Self {
            title: listing.title.to_string(),
            asin: listing.asin.to_string(),
        }
    }
}

/// Look up a product by key
pub fn product(key: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.key == key)
}

/// Resolve the item to offer for a product key in a locale
pub fn offer_for(key: &str, locale: Option<&str>) -> Option<OfferedItem> {
    product(key)
        .and_then(|p| p.listing_for(locale))
        .map(OfferedItem::from)
}

/// All catalog products
pub fn products() -> &'static [Product] {
    PRODUCTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_specific_asin() {
        let item = offer_for(FEATURED_PRODUCT, Some("en-GB")).unwrap();
        assert_eq!(item.asin, "B0749TDKJN");
        assert_eq!(item.title, "Yoga Mat");
    }

    #[test]
    fn test_unsupported_locale_falls_back() {
        let item = offer_for(FEATURED_PRODUCT, Some("ja-JP")).unwrap();
        assert_eq!(item.asin, "B01LP0U5X0");

        let item = offer_for(FEATURED_PRODUCT, None).unwrap();
        assert_eq!(item.asin, "B01LP0U5X0");
    }

    #[test]
    fn test_every_product_has_default_listing() {
        for product in products() {
            assert!(
                product.listing_for(None).is_some(),
                "{} lacks a {} listing",
                product.key,
                DEFAULT_LOCALE
            );
        }
    }

    #[test]
    fn test_unknown_product() {
        assert!(offer_for("yoga-wheel", Some("en-US")).is_none());
    }
}
