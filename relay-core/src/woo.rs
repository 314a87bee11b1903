//! WooCommerce add-to-cart links.

use serde::{Deserialize, Serialize};
use url::{Url, form_urlencoded};

use crate::error::{RelayError, RelayResult};

/// One product row: the product to add and how many.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WooProduct {
    pub product_id: String,
    pub quantity: u32,
}

/// Input for the WooCommerce link builder.
///
/// Unlike [`TrackingInput`](crate::tracking::TrackingInput), UTM keys are
/// passed fully qualified (`utm_source`, ...) and used as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WooInput {
    /// Absolute store URL; must parse
    pub base_url: String,
    /// Ordered, non-empty by caller contract
    pub products: Vec<WooProduct>,
    #[serde(default)]
    pub coupon: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub utm: Vec<(String, String)>,
}

/// The add-to-cart link plus variants for coupon and destination, present
/// only when the corresponding input was supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WooLinks {
    pub cart_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_link: Option<String>,
}

/// Build the add-to-cart link and its coupon / destination variants.
///
/// Every variant shares the product and UTM params; only the dedicated
/// variant carries its toggle param, and the plain cart link carries
/// neither.
pub fn build_woo_links(input: &WooInput) -> RelayResult<WooLinks> {
    let base = Url::parse(&input.base_url).map_err(|source| RelayError::InvalidUrl {
        field: "base_url",
        source,
    })?;

    let coupon = input.coupon.as_deref().filter(|value| !value.is_empty());
    let destination = input
        .destination
        .as_deref()
        .filter(|value| !value.is_empty());

    Ok(WooLinks {
        cart_link: build_variant(&base, input, None, None),
        coupon_link: coupon.map(|value| build_variant(&base, input, Some(value), None)),
        destination_link: destination.map(|value| build_variant(&base, input, None, Some(value))),
    })
}

/// One link variant: product pairs in row order, then the variant's toggle
/// param, then the UTM entries. The constructed query replaces anything
/// already on the base URL.
fn build_variant(
    base: &Url,
    input: &WooInput,
    coupon: Option<&str>,
    destination: Option<&str>,
) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();

    for product in &input.products {
        pairs.push(("add-to-cart", product.product_id.clone()));
        pairs.push(("quantity", product.quantity.to_string()));
    }
    if let Some(coupon) = coupon {
        pairs.push(("coupon", coupon.to_string()));
    }
    if let Some(destination) = destination {
        pairs.push(("destination", destination.to_string()));
    }
    for (key, value) in &input.utm {
        if !key.is_empty() && !value.is_empty() {
            pairs.push((key.as_str(), value.clone()));
        }
    }

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(&pairs)
        .finish();

    let mut url = base.clone();
    url.set_query(if query.is_empty() { None } else { Some(&query) });
    url.to_string()
}
