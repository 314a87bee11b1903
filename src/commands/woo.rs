use anyhow::{Context, Result};
use clap::Args;

use relay_core::build_woo_links;
use relay_core::history::Tool;
use relay_core::woo::{WooInput, WooProduct};

use crate::store;

#[derive(Args)]
pub struct WooArgs {
    /// Store base URL (e.g., https://shop.example.com)
    pub base_url: String,

    /// Product to add (repeatable, order preserved; quantity defaults to 1)
    #[arg(long = "product", value_name = "ID[:QTY]", required = true)]
    pub products: Vec<String>,

    /// Coupon code; adds a coupon link variant
    #[arg(long)]
    pub coupon: Option<String>,

    /// Post-add destination path; adds a destination link variant
    #[arg(long)]
    pub destination: Option<String>,

    /// utm_source value
    #[arg(long)]
    pub utm_source: Option<String>,

    /// utm_medium value
    #[arg(long)]
    pub utm_medium: Option<String>,

    /// utm_campaign value
    #[arg(long)]
    pub utm_campaign: Option<String>,
}

fn parse_product(raw: &str) -> Result<WooProduct> {
    match raw.split_once(':') {
        Some((id, qty)) => {
            let quantity: u32 = qty
                .parse()
                .with_context(|| format!("Invalid quantity in '{}'", raw))?;
            Ok(WooProduct {
                product_id: id.to_string(),
                quantity,
            })
        }
        None => Ok(WooProduct {
            product_id: raw.to_string(),
            quantity: 1,
        }),
    }
}

pub fn run(args: WooArgs) -> Result<()> {
    let products = args
        .products
        .iter()
        .map(|raw| parse_product(raw))
        .collect::<Result<Vec<_>>>()?;

    // The Woo builder takes fully qualified UTM keys
    let mut utm = Vec::new();
    if let Some(source) = &args.utm_source {
        utm.push(("utm_source".to_string(), source.clone()));
    }
    if let Some(medium) = &args.utm_medium {
        utm.push(("utm_medium".to_string(), medium.clone()));
    }
    if let Some(campaign) = &args.utm_campaign {
        utm.push(("utm_campaign".to_string(), campaign.clone()));
    }

    let input = WooInput {
        base_url: args.base_url.clone(),
        products,
        coupon: args.coupon.clone(),
        destination: args.destination.clone(),
        utm,
    };

    let links = build_woo_links(&input)?;

    println!("Cart:        {}", links.cart_link);
    if let Some(coupon_link) = &links.coupon_link {
        println!("Coupon:      {}", coupon_link);
    }
    if let Some(destination_link) = &links.destination_link {
        println!("Destination: {}", destination_link);
    }

    store::record(Tool::Woo, &input.base_url, serde_json::to_value(&input)?)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_with_quantity() {
        let product = parse_product("42:3").unwrap();
        assert_eq!(product.product_id, "42");
        assert_eq!(product.quantity, 3);
    }

    #[test]
    fn test_parse_product_default_quantity() {
        let product = parse_product("42").unwrap();
        assert_eq!(product.product_id, "42");
        assert_eq!(product.quantity, 1);
    }

    #[test]
    fn test_parse_product_rejects_bad_quantity() {
        assert!(parse_product("42:lots").is_err());
    }
}
