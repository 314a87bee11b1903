use anyhow::Result;
use clap::Args;

use relay_core::build_tracking_link;
use relay_core::history::Tool;
use relay_core::tracking::{ExtraParam, TrackingInput, UtmParams};

use crate::{config, store};

#[derive(Args)]
pub struct TrackingArgs {
    /// Destination URL (absolute)
    pub destination: String,

    /// utm_source value
    #[arg(long)]
    pub source: Option<String>,

    /// utm_medium value
    #[arg(long)]
    pub medium: Option<String>,

    /// utm_campaign value
    #[arg(long)]
    pub campaign: Option<String>,

    /// utm_content value
    #[arg(long)]
    pub content: Option<String>,

    /// utm_term value
    #[arg(long)]
    pub term: Option<String>,

    /// Additional query parameter (repeatable, order preserved)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Wrap the link in an HTML anchor with this text
    #[arg(long)]
    pub link_text: Option<String>,
}

fn parse_key_value(raw: &str) -> Result<ExtraParam> {
    match raw.split_once('=') {
        Some((key, value)) => Ok(ExtraParam {
            key: key.to_string(),
            value: value.to_string(),
        }),
        None => anyhow::bail!("Expected KEY=VALUE, got '{}'", raw),
    }
}

pub fn run(args: TrackingArgs) -> Result<()> {
    let cfg = config::load_config()?;

    let extra = args
        .params
        .iter()
        .map(|raw| parse_key_value(raw))
        .collect::<Result<Vec<_>>>()?;

    let input = TrackingInput {
        destination: args.destination.clone(),
        utm: UtmParams {
            source: args
                .source
                .or(cfg.default_utm_source)
                .unwrap_or_default(),
            medium: args.medium.unwrap_or_default(),
            campaign: args.campaign.unwrap_or_default(),
            content: args.content.unwrap_or_default(),
            term: args.term.unwrap_or_default(),
        },
        extra,
        link_text: args.link_text.unwrap_or_default(),
    };

    let link = build_tracking_link(&input)?;

    println!("{}", link.url);
    if !link.html.is_empty() {
        println!("{}", link.html);
    }

    store::record(Tool::Tracking, &input.destination, serde_json::to_value(&input)?)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        let param = parse_key_value("ref=homepage").unwrap();
        assert_eq!(param.key, "ref");
        assert_eq!(param.value, "homepage");
    }

    #[test]
    fn test_parse_key_value_keeps_extra_equals() {
        let param = parse_key_value("q=a=b").unwrap();
        assert_eq!(param.key, "q");
        assert_eq!(param.value, "a=b");
    }

    #[test]
    fn test_parse_key_value_rejects_bare_key() {
        assert!(parse_key_value("nokey").is_err());
    }
}
