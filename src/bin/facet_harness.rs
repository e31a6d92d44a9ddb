//! Facet extraction harness
//!
//! Small CLI for exercising the pipeline against a live backend, or for
//! validating a direct facet configuration without any model call.
//!
//! ```text
//! facet_harness "iPhone 13 with 256GB in blue under $800" --metadata
//! facet_harness --validate '{"brand": "Apple", "colour": "blue"}'
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use smart_match::{validate_direct, Facets, FacetExtractor};

#[derive(Parser)]
#[command(name = "facet_harness", about = "Parse product search queries into facets")]
struct Args {
    /// Natural language query to parse
    query: Option<String>,

    /// Include facet count and detected categories in the output
    #[arg(long)]
    metadata: bool,

    /// Validate a JSON facets object against the schema instead of parsing
    #[arg(long, value_name = "JSON")]
    validate: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if let Some(json) = args.validate {
        let facets: Facets =
            serde_json::from_str(&json).context("--validate expects a JSON object of facets")?;
        let outcome = validate_direct(&facets);
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    let Some(query) = args.query else {
        bail!("provide a query to parse, or --validate with a JSON facets object");
    };

    let extractor = FacetExtractor::from_env()?;
    if args.metadata {
        let parsed = extractor.extract_facets_with_metadata(&query).await?;
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        let facets = extractor.extract_facets(&query).await?;
        println!("{}", serde_json::to_string_pretty(&facets)?);
    }
    Ok(())
}
