//! `toolgraph compare` command - similarity breakdown for two tools

use crate::cli::CompareArgs;
use crate::commands::dispatch::helpers::{load_catalog, resolve_options};
use crate::commands::dispatch::CommandContext;
use crate::output_by_format;
use toolgraph_core::bail_usage;
use toolgraph_core::error::{Result, ToolgraphError};
use toolgraph_core::graph::meets_threshold;
use toolgraph_core::id::{assign_ids, RandomIdGenerator};
use toolgraph_core::matrix::to_distance;
use toolgraph_core::record::Tool;
use toolgraph_core::similarity::{similarity_breakdown, FeatureComparison};

fn find_tool<'a>(tools: &'a [Tool], id: &str) -> Result<&'a Tool> {
    tools
        .iter()
        .find(|tool| tool.id == id)
        .ok_or_else(|| ToolgraphError::not_found("tool", id))
}

/// Execute the compare command
pub fn execute(ctx: &CommandContext, args: &CompareArgs) -> Result<()> {
    if args.first == args.second {
        bail_usage!("compare needs two different tool ids");
    }

    let options = resolve_options(ctx, &args.engine)?;
    let records = load_catalog(ctx, &args.catalog)?;
    let tools = assign_ids(&records, &mut RandomIdGenerator);

    let first = find_tool(&tools, &args.first)?;
    let second = find_tool(&tools, &args.second)?;

    let breakdown = similarity_breakdown(&first.record, &second.record, &options.weights);
    let distance = to_distance(breakdown.score);
    let connected = meets_threshold(distance, options.threshold);

    output_by_format!(ctx.cli.format,
        json => {
            let output = serde_json::json!({
                "first": first.id,
                "second": second.id,
                "features": breakdown.features,
                "similarity": breakdown.score,
                "distance": distance,
                "threshold": options.threshold,
                "connected": connected,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        },
        human => {
            println!("{} vs {}", first.display_name(), second.display_name());
            for score in &breakdown.features {
                match score.comparison {
                    FeatureComparison::Skipped => {
                        println!("  {:<20} skipped", score.feature.to_string());
                    }
                    FeatureComparison::Compared { jaccard } => {
                        println!(
                            "  {:<20} {:.3} (weight {})",
                            score.feature.to_string(),
                            jaccard,
                            score.weight
                        );
                    }
                }
            }
            println!("similarity {:.3}", breakdown.score);
            if !ctx.cli.quiet {
                let verdict = if connected { "connected" } else { "not connected" };
                println!("{} at threshold {}", verdict, options.threshold);
            }
        }
    );

    Ok(())
}
