//! `toolgraph classify` command - category per tool

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cli::ClassifyArgs;
use crate::commands::dispatch::helpers::load_catalog;
use crate::commands::dispatch::CommandContext;
use crate::output_by_format;
use toolgraph_core::classify::{classify, Category};
use toolgraph_core::error::Result;
use toolgraph_core::id::{assign_ids, RandomIdGenerator};

#[derive(Serialize)]
struct Classified {
    id: String,
    name: String,
    category: Category,
}

/// Execute the classify command
pub fn execute(ctx: &CommandContext, args: &ClassifyArgs) -> Result<()> {
    let records = load_catalog(ctx, &args.catalog)?;
    let tools = assign_ids(&records, &mut RandomIdGenerator);

    let classified: Vec<Classified> = tools
        .iter()
        .map(|tool| Classified {
            id: tool.id.clone(),
            name: tool.display_name(),
            category: classify(&tool.record),
        })
        .collect();

    let counts = category_counts(classified.iter().map(|c| c.category));

    output_by_format!(ctx.cli.format,
        json => {
            let output = serde_json::json!({
                "tools": classified,
                "counts": counts
                    .iter()
                    .map(|(category, count)| (category.as_str(), *count))
                    .collect::<BTreeMap<_, _>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        },
        human => {
            for item in &classified {
                println!("{}\t{}", item.id, item.category);
            }
            if !ctx.cli.quiet {
                println!();
                for (category, count) in &counts {
                    println!("{:>4}  {}", count, category);
                }
            }
        }
    );

    Ok(())
}

/// Count per category, in category order, omitting empty categories
fn category_counts(categories: impl Iterator<Item = Category>) -> BTreeMap<Category, usize> {
    let mut counts = BTreeMap::new();
    for category in categories {
        *counts.entry(category).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_counts() {
        let counts = category_counts(
            [
                Category::Other,
                Category::FinanceInvestment,
                Category::Other,
            ]
            .into_iter(),
        );
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&Category::Other], 2);
        assert_eq!(
            counts.keys().next(),
            Some(&Category::FinanceInvestment)
        );
    }
}
