//! `toolgraph cluster` command - similarity dendrogram for a catalog

use tracing::debug;

use crate::cli::ClusterArgs;
use crate::commands::dispatch::helpers::{load_catalog, resolve_weight_options};
use crate::commands::dispatch::CommandContext;
use crate::output_by_format;
use toolgraph_core::cluster::ClusterNode;
use toolgraph_core::error::Result;
use toolgraph_core::pipeline::cluster_catalog;

/// Execute the cluster command
pub fn execute(ctx: &CommandContext, args: &ClusterArgs) -> Result<()> {
    let options = resolve_weight_options(ctx, &args.weights)?;
    let records = load_catalog(ctx, &args.catalog)?;

    let root = cluster_catalog(&records, &options.weights);

    debug!(
        leaves = root.as_ref().map_or(0, ClusterNode::leaf_count),
        elapsed = ?ctx.start.elapsed(),
        "cluster"
    );

    output_by_format!(ctx.cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&root)?);
        },
        human => {
            match &root {
                Some(root) => {
                    let mut lines = Vec::new();
                    render_tree(root, 0, &mut lines);
                    for line in lines {
                        println!("{}", line);
                    }
                }
                None => {
                    if !ctx.cli.quiet {
                        println!("Catalog is empty");
                    }
                }
            }
        }
    );

    Ok(())
}

/// Indented outline of a dendrogram, one node per line
fn render_tree(node: &ClusterNode, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match node {
        ClusterNode::Leaf { label, .. } => lines.push(format!("{}{}", indent, label)),
        ClusterNode::Internal {
            name,
            height,
            size,
            children,
        } => {
            lines.push(format!(
                "{}{} (height {:.3}, {} tools)",
                indent, name, height, size
            ));
            for child in children.iter() {
                render_tree(child, depth + 1, lines);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolgraph_core::cluster::cluster;
    use toolgraph_core::matrix::DistanceMatrix;

    #[test]
    fn test_render_tree() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, 0.2, 0.5],
            vec![0.2, 0.0, 0.6],
            vec![0.5, 0.6, 0.0],
        ])
        .unwrap();
        let root = cluster(&matrix, &["a", "b", "c"]).unwrap().unwrap();

        let mut lines = Vec::new();
        render_tree(&root, 0, &mut lines);
        assert_eq!(
            lines,
            vec![
                "Cluster 1 (height 0.500, 3 tools)",
                "  c",
                "  Cluster 2 (height 0.200, 2 tools)",
                "    a",
                "    b",
            ]
        );
    }
}
