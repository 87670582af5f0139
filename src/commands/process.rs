//! `toolgraph process` command - categories and connections for a catalog

use tracing::{debug, warn};

use crate::cache::{CacheKey, ResultCache};
use crate::cli::ProcessArgs;
use crate::commands::dispatch::helpers::{load_catalog, resolve_options};
use crate::commands::dispatch::CommandContext;
use crate::output_by_format;
use toolgraph_core::error::Result;
use toolgraph_core::id::RandomIdGenerator;
use toolgraph_core::pipeline::{process_with, OutputEntity};

/// Execute the process command
pub fn execute(ctx: &CommandContext, args: &ProcessArgs) -> Result<()> {
    let options = resolve_options(ctx, &args.engine)?;
    let records = load_catalog(ctx, &args.catalog)?;

    let cache = if args.no_cache {
        None
    } else {
        match &args.cache_dir {
            Some(dir) => Some(ResultCache::new(dir)),
            None => ResultCache::default_location()
                .map_err(|e| warn!(error = %e, "result cache disabled"))
                .ok(),
        }
    };
    let key = CacheKey::compute(&records, &options)?;

    let cached = cache.as_ref().and_then(|cache| cache.get(&key));
    let from_cache = cached.is_some();

    let entities = match cached {
        Some(entry) => entry.entities,
        None => {
            let entities = process_with(&records, &options, &mut RandomIdGenerator);
            if let Some(cache) = &cache {
                if let Err(e) = cache.put(&key, &entities) {
                    warn!(error = %e, "failed to store result in cache");
                }
            }
            entities
        }
    };

    debug!(
        entities = entities.len(),
        from_cache,
        elapsed = ?ctx.start.elapsed(),
        "process"
    );

    output_by_format!(ctx.cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&entities)?);
        },
        human => {
            print_human(ctx, &entities);
        }
    );

    Ok(())
}

fn print_human(ctx: &CommandContext, entities: &[OutputEntity]) {
    for entity in entities {
        println!("{} [{}] {}", entity.id, entity.category, entity.name);
        for connection in &entity.connections {
            println!("  -> {}", connection);
        }
    }

    if !ctx.cli.quiet {
        let edges: usize = entities.iter().map(|e| e.connections.len()).sum::<usize>() / 2;
        println!();
        println!("{} tools, {} connections", entities.len(), edges);
    }
}
