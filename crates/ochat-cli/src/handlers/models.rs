//! `models list` and `models delete` handlers.

use anyhow::{Context, Result};
use ochat_core::{FavouritesStore, ModelInfo};

use crate::bootstrap::CliContext;
use crate::presentation::{format_modified, format_size, print_separator, truncate_string};

/// List installed models, favourites first.
pub async fn list(ctx: &CliContext) -> Result<()> {
    let list = ctx
        .client()
        .list_models()
        .await
        .context("Failed to list models")?;

    if list.models.is_empty() {
        println!("No models installed.");
        println!("Use 'ochat models pull <name>' to download one.");
        return Ok(());
    }

    let models = favourites_first(list.models, ctx.favourites());

    println!("Found {} model(s):\n", models.len());
    println!(
        "{:<2} {:<32} {:<10} {:<10} {:<8} {:<8} {:<17} ID",
        "", "Name", "Size", "Family", "Params", "Quant", "Modified"
    );
    print_separator(102);

    for (model, favourite) in &models {
        println!(
            "{:<2} {:<32} {:<10} {:<10} {:<8} {:<8} {:<17} {}",
            if *favourite { "*" } else { "" },
            truncate_string(&model.name, 31),
            format_size(model.size_bytes),
            truncate_string(or_dash(&model.details.family), 9),
            or_dash(&model.details.parameter_size),
            or_dash(&model.details.quantization_level),
            format_modified(&model.modified_at),
            model.short_digest(),
        );
    }
    Ok(())
}

/// Delete a model and drop it from the favourites.
pub async fn delete(ctx: &CliContext, name: &str) -> Result<()> {
    ctx.client()
        .delete_model(name)
        .await
        .with_context(|| format!("Failed to delete '{name}'"))?;

    let favourites = ctx.favourites();
    if favourites.contains(name) {
        favourites
            .toggle(name)
            .context("Deleted the model but failed to update favourites")?;
    }

    println!("Deleted '{name}'.");
    Ok(())
}

/// Stable partition: favourites keep their server order ahead of the rest.
fn favourites_first(models: Vec<ModelInfo>, store: &FavouritesStore) -> Vec<(ModelInfo, bool)> {
    let favourites = store.list();
    let (mut first, rest): (Vec<_>, Vec<_>) = models
        .into_iter()
        .map(|m| {
            let favourite = favourites.contains(&m.name);
            (m, favourite)
        })
        .partition(|(_, favourite)| *favourite);
    first.extend(rest);
    first
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "--" } else { value }
}
