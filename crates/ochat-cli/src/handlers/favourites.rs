//! `favourites` handlers. These work offline against the favourites file.

use anyhow::{Context, Result};
use ochat_core::FavouritesStore;

pub fn list(store: &FavouritesStore) -> Result<()> {
    let favourites = store.list();
    if favourites.is_empty() {
        println!("No favourite models yet.");
        println!("Use 'ochat favourites toggle <name>' to add one.");
        return Ok(());
    }

    for name in favourites {
        println!("* {name}");
    }
    Ok(())
}

/// Flip `name` in the favourites. Returns whether it is now a favourite.
pub fn toggle(store: &FavouritesStore, name: &str) -> Result<bool> {
    let updated = store
        .toggle(name)
        .with_context(|| format!("Failed to update favourites at {}", store.path().display()))?;

    let added = updated.iter().any(|n| n == name);
    if added {
        println!("Added '{name}' to favourites.");
    } else {
        println!("Removed '{name}' from favourites.");
    }
    Ok(added)
}
