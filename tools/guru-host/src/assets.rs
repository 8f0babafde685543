use std::path::Path;

use anyhow::{Context, Result};
use guru::{AssetStore, ByteOrder};
use tracing::info;

/// Read and validate both asset tables. Either file missing is fatal.
pub fn load(sprite_data: &Path, tile_data: &Path, order: ByteOrder) -> Result<AssetStore> {
    let motion = std::fs::read(sprite_data)
        .with_context(|| format!("failed to read sprite motion table {}", sprite_data.display()))?;
    let tiles = std::fs::read(tile_data)
        .with_context(|| format!("failed to read tile table {}", tile_data.display()))?;

    let assets = AssetStore::from_bytes(&motion, &tiles, order).with_context(|| {
        format!(
            "invalid assets {} / {}",
            sprite_data.display(),
            tile_data.display()
        )
    })?;

    info!(
        "loaded {} motion pairs and {} tile strips",
        assets.motion().len(),
        assets.tile_strips()
    );
    Ok(assets)
}
