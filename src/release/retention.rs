//! Retention pruning: keep the newest N archives, delete the rest

use crate::core::error::{PackResult, ResultExt};
use crate::release::inventory::{ReleaseArchive, ReleaseInventory};
use std::fs;

/// Archives falling outside the newest `retain`
pub fn select_for_pruning(inventory: &ReleaseInventory, retain: usize) -> &[ReleaseArchive] {
  inventory.archives().get(retain..).unwrap_or(&[])
}

/// Delete archives beyond the newest `retain`, returning what was deleted
///
/// Only archives in the inventory are candidates, so files that do not follow
/// the naming convention are never touched.
pub fn prune(inventory: &ReleaseInventory, retain: usize) -> PackResult<Vec<ReleaseArchive>> {
  let doomed = select_for_pruning(inventory, retain);

  for archive in doomed {
    let path = inventory.dir().join(&archive.file_name);
    fs::remove_file(&path).with_context(|| format!("Failed to delete old archive {}", path.display()))?;
    tracing::info!(file = %archive.file_name, "pruned old release");
  }

  Ok(doomed.to_vec())
}
