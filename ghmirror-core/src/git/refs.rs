//! Read-only inspection of bare clones

use std::collections::BTreeMap;
use std::path::Path;

use git2::Repository;

use crate::{Error, Result};

/// Map every direct ref of the repository at `path` to its target object id
///
/// Symbolic refs (such as `HEAD`) are skipped.
pub fn list_refs(path: &Path) -> Result<BTreeMap<String, String>> {
    let repo = Repository::open(path).map_err(|e| {
        if e.code() == git2::ErrorCode::NotFound {
            Error::Other(format!("Not a git repository: {}", path.display()))
        } else {
            Error::Other(format!("Git error: {}", e))
        }
    })?;

    let references = repo
        .references()
        .map_err(|e| Error::Other(format!("Failed to list refs: {}", e)))?;

    let mut refs = BTreeMap::new();
    for reference in references {
        let reference = reference.map_err(|e| Error::Other(format!("Failed to read ref: {}", e)))?;
        if let (Some(name), Some(target)) = (reference.name(), reference.target()) {
            refs.insert(name.to_string(), target.to_string());
        }
    }

    Ok(refs)
}
