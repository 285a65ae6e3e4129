use crate::errors::StoreError;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    env,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::error;

pub fn resolve_goals_path() -> PathBuf {
    resolve_path("GOALS_DATA_PATH", "data/goals-storage.json")
}

pub fn resolve_products_path() -> PathBuf {
    resolve_path("PRODUCTS_DATA_PATH", "data/products-storage.json")
}

fn resolve_path(var: &str, default: &str) -> PathBuf {
    match env::var(var) {
        Ok(path) => PathBuf::from(path),
        Err(_) => PathBuf::from(default),
    }
}

/// Read a collection from its slot. A missing slot is a fresh install; an
/// unreadable one is logged and treated the same.
pub async fn load_slot<T: DeserializeOwned + Default>(path: &Path) -> T {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(err) => {
                error!("failed to parse storage slot {}: {err}", path.display());
                T::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => T::default(),
        Err(err) => {
            error!("failed to read storage slot {}: {err}", path.display());
            T::default()
        }
    }
}

/// Write the whole collection back to its slot, creating the parent
/// directory on first use.
pub async fn persist_slot<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(value)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, payload).await?;
    Ok(())
}
