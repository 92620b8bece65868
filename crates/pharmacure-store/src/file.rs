use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use pharmacure_types::Cart;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::CartStore;

/// Cart store backed by one JSON file.
///
/// On-disk format is a pretty-printed (2-space) JSON array of
/// `{product, price, quantity}` objects with no schema version. Saves go
/// through a temporary file in the same directory which is fsynced and then
/// renamed over the target, so a reader sees either the old or the new file.
#[derive(Clone, Debug)]
pub struct JsonFileCartStore {
    path: PathBuf,
}

impl JsonFileCartStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that holds the backing file and its temporary siblings.
    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn read_bytes(&self) -> Option<Vec<u8>> {
        match fs::read(&self.path) {
            Ok(data) => Some(data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no cart file yet; starting empty");
                None
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cart file unreadable; treating cart as empty");
                None
            }
        }
    }
}

impl CartStore for JsonFileCartStore {
    fn load(&self) -> Cart {
        let Some(data) = self.read_bytes() else {
            return Cart::new();
        };
        if data.iter().all(u8::is_ascii_whitespace) {
            return Cart::new();
        }
        match serde_json::from_slice::<Cart>(&data) {
            Ok(mut cart) => {
                let repaired = cart.normalize();
                if repaired > 0 {
                    warn!(path = %self.path.display(), repaired, "cart file had duplicate or invalid lines; repaired");
                }
                debug!(path = %self.path.display(), lines = cart.len(), "cart loaded");
                cart
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cart file corrupt; treating cart as empty");
                Cart::new()
            }
        }
    }

    fn save(&self, cart: &Cart) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(cart)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let dir = self.dir();
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        tmp.write_all(&json)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        debug!(path = %self.path.display(), lines = cart.len(), bytes = json.len(), "cart saved");
        Ok(())
    }
}
