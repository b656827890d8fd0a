//! JSON document persistence.
//!
//! The document is a single object keyed by product id:
//!
//! ```json
//! {"A1": {"id": "A1", "name": "iPhone 18", "price": 999.99, "quantity": 5}}
//! ```
//!
//! Decoding is strict and all-or-nothing: every record must carry exactly the
//! four product fields, pass product validation, and sit under its own id.
//! Writing goes through a temp file in the destination directory followed by a
//! rename, so a failed write never clobbers the previous document.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tempfile::NamedTempFile;
use thiserror::Error;

use stockroom_core::{DomainError, Entity, ProductId};

use crate::product::Product;

/// In-memory shape of the document.
pub type Items = BTreeMap<ProductId, Product>;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read inventory file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write inventory file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed inventory document: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("invalid product record `{id}`: {source}")]
    InvalidRecord {
        id: String,
        #[source]
        source: DomainError,
    },

    #[error("record key `{key}` does not match product id `{id}`")]
    KeyMismatch { key: String, id: String },

    #[error("failed to encode inventory document: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Wire shape of one record; names map 1:1 onto the product constructor.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProductRecord {
    id: String,
    name: String,
    price: f64,
    quantity: i64,
}

/// Parse and validate a whole document.
pub fn decode_document(text: &str) -> Result<Items, PersistenceError> {
    let raw: BTreeMap<String, ProductRecord> =
        serde_json::from_str(text).map_err(PersistenceError::Malformed)?;

    raw.into_iter()
        .map(|(key, record)| {
            if key != record.id {
                return Err(PersistenceError::KeyMismatch { key, id: record.id });
            }
            let product = Product::new(record.id, record.name, record.price, record.quantity)
                .map_err(|source| PersistenceError::InvalidRecord { id: key, source })?;
            Ok((product.id().clone(), product))
        })
        .collect()
}

pub fn encode_document(items: &Items) -> Result<String, PersistenceError> {
    serde_json::to_string_pretty(items).map_err(PersistenceError::Encode)
}

/// Read and decode the document at `path`.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_document(path: &Path) -> Result<Option<Items>, PersistenceError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PersistenceError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    decode_document(&text).map(Some)
}

/// Encode `items` and atomically replace the file at `path`.
pub fn write_document(path: &Path, items: &Items) -> Result<(), PersistenceError> {
    let text = encode_document(items)?;
    let write_err = |source: io::Error| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(text.as_bytes()).map_err(write_err)?;
    tmp.write_all(b"\n").map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
