//! JSON persistence of the saved list.

use std::path::Path;

use wishcard_core::Product;

use crate::error::BoardError;

/// Loads the saved list. A missing file is an empty list.
///
/// # Errors
///
/// Returns [`BoardError::Io`] if the file exists but cannot be read, or
/// [`BoardError::Json`] if it is not a JSON array of products.
pub fn load_products(path: &Path) -> Result<Vec<Product>, BoardError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no saved list yet");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(BoardError::Io {
                path: path.display().to_string(),
                source,
            })
        }
    };

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let products: Vec<Product> =
        serde_json::from_str(&content).map_err(|source| BoardError::Json {
            context: path.display().to_string(),
            source,
        })?;
    tracing::debug!(path = %path.display(), count = products.len(), "loaded saved list");
    Ok(products)
}

/// Writes the saved list as pretty JSON, creating parent directories.
///
/// # Errors
///
/// Returns [`BoardError::Io`] on filesystem failure and [`BoardError::Json`]
/// if serialization fails.
pub fn save_products(path: &Path, products: &[Product]) -> Result<(), BoardError> {
    let io_err = |source: std::io::Error| BoardError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(products).map_err(|source| BoardError::Json {
        context: path.display().to_string(),
        source,
    })?;
    std::fs::write(path, json).map_err(io_err)?;

    tracing::debug!(path = %path.display(), count = products.len(), "saved list written");
    Ok(())
}
