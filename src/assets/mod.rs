//! Static asset serving.
//!
//! # Responsibilities
//! - Resolve a classified asset descriptor against the document root
//! - Read file bytes and respond with the mapped content type
//!
//! # Design Decisions
//! - A plain lookup: no caching layer, no negotiation, no ETags (images
//!   carry a short Cache-Control so polling browsers reuse them)
//! - Paths escaping the document root are refused before touching disk
//! - A missing or unreadable file ends the response with 404 and no body

use std::path::{Component, Path, PathBuf};

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::dispatch::AssetDescriptor;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Serves UI files from a fixed document root.
#[derive(Debug, Clone)]
pub struct AssetServer {
    doc_root: PathBuf,
}

impl AssetServer {
    pub fn new(doc_root: PathBuf) -> Self {
        Self { doc_root }
    }

    /// Serve one classified asset.
    pub async fn serve(&self, descriptor: &AssetDescriptor) -> Response {
        match self.read(&descriptor.rel_path).await {
            Ok(bytes) => {
                tracing::trace!(
                    path = %descriptor.rel_path,
                    content_type = descriptor.content_type,
                    bytes = bytes.len(),
                    "Asset served"
                );
                let mut response = (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, descriptor.content_type)],
                    bytes,
                )
                    .into_response();
                if descriptor.cacheable {
                    response.headers_mut().insert(
                        header::CACHE_CONTROL,
                        header::HeaderValue::from_static("max-age=60"),
                    );
                }
                response
            }
            Err(e) => {
                tracing::warn!(path = %descriptor.rel_path, error = %e, "Asset unavailable");
                StatusCode::NOT_FOUND.into_response()
            }
        }
    }

    async fn read(&self, rel_path: &str) -> Result<Vec<u8>, AssetError> {
        let path = self
            .resolve(rel_path)
            .ok_or_else(|| AssetError::NotFound(PathBuf::from(rel_path)))?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AssetError::NotFound(path)),
            Err(e) => Err(AssetError::Io { path, source: e }),
        }
    }

    /// Join against the doc root, refusing any path that steps out of it.
    fn resolve(&self, rel_path: &str) -> Option<PathBuf> {
        let rel = Path::new(rel_path);
        if rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return None;
        }
        Some(self.doc_root.join(rel))
    }
}
