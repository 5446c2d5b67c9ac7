//! Reading and writing descriptor payloads.

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use dspace_model::{Document, DocumentExports, ExportsPayload, LayerId};
use tracing::{info, warn};

/// A hydrated payload: the document's layer set and its export state.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: Document,
    pub exports: DocumentExports,
}

impl LoadedDocument {
    pub fn from_payload(payload: &ExportsPayload) -> Self {
        Self {
            document: Document::from_payload(payload),
            exports: DocumentExports::from_descriptors(payload),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let payload = ExportsPayload::from_json(json).context("parse descriptor payload")?;
        Ok(Self::from_payload(&payload))
    }

    /// Same document with different export state.
    #[must_use]
    pub fn with_exports(&self, exports: DocumentExports) -> Self {
        Self {
            document: self.document.clone(),
            exports,
        }
    }

    /// Warns about selected layers the document does not contain.
    pub fn check_layers(&self, layers: &[LayerId]) {
        for id in layers {
            if self.document.layer(*id).is_none() {
                warn!(layer_id = %id, "layer not found in document");
            }
        }
    }

    pub fn to_json(&self) -> Result<String> {
        self.exports
            .to_payload(&self.document)
            .to_json_pretty()
            .context("serialize descriptor payload")
    }
}

pub fn load_payload(path: &Path) -> Result<LoadedDocument> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let payload = ExportsPayload::from_reader(BufReader::new(file))
        .with_context(|| format!("parse {}", path.display()))?;
    let loaded = LoadedDocument::from_payload(&payload);
    info!(
        path = %path.display(),
        layers = loaded.document.layers().len(),
        layers_with_exports = loaded.exports.layer_ids_with_exports().len(),
        "loaded payload"
    );
    Ok(loaded)
}

/// Writes the payload to `output`, or to stdout when no path is given.
pub fn write_payload(loaded: &LoadedDocument, output: Option<&Path>) -> Result<()> {
    let json = loaded.to_json()?;
    match output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))
                .with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "wrote payload");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}").context("write payload to stdout")?;
        }
    }
    Ok(())
}
