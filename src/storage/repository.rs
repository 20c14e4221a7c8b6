use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::utils::clock::Clock;

use super::{document_storage::DocumentStorage, entities::Document};

/// Loads and saves the whole [Document] through a [DocumentStorage].
pub struct DocumentRepository<S: DocumentStorage> {
    storage: S,
    clock: Box<dyn Clock>,
}

impl<S: DocumentStorage> DocumentRepository<S> {
    pub fn new(storage: S, clock: Box<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn location(&self) -> String {
        self.storage.location()
    }

    /// Returns the stored document, or a fresh one if nothing was stored yet. Keys missing from
    /// older documents get their defaults. A document that isn't valid JSON is an error.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Document> {
        let today = self.clock.now().date();
        let Some(contents) = self.storage.read().await? else {
            debug!("Nothing stored yet, starting from an empty document");
            return Ok(Document::new(today));
        };

        Document::from_json(&contents, today)
            .with_context(|| format!("Malformed document in {}", self.storage.location()))
    }

    /// Serializes the whole document and replaces the stored one.
    #[instrument(skip_all)]
    pub async fn save(&self, document: &Document) -> Result<()> {
        let contents = serde_json::to_vec_pretty(document)?;
        self.storage.write(contents).await?;
        info!("Saved document to {}", self.storage.location());
        Ok(())
    }
}
