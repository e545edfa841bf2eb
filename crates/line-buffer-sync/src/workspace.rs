//! Registry of mirrored documents keyed by URL.

use crate::error::SyncError;
use crate::protocol::{ModelChangedEvent, RawModelData};
use line_buffer::{BufferOptions, EndOfLine, LineBuffer};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Mirrors of remote documents, each a [`LineBuffer`].
///
/// The workspace is the single writer for its buffers: every event for a model goes through
/// [`MirrorWorkspace::accept_model_changed`], which rejects events older than the mirror.
#[derive(Debug, Default)]
pub struct MirrorWorkspace {
    models: HashMap<String, LineBuffer>,
    options: BufferOptions,
}

impl MirrorWorkspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty workspace whose mirrors use `options`.
    pub fn with_options(options: BufferOptions) -> Self {
        Self {
            models: HashMap::new(),
            options,
        }
    }

    /// Start mirroring a model. An existing mirror with the same URL is replaced.
    pub fn accept_new_model(&mut self, data: RawModelData) -> Result<(), SyncError> {
        let eol = EndOfLine::from_sequence(&data.eol)?;
        let buffer = LineBuffer::new(data.lines, eol, data.version_id)?.with_options(self.options);
        debug!(
            url = %data.url,
            version = data.version_id,
            line_count = buffer.line_count(),
            "mirroring model"
        );
        if self.models.insert(data.url.clone(), buffer).is_some() {
            debug!(url = %data.url, "replaced existing mirror");
        }
        Ok(())
    }

    /// Apply a change event to the mirror of `url`.
    ///
    /// Events whose version is lower than the mirror's are rejected as stale; equal versions
    /// are accepted. A rejected event leaves the mirror untouched.
    pub fn accept_model_changed(
        &mut self,
        url: &str,
        event: &ModelChangedEvent,
    ) -> Result<(), SyncError> {
        let Some(buffer) = self.models.get_mut(url) else {
            warn!(url, version = event.version_id, "change event for unknown model");
            return Err(SyncError::UnknownModel(url.to_string()));
        };

        if event.version_id < buffer.version() {
            warn!(
                url,
                event_version = event.version_id,
                model_version = buffer.version(),
                "dropping stale change event"
            );
            return Err(SyncError::StaleVersion {
                url: url.to_string(),
                event_version: event.version_id,
                model_version: buffer.version(),
            });
        }

        let edits = event.text_edits()?;
        let eol = event.end_of_line()?;
        buffer.apply_edit(&edits, eol, event.version_id)?;
        trace!(
            url,
            version = event.version_id,
            changes = edits.len(),
            "applied change event"
        );
        Ok(())
    }

    /// Stop mirroring `url`. Returns whether a mirror existed.
    pub fn accept_removed_model(&mut self, url: &str) -> bool {
        let removed = self.models.remove(url).is_some();
        if removed {
            debug!(url, "removed mirror");
        }
        removed
    }

    /// The mirror of `url`.
    pub fn model(&self, url: &str) -> Option<&LineBuffer> {
        self.models.get(url)
    }

    /// Mutable access to the mirror of `url`, for offset/position queries.
    pub fn model_mut(&mut self, url: &str) -> Option<&mut LineBuffer> {
        self.models.get_mut(url)
    }

    /// All mirrors with their URLs, in no particular order.
    pub fn models(&self) -> impl Iterator<Item = (&str, &LineBuffer)> {
        self.models.iter().map(|(url, buffer)| (url.as_str(), buffer))
    }

    /// Number of mirrors.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether no model is mirrored.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Drop every mirror.
    pub fn clear(&mut self) {
        debug!(count = self.models.len(), "clearing mirrors");
        self.models.clear();
    }
}
