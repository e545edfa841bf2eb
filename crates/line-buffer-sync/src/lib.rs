#![warn(missing_docs)]
//! `line-buffer-sync` - keeps [`line_buffer::LineBuffer`] mirrors in step with a remote
//! edit source.
//!
//! The edit source (a UI process, a language-server host, a collaboration peer) owns the real
//! document and sends three kinds of events, all serde-decodable:
//!
//! - [`RawModelData`]: a model was opened, here are its lines
//! - [`ModelChangedEvent`]: ordered range changes plus the new version
//! - removal by URL
//!
//! [`MirrorWorkspace`] applies them and refuses events that are older than the mirror.
//!
//! ```rust
//! use line_buffer_sync::{MirrorWorkspace, ModelChangedEvent, RawModelData};
//! use line_buffer::Position;
//!
//! let mut workspace = MirrorWorkspace::new();
//! workspace
//!     .accept_new_model(RawModelData {
//!         url: "file:///a.txt".to_string(),
//!         version_id: 1,
//!         lines: vec!["hello".to_string()],
//!         eol: "\n".to_string(),
//!     })
//!     .unwrap();
//!
//! let event: ModelChangedEvent = serde_json::from_str(
//!     r#"{
//!         "changes": [{
//!             "range": { "startLineNumber": 1, "startColumn": 6, "endLineNumber": 1, "endColumn": 6 },
//!             "text": " world"
//!         }],
//!         "versionId": 2
//!     }"#,
//! )
//! .unwrap();
//! workspace.accept_model_changed("file:///a.txt", &event).unwrap();
//!
//! let model = workspace.model_mut("file:///a.txt").unwrap();
//! assert_eq!(model.get_text(), "hello world");
//! assert_eq!(model.position_at(6).unwrap(), Position::new(1, 6));
//! ```

pub mod error;
pub mod protocol;
pub mod workspace;

pub use error::SyncError;
pub use protocol::{ModelChangedEvent, ModelContentChange, RawModelData, WireRange};
pub use workspace::MirrorWorkspace;
