//! Lifecycle events and the side effects the controller delegates.

use std::fmt;

use serde::Serialize;
use vizboard_model::Visualisation;

/// Lifecycle operations that report progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    List,
    Create,
    Fetch,
    Save,
    Delete,
    Export,
    Share,
    FetchDataset,
    AddToCollection,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Fetch => "fetch",
            Self::Save => "save",
            Self::Delete => "delete",
            Self::Export => "export",
            Self::Share => "share",
            Self::FetchDataset => "fetch_dataset",
            Self::AddToCollection => "add_to_collection",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that happened during a lifecycle operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LibraryEvent {
    Requested {
        operation: Operation,
        id: Option<String>,
    },
    Succeeded {
        operation: Operation,
        id: Option<String>,
    },
    Failed {
        operation: Operation,
        id: Option<String>,
        message: String,
    },
    /// A copy written to the library while a save is in flight or settled.
    Stored { visualisation: Box<Visualisation> },
    /// An optimistic copy was dropped because nothing preceded it.
    Discarded { id: String },
    /// The app should show this location.
    Navigate { path: String },
}

impl LibraryEvent {
    pub fn requested(operation: Operation, id: Option<&str>) -> Self {
        Self::Requested {
            operation,
            id: id.map(str::to_string),
        }
    }

    pub fn succeeded(operation: Operation, id: Option<&str>) -> Self {
        Self::Succeeded {
            operation,
            id: id.map(str::to_string),
        }
    }

    pub fn stored(visualisation: Visualisation) -> Self {
        Self::Stored {
            visualisation: Box::new(visualisation),
        }
    }

    pub fn failed(operation: Operation, id: Option<&str>, error: &impl fmt::Display) -> Self {
        Self::Failed {
            operation,
            id: id.map(str::to_string),
            message: error.to_string(),
        }
    }
}

/// Receives lifecycle events.
pub trait EventSink {
    fn emit(&mut self, event: LibraryEvent);
}

impl EventSink for Vec<LibraryEvent> {
    fn emit(&mut self, event: LibraryEvent) {
        self.push(event);
    }
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: LibraryEvent) {
        match event {
            LibraryEvent::Requested { operation, id } => {
                tracing::debug!(%operation, id = id.as_deref(), "requested");
            }
            LibraryEvent::Succeeded { operation, id } => {
                tracing::info!(%operation, id = id.as_deref(), "succeeded");
            }
            LibraryEvent::Failed {
                operation,
                id,
                message,
            } => {
                tracing::warn!(%operation, id = id.as_deref(), %message, "failed");
            }
            LibraryEvent::Stored { visualisation } => {
                tracing::debug!(
                    id = %visualisation.id,
                    status = ?visualisation.status,
                    "stored"
                );
            }
            LibraryEvent::Discarded { id } => {
                tracing::debug!(%id, "discarded");
            }
            LibraryEvent::Navigate { path } => {
                tracing::info!(%path, "navigate");
            }
        }
    }
}

/// Opens a URL in a new browsing context.
pub trait Opener {
    fn open(&mut self, url: &str) -> std::io::Result<()>;
}

/// Opens URLs with the platform handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&mut self, url: &str) -> std::io::Result<()> {
        open::that(url)
    }
}

/// Records URLs instead of opening them.
impl Opener for Vec<String> {
    fn open(&mut self, url: &str) -> std::io::Result<()> {
        self.push(url.to_string());
        Ok(())
    }
}
