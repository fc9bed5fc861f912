use mixdock_host::SourceId;

use crate::panels::SourceChange;

/// Host change notification queued for the UI thread.
pub(super) struct UiEvent {
    pub source: SourceId,
    pub change: SourceChange,
}
