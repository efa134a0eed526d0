use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::warn;

use crate::selection::{CheckState, SyncState};
use crate::snapshot::Entry;

/// Node state derived from a snapshot record, with every absent field defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAttributes {
    pub size: Option<u64>,
    pub modified: Option<OffsetDateTime>,
    pub check_state: CheckState,
    pub sync_state: SyncState,
    pub invalid: bool,
}

impl From<&Entry> for NodeAttributes {
    fn from(entry: &Entry) -> Self {
        // Unknown entries are treated as ignored
        let ignored = entry.ignored.unwrap_or(true);
        let partial = entry.partial.unwrap_or(false);

        let sync_state = match entry.syncstate {
            Some(state) => state,
            None if partial || !ignored => SyncState::Syncing,
            None => SyncState::Ignored,
        };

        Self {
            size: entry.size.filter(|size| *size != 0),
            modified: entry.modified.as_deref().and_then(parse_timestamp),
            check_state: CheckState::from_flags(ignored, partial),
            sync_state,
            invalid: !ignored && entry.invalid.unwrap_or(false),
        }
    }
}

/// RFC 3339 first, then any ISO 8601 form; a timestamp without offset is UTC.
fn parse_timestamp(value: &str) -> Option<OffsetDateTime> {
    let parsed = OffsetDateTime::parse(value, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(value, &Iso8601::DEFAULT))
        .or_else(|_| PrimitiveDateTime::parse(value, &Iso8601::DEFAULT).map(PrimitiveDateTime::assume_utc));
    match parsed {
        Ok(timestamp) => Some(timestamp),
        Err(e) => {
            warn!("Dropping unparsable modification time '{}': {}", value, e);
            None
        }
    }
}
