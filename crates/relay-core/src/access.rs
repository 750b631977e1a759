//! Sender authorization.

use std::collections::BTreeSet;

/// Fixed set of Telegram user ids allowed to upload.
///
/// Built once at startup and never mutated. An empty list admits every
/// sender; startup refuses an empty `ALLOWED_USER_IDS`, so the open mode is
/// only reachable by constructing the list programmatically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    ids: BTreeSet<u64>,
}

impl AllowList {
    pub fn new(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Parse a comma separated id list. Blank entries are skipped.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut ids = BTreeSet::new();
        for part in raw.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let id = part
                .parse::<u64>()
                .map_err(|_| format!("invalid user id '{}'", part))?;
            ids.insert(id);
        }
        Ok(Self { ids })
    }

    pub fn is_allowed(&self, sender_id: u64) -> bool {
        self.ids.is_empty() || self.ids.contains(&sender_id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.ids.iter().copied()
    }
}
