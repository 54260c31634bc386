//! Ordered list of tracked channels.

use {steeple_config::ChannelEntry, tracing::warn};

/// The channels one sync pass walks, in a fixed order.
///
/// Order carries no meaning beyond determinism: the same registry always
/// produces the same channel sequence within a pass. Entries without any
/// usable identifier are dropped at construction; they could never sync.
#[derive(Debug, Clone, Default)]
pub struct ChannelRegistry {
    entries: Vec<ChannelEntry>,
}

impl ChannelRegistry {
    /// Build a registry, dropping (with a warning) entries that carry
    /// neither an id nor a handle.
    #[must_use]
    pub fn new(entries: Vec<ChannelEntry>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|entry| {
                if entry.has_identity() {
                    true
                } else {
                    warn!(channel = %entry.name, "dropping channel without id or handle");
                    false
                }
            })
            .collect();
        Self { entries }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChannelEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ChannelRegistry {
    type IntoIter = std::slice::Iter<'a, ChannelEntry>;
    type Item = &'a ChannelEntry;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
