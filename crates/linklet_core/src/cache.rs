use std::collections::BTreeSet;

use crate::link::Link;

/// The last list of links fetched from the service.
///
/// Every invalidation bumps a generation and each fetch is tagged with the
/// generation current when it was dispatched. A response tagged with an older
/// generation may predate a mutation, so it is dropped and refetched rather
/// than shown. Entries are never patched locally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkCache {
    links: Vec<Link>,
    generation: u64,
    loaded_generation: Option<u64>,
    in_flight: Option<u64>,
    watched: bool,
    last_error: Option<String>,
    deleting: BTreeSet<String>,
}

impl LinkCache {
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Number of invalidations so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_stale(&self) -> bool {
        self.loaded_generation != Some(self.generation)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_deleting(&self, code: &str) -> bool {
        self.deleting.contains(code)
    }

    pub(crate) fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Starts a fetch for the current generation unless one is outstanding.
    pub(crate) fn refresh(&mut self) -> Option<u64> {
        self.watched = true;
        if self.in_flight == Some(self.generation) {
            return None;
        }
        self.in_flight = Some(self.generation);
        Some(self.generation)
    }

    /// A read: refreshes only when the held set is stale.
    pub(crate) fn read(&mut self) -> Option<u64> {
        if self.is_stale() {
            self.refresh()
        } else {
            None
        }
    }

    /// Refreshes after an invalidation if anyone has read the list before.
    pub(crate) fn refresh_if_watched(&mut self) -> Option<u64> {
        if self.watched {
            self.refresh()
        } else {
            None
        }
    }

    /// Applies a list response; returns the generation of a follow-up fetch
    /// when the response was outdated.
    pub(crate) fn apply_loaded(
        &mut self,
        generation: u64,
        result: Result<Vec<Link>, String>,
    ) -> Option<u64> {
        if self.in_flight == Some(generation) {
            self.in_flight = None;
        }
        if generation < self.generation {
            return if self.is_stale() { self.refresh() } else { None };
        }
        match result {
            Ok(links) => {
                self.links = links;
                self.loaded_generation = Some(generation);
                self.last_error = None;
            }
            Err(message) => {
                self.last_error = Some(message);
            }
        }
        None
    }

    /// Marks a delete as outstanding. False if one already is for `code`.
    pub(crate) fn begin_delete(&mut self, code: &str) -> bool {
        self.deleting.insert(code.to_string())
    }

    pub(crate) fn finish_delete(&mut self, code: &str) {
        self.deleting.remove(code);
    }
}
