use std::collections::HashMap;
use crate::host::ElementType;
use crate::layout::ChannelSpec;
/// Derived channel placement for one block instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedLayout {
    pub element_type: ElementType,
    pub channels: Vec<ChannelSpec>,
}
/// Cache of derived layouts keyed by instance identity.
///
/// Derivation only depends on the block's header fields, so an entry stays
/// valid while the target is stopped. Call [`begin_generation`] with the
/// host's stop counter whenever the target has run again; any counter change
/// drops every entry.
///
/// [`begin_generation`]: LayoutCache::begin_generation
#[derive(Debug, Default)]
pub struct LayoutCache {
    generation: u64,
    entries: HashMap<u64, CachedLayout>,
}
impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn begin_generation(&mut self, generation: u64) {
        if generation != self.generation {
            self.entries.clear();
            self.generation = generation;
        }
    }
    pub fn get(&self, instance: u64) -> Option<&CachedLayout> {
        self.entries.get(&instance)
    }
    pub fn insert(&mut self, instance: u64, layout: CachedLayout) {
        self.entries.insert(instance, layout);
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn mono_layout() -> CachedLayout {
        CachedLayout {
            element_type: ElementType::F32,
            channels: vec![ChannelSpec {
                index: 0,
                byte_offset: 16,
            }],
        }
    }
    #[test]
    fn entries_survive_within_a_generation() {
        let mut cache = LayoutCache::new();
        cache.insert(7, mono_layout());
        cache.begin_generation(0);
        assert_eq!(cache.get(7), Some(&mono_layout()));
        assert_eq!(cache.len(), 1);
    }
    #[test]
    fn a_new_generation_drops_every_entry() {
        let mut cache = LayoutCache::new();
        cache.insert(7, mono_layout());
        cache.insert(9, mono_layout());
        cache.begin_generation(1);
        assert!(cache.is_empty());
        assert_eq!(cache.get(7), None);
    }
}
