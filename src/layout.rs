use serde::{Deserialize, Serialize};
use crate::error::PeekError;
use crate::host::{BlockHost, ElementType};
use crate::view::MemoryView;
/// Locates per-channel data behind the block's channel pointer table.
///
/// The stock block keeps two pointer-sized slots in front of the first
/// channel's data. That header is a structural fact about the inspected
/// type, not something the target advertises, so a buffer implementation
/// with a different header supplies its own slot count here instead of
/// touching the derivation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockLayout {
    /// Leading pointer-table slots before the first channel's data.
    pub header_slots: u64,
}
impl Default for BlockLayout {
    fn default() -> Self {
        BlockLayout { header_slots: 2 }
    }
}
impl BlockLayout {
    /// Parse a layout override, e.g. `{"header_slots": 3}`.
    pub fn from_json(text: &str) -> Result<Self, PeekError> {
        Ok(serde_json::from_str(text)?)
    }
    pub fn header_bytes(&self, pointer_byte_size: u64) -> u64 {
        self.header_slots * pointer_byte_size
    }
}
/// Derived placement of one channel's data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelSpec {
    pub index: u64,
    pub byte_offset: u64,
}
/// Pure offset derivation: channel `i` starts at
/// `header + i * sample_count * element_size`, a fixed per-channel stride
/// from the base.
pub fn channel_offsets(
    layout: &BlockLayout,
    pointer_byte_size: u64,
    channel_count: u64,
    sample_count: u64,
    element_type: ElementType,
) -> Vec<ChannelSpec> {
    let header = layout.header_bytes(pointer_byte_size);
    let stride = sample_count * element_type.byte_size();
    (0..channel_count)
        .map(|index| ChannelSpec {
            index,
            byte_offset: header + index * stride,
        })
        .collect()
}
/// Resolve the element type and build one read-only view per channel.
pub fn derive_channels<'h, H: BlockHost + ?Sized>(
    host: &'h H,
    layout: &BlockLayout,
    channel_count: u64,
    sample_count: u64,
) -> Result<Vec<MemoryView<'h, H>>, PeekError> {
    let element_type = host
        .resolve_element_type()
        .ok_or(PeekError::TypeResolution)?;
    let specs = channel_offsets(
        layout,
        host.pointer_byte_size(),
        channel_count,
        sample_count,
        element_type,
    );
    Ok(views_from_specs(host, &specs, element_type, sample_count))
}
pub(crate) fn views_from_specs<'h, H: BlockHost + ?Sized>(
    host: &'h H,
    specs: &[ChannelSpec],
    element_type: ElementType,
    sample_count: u64,
) -> Vec<MemoryView<'h, H>> {
    specs
        .iter()
        .map(|spec| MemoryView::new(host, spec.byte_offset, element_type, sample_count))
        .collect()
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::VecHost;
    #[test]
    fn channel_offsets_step_by_sample_stride() {
        let specs = channel_offsets(&BlockLayout::default(), 8, 2, 4, ElementType::F32);
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].byte_offset, 16);
        assert_eq!(specs[1].byte_offset, 2 * 8 + 4 * 4);
    }
    #[test]
    fn layout_override_shifts_every_channel() {
        let layout = BlockLayout::from_json(r#"{"header_slots": 3}"#).unwrap();
        let specs = channel_offsets(&layout, 8, 2, 4, ElementType::F64);
        assert_eq!(specs[0].byte_offset, 24);
        assert_eq!(specs[1].byte_offset, 24 + 32);
    }
    #[test]
    fn malformed_layout_is_rejected() {
        assert!(matches!(
            BlockLayout::from_json("{"),
            Err(PeekError::Layout(_))
        ));
    }
    #[test]
    fn unresolvable_element_type_fails_derivation() {
        let mut host = VecHost::from_planar_f32(&[vec![0.0; 4]]);
        host.element_type = None;
        assert!(matches!(
            derive_channels(&host, &BlockLayout::default(), 1, 4),
            Err(PeekError::TypeResolution)
        ));
    }
    #[test]
    fn derived_views_read_their_own_channel() {
        let host = VecHost::from_planar_f32(&[vec![0.5, 0.5], vec![-0.5, -0.5]]);
        let channels = derive_channels(&host, &BlockLayout::default(), 2, 2).unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].read(0).unwrap(), 0.5);
        assert_eq!(channels[1].read(0).unwrap(), -0.5);
    }
}
