use std::cell::RefCell;
use crate::error::PeekError;
/// Scalar metadata fields of the inspected block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarField {
    ChannelCount,
    SampleCount,
    StartSample,
}
/// Sample element type behind the channel pointer table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementType {
    F32,
    F64,
}
impl ElementType {
    pub fn byte_size(self) -> u64 {
        match self {
            ElementType::F32 => 4,
            ElementType::F64 => 8,
        }
    }
}
/// What the inspector needs from the surrounding debug host.
///
/// Byte offsets are relative to the block's channel pointer table. Hosts must
/// interpret the bytes behind [`read_typed_value`] through a floating-point
/// read path; reading the bit pattern as an integer turns every sample into 0.
///
/// [`read_typed_value`]: BlockHost::read_typed_value
pub trait BlockHost {
    /// Unsigned scalar field of the inspected block, `None` when unreadable.
    fn read_scalar_field(&self, field: ScalarField) -> Option<u64>;
    /// Element type of the channel data, `None` when the pointee type cannot
    /// be resolved or is not single or double precision float.
    fn resolve_element_type(&self) -> Option<ElementType>;
    /// Byte width of one entry of the channel pointer table.
    fn pointer_byte_size(&self) -> u64;
    /// Stable identity of the inspected instance, used as a cache key.
    fn instance_id(&self) -> u64;
    /// Read one value of `ty` at `byte_offset`, converted to f64.
    fn read_typed_value(&self, byte_offset: u64, ty: ElementType) -> Result<f64, PeekError>;
}
/// In-memory host over a flat byte image. Useful for tests and for embedders
/// that already copied the block's memory out of the target.
pub struct VecHost {
    pub channel_count: Option<u64>,
    pub sample_count: Option<u64>,
    pub start_sample: Option<u64>,
    pub element_type: Option<ElementType>,
    pub pointer_size: u64,
    pub instance: u64,
    bytes: RefCell<Vec<u8>>,
}
impl VecHost {
    /// Host over a raw byte image with no metadata filled in.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            channel_count: None,
            sample_count: None,
            start_sample: None,
            element_type: None,
            pointer_size: 8,
            instance: 1,
            bytes: RefCell::new(bytes),
        }
    }
    /// Lay out planar f32 channel data behind the default two-slot header,
    /// each channel occupying a contiguous stride of the first channel's
    /// length.
    pub fn from_planar_f32(channels: &[Vec<f32>]) -> Self {
        let samples = channels.first().map(|c| c.len()).unwrap_or(0);
        let mut bytes = vec![0u8; 16];
        for channel in channels {
            for &value in channel {
                bytes.extend_from_slice(&value.to_ne_bytes());
            }
        }
        let mut host = Self::new(bytes);
        host.channel_count = Some(channels.len() as u64);
        host.sample_count = Some(samples as u64);
        host.start_sample = Some(0);
        host.element_type = Some(ElementType::F32);
        host
    }
    /// Same layout as [`from_planar_f32`] with double precision data.
    ///
    /// [`from_planar_f32`]: VecHost::from_planar_f32
    pub fn from_planar_f64(channels: &[Vec<f64>]) -> Self {
        let samples = channels.first().map(|c| c.len()).unwrap_or(0);
        let mut bytes = vec![0u8; 16];
        for channel in channels {
            for &value in channel {
                bytes.extend_from_slice(&value.to_ne_bytes());
            }
        }
        let mut host = Self::new(bytes);
        host.channel_count = Some(channels.len() as u64);
        host.sample_count = Some(samples as u64);
        host.start_sample = Some(0);
        host.element_type = Some(ElementType::F64);
        host
    }
    /// Overwrite one f32 sample in place, as a stopped target mutating its
    /// memory between inspections would.
    pub fn poke_f32(&self, byte_offset: u64, value: f32) {
        let mut bytes = self.bytes.borrow_mut();
        let start = byte_offset as usize;
        bytes[start..start + 4].copy_from_slice(&value.to_ne_bytes());
    }
}
impl BlockHost for VecHost {
    fn read_scalar_field(&self, field: ScalarField) -> Option<u64> {
        match field {
            ScalarField::ChannelCount => self.channel_count,
            ScalarField::SampleCount => self.sample_count,
            ScalarField::StartSample => self.start_sample,
        }
    }
    fn resolve_element_type(&self) -> Option<ElementType> {
        self.element_type
    }
    fn pointer_byte_size(&self) -> u64 {
        self.pointer_size
    }
    fn instance_id(&self) -> u64 {
        self.instance
    }
    fn read_typed_value(&self, byte_offset: u64, ty: ElementType) -> Result<f64, PeekError> {
        let bytes = self.bytes.borrow();
        let size = ty.byte_size() as usize;
        let start = byte_offset as usize;
        let end = match start.checked_add(size) {
            Some(end) if end <= bytes.len() => end,
            _ => return Err(PeekError::SampleRead { offset: byte_offset }),
        };
        Ok(match ty {
            ElementType::F32 => {
                let mut raw = [0u8; 4];
                raw.copy_from_slice(&bytes[start..end]);
                f32::from_ne_bytes(raw) as f64
            }
            ElementType::F64 => {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(&bytes[start..end]);
                f64::from_ne_bytes(raw)
            }
        })
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn planar_layout_places_data_behind_the_header() {
        let host = VecHost::from_planar_f32(&[vec![0.25, 0.5], vec![0.75, 1.0]]);
        assert_eq!(host.read_typed_value(16, ElementType::F32).unwrap(), 0.25);
        assert_eq!(host.read_typed_value(24, ElementType::F32).unwrap(), 0.75);
    }
    #[test]
    fn reads_outside_the_image_are_reported_not_truncated() {
        let host = VecHost::from_planar_f32(&[vec![1.0]]);
        assert!(matches!(
            host.read_typed_value(1_000, ElementType::F32),
            Err(PeekError::SampleRead { offset: 1_000 })
        ));
        assert!(matches!(
            host.read_typed_value(u64::MAX, ElementType::F64),
            Err(PeekError::SampleRead { .. })
        ));
    }
    #[test]
    fn pokes_are_visible_to_later_reads() {
        let host = VecHost::from_planar_f32(&[vec![0.0, 0.0]]);
        host.poke_f32(20, -0.5);
        assert_eq!(host.read_typed_value(20, ElementType::F32).unwrap(), -0.5);
    }
}
