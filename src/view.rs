use crate::error::PeekError;
use crate::host::{BlockHost, ElementType};
/// Read-only typed window into host memory. Nothing is copied; every read
/// goes back through the host, so a view always reflects the target's
/// current bytes.
pub struct MemoryView<'h, H: BlockHost + ?Sized> {
    host: &'h H,
    base_offset: u64,
    element_type: ElementType,
    element_count: u64,
}
impl<'h, H: BlockHost + ?Sized> MemoryView<'h, H> {
    pub fn new(host: &'h H, base_offset: u64, element_type: ElementType, element_count: u64) -> Self {
        Self {
            host,
            base_offset,
            element_type,
            element_count,
        }
    }
    pub fn base_offset(&self) -> u64 {
        self.base_offset
    }
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }
    pub fn element_count(&self) -> u64 {
        self.element_count
    }
    /// Sub-view starting `byte_offset` bytes into this view.
    pub fn slice(&self, byte_offset: u64, element_count: u64) -> MemoryView<'h, H> {
        MemoryView::new(
            self.host,
            self.base_offset + byte_offset,
            self.element_type,
            element_count,
        )
    }
    /// Read element `index` as f64. Whether the address is readable is the
    /// host's call; a view does not clamp reads to its own element count.
    pub fn read(&self, index: u64) -> Result<f64, PeekError> {
        let offset = self.base_offset + index * self.element_type.byte_size();
        self.host.read_typed_value(offset, self.element_type)
    }
}
