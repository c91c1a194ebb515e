use log::{debug, warn};
use crate::cache::{CachedLayout, LayoutCache};
use crate::error::PeekError;
use crate::extract;
use crate::host::{BlockHost, ScalarField};
use crate::layout::{self, BlockLayout};
use crate::sparkline;
use crate::view::MemoryView;
/// Blocks claiming more channels than this are treated as uninitialized
/// memory rather than inspected.
pub const MAX_CHANNELS: u64 = 16;
/// Rendered for a block whose channel count is unreadable or absurd.
pub const UNINITIALIZED_MARKER: &str = "uninitialized audio block";
/// Rendered when the block's memory or element type cannot be read.
pub const UNREADABLE_MARKER: &str = "<unreadable>";
/// The three scalar metadata children, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetaField {
    ChannelCount,
    SampleCount,
    StartSample,
}
impl MetaField {
    /// Display name, matching the inspected block's field names.
    pub fn name(self) -> &'static str {
        match self {
            MetaField::ChannelCount => "numChannels",
            MetaField::SampleCount => "numSamples",
            MetaField::StartSample => "startSample",
        }
    }
}
/// A display child, addressed by name or index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChildKind {
    Sparkline(usize),
    ChannelArray(usize),
    Meta(MetaField),
}
/// Value of one display child.
#[derive(Clone, Debug, PartialEq)]
pub enum Child {
    Sparkline(String),
    Samples(Vec<f64>),
    Meta { field: MetaField, value: u64 },
}
/// Parse a display name into its child kind: `sparkline[i]`, `channel[i]`,
/// or one of the metadata field names.
pub fn parse_child_name(name: &str) -> Option<ChildKind> {
    if let Some(rest) = name.strip_prefix("sparkline[") {
        return rest.strip_suffix(']')?.parse().ok().map(ChildKind::Sparkline);
    }
    if let Some(rest) = name.strip_prefix("channel[") {
        return rest
            .strip_suffix(']')?
            .parse()
            .ok()
            .map(ChildKind::ChannelArray);
    }
    match name {
        "numChannels" => Some(ChildKind::Meta(MetaField::ChannelCount)),
        "numSamples" => Some(ChildKind::Meta(MetaField::SampleCount)),
        "startSample" => Some(ChildKind::Meta(MetaField::StartSample)),
        _ => None,
    }
}
/// Synthetic child tree for one block instance.
///
/// Children are ordered: one sparkline per channel, one raw channel array
/// per channel, then the three metadata fields. Sparklines are re-encoded
/// from current memory on every access; the channel views themselves are
/// derived once at attach time and reused.
pub struct BlockTree<'h, H: BlockHost + ?Sized> {
    host: &'h H,
    channel_count: u64,
    sample_count: u64,
    start_sample: u64,
    channels: Vec<MemoryView<'h, H>>,
}
fn read_descriptor<H: BlockHost + ?Sized>(host: &H) -> Result<(u64, u64, u64), PeekError> {
    // An unreadable or absurd channel count poisons the whole block; a
    // missing sample or start field just reads as zero, like any other
    // unsigned field.
    let channel_count = host
        .read_scalar_field(ScalarField::ChannelCount)
        .filter(|&count| count <= MAX_CHANNELS)
        .ok_or(PeekError::Uninitialized)?;
    let sample_count = host
        .read_scalar_field(ScalarField::SampleCount)
        .unwrap_or(0);
    let start_sample = host
        .read_scalar_field(ScalarField::StartSample)
        .unwrap_or(0);
    Ok((channel_count, sample_count, start_sample))
}
impl<'h, H: BlockHost + ?Sized> BlockTree<'h, H> {
    /// Read the block's descriptor fields and derive one view per channel.
    pub fn attach(host: &'h H, layout: &BlockLayout) -> Result<Self, PeekError> {
        let (channel_count, sample_count, start_sample) = read_descriptor(host)?;
        let channels = layout::derive_channels(host, layout, channel_count, sample_count)?;
        debug!("attached block: {channel_count} channel(s), {sample_count} samples, start {start_sample}");
        Ok(Self {
            host,
            channel_count,
            sample_count,
            start_sample,
            channels,
        })
    }
    /// Like [`attach`], but reuses a derived layout for an instance already
    /// seen this generation instead of re-querying the host's type system.
    ///
    /// [`attach`]: BlockTree::attach
    pub fn attach_cached(
        host: &'h H,
        layout: &BlockLayout,
        cache: &mut LayoutCache,
    ) -> Result<Self, PeekError> {
        let (channel_count, sample_count, start_sample) = read_descriptor(host)?;
        let instance = host.instance_id();
        let (element_type, specs) = match cache.get(instance) {
            Some(cached) => (cached.element_type, cached.channels.clone()),
            None => {
                let element_type = host
                    .resolve_element_type()
                    .ok_or(PeekError::TypeResolution)?;
                let specs = layout::channel_offsets(
                    layout,
                    host.pointer_byte_size(),
                    channel_count,
                    sample_count,
                    element_type,
                );
                cache.insert(
                    instance,
                    CachedLayout {
                        element_type,
                        channels: specs.clone(),
                    },
                );
                (element_type, specs)
            }
        };
        let channels = layout::views_from_specs(host, &specs, element_type, sample_count);
        debug!("attached block: {channel_count} channel(s), {sample_count} samples, start {start_sample}");
        Ok(Self {
            host,
            channel_count,
            sample_count,
            start_sample,
            channels,
        })
    }
    pub fn channel_count(&self) -> u64 {
        self.channel_count
    }
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }
    pub fn start_sample(&self) -> u64 {
        self.start_sample
    }
    /// Number of children the display layer sizes itself from. The name map
    /// below can still address the trailing metadata fields past this count
    /// on multi-channel blocks.
    pub fn child_count(&self) -> usize {
        self.channel_count as usize + 4
    }
    pub fn has_children(&self) -> bool {
        self.channel_count > 0
    }
    pub fn child_index(&self, kind: ChildKind) -> usize {
        let channels = self.channel_count as usize;
        match kind {
            ChildKind::Sparkline(index) => index,
            ChildKind::ChannelArray(index) => channels + index,
            ChildKind::Meta(MetaField::ChannelCount) => channels * 2,
            ChildKind::Meta(MetaField::SampleCount) => channels * 2 + 1,
            ChildKind::Meta(MetaField::StartSample) => channels * 2 + 2,
        }
    }
    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        parse_child_name(name).map(|kind| self.child_index(kind))
    }
    pub fn child_at(&self, index: usize) -> Result<Child, PeekError> {
        let channels = self.channel_count as usize;
        if index < channels {
            return Ok(Child::Sparkline(self.sparkline(index)?));
        }
        if index < channels * 2 {
            return Ok(Child::Samples(self.channel_samples(index - channels)?));
        }
        let field = match index - channels * 2 {
            0 => MetaField::ChannelCount,
            1 => MetaField::SampleCount,
            2 => MetaField::StartSample,
            _ => return Err(PeekError::NoSuchChild { index }),
        };
        let value = match field {
            MetaField::ChannelCount => self.channel_count,
            MetaField::SampleCount => self.sample_count,
            MetaField::StartSample => self.start_sample,
        };
        Ok(Child::Meta { field, value })
    }
    /// Encode channel `channel` against current memory. The window offset is
    /// applied, so a sub-block renders its own slice of the parent buffer.
    pub fn sparkline(&self, channel: usize) -> Result<String, PeekError> {
        if self.sample_count == 0 {
            return Err(PeekError::EmptyInput);
        }
        let view = self
            .channels
            .get(channel)
            .ok_or(PeekError::NoSuchChild { index: channel })?;
        let samples = extract::samples(view, self.start_sample, self.sample_count)?;
        Ok(sparkline::encode(&samples))
    }
    /// Raw samples of channel `channel` from the channel's base, without the
    /// window offset: the array child shows the slot as laid out in memory.
    pub fn channel_samples(&self, channel: usize) -> Result<Vec<f64>, PeekError> {
        let view = self
            .channels
            .get(channel)
            .ok_or(PeekError::NoSuchChild { index: channel })?;
        extract::samples(view, 0, self.sample_count)
    }
    /// One-line description of the whole block. Degrades to a marker instead
    /// of propagating a read failure to the display layer.
    pub fn summary(&self) -> String {
        match self.summary_inner() {
            Ok(line) => line,
            Err(err) => {
                warn!("block summary degraded: {err}");
                UNREADABLE_MARKER.to_string()
            }
        }
    }
    fn summary_inner(&self) -> Result<String, PeekError> {
        let mut channels = Vec::with_capacity(self.channel_count as usize);
        for view in &self.channels {
            channels.push(extract::samples(view, 0, self.sample_count)?);
        }
        // Seeded at zero: an untouched block reads as silence, so min never
        // rises above zero and max never falls below it.
        let mut min = 0.0f64;
        let mut max = 0.0f64;
        for &sample in channels.iter().flatten() {
            min = min.min(sample);
            max = max.max(sample);
        }
        let filled = sparkline::percent_filled(&channels);
        Ok(format!(
            "{} channel(s), {} samples, min {min}, max {max}, {filled:.1}% filled",
            self.channel_count, self.sample_count
        ))
    }
    /// Summary plus one sparkline line per channel. A channel that cannot be
    /// read renders as the unreadable marker without disturbing the rest.
    pub fn report(&self) -> String {
        let mut out = self.summary();
        for channel in 0..self.channel_count as usize {
            out.push('\n');
            match self.sparkline(channel) {
                Ok(line) => out.push_str(&line),
                Err(_) => out.push_str(UNREADABLE_MARKER),
            }
        }
        out
    }
}
/// Attach and summarize in one step, mapping the error taxonomy onto the
/// display markers.
pub fn summarize<H: BlockHost + ?Sized>(host: &H, layout: &BlockLayout) -> String {
    match BlockTree::attach(host, layout) {
        Ok(tree) => tree.summary(),
        Err(PeekError::Uninitialized) => UNINITIALIZED_MARKER.to_string(),
        Err(_) => UNREADABLE_MARKER.to_string(),
    }
}
