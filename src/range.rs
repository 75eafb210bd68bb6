use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Words per block in block selection mode
pub const CHUNK_SIZE: u32 = 100;

/// How the user picked the id range to be quizzed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeSelection {
    /// Zero-based index into [`chunk_ranges`]
    Chunk(usize),
    Custom { start: u32, end: u32 },
}

/// Which end of a custom range the setup screen is editing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RangeBound {
    #[default]
    Start,
    End,
}

impl RangeBound {
    pub fn toggled(self) -> Self {
        match self {
            RangeBound::Start => RangeBound::End,
            RangeBound::End => RangeBound::Start,
        }
    }
}

impl Default for RangeSelection {
    fn default() -> Self {
        RangeSelection::Chunk(0)
    }
}

impl RangeSelection {
    /// Inclusive `(start, end)` id bounds for a store whose highest id is `max_id`.
    pub fn resolve(&self, max_id: u32) -> Result<(u32, u32), ConfigError> {
        match *self {
            RangeSelection::Chunk(index) => {
                let chunks = chunk_ranges(max_id);
                chunks
                    .get(index)
                    .copied()
                    .ok_or(ConfigError::UnknownChunk {
                        index: index + 1,
                        available: chunks.len(),
                    })
            }
            RangeSelection::Custom { start, end } => {
                if start > end {
                    Err(ConfigError::InvertedRange { start, end })
                } else {
                    Ok((start, end))
                }
            }
        }
    }

    pub fn label(&self, max_id: u32) -> String {
        match self.resolve(max_id) {
            Ok((start, end)) => range_label(start, end),
            Err(_) => match *self {
                RangeSelection::Chunk(index) => format!("block {}", index + 1),
                RangeSelection::Custom { start, end } => range_label(start, end),
            },
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, RangeSelection::Custom { .. })
    }

    /// Switch between block and custom selection, keeping the covered ids
    /// as close as possible.
    pub fn toggled_mode(&self, max_id: u32) -> Self {
        match *self {
            RangeSelection::Chunk(_) => {
                let (start, end) = self.resolve(max_id).unwrap_or((1, max_id.max(1)));
                RangeSelection::Custom { start, end }
            }
            RangeSelection::Custom { start, .. } => {
                let last = chunk_ranges(max_id).len().saturating_sub(1);
                let index = (start.saturating_sub(1) / CHUNK_SIZE) as usize;
                RangeSelection::Chunk(index.min(last))
            }
        }
    }

    /// Move one end of a custom range by `delta`, staying within `1..=max_id`.
    ///
    /// The other end is left alone, so the result may be inverted. Blocks are
    /// returned unchanged.
    pub fn shifted(&self, bound: RangeBound, delta: i64, max_id: u32) -> Self {
        let RangeSelection::Custom { start, end } = *self else {
            return *self;
        };
        let move_id = |id: u32| (i64::from(id) + delta).clamp(1, i64::from(max_id.max(1))) as u32;
        match bound {
            RangeBound::Start => RangeSelection::Custom {
                start: move_id(start),
                end,
            },
            RangeBound::End => RangeSelection::Custom {
                start,
                end: move_id(end),
            },
        }
    }

    /// Next block, wrapping around; custom ranges switch to the first block
    pub fn next_chunk(&self, max_id: u32) -> Self {
        let count = chunk_ranges(max_id).len().max(1);
        match *self {
            RangeSelection::Chunk(index) => RangeSelection::Chunk((index + 1) % count),
            RangeSelection::Custom { .. } => RangeSelection::Chunk(0),
        }
    }

    /// Previous block, wrapping around; custom ranges switch to the last block
    pub fn prev_chunk(&self, max_id: u32) -> Self {
        let count = chunk_ranges(max_id).len().max(1);
        match *self {
            RangeSelection::Chunk(index) => RangeSelection::Chunk((index + count - 1) % count),
            RangeSelection::Custom { .. } => RangeSelection::Chunk(count - 1),
        }
    }
}

/// Split `1..=max_id` into blocks of [`CHUNK_SIZE`] ids.
pub fn chunk_ranges(max_id: u32) -> Vec<(u32, u32)> {
    (0..max_id)
        .step_by(CHUNK_SIZE as usize)
        .map(|offset| (offset + 1, (offset + CHUNK_SIZE).min(max_id)))
        .collect()
}

pub fn range_label(start: u32, end: u32) -> String {
    format!("No.{start}〜No.{end}")
}
