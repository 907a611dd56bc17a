use crate::model::SegmentId;

/// An ordered run of segments passing through one rank.
///
/// `pos` is the sweep position of the first segment; the container occupies `len()`
/// consecutive positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    segments: Vec<SegmentId>,
    pub pos: usize,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<SegmentId>) -> Self {
        Self { segments, pos: 0 }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[SegmentId] {
        &self.segments
    }

    pub fn push(&mut self, s: SegmentId) {
        self.segments.push(s);
    }

    /// Appends `other`'s segments after this container's own.
    pub fn join(&mut self, other: Container) {
        self.segments.extend(other.segments);
    }

    /// Splits after the first `k` segments. The right half starts at `pos + k`.
    pub fn split_at(self, k: usize) -> (Container, Container) {
        let k = k.min(self.segments.len());
        let mut left = self.segments;
        let right = left.split_off(k);
        (
            Container {
                segments: left,
                pos: self.pos,
            },
            Container {
                segments: right,
                pos: self.pos + k,
            },
        )
    }
}
