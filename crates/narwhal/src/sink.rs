//! Destinations for final vertex positions.

use crate::geometry::Point;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Receives the center point of every caller vertex once a run completes. A cancelled run
/// never touches its sink.
pub trait PositionSink {
    fn set_position(&mut self, id: &str, point: Point);
}

impl<S: BuildHasher> PositionSink for HashMap<String, Point, S> {
    fn set_position(&mut self, id: &str, point: Point) {
        self.insert(id.to_string(), point);
    }
}

impl PositionSink for BTreeMap<String, Point> {
    fn set_position(&mut self, id: &str, point: Point) {
        self.insert(id.to_string(), point);
    }
}

/// Adapts a closure into a [`PositionSink`].
pub struct FnSink<F>(pub F);

impl<F> PositionSink for FnSink<F>
where
    F: FnMut(&str, Point),
{
    fn set_position(&mut self, id: &str, point: Point) {
        (self.0)(id, point);
    }
}

impl<T: PositionSink + ?Sized> PositionSink for &mut T {
    fn set_position(&mut self, id: &str, point: Point) {
        (**self).set_position(id, point);
    }
}
