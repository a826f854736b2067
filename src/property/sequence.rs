use std::fmt;
use std::rc::Rc;

use crate::foundation::value::Value;

type SequenceFactory = Rc<dyn Fn() -> Box<dyn Iterator<Item = Value>>>;

#[derive(Clone)]
enum Segment {
    Values(Rc<[Value]>),
    Generated(SequenceFactory),
}

impl Segment {
    fn iter(&self) -> Box<dyn Iterator<Item = Value> + '_> {
        match self {
            Self::Values(values) => Box::new(values.iter().cloned()),
            Self::Generated(factory) => factory(),
        }
    }
}

/// A restartable, finite or infinite sequence of values backing an iterated property.
///
/// Every run calls [`Sequence::iter`] afresh, so the same definition can drive any number of
/// independent runs. Appending chains segments: an earlier segment is exhausted before the next
/// one starts.
#[derive(Clone, Default)]
pub struct Sequence {
    segments: Vec<Segment>,
}

impl Sequence {
    /// An empty sequence (exhausts on the first pull).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let values: Rc<[Value]> = values.into_iter().map(Into::into).collect();
        Self {
            segments: vec![Segment::Values(values)],
        }
    }

    /// Build a sequence from a factory that yields a fresh iterator for each run.
    ///
    /// The iterator may be infinite; the owning property then only ends through a terminator.
    pub fn from_fn<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: Iterator<Item = Value> + 'static,
    {
        let factory: SequenceFactory =
            Rc::new(move || Box::new(factory()) as Box<dyn Iterator<Item = Value>>);
        Self {
            segments: vec![Segment::Generated(factory)],
        }
    }

    /// Concatenate `other` after `self`.
    pub fn chain(mut self, other: Sequence) -> Self {
        self.segments.extend(other.segments);
        self
    }

    /// Start a fresh pass over the sequence.
    pub fn iter(&self) -> Box<dyn Iterator<Item = Value> + '_> {
        Box::new(self.segments.iter().flat_map(Segment::iter))
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("segments", &self.segments.len())
            .finish()
    }
}

impl<T: Into<Value>> From<Vec<T>> for Sequence {
    fn from(values: Vec<T>) -> Self {
        Self::from_values(values)
    }
}

impl<T: Into<Value>> FromIterator<T> for Sequence {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/property/sequence.rs"]
mod tests;
