// crates/geoborders-core/src/traits.rs
use crate::assemble::{ConcatenatedPolyline, Trace};

/// A charting surface that accepts line traces.
///
/// Implemented by the consuming application (figure builder, frame
/// assembler). The pipeline only hands over finished values; it never draws.
///
/// # Examples
/// ```rust
/// use geoborders_core::assemble::{ConcatenatedPolyline, Trace};
/// use geoborders_core::traits::TraceSink;
///
/// #[derive(Default)]
/// struct Counter(usize);
///
/// impl TraceSink for Counter {
///     fn add_trace(&mut self, _trace: Trace) { self.0 += 1; }
///     fn add_polyline(&mut self, _line: ConcatenatedPolyline) { self.0 += 1; }
/// }
///
/// let mut sink = Counter::default();
/// sink.add_polyline(ConcatenatedPolyline::default());
/// assert_eq!(sink.0, 1);
/// ```
pub trait TraceSink {
    /// Adds one independent trace; `trace.target` selects the subplot cell.
    fn add_trace(&mut self, trace: Trace);

    /// Adds (or replaces, for a per-frame surface) the concatenated border trace.
    fn add_polyline(&mut self, polyline: ConcatenatedPolyline);
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn add_trace(&mut self, trace: Trace) {
        (**self).add_trace(trace)
    }

    fn add_polyline(&mut self, polyline: ConcatenatedPolyline) {
        (**self).add_polyline(polyline)
    }
}
