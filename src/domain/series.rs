// Rolling-window time series
use std::collections::VecDeque;

/// Number of points kept per chart channel.
pub const SERIES_CAPACITY: usize = 25;

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Fixed-capacity series; appending at capacity evicts the oldest point.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBuffer {
    points: VecDeque<SeriesPoint>,
    capacity: usize,
}

impl Default for SeriesBuffer {
    fn default() -> Self {
        Self::with_capacity(SERIES_CAPACITY)
    }
}

impl SeriesBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, point: SeriesPoint) {
        self.points.push_back(point);
        if self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn points(&self) -> &VecDeque<SeriesPoint> {
        &self.points
    }

    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.points.back()
    }

    pub fn oldest(&self) -> Option<&SeriesPoint> {
        self.points.front()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
