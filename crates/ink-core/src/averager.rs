use std::collections::VecDeque;

/// Rolling mean over the most recent `limit` samples.
#[derive(Clone, Debug)]
pub struct Averager {
    limit: usize,
    tally: f64,
    values: VecDeque<f64>,
    result: f64,
}

impl Averager {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            limit,
            tally: 0.0,
            values: VecDeque::with_capacity(limit + 1),
            result: 0.0,
        }
    }

    /// Record a sample and return the mean of the retained window.
    pub fn add(&mut self, value: f64) -> f64 {
        self.tally += value;
        self.values.push_back(value);
        while self.values.len() > self.limit {
            if let Some(old) = self.values.pop_front() {
                self.tally -= old;
            }
        }
        self.result = self.tally / self.values.len() as f64;
        self.result
    }

    pub fn result(&self) -> f64 {
        self.result
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
