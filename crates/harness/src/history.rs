use serde::Serialize;

/// Everything recorded about one physics tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Sample {
    pub time: f64,
    pub position: f64,
    pub velocity: f64,
    pub command: f64,
    pub torque: f64,
    pub target: f64,
    pub target_derivative: f64,
}

/// Worst tracking error over a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackingError {
    pub tick: usize,
    pub time: f64,
    pub error: f64,
}

/// Per-tick samples of a run, in tick order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct History {
    samples: Vec<Sample>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub(crate) fn clear(&mut self) {
        self.samples.clear();
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.samples.reserve(additional);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn get(&self, tick: usize) -> Option<&Sample> {
        self.samples.get(tick)
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.time)
    }

    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.position)
    }

    pub fn velocities(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.velocity)
    }

    pub fn commands(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.command)
    }

    pub fn torques(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.torque)
    }

    pub fn targets(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.target)
    }

    pub fn target_derivatives(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.target_derivative)
    }

    /// Largest `target - position` over the run (signed, not absolute).
    pub fn largest_tracking_error(&self) -> Option<TrackingError> {
        self.largest_by(|s| s.target - s.position)
    }

    /// Largest `target - velocity` over the run, for velocity targets.
    pub fn largest_velocity_error(&self) -> Option<TrackingError> {
        self.largest_by(|s| s.target - s.velocity)
    }

    fn largest_by(&self, error: impl Fn(&Sample) -> f64) -> Option<TrackingError> {
        self.samples
            .iter()
            .enumerate()
            .map(|(tick, s)| TrackingError {
                tick,
                time: s.time,
                error: error(s),
            })
            .fold(None, |best: Option<TrackingError>, candidate| match best {
                Some(b) if !(candidate.error > b.error) => Some(b),
                _ => Some(candidate),
            })
    }
}
