//! Per-trial node counters and the active set.

use crate::sample::Sample;

/// Transient state owned by a single trial and dropped when it ends.
///
/// Counters encode the node state: negative values are dormant, values in
/// `0..=infection_period` are infectious, larger values are removed.
#[derive(Debug)]
pub(crate) struct TrialState {
    counters: Vec<i64>,
    active: Vec<usize>,
    next: Vec<usize>,
    scheduled: Vec<bool>,
}

impl TrialState {
    /// Starts every node at `-latency_period` and the seeds at zero.
    pub(crate) fn seeded(node_count: usize, latency_period: u32, seeds: &[usize]) -> Self {
        let mut counters = vec![-i64::from(latency_period); node_count];
        let mut scheduled = vec![false; node_count];
        let mut active = Vec::with_capacity(seeds.len());
        for &seed in seeds {
            if let (Some(counter), Some(flag)) = (counters.get_mut(seed), scheduled.get_mut(seed)) {
                *counter = 0;
                if !*flag {
                    *flag = true;
                    active.push(seed);
                }
            }
        }
        active.sort_unstable();
        for &node in &active {
            if let Some(flag) = scheduled.get_mut(node) {
                *flag = false;
            }
        }
        Self {
            counters,
            active,
            next: Vec::new(),
            scheduled,
        }
    }

    pub(crate) fn counter(&self, node: usize) -> i64 {
        self.counters.get(node).copied().unwrap_or(i64::MAX)
    }

    pub(crate) fn increment(&mut self, node: usize) -> i64 {
        match self.counters.get_mut(node) {
            Some(counter) => {
                *counter = counter.saturating_add(1);
                *counter
            }
            None => i64::MAX,
        }
    }

    pub(crate) fn is_quiescent(&self) -> bool {
        self.active.is_empty()
    }

    /// Moves the current active set out for iteration.
    pub(crate) fn take_active(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.active)
    }

    /// Queues `node` for the next round, ignoring repeats.
    pub(crate) fn schedule(&mut self, node: usize) {
        if let Some(flag) = self.scheduled.get_mut(node) {
            if !*flag {
                *flag = true;
                self.next.push(node);
            }
        }
    }

    /// Promotes the queued nodes to the active set in ascending order.
    ///
    /// `drained` is the buffer returned by [`Self::take_active`]; it is
    /// recycled as the next queue.
    pub(crate) fn finish_round(&mut self, mut drained: Vec<usize>) {
        self.next.sort_unstable();
        for &node in &self.next {
            if let Some(flag) = self.scheduled.get_mut(node) {
                *flag = false;
            }
        }
        drained.clear();
        self.active = std::mem::replace(&mut self.next, drained);
    }

    pub(crate) fn counters(&self) -> &[i64] {
        &self.counters
    }

    /// Flags every node whose counter reached zero.
    pub(crate) fn into_sample(self) -> Sample {
        Sample::from_flags(self.counters.iter().map(|&counter| counter >= 0))
    }
}
