//! Read route through the backing buffer.

use std::collections::VecDeque;

/// First offset a record may occupy; offset 0 is the null index.
pub(crate) const LEFT_MARGIN: usize = 1;

/// Where the read cursor continues once it reaches the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Jump {
    /// End of the run being left.
    pub(crate) at: usize,
    /// Start of the next run.
    pub(crate) to: usize,
}

/// Runs of live records in FIFO order.
///
/// The first run starts at `head` and ends at the first jump's `at`. Each
/// jump starts the next run at its `to`. The last run ends at `tail`. Runs
/// never overlap.
#[derive(Debug, Clone, Default)]
pub(crate) struct Route {
    jumps: VecDeque<Jump>,
}

impl Route {
    pub(crate) fn is_empty(&self) -> bool {
        self.jumps.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.jumps.len()
    }

    pub(crate) fn clear(&mut self) {
        self.jumps.clear();
    }

    /// End the newest run at `at` and start another at `to`.
    pub(crate) fn push(&mut self, at: usize, to: usize) {
        self.jumps.push_back(Jump { at, to });
    }

    pub(crate) fn last(&self) -> Option<Jump> {
        self.jumps.back().copied()
    }

    /// Position of the record that follows one ending at `next`, given that
    /// the first `taken` jumps were already followed.
    ///
    /// Returns the position and the updated number of jumps taken.
    pub(crate) fn advance(&self, mut next: usize, mut taken: usize) -> (usize, usize) {
        while let Some(jump) = self.jumps.get(taken) {
            if next != jump.at {
                break;
            }
            next = jump.to;
            taken += 1;
        }
        (next, taken)
    }

    /// Forget jumps the reader has followed.
    pub(crate) fn discard(&mut self, taken: usize) {
        for _ in 0..taken {
            self.jumps.pop_front();
        }
    }

    /// Lowest offset holding a live record, counting the run at `head` and
    /// the first `runs` jump targets.
    pub(crate) fn lowest_start(&self, head: usize, runs: usize) -> usize {
        self.jumps
            .iter()
            .take(runs)
            .map(|jump| jump.to)
            .fold(head, usize::min)
    }

    /// Whether some run still ahead of the reader starts at the left margin.
    pub(crate) fn crosses_end(&self) -> bool {
        self.jumps.iter().any(|jump| jump.to == LEFT_MARGIN)
    }
}
