use std::time::Instant;

/// Progress of the enrichment run the session is waiting on
#[derive(Clone, Debug, Default)]
pub struct RunStatus {
    pub words: usize,
    pub total_batches: usize,
    pub completed_batches: usize,
    pub started: Option<Instant>,
}

impl RunStatus {
    pub fn start(words: usize, total_batches: usize) -> Self {
        Self {
            words,
            total_batches,
            completed_batches: 0,
            started: Some(Instant::now()),
        }
    }

    /// Ignores stale or out-of-order updates
    pub fn advance(&mut self, completed: usize, total: usize) -> bool {
        if total != self.total_batches || completed <= self.completed_batches {
            return false;
        }
        self.completed_batches = completed;
        true
    }

    pub fn progress_bar(&self, width: usize) -> String {
        let filled = if self.total_batches == 0 {
            width
        } else {
            self.completed_batches * width / self.total_batches
        };
        format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.started
            .map(|s| s.elapsed().as_secs_f64())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        let mut status = RunStatus::start(40, 4);
        assert_eq!(status.progress_bar(8), "[--------]");
        assert!(status.advance(1, 4));
        assert_eq!(status.progress_bar(8), "[##------]");
        assert!(status.advance(4, 4));
        assert_eq!(status.progress_bar(8), "[########]");
    }

    #[test]
    fn test_stale_updates_ignored() {
        let mut status = RunStatus::start(10, 2);
        assert!(status.advance(2, 2));
        assert!(!status.advance(1, 2));
        assert!(!status.advance(3, 5));
        assert_eq!(status.completed_batches, 2);
    }
}
