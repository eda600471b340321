//! Search configuration.

use std::time::{Duration, Instant};

/// Limits and variants for a single search.
///
/// The default is plain A*: no node budget, no deadline, no closed-set cap,
/// and closed vertices are never reopened.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchOptions {
    /// Stop after this many expansions.
    pub max_nodes: Option<usize>,
    /// Stop once this instant has passed. Checked once per step.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub deadline: Option<Instant>,
    /// Cap on closed-set size. When exceeded, the closed vertices with the
    /// highest g are evicted and may be expanded again if later reached by a
    /// strictly cheaper path. Per-vertex tables stay sized by the graph, so
    /// this bounds which vertices count as closed, not memory.
    pub max_closed: Option<usize>,
    /// Reopen a closed vertex when a strictly cheaper path to it is found.
    /// Restores optimality for admissible but inconsistent heuristics at the
    /// price of re-expansions.
    pub reopen_closed: bool,
}

impl SearchOptions {
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Deadline `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_max_closed(mut self, max_closed: usize) -> Self {
        self.max_closed = Some(max_closed);
        self
    }

    pub fn with_reopen_closed(mut self, reopen: bool) -> Self {
        self.reopen_closed = reopen;
        self
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn options_round_trip_without_deadline() {
        let o = SearchOptions::default()
            .with_max_nodes(7)
            .with_timeout(Duration::from_secs(1));
        let json = serde_json::to_string(&o).unwrap();
        let back: SearchOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back.max_nodes, Some(7));
        assert_eq!(back.deadline, None);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let back: SearchOptions = serde_json::from_str(r#"{"reopen_closed":true}"#).unwrap();
        assert!(back.reopen_closed);
        assert_eq!(back.max_nodes, None);
    }
}
