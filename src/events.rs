// Events that flow from background analysis tasks to the UI loop
//
// Each dispatched request runs in its own task and reports back exactly once
// over an mpsc channel. The UI loop applies these one at a time, so all state
// changes still happen on a single logical thread.

use crate::analyzer::AnalysisResult;
use std::time::Duration;

/// Message from a dispatch task to the UI
#[derive(Debug, Clone)]
pub enum AnalysisEvent {
    /// A request settled (success or failure)
    Settled {
        /// Generation the request was issued with
        generation: u64,
        result: AnalysisResult,
        /// Time from dispatch to settlement
        elapsed: Duration,
    },
}
