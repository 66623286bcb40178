use crate::core::error::BlogError;
use crate::core::state::BlogState;
use crate::core::sync_impl::node::{DEFAULT_ACTION, Node};
use crate::core::telemetry::{Telemetry, TraceEntry};

/// Orchestrates a chain of nodes over one [`BlogState`].
///
/// Starting at `start`, each node runs, its update is merged, and the flow
/// follows the successor registered for the action it returned (`"default"`
/// when it returned none). The run ends at the first node without a matching
/// successor.
#[derive(Clone)]
pub struct Flow {
    start: Node,
}

impl Flow {
    pub fn new(start: Node) -> Flow {
        Flow { start }
    }

    /// Runs the flow to completion and returns the last action taken.
    pub fn run(&self, state: &mut BlogState) -> Result<String, BlogError> {
        self.run_with_telemetry(state, None)
    }

    /// Runs the flow, recording one trace entry per executed node.
    pub fn run_with_telemetry(
        &self,
        state: &mut BlogState,
        telemetry: Option<&dyn Telemetry>,
    ) -> Result<String, BlogError> {
        let run_id = uuid::Uuid::new_v4().to_string();
        let mut current = Some(&self.start);
        let mut last_action = DEFAULT_ACTION.to_string();

        log::debug!("Flow run {} starting at '{}'", run_id, self.start.name());

        while let Some(node) = current {
            let (update, action) = match node.run_traced(state) {
                Ok(outcome) => outcome,
                Err(err) => {
                    log::error!("Flow run {} aborted in '{}': {}", run_id, node.name(), err);
                    return Err(err);
                }
            };
            last_action = action.unwrap_or_else(|| DEFAULT_ACTION.to_string());

            if let Some(t) = telemetry {
                t.record(TraceEntry::new(&run_id, node.name(), &last_action, update));
            }

            current = node.successor(&last_action);
            match current {
                Some(next) => log::info!(
                    "Flow run {}: '{}' -[{}]-> '{}'",
                    run_id,
                    node.name(),
                    last_action,
                    next.name()
                ),
                None => log::info!(
                    "Flow run {} finished after '{}' with action '{}'",
                    run_id,
                    node.name(),
                    last_action
                ),
            }
        }

        if let Some(t) = telemetry {
            t.flush();
        }
        Ok(last_action)
    }
}
