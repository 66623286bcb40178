use crate::core::error::BlogError;
use crate::core::state::{BlogState, StateUpdate};
use std::collections::HashMap;

/// Action followed when a node does not name one.
pub const DEFAULT_ACTION: &str = "default";

/// A node in a workflow graph.
pub struct Node {
    /// Outgoing edges of this node
    pub data: NodeCore,
    /// The logic implementation that defines the node's behavior
    pub behaviour: Box<dyn NodeLogic>,
}

impl Clone for Node {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            behaviour: self.behaviour.clone_box(),
        }
    }
}

impl Node {
    /// Creates a new node with the given logic.
    pub fn new<L: NodeLogic>(behaviour: L) -> Self {
        Node {
            data: NodeCore::default(),
            behaviour: Box::new(behaviour),
        }
    }

    pub fn name(&self) -> &str {
        self.behaviour.name()
    }

    /// Chains another node to execute after this node via the "default" action.
    pub fn next(self, node: Node) -> Self {
        self.next_on(DEFAULT_ACTION, node)
    }

    /// Chains another node to execute after this node when the specified action is returned.
    pub fn next_on(mut self, action: &str, node: Node) -> Self {
        if self.data.successors.contains_key(action) {
            log::warn!(
                "Node '{}' already has a successor for action '{}', overwriting it",
                self.name(),
                action
            );
        }
        self.data.successors.insert(action.to_string(), node);
        self
    }

    /// The node reached by `action`, if any.
    pub fn successor(&self, action: &str) -> Option<&Node> {
        self.data.successors.get(action)
    }

    /// Executes the node against `state` and returns the action it chose.
    pub fn run(&self, state: &mut BlogState) -> Result<Option<String>, BlogError> {
        self.run_traced(state).map(|(_, action)| action)
    }

    /// Same as [`Node::run`] but also hands back the update that was merged.
    pub(crate) fn run_traced(
        &self,
        state: &mut BlogState,
    ) -> Result<(StateUpdate, Option<String>), BlogError> {
        let snapshot = self.behaviour.prep(state);
        let update = self.behaviour.exec(snapshot)?;
        let action = self.behaviour.post(state, update.clone());
        Ok((update, action))
    }
}

/// Internal data structure for a node.
#[derive(Default, Clone)]
pub struct NodeCore {
    /// Mapping from action strings to successor nodes
    pub successors: HashMap<String, Node>,
}

/// Defines the behavior of a workflow node.
///
/// `prep` takes a snapshot of the state, `exec` computes an update from that
/// snapshot without touching the live state, and `post` merges the update and
/// picks the outgoing action. A failing `exec` leaves the state as it was.
pub trait NodeLogic: Send + Sync + 'static {
    /// Step name used in logs and traces.
    fn name(&self) -> &str;

    /// Prepare the input snapshot for execution.
    fn prep(&self, state: &BlogState) -> BlogState {
        state.clone()
    }

    /// Execute the core logic of the node.
    fn exec(&self, input: BlogState) -> Result<StateUpdate, BlogError>;

    /// Merge the update into the shared state and choose the next action.
    fn post(&self, state: &mut BlogState, update: StateUpdate) -> Option<String> {
        state.merge(update);
        None
    }

    /// Create a boxed clone of this trait object.
    fn clone_box(&self) -> Box<dyn NodeLogic>;
}

impl Clone for Box<dyn NodeLogic> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
