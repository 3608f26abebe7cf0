use std::fmt::Debug;
use std::hash::Hash;

use gridstar_core::Cost;

/// A search problem the [`AStar`](crate::AStar) engine can solve.
///
/// Every method is pure with respect to search state: the engine may call
/// them any number of times in any order.
pub trait SearchProblem {
    /// A node of the search graph (a grid position for [`GridProblem`](crate::GridProblem)).
    type State: Copy + Eq + Hash + Debug;

    fn start(&self) -> Self::State;

    fn goal(&self) -> Self::State;

    /// Whether `state` is the goal.
    fn is_goal(&self, state: Self::State) -> bool {
        state == self.goal()
    }

    /// Append the states reachable in one step from `state` into `buf`.
    /// The caller clears `buf` before calling. The order is significant:
    /// it feeds frontier insertion order and therefore tie-breaking.
    fn successors(&self, state: Self::State, buf: &mut Vec<Self::State>);

    /// Total cost of walking `path` from its first state to its last.
    fn path_cost(&self, path: &[Self::State]) -> Cost;

    /// Estimated remaining cost from `state` to the goal.
    /// Must be admissible and consistent for A* to return optimal paths.
    fn heuristic(&self, state: Self::State) -> Cost;
}
