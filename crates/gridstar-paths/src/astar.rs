//! A* best-first search over any [`SearchProblem`].
//!
//! The frontier is a [`MinHeap`] of search nodes keyed by `g + h`. A state
//! is expanded at most once: the reached set records membership only, so a
//! state popped again later (even through a cheaper path) is skipped as a
//! stale entry. That is sound as long as the heuristic is consistent.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::time::{Duration, Instant};

use gridstar_core::Cost;

use crate::queue::MinHeap;
use crate::traits::SearchProblem;

/// What a visualization callback is told about a state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The state is being expanded.
    Expanding,
    /// The state was just pushed onto the frontier as a successor.
    Considering,
    /// The state lies on the final path (endpoints excluded).
    Path,
}

/// How a search ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    /// The goal was popped from the frontier.
    Found,
    /// The frontier ran dry: no path exists.
    Exhausted,
    /// The caller's cancellation check fired.
    Cancelled,
}

/// The outcome of a search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<S> {
    /// The path found, empty unless `status` is [`SearchStatus::Found`].
    pub path: Vec<S>,
    /// Cost of the path found, `0` otherwise.
    pub cost: Cost,
    /// Number of states expanded.
    pub expanded: usize,
    pub status: SearchStatus,
}

impl<S> SearchResult<S> {
    #[inline]
    pub fn is_found(&self) -> bool {
        self.status == SearchStatus::Found
    }
}

/// One iteration of the search loop, as reported by [`AStar::step`].
#[derive(Clone, Debug, PartialEq)]
pub enum Step<S> {
    /// `state` was expanded and `considered` pushed onto the frontier, in
    /// successor order.
    Expanded { state: S, considered: Vec<S> },
    /// A stale frontier entry for an already expanded state was dropped.
    Skipped(S),
    /// The search is over. Further calls keep returning the same result.
    Done(SearchResult<S>),
}

/// Budget for [`AStar::search_limited`] and [`AStar::search_visualize_limited`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchLimits {
    /// Cancel once this many states have been expanded.
    pub max_expansions: Option<usize>,
    /// Cancel once this much wall-clock time has elapsed.
    pub timeout: Option<Duration>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = Some(max);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Start the clock and return the matching cancel check.
    fn start(self) -> impl FnMut(usize) -> bool {
        let deadline = self.timeout.map(|t| Instant::now() + t);
        move |expanded| {
            self.max_expansions.is_some_and(|max| expanded >= max)
                || deadline.is_some_and(|d| Instant::now() >= d)
        }
    }
}

// ---------------------------------------------------------------------------
// Search node
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct SearchNode<S> {
    state: S,
    /// Start to `state`, both inclusive.
    path: Vec<S>,
    g: Cost,
    h: Cost,
}

impl<S> SearchNode<S> {
    #[inline]
    fn f(&self) -> Cost {
        self.g + self.h
    }
}

fn by_estimate<S>(a: &SearchNode<S>, b: &SearchNode<S>) -> Ordering {
    a.f().total_cmp(&b.f())
}

type Frontier<S> = MinHeap<SearchNode<S>, fn(&SearchNode<S>, &SearchNode<S>) -> Ordering>;

// ---------------------------------------------------------------------------
// AStar
// ---------------------------------------------------------------------------

/// A single-use A* search over a borrowed problem.
///
/// The terminal methods ([`search`](Self::search) and friends) consume the
/// engine; searching again needs a fresh one.
pub struct AStar<'p, P: SearchProblem> {
    problem: &'p P,
    heuristic: Box<dyn Fn(P::State) -> Cost + 'p>,
    frontier: Frontier<P::State>,
    reached: HashSet<P::State>,
    expanded: usize,
    outcome: Option<SearchResult<P::State>>,
    succ_buf: Vec<P::State>,
}

impl<'p, P: SearchProblem> AStar<'p, P> {
    /// An engine guided by the problem's own [`SearchProblem::heuristic`].
    pub fn new(problem: &'p P) -> Self {
        Self::with_heuristic(problem, move |s| problem.heuristic(s))
    }

    /// An engine guided by an arbitrary heuristic.
    pub fn with_heuristic(problem: &'p P, heuristic: impl Fn(P::State) -> Cost + 'p) -> Self {
        let start = problem.start();
        let h = heuristic(start);
        let compare: fn(&SearchNode<P::State>, &SearchNode<P::State>) -> Ordering = by_estimate;
        let mut frontier: Frontier<P::State> = MinHeap::new(compare);
        frontier.put(SearchNode {
            state: start,
            path: vec![start],
            g: 0.0,
            h,
        });
        Self {
            problem,
            heuristic: Box::new(heuristic),
            frontier,
            reached: HashSet::new(),
            expanded: 0,
            outcome: None,
            succ_buf: Vec::with_capacity(4),
        }
    }

    /// Number of states expanded so far.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Number of entries waiting on the frontier, stale ones included.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Whether `state` has been expanded.
    #[inline]
    pub fn is_reached(&self, state: P::State) -> bool {
        self.reached.contains(&state)
    }

    /// Run one iteration of the search loop.
    pub fn step(&mut self) -> Step<P::State> {
        if let Some(result) = &self.outcome {
            return Step::Done(result.clone());
        }

        let Some(node) = self.frontier.get() else {
            return Step::Done(self.finish(Vec::new(), 0.0, SearchStatus::Exhausted));
        };

        if self.problem.is_goal(node.state) {
            return Step::Done(self.finish(node.path, node.g, SearchStatus::Found));
        }

        if !self.reached.insert(node.state) {
            return Step::Skipped(node.state);
        }
        self.expanded += 1;
        log::trace!("expanding {:?} (g={}, h={})", node.state, node.g, node.h);

        let mut successors = std::mem::take(&mut self.succ_buf);
        successors.clear();
        self.problem.successors(node.state, &mut successors);

        let mut considered = Vec::with_capacity(successors.len());
        for &succ in successors.iter() {
            if self.reached.contains(&succ) {
                continue;
            }
            let mut path = Vec::with_capacity(node.path.len() + 1);
            path.extend_from_slice(&node.path);
            path.push(succ);
            let g = self.problem.path_cost(&path);
            let h = (self.heuristic)(succ);
            self.frontier.put(SearchNode {
                state: succ,
                path,
                g,
                h,
            });
            considered.push(succ);
        }

        self.succ_buf = successors;
        Step::Expanded {
            state: node.state,
            considered,
        }
    }

    fn finish(
        &mut self,
        path: Vec<P::State>,
        cost: Cost,
        status: SearchStatus,
    ) -> SearchResult<P::State> {
        log::debug!(
            "search {:?}: {} states on path, {} expanded",
            status,
            path.len(),
            self.expanded
        );
        let result = SearchResult {
            path,
            cost,
            expanded: self.expanded,
            status,
        };
        self.outcome = Some(result.clone());
        result
    }

    /// Search to completion. The path includes both start and goal.
    pub fn search(mut self) -> SearchResult<P::State> {
        log::debug!(
            "searching {:?} -> {:?}",
            self.problem.start(),
            self.problem.goal()
        );
        loop {
            if let Step::Done(result) = self.step() {
                return result;
            }
        }
    }

    /// Search, asking `cancel` before every iteration whether to give up.
    ///
    /// `cancel` receives the number of states expanded so far. A cancelled
    /// search returns an empty path with [`SearchStatus::Cancelled`].
    pub fn search_until(mut self, mut cancel: impl FnMut(usize) -> bool) -> SearchResult<P::State> {
        log::debug!(
            "searching {:?} -> {:?} (cancellable)",
            self.problem.start(),
            self.problem.goal()
        );
        loop {
            if self.outcome.is_none() && cancel(self.expanded) {
                return self.finish(Vec::new(), 0.0, SearchStatus::Cancelled);
            }
            if let Step::Done(result) = self.step() {
                return result;
            }
        }
    }

    /// Search within an expansion and/or time budget.
    pub fn search_limited(self, limits: SearchLimits) -> SearchResult<P::State> {
        self.search_until(limits.start())
    }

    /// Search while reporting progress to `visit`.
    ///
    /// `visit` sees [`Phase::Expanding`] for each expanded state,
    /// [`Phase::Considering`] for each successor pushed onto the frontier,
    /// then [`Phase::Path`] for each interior state of the path found, in
    /// path order. The returned path holds only those interior states:
    /// start and goal are stripped, exactly as visualized.
    pub fn search_visualize(self, visit: impl FnMut(P::State, Phase)) -> SearchResult<P::State> {
        self.search_visualize_until(|_| false, visit)
    }

    /// [`search_visualize`](Self::search_visualize) within an expansion
    /// and/or time budget.
    pub fn search_visualize_limited(
        self,
        limits: SearchLimits,
        visit: impl FnMut(P::State, Phase),
    ) -> SearchResult<P::State> {
        self.search_visualize_until(limits.start(), visit)
    }

    /// [`search_visualize`](Self::search_visualize) with the cancellation
    /// check of [`search_until`](Self::search_until). A cancelled search
    /// reports no [`Phase::Path`] states.
    pub fn search_visualize_until(
        mut self,
        mut cancel: impl FnMut(usize) -> bool,
        mut visit: impl FnMut(P::State, Phase),
    ) -> SearchResult<P::State> {
        loop {
            if self.outcome.is_none() && cancel(self.expanded) {
                return self.finish(Vec::new(), 0.0, SearchStatus::Cancelled);
            }
            match self.step() {
                Step::Expanded { state, considered } => {
                    visit(state, Phase::Expanding);
                    for succ in considered {
                        visit(succ, Phase::Considering);
                    }
                }
                Step::Skipped(_) => {}
                Step::Done(mut result) => {
                    if result.is_found() {
                        let interior = match result.path.len() {
                            0..=2 => Vec::new(),
                            n => result.path[1..n - 1].to_vec(),
                        };
                        for &p in interior.iter() {
                            visit(p, Phase::Path);
                        }
                        result.path = interior;
                    }
                    return result;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{GridProblem, Heuristic};
    use gridstar_core::{Grid, Point};

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&p| Point::from(p)).collect()
    }

    #[test]
    fn open_3x3() {
        let grid = Grid::new(3, 3).unwrap();
        let problem = GridProblem::new(&grid);
        assert_eq!(problem.heuristic(Point::new(0, 0)), 4.0);

        let result = AStar::new(&problem).search();
        assert!(result.is_found());
        assert_eq!(result.path.len(), 5);
        assert_eq!(result.cost, 4.0);
        assert_eq!(problem.path_cost(&result.path), 4.0);
        assert_eq!(result.path.first(), Some(&Point::new(0, 0)));
        assert_eq!(result.path.last(), Some(&Point::new(2, 2)));
    }

    #[test]
    fn tie_breaking_follows_successor_order() {
        let grid = Grid::new(3, 3).unwrap();
        let problem = GridProblem::new(&grid);
        let result = AStar::new(&problem).search();
        assert_eq!(result.path, pts(&[(0, 0), (1, 0), (1, 1), (1, 2), (2, 2)]));
        assert_eq!(result.expanded, 6);
    }

    #[test]
    fn blocked_center() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_walkable(Point::new(1, 1), false).unwrap();
        let problem = GridProblem::new(&grid);
        let result = AStar::new(&problem).search();
        assert!(result.is_found());
        assert_eq!(result.path.len(), 5);
        assert_eq!(result.cost, 4.0);
        assert!(!result.path.contains(&Point::new(1, 1)));
        for w in result.path.windows(2) {
            assert!(w[0].is_adjacent(w[1]));
        }
    }

    #[test]
    fn start_is_goal() {
        let grid = Grid::new(3, 3).unwrap();
        let problem =
            GridProblem::with_endpoints(&grid, Point::new(1, 1), Point::new(1, 1)).unwrap();
        let result = AStar::new(&problem).search();
        assert_eq!(result.status, SearchStatus::Found);
        assert_eq!(result.path, vec![Point::new(1, 1)]);
        assert_eq!(result.cost, 0.0);
        assert_eq!(result.expanded, 0);

        let visual = AStar::new(&problem).search_visualize(|_, _| {});
        assert!(visual.is_found());
        assert!(visual.path.is_empty());
    }

    #[test]
    fn walled_off_goal_expands_reachable_region() {
        let grid: Grid = "
            ..#.
            ..#.
            ..#.
        "
        .parse()
        .unwrap();
        let problem =
            GridProblem::with_endpoints(&grid, Point::new(0, 0), Point::new(3, 0)).unwrap();
        let result = AStar::new(&problem).search();
        assert_eq!(result.status, SearchStatus::Exhausted);
        assert!(result.path.is_empty());
        assert_eq!(result.cost, 0.0);
        assert_eq!(result.expanded, 6);
    }

    #[test]
    fn prefers_cheap_detour_over_expensive_cell() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set_walk_cost(Point::new(1, 0), 10.0).unwrap();
        let problem =
            GridProblem::with_endpoints(&grid, Point::new(0, 0), Point::new(2, 0)).unwrap();
        let result = AStar::new(&problem).search();
        assert_eq!(result.path, pts(&[(0, 0), (0, 1), (1, 1), (2, 1), (2, 0)]));
        assert_eq!(result.cost, 4.0);
    }

    #[test]
    fn fresh_engines_agree() {
        let grid: Grid = "
            .....
            .##..
            ...#.
            .#...
        "
        .parse()
        .unwrap();
        let problem = GridProblem::new(&grid);
        let a = AStar::new(&problem).search();
        let b = AStar::new(&problem).search();
        assert_eq!(a, b);
        assert!(a.is_found());
    }

    #[test]
    fn all_heuristics_find_optimal_cost() {
        let grid: Grid = "
            ......
            .####.
            ......
            ####..
            ......
        "
        .parse()
        .unwrap();
        let mut costs = Vec::new();
        let mut expansions = Vec::new();
        for h in [Heuristic::Manhattan, Heuristic::Euclidean, Heuristic::Null] {
            let problem = GridProblem::new(&grid).with_heuristic(h);
            let result = AStar::new(&problem).search();
            assert!(result.is_found());
            costs.push(result.cost);
            expansions.push(result.expanded);
        }
        assert!(costs.iter().all(|&c| c == costs[0]));
        // Uniform-cost search never expands fewer states than Manhattan A*.
        assert!(expansions[2] >= expansions[0]);
    }

    #[test]
    fn custom_heuristic_closure() {
        let grid = Grid::new(4, 4).unwrap();
        let problem = GridProblem::new(&grid);
        let calls = std::cell::Cell::new(0usize);
        let result = AStar::with_heuristic(&problem, |_| {
            calls.set(calls.get() + 1);
            0.0
        })
        .search();
        assert!(result.is_found());
        assert_eq!(result.cost, 6.0);
        assert!(calls.get() > 0);
    }

    #[test]
    fn step_reports_each_iteration() {
        let grid = Grid::new(3, 3).unwrap();
        let problem = GridProblem::new(&grid);
        let mut astar = AStar::new(&problem);
        assert_eq!(astar.frontier_len(), 1);

        assert_eq!(
            astar.step(),
            Step::Expanded {
                state: Point::new(0, 0),
                considered: pts(&[(1, 0), (0, 1)]),
            }
        );
        assert_eq!(astar.expanded(), 1);
        assert!(astar.is_reached(Point::new(0, 0)));
        assert_eq!(astar.frontier_len(), 2);

        let mut skipped = 0;
        let result = loop {
            match astar.step() {
                Step::Expanded { .. } => {}
                Step::Skipped(p) => {
                    assert!(astar.is_reached(p));
                    skipped += 1;
                }
                Step::Done(result) => break result,
            }
        };
        assert_eq!(skipped, 1);
        assert!(result.is_found());
        // Done is sticky.
        assert_eq!(astar.step(), Step::Done(result));
    }

    #[test]
    fn visualize_reports_phases() {
        let grid = Grid::new(3, 3).unwrap();
        let problem = GridProblem::new(&grid);
        let mut expanding = Vec::new();
        let mut considering = 0;
        let mut path = Vec::new();
        let result = AStar::new(&problem).search_visualize(|p, phase| match phase {
            Phase::Expanding => expanding.push(p),
            Phase::Considering => considering += 1,
            Phase::Path => path.push(p),
        });
        assert_eq!(
            expanding,
            pts(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)])
        );
        assert_eq!(considering, 10);
        assert_eq!(path, pts(&[(1, 0), (1, 1), (1, 2)]));
        assert_eq!(result.path, path);
        assert_eq!(result.expanded, 6);
        assert_eq!(result.cost, 4.0);
    }

    #[test]
    fn visualize_matches_plain_search() {
        let grid: Grid = "
            ....
            .#..
            .#.#
            ....
        "
        .parse()
        .unwrap();
        let problem = GridProblem::new(&grid);
        let plain = AStar::new(&problem).search();
        let visual = AStar::new(&problem).search_visualize(|_, _| {});
        assert_eq!(visual.expanded, plain.expanded);
        assert_eq!(visual.path, plain.path[1..plain.path.len() - 1]);
    }

    #[test]
    fn cancel_before_first_pop() {
        let grid = Grid::new(5, 5).unwrap();
        let problem = GridProblem::new(&grid);
        let result = AStar::new(&problem).search_until(|_| true);
        assert_eq!(result.status, SearchStatus::Cancelled);
        assert!(result.path.is_empty());
        assert_eq!(result.expanded, 0);
    }

    #[test]
    fn expansion_budget() {
        let grid = Grid::new(10, 10).unwrap();
        let problem = GridProblem::new(&grid);
        let result =
            AStar::new(&problem).search_limited(SearchLimits::unlimited().with_max_expansions(3));
        assert_eq!(result.status, SearchStatus::Cancelled);
        assert_eq!(result.expanded, 3);

        let result = AStar::new(&problem).search_limited(SearchLimits::unlimited());
        assert!(result.is_found());
        assert_eq!(result.path.len(), 19);
    }

    #[test]
    fn zero_timeout_cancels() {
        let grid = Grid::new(10, 10).unwrap();
        let problem = GridProblem::new(&grid);
        let result = AStar::new(&problem)
            .search_limited(SearchLimits::default().with_timeout(Duration::ZERO));
        assert_eq!(result.status, SearchStatus::Cancelled);
    }

    #[test]
    fn visualize_respects_expansion_budget() {
        let grid = Grid::new(12, 8).unwrap();
        let problem = GridProblem::new(&grid);
        let mut expanding = 0;
        let mut path_cells = 0;
        let result = AStar::new(&problem).search_visualize_limited(
            SearchLimits::unlimited().with_max_expansions(2),
            |_, phase| match phase {
                Phase::Expanding => expanding += 1,
                Phase::Path => path_cells += 1,
                Phase::Considering => {}
            },
        );
        assert_eq!(result.status, SearchStatus::Cancelled);
        assert!(result.path.is_empty());
        assert_eq!(result.expanded, 2);
        assert_eq!(expanding, 2);
        assert_eq!(path_cells, 0);
    }

    #[test]
    fn visualize_cancel_before_first_pop() {
        let grid = Grid::new(3, 3).unwrap();
        let problem = GridProblem::new(&grid);
        let mut calls = 0;
        let result = AStar::new(&problem).search_visualize_until(|_| true, |_, _| calls += 1);
        assert_eq!(result.status, SearchStatus::Cancelled);
        assert_eq!(result.expanded, 0);
        assert_eq!(calls, 0);
    }

    #[test]
    fn unlimited_visualize_matches_search_visualize() {
        let grid = Grid::new(6, 6).unwrap();
        let problem = GridProblem::new(&grid);
        let plain = AStar::new(&problem).search_visualize(|_, _| {});
        let limited =
            AStar::new(&problem).search_visualize_limited(SearchLimits::unlimited(), |_, _| {});
        assert_eq!(plain, limited);
        assert!(limited.is_found());
    }

    /// A non-grid problem: integers on a line, stepping by +1 or *2.
    struct Doubling {
        target: u32,
    }

    impl SearchProblem for Doubling {
        type State = u32;

        fn start(&self) -> u32 {
            1
        }

        fn goal(&self) -> u32 {
            self.target
        }

        fn successors(&self, state: u32, buf: &mut Vec<u32>) {
            for next in [state + 1, state * 2] {
                if next <= self.target {
                    buf.push(next);
                }
            }
        }

        fn path_cost(&self, path: &[u32]) -> Cost {
            path.len().saturating_sub(1) as Cost
        }

        fn heuristic(&self, _state: u32) -> Cost {
            0.0
        }
    }

    #[test]
    fn generic_over_problem() {
        let problem = Doubling { target: 10 };
        let result = AStar::new(&problem).search();
        assert!(result.is_found());
        // 1 -> 2 -> 4 -> 5 -> 10
        assert_eq!(result.cost, 4.0);
        assert_eq!(result.path.first(), Some(&1));
        assert_eq!(result.path.last(), Some(&10));
    }
}
