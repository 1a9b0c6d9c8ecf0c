//! Algorithm X as an explicit, externally paced state machine.
//!
//! The recursive procedure
//!
//! ```text
//! search():
//!     if no column is active: report the partial solution; return
//!     c = select_column(); cover(c)
//!     for r in rows of c (top to bottom):
//!         push r; cover every other column of r (left to right)
//!         search()
//!         pop r; uncover those columns (right to left)
//!     uncover(c)
//! ```
//!
//! is unrolled into a stack of frames, one per recursion level. Each call
//! to [`ExactCoverSearch::advance`] moves the top frame forward until it has
//! performed one primitive, so the driver can stop and look at the structure
//! between any two primitives.

use log::{debug, trace};

use super::event::StepEvent;
use super::node::{ColumnId, RowId};
use super::structure::{DancingLinks, ROOT};
use super::{SearchConfig, SearchStats, StepMode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Report a solution or pick a column.
    Enter,
    /// Cover the picked column.
    CoverColumn,
    /// Push the row at `row`, or finish when back at the header.
    NextRow,
    /// Cover the column under `cursor`, walking right.
    CoverRow,
    /// The nested level is done; pop the row.
    Backtrack,
    /// Uncover the column under `cursor`, walking left.
    UncoverRow,
    /// Uncover the picked column and leave this level.
    UncoverColumn,
}

/// One level of the recursion.
#[derive(Clone, Copy, Debug)]
struct Frame {
    /// Header of the column branched on.
    column: usize,
    /// Cell of the row currently tried.
    row: usize,
    /// Cell being visited inside that row.
    cursor: usize,
    phase: Phase,
}

impl Frame {
    fn enter() -> Self {
        Frame {
            column: ROOT,
            row: ROOT,
            cursor: ROOT,
            phase: Phase::Enter,
        }
    }
}

/// An exhaustive exact cover search over a [`DancingLinks`] structure.
///
/// The search owns the structure and mutates it in place. Running it to
/// exhaustion leaves the structure exactly as it was built.
///
/// # Example
/// ```
/// use dlx_stepper::dancing_links::{DancingLinks, ExactCoverSearch, SearchConfig, StepEvent, StepMode};
///
/// let links = DancingLinks::new(&[vec![true, true]]).unwrap();
/// let config = SearchConfig { mode: StepMode::Step, ..SearchConfig::default() };
/// let events: Vec<StepEvent> = ExactCoverSearch::new(links, config).collect();
/// assert_eq!(
///     events,
///     vec![
///         StepEvent::ColumnPicked(0),
///         StepEvent::ColumnCovered(0),
///         StepEvent::RowPicked(0),
///         StepEvent::ColumnCovered(1),
///         StepEvent::SolutionFound(vec![0]),
///         StepEvent::ColumnUncovered(1),
///         StepEvent::ColumnUncovered(0),
///     ]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct ExactCoverSearch {
    links: DancingLinks,
    config: SearchConfig,
    frames: Vec<Frame>,
    solution: Vec<RowId>,
    last_event: Option<StepEvent>,
    current_column: Option<ColumnId>,
    current_row: Option<RowId>,
    /// Recursion level that produced the most recent primitive.
    event_depth: usize,
    stats: SearchStats,
}

impl ExactCoverSearch {
    /// Starts a search over `links`; no primitive runs until the first
    /// [`advance`](Self::advance).
    pub fn new(links: DancingLinks, config: SearchConfig) -> Self {
        ExactCoverSearch {
            links,
            config,
            frames: vec![Frame::enter()],
            solution: Vec::new(),
            last_event: None,
            current_column: None,
            current_row: None,
            event_depth: 0,
            stats: SearchStats::default(),
        }
    }

    /// Moves the search forward.
    ///
    /// In [`StepMode::Step`] exactly one primitive runs and its event is
    /// returned. In [`StepMode::Run`] primitives run until the next solution.
    /// Returns `None` once every branch has been explored, or once
    /// `max_solutions` solutions have been reported.
    pub fn advance(&mut self) -> Option<StepEvent> {
        if self.limit_reached() {
            return None;
        }
        let event = match self.config.mode {
            StepMode::Step => self.next_primitive(),
            StepMode::Run => loop {
                match self.next_primitive() {
                    Some(event) if event.is_solution() => break Some(event),
                    Some(_) => continue,
                    None => break None,
                }
            },
        };
        if let Some(event) = &event {
            self.last_event = Some(event.clone());
        }
        event
    }

    /// Iterator over the solutions only, in the order they are found.
    pub fn solutions(self) -> impl Iterator<Item = Vec<RowId>> {
        self.filter_map(|event| match event {
            StepEvent::SolutionFound(rows) => Some(rows),
            _ => None,
        })
    }

    /// The structure in its current, possibly partially covered, state.
    pub fn links(&self) -> &DancingLinks {
        &self.links
    }

    /// Ends the search and returns the structure with every cover undone.
    pub fn into_links(mut self) -> DancingLinks {
        self.links.unwind();
        self.links
    }

    /// Rows currently committed, in the order they were picked.
    pub fn partial_solution(&self) -> &[RowId] {
        &self.solution
    }

    /// Active column ids in ring order.
    pub fn active_columns(&self) -> Vec<ColumnId> {
        self.links.active_columns()
    }

    /// The event returned by the most recent [`advance`](Self::advance).
    pub fn last_event(&self) -> Option<&StepEvent> {
        self.last_event.as_ref()
    }

    /// Label for the most recent event, e.g. `"Cover Column: 2"`. Empty
    /// before the first step.
    pub fn current_action(&self) -> String {
        self.last_event
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// The most recently picked column.
    pub fn current_column(&self) -> Option<ColumnId> {
        self.current_column
    }

    /// The most recently picked row.
    pub fn current_row(&self) -> Option<RowId> {
        self.current_row
    }

    /// Recursion level, starting at 1, of the level that performed the most
    /// recent primitive; 0 before the first step.
    pub fn event_depth(&self) -> usize {
        self.event_depth
    }

    /// Counts of the primitives performed so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// True once every branch has been explored.
    pub fn is_finished(&self) -> bool {
        self.frames.is_empty()
    }

    fn limit_reached(&self) -> bool {
        self.config
            .max_solutions
            .is_some_and(|max| self.stats.solutions >= max)
    }

    fn next_primitive(&mut self) -> Option<StepEvent> {
        let event = self.step()?;
        self.record(&event);
        Some(event)
    }

    fn record(&mut self, event: &StepEvent) {
        match event {
            StepEvent::ColumnPicked(c) => {
                self.stats.column_picks += 1;
                self.current_column = Some(*c);
            }
            StepEvent::RowPicked(r) => {
                self.stats.row_picks += 1;
                self.current_row = Some(*r);
            }
            StepEvent::ColumnCovered(_) => self.stats.covers += 1,
            StepEvent::ColumnUncovered(_) => self.stats.uncovers += 1,
            StepEvent::SolutionFound(rows) => {
                self.stats.solutions += 1;
                debug!("solution {}: rows {:?}", self.stats.solutions, rows);
            }
        }
        trace!("{event} (depth {})", self.event_depth);
    }

    /// Runs frame transitions until one of them performs a primitive.
    fn step(&mut self) -> Option<StepEvent> {
        loop {
            // Enter and UncoverColumn pop their own frame, so read it first
            let depth = self.frames.len();
            let frame = self.frames.last_mut()?;
            self.event_depth = depth;
            match frame.phase {
                Phase::Enter => {
                    if self.links.is_exhausted() {
                        self.frames.pop();
                        return Some(StepEvent::SolutionFound(self.solution.clone()));
                    }
                    frame.column = self.links.select_header();
                    frame.phase = Phase::CoverColumn;
                    return Some(StepEvent::ColumnPicked(frame.column - 1));
                }
                Phase::CoverColumn => {
                    self.links.cover_header(frame.column);
                    frame.row = self.links.down(frame.column);
                    frame.phase = Phase::NextRow;
                    return Some(StepEvent::ColumnCovered(frame.column - 1));
                }
                Phase::NextRow => {
                    if frame.row == frame.column {
                        frame.phase = Phase::UncoverColumn;
                        continue;
                    }
                    let row = self.links.row_of(frame.row);
                    self.solution.push(row);
                    frame.cursor = self.links.right(frame.row);
                    frame.phase = Phase::CoverRow;
                    return Some(StepEvent::RowPicked(row));
                }
                Phase::CoverRow => {
                    if frame.cursor == frame.row {
                        frame.phase = Phase::Backtrack;
                        self.frames.push(Frame::enter());
                        continue;
                    }
                    let header = self.links.header_of(frame.cursor);
                    self.links.cover_header(header);
                    frame.cursor = self.links.right(frame.cursor);
                    return Some(StepEvent::ColumnCovered(header - 1));
                }
                Phase::Backtrack => {
                    self.solution.pop();
                    frame.cursor = self.links.left(frame.row);
                    frame.phase = Phase::UncoverRow;
                }
                Phase::UncoverRow => {
                    if frame.cursor == frame.row {
                        frame.row = self.links.down(frame.row);
                        frame.phase = Phase::NextRow;
                        continue;
                    }
                    let header = self.links.header_of(frame.cursor);
                    self.links.uncover_header(header);
                    frame.cursor = self.links.left(frame.cursor);
                    return Some(StepEvent::ColumnUncovered(header - 1));
                }
                Phase::UncoverColumn => {
                    let header = frame.column;
                    self.frames.pop();
                    self.links.uncover_header(header);
                    return Some(StepEvent::ColumnUncovered(header - 1));
                }
            }
        }
    }
}

impl Iterator for ExactCoverSearch {
    type Item = StepEvent;

    fn next(&mut self) -> Option<StepEvent> {
        self.advance()
    }
}
