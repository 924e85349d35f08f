// Copyright (c) The knights-path Authors, 2026, licensed under the EUPL-1.2-or-later.

//! knights-path: the knight's path puzzle, formulated as a search problem.
//!
//! A single chess knight starts on one square of an N×N board and must reach a goal square using
//! only legal L-shaped moves. This library implements the _problem formulation_ only: the board
//! state, the legal-move generator, the transition function, the goal test and the distance
//! heuristics used by informed search. The search itself is left to the user, who drives the
//! formulation through [`KnightsPath`] (or the free functions [`actions`] and [`result`]).
//!
//! Every transition produces a new [`Board`]; the input board is never mutated, so successor
//! boards may be explored independently (and in parallel) by the search engine.

#![no_std]

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::error::Error;
use core::fmt::{Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::num::IntErrorKind;
use core::str::FromStr;
use log::{debug, trace};
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, Float, Unsigned, Zero};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

extern crate alloc;

/// Marker trait: specifies that a value may be used for board coordinates and sizes.
pub trait BoardValue:
    Ord
    + CheckedAdd
    + CheckedSub
    + CheckedMul
    + Copy
    + Into<usize>
    + TryFrom<usize>
    + Zero
    + Debug
    + Display
    + Unsigned
    + DeserializeOwned
    + Serialize
    + 'static
{
}

impl<V> BoardValue for V where
    V: Ord
        + CheckedAdd
        + CheckedSub
        + CheckedMul
        + Copy
        + Into<usize>
        + TryFrom<usize>
        + Zero
        + Debug
        + Display
        + Unsigned
        + DeserializeOwned
        + Serialize
        + 'static
{
}

/// The eight knight offsets `(dx, dy)`, in the order in which moves are generated.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Board sizes offered for interactive play.
pub const STANDARD_SIZES: [u8; 4] = [6, 8, 10, 12];

/// A distance metric between two locations.
#[derive(
    Copy, Clone, Debug, Default, Ord, PartialOrd, Eq, PartialEq, Hash, Deserialize, Serialize,
)]
pub enum Metric {
    /// `|dx| + |dy|`.
    #[default]
    Manhattan,
    /// `sqrt(dx² + dy²)`.
    Euclidean,
    /// `max(|dx|, |dy|)`, also known as the Chebyshev distance.
    Diagonal,
}

impl Metric {
    /// The lower-case name of the metric.
    pub const fn name(&self) -> &'static str {
        match self {
            Metric::Manhattan => "manhattan",
            Metric::Euclidean => "euclidean",
            Metric::Diagonal => "diagonal",
        }
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// An error returned when a metric name is not recognised.
#[derive(Debug)]
pub struct MetricParseError(String);

impl Display for MetricParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("unknown distance metric {:?}", self.0))
    }
}

impl Error for MetricParseError {}

impl FromStr for Metric {
    type Err = MetricParseError;

    /// Parses a metric name, ignoring surrounding whitespace and ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const NAMES: [(&str, Metric); 4] = [
            ("manhattan", Metric::Manhattan),
            ("euclidean", Metric::Euclidean),
            ("diagonal", Metric::Diagonal),
            ("chebyshev", Metric::Diagonal),
        ];
        let name = s.trim();
        NAMES
            .iter()
            .find(|(candidate, _)| name.eq_ignore_ascii_case(candidate))
            .map(|&(_, metric)| metric)
            .ok_or_else(|| MetricParseError(name.into()))
    }
}

/// A square of the board (eff., a coordinate pair). `x` grows left to right and `y` grows top to
/// bottom, both zero-based.
#[derive(
    Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Deserialize, Serialize,
)]
pub struct Location<V> {
    x: V,
    y: V,
}

impl<V> Location<V> {
    /// Create a location from its coordinates.
    pub const fn new(x: V, y: V) -> Self {
        Self { x, y }
    }

    /// The column of the location.
    pub fn x(&self) -> &V {
        &self.x
    }

    /// The row of the location.
    pub fn y(&self) -> &V {
        &self.y
    }
}

impl<V> From<(V, V)> for Location<V> {
    fn from((x, y): (V, V)) -> Self {
        Self { x, y }
    }
}

impl<V> Display for Location<V>
where
    V: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("({}, {})", self.x, self.y))
    }
}

fn shift<V>(value: V, by: i8) -> Option<V>
where
    V: BoardValue,
{
    let magnitude = V::try_from(usize::from(by.unsigned_abs())).ok()?;
    if by < 0 {
        value.checked_sub(&magnitude)
    } else {
        value.checked_add(&magnitude)
    }
}

fn abs_diff<V>(a: V, b: V) -> usize
where
    V: BoardValue,
{
    let (a, b): (usize, usize) = (a.into(), b.into());
    a.abs_diff(b)
}

impl<V> Location<V>
where
    V: BoardValue,
{
    /// The location `(dx, dy)` away from this one, or `None` if a coordinate would drop below
    /// zero or overflow `V`. The result is not checked against any board.
    pub fn offset(&self, dx: i8, dy: i8) -> Option<Self> {
        Some(Self {
            x: shift(self.x, dx)?,
            y: shift(self.y, dy)?,
        })
    }

    /// The distance between this location and `other` under the provided metric.
    ///
    /// For every metric, the distance is zero exactly when the two locations are equal.
    pub fn distance(&self, other: &Self, metric: Metric) -> f64 {
        let dx = abs_diff(self.x, other.x);
        let dy = abs_diff(self.y, other.y);
        match metric {
            Metric::Manhattan => dx as f64 + dy as f64,
            Metric::Euclidean => {
                let (dx, dy) = (dx as f64, dy as f64);
                Float::sqrt(dx * dx + dy * dy)
            }
            Metric::Diagonal => dx.max(dy) as f64,
        }
    }

    /// Whether a knight standing here could jump to `other` in a single move.
    pub fn is_knight_move(&self, other: &Self) -> bool {
        matches!(
            (abs_diff(self.x, other.x), abs_diff(self.y, other.y)),
            (1, 2) | (2, 1)
        )
    }

    /// The location encoded as a row-major index into a board of the provided size.
    pub fn as_index(&self, size: V) -> Option<usize> {
        if self.x >= size || self.y >= size {
            return None;
        }
        let x: usize = self.x.into();
        let y: usize = self.y.into();
        let side: usize = size.into();
        Some(y * side + x)
    }
}

/// A request to change the board: place the start or the goal, or move the knight.
///
/// Only [`Action::Move`] is produced by [`actions`]; the placements are used to set up a puzzle
/// before searching (see [`Board::apply`]).
#[derive(
    Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Deserialize, Serialize,
)]
pub enum Action<V> {
    /// Place the knight's starting square (the knight is placed there, too).
    PlaceStart(Location<V>),
    /// Place the goal square.
    PlaceGoal(Location<V>),
    /// Move the knight to the provided square.
    Move(Location<V>),
}

impl<V> Action<V> {
    /// The location the action refers to.
    pub fn location(&self) -> &Location<V> {
        match self {
            Action::PlaceStart(loc) | Action::PlaceGoal(loc) | Action::Move(loc) => loc,
        }
    }
}

impl<V> Display for Action<V>
where
    V: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Action::PlaceStart(loc) => f.write_fmt(format_args!("place start at {loc}")),
            Action::PlaceGoal(loc) => f.write_fmt(format_args!("place goal at {loc}")),
            Action::Move(loc) => f.write_fmt(format_args!("move knight to {loc}")),
        }
    }
}

/// An error associated with the creation of a board.
#[derive(Debug)]
pub struct SizeError(IntErrorKind);

impl Display for SizeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let reason = match self.0 {
            IntErrorKind::PosOverflow => "the board is too large",
            IntErrorKind::Zero => "the board has zero area",
            _ => unreachable!(),
        };
        f.write_fmt(format_args!("board size could not be used: {reason}"))
    }
}

impl Error for SizeError {}

/// A type of board error, associated with a [`BoardError`].
#[derive(Debug)]
pub enum BoardErrorType<V> {
    /// The provided location lies outside the board.
    OutOfBounds(Location<V>),
    /// The knight has not been placed yet.
    UnsetCurrent,
    /// The goal has not been placed yet.
    UnsetGoal,
}

/// An error which describes an operation the board could not perform.
#[derive(Debug)]
pub struct BoardError<V> {
    size: V,
    variant: BoardErrorType<V>,
}

impl<V> BoardError<V> {
    /// The kind of error.
    pub fn variant(&self) -> &BoardErrorType<V> {
        &self.variant
    }
}

impl<V> Display for BoardError<V>
where
    V: BoardValue,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let size = self.size;
        match &self.variant {
            BoardErrorType::OutOfBounds(loc) => f.write_fmt(format_args!(
                "location {loc} is outside the {size}x{size} board"
            )),
            BoardErrorType::UnsetCurrent => f.write_fmt(format_args!(
                "the knight has not been placed on the {size}x{size} board"
            )),
            BoardErrorType::UnsetGoal => f.write_fmt(format_args!(
                "no goal has been placed on the {size}x{size} board"
            )),
        }
    }
}

impl<V> Error for BoardError<V> where V: BoardValue {}

/// A snapshot of the puzzle: the knight's current square, where it started, where it must go,
/// and the squares it has occupied so far in chronological order.
///
/// Boards built with [`Board::new`] and manipulated through its methods only ever hold
/// locations inside the board; deserialization enforces the same.
///
/// Equality and hashing ignore [`Board::visited`]: two boards with the knight on the same square
/// are the same search state, however the knight got there.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(
    try_from = "RawBoard<V>",
    bound(deserialize = "V: BoardValue")
)]
pub struct Board<V> {
    size: V,
    current: Option<Location<V>>,
    start: Option<Location<V>>,
    goal: Option<Location<V>>,
    visited: Vec<Location<V>>,
}

impl<V> PartialEq for Board<V>
where
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self.current == other.current
            && self.start == other.start
            && self.goal == other.goal
    }
}

impl<V> Eq for Board<V> where V: Eq {}

impl<V> Hash for Board<V>
where
    V: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        self.current.hash(state);
        self.start.hash(state);
        self.goal.hash(state);
    }
}

/// A board as it appears in serialized form, before its invariants are checked.
#[derive(Deserialize)]
struct RawBoard<V> {
    size: V,
    current: Option<Location<V>>,
    start: Option<Location<V>>,
    goal: Option<Location<V>>,
    visited: Vec<Location<V>>,
}

/// An error which denotes that a serialized board breaks the board invariants.
#[derive(Debug)]
pub enum InvalidBoardError<V> {
    /// The board size could not be used.
    Size(SizeError),
    /// A stored location lies outside the board.
    Location(BoardError<V>),
}

impl<V> Display for InvalidBoardError<V>
where
    V: BoardValue,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            InvalidBoardError::Size(err) => f.write_fmt(format_args!("invalid board: {err}")),
            InvalidBoardError::Location(err) => f.write_fmt(format_args!("invalid board: {err}")),
        }
    }
}

impl<V> Error for InvalidBoardError<V> where V: BoardValue {}

impl<V> TryFrom<RawBoard<V>> for Board<V>
where
    V: BoardValue,
{
    type Error = InvalidBoardError<V>;

    fn try_from(raw: RawBoard<V>) -> Result<Self, Self::Error> {
        let mut board = Board::new(raw.size).map_err(InvalidBoardError::Size)?;
        let stored = raw
            .current
            .iter()
            .chain(&raw.start)
            .chain(&raw.goal)
            .chain(&raw.visited);
        for &loc in stored {
            board.checked(loc).map_err(InvalidBoardError::Location)?;
        }
        board.current = raw.current;
        board.start = raw.start;
        board.goal = raw.goal;
        board.visited = raw.visited;
        Ok(board)
    }
}

impl<V> Board<V> {
    /// The side length of the board.
    pub fn size(&self) -> &V {
        &self.size
    }

    /// Where the knight is now, if it has been placed.
    pub fn current(&self) -> Option<&Location<V>> {
        self.current.as_ref()
    }

    /// Where the knight started, if a start has been placed.
    pub fn start(&self) -> Option<&Location<V>> {
        self.start.as_ref()
    }

    /// The goal, if it has been placed.
    pub fn goal(&self) -> Option<&Location<V>> {
        self.goal.as_ref()
    }

    /// The squares occupied by the knight, oldest first.
    pub fn visited(&self) -> &[Location<V>] {
        &self.visited
    }

    /// Each consecutive `(from, to)` step taken along [`Board::visited`].
    pub fn path(&self) -> impl Iterator<Item = (&Location<V>, &Location<V>)> + '_ {
        self.visited.windows(2).map(|step| (&step[0], &step[1]))
    }
}

impl<V> Board<V>
where
    V: BoardValue,
{
    /// Produce an empty board (nothing placed) with the provided side length.
    pub fn new(size: V) -> Result<Self, SizeError> {
        match size.checked_mul(&size) {
            None => Err(SizeError(IntErrorKind::PosOverflow)),
            Some(area) if area.is_zero() => Err(SizeError(IntErrorKind::Zero)),
            Some(_) => Ok(Self {
                size,
                current: None,
                start: None,
                goal: None,
                visited: Vec::new(),
            }),
        }
    }

    fn error(&self, variant: BoardErrorType<V>) -> BoardError<V> {
        BoardError {
            size: self.size,
            variant,
        }
    }

    /// Whether the location lies on this board.
    pub fn contains(&self, loc: &Location<V>) -> bool {
        loc.x < self.size && loc.y < self.size
    }

    fn checked<P: Into<Location<V>>>(&self, loc: P) -> Result<Location<V>, BoardError<V>> {
        let loc = loc.into();
        if self.contains(&loc) {
            Ok(loc)
        } else {
            Err(self.error(BoardErrorType::OutOfBounds(loc)))
        }
    }

    /// Place the knight's start. The knight is put there and the history restarts from it.
    pub fn place_start<P: Into<Location<V>>>(&mut self, loc: P) -> Result<(), BoardError<V>> {
        let loc = self.checked(loc)?;
        debug!("placing start at {loc}");
        self.start = Some(loc);
        self.current = Some(loc);
        self.visited = vec![loc];
        Ok(())
    }

    /// Place the goal the knight must reach.
    pub fn place_goal<P: Into<Location<V>>>(&mut self, loc: P) -> Result<(), BoardError<V>> {
        let loc = self.checked(loc)?;
        debug!("placing goal at {loc}");
        self.goal = Some(loc);
        Ok(())
    }

    /// Move the knight to the provided location, appending it to the history. The move is not
    /// required to be a knight's jump; use [`actions`] to find the legal ones.
    pub fn move_to<P: Into<Location<V>>>(&mut self, loc: P) -> Result<(), BoardError<V>> {
        let loc = self.checked(loc)?;
        self.current = Some(loc);
        self.visited.push(loc);
        Ok(())
    }

    /// Put the knight on the provided location, discarding the history so that it becomes the
    /// sole visited square. Start and goal are kept.
    pub fn reset_at<P: Into<Location<V>>>(&mut self, loc: P) -> Result<(), BoardError<V>> {
        let loc = self.checked(loc)?;
        debug!("resetting knight at {loc}, dropping {} visited", self.visited.len());
        self.visited.clear();
        self.visited.push(loc);
        self.current = Some(loc);
        Ok(())
    }

    /// Apply an action to this board in place. This is the setup path used before searching;
    /// searches should use [`result`], which leaves its input untouched.
    pub fn apply(&mut self, action: Action<V>) -> Result<(), BoardError<V>> {
        match action {
            Action::PlaceStart(loc) => self.place_start(loc),
            Action::PlaceGoal(loc) => self.place_goal(loc),
            Action::Move(loc) => self.move_to(loc),
        }
    }

    /// The distance from the knight to the goal under the provided metric.
    pub fn distance(&self, metric: Metric) -> Result<f64, BoardError<V>> {
        let current = self
            .current
            .ok_or_else(|| self.error(BoardErrorType::UnsetCurrent))?;
        let goal = self
            .goal
            .ok_or_else(|| self.error(BoardErrorType::UnsetGoal))?;
        Ok(current.distance(&goal, metric))
    }
}

impl<V> Display for Board<V>
where
    V: BoardValue,
{
    /// Draws the board one row per line: `S` start, `G` goal, `N` knight, `*` visited, `.` empty.
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let side: usize = self.size.into();
        let mut cells = vec![b'.'; side * side];
        let marks = self
            .visited
            .iter()
            .map(|loc| (loc, b'*'))
            .chain(self.start.iter().map(|loc| (loc, b'S')))
            .chain(self.goal.iter().map(|loc| (loc, b'G')))
            .chain(self.current.iter().map(|loc| (loc, b'N')));
        for (loc, mark) in marks {
            if let Some(cell) = loc.as_index(self.size).and_then(|idx| cells.get_mut(idx)) {
                *cell = mark;
            }
        }
        for row in cells.chunks(side) {
            for (column, &cell) in row.iter().enumerate() {
                if column > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", char::from(cell))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The legal knight moves from the board's current square, in [`KNIGHT_OFFSETS`] order.
pub fn actions<V>(board: &Board<V>) -> Result<Vec<Action<V>>, BoardError<V>>
where
    V: BoardValue,
{
    let current = board
        .current
        .ok_or_else(|| board.error(BoardErrorType::UnsetCurrent))?;
    let moves: Vec<_> = KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(dx, dy)| current.offset(dx, dy))
        .filter(|loc| board.contains(loc))
        .map(Action::Move)
        .collect();
    trace!("{} legal moves from {current}", moves.len());
    Ok(moves)
}

/// The board produced by applying `action` to `board`.
///
/// A move yields a copy of the board with the knight on the new square and that square appended
/// to the history. Placements are not search steps and leave the board unchanged.
pub fn result<V>(board: &Board<V>, action: &Action<V>) -> Result<Board<V>, BoardError<V>>
where
    V: BoardValue,
{
    match *action {
        Action::Move(to) => {
            let mut next = board.clone();
            next.move_to(to)?;
            trace!("{action} after {} steps", board.visited.len());
            Ok(next)
        }
        Action::PlaceStart(_) | Action::PlaceGoal(_) => {
            trace!("ignoring {action} during search");
            Ok(board.clone())
        }
    }
}

/// The knight's path problem, as consumed by a search engine: which moves exist from a state,
/// where they lead, when to stop, and how far the goal appears to be.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct KnightsPath {
    goal_metric: Metric,
    heuristic: Metric,
}

impl KnightsPath {
    /// A problem using the Manhattan metric for both the goal test and the heuristic.
    pub const fn new() -> Self {
        Self {
            goal_metric: Metric::Manhattan,
            heuristic: Metric::Manhattan,
        }
    }

    /// A problem whose goal test measures with the diagonal metric.
    pub const fn diagonal_goal() -> Self {
        Self::new().with_goal_metric(Metric::Diagonal)
    }

    /// Use the provided metric for the goal test.
    pub const fn with_goal_metric(self, goal_metric: Metric) -> Self {
        Self {
            goal_metric,
            ..self
        }
    }

    /// Use the provided metric for the heuristic.
    pub const fn with_heuristic(self, heuristic: Metric) -> Self {
        Self { heuristic, ..self }
    }

    /// The metric used by [`KnightsPath::is_goal`].
    pub fn goal_metric(&self) -> Metric {
        self.goal_metric
    }

    /// The metric used by [`KnightsPath::heuristic`].
    pub fn heuristic_metric(&self) -> Metric {
        self.heuristic
    }

    /// See [`actions`].
    pub fn actions<V: BoardValue>(
        &self,
        state: &Board<V>,
    ) -> Result<Vec<Action<V>>, BoardError<V>> {
        actions(state)
    }

    /// See [`result`].
    pub fn result<V: BoardValue>(
        &self,
        state: &Board<V>,
        action: &Action<V>,
    ) -> Result<Board<V>, BoardError<V>> {
        result(state, action)
    }

    /// Whether the knight stands on the goal.
    pub fn is_goal<V: BoardValue>(&self, state: &Board<V>) -> Result<bool, BoardError<V>> {
        Ok(state.distance(self.goal_metric)? == 0.0)
    }

    /// The estimated distance to the goal. This is the raw metric distance, not a move count, so
    /// it may overestimate the number of moves remaining.
    pub fn heuristic<V: BoardValue>(&self, state: &Board<V>) -> Result<f64, BoardError<V>> {
        state.distance(self.heuristic)
    }

    /// The cost of a single step; every move costs one.
    pub fn step_cost<V>(&self, _state: &Board<V>, _action: &Action<V>) -> f64 {
        1.0
    }
}
