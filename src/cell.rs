use grid_util::point::Point;

/// A 0-based location on a [CellGrid](crate::grid::CellGrid). `x` is the row and `y` the column.
pub type Position = Point;

/// The position used for a start or goal that was never found during ingestion. It lies outside
/// every grid, so a search given it fails its bounds check.
pub fn unset_position() -> Position {
    Point::new(-1, -1)
}

/// Integer role codes stored in [Cell::role] and emitted to renderers.
pub mod role {
    /// Start marker as read from the input.
    pub const START: i32 = 0;
    /// Non-walkable cell.
    pub const BLOCKED: i32 = 3;
    /// Goal marker as read from the input.
    pub const GOAL: i32 = 8;
    /// Canonical walkable code; every unrecognised input code is normalized to this.
    pub const WALKABLE: i32 = -1;
    /// Start of a found path.
    pub const PATH_START: i32 = 11;
    /// Intermediate cell of a found path.
    pub const PATH: i32 = 12;
    /// Goal of a found path.
    pub const PATH_GOAL: i32 = 13;
}

/// Semantic reading of a role code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Walkable,
    Blocked,
    Start,
    Goal,
    PathStart,
    Path,
    PathGoal,
}

impl Role {
    /// Classifies any code. Codes outside the vocabulary read as [Role::Walkable].
    pub fn of(code: i32) -> Role {
        match code {
            role::START => Role::Start,
            role::BLOCKED => Role::Blocked,
            role::GOAL => Role::Goal,
            role::PATH_START => Role::PathStart,
            role::PATH => Role::Path,
            role::PATH_GOAL => Role::PathGoal,
            _ => Role::Walkable,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Role::Walkable => role::WALKABLE,
            Role::Blocked => role::BLOCKED,
            Role::Start => role::START,
            Role::Goal => role::GOAL,
            Role::PathStart => role::PATH_START,
            Role::Path => role::PATH,
            Role::PathGoal => role::PATH_GOAL,
        }
    }
}

/// Search bookkeeping of a cell: `Unseen -> Open -> Closed`, never leaving `Closed`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisitState {
    #[default]
    Unseen,
    Open,
    Closed,
}

/// One location of the grid together with the values the A* search keeps for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub position: Position,
    /// Predecessor on the best known path from the start. Only meaningful once discovered.
    pub parent: Position,
    pub cost_from_start: i32,
    pub heuristic_to_goal: i32,
    pub total_cost: i32,
    pub state: VisitState,
    pub role: i32,
}

impl Cell {
    pub fn new(position: Position, role: i32) -> Cell {
        Cell {
            position,
            parent: position,
            cost_from_start: 0,
            heuristic_to_goal: 0,
            total_cost: 0,
            state: VisitState::Unseen,
            role,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.role == role::BLOCKED
    }

    /// Records a newly found best route to this cell and opens it.
    pub fn discover(&mut self, parent: Position, cost_from_start: i32, heuristic_to_goal: i32) {
        self.parent = parent;
        self.cost_from_start = cost_from_start;
        self.heuristic_to_goal = heuristic_to_goal;
        self.total_cost = cost_from_start + heuristic_to_goal;
        self.state = VisitState::Open;
    }
}
