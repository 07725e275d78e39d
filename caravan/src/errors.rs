/// The error type for [`Board::parse()`](crate::Board::parse).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParsePathError {
    /// The line is not of the form `<count>;<path>`.
    MissingSeparator,
    /// The stop count is not a number, or is below two.
    InvalidStopCount,
    /// The path holds a different number of characters than the count
    /// calls for.
    WrongLength { expected: usize, actual: usize },
    /// A stop's two-character kind code is not one of the known codes.
    UnknownStopKind { stop: usize },
    /// A stop's capacity character is neither a digit nor `-`.
    UnknownCapacity { stop: usize },
    /// The first and last stops must both be barriers.
    UnguardedEnds,
    /// Stop 0 cannot hold the full starting field of players.
    NoRoomAtStart,
}

impl std::error::Error for ParsePathError {}

impl std::fmt::Display for ParsePathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParsePathError::MissingSeparator => {
                write!(f, "Path specification is missing the ';' separator")
            }
            ParsePathError::InvalidStopCount => {
                write!(f, "Stop count must be a number of at least 2")
            }
            ParsePathError::WrongLength { expected, actual } => write!(
                f,
                "Path should be {} characters long, but is {}",
                expected, actual
            ),
            ParsePathError::UnknownStopKind { stop } => {
                write!(f, "Stop {} has an unrecognized kind code", stop)
            }
            ParsePathError::UnknownCapacity { stop } => {
                write!(f, "Stop {} has an unrecognized capacity character", stop)
            }
            ParsePathError::UnguardedEnds => {
                write!(f, "The first and last stops must be barriers")
            }
            ParsePathError::NoRoomAtStart => {
                write!(f, "The starting stop cannot hold every player")
            }
        }
    }
}

/// The error type for [`Board::move_player()`](crate::Board::move_player).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    /// A stop index is outside the board.
    UnknownStop { stop: usize },
    /// The destination stop is at capacity.
    StopFull { stop: usize },
    /// The player does not stand at the claimed origin stop.
    NotAtStop { player: usize, stop: usize },
}

impl std::error::Error for MoveError {}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::UnknownStop { stop } => {
                write!(f, "Stop {} is not on the board", stop)
            }
            MoveError::StopFull { stop } => {
                write!(f, "Stop {} is already at capacity", stop)
            }
            MoveError::NotAtStop { player, stop } => {
                write!(f, "Player {} does not stand at stop {}", player, stop)
            }
        }
    }
}
