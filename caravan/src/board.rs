use std::ops::Deref;

use crate::errors::{MoveError, ParsePathError};
use crate::player::Player;

/// What kind of stop a board position is, parsed from its two-character
/// code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StopKind {
    /// `::` — bounds the board and splits it into segments.
    Barrier,
    /// `V1` — tallies a visit on arrival.
    VisitOne,
    /// `V2` — tallies a visit on arrival.
    VisitTwo,
    /// `Mo` — pays out money.
    Money,
    /// `Do` — pays out double money.
    DoubleMoney,
    /// `Ri` — pays out on a gamble.
    Risk,
}

impl StopKind {
    pub fn from_code(code: &str) -> Option<StopKind> {
        match code {
            "::" => Some(StopKind::Barrier),
            "V1" => Some(StopKind::VisitOne),
            "V2" => Some(StopKind::VisitTwo),
            "Mo" => Some(StopKind::Money),
            "Do" => Some(StopKind::DoubleMoney),
            "Ri" => Some(StopKind::Risk),
            _ => None,
        }
    }

    /// The two-character code this kind renders as.
    pub fn code(self) -> &'static str {
        match self {
            StopKind::Barrier => "::",
            StopKind::VisitOne => "V1",
            StopKind::VisitTwo => "V2",
            StopKind::Money => "Mo",
            StopKind::DoubleMoney => "Do",
            StopKind::Risk => "Ri",
        }
    }
}

/// A single position on the board.
///
/// A stop owns the records of the players standing on it, in arrival
/// order. The occupant count never exceeds the capacity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stop {
    kind: StopKind,
    capacity: usize,
    occupants: Vec<Player>,
}

impl Stop {
    fn new(kind: StopKind, capacity: usize) -> Self {
        Stop {
            kind,
            capacity,
            occupants: Vec::with_capacity(capacity),
        }
    }

    pub fn kind(&self) -> StopKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The players standing here, in arrival order.
    pub fn occupants(&self) -> &[Player] {
        &self.occupants
    }

    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_full(&self) -> bool {
        self.occupants.len() == self.capacity
    }

    pub fn contains(&self, id: usize) -> bool {
        self.occupants.iter().any(|player| player.id == id)
    }

    /// Appends a player, or hands the record back if the stop is full.
    pub fn place(&mut self, player: Player) -> Result<(), Player> {
        if self.is_full() {
            return Err(player);
        }
        self.occupants.push(player);
        Ok(())
    }

    /// Lifts a player's record out, keeping the order of the rest.
    pub fn remove(&mut self, id: usize) -> Option<Player> {
        let position = self.occupants.iter().position(|player| player.id == id)?;
        Some(self.occupants.remove(position))
    }
}

/// The board: an ordered sequence of stops plus the match's fixed player
/// count.
///
/// The board exclusively owns its stops, and through them every player
/// record; a player is located by scanning the stop sequence. Derefs to
/// `[Stop]` for indexing and iteration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    stops: Vec<Stop>,
    num_players: usize,
}

impl Board {
    /// Parses a `<count>;<path>` specification line and populates the
    /// starting state.
    ///
    /// The path spells three characters per stop: a two-character kind
    /// code and a capacity character, either a digit or `-` for "as many
    /// as there are players". Both ends of the board must be barriers.
    /// Players enter stop 0 in ascending id order, so id 0 heads its
    /// arrival list.
    pub fn parse(spec: &str, num_players: usize) -> Result<Board, ParsePathError> {
        let spec = spec.strip_suffix('\n').unwrap_or(spec);
        let (count, path) = spec
            .split_once(';')
            .ok_or(ParsePathError::MissingSeparator)?;
        let num_stops: usize = count.parse().map_err(|_| ParsePathError::InvalidStopCount)?;
        if num_stops < 2 {
            return Err(ParsePathError::InvalidStopCount);
        }
        if path.len() != num_stops * 3 {
            return Err(ParsePathError::WrongLength {
                expected: num_stops * 3,
                actual: path.len(),
            });
        }

        let mut stops = Vec::with_capacity(num_stops);
        for (index, chunk) in path.as_bytes().chunks_exact(3).enumerate() {
            let kind = std::str::from_utf8(&chunk[..2])
                .ok()
                .and_then(StopKind::from_code)
                .ok_or(ParsePathError::UnknownStopKind { stop: index })?;
            let capacity = match chunk[2] {
                b'-' => num_players,
                digit @ b'0'..=b'9' => usize::from(digit - b'0'),
                _ => return Err(ParsePathError::UnknownCapacity { stop: index }),
            };
            stops.push(Stop::new(kind, capacity));
        }

        if stops.first().map(|stop| stop.kind) != Some(StopKind::Barrier)
            || stops.last().map(|stop| stop.kind) != Some(StopKind::Barrier)
        {
            return Err(ParsePathError::UnguardedEnds);
        }

        let mut board = Board { stops, num_players };
        for id in 0..num_players {
            if board.stops[0].place(Player::new(id)).is_err() {
                return Err(ParsePathError::NoRoomAtStart);
            }
        }
        Ok(board)
    }

    pub fn num_players(&self) -> usize {
        self.num_players
    }

    /// The first record found for this player, scanning stops front to
    /// back.
    pub fn player(&self, id: usize) -> Option<&Player> {
        self.stops
            .iter()
            .flat_map(|stop| stop.occupants.iter())
            .find(|player| player.id == id)
    }

    pub fn player_mut(&mut self, id: usize) -> Option<&mut Player> {
        self.stops
            .iter_mut()
            .flat_map(|stop| stop.occupants.iter_mut())
            .find(|player| player.id == id)
    }

    /// Index of the stop the player currently stands on.
    pub fn position_of(&self, id: usize) -> Option<usize> {
        self.stops.iter().position(|stop| stop.contains(id))
    }

    /// Index of the first stop of `kind` at or after `from`.
    pub fn find_stop(&self, from: usize, kind: StopKind) -> Option<usize> {
        (from..self.stops.len()).find(|&index| self.stops[index].kind == kind)
    }

    /// The largest number of players standing at any single stop.
    pub fn max_occupancy(&self) -> usize {
        self.stops
            .iter()
            .map(|stop| stop.occupants.len())
            .max()
            .unwrap_or(0)
    }

    /// Moves a player between two stops, updating the visit tallies.
    ///
    /// Nothing changes unless every check passes: both indices must be on
    /// the board, the destination must have room, and the player must
    /// currently stand at `from`.
    pub fn move_player(&mut self, from: usize, to: usize, id: usize) -> Result<(), MoveError> {
        if from >= self.stops.len() {
            return Err(MoveError::UnknownStop { stop: from });
        }
        if to >= self.stops.len() {
            return Err(MoveError::UnknownStop { stop: to });
        }
        // Capacity is checked while the player still stands at `from`, so
        // re-entering the stop you already occupy needs a free slot too.
        if self.stops[to].is_full() {
            return Err(MoveError::StopFull { stop: to });
        }
        let mut player = self.stops[from].remove(id).ok_or(MoveError::NotAtStop {
            player: id,
            stop: from,
        })?;
        match self.stops[to].kind {
            StopKind::VisitOne => player.visits[0] += 1,
            StopKind::VisitTwo => player.visits[1] += 1,
            _ => {}
        }
        // Room was verified above, and the record was already lifted out.
        self.stops[to].occupants.push(player);
        Ok(())
    }
}

impl Deref for Board {
    type Target = [Stop];

    fn deref(&self) -> &Self::Target {
        &self.stops
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::PathSpec;
    use crate::visualization::render_board;

    fn sample_board() -> Board {
        Board::parse("7;::-Mo2V11Do2V21Ri2::-", 3).unwrap()
    }

    #[test]
    fn parse_builds_stops_and_starting_field() {
        let board = sample_board();
        assert_eq!(board.len(), 7);
        assert_eq!(board[0].kind(), StopKind::Barrier);
        assert_eq!(board[0].capacity(), 3);
        assert_eq!(board[1].kind(), StopKind::Money);
        assert_eq!(board[1].capacity(), 2);
        assert_eq!(board[6].kind(), StopKind::Barrier);

        let ids: Vec<usize> = board[0].occupants().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        for index in 1..board.len() {
            assert_eq!(board[index].occupant_count(), 0);
        }
    }

    #[test]
    fn parse_accepts_a_trailing_newline() {
        assert!(Board::parse("2;::-::-\n", 1).is_ok());
    }

    #[test]
    fn parse_rejects_bad_specs() {
        assert_eq!(
            Board::parse("no separator", 1),
            Err(ParsePathError::MissingSeparator)
        );
        assert_eq!(
            Board::parse("1;::-", 1),
            Err(ParsePathError::InvalidStopCount)
        );
        assert_eq!(
            Board::parse("x;::-::-", 1),
            Err(ParsePathError::InvalidStopCount)
        );
        assert_eq!(
            Board::parse("3;::-::-", 1),
            Err(ParsePathError::WrongLength {
                expected: 9,
                actual: 6
            })
        );
        assert_eq!(
            Board::parse("3;::-Xy2::-", 1),
            Err(ParsePathError::UnknownStopKind { stop: 1 })
        );
        assert_eq!(
            Board::parse("3;::-Moz::-", 1),
            Err(ParsePathError::UnknownCapacity { stop: 1 })
        );
        assert_eq!(
            Board::parse("3;Mo2::-::-", 1),
            Err(ParsePathError::UnguardedEnds)
        );
        assert_eq!(
            Board::parse("3;::-Mo2V11", 1),
            Err(ParsePathError::UnguardedEnds)
        );
        assert_eq!(
            Board::parse("2;::1::-", 2),
            Err(ParsePathError::NoRoomAtStart)
        );
    }

    #[test]
    fn place_on_a_full_stop_is_rejected() {
        let mut board = sample_board();
        // Stop 2 holds one player at most.
        board.move_player(0, 2, 0).unwrap();
        assert!(board[2].is_full());

        let before = board.clone();
        let spare = Player::new(9);
        assert_eq!(board.stops[2].place(spare.clone()), Err(spare));
        assert_eq!(board, before);
    }

    #[test]
    fn remove_keeps_the_order_of_the_rest() {
        let mut board = sample_board();
        let removed = board.stops[0].remove(1).unwrap();
        assert_eq!(removed.id, 1);
        let ids: Vec<usize> = board[0].occupants().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 2]);
        assert!(board.stops[0].remove(1).is_none());
    }

    #[test]
    fn move_tallies_visits_by_destination_kind() {
        let mut board = sample_board();
        board.move_player(0, 2, 0).unwrap();
        assert_eq!(board.player(0).unwrap().visits, [1, 0]);
        board.move_player(2, 4, 0).unwrap();
        assert_eq!(board.player(0).unwrap().visits, [1, 1]);
        board.move_player(4, 5, 0).unwrap();
        assert_eq!(board.player(0).unwrap().visits, [1, 1]);
        assert_eq!(board.position_of(0), Some(5));
    }

    #[test]
    fn rejected_moves_change_nothing() {
        let mut board = sample_board();
        board.move_player(0, 2, 0).unwrap();
        let before = board.clone();

        // Destination full: stop 2 has capacity 1.
        assert_eq!(
            board.move_player(0, 2, 1),
            Err(MoveError::StopFull { stop: 2 })
        );
        assert_eq!(board, before);

        // Wrong origin.
        assert_eq!(
            board.move_player(3, 4, 1),
            Err(MoveError::NotAtStop { player: 1, stop: 3 })
        );
        assert_eq!(board, before);

        // Off the board.
        assert_eq!(
            board.move_player(0, 7, 1),
            Err(MoveError::UnknownStop { stop: 7 })
        );
        assert_eq!(
            board.move_player(7, 0, 1),
            Err(MoveError::UnknownStop { stop: 7 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn position_and_find_distinguish_missing_from_zero() {
        let board = sample_board();
        assert_eq!(board.position_of(0), Some(0));
        assert_eq!(board.position_of(9), None);
        assert_eq!(board.find_stop(0, StopKind::Barrier), Some(0));
        assert_eq!(board.find_stop(1, StopKind::Barrier), Some(6));
        assert_eq!(board.find_stop(2, StopKind::Money), None);
    }

    quickcheck! {
        fn parse_round_trip(spec: PathSpec) -> bool {
            let board = Board::parse(&spec.line, spec.num_players).unwrap();
            let rendered = render_board(&board);
            let header = rendered.lines().next().unwrap();
            let codes: Vec<&str> = spec.kinds.iter().map(|kind| kind.code()).collect();
            board.len() == spec.kinds.len()
                && board[0].occupants().iter().map(|p| p.id).eq(0..spec.num_players)
                && header == codes.join(" ")
        }

        fn capacity_is_never_exceeded(spec: PathSpec, moves: Vec<(usize, usize, usize)>) -> bool {
            let mut board = Board::parse(&spec.line, spec.num_players).unwrap();
            for (from, to, id) in moves {
                let _ = board.move_player(
                    from % board.len(),
                    to % board.len(),
                    id % spec.num_players,
                );
            }
            board.iter().all(|stop| stop.occupant_count() <= stop.capacity())
        }
    }
}
