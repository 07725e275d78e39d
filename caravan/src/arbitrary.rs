use quickcheck::{Arbitrary, Gen};

use crate::{Card, StopKind};

const INTERIOR_KINDS: [StopKind; 6] = [
    StopKind::Barrier,
    StopKind::VisitOne,
    StopKind::VisitTwo,
    StopKind::Money,
    StopKind::DoubleMoney,
    StopKind::Risk,
];

impl Arbitrary for Card {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Card::ALL).unwrap()
    }
}

/// A syntactically valid `<count>;<path>` line, plus a player count that
/// fits the starting stop.
#[derive(Clone, Debug)]
pub struct PathSpec {
    pub line: String,
    pub num_players: usize,
    pub kinds: Vec<StopKind>,
}

impl Arbitrary for PathSpec {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_stops = 2 + usize::arbitrary(g) % 14;
        let num_players = 1 + usize::arbitrary(g) % 9;

        let mut kinds = vec![StopKind::Barrier];
        for _ in 1..num_stops - 1 {
            kinds.push(*g.choose(&INTERIOR_KINDS).unwrap());
        }
        kinds.push(StopKind::Barrier);

        let mut path = String::new();
        for (index, kind) in kinds.iter().enumerate() {
            path.push_str(kind.code());
            if index == 0 || index == num_stops - 1 {
                // The boundary barriers always fit the whole field.
                path.push('-');
            } else {
                path.push(char::from_digit(u32::arbitrary(g) % 10, 10).unwrap());
            }
        }

        PathSpec {
            line: format!("{};{}\n", num_stops, path),
            num_players,
            kinds,
        }
    }
}
