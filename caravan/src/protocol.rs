use std::fmt;
use std::str::FromStr;

use crate::cards::Card;

/// The readiness line an agent prints before reading the board.
pub const READY: &str = "^";

/// A message from the orchestrator, one per line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Request {
    /// `YT` — this agent must pick a move.
    YourTurn,
    /// `HAP..` — a turn outcome to fold into the local board.
    Update(Update),
    /// `DONE` — the match is over; report scores and exit.
    Done,
    /// `EARLY` — the match was abandoned.
    Early,
}

/// The payload of a `HAP` message: who moved where, and what the turn
/// earned them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Update {
    pub player: usize,
    /// Destination stop index.
    pub stop: usize,
    /// Signed points delta.
    pub points: i32,
    /// Signed money delta.
    pub money: i32,
    /// The drawn card, if the turn produced one.
    pub card: Option<Card>,
}

/// The error type for the [`FromStr`] instance of [`Request`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseRequestError {
    /// The line matches no known message.
    UnknownMessage,
    /// A `HAP` payload with missing, extra, or non-numeric fields.
    MalformedUpdate,
    /// A `HAP` card field outside `0..=5`.
    InvalidCard { value: u32 },
}

impl std::error::Error for ParseRequestError {}

impl fmt::Display for ParseRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseRequestError::UnknownMessage => write!(f, "Unrecognized message"),
            ParseRequestError::MalformedUpdate => write!(f, "Malformed update payload"),
            ParseRequestError::InvalidCard { value } => {
                write!(f, "Card value {} is outside the deck", value)
            }
        }
    }
}

impl FromStr for Request {
    type Err = ParseRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "YT" => Ok(Request::YourTurn),
            "DONE" => Ok(Request::Done),
            "EARLY" => Ok(Request::Early),
            _ => {
                let payload = s
                    .strip_prefix("HAP")
                    .ok_or(ParseRequestError::UnknownMessage)?;
                payload.parse().map(Request::Update)
            }
        }
    }
}

impl FromStr for Update {
    type Err = ParseRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn number<T: FromStr>(field: &str) -> Result<T, ParseRequestError> {
            field.parse().map_err(|_| ParseRequestError::MalformedUpdate)
        }

        let fields: Vec<&str> = s.split(',').collect();
        if fields.len() != 5 {
            return Err(ParseRequestError::MalformedUpdate);
        }
        let card_value: u32 = number(fields[4])?;
        let card = match card_value {
            0 => None,
            _ => Some(
                Card::from_digit(card_value)
                    .ok_or(ParseRequestError::InvalidCard { value: card_value })?,
            ),
        };
        Ok(Update {
            player: number(fields[0])?,
            stop: number(fields[1])?,
            points: number(fields[2])?,
            money: number(fields[3])?,
            card,
        })
    }
}

/// The agent's reply on its turn: the absolute index of the target stop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveChoice(pub usize);

impl fmt::Display for MoveChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DO{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_messages() {
        assert_eq!("YT".parse(), Ok(Request::YourTurn));
        assert_eq!("DONE".parse(), Ok(Request::Done));
        assert_eq!("EARLY".parse(), Ok(Request::Early));
    }

    #[test]
    fn update_with_all_fields() {
        assert_eq!(
            "HAP2,5,-1,3,4".parse(),
            Ok(Request::Update(Update {
                player: 2,
                stop: 5,
                points: -1,
                money: 3,
                card: Some(Card::D),
            }))
        );
    }

    #[test]
    fn update_without_a_card() {
        assert_eq!(
            "HAP0,1,0,0,0".parse(),
            Ok(Request::Update(Update {
                player: 0,
                stop: 1,
                points: 0,
                money: 0,
                card: None,
            }))
        );
    }

    #[test]
    fn update_with_an_oversized_card_is_rejected() {
        assert_eq!(
            "HAP0,1,0,0,6".parse::<Request>(),
            Err(ParseRequestError::InvalidCard { value: 6 })
        );
    }

    #[test]
    fn update_field_count_is_strict() {
        assert_eq!(
            "HAP0,1,0,0".parse::<Request>(),
            Err(ParseRequestError::MalformedUpdate)
        );
        assert_eq!(
            "HAP0,1,0,0,0,9".parse::<Request>(),
            Err(ParseRequestError::MalformedUpdate)
        );
        assert_eq!(
            "HAP0,x,0,0,0".parse::<Request>(),
            Err(ParseRequestError::MalformedUpdate)
        );
        assert_eq!(
            "HAP-1,1,0,0,0".parse::<Request>(),
            Err(ParseRequestError::MalformedUpdate)
        );
    }

    #[test]
    fn unknown_lines_are_rejected() {
        assert_eq!("".parse::<Request>(), Err(ParseRequestError::UnknownMessage));
        assert_eq!(
            "YTX".parse::<Request>(),
            Err(ParseRequestError::UnknownMessage)
        );
        assert_eq!(
            "NOPE".parse::<Request>(),
            Err(ParseRequestError::UnknownMessage)
        );
    }

    #[test]
    fn move_choice_renders_the_target() {
        assert_eq!(MoveChoice(0).to_string(), "DO0");
        assert_eq!(MoveChoice(12).to_string(), "DO12");
    }
}
