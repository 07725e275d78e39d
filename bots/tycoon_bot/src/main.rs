use std::process::ExitCode;

use caravan::{Board, Player, Stop, StopKind};
use caravan_bot_utils::Agent;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Total number of players in the match
    player_count: String,

    /// This agent's player id
    id: String,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

/// Chases money: an open double-money stop ahead while solvent, the
/// board's first money stop when the very next stop pays, and otherwise
/// the nearest open waypoint or barrier.
struct TycoonBot;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(_) => {
            eprintln!("Usage: tycoon_bot pcount id");
            return ExitCode::from(1);
        }
    };
    initialize_logging(args.log_level);

    let player_count: usize = match args.player_count.parse() {
        Ok(count) if count >= 1 => count,
        _ => {
            eprintln!("Invalid player count");
            return ExitCode::from(2);
        }
    };
    let id: usize = match args.id.parse() {
        Ok(id) if id < player_count => id,
        _ => {
            eprintln!("Invalid ID");
            return ExitCode::from(3);
        }
    };

    match TycoonBot.run(player_count, id) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

impl Agent for TycoonBot {
    fn choose_stop(&mut self, board: &Board, player: &Player) -> Option<usize> {
        let current = board.position_of(player.id)?;

        // Solvent: head for the first open double-money stop ahead.
        if player.money > 0 {
            if let Some(target) = (current..board.len())
                .find(|&index| is_open(&board[index], StopKind::DoubleMoney))
            {
                debug!(stop = target, "heading for a double-money stop");
                return Some(target);
            }
        }

        // The very next stop pays: aim for the board's first money stop.
        if let Some(next) = board.get(current + 1) {
            if next.kind() == StopKind::Money && !next.is_full() {
                let target = board.find_stop(0, StopKind::Money);
                debug!(stop = ?target, "heading for the first money stop");
                return target;
            }
        }

        // Otherwise the first open waypoint or barrier ahead.
        let target = (current + 1..board.len()).find(|&index| {
            let stop = &board[index];
            !stop.is_full()
                && matches!(
                    stop.kind(),
                    StopKind::VisitOne | StopKind::VisitTwo | StopKind::Barrier
                )
        });
        debug!(stop = ?target, "falling back to a waypoint");
        target
    }
}

fn is_open(stop: &Stop, kind: StopKind) -> bool {
    stop.kind() == kind && !stop.is_full()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choose(board: &Board, id: usize) -> Option<usize> {
        let player = board.player(id).unwrap().clone();
        TycoonBot.choose_stop(board, &player)
    }

    #[test]
    fn solvent_player_heads_for_double_money() {
        // An open money stop and waypoints sit closer, but rule one wins.
        let board = Board::parse("7;::-Mo2V12V22Do2Ri2::-", 2).unwrap();
        assert_eq!(choose(&board, 0), Some(4));
    }

    #[test]
    fn full_double_money_stops_are_scanned_past() {
        let mut board = Board::parse("6;::-Mo2Do1V12V21::-", 2).unwrap();
        board.move_player(0, 2, 1).unwrap();
        // The only double-money stop is taken, so the next rule fires:
        // the adjacent money stop redirects to the board's first one.
        assert_eq!(choose(&board, 0), Some(1));
    }

    #[test]
    fn broke_player_banks_when_the_next_stop_pays() {
        let mut board = Board::parse("6;::-Mo2V12V21Do2::-", 2).unwrap();
        board.player_mut(0).unwrap().money = 0;
        assert_eq!(choose(&board, 0), Some(1));
    }

    #[test]
    fn broke_player_falls_back_to_waypoints() {
        let mut board = Board::parse("6;::-Ri2V12Mo2V21::-", 2).unwrap();
        board.player_mut(0).unwrap().money = 0;
        // The next stop gambles rather than pays, so the scan goes to the
        // first open waypoint.
        assert_eq!(choose(&board, 0), Some(2));
    }

    #[test]
    fn full_waypoints_are_skipped() {
        let mut board = Board::parse("6;::-Ri2V11V21Mo2::-", 2).unwrap();
        board.player_mut(0).unwrap().money = 0;
        board.move_player(0, 2, 1).unwrap();
        assert_eq!(choose(&board, 0), Some(3));
    }

    #[test]
    fn no_rule_matches_means_no_move() {
        let mut board = Board::parse("4;::-Mo0Do0::0", 1).unwrap();
        board.player_mut(0).unwrap().money = 0;
        assert_eq!(choose(&board, 0), None);
    }
}
