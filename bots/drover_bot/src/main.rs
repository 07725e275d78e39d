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

/// Hangs back and picks its moments: advances a single stop while alone
/// at the rear, banks odd money within the current segment, gambles when
/// holding the biggest card stack, and otherwise drifts toward a V2
/// waypoint or any stop with room.
struct DroverBot;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(_) => {
            eprintln!("Usage: drover_bot pcount id");
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

    match DroverBot.run(player_count, id) {
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

impl Agent for DroverBot {
    fn choose_stop(&mut self, board: &Board, player: &Player) -> Option<usize> {
        let current = board.position_of(player.id)?;

        // Alone at the rear of the field: step forward.
        if board[current].occupant_count() <= 1
            && board[..current].iter().all(|stop| stop.occupant_count() == 0)
        {
            if let Some(next) = board.get(current + 1) {
                if !next.is_full() {
                    debug!(stop = current + 1, "advancing from the rear");
                    return Some(current + 1);
                }
            }
        }

        // Odd money: bank it at a money stop in this segment.
        if player.money % 2 != 0 {
            if let Some(target) = segment_search(board, current, open_stop(StopKind::Money)) {
                debug!(stop = target, "banking odd money");
                return Some(target);
            }
        }

        // Holding as many cards as anyone on the board: take a gamble.
        let own_stack = player.cards.len();
        if board
            .iter()
            .flat_map(Stop::occupants)
            .all(|other| other.cards.len() <= own_stack)
        {
            if let Some(target) = segment_search(board, current, open_stop(StopKind::Risk)) {
                debug!(stop = target, "gambling on a risk stop");
                return Some(target);
            }
        }

        // Otherwise a V2 waypoint in this segment...
        if let Some(target) = segment_search(board, current, open_stop(StopKind::VisitTwo)) {
            debug!(stop = target, "drifting to a waypoint");
            return Some(target);
        }

        // ...or failing that, the first stop ahead with room.
        let target = (current + 1..board.len()).find(|&index| !board[index].is_full());
        debug!(stop = ?target, "falling back to any open stop");
        target
    }
}

/// First stop strictly between `current` and the next barrier that passes
/// the check. An exhausted board (no barrier ahead) searches nothing.
fn segment_search(
    board: &Board,
    current: usize,
    check: impl Fn(&Stop) -> bool,
) -> Option<usize> {
    let barrier = board.find_stop(current + 1, StopKind::Barrier)?;
    (current + 1..barrier).find(|&index| check(&board[index]))
}

fn open_stop(kind: StopKind) -> impl Fn(&Stop) -> bool {
    move |stop| stop.kind() == kind && !stop.is_full()
}
