use caravan::{
    render_board, Board, MoveChoice, MoveError, ParsePathError, ParseRequestError, Player,
    Request, Update, READY,
};
use tracing::debug;

/// A trait to simplify writing agents.
///
/// An implementation supplies the decision procedure; [`Agent::run`]
/// supplies everything else about being an agent process.
pub trait Agent {
    /// Picks a target stop for this agent's turn, or `None` when no rule
    /// applies and the turn passes without a move.
    fn choose_stop(&mut self, board: &Board, player: &Player) -> Option<usize>;

    /// Drives the agent process end to end: readiness handshake, board
    /// intake, then one protocol request per line until the match ends.
    fn run(&mut self, num_players: usize, id: usize) -> Result<(), AgentError> {
        // Communication happens through stdin/stdout.
        // Stderr carries diagnostics and the final scores.
        let mut stdin = std::io::stdin().lock();
        let mut stdout = std::io::stdout().lock();
        let mut buf = String::new();

        use std::io::{BufRead, Write};
        writeln!(stdout, "{}", READY)?;
        stdout.flush()?;

        if stdin.read_line(&mut buf)? == 0 {
            return Err(end_of_stream());
        }
        let mut board = Board::parse(&buf, num_players).map_err(AgentError::InvalidPath)?;
        debug!("board loaded:\n{}", render_board(&board));

        loop {
            buf.clear(); // because stdin.read_line() appends to the buffer
            if stdin.read_line(&mut buf)? == 0 {
                return Err(end_of_stream());
            }
            let request: Request = buf.trim_end().parse()?;

            match request {
                Request::YourTurn => {
                    let player = board.player(id).ok_or_else(|| missing_player(id))?.clone();
                    if let Some(target) = self.choose_stop(&board, &player) {
                        writeln!(stdout, "{}", MoveChoice(target))?;
                        stdout.flush()?;
                    }
                }
                Request::Update(update) => {
                    apply_update(&mut board, &update)?;
                    if let Some(player) = board.player(update.player) {
                        debug!(%player, "applied update");
                    }
                    debug!("\n{}", render_board(&board));
                }
                Request::Done => {
                    let scores = final_scores(&board)?;
                    let rendered: Vec<String> =
                        scores.iter().map(|score| score.to_string()).collect();
                    eprintln!("Scores: {}", rendered.join(","));
                    return Ok(());
                }
                Request::Early => return Err(AgentError::EarlyTermination),
            }
        }
    }
}

/// Folds one orchestrator-reported turn outcome into the local board.
///
/// Everything is validated before anything is mutated; a failure means
/// the local replica has diverged from the orchestrator's state, which is
/// fatal for the agent.
pub fn apply_update(board: &mut Board, update: &Update) -> Result<(), AgentError> {
    if update.player >= board.num_players() {
        return Err(AgentError::Comms(anyhow::anyhow!(
            "update names player {} of {}",
            update.player,
            board.num_players()
        )));
    }
    if update.stop >= board.len() {
        return Err(AgentError::Comms(anyhow::anyhow!(
            "update names stop {} of {}",
            update.stop,
            board.len()
        )));
    }
    let from = board
        .position_of(update.player)
        .ok_or_else(|| missing_player(update.player))?;
    // The move happens before the earnings land, so a rejected update
    // leaves the player record untouched as well.
    board.move_player(from, update.stop, update.player)?;
    let player = board
        .player_mut(update.player)
        .ok_or_else(|| missing_player(update.player))?;
    player.points += update.points;
    player.money += update.money;
    if let Some(card) = update.card {
        player.cards.add(card);
    }
    Ok(())
}

/// Scores for every player, in ascending id order.
pub fn final_scores(board: &Board) -> Result<Vec<i32>, AgentError> {
    (0..board.num_players())
        .map(|id| {
            board
                .player(id)
                .map(Player::score)
                .ok_or_else(|| missing_player(id))
        })
        .collect()
}

fn end_of_stream() -> AgentError {
    AgentError::Comms(anyhow::anyhow!("unexpected end of input"))
}

fn missing_player(id: usize) -> AgentError {
    AgentError::Comms(anyhow::anyhow!("player {} is not on the board", id))
}

/// A condition that ends the agent process.
#[derive(Debug)]
pub enum AgentError {
    /// The board specification line could not be parsed.
    InvalidPath(ParsePathError),
    /// The inbound stream ended early or produced something unusable,
    /// including updates that do not apply to the local board.
    Comms(anyhow::Error),
    /// The orchestrator abandoned the match.
    EarlyTermination,
}

impl AgentError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            AgentError::InvalidPath(_) => 4,
            AgentError::Comms(_) | AgentError::EarlyTermination => 6,
        }
    }
}

impl std::error::Error for AgentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AgentError::InvalidPath(err) => Some(err),
            AgentError::Comms(err) => {
                let cause: &(dyn std::error::Error + 'static) = err.as_ref();
                Some(cause)
            }
            AgentError::EarlyTermination => None,
        }
    }
}

impl std::fmt::Display for AgentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentError::InvalidPath(_) => write!(f, "Invalid path"),
            AgentError::Comms(_) | AgentError::EarlyTermination => {
                write!(f, "Communications error")
            }
        }
    }
}

impl From<std::io::Error> for AgentError {
    fn from(err: std::io::Error) -> Self {
        AgentError::Comms(err.into())
    }
}

impl From<ParseRequestError> for AgentError {
    fn from(err: ParseRequestError) -> Self {
        AgentError::Comms(err.into())
    }
}

impl From<MoveError> for AgentError {
    fn from(err: MoveError) -> Self {
        AgentError::Comms(err.into())
    }
}
