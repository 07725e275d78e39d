use crate::board::Board;

/// Renders the board for diagnostics: the stop codes on one line, then
/// one row per occupancy layer with each player's id under their stop.
pub fn render_board(board: &Board) -> String {
    let codes: Vec<&str> = board.iter().map(|stop| stop.kind().code()).collect();
    let mut result = codes.join(" ");

    for row in 0..board.max_occupancy() {
        // Stop columns sit three characters apart, aligned with the header.
        let mut line = vec![' '; board.len() * 3 - 1];
        for (index, stop) in board.iter().enumerate() {
            if let Some(player) = stop.occupants().get(row) {
                line[index * 3] = id_glyph(player.id);
            }
        }
        let line: String = line.into_iter().collect();
        result.push('\n');
        result.push_str(line.trim_end());
    }
    result
}

// Ids past 9 cannot be drawn in a single column.
fn id_glyph(id: usize) -> char {
    char::from_digit(id as u32, 10).unwrap_or('#')
}
