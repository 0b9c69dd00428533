use console::Style;
use termchess::board::BoardState;
use termchess::coord::{NUM_COLS, NUM_ROWS};
use termchess::display::{
    from_display_col, from_display_coord, from_display_row, get_board_orientation, Charset,
    DisplayCoord, DisplayPrefs,
};
use termchess::piece::{piece_to_ascii, piece_to_pictogram};


pub fn render_board(board: &BoardState, prefs: DisplayPrefs) -> String {
    let orientation = get_board_orientation(prefs.orientation);
    let colors = [
        Style::new().color256(233).on_color256(222),
        Style::new().color256(233).on_color256(230),
    ];
    let mut ret = String::new();
    for y in -1..=(NUM_ROWS as i8) {
        for x in -1..=(NUM_COLS as i8) {
            let row_header = x < 0 || x >= NUM_COLS as i8;
            let col_header = y < 0 || y >= NUM_ROWS as i8;
            let square = match (row_header, col_header) {
                (true, true) => format_square(' '),
                (true, false) => {
                    format_square(from_display_row(y, orientation).unwrap().to_algebraic())
                }
                (false, true) => {
                    format_square(from_display_col(x, orientation).unwrap().to_algebraic())
                }
                (false, false) => {
                    let coord = from_display_coord(DisplayCoord { x, y }, orientation).unwrap();
                    match prefs.charset {
                        Charset::Ascii => format_square(match board.piece_at(coord) {
                            Some(piece) => piece_to_ascii(piece),
                            None => '.',
                        }),
                        Charset::Unicode => {
                            let color_idx =
                                (coord.row.to_zero_based() + coord.col.to_zero_based()) % 2;
                            colors[color_idx as usize]
                                .apply_to(format_square(match board.piece_at(coord) {
                                    Some(piece) => piece_to_pictogram(piece.kind, piece.force),
                                    None => ' ',
                                }))
                                .to_string()
                        }
                    }
                }
            };
            ret.push_str(&square);
        }
        ret.push('\n');
    }
    ret
}

fn format_square(ch: char) -> String { format!(" {ch} ") }


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use termchess::force::Force;
    use termchess::test_util::STARTING_SNAPSHOT;

    use super::*;

    fn ascii_prefs(orientation: Force) -> DisplayPrefs {
        DisplayPrefs { orientation, charset: Charset::Ascii }
    }

    #[test]
    fn starting_position_from_white() {
        let board =
            BoardState::from_snapshot(Force::White, Force::White, STARTING_SNAPSHOT).unwrap();
        let rendered = render_board(&board, ascii_prefs(Force::White));
        let header = "    a  b  c  d  e  f  g  h    \n";
        let rank = |label: char, cells: &str| {
            let mut line = format!(" {label} ");
            for ch in cells.chars() {
                line.push_str(&format!(" {ch} "));
            }
            line + &format!(" {label} \n")
        };
        let expected = [
            header.to_owned(),
            rank('8', "rnbqkbnr"),
            rank('7', "pppppppp"),
            rank('6', "........"),
            rank('5', "........"),
            rank('4', "........"),
            rank('3', "........"),
            rank('2', "PPPPPPPP"),
            rank('1', "RNBQKBNR"),
            header.to_owned(),
        ]
        .concat();
        assert_eq!(rendered, expected);
    }

    // Every cell is a symmetric 3-char string in ASCII mode, so flipping the
    // board must equal reversing lines and reversing chars within each line.
    #[test]
    fn black_view_is_the_white_view_rotated() {
        let board =
            BoardState::from_snapshot(Force::Black, Force::White, STARTING_SNAPSHOT).unwrap();
        let white_view = render_board(&board, ascii_prefs(Force::White));
        let black_view = render_board(&board, ascii_prefs(Force::Black));
        let rotated = white_view
            .lines()
            .rev()
            .map(|line| line.chars().rev().collect::<String>() + "\n")
            .collect::<String>();
        assert_eq!(black_view, rotated);
    }
}
