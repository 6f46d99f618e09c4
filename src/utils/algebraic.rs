//! Square conversions for algebraic coordinates.
//!
//! Row 0 is rank 8 and column 0 is file `a`, so `e2` is `(6, 4)`.

use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a `(row, col)` square.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, String> {
    let bytes = square.trim().as_bytes();
    if bytes.len() != 2 {
        return Err(format!("Invalid algebraic square: {square}"));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("Invalid algebraic file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid algebraic rank: {}", rank as char));
    }

    let col = (file - b'a') as i8;
    let row = 8 - (rank - b'0') as i8;
    Ok(Square::new(row, col))
}

/// Convert an on-board square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, String> {
    if !(0..8).contains(&square.row) || !(0..8).contains(&square.col) {
        return Err(format!(
            "Square out of bounds: ({}, {})",
            square.row, square.col
        ));
    }

    let file_char = char::from(b'a' + square.col as u8);
    let rank_char = char::from(b'0' + (8 - square.row) as u8);

    Ok(format!("{file_char}{rank_char}"))
}

/// Like [`square_to_algebraic`], falling back to `(row,col)` off the board.
pub fn square_label(square: Square) -> String {
    square_to_algebraic(square).unwrap_or_else(|_| format!("({},{})", square.row, square.col))
}

/// Parses a move token such as `e2e4` or `e7e8q` into squares plus an
/// optional promotion suffix.
pub fn parse_move_token(token: &str) -> Result<(Square, Square, Option<char>), String> {
    let token = token.trim();
    if !token.is_ascii() || !(4..=5).contains(&token.len()) {
        return Err(format!("Invalid move token: {token}"));
    }
    let from = algebraic_to_square(&token[0..2])?;
    let to = algebraic_to_square(&token[2..4])?;
    let promotion = token[4..].chars().next();
    Ok((from, to, promotion))
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, parse_move_token, square_to_algebraic};
    use crate::game_state::chess_types::Square;

    #[test]
    fn square_conversions() {
        assert_eq!(
            algebraic_to_square("e2").expect("e2 should parse"),
            Square::new(6, 4)
        );
        assert_eq!(
            algebraic_to_square("a8").expect("a8 should parse"),
            Square::new(0, 0)
        );
        assert_eq!(
            square_to_algebraic(Square::new(7, 7)).expect("(7,7) should convert"),
            "h1"
        );
        assert_eq!(
            square_to_algebraic(Square::new(0, 3)).expect("(0,3) should convert"),
            "d8"
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("a").is_err());
        assert!(square_to_algebraic(Square::new(8, 0)).is_err());
    }

    #[test]
    fn move_tokens() {
        let (from, to, promo) = parse_move_token("e7e8q").expect("token should parse");
        assert_eq!((from, to, promo), (Square::new(1, 4), Square::new(0, 4), Some('q')));
        assert_eq!(
            parse_move_token("g1f3").expect("token should parse").2,
            None
        );
        assert!(parse_move_token("e2e").is_err());
    }
}
