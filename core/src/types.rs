/// Single coordinate axis used for board rows and columns.
pub type Coord = u8;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Cards per board side.
pub const BOARD_SIDE: Coord = 4;

/// Total cards on a board.
pub const CARD_COUNT: usize = (BOARD_SIDE as usize) * (BOARD_SIDE as usize);

/// Colour pairs hidden in a full board.
pub const PAIR_COUNT: u8 = (CARD_COUNT / 2) as u8;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}
