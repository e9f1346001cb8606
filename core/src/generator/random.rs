use super::*;

/// Shuffles the default deck with a seeded RNG, so any board can be rebuilt
/// from its seed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShuffledLayoutGenerator {
    seed: u64,
}

impl ShuffledLayoutGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for ShuffledLayoutGenerator {
    fn generate(self) -> CardLayout {
        use rand::prelude::*;

        let mut layout = CardLayout::from_colours(CardLayout::default_deck());
        let mut rng = SmallRng::seed_from_u64(self.seed);

        // Descending row/column walk instead of a single flat pass: each
        // visited cell swaps with a cell drawn from the rows at or above it.
        // The column draw spans the full width of the target row, so column 0
        // can receive a swap even though the walk never visits it.
        for row in (1..BOARD_SIDE).rev() {
            for col in (1..BOARD_SIDE).rev() {
                let swap_row = rng.random_range(0..=row);
                let swap_col = rng.random_range(0..BOARD_SIDE);
                layout.colours.swap(
                    (row, col).to_nd_index(),
                    (swap_row, swap_col).to_nd_index(),
                );
            }
        }

        layout
    }
}
