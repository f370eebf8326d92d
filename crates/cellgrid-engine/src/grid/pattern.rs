use super::GridDescriptor;

/// Pluggable activation strategy.
///
/// A pattern is a pure function of the cell index; it is evaluated host-side
/// exactly once per state buffer, before upload.
pub trait CellPattern {
    /// Returns whether the cell at `index` starts active.
    fn active(&self, index: u32) -> bool;

    /// Fills one state array for `grid`, one 0/1 scalar per cell.
    ///
    /// The returned length always equals `grid.cell_count()`.
    fn generate(&self, grid: &GridDescriptor) -> Vec<u32> {
        (0..grid.cell_count())
            .map(|i| self.active(i) as u32)
            .collect()
    }
}

/// Activates every cell whose index is divisible by `n`.
///
/// `Stride(0)` activates nothing.
#[derive(Debug, Copy, Clone)]
pub struct Stride(pub u32);

impl CellPattern for Stride {
    fn active(&self, index: u32) -> bool {
        self.0 != 0 && index % self.0 == 0
    }
}

/// Activates even-indexed cells.
#[derive(Debug, Copy, Clone)]
pub struct Alternating;

impl CellPattern for Alternating {
    fn active(&self, index: u32) -> bool {
        index % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_length_equals_cell_count() {
        let grid = GridDescriptor::new(32, 32);
        assert_eq!(Stride(3).generate(&grid).len(), 1024);
        assert_eq!(Alternating.generate(&grid).len(), 1024);

        let tall = GridDescriptor::new(3, 7);
        assert_eq!(Stride(5).generate(&tall).len(), 21);
    }

    #[test]
    fn stride_activates_every_nth_index() {
        let grid = GridDescriptor::new(32, 32);
        let states = Stride(3).generate(&grid);
        for (i, &s) in states.iter().enumerate() {
            let expected = u32::from(i % 3 == 0);
            assert_eq!(s, expected, "index {i}");
        }
    }

    #[test]
    fn alternating_activates_even_indices() {
        let grid = GridDescriptor::new(32, 32);
        let states = Alternating.generate(&grid);
        for (i, &s) in states.iter().enumerate() {
            assert_eq!(s, u32::from(i % 2 == 0), "index {i}");
        }
    }

    #[test]
    fn stride_zero_activates_nothing() {
        let grid = GridDescriptor::new(8, 8);
        assert!(Stride(0).generate(&grid).iter().all(|&s| s == 0));
    }

    #[test]
    fn stride_one_activates_everything() {
        let grid = GridDescriptor::new(4, 4);
        assert!(Stride(1).generate(&grid).iter().all(|&s| s == 1));
    }

    #[test]
    fn patterns_are_pure_functions_of_index() {
        let a = Stride(3);
        for i in 0..64 {
            assert_eq!(a.active(i), a.active(i));
        }
        assert_eq!(
            Stride(3).generate(&GridDescriptor::new(8, 8)),
            Stride(3).generate(&GridDescriptor::new(8, 8)),
        );
    }
}
