//! Composable per-cell transformation stages.
//!
//! A [`Filter`] maps `(cell, x, y)` to a new cell. Filters are built into a
//! [`Chain`], which is itself a filter: each stage receives the previous
//! stage's output and the unchanged coordinates. Because a stage only ever
//! sees its own cell, a chain can run under disjoint-tile parallelism.

/// A transformation applied to one cell given its grid coordinates.
///
/// Any `Fn(T, usize, usize) -> T + Send + Sync` closure is a filter.
pub trait Filter<T>: Send + Sync {
    /// Computes the stage's output for the cell at `(x, y)`.
    fn apply(&self, cell: T, x: usize, y: usize) -> T;

    /// Reinitializes seeded internal state. Stateless stages ignore it.
    fn reseed(&mut self, _seed: u32) {}
}

impl<T, F> Filter<T> for F
where
    F: Fn(T, usize, usize) -> T + Send + Sync,
{
    fn apply(&self, cell: T, x: usize, y: usize) -> T {
        self(cell, x, y)
    }
}

/// Passes every cell through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<T> Filter<T> for Identity {
    fn apply(&self, cell: T, _x: usize, _y: usize) -> T {
        cell
    }
}

/// Replaces every cell with a fixed value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Constant<T>(pub T);

impl<T: Copy + Send + Sync> Filter<T> for Constant<T> {
    fn apply(&self, _cell: T, _x: usize, _y: usize) -> T {
        self.0
    }
}

/// An ordered sequence of filters evaluated as one.
///
/// The empty chain is the identity filter.
pub struct Chain<T> {
    stages: Vec<Box<dyn Filter<T>>>,
}

impl<T> Chain<T> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Appends a stage, builder style.
    pub fn then(mut self, stage: impl Filter<T> + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Appends an already boxed stage.
    pub fn push(&mut self, stage: Box<dyn Filter<T>>) {
        self.stages.push(stage);
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Filter<T> for Chain<T> {
    fn apply(&self, cell: T, x: usize, y: usize) -> T {
        self.stages
            .iter()
            .fold(cell, |cell, stage| stage.apply(cell, x, y))
    }

    fn reseed(&mut self, seed: u32) {
        self.stages.iter_mut().for_each(|stage| stage.reseed(seed));
    }
}

/// Builds a single filter that runs `stages` first to last.
pub fn compose<T>(stages: Vec<Box<dyn Filter<T>>>) -> Chain<T> {
    Chain { stages }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    fn add_height(amount: f64) -> impl Filter<Cell> {
        move |mut c: Cell, _x: usize, _y: usize| {
            c.height += amount;
            c
        }
    }

    fn double_height(mut c: Cell, _x: usize, _y: usize) -> Cell {
        c.height *= 2.0;
        c
    }

    #[test]
    fn closures_are_filters() {
        let f = |c: Cell, x: usize, y: usize| Cell::new(c.height + x as f64, y as f64);
        assert_eq!(f.apply(Cell::new(1.0, 0.0), 2, 5), Cell::new(3.0, 5.0));
    }

    #[test]
    fn empty_chain_is_identity() {
        let chain: Chain<Cell> = Chain::new();
        assert!(chain.is_empty());
        let cell = Cell::new(0.4, 0.6);
        assert_eq!(chain.apply(cell, 7, 9), cell);
    }

    #[test]
    fn single_stage_chain_matches_the_stage() {
        let chain = Chain::new().then(add_height(0.25));
        assert_eq!(chain.len(), 1);
        assert_eq!(
            chain.apply(Cell::new(0.5, 0.1), 0, 0),
            add_height(0.25).apply(Cell::new(0.5, 0.1), 0, 0)
        );
    }

    #[test]
    fn stages_run_in_order() {
        let add_then_double = Chain::new().then(add_height(1.0)).then(double_height);
        let double_then_add = Chain::new().then(double_height).then(add_height(1.0));
        let cell = Cell::new(1.0, 0.0);
        assert_eq!(add_then_double.apply(cell, 0, 0).height, 4.0);
        assert_eq!(double_then_add.apply(cell, 0, 0).height, 3.0);
    }

    #[test]
    fn coordinates_reach_every_stage_unchanged() {
        let record_x = |c: Cell, x: usize, _y: usize| Cell::new(c.height + x as f64, c.humidity);
        let record_y = |c: Cell, _x: usize, y: usize| Cell::new(c.height, c.humidity + y as f64);
        let stages: Vec<Box<dyn Filter<Cell>>> =
            vec![Box::new(record_x), Box::new(record_y), Box::new(record_x)];
        let chain = compose(stages);
        assert_eq!(chain.apply(Cell::default(), 3, 4), Cell::new(6.0, 4.0));
    }

    #[test]
    fn constant_ignores_input() {
        let one = Constant(Cell::new(1.0, 1.0));
        assert_eq!(one.apply(Cell::new(0.2, 0.3), 11, 13), Cell::new(1.0, 1.0));
    }

    #[test]
    fn identity_returns_input() {
        assert_eq!(Identity.apply(Cell::new(0.2, 0.3), 1, 1), Cell::new(0.2, 0.3));
    }

    #[test]
    fn reseed_reaches_every_stage() {
        struct Seeded(u32);
        impl Filter<Cell> for Seeded {
            fn apply(&self, _cell: Cell, _x: usize, _y: usize) -> Cell {
                Cell::new(self.0 as f64, 0.0)
            }
            fn reseed(&mut self, seed: u32) {
                self.0 = seed;
            }
        }

        let mut chain = Chain::new().then(Seeded(1)).then(add_height(0.5));
        assert_eq!(chain.apply(Cell::default(), 0, 0).height, 1.5);
        chain.reseed(7);
        assert_eq!(chain.apply(Cell::default(), 0, 0).height, 7.5);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn chain_equals_nested_application(
                height in -2.0_f64..2.0,
                humidity in -2.0_f64..2.0,
                x in 0_usize..1000,
                y in 0_usize..1000,
            ) {
                let a = |c: Cell, x: usize, _y: usize| Cell::new(c.height + x as f64 * 0.001, c.humidity);
                let b = |c: Cell, _x: usize, y: usize| Cell::new(c.height * 0.5, c.humidity - y as f64 * 0.002);
                let c_stage = |c: Cell, x: usize, y: usize| Cell::new(c.height * c.humidity, (x + y) as f64);
                let chain = Chain::new().then(a).then(b).then(c_stage);
                let cell = Cell::new(height, humidity);
                let expected = c_stage(b(a(cell, x, y), x, y), x, y);
                prop_assert_eq!(chain.apply(cell, x, y), expected);
            }
        }
    }
}
