//! Grid configurations and the flip model.
//!
//! A configuration is a row-major serialization of a `height x width` grid of
//! characters. A flip reverses a sub-rectangle anchored at the top-left
//! corner, either column-wise inside each row (vertical) or row-wise inside
//! each column (horizontal).

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Smallest accepted grid side
pub const MIN_SIDE: usize = 1;
/// Largest accepted grid side
pub const MAX_SIDE: usize = 16;

/// A grid state. Equality is character-wise equality of the serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Configuration(Box<[char]>);

impl Configuration {
    pub fn new(cells: impl Into<Box<[char]>>) -> Self {
        Self(cells.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cells(&self) -> &[char] {
        &self.0
    }

    /// Cells sorted ascending; two configurations are permutations of each
    /// other iff their sorted cells are equal.
    pub fn sorted_cells(&self) -> Vec<char> {
        let mut cells = self.0.to_vec();
        cells.sort_unstable();
        cells
    }

    pub fn is_permutation_of(&self, other: &Configuration) -> bool {
        self.len() == other.len() && self.sorted_cells() == other.sorted_cells()
    }
}

impl From<&str> for Configuration {
    fn from(s: &str) -> Self {
        Self(s.chars().collect())
    }
}

impl From<String> for Configuration {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.iter() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Configuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Configuration::from(s))
    }
}

/// Grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub height: usize,
    pub width: usize,
}

impl GridDims {
    /// Dimensions used when none are given on the command line
    pub const DEFAULT: GridDims = GridDims {
        height: 3,
        width: 3,
    };

    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    pub fn cell_count(&self) -> usize {
        self.height * self.width
    }

    pub fn is_valid(&self) -> bool {
        (MIN_SIDE..=MAX_SIDE).contains(&self.height) && (MIN_SIDE..=MAX_SIDE).contains(&self.width)
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Flip orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Reverse the first `width` columns of each of the first `height` rows
    Vertical,
    /// Reverse the first `height` rows over the first `width` columns
    Horizontal,
}

/// A single flip anchored at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flip {
    pub width: usize,
    pub height: usize,
    pub orientation: Orientation,
}

impl Flip {
    pub fn vertical(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            orientation: Orientation::Vertical,
        }
    }

    pub fn horizontal(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            orientation: Orientation::Horizontal,
        }
    }

    /// Whether this flip always leaves a configuration unchanged
    pub fn is_degenerate(&self) -> bool {
        match self.orientation {
            Orientation::Vertical => self.width < 2,
            Orientation::Horizontal => self.height < 2,
        }
    }

    /// Whether the flip rectangle fits inside `dims` and is not degenerate
    pub fn is_legal(&self, dims: GridDims) -> bool {
        (1..=dims.width).contains(&self.width)
            && (1..=dims.height).contains(&self.height)
            && !self.is_degenerate()
    }

    /// Apply the flip, producing a freshly allocated configuration.
    ///
    /// `config` must have `dims.cell_count()` cells and the flip must fit
    /// inside `dims`.
    pub fn apply(&self, dims: GridDims, config: &Configuration) -> Configuration {
        let w = dims.width;
        let old = config.cells();
        let mut cells: Box<[char]> = old.into();

        for row in 0..self.height {
            for col in 0..self.width {
                let target = match self.orientation {
                    Orientation::Vertical => row * w + (self.width - 1 - col),
                    Orientation::Horizontal => (self.height - 1 - row) * w + col,
                };
                cells[target] = old[row * w + col];
            }
        }

        Configuration(cells)
    }
}

impl fmt::Display for Flip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.orientation {
            Orientation::Vertical => 'v',
            Orientation::Horizontal => 'h',
        };
        write!(f, "{tag}{}x{}", self.width, self.height)
    }
}

/// Enumerates the single-flip neighbourhood of configurations on a fixed grid.
#[derive(Debug, Clone, Copy)]
pub struct FlipModel {
    dims: GridDims,
}

impl FlipModel {
    pub fn new(dims: GridDims) -> Self {
        Self { dims }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Number of configurations produced by `neighbors` for any input
    pub fn neighbor_count(&self) -> usize {
        let w = self.dims.width;
        let h = self.dims.height;
        2 * (w - 1) * (h - 1) + (w - 1) + (h - 1)
    }

    /// Every legal flip, ordered by flip width, then flip height, vertical first.
    pub fn flips(&self) -> impl Iterator<Item = Flip> {
        let GridDims { height, width } = self.dims;
        (1..=width).flat_map(move |fw| {
            (1..=height).flat_map(move |fh| {
                [Flip::vertical(fw, fh), Flip::horizontal(fw, fh)]
                    .into_iter()
                    .filter(|flip| !flip.is_degenerate())
            })
        })
    }

    /// Lazily produce every configuration one flip away from `config`.
    /// Each item is a new allocation owned by the caller.
    pub fn neighbors<'a>(
        &'a self,
        config: &'a Configuration,
    ) -> impl Iterator<Item = Configuration> + 'a {
        self.flips().map(move |flip| flip.apply(self.dims, config))
    }

    /// The first flip (in `flips` order) turning `from` into `to`, if any.
    pub fn flip_between(&self, from: &Configuration, to: &Configuration) -> Option<Flip> {
        if from.len() != self.dims.cell_count() || to.len() != from.len() {
            return None;
        }
        self.flips().find(|flip| &flip.apply(self.dims, from) == to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(s: &str) -> Configuration {
        Configuration::from(s)
    }

    #[test]
    fn test_vertical_flip_reverses_columns_in_rows() {
        let dims = GridDims::new(3, 3);
        // abc        cba
        // def   ->   fed
        // ghi        ghi
        let out = Flip::vertical(3, 2).apply(dims, &cfg("abcdefghi"));
        assert_eq!(out, cfg("cbafedghi"));
    }

    #[test]
    fn test_horizontal_flip_reverses_rows() {
        let dims = GridDims::new(3, 3);
        // abc        ghc
        // def   ->   dec
        // ghi        abi
        let out = Flip::horizontal(2, 3).apply(dims, &cfg("abcdefghi"));
        assert_eq!(out, cfg("ghcdefabi"));
    }

    #[test]
    fn test_partial_flip_leaves_rest_untouched() {
        let dims = GridDims::new(2, 4);
        let out = Flip::vertical(2, 1).apply(dims, &cfg("abcdefgh"));
        assert_eq!(out, cfg("bacdefgh"));
    }

    #[test]
    fn test_neighbor_count_matches_formula() {
        for h in 1..=5 {
            for w in 1..=5 {
                let model = FlipModel::new(GridDims::new(h, w));
                assert_eq!(model.flips().count(), model.neighbor_count());
                assert_eq!(model.flips().count(), 2 * w * h - w - h);
            }
        }
    }

    #[test]
    fn test_one_by_one_has_no_neighbors() {
        let model = FlipModel::new(GridDims::new(1, 1));
        assert_eq!(model.neighbors(&cfg("a")).count(), 0);
    }

    #[test]
    fn test_two_by_one_neighbors() {
        let model = FlipModel::new(GridDims::new(1, 2));
        let start = cfg("ab");
        let out: Vec<_> = model.neighbors(&start).collect();
        assert_eq!(out, vec![cfg("ba")]);
    }

    #[test]
    fn test_flips_are_never_degenerate() {
        let model = FlipModel::new(GridDims::new(4, 3));
        assert!(model.flips().all(|f| f.is_legal(model.dims())));
    }

    #[test]
    fn test_flip_is_an_involution() {
        let dims = GridDims::new(3, 4);
        let model = FlipModel::new(dims);
        let start = cfg("abcdefghijkl");
        for flip in model.flips() {
            assert_eq!(flip.apply(dims, &flip.apply(dims, &start)), start, "{flip}");
        }
    }

    #[test]
    fn test_flip_between() {
        let model = FlipModel::new(GridDims::new(2, 2));
        let flip = model.flip_between(&cfg("abcd"), &cfg("cdab")).unwrap();
        assert_eq!(flip, Flip::horizontal(2, 2));
        assert!(model.flip_between(&cfg("abcd"), &cfg("dcba")).is_none());
        assert!(model.flip_between(&cfg("abcd"), &cfg("abc")).is_none());
    }

    #[test]
    fn test_permutation_check() {
        assert!(cfg("abca").is_permutation_of(&cfg("aacb")));
        assert!(!cfg("abca").is_permutation_of(&cfg("abcb")));
        assert!(!cfg("abc").is_permutation_of(&cfg("abcc")));
    }

    #[test]
    fn test_dims_bounds() {
        assert!(GridDims::new(1, 16).is_valid());
        assert!(!GridDims::new(0, 3).is_valid());
        assert!(!GridDims::new(3, 17).is_valid());
        assert_eq!(GridDims::default(), GridDims::new(3, 3));
    }
}
