//! Zig-zag placement of data and error correction codewords into the
//! symbol's data region.
//!
//! ISO/IEC 16022 lays out codeword bits along diagonal "utah shape"
//! footprints that wrap around the edges of the data region, with four
//! special-cased corner patterns and, for four small square sizes, two
//! leftover cells in the bottom-right corner that get a fixed dummy
//! pattern instead of real data.
use crate::symbol_size::SymbolInfo;

/// Place `codewords` (data followed by error correction, already
/// interleaved) into the boolean data-region grid for `size`.
///
/// The returned grid has `size.data_region_cells()` entries, row-major,
/// `true` meaning a black module.
pub(crate) fn place(codewords: &[u8], size: &SymbolInfo) -> Vec<bool> {
    let width = size.columns - 2 * size.regions_horizontal;
    let height = size.rows - 2 * size.regions_vertical;
    let mut entries = vec![false; width * height];

    IndexTraversal { width, height }.run(|codeword_idx, indices| {
        let mut codeword = codewords[codeword_idx];
        for &idx in indices.iter().rev() {
            entries[idx] = codeword & 1 == 1;
            codeword >>= 1;
        }
    });

    if size.has_padding_modules() {
        // ISO/IEC 16022 Annex F "unused" pattern: low-high diagonal.
        entries[height * width - 2] = false;
        entries[height * width - 1] = true;
        entries[(height - 1) * width - 2] = true;
        entries[(height - 1) * width - 1] = false;
    }

    entries
}

struct IndexTraversal {
    width: usize,
    height: usize,
}

impl IndexTraversal {
    fn run<F>(&self, mut visit_fn: F)
    where
        F: FnMut(usize, [usize; 8]),
    {
        let nrow = self.height as i16;
        let ncol = self.width as i16;
        let mut visited = vec![false; (nrow * ncol) as usize];

        let mut i: i16 = 4;
        let mut j: i16 = 0;
        let mut codeword_idx = 0;

        macro_rules! visit {
            ($indices:expr) => {
                let ii = $indices;
                for v in ii {
                    visited[v] = true;
                }
                visit_fn(codeword_idx, ii);
                codeword_idx += 1;
            };
        }

        loop {
            if i == nrow && j == 0 {
                visit!(self.corner1());
            }
            if i == nrow - 2 && j == 0 && ncol % 4 != 0 {
                visit!(self.corner2());
            }
            if i == nrow - 2 && j == 0 && ncol % 8 == 4 {
                visit!(self.corner3());
            }
            if i == nrow + 4 && j == 2 && ncol % 8 == 0 {
                visit!(self.corner4());
            }

            loop {
                if i < nrow && j >= 0 && !visited[(i * ncol + j) as usize] {
                    visit!(self.utah(i, j));
                }
                i -= 2;
                j += 2;
                if !(i >= 0 && j < ncol) {
                    break;
                }
            }
            i += 1;
            j += 3;

            loop {
                if i >= 0 && j < ncol && !visited[(i * ncol + j) as usize] {
                    visit!(self.utah(i, j));
                }
                i += 2;
                j -= 2;
                if !(i < nrow && j >= 0) {
                    break;
                }
            }
            i += 3;
            j += 1;

            if !(i < nrow || j < ncol) {
                break;
            }
        }
    }

    /// Map a (possibly out-of-range) diagonal coordinate to a data
    /// region index, wrapping around the edges the way the standard's
    /// diagrams do.
    fn idx(&self, mut i: i16, mut j: i16) -> usize {
        let h = self.height as i16;
        let w = self.width as i16;
        if i < 0 {
            i += h;
            j += 4 - ((h + 4) % 8);
        }
        if j < 0 {
            j += w;
            i += 4 - ((w + 4) % 8);
        }
        if i >= h {
            i -= h;
        }
        (i * w + j) as usize
    }

    fn utah(&self, i: i16, j: i16) -> [usize; 8] {
        [
            self.idx(i - 2, j - 2),
            self.idx(i - 2, j - 1),
            self.idx(i - 1, j - 2),
            self.idx(i - 1, j - 1),
            self.idx(i - 1, j),
            self.idx(i, j - 2),
            self.idx(i, j - 1),
            self.idx(i, j),
        ]
    }

    fn corner1(&self) -> [usize; 8] {
        let h = self.height as i16;
        let w = self.width as i16;
        [
            self.idx(h - 1, 0),
            self.idx(h - 1, 1),
            self.idx(h - 1, 2),
            self.idx(0, w - 2),
            self.idx(0, w - 1),
            self.idx(1, w - 1),
            self.idx(2, w - 1),
            self.idx(3, w - 1),
        ]
    }

    fn corner2(&self) -> [usize; 8] {
        let h = self.height as i16;
        let w = self.width as i16;
        [
            self.idx(h - 3, 0),
            self.idx(h - 2, 0),
            self.idx(h - 1, 0),
            self.idx(0, w - 4),
            self.idx(0, w - 3),
            self.idx(0, w - 2),
            self.idx(0, w - 1),
            self.idx(1, w - 1),
        ]
    }

    fn corner3(&self) -> [usize; 8] {
        let h = self.height as i16;
        let w = self.width as i16;
        [
            self.idx(h - 3, 0),
            self.idx(h - 2, 0),
            self.idx(h - 1, 0),
            self.idx(0, w - 2),
            self.idx(0, w - 1),
            self.idx(1, w - 1),
            self.idx(2, w - 1),
            self.idx(3, w - 1),
        ]
    }

    fn corner4(&self) -> [usize; 8] {
        let h = self.height as i16;
        let w = self.width as i16;
        [
            self.idx(h - 1, 0),
            self.idx(h - 1, w - 1),
            self.idx(0, w - 3),
            self.idx(0, w - 2),
            self.idx(0, w - 1),
            self.idx(1, w - 3),
            self.idx(1, w - 2),
            self.idx(1, w - 1),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol_size::SYMBOL_SIZES;
    use pretty_assertions::assert_eq;

    fn size_for(rows: usize, cols: usize) -> &'static SymbolInfo {
        SYMBOL_SIZES
            .iter()
            .find(|s| s.rows == rows && s.columns == cols)
            .unwrap()
    }

    #[test]
    fn every_cell_is_visited_at_most_once_and_padding_cells_are_left_over() {
        for size in &SYMBOL_SIZES {
            let width = size.columns - 2 * size.regions_horizontal;
            let height = size.rows - 2 * size.regions_vertical;
            let mut visited = vec![0u32; width * height];
            IndexTraversal { width, height }.run(|_idx, indices| {
                for i in indices {
                    visited[i] += 1;
                }
            });
            assert!(visited.iter().all(|&c| c <= 1), "{}x{}", width, height);
            let unvisited = visited.iter().filter(|&&c| c == 0).count();
            let expected = if size.has_padding_modules() { 4 } else { 0 };
            assert_eq!(unvisited, expected, "{}x{}", width, height);
        }
    }

    #[test]
    fn codeword_count_matches_bits_placed() {
        for size in &SYMBOL_SIZES {
            let total = size.max_data_codewords + size.total_ecc_codewords();
            let codewords: Vec<u8> = (0..total).map(|i| i as u8).collect();
            let width = size.columns - 2 * size.regions_horizontal;
            let height = size.rows - 2 * size.regions_vertical;
            let mut max_idx = 0;
            IndexTraversal { width, height }.run(|idx, _| max_idx = max_idx.max(idx));
            assert_eq!(max_idx + 1, total, "{}x{}", size.rows, size.columns);
            let _ = place(&codewords, size);
        }
    }

    #[test]
    fn corner_padding_only_applies_to_the_four_small_squares() {
        assert!(size_for(12, 12).has_padding_modules());
        assert!(size_for(24, 24).has_padding_modules());
        assert!(!size_for(18, 18).has_padding_modules());
        assert!(!size_for(32, 32).has_padding_modules());
    }
}
