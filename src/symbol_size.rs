//! Symbol size table and chooser.
//!
//! The entries here are the same 30 ISO/IEC 16022 standard sizes (DMRE
//! rectangle extensions dropped, see `DESIGN.md`).

use crate::types::CodeForm;

/// Immutable description of one legal Data Matrix symbol size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SymbolInfo {
    pub(crate) max_data_codewords: usize,
    pub(crate) columns: usize,
    pub(crate) rows: usize,
    pub(crate) regions_horizontal: usize,
    pub(crate) regions_vertical: usize,
    pub(crate) number_of_blocks: usize,
    pub(crate) reed_solomon_per_block: usize,
}

impl SymbolInfo {
    #[inline]
    pub(crate) fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    #[inline]
    pub(crate) fn total_ecc_codewords(&self) -> usize {
        self.number_of_blocks * self.reed_solomon_per_block
    }

    /// Number of data-region cells, i.e. the whole symbol minus its
    /// finder patterns and clock tracks.
    #[inline]
    pub(crate) fn data_region_cells(&self) -> usize {
        (self.rows - 2 * self.regions_vertical) * (self.columns - 2 * self.regions_horizontal)
    }

    /// Whether this size has 4 leftover data-region bits (a 2x2 module
    /// dummy pattern) once every codeword bit has been placed.
    #[inline]
    pub(crate) fn has_padding_modules(&self) -> bool {
        self.is_square() && matches!(self.rows, 12 | 16 | 20 | 24)
    }
}

macro_rules! size {
    ($max:expr, $cols:expr, $rows:expr, $rh:expr, $rv:expr, $blocks:expr, $ecc:expr) => {
        SymbolInfo {
            max_data_codewords: $max,
            columns: $cols,
            rows: $rows,
            regions_horizontal: $rh,
            regions_vertical: $rv,
            number_of_blocks: $blocks,
            reed_solomon_per_block: $ecc,
        }
    };
}

/// All 30 standard ECC200 symbol sizes, ascending by data capacity.
///
/// The ascending order lets the chooser do a simple linear scan.
pub(crate) const SYMBOL_SIZES: [SymbolInfo; 30] = [
    size!(3, 10, 10, 1, 1, 1, 5),
    size!(5, 12, 12, 1, 1, 1, 7),
    size!(5, 18, 8, 1, 1, 1, 7),
    size!(8, 14, 14, 1, 1, 1, 10),
    size!(10, 32, 8, 2, 1, 1, 11),
    size!(12, 16, 16, 1, 1, 1, 12),
    size!(16, 26, 12, 1, 1, 1, 14),
    size!(18, 18, 18, 1, 1, 1, 14),
    size!(22, 20, 20, 1, 1, 1, 18),
    size!(22, 36, 12, 2, 1, 1, 18),
    size!(30, 22, 22, 1, 1, 1, 20),
    size!(32, 36, 16, 2, 1, 1, 24),
    size!(36, 24, 24, 1, 1, 1, 24),
    size!(44, 26, 26, 1, 1, 1, 28),
    size!(49, 48, 16, 2, 1, 1, 28),
    size!(62, 32, 32, 2, 2, 1, 36),
    size!(86, 36, 36, 2, 2, 1, 42),
    size!(114, 40, 40, 2, 2, 1, 48),
    size!(144, 44, 44, 2, 2, 1, 56),
    size!(174, 48, 48, 2, 2, 1, 68),
    size!(204, 52, 52, 2, 2, 2, 42),
    size!(280, 64, 64, 4, 4, 2, 56),
    size!(368, 72, 72, 4, 4, 4, 36),
    size!(456, 80, 80, 4, 4, 4, 48),
    size!(576, 88, 88, 4, 4, 4, 56),
    size!(696, 96, 96, 4, 4, 4, 68),
    size!(816, 104, 104, 4, 4, 6, 56),
    size!(1050, 120, 120, 6, 6, 6, 68),
    size!(1304, 132, 132, 6, 6, 8, 62),
    size!(1558, 144, 144, 6, 6, 10, 62),
];

/// Find the smallest symbol which can hold `codewords_needed` data
/// codewords under the given shape constraint.
pub(crate) fn choose(
    codewords_needed: usize,
    code_form: CodeForm,
) -> Option<&'static SymbolInfo> {
    SYMBOL_SIZES.iter().find(|s| {
        let shape_ok = match code_form {
            CodeForm::Square => s.is_square(),
            CodeForm::Rectangular => !s.is_square(),
            CodeForm::PreferRectangular => true,
        };
        shape_ok && s.max_data_codewords >= codewords_needed
    })
}
