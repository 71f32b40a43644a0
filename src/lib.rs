//! Data Matrix (ECC200) symbol encoder, ISO/IEC 16022.
//!
//! # Usage example
//!
//! ```rust
//! # use ecc200_datamatrix::{encode, CodeType, CodeForm};
//! let bitmap = encode(b"Hello, World!", CodeType::Default, CodeForm::Square).unwrap();
//! print!("{}", bitmap.unicode());
//! ```
//!
//! # Current limitations
//!
//! This crate only encodes. There is no decoder, no image file I/O, and
//! no ECC000-140 support. Structured append and the ECI protocol are not
//! implemented; see the crate's design notes for the full list and the
//! reasoning behind it.
mod charset;
mod encodation;
mod error;
mod errorcode;
mod mode;
mod placement;
mod raster;
mod symbol_size;
mod types;

pub use error::EncodingError;
pub use raster::Bitmap;
pub use types::{CodeForm, CodeType};

/// Encode `data` as a Data Matrix (ECC200) symbol.
///
/// Picks the smallest symbol size allowed by `code_form` that can hold
/// `data` after encodation, computes Reed-Solomon error correction,
/// places both into the symbol's zig-zag module pattern, and rasterizes
/// the result into a packed bitmap.
pub fn encode(
    data: &[u8],
    code_type: types::CodeType,
    code_form: types::CodeForm,
) -> Result<Bitmap, EncodingError> {
    let (mut codewords, size) = encodation::encode_data(data, code_type, code_form)?;
    let ecc = errorcode::encode_error(&codewords, size)?;
    codewords.extend_from_slice(&ecc);
    let content = placement::place(&codewords, size);
    Ok(raster::rasterize(&content, size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn encodes_hello_world_into_a_square_symbol() {
        let bitmap = encode(b"Hello, World!", CodeType::Default, CodeForm::Square).unwrap();
        assert_eq!(bitmap.width(), bitmap.height());
        assert!(bitmap.width() >= 10);
    }

    #[test]
    fn encodes_empty_input_into_the_smallest_symbol() {
        let bitmap = encode(&[], CodeType::Default, CodeForm::Square).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (10, 10));
    }

    #[test]
    fn oversized_input_is_rejected() {
        let data = vec![b'1'; 4000];
        let err = encode(&data, CodeType::Default, CodeForm::Square).unwrap_err();
        assert_eq!(err, EncodingError::OutOfSpace);
    }

    #[test]
    fn rectangular_symbols_can_be_requested() {
        let bitmap = encode(b"12345", CodeType::Default, CodeForm::Rectangular).unwrap();
        assert_ne!(bitmap.width(), bitmap.height());
    }

    #[test]
    fn prose_encodes_into_a_24x24_symbol_with_the_alternating_clock_track() {
        let data = b"This DataMatrix code should be 24x24 elements";
        let bitmap = encode(data, CodeType::Default, CodeForm::Square).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (24, 24));
        assert_eq!(bitmap.bytes_per_row(), 3);
        assert_eq!(&bitmap.data()[..3], &[0x55, 0x55, 0x55]);
    }
}
