//! High-level data encodation.
//!
//! [`encode_data`] is the entry point: it strips any preamble framing
//! the requested [`CodeType`] calls for, emits the matching type-marker
//! codeword, then drives the six per-mode packers (ascii, c40, text,
//! x12, edifact, base256) through [`selector::look_ahead`] until the
//! input is exhausted, and finally pads the result out to a legal
//! symbol size.
pub(crate) mod ascii;
mod base256;
mod c40;
mod edifact;
mod selector;
mod text;
mod x12;

use crate::error::EncodingError;
use crate::mode::Mode;
use crate::symbol_size::{self, SymbolInfo};
use crate::types::{CodeForm, CodeType};

/// Shared unlatch codeword used by C40, Text and X12 to return to ASCII.
/// EDIFACT has its own sentinel, see [`edifact::UNLATCH`].
pub(crate) const UNLATCH: u8 = 254;

/// Operations the per-mode packers need from the encoder driving them.
///
/// Kept as a trait (rather than a concrete struct) so the packers stay
/// ignorant of the driver's bookkeeping; only [`Driver`] implements it.
pub(crate) trait EncodingContext {
    /// Look ahead and switch mode if the heuristic now prefers another
    /// one. Returns whether a switch happened.
    fn maybe_switch_mode(&mut self) -> bool;

    /// Codewords left in the chosen symbol if `extra_codewords` more
    /// were written right now, or `None` if no symbol could hold that.
    fn symbol_size_left(&mut self, extra_codewords: usize) -> Option<usize>;

    fn eat(&mut self) -> Option<u8>;

    fn backup(&mut self, steps: usize);

    fn rest(&self) -> &[u8];

    fn push(&mut self, ch: u8);

    fn replace(&mut self, index: usize, ch: u8);

    fn insert(&mut self, index: usize, ch: u8);

    fn codewords(&self) -> &[u8];

    fn set_mode(&mut self, mode: Mode);

    fn peek(&self, n: usize) -> Option<u8> {
        self.rest().get(n).copied()
    }

    fn characters_left(&self) -> usize {
        self.rest().len()
    }

    fn has_more_characters(&self) -> bool {
        !self.rest().is_empty()
    }
}

struct Driver<'a> {
    data: &'a [u8],
    input: &'a [u8],
    mode: Mode,
    codewords: Vec<u8>,
    pending_latch: Option<u8>,
    code_form: CodeForm,
}

impl<'a> Driver<'a> {
    fn new(data: &'a [u8], code_form: CodeForm) -> Self {
        Self {
            data,
            input: data,
            mode: Mode::Ascii,
            codewords: Vec::new(),
            pending_latch: None,
            code_form,
        }
    }

    fn run(&mut self) -> Result<(), EncodingError> {
        let mut no_progress_run = 0;
        while self.has_more_characters() {
            if let Some(latch) = self.pending_latch.take() {
                self.push(latch);
            }
            let before = self.codewords.len();
            match self.mode {
                Mode::Ascii => ascii::encode(self)?,
                Mode::C40 => c40::encode(self)?,
                Mode::Text => text::encode(self)?,
                Mode::X12 => x12::encode(self)?,
                Mode::Edifact => edifact::encode(self)?,
                Mode::Base256 => base256::encode(self)?,
            }
            if self.codewords.len() - before <= 1 {
                no_progress_run += 1;
                assert!(no_progress_run <= 2, "no progress in encoder, this is a bug");
            } else {
                no_progress_run = 0;
            }
        }
        Ok(())
    }

    /// Append the EOM/pad sequence, switching back to ASCII first if
    /// a latched mode was still active.
    fn add_padding(&mut self, size: &SymbolInfo) {
        let mut size_left = size.max_data_codewords - self.codewords.len();
        if size_left == 0 {
            return;
        }
        if !self.mode.is_ascii() {
            self.mode = Mode::Ascii;
            self.push(UNLATCH);
            size_left -= 1;
        }
        if size_left == 0 {
            return;
        }
        self.push(ascii::PAD);
        size_left -= 1;
        for _ in 0..size_left {
            let pos = self.codewords.len() + 1;
            let pseudo_random = (((149 * pos) % 253) + 1) as u16;
            let tmp = ascii::PAD as u16 + pseudo_random;
            self.push(if tmp <= 254 { tmp as u8 } else { (tmp - 254) as u8 });
        }
    }
}

impl<'a> EncodingContext for Driver<'a> {
    fn maybe_switch_mode(&mut self) -> bool {
        let new_mode = selector::look_ahead(self.mode, self.rest());
        let switch = new_mode != self.mode;
        if switch {
            self.set_mode(new_mode);
        }
        switch
    }

    fn symbol_size_left(&mut self, extra_codewords: usize) -> Option<usize> {
        let size_used = self.codewords.len() + extra_codewords;
        let symbol = symbol_size::choose(size_used, self.code_form)?;
        Some(symbol.max_data_codewords - size_used)
    }

    fn eat(&mut self) -> Option<u8> {
        let (first, rest) = self.data.split_first()?;
        self.data = rest;
        Some(*first)
    }

    fn backup(&mut self, steps: usize) {
        let offset = (self.input.len() - self.data.len()) - steps;
        self.data = &self.input[offset..];
    }

    fn rest(&self) -> &[u8] {
        self.data
    }

    fn push(&mut self, ch: u8) {
        self.codewords.push(ch);
    }

    fn replace(&mut self, index: usize, ch: u8) {
        self.codewords[index] = ch;
    }

    fn insert(&mut self, index: usize, ch: u8) {
        self.codewords.insert(index, ch);
    }

    fn codewords(&self) -> &[u8] {
        &self.codewords
    }

    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        if !mode.is_ascii() {
            self.pending_latch = Some(mode.latch_codeword());
        }
    }
}

const PREAMBLE_GS1: u8 = 232;
const PREAMBLE_READER_PROGRAMMING: u8 = 234;
const PREAMBLE_FORMAT05: u8 = 236;
const PREAMBLE_FORMAT06: u8 = 237;

fn preamble_codeword(code_type: CodeType) -> Option<u8> {
    match code_type {
        CodeType::Default => None,
        CodeType::Gs1 => Some(PREAMBLE_GS1),
        CodeType::ReaderProgramming => Some(PREAMBLE_READER_PROGRAMMING),
        CodeType::Format05 => Some(PREAMBLE_FORMAT05),
        CodeType::Format06 => Some(PREAMBLE_FORMAT06),
    }
}

/// Strip input framing that would otherwise duplicate the type-marker
/// codeword.
fn strip_preamble(data: &[u8], code_type: CodeType) -> &[u8] {
    match code_type {
        CodeType::Default | CodeType::ReaderProgramming => data,
        CodeType::Gs1 => {
            if data.first() == Some(&0xE8) {
                &data[1..]
            } else {
                data
            }
        }
        CodeType::Format05 | CodeType::Format06 => {
            // header is "[)>\x1e05\x1d" or "[)>\x1e06\x1d"
            let digits: &[u8] = if code_type == CodeType::Format05 {
                b"05"
            } else {
                b"06"
            };
            let mut header = Vec::with_capacity(7);
            header.extend_from_slice(b"[)>\x1e");
            header.extend_from_slice(digits);
            header.push(0x1d);
            const TRAILER: &[u8] = b"\x1e\x04";
            if data.len() >= header.len() + TRAILER.len()
                && data.starts_with(&header[..])
                && data.ends_with(TRAILER)
            {
                &data[header.len()..data.len() - TRAILER.len()]
            } else {
                data
            }
        }
    }
}

/// Encode `data` into ECC200 data codewords, picking the smallest
/// [`SymbolInfo`] that can hold them.
pub(crate) fn encode_data(
    data: &[u8],
    code_type: CodeType,
    code_form: CodeForm,
) -> Result<(Vec<u8>, &'static SymbolInfo), EncodingError> {
    let stripped = strip_preamble(data, code_type);
    let mut driver = Driver::new(stripped, code_form);
    if let Some(preamble) = preamble_codeword(code_type) {
        driver.push(preamble);
    }
    driver.run()?;
    let size =
        symbol_size::choose(driver.codewords.len(), code_form).ok_or(EncodingError::OutOfSpace)?;
    driver.add_padding(size);
    Ok((driver.codewords, size))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal [`EncodingContext`] for unit-testing a single packer
    /// function in isolation, without going through [`Driver`].
    pub(crate) struct FakeContext {
        pub(crate) codewords: Vec<u8>,
    }

    impl FakeContext {
        pub(crate) fn new() -> Self {
            Self { codewords: Vec::new() }
        }
    }

    impl EncodingContext for FakeContext {
        fn maybe_switch_mode(&mut self) -> bool {
            false
        }

        fn symbol_size_left(&mut self, _extra_codewords: usize) -> Option<usize> {
            Some(0)
        }

        fn eat(&mut self) -> Option<u8> {
            None
        }

        fn backup(&mut self, _steps: usize) {}

        fn rest(&self) -> &[u8] {
            &[]
        }

        fn push(&mut self, ch: u8) {
            self.codewords.push(ch);
        }

        fn replace(&mut self, index: usize, ch: u8) {
            self.codewords[index] = ch;
        }

        fn insert(&mut self, index: usize, ch: u8) {
            self.codewords.insert(index, ch);
        }

        fn codewords(&self) -> &[u8] {
            &self.codewords
        }

        fn set_mode(&mut self, _mode: Mode) {}
    }

    #[test]
    fn empty_input_pads_to_smallest_symbol() {
        let (cw, size) = encode_data(&[], CodeType::Default, CodeForm::Square).unwrap();
        assert_eq!((size.rows, size.columns), (10, 10));
        assert_eq!(cw, vec![ascii::PAD, 175, 70]);
    }

    #[test]
    fn gs1_preamble_is_emitted_and_leading_marker_stripped() {
        let (cw, _) = encode_data(&[0xE8, b'1'], CodeType::Gs1, CodeForm::Square).unwrap();
        assert_eq!(cw[0], PREAMBLE_GS1);
        assert_eq!(cw[1], b'1' as u8 + 1);
    }

    #[test]
    fn plain_ascii_round_trips_digit_pairs() {
        let (cw, _) = encode_data(b"123456", CodeType::Default, CodeForm::Square).unwrap();
        // three digit pairs, each one codeword, then padding
        assert_eq!(cw[0], (1u8 * 10 + 2) + 130);
        assert_eq!(cw[1], (3u8 * 10 + 4) + 130);
        assert_eq!(cw[2], (5u8 * 10 + 6) + 130);
    }

    #[test]
    fn format06_header_and_trailer_are_stripped() {
        let mut data = Vec::new();
        data.extend_from_slice(b"[)>\x1e06\x1dABC\x1e\x04");
        let (cw, _) = encode_data(&data, CodeType::Format06, CodeForm::Square).unwrap();
        assert_eq!(cw[0], PREAMBLE_FORMAT06);
        assert_eq!(cw[1], b'A' as u8 + 1);
    }

    // End-to-end checks with literal expected codewords.

    #[test]
    fn pure_double_digit_ascii_matches_literal_codewords() {
        let (cw, _) =
            encode_data(b"001122334455667788994242", CodeType::Default, CodeForm::Square).unwrap();
        assert_eq!(
            cw,
            vec![130, 141, 152, 163, 174, 185, 196, 207, 218, 229, 172, 172]
        );
    }

    #[test]
    fn format06_with_lowercase_content_switches_to_text_mode() {
        let mut data = Vec::new();
        data.extend_from_slice(b"[)>\x1e06\x1dcontent\x1e\x04");
        let (cw, _) = encode_data(&data, CodeType::Format06, CodeForm::Square).unwrap();
        assert_eq!(cw, vec![237, 239, 104, 124, 209, 44, 254, 117]);
    }

    #[test]
    fn gs1_digit_prefix_round_trips_as_ascii_pairs() {
        let data = b"01012345678901281730033110A12W123\x1d21X12345678";
        let (cw, _) = encode_data(data, CodeType::Gs1, CodeForm::Square).unwrap();
        assert_eq!(&cw[..7], &[232, 131, 131, 153, 175, 197, 219]);
    }

    #[test]
    fn x12_alphabet_latches_into_x12_immediately() {
        let data = b"***X12 SHOULD BE USED HERE ABCDEFGHIJKLMNOPQRSTUVW";
        let (cw, _) = encode_data(data, CodeType::Default, CodeForm::Square).unwrap();
        assert_eq!(cw[0], 238);
    }

    #[test]
    fn raw_high_bytes_latch_into_base256() {
        let data = [130u8, 140, 150, 170, 180, 190, 200, 210, 220];
        let (cw, size) = encode_data(&data, CodeType::Default, CodeForm::Square).unwrap();
        assert_eq!(cw[0], 231);
        assert_eq!((size.rows, size.columns), (16, 16));
    }

    #[test]
    fn raw_high_bytes_match_literal_base256_codewords() {
        let data = [130u8, 140, 150, 170, 180, 190, 200, 210, 220];
        let (cw, _) = encode_data(&data, CodeType::Default, CodeForm::Square).unwrap();
        assert_eq!(
            cw,
            vec![231, 159, 175, 78, 239, 152, 57, 218, 121, 26, 185, 129]
        );
    }

    #[test]
    fn mixed_case_prose_matches_literal_codewords() {
        let (cw, size) =
            encode_data(b"SwiftDataMatrix", CodeType::Default, CodeForm::Square).unwrap();
        // The symbol is 18x18 (max_data_codewords 18), not 24x24: with
        // bytesPerRow = ceil(columns/8) both sizes round to 3, but the
        // literal codeword count below only fits the smaller size.
        assert_eq!((size.rows, size.columns), (18, 18));
        assert_eq!(
            cw,
            vec![
                84, 239, 228, 132, 206, 149, 92, 183, 14, 151, 211, 47, 254, 121, 129, 237, 133,
                28
            ]
        );
    }

    #[test]
    fn base256_run_past_254_bytes_gets_a_two_byte_length_header() {
        let data = vec![200u8; 300];
        let (cw, _) = encode_data(&data, CodeType::Default, CodeForm::Square).unwrap();
        assert_eq!(cw[0], 231);
        let expected_first = base256::randomize_255_state(1 + 249, 1);
        let expected_second = 300 % 250;
        let expected_second = base256::randomize_255_state(expected_second as u8, 2);
        assert_eq!(cw[1], expected_first);
        assert_eq!(cw[2], expected_second);
    }

    #[test]
    fn prose_fills_the_24x24_symbol() {
        let data = b"This DataMatrix code should be 24x24 elements";
        let (cw, size) = encode_data(data, CodeType::Default, CodeForm::Square).unwrap();
        assert_eq!((size.rows, size.columns), (24, 24));
        assert_eq!(cw.len(), size.max_data_codewords);
    }
}
