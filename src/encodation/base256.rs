//! Base256 encodation.
//!
//! Packs arbitrary bytes verbatim, preceded by a one- or two-byte
//! length header, then randomizes every byte (including the header)
//! with a position-dependent permutation so that repetitive input
//! cannot produce a patch of all-black or all-white modules.
use super::EncodingContext;
use crate::error::EncodingError;
use crate::mode::Mode;

/// Apply the per-byte randomization defined in ISO/IEC 16022 Annex B.1:
/// `(ch + ((n*149) mod 254) + 1) mod 256`.
///
/// `pos` is this codeword's own zero-based index in the full codeword
/// stream (so the latch codeword itself sits at index 0, and the first
/// randomized byte — the Base256 length header — lands at `pos = 1`).
pub(super) fn randomize_255_state(ch: u8, pos: usize) -> u8 {
    let pseudo_random = ((149 * pos) % 254) + 1;
    ((ch as u16 + pseudo_random as u16) % 256) as u8
}

/// Patch in the length header now that the run's length is known, then
/// randomize the whole run (header included).
///
/// A run of up to 254 bytes gets a one-byte length `L`; longer runs get
/// two bytes, `floor(L/250) + 249` then `L mod 250`, failing once
/// `floor(L/250)` exceeds 6 (no third length byte exists to carry it).
fn write_length<T: EncodingContext>(ctx: &mut T, start: usize) -> Result<(), EncodingError> {
    let space_left = ctx.symbol_size_left(0).ok_or(EncodingError::OutOfSpace)?;
    let mut data_written = ctx.codewords().len() - start;
    if ctx.has_more_characters() || space_left > 0 {
        let data_count = data_written - 1;
        if data_count <= 254 {
            ctx.replace(start, data_count as u8);
        } else {
            let hi = data_count / 250;
            if hi > 6 {
                return Err(EncodingError::OutOfSpace);
            }
            ctx.replace(start, (hi + 249) as u8);
            ctx.insert(start + 1, (data_count % 250) as u8);
            data_written += 1;
        }
    }
    for i in 0..data_written {
        let ch = ctx.codewords()[start + i];
        ctx.replace(start + i, randomize_255_state(ch, start + i));
    }
    Ok(())
}

pub(super) fn encode<T: EncodingContext>(ctx: &mut T) -> Result<(), EncodingError> {
    let start = ctx.codewords().len();
    ctx.push(0); // length header placeholder

    loop {
        if let Some(ch) = ctx.eat() {
            ctx.push(ch);
        }
        if !ctx.has_more_characters() || ctx.maybe_switch_mode() {
            write_length(ctx, start)?;
            if !ctx.has_more_characters() {
                ctx.set_mode(Mode::Ascii);
            }
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn randomization_wraps_at_256() {
        assert_eq!(randomize_255_state(0, 1), (149 % 254) + 1);
        assert_eq!(randomize_255_state(253, 1), 147);
    }

    #[test]
    fn randomization_uses_modulus_254_not_255() {
        // 149*2 = 298; mod 254 gives 44 (+1 = 45), mod 255 would give 43
        // (+1 = 44). The two moduli diverge starting at this position.
        assert_eq!(randomize_255_state(0, 2), 45);
    }

    #[test]
    fn randomized_header_and_data_match_the_worked_nine_byte_example() {
        // header length byte (9), then the 9 raw input bytes, positions
        // 1..=10 (position 0 is the Base256 latch codeword itself, never
        // randomized since it's written directly by the driver).
        let raw = [9u8, 130, 140, 150, 170, 180, 190, 200, 210, 220];
        let expected = [159u8, 175, 78, 239, 152, 57, 218, 121, 26, 185];
        for (i, (&ch, &want)) in raw.iter().zip(expected.iter()).enumerate() {
            assert_eq!(randomize_255_state(ch, i + 1), want);
        }
    }
}
