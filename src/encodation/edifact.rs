//! EDIFACT encodation.
//!
//! Packs four native EDIFACT characters (0x20-0x5E) into three
//! codewords as six-bit groups, with a dedicated unlatch sentinel
//! (`0b011111`) rather than the shared codeword 254 used by the other
//! latched modes.
use arrayvec::ArrayVec;

use super::ascii;
use super::EncodingContext;
use crate::charset::is_native_edifact;
use crate::error::EncodingError;
use crate::mode::Mode;

pub(crate) const UNLATCH: u8 = 0b011111;

/// Encode 1 to 4 characters using EDIFACT and write it to the context.
fn write4<T: EncodingContext>(ctx: &mut T, s: &ArrayVec<u8, 4>) {
    let s1 = s.get(1).copied().unwrap_or(0) & 0b11_1111;
    ctx.push((s[0] << 2) | (s1 >> 4));

    if s.len() >= 2 {
        let s2 = s.get(2).copied().unwrap_or(0) & 0b11_1111;
        ctx.push((s1 << 4) | (s2 >> 2));

        if s.len() >= 3 {
            let s3 = s.get(3).copied().unwrap_or(0) & 0b11_1111;
            ctx.push((s2 << 6) | s3);
        }
    }
}

fn handle_end<T: EncodingContext>(
    ctx: &mut T,
    mut symbols: ArrayVec<u8, 4>,
) -> Result<(), EncodingError> {
    // Special case: if what's left (buffered symbols plus unread data)
    // fits in at most two ASCII codewords and there is room for exactly
    // that, skip the unlatch codeword entirely and switch back silently.
    let rest_chars = symbols.len() + ctx.characters_left();
    if rest_chars <= 4 {
        let rest: ArrayVec<u8, 4> = symbols.iter().copied().chain(ctx.rest().iter().copied()).collect();
        let ascii_size = ascii::encoding_size(&rest);
        if ascii_size <= 2 {
            if let Some(left) = ctx.symbol_size_left(ascii_size) {
                let space = left + ascii_size;
                if space <= 2 && ascii_size <= space {
                    ctx.backup(symbols.len());
                    ctx.set_mode(Mode::Ascii);
                    return Ok(());
                }
            }
        }
    }

    if symbols.is_empty() {
        if !ctx.has_more_characters() {
            let space_left = ctx.symbol_size_left(0).ok_or(EncodingError::OutOfSpace)?;
            if space_left > 0 {
                ctx.push(UNLATCH << 2);
                ctx.set_mode(Mode::Ascii);
            }
        } else {
            ctx.push(UNLATCH << 2);
        }
    } else {
        debug_assert!(symbols.len() <= 3);
        if !ctx.has_more_characters() {
            let has_space = ctx
                .symbol_size_left(symbols.len())
                .ok_or(EncodingError::OutOfSpace)?
                > 0;
            if has_space || symbols.len() == 3 {
                symbols.push(UNLATCH);
                ctx.set_mode(Mode::Ascii);
            }
        } else {
            symbols.push(UNLATCH);
        }
        write4(ctx, &symbols);
    }
    Ok(())
}

pub(super) fn encode<T: EncodingContext>(ctx: &mut T) -> Result<(), EncodingError> {
    let mut symbols: ArrayVec<u8, 4> = ArrayVec::new();
    while ctx.has_more_characters() {
        if !is_native_edifact(ctx.peek(0).unwrap()) {
            break;
        }
        symbols.push(ctx.eat().unwrap());

        if symbols.len() == 4 {
            write4(ctx, &symbols);
            symbols.clear();
            if ctx.maybe_switch_mode() {
                return handle_end(ctx, symbols);
            }
        } else if ctx.maybe_switch_mode() {
            return handle_end(ctx, symbols);
        }
    }
    handle_end(ctx, symbols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encodation::tests::FakeContext;

    #[test]
    fn write4_packs_four_six_bit_groups_into_three_codewords() {
        let mut ctx = FakeContext::new();
        let s: ArrayVec<u8, 4> = [0b10_01_00, 0b11_01_10, 0b011010, 1].into_iter().collect();
        write4(&mut ctx, &s);
        assert_eq!(ctx.codewords, vec![0b10_01_00_11, 0b01_10_01_10, 0b10_00_00_01]);
    }

    #[test]
    fn write4_handles_three_symbols() {
        let mut ctx = FakeContext::new();
        let s: ArrayVec<u8, 4> = [0b10_01_00, 0b11_01_10, 0b011010].into_iter().collect();
        write4(&mut ctx, &s);
        assert_eq!(ctx.codewords, vec![0b10_01_00_11, 0b01_10_01_10, 0b10_00_00_00]);
    }

    #[test]
    fn write4_handles_one_symbol() {
        let mut ctx = FakeContext::new();
        let s: ArrayVec<u8, 4> = [0b10_01_00].into_iter().collect();
        write4(&mut ctx, &s);
        assert_eq!(ctx.codewords, vec![0b10_01_00_00]);
    }
}
