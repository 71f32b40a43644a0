//! C40 encodation.
//!
//! Packs upper-case letters, digits and space natively, three values to
//! two codewords (`V = 1600*c1 + 40*c2 + c3 + 1`). Everything else goes
//! through a shift set, itself counted as one or two extra values. Text
//! mode ([`super::text`]) reuses every function here with upper and
//! lower case swapped before they reach [`low_ascii_to_c40_symbols`].
use arrayvec::ArrayVec;

use super::ascii;
use super::EncodingContext;
use crate::error::EncodingError;
use crate::mode::Mode;

const SHIFT1: u8 = 0;
const SHIFT2: u8 = 1;
const SHIFT3: u8 = 2;
const UPPER_SHIFT: u8 = 30;

pub(super) fn low_ascii_to_c40_symbols(buf: &mut ArrayVec<u8, 6>, ch: u8) {
    match ch {
        b' ' => buf.push(3),
        ch @ b'0'..=b'9' => buf.push(ch - b'0' + 4),
        ch @ b'A'..=b'Z' => buf.push(ch - b'A' + 14),
        ch @ 0..=31 => {
            buf.push(SHIFT1);
            buf.push(ch);
        }
        ch @ 33..=47 => {
            buf.push(SHIFT2);
            buf.push(ch - 33);
        }
        ch @ 58..=64 => {
            buf.push(SHIFT2);
            buf.push(ch - 58 + 15);
        }
        ch @ 91..=95 => {
            buf.push(SHIFT2);
            buf.push(ch - 91 + 22);
        }
        ch @ 96..=127 => {
            buf.push(SHIFT3);
            buf.push(ch - 96);
        }
        _ => unreachable!("only called with low_ascii_to_*_symbols on bytes < 128"),
    }
}

pub(crate) fn val_size(ch: u8) -> u8 {
    match ch {
        b' ' | b'0'..=b'9' | b'A'..=b'Z' => 1,
        0..=31 | 33..=47 | 58..=64 | 91..=127 => 2,
        ch => 2 + val_size(ch - 128),
    }
}

/// Pack three C40/Text values into two codewords.
pub(super) fn write_three_values<T: EncodingContext>(ctx: &mut T, c1: u8, c2: u8, c3: u8) {
    let enc = 1600 * c1 as u16 + 40 * c2 as u16 + c3 as u16 + 1;
    ctx.push((enc >> 8) as u8);
    ctx.push((enc & 0xFF) as u8);
}

/// Handle a C40/Text packer reaching the end of its buffered values, per
/// the four end-of-data cases in ISO/IEC 16022 5.2.5.2/5.2.6.2.
pub(super) fn handle_end<T: EncodingContext>(
    ctx: &mut T,
    last_ch: u8,
    mut buf: ArrayVec<u8, 6>,
) -> Result<(), EncodingError> {
    debug_assert!(buf.len() <= 2);

    let mode_switch = ctx.has_more_characters();
    if !mode_switch {
        let size_left = ctx
            .symbol_size_left(buf.len())
            .ok_or(EncodingError::OutOfSpace)?;
        match (size_left + buf.len(), buf.len()) {
            // case b): two dangling values, exactly two codewords left.
            (2, 2) => {
                write_three_values(ctx, buf[0], buf[1], SHIFT1);
                return Ok(());
            }
            // case c): one dangling value, exactly two codewords left.
            (2, 1) => {
                ctx.push(super::UNLATCH);
                ctx.set_mode(Mode::Ascii);
                ctx.backup(1);
                return Ok(());
            }
            // case d): one dangling value, exactly one codeword left.
            (1, 1) => {
                if ascii::encoding_size(&[last_ch]) == 1 {
                    ctx.set_mode(Mode::Ascii);
                    ctx.backup(1);
                    return Ok(());
                }
            }
            // case a) is handled by the main packing loop, nothing dangling.
            _ => (),
        }
    }

    if !buf.is_empty() {
        buf.push(SHIFT2);
        if buf.len() == 2 {
            buf.push(UPPER_SHIFT);
        }
        write_three_values(ctx, buf[0], buf[1], buf[2]);
        if !mode_switch {
            ctx.set_mode(Mode::Ascii);
        }
    }

    let chars_left = ctx.characters_left();
    if chars_left > 0 {
        if chars_left == 2 && ascii::two_digits_coming(ctx.rest()) {
            let space_left = ctx.symbol_size_left(1).ok_or(EncodingError::OutOfSpace)?;
            ctx.set_mode(Mode::Ascii);
            if space_left >= 1 {
                ctx.push(super::UNLATCH);
            }
            return Ok(());
        }
        ctx.push(super::UNLATCH);
    } else if ctx.symbol_size_left(0).ok_or(EncodingError::OutOfSpace)? > 0 {
        ctx.push(super::UNLATCH);
        if !mode_switch {
            ctx.set_mode(Mode::Ascii);
        }
    }
    Ok(())
}

/// Shared packing loop for C40 and Text: accumulate values from
/// `low_ascii_write` and flush them three at a time.
pub(super) fn encode_generic<T, F>(ctx: &mut T, low_ascii_write: F) -> Result<(), EncodingError>
where
    T: EncodingContext,
    F: Fn(&mut ArrayVec<u8, 6>, u8),
{
    let mut buf: ArrayVec<u8, 6> = ArrayVec::new();
    let mut last_ch = 0;
    while let Some(ch) = ctx.eat() {
        if buf.is_empty() && ch.is_ascii_digit() && matches!(ctx.rest(), [c] if c.is_ascii_digit())
        {
            ctx.backup(1);
            break;
        }
        to_vals(&mut buf, ch, &low_ascii_write);
        last_ch = ch;
        while buf.len() >= 3 {
            write_three_values(ctx, buf[0], buf[1], buf[2]);
            buf.drain(0..3);
        }
        if ctx.maybe_switch_mode() {
            break;
        }
    }
    handle_end(ctx, last_ch, buf)
}

fn to_vals<F>(buf: &mut ArrayVec<u8, 6>, ch: u8, low_ascii_write: F)
where
    F: Fn(&mut ArrayVec<u8, 6>, u8),
{
    match ch {
        ch @ 0..=127 => low_ascii_write(buf, ch),
        ch => {
            buf.push(SHIFT2);
            buf.push(UPPER_SHIFT);
            low_ascii_write(buf, ch - 128);
        }
    }
}

pub(super) fn encode<T: EncodingContext>(ctx: &mut T) -> Result<(), EncodingError> {
    encode_generic(ctx, low_ascii_to_c40_symbols)
}
