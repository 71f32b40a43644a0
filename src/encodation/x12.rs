//! X12 encodation.
//!
//! Packs three native X12 characters (digits, upper-case letters,
//! space, CR, `*`, `>`) into two codewords via the same `write_three_values`
//! scheme as C40. Unlike C40, X12 has no shift sets: a byte outside its
//! alphabet cannot be packed at all, so the packer stops and unlatches
//! as soon as the next three bytes are not all native.
use arrayvec::ArrayVec;

use super::c40;
use super::EncodingContext;
use crate::charset::is_native_x12;
use crate::error::EncodingError;
use crate::mode::Mode;

fn enc(ch: u8) -> u8 {
    match ch {
        0x0D => 0,
        b'*' => 1,
        b'>' => 2,
        b' ' => 3,
        ch @ b'0'..=b'9' => ch - b'0' + 4,
        ch @ b'A'..=b'Z' => ch - b'A' + 14,
        _ => unreachable!("x12::encode only consumes bytes already checked native"),
    }
}

pub(super) fn encode<T: EncodingContext>(ctx: &mut T) -> Result<(), EncodingError> {
    while ctx.characters_left() >= 3 {
        let next3 = [
            ctx.peek(0).unwrap(),
            ctx.peek(1).unwrap(),
            ctx.peek(2).unwrap(),
        ];
        if !next3.iter().all(|&ch| is_native_x12(ch)) {
            break;
        }
        let c1 = enc(ctx.eat().unwrap());
        let c2 = enc(ctx.eat().unwrap());
        let c3 = enc(ctx.eat().unwrap());
        c40::write_three_values(ctx, c1, c2, c3);
        if ctx.maybe_switch_mode() {
            return Ok(());
        }
    }

    // 5.2.7.2: exactly one X12 character left and exactly one codeword
    // of space remains for the whole symbol: unlatch to ASCII implicitly.
    if ctx.characters_left() == 1 && ctx.symbol_size_left(1).ok_or(EncodingError::OutOfSpace)? == 0
    {
        ctx.set_mode(Mode::Ascii);
        return Ok(());
    }

    let mut buf: ArrayVec<u8, 6> = ArrayVec::new();
    let mut last_ch = 0;
    if ctx.characters_left() <= 2 {
        while let Some(ch) = ctx.eat() {
            buf.push(enc(ch));
            last_ch = ch;
        }
    }
    c40::handle_end(ctx, last_ch, buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enc_maps_specials_before_digits_and_letters() {
        assert_eq!(enc(0x0D), 0);
        assert_eq!(enc(b'*'), 1);
        assert_eq!(enc(b'>'), 2);
        assert_eq!(enc(b' '), 3);
        assert_eq!(enc(b'0'), 4);
        assert_eq!(enc(b'A'), 14);
    }
}
