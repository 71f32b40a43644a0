//! Look-ahead cost heuristic used to pick the next encodation mode.
//!
//! Each of the six modes gets a running cost estimate, expressed in
//! codewords, as the upcoming bytes are scanned one at a time. Once
//! enough bytes have been seen the costs are compared and whichever
//! mode is unambiguously cheapest wins; ties are broken by a fixed
//! preference order that favors the modes least likely to need an
//! explicit unlatch soon (ASCII, Base256, EDIFACT, X12, C40, Text).
use super::c40;
use super::text;
use crate::charset::{is_native_edifact, is_native_x12};
use crate::mode::Mode;

type Count = u32;

/// Denominator shared by every running total, so comparisons never need
/// to deal with fractions of different scales.
const DENOM: Count = 12;

/// A cost expressed in twelfths of a codeword.
#[derive(Debug, Clone, Copy)]
struct Frac(Count);

impl Frac {
    fn new(num: Count, denom: Count) -> Self {
        let mut me = Self(0);
        me.add_mut(num, denom);
        me
    }

    fn add_mut(&mut self, num: Count, denom: Count) -> &mut Self {
        debug_assert!(denom > 0 && DENOM % denom == 0);
        self.0 += num * (DENOM / denom);
        self
    }

    fn add1(&self) -> Self {
        let mut new = *self;
        new.add_mut(1, 1);
        new
    }

    fn ceil(&mut self) -> &mut Self {
        let rest = self.0 % DENOM;
        if rest != 0 {
            self.0 += DENOM - rest;
        }
        self
    }
}

#[derive(Debug, Clone)]
struct Stat {
    ascii: Frac,
    c40: Frac,
    text: Frac,
    x12: Frac,
    edf: Frac,
    b256: Frac,
}

impl Stat {
    fn new(mode: Mode) -> Self {
        let mut me = if mode.is_ascii() {
            Self {
                ascii: Frac::new(0, 1),
                c40: Frac::new(1, 1),
                text: Frac::new(1, 1),
                x12: Frac::new(1, 1),
                edf: Frac::new(1, 1),
                b256: Frac::new(5, 4),
            }
        } else {
            Self {
                ascii: Frac::new(1, 1),
                c40: Frac::new(2, 1),
                text: Frac::new(2, 1),
                x12: Frac::new(2, 1),
                edf: Frac::new(2, 1),
                b256: Frac::new(9, 4),
            }
        };
        match mode {
            Mode::Ascii => (),
            Mode::C40 => me.c40 = Frac::new(0, 1),
            Mode::Text => me.text = Frac::new(0, 1),
            Mode::X12 => me.x12 = Frac::new(0, 1),
            Mode::Edifact => me.edf = Frac::new(0, 1),
            Mode::Base256 => me.b256 = Frac::new(0, 1),
        }
        me
    }

    fn count_ascii(&mut self, ch: u8) {
        if ch.is_ascii_digit() {
            self.ascii.add_mut(1, 2);
        } else if ch > 127 {
            self.ascii.ceil().add_mut(2, 1);
        } else {
            self.ascii.ceil().add_mut(1, 1);
        }
    }

    fn count_c40(&mut self, ch: u8) {
        self.c40.add_mut(c40::val_size(ch) as Count * 2, 3);
    }

    fn count_text(&mut self, ch: u8) {
        self.text.add_mut(text::val_size(ch) as Count * 2, 3);
    }

    fn count_x12(&mut self, ch: u8) {
        if is_native_x12(ch) {
            self.x12.add_mut(2, 3);
        } else if ch > 127 {
            self.x12.add_mut(13, 3);
        } else {
            self.x12.add_mut(10, 3);
        }
    }

    fn count_edifact(&mut self, ch: u8) {
        if matches!(ch, 32..=94) {
            self.edf.add_mut(3, 4);
        } else if ch > 127 {
            self.edf.add_mut(17, 4);
        } else {
            self.edf.add_mut(13, 4);
        }
    }

    fn count_b256(&mut self, _ch: u8) {
        self.b256.add_mut(1, 1);
    }

    fn round_up(&mut self) {
        self.ascii.ceil();
        self.c40.ceil();
        self.text.ceil();
        self.x12.ceil();
        self.edf.ceil();
        self.b256.ceil();
    }

    fn min_no_ascii(&self, v: Count) -> bool {
        v <= self.c40.0 && v <= self.text.0 && v <= self.x12.0 && v <= self.edf.0 && v <= self.b256.0
    }

    fn strict_min_no_b256_no_ascii(&self, v: Count) -> bool {
        v < self.c40.0 && v < self.text.0 && v < self.x12.0 && v < self.edf.0
    }

    fn strict_min_no_b256(&self, v: Count) -> bool {
        v < self.ascii.0 && v < self.c40.0 && v < self.text.0 && v < self.x12.0 && v < self.edf.0
    }

    fn strict_min_no_edf(&self, v: Count) -> bool {
        v < self.ascii.0 && v < self.c40.0 && v < self.text.0 && v < self.x12.0 && v < self.b256.0
    }

    fn strict_min_no_text(&self, v: Count) -> bool {
        v < self.ascii.0 && v < self.c40.0 && v < self.x12.0 && v < self.edf.0 && v < self.b256.0
    }

    fn strict_min_no_x12(&self, v: Count) -> bool {
        v < self.ascii.0 && v < self.c40.0 && v < self.text.0 && v < self.edf.0 && v < self.b256.0
    }

    fn strict_min_no_ascii_all(&self, v: Count) -> bool {
        v < self.c40.0 && v < self.text.0 && v < self.x12.0 && v < self.edf.0 && v < self.b256.0
    }

    fn strict_min_ascii_b256_edf_text(&self, v: Count) -> bool {
        v < self.ascii.0 && v < self.b256.0 && v < self.edf.0 && v < self.text.0
    }
}

/// Whether the upcoming bytes favor X12 over C40 in a tie: true if a
/// CR, `*` or `>` shows up before any non-native-X12 byte.
fn x12_advantage(data: &[u8]) -> bool {
    for &ch in data {
        if matches!(ch, 0x0D | b'*' | b'>') {
            return true;
        }
        if !is_native_x12(ch) {
            return false;
        }
    }
    false
}

/// Decide the mode to use for the upcoming bytes, given the current mode.
///
/// Scans `data` accumulating a per-mode cost estimate until at least 3
/// bytes have been read (4 if starting from ASCII), then returns the
/// first mode found unambiguously cheapest in a fixed preference order.
/// If `data` runs out before that, the same preference order is applied
/// to the final totals. A short-run post-filter then vetoes staying in
/// X12/EDIFACT when the immediately upcoming bytes don't actually
/// sustain it, see [`passes_post_filter`].
pub(super) fn look_ahead(mode: Mode, data: &[u8]) -> Mode {
    let chosen = cost_minimum(mode, data);
    if passes_post_filter(mode, chosen, data) {
        chosen
    } else {
        Mode::Ascii
    }
}

/// Once the cost model picks X12 (or EDIFACT) to follow an already-active
/// X12 (or EDIFACT) run, require the next up-to-3 (up-to-4) bytes to all
/// be native to that mode; a single foreign byte just past the cost
/// model's horizon means the run is ending and ASCII should take over
/// instead of re-latching.
fn passes_post_filter(current: Mode, chosen: Mode, data: &[u8]) -> bool {
    match (current, chosen) {
        (Mode::X12, Mode::X12) => {
            data.iter().take(3).all(|&ch| is_native_x12(ch))
        }
        (Mode::Edifact, Mode::Edifact) => {
            data.iter().take(4).all(|&ch| is_native_edifact(ch))
        }
        _ => true,
    }
}

fn cost_minimum(mode: Mode, mut data: &[u8]) -> Mode {
    let mut stat = Stat::new(mode);
    let min_read = if mode.is_ascii() { 4 } else { 3 };
    let mut processed = 0;

    while let Some((&ch, rest)) = data.split_first() {
        data = rest;
        stat.count_ascii(ch);
        stat.count_c40(ch);
        stat.count_text(ch);
        stat.count_x12(ch);
        stat.count_edifact(ch);
        stat.count_b256(ch);
        processed += 1;

        if processed >= min_read {
            let mut probe = stat.clone();
            probe.round_up();
            if probe.strict_min_no_ascii_all(probe.ascii.0) {
                return Mode::Ascii;
            }
            if probe.b256.0 <= probe.ascii.0 || probe.strict_min_no_b256_no_ascii(probe.b256.0) {
                return Mode::Base256;
            }
            if probe.strict_min_no_edf(probe.edf.0) {
                return Mode::Edifact;
            }
            if probe.strict_min_no_text(probe.text.0) {
                return Mode::Text;
            }
            if probe.strict_min_no_x12(probe.x12.0) {
                return Mode::X12;
            }
            if probe.strict_min_ascii_b256_edf_text(probe.c40.add1().0) {
                if probe.c40.0 < probe.x12.0 {
                    return Mode::C40;
                } else if probe.c40.0 == probe.x12.0 {
                    return if x12_advantage(data) { Mode::X12 } else { Mode::C40 };
                }
            }
        }
    }

    stat.round_up();
    if stat.min_no_ascii(stat.ascii.0) {
        Mode::Ascii
    } else if stat.strict_min_no_b256(stat.b256.0) {
        Mode::Base256
    } else if stat.strict_min_no_edf(stat.edf.0) {
        Mode::Edifact
    } else if stat.strict_min_no_text(stat.text.0) {
        Mode::Text
    } else if stat.strict_min_no_x12(stat.x12.0) {
        Mode::X12
    } else {
        Mode::C40
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frac_basics() {
        assert_eq!(Frac::new(0, 1).0, 0);
        assert_eq!(Frac::new(1, 2).0, 6);
        assert_eq!(Frac::new(1, 1).0, 12);
        assert_eq!(Frac::new(1, 2).add1().0, 18);
        assert_eq!(Frac::new(1, 2).ceil().0, 12);
        assert_eq!(Frac::new(12, 1).ceil().0, 144);
    }

    #[test]
    fn edifact_falls_back_to_ascii_on_mixed_input() {
        assert_eq!(
            look_ahead(Mode::Edifact, b".\xFCXX.XXX.XXX.XXX.XXX.XXX.XXX"),
            Mode::Ascii
        );
        assert_eq!(
            look_ahead(Mode::Ascii, b".\xFCXX.XXX.XXX.XXX.XXX.XXX.XXX"),
            Mode::Ascii
        );
    }

    #[test]
    fn post_filter_vetoes_x12_continuation_on_foreign_byte() {
        assert!(!passes_post_filter(Mode::X12, Mode::X12, b"A!B"));
        assert!(passes_post_filter(Mode::X12, Mode::X12, b"A*B"));
    }

    #[test]
    fn post_filter_vetoes_edifact_continuation_on_foreign_byte() {
        assert!(!passes_post_filter(Mode::Edifact, Mode::Edifact, b"ABC\x7F"));
        assert!(passes_post_filter(Mode::Edifact, Mode::Edifact, b"ABCD"));
    }

    #[test]
    fn post_filter_is_a_no_op_outside_a_same_mode_continuation() {
        assert!(passes_post_filter(Mode::Ascii, Mode::X12, b"!!!"));
        assert!(passes_post_filter(Mode::X12, Mode::C40, b"!!!"));
    }

    #[test]
    fn c40_stays_in_c40_for_mixed_case_text() {
        assert_eq!(look_ahead(Mode::C40, b"AIMaimaimaim"), Mode::C40);
    }

    #[test]
    fn digits_prefer_ascii() {
        assert_eq!(look_ahead(Mode::Ascii, b"0123456789"), Mode::Ascii);
    }

    #[test]
    fn long_uppercase_run_prefers_c40() {
        assert_eq!(look_ahead(Mode::Ascii, b"ABCDEFGHIJKL"), Mode::C40);
    }
}
