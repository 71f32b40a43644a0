//! Input options accepted by [`crate::encode`].

/// Selects the type-marker preamble emitted before any data codeword.
///
/// See ISO/IEC 16022 Annex on Function Characters for the standard
/// meaning of GS1 (FNC1), Reader Programming, and Macro 05/06 (here
/// named after the symbology identifier bytes they produce, `Format05`
/// and `Format06`, since the Macro decompression these macros imply on
/// the decode side is out of scope for this crate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeType {
    /// No preamble.
    #[default]
    Default,
    /// GS1 / FNC1 preamble (codeword 232). A leading `0xE8` byte in the
    /// input is stripped, as it would otherwise duplicate the preamble.
    Gs1,
    /// Reader Programming preamble (codeword 234).
    ReaderProgramming,
    /// Macro 05 preamble (codeword 236). The input's
    /// `"[)>\x1e05\x1d"` header and `"\x1e\x04"` trailer are stripped
    /// when both are present.
    Format05,
    /// Macro 06 preamble (codeword 237). Same stripping rule as
    /// [`CodeType::Format05`], with `"06"` in the header.
    Format06,
}

/// Requested symbol shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeForm {
    /// Only consider square symbols.
    #[default]
    Square,
    /// Only consider rectangular symbols.
    Rectangular,
    /// Consider every symbol size, square or rectangular.
    PreferRectangular,
}
