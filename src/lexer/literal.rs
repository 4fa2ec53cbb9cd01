use parcel::parsers::character::{any_character, digit, expect_character};
use parcel::prelude::v1::*;

/// The digit runs of a numeric literal, split at its decimal point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NumberDigits {
    pub whole: String,
    pub fraction: Option<String>,
}

/// Matches a run of digits optionally followed by a single `.` and a second
/// run of digits. A dot that is not immediately followed by a digit is left
/// in the remainder, as is any second dot.
pub(crate) fn number<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], NumberDigits> {
    parcel::join(
        parcel::one_or_more(digit(10)),
        parcel::optional(parcel::right(parcel::join(
            expect_character('.'),
            parcel::one_or_more(digit(10)),
        ))),
    )
    .map(|(whole, fraction)| NumberDigits {
        whole: whole.into_iter().collect(),
        fraction: fraction.map(|digits| digits.into_iter().collect()),
    })
}

/// Matches an ASCII letter followed by any number of ASCII letters or digits.
pub(crate) fn word<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], String> {
    parcel::join(
        any_character().predicate(|c| c.is_ascii_alphabetic()),
        parcel::zero_or_more(any_character().predicate(|c| c.is_ascii_alphanumeric())),
    )
    .map(|(head, tail)| std::iter::once(head).chain(tail).collect::<String>())
}

/// Matches an opening `quote`, the verbatim body, and the closing `quote` if
/// one exists. The flag is false when input ran out before the string closed.
pub(crate) fn quoted<'a>(quote: char) -> impl parcel::Parser<'a, &'a [(usize, char)], (String, bool)> {
    parcel::right(parcel::join(
        expect_character(quote),
        parcel::join(
            parcel::zero_or_more(any_character().predicate(move |c| *c != quote)),
            parcel::optional(expect_character(quote)),
        ),
    ))
    .map(|(body, closing)| (body.into_iter().collect::<String>(), closing.is_some()))
}

/// Runs a sub-scanner against the input, returning its output and the number
/// of characters it consumed.
pub(crate) fn scan_with<'a, P, B>(parser: P, input: &'a [(usize, char)]) -> Option<(B, usize)>
where
    P: parcel::Parser<'a, &'a [(usize, char)], B>,
{
    match parser.parse(input) {
        Ok(MatchStatus::Match {
            span: _,
            remainder,
            inner,
        }) => Some((inner, input.len() - remainder.len())),
        Ok(MatchStatus::NoMatch(_)) | Err(_) => None,
    }
}
