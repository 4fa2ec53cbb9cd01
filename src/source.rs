/// Splits a source buffer into its non-blank lines, pairing each with its
/// 1-based physical line number. Lines holding only spaces and tabs are
/// skipped but still counted.
pub fn lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.chars().all(|c| c == ' ' || c == '\t'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_skip_blank_lines_but_keep_physical_numbering() {
        let input = "1 + 2\n\n   \t\n(3)\r\n4 * 5";

        assert_eq!(
            vec![(1, "1 + 2"), (4, "(3)"), (5, "4 * 5")],
            lines(input).collect::<Vec<_>>()
        );
    }

    #[test]
    fn should_yield_nothing_for_empty_or_blank_input() {
        for input in ["", "\n", " \t \n\n  "] {
            assert_eq!(0, lines(input).count(), "input: {:?}", input)
        }
    }
}
