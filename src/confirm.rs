use std::io::{self, BufRead, Write};

pub const QUESTION: &str = "Commit with this message? (y/N) ";

/// Ask the confirmation question and block on one line of input.
///
/// Only a bare `y` (any case) accepts. Empty input, EOF and padded answers decline.
pub fn confirm<R, W>(input: &mut R, output: &mut W) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{QUESTION}")?;
    output.flush()?;

    let mut buf = String::new();
    input.read_line(&mut buf)?;
    Ok(is_affirmative(&buf))
}

pub fn is_affirmative(answer: &str) -> bool {
    answer.trim_end_matches(['\r', '\n']).eq_ignore_ascii_case("y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(text: &str) -> (bool, String) {
        let mut input = Cursor::new(text.as_bytes().to_vec());
        let mut output = Vec::new();
        let accepted = confirm(&mut input, &mut output).unwrap();
        (accepted, String::from_utf8(output).unwrap())
    }

    #[test]
    fn lowercase_and_uppercase_y_accept() {
        assert!(answer("y\n").0);
        assert!(answer("Y\n").0);
        assert!(answer("y\r\n").0);
    }

    #[test]
    fn everything_else_declines() {
        for text in ["", "\n", "n\n", "yes\n", "no\n", "yy\n", "q\n", " y\n", "y \n", "\ty\n"] {
            assert!(!answer(text).0, "{text:?} should decline");
        }
    }

    #[test]
    fn question_is_written_before_reading() {
        let (_, out) = answer("n\n");
        assert_eq!(out, QUESTION);
    }
}
