//! Lexical utilities shared by the line parser, the path resolver and the value parsers.
//!
//! All of these functions work on borrowed slices of the input and never modify it.

use crate::error::ErrorKind;

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Trims spaces, tabs and line terminators from both ends of a string.
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_space)
}

/// Splits a key-value line on the first occurrence of the delimiter.
///
/// Both the key and the value are trimmed.
/// It is an error for the delimiter to be missing or for the value to be empty.
pub fn extract_key_and_value(line: &str, delimiter: char) -> Result<(&str, &str), ErrorKind> {
    let Some(i) = line.find(delimiter) else {
        return Err(ErrorKind::MissingDelimiter { delimiter });
    };
    let key = trim(&line[..i]);
    let value = trim(&line[i + delimiter.len_utf8()..]);
    if value.is_empty() {
        return Err(ErrorKind::MissingValue { delimiter });
    }
    Ok((key, value))
}

/// Returns whether the string is written as an array access; i.e., whether it contains a bracket.
///
/// The access itself may still be malformed; [`parse_array_access`] validates it.
pub fn is_array_access(s: &str) -> bool {
    s.contains(['[', ']'])
}

/// Parses a string of the form `name[index]`.
///
/// Returns the name, with trailing whitespace removed, and the index.
pub fn parse_array_access(s: &str) -> Result<(&str, usize), ErrorKind> {
    let err = || ErrorKind::InvalidArrayAccess {
        segment: s.to_string(),
    };
    let (Some(l), Some(r)) = (s.find('['), s.find(']')) else {
        return Err(err());
    };
    if r < l || !trim(&s[r + 1..]).is_empty() {
        return Err(err());
    }
    let index = trim(&s[l + 1..r]);
    if index.is_empty() || !index.chars().all(|c| c.is_ascii_digit()) {
        return Err(err());
    }
    let index = index.parse::<usize>().map_err(|_| err())?;
    Ok((s[..l].trim_end_matches(is_space), index))
}

/// Gets the first word in a string.
///
/// Leading whitespace is skipped and the word ends at the next space or tab.
/// Returns the word and the rest of the string after the word,
///     or [`None`] if the string contains no word.
pub fn get_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start_matches(is_space);
    let end = s.find([' ', '\t']).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some((&s[..end], &s[end..]))
}

/// Iterator over the comma or whitespace separated tokens in a value.
///
/// Empty tokens are skipped, so `1, 2,,3` yields `1`, `2` and `3`.
pub struct Tokens<'a> {
    source: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let is_separator = |c: char| c == ',' || c == ' ' || c == '\t';
        let start = self.source.trim_start_matches(is_separator);
        if start.is_empty() {
            self.source = start;
            return None;
        }
        let end = start.find(is_separator).unwrap_or(start.len());
        self.source = &start[end..];
        Some(&start[..end])
    }
}

/// Returns an iterator over the comma or whitespace separated tokens in a value.
pub fn tokens(source: &str) -> Tokens {
    Tokens { source }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! key_value_tests {
        ($( ($name: ident, $input: expr, $want: expr, ), )+ ) => {
            $(
                #[test]
                fn $name() {
                    let got = extract_key_and_value($input, '=');
                    assert_eq!(got, $want);
                }
            )+
        };
    }

    key_value_tests!(
        (basic, "size = 16", Ok(("size", "16")),),
        (no_spaces, "size=16", Ok(("size", "16")),),
        (
            surrounding_whitespace,
            " \tbinding =  0, 1 \r\n",
            Ok(("binding", "0, 1")),
        ),
        (
            first_delimiter_wins,
            "entryPoint = a=b",
            Ok(("entryPoint", "a=b")),
        ),
        (
            missing_delimiter,
            "size 16",
            Err(ErrorKind::MissingDelimiter { delimiter: '=' }),
        ),
        (
            missing_value,
            "size =",
            Err(ErrorKind::MissingValue { delimiter: '=' }),
        ),
        (
            whitespace_value,
            "size =  \t",
            Err(ErrorKind::MissingValue { delimiter: '=' }),
        ),
    );

    #[test]
    fn trim_strips_line_terminators() {
        assert_eq!(trim("\t a b \r\n"), "a b");
        assert_eq!(trim(""), "");
    }

    #[test]
    fn array_access_detection() {
        assert!(is_array_access("stages[2]"));
        assert!(is_array_access("stages[ 2 ]"));
        assert!(is_array_access("stages[]"));
        assert!(is_array_access("stages[x]"));
        assert!(is_array_access("stages]2["));
        assert!(!is_array_access("stages"));
        assert!(!is_array_access("entryPoint"));
    }

    #[test]
    fn array_access_parsing() {
        assert_eq!(parse_array_access("stages[2]"), Ok(("stages", 2)));
        assert_eq!(parse_array_access("stages [ 12 ] "), Ok(("stages", 12)));
        assert!(parse_array_access("stages[]").is_err());
        assert!(parse_array_access("stages[1]x").is_err());
        assert!(parse_array_access("stages").is_err());
    }

    #[test]
    fn words() {
        assert_eq!(get_word("  VsGlsl extra"), Some(("VsGlsl", " extra")));
        assert_eq!(get_word("Version"), Some(("Version", "")));
        assert_eq!(get_word(" \t "), None);
    }

    #[test]
    fn token_splitting() {
        let got: Vec<&str> = tokens(" 1, 2,,3\t0x4 ,").collect();
        assert_eq!(got, vec!["1", "2", "3", "0x4"]);
        assert_eq!(tokens(" , ").count(), 0);
    }
}
