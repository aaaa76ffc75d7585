//! Textual macro substitution applied to every line before it is parsed.

use crate::error::ErrorKind;

/// Ordered list of macro definitions.
///
/// Macros are substituted in the order they were defined.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Macros {
    definitions: Vec<(String, String)>,
}

impl Macros {
    pub fn new() -> Macros {
        Default::default()
    }

    /// Builds macros from a flat list of alternating names and values.
    ///
    /// A trailing name without a value is ignored.
    pub fn from_flat<S: AsRef<str>>(flat: &[S]) -> Macros {
        let mut macros = Macros::new();
        for pair in flat.chunks_exact(2) {
            macros.define(pair[0].as_ref(), pair[1].as_ref());
        }
        macros
    }

    /// Defines a macro.
    ///
    /// Redefining a macro replaces its value but keeps its original position in the substitution order.
    /// Macros with empty names are ignored.
    pub fn define(&mut self, name: &str, value: &str) {
        if name.is_empty() {
            return;
        }
        match self.definitions.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self
                .definitions
                .push((name.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.definitions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.definitions
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Substitutes every macro into a line.
    ///
    /// Each macro replaces all of its occurrences, scanning left to right.
    /// Text inserted by a macro is not scanned again for the same macro,
    ///     so a macro whose value contains its own name expands once per occurrence.
    /// Later macros do see text inserted by earlier ones.
    ///
    /// The line is raw bytes because shader sources need not be UTF-8.
    /// It is an error for the line to reach `max_line_length` bytes at any point during substitution.
    pub fn substitute(&self, line: &[u8], max_line_length: usize) -> Result<Vec<u8>, ErrorKind> {
        let mut line = line.to_vec();
        for (name, value) in self.iter() {
            if find(&line, name.as_bytes()).is_some() {
                line = substitute_one(&line, name.as_bytes(), value.as_bytes(), max_line_length)?;
            }
        }
        Ok(line)
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn substitute_one(
    line: &[u8],
    name: &[u8],
    value: &[u8],
    max_line_length: usize,
) -> Result<Vec<u8>, ErrorKind> {
    let mut done = Vec::with_capacity(line.len());
    let mut rest = line;
    while let Some(i) = find(rest, name) {
        let after = &rest[i + name.len()..];
        if done.len() + i + value.len() + after.len() >= max_line_length {
            return Err(ErrorKind::LineTooLong {
                max: max_line_length,
            });
        }
        done.extend_from_slice(&rest[..i]);
        done.extend_from_slice(value);
        rest = after;
    }
    done.extend_from_slice(rest);
    Ok(done)
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! substitution_tests {
        ($( ($name: ident, $macros: expr, $line: expr, $want: expr, ), )+ ) => {
            $(
                #[test]
                fn $name() {
                    let macros = Macros::from_flat(&$macros);
                    let got = macros.substitute($line.as_bytes(), 64);
                    let want: Result<&str, ErrorKind> = $want;
                    assert_eq!(got.as_deref(), want.as_ref().map(|s| s.as_bytes()));
                }
            )+
        };
    }

    substitution_tests!(
        (
            basic,
            ["FOO", "BAR"],
            "x = FOO_1\n",
            Ok("x = BAR_1\n"),
        ),
        (no_occurrence, ["FOO", "BAR"], "x = 1\n", Ok("x = 1\n"),),
        (
            every_occurrence,
            ["N", "4"],
            "size = N, N, N",
            Ok("size = 4, 4, 4"),
        ),
        (
            self_referencing_value_expands_once,
            ["FOO", "xFOOy"],
            "FOO FOO",
            Ok("xFOOy xFOOy"),
        ),
        (
            definition_order,
            ["A", "B", "B", "C"],
            "A",
            Ok("C"),
        ),
        (
            later_macro_not_seen_by_earlier,
            ["B", "C", "A", "B"],
            "A",
            Ok("B"),
        ),
        (
            value_introduces_section_header,
            ["SECTION", "[VsGlsl]"],
            "SECTION\n",
            Ok("[VsGlsl]\n"),
        ),
        (
            too_long,
            ["X", "0123456789012345678901234567890123456789"],
            "X X",
            Err(ErrorKind::LineTooLong { max: 64 }),
        ),
        (
            exactly_below_limit,
            ["X", "01234567890123456789012345678901234567890123456789012345678901"],
            "X",
            Ok("01234567890123456789012345678901234567890123456789012345678901"),
        ),
        (
            reaching_limit,
            ["X", "0123456789012345678901234567890123456789012345678901234567890123"],
            "X",
            Err(ErrorKind::LineTooLong { max: 64 }),
        ),
    );

    #[test]
    fn non_utf8_bytes_are_preserved() {
        let macros = Macros::from_flat(&["NAME", "value"]);
        assert_eq!(
            macros.substitute(b"// caf\xe9 NAME", 64),
            Ok(b"// caf\xe9 value".to_vec())
        );
    }

    #[test]
    fn redefinition_keeps_position() {
        let mut macros = Macros::new();
        macros.define("A", "1");
        macros.define("B", "2");
        macros.define("A", "3");
        macros.define("", "ignored");
        let got: Vec<(&str, &str)> = macros.iter().collect();
        assert_eq!(got, vec![("A", "3"), ("B", "2")]);
        assert_eq!(macros.get("A"), Some("3"));
    }

    #[test]
    fn unpaired_name_is_ignored() {
        let macros = Macros::from_flat(&["A", "1", "B"]);
        assert_eq!(macros.iter().count(), 1);
    }
}
