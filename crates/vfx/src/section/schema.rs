//! The capability interface implemented by every key-value section, and the macro that implements it.

use crate::error::ErrorKind;
use crate::value::{ArrayType, Value, ValueType};

/// Type of a member of a key-value section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberType {
    /// A scalar, vector or string that is assigned once.
    Value(ValueType),
    /// A dynamically sized array that is appended to by every assignment.
    Array(ArrayType),
    /// A single nested section.
    Section,
    /// An array of nested sections with a fixed maximum length.
    SectionArray { len: usize },
}

/// Key-value section whose members can be looked up and assigned by name.
///
/// This is implemented for top-level sections like `[BufferView]` and for
///     the sections nested inside them, like the elements of `stages[]`.
pub trait Schema {
    /// Names of all members, in declaration order.
    fn member_names(&self) -> &'static [&'static str];

    /// Returns the type of a member, or [`None`] if the member doesn't exist.
    fn member_type(&self, name: &str) -> Option<MemberType>;

    /// Assigns a value to a [`MemberType::Value`] member.
    fn set(&mut self, name: &str, value: Value) -> Result<(), ErrorKind>;

    /// Returns the byte buffer backing a [`MemberType::Array`] member.
    fn array_mut(&mut self, name: &str) -> Option<&mut Vec<u8>>;

    /// Returns a nested section.
    ///
    /// For section arrays the index defaults to 0,
    ///     and the array is grown with default sections up to the index.
    /// It is an error to provide an index for a single nested section.
    fn sub_section_mut(
        &mut self,
        name: &str,
        index: Option<usize>,
    ) -> Result<&mut dyn Schema, ErrorKind>;

    /// Writes every member that doesn't have its default value, one per line.
    fn fmt_members(&self, f: &mut std::fmt::Formatter<'_>, indent: usize) -> std::fmt::Result;
}

pub(crate) fn unknown_member(name: &str, allowed_member_names: &'static [&'static str]) -> ErrorKind {
    ErrorKind::UnknownMember {
        name: name.to_string(),
        allowed_member_names,
    }
}

pub(crate) fn sub_section_array<'a, T: Schema + Default + 'static>(
    sections: &'a mut Vec<T>,
    name: &str,
    index: usize,
    len: usize,
) -> Result<&'a mut dyn Schema, ErrorKind> {
    if index >= len {
        return Err(ErrorKind::IndexOutOfRange {
            name: name.to_string(),
            index,
            len,
        });
    }
    if sections.len() <= index {
        sections.resize_with(index + 1, T::default);
    }
    Ok(&mut sections[index])
}

/// Writes the contents of an array field.
///
/// The buffer is written as elements of the first kind.
/// Trailing bytes that don't fill an element of that kind are written using the first
///     kind whose element size divides them, so the output parses back to the same bytes.
pub(crate) fn fmt_array(
    f: &mut std::fmt::Formatter<'_>,
    indent: usize,
    kinds: &[(&str, ArrayType)],
    bytes: &[u8],
) -> std::fmt::Result {
    let Some(&(key, kind)) = kinds.first() else {
        return Ok(());
    };
    let split = bytes.len() - bytes.len() % kind.element_size();
    let (elements, tail) = bytes.split_at(split);
    if !elements.is_empty() {
        writeln!(f, "{}{} = {}", Indent(indent), key, kind.format_elements(elements))?;
    }
    if tail.is_empty() {
        return Ok(());
    }
    if let Some((key, kind)) = kinds
        .iter()
        .find(|(_, kind)| tail.len() % kind.element_size() == 0)
    {
        writeln!(f, "{}{} = {}", Indent(indent), key, kind.format_elements(tail))?;
    }
    Ok(())
}

/// Indentation when displaying sections.
pub(crate) struct Indent(pub usize);

impl std::fmt::Display for Indent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:1$}", "", self.0)
    }
}

macro_rules! value_type {
    (Int) => { i32 };
    (Uint) => { u32 };
    (Float) => { f32 };
    (Float16) => { $crate::value::F16 };
    (Double) => { f64 };
    (Bool) => { bool };
    (IVec4) => { $crate::value::IVec4 };
    (I64Vec2) => { $crate::value::I64Vec2 };
    (FVec4) => { $crate::value::FVec4 };
    (F16Vec4) => { $crate::value::F16Vec4 };
    (DVec2) => { $crate::value::DVec2 };
    (Binding) => { $crate::value::Binding };
    (Enum) => { i32 };
    (String) => { String };
}

/// Declares a key-value section.
///
/// Each member is a `(field, "key", Kind)` tuple.
/// Values use a [`ValueType`] variant as the kind,
///     and nested sections use the type of the section
///     (plus the maximum length for section arrays).
/// An array field lists every `("key", Kind)` that appends to it,
///     each kind being an [`ArrayType`] variant;
///     the first kind is the one used when the field is displayed.
macro_rules! section {
    (
        $(#[$meta: meta])*
        $name: ident {
            values: [ $( ($field: ident, $key: literal, $kind: ident), )* ],
            arrays: [ $( ($array_field: ident, [ $( ($array_key: literal, $array_kind: ident), )+ ]), )* ],
            sections: [ $( ($section_field: ident, $section_key: literal, $section_type: ty), )* ],
            section_arrays: [ $( ($vec_field: ident, $vec_key: literal, $vec_type: ty, $vec_len: expr), )* ],
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        pub struct $name {
            $( pub $field: value_type!($kind), )*
            $( pub $array_field: Vec<u8>, )*
            $( pub $section_field: $section_type, )*
            $( pub $vec_field: Vec<$vec_type>, )*
        }

        impl $name {
            pub const ALL_MEMBER_NAMES: &'static [&'static str] = &[
                $( $key, )* $( $( $array_key, )+ )* $( $section_key, )* $( $vec_key, )*
            ];
        }

        impl $crate::section::Schema for $name {
            fn member_names(&self) -> &'static [&'static str] {
                Self::ALL_MEMBER_NAMES
            }

            fn member_type(&self, name: &str) -> Option<$crate::section::MemberType> {
                use $crate::section::MemberType;
                match name {
                    $( $key => Some(MemberType::Value($crate::value::ValueType::$kind)), )*
                    $( $( $array_key => Some(MemberType::Array($crate::value::ArrayType::$array_kind)), )+ )*
                    $( $section_key => Some(MemberType::Section), )*
                    $( $vec_key => Some(MemberType::SectionArray { len: $vec_len }), )*
                    _ => None,
                }
            }

            fn set(
                &mut self,
                name: &str,
                value: $crate::value::Value,
            ) -> Result<(), $crate::error::ErrorKind> {
                match (name, value) {
                    $(
                        ($key, $crate::value::Value::$kind(v)) => {
                            self.$field = v;
                            Ok(())
                        }
                    )*
                    (name, _) => Err($crate::section::schema::unknown_member(name, Self::ALL_MEMBER_NAMES)),
                }
            }

            fn array_mut(&mut self, name: &str) -> Option<&mut Vec<u8>> {
                match name {
                    $( $( $array_key )|+ => Some(&mut self.$array_field), )*
                    _ => None,
                }
            }

            fn sub_section_mut(
                &mut self,
                name: &str,
                index: Option<usize>,
            ) -> Result<&mut dyn $crate::section::Schema, $crate::error::ErrorKind> {
                match (name, index) {
                    $(
                        ($section_key, None) => Ok(&mut self.$section_field),
                        ($section_key, Some(_)) => Err($crate::error::ErrorKind::IndexOnNonArray {
                            name: name.to_string(),
                        }),
                    )*
                    $(
                        ($vec_key, index) => $crate::section::schema::sub_section_array(
                            &mut self.$vec_field,
                            name,
                            index.unwrap_or(0),
                            $vec_len,
                        ),
                    )*
                    (name, _) => Err($crate::section::schema::unknown_member(name, Self::ALL_MEMBER_NAMES)),
                }
            }

            fn fmt_members(&self, f: &mut std::fmt::Formatter<'_>, indent: usize) -> std::fmt::Result {
                use $crate::section::schema::Indent;
                $(
                    if self.$field != Self::default().$field {
                        writeln!(f, "{}{} = {}", Indent(indent), $key, self.$field)?;
                    }
                )*
                $(
                    $crate::section::schema::fmt_array(
                        f,
                        indent,
                        &[ $( ($array_key, $crate::value::ArrayType::$array_kind), )+ ],
                        &self.$array_field,
                    )?;
                )*
                $(
                    if self.$section_field != <$section_type>::default() {
                        writeln!(f, "{}{}:", Indent(indent), $section_key)?;
                        $crate::section::Schema::fmt_members(&self.$section_field, f, indent + 2)?;
                    }
                )*
                $(
                    for (i, s) in self.$vec_field.iter().enumerate() {
                        writeln!(f, "{}{}[{}]:", Indent(indent), $vec_key, i)?;
                        $crate::section::Schema::fmt_members(s, f, indent + 2)?;
                    }
                )*
                Ok(())
            }
        }
    };
}
