//! Resolution of member paths like `stages[2].entryPoint`.
//!
//! A path is a list of segments separated by `.`.
//! Every segment but the last names a sub-section, optionally with an array index,
//!     and the last segment names a value or array member.
//! Whitespace around segments is ignored.

use crate::error::ErrorKind;
use crate::lexical::{is_array_access, parse_array_access, trim};
use crate::section::{MemberType, Schema};

/// A path resolved to a member of a section.
pub struct Resolved<'a, 'k> {
    /// The section that contains the member.
    pub section: &'a mut dyn Schema,
    /// Name of the member.
    pub member: &'k str,
    /// Type of the member; always [`MemberType::Value`] or [`MemberType::Array`].
    pub member_type: MemberType,
}

/// Resolves a path relative to a section.
///
/// Sub-section arrays are grown up to the index named in the path.
/// Indices beyond the declared length of the array are errors.
pub fn resolve<'a, 'k>(root: &'a mut dyn Schema, key: &'k str) -> Result<Resolved<'a, 'k>, ErrorKind> {
    let key = trim(key);
    let empty = || ErrorKind::EmptyPathSegment {
        path: key.to_string(),
    };
    if key.is_empty() {
        return Err(empty());
    }
    let mut section = root;
    let mut segments = key.split('.').map(trim).peekable();
    while let Some(segment) = segments.next() {
        let (name, index) = if is_array_access(segment) {
            let (name, index) = parse_array_access(segment)?;
            (name, Some(index))
        } else {
            (segment, None)
        };
        if name.is_empty() {
            return Err(empty());
        }
        let Some(member_type) = section.member_type(name) else {
            return Err(ErrorKind::UnknownMember {
                name: name.to_string(),
                allowed_member_names: section.member_names(),
            });
        };
        let next = segments.peek().copied();
        match member_type {
            MemberType::Value(_) | MemberType::Array(_) => {
                if index.is_some() {
                    return Err(ErrorKind::IndexOnNonArray {
                        name: name.to_string(),
                    });
                }
                if let Some(next) = next {
                    if next.is_empty() {
                        return Err(empty());
                    }
                    return Err(ErrorKind::UnknownMember {
                        name: next.to_string(),
                        allowed_member_names: &[],
                    });
                }
                return Ok(Resolved {
                    section,
                    member: name,
                    member_type,
                });
            }
            MemberType::Section | MemberType::SectionArray { .. } => {
                if next.is_none() {
                    return Err(ErrorKind::SectionUsedAsValue {
                        name: name.to_string(),
                    });
                }
                section = section.sub_section_mut(name, index)?;
            }
        }
    }
    Err(empty())
}
