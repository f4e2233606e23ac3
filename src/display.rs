use std::fmt;

use crate::{Payload, Tag};

const INDENT: usize = 2;

/// Renders the tree one node per line.
///
/// ```
/// use nbtag::Tag;
///
/// let tag = Tag::compound("player", [
///     Tag::named("name", "Steve"),
///     Tag::list_of("pos", [1i32, 64]),
/// ])
/// .unwrap();
///
/// let expected = concat!(
///     "Compound(\"player\")[2] {\n",
///     "  String(\"name\"): \"Steve\"\n",
///     "  List(\"pos\")[2 of Int] {\n",
///     "    Int: 1\n",
///     "    Int: 64\n",
///     "  }\n",
///     "}",
/// );
/// assert_eq!(tag.to_string(), expected);
/// ```
impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f, 0)
    }
}

fn render(tag: &Tag, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    let pad = depth * INDENT;
    write!(f, "{:pad$}{}", "", tag.kind())?;
    if let Some(name) = tag.name() {
        write!(f, "({name:?})")?;
    }
    match tag.payload() {
        Payload::End => Ok(()),
        Payload::Byte(value) => write!(f, ": {value}"),
        Payload::Short(value) => write!(f, ": {value}"),
        Payload::Int(value) => write!(f, ": {value}"),
        Payload::Long(value) => write!(f, ": {value}"),
        Payload::Float(value) => write!(f, ": {value}"),
        Payload::Double(value) => write!(f, ": {value}"),
        Payload::ByteArray(bytes) => write!(f, ": [{} bytes]", bytes.len()),
        Payload::String(text) => write!(f, ": {text:?}"),
        Payload::List(list) => {
            writeln!(f, "[{} of {}] {{", list.len(), list.element_kind())?;
            for element in list {
                render(element, f, depth + 1)?;
                writeln!(f)?;
            }
            write!(f, "{:pad$}}}", "")
        }
        Payload::Compound(compound) => {
            writeln!(f, "[{}] {{", compound.len())?;
            for entry in compound.values() {
                render(entry, f, depth + 1)?;
                writeln!(f)?;
            }
            write!(f, "{:pad$}}}", "")
        }
    }
}
