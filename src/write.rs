use std::io::Write;
use std::marker::PhantomData;
use std::slice;

use tracing::debug;
use zerocopy::{BigEndian, byteorder};

use crate::{ByteOrder, Error, Kind, List, Payload, Result, Tag, cold_path, error::unsupported};

/// Writes `tag` in big-endian byte order.
pub fn write<W: Write>(tag: &Tag, writer: W) -> Result<()> {
    tag.write_to_writer::<BigEndian>(writer)
}

impl Tag {
    /// Writes this tag with full framing: kind, name, payload.
    ///
    /// An absent name is written as the empty name. Nothing follows the kind
    /// byte of an End tag. The tree is not modified.
    pub fn write_to_writer<O: ByteOrder>(&self, writer: impl Write) -> Result<()> {
        let mut encoder = Encoder::<_, O> {
            writer,
            _marker: PhantomData,
        };
        encoder.write_tag(self)?;
        debug!(kind = %self.kind(), name = self.name().unwrap_or_default(), "encoded tag");
        Ok(())
    }

    /// # Example
    ///
    /// ```
    /// use nbtag::{BigEndian, Tag};
    ///
    /// let tag = Tag::named("x", 42i32);
    /// let bytes = tag.write_to_vec::<BigEndian>().unwrap();
    /// assert_eq!(bytes, [0x03, 0x00, 0x01, b'x', 0x00, 0x00, 0x00, 0x2A]);
    /// assert_eq!(bytes.len(), tag.written_size());
    /// ```
    pub fn write_to_vec<O: ByteOrder>(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.written_size());
        self.write_to_writer::<O>(&mut buf)?;
        Ok(buf)
    }

    /// Number of bytes [`Tag::write_to_writer`] emits on success.
    pub fn written_size(&self) -> usize {
        if self.kind() == Kind::End {
            return 1;
        }
        let mut size = 1 + string_size(self.name().unwrap_or_default());
        let mut pending = vec![self.payload()];
        while let Some(payload) = pending.pop() {
            let own = match payload {
                Payload::End => 0,
                Payload::Byte(_) => 1,
                Payload::Short(_) => 2,
                Payload::Int(_) | Payload::Float(_) => 4,
                Payload::Long(_) | Payload::Double(_) => 8,
                Payload::ByteArray(bytes) => 4 + bytes.len(),
                Payload::String(text) => string_size(text),
                Payload::List(list) => {
                    pending.extend(list.iter().map(Tag::payload));
                    1 + 4
                }
                Payload::Compound(compound) => {
                    for (key, tag) in compound {
                        size += 1 + string_size(key);
                        pending.push(tag.payload());
                    }
                    1
                }
            };
            size += own;
        }
        size
    }
}

fn string_size(text: &str) -> usize {
    2 + simd_cesu8::mutf8::encode(text).len()
}

fn check_entry(key: &str, entry: &Tag) -> Result<()> {
    if entry.kind() == Kind::End {
        cold_path();
        return Err(unsupported("write as a compound entry", Kind::End));
    }
    if entry.name() != Some(key) {
        cold_path();
        return Err(Error::MisnamedEntry(key.to_owned()));
    }
    Ok(())
}

struct Encoder<W, O> {
    writer: W,
    _marker: PhantomData<O>,
}

// Containers whose children are still being written.
enum Open<'a> {
    List(Kind, slice::Iter<'a, Tag>),
    Compound(indexmap::map::Iter<'a, String, Tag>),
}

enum Step<'a> {
    Element(Kind, &'a Tag),
    Entry(&'a str, &'a Tag),
    CloseList,
    CloseCompound,
}

impl<W: Write, O: ByteOrder> Encoder<W, O> {
    #[inline]
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes).map_err(Error::IO)
    }

    fn write_kind(&mut self, kind: Kind) -> Result<()> {
        self.write_all(&[kind.id()])
    }

    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_all(&byteorder::I32::<O>::new(value).to_bytes())
    }

    fn write_string(&mut self, text: &str) -> Result<()> {
        let bytes = simd_cesu8::mutf8::encode(text);
        let Ok(len) = u16::try_from(bytes.len()) else {
            cold_path();
            return Err(Error::StringTooLong(bytes.len()));
        };
        self.write_all(&byteorder::U16::<O>::new(len).to_bytes())?;
        self.write_all(&bytes)
    }

    fn write_tag(&mut self, tag: &Tag) -> Result<()> {
        self.write_kind(tag.kind())?;
        if tag.kind() == Kind::End {
            return Ok(());
        }
        self.write_string(tag.name().unwrap_or_default())?;

        let mut open = Vec::new();
        self.write_payload(tag.payload(), &mut open)?;
        while let Some(top) = open.last_mut() {
            let step = match top {
                Open::List(kind, elements) => match elements.next() {
                    Some(element) => Step::Element(*kind, element),
                    None => Step::CloseList,
                },
                Open::Compound(entries) => match entries.next() {
                    Some((key, entry)) => Step::Entry(key, entry),
                    None => Step::CloseCompound,
                },
            };
            match step {
                Step::Element(kind, element) => {
                    if element.kind() != kind {
                        cold_path();
                        return Err(Error::TypeMismatch {
                            expected: kind,
                            actual: element.kind(),
                        });
                    }
                    self.write_payload(element.payload(), &mut open)?;
                }
                Step::Entry(key, entry) => {
                    check_entry(key, entry)?;
                    self.write_kind(entry.kind())?;
                    self.write_string(key)?;
                    self.write_payload(entry.payload(), &mut open)?;
                }
                Step::CloseList => {
                    open.pop();
                }
                Step::CloseCompound => {
                    open.pop();
                    self.write_kind(Kind::End)?;
                }
            }
        }
        Ok(())
    }

    /// Writes a scalar payload whole, or a container's header. The children
    /// of a container are left to the caller through `open`.
    fn write_payload<'a>(&mut self, payload: &'a Payload, open: &mut Vec<Open<'a>>) -> Result<()> {
        match payload {
            Payload::End => Ok(()),
            Payload::Byte(value) => self.write_all(&[*value as u8]),
            Payload::Short(value) => self.write_all(&byteorder::I16::<O>::new(*value).to_bytes()),
            Payload::Int(value) => self.write_i32(*value),
            Payload::Long(value) => self.write_all(&byteorder::I64::<O>::new(*value).to_bytes()),
            Payload::Float(value) => self.write_all(&byteorder::F32::<O>::new(*value).to_bytes()),
            Payload::Double(value) => self.write_all(&byteorder::F64::<O>::new(*value).to_bytes()),
            Payload::ByteArray(bytes) => {
                let Ok(len) = i32::try_from(bytes.len()) else {
                    cold_path();
                    return Err(Error::ByteArrayTooLong(bytes.len()));
                };
                self.write_i32(len)?;
                self.write_all(bytes)
            }
            Payload::String(text) => self.write_string(text),
            Payload::List(list) => {
                self.write_list_header(list)?;
                open.push(Open::List(list.element_kind(), list.iter()));
                Ok(())
            }
            Payload::Compound(compound) => {
                open.push(Open::Compound(compound.into_iter()));
                Ok(())
            }
        }
    }

    fn write_list_header(&mut self, list: &List) -> Result<()> {
        let Ok(len) = i32::try_from(list.len()) else {
            cold_path();
            return Err(Error::ListTooLong(list.len()));
        };
        self.write_kind(list.element_kind())?;
        self.write_i32(len)
    }
}
