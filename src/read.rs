use std::io::Read;
use std::marker::PhantomData;
use std::mem;

use tracing::{debug, trace, warn};
use zerocopy::{BigEndian, byteorder};

use crate::{
    ByteOrder, Compound, DEFAULT_MAX_DEPTH, Error, Kind, List, PREALLOCATE_LIMIT, Payload, Result,
    Tag, cold_path,
};

/// Run-time knobs for decoding.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ReadOptions {
    /// Maximum number of nested List/Compound levels, or `None` for no limit.
    pub max_depth: Option<usize>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl ReadOptions {
    pub const fn unlimited() -> Self {
        Self { max_depth: None }
    }
}

/// Reads one big-endian tag from `reader`.
///
/// Bytes after the tag are left unread.
pub fn read<R: Read>(reader: R) -> Result<Tag> {
    read_from::<BigEndian>(reader)
}

/// Reads one tag from `reader` using byte order `O`.
pub fn read_from<O: ByteOrder>(reader: impl Read) -> Result<Tag> {
    read_with_options::<O>(reader, ReadOptions::default())
}

pub fn read_with_options<O: ByteOrder>(reader: impl Read, options: ReadOptions) -> Result<Tag> {
    let mut decoder = Decoder::<_, O> {
        reader,
        max_depth: options.max_depth,
        _marker: PhantomData,
    };
    let tag = decoder.read_tag()?;
    debug!(kind = %tag.kind(), name = tag.name().unwrap_or_default(), "decoded tag");
    Ok(tag)
}

/// Reads a tag that must span all of `data`.
///
/// # Example
///
/// ```
/// use nbtag::{BigEndian, Error, Payload, read_slice};
///
/// let data = [0x03, 0x00, 0x01, b'x', 0x00, 0x00, 0x00, 0x2A];
/// let tag = read_slice::<BigEndian>(&data).unwrap();
/// assert_eq!(tag.name(), Some("x"));
/// assert_eq!(tag.payload(), &Payload::Int(42));
///
/// let mut longer = data.to_vec();
/// longer.push(0xFF);
/// assert!(matches!(read_slice::<BigEndian>(&longer), Err(Error::TrailingData(1))));
/// ```
pub fn read_slice<O: ByteOrder>(data: &[u8]) -> Result<Tag> {
    let mut remaining = data;
    let tag = read_from::<O>(&mut remaining)?;
    if !remaining.is_empty() {
        cold_path();
        return Err(Error::TrailingData(remaining.len()));
    }
    Ok(tag)
}

struct Decoder<R, O> {
    reader: R,
    max_depth: Option<usize>,
    _marker: PhantomData<O>,
}

// A container whose children are still being read. Open containers live on
// a heap stack, so nesting depth never grows the call stack.
enum Frame {
    List {
        name: Option<String>,
        kind: Kind,
        remaining: usize,
        elements: Vec<Tag>,
    },
    Compound {
        name: Option<String>,
        compound: Compound,
    },
}

impl Frame {
    fn accept(&mut self, tag: Tag) -> Result<()> {
        match self {
            Frame::List { elements, .. } => elements.push(tag),
            Frame::Compound { compound, .. } => {
                trace!(kind = %tag.kind(), name = tag.name().unwrap_or_default(), "compound entry");
                compound.insert(tag)?;
            }
        }
        Ok(())
    }

    fn close(self) -> Tag {
        match self {
            Frame::List {
                name,
                kind,
                elements,
                ..
            } => Tag::from_parts(name, Payload::List(List::from_parts(kind, elements))),
            Frame::Compound { name, compound } => {
                Tag::from_parts(name, Payload::Compound(compound))
            }
        }
    }
}

enum Opened {
    Done(Tag),
    Open(Frame),
}

impl<R: Read, O: ByteOrder> Decoder<R, O> {
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.reader.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        // never trust `len` for the allocation itself
        let mut buf = Vec::new();
        self.reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
        if buf.len() < len {
            cold_path();
            return Err(Error::TruncatedStream);
        }
        Ok(buf)
    }

    fn read_kind(&mut self) -> Result<Kind> {
        let [id] = self.read_array::<1>()?;
        Kind::try_from(id)
    }

    fn read_i32(&mut self) -> Result<i32> {
        Ok(byteorder::I32::<O>::from_bytes(self.read_array()?).get())
    }

    fn read_string(&mut self) -> Result<String> {
        let len = byteorder::U16::<O>::from_bytes(self.read_array()?).get() as usize;
        let bytes = self.read_bytes(len)?;
        Ok(simd_cesu8::mutf8::decode_lossy(&bytes).into_owned())
    }

    fn read_tag(&mut self) -> Result<Tag> {
        let kind = self.read_kind()?;
        if kind == Kind::End {
            return Ok(Tag::end());
        }
        let name = self.read_string()?;
        self.read_value(Some(name), kind)
    }

    fn read_value(&mut self, name: Option<String>, kind: Kind) -> Result<Tag> {
        let mut current = match self.open(name, kind, 0)? {
            Opened::Done(tag) => return Ok(tag),
            Opened::Open(frame) => frame,
        };
        let mut parents = Vec::new();
        loop {
            match self.next_child(&mut current)? {
                Some((name, kind)) => match self.open(name, kind, parents.len() + 1)? {
                    Opened::Done(tag) => current.accept(tag)?,
                    Opened::Open(frame) => parents.push(mem::replace(&mut current, frame)),
                },
                None => {
                    let tag = current.close();
                    match parents.pop() {
                        Some(parent) => {
                            current = parent;
                            current.accept(tag)?;
                        }
                        None => return Ok(tag),
                    }
                }
            }
        }
    }

    /// Header of the next child of `frame`, or `None` once it is complete.
    fn next_child(&mut self, frame: &mut Frame) -> Result<Option<(Option<String>, Kind)>> {
        match frame {
            Frame::List {
                kind, remaining, ..
            } => {
                if *remaining == 0 {
                    return Ok(None);
                }
                *remaining -= 1;
                Ok(Some((None, *kind)))
            }
            Frame::Compound { .. } => match self.read_kind()? {
                Kind::End => Ok(None),
                kind => Ok(Some((Some(self.read_string()?), kind))),
            },
        }
    }

    /// Reads a scalar payload whole, or the header of a container nested
    /// inside `depth` others.
    fn open(&mut self, name: Option<String>, kind: Kind, depth: usize) -> Result<Opened> {
        let payload = match kind {
            Kind::End => return Ok(Opened::Done(Tag::end())),
            Kind::Byte => {
                let [value] = self.read_array::<1>()?;
                Payload::Byte(value as i8)
            }
            Kind::Short => {
                Payload::Short(byteorder::I16::<O>::from_bytes(self.read_array()?).get())
            }
            Kind::Int => Payload::Int(self.read_i32()?),
            Kind::Long => {
                Payload::Long(byteorder::I64::<O>::from_bytes(self.read_array()?).get())
            }
            Kind::Float => {
                Payload::Float(byteorder::F32::<O>::from_bytes(self.read_array()?).get())
            }
            Kind::Double => {
                Payload::Double(byteorder::F64::<O>::from_bytes(self.read_array()?).get())
            }
            Kind::ByteArray => {
                let len = self.read_i32()?;
                if len < 0 {
                    cold_path();
                    return Err(Error::NegativeLength(len));
                }
                Payload::ByteArray(self.read_bytes(len as usize)?)
            }
            Kind::String => Payload::String(self.read_string()?),
            Kind::List => {
                self.check_depth(depth)?;
                return self.open_list(name);
            }
            Kind::Compound => {
                self.check_depth(depth)?;
                return Ok(Opened::Open(Frame::Compound {
                    name,
                    compound: Compound::new(),
                }));
            }
        };
        Ok(Opened::Done(Tag::from_parts(name, payload)))
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if let Some(max_depth) = self.max_depth {
            if depth >= max_depth {
                cold_path();
                return Err(Error::DepthLimitExceeded(max_depth));
            }
        }
        Ok(())
    }

    fn open_list(&mut self, name: Option<String>) -> Result<Opened> {
        let kind = self.read_kind()?;
        let count = self.read_i32()?;
        trace!(element_kind = %kind, count, "list header");
        if count <= 0 {
            if count < 0 {
                warn!(count, "negative list length, reading as empty list");
            }
            return Ok(Opened::Done(Tag::from_parts(name, Payload::List(List::new(kind)))));
        }

        let count = count as usize;
        if kind == Kind::End {
            cold_path();
            return Err(Error::EndElements(count));
        }
        Ok(Opened::Open(Frame::List {
            name,
            kind,
            remaining: count,
            elements: Vec::with_capacity(count.min(PREALLOCATE_LIMIT)),
        }))
    }
}
