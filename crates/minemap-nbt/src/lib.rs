use byteorder::{BigEndian, ReadBytesExt};
use flate2::read::GzDecoder;
use std::collections::HashMap;
use std::io::Read;

mod error;
pub use error::NbtError;

pub type Result<T> = std::result::Result<T, NbtError>;

/// Nested lists and compounds beyond this depth are rejected as malformed
/// rather than risking call-stack exhaustion on adversarial input.
const MAX_DEPTH: u32 = 512;

#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
    String(String),
    List { elem_type: u8, items: Vec<Tag> },
    Compound(HashMap<String, Tag>),
}

impl Tag {
    pub fn type_id(&self) -> u8 {
        match self {
            Tag::End => 0,
            Tag::Byte(_) => 1,
            Tag::Short(_) => 2,
            Tag::Int(_) => 3,
            Tag::Long(_) => 4,
            Tag::Float(_) => 5,
            Tag::Double(_) => 6,
            Tag::ByteArray(_) => 7,
            Tag::String(_) => 8,
            Tag::List { .. } => 9,
            Tag::Compound(_) => 10,
        }
    }

    /// Reads one named tag: a type byte, a length-prefixed name, then the
    /// payload. A `Tag::End` carries neither name nor payload on the wire.
    ///
    /// Compound children with duplicate names shadow each other; the last
    /// one read wins.
    pub fn read<R: Read>(reader: &mut R) -> Result<(String, Tag)> {
        Tag::read_nested(reader, 0)
    }

    /// Reads a payload whose type byte was already consumed, or — for list
    /// elements — declared once by the parent list.
    pub fn read_payload<R: Read>(reader: &mut R, type_id: u8) -> Result<Tag> {
        Tag::read_payload_nested(reader, type_id, 0)
    }

    fn read_nested<R: Read>(reader: &mut R, depth: u32) -> Result<(String, Tag)> {
        let type_id = reader.read_u8()?;
        if type_id == 0 {
            return Ok((String::new(), Tag::End));
        }

        // A zero-length name decodes to "", which callers treat as an
        // anonymous root.
        let name = read_text(reader)?;
        let tag = Tag::read_payload_nested(reader, type_id, depth)?;
        Ok((name, tag))
    }

    fn read_payload_nested<R: Read>(reader: &mut R, type_id: u8, depth: u32) -> Result<Tag> {
        if depth >= MAX_DEPTH {
            return Err(NbtError::Malformed(format!(
                "nesting deeper than {} levels",
                MAX_DEPTH
            )));
        }

        match type_id {
            0 => Ok(Tag::End),
            1 => Ok(Tag::Byte(reader.read_i8()?)),
            2 => Ok(Tag::Short(reader.read_i16::<BigEndian>()?)),
            3 => Ok(Tag::Int(reader.read_i32::<BigEndian>()?)),
            4 => Ok(Tag::Long(reader.read_i64::<BigEndian>()?)),
            5 => Ok(Tag::Float(reader.read_f32::<BigEndian>()?)),
            6 => Ok(Tag::Double(reader.read_f64::<BigEndian>()?)),
            7 => {
                let length = reader.read_i32::<BigEndian>()?;
                if length < 1 {
                    return Err(NbtError::Malformed(format!("byte array length {}", length)));
                }
                Ok(Tag::ByteArray(read_exact_vec(reader, length as usize)?))
            }
            8 => Ok(Tag::String(read_text(reader)?)),
            9 => {
                let elem_type = reader.read_u8()?;
                if elem_type > 10 {
                    return Err(NbtError::Malformed(format!(
                        "list element type {}",
                        elem_type
                    )));
                }

                let length = reader.read_i32::<BigEndian>()?;
                if length < 0 {
                    return Err(NbtError::Malformed(format!("list length {}", length)));
                }

                let mut items = Vec::new();
                items.try_reserve_exact(length as usize)?;
                for _ in 0..length {
                    let item = Tag::read_payload_nested(reader, elem_type, depth + 1)?;
                    if let Tag::End = item {
                        // The terminator is structural and only valid at the
                        // end of a compound.
                        return Err(NbtError::Malformed("terminator inside a list".to_string()));
                    }
                    items.push(item);
                }
                Ok(Tag::List { elem_type, items })
            }
            10 => {
                let mut children = HashMap::new();
                loop {
                    let (name, tag) = Tag::read_nested(reader, depth + 1)?;
                    if let Tag::End = tag {
                        break;
                    }
                    children.insert(name, tag);
                }
                Ok(Tag::Compound(children))
            }
            _ => Err(NbtError::Malformed(format!("tag type {}", type_id))),
        }
    }

    pub fn as_compound(&self) -> Option<&HashMap<String, Tag>> {
        match self {
            Tag::Compound(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Tag]> {
        match self {
            Tag::List { items, .. } => Some(items),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Tag::ByteArray(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Tag::Long(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Tag::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i16(&self) -> Option<i16> {
        match self {
            Tag::Short(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i8(&self) -> Option<i8> {
        match self {
            Tag::Byte(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Tag::Double(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Tag::Float(n) => Some(*n),
            _ => None,
        }
    }
}

fn read_text<R: Read>(reader: &mut R) -> Result<String> {
    // The prefix is the number of encoded bytes, not characters, and is
    // read signed so a negative value can be rejected.
    let length = reader.read_i16::<BigEndian>()?;
    if length < 0 {
        return Err(NbtError::Malformed(format!("text length {}", length)));
    }
    if length == 0 {
        return Ok(String::new());
    }

    let bytes = read_exact_vec(reader, length as usize)?;
    Ok(String::from_utf8(bytes)?)
}

fn read_exact_vec<R: Read>(reader: &mut R, length: usize) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    bytes.try_reserve_exact(length)?;
    bytes.resize(length, 0);
    reader.read_exact(&mut bytes)?;
    Ok(bytes)
}

/// A decoded document: the root tag plus its on-wire name.
pub struct Document {
    pub name: String,
    pub root: Tag,
}

impl Document {
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let (name, root) = Tag::read(reader)?;
        Ok(Document { name, root })
    }

    pub fn read_gzip<R: Read>(reader: &mut R) -> Result<Self> {
        let mut decoder = GzDecoder::new(reader);
        Self::read(&mut decoder)
    }
}
