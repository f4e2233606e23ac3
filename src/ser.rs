use serde::ser::{Serialize, Serializer};

use crate::{Compound, List, Payload, Tag};

impl Serialize for Tag {
    /// Serializes the payload only; names surface as Compound keys.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.payload().serialize(serializer)
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Payload::End => serializer.serialize_unit(),
            Payload::Byte(value) => serializer.serialize_i8(*value),
            Payload::Short(value) => serializer.serialize_i16(*value),
            Payload::Int(value) => serializer.serialize_i32(*value),
            Payload::Long(value) => serializer.serialize_i64(*value),
            Payload::Float(value) => serializer.serialize_f32(*value),
            Payload::Double(value) => serializer.serialize_f64(*value),
            Payload::ByteArray(bytes) => serializer.serialize_bytes(bytes),
            Payload::String(text) => serializer.serialize_str(text),
            Payload::List(list) => list.serialize(serializer),
            Payload::Compound(compound) => compound.serialize(serializer),
        }
    }
}

impl Serialize for List {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl Serialize for Compound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
