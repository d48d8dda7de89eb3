//! Enumerate a struct's fields through its `Serialize` implementation.
//!
//! The top-level value must serialize as a struct; anything else is a
//! [`VenomError::SpecificationType`] raised before any field is visited.
//! Each field value is then probed with a second serializer that only reports
//! which [`Kind`] it would produce. `std::time::Duration` is recognised by its
//! serialized struct name, newtype wrappers are looked through, and every other
//! shape probes as unsupported.
//!
//! Serde exposes only a struct's name, not its type, so detection by name is
//! the best a serializer can do. Any user struct named `Duration` is treated as
//! a duration field too; its default then coerces from a duration literal and
//! it fails to deserialize at unmarshal time. Rename such a type or tag the
//! field `ignored`.

use serde::ser::{self, Impossible, Serialize};
use thiserror::Error;

use crate::error::VenomError;
use crate::types::Kind;

/// Call `visit` for each serialized field in declaration order.
///
/// `visit` receives the field name and its kind, or `None` when the field's
/// type has no flag representation. The first error stops the walk.
pub fn walk_fields<S, F>(spec: &S, visit: F) -> Result<(), VenomError>
where
    S: Serialize + ?Sized,
    F: FnMut(&'static str, Option<Kind>) -> Result<(), VenomError>,
{
    spec.serialize(SpecSerializer { visit })
}

/// Report the kind `value` serializes as, if supported.
pub fn probe_kind<T: Serialize + ?Sized>(value: &T) -> Option<Kind> {
    value.serialize(KindProbe).ok()
}

fn not_a_struct<T>() -> Result<T, VenomError> {
    Err(VenomError::SpecificationType)
}

struct SpecSerializer<F> {
    visit: F,
}

impl<F> ser::Serializer for SpecSerializer<F>
where
    F: FnMut(&'static str, Option<Kind>) -> Result<(), VenomError>,
{
    type Ok = ();
    type Error = VenomError;
    type SerializeSeq = Impossible<(), VenomError>;
    type SerializeTuple = Impossible<(), VenomError>;
    type SerializeTupleStruct = Impossible<(), VenomError>;
    type SerializeTupleVariant = Impossible<(), VenomError>;
    type SerializeMap = Impossible<(), VenomError>;
    type SerializeStruct = FieldWalker<F>;
    type SerializeStructVariant = Impossible<(), VenomError>;

    fn serialize_bool(self, _v: bool) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_i8(self, _v: i8) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_i16(self, _v: i16) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_i32(self, _v: i32) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_i64(self, _v: i64) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_u8(self, _v: u8) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_u16(self, _v: u16) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_u32(self, _v: u32) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_u64(self, _v: u64) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_f32(self, _v: f32) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_f64(self, _v: f64) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_char(self, _v: char) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_str(self, _v: &str) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_none(self) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_some<T: Serialize + ?Sized>(self, _value: &T) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_unit(self) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), VenomError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<(), VenomError> {
        not_a_struct()
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, VenomError> {
        not_a_struct()
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, VenomError> {
        not_a_struct()
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, VenomError> {
        not_a_struct()
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, VenomError> {
        not_a_struct()
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, VenomError> {
        not_a_struct()
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, VenomError> {
        Ok(FieldWalker { visit: self.visit })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, VenomError> {
        not_a_struct()
    }
}

// --- SerializeStruct ---

struct FieldWalker<F> {
    visit: F,
}

impl<F> ser::SerializeStruct for FieldWalker<F>
where
    F: FnMut(&'static str, Option<Kind>) -> Result<(), VenomError>,
{
    type Ok = ();
    type Error = VenomError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), VenomError> {
        (self.visit)(key, probe_kind(value))
    }

    fn end(self) -> Result<(), VenomError> {
        Ok(())
    }
}

// --- Kind probe ---

#[derive(Debug, Error)]
#[error("unsupported field type")]
struct Unsupported;

impl ser::Error for Unsupported {
    fn custom<T: std::fmt::Display>(_msg: T) -> Self {
        Unsupported
    }
}

struct KindProbe;

impl ser::Serializer for KindProbe {
    type Ok = Kind;
    type Error = Unsupported;
    type SerializeSeq = Impossible<Kind, Unsupported>;
    type SerializeTuple = Impossible<Kind, Unsupported>;
    type SerializeTupleStruct = Impossible<Kind, Unsupported>;
    type SerializeTupleVariant = Impossible<Kind, Unsupported>;
    type SerializeMap = Impossible<Kind, Unsupported>;
    type SerializeStruct = DurationProbe;
    type SerializeStructVariant = Impossible<Kind, Unsupported>;

    fn serialize_bool(self, _v: bool) -> Result<Kind, Unsupported> {
        Ok(Kind::Bool)
    }

    fn serialize_i8(self, _v: i8) -> Result<Kind, Unsupported> {
        Ok(Kind::I8)
    }

    fn serialize_i16(self, _v: i16) -> Result<Kind, Unsupported> {
        Ok(Kind::I16)
    }

    fn serialize_i32(self, _v: i32) -> Result<Kind, Unsupported> {
        Ok(Kind::I32)
    }

    fn serialize_i64(self, _v: i64) -> Result<Kind, Unsupported> {
        Ok(Kind::I64)
    }

    fn serialize_u8(self, _v: u8) -> Result<Kind, Unsupported> {
        Ok(Kind::U8)
    }

    fn serialize_u16(self, _v: u16) -> Result<Kind, Unsupported> {
        Ok(Kind::U16)
    }

    fn serialize_u32(self, _v: u32) -> Result<Kind, Unsupported> {
        Ok(Kind::U32)
    }

    fn serialize_u64(self, _v: u64) -> Result<Kind, Unsupported> {
        Ok(Kind::U64)
    }

    fn serialize_f32(self, _v: f32) -> Result<Kind, Unsupported> {
        Ok(Kind::F32)
    }

    fn serialize_f64(self, _v: f64) -> Result<Kind, Unsupported> {
        Ok(Kind::F64)
    }

    fn serialize_char(self, _v: char) -> Result<Kind, Unsupported> {
        Err(Unsupported)
    }

    fn serialize_str(self, _v: &str) -> Result<Kind, Unsupported> {
        Ok(Kind::String)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Kind, Unsupported> {
        Err(Unsupported)
    }

    fn serialize_none(self) -> Result<Kind, Unsupported> {
        Err(Unsupported)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, _value: &T) -> Result<Kind, Unsupported> {
        Err(Unsupported)
    }

    fn serialize_unit(self) -> Result<Kind, Unsupported> {
        Err(Unsupported)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Kind, Unsupported> {
        Err(Unsupported)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Kind, Unsupported> {
        Err(Unsupported)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Kind, Unsupported> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Kind, Unsupported> {
        Err(Unsupported)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Unsupported> {
        Err(Unsupported)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Unsupported> {
        Err(Unsupported)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Unsupported> {
        Err(Unsupported)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Unsupported> {
        Err(Unsupported)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Unsupported> {
        Err(Unsupported)
    }

    fn serialize_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Unsupported> {
        if name == "Duration" {
            Ok(DurationProbe)
        } else {
            Err(Unsupported)
        }
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Unsupported> {
        Err(Unsupported)
    }
}

struct DurationProbe;

impl ser::SerializeStruct for DurationProbe {
    type Ok = Kind;
    type Error = Unsupported;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _key: &'static str,
        _value: &T,
    ) -> Result<(), Unsupported> {
        Ok(())
    }

    fn end(self) -> Result<Kind, Unsupported> {
        Ok(Kind::Duration)
    }
}
