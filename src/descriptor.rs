//! The minimal field descriptor type the field grouper's public constructor
//! accepts. There is no reflector in this crate to produce these from real
//! user types; callers build them directly (or a reflection layer outside
//! this crate does).

use bitflags::bitflags;

bitflags! {
    /// Modifiers carried by a field descriptor. The grouper never inspects
    /// these itself, but they round-trip through construction for callers
    /// and tests that need them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FieldModifiers: u8 {
        /// Field is declared `final` (or the host language's equivalent).
        const FINAL = 0b0000_0001;
        /// Field is declared `static`.
        const STATIC = 0b0000_0010;
        /// Field is excluded from serialization by the host language.
        const TRANSIENT = 0b0000_0100;
        /// Field holds a primitive (non-reference) value.
        const PRIMITIVE = 0b0000_1000;
        /// Field holds a boxed primitive.
        const BOXED = 0b0001_0000;
    }
}

/// The nature of a field, as already decided by the upstream reflector.
///
/// The grouper partitions fields by which of its six input lists they
/// arrived in; folding that decision into the type itself means a caller
/// cannot accidentally hand a primitive descriptor to the boxed-field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// An unboxed primitive (`i32`, `bool`, `f64`, ...).
    Primitive,
    /// A boxed primitive (nullable wrapper around a primitive).
    Boxed,
    /// A reference-typed field whose declared type is `final` (not
    /// subclassable), enabling a cheaper monomorphic codec.
    FinalReference,
    /// Any other reference-typed field.
    OtherReference,
}

/// An opaque record describing one field of a user type: its name, declared
/// type category, and modifiers. The grouper reads nothing from a
/// descriptor but its identity and position in the input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    field_type: FieldType,
    modifiers: FieldModifiers,
}

impl FieldDescriptor {
    /// Construct a new descriptor.
    pub fn new(name: impl Into<String>, field_type: FieldType, modifiers: FieldModifiers) -> Self {
        FieldDescriptor {
            name: name.into(),
            field_type,
            modifiers,
        }
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type category.
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Declared modifiers.
    pub fn modifiers(&self) -> FieldModifiers {
        self.modifiers
    }
}
