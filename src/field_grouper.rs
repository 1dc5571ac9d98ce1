//! Heuristic that partitions a class's fields into size-bounded groups so
//! that downstream codegen emits write/read methods small enough for the
//! host runtime to inline.
//!
//! The bounds below are not arbitrary: they were derived from measured
//! compiled-code sizes per field kind (roughly 22 bytes per primitive write,
//! ~81 bytes per boxed read with reference tracking on, 200+ bytes per
//! collection-typed field) and are tied to the host runtime's maximum
//! inlinable method size. Porting to a runtime with a different size
//! profile means re-deriving these, not reusing them.

use log::debug;

use crate::descriptor::{FieldDescriptor, FieldType};
use crate::error::{FuryError, Result};

/// Maximum descriptors per group, single list covering both write and read.
pub const PRIMITIVE_GROUP_BOUND: usize = 24;
/// Maximum descriptors per boxed-field write group.
pub const BOXED_WRITE_GROUP_BOUND: usize = 7;
/// Maximum descriptors per boxed-field read group with reference tracking off.
pub const BOXED_READ_GROUP_BOUND_NO_TRACKING: usize = 7;
/// Maximum descriptors per boxed-field read group with reference tracking on.
pub const BOXED_READ_GROUP_BOUND_TRACKING: usize = 4;
/// Maximum descriptors per final-typed reference field write group.
pub const FINAL_WRITE_GROUP_BOUND: usize = 9;
/// Maximum descriptors per final-typed reference field read group.
pub const FINAL_READ_GROUP_BOUND: usize = 5;
/// Maximum descriptors per other-reference field write group.
pub const OTHER_WRITE_GROUP_BOUND: usize = 9;
/// Maximum descriptors per other-reference field read group.
pub const OTHER_READ_GROUP_BOUND: usize = 5;

/// One non-empty, ordered sublist of descriptors, handed to the code
/// generator as the body of one emitted write or read method.
pub type Group = Vec<FieldDescriptor>;

/// Scan `descriptors` front to back, emitting groups of exactly `bound`
/// descriptors until fewer than `bound` remain, then a final (possibly
/// smaller) group. Order is preserved; an empty input yields zero groups.
fn partition(descriptors: &[FieldDescriptor], bound: usize) -> Vec<Group> {
    debug_assert!(bound > 0, "a zero group bound can never make progress");
    descriptors
        .chunks(bound)
        .map(|chunk| chunk.to_vec())
        .collect()
}

fn require_category(
    descriptors: &[FieldDescriptor],
    expected: FieldType,
    category: &str,
) -> Result<()> {
    if let Some(mismatch) = descriptors.iter().find(|d| d.field_type() != expected) {
        return Err(FuryError::ProgrammerError {
            message: format!(
                "field `{}` is not a {category} descriptor (found {:?})",
                mismatch.name(),
                mismatch.field_type(),
            ),
        });
    }
    Ok(())
}

/// A call-site expression the code generator will emit for one group: the
/// method name it was assigned and the field names it closes over, in
/// order. Grouping and code emission are decoupled: this crate only
/// produces this description. The generator owns rendering it to source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInvoker {
    /// Name of the generated method, e.g. `writePrimitives0`.
    pub method_name: String,
    /// Field names the method operates on, in group order.
    pub field_names: Vec<String>,
}

impl MethodInvoker {
    /// Build the invoker for the `index`-th group under a given method-name
    /// `prefix` (e.g. `writePrimitives`, `readBoxed`).
    pub fn for_group(prefix: &str, index: usize, group: &[FieldDescriptor]) -> Self {
        MethodInvoker {
            method_name: format!("{prefix}{index}"),
            field_names: group.iter().map(|d| d.name().to_string()).collect(),
        }
    }

    /// The call-site expression the outer generated method would invoke,
    /// e.g. `writePrimitives0(a, b, c)`.
    pub fn call_expression(&self) -> String {
        format!("{}({})", self.method_name, self.field_names.join(", "))
    }
}

/// Partitions a class's fields into the seven size-bounded group lists the
/// host code generator turns into individual write/read methods.
///
/// Built once from an immutable, pre-sorted set of descriptor lists; not
/// re-entrant.
pub struct FieldGrouper {
    primitive_groups: Vec<Group>,
    boxed_write_groups: Vec<Group>,
    boxed_read_groups: Vec<Group>,
    final_write_groups: Vec<Group>,
    final_read_groups: Vec<Group>,
    other_write_groups: Vec<Group>,
    other_read_groups: Vec<Group>,
}

impl FieldGrouper {
    /// Build a grouper from the four category-partitioned descriptor lists
    /// (already sorted and categorized by the upstream reflector) and the
    /// `boxed_ref_tracking` flag, which narrows the boxed-read bound from 7
    /// to 4.
    ///
    /// Fails with `ProgrammerError` if a descriptor's declared `FieldType`
    /// does not match the list it was placed in.
    pub fn new(
        primitives: Vec<FieldDescriptor>,
        boxed: Vec<FieldDescriptor>,
        final_refs: Vec<FieldDescriptor>,
        other_refs: Vec<FieldDescriptor>,
        boxed_ref_tracking: bool,
    ) -> Result<Self> {
        require_category(&primitives, FieldType::Primitive, "primitive")?;
        require_category(&boxed, FieldType::Boxed, "boxed")?;
        require_category(&final_refs, FieldType::FinalReference, "final-reference")?;
        require_category(&other_refs, FieldType::OtherReference, "other-reference")?;

        let boxed_read_bound = if boxed_ref_tracking {
            BOXED_READ_GROUP_BOUND_TRACKING
        } else {
            BOXED_READ_GROUP_BOUND_NO_TRACKING
        };

        let grouper = FieldGrouper {
            primitive_groups: partition(&primitives, PRIMITIVE_GROUP_BOUND),
            boxed_write_groups: partition(&boxed, BOXED_WRITE_GROUP_BOUND),
            boxed_read_groups: partition(&boxed, boxed_read_bound),
            final_write_groups: partition(&final_refs, FINAL_WRITE_GROUP_BOUND),
            final_read_groups: partition(&final_refs, FINAL_READ_GROUP_BOUND),
            other_write_groups: partition(&other_refs, OTHER_WRITE_GROUP_BOUND),
            other_read_groups: partition(&other_refs, OTHER_READ_GROUP_BOUND),
        };

        debug!(
            "field grouper built: {} primitive, {} boxed-write, {} boxed-read, \
             {} final-write, {} final-read, {} other-write, {} other-read groups",
            grouper.primitive_groups.len(),
            grouper.boxed_write_groups.len(),
            grouper.boxed_read_groups.len(),
            grouper.final_write_groups.len(),
            grouper.final_read_groups.len(),
            grouper.other_write_groups.len(),
            grouper.other_read_groups.len(),
        );

        Ok(grouper)
    }

    /// Groups for the combined primitive write/read method family.
    pub fn primitive_groups(&self) -> &[Group] {
        &self.primitive_groups
    }

    /// Groups for boxed-field write methods.
    pub fn boxed_write_groups(&self) -> &[Group] {
        &self.boxed_write_groups
    }

    /// Groups for boxed-field read methods.
    pub fn boxed_read_groups(&self) -> &[Group] {
        &self.boxed_read_groups
    }

    /// Groups for final-typed reference field write methods.
    pub fn final_write_groups(&self) -> &[Group] {
        &self.final_write_groups
    }

    /// Groups for final-typed reference field read methods.
    pub fn final_read_groups(&self) -> &[Group] {
        &self.final_read_groups
    }

    /// Groups for other-reference field write methods.
    pub fn other_write_groups(&self) -> &[Group] {
        &self.other_write_groups
    }

    /// Groups for other-reference field read methods.
    pub fn other_read_groups(&self) -> &[Group] {
        &self.other_read_groups
    }
}
