//! Integration-level grouper properties: partition order-preservation,
//! bound respecting, and the boxed-read bound's dependence on
//! `boxed_ref_tracking`.

use fury_core::descriptor::{FieldDescriptor, FieldModifiers, FieldType};
use fury_core::field_grouper::{
    FieldGrouper, BOXED_READ_GROUP_BOUND_NO_TRACKING, BOXED_READ_GROUP_BOUND_TRACKING,
    BOXED_WRITE_GROUP_BOUND, FINAL_READ_GROUP_BOUND, FINAL_WRITE_GROUP_BOUND,
    OTHER_READ_GROUP_BOUND, OTHER_WRITE_GROUP_BOUND, PRIMITIVE_GROUP_BOUND,
};

fn descriptors(n: usize, field_type: FieldType) -> Vec<FieldDescriptor> {
    (0..n)
        .map(|i| FieldDescriptor::new(format!("field_{i}"), field_type, FieldModifiers::empty()))
        .collect()
}

fn assert_partition_holds(input: &[FieldDescriptor], groups: &[Vec<FieldDescriptor>], bound: usize) {
    let flattened: Vec<_> = groups.iter().flatten().cloned().collect();
    assert_eq!(flattened, input, "concatenation must equal input in order");

    for (i, group) in groups.iter().enumerate() {
        assert!(!group.is_empty(), "group {i} must not be empty");
        assert!(group.len() <= bound, "group {i} exceeds bound {bound}");
        if i + 1 < groups.len() {
            assert_eq!(group.len(), bound, "only the last group may be short");
        }
    }
}

#[test]
fn every_category_partitions_with_order_preservation() {
    let primitives = descriptors(61, FieldType::Primitive);
    let boxed = descriptors(23, FieldType::Boxed);
    let final_refs = descriptors(19, FieldType::FinalReference);
    let other_refs = descriptors(28, FieldType::OtherReference);

    let grouper = FieldGrouper::new(
        primitives.clone(),
        boxed.clone(),
        final_refs.clone(),
        other_refs.clone(),
        false,
    )
    .unwrap();

    assert_partition_holds(&primitives, grouper.primitive_groups(), PRIMITIVE_GROUP_BOUND);
    assert_partition_holds(&boxed, grouper.boxed_write_groups(), BOXED_WRITE_GROUP_BOUND);
    assert_partition_holds(
        &boxed,
        grouper.boxed_read_groups(),
        BOXED_READ_GROUP_BOUND_NO_TRACKING,
    );
    assert_partition_holds(&final_refs, grouper.final_write_groups(), FINAL_WRITE_GROUP_BOUND);
    assert_partition_holds(&final_refs, grouper.final_read_groups(), FINAL_READ_GROUP_BOUND);
    assert_partition_holds(&other_refs, grouper.other_write_groups(), OTHER_WRITE_GROUP_BOUND);
    assert_partition_holds(&other_refs, grouper.other_read_groups(), OTHER_READ_GROUP_BOUND);
}

#[test]
fn boxed_ref_tracking_flag_only_affects_boxed_read_bound() {
    let boxed = descriptors(15, FieldType::Boxed);

    let off = FieldGrouper::new(vec![], boxed.clone(), vec![], vec![], false).unwrap();
    let on = FieldGrouper::new(vec![], boxed, vec![], vec![], true).unwrap();

    assert_eq!(off.boxed_read_groups()[0].len(), BOXED_READ_GROUP_BOUND_NO_TRACKING);
    assert_eq!(on.boxed_read_groups()[0].len(), BOXED_READ_GROUP_BOUND_TRACKING);
    assert_eq!(
        off.boxed_write_groups()[0].len(),
        on.boxed_write_groups()[0].len()
    );
}
