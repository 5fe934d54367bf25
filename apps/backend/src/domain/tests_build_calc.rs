use crate::domain::build_calc::{
    candidate_build_values, detect_build_type, find_base_card, validate_build_strict,
    BuildCalculator, BuildKind, DisplayValue, PlacedValue,
};
use crate::domain::state::CardSource;
use crate::errors::domain::{DomainError, ValidationKind};

fn hand(values: &[u8]) -> Vec<PlacedValue> {
    values.iter().map(|v| PlacedValue::hand(*v)).collect()
}

fn table(values: &[u8]) -> Vec<PlacedValue> {
    values.iter().map(|v| PlacedValue::table(*v)).collect()
}

fn replay(seq: &[PlacedValue]) -> Vec<BuildCalculator> {
    let mut calc = BuildCalculator::new();
    (1..=seq.len())
        .map(|n| {
            calc.push(&seq[..n]);
            calc.clone()
        })
        .collect()
}

#[test]
fn pair_of_sixes_is_a_same_value_build_of_six() {
    let found = detect_build_type(&hand(&[6, 6])).unwrap();
    assert_eq!(found.kind, BuildKind::SameValue);
    assert_eq!(found.value, 6);
    assert_eq!(candidate_build_values(&hand(&[6, 6])), vec![6]);
}

#[test]
fn captured_five_placed_last_is_the_base() {
    let seq = vec![
        PlacedValue::table(2),
        PlacedValue::table(3),
        PlacedValue::new(5, CardSource::Captured),
    ];
    assert_eq!(find_base_card(&seq), Some(2));
    let found = detect_build_type(&seq).unwrap();
    assert_eq!(found.kind, BuildKind::Base);
    assert_eq!(found.value, 5);
}

#[test]
fn hand_five_placed_last_cannot_be_the_base() {
    let seq = hand(&[2, 3, 5]);
    assert_eq!(find_base_card(&seq), None);
    let found = detect_build_type(&seq).unwrap();
    assert_eq!(found.kind, BuildKind::Sum);
    assert_eq!(found.value, 10);
    // Both readings remain available when finalizing.
    assert_eq!(candidate_build_values(&seq), vec![5, 10]);
}

#[test]
fn captured_card_cannot_be_the_first_base() {
    let seq = vec![
        PlacedValue::new(5, CardSource::Captured),
        PlacedValue::table(2),
        PlacedValue::table(3),
    ];
    assert_eq!(find_base_card(&seq), None);
    assert_eq!(detect_build_type(&seq).unwrap().value, 10);
}

#[test]
fn four_four_two_is_a_sum_build_of_ten() {
    let found = detect_build_type(&hand(&[4, 4, 2])).unwrap();
    assert_eq!(found.kind, BuildKind::Sum);
    assert_eq!(found.value, 10);
}

#[test]
fn base_card_first_wins_over_segmentation() {
    let found = detect_build_type(&table(&[8, 3, 5])).unwrap();
    assert_eq!(found.kind, BuildKind::Base);
    assert_eq!(found.value, 8);
}

#[test]
fn table_base_in_last_position_falls_back_to_segments() {
    let found = detect_build_type(&table(&[3, 5, 8])).unwrap();
    assert_eq!(found.kind, BuildKind::Segmented);
    assert_eq!(found.value, 8);
    assert_eq!(found.segments, 2);
    assert_eq!(candidate_build_values(&table(&[3, 5, 8])), vec![8]);
}

#[test]
fn segmented_build_uses_first_segment_value() {
    let found = detect_build_type(&table(&[3, 4, 5, 2])).unwrap();
    assert_eq!(found.kind, BuildKind::Segmented);
    assert_eq!(found.value, 7);
    assert_eq!(found.segments, 2);
}

#[test]
fn unsplittable_sequence_is_not_a_build() {
    assert_eq!(detect_build_type(&table(&[9, 4])), None);
    assert!(candidate_build_values(&table(&[9, 4])).is_empty());
}

#[test]
fn incremental_tracks_deficit_and_segments() {
    let steps = replay(&table(&[3, 4, 5, 2]));

    assert_eq!(steps[0].display_value, DisplayValue::Value(3));
    assert!(steps[0].is_building);
    assert_eq!(steps[0].build_value, None);

    assert_eq!(steps[1].build_value, Some(7));
    assert_eq!(steps[1].display_value, DisplayValue::Value(7));
    assert!(!steps[1].is_building);

    // Total passes 10: a new segment starts.
    assert_eq!(steps[2].display_value, DisplayValue::Value(-2));
    assert!(steps[2].is_building);
    assert_eq!(steps[2].running_sum, 5);

    assert_eq!(steps[3].display_value, DisplayValue::Value(7));
    assert_eq!(steps[3].segment_count, 2);
    assert!(steps[3].is_complete());
    assert_eq!(steps[3].build_kind, Some(BuildKind::Segmented));
}

#[test]
fn incremental_redetects_while_total_is_small() {
    let steps = replay(&table(&[3, 4, 2]));
    assert_eq!(steps[1].build_value, Some(7));
    assert_eq!(steps[2].build_value, Some(9));
    assert_eq!(steps[2].display_value, DisplayValue::Value(9));
}

#[test]
fn incremental_overflow_is_terminal() {
    let steps = replay(&table(&[3, 4, 5, 2, 9, 7]));
    assert!(steps[3].is_valid);
    assert!(!steps[4].is_valid);
    assert_eq!(steps[4].display_value, DisplayValue::Invalid);
    // A card that would have completed a segment does not revive it.
    assert!(!steps[5].is_valid);
    assert_eq!(steps[5].display_value, DisplayValue::Invalid);
}

#[test]
fn mid_stack_base_is_not_continued_as_segments() {
    let seq = vec![
        PlacedValue::table(2),
        PlacedValue::new(5, CardSource::Captured),
        PlacedValue::table(3),
        PlacedValue::table(5),
    ];
    let steps = replay(&seq);
    assert_eq!(steps[2].build_value, Some(5));
    assert_eq!(steps[2].build_kind, Some(BuildKind::Base));

    // 2 | 5 | 3 does not split into fives, so another five completes nothing.
    assert!(!steps[3].is_complete());
    assert!(steps[3].is_valid);
    assert_eq!(steps[3].build_value, None);
    assert_eq!(steps[3].display_value, DisplayValue::Value(15));
    assert!(validate_build_strict(&seq, 5).is_err());
}

#[test]
fn mid_stack_base_recovers_when_a_later_split_exists() {
    let seq = vec![
        PlacedValue::table(2),
        PlacedValue::new(5, CardSource::Captured),
        PlacedValue::table(3),
        PlacedValue::table(5),
        PlacedValue::table(5),
    ];
    let last = BuildCalculator::from_cards(&seq);
    assert!(last.is_complete());
    assert_eq!(last.build_value, Some(10));
    assert_eq!(
        validate_build_strict(&seq, 10).unwrap(),
        BuildKind::Segmented
    );
}

#[test]
fn trailing_base_keeps_counting_segments() {
    let seq = vec![
        PlacedValue::table(2),
        PlacedValue::table(3),
        PlacedValue::new(5, CardSource::Captured),
        PlacedValue::table(1),
        PlacedValue::table(4),
    ];
    let steps = replay(&seq);
    assert_eq!(steps[2].build_kind, Some(BuildKind::Base));
    assert_eq!(steps[3].display_value, DisplayValue::Value(-4));
    assert!(steps[4].is_complete());
    assert_eq!(steps[4].build_value, Some(5));
    assert_eq!(steps[4].segment_count, 3);
    assert!(validate_build_strict(&seq, 5).is_ok());
}

#[test]
fn incremental_same_value_run() {
    let steps = replay(&hand(&[6, 6, 6]));
    assert_eq!(steps[1].build_value, Some(6));
    assert_eq!(steps[1].build_kind, Some(BuildKind::SameValue));
    assert_eq!(steps[2].display_value, DisplayValue::Value(6));
    assert_eq!(steps[2].segment_count, 3);
    assert_eq!(steps[2].build_kind, Some(BuildKind::SameValue));
}

#[test]
fn strict_validation_accepts_every_candidate() {
    let seq = hand(&[2, 3, 5]);
    assert_eq!(validate_build_strict(&seq, 5).unwrap(), BuildKind::Segmented);
    assert_eq!(validate_build_strict(&seq, 10).unwrap(), BuildKind::Sum);
}

#[test]
fn strict_validation_rejects_unsupported_values() {
    let err = validate_build_strict(&hand(&[2, 3, 5]), 4).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidBuild, _)
    ));
    // Values above ten never build.
    assert!(validate_build_strict(&hand(&[6, 6]), 12).is_err());
    assert!(validate_build_strict(&hand(&[6]), 6).is_err());
}
