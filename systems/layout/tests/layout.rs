use glam::Vec2;
use ring_gauge_core::{ScoreInput, Segment, SegmentColor};
use ring_gauge_system_layout::{
    angular_position, compute_ring_layout, label_anchor, pointer_angle, LayoutError,
    RingDimensions,
};

const TOLERANCE: f32 = 1e-2;

fn demo_segments() -> Vec<Segment> {
    vec![
        Segment::new("bad", 10.0, "BAD", SegmentColor::from_rgb(0xff, 0x4d, 0x4d)),
        Segment::new("good", 8.0, "GOOD", SegmentColor::from_rgb(0x2d, 0xe0, 0x8a)),
        Segment::new(
            "standard",
            4.0,
            "STANDARD",
            SegmentColor::from_rgb(0xff, 0x8f, 0x33),
        ),
    ]
}

fn demo_dimensions() -> RingDimensions {
    RingDimensions::new(150.0, 35.0, 0.04).expect("demo dimensions are valid")
}

#[test]
fn arc_lengths_and_gaps_tile_the_circumference() {
    let dimensions = demo_dimensions();
    let segments = demo_segments();

    let layout = compute_ring_layout(&segments, &dimensions).expect("layout computes");

    let arcs_total: f32 = layout.arcs().iter().map(|arc| arc.arc_length()).sum();
    let gaps_total = layout.gap_length() * segments.len() as f32;

    assert!(
        (arcs_total + gaps_total - layout.circumference()).abs() < TOLERANCE,
        "arcs ({arcs_total}) plus gaps ({gaps_total}) must tile the circumference ({})",
        layout.circumference()
    );
}

#[test]
fn reference_scenario_matches_the_arc_formula() {
    let dimensions = demo_dimensions();
    let segments = demo_segments();

    let layout = compute_ring_layout(&segments, &dimensions).expect("layout computes");

    let circumference = 2.0 * std::f32::consts::PI * 132.5;
    let gap = 0.04 * circumference;
    assert!((layout.circumference() - circumference).abs() < TOLERANCE);

    let expected = [
        circumference * 10.0 / 22.0 - gap,
        circumference * 8.0 / 22.0 - gap,
        circumference * 4.0 / 22.0 - gap,
    ];
    for (arc, expected_length) in layout.arcs().iter().zip(expected) {
        assert!(
            (arc.arc_length() - expected_length).abs() < TOLERANCE,
            "arc length {} deviates from expected {expected_length}",
            arc.arc_length()
        );
    }

    // Span boundaries carry the full weight share; the first segment of
    // 10/22 covers 163.6 degrees starting at the top.
    let first = layout.arcs()[0];
    assert!((first.start_angle() - 0.0).abs() < TOLERANCE);
    assert!((first.end_angle() - 360.0 * 10.0 / 22.0).abs() < TOLERANCE);
    assert!((first.midpoint_angle() - 180.0 * 10.0 / 22.0).abs() < TOLERANCE);
}

#[test]
fn single_segment_spans_the_ring_minus_one_gap() {
    let dimensions = demo_dimensions();
    let segments = vec![Segment::new(
        "only",
        22.0,
        "ONLY",
        SegmentColor::from_rgb(10, 20, 30),
    )];

    let layout = compute_ring_layout(&segments, &dimensions).expect("layout computes");
    let arc = layout.arcs()[0];

    assert!((arc.arc_length() - (layout.circumference() - layout.gap_length())).abs() < TOLERANCE);
    assert!((arc.start_angle() - 0.0).abs() < TOLERANCE);
    assert!((arc.end_angle() - 360.0).abs() < TOLERANCE);
    assert!((arc.midpoint_angle() - 180.0).abs() < TOLERANCE);
}

#[test]
fn angular_position_places_zero_degrees_at_the_top() {
    let center = Vec2::new(175.0, 175.0);
    let top = angular_position(0.0, 100.0, center);

    assert!((top.x - 175.0).abs() < TOLERANCE);
    assert!((top.y - 75.0).abs() < TOLERANCE);
}

#[test]
fn angular_position_places_ninety_degrees_a_quarter_turn_clockwise() {
    let center = Vec2::new(175.0, 175.0);
    let right = angular_position(90.0, 100.0, center);

    assert!((right.x - 275.0).abs() < TOLERANCE);
    assert!((right.y - 175.0).abs() < TOLERANCE);
}

#[test]
fn identical_inputs_produce_bit_identical_layouts() {
    let dimensions = demo_dimensions();
    let segments = demo_segments();

    let first = compute_ring_layout(&segments, &dimensions).expect("first layout computes");
    let second = compute_ring_layout(&segments, &dimensions).expect("second layout computes");

    assert_eq!(first.circumference().to_bits(), second.circumference().to_bits());
    for (a, b) in first.arcs().iter().zip(second.arcs()) {
        assert_eq!(a.arc_length().to_bits(), b.arc_length().to_bits());
        assert_eq!(a.start_offset().to_bits(), b.start_offset().to_bits());
        assert_eq!(a.start_angle().to_bits(), b.start_angle().to_bits());
        assert_eq!(a.end_angle().to_bits(), b.end_angle().to_bits());
        assert_eq!(a.sweep_angle().to_bits(), b.sweep_angle().to_bits());
    }
}

#[test]
fn pointer_angle_maps_score_linearly_onto_the_ring() {
    let angle = pointer_angle(&ScoreInput::new(26.0, 30.0));
    assert!((angle - 312.0).abs() < TOLERANCE);

    let dot = angular_position(angle, 132.5, Vec2::new(175.0, 175.0));
    let expected = angular_position(312.0, 132.5, Vec2::new(175.0, 175.0));
    assert!((dot - expected).length() < TOLERANCE);
}

#[test]
fn pointer_angle_does_not_clamp_out_of_range_scores() {
    let beyond = pointer_angle(&ScoreInput::new(45.0, 30.0));
    assert!((beyond - 540.0).abs() < TOLERANCE);

    let before = pointer_angle(&ScoreInput::new(-3.0, 30.0));
    assert!((before + 36.0).abs() < TOLERANCE);
}

#[test]
fn pointer_angle_degenerates_to_zero_for_invalid_maximum() {
    assert_eq!(pointer_angle(&ScoreInput::new(10.0, 0.0)), 0.0);
    assert_eq!(pointer_angle(&ScoreInput::new(10.0, -5.0)), 0.0);
    assert_eq!(pointer_angle(&ScoreInput::new(10.0, f32::NAN)), 0.0);
}

#[test]
fn label_anchor_matches_the_shared_angular_mapping() {
    let center = Vec2::new(175.0, 175.0);
    let anchor = label_anchor(81.8, 190.0, center);
    let reference = angular_position(81.8, 190.0, center);

    assert_eq!(anchor.x.to_bits(), reference.x.to_bits());
    assert_eq!(anchor.y.to_bits(), reference.y.to_bits());
}

#[test]
fn zero_total_weight_is_rejected() {
    let dimensions = demo_dimensions();
    let segments = vec![
        Segment::new("a", 0.0, "A", SegmentColor::from_rgb(0, 0, 0)),
        Segment::new("b", 0.0, "B", SegmentColor::from_rgb(0, 0, 0)),
    ];

    let error = compute_ring_layout(&segments, &dimensions).expect_err("zero total is rejected");
    assert!(matches!(error, LayoutError::NonPositiveTotalWeight { .. }));
}

#[test]
fn empty_segment_list_is_rejected() {
    let dimensions = demo_dimensions();
    let error = compute_ring_layout(&[], &dimensions).expect_err("empty list is rejected");
    assert_eq!(error, LayoutError::EmptySegments);
}

#[test]
fn start_offsets_accumulate_full_weight_shares() {
    let dimensions = demo_dimensions();
    let segments = demo_segments();

    let layout = compute_ring_layout(&segments, &dimensions).expect("layout computes");
    let circumference = layout.circumference();

    assert!((layout.arcs()[0].start_offset() - 0.0).abs() < TOLERANCE);
    assert!(
        (layout.arcs()[1].start_offset() - circumference * 10.0 / 22.0).abs() < TOLERANCE
    );
    assert!(
        (layout.arcs()[2].start_offset() - circumference * 18.0 / 22.0).abs() < TOLERANCE
    );
}
