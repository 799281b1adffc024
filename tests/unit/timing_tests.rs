/*!
 * Tests for the timing algebra
 */

use subforge::{Color, Document, Region, Style, StyleAttributes, PLACEHOLDER_TEXT};

use crate::common::{document, ms, spans};

fn span(start: i64, end: i64, text: &str) -> (i64, i64, String) {
    (start, end, text.to_string())
}

#[test]
fn test_unfragment_withTwoAdjacentEqualItems_shouldMergeIntoOne() {
    let mut doc = document(&[(0, 2_000, "a"), (2_000, 4_000, "a")]);
    doc.unfragment();
    assert_eq!(spans(&doc), vec![span(0, 4_000, "a")]);
}

#[test]
fn test_forceDuration_withShorterAndLongerTargets_shouldCutOrPad() {
    let original = document(&[(0, 10_000, "x")]);

    let mut shorter = original.clone();
    shorter.force_duration(ms(5_000));
    assert_eq!(spans(&shorter), vec![span(0, 5_000, "x")]);

    let mut longer = original;
    longer.force_duration(ms(15_000));
    assert_eq!(
        spans(&longer),
        vec![span(0, 10_000, "x"), span(14_999, 15_000, PLACEHOLDER_TEXT)]
    );
}

#[test]
fn test_forceDuration_withEmptyDocument_shouldAddPlaceholderOnly() {
    let mut doc = Document::new();
    doc.force_duration(ms(2_000));
    assert_eq!(spans(&doc), vec![span(1_999, 2_000, "...")]);
}

#[test]
fn test_fragment_withThreeSecondFragments_shouldSplitIntoThree() {
    let mut doc = document(&[(0, 7_000, "x")]);
    doc.fragment(ms(3_000));
    assert_eq!(
        spans(&doc),
        vec![span(0, 3_000, "x"), span(3_000, 6_000, "x"), span(6_000, 7_000, "x")]
    );
}

#[test]
fn test_fragment_withUnorderedInput_shouldReturnOrderedItems() {
    let mut doc = document(&[(4_000, 5_000, "b"), (0, 4_500, "a")]);
    doc.fragment(ms(2_000));
    assert_eq!(
        spans(&doc),
        vec![span(0, 2_000, "a"), span(2_000, 4_000, "a"), span(4_000, 5_000, "b"), span(4_000, 4_500, "a")]
    );
}

#[test]
fn test_merge_withSameStyleId_shouldKeepFirstDefinition() {
    let mut a = document(&[(0, 1_000, "a")]);
    a.add_style(Style::new(
        "s1",
        StyleAttributes {
            ssa_primary_colour: Some(Color::RED),
            ..StyleAttributes::default()
        },
    ));
    a.add_region(Region::new("top"));

    let mut b = document(&[(500, 1_500, "b")]);
    b.add_style(Style::new(
        "s1",
        StyleAttributes {
            ssa_primary_colour: Some(Color::BLUE),
            ..StyleAttributes::default()
        },
    ));
    b.add_region(Region::new("bottom"));

    a.merge(b);

    assert_eq!(a.style("s1").unwrap().attributes.ssa_primary_colour, Some(Color::RED));
    assert!(a.region("top").is_some());
    assert!(a.region("bottom").is_some());
    assert_eq!(spans(&a), vec![span(0, 1_000, "a"), span(500, 1_500, "b")]);
}

#[test]
fn test_isEmpty_shouldReflectItems() {
    assert!(Document::new().is_empty());
    assert!(!document(&[(0, 1, "a")]).is_empty());
}
