use super::*;

fn names(slots: &[LayerSlot<'_>]) -> Vec<String> {
    slots.iter().map(|s| s.region.name.clone()).collect()
}

#[test]
fn v1_lacks_seam_tape_and_v2_has_it() {
    let v1 = RegionCatalog::for_version(CatalogVersion::V1);
    let v2 = RegionCatalog::for_version(CatalogVersion::V2);
    assert!(!v1.contains("deck-seam-tape-color"));
    assert!(v2.contains("deck-seam-tape-color"));
    assert_eq!(v2.len(), v1.len() + 1);
    assert_eq!(RegionCatalog::default().version(), CatalogVersion::V2);
}

#[test]
fn seat_is_top_only_and_hull_is_side_only() {
    let cat = RegionCatalog::default();
    let top = names(&cat.layers_for(View::Top));
    let side = names(&cat.layers_for(View::Side));
    assert!(top.contains(&"seat-color".to_string()));
    assert!(!side.contains(&"seat-color".to_string()));
    assert!(side.contains(&"hull-color".to_string()));
    assert!(!top.contains(&"hull-color".to_string()));
}

#[test]
fn layers_are_bucketed_base_accent_line() {
    let cat = RegionCatalog::default();
    let side = cat.layers_for(View::Side);
    let cats: Vec<RegionCategory> = side.iter().map(|s| s.region.category).collect();
    let mut sorted = cats.clone();
    sorted.sort();
    assert_eq!(cats, sorted);
    assert_eq!(side.last().unwrap().region.category, RegionCategory::Line);
    // Insertion order within the base bucket.
    let base: Vec<String> = side
        .iter()
        .filter(|s| s.region.category == RegionCategory::Base)
        .map(|s| s.region.name.clone())
        .collect();
    assert_eq!(
        base,
        ["hull-color", "deck-color", "cockpit-rim-color", "logo-color"]
    );
}

#[test]
fn multi_placement_regions_yield_one_slot_per_stem() {
    let mut logo = Region::new(
        "logo-color",
        ViewSet::Both,
        RegionCategory::Base,
        &["logo_bow", "logo_stern"],
        Rgba8::opaque(0, 0, 0),
    );
    logo.finishable = false;
    let cat = RegionCatalog::from_regions(CatalogVersion::V2, vec![logo]).unwrap();
    let slots = cat.layers_for(View::Top);
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].mask_stem, "logo_bow");
    assert_eq!(slots[1].placement, 1);
}

#[test]
fn from_regions_rejects_duplicates_and_bad_stems() {
    let a = Region::new(
        "a",
        ViewSet::Top,
        RegionCategory::Base,
        &["a"],
        Rgba8::opaque(0, 0, 0),
    );
    assert!(
        RegionCatalog::from_regions(CatalogVersion::V1, vec![a.clone(), a.clone()]).is_err()
    );
    let bad = Region::new(
        "b",
        ViewSet::Top,
        RegionCategory::Base,
        &["../b"],
        Rgba8::opaque(0, 0, 0),
    );
    assert!(RegionCatalog::from_regions(CatalogVersion::V1, vec![bad]).is_err());
}

#[test]
fn hull_region_is_the_finishable_one() {
    let cat = RegionCatalog::default();
    assert_eq!(cat.hull_region().unwrap().name, "hull-color");
}

#[test]
fn view_set_membership() {
    assert!(ViewSet::Both.contains(View::Top));
    assert!(ViewSet::Both.contains(View::Side));
    assert!(ViewSet::Top.contains(View::Top));
    assert!(!ViewSet::Top.contains(View::Side));
    assert_eq!(View::Side.as_str(), "side");
}
