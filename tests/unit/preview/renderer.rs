use super::*;
use crate::catalog::models::ModelCatalog;
use crate::catalog::region::{CatalogVersion, RegionCatalog, RegionCategory, ViewSet};
use crate::config::DesignerConfig;
use crate::foundation::core::Rgba8;

fn resolver() -> AssetResolver {
    let config = DesignerConfig {
        models_base: "models".to_string(),
        patterns_base: "patterns".to_string(),
        models: ModelCatalog::new(["expedition", "touring"]).unwrap(),
        ..DesignerConfig::default()
    };
    AssetResolver::with_initial_model(&config).unwrap()
}

#[test]
fn element_ids_follow_host_markup() {
    assert_eq!(
        PreviewRenderer::layer_element_id(View::Top, "deck-color", 0),
        "kayak-top-view-deck-color"
    );
    assert_eq!(
        PreviewRenderer::layer_element_id(View::Side, "logo-color", 2),
        "kayak-side-view-logo-color-2"
    );
    assert_eq!(PreviewRenderer::outline_element_id(View::Side), "kayak-side-view-img");
    assert_eq!(
        PreviewRenderer::hardware_element_id(View::Top),
        "kayak-top-view-hardware"
    );
}

#[test]
fn apply_fill_repaints_every_view_of_a_region() {
    let r = resolver();
    let mut store = RegionColorStore::default();
    store.set("deck-color", Fill::color("#112233").unwrap());
    let patches = PreviewRenderer::new(&r)
        .apply_fill("deck-color", &store, &HullFinish::Solid)
        .unwrap();
    let ids: Vec<_> = patches.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["kayak-top-view-deck-color", "kayak-side-view-deck-color"]);
    assert_eq!(patches[0].style.background_color.as_deref(), Some("#112233"));
    assert_eq!(
        patches[1].css,
        "background-color: #112233; background-image: none; \
         -webkit-mask-image: url(\"models/expedition/masks/deck_side_mask.png\"); \
         mask-image: url(\"models/expedition/masks/deck_side_mask.png\");"
    );
}

#[test]
fn seat_is_top_only() {
    let r = resolver();
    let patches = PreviewRenderer::new(&r)
        .apply_fill("seat-color", &RegionColorStore::default(), &HullFinish::Solid)
        .unwrap();
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].view, View::Top);
}

#[test]
fn multi_placement_regions_share_one_fill() {
    let catalog = RegionCatalog::from_regions(
        CatalogVersion::V2,
        vec![Region::new(
            "logo-color",
            ViewSet::Both,
            RegionCategory::Base,
            &["logo_bow", "logo_stern"],
            Rgba8::opaque(0, 0, 0),
        )],
    )
    .unwrap();
    let mut store = RegionColorStore::new(catalog);
    store.set("logo-color", Fill::color("#FFFFFF").unwrap());
    let patches = PreviewRenderer::new(&resolver())
        .apply_fill("logo-color", &store, &HullFinish::Solid)
        .unwrap();
    assert_eq!(patches.len(), 4);
    assert_eq!(patches[1].id, "kayak-top-view-logo-color-1");
    assert!(patches.iter().all(|p| p.style.background_color.as_deref() == Some("#FFFFFF")));
}

#[test]
fn hull_finish_transitions_keep_the_stored_color() {
    let r = resolver();
    let renderer = PreviewRenderer::new(&r);
    let mut store = RegionColorStore::default();
    store.set("hull-color", Fill::color("#336699").unwrap());

    let carbon = HullFinish::parse("carbon_black").unwrap();
    let pattern = renderer.apply_hull_finish(&store, &carbon).unwrap();
    assert_eq!(pattern.state, FinishState::Pattern);
    assert!(!pattern.color_picker_visible);
    assert_eq!(pattern.patches.len(), 1);
    assert_eq!(pattern.patches[0].id, "kayak-side-view-hull-color");
    assert_eq!(pattern.patches[0].style.background_color, None);
    assert_eq!(
        pattern.patches[0].style.background_image.as_deref(),
        Some("url(\"patterns/carbon_black.png\")")
    );
    assert_eq!(store.get("hull-color"), Some(&Fill::color("#336699").unwrap()));

    let solid = renderer.apply_hull_finish(&store, &HullFinish::Solid).unwrap();
    assert_eq!(solid.state, FinishState::Solid);
    assert!(solid.color_picker_visible);
    assert_eq!(solid.patches[0].style.background_color.as_deref(), Some("#336699"));
    assert_eq!(solid.patches[0].style.background_image, None);

    // Idempotent.
    assert_eq!(renderer.apply_hull_finish(&store, &HullFinish::Solid).unwrap(), solid);
}

#[test]
fn model_switch_rederives_every_reference() {
    let mut r = resolver();
    let store = RegionColorStore::default();
    let before = PreviewRenderer::new(&r).snapshot(&store, &HullFinish::Solid).unwrap();
    r.set_model("touring").unwrap();
    let after = PreviewRenderer::new(&r).snapshot(&store, &HullFinish::Solid).unwrap();

    assert_eq!(after.model, "touring");
    assert_eq!(before.elements.len(), after.elements.len());
    for (b, a) in before.elements.iter().zip(&after.elements) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.style.background_color, b.style.background_color);
        let reference = a.src.clone().or(a.style.mask_image.clone()).unwrap();
        assert!(reference.contains("/touring/"), "{reference}");
    }
    assert_eq!(after.elements[0].id, "kayak-top-view-img");
    assert_eq!(after.elements.last().unwrap().id, "kayak-side-view-hardware");
}

#[test]
fn empty_fill_projects_transparent() {
    let mut store = RegionColorStore::default();
    store.set("seat-color", Fill::None);
    let patches = PreviewRenderer::new(&resolver())
        .apply_fill("seat-color", &store, &HullFinish::Solid)
        .unwrap();
    assert!(patches[0].style.hidden);
    assert!(patches[0].css.starts_with("background-color: transparent; background-image: none;"));
    assert!(patches[0].css.ends_with("display: none;"));
}

#[test]
fn unknown_region_is_rejected() {
    let r = resolver();
    assert!(
        PreviewRenderer::new(&r)
            .apply_fill("rudder-color", &RegionColorStore::default(), &HullFinish::Solid)
            .is_err()
    );
}

#[test]
fn hidden_style_renders_display_none() {
    let style = ElementStyle {
        hidden: true,
        ..ElementStyle::default()
    };
    assert_eq!(
        style.to_css(),
        "background-color: transparent; background-image: none; display: none;"
    );
}
