use std::sync::Arc;

use super::*;
use crate::assets::decode::PreparedImage;
use crate::assets::loader::MemoryImageLoader;
use crate::catalog::models::ModelCatalog;
use crate::design::repository::MemoryDesignRepository;

fn image(width: u32, height: u32, px: [u8; 4]) -> PreparedImage {
    PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(px.repeat((width * height) as usize)),
    }
}

fn config() -> DesignerConfig {
    DesignerConfig {
        models_base: "m".to_string(),
        patterns_base: "p".to_string(),
        models: ModelCatalog::new(["expedition", "touring"]).unwrap(),
        ..DesignerConfig::default()
    }
}

/// Every asset the default catalog needs, for both models. Top is 8x4, side 6x3.
fn loader() -> MemoryImageLoader {
    let mut l = MemoryImageLoader::new();
    let catalog = config().region_catalog();
    for model in ["expedition", "touring"] {
        for (view, w, h) in [(View::Top, 8, 4), (View::Side, 6, 3)] {
            let v = view.as_str();
            l.insert(format!("m/{model}/{v}_view_outline.png"), image(w, h, [255; 4]));
            l.insert(format!("m/{model}/{v}_view_hardware.png"), image(w, h, [0; 4]));
            for slot in catalog.layers_for(view) {
                let mask = if slot.region.name == "hull-color" {
                    [0, 0, 0, 255]
                } else {
                    [0; 4]
                };
                l.insert(
                    format!("m/{model}/masks/{}_{v}_mask.png", slot.mask_stem),
                    image(w, h, mask),
                );
            }
        }
    }
    l.insert("p/carbon_black.png", image(2, 2, [10, 10, 10, 255]));
    l
}

fn designer() -> Designer {
    Designer::new(config(), Arc::new(loader())).unwrap()
}

#[test]
fn composite_stacks_views_with_gap() {
    let d = designer();
    let out = d.render_composite().unwrap();
    assert_eq!((out.width, out.height), (8, 4 + 20 + 3));
    // Side view is centered (1px margin) and its hull is painted.
    assert_eq!(out.straight_pixel(1, 24), [0xD7, 0xD7, 0xD7, 255]);
    assert_eq!(out.pixel(0, 24), [0; 4]);
}

#[test]
fn png_export_decodes_to_composite_size() {
    let bytes = designer().export_png().unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (8, 27));
}

#[test]
fn unknown_region_fill_is_ignored() {
    let mut d = designer();
    let before = d.store().clone();
    assert!(d.set_fill("rudder-color", Fill::None).unwrap().is_empty());
    assert_eq!(d.store(), &before);
}

#[test]
fn hull_finish_roundtrip_restores_pixels() {
    let mut d = designer();
    let solid = d.render_view(View::Side).unwrap();
    d.set_hull_finish(HullFinish::parse("carbon_black").unwrap()).unwrap();
    let carbon = d.render_view(View::Side).unwrap();
    assert_eq!(carbon.pixel(0, 0), [10, 10, 10, 255]);
    d.set_hull_finish(HullFinish::Solid).unwrap();
    assert_eq!(d.render_view(View::Side).unwrap(), solid);
}

#[test]
fn model_switch_keeps_fills() {
    let mut d = designer();
    d.set_fill("deck-color", Fill::color("#010203").unwrap()).unwrap();
    let patches = d.set_model("touring").unwrap();
    assert!(!patches.is_empty());
    assert_eq!(d.active_model().unwrap(), "touring");
    assert_eq!(d.store().get("deck-color"), Some(&Fill::color("#010203").unwrap()));
    assert!(d.set_model("classic").is_err());
    assert_eq!(d.active_model().unwrap(), "touring");
}

#[test]
fn save_and_load_through_repository() {
    let repo = MemoryDesignRepository::new();
    let mut d = designer();
    d.set_model("touring").unwrap();
    d.set_fill("seat-color", Fill::color("#ABCDEF").unwrap()).unwrap();
    d.set_hull_finish(HullFinish::parse("carbon_black").unwrap()).unwrap();
    let id = d.save_design(&repo, "Sunset").unwrap();

    let mut other = designer();
    assert_eq!(other.load_design(&repo, id).unwrap(), ModelStatus::Known);
    assert_eq!(other.active_model().unwrap(), "touring");
    assert_eq!(other.store(), d.store());
    assert_eq!(other.hull_finish(), d.hull_finish());
}

#[test]
fn saved_design_carries_a_preview_of_the_export() {
    let repo = MemoryDesignRepository::new();
    let d = designer();
    let id = d.save_design(&repo, "With preview").unwrap();
    let png = repo.load(id).unwrap().preview_png.unwrap();
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!((img.width(), img.height()), (8, 27));
    assert_eq!(png, d.export_png().unwrap());

    let id = d.save_design_without_preview(&repo, "Guest").unwrap();
    assert!(repo.load(id).unwrap().preview_png.is_none());
}

#[test]
fn failed_preview_render_saves_nothing() {
    let mut l = loader();
    l.remove("m/expedition/top_view_outline.png");
    let d = Designer::new(config(), Arc::new(l)).unwrap();
    let repo = MemoryDesignRepository::new();
    let err = d.save_design(&repo, "Broken").unwrap_err();
    assert_eq!(err.failing_url(), Some("m/expedition/top_view_outline.png"));
    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn retired_model_leaves_current_selection() {
    let mut d = designer();
    let mut design = d.design().unwrap();
    design.model_name = "classic".to_string();
    assert_eq!(d.apply_design(&design).unwrap(), ModelStatus::ModelNotFound);
    assert_eq!(d.active_model().unwrap(), "expedition");
}

#[test]
fn missing_asset_produces_no_export() {
    let mut l = loader();
    l.remove("m/expedition/side_view_hardware.png");
    let d = Designer::new(config(), Arc::new(l)).unwrap();
    let err = d.export_png().unwrap_err();
    assert_eq!(err.failing_url(), Some("m/expedition/side_view_hardware.png"));
    // The guard is released after the failure.
    assert!(matches!(
        d.export_png(),
        Err(crate::DesignerError::AssetLoad { .. })
    ));
}
