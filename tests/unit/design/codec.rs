use super::*;
use crate::catalog::fill::PatternName;
use crate::catalog::region::CatalogVersion;

fn codec() -> DesignCodec {
    DesignCodec::new(
        RegionCatalog::default(),
        ModelCatalog::new(["expedition", "touring"]).unwrap(),
    )
}

#[test]
fn roundtrip_reproduces_model_finish_and_store() {
    let codec = codec();
    let mut store = RegionColorStore::default();
    store.set("hull-color", Fill::color("#102030").unwrap());
    store.set("deck-color", Fill::pattern("carbon_gold").unwrap());
    store.set("seat-color", Fill::None);
    store.set("logo-color", Fill::color("#FFFFFF80").unwrap());
    let finish = HullFinish::parse("carbon_black").unwrap();

    let design = codec.serialize("touring", &finish, &store);
    let json = codec.to_json(&design).unwrap();
    let decoded = codec.deserialize(&codec.from_json(&json).unwrap());

    assert_eq!(decoded.model_name, "touring");
    assert_eq!(decoded.model_status, ModelStatus::Known);
    assert_eq!(decoded.hull_finish, finish);
    assert_eq!(decoded.store, store);
}

#[test]
fn edge_case_fills_survive_a_json_roundtrip() {
    let codec = codec();
    for finish in ["solid", "SOLID_2", "carbon-black", "x"] {
        let finish = HullFinish::parse(finish).unwrap();
        let mut store = RegionColorStore::default();
        store.set("hull-color", Fill::color("#00000000").unwrap());
        store.set("deck-color", Fill::pattern("abc").unwrap());
        store.set("seat-color", Fill::pattern("Solid_").unwrap());
        store.set("lines-color", Fill::None);

        let json = codec
            .to_json(&codec.serialize("expedition", &finish, &store))
            .unwrap();
        let decoded = codec.deserialize(&codec.from_json(&json).unwrap());
        assert_eq!(decoded.hull_finish, finish);
        assert_eq!(decoded.store, store);
    }
}

#[test]
fn fills_that_would_not_reload_cannot_be_built() {
    assert!(Fill::pattern("#abc").is_err());
    assert!(Fill::pattern("").is_err());
    assert!(Fill::pattern("carbon black").is_err());
    assert!(PatternName::new("Solid").is_err());
}

#[test]
fn json_uses_camel_case_and_string_fills() {
    let codec = codec();
    let design = codec.serialize("expedition", &HullFinish::Solid, &RegionColorStore::default());
    let v: serde_json::Value = serde_json::from_str(&codec.to_json(&design).unwrap()).unwrap();
    assert_eq!(v["modelName"], "expedition");
    assert_eq!(v["hullFinish"], "solid");
    assert_eq!(v["regionFills"]["hull-color"], "#D7D7D7");
    assert_eq!(v["regionFills"]["lines-color"], "#599F45");
}

#[test]
fn retired_model_is_reported_not_rejected() {
    let codec = codec();
    let design = Design {
        model_name: "classic".to_string(),
        hull_finish: HullFinish::Solid,
        region_fills: BTreeMap::new(),
    };
    let decoded = codec.deserialize(&design);
    assert_eq!(decoded.model_status, ModelStatus::ModelNotFound);
    assert_eq!(decoded.store, RegionColorStore::default());
}

#[test]
fn missing_fields_default_and_unknown_regions_drop() {
    let codec = codec();
    let design = codec
        .from_json(r##"{"modelName":"expedition","regionFills":{"rudder-color":"#000000","seat-color":"#111111"}}"##)
        .unwrap();
    assert_eq!(design.hull_finish, HullFinish::Solid);
    let decoded = codec.deserialize(&design);
    assert_eq!(decoded.store.get("seat-color"), Some(&Fill::color("#111111").unwrap()));
    assert!(decoded.store.get("rudder-color").is_none());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = codec().from_json(r#"{"modelName": 3}"#).unwrap_err();
    assert!(err.to_string().starts_with("serialization error:"));
    let err = codec()
        .from_json(r##"{"modelName":"x","regionFills":{"hull-color":"#GG0000"}}"##)
        .unwrap_err();
    assert!(matches!(err, DesignerError::Serde(_)));
}

#[test]
fn imports_flat_form_data() {
    let codec = DesignCodec::new(
        RegionCatalog::for_version(CatalogVersion::V1),
        ModelCatalog::new(["expedition"]).unwrap(),
    );
    let form: BTreeMap<String, String> = [
        ("hull-color", "#d7d7d7"),
        ("hull-finish", "carbon_gold"),
        ("deck-seam-tape-color", "#000000"),
        ("design-name", "My boat"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let design = codec.from_form_data(&form).unwrap();
    assert_eq!(design.model_name, "expedition");
    assert_eq!(design.hull_finish, HullFinish::parse("carbon_gold").unwrap());
    assert_eq!(design.region_fills.len(), 1);
    assert_eq!(design.region_fills["hull-color"], Fill::color("#D7D7D7").unwrap());
}

#[test]
fn form_data_with_bad_color_names_the_field() {
    let mut form = BTreeMap::new();
    form.insert("deck-color".to_string(), "#nothex".to_string());
    let err = codec().from_form_data(&form).unwrap_err();
    assert!(err.to_string().contains("deck-color"));
}
