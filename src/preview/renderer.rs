use std::fmt::Write as _;

use crate::assets::resolver::AssetResolver;
use crate::catalog::fill::{Fill, HullFinish};
use crate::catalog::region::{Region, View};
use crate::foundation::error::{DesignerError, DesignerResult};
use crate::store::colors::RegionColorStore;

/// What kind of host element a patch targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Outline,
    Hardware,
    Layer,
}

/// Inline style of one preview element. `None` values render as the CSS "nothing" value.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ElementStyle {
    pub background_color: Option<String>,
    /// CSS `url("...")` value.
    pub background_image: Option<String>,
    /// CSS `url("...")` value.
    pub mask_image: Option<String>,
    pub hidden: bool,
}

impl ElementStyle {
    /// Inline CSS declaration string.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        let color = self.background_color.as_deref().unwrap_or("transparent");
        let image = self.background_image.as_deref().unwrap_or("none");
        let _ = write!(out, "background-color: {color}; background-image: {image};");
        if let Some(mask) = &self.mask_image {
            let _ = write!(out, " -webkit-mask-image: {mask}; mask-image: {mask};");
        }
        if self.hidden {
            out.push_str(" display: none;");
        }
        out
    }
}

/// Style update for a single host element.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ElementPatch {
    pub id: String,
    pub view: View,
    pub kind: ElementKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Image source for outline/hardware elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    pub style: ElementStyle,
    pub css: String,
}

/// Hull finish state: solid color or pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FinishState {
    Solid,
    Pattern,
}

impl From<&HullFinish> for FinishState {
    fn from(finish: &HullFinish) -> Self {
        if finish.is_pattern() {
            Self::Pattern
        } else {
            Self::Solid
        }
    }
}

/// Result of a hull finish transition.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct HullFinishUpdate {
    pub state: FinishState,
    pub color_picker_visible: bool,
    pub patches: Vec<ElementPatch>,
}

/// Complete projection of the store for a DOM-like host.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PreviewSnapshot {
    pub model: String,
    pub hull_state: FinishState,
    pub hull_color_picker_visible: bool,
    pub elements: Vec<ElementPatch>,
}

/// Projects [`RegionColorStore`] state onto preview elements.
///
/// Never reads anything back from the host: every patch is a pure function of the resolver's
/// active model, the store and the hull finish.
pub struct PreviewRenderer<'a> {
    resolver: &'a AssetResolver,
}

impl<'a> PreviewRenderer<'a> {
    pub fn new(resolver: &'a AssetResolver) -> Self {
        Self { resolver }
    }

    /// `kayak-{view}-view-{region}`, with `-{n}` appended for placements after the first.
    pub fn layer_element_id(view: View, region: &str, placement: usize) -> String {
        if placement == 0 {
            format!("kayak-{}-view-{region}", view.as_str())
        } else {
            format!("kayak-{}-view-{region}-{placement}", view.as_str())
        }
    }

    pub fn outline_element_id(view: View) -> String {
        format!("kayak-{}-view-img", view.as_str())
    }

    pub fn hardware_element_id(view: View) -> String {
        format!("kayak-{}-view-hardware", view.as_str())
    }

    /// Repaint every element of `region` across views and placements.
    pub fn apply_fill(
        &self,
        region: &str,
        store: &RegionColorStore,
        finish: &HullFinish,
    ) -> DesignerResult<Vec<ElementPatch>> {
        let r = store
            .catalog()
            .get(region)
            .ok_or_else(|| DesignerError::validation(format!("unknown region '{region}'")))?;
        let mut out = Vec::new();
        for view in View::ALL {
            self.region_patches(view, r, store, finish, &mut out)?;
        }
        Ok(out)
    }

    /// Transition the hull finish state machine. Repaints the hull region everywhere it appears;
    /// the stored hull color is left untouched.
    pub fn apply_hull_finish(
        &self,
        store: &RegionColorStore,
        finish: &HullFinish,
    ) -> DesignerResult<HullFinishUpdate> {
        let patches = match store.catalog().hull_region() {
            Some(hull) => self.apply_fill(&hull.name, store, finish)?,
            None => Vec::new(),
        };
        let state = FinishState::from(finish);
        tracing::debug!(?state, "hull finish applied");
        Ok(HullFinishUpdate {
            state,
            color_picker_visible: state == FinishState::Solid,
            patches,
        })
    }

    /// Re-derive every outline, hardware and mask reference after a model switch.
    pub fn apply_model(
        &self,
        store: &RegionColorStore,
        finish: &HullFinish,
    ) -> DesignerResult<Vec<ElementPatch>> {
        let mut out = Vec::new();
        for view in View::ALL {
            out.push(image_patch(
                Self::outline_element_id(view),
                view,
                ElementKind::Outline,
                self.resolver.resolve_outline(view)?,
            ));
            for region in store.catalog().iter() {
                self.region_patches(view, region, store, finish, &mut out)?;
            }
            out.push(image_patch(
                Self::hardware_element_id(view),
                view,
                ElementKind::Hardware,
                self.resolver.resolve_hardware(view)?,
            ));
        }
        Ok(out)
    }

    pub fn snapshot(
        &self,
        store: &RegionColorStore,
        finish: &HullFinish,
    ) -> DesignerResult<PreviewSnapshot> {
        let hull_state = FinishState::from(finish);
        Ok(PreviewSnapshot {
            model: self.resolver.active_model()?.to_string(),
            hull_state,
            hull_color_picker_visible: hull_state == FinishState::Solid,
            elements: self.apply_model(store, finish)?,
        })
    }

    fn region_patches(
        &self,
        view: View,
        region: &Region,
        store: &RegionColorStore,
        finish: &HullFinish,
        out: &mut Vec<ElementPatch>,
    ) -> DesignerResult<()> {
        let masks = self.resolver.resolve_masks(view, region)?;
        if masks.is_empty() {
            return Ok(());
        }
        let fill = store
            .effective_fill(&region.name, finish)
            .unwrap_or_default();
        let (background_color, background_image) = match &fill {
            Fill::None => (None, None),
            Fill::Color(c) => (Some(c.to_css()), None),
            Fill::Pattern(p) => (None, Some(css_url(&self.resolver.resolve_pattern(p)))),
        };
        for (placement, mask) in masks.into_iter().enumerate() {
            let style = ElementStyle {
                background_color: background_color.clone(),
                background_image: background_image.clone(),
                mask_image: Some(css_url(&mask)),
                hidden: !fill.is_visible(),
            };
            out.push(ElementPatch {
                id: Self::layer_element_id(view, &region.name, placement),
                view,
                kind: ElementKind::Layer,
                region: Some(region.name.clone()),
                src: None,
                css: style.to_css(),
                style,
            });
        }
        Ok(())
    }
}

fn image_patch(id: String, view: View, kind: ElementKind, src: String) -> ElementPatch {
    ElementPatch {
        id,
        view,
        kind,
        region: None,
        src: Some(src),
        style: ElementStyle::default(),
        css: String::new(),
    }
}

fn css_url(location: &str) -> String {
    format!("url(\"{}\")", location.replace('"', "%22"))
}

#[cfg(test)]
#[path = "../../tests/unit/preview/renderer.rs"]
mod tests;
