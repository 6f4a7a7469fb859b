use crate::foundation::error::DesignerResult;
use crate::render::raster::Raster;

/// Single-page PDF sized to the raster (1 px = 1 pt), image at the origin, alpha kept as a soft
/// mask.
#[cfg(feature = "pdf")]
pub fn encode_pdf(raster: &Raster) -> DesignerResult<Vec<u8>> {
    use anyhow::Context;
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};

    let w = i64::from(raster.width);
    let h = i64::from(raster.height);
    let straight = raster.to_straight_rgba8();
    let mut rgb = Vec::with_capacity(straight.len() / 4 * 3);
    let mut alpha = Vec::with_capacity(straight.len() / 4);
    for px in straight.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
        alpha.push(px[3]);
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let smask_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => w,
            "Height" => h,
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
        },
        alpha,
    ));
    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => w,
            "Height" => h,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "SMask" => smask_id,
        },
        rgb,
    ));

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![w.into(), 0.into(), 0.into(), h.into(), 0.into(), 0.into()],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().context("encode pdf page content")?,
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        },
        "MediaBox" => vec![0.into(), 0.into(), w.into(), h.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buf = Vec::new();
    doc.save_to(&mut buf).context("write pdf")?;
    Ok(buf)
}

#[cfg(not(feature = "pdf"))]
pub fn encode_pdf(_raster: &Raster) -> DesignerResult<Vec<u8>> {
    Err(crate::foundation::error::DesignerError::capability_unavailable(
        "PDF export requires the `pdf` feature",
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/pdf.rs"]
mod tests;
