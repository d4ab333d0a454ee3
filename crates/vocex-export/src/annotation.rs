//! Pascal VOC annotation XML builder
//!
//! One XML document per exported asset. Each Rectangle region contributes
//! one `<object>` per attached tag name; the bounding box is derived from
//! the region's first two points (start and end corners, normalized so
//! min <= max). Non-rectangle regions and regions with fewer than two
//! points carry no box and are skipped.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use vocex_core::{AssetMetadata, Region, RegionType};

use crate::error::ExportError;

struct BoundingBox {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

fn bounding_box(region: &Region) -> Option<BoundingBox> {
    if region.region_type != RegionType::Rectangle {
        tracing::warn!(
            region_id = %region.id,
            region_type = ?region.region_type,
            "Skipping non-rectangle region"
        );
        return None;
    }
    if region.points.len() < 2 {
        tracing::warn!(
            region_id = %region.id,
            point_count = region.points.len(),
            "Skipping region with fewer than two points"
        );
        return None;
    }

    let start = region.points[0];
    let end = region.points[1];

    Some(BoundingBox {
        xmin: start.x.min(end.x),
        ymin: start.y.min(end.y),
        xmax: start.x.max(end.x),
        ymax: start.y.max(end.y),
    })
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &str,
) -> Result<(), ExportError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(|e| ExportError::Xml(e.into()))?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(|e| ExportError::Xml(e.into()))?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(|e| ExportError::Xml(e.into()))?;
    Ok(())
}

fn coord(value: f64) -> String {
    (value.round() as i64).to_string()
}

/// Build the annotation XML document for one asset.
///
/// `folder` is the name of the export root container the document lives
/// under.
pub fn build_annotation(folder: &str, metadata: &AssetMetadata) -> Result<String, ExportError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    let asset = &metadata.asset;

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
        .map_err(|e| ExportError::Xml(e.into()))?;

    writer
        .write_event(Event::Start(BytesStart::new("annotation")))
        .map_err(|e| ExportError::Xml(e.into()))?;

    write_text_element(&mut writer, "folder", folder)?;
    write_text_element(&mut writer, "filename", &asset.name)?;
    write_text_element(&mut writer, "path", &asset.path)?;

    writer
        .write_event(Event::Start(BytesStart::new("source")))
        .map_err(|e| ExportError::Xml(e.into()))?;
    write_text_element(&mut writer, "database", "Unknown")?;
    writer
        .write_event(Event::End(BytesEnd::new("source")))
        .map_err(|e| ExportError::Xml(e.into()))?;

    let (width, height) = asset
        .size
        .map(|s| (s.width, s.height))
        .unwrap_or((0, 0));

    writer
        .write_event(Event::Start(BytesStart::new("size")))
        .map_err(|e| ExportError::Xml(e.into()))?;
    write_text_element(&mut writer, "width", &width.to_string())?;
    write_text_element(&mut writer, "height", &height.to_string())?;
    write_text_element(&mut writer, "depth", "3")?;
    writer
        .write_event(Event::End(BytesEnd::new("size")))
        .map_err(|e| ExportError::Xml(e.into()))?;

    write_text_element(&mut writer, "segmented", "0")?;

    for region in &metadata.regions {
        let bbox = match bounding_box(region) {
            Some(bbox) => bbox,
            None => continue,
        };

        // One object per attached tag name
        for tag in &region.tags {
            writer
                .write_event(Event::Start(BytesStart::new("object")))
                .map_err(|e| ExportError::Xml(e.into()))?;

            write_text_element(&mut writer, "name", tag)?;
            write_text_element(&mut writer, "pose", "Unspecified")?;
            write_text_element(&mut writer, "truncated", "0")?;
            write_text_element(&mut writer, "difficult", "0")?;

            writer
                .write_event(Event::Start(BytesStart::new("bndbox")))
                .map_err(|e| ExportError::Xml(e.into()))?;
            write_text_element(&mut writer, "xmin", &coord(bbox.xmin))?;
            write_text_element(&mut writer, "ymin", &coord(bbox.ymin))?;
            write_text_element(&mut writer, "xmax", &coord(bbox.xmax))?;
            write_text_element(&mut writer, "ymax", &coord(bbox.ymax))?;
            writer
                .write_event(Event::End(BytesEnd::new("bndbox")))
                .map_err(|e| ExportError::Xml(e.into()))?;

            writer
                .write_event(Event::End(BytesEnd::new("object")))
                .map_err(|e| ExportError::Xml(e.into()))?;
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new("annotation")))
        .map_err(|e| ExportError::Xml(e.into()))?;

    let result = writer.into_inner();
    String::from_utf8(result)
        .map_err(|_| ExportError::InvalidOptions("Invalid UTF-8 in annotation XML".to_string()))
}
