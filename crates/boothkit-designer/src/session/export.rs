//! Export confirmation, including the dual-template merge.
//!
//! With one template export-enabled the payload is that template as-is.
//! With both enabled the two frames are composited side by side (A left,
//! B right, top-aligned) and every placeholder is remapped into the merged
//! coordinate space; template B's ids are offset by a large constant so
//! the two id ranges can never collide downstream.

use boothkit_core::constants::MERGED_ID_OFFSET;
use boothkit_core::{CanvasSize, ExportError, Placeholder, TemplateSlot};
use image::{imageops, RgbaImage};

use crate::template::Template;

use super::DesignerSession;

/// The outcome of a confirmed design, handed back to the booth host.
#[derive(Debug, Clone)]
pub struct ExportPayload {
    /// Placeholders in the exported coordinate space.
    pub placeholders: Vec<Placeholder>,
    /// Reduced "w:h" of the exported canvas, e.g. "3:4".
    pub aspect_ratio: String,
    /// The composited frame for a dual export; `None` for a single
    /// template, whose own frame the host already holds.
    pub merged_frame: Option<RgbaImage>,
}

impl DesignerSession {
    /// Confirms the design and produces the export payload.
    ///
    /// Single-enabled exports pass geometry through unchanged. Dual exports
    /// require both source images and remap everything into the merged
    /// space. No template enabled is an error.
    pub fn confirm(&self) -> Result<ExportPayload, ExportError> {
        let a = &self.templates[0];
        let b = &self.templates[1];
        match (a.export_enabled(), b.export_enabled()) {
            (false, false) => Err(ExportError::NothingToExport),
            (true, false) => Ok(single_payload(a)),
            (false, true) => Ok(single_payload(b)),
            (true, true) => merged_payload(a, b),
        }
    }
}

fn single_payload(template: &Template) -> ExportPayload {
    ExportPayload {
        placeholders: template.placeholders().to_vec(),
        aspect_ratio: template.canvas_size().aspect_string(),
        merged_frame: None,
    }
}

fn merged_payload(a: &Template, b: &Template) -> Result<ExportPayload, ExportError> {
    let frame_a = a
        .frame()
        .ok_or(ExportError::MissingSourceImage(TemplateSlot::A))?;
    let frame_b = b
        .frame()
        .ok_or(ExportError::MissingSourceImage(TemplateSlot::B))?;

    let (wa, ha) = frame_a.pixels().dimensions();
    let (wb, hb) = frame_b.pixels().dimensions();
    let merged_w = wa + wb;
    let merged_h = ha.max(hb);

    let mut merged = RgbaImage::new(merged_w, merged_h);
    imageops::replace(&mut merged, frame_a.pixels(), 0, 0);
    imageops::replace(&mut merged, frame_b.pixels(), i64::from(wa), 0);

    let mut placeholders =
        Vec::with_capacity(a.placeholders().len() + b.placeholders().len());
    placeholders.extend(remap(
        a.placeholders(),
        0.0,
        wa as f64,
        ha as f64,
        merged_w as f64,
        merged_h as f64,
        0,
    ));
    placeholders.extend(remap(
        b.placeholders(),
        wa as f64,
        wb as f64,
        hb as f64,
        merged_w as f64,
        merged_h as f64,
        MERGED_ID_OFFSET,
    ));

    tracing::info!(
        width = merged_w,
        height = merged_h,
        slots = placeholders.len(),
        "merged dual-template export"
    );

    Ok(ExportPayload {
        placeholders,
        aspect_ratio: CanvasSize::new(merged_w as f64, merged_h as f64).aspect_string(),
        merged_frame: Some(merged),
    })
}

/// Rescales placeholders from one template's own space into the merged
/// space: horizontally by its panel offset and width, vertically by its
/// own height (panels are top-aligned).
fn remap(
    slots: &[Placeholder],
    offset_x: f64,
    own_w: f64,
    own_h: f64,
    merged_w: f64,
    merged_h: f64,
    id_offset: u64,
) -> Vec<Placeholder> {
    slots
        .iter()
        .map(|p| {
            let mut out = p.clone();
            out.id = p.id + id_offset;
            out.x = (offset_x + p.x * own_w) / merged_w;
            out.width = p.width * own_w / merged_w;
            out.y = p.y * own_h / merged_h;
            out.height = p.height * own_h / merged_h;
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use boothkit_core::DesignerConfig;

    fn session_with_frames(wa: u32, ha: u32, wb: u32, hb: u32) -> DesignerSession {
        let mut session = DesignerSession::new(DesignerConfig::default());
        let ticket = session.begin_frame_load(TemplateSlot::A);
        session.finish_frame_load(ticket, RgbaImage::new(wa, ha));
        let ticket = session.begin_frame_load(TemplateSlot::B);
        session.finish_frame_load(ticket, RgbaImage::new(wb, hb));
        session
    }

    #[test]
    fn nothing_enabled_is_an_error() {
        let session = DesignerSession::default();
        assert!(matches!(
            session.confirm(),
            Err(ExportError::NothingToExport)
        ));
    }

    #[test]
    fn single_export_passes_geometry_through() {
        let mut session = DesignerSession::default();
        let id = session.add_freeform();
        session.set_export_enabled(TemplateSlot::A, true);

        let payload = session.confirm().unwrap();
        assert!(payload.merged_frame.is_none());
        assert_eq!(payload.aspect_ratio, "4:3");
        assert_eq!(payload.placeholders.len(), 1);
        assert_eq!(payload.placeholders[0].id, id);
        // No frame needed for a single export.
    }

    #[test]
    fn dual_export_requires_both_frames() {
        let mut session = DesignerSession::default();
        session.set_export_enabled(TemplateSlot::A, true);
        session.set_export_enabled(TemplateSlot::B, true);
        let ticket = session.begin_frame_load(TemplateSlot::A);
        session.finish_frame_load(ticket, RgbaImage::new(100, 100));

        assert!(matches!(
            session.confirm(),
            Err(ExportError::MissingSourceImage(TemplateSlot::B))
        ));
    }

    #[test]
    fn merge_remaps_into_side_by_side_space() {
        // A is 100x200, B is 50x200: merged canvas is 150x200.
        let mut session = session_with_frames(100, 200, 50, 200);
        session.set_export_enabled(TemplateSlot::A, true);
        session.set_export_enabled(TemplateSlot::B, true);

        // Right half of A, full B.
        session.templates[0].set_placeholders(vec![Placeholder::new(1, 0.5, 0.0, 0.5, 1.0)]);
        session.templates[1].set_placeholders(vec![Placeholder::new(1, 0.0, 0.0, 1.0, 1.0)]);

        let payload = session.confirm().unwrap();
        let merged = payload.merged_frame.as_ref().unwrap();
        assert_eq!(merged.dimensions(), (150, 200));
        assert_eq!(payload.aspect_ratio, "3:4");

        let a = &payload.placeholders[0];
        assert_eq!(a.id, 1);
        assert!((a.x - 50.0 / 150.0).abs() < 1e-12);
        assert!((a.width - 50.0 / 150.0).abs() < 1e-12);
        assert!((a.y - 0.0).abs() < 1e-12);
        assert!((a.height - 1.0).abs() < 1e-12);

        let b = &payload.placeholders[1];
        assert_eq!(b.id, 1 + MERGED_ID_OFFSET);
        assert!((b.x - 100.0 / 150.0).abs() < 1e-12);
        assert!((b.width - 50.0 / 150.0).abs() < 1e-12);
    }

    #[test]
    fn uneven_heights_top_align_and_rescale() {
        // A is 100x100, B is 100x200: merged canvas is 200x200.
        let mut session = session_with_frames(100, 100, 100, 200);
        session.set_export_enabled(TemplateSlot::A, true);
        session.set_export_enabled(TemplateSlot::B, true);
        session.templates[0].set_placeholders(vec![Placeholder::new(7, 0.0, 0.0, 1.0, 1.0)]);
        session.templates[1].set_placeholders(vec![]);

        let payload = session.confirm().unwrap();
        let a = &payload.placeholders[0];
        // A fills only the top half of the merged height.
        assert!((a.height - 0.5).abs() < 1e-12);
        assert!((a.y - 0.0).abs() < 1e-12);
        assert!((a.width - 0.5).abs() < 1e-12);
    }
}
