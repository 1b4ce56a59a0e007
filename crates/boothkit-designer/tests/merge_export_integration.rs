//! Dual-template merge export: pixel composition and coordinate remapping
//! checked against hand-computed values.

use boothkit_core::constants::MERGED_ID_OFFSET;
use boothkit_core::{ExportError, Placeholder, TemplateSlot};
use boothkit_designer::DesignerSession;
use image::{Rgba, RgbaImage};

fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

fn load_frame(session: &mut DesignerSession, slot: TemplateSlot, pixels: RgbaImage) {
    let ticket = session.begin_frame_load(slot);
    assert!(session.finish_frame_load(ticket, pixels));
}

#[test]
fn merged_frame_places_panels_side_by_side() {
    let mut session = DesignerSession::default();
    load_frame(
        &mut session,
        TemplateSlot::A,
        solid(100, 200, [255, 0, 0, 255]),
    );
    load_frame(
        &mut session,
        TemplateSlot::B,
        solid(50, 200, [0, 0, 255, 255]),
    );
    session.set_export_enabled(TemplateSlot::A, true);
    session.set_export_enabled(TemplateSlot::B, true);

    let payload = session.confirm().unwrap();
    let merged = payload.merged_frame.unwrap();
    assert_eq!(merged.dimensions(), (150, 200));
    assert_eq!(payload.aspect_ratio, "3:4");

    // A's pixels on the left, B's on the right of the seam at x=100.
    assert_eq!(merged.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(merged.get_pixel(99, 199).0, [255, 0, 0, 255]);
    assert_eq!(merged.get_pixel(100, 0).0, [0, 0, 255, 255]);
    assert_eq!(merged.get_pixel(149, 199).0, [0, 0, 255, 255]);
}

#[test]
fn placeholders_remap_into_merged_space() {
    let mut session = DesignerSession::default();
    load_frame(&mut session, TemplateSlot::A, solid(100, 200, [0; 4]));
    load_frame(&mut session, TemplateSlot::B, solid(50, 200, [0; 4]));
    session.set_export_enabled(TemplateSlot::A, true);
    session.set_export_enabled(TemplateSlot::B, true);

    session.load_layout(&boothkit_core::SavedLayout::new(
        "right half",
        &[Placeholder::new(1, 0.5, 0.0, 0.5, 1.0)],
    ));
    session.set_active(TemplateSlot::B);
    session.load_layout(&boothkit_core::SavedLayout::new(
        "full",
        &[Placeholder::new(1, 0.0, 0.0, 1.0, 1.0)],
    ));

    let payload = session.confirm().unwrap();
    assert_eq!(payload.placeholders.len(), 2);

    // A's slot: x = (0 + 0.5*100)/150, width = 0.5*100/150.
    let a = &payload.placeholders[0];
    assert!((a.x - 1.0 / 3.0).abs() < 1e-12);
    assert!((a.width - 1.0 / 3.0).abs() < 1e-12);
    assert!((a.height - 1.0).abs() < 1e-12);

    // B's slot: x = (100 + 0)/150, width = 50/150, id shifted.
    let b = &payload.placeholders[1];
    assert!((b.x - 2.0 / 3.0).abs() < 1e-12);
    assert!((b.width - 1.0 / 3.0).abs() < 1e-12);
    assert!(b.id >= MERGED_ID_OFFSET);
}

#[test]
fn id_ranges_cannot_collide() {
    let mut session = DesignerSession::default();
    load_frame(&mut session, TemplateSlot::A, solid(80, 80, [0; 4]));
    load_frame(&mut session, TemplateSlot::B, solid(80, 80, [0; 4]));
    session.set_export_enabled(TemplateSlot::A, true);
    session.set_export_enabled(TemplateSlot::B, true);

    session.add_freeform();
    session.set_active(TemplateSlot::B);
    session.add_freeform();
    session.add_freeform();

    let payload = session.confirm().unwrap();
    let mut ids: Vec<u64> = payload.placeholders.iter().map(|p| p.id).collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[test]
fn rejected_export_leaves_the_session_untouched() {
    let mut session = DesignerSession::default();
    session.add_freeform();
    let before = session.active_template().placeholders().to_vec();

    assert!(matches!(
        session.confirm(),
        Err(ExportError::NothingToExport)
    ));
    assert_eq!(session.active_template().placeholders(), &before[..]);
}
