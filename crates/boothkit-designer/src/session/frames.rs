//! Frame image loading with stale-completion guarding.
//!
//! Decoding happens outside the session (the host owns file dialogs and
//! worker threads). `begin_frame_load` hands out a ticket carrying the
//! slot's generation counter; a completion whose ticket no longer matches
//! the counter lost a race to a newer load (or a clear) and is dropped.

use std::sync::Arc;

use boothkit_core::TemplateSlot;
use image::RgbaImage;

use crate::template::FrameImage;

use super::DesignerSession;

/// Claim ticket for one in-flight frame decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeTicket {
    slot: TemplateSlot,
    generation: u64,
}

impl DecodeTicket {
    pub fn slot(&self) -> TemplateSlot {
        self.slot
    }
}

impl DesignerSession {
    /// Starts a frame load for `slot`, invalidating any decode still in
    /// flight for it.
    pub fn begin_frame_load(&mut self, slot: TemplateSlot) -> DecodeTicket {
        self.frame_generation[slot.index()] += 1;
        DecodeTicket {
            slot,
            generation: self.frame_generation[slot.index()],
        }
    }

    /// Delivers a decoded frame. Returns false (and changes nothing) when
    /// the ticket is stale.
    pub fn finish_frame_load(&mut self, ticket: DecodeTicket, pixels: RgbaImage) -> bool {
        let index = ticket.slot.index();
        if ticket.generation != self.frame_generation[index] {
            tracing::warn!(
                template = %ticket.slot,
                generation = ticket.generation,
                current = self.frame_generation[index],
                "discarding stale frame decode"
            );
            return false;
        }
        let frame = Arc::new(FrameImage::new(pixels));
        self.templates[index].set_frame(Some(frame));
        // Reconciling aspect locks against the new canvas shape may have
        // moved placeholder geometry.
        self.settle("frame_load");
        true
    }

    /// Removes the frame from `slot`, reverting it to the default canvas.
    /// Any in-flight decode for the slot is invalidated.
    pub fn clear_frame(&mut self, slot: TemplateSlot) {
        self.frame_generation[slot.index()] += 1;
        self.templates[slot.index()].set_frame(None);
        self.settle("frame_clear");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boothkit_core::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};

    #[test]
    fn fresh_ticket_installs_the_frame() {
        let mut session = DesignerSession::default();
        let ticket = session.begin_frame_load(TemplateSlot::A);
        assert!(session.finish_frame_load(ticket, RgbaImage::new(1200, 900)));
        let canvas = session.template(TemplateSlot::A).canvas_size();
        assert_eq!(canvas.width, 1200.0);
        assert_eq!(canvas.height, 900.0);
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut session = DesignerSession::default();
        let first = session.begin_frame_load(TemplateSlot::A);
        let second = session.begin_frame_load(TemplateSlot::A);

        // The newer decode lands first.
        assert!(session.finish_frame_load(second, RgbaImage::new(1200, 900)));
        // The older one loses the race and must not overwrite it.
        assert!(!session.finish_frame_load(first, RgbaImage::new(640, 480)));
        let canvas = session.template(TemplateSlot::A).canvas_size();
        assert_eq!(canvas.width, 1200.0);
    }

    #[test]
    fn clear_invalidates_in_flight_decodes() {
        let mut session = DesignerSession::default();
        let ticket = session.begin_frame_load(TemplateSlot::B);
        session.clear_frame(TemplateSlot::B);
        assert!(!session.finish_frame_load(ticket, RgbaImage::new(1200, 900)));
        let canvas = session.template(TemplateSlot::B).canvas_size();
        assert_eq!(canvas.width, DEFAULT_CANVAS_WIDTH);
        assert_eq!(canvas.height, DEFAULT_CANVAS_HEIGHT);
    }

    #[test]
    fn tickets_are_per_template() {
        let mut session = DesignerSession::default();
        let a = session.begin_frame_load(TemplateSlot::A);
        let _b = session.begin_frame_load(TemplateSlot::B);
        // A load on B does not invalidate A's ticket.
        assert!(session.finish_frame_load(a, RgbaImage::new(800, 800)));
    }
}
