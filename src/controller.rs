use anyhow::Result;

use crate::export::{self, ExportedArtifact};
use crate::model::{Color, ToolState};
use crate::pointer::{resolve_point, PointerInput, SurfaceRect};
use crate::settings::CaptureSettings;
use crate::stroke::StrokeEngine;
use crate::surface::{SeedOutcome, SeedTicket, Surface};

/// Caller-supplied completion hook for `save()`: receives the encoded
/// artifact and returns a stable reference (typically the uploaded URL).
/// Transport and storage live entirely on the caller's side.
pub type SaveHook = Box<dyn FnMut(&ExportedArtifact) -> Result<String> + Send>;

/// All mutable drawing state for one mounted surface: the raster, the stroke
/// machine, and the pen configuration. One instance per surface; nothing here
/// is shared or global.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSession {
    surface: Surface,
    engine: StrokeEngine,
    tool: ToolState,
}

impl CaptureSession {
    pub fn new(settings: &CaptureSettings, pixel_ratio: f32) -> Self {
        Self {
            surface: Surface::new(
                settings.logical_width,
                settings.logical_height,
                pixel_ratio,
                settings.background,
            ),
            engine: StrokeEngine::new(),
            tool: ToolState::new(settings.stroke_width, settings.stroke_color),
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn tool(&self) -> ToolState {
        self.tool
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.tool.set_width(width);
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.tool.set_color(color);
    }

    pub fn has_content(&self) -> bool {
        self.surface.has_content()
    }
}

/// UI-facing composition: routes pointer events through normalization into
/// the stroke machine, and exposes the clear/save/seed operations the host
/// binds to its affordances.
pub struct CaptureController {
    session: CaptureSession,
    on_save: Option<SaveHook>,
}

impl CaptureController {
    pub fn new(session: CaptureSession) -> Self {
        Self {
            session,
            on_save: None,
        }
    }

    pub fn set_save_hook(&mut self, hook: Option<SaveHook>) {
        self.on_save = hook;
    }

    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut CaptureSession {
        &mut self.session
    }

    /// Events that resolve to no coordinate (empty touch lists) are dropped
    /// here; that is a no-op by contract, not an error.
    pub fn pointer_down(&mut self, rect: SurfaceRect, input: &PointerInput) {
        let Some(point) = resolve_point(input, rect) else {
            return;
        };
        let session = &mut self.session;
        session.engine.begin(&mut session.surface, &session.tool, point);
    }

    pub fn pointer_move(&mut self, rect: SurfaceRect, input: &PointerInput) {
        let Some(point) = resolve_point(input, rect) else {
            return;
        };
        let session = &mut self.session;
        session.engine.extend(&mut session.surface, &session.tool, point);
    }

    pub fn pointer_up(&mut self) {
        self.session.engine.finish();
    }

    pub fn pointer_leave(&mut self) {
        self.session.engine.finish();
    }

    pub fn pointer_cancel(&mut self) {
        self.session.engine.finish();
    }

    pub fn clear(&mut self) {
        self.session.surface.clear();
    }

    /// Gate for the host's clear/save affordances; not a drawing invariant.
    pub fn has_content(&self) -> bool {
        self.session.has_content()
    }

    /// Export the surface and hand the artifact to the registered hook.
    /// Returns the hook's reference string, or `Ok(None)` when no hook is
    /// registered. Export and hook failures surface as errors; the raster is
    /// untouched either way and a retry is always valid.
    pub fn save(&mut self) -> Result<Option<String>> {
        let artifact = export::export_surface(&self.session.surface)?;
        match self.on_save.as_mut() {
            Some(hook) => Ok(Some(hook(&artifact)?)),
            None => Ok(None),
        }
    }

    /// Adopt a new logical size and/or density ratio. Any in-progress stroke
    /// ends first: its last point belongs to the old coordinate space.
    pub fn reinitialize(&mut self, logical_width: f32, logical_height: f32, pixel_ratio: f32) {
        self.session.engine.finish();
        self.session
            .surface
            .reinitialize(logical_width, logical_height, pixel_ratio);
    }

    pub fn seed_ticket(&self) -> SeedTicket {
        self.session.surface.seed_ticket()
    }

    pub fn apply_seed(&mut self, ticket: SeedTicket, data: &[u8]) -> SeedOutcome {
        self.session.surface.apply_seed(ticket, data)
    }
}
