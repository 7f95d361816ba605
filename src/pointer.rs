use crate::model::LogicalPoint;

/// One finger on the digitizer, in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub client_x: f32,
    pub client_y: f32,
}

impl Contact {
    pub const fn new(client_x: f32, client_y: f32) -> Self {
        Self { client_x, client_y }
    }
}

/// A raw pointer event as the host delivers it, built once at the boundary so
/// everything downstream consumes a single shape. Touch events carry both the
/// active contact list and the changed list: end/cancel events report their
/// final position only through the latter.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Mouse { client_x: f32, client_y: f32 },
    Touch {
        active: Vec<Contact>,
        changed: Vec<Contact>,
    },
}

impl PointerInput {
    pub fn mouse(client_x: f32, client_y: f32) -> Self {
        Self::Mouse { client_x, client_y }
    }

    pub fn touch(active: Vec<Contact>, changed: Vec<Contact>) -> Self {
        Self::Touch { active, changed }
    }
}

/// The surface's on-screen origin in client coordinates, re-read from the
/// host for every pointer event. Only the origin participates in
/// normalization; pixels outside the surface clip at the raster.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
}

impl SurfaceRect {
    pub const fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}

/// Resolve an event to one logical point relative to the surface origin.
///
/// Touch input uses the primary contact: the first active touch, falling back
/// to the first changed touch. Returns `None` when the event carries no
/// coordinate at all (both lists empty); callers treat that as a no-op.
///
/// The result is in logical units; the density ratio is applied exactly once,
/// inside the surface's rasterization, never here.
pub fn resolve_point(input: &PointerInput, rect: SurfaceRect) -> Option<LogicalPoint> {
    let (client_x, client_y) = match input {
        PointerInput::Mouse { client_x, client_y } => (*client_x, *client_y),
        PointerInput::Touch { active, changed } => {
            let contact = active.first().or_else(|| changed.first())?;
            (contact.client_x, contact.client_y)
        }
    };
    Some(LogicalPoint::new(client_x - rect.left, client_y - rect.top))
}
