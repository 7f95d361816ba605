use inkpad::controller::{CaptureController, CaptureSession};
use inkpad::model::Color;
use inkpad::pointer::{Contact, PointerInput, SurfaceRect};
use inkpad::settings::CaptureSettings;

const PAPER: Color = Color::rgb(17, 17, 17);
const INK: Color = Color::rgb(255, 255, 255);

fn controller(width: f32, height: f32, pixel_ratio: f32) -> CaptureController {
    let settings = CaptureSettings {
        logical_width: width,
        logical_height: height,
        ..CaptureSettings::default()
    };
    CaptureController::new(CaptureSession::new(&settings, pixel_ratio))
}

fn pixel(controller: &CaptureController, x: u32, y: u32) -> Color {
    controller.session().surface().buffer().pixel(x, y)
}

#[test]
fn drag_renders_a_connected_polyline_through_every_sample() {
    let mut controller = controller(32.0, 32.0, 1.0);
    let rect = SurfaceRect::default();

    controller.pointer_down(rect, &PointerInput::mouse(4.0, 16.0));
    controller.pointer_move(rect, &PointerInput::mouse(16.0, 16.0));
    controller.pointer_move(rect, &PointerInput::mouse(16.0, 28.0));
    controller.pointer_up();

    // both sampled endpoints, the corner, and the midpoints between samples
    assert_eq!(pixel(&controller, 4, 16), INK);
    assert_eq!(pixel(&controller, 10, 16), INK);
    assert_eq!(pixel(&controller, 16, 16), INK);
    assert_eq!(pixel(&controller, 16, 22), INK);
    assert_eq!(pixel(&controller, 16, 28), INK);
    // off the path
    assert_eq!(pixel(&controller, 10, 20), PAPER);
    assert_eq!(pixel(&controller, 22, 22), PAPER);
}

#[test]
fn tap_without_movement_leaves_a_dot_of_half_width_radius() {
    let mut controller = controller(32.0, 32.0, 1.0);
    controller.session_mut().set_stroke_width(6.0);

    controller.pointer_down(SurfaceRect::default(), &PointerInput::mouse(16.0, 16.0));
    controller.pointer_up();

    // width 6 renders radius 3
    assert_eq!(pixel(&controller, 16, 16), INK);
    assert_eq!(pixel(&controller, 19, 16), INK);
    assert_eq!(pixel(&controller, 16, 13), INK);
    assert_eq!(pixel(&controller, 20, 16), PAPER);
    assert_eq!(pixel(&controller, 16, 20), PAPER);
}

#[test]
fn moves_before_any_press_draw_nothing() {
    let mut controller = controller(32.0, 32.0, 1.0);
    let rect = SurfaceRect::default();

    controller.pointer_move(rect, &PointerInput::mouse(8.0, 8.0));
    controller.pointer_move(rect, &PointerInput::mouse(24.0, 24.0));

    assert!(!controller.has_content());
    let buffer = controller.session().surface().buffer();
    assert!(buffer
        .pixels
        .chunks_exact(4)
        .all(|px| px == [17, 17, 17, 255]));
}

#[test]
fn touch_draws_at_the_first_active_contact_only() {
    let mut controller = controller(40.0, 40.0, 1.0);
    let input = PointerInput::touch(
        vec![Contact::new(10.0, 10.0), Contact::new(30.0, 30.0)],
        vec![Contact::new(30.0, 30.0)],
    );

    controller.pointer_down(SurfaceRect::default(), &input);
    controller.pointer_up();

    assert_eq!(pixel(&controller, 10, 10), INK);
    assert_eq!(pixel(&controller, 30, 30), PAPER);
}

#[test]
fn touch_release_coordinates_come_from_the_changed_list() {
    let mut controller = controller(32.0, 16.0, 1.0);
    let rect = SurfaceRect::default();

    controller.pointer_down(
        rect,
        &PointerInput::touch(vec![Contact::new(8.0, 8.0)], vec![Contact::new(8.0, 8.0)]),
    );
    // a lift event carries no active contacts; the ended one is in changed
    controller.pointer_move(
        rect,
        &PointerInput::touch(vec![], vec![Contact::new(24.0, 8.0)]),
    );
    controller.pointer_up();

    assert_eq!(pixel(&controller, 16, 8), INK);
    assert_eq!(pixel(&controller, 24, 8), INK);
}

#[test]
fn leaving_the_surface_ends_the_stroke_without_a_bridge() {
    let mut controller = controller(32.0, 16.0, 1.0);
    let rect = SurfaceRect::default();

    controller.pointer_down(rect, &PointerInput::mouse(5.0, 5.0));
    controller.pointer_leave();
    controller.pointer_move(rect, &PointerInput::mouse(25.0, 5.0));

    assert_eq!(pixel(&controller, 15, 5), PAPER);
    assert_eq!(pixel(&controller, 25, 5), PAPER);

    controller.pointer_down(rect, &PointerInput::mouse(25.0, 5.0));
    assert_eq!(pixel(&controller, 25, 5), INK);
    assert_eq!(pixel(&controller, 15, 5), PAPER);
}

#[test]
fn cancelled_pointers_end_the_stroke_without_a_bridge() {
    let mut controller = controller(32.0, 16.0, 1.0);
    let rect = SurfaceRect::default();

    controller.pointer_down(
        rect,
        &PointerInput::touch(vec![Contact::new(4.0, 8.0)], vec![Contact::new(4.0, 8.0)]),
    );
    controller.pointer_cancel();
    controller.pointer_move(
        rect,
        &PointerInput::touch(vec![Contact::new(28.0, 8.0)], vec![]),
    );

    assert_eq!(pixel(&controller, 16, 8), PAPER);
}

#[test]
fn bounding_rect_offset_is_subtracted_from_client_coordinates() {
    let mut controller = controller(32.0, 32.0, 1.0);
    let rect = SurfaceRect::new(100.0, 250.0);

    controller.pointer_down(rect, &PointerInput::mouse(112.0, 262.0));
    controller.pointer_up();

    assert_eq!(pixel(&controller, 12, 12), INK);
}

#[test]
fn density_ratio_scales_coordinates_exactly_once() {
    let mut controller = controller(32.0, 32.0, 2.0);

    controller.pointer_down(SurfaceRect::default(), &PointerInput::mouse(10.0, 10.0));
    controller.pointer_up();

    // logical (10, 10) lands at physical (20, 20) with radius 3
    assert_eq!(pixel(&controller, 20, 20), INK);
    assert_eq!(pixel(&controller, 23, 20), INK);
    assert_eq!(pixel(&controller, 24, 20), PAPER);
    // a second scale application would have landed here
    assert_eq!(pixel(&controller, 40, 40), PAPER);
}
