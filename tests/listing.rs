use linecanvas::listing::{format_segment, listing_lines, render_listing};
use linecanvas::Canvas;

#[test]
fn listing_follows_click_then_resize() {
    let mut canvas = Canvas::default();
    canvas.on_canvas_click(50.0, 75.0);
    assert_eq!(format_segment(&canvas.segments()[0]), "points: 50, 75, 150, 75");

    canvas.on_resize_request(600.0, 400.0).unwrap();
    assert_eq!(
        listing_lines(canvas.segments()),
        vec!["points: 25, 37.5, 75, 37.5".to_string()]
    );
}

#[test]
fn listing_preserves_insertion_order() {
    let mut canvas = Canvas::default();
    canvas.on_canvas_click(3.0, 1.0);
    canvas.on_canvas_click(1.0, 2.0);
    assert_eq!(
        render_listing(canvas.segments()),
        "Lines:\npoints: 3, 1, 103, 1\npoints: 1, 2, 101, 2\n"
    );
}
