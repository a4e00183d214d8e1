use tramline::catalogue::Catalogue;
use tramline::render::{Color, Error, Label, MapRenderer, RenderSettings, Shape};
use tramline::shared::geo::Coordinate;

fn coordinate(latitude: f64, longitude: f64) -> Coordinate {
    Coordinate {
        latitude,
        longitude,
    }
}

fn small_network() -> Catalogue {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("Alpha", coordinate(0.0, 0.0)).unwrap();
    catalogue.add_stop("Beta", coordinate(1.0, 1.0)).unwrap();
    catalogue.add_stop("Gamma", coordinate(2.0, 2.0)).unwrap();
    catalogue.add_route("1", &["Alpha", "Beta"], false).unwrap();
    catalogue.add_route("2", &["Alpha", "Beta", "Gamma", "Alpha"], true).unwrap();
    catalogue
}

fn route_labels(shapes: &[Shape]) -> Vec<&Label> {
    shapes
        .iter()
        .filter_map(|shape| match shape {
            Shape::Label(label) if label.bold => Some(label),
            _ => None,
        })
        .collect()
}

fn stop_labels(shapes: &[Shape]) -> Vec<&Label> {
    shapes
        .iter()
        .filter_map(|shape| match shape {
            Shape::Label(label) if !label.bold => Some(label),
            _ => None,
        })
        .collect()
}

#[test]
fn empty_catalogue_renders_no_shapes() {
    let catalogue = Catalogue::new();
    let renderer = MapRenderer::new(&catalogue, RenderSettings::default());
    let shapes = renderer.render().unwrap();
    assert!(shapes.is_empty());
}

#[test]
fn empty_palette_is_rejected() {
    let catalogue = small_network();
    let settings = RenderSettings {
        color_palette: Vec::new(),
        ..Default::default()
    };
    let renderer = MapRenderer::new(&catalogue, settings);
    assert!(matches!(renderer.render(), Err(Error::EmptyPalette)));
}

#[test]
fn shapes_come_out_in_layer_order() {
    let catalogue = small_network();
    let renderer = MapRenderer::new(&catalogue, RenderSettings::default());
    let shapes = renderer.render().unwrap();

    // Two polylines, then route labels (bold), then circles, then stop
    // labels. Within the contract the layers never interleave.
    let kinds: Vec<u8> = shapes
        .iter()
        .map(|shape| match shape {
            Shape::Polyline(_) => 0,
            Shape::Label(label) if label.bold => 1,
            Shape::Circle(_) => 2,
            Shape::Label(_) => 3,
        })
        .collect();
    let mut sorted = kinds.clone();
    sorted.sort();
    assert_eq!(kinds, sorted);

    assert_eq!(kinds.iter().filter(|kind| **kind == 0).count(), 2);
    assert_eq!(kinds.iter().filter(|kind| **kind == 2).count(), 3);
}

#[test]
fn label_pairs_put_the_underlay_first() {
    let catalogue = small_network();
    let renderer = MapRenderer::new(&catalogue, RenderSettings::default());
    let shapes = renderer.render().unwrap();

    for pair in route_labels(&shapes).chunks(2) {
        assert!(pair[0].stroke.is_some());
        assert!(pair[1].stroke.is_none());
        assert_eq!(pair[0].content, pair[1].content);
        assert_eq!(pair[0].position, pair[1].position);
    }
    for pair in stop_labels(&shapes).chunks(2) {
        assert!(pair[0].stroke.is_some());
        assert!(pair[1].stroke.is_none());
        assert_eq!(pair[0].content, pair[1].content);
    }
}

#[test]
fn linear_route_gets_a_second_terminus_label() {
    let catalogue = small_network();
    let renderer = MapRenderer::new(&catalogue, RenderSettings::default());
    let shapes = renderer.render().unwrap();

    let labels = route_labels(&shapes);
    let on_route_1 = labels.iter().filter(|label| label.content == "1").count();
    let on_route_2 = labels.iter().filter(|label| label.content == "2").count();
    // Route 1 is linear with distinct termini: two pairs. Route 2 is a
    // roundtrip: one pair at its first stop.
    assert_eq!(on_route_1, 4);
    assert_eq!(on_route_2, 2);
}

#[test]
fn linear_route_back_to_its_start_gets_one_label_pair() {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("A", coordinate(0.0, 0.0)).unwrap();
    catalogue.add_stop("B", coordinate(1.0, 1.0)).unwrap();
    // Declared A-B-A: the stored midpoint is A again.
    catalogue.add_route("loop", &["A", "B", "A"], false).unwrap();

    let renderer = MapRenderer::new(&catalogue, RenderSettings::default());
    let shapes = renderer.render().unwrap();
    assert_eq!(route_labels(&shapes).len(), 2);
}

#[test]
fn routes_cycle_through_the_palette_alphabetically() {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("S", coordinate(0.0, 0.0)).unwrap();
    catalogue.add_stop("T", coordinate(1.0, 1.0)).unwrap();
    for name in ["d", "b", "a", "c"] {
        catalogue.add_route(name, &["S", "T"], true).unwrap();
    }

    let settings = RenderSettings::default();
    let palette = settings.color_palette.clone();
    let renderer = MapRenderer::new(&catalogue, settings);
    let shapes = renderer.render().unwrap();

    let strokes: Vec<&Color> = shapes
        .iter()
        .filter_map(|shape| match shape {
            Shape::Polyline(line) => Some(&line.stroke),
            _ => None,
        })
        .collect();
    assert_eq!(strokes.len(), 4);
    // a, b, c take the palette in order; d wraps around.
    assert_eq!(strokes[0], &palette[0]);
    assert_eq!(strokes[1], &palette[1]);
    assert_eq!(strokes[2], &palette[2]);
    assert_eq!(strokes[3], &palette[0]);
}

#[test]
fn empty_routes_are_skipped_and_keep_no_color() {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("S", coordinate(0.0, 0.0)).unwrap();
    catalogue.add_stop("T", coordinate(1.0, 1.0)).unwrap();
    catalogue.add_route("a", &[], false).unwrap();
    catalogue.add_route("b", &["S", "T"], true).unwrap();

    let settings = RenderSettings::default();
    let palette = settings.color_palette.clone();
    let renderer = MapRenderer::new(&catalogue, settings);
    let shapes = renderer.render().unwrap();

    let strokes: Vec<&Color> = shapes
        .iter()
        .filter_map(|shape| match shape {
            Shape::Polyline(line) => Some(&line.stroke),
            _ => None,
        })
        .collect();
    // The empty route draws nothing and the first drawn route still takes
    // the first palette slot.
    assert_eq!(strokes, vec![&palette[0]]);
    assert!(route_labels(&shapes).iter().all(|label| label.content == "b"));
}

#[test]
fn only_served_stops_are_drawn() {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("Served", coordinate(0.0, 0.0)).unwrap();
    catalogue.add_stop("Other", coordinate(1.0, 1.0)).unwrap();
    catalogue.add_stop("Unserved", coordinate(2.0, 2.0)).unwrap();
    catalogue.add_route("9", &["Served", "Other"], false).unwrap();

    let renderer = MapRenderer::new(&catalogue, RenderSettings::default());
    let shapes = renderer.render().unwrap();

    let circles = shapes
        .iter()
        .filter(|shape| matches!(shape, Shape::Circle(_)))
        .count();
    assert_eq!(circles, 2);
    assert!(
        stop_labels(&shapes)
            .iter()
            .all(|label| label.content != "Unserved")
    );
}

#[test]
fn stop_markers_follow_alphabetical_order() {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("Zebra", coordinate(0.0, 0.0)).unwrap();
    catalogue.add_stop("Acorn", coordinate(1.0, 1.0)).unwrap();
    catalogue.add_stop("Maple", coordinate(2.0, 2.0)).unwrap();
    catalogue.add_route("4", &["Zebra", "Maple", "Acorn"], true).unwrap();

    let renderer = MapRenderer::new(&catalogue, RenderSettings::default());
    let shapes = renderer.render().unwrap();

    let contents: Vec<&str> = stop_labels(&shapes)
        .iter()
        .map(|label| label.content.as_str())
        .collect();
    assert_eq!(contents, vec!["Acorn", "Acorn", "Maple", "Maple", "Zebra", "Zebra"]);
}

#[test]
fn single_point_network_collapses_onto_the_padding_offset() {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("Lone", coordinate(43.587795, 39.716901)).unwrap();
    catalogue.add_route("loop", &["Lone"], true).unwrap();

    let settings = RenderSettings::default();
    let padding = settings.padding;
    let renderer = MapRenderer::new(&catalogue, settings);
    let shapes = renderer.render().unwrap();

    let center = shapes
        .iter()
        .find_map(|shape| match shape {
            Shape::Circle(circle) => Some(circle.center),
            _ => None,
        })
        .unwrap();
    assert_eq!(center.x, padding);
    assert_eq!(center.y, padding);
}

#[test]
fn polyline_visits_the_stored_traversal() {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("A", coordinate(0.0, 0.0)).unwrap();
    catalogue.add_stop("B", coordinate(1.0, 1.0)).unwrap();
    catalogue.add_stop("C", coordinate(2.0, 2.0)).unwrap();
    catalogue.add_route("1", &["A", "B", "C"], false).unwrap();

    let renderer = MapRenderer::new(&catalogue, RenderSettings::default());
    let shapes = renderer.render().unwrap();

    let line = shapes
        .iter()
        .find_map(|shape| match shape {
            Shape::Polyline(line) => Some(line),
            _ => None,
        })
        .unwrap();
    // Stored as A-B-C-B-A, five points; the mirrored legs retrace the same
    // canvas positions.
    assert_eq!(line.points.len(), 5);
    assert_eq!(line.points[0], line.points[4]);
    assert_eq!(line.points[1], line.points[3]);
}
