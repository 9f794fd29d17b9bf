use polyradar_core::geom::point;
use polyradar_core::{ChartConfig, ChartOptions, EmphasisMode, Series, ShadowMode};
use polyradar_render::LayoutOptions;
use polyradar_render::chart::{ChartState, RadarChart};
use polyradar_render::model::{LayerRole, TextRole};
use serde_json::json;

fn chart() -> RadarChart {
    RadarChart::new(ChartOptions::default(), &LayoutOptions::default())
}

fn series(values: &[f64]) -> Series {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (format!("label{i}"), *v))
        .collect()
}

#[test]
fn starts_empty_and_renders_nothing() {
    let c = chart();
    assert_eq!(c.state(), ChartState::Empty);
    assert_eq!(c.edge_count(), 0);
    assert!(c.snapshot().is_none());
    assert!(matches!(
        c.require_snapshot(),
        Err(polyradar_render::Error::NotReady {
            state: ChartState::Empty
        })
    ));
}

#[test]
fn resize_then_bind_reaches_ready() {
    let mut c = chart();
    c.on_bounds_changed(400.0, 400.0);
    assert_eq!(c.state(), ChartState::LaidOut);
    assert!(c.snapshot().is_none());

    assert!(c.bind_series(series(&[5.5, 10.0, 8.7, 2.3, 4.4])));
    assert_eq!(c.state(), ChartState::Ready);
    assert_eq!(c.edge_count(), 5);
    assert_eq!(c.max_index(), Some(1));
    let g = c.geometry().unwrap();
    assert_eq!(g.edge_count, 5);
    assert_eq!(g.center, point(200.0, 200.0));
    assert!(c.snapshot().is_some());
}

#[test]
fn bind_then_resize_reaches_ready() {
    let mut c = chart();
    assert!(c.bind_series(series(&[1.0, 2.0, 3.0])));
    assert_eq!(c.state(), ChartState::AwaitingBounds);
    assert!(c.snapshot().is_none());
    assert_eq!(c.max_index(), Some(2));

    c.on_bounds_changed(300.0, 300.0);
    assert_eq!(c.state(), ChartState::Ready);
    assert_eq!(c.value_polygon().unwrap().vertices.len(), 3);
}

#[test]
fn rejected_bind_leaves_prior_state_untouched() {
    let mut c = chart();
    c.on_bounds_changed(400.0, 300.0);
    assert!(c.bind_series(series(&[3.0, 9.0, 1.0, 4.0])));
    let before_values = c.value_polygon().unwrap();
    let before_geometry = c.geometry().unwrap();
    let before_max = c.max_index();

    assert!(!c.bind_series(series(&[20.0, 1.0])));
    assert!(c.try_bind_series(Series::new()).is_err());

    assert_eq!(c.state(), ChartState::Ready);
    assert_eq!(c.max_index(), before_max);
    assert_eq!(*c.value_polygon().unwrap(), *before_values);
    assert_eq!(*c.geometry().unwrap(), *before_geometry);
    assert_eq!(c.edge_count(), 4);
}

#[test]
fn rejected_first_bind_keeps_edge_count_zero() {
    let mut c = chart();
    c.on_bounds_changed(200.0, 200.0);
    assert!(!c.bind_series(series(&[1.0, 2.0])));
    assert_eq!(c.state(), ChartState::LaidOut);
    assert_eq!(c.edge_count(), 0);
    assert!(c.snapshot().is_none());
}

#[test]
fn resize_rederives_values_from_the_same_series() {
    let mut c = chart();
    c.on_bounds_changed(300.0, 300.0);
    assert!(c.bind_series(series(&[10.0, 5.0, 10.0, 5.0, 10.0, 5.0])));
    let small = c.value_polygon().unwrap();

    c.on_bounds_changed(600.0, 600.0);
    assert_eq!(c.state(), ChartState::Ready);
    let big = c.value_polygon().unwrap();
    let g = c.geometry().unwrap();
    assert_eq!(big.proportions, small.proportions);
    assert_eq!(big.vertices[0], g.outer_vertices()[0]);
    assert_ne!(big.vertices, small.vertices);
}

#[test]
fn rebinding_reuses_geometry_when_edge_count_matches() {
    let mut c = chart();
    c.on_bounds_changed(300.0, 300.0);
    assert!(c.bind_series(series(&[1.0, 2.0, 3.0, 4.0])));
    let first = c.geometry().unwrap();
    assert!(c.bind_series(series(&[4.0, 3.0, 2.0, 1.0])));
    assert!(std::sync::Arc::ptr_eq(&first, &c.geometry().unwrap()));
    assert_eq!(c.max_index(), Some(0));

    assert!(c.bind_series(series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])));
    let g = c.geometry().unwrap();
    assert_eq!(g.edge_count, 6);
    assert_eq!(c.value_polygon().unwrap().vertices.len(), 6);
}

#[test]
fn tiny_surface_degrades_to_a_point() {
    let mut c = chart();
    c.on_bounds_changed(10.0, 10.0);
    assert!(c.bind_series(series(&[1.0, 2.0, 3.0])));
    let g = c.geometry().unwrap();
    assert!(g.is_degenerate());
    let values = c.value_polygon().unwrap();
    assert!(values.vertices.iter().all(|&v| v == g.center));
    assert!(c.snapshot().is_some());
}

#[test]
fn layers_are_ordered_bottom_up() {
    let mut c = chart();
    c.on_bounds_changed(400.0, 400.0);
    assert!(c.bind_series(series(&[1.0, 2.0, 3.0, 4.0, 5.0])));
    let snap = c.snapshot().unwrap();
    let roles: Vec<_> = snap.layers.iter().map(|l| l.role).collect();
    assert_eq!(
        roles,
        vec![
            LayerRole::Shadow,
            LayerRole::Band,
            LayerRole::Band,
            LayerRole::Band,
            LayerRole::Edges,
            LayerRole::Cover,
            LayerRole::CoverEdge,
        ]
    );
    assert!(snap.layers[0].blur.is_some());
    assert!(snap.layers[0].offset_y > 0.0);

    let keys = snap.texts.iter().filter(|t| t.role == TextRole::Key).count();
    let values = snap.texts.iter().filter(|t| t.role == TextRole::Value).count();
    assert_eq!((keys, values), (5, 5));
    assert_eq!(snap.texts[5].text, "1.0");
}

#[test]
fn spokes_flag_controls_edge_layer() {
    let cfg = ChartConfig::with_overrides(&json!({
        "edge": { "drawSpokes": false },
        "shadow": { "mode": "none" },
        "rings": { "mode": "single" }
    }));
    let mut c = RadarChart::from_config(&cfg, &LayoutOptions::default()).unwrap();
    c.on_bounds_changed(400.0, 400.0);
    assert!(c.bind_series(series(&[1.0, 2.0, 3.0, 4.0])));
    let snap = c.snapshot().unwrap();
    assert_eq!(snap.layers[0].role, LayerRole::Band);
    let edges = snap
        .layers
        .iter()
        .find(|l| l.role == LayerRole::Edges)
        .unwrap();
    assert_eq!(edges.path, snap.geometry.outer_ring().unwrap().path);
}

#[test]
fn offset_shadow_has_no_blur() {
    let mut options = ChartOptions::default();
    options.shadow.mode = ShadowMode::Offset;
    let mut c = RadarChart::new(options, &LayoutOptions::default());
    c.on_bounds_changed(400.0, 400.0);
    assert!(c.bind_series(series(&[1.0, 2.0, 3.0])));
    let snap = c.snapshot().unwrap();
    assert_eq!(snap.layers[0].role, LayerRole::Shadow);
    assert!(snap.layers[0].blur.is_none());
    assert!(snap.layers[0].offset_y > 0.0);
}

#[test]
fn highlight_max_emphasizes_one_vertex() {
    let mut options = ChartOptions::default();
    options.emphasis.mode = EmphasisMode::HighlightMax;
    let mut c = RadarChart::new(options.clone(), &LayoutOptions::default());
    c.on_bounds_changed(400.0, 400.0);
    assert!(c.bind_series(series(&[2.0, 7.0, 7.0, 1.0])));
    let snap = c.snapshot().unwrap();
    let emphasized: Vec<_> = snap.texts.iter().filter(|t| t.emphasized).collect();
    assert_eq!(emphasized.len(), 2);
    assert!(emphasized.iter().all(|t| t.index == 1));
    assert!(
        emphasized
            .iter()
            .all(|t| t.font_size == options.emphasis.text_size && t.color == options.emphasis.color)
    );
}

#[test]
fn emphasized_value_text_clears_its_enlarged_label() {
    let mut options = ChartOptions::default();
    options.emphasis.mode = EmphasisMode::HighlightMax;
    let mut c = RadarChart::new(options.clone(), &LayoutOptions::default());
    c.on_bounds_changed(400.0, 400.0);
    assert!(c.bind_series(series(&[2.0, 9.0, 4.0])));
    let snap = c.snapshot().unwrap();
    let frame = c.frame().unwrap();

    // Deterministic metrics: one line is 1.2 em.
    let emphasized_line = options.emphasis.text_size * 1.2;
    for i in 0..3 {
        let key = &snap.texts[i];
        let value = &snap.texts[i + 3];
        let gap = value.position.y - key.position.y;
        if i == 1 {
            assert!((gap - emphasized_line).abs() < 1e-9, "gap {gap}");
            let key_descent = key.font_size * 0.25;
            let value_ascent = value.font_size * 0.95;
            assert!(gap >= key_descent + value_ascent - 1e-9);
        } else {
            assert!((gap - frame.value_block_height).abs() < 1e-9);
        }
    }
}

#[test]
fn inset_stroke_keeps_outline_inside_the_boundary() {
    let mut options = ChartOptions::default();
    options.inset_stroke = true;
    options.cover_edge.width = 6.0;
    let mut c = RadarChart::new(options, &LayoutOptions::default());
    c.on_bounds_changed(400.0, 400.0);
    assert!(c.bind_series(series(&[10.0, 10.0, 10.0])));
    let values = c.value_polygon().unwrap();
    let g = c.geometry().unwrap();
    assert!((values.inset - 3.0 / g.outer_radius).abs() < 1e-12);
    for p in &values.proportions {
        assert!(*p < 1.0);
    }
}

#[test]
fn value_text_sits_one_value_line_below_its_label() {
    let mut c = chart();
    c.on_bounds_changed(400.0, 400.0);
    assert!(c.bind_series(series(&[1.0, 2.0, 3.0])));
    let snap = c.snapshot().unwrap();
    let frame = c.frame().unwrap();
    for i in 0..3 {
        let key = &snap.texts[i];
        let value = &snap.texts[i + 3];
        assert_eq!(key.position, snap.geometry.label_anchors[i]);
        assert!((value.position.y - key.position.y - frame.value_block_height).abs() < 1e-9);
        assert_eq!(value.position.x, key.position.x);
    }
}
