use polyradar_core::geom::point;
use polyradar_core::{ChartOptions, Series, ShadowMode};
use polyradar_render::chart::RadarChart;
use polyradar_render::model::{FillRule, PathData};
use polyradar_render::svg::{SvgRenderOptions, path_d, render_chart_svg};
use polyradar_render::{LayoutOptions, render_svg};

fn scores() -> Series {
    Series::from([
        ("Speed", 5.5),
        ("Power", 10.0),
        ("Range", 8.7),
        ("Armor <3>", 2.3),
        ("Luck & Co", 4.4),
    ])
}

#[test]
fn path_d_uses_move_line_close() {
    let path = PathData::closed_polygon(&[point(0.0, -10.0), point(8.6603, 5.0), point(-8.6603, 5.0)]);
    assert_eq!(path_d(&path), "M0,-10 L8.66,5 L-8.66,5 Z");
}

#[test]
fn renders_every_layer_in_order() {
    let svg = render_svg(
        scores(),
        400.0,
        400.0,
        ChartOptions::default(),
        &LayoutOptions::default(),
        &SvgRenderOptions {
            diagram_id: Some("stats".to_string()),
            background: Some("white".to_string()),
        },
    )
    .unwrap();

    assert!(svg.starts_with(r#"<svg id="stats" width="400" height="400""#));
    assert!(svg.contains(r#"viewBox="0 0 400 400""#));
    assert!(svg.contains(r#"style="background-color: white;""#));
    assert!(svg.contains(r#"<filter id="stats-shadow-blur""#));
    assert!(svg.contains(r#"filter="url(#stats-shadow-blur)""#));
    assert_eq!(svg.matches(r#"class="polygonBand""#).count(), 3);
    assert_eq!(svg.matches(r#"fill-rule="evenodd""#).count(), 2);

    let order = [
        "polygonShadow",
        "polygonBand",
        "polygonEdges",
        "polygonCover\"",
        "polygonCoverEdge",
        "polygonLabels",
    ];
    let mut last = 0;
    for class in order {
        let at = svg.find(class).unwrap_or_else(|| panic!("missing {class}"));
        assert!(at >= last, "{class} out of order");
        last = at;
    }
    assert!(svg.ends_with("</g></svg>\n"));
}

#[test]
fn labels_are_escaped_and_values_formatted() {
    let mut chart = RadarChart::default();
    chart.on_bounds_changed(500.0, 500.0);
    assert!(chart.bind_series(scores()));
    let svg = render_chart_svg(&chart.snapshot().unwrap(), &SvgRenderOptions::default());
    assert!(svg.contains(">Armor &lt;3&gt;</text>"));
    assert!(svg.contains(">Luck &amp; Co</text>"));
    assert!(svg.contains(">10.0</text>"));
    assert!(svg.contains(">5.5</text>"));
    assert!(svg.contains(r#"text-anchor="middle""#));
}

#[test]
fn no_blur_filter_without_blur_shadow() {
    let mut options = ChartOptions::default();
    options.shadow.mode = ShadowMode::Offset;
    let svg = render_svg(
        scores(),
        400.0,
        400.0,
        options,
        &LayoutOptions::default(),
        &SvgRenderOptions::default(),
    )
    .unwrap();
    assert!(!svg.contains("<filter"));
    assert!(svg.contains(r#"class="polygonShadow""#));
    assert!(svg.contains(r#"<g transform="translate(0, "#));
}

#[test]
fn invalid_series_is_an_error_for_the_one_shot_helper() {
    let err = render_svg(
        Series::from([("a", 1.0), ("b", 2.0)]),
        400.0,
        400.0,
        ChartOptions::default(),
        &LayoutOptions::default(),
        &SvgRenderOptions::default(),
    );
    assert!(err.is_err());
}

#[test]
fn even_odd_paths_keep_their_fill_rule() {
    let mut band = PathData::closed_polygon(&[point(0.0, 0.0), point(4.0, 0.0), point(0.0, 4.0)]);
    band.append_polygon(&[point(1.0, 1.0), point(2.0, 1.0), point(1.0, 2.0)]);
    let band = band.with_fill_rule(FillRule::EvenOdd);
    assert_eq!(band.points().count(), 6);
    assert_eq!(path_d(&band), "M0,0 L4,0 L0,4 Z M1,1 L2,1 L1,2 Z");
}
