use shapereg_core::Curve;
use shapereg_io::{render_document, write_svg, SvgOptions, PATH_COLOURS};
use tempfile::TempDir;

fn sample_paths() -> Vec<Vec<Curve>> {
    (0..8)
        .map(|i| {
            let x = i as f64;
            vec![Curve::from_xy(&[(x, 0.0), (x, 1.0)])]
        })
        .collect()
}

#[test]
fn test_one_group_per_path_with_cycled_colours() {
    let svg = render_document(&sample_paths(), &SvgOptions::default());
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("<g ").count(), 8);
    assert_eq!(svg.matches("<polyline").count(), 8);
    assert!(svg.contains(&format!(r#"id="path-0" stroke="{}""#, PATH_COLOURS[0])));
    assert!(svg.contains(&format!(r#"id="path-7" stroke="{}""#, PATH_COLOURS[0])));
    assert!(svg.contains(&format!(r#"id="path-3" stroke="{}""#, PATH_COLOURS[3])));
}

#[test]
fn test_y_axis_points_up() {
    let paths = vec![vec![Curve::from_xy(&[(0.0, 0.0), (0.0, 10.0)])]];
    let options = SvgOptions {
        width: 100.0,
        height: 100.0,
        padding: 0.0,
        ..Default::default()
    };
    let svg = render_document(&paths, &options);
    assert!(svg.contains(r#"points="50.000,100.000 50.000,0.000""#));
}

#[test]
fn test_title_and_single_points() {
    let paths = vec![vec![Curve::from_xy(&[(1.0, 1.0)]), Curve::default()]];
    let options = SvgOptions {
        title: Some("Regularized Paths - frag0.csv".to_string()),
        ..Default::default()
    };
    let svg = render_document(&paths, &options);
    assert!(svg.contains("Regularized Paths - frag0.csv</text>"));
    assert_eq!(svg.matches("<circle").count(), 1);
    assert_eq!(svg.matches("<polyline").count(), 0);
}

#[test]
fn test_empty_document_is_valid_svg() {
    let svg = render_document(&[], &SvgOptions::default());
    assert!(svg.contains("<svg"));
    assert!(!svg.contains("<g "));
}

#[test]
fn test_write_svg() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("paths.svg");
    write_svg(&path, &sample_paths(), &SvgOptions::default()).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("<polyline"));
}
