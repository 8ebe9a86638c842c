use lofmap_algo::cross_section;
use lofmap_algo::svg_writer::write_svg;
use lofmap_core::figure::FigureLayout;
use lofmap_core::params::{BuildConfig, ParameterRecord};

#[test]
fn writes_one_polygon_per_track_cut() {
    let section = cross_section(&ParameterRecord::default(), &BuildConfig::default());
    let svg = write_svg(&section, &FigureLayout::default()).unwrap();

    assert!(svg.starts_with("<?xml"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(section.polygons.len(), svg.matches("<polygon ").count());
    assert!(svg.contains(r#"clip-path="url(#viewport)""#));
    assert!(svg.contains(r##"fill="#808080""##));
    assert!(svg.contains("MPW = 138 µm, MPD = 69 µm"));
    assert!(svg.contains(">100 µm</text>"));
}

#[test]
fn scale_bar_spans_hundred_microns() {
    let params = ParameterRecord {
        cut_plane_depth: 5000.0,
        ..ParameterRecord::default()
    };
    let section = cross_section(&params, &BuildConfig::default());
    let svg = write_svg(&section, &FigureLayout::default()).unwrap();

    assert_eq!(0, svg.matches("<polygon ").count());
    // Bar at z = 20 in a 500 µm window: 20 margin + 30 title band + 480.
    assert!(svg.contains(r#"x1="370.000" y1="530.000" x2="470.000" y2="530.000""#));
}
