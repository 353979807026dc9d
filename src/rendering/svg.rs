//! SVG serialization of a [`SceneGraph`].

use crate::rendering::scene::SceneGraph;
use crate::tiles::layout::format_number;
use std::fmt::Write;

/// Renders the scene as a standalone SVG document: the tile group first, then
/// the overlay paths on top.
pub fn to_svg(scene: &SceneGraph) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}">"#,
        format_number(scene.width),
        format_number(scene.height)
    );

    let _ = writeln!(
        out,
        r#"  <g transform="{}">"#,
        escape(&scene.tile_group_transform)
    );
    for tile in scene.tiles() {
        let _ = writeln!(
            out,
            r#"    <image xlink:href="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
            escape(&tile.href),
            format_number(tile.placement.x),
            format_number(tile.placement.y),
            format_number(tile.placement.width),
            format_number(tile.placement.height)
        );
    }
    out.push_str("  </g>\n");

    for path in scene.paths() {
        let _ = writeln!(out, r#"  <path d="{}"/>"#, escape(&path.geometry));
    }

    out.push_str("</svg>\n");
    out
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::TileCoord;
    use crate::rendering::scene::Scene;
    use crate::tiles::layout::TilePlacement;

    #[test]
    fn test_svg_structure() {
        let mut scene = SceneGraph::new();
        scene.set_size(960.0, 500.0);
        scene.set_tile_group_transform("translate(-10,20) scale(1)");
        let tile = TileCoord::new(10, 24, 6);
        scene.insert_tile(
            tile,
            "http://a.basemaps.cartocdn.com/rastertiles/voyager/6/10/24.png",
            TilePlacement::for_tile(tile, 256),
        );
        scene.insert_path(0, "M1,2m0,3z");

        let svg = to_svg(&scene);
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"width="960" height="500""#));
        assert!(svg.contains(r#"<g transform="translate(-10,20) scale(1)">"#));
        assert!(svg.contains(r#"x="2560" y="6144" width="256" height="256""#));
        assert!(svg.contains(r#"<path d="M1,2m0,3z"/>"#));
        assert!(svg.find("<image").unwrap() < svg.find("<path").unwrap());
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_attribute_escaping() {
        assert_eq!(escape(r#"a&b"c"#), "a&amp;b&quot;c");
    }
}
