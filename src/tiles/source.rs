use crate::core::config::TileSourceConfig;
use crate::core::constants::{TILE_SUBDOMAINS, TILE_URL_TEMPLATE};
use crate::core::geo::TileCoord;

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// URL template source with `{s}`, `{z}`, `{x}` and `{y}` placeholders.
///
/// The subdomain is picked from the tile row (`row mod n`), which spreads
/// requests across CDN hosts without affecting which image is served.
#[derive(Debug, Clone)]
pub struct TemplateTileSource {
    template: String,
    subdomains: Vec<String>,
}

impl TemplateTileSource {
    pub fn new(template: impl Into<String>, subdomains: Vec<String>) -> Self {
        Self {
            template: template.into(),
            subdomains,
        }
    }

    /// Carto Voyager raster basemap.
    pub fn carto_voyager() -> Self {
        Self::new(
            TILE_URL_TEMPLATE,
            TILE_SUBDOMAINS.iter().map(|s| s.to_string()).collect(),
        )
    }

    pub fn from_config(config: &TileSourceConfig) -> Self {
        Self::new(config.url_template.clone(), config.subdomains.clone())
    }

    pub fn subdomain(&self, coord: TileCoord) -> &str {
        if self.subdomains.is_empty() {
            return "";
        }
        let idx = (coord.y as usize) % self.subdomains.len();
        &self.subdomains[idx]
    }
}

impl Default for TemplateTileSource {
    fn default() -> Self {
        Self::carto_voyager()
    }
}

impl TileSource for TemplateTileSource {
    fn url(&self, coord: TileCoord) -> String {
        self.template
            .replace("{s}", self.subdomain(coord))
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdomain_follows_row() {
        let source = TemplateTileSource::carto_voyager();
        assert_eq!(source.subdomain(TileCoord::new(0, 7, 5)), "b");
        assert_eq!(source.subdomain(TileCoord::new(9, 6, 5)), "a");
        assert_eq!(source.subdomain(TileCoord::new(9, 8, 5)), "c");
    }

    #[test]
    fn test_voyager_url() {
        let source = TemplateTileSource::default();
        assert_eq!(
            source.url(TileCoord::new(2_800, 6_331, 14)),
            "http://b.basemaps.cartocdn.com/rastertiles/voyager/14/2800/6331.png"
        );
    }

    #[test]
    fn test_custom_template_without_subdomains() {
        let source = TemplateTileSource::new("https://tiles.example.org/{z}/{x}/{y}.png", Vec::new());
        assert_eq!(
            source.url(TileCoord::new(1, 2, 3)),
            "https://tiles.example.org/3/1/2.png"
        );
    }
}
