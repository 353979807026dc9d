//! Earthquake overlay: one circle path per quake, radius from magnitude.
//!
//! Paths are bound to features exactly once. Later renders only rewrite the
//! geometry through the updated projection; the element set never changes.

use crate::{
    core::{
        constants::RADIUS_RANGE,
        geo::{LatLngBounds, Point},
        projection::Projection,
    },
    data::{
        geojson::{QuakeCollection, QuakeFeature},
        scale::SqrtScale,
    },
    layers::base::{LayerProperties, LayerTrait, LayerType, ViewState},
    rendering::scene::{PathId, Scene},
    tiles::layout::format_number,
    Result,
};

/// Extra pixels around a marker that still count as a hover hit.
const HIT_SLOP: f64 = 2.0;

pub struct VectorLayer {
    properties: LayerProperties,
    quakes: QuakeCollection,
    radius_scale: SqrtScale,
    radii: Vec<f64>,
    bound: bool,
}

impl VectorLayer {
    /// Builds the overlay; the radius scale's domain is fixed here from the
    /// largest magnitude in `quakes`.
    pub fn new(quakes: QuakeCollection, radius_range: (f64, f64)) -> Self {
        let max_magnitude = quakes.max_magnitude().unwrap_or(0.0);
        let radius_scale = SqrtScale::for_max_magnitude(max_magnitude, radius_range);
        let radii = quakes
            .features()
            .iter()
            .map(|f| radius_scale.radius(f.magnitude))
            .collect();

        let properties =
            LayerProperties::new("quakes".to_string(), "Earthquakes".to_string(), LayerType::Vector)
                .with_z_index(1);

        Self {
            properties,
            quakes,
            radius_scale,
            radii,
            bound: false,
        }
    }

    pub fn with_default_range(quakes: QuakeCollection) -> Self {
        Self::new(quakes, RADIUS_RANGE)
    }

    pub fn radius_scale(&self) -> &SqrtScale {
        &self.radius_scale
    }

    /// Point radius of the path bound to feature `id`.
    pub fn radius(&self, id: PathId) -> Option<f64> {
        self.radii.get(id).copied()
    }

    pub fn quakes(&self) -> &QuakeCollection {
        &self.quakes
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Path data for feature `id` under `projection`.
    pub fn geometry(&self, id: PathId, projection: &Projection) -> Option<String> {
        let feature = self.quakes.get(id)?;
        let center = projection.project(&feature.position);
        Some(circle_path(&center, self.radii[id]))
    }

    /// Appends one path per quake to the scene.
    pub fn bind(&mut self, scene: &mut dyn Scene, projection: &Projection) {
        for id in 0..self.quakes.len() {
            if let Some(d) = self.geometry(id, projection) {
                scene.insert_path(id, &d);
            }
        }
        self.bound = true;
        log::debug!("vector: bound {} paths", self.quakes.len());
    }

    /// Rewrites every path's geometry for the current projection.
    pub fn redraw(&self, scene: &mut dyn Scene, projection: &Projection) {
        for id in 0..self.quakes.len() {
            if let Some(d) = self.geometry(id, projection) {
                scene.set_path_geometry(id, &d);
            }
        }
    }

    /// Topmost quake whose marker covers the screen point.
    pub fn feature_at(&self, point: &Point, projection: &Projection) -> Option<(PathId, &QuakeFeature)> {
        self.quakes
            .features()
            .iter()
            .enumerate()
            .rev()
            .find(|(id, feature)| {
                let center = projection.project(&feature.position);
                center.distance_to(point) <= self.radii[*id] + HIT_SLOP
            })
    }
}

impl LayerTrait for VectorLayer {
    crate::impl_layer_trait!(VectorLayer, properties);

    fn render(&mut self, scene: &mut dyn Scene, view: &ViewState) -> Result<()> {
        if self.bound {
            self.redraw(scene, &view.projection);
        } else {
            self.bind(scene, &view.projection);
        }
        Ok(())
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        self.quakes.bounds()
    }
}

/// Circle of radius `r` around `center`, drawn as two arcs.
pub fn circle_path(center: &Point, r: f64) -> String {
    let r_str = format_number(r);
    format!(
        "M{},{}m0,{}a{},{} 0 1,1 0,{}a{},{} 0 1,1 0,{}z",
        format_number(center.x),
        format_number(center.y),
        r_str,
        r_str,
        r_str,
        format_number(-2.0 * r),
        r_str,
        r_str,
        format_number(2.0 * r)
    )
}
