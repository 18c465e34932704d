//! Dynamic render model interface.
use crate::FxModel;
use glam::{Mat3, Vec3};
use std::sync::Arc;

/// Half extent of the bounds reported by effect models on each axis.
pub const FX_BOUNDS_HALF_EXTENT: f32 = 128.0;

/// How the renderer treats the geometry of a model.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DynamicModelKind {
    /// Geometry is built once.
    Static,
    /// Geometry is regenerated only when the entity changes.
    Cached,
    /// Geometry is re-evaluated every frame and never cached.
    Continuous,
}

/// Axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Aabb {
        Aabb { min, max }
    }

    /// Box centered at the origin.
    pub fn from_half_extent(half_extent: Vec3) -> Aabb {
        Aabb {
            min: -half_extent,
            max: half_extent,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Entity the model is rendered for.
#[derive(Copy, Clone, Debug)]
pub struct RenderEntity {
    pub origin: Vec3,
    pub axis: Mat3,
}

impl Default for RenderEntity {
    fn default() -> Self {
        RenderEntity {
            origin: Vec3::ZERO,
            axis: Mat3::IDENTITY,
        }
    }
}

/// View the model is rendered in.
#[derive(Copy, Clone, Debug, Default)]
pub struct ViewDef {
    pub origin: Vec3,
    /// Time in seconds.
    pub time: f64,
}

/// Interface of models known to the renderer.
pub trait RenderModel {
    fn name(&self) -> &str;
    fn is_loaded(&self) -> bool;
    fn num_frames(&self) -> usize;
    fn dynamic_model_kind(&self) -> DynamicModelKind;
    /// Bounds of the model, optionally for a specific entity.
    fn bounds(&self, entity: Option<&RenderEntity>) -> Aabb;
    /// Creates the geometry of a dynamic model for one entity and view.
    ///
    /// `cached` is the instance returned by the previous call for the same entity, if any.
    fn instantiate_dynamic_model(
        &self,
        entity: &RenderEntity,
        view: &ViewDef,
        cached: Option<Arc<dyn RenderModel>>,
    ) -> Option<Arc<dyn RenderModel>>;
}

impl RenderModel for FxModel {
    fn name(&self) -> &str {
        FxModel::name(self)
    }

    fn is_loaded(&self) -> bool {
        FxModel::is_loaded(self)
    }

    fn num_frames(&self) -> usize {
        FxModel::num_frames(self)
    }

    fn dynamic_model_kind(&self) -> DynamicModelKind {
        DynamicModelKind::Continuous
    }

    // Not fitted to the particles.
    fn bounds(&self, _entity: Option<&RenderEntity>) -> Aabb {
        Aabb::from_half_extent(Vec3::splat(FX_BOUNDS_HALF_EXTENT))
    }

    // Particle geometry is generated elsewhere.
    fn instantiate_dynamic_model(
        &self,
        _entity: &RenderEntity,
        _view: &ViewDef,
        _cached: Option<Arc<dyn RenderModel>>,
    ) -> Option<Arc<dyn RenderModel>> {
        None
    }
}
