use crate::io::tga::TextureError;
use crate::pipeline::presenter::{Frame, Presenter, ShadedTriangle};
use crate::scene::light::Light;
use crate::scene::lighting::{lacks_normal, shade_face};
use crate::scene::mesh::Mesh;
use crate::scene::shading::ShadingMode;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Owns the meshes and lights and keeps face colors in sync with them.
///
/// Face colors are recomputed from scratch by every lighting pass. The scene
/// remembers the mode of the last pass. Mesh mutations forget it; light
/// mutations only mark it stale for modes that read the lights, so that
/// [`Scene::refresh_lighting`] knows when to recompute.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    lights: Vec<Light>,
    seed: u64,
    last_pass: Option<ShadingMode>,
    lights_changed: bool,
}

impl Scene {
    pub fn new(lights: Vec<Light>) -> Self {
        Self {
            lights,
            ..Default::default()
        }
    }

    /// Seed for [`ShadingMode::RandomColor`]. Every pass restarts from it.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.last_pass = None;
        self
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn meshes_mut(&mut self) -> &mut [Mesh] {
        self.last_pass = None;
        &mut self.meshes
    }

    pub fn add_mesh(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
        self.last_pass = None;
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
        self.lights_changed = true;
    }

    pub fn replace_lights(&mut self, lights: Vec<Light>) {
        self.lights = lights;
        self.lights_changed = true;
    }

    pub fn clear_lights(&mut self) {
        self.lights.clear();
        self.lights_changed = true;
    }

    pub fn face_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.faces().len()).sum()
    }

    /// Mode of the last lighting pass, `None` if colors are stale.
    pub fn lit_mode(&self) -> Option<ShadingMode> {
        self.last_pass
            .filter(|mode| !(self.lights_changed && mode.uses_lights()))
    }

    /// Recomputes the colors of every face for `mode`.
    pub fn apply_lighting(&mut self, mode: ShadingMode) {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut blacked_out = 0usize;

        for mesh in &mut self.meshes {
            for face in mesh.faces_mut() {
                if lacks_normal(face, mode, &self.lights) {
                    blacked_out += 1;
                }
                face.colors = shade_face(face, mode, &self.lights, &mut rng);
            }
        }

        if blacked_out > 0 {
            debug!("{blacked_out} face(s) without a usable normal colored black ({mode} pass)");
        }
        debug!(
            "Lighting pass '{}' over {} faces with {} light(s)",
            mode,
            self.face_count(),
            self.lights.len()
        );
        self.last_pass = Some(mode);
        self.lights_changed = false;
    }

    /// Runs a lighting pass only if the mode or the meshes changed since the
    /// last one, or the lights changed and `mode` depends on them. Returns
    /// whether a pass ran.
    pub fn refresh_lighting(&mut self, mode: ShadingMode) -> bool {
        if self.lit_mode() == Some(mode) {
            return false;
        }
        self.apply_lighting(mode);
        true
    }

    /// Moves every mesh texture to the presenter. Returns the number uploaded.
    pub fn upload_textures<P: Presenter + ?Sized>(
        &mut self,
        presenter: &mut P,
    ) -> Result<usize, TextureError> {
        let mut uploaded = 0;
        for mesh in &mut self.meshes {
            if mesh.upload_texture(presenter)?.is_some() {
                uploaded += 1;
            }
        }
        Ok(uploaded)
    }

    /// The current face colors as a presentable frame.
    ///
    /// Before the first pass every face is black and the mode reads as the default.
    pub fn frame(&self) -> Frame<'_> {
        let triangles = self
            .meshes
            .iter()
            .flat_map(|mesh| {
                let handle = mesh.texture.as_ref().and_then(|t| t.handle());
                mesh.faces()
                    .iter()
                    .map(move |face| ShadedTriangle::from_face(face, handle))
            })
            .collect();

        Frame {
            mode: self.last_pass.unwrap_or_default(),
            triangles,
        }
    }

    /// Brings the lighting up to date for `mode` and hands the frame to the presenter.
    pub fn present<P: Presenter + ?Sized>(&mut self, mode: ShadingMode, presenter: &mut P) {
        self.refresh_lighting(mode);
        presenter.present(&self.frame());
    }
}
