//! Scene construction
//!
//! Builders for the atom and smoke-test scenes, plus the procedural pieces
//! they are made of.

mod atom_scene;
mod electron;
mod nucleus;
mod smoke_scene;

pub use atom_scene::{AtomSceneBuilder, NUCLEUS_GROUP_NAME};
pub use electron::{Electron, ElectronConfig, ElectronError, ElectronFactory, OrbitPlane};
pub use nucleus::{
    NucleusBall, NucleusError, NucleusGenerator, MAX_DIVISIONS, NUCLEUS_BALL_NAME, NUCLEUS_TAG,
};
pub use smoke_scene::{SmokeSceneBuilder, CUBE_NAME};

use atomviz_core::Scene;
use atomviz_input::OrbitControls;
use atomviz_render::PerspectiveCamera;

/// Everything one program animates and draws
pub struct SceneContext<A> {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    /// Camera controls, applied once per frame when present
    pub controls: Option<OrbitControls>,
    pub animation: A,
}

impl<A: crate::systems::Animation + 'static> SceneContext<A> {
    /// Erase the animation type so different programs share one app
    pub fn boxed(self) -> SceneContext<Box<dyn crate::systems::Animation>> {
        SceneContext {
            scene: self.scene,
            camera: self.camera,
            controls: self.controls,
            animation: Box::new(self.animation),
        }
    }
}

/// Error building a scene
#[derive(Debug)]
pub enum SceneBuildError {
    Nucleus(NucleusError),
    Electron(ElectronError),
}

impl std::fmt::Display for SceneBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneBuildError::Nucleus(e) => write!(f, "Failed to build nucleus: {}", e),
            SceneBuildError::Electron(e) => write!(f, "Failed to build electron: {}", e),
        }
    }
}

impl std::error::Error for SceneBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneBuildError::Nucleus(e) => Some(e),
            SceneBuildError::Electron(e) => Some(e),
        }
    }
}

impl From<NucleusError> for SceneBuildError {
    fn from(e: NucleusError) -> Self {
        SceneBuildError::Nucleus(e)
    }
}

impl From<ElectronError> for SceneBuildError {
    fn from(e: ElectronError) -> Self {
        SceneBuildError::Electron(e)
    }
}
