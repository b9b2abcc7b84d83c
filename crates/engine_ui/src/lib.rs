//! # engine_ui
//!
//! Clickable UI rectangles layered on the ECS.
//!
//! [`init`] registers the `"ui"` component type ([`UiElement`]) on the
//! built-in system and installs the [`Pointer`] resource. The application
//! installs [`Visuals`] (a renderer), [`Camera`](engine_math::Camera) and
//! [`Viewport`](engine_math::Viewport), and feeds pointer events into
//! [`Pointer`] from its platform layer.

pub mod element;
pub mod input;
pub mod rect;
pub mod render;

use engine_app::World;
use engine_component::{ComponentTypeId, EcsError, Entity, InstanceId};
use tracing::{debug, warn};

pub use element::{ClickHandler, UiElement};
pub use input::Pointer;
pub use rect::{Rect, Space, aspect_scale};
pub use render::{
    HeadlessRenderer, MeshRef, Renderer, TextureRef, TextureSlot, VisualNode, VisualRef, Visuals,
};

/// Name of the UI component type.
pub const UI_TYPE: &str = "ui";

/// Register the UI component type and install the pointer resource.
///
/// The prototype is a unit rect at the origin in camera space, with no
/// handler and no visual.
///
/// # Errors
///
/// Fails if the type cannot be registered (e.g. `init` already ran).
pub fn init(world: &mut World) -> Result<ComponentTypeId, EcsError> {
    let id = world
        .construct_type(UI_TYPE, UiElement::default())
        .inspect_err(|err| warn!(error = %err, "ui component construction failed"))?;
    if world.resource::<Pointer>().is_none() {
        world.insert_resource(Pointer::default());
    }
    debug!(type_id = %id, "ui initialised");
    Ok(id)
}

/// Attach a UI element to `entity` with a fresh visual node drawing `mesh`.
///
/// # Errors
///
/// Any attach error, or [`EcsError::UnknownType`] if [`init`] did not run.
/// Without an installed [`Visuals`] resource the element is attached with no
/// visual and will panic on its first update.
pub fn attach_element(
    world: &mut World,
    entity: Entity,
    mesh: MeshRef,
    rect: Rect,
    click: Option<ClickHandler>,
) -> Result<InstanceId, EcsError> {
    let id = world.attach_named(entity, UI_TYPE)?;
    let visual = world
        .resource_mut::<Visuals>()
        .map(|visuals| visuals.create_mesh_instance(mesh, None));
    if let Some(element) = world.get_mut::<UiElement>(id) {
        element.rect = rect;
        element.click = click;
        element.visual = visual;
    }
    Ok(id)
}
