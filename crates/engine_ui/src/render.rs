//! Renderer collaborator interface.
//!
//! The engine never draws by itself. Component code creates and moves visual
//! nodes through a [`Renderer`] stored in the [`Visuals`] resource. The
//! [`HeadlessRenderer`] keeps nodes in memory and is what tests and headless
//! demos install.

use std::ops::{Deref, DerefMut};

use engine_math::Transform;

/// Handle to a mesh asset known to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshRef(pub u64);

/// Handle to a texture asset known to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureRef(pub u64);

/// Handle to one visual node (a mesh instance in the scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualRef(pub u64);

/// How a texture is sampled by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSlot {
    Color,
    Normal,
}

/// The rendering collaborator.
pub trait Renderer {
    /// Create a node drawing `mesh`, optionally parented to another node.
    fn create_mesh_instance(&mut self, mesh: MeshRef, parent: Option<VisualRef>) -> VisualRef;

    /// Bind a texture to a node.
    ///
    /// # Errors
    ///
    /// Fails if the node does not exist.
    fn attach_texture(
        &mut self,
        visual: VisualRef,
        texture: TextureRef,
        slot: TextureSlot,
    ) -> anyhow::Result<()>;

    /// Mutable access to a node's transform.
    fn transform_mut(&mut self, visual: VisualRef) -> Option<&mut Transform>;
}

/// The renderer resource.
pub struct Visuals(pub Box<dyn Renderer>);

impl Visuals {
    pub fn new(renderer: impl Renderer + 'static) -> Self {
        Self(Box::new(renderer))
    }
}

impl Deref for Visuals {
    type Target = dyn Renderer;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl DerefMut for Visuals {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.0
    }
}

impl std::fmt::Debug for Visuals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Visuals")
    }
}

/// One node held by the [`HeadlessRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct VisualNode {
    pub mesh: MeshRef,
    pub parent: Option<VisualRef>,
    pub transform: Transform,
    pub textures: Vec<(TextureRef, TextureSlot)>,
}

/// In-memory renderer. Node handles index the node list.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    nodes: Vec<VisualNode>,
}

impl HeadlessRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn node(&self, visual: VisualRef) -> Option<&VisualNode> {
        self.nodes.get(usize::try_from(visual.0).ok()?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Renderer for HeadlessRenderer {
    fn create_mesh_instance(&mut self, mesh: MeshRef, parent: Option<VisualRef>) -> VisualRef {
        self.nodes.push(VisualNode {
            mesh,
            parent,
            transform: Transform::default(),
            textures: Vec::new(),
        });
        VisualRef((self.nodes.len() - 1) as u64)
    }

    fn attach_texture(
        &mut self,
        visual: VisualRef,
        texture: TextureRef,
        slot: TextureSlot,
    ) -> anyhow::Result<()> {
        let node = usize::try_from(visual.0)
            .ok()
            .and_then(|i| self.nodes.get_mut(i))
            .ok_or_else(|| anyhow::anyhow!("no visual node {}", visual.0))?;
        node.textures.push((texture, slot));
        Ok(())
    }

    fn transform_mut(&mut self, visual: VisualRef) -> Option<&mut Transform> {
        let index = usize::try_from(visual.0).ok()?;
        self.nodes.get_mut(index).map(|node| &mut node.transform)
    }
}
