//! The UI hit-test component.
//!
//! Every update, a [`UiElement`]:
//!
//! 1. Writes its rect to its visual node, corrected for the camera aspect
//!    ratio (see [`aspect_scale`]).
//! 2. If a click is pending and it has a handler, maps the pointer into UI
//!    space and, when the point falls strictly inside the rect, consumes the
//!    click and calls the handler.
//!
//! Nothing is cached between frames. Since the click is consumed on the first
//! hit, overlapping elements resolve to the first one in traversal order.

use std::rc::Rc;

use engine_component::{Component, Context};
use engine_math::{Camera, Vec2, Viewport};
use tracing::{debug, trace, warn};

use crate::input::Pointer;
use crate::rect::{Rect, Space, aspect_scale};
use crate::render::{VisualRef, Visuals};

type ClickFn = dyn Fn(&mut UiElement, &mut Context<'_>, Vec2) -> anyhow::Result<()>;

/// Callback run when an element is clicked. Receives the element, the
/// callback context and the click point in UI space.
#[derive(Clone)]
pub struct ClickHandler(Rc<ClickFn>);

impl ClickHandler {
    pub fn new(
        f: impl Fn(&mut UiElement, &mut Context<'_>, Vec2) -> anyhow::Result<()> + 'static,
    ) -> Self {
        Self(Rc::new(f))
    }

    fn call(&self, element: &mut UiElement, cx: &mut Context<'_>, point: Vec2) -> anyhow::Result<()> {
        (self.0)(element, cx, point)
    }
}

impl std::fmt::Debug for ClickHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ClickHandler")
    }
}

/// A clickable rectangle drawn through a visual node.
#[derive(Debug, Clone, Default)]
pub struct UiElement {
    pub rect: Rect,
    pub space: Space,
    pub click: Option<ClickHandler>,
    /// The node this element positions. Must be set before the first update.
    pub visual: Option<VisualRef>,
}

impl UiElement {
    /// Write the rect into the visual node. Without a renderer nothing is
    /// drawn, but the element stays clickable.
    fn place(&self, visual: VisualRef, scale: Vec2, cx: &mut Context<'_>) {
        let instance = cx.id();
        let Some(visuals) = cx.resource_mut::<Visuals>() else {
            debug!(instance = %instance, "no renderer installed, ui element not placed");
            return;
        };
        match visuals.transform_mut(visual) {
            Some(transform) => {
                transform.set_scale_2d(self.rect.visual_scale(scale));
                transform.set_position_2d(self.rect.visual_position(scale));
            }
            None => warn!(instance = %instance, visual = visual.0, "ui visual node missing"),
        }
    }

    /// The pending click mapped into UI space, if any.
    fn pending_click(&self, scale: Vec2, cx: &Context<'_>) -> Option<Vec2> {
        let pointer = cx.resource::<Pointer>()?;
        if !pointer.click_pending() {
            return None;
        }
        let viewport = *cx.resource::<Viewport>()?;
        Some(self.rect.pointer_to_ui(pointer.position, viewport, scale))
    }
}

impl Component for UiElement {
    fn update(&mut self, cx: &mut Context<'_>) -> anyhow::Result<()> {
        let Some(visual) = self.visual else {
            panic!("ui element {} has no visual", cx.id());
        };

        let ratio = cx.resource::<Camera>().map_or(1.0, |camera| camera.ratio);
        let scale = aspect_scale(ratio, self.space);
        self.place(visual, scale, cx);

        let Some(handler) = self.click.clone() else {
            return Ok(());
        };
        let Some(point) = self.pending_click(scale, cx) else {
            return Ok(());
        };
        if !self.rect.contains(point) {
            return Ok(());
        }

        if let Some(pointer) = cx.resource_mut::<Pointer>() {
            pointer.consume();
        }
        trace!(instance = %cx.id(), x = point.x, y = point.y, "ui element clicked");
        handler.call(self, cx, point)
    }
}

#[cfg(test)]
mod tests {
    use engine_app::{Platform, TickConfig, TickLoop, World};
    use engine_component::{Entity, InstanceId};

    use super::*;
    use crate::render::{HeadlessRenderer, MeshRef};

    /// Entities whose element was clicked, in click order.
    #[derive(Default)]
    struct Clicks(Vec<(Entity, Vec2)>);

    fn record() -> ClickHandler {
        ClickHandler::new(|_, cx, point| {
            let entity = cx.entity();
            if let Some(clicks) = cx.resource_mut::<Clicks>() {
                clicks.0.push((entity, point));
            }
            Ok(())
        })
    }

    fn world(ratio: f32) -> World {
        let mut world = World::new();
        crate::init(&mut world).unwrap();
        world.insert_resource(Visuals::new(HeadlessRenderer::new()));
        world.insert_resource(Camera { ratio, fov: 90.0 });
        world.insert_resource(Viewport::new(800, 800));
        world.insert_resource(Clicks::default());
        world
    }

    fn element(world: &mut World, rect: Rect) -> (Entity, InstanceId) {
        let entity = world.new_entity(Some("button")).unwrap();
        let id = crate::attach_element(world, entity, MeshRef(0), rect, Some(record())).unwrap();
        (entity, id)
    }

    fn click_at(world: &mut World, pixels: Vec2) {
        world.resource_mut::<Pointer>().unwrap().press(pixels);
        world.tick();
    }

    fn clicks(world: &World) -> Vec<Entity> {
        world.resource::<Clicks>().unwrap().0.iter().map(|c| c.0).collect()
    }

    #[test]
    fn test_click_inside_hits() {
        let mut world = world(1.0);
        let (entity, _) = element(&mut world, Rect::new(0.0, 0.0, 0.1, 0.1));

        // Window centre is UI (0, 0).
        click_at(&mut world, Vec2::new(400.0, 400.0));
        assert_eq!(clicks(&world), [entity]);
        assert!(!world.resource::<Pointer>().unwrap().click_pending());

        let point = world.resource::<Clicks>().unwrap().0[0].1;
        assert!(point.length() < 1e-5);
    }

    #[test]
    fn test_click_outside_misses() {
        let mut world = world(1.0);
        element(&mut world, Rect::new(0.0, 0.0, 0.1, 0.1));

        // UI (0.5, 0.5).
        click_at(&mut world, Vec2::new(600.0, 200.0));
        assert!(clicks(&world).is_empty());
        assert!(world.resource::<Pointer>().unwrap().click_pending());
    }

    #[test]
    fn test_overlapping_elements_first_wins() {
        let mut world = world(1.0);
        let (first, _) = element(&mut world, Rect::new(0.0, 0.0, 0.2, 0.2));
        element(&mut world, Rect::new(0.0, 0.0, 0.1, 0.1));

        click_at(&mut world, Vec2::new(400.0, 400.0));
        assert_eq!(clicks(&world), [first]);

        // The click was consumed; nothing fires on the next tick.
        world.tick();
        assert_eq!(clicks(&world).len(), 1);
    }

    #[test]
    fn test_visual_follows_rect_and_ratio() {
        let mut world = world(0.5);
        let rect = Rect::new(0.5, 0.25, 0.2, 0.1).with_origin(Vec2::new(0.5, 0.5));
        let (_, id) = element(&mut world, rect);
        world.tick();

        let visual = world.get::<UiElement>(id).unwrap().visual.unwrap();
        let visuals = world.resource_mut::<Visuals>().unwrap();
        let transform = *visuals.transform_mut(visual).unwrap();
        assert!((transform.scale.x - 0.1).abs() < 1e-5);
        assert!((transform.scale.y - 0.05).abs() < 1e-5);
        assert!((transform.position.x - 0.2).abs() < 1e-5);
        assert!((transform.position.y - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_clip_space_ignores_ratio() {
        let mut world = world(2.0);
        let (_, id) = element(&mut world, Rect::new(0.5, 0.0, 0.1, 0.1));
        world.get_mut::<UiElement>(id).unwrap().space = Space::Clip;

        // Clip x = 0.5 is three quarters of the window width.
        click_at(&mut world, Vec2::new(600.0, 400.0));
        assert_eq!(clicks(&world).len(), 1);
    }

    #[test]
    fn test_element_without_handler_leaves_click() {
        let mut world = world(1.0);
        let entity = world.new_entity(None).unwrap();
        crate::attach_element(&mut world, entity, MeshRef(0), Rect::new(0.0, 0.0, 0.5, 0.5), None)
            .unwrap();

        click_at(&mut world, Vec2::new(400.0, 400.0));
        assert!(world.resource::<Pointer>().unwrap().click_pending());
    }

    #[test]
    #[should_panic(expected = "has no visual")]
    fn test_missing_visual_panics() {
        let mut world = world(1.0);
        let entity = world.new_entity(None).unwrap();
        world.attach_named(entity, crate::UI_TYPE).unwrap();
        world.tick();
    }

    #[test]
    fn test_click_without_renderer_still_hits() {
        let mut world = world(1.0);
        let (entity, _) = element(&mut world, Rect::new(0.0, 0.0, 0.1, 0.1));
        world.resources_mut().remove::<Visuals>();

        click_at(&mut world, Vec2::new(400.0, 400.0));
        assert_eq!(clicks(&world), [entity]);
    }

    /// Widens the window and clicks in the same frame.
    struct ResizeAndClick {
        frame: u64,
    }

    impl Platform for ResizeAndClick {
        fn draw(&mut self, _world: &mut World) -> anyhow::Result<()> {
            self.frame += 1;
            Ok(())
        }

        fn update_window(&mut self, world: &mut World) -> anyhow::Result<()> {
            if self.frame == 1 {
                world.insert_resource(Viewport::new(1600, 800));
                if let Some(pointer) = world.resource_mut::<Pointer>() {
                    pointer.press(Vec2::new(1400.0, 400.0));
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_resize_and_click_in_same_frame() {
        let mut world = world(1.0);
        // UI (1.5, 0) is pixel (1400, 400) once the window is twice as wide
        // as it is tall.
        let (entity, _) = element(&mut world, Rect::new(1.5, 0.0, 0.1, 0.1));

        let config = TickConfig {
            tick_rate: 0.0,
            max_ticks: 1,
        };
        let mut tick_loop = TickLoop::new(config, world);
        tick_loop.run(&mut ResizeAndClick { frame: 0 });

        let world = tick_loop.world();
        assert_eq!(world.resource::<Camera>().unwrap().ratio, 2.0);
        assert_eq!(clicks(world), [entity]);
    }
}
