//! Script classes of the demo, written against the native runtime.

use engine_script::{EngineApi, NativeClass, NativeRuntime, ScriptObject, Severity};

/// Says hello on start and goodbye on destroy.
#[derive(Debug, Default)]
struct Greeter {
    updates: u64,
}

impl ScriptObject for Greeter {
    fn call(&mut self, method: &str, api: &mut dyn EngineApi) -> anyhow::Result<()> {
        match method {
            "start" => api.log(Severity::Console, "hello from Greeter"),
            "update" => self.updates += 1,
            "destroy" => api.log(
                Severity::Console,
                &format!("goodbye after {} updates", self.updates),
            ),
            other => anyhow::bail!("Greeter has no method {other}"),
        }
        Ok(())
    }
}

/// Follows the pointer and reports when it moves.
#[derive(Debug, Default)]
struct Wanderer {
    last: Option<(f32, f32)>,
}

impl ScriptObject for Wanderer {
    fn call(&mut self, method: &str, api: &mut dyn EngineApi) -> anyhow::Result<()> {
        if method != "update" {
            anyhow::bail!("Wanderer has no method {method}");
        }
        let Some(position) = api.pointer_position() else {
            return Ok(());
        };
        let current = (position.x, position.y);
        if self.last != Some(current) {
            api.log(
                Severity::Debug,
                &format!("pointer at ({:.0}, {:.0})", position.x, position.y),
            );
            self.last = Some(current);
        }
        Ok(())
    }
}

/// Build the runtime holding every demo class.
pub fn runtime() -> NativeRuntime {
    let mut runtime = NativeRuntime::new();
    runtime.register(
        "scripts/game/Greeter",
        NativeClass::new(Greeter::default)
            .method("start")
            .method("update")
            .method("destroy"),
    );
    runtime.register(
        "scripts/game/Wanderer",
        NativeClass::new(Wanderer::default).method("update"),
    );
    runtime.register(
        "scripts/Init",
        NativeClass::empty()
            .static_bool("init", |api| {
                let player = api.new_entity(Some("player"))?;
                api.attach_component(player, "scripts/game/Greeter")?;
                api.attach_component(player, "scripts/game/Wanderer")?;

                let spark = api.new_entity(Some("spark"))?;
                api.attach_component(spark, components::Lifetime::NAME)?;
                api.log(Severity::Info, "scene ready");
                Ok(true)
            })
            .static_void("deinit", |api| {
                if let Some(player) = api.find_entity("player") {
                    api.log(Severity::Info, &format!("deinit, player is {player}"));
                }
                Ok(())
            }),
    );
    runtime
}

#[cfg(test)]
mod tests {
    use engine_app::World;
    use engine_script::{ScriptManifest, ScriptComponent};

    use super::*;

    fn world() -> World {
        let mut world = World::new();
        components::register(&mut world).unwrap();
        engine_ui::init(&mut world).unwrap();
        world
    }

    #[test]
    fn test_manifest_loads_demo_classes() {
        let manifest = ScriptManifest::parse(include_str!("../scripts.json")).unwrap();
        let mut world = world();
        let report = engine_script::load_scripts(&mut world, runtime(), &manifest).unwrap();

        assert_eq!(report.types.len(), 2);
        assert_eq!(report.failed, ["scripts/game/Missing"]);
        assert_eq!(report.static_class.as_deref(), Some("scripts/Init"));

        let player = world.find_entity("player").unwrap();
        assert_eq!(world.entity_components(player).unwrap().len(), 2);
        assert!(world.find_entity("spark").is_some());
    }

    #[test]
    fn test_scene_runs_and_spark_expires() {
        let manifest = ScriptManifest::parse(include_str!("../scripts.json")).unwrap();
        let mut world = world();
        engine_script::load_scripts(&mut world, runtime(), &manifest).unwrap();

        world.tick();
        let player = world.find_entity("player").unwrap();
        let greeter = world.entity_components(player).unwrap()[0];
        assert!(world.get::<ScriptComponent>(greeter).unwrap().object().is_some());

        for _ in 0..components::Lifetime::default().ticks {
            world.tick();
        }
        assert!(world.find_entity("spark").is_none());

        world.shutdown();
        assert_eq!(world.entity_count(), 0);
    }
}
