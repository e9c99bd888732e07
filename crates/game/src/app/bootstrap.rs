use engine::{
    read_sprite_manifest, resolve_app_paths, LoopConfig, Scene, SpriteDatabase, SpriteManifest,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::config::load_world_config;
use super::world::World;

pub struct AppWiring {
    pub config: LoopConfig,
    pub sprites: SpriteDatabase,
    pub scene: Box<dyn Scene>,
}

pub fn build_app() -> Result<AppWiring, String> {
    init_tracing();
    info!("=== Driftland Startup ===");

    let paths = resolve_app_paths().map_err(|error| error.to_string())?;
    info!(
        root = %paths.root.display(),
        assets_dir = %paths.assets_dir.display(),
        "startup"
    );

    let world_config = load_world_config(&paths.config_path())?;

    let manifest_path = paths.sprite_manifest_path();
    let manifest = if manifest_path.is_file() {
        read_sprite_manifest(&manifest_path).map_err(|error| error.to_string())?
    } else {
        warn!(
            path = %manifest_path.display(),
            "sprite_manifest_missing_rendering_placeholders"
        );
        SpriteManifest::default()
    };
    let sprites = SpriteDatabase::load(&paths.assets_dir, &manifest);
    info!(sprite_count = sprites.len(), "content_loaded");

    let world = World::new(&world_config, &sprites);

    Ok(AppWiring {
        config: LoopConfig::default(),
        sprites,
        scene: Box::new(world),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
