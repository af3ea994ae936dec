use lenstrace::{
    console::Args, error::TraceResult, plot_sink::render_to_file, scene::SceneConfig,
};
use log::info;

fn main() -> TraceResult<()> {
    //parse CLI arguments
    let args = Args::from_cli()?;
    env_logger::Builder::new()
        .filter_level(args.log_level)
        .parse_default_env()
        .init();

    //read scene description or fall back to the default scene
    let mut scene = match &args.config {
        Some(path) => SceneConfig::from_file(path)?,
        None => {
            info!("using default scene");
            SceneConfig::default()
        }
    };
    if let Some(max_bounces) = args.max_bounces {
        scene.max_bounces = max_bounces;
    }

    //trace all rays through the lens
    let surfaces = scene.build_lens()?;
    let rays = scene.entry_rays()?;
    let traces = scene.projector()?.project_all(&rays, &surfaces);
    let bounces: usize = traces.iter().map(|t| t.bounces()).sum();
    info!(
        "traced {} rays through {} surfaces ({} interactions)",
        rays.len(),
        surfaces.len(),
        bounces
    );

    //render the scene
    render_to_file(
        &args.output,
        &scene.render,
        &surfaces,
        &traces,
        scene.display_length,
    )?;
    info!("image written to {}", args.output.display());
    Ok(())
}
