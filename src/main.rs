use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use osmworld::config::{ExportFormat, FileConfig};
use osmworld::ground::{FlatGround, GroundQuery, NoGround};
use osmworld::layers::{SceneConfig, generate_scene};
use osmworld::mesh::stl::estimate_stl_size;
use osmworld::mesh::{ValidationResult, remove_degenerate, validate_mesh, write_obj, write_stl};
use osmworld::osm::load_osm;

/// Generate 3D scene meshes from an OpenStreetMap XML extract
///
/// Examples:
///   # Roads, buildings, rooftops and parks as OBJ + MTL
///   osmworld city.osm
///
///   # Include rivers and streams, join footways into the road network
///   osmworld city.osm --waterways --combine-footways -o city_full.obj
///
///   # Flattened STL of buildings only, seated on flat ground at 2m
///   osmworld city.osm --format stl --no-roads --no-parks --ground-height 2
///
///   # Use a config file
///   osmworld city.osm --config my-settings.toml
#[derive(Parser, Debug)]
#[command(name = "osmworld")]
#[command(version, about, long_about = None)]
struct Args {
    /// OpenStreetMap XML file (.osm)
    input: PathBuf,

    /// Output file path (defaults to the input name with the format's extension)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<ExportFormat>,

    /// Path to config file (optional, auto-searches osmworld.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Roof apex height above the wall top, in meters
    #[arg(long)]
    rooftop_height: Option<f32>,

    /// River half-width in meters
    #[arg(long)]
    river_width: Option<f32>,

    /// Stream half-width in meters
    #[arg(long)]
    stream_width: Option<f32>,

    /// Seat objects on flat ground at this height (no ground if omitted)
    #[arg(long, allow_hyphen_values = true)]
    ground_height: Option<f32>,

    /// Stitch footways into the road network (two-material road objects)
    #[arg(long)]
    combine_footways: bool,

    /// Enable river and stream ribbons
    #[arg(long)]
    waterways: bool,

    /// Skip buildings and rooftops
    #[arg(long)]
    no_buildings: bool,

    /// Skip roads and footways
    #[arg(long)]
    no_roads: bool,

    /// Skip parks
    #[arg(long)]
    no_parks: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if !config_path.exists() {
            bail!("Config file not found: {:?}", config_path);
        }
        FileConfig::load_from(config_path)?
    } else {
        FileConfig::load().unwrap_or_default()
    };

    let verbose = args.verbose || file_config.verbose;
    init_tracing(verbose);

    let format = args.format.unwrap_or(file_config.format);
    let output_path = args
        .output
        .clone()
        .or_else(|| file_config.output.clone())
        .unwrap_or_else(|| args.input.with_extension(format.extension()));
    let ground_height = args.ground_height.or(file_config.ground_height);

    let scene_config = SceneConfig::from_file(&file_config)
        .with_rooftop_height(args.rooftop_height.unwrap_or(file_config.rooftop_height))
        .with_river_width(args.river_width.unwrap_or(file_config.river_width))
        .with_stream_width(args.stream_width.unwrap_or(file_config.stream_width))
        .with_combined_footways(args.combine_footways || file_config.combine_footways)
        .with_waterways(args.waterways || file_config.waterways)
        .with_roads(!args.no_roads && file_config.roads)
        .with_buildings(!args.no_buildings && file_config.buildings)
        .with_parks(!args.no_parks && file_config.parks);

    println!("osmworld - OpenStreetMap Scene Generator");
    println!("========================================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Input: {}", args.input.display());
        println!("  Output: {} ({:?})", output_path.display(), format);
        println!(
            "  Half-widths: road {}m, footway {}m, river {}m, stream {}m",
            scene_config.widths.road,
            scene_config.widths.footway,
            scene_config.widths.river,
            scene_config.widths.stream
        );
        println!("  Rooftop height: {}m", scene_config.rooftop_height);
        match ground_height {
            Some(h) => println!("  Ground: flat at {}m", h),
            None => println!("  Ground: none"),
        }
        println!(
            "  Layers: roads {}, footways {}, waterways {}, buildings {}, parks {}",
            on_off(scene_config.roads),
            if scene_config.combine_footways {
                "combined"
            } else {
                on_off(scene_config.roads)
            },
            on_off(scene_config.waterways),
            on_off(scene_config.buildings),
            on_off(scene_config.parks)
        );
        println!();
    }

    let spinner = create_spinner("Reading OpenStreetMap extract...");
    let start = Instant::now();
    let data = load_osm(&args.input)?;
    spinner.finish_with_message(format!(
        "Read {} nodes and {} ways [{:.1}s]",
        data.node_count(),
        data.way_count(),
        start.elapsed().as_secs_f32()
    ));

    if data.ways.is_empty() {
        bail!("No usable ways found in {}", args.input.display());
    }

    let flat_ground;
    let ground: &dyn GroundQuery = match ground_height {
        Some(height) => {
            flat_ground = FlatGround { height };
            &flat_ground
        }
        None => &NoGround,
    };

    let spinner = create_spinner("Generating scene layers...");
    let start = Instant::now();
    let mut scene = generate_scene(&data, &scene_config, ground);
    spinner.finish_with_message(format!(
        "Generated {} objects, {} triangles [{:.1}s]",
        scene.object_count(),
        scene.triangle_count(),
        start.elapsed().as_secs_f32()
    ));

    if verbose {
        for layer in &scene.layers {
            println!(
                "  {}: {} objects, {} triangles",
                layer.name,
                layer.objects.len(),
                layer.triangle_count()
            );
        }
    }

    let spinner = create_spinner("Validating meshes...");
    let mut report = ValidationResult::default();
    let mut removed = 0;
    for layer in &mut scene.layers {
        for object in &mut layer.objects {
            report.merge(validate_mesh(&object.mesh));
            removed += remove_degenerate(&mut object.mesh);
        }
    }
    if !report.is_valid() {
        spinner.abandon_with_message(report.summary());
        bail!("Generated meshes are invalid: {}", report.warnings.join("; "));
    }
    spinner.finish_with_message(format!(
        "{} ({} degenerate triangles removed)",
        report.summary(),
        removed
    ));

    let spinner = create_spinner(&format!("Writing {:?} file...", format));
    let start = Instant::now();
    match format {
        ExportFormat::Obj => {
            write_obj(&output_path, &scene, &file_config.palette)
                .context("Failed to write OBJ file")?;
            spinner.finish_with_message(format!(
                "Wrote {} objects [{:.1}s]",
                scene.object_count(),
                start.elapsed().as_secs_f32()
            ));
        }
        ExportFormat::Stl => {
            write_stl(&output_path, &scene).context("Failed to write STL file")?;
            let file_size = estimate_stl_size(scene.triangle_count());
            spinner.finish_with_message(format!(
                "Wrote {} triangles ({:.1} KB) [{:.1}s]",
                scene.triangle_count(),
                file_size as f64 / 1024.0,
                start.elapsed().as_secs_f32()
            ));
        }
    }

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!("Output: {}", output_path.display());
    if format == ExportFormat::Obj {
        println!("Materials: {}", output_path.with_extension("mtl").display());
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
