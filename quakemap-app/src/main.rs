use anyhow::{bail, Context};
use clap::Parser;
use quakemap::{
    core::geo::Point,
    input::events::{InputEvent, KeyModifiers},
    rendering::svg::to_svg,
    MapBuilder, MapConfig, QuakeMap, SceneGraph,
};
use std::path::PathBuf;

/// Render an earthquake map snapshot to SVG
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Dataset path or http(s) URL; overrides the configured dataset
    #[arg()]
    dataset: Option<String>,

    /// Host window size as WIDTHxHEIGHT
    #[arg(short, long, value_parser = parse_size)]
    window: Option<(f64, f64)>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output SVG file
    #[arg(short, long, default_value = "quakemap.svg")]
    out: PathBuf,

    /// Double-click zoom steps at the viewport center (negative zooms out)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    zoom_in: i32,

    /// Drag the map by DX,DY pixels; may be repeated
    #[arg(long, value_parser = parse_delta, allow_negative_numbers = true)]
    pan: Vec<Point>,

    /// JSON file with a list of input events to replay after the scripted gestures
    #[arg(long)]
    events: Option<PathBuf>,
}

fn parse_size(value: &str) -> Result<(f64, f64), String> {
    let (w, h) = value
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {value}"))?;
    let w = w.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let h = h.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok((w, h))
}

fn parse_delta(value: &str) -> Result<Point, String> {
    let (dx, dy) = value
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got {value}"))?;
    let dx = dx.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let dy = dy.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok(Point::new(dx, dy))
}

fn scripted_events(args: &Args, center: Point) -> Vec<InputEvent> {
    let mut events = Vec::new();

    let modifiers = if args.zoom_in < 0 {
        KeyModifiers::shift()
    } else {
        KeyModifiers::default()
    };
    for _ in 0..args.zoom_in.unsigned_abs() {
        events.push(InputEvent::DoubleClick {
            position: center,
            modifiers,
        });
    }

    for delta in &args.pan {
        events.push(InputEvent::DragStart { position: center });
        events.push(InputEvent::Drag { delta: *delta });
        events.push(InputEvent::DragEnd);
    }

    events
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quakemap::init_logging();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => MapConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => MapConfig::default(),
    };

    let mut builder = MapBuilder::from_config(config);
    if let Some((width, height)) = args.window {
        if width <= 0.0 || height <= 0.0 {
            bail!("window size must be positive, got {width}x{height}");
        }
        builder = builder.with_window_size(width, height);
    }
    if let Some(dataset) = &args.dataset {
        builder = builder.with_dataset(dataset);
    }

    let mut map: QuakeMap<SceneGraph> = builder
        .load(SceneGraph::new())
        .await
        .context("failed to start the map")?;

    map.on("mouseover", |event| log::info!("{:?}", event));

    let mut events = scripted_events(&args, map.viewport().center());
    if let Some(path) = &args.events {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading events {}", path.display()))?;
        let replay: Vec<InputEvent> =
            serde_json::from_str(&json).context("parsing input events")?;
        events.extend(replay);
    }

    for event in events {
        map.handle_event(event)?;
    }

    let transform = map.transform();
    log::info!(
        "final view x={} y={} k={} with {} tiles",
        transform.x,
        transform.y,
        transform.k,
        map.raster().displayed().len()
    );

    for url in map.tile_urls() {
        println!("{url}");
    }

    tokio::fs::write(&args.out, to_svg(map.scene()))
        .await
        .with_context(|| format!("writing {}", args.out.display()))?;
    log::info!("wrote {}", args.out.display());

    Ok(())
}
