use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use skyatlas::{
    data::AtlasPaths, tiles::tiles_at_zoom, AtlasConfig, AtlasState, HotspotResolver, TileSource,
    XyzTileSource,
};

/// Exports the sky atlas overlays as leaflet-ready JSON
#[derive(Parser, Debug)]
#[command(name = "skyatlas-app", version)]
struct Cli {
    /// Optional JSON configuration; defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Marker position and style for every catalog object
    Markers(MarkersArgs),
    /// Planar anchors and bounds for the mosaic hotspots
    Hotspots(HotspotsArgs),
    /// Check the mosaic tile tree for missing tiles
    Tiles(TilesArgs),
}

#[derive(Args, Debug)]
struct MarkersArgs {
    #[arg(long, default_value = "messier_data.json")]
    catalog: PathBuf,
    #[arg(long, default_value = "messier_dzi/manifest.json")]
    manifest: PathBuf,
    /// Type filter; `all` keeps every marker at full opacity
    #[arg(long, default_value = "all")]
    filter: String,
    #[arg(long, default_value = "output/messier_markers_leaflet.json")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct HotspotsArgs {
    #[arg(long, default_value = "output/messier_skymap_8k_hotspots.json")]
    hotspots: PathBuf,
    #[arg(long, default_value = "output/messier_hotspots_leaflet.json")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct TilesArgs {
    /// Single zoom level to check; every level up to the max zoom otherwise
    #[arg(long)]
    zoom: Option<u8>,
}

/// Marker record with the object's pyramid, when it has one
#[derive(Serialize)]
struct MarkerRecord {
    #[serde(flatten)]
    placement: skyatlas::MarkerPlacement,
    list_visible: bool,
    dzi: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    skyatlas::init_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AtlasConfig::from_path(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => AtlasConfig::default(),
    };

    match cli.command {
        Command::Markers(args) => export_markers(config, args).await,
        Command::Hotspots(args) => export_hotspots(config, args).await,
        Command::Tiles(args) => check_tiles(&config, args).await,
    }
}

async fn export_markers(config: AtlasConfig, args: MarkersArgs) -> anyhow::Result<()> {
    let paths = AtlasPaths::new(&args.catalog, &args.manifest);
    let mut state = AtlasState::load_async(config, &paths)
        .await
        .context("loading catalog and manifest")?;

    let outcomes = state.set_filter(&args.filter);
    let records: Vec<MarkerRecord> = state
        .markers()
        .into_iter()
        .zip(outcomes)
        .map(|(placement, outcome)| {
            let dzi = state.detail(&placement.id).and_then(|d| d.assets.dzi);
            MarkerRecord {
                list_visible: outcome.list_visible,
                placement,
                dzi,
            }
        })
        .collect();

    let without_pyramid = records.iter().filter(|r| r.dzi.is_none()).count();
    if without_pyramid > 0 {
        log::info!("{} objects have no deep-zoom pyramid", without_pyramid);
    }
    write_json(&args.out, &records).await
}

async fn export_hotspots(config: AtlasConfig, args: HotspotsArgs) -> anyhow::Result<()> {
    let Some(regions) = skyatlas::data::load_hotspots_async(&args.hotspots).await else {
        bail!("hotspots input not found: {}", args.hotspots.display());
    };
    let anchors = HotspotResolver::new(config.mosaic).resolve_all(&regions)?;
    write_json(&args.out, &anchors).await
}

async fn check_tiles(config: &AtlasConfig, args: TilesArgs) -> anyhow::Result<()> {
    let source = XyzTileSource::from_config(config);
    let levels = match args.zoom {
        Some(z) if z > source.max_zoom() => {
            bail!("zoom {} is past the mosaic max zoom {}", z, source.max_zoom())
        }
        Some(z) => z..=z,
        None => 0..=source.max_zoom(),
    };

    let mut missing = 0usize;
    for z in levels {
        for coord in tiles_at_zoom(z) {
            let path = source.url(coord);
            if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
                log::warn!("missing tile {}", path);
                missing += 1;
            }
        }
    }
    if missing > 0 {
        bail!("{} mosaic tiles missing under {}", missing, source.template());
    }
    log::info!("tile tree complete: {}", source.template());
    Ok(())
}

async fn write_json<T: Serialize + ?Sized>(out: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(dir) = out.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir).await?;
    }
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(out, json)
        .await
        .with_context(|| format!("writing {}", out.display()))?;
    log::info!("wrote {}", out.display());
    Ok(())
}
