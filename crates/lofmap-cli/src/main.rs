use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lofmap_core::figure::FigureLayout;
use lofmap_core::params::{BuildConfig, ParamKey, ParameterRecord, PARAM_SPECS};
use lofmap_core::report::SectionReport;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "lofmap")]
#[command(about = "Melt-pool cross-section maps for lack-of-fusion screening in LPBF.")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Cut the simulated build and write the section figure.
    Render {
        /// JSON parameter file; individual flags override its values.
        #[arg(long)]
        params: Option<PathBuf>,
        #[command(flatten)]
        overrides: ParamOverrides,
        #[arg(long)]
        svg: Option<PathBuf>,
        #[arg(long)]
        report: Option<PathBuf>,
        #[arg(long)]
        dump_polygons: Option<PathBuf>,
        #[command(flatten)]
        build: BuildOverrides,
    },
    /// Print the default parameters and their accepted ranges.
    Params,
}

#[derive(Debug, Args)]
struct ParamOverrides {
    /// Melt-pool width (µm).
    #[arg(long)]
    width: Option<f64>,
    /// Melt-pool depth (µm).
    #[arg(long)]
    depth: Option<f64>,
    #[arg(long)]
    layer_thickness: Option<f64>,
    #[arg(long)]
    hatch_distance: Option<f64>,
    /// Rotation between layers (degrees).
    #[arg(long)]
    rotation_angle: Option<f64>,
    #[arg(long)]
    cut_plane_depth: Option<f64>,
}

impl ParamOverrides {
    fn pairs(&self) -> [(ParamKey, Option<f64>); 6] {
        [
            (ParamKey::Width, self.width),
            (ParamKey::Depth, self.depth),
            (ParamKey::LayerThickness, self.layer_thickness),
            (ParamKey::HatchDistance, self.hatch_distance),
            (ParamKey::RotationAngleDeg, self.rotation_angle),
            (ParamKey::CutPlaneDepth, self.cut_plane_depth),
        ]
    }
}

/// Build constants; anything left unset comes from `BuildConfig::default()`.
#[derive(Debug, Args)]
struct BuildOverrides {
    #[arg(long)]
    layers: Option<usize>,
    #[arg(long)]
    paths: Option<usize>,
    #[arg(long)]
    extrusion_depth: Option<f64>,
}

impl BuildOverrides {
    fn resolve(&self) -> BuildConfig {
        let defaults = BuildConfig::default();
        BuildConfig {
            num_layers: self.layers.unwrap_or(defaults.num_layers),
            num_paths: self.paths.unwrap_or(defaults.num_paths),
            extrusion_depth: self.extrusion_depth.unwrap_or(defaults.extrusion_depth),
            ..defaults
        }
    }
}

/// Flags win over the file, the file wins over defaults.
fn resolve_params(file: Option<ParameterRecord>, overrides: &ParamOverrides) -> ParameterRecord {
    file.unwrap_or_default().with_overrides(overrides.pairs())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render {
            params,
            overrides,
            svg,
            report,
            dump_polygons,
            build,
        } => render(
            params.as_deref(),
            &overrides,
            build.resolve(),
            svg.as_deref(),
            report.as_deref(),
            dump_polygons.as_deref(),
        ),
        Command::Params => print_params(),
    }
}

fn render(
    params_path: Option<&Path>,
    overrides: &ParamOverrides,
    config: BuildConfig,
    svg: Option<&Path>,
    report: Option<&Path>,
    dump_polygons: Option<&Path>,
) -> Result<()> {
    let from_file = params_path.map(load_params).transpose()?;
    let params = resolve_params(from_file, overrides);
    params.validate().context("invalid parameters")?;

    let layout = FigureLayout::default();
    let section = lofmap_algo::cross_section(&params, &config);

    if let Some(path) = svg {
        let svg_data = lofmap_algo::svg_writer::write_svg(&section, &layout)?;
        write_output(path, &svg_data).with_context(|| format!("write svg: {path:?}"))?;
        log::info!("wrote {}", path.display());
    }

    if let Some(path) = dump_polygons {
        let json =
            serde_json::to_string_pretty(&section.polygons).context("serialize polygons")?;
        write_output(path, &json).with_context(|| format!("write polygons: {path:?}"))?;
    }

    let report_data = SectionReport::from_section(&section, &layout);
    for w in &report_data.warnings {
        log::warn!("{}: {}", w.code, w.message);
    }
    let json = serde_json::to_string_pretty(&report_data).context("serialize report")?;

    if let Some(path) = report {
        write_output(path, &json).with_context(|| format!("write report: {path:?}"))?;
    } else {
        println!("{json}");
    }

    Ok(())
}

fn load_params(path: &Path) -> Result<ParameterRecord> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read params: {path:?}"))?;
    serde_json::from_str(&text).with_context(|| format!("parse params JSON: {path:?}"))
}

fn write_output(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    std::fs::write(path, data)?;
    Ok(())
}

fn print_params() -> Result<()> {
    let json =
        serde_json::to_string_pretty(&ParameterRecord::default()).context("serialize params")?;
    println!("{json}");
    for spec in &PARAM_SPECS {
        println!(
            "{:<18} {:>6} .. {:<6} step {:<4} {} (default {})",
            spec.label, spec.min, spec.max, spec.step, spec.unit, spec.default
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_overrides() -> ParamOverrides {
        ParamOverrides {
            width: None,
            depth: None,
            layer_thickness: None,
            hatch_distance: None,
            rotation_angle: None,
            cut_plane_depth: None,
        }
    }

    #[test]
    fn flag_beats_file_and_file_beats_defaults() {
        let file: ParameterRecord =
            serde_json::from_str(r#"{ "depth": 80, "cut_plane_depth": 600 }"#).unwrap();
        let overrides = ParamOverrides {
            cut_plane_depth: Some(420.0),
            ..no_overrides()
        };
        let params = resolve_params(Some(file), &overrides);

        assert_eq!(420.0, params.cut_plane_depth);
        assert_eq!(80.0, params.depth);
        let defaults = ParameterRecord::default();
        assert_eq!(defaults.width, params.width);
        assert_eq!(defaults.rotation_angle_deg, params.rotation_angle_deg);
    }

    #[test]
    fn no_file_no_flags_gives_defaults() {
        assert_eq!(
            ParameterRecord::default(),
            resolve_params(None, &no_overrides())
        );
    }

    #[test]
    fn cli_flags_parse_into_overrides() {
        let cli = Cli::try_parse_from([
            "lofmap",
            "render",
            "--rotation-angle",
            "45",
            "--layers",
            "5",
        ])
        .unwrap();
        let Command::Render {
            overrides, build, ..
        } = cli.cmd
        else {
            panic!("expected render");
        };
        let params = resolve_params(None, &overrides);
        assert_eq!(45.0, params.rotation_angle_deg);

        let cfg = build.resolve();
        assert_eq!(5, cfg.num_layers);
        assert_eq!(BuildConfig::default().num_paths, cfg.num_paths);
        assert_eq!(BuildConfig::default().extrusion_depth, cfg.extrusion_depth);
    }
}
