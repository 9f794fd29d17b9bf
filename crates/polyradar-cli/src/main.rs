use polyradar::render::raster::{RasterError, RasterOptions, svg_to_png};
use polyradar::render::{
    ChartSnapshot, ChartState, LayoutOptions, RadarChart, SvgRenderOptions, render_chart_svg,
    sanitize_svg_id,
};
use polyradar::{ChartConfig, ChartOptions, Series};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Chart(polyradar::Error),
    Render(polyradar_render::Error),
    Raster(RasterError),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Chart(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Yaml(err) => write!(f, "input error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<polyradar::Error> for CliError {
    fn from(value: polyradar::Error) -> Self {
        Self::Chart(value)
    }
}

impl From<polyradar_render::Error> for CliError {
    fn from(value: polyradar_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Layout,
    #[default]
    Render,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    pretty: bool,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    chart_id: Option<String>,
    out: Option<String>,
}

/// Input document: the series plus optional per-chart style overrides and surface size.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartDocument {
    series: Series,
    #[serde(default)]
    config: Option<Value>,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
}

#[derive(Serialize)]
struct LayoutOut<'a> {
    state: ChartState,
    snapshot: &'a ChartSnapshot,
}

const DEFAULT_SIZE: f64 = 400.0;

fn usage() -> &'static str {
    "polyradar-cli\n\
\n\
USAGE:\n\
  polyradar-cli layout [--pretty] [--config <path>] [--width <w>] [--height <h>] [<path>|-]\n\
  polyradar-cli [render] [--format svg|png] [--scale <n>] [--background <css-color>] [--config <path>] [--width <w>] [--height <h>] [--id <chart-id>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON or YAML document: { series: {label: value, ...}, config: {...}, width, height }.\n\
  - --config merges a JSON/YAML style file under the document's own config.\n\
  - layout prints the geometry/value snapshot as JSON.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG output defaults to writing next to the input file (or ./out.png for stdin).\n\
  - Set POLYRADAR_LOG (e.g. debug) to see layout logging on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        render_scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.width = Some(w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.height = Some(h.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.chart_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

/// Defaults, then the `--config` file, then the document's own `config` block.
fn resolve_config(args: &Args, doc: &ChartDocument) -> Result<ChartConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let is_json = std::path::Path::new(path)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if is_json {
                ChartConfig::from_json_str(&text)?
            } else {
                ChartConfig::from_yaml_str(&text)?
            }
        }
        None => ChartConfig::default(),
    };
    if let Some(overrides) = doc.config.as_ref() {
        config.deep_merge(overrides);
    }
    Ok(config)
}

fn build_chart(args: &Args, doc: ChartDocument) -> Result<RadarChart, CliError> {
    let config = resolve_config(args, &doc)?;
    let options = ChartOptions::from_config(&config)?;
    let width = args.width.or(doc.width).unwrap_or(DEFAULT_SIZE);
    let height = args.height.or(doc.height).unwrap_or(DEFAULT_SIZE);
    tracing::debug!(width, height, edges = doc.series.len(), "building chart");

    let mut chart = RadarChart::new(options, &LayoutOptions::default());
    chart.on_bounds_changed(width, height);
    chart.try_bind_series(doc.series)?;
    Ok(chart)
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let doc: ChartDocument = serde_yaml::from_str(&text)?;
    let chart = build_chart(&args, doc)?;
    let snapshot = chart.require_snapshot()?;

    match args.command {
        Command::Layout => write_json(
            &LayoutOut {
                state: chart.state(),
                snapshot: &snapshot,
            },
            args.pretty,
        ),
        Command::Render => {
            let svg_options = SvgRenderOptions {
                diagram_id: args.chart_id.as_deref().map(sanitize_svg_id),
                background: args.background.clone(),
            };
            let svg = render_chart_svg(&snapshot, &svg_options);
            match args.render_format {
                RenderFormat::Svg => write_text(&svg, args.out.as_deref()),
                RenderFormat::Png => {
                    let bytes = svg_to_png(
                        &svg,
                        &RasterOptions {
                            scale: args.render_scale,
                            background: args.background.clone(),
                        },
                    )?;
                    let out = match args.out.as_deref() {
                        Some(path) => std::path::PathBuf::from(path),
                        None => default_raster_out_path(args.input.as_deref(), "png"),
                    };
                    std::fs::write(&out, bytes)?;
                    Ok(())
                }
            }
        }
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("POLYRADAR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let argv: Vec<String> = std::env::args().collect();
    let result = parse_args(&argv).and_then(run);
    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(match err {
            CliError::Usage(_) => 2,
            _ => 1,
        });
    }
}
