use chrono::{DateTime, Utc};
use muster::render::raster::{self, RasterOptions};
use muster::render::{RosterRenderer, SvgRenderOptions, read_logo_asset};
use muster::{ChartStyle, RankTaxonomy, RenderMeta, Roster, TaxonomyConfig};
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Taxonomy(muster::Error),
    Json(serde_json::Error),
    Raster(raster::RasterError),
    Timestamp(chrono::ParseError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Taxonomy(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Timestamp(err) => write!(f, "invalid --now timestamp: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<muster::Error> for CliError {
    fn from(value: muster::Error) -> Self {
        Self::Taxonomy(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<raster::RasterError> for CliError {
    fn from(value: raster::RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<chrono::ParseError> for CliError {
    fn from(value: chrono::ParseError) -> Self {
        Self::Timestamp(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Layout,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    jpeg_quality: u8,
    diagram_id: Option<String>,
    out: Option<String>,
    logo: Option<String>,
    now: Option<String>,
    style: Option<String>,
    taxonomy: Option<String>,
}

fn usage() -> &'static str {
    "muster-cli\n\
\n\
USAGE:\n\
  muster-cli [render] [--format svg|png|jpg] [--scale <n>] [--background <css-color>] [--quality <1-100>] [--logo <path>] [--now <rfc3339>] [--style <path>] [--taxonomy <path>] [--id <chart-id>] [--out <path>] [<roster.json>|-]\n\
  muster-cli layout [--pretty] [--style <path>] [--taxonomy <path>] [<roster.json>|-]\n\
\n\
NOTES:\n\
  - If <roster.json> is omitted or '-', input is read from stdin.\n\
  - The roster document maps rank name to a member list: {\"Spectre\": [{\"name\": \"Ada\", \"username\": \"ada\"}]}.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG output defaults to writing next to the input file (or ./out.png, ./out.jpg for stdin).\n\
  - --now pins the 'Updated'/'Generated' timestamps for reproducible output; default is the current UTC time.\n\
  - --style and --taxonomy take JSON overrides for the chart style and rank taxonomy.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Render,
        render_format: RenderFormat::Svg,
        render_scale: 1.0,
        jpeg_quality: 90,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "layout" => args.command = Command::Layout,
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
            "--quality" => {
                let Some(q) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.jpeg_quality = q.parse::<u8>().map_err(|_| CliError::Usage(usage()))?;
                if !(1..=100).contains(&args.jpeg_quality) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--logo" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.logo = Some(path.clone());
            }
            "--now" => {
                let Some(now) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.now = Some(now.clone());
            }
            "--style" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.style = Some(path.clone());
            }
            "--taxonomy" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.taxonomy = Some(path.clone());
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
    Ok(())
}

fn write_bytes(bytes: &[u8], out: &str) -> Result<(), CliError> {
    if out == "-" {
        use std::io::Write;
        std::io::stdout().lock().write_all(bytes)?;
    } else {
        std::fs::write(out, bytes)?;
    }
    Ok(())
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> String {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path)
            .with_extension(ext)
            .to_string_lossy()
            .to_string(),
        _ => format!("out.{ext}"),
    }
}

fn parse_now(raw: Option<&str>) -> Result<DateTime<Utc>, CliError> {
    match raw {
        Some(text) => Ok(DateTime::parse_from_rfc3339(text)?.with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn build_renderer(args: &Args) -> Result<RosterRenderer, CliError> {
    let mut renderer = RosterRenderer::new();

    if let Some(path) = args.taxonomy.as_deref() {
        let config: TaxonomyConfig = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        renderer = renderer.with_taxonomy(RankTaxonomy::from_config(config)?);
    }
    if let Some(path) = args.style.as_deref() {
        let style: ChartStyle = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        renderer = renderer.with_style(style);
    }
    if let Some(path) = args.logo.as_deref() {
        renderer = renderer.with_logo(read_logo_asset(std::path::Path::new(path)));
    }
    renderer.svg = SvgRenderOptions {
        diagram_id: args.diagram_id.clone(),
        ..SvgRenderOptions::default()
    };

    Ok(renderer)
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let roster = Roster::from_json_str(&text)?;
    let renderer = build_renderer(&args)?;

    match args.command {
        Command::Layout => {
            let layout = renderer.layout_sync(&roster);
            write_json(&layout, args.pretty)?;
            Ok(())
        }
        Command::Render => {
            let now = parse_now(args.now.as_deref())?;
            let meta = RenderMeta::for_roster(&roster, now);
            let raster_options = RasterOptions {
                scale: args.render_scale,
                background: args.background.clone(),
                jpeg_quality: args.jpeg_quality,
            };

            match args.render_format {
                RenderFormat::Svg => {
                    let svg = renderer.render_svg_sync(&roster, &meta);
                    match args.out.as_deref() {
                        None => print!("{svg}"),
                        Some(path) => std::fs::write(path, svg)?,
                    }
                }
                RenderFormat::Png => {
                    let bytes = renderer.render_png_sync(&roster, &meta, &raster_options)?;
                    let out = args
                        .out
                        .clone()
                        .unwrap_or_else(|| default_raster_out_path(args.input.as_deref(), "png"));
                    write_bytes(&bytes, &out)?;
                }
                RenderFormat::Jpeg => {
                    let bytes = renderer.render_jpeg_sync(&roster, &meta, &raster_options)?;
                    let out = args
                        .out
                        .clone()
                        .unwrap_or_else(|| default_raster_out_path(args.input.as_deref(), "jpg"));
                    write_bytes(&bytes, &out)?;
                }
            }
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
