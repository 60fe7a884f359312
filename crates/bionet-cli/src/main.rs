use bionet_graph::alg;
use bionet_io::{read_graph_file, write_graph_file};
use bionet_layout::{Acceleration, LayoutEngine, LayoutOptions, Point};
use bionet_render::{SvgOptions, render_svg};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Import(bionet_io::Error),
    Render(bionet_render::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Import(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<bionet_io::Error> for CliError {
    fn from(value: bionet_io::Error) -> Self {
        Self::Import(value)
    }
}

impl From<bionet_render::Error> for CliError {
    fn from(value: bionet_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Stats,
    Convert,
    Layout,
    Render,
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
    out: Option<String>,
    pretty: bool,
    acceleration: Acceleration,
    seed: Option<u64>,
    max_steps: u32,
    render_format: RenderFormat,
    render_scale: f32,
    viewport_width: f64,
    viewport_height: f64,
    background: Option<String>,
}

#[derive(Serialize)]
struct StatsOut {
    vertices: usize,
    edges: usize,
    connected_components: usize,
    degree_distribution: Vec<usize>,
}

#[derive(Serialize)]
struct LayoutOut {
    width: f64,
    height: f64,
    positions: Vec<Point>,
}

fn usage() -> &'static str {
    "bionet-cli\n\
\n\
USAGE:\n\
  bionet-cli stats [--pretty] <path>\n\
  bionet-cli convert --out <path> <path>\n\
  bionet-cli layout [--accel none|grid] [--seed <n>] [--max-steps <n>] [--pretty] <path>\n\
  bionet-cli render [--format svg|png|jpg] [--width <n>] [--height <n>] [--accel none|grid]\n\
                    [--seed <n>] [--max-steps <n>] [--scale <n>] [--background <css-color>]\n\
                    [--out <path>] <path>\n\
\n\
NOTES:\n\
  - The graph format is chosen by file suffix: .txt (edge list), .gexf, .gw (LEDA).\n\
  - stats and layout print JSON to stdout.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG output defaults to writing next to the input file.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Stats,
        max_steps: 2000,
        render_scale: 1.0,
        viewport_width: 800.0,
        viewport_height: 600.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "stats" => args.command = Command::Stats,
            "convert" => args.command = Command::Convert,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--accel" => {
                let Some(kind) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.acceleration = kind
                    .parse::<Acceleration>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--max-steps" => {
                let Some(steps) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.max_steps = steps.parse::<u32>().map_err(|_| CliError::Usage(usage()))?;
            }
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
            "--width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.viewport_width = w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.viewport_height = h.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
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

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
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

fn write_bytes(bytes: &[u8], out: &str) -> Result<(), CliError> {
    if out == "-" {
        use std::io::Write;
        std::io::stdout().lock().write_all(bytes)?;
    } else {
        std::fs::write(out, bytes)?;
    }
    Ok(())
}

fn default_raster_out_path(input: &str, ext: &str) -> PathBuf {
    PathBuf::from(input).with_extension(ext)
}

fn parse_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0)),
        "white" => return Some(tiny_skia::Color::from_rgba8(255, 255, 255, 255)),
        "black" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 255)),
        _ => {}
    }

    let hex = s.strip_prefix('#')?;
    fn hex2(b: &[u8]) -> Option<u8> {
        let hi = (*b.first()? as char).to_digit(16)? as u8;
        let lo = (*b.get(1)? as char).to_digit(16)? as u8;
        Some((hi << 4) | lo)
    }
    fn hex1(c: u8) -> Option<u8> {
        let v = (c as char).to_digit(16)? as u8;
        Some((v << 4) | v)
    }

    let bytes = hex.as_bytes();
    match bytes.len() {
        3 => Some(tiny_skia::Color::from_rgba8(
            hex1(bytes[0])?,
            hex1(bytes[1])?,
            hex1(bytes[2])?,
            255,
        )),
        6 => Some(tiny_skia::Color::from_rgba8(
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
            255,
        )),
        8 => Some(tiny_skia::Color::from_rgba8(
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
            hex2(&bytes[6..8])?,
        )),
        _ => None,
    }
}

fn render_svg_to_pixmap(
    svg: &str,
    scale: f32,
    background: Option<&str>,
) -> Result<tiny_skia::Pixmap, CliError> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|_| CliError::Usage("failed to parse SVG for raster rendering"))?;

    let size = tree.size();
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(CliError::Usage(
        "failed to allocate pixmap for raster rendering",
    ))?;

    if let Some(bg) = background {
        if let Some(color) = parse_color(bg) {
            pixmap.fill(color);
        }
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

fn render_svg_to_png(svg: &str, scale: f32) -> Result<Vec<u8>, CliError> {
    let pixmap = render_svg_to_pixmap(svg, scale, None)?;
    pixmap
        .encode_png()
        .map_err(|_| CliError::Usage("failed to encode PNG"))
}

fn render_svg_to_jpeg(
    svg: &str,
    scale: f32,
    background: Option<&str>,
) -> Result<Vec<u8>, CliError> {
    let bg = background.unwrap_or("white");
    let Some(color) = parse_color(bg) else {
        return Err(CliError::Usage(
            "invalid --background color for JPG rendering",
        ));
    };
    if color.alpha() != 1.0 {
        return Err(CliError::Usage(
            "JPG rendering requires an opaque --background (e.g. white)",
        ));
    }

    let pixmap = render_svg_to_pixmap(svg, scale, Some(bg))?;
    let (w, h) = (pixmap.width(), pixmap.height());

    // The pixmap is RGBA8; with a solid background the alpha channel is
    // always 255 and can be dropped.
    let rgba = pixmap.data();
    let mut rgb = vec![0u8; (w as usize) * (h as usize) * 3];
    for (src, dst) in rgba.chunks_exact(4).zip(rgb.chunks_exact_mut(3)) {
        dst[0] = src[0];
        dst[1] = src[1];
        dst[2] = src[2];
    }

    let mut out = Vec::new();
    let mut enc = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, 90);
    enc.encode(&rgb, w, h, image::ExtendedColorType::Rgb8)
        .map_err(|_| CliError::Usage("failed to encode JPG"))?;
    Ok(out)
}

fn layout_engine(args: &Args) -> LayoutEngine {
    LayoutEngine::new(LayoutOptions {
        acceleration: args.acceleration,
        seed: args.seed,
        ..Default::default()
    })
}

fn run(args: Args) -> Result<(), CliError> {
    let input = args.input.as_deref().ok_or(CliError::Usage(usage()))?;
    let graph = read_graph_file(Path::new(input))?;

    match args.command {
        Command::Stats => {
            let stats = StatsOut {
                vertices: graph.vertex_count(),
                edges: graph.edge_count(),
                connected_components: alg::count_components(&graph),
                degree_distribution: graph.degree_distribution(),
            };
            write_json(&stats, args.pretty)
        }
        Command::Convert => {
            let out = args.out.as_deref().ok_or(CliError::Usage(usage()))?;
            write_graph_file(&graph, Path::new(out))?;
            Ok(())
        }
        Command::Layout => {
            let mut engine = layout_engine(&args);
            engine.run(&graph, args.max_steps);
            let (width, height) = engine.extents();
            write_json(
                &LayoutOut {
                    width,
                    height,
                    positions: engine.positions(),
                },
                args.pretty,
            )
        }
        Command::Render => {
            let mut engine = layout_engine(&args);
            engine.run(&graph, args.max_steps);

            let svg_options = SvgOptions {
                width: args.viewport_width,
                height: args.viewport_height,
                background: args.background.clone(),
                ..Default::default()
            };
            let svg = render_svg(
                &graph,
                &engine.positions(),
                engine.extents(),
                &svg_options,
            )?;

            match args.render_format {
                RenderFormat::Svg => write_text(&svg, args.out.as_deref()),
                RenderFormat::Png => {
                    let bytes = render_svg_to_png(&svg, args.render_scale)?;
                    let out = args.out.clone().unwrap_or_else(|| {
                        default_raster_out_path(input, "png")
                            .to_string_lossy()
                            .to_string()
                    });
                    write_bytes(&bytes, &out)
                }
                RenderFormat::Jpeg => {
                    let bytes = render_svg_to_jpeg(
                        &svg,
                        args.render_scale,
                        args.background.as_deref(),
                    )?;
                    let out = args.out.clone().unwrap_or_else(|| {
                        default_raster_out_path(input, "jpg")
                            .to_string_lossy()
                            .to_string()
                    });
                    write_bytes(&bytes, &out)
                }
            }
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
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
