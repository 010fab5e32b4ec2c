//! Command-line interface for the navscene utility
//!
//! Lays out navigation graph documents, draws them as text and answers
//! hit-test queries.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use crate::colorizer::colorize_output;
use navscene::core::logging::init_logging;
use navscene::scene::{NavDocument, NavScene};
use navscene::{CharacterSet, Point, SceneConfig, Size};

/// Navscene - Lay out and draw navigation graphs
#[derive(Parser)]
#[command(name = "navscene")]
#[command(about = "Lay out navigation graphs and route their actions")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lay out a navigation document and print its geometry as JSON
    Layout {
        /// Input navigation document (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the geometry (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Zoom factor from logical to screen units
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,

        /// Viewport extent as WIDTHxHEIGHT
        #[arg(long, value_parser = parse_size)]
        viewport: Option<Size>,
    },

    /// Draw a navigation document as text
    Render {
        /// Input navigation document (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the drawing (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Character set to use for rendering output
        #[arg(long, value_enum, default_value_t = StyleChoice::Unicode)]
        style: StyleChoice,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Print the action under a screen point
    Hit {
        /// Input navigation document (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Screen x coordinate
        #[arg(long, allow_hyphen_values = true)]
        x: i32,

        /// Screen y coordinate
        #[arg(long, allow_hyphen_values = true)]
        y: i32,

        /// Zoom factor from logical to screen units
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,
    },

    /// Check that every action in a document can be drawn
    Validate {
        /// Input navigation document (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Supported output character sets
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum StyleChoice {
    Ascii,
    Unicode,
}

impl From<StyleChoice> for CharacterSet {
    fn from(value: StyleChoice) -> Self {
        match value {
            StyleChoice::Ascii => CharacterSet::Ascii,
            StyleChoice::Unicode => CharacterSet::Unicode,
        }
    }
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Parse a `WIDTHxHEIGHT` size
pub fn parse_size(value: &str) -> Result<Size, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", value))?;
    let width = width
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid width '{}': {}", width, e))?;
    let height = height
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid height '{}': {}", height, e))?;
    if width < 0 || height < 0 {
        return Err(format!("size must not be negative, got '{}'", value));
    }
    Ok(Size::new(width, height))
}

/// Reject zoom factors that cannot scale a scene
fn check_zoom(zoom: f64) -> Result<()> {
    if !(zoom.is_finite() && zoom > 0.0) {
        bail!("Zoom must be a positive number, got {}", zoom);
    }
    Ok(())
}

/// Main CLI application
pub struct NavsceneApp {
    config: SceneConfig,
}

impl NavsceneApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Create a new application instance with a scene config
    pub fn with_config(config: SceneConfig) -> Self {
        Self { config }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("NAVSCENE_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("NAVSCENE_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Navscene v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Layout {
                input,
                output,
                zoom,
                viewport,
            } => self.layout_command(input, output, zoom, viewport, cli.verbose),
            Commands::Render {
                input,
                output,
                style,
                color,
            } => self.render_command(input, output, style, color, cli.verbose),
            Commands::Hit { input, x, y, zoom } => self.hit_command(input, x, y, zoom, cli.verbose),
            Commands::Validate { input } => self.validate_command(input, cli.verbose),
        }
    }

    /// Parse, build and lay out a document
    pub fn load_scene(&self, content: &str, config: SceneConfig) -> Result<NavScene> {
        let document = NavDocument::from_json(content).context("Failed to parse navigation document")?;
        let mut scene = NavScene::from_document(&document, config)?;
        scene.layout()?;
        Ok(scene)
    }

    /// Handle the layout command
    fn layout_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        zoom: f64,
        viewport: Option<Size>,
        verbose: bool,
    ) -> Result<()> {
        check_zoom(zoom)?;
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let mut config = self.config.clone().with_zoom(zoom);
        if let Some(viewport) = viewport {
            config = config.with_viewport(viewport);
        }

        let scene = self.load_scene(&content, config)?;
        let json = serde_json::to_string_pretty(&scene.geometry())?;
        self.write_output(output, &json)
    }

    /// Handle the render command
    fn render_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        style: StyleChoice,
        color: ColorChoice,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let config = self.config.clone().with_style(style.into());
        let scene = self.load_scene(&content, config)?;
        let ascii = scene.render_ascii();

        if verbose {
            eprintln!("Rendered {} actions", scene.actions().len());
        }

        let final_output = if self.should_colorize(&output, color) {
            colorize_output(&ascii)
        } else {
            ascii
        };
        self.write_output(output, &final_output)
    }

    /// Determine if we should colorize the output based on color choice and output destination
    fn should_colorize(&self, output: &Option<PathBuf>, color: ColorChoice) -> bool {
        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                match output {
                    None => crossterm::tty::IsTty::is_tty(&std::io::stdout()),
                    Some(ref p) if p.to_str() == Some("-") => {
                        crossterm::tty::IsTty::is_tty(&std::io::stdout())
                    }
                    Some(_) => false,
                }
            }
        }
    }

    /// Handle the hit command
    fn hit_command(
        &self,
        input: Option<PathBuf>,
        x: i32,
        y: i32,
        zoom: f64,
        verbose: bool,
    ) -> Result<()> {
        check_zoom(zoom)?;
        let content = self.read_input(input)?;
        let scene = self.load_scene(&content, self.config.clone().with_zoom(zoom))?;
        let point = Point::new(x, y);

        match scene.action_at(point) {
            Some(action) => {
                println!("{}", action);
                Ok(())
            }
            None => {
                if verbose {
                    eprintln!("Checked {} actions", scene.actions().len());
                }
                Err(anyhow!("No action at {}", point))
            }
        }
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let scene = match self.load_scene(&content, self.config.clone()) {
            Ok(scene) => scene,
            Err(e) => {
                println!("✗ Invalid navigation document: {:#}", e);
                return Err(e);
            }
        };

        let report = scene.report();
        if report.is_clean() {
            println!(
                "✓ Valid navigation graph: {} nodes, {} actions",
                scene.graph().node_count(),
                scene.graph().action_count()
            );
            return Ok(());
        }

        for dropped in &report.dropped {
            println!("✗ Action '{}' cannot be drawn: {}", dropped.id, dropped.reason);
        }
        Err(anyhow!("{} action(s) cannot be drawn", report.dropped.len()))
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                if content.is_empty() || content.ends_with('\n') {
                    print!("{}", content);
                } else {
                    println!("{}", content);
                }
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for NavsceneApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    const DOCUMENT: &str = r#"{
        "id": "main",
        "destinations": [
            {"id": "home", "x": 0, "y": 0},
            {"id": "detail", "x": 400, "y": 0}
        ],
        "actions": [{"id": "open", "from": "home", "to": "detail"}]
    }"#;

    fn write_document(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("graph.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_cli_parsing_layout_command() {
        let args = vec![
            "navscene",
            "layout",
            "--input",
            "graph.json",
            "--zoom",
            "2",
            "--viewport",
            "800x600",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Layout {
                input,
                output,
                zoom,
                viewport,
            } => {
                assert_eq!(input.unwrap().to_string_lossy(), "graph.json");
                assert!(output.is_none());
                assert_eq!(zoom, 2.0);
                assert_eq!(viewport, Some(Size::new(800, 600)));
            }
            _ => panic!("Expected Layout command"),
        }
    }

    #[test]
    fn test_cli_parsing_render_command() {
        let args = vec!["navscene", "render", "--style", "ascii", "--color", "never"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Render { style, color, .. } => {
                assert_eq!(style, StyleChoice::Ascii);
                assert_eq!(color, ColorChoice::Never);
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_parsing_hit_negative_coordinates() {
        let args = vec!["navscene", "hit", "--x", "-20", "--y", "15"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Hit { x, y, zoom, .. } => {
                assert_eq!((x, y), (-20, 15));
                assert_eq!(zoom, 1.0);
            }
            _ => panic!("Expected Hit command"),
        }
    }

    #[test]
    fn test_cli_parsing_validate_command() {
        let cli = Cli::try_parse_from(vec!["navscene", "validate"]).unwrap();
        match cli.command {
            Commands::Validate { input } => assert!(input.is_none()),
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = vec![
            "navscene",
            "--verbose",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "validate",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1024x768"), Ok(Size::new(1024, 768)));
        assert_eq!(parse_size("10X20"), Ok(Size::new(10, 20)));
        assert!(parse_size("1024").is_err());
        assert!(parse_size("ax5").is_err());
        assert!(parse_size("-5x5").is_err());
    }

    #[test]
    fn test_read_input_from_file() {
        let app = NavsceneApp::new();
        let dir = tempdir().unwrap();
        let path = write_document(&dir, DOCUMENT);
        assert_eq!(app.read_input(Some(path)).unwrap(), DOCUMENT);
    }

    #[test]
    fn test_read_input_missing_file() {
        let app = NavsceneApp::new();
        let dir = tempdir().unwrap();
        let err = app
            .read_input(Some(dir.path().join("missing.json")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_layout_command_writes_geometry() {
        let app = NavsceneApp::new();
        let dir = tempdir().unwrap();
        let input = write_document(&dir, DOCUMENT);
        let output = dir.path().join("geometry.json");

        app.layout_command(Some(input), Some(output.clone()), 1.0, None, false)
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["nodes"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["actions"][0]["action"], "open");
    }

    #[test]
    fn test_layout_command_rejects_bad_zoom() {
        let app = NavsceneApp::new();
        assert!(app.layout_command(None, None, 0.0, None, false).is_err());
    }

    #[test]
    fn test_render_command_writes_text() {
        let app = NavsceneApp::new();
        let dir = tempdir().unwrap();
        let input = write_document(&dir, DOCUMENT);
        let output = dir.path().join("scene.txt");

        app.render_command(
            Some(input),
            Some(output.clone()),
            StyleChoice::Ascii,
            ColorChoice::Auto,
            false,
        )
        .unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.contains("home"));
        assert!(text.contains('>'));
        // Writing to a file never adds colour codes
        assert!(!text.contains("\x1b["));
    }

    #[test]
    fn test_hit_command() {
        let app = NavsceneApp::new();
        let dir = tempdir().unwrap();
        let input = write_document(&dir, DOCUMENT);

        // Right side midpoint of "home" is where "open" starts
        assert!(app
            .hit_command(Some(input.clone()), 144, 128, 1.0, false)
            .is_ok());
        assert!(app
            .hit_command(Some(input), -5000, -5000, 1.0, false)
            .is_err());
    }

    #[test]
    fn test_hit_command_rejects_bad_zoom() {
        let app = NavsceneApp::new();
        let dir = tempdir().unwrap();
        let input = write_document(&dir, DOCUMENT);

        for zoom in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = app
                .hit_command(Some(input.clone()), 144, 128, zoom, false)
                .unwrap_err();
            assert!(err.to_string().contains("Zoom must be a positive number"));
        }
    }

    #[test]
    fn test_validate_command() {
        let app = NavsceneApp::new();
        let dir = tempdir().unwrap();

        let valid = write_document(&dir, DOCUMENT);
        assert!(app.validate_command(Some(valid), false).is_ok());

        let broken = dir.path().join("broken.json");
        fs::write(
            &broken,
            r#"{"id": "main", "destinations": [{"id": "a"}], "actions": [{"id": "x", "from": "a", "to": "b"}]}"#,
        )
        .unwrap();
        assert!(app.validate_command(Some(broken), false).is_err());

        let garbage = dir.path().join("garbage.json");
        fs::write(&garbage, "not json").unwrap();
        assert!(app.validate_command(Some(garbage), false).is_err());
    }

    #[test]
    fn test_write_output_to_file() {
        let app = NavsceneApp::default();
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        app.write_output(Some(path.clone()), "Test output").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Test output");
    }
}
