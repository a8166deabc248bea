//! Settings file and command-line flags

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::coords::RenderContext;
use crate::raster::CurveFlattening;
use crate::scene::SceneHeader;
use crate::surface::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::Result;

pub const DEFAULT_UNIVERSE_WIDTH: f64 = 100.0;
pub const DEFAULT_UNIVERSE_HEIGHT: f64 = 75.0;

/// Everything tunable, loaded from JSON. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub universe_width: f64,
    pub universe_height: f64,
    /// Color name, resolved through the named color table
    pub background: String,
    pub anti_aliased: bool,
    pub eraser_radius: i32,
    /// Degrees per rotate key press
    pub rotation_step: f64,
    /// Factor per scale key press
    pub scale_step: f64,
    /// Universe units per arrow key press
    pub translation_step: f64,
    pub vsync: bool,
    pub scene: Option<PathBuf>,
    pub curve: CurveFlattening,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_WIDTH,
            canvas_height: DEFAULT_HEIGHT,
            universe_width: DEFAULT_UNIVERSE_WIDTH,
            universe_height: DEFAULT_UNIVERSE_HEIGHT,
            background: "white".to_string(),
            anti_aliased: false,
            eraser_radius: 8,
            rotation_step: 5.0,
            scale_step: 1.1,
            translation_step: 1.0,
            vsync: true,
            scene: None,
            curve: CurveFlattening::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn background_color(&self) -> Rgba {
        Rgba::named(&self.background)
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(
            self.canvas_width,
            self.canvas_height,
            self.universe_width,
            self.universe_height,
        )
        .with_curve(self.curve)
    }

    /// Take the sizes a scene file asks for. Returns the background it
    /// names, if any.
    pub fn apply_header(&mut self, header: &SceneHeader) -> Option<Rgba> {
        if let Some(w) = header.canvas_width {
            self.canvas_width = w;
        }
        if let Some(h) = header.canvas_height {
            self.canvas_height = h;
        }
        self.apply_universe(header)
    }

    /// Like `apply_header`, but the canvas keeps its current size. Used once
    /// the window exists and the canvas follows the window instead.
    pub fn apply_universe(&mut self, header: &SceneHeader) -> Option<Rgba> {
        if let Some(w) = header.universe_width {
            self.universe_width = w;
        }
        if let Some(h) = header.universe_height {
            self.universe_height = h;
        }
        header.background
    }
}

// ============================================================================
// Command line
// ============================================================================

/// Flags given on the command line; each overrides the settings file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub scene: Option<PathBuf>,
    pub resolution: Option<(u32, u32)>,
    pub no_vsync: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parse flags, skipping the program name. Unknown flags and bad
    /// values are ignored with a warning.
    pub fn parse(args: &[String]) -> Self {
        let mut cli = Self::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--no-vsync" => cli.no_vsync = true,
                "--help" | "-h" => cli.help = true,
                "--config" | "-c" => {
                    if i + 1 < args.len() {
                        cli.config = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                },
                "--scene" | "-s" => {
                    if i + 1 < args.len() {
                        cli.scene = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                },
                "--resolution" | "-r" => {
                    if i + 1 < args.len() {
                        cli.resolution = parse_resolution(&args[i + 1]);
                        if cli.resolution.is_none() {
                            log::warn!("Ignoring resolution {:?}, expected WxH", args[i + 1]);
                        }
                        i += 1;
                    }
                },
                other => log::warn!("Unknown argument {:?}", other),
            }
            i += 1;
        }

        cli
    }

    /// Fold the flags into `settings`
    pub fn apply(&self, settings: &mut Settings) {
        if let Some((w, h)) = self.resolution {
            settings.canvas_width = w;
            settings.canvas_height = h;
        }
        if let Some(scene) = &self.scene {
            settings.scene = Some(scene.clone());
        }
        if self.no_vsync {
            settings.vsync = false;
        }
    }

    pub fn usage() -> String {
        format!(
            "Usage: brushy [OPTIONS]

Options:
  --config PATH, -c PATH      Load settings from a JSON file
  --scene PATH, -s PATH       Load shapes from a scene file
  --resolution WxH, -r WxH    Canvas size (default: {}x{})
  --no-vsync                  Disable VSync
  --help, -h                  Show this help message",
            DEFAULT_WIDTH, DEFAULT_HEIGHT
        )
    }
}

/// Parse `WxH` into a non-zero size
pub fn parse_resolution(text: &str) -> Option<(u32, u32)> {
    let (w, h) = text.split_once(['x', 'X'])?;
    let w = w.trim().parse::<u32>().ok()?;
    let h = h.trim().parse::<u32>().ok()?;
    (w > 0 && h > 0).then_some((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("brushy")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_defaults_match_curve_constants() {
        let settings = Settings::default();
        assert_eq!(settings.curve.reference_width, 895.0);
        assert_eq!(settings.curve.max_depth, 16);
        assert_eq!(settings.background_color(), Rgba::WHITE);
        assert_eq!((settings.canvas_width, settings.canvas_height), (800, 600));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "canvas_width": 1024, "curve": { "base_threshold": 12.0 } }"#;
        let settings: Settings = serde_json::from_str(json).unwrap_or_default();
        assert_eq!(settings.canvas_width, 1024);
        assert_eq!(settings.canvas_height, 600);
        assert_eq!(settings.curve.base_threshold, 12.0);
        assert_eq!(settings.curve.min_threshold, 3.0);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let path = std::env::temp_dir().join(format!("brushy-settings-{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.rotation_step = 15.0;
        settings.background = "preto".to_string();
        assert!(settings.save(&path).is_ok());
        let loaded = Settings::load(&path);
        let _ = fs::remove_file(&path);
        let loaded = loaded.unwrap_or_default();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.background_color(), Rgba::BLACK);
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let path = std::env::temp_dir().join(format!("brushy-bad-{}.json", std::process::id()));
        assert!(fs::write(&path, "{ not json").is_ok());
        let result = Settings::load(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(crate::Error::Json(_))));
    }

    #[test]
    fn test_parse_resolution() {
        assert_eq!(parse_resolution("1920x1080"), Some((1920, 1080)));
        assert_eq!(parse_resolution("640X480"), Some((640, 480)));
        assert_eq!(parse_resolution("0x480"), None);
        assert_eq!(parse_resolution("wide"), None);
    }

    #[test]
    fn test_cli_flags_override_settings() {
        let cli = CliArgs::parse(&args(&["--resolution", "1024x768", "--scene", "a.txt", "--no-vsync"]));
        let mut settings = Settings::default();
        cli.apply(&mut settings);
        assert_eq!((settings.canvas_width, settings.canvas_height), (1024, 768));
        assert_eq!(settings.scene, Some(PathBuf::from("a.txt")));
        assert!(!settings.vsync);
    }

    #[test]
    fn test_cli_help_and_config() {
        let cli = CliArgs::parse(&args(&["-c", "cfg.json", "--help", "--bogus"]));
        assert!(cli.help);
        assert_eq!(cli.config, Some(PathBuf::from("cfg.json")));
        assert!(CliArgs::usage().contains("--resolution"));
    }

    #[test]
    fn test_apply_header() {
        let mut settings = Settings::default();
        let header = SceneHeader {
            canvas_width: Some(640),
            universe_height: Some(50.0),
            background: Some(Rgba::BLUE),
            ..SceneHeader::default()
        };
        assert_eq!(settings.apply_header(&header), Some(Rgba::BLUE));
        assert_eq!(settings.canvas_width, 640);
        assert_eq!(settings.canvas_height, 600);
        assert_eq!(settings.universe_height, 50.0);
        let ctx = settings.render_context();
        assert_eq!(ctx.canvas_width, 640);
    }

    #[test]
    fn test_apply_universe_keeps_canvas_size() {
        let mut settings = Settings::default();
        let header = SceneHeader {
            canvas_width: Some(320),
            canvas_height: Some(240),
            universe_width: Some(200.0),
            background: Some(Rgba::GREEN),
            ..SceneHeader::default()
        };
        assert_eq!(settings.apply_universe(&header), Some(Rgba::GREEN));
        assert_eq!((settings.canvas_width, settings.canvas_height), (800, 600));
        assert_eq!(settings.universe_width, 200.0);
        assert_eq!(settings.universe_height, 75.0);
    }
}
