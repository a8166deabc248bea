//! Line-oriented scene files.
//!
//! ```text
//! Tela;800;600;100;75;branco
//! Casa
//! Localizacao;50;35
//! Altura;20
//! Largura;30
//! CorParede;vermelho
//! CorPorta;azul
//! CorTelhado;verde
//! Inclinacao;15
//! ```
//!
//! A record keyword starts a shape; attribute lines apply to it until the
//! next keyword. Records that lack a required attribute are skipped.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::color::Rgba;
use crate::shapes::{Fence, House, Shape, Sun, Tree};
use crate::{Error, Result};

/// Values from the `Tela` record; unset fields keep the caller's defaults
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneHeader {
    pub canvas_width: Option<u32>,
    pub canvas_height: Option<u32>,
    pub universe_width: Option<f64>,
    pub universe_height: Option<f64>,
    pub background: Option<Rgba>,
}

/// Result of loading a scene file
#[derive(Debug, Default)]
pub struct LoadedScene {
    pub header: SceneHeader,
    pub shapes: Vec<Box<dyn Shape>>,
    /// Records dropped for missing or invalid attributes
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    House,
    Tree,
    Fence,
    Sun,
}

impl Kind {
    fn from_keyword(key: &str) -> Option<Self> {
        match key {
            "Casa" => Some(Self::House),
            "Arvore" => Some(Self::Tree),
            "Cerca" => Some(Self::Fence),
            "Sol" => Some(Self::Sun),
            _ => None,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Self::House => "Casa",
            Self::Tree => "Arvore",
            Self::Fence => "Cerca",
            Self::Sun => "Sol",
        }
    }
}

/// One shape record and its attribute lines
#[derive(Debug)]
struct Record {
    kind: Kind,
    line: usize,
    attributes: HashMap<String, Vec<String>>,
}

impl Record {
    fn values(&self, key: &str) -> Result<&[String]> {
        self.attributes
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::MissingAttribute {
                shape: self.kind.keyword().to_string(),
                attribute: key.to_string(),
            })
    }

    fn number(&self, key: &str, index: usize) -> Result<f64> {
        let values = self.values(key)?;
        let raw = values.get(index).ok_or_else(|| Error::MissingAttribute {
            shape: self.kind.keyword().to_string(),
            attribute: format!("{key}[{index}]"),
        })?;
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::InvalidAttribute {
                shape: self.kind.keyword().to_string(),
                attribute: key.to_string(),
                value: raw.clone(),
            })
    }

    fn optional_number(&self, key: &str) -> Result<Option<f64>> {
        if self.attributes.contains_key(key) {
            self.number(key, 0).map(Some)
        } else {
            Ok(None)
        }
    }

    fn color(&self, key: &str) -> Result<Rgba> {
        let values = self.values(key)?;
        Ok(values.first().map_or(Rgba::BLACK, |name| Rgba::named(name)))
    }

    fn color_or(&self, key: &str, default: Rgba) -> Rgba {
        self.color(key).unwrap_or(default)
    }

    fn build(&self) -> Result<Box<dyn Shape>> {
        let x = self.number("Localizacao", 0)?;
        let y = self.number("Localizacao", 1)?;
        let height = self.number("Altura", 0)?;
        let width = self.number("Largura", 0)?;

        let mut shape: Box<dyn Shape> = match self.kind {
            Kind::House => Box::new(House::new(
                width,
                height,
                x,
                y,
                self.color("CorParede")?,
                self.color("CorPorta")?,
                self.color("CorTelhado")?,
            )),
            Kind::Tree => Box::new(Tree::new(
                width,
                height,
                x,
                y,
                self.color("CorTronco")?,
                self.color("CorFolhas")?,
                self.color_or("CorFrutos", Rgba::RED),
            )),
            Kind::Fence => {
                let planks = self.color("Cor")?;
                Box::new(Fence::new(width, height, x, y, planks, self.color_or("CorTopo", planks)))
            }
            Kind::Sun => Box::new(Sun::new(
                width,
                height,
                x,
                y,
                self.color_or("Cor", Rgba::YELLOW),
                self.color_or("CorRaios", Rgba::ORANGE),
            )),
        };

        if let Some(degrees) = self.optional_number("Inclinacao")? {
            shape.rotate_figure(degrees);
        }
        Ok(shape)
    }
}

/// Parse a `Tela;cw;ch;uw;uh;color` line. Empty or missing fields stay unset.
fn parse_header(tokens: &[&str], line: usize) -> Result<SceneHeader> {
    let field = |i: usize| tokens.get(i).copied().filter(|t| !t.is_empty());
    let invalid = |i: usize| Error::SceneParse {
        line,
        message: format!("invalid Tela field {:?}", tokens.get(i).copied().unwrap_or_default()),
    };

    let size = |i: usize| -> Result<Option<u32>> {
        field(i)
            .map(|t| t.parse::<u32>().ok().filter(|v| *v > 0).ok_or_else(|| invalid(i)))
            .transpose()
    };
    let extent = |i: usize| -> Result<Option<f64>> {
        field(i)
            .map(|t| {
                t.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite() && *v > 0.0)
                    .ok_or_else(|| invalid(i))
            })
            .transpose()
    };

    Ok(SceneHeader {
        canvas_width: size(1)?,
        canvas_height: size(2)?,
        universe_width: extent(3)?,
        universe_height: extent(4)?,
        background: field(5).map(Rgba::named),
    })
}

/// Parse scene text. Malformed records are logged and skipped; parsing
/// itself never fails.
pub fn parse_scene(text: &str) -> LoadedScene {
    let mut loaded = LoadedScene::default();
    let mut current: Option<Record> = None;

    let finish = |record: Option<Record>, loaded: &mut LoadedScene| {
        let Some(record) = record else {
            return;
        };
        match record.build() {
            Ok(shape) => loaded.shapes.push(shape),
            Err(e) => {
                log::warn!("Skipping shape record at line {}: {}", record.line, e);
                loaded.skipped += 1;
            }
        }
    };

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_suffix(';').unwrap_or(line);
        let tokens: Vec<&str> = line.split(';').map(str::trim).collect();
        let key = tokens[0];

        if let Some(kind) = Kind::from_keyword(key) {
            finish(current.take(), &mut loaded);
            current = Some(Record {
                kind,
                line: line_no,
                attributes: HashMap::new(),
            });
        } else if key == "Tela" {
            finish(current.take(), &mut loaded);
            match parse_header(&tokens, line_no) {
                Ok(header) => loaded.header = header,
                Err(e) => log::warn!("Ignoring canvas record: {}", e),
            }
        } else if let Some(record) = current.as_mut() {
            if tokens.len() > 1 {
                let values = tokens[1..].iter().map(|t| (*t).to_string()).collect();
                record.attributes.insert(key.to_string(), values);
            } else {
                log::debug!("Line {}: attribute {:?} has no value", line_no, key);
            }
        } else {
            log::debug!("Line {}: {:?} outside any record", line_no, key);
        }
    }
    finish(current.take(), &mut loaded);

    log::info!(
        "Parsed scene: {} shapes, {} skipped",
        loaded.shapes.len(),
        loaded.skipped
    );
    loaded
}

/// Read and parse a scene file
pub fn load_scene(path: impl AsRef<Path>) -> Result<LoadedScene> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    log::info!("Loading scene from {}", path.display());
    Ok(parse_scene(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# sample scene
Tela;800;600;100;75;branco

Casa
Localizacao;50;35
Altura;20
Largura;30
CorParede;vermelho
CorPorta;azul
CorTelhado;verde;

Arvore;
Localizacao;10;5
Altura;30
Largura;20
CorTronco;marrom
CorFolhas;verde

Cerca
Localizacao;60;2
Altura;12
Largura;25
Cor;marrom
Inclinacao;90

Sol
Localizacao;80;55
Altura;14
Largura;14
";

    #[test]
    fn test_header_parsed() {
        let loaded = parse_scene(SAMPLE);
        assert_eq!(loaded.header.canvas_width, Some(800));
        assert_eq!(loaded.header.canvas_height, Some(600));
        assert_eq!(loaded.header.universe_width, Some(100.0));
        assert_eq!(loaded.header.universe_height, Some(75.0));
        assert_eq!(loaded.header.background, Some(Rgba::WHITE));
    }

    #[test]
    fn test_all_shapes_built_in_order() {
        let loaded = parse_scene(SAMPLE);
        let kinds: Vec<_> = loaded.shapes.iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec!["house", "tree", "fence", "sun"]);
        assert_eq!(loaded.skipped, 0);
    }

    #[test]
    fn test_colors_and_defaults() {
        let loaded = parse_scene(SAMPLE);
        assert_eq!(loaded.shapes[0].colors(), vec![Rgba::RED, Rgba::BLUE, Rgba::GREEN]);
        // Fruit defaults to red
        assert_eq!(loaded.shapes[1].colors()[2], Rgba::RED);
        // Fence caps default to the plank color
        let fence = loaded.shapes[2].colors();
        assert_eq!(fence[0], fence[1]);
        assert_eq!(loaded.shapes[3].colors(), vec![Rgba::YELLOW, Rgba::ORANGE]);
    }

    #[test]
    fn test_inclination_rotates() {
        let loaded = parse_scene(SAMPLE);
        let rotation = loaded.shapes[2].rotation();
        assert!((rotation - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(loaded.shapes[0].rotation(), 0.0);
    }

    #[test]
    fn test_missing_attribute_skips_only_that_record() {
        let text = "Casa\nLocalizacao;1;1\nLargura;10\nCorParede;red\nCorPorta;red\nCorTelhado;red\n\
                    Sol\nLocalizacao;5;5\nAltura;4\nLargura;4\n";
        let loaded = parse_scene(text);
        assert_eq!(loaded.shapes.len(), 1);
        assert_eq!(loaded.shapes[0].kind(), "sun");
        assert_eq!(loaded.skipped, 1);
    }

    #[test]
    fn test_invalid_number_skips_record() {
        let text = "Sol\nLocalizacao;abc;5\nAltura;4\nLargura;4\n";
        let loaded = parse_scene(text);
        assert!(loaded.shapes.is_empty());
        assert_eq!(loaded.skipped, 1);
    }

    #[test]
    fn test_unknown_keys_and_stray_lines_ignored() {
        let text = "Orphan;1\nSol\nLocalizacao;5;5\nAltura;4\nLargura;4\nBrilho;9\n";
        let loaded = parse_scene(text);
        assert_eq!(loaded.shapes.len(), 1);
    }

    #[test]
    fn test_partial_header_keeps_defaults() {
        let loaded = parse_scene("Tela;;;200\n");
        assert_eq!(loaded.header.canvas_width, None);
        assert_eq!(loaded.header.universe_width, Some(200.0));
        assert_eq!(loaded.header.background, None);

        let loaded = parse_scene("Tela;0;600\n");
        assert_eq!(loaded.header, SceneHeader::default());
    }

    #[test]
    fn test_record_errors() {
        let record = Record {
            kind: Kind::House,
            line: 1,
            attributes: HashMap::from([("Altura".to_string(), vec!["x".to_string()])]),
        };
        assert!(matches!(record.number("Largura", 0), Err(Error::MissingAttribute { .. })));
        assert!(matches!(record.number("Altura", 0), Err(Error::InvalidAttribute { .. })));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        assert!(matches!(
            load_scene("/definitely/not/here.txt"),
            Err(Error::Io(_))
        ));
    }
}
