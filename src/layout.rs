use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::card::{Faction, Field, FontFace, Side};
use crate::fit::{FitOptions, LONG_BREAK_SPACING};

pub const DEFAULT_START_FONT_SIZE: u32 = 14;
pub const DEFAULT_MIN_FONT_SIZE: u32 = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read layout config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse layout config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown card kind '{0}'")]
    UnknownKind(String),
    #[error("unknown faction '{0}'")]
    UnknownFaction(String),
    #[error("unknown font face '{0}'")]
    UnknownFace(String),
    #[error("invalid layout config: {0}")]
    Invalid(String),
}

/// Card categories with their own text box placement.
///
/// Identities differ per side, so they are split in two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardKind {
    Event,
    Hardware,
    Resource,
    Program,
    RunnerIdentity,
    CorpIdentity,
    Agenda,
    Asset,
    Upgrade,
    Ice,
    Operation,
}

impl CardKind {
    pub const ALL: [CardKind; 11] = [
        CardKind::Event,
        CardKind::Hardware,
        CardKind::Resource,
        CardKind::Program,
        CardKind::RunnerIdentity,
        CardKind::CorpIdentity,
        CardKind::Agenda,
        CardKind::Asset,
        CardKind::Upgrade,
        CardKind::Ice,
        CardKind::Operation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CardKind::Event => "event",
            CardKind::Hardware => "hardware",
            CardKind::Resource => "resource",
            CardKind::Program => "program",
            CardKind::RunnerIdentity => "runner-identity",
            CardKind::CorpIdentity => "corp-identity",
            CardKind::Agenda => "agenda",
            CardKind::Asset => "asset",
            CardKind::Upgrade => "upgrade",
            CardKind::Ice => "ice",
            CardKind::Operation => "operation",
        }
    }

    /// Card type as printed in card data and template directory names.
    pub fn card_type(&self) -> &'static str {
        match self {
            CardKind::RunnerIdentity | CardKind::CorpIdentity => "identity",
            other => other.name(),
        }
    }

    /// Resolve a card's `type` and faction to a kind. Identities split by side.
    pub fn for_card(card_type: &str, faction: Faction) -> Result<Self, ConfigError> {
        if card_type.trim().eq_ignore_ascii_case("identity") {
            return Ok(match faction.side() {
                Side::Runner => CardKind::RunnerIdentity,
                Side::Corp => CardKind::CorpIdentity,
            });
        }
        card_type.parse()
    }

    /// Text box measured on the stock card frames.
    pub fn default_text_box(&self) -> TextBox {
        let (x, y, width, height) = match self {
            CardKind::Event => (36, 305, 245, 100),
            CardKind::Hardware => (48, 291, 240, 106),
            CardKind::Resource => (22, 246, 231, 144),
            CardKind::Program => (36, 266, 243, 124),
            CardKind::RunnerIdentity => (45, 352, 200, 80),
            CardKind::CorpIdentity => (58, 358, 237, 75),
            CardKind::Agenda => (36, 307, 242, 90),
            CardKind::Asset => (35, 285, 225, 104),
            CardKind::Upgrade => (45, 289, 223, 106),
            CardKind::Ice => (68, 73, 202, 150),
            CardKind::Operation => (40, 292, 243, 103),
        };
        TextBox {
            x,
            y,
            width,
            height,
        }
    }

    /// Anchors of the single-line fields printed on this frame, in drawing order.
    pub fn field_anchors(&self) -> &'static [FieldAnchor] {
        match self {
            CardKind::Event => EVENT_FIELDS,
            CardKind::Hardware => HARDWARE_FIELDS,
            CardKind::Resource => RESOURCE_FIELDS,
            CardKind::Program => PROGRAM_FIELDS,
            CardKind::RunnerIdentity => RUNNER_IDENTITY_FIELDS,
            CardKind::CorpIdentity => CORP_IDENTITY_FIELDS,
            CardKind::Agenda => AGENDA_FIELDS,
            CardKind::Asset => ASSET_FIELDS,
            CardKind::Upgrade => UPGRADE_FIELDS,
            CardKind::Ice => ICE_FIELDS,
            CardKind::Operation => OPERATION_FIELDS,
        }
    }

    pub fn field_anchor(&self, field: Field) -> Option<FieldAnchor> {
        self.field_anchors()
            .iter()
            .find(|anchor| anchor.field == field)
            .copied()
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CardKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownKind(s.to_string()))
    }
}

/// Top-left corner of a single-line field.
///
/// Vertical fields read bottom to top; the anchor is the top-left corner of the
/// rotated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldAnchor {
    pub field: Field,
    pub x: i32,
    pub y: i32,
    pub vertical: bool,
}

const fn at(field: Field, x: i32, y: i32) -> FieldAnchor {
    FieldAnchor {
        field,
        x,
        y,
        vertical: false,
    }
}

const fn up(field: Field, x: i32, y: i32) -> FieldAnchor {
    FieldAnchor {
        field,
        x,
        y,
        vertical: true,
    }
}

const EVENT_FIELDS: &[FieldAnchor] = &[
    at(Field::Title, 68, 18),
    at(Field::Subtype, 83, 280),
    at(Field::Cost, 27, 32),
];
const HARDWARE_FIELDS: &[FieldAnchor] = &[
    at(Field::Title, 64, 229),
    at(Field::Subtype, 126, 266),
    at(Field::Cost, 29, 34),
];
const RESOURCE_FIELDS: &[FieldAnchor] = &[
    at(Field::Title, 75, 17),
    at(Field::Subtype, 100, 219),
    at(Field::Cost, 28, 32),
];
const PROGRAM_FIELDS: &[FieldAnchor] = &[
    at(Field::Title, 18, 208),
    at(Field::Subtype, 100, 241),
    at(Field::Cost, 26, 30),
    at(Field::MemoryCost, 79, 19),
    at(Field::Strength, 20, 405),
];
const RUNNER_IDENTITY_FIELDS: &[FieldAnchor] = &[
    at(Field::Title, 104, 18),
    at(Field::Subtitle, 145, 41),
    at(Field::Subtype, 115, 333),
    at(Field::BaseLink, 20, 22),
    at(Field::MinimumDeckSize, 268, 390),
    at(Field::InfluenceLimit, 268, 413),
];
const CORP_IDENTITY_FIELDS: &[FieldAnchor] = &[
    at(Field::Title, 59, 28),
    at(Field::Subtitle, 28, 55),
    at(Field::Subtype, 106, 331),
    at(Field::MinimumDeckSize, 20, 388),
    at(Field::InfluenceLimit, 20, 413),
];
const AGENDA_FIELDS: &[FieldAnchor] = &[
    at(Field::Title, 27, 28),
    at(Field::Subtype, 94, 286),
    at(Field::AdvancementRequirement, 271, 18),
    at(Field::AgendaPoints, 26, 226),
];
const ASSET_FIELDS: &[FieldAnchor] = &[
    at(Field::Title, 34, 227),
    at(Field::Subtype, 89, 258),
    at(Field::Cost, 29, 29),
    at(Field::TrashCost, 273, 372),
];
const UPGRADE_FIELDS: &[FieldAnchor] = &[
    at(Field::Title, 37, 232),
    at(Field::Subtype, 110, 262),
    at(Field::Cost, 29, 35),
    at(Field::TrashCost, 276, 377),
];
const ICE_FIELDS: &[FieldAnchor] = &[
    at(Field::Title, 76, 21),
    up(Field::Subtype, 21, 83),
    up(Field::Strength, 7, 402),
    at(Field::Cost, 28, 28),
];
const OPERATION_FIELDS: &[FieldAnchor] = &[
    at(Field::Title, 83, 20),
    at(Field::Subtype, 114, 264),
    at(Field::Cost, 30, 33),
];

/// Placement and pixel budget of a card's rules text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// On-disk shape of a layout file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LayoutFile {
    start_font_size: Option<u32>,
    min_font_size: Option<u32>,
    long_break_spacing: Option<f32>,
    text_font: Option<PathBuf>,
    fonts: BTreeMap<String, PathBuf>,
    boxes: BTreeMap<String, TextBox>,
}

/// Text box table plus font-size range shared by every card kind.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub start_font_size: u32,
    pub min_font_size: u32,
    pub long_break_spacing: f32,
    /// Font used for rules text, if configured.
    pub text_font: Option<PathBuf>,
    fonts: BTreeMap<FontFace, PathBuf>,
    boxes: BTreeMap<CardKind, TextBox>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            start_font_size: DEFAULT_START_FONT_SIZE,
            min_font_size: DEFAULT_MIN_FONT_SIZE,
            long_break_spacing: LONG_BREAK_SPACING,
            text_font: None,
            fonts: BTreeMap::new(),
            boxes: CardKind::ALL
                .into_iter()
                .map(|kind| (kind, kind.default_text_box()))
                .collect(),
        }
    }
}

impl LayoutConfig {
    /// Load a TOML layout file. Relative font paths resolve against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&contents)?;
        if let Some(dir) = path.parent() {
            for font in config.text_font.iter_mut().chain(config.fonts.values_mut()) {
                if font.is_relative() {
                    *font = dir.join(&*font);
                }
            }
        }
        log::debug!("loaded layout config from {}", path.display());
        Ok(config)
    }

    /// Parse a layout file, filling missing keys from the built-in defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: LayoutFile = toml::from_str(contents)?;
        let mut config = Self::default();
        if let Some(size) = file.start_font_size {
            config.start_font_size = size;
        }
        if let Some(size) = file.min_font_size {
            config.min_font_size = size;
        }
        if let Some(spacing) = file.long_break_spacing {
            config.long_break_spacing = spacing;
        }
        config.text_font = file.text_font;
        for (name, font) in file.fonts {
            let face: FontFace = name.parse()?;
            if face == FontFace::Text {
                config.text_font = Some(font);
            } else {
                config.fonts.insert(face, font);
            }
        }
        for (name, text_box) in file.boxes {
            let kind: CardKind = name.parse()?;
            config.boxes.insert(kind, text_box);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_font_size == 0 {
            return Err(ConfigError::Invalid("min_font_size must be at least 1".into()));
        }
        if self.start_font_size < self.min_font_size {
            return Err(ConfigError::Invalid(format!(
                "start_font_size {} is below min_font_size {}",
                self.start_font_size, self.min_font_size
            )));
        }
        if !self.long_break_spacing.is_finite() || self.long_break_spacing < 0.0 {
            return Err(ConfigError::Invalid(
                "long_break_spacing must be a non-negative number".into(),
            ));
        }
        for (kind, text_box) in &self.boxes {
            if text_box.width == 0 || text_box.height == 0 {
                return Err(ConfigError::Invalid(format!(
                    "text box for {kind} must have a non-zero width and height"
                )));
            }
        }
        Ok(())
    }

    pub fn text_box(&self, kind: CardKind) -> TextBox {
        self.boxes
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_text_box())
    }

    /// Iterate the text box table in card-kind order.
    pub fn text_boxes(&self) -> impl Iterator<Item = (CardKind, TextBox)> + '_ {
        self.boxes.iter().map(|(kind, text_box)| (*kind, *text_box))
    }

    /// Font file configured for a face. Rules text uses `text_font`.
    pub fn font_path(&self, face: FontFace) -> Option<&Path> {
        match face {
            FontFace::Text => self.text_font.as_deref(),
            face => self.fonts.get(&face).map(PathBuf::as_path),
        }
    }

    pub fn fit_options(&self, kind: CardKind) -> FitOptions {
        let text_box = self.text_box(kind);
        FitOptions::new(
            text_box.width,
            text_box.height,
            self.start_font_size,
            self.min_font_size,
        )
        .with_long_break_spacing(self.long_break_spacing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_cover_every_kind() {
        let config = LayoutConfig::default();
        assert_eq!(config.text_boxes().count(), CardKind::ALL.len());
        assert_eq!(
            config.text_box(CardKind::Ice),
            TextBox {
                x: 68,
                y: 73,
                width: 202,
                height: 150
            }
        );
        let options = config.fit_options(CardKind::Event);
        assert_eq!(options, FitOptions::new(245, 100, 14, 8));
    }

    #[test]
    fn file_overrides_defaults() {
        let config = LayoutConfig::from_toml_str(
            r#"
            min_font_size = 7
            long_break_spacing = 0.75
            text_font = "fonts/minionNR.otf"

            [boxes.agenda]
            x = 30
            y = 300
            width = 250
            height = 95
            "#,
        )
        .unwrap();
        assert_eq!(config.start_font_size, 14);
        assert_eq!(config.min_font_size, 7);
        assert_eq!(config.text_font, Some(PathBuf::from("fonts/minionNR.otf")));
        assert_eq!(config.text_box(CardKind::Agenda).height, 95);
        assert_eq!(config.text_box(CardKind::Asset), CardKind::Asset.default_text_box());
        assert_eq!(config.fit_options(CardKind::Agenda).long_break_spacing, 0.75);
    }

    #[test]
    fn rejects_bad_ranges() {
        let err = LayoutConfig::from_toml_str("start_font_size = 6").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = LayoutConfig::from_toml_str("min_font_size = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = LayoutConfig::from_toml_str(
            "[boxes.ice]\nx = 0\ny = 0\nwidth = 0\nheight = 10",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_kinds_and_keys() {
        let err = LayoutConfig::from_toml_str(
            "[boxes.console]\nx = 0\ny = 0\nwidth = 10\nheight = 10",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKind(name) if name == "console"));

        let err = LayoutConfig::from_toml_str("font_size = 12").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reads_face_fonts() {
        let config = LayoutConfig::from_toml_str(
            r#"
            [fonts]
            title = "fonts/Trajan Pro Bold.ttf"
            numeral = "fonts/BankGothic.ttf"
            text = "fonts/minion.otf"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.font_path(FontFace::Title),
            Some(Path::new("fonts/Trajan Pro Bold.ttf"))
        );
        assert_eq!(config.font_path(FontFace::Subtype), None);
        assert_eq!(config.font_path(FontFace::Text), Some(Path::new("fonts/minion.otf")));

        let err = LayoutConfig::from_toml_str("[fonts]
serif = \"a.ttf\"").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFace(name) if name == "serif"));
    }

    #[test]
    fn field_anchors_follow_frames() {
        let strength = CardKind::Ice.field_anchor(Field::Strength).unwrap();
        assert_eq!((strength.x, strength.y, strength.vertical), (7, 402, true));
        assert!(!CardKind::Program.field_anchor(Field::Strength).unwrap().vertical);
        assert_eq!(CardKind::Event.field_anchor(Field::TrashCost), None);
        for kind in CardKind::ALL {
            assert_eq!(kind.field_anchors()[0].field, Field::Title);
        }
    }

    #[test]
    fn identities_resolve_by_side() {
        assert_eq!(
            CardKind::for_card("identity", Faction::Adam).unwrap(),
            CardKind::RunnerIdentity
        );
        assert_eq!(
            CardKind::for_card("identity", Faction::Nbn).unwrap(),
            CardKind::CorpIdentity
        );
        assert_eq!(CardKind::for_card("ice", Faction::Nbn).unwrap(), CardKind::Ice);
        assert_eq!(CardKind::CorpIdentity.card_type(), "identity");
    }

    #[test]
    fn parses_kind_names() {
        assert_eq!("runner-identity".parse::<CardKind>().unwrap(), CardKind::RunnerIdentity);
        assert_eq!("ICE".parse::<CardKind>().unwrap(), CardKind::Ice);
        for kind in CardKind::ALL {
            assert_eq!(kind.to_string().parse::<CardKind>().unwrap(), kind);
        }
    }
}
