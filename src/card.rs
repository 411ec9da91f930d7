//! Card faces and the fixed fields printed around the rules text.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::layout::{CardKind, ConfigError};

/// Which player a faction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Runner,
    Corp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Faction {
    Anarch,
    Criminal,
    Shaper,
    Adam,
    Apex,
    SunnyLebeau,
    NeutralRunner,
    HaasBioroid,
    Jinteki,
    Nbn,
    WeylandConsortium,
    NeutralCorp,
}

impl Faction {
    pub const ALL: [Faction; 12] = [
        Faction::Anarch,
        Faction::Criminal,
        Faction::Shaper,
        Faction::Adam,
        Faction::Apex,
        Faction::SunnyLebeau,
        Faction::NeutralRunner,
        Faction::HaasBioroid,
        Faction::Jinteki,
        Faction::Nbn,
        Faction::WeylandConsortium,
        Faction::NeutralCorp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Faction::Anarch => "anarch",
            Faction::Criminal => "criminal",
            Faction::Shaper => "shaper",
            Faction::Adam => "adam",
            Faction::Apex => "apex",
            Faction::SunnyLebeau => "sunny-lebeau",
            Faction::NeutralRunner => "neutral-runner",
            Faction::HaasBioroid => "haas-bioroid",
            Faction::Jinteki => "jinteki",
            Faction::Nbn => "nbn",
            Faction::WeylandConsortium => "weyland-consortium",
            Faction::NeutralCorp => "neutral-corp",
        }
    }

    /// Faction part of a template file name.
    pub fn template_name(&self) -> &'static str {
        match self {
            Faction::HaasBioroid => "haas",
            Faction::WeylandConsortium => "weyland",
            Faction::NeutralRunner | Faction::NeutralCorp => "neutral",
            other => other.name(),
        }
    }

    pub fn side(&self) -> Side {
        match self {
            Faction::Anarch
            | Faction::Criminal
            | Faction::Shaper
            | Faction::Adam
            | Faction::Apex
            | Faction::SunnyLebeau
            | Faction::NeutralRunner => Side::Runner,
            Faction::HaasBioroid
            | Faction::Jinteki
            | Faction::Nbn
            | Faction::WeylandConsortium
            | Faction::NeutralCorp => Side::Corp,
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Faction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Faction::ALL
            .into_iter()
            .find(|faction| faction.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownFaction(s.to_string()))
    }
}

/// Typeface families used on the card frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FontFace {
    /// Card titles (Trajan Pro Bold on the stock frames).
    Title,
    /// Subtype line (Gill Sans).
    Subtype,
    /// Costs and stats (Bank Gothic).
    Numeral,
    /// Rules text (Minion).
    Text,
}

impl FontFace {
    pub const ALL: [FontFace; 4] = [
        FontFace::Title,
        FontFace::Subtype,
        FontFace::Numeral,
        FontFace::Text,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FontFace::Title => "title",
            FontFace::Subtype => "subtype",
            FontFace::Numeral => "numeral",
            FontFace::Text => "text",
        }
    }
}

impl FromStr for FontFace {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FontFace::ALL
            .into_iter()
            .find(|face| face.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownFace(s.to_string()))
    }
}

/// Typeface, size and color of a fixed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldStyle {
    pub face: FontFace,
    pub size: u32,
    pub color: [u8; 3],
}

const BLACK: [u8; 3] = [0, 0, 0];
const WHITE: [u8; 3] = [255, 255, 255];
const GOLD: [u8; 3] = [152, 130, 119];

/// Single-line fields drawn at fixed anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Field {
    Title,
    Subtitle,
    Subtype,
    Cost,
    AdvancementRequirement,
    AgendaPoints,
    MemoryCost,
    TrashCost,
    Strength,
    BaseLink,
    MinimumDeckSize,
    InfluenceLimit,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::Title,
        Field::Subtitle,
        Field::Subtype,
        Field::Cost,
        Field::AdvancementRequirement,
        Field::AgendaPoints,
        Field::MemoryCost,
        Field::TrashCost,
        Field::Strength,
        Field::BaseLink,
        Field::MinimumDeckSize,
        Field::InfluenceLimit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Subtitle => "subtitle",
            Field::Subtype => "subtype",
            Field::Cost => "cost",
            Field::AdvancementRequirement => "advancement-requirement",
            Field::AgendaPoints => "agenda-points",
            Field::MemoryCost => "memory-cost",
            Field::TrashCost => "trash-cost",
            Field::Strength => "strength",
            Field::BaseLink => "base-link",
            Field::MinimumDeckSize => "minimum-deck-size",
            Field::InfluenceLimit => "influence-limit",
        }
    }

    pub fn style(&self) -> FieldStyle {
        let (face, size, color) = match self {
            Field::Title => (FontFace::Title, 14, BLACK),
            Field::Subtitle => (FontFace::Title, 10, BLACK),
            Field::Subtype => (FontFace::Subtype, 12, BLACK),
            Field::Cost => (FontFace::Numeral, 23, WHITE),
            Field::AdvancementRequirement => (FontFace::Numeral, 30, BLACK),
            Field::AgendaPoints => (FontFace::Numeral, 30, BLACK),
            Field::MemoryCost => (FontFace::Numeral, 14, BLACK),
            Field::TrashCost => (FontFace::Numeral, 20, GOLD),
            Field::Strength => (FontFace::Numeral, 30, BLACK),
            Field::BaseLink => (FontFace::Numeral, 32, WHITE),
            Field::MinimumDeckSize => (FontFace::Numeral, 16, BLACK),
            Field::InfluenceLimit => (FontFace::Numeral, 16, BLACK),
        };
        FieldStyle { face, size, color }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A printed stat. `X` costs arrive as strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Stat {
    Number(i64),
    Text(String),
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Number(n) => write!(f, "{n}"),
            Stat::Text(s) => f.write_str(s),
        }
    }
}

/// Printed contents of one card.
///
/// A stat that is present but `null` prints as `X`; an absent stat is not drawn.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CardFace {
    #[serde(rename = "type")]
    pub card_type: String,
    pub faction: Faction,
    pub title: String,
    #[serde(default)]
    pub subtype: Vec<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "present")]
    pub cost: Option<Option<Stat>>,
    #[serde(default, deserialize_with = "present")]
    pub advancement_requirement: Option<Option<Stat>>,
    #[serde(default, deserialize_with = "present")]
    pub agenda_points: Option<Option<Stat>>,
    #[serde(default, deserialize_with = "present")]
    pub memory_cost: Option<Option<Stat>>,
    #[serde(default, deserialize_with = "present")]
    pub trash_cost: Option<Option<Stat>>,
    #[serde(default, deserialize_with = "present")]
    pub strength: Option<Option<Stat>>,
    #[serde(default, deserialize_with = "present")]
    pub base_link: Option<Option<Stat>>,
    #[serde(default, deserialize_with = "present")]
    pub minimum_deck_size: Option<Option<Stat>>,
    #[serde(default, deserialize_with = "present")]
    pub influence_limit: Option<Option<Stat>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl CardFace {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn kind(&self) -> Result<CardKind, ConfigError> {
        CardKind::for_card(&self.card_type, self.faction)
    }

    fn stat(&self, field: Field) -> Option<&Option<Stat>> {
        match field {
            Field::Cost => self.cost.as_ref(),
            Field::AdvancementRequirement => self.advancement_requirement.as_ref(),
            Field::AgendaPoints => self.agenda_points.as_ref(),
            Field::MemoryCost => self.memory_cost.as_ref(),
            Field::TrashCost => self.trash_cost.as_ref(),
            Field::Strength => self.strength.as_ref(),
            Field::BaseLink => self.base_link.as_ref(),
            Field::MinimumDeckSize => self.minimum_deck_size.as_ref(),
            Field::InfluenceLimit => self.influence_limit.as_ref(),
            Field::Title | Field::Subtitle | Field::Subtype => None,
        }
    }

    /// Text printed for `field` on a card of `kind`, or `None` if nothing is printed.
    pub fn field_text(&self, field: Field, kind: CardKind) -> Option<String> {
        let identity = matches!(kind, CardKind::RunnerIdentity | CardKind::CorpIdentity);
        match field {
            Field::Title if identity => Some(split_identity_title(&self.title).0.to_string()),
            Field::Title => Some(self.title.clone()),
            Field::Subtitle if identity => {
                split_identity_title(&self.title).1.map(str::to_string)
            }
            Field::Subtitle => None,
            Field::Subtype => {
                let line = format_subtype(&self.subtype, kind);
                (!line.trim().is_empty()).then_some(line)
            }
            stat => self.stat(stat).map(|value| match value {
                Some(value) => value.to_string(),
                None => "X".to_string(),
            }),
        }
    }
}

/// Split an identity title such as `"Haas-Bioroid: Engineering the Future"`.
pub fn split_identity_title(title: &str) -> (&str, Option<&str>) {
    match title.split_once(": ") {
        Some((name, subtitle)) => (name, Some(subtitle)),
        None => (title, None),
    }
}

/// Join subtypes for the subtype line. Ice carries an `ICE:` prefix.
pub fn format_subtype(subtypes: &[String], kind: CardKind) -> String {
    let joined = subtypes
        .iter()
        .map(|subtype| {
            if subtype.eq_ignore_ascii_case("ap") {
                "AP".to_string()
            } else {
                title_case(&subtype.replace('-', " "))
            }
        })
        .collect::<Vec<_>>()
        .join(" - ");
    if kind == CardKind::Ice {
        format!("ICE:  {joined}")
    } else {
        joined
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// Frame image for a card kind and faction, relative to `templates_dir`.
pub fn template_path(templates_dir: &Path, kind: CardKind, faction: Faction) -> PathBuf {
    let card_type = kind.card_type();
    templates_dir
        .join(card_type)
        .join(format!("{card_type}_{}.png", faction.template_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_subtypes() {
        let subtypes = vec!["code-gate".to_string(), "ap".to_string()];
        assert_eq!(format_subtype(&subtypes, CardKind::Ice), "ICE:  Code Gate - AP");
        let subtypes = vec!["g-mod".to_string(), "connection".to_string()];
        assert_eq!(format_subtype(&subtypes, CardKind::Resource), "G Mod - Connection");
        assert_eq!(format_subtype(&[], CardKind::Event), "");
    }

    #[test]
    fn splits_identity_titles() {
        assert_eq!(
            split_identity_title("Haas-Bioroid: Engineering the Future"),
            ("Haas-Bioroid", Some("Engineering the Future"))
        );
        assert_eq!(split_identity_title("The Professor"), ("The Professor", None));
    }

    #[test]
    fn template_paths_use_faction_aliases() {
        let dir = Path::new("templates");
        assert_eq!(
            template_path(dir, CardKind::Agenda, Faction::HaasBioroid),
            PathBuf::from("templates/agenda/agenda_haas.png")
        );
        assert_eq!(
            template_path(dir, CardKind::Ice, Faction::WeylandConsortium),
            PathBuf::from("templates/ice/ice_weyland.png")
        );
        assert_eq!(
            template_path(dir, CardKind::RunnerIdentity, Faction::NeutralRunner),
            PathBuf::from("templates/identity/identity_neutral.png")
        );
        assert_eq!(
            template_path(dir, CardKind::Event, Faction::Shaper),
            PathBuf::from("templates/event/event_shaper.png")
        );
    }

    #[test]
    fn parses_factions() {
        assert_eq!("weyland-consortium".parse::<Faction>().unwrap(), Faction::WeylandConsortium);
        assert!(matches!(
            "earth-station".parse::<Faction>(),
            Err(ConfigError::UnknownFaction(_))
        ));
        assert_eq!(Faction::Apex.side(), Side::Runner);
        assert_eq!(Faction::Nbn.side(), Side::Corp);
    }

    #[test]
    fn reads_face_fields() {
        let face = CardFace::from_json(
            r#"{
                "type": "identity",
                "faction": "haas-bioroid",
                "title": "Haas-Bioroid: Engineering the Future",
                "subtype": ["megacorp"],
                "text": "The first time you install a card each turn, gain 1[credit].",
                "minimum-deck-size": 45,
                "influence-limit": 15
            }"#,
        )
        .unwrap();
        let kind = face.kind().unwrap();
        assert_eq!(kind, CardKind::CorpIdentity);
        assert_eq!(face.field_text(Field::Title, kind).as_deref(), Some("Haas-Bioroid"));
        assert_eq!(
            face.field_text(Field::Subtitle, kind).as_deref(),
            Some("Engineering the Future")
        );
        assert_eq!(face.field_text(Field::Subtype, kind).as_deref(), Some("Megacorp"));
        assert_eq!(face.field_text(Field::MinimumDeckSize, kind).as_deref(), Some("45"));
        assert_eq!(face.field_text(Field::Cost, kind), None);
    }

    #[test]
    fn null_stats_print_as_x() {
        let face = CardFace::from_json(
            r#"{"type": "ice", "faction": "jinteki", "title": "Tsurugi",
                "subtype": ["sentry", "ap"], "cost": null, "strength": 6}"#,
        )
        .unwrap();
        let kind = face.kind().unwrap();
        assert_eq!(kind, CardKind::Ice);
        assert_eq!(face.field_text(Field::Cost, kind).as_deref(), Some("X"));
        assert_eq!(face.field_text(Field::Strength, kind).as_deref(), Some("6"));
        assert_eq!(face.field_text(Field::TrashCost, kind), None);
        assert_eq!(
            face.field_text(Field::Subtype, kind).as_deref(),
            Some("ICE:  Sentry - AP")
        );
        assert_eq!(face.field_text(Field::Subtitle, kind), None);
    }

    #[test]
    fn field_styles_follow_frame_fonts() {
        assert_eq!(
            Field::TrashCost.style(),
            FieldStyle {
                face: FontFace::Numeral,
                size: 20,
                color: GOLD
            }
        );
        assert_eq!(Field::Subtitle.style().face, FontFace::Title);
    }
}
