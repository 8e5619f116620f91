use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::marker::PhantomData;

// Lore Models
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CharacterRecord {
    pub description: String,
    pub faction: String,
    pub role: String,
    pub key_events: Vec<String>,
    pub first_appearance: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub additional_lore: AdditionalLore,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct FireteamMember {
    pub role: String,
    pub fate: String,
    pub reflection: String,
}

/// One `additional_lore` entry. The variant is picked by the section key,
/// not by the shape of the value.
#[derive(Debug, Clone, PartialEq)]
pub enum LoreSection {
    PlainText(String),
    QuoteList(Vec<String>),
    FireteamMap(Vec<(String, FireteamMember)>),
}

pub const FIRETEAM_KEY: &str = "fireteam";
pub const QUOTES_KEY: &str = "quotes";

/// `additional_lore` in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdditionalLore(pub Vec<(String, LoreSection)>);

impl AdditionalLore {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LoreSection)> {
        self.0.iter().map(|(key, section)| (key.as_str(), section))
    }
}

impl<'de> Deserialize<'de> for AdditionalLore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SectionsVisitor;

        impl<'de> Visitor<'de> for SectionsVisitor {
            type Value = AdditionalLore;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of lore sections")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut sections = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(key) = map.next_key::<String>()? {
                    let section = match key.as_str() {
                        FIRETEAM_KEY => LoreSection::FireteamMap(
                            map.next_value::<OrderedMap<FireteamMember>>()?.0,
                        ),
                        QUOTES_KEY => LoreSection::QuoteList(map.next_value()?),
                        _ => LoreSection::PlainText(map.next_value()?),
                    };
                    sections.push((key, section));
                }
                Ok(AdditionalLore(sections))
            }
        }

        deserializer.deserialize_map(SectionsVisitor)
    }
}

/// A JSON object read as key/value pairs in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(pub Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}
