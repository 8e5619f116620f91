//! Turns a character record into embed-shaped output.
//!
//! Field values are measured in chars and never exceed [`MAX_FIELD_LENGTH`];
//! longer values are hard-cut into consecutive "(cont.)" fields.

use crate::models::{CharacterRecord, FireteamMember, LoreSection, FIRETEAM_KEY};

pub const MAX_FIELD_LENGTH: usize = 1024;

const CONTINUED_SUFFIX: &str = " (cont.)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// Replies to the "tell me about" trigger and prefix commands.
    Green,
    /// Replies to `/lore`.
    Blue,
}

impl Palette {
    pub fn rgb(self) -> u32 {
        match self {
            Palette::Green => 0x2ECC71,
            Palette::Blue => 0x3498DB,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
    pub thumbnail: Option<String>,
    pub color: Palette,
}

impl RenderedMessage {
    fn new(title: String, color: Palette) -> Self {
        Self {
            title,
            description: None,
            fields: Vec::new(),
            footer: None,
            thumbnail: None,
            color,
        }
    }

    fn add_field(&mut self, name: &str, value: &str, inline: bool) {
        self.fields.push(EmbedField {
            name: name.to_string(),
            value: value.to_string(),
            inline,
        });
    }

    /// Adds `value` under `name`, split into as many fields as the length limit needs.
    fn add_chunked_field(&mut self, name: &str, value: &str, inline: bool) {
        for (idx, chunk) in chunk_value(value, MAX_FIELD_LENGTH).into_iter().enumerate() {
            if idx == 0 {
                self.add_field(name, chunk, inline);
            } else {
                self.add_field(&format!("{}{}", name, CONTINUED_SUFFIX), chunk, inline);
            }
        }
    }
}

pub fn render(record: &CharacterRecord, display_name: &str, palette: Palette) -> RenderedMessage {
    let mut message = RenderedMessage::new(format!("Lore of {}", display_name), palette);
    message.description = Some(record.description.clone());

    message.add_field("Faction", &record.faction, true);
    message.add_field("Role", &record.role, true);
    message.add_chunked_field("Key Events", &record.key_events.join(", "), false);

    for (key, section) in record.additional_lore.iter() {
        let name = if key == FIRETEAM_KEY {
            "Fireteam".to_string()
        } else {
            humanize_key(key)
        };
        message.add_chunked_field(&name, &section_body(section), false);
    }

    message.footer = Some(format!("First Appearance: {}", record.first_appearance));
    message.thumbnail = record.image_url.clone();
    message
}

fn section_body(section: &LoreSection) -> String {
    match section {
        LoreSection::PlainText(text) => text.clone(),
        LoreSection::QuoteList(quotes) => quotes
            .iter()
            .map(|quote| format!("\"{}\"", quote))
            .collect::<Vec<_>>()
            .join("\n"),
        LoreSection::FireteamMap(members) => members
            .iter()
            .map(|(name, member)| fireteam_paragraph(name, member))
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

fn fireteam_paragraph(name: &str, member: &FireteamMember) -> String {
    format!(
        "**{}**\nRole: {}\nFate: {}\nReflection: {}",
        name, member.role, member.fate, member.reflection
    )
}

/// `"notable_battles"` -> `"Notable Battles"`.
pub fn humanize_key(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for c in spaced.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Hard cuts every `max` chars. An empty value yields one empty chunk.
pub fn chunk_value(value: &str, max: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (at, _) in value.char_indices() {
        if count == max {
            chunks.push(&value[start..at]);
            start = at;
            count = 0;
        }
        count += 1;
    }
    chunks.push(&value[start..]);
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdditionalLore;

    fn record() -> CharacterRecord {
        CharacterRecord {
            description: "Warlock Vanguard".to_string(),
            faction: "Vanguard".to_string(),
            role: "Warlock".to_string(),
            key_events: vec!["Red War".to_string(), "Season of the Witch".to_string()],
            first_appearance: "Destiny".to_string(),
            image_url: None,
            additional_lore: AdditionalLore::default(),
        }
    }

    fn names(message: &RenderedMessage) -> Vec<&str> {
        message.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_render_base_fields() {
        let message = render(&record(), "IKORA", Palette::Green);
        assert_eq!(message.title, "Lore of IKORA");
        assert_eq!(message.description.as_deref(), Some("Warlock Vanguard"));
        assert_eq!(names(&message), vec!["Faction", "Role", "Key Events"]);
        assert!(message.fields[0].inline);
        assert!(message.fields[1].inline);
        assert!(!message.fields[2].inline);
        assert_eq!(message.fields[2].value, "Red War, Season of the Witch");
        assert_eq!(message.footer.as_deref(), Some("First Appearance: Destiny"));
        assert_eq!(message.thumbnail, None);
        assert_eq!(message.color, Palette::Green);
    }

    #[test]
    fn test_render_thumbnail() {
        let mut rec = record();
        rec.image_url = Some("https://example.com/ikora.png".to_string());
        let message = render(&rec, "Ikora", Palette::Blue);
        assert_eq!(message.thumbnail.as_deref(), Some("https://example.com/ikora.png"));
    }

    #[test]
    fn test_fireteam_paragraph() {
        let mut rec = record();
        rec.additional_lore = AdditionalLore(vec![(
            "fireteam".to_string(),
            LoreSection::FireteamMap(vec![(
                "Cayde-6".to_string(),
                FireteamMember {
                    role: "Hunter Vanguard".to_string(),
                    fate: "Killed".to_string(),
                    reflection: "Missed by all".to_string(),
                },
            )]),
        )]);

        let message = render(&rec, "Ikora", Palette::Green);
        let field = &message.fields[3];
        assert_eq!(field.name, "Fireteam");
        assert_eq!(
            field.value,
            "**Cayde-6**\nRole: Hunter Vanguard\nFate: Killed\nReflection: Missed by all"
        );
    }

    #[test]
    fn test_fireteam_members_separated_by_blank_line() {
        let member = |role: &str| FireteamMember {
            role: role.to_string(),
            fate: "Alive".to_string(),
            reflection: "-".to_string(),
        };
        let body = section_body(&LoreSection::FireteamMap(vec![
            ("A".to_string(), member("Titan")),
            ("B".to_string(), member("Hunter")),
        ]));
        assert_eq!(
            body,
            "**A**\nRole: Titan\nFate: Alive\nReflection: -\n\n**B**\nRole: Hunter\nFate: Alive\nReflection: -"
        );
    }

    #[test]
    fn test_sections_rendered_in_source_order() {
        let mut rec = record();
        rec.additional_lore = AdditionalLore(vec![
            ("zeta_entry".to_string(), LoreSection::PlainText("z".to_string())),
            (
                "quotes".to_string(),
                LoreSection::QuoteList(vec!["Eyes up.".to_string(), "Stay sharp.".to_string()]),
            ),
            ("alpha_entry".to_string(), LoreSection::PlainText("a".to_string())),
        ]);

        let message = render(&rec, "Ikora", Palette::Green);
        assert_eq!(
            names(&message)[3..],
            ["Zeta Entry", "Quotes", "Alpha Entry"]
        );
        assert_eq!(message.fields[4].value, "\"Eyes up.\"\n\"Stay sharp.\"");
    }

    #[test]
    fn test_long_section_is_continued() {
        let mut rec = record();
        let long = "x".repeat(MAX_FIELD_LENGTH * 2 + 10);
        rec.additional_lore = AdditionalLore(vec![(
            "early_life".to_string(),
            LoreSection::PlainText(long.clone()),
        )]);

        let message = render(&rec, "Ikora", Palette::Green);
        assert_eq!(
            names(&message)[3..],
            ["Early Life", "Early Life (cont.)", "Early Life (cont.)"]
        );
        let joined: String = message.fields[3..].iter().map(|f| f.value.as_str()).collect();
        assert_eq!(joined, long);
    }

    #[test]
    fn test_chunk_value_is_lossless() {
        let cases = [
            String::new(),
            "short".to_string(),
            "a".repeat(MAX_FIELD_LENGTH),
            "b".repeat(MAX_FIELD_LENGTH + 1),
            "é✓".repeat(1500),
        ];
        for value in &cases {
            let chunks = chunk_value(value, MAX_FIELD_LENGTH);
            let len = value.chars().count();
            let expected = if len == 0 { 1 } else { len.div_ceil(MAX_FIELD_LENGTH) };
            assert_eq!(chunks.len(), expected);
            assert!(chunks.iter().all(|c| c.chars().count() <= MAX_FIELD_LENGTH));
            assert_eq!(chunks.concat(), *value);
        }
    }

    #[test]
    fn test_chunk_value_cuts_at_limit() {
        let chunks = chunk_value("abcdefg", 3);
        assert_eq!(chunks, vec!["abc", "def", "g"]);
    }

    #[test]
    fn test_humanize_key() {
        assert_eq!(humanize_key("quotes"), "Quotes");
        assert_eq!(humanize_key("notable_battles"), "Notable Battles");
        assert_eq!(humanize_key("RED_war"), "Red War");
        assert_eq!(humanize_key("post-collapse"), "Post-Collapse");
    }
}
