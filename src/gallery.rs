//! Prompt gallery data.
//!
//! Loading mirrors the site layout: `index.json` names the collections,
//! each collection is a `<tag>.json` array of cards, and a card may point
//! at a separate text file for its prompt body. Every read is best-effort;
//! a completely empty gallery falls back to the built-in sample cards.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptCard {
    pub id: String,
    pub title: String,
    pub prompt: String,
    pub image_url: String,
    /// Relative path (under the data dir) of the prompt body, if it is
    /// kept out of the collection file.
    pub prompt_file: Option<String>,
    /// Collection name; injected at load time, not part of the JSON.
    #[serde(skip)]
    pub tag: String,
}

#[derive(Debug, Deserialize)]
struct IndexFile {
    collections: Vec<String>,
}

/// Load all cards under `dir`. Collections that fail to load are skipped
/// with a warning; an empty result falls back to [`sample_cards`].
pub fn load_dir(dir: &Path) -> Vec<PromptCard> {
    let mut cards = match read_index(dir) {
        Ok(collections) => {
            let mut cards = Vec::new();
            for tag in &collections {
                match read_collection(dir, tag) {
                    Ok(items) => cards.extend(items),
                    Err(err) => tracing::warn!("skipping collection '{tag}': {err}"),
                }
            }
            cards
        }
        Err(err) => {
            tracing::warn!("could not load gallery index from {}: {err}", dir.display());
            Vec::new()
        }
    };

    for card in &mut cards {
        resolve_prompt_body(dir, card);
    }

    if cards.is_empty() {
        tracing::info!("gallery is empty, using sample cards");
        return sample_cards();
    }
    cards
}

fn read_index(dir: &Path) -> anyhow::Result<Vec<String>> {
    let contents = std::fs::read_to_string(dir.join("index.json"))?;
    let index: IndexFile = serde_json::from_str(&contents)?;
    Ok(index.collections)
}

fn read_collection(dir: &Path, tag: &str) -> anyhow::Result<Vec<PromptCard>> {
    let contents = std::fs::read_to_string(dir.join(format!("{tag}.json")))?;
    let mut items: Vec<PromptCard> = serde_json::from_str(&contents)?;
    for item in &mut items {
        item.tag = tag.to_string();
    }
    Ok(items)
}

/// Read the card's external prompt body, if any. Failures keep whatever
/// inline prompt the card already carries.
fn resolve_prompt_body(dir: &Path, card: &mut PromptCard) {
    let Some(file) = &card.prompt_file else {
        return;
    };
    match std::fs::read_to_string(dir.join(file)) {
        Ok(body) => card.prompt = body.trim_end().to_string(),
        Err(err) => tracing::warn!("could not read prompt file {file}: {err}"),
    }
}

/// Indices of the cards matching `query`, by case-insensitive substring
/// over title, prompt body and tag. An empty query matches everything.
pub fn filter(cards: &[PromptCard], query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return (0..cards.len()).collect();
    }
    cards
        .iter()
        .enumerate()
        .filter(|(_, card)| {
            card.title.to_lowercase().contains(&needle)
                || card.prompt.to_lowercase().contains(&needle)
                || card.tag.to_lowercase().contains(&needle)
        })
        .map(|(i, _)| i)
        .collect()
}

/// Built-in cards shown when no data directory is usable.
pub fn sample_cards() -> Vec<PromptCard> {
    vec![
        PromptCard {
            id: "sample-001".to_string(),
            title: "System Crash".to_string(),
            prompt: "A futuristic terminal interface glitching out, red error messages \
                     cascading down a black screen, matrix digital rain effect, cyberpunk \
                     aesthetic, high contrast, detailed"
                .to_string(),
            image_url: "https://picsum.photos/seed/glitch1/400/225".to_string(),
            prompt_file: None,
            tag: "glitch".to_string(),
        },
        PromptCard {
            id: "sample-002".to_string(),
            title: "Neon Cityscape".to_string(),
            prompt: "Cyberpunk city at night, wet streets reflecting neon signs, flying \
                     cars, towering skyscrapers, rain, cinematic lighting, photorealistic, 8k"
                .to_string(),
            image_url: "https://picsum.photos/seed/neon1/400/225".to_string(),
            prompt_file: None,
            tag: "cyberpunk".to_string(),
        },
    ]
}
