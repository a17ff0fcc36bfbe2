use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context as _;
use log::info;
use serde::{Serialize, de::DeserializeOwned};
use teamforge_data::{InMemoryStore, KnowledgeBase, synthetic::SyntheticKnowledgeBase};

/// Characters in the synthetic knowledge base used when no data file is given.
const DEMO_CHARACTER_COUNT: usize = 60;
const DEMO_SHADOW_EVERY: usize = 4;

/// Writes `value` as pretty JSON to `path`, or to stdout when `path` is `None`.
pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
{
    let target = path.map_or_else(|| "stdout".to_owned(), |p| p.display().to_string());
    let mut writer: Box<dyn Write> = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {target}"))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to flush {target}"))?;
    Ok(())
}

/// Reads a JSON document; `what` names it in error messages.
pub fn read_json<T>(what: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {what} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {what} file: {}", path.display()))
}

/// Loads the knowledge store from `path`, or builds the synthetic demo data set.
///
/// # Errors
///
/// Returns error if the file cannot be read or holds duplicate keys
pub fn load_store(path: Option<&Path>) -> anyhow::Result<InMemoryStore> {
    let base = match path {
        Some(path) => read_json::<KnowledgeBase>("knowledge base", path)?,
        None => {
            info!("No data file given, using {DEMO_CHARACTER_COUNT} synthetic characters");
            SyntheticKnowledgeBase::new(DEMO_CHARACTER_COUNT)
                .with_shadow_variants(DEMO_SHADOW_EVERY)
                .build()
        }
    };
    let store = InMemoryStore::new(base).context("Invalid knowledge base")?;
    info!("Loaded {} characters", store.characters().len());
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_read_json_file() {
        let path = std::env::temp_dir().join(format!("teamforge-util-{}.json", std::process::id()));
        let base = SyntheticKnowledgeBase::new(4).build();
        save_json(&base, Some(&path)).unwrap();
        let read: KnowledgeBase = read_json("knowledge base", &path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(read.characters.len(), 4);
        assert_eq!(read.type_chart, base.type_chart);

        let err = read_json::<KnowledgeBase>("knowledge base", &path).unwrap_err();
        assert!(err.to_string().contains("Failed to open knowledge base file"));
    }
}
