//! Skill tags and the per-skill presence table.

use tracing::info;

use crate::analysis::prompts::skill_match_prompt;
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::session::Session;

pub const FIELD_KEY_SKILLS: &str = "key_skills";

/// Suggested tags offered before the user edits the list.
pub const DEFAULT_SKILLS: &[&str] = &[
    "Python",
    "SQL",
    "Machine Learning",
    "AWS",
    "Docker",
    "Kubernetes",
    "Communication",
    "Leadership",
    "Project Management",
    "Data Analysis",
];

/// Flattens raw tag inputs: each value may hold several comma-separated tags.
/// Blank tags are dropped and duplicates (case-insensitive) keep the first spelling.
pub fn normalize_skills<'a, I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    raw.into_iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.to_lowercase()))
        .map(String::from)
        .collect()
}

/// Asks the model for a Skill/Presence/Evidence/Strength table for the entry at
/// `index` and stores it on the record. Only runs when the record has skills.
pub async fn generate_skill_table(
    session: &mut Session,
    index: usize,
    llm: &dyn TextGenerator,
) -> Result<String, AppError> {
    let record = session.history().get(index)?;
    if record.key_skills.is_empty() {
        return Err(AppError::missing_fields([FIELD_KEY_SKILLS]));
    }

    let prompt = skill_match_prompt(&record.key_skills, &record.resume_text);
    let table = llm.generate(&prompt).await?;

    session.record_mut(index)?.skill_table = Some(table.clone());
    info!("Skill table generated for history entry {index}");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testing::ScriptedGenerator;
    use crate::session::history::tests::record;

    #[test]
    fn test_normalize_splits_trims_and_dedupes() {
        let skills = normalize_skills(["Python, AWS", " docker ", "", "aws", "Python,,SQL"]);
        assert_eq!(skills, vec!["Python", "AWS", "docker", "SQL"]);
    }

    #[test]
    fn test_defaults_are_unique() {
        let normalized = normalize_skills(DEFAULT_SKILLS.iter().copied());
        assert_eq!(normalized.len(), DEFAULT_SKILLS.len());
    }

    #[tokio::test]
    async fn test_skill_table_requires_skills() {
        let mut session = Session::new();
        session.record_completed(record("no skills"));
        let llm = ScriptedGenerator::replying("| Skill |");

        let err = generate_skill_table(&mut session, 0, &llm)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(f) if f == vec![FIELD_KEY_SKILLS]));
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_skill_table_is_generated_and_stored() {
        let mut session = Session::new();
        let mut with_skills = record("skills");
        with_skills.key_skills = vec!["Python".into(), "Docker".into()];
        session.record_completed(with_skills);

        let table = "| Skill | Presence | Evidence | Strength |\n|---|---|---|---|\n| Python | Yes | 5 years | Strong |";
        let llm = ScriptedGenerator::replying(table);

        let out = generate_skill_table(&mut session, 0, &llm).await.unwrap();

        assert_eq!(out, table);
        assert_eq!(
            session.history().get(0).unwrap().skill_table.as_deref(),
            Some(table)
        );
        assert!(llm.prompts()[0].contains("- Python\n- Docker"));
    }

    #[tokio::test]
    async fn test_skill_table_bad_index() {
        let mut session = Session::new();
        let llm = ScriptedGenerator::replying("unused");
        let err = generate_skill_table(&mut session, 2, &llm).await.unwrap_err();
        assert!(matches!(err, AppError::Index(_)));
    }
}
