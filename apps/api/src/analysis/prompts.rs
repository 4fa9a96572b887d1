// All LLM prompt templates for the analysis pipeline.
// Templates are pure functions of their inputs.

/// Section markers the analysis prompt asks for. The presenter locates sections
/// by exact substring match, so these strings are emitted verbatim into every
/// prompt and must never be reformatted.
pub const MARKER_MATCH_SCORE: &str = "### 1. MATCH SCORE";
pub const MARKER_MISSING_KEYWORDS: &str = "### 2. MISSING KEYWORDS";
pub const MARKER_RECOMMENDATIONS: &str = "### 3. IMPROVEMENT RECOMMENDATIONS";
pub const MARKER_RED_FLAGS: &str = "### 4. RED FLAGS";
pub const MARKER_STRENGTHS: &str = "### 5. STRENGTHS";
pub const MARKER_SUGGESTED_EDITS: &str = "### 6. SUGGESTED EDITS";

/// All markers in the order the model is asked to emit them.
pub const SECTION_MARKERS: [&str; 6] = [
    MARKER_MATCH_SCORE,
    MARKER_MISSING_KEYWORDS,
    MARKER_RECOMMENDATIONS,
    MARKER_RED_FLAGS,
    MARKER_STRENGTHS,
    MARKER_SUGGESTED_EDITS,
];

pub const JOB_TITLE_PLACEHOLDER: &str = "Not specified";

/// Analysis prompt template.
/// Replace: {job_title}, {job_description}, {resume_text}, {skills_line}, and the six {marker_*}.
const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Evaluate the resume below against the job description.

JOB TITLE: {job_title}

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}
{skills_line}
First state in one line whether the candidate is suitable for the role: answer "Suitable: Yes" or "Suitable: No".

Then produce exactly six sections, each starting with its heading on its own line, copied exactly as written here and in this order:

{marker_score}
The percentage match between the resume and the job description as a single integer from 0 to 100 followed by a percent sign, e.g. "72%". Nothing else on that line.

{marker_missing}
Bullet list of keywords and skills from the job description that are missing from the resume.

{marker_recommendations}
Concrete recommendations to improve the resume for this role.

{marker_red_flags}
Anything in the resume that would concern a recruiter for this role. Write "None" if there is nothing.

{marker_strengths}
The resume's strongest points relative to the job description.

{marker_edits}
Specific rewrites of existing resume lines, formatted as "Before:" / "After:" pairs.
"#;

/// Skill-match prompt template. Replace: {skills}, {resume_text}.
const SKILL_MATCH_PROMPT_TEMPLATE: &str = r#"For each skill listed below, assess whether it is present in the resume.

SKILLS:
{skills}

RESUME:
{resume_text}

Respond with a markdown table only, with exactly these four columns in this order:

| Skill | Presence | Evidence | Strength |

- Skill: the skill name exactly as listed.
- Presence: "Yes", "Partial" or "No".
- Evidence: a short quote or paraphrase from the resume, or "-" if absent.
- Strength: "Strong", "Moderate" or "Weak".

One row per skill, in the order given. No text before or after the table."#;

/// Rewrite prompt template. Replace: {resume_text}, {analysis}.
const REWRITE_PROMPT_TEMPLATE: &str = r#"Rewrite the resume below so it addresses the feedback in the analysis.

ORIGINAL RESUME:
{resume_text}

ANALYSIS:
{analysis}

Rules:
1. Keep every fact truthful to the original resume. Do not invent employers, dates, degrees or metrics.
2. Work in the missing keywords and suggested edits where the original supports them.
3. Output the complete rewritten resume as plain text only.
4. Do not add any commentary, preamble, explanation or closing remarks."#;

/// Builds the analysis prompt.
pub fn analysis_prompt(
    job_title: Option<&str>,
    job_description: &str,
    resume_text: &str,
    key_skills: &[String],
) -> String {
    let job_title = job_title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(JOB_TITLE_PLACEHOLDER);

    let skills_line = if key_skills.is_empty() {
        String::new()
    } else {
        format!("\nKEY SKILLS TO EVALUATE: {}\n", key_skills.join(", "))
    };

    fill(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("job_title", job_title),
            ("job_description", job_description),
            ("resume_text", resume_text),
            ("skills_line", skills_line.as_str()),
            ("marker_score", MARKER_MATCH_SCORE),
            ("marker_missing", MARKER_MISSING_KEYWORDS),
            ("marker_recommendations", MARKER_RECOMMENDATIONS),
            ("marker_red_flags", MARKER_RED_FLAGS),
            ("marker_strengths", MARKER_STRENGTHS),
            ("marker_edits", MARKER_SUGGESTED_EDITS),
        ],
    )
}

/// Builds the skill-match prompt. Skills are listed one per line.
pub fn skill_match_prompt(key_skills: &[String], resume_text: &str) -> String {
    let skills = key_skills
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n");

    fill(
        SKILL_MATCH_PROMPT_TEMPLATE,
        &[("skills", skills.as_str()), ("resume_text", resume_text)],
    )
}

/// Builds the rewrite prompt.
pub fn rewrite_prompt(resume_text: &str, analysis: &str) -> String {
    fill(
        REWRITE_PROMPT_TEMPLATE,
        &[("resume_text", resume_text), ("analysis", analysis)],
    )
}

/// Substitutes `{name}` placeholders in a single pass over the template, so
/// braces inside substituted values are never expanded again.
fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = vars.iter().find_map(|(name, value)| {
            tail.strip_prefix(*name)
                .and_then(|r| r.strip_prefix('}'))
                .map(|r| (*value, r))
        });
        match hit {
            Some((value, remaining)) => {
                out.push_str(value);
                rest = remaining;
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}
