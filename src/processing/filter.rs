//! Skill filter applied to a finished batch

use crate::processing::document::CandidateRecord;

/// Lowercased, trimmed, non-empty tokens of a comma-separated skill list.
///
/// Empty tokens (e.g. from a trailing comma) are dropped: an empty substring
/// matches every record, so dropping them does not change the result.
pub fn parse_skills(skills: &str) -> Vec<String> {
    skills
        .to_lowercase()
        .split(',')
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Records whose normalized text contains every requested skill
/// (case-insensitive substring). No skills keeps everything, in order.
pub fn filter_by_skills<'a>(records: &'a [CandidateRecord], skills: Option<&str>) -> Vec<&'a CandidateRecord> {
    let required = parse_skills(skills.unwrap_or(""));
    if required.is_empty() {
        return records.iter().collect();
    }

    records
        .iter()
        .filter(|record| {
            let text = record.normalized_text.to_lowercase();
            required.iter().all(|skill| text.contains(skill.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::category::Category;
    use crate::processing::document::Contact;

    fn record(filename: &str, normalized_text: &str) -> CandidateRecord {
        CandidateRecord {
            name: String::new(),
            contact: Contact::default(),
            skills: String::new(),
            category: Category::Database,
            filename: filename.to_string(),
            normalized_text: normalized_text.to_string(),
        }
    }

    fn names<'a>(records: &[&'a CandidateRecord]) -> Vec<&'a str> {
        records.iter().map(|r| r.filename.as_str()).collect()
    }

    fn batch() -> Vec<CandidateRecord> {
        vec![
            record("a.pdf", "Python developer with SQL and AWS"),
            record("b.pdf", "Java developer with MySQL"),
            record("c.pdf", "PYTHON scripting only"),
            record("d.pdf", "Data analyst sql python pandas"),
        ]
    }

    #[test]
    fn test_empty_skills_returns_all_in_order() {
        let records = batch();
        assert_eq!(names(&filter_by_skills(&records, None)), vec!["a.pdf", "b.pdf", "c.pdf", "d.pdf"]);
        assert_eq!(names(&filter_by_skills(&records, Some(""))), vec!["a.pdf", "b.pdf", "c.pdf", "d.pdf"]);
    }

    #[test]
    fn test_requires_every_skill() {
        let records = batch();
        let kept = filter_by_skills(&records, Some("python,sql"));
        assert_eq!(names(&kept), vec!["a.pdf", "d.pdf"]);
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let records = batch();
        assert_eq!(names(&filter_by_skills(&records, Some(" SQL "))), vec!["a.pdf", "b.pdf", "d.pdf"]);
    }

    #[test]
    fn test_trailing_and_blank_tokens_do_not_narrow() {
        let records = batch();
        assert_eq!(
            names(&filter_by_skills(&records, Some("python,"))),
            names(&filter_by_skills(&records, Some("python")))
        );
        assert_eq!(filter_by_skills(&records, Some(" , ,")).len(), records.len());
    }

    #[test]
    fn test_parse_skills() {
        assert_eq!(parse_skills("Python, SQL ,,AWS"), vec!["python", "sql", "aws"]);
        assert!(parse_skills("   ").is_empty());
    }
}
