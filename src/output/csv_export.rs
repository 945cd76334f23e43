//! CSV export of candidate records

use crate::error::Result;
use crate::processing::document::CandidateRecord;
use std::io::Write;
use std::path::Path;

pub const CSV_HEADER: [&str; 5] = ["name", "category", "filename", "skills", "contact"];

pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a CandidateRecord>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for record in records {
        wtr.write_record([
            record.name.as_str(),
            record.category.label(),
            record.filename.as_str(),
            record.skills.as_str(),
            record.contact.to_string().as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn to_csv_bytes<'a, I>(records: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a CandidateRecord>,
{
    let mut buffer = Vec::new();
    write_csv(&mut buffer, records)?;
    Ok(buffer)
}

pub fn save_csv<'a, I>(path: &Path, records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a CandidateRecord>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(path)?;
    write_csv(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::category::Category;
    use crate::processing::document::Contact;

    fn record() -> CandidateRecord {
        CandidateRecord {
            name: "Jane Doe".to_string(),
            contact: Contact {
                phone: "5551234567".to_string(),
                email: "jane@x.com".to_string(),
            },
            skills: "Python, SQL".to_string(),
            category: Category::DataScience,
            filename: "jane.pdf".to_string(),
            normalized_text: "ignored".to_string(),
        }
    }

    #[test]
    fn test_header_and_quoting() {
        let records = vec![record()];
        let bytes = to_csv_bytes(&records).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("name,category,filename,skills,contact"));
        assert_eq!(
            lines.next(),
            Some("Jane Doe,Data Science,jane.pdf,\"Python, SQL\",5551234567 / jane@x.com")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_batch_has_header_only() {
        let records: Vec<CandidateRecord> = Vec::new();
        let text = String::from_utf8(to_csv_bytes(&records).unwrap()).unwrap();
        assert_eq!(text, "name,category,filename,skills,contact\n");
    }

    #[test]
    fn test_save_csv_creates_parent() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("exports").join("summary.csv");
        let records = vec![record()];

        save_csv(&path, &records).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][3], "Python, SQL");
    }
}
