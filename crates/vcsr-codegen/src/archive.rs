//! Zip packaging of generated files.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use chrono::{DateTime, Utc};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::CodegenError;
use crate::generator::GeneratedCode;

pub const README_NAME: &str = "README.md";

/// Download name for an archive built at `at`.
pub fn archive_file_name(at: DateTime<Utc>) -> String {
    format!("generated-code-{}.zip", at.timestamp_millis())
}

/// `Person.ts`, `Person-1.ts`, `Person-2.ts`, ...
fn unique_name(taken: &mut HashSet<String>, name: &str) -> String {
    let name = if name.trim().is_empty() { "generated" } else { name };
    if taken.insert(name.to_string()) {
        return name.to_string();
    }
    let (stem, ext) = match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    };
    let mut n = 1;
    loop {
        let candidate = format!("{stem}-{n}{ext}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

fn readme(entries: &[(String, &GeneratedCode)], at: DateTime<Utc>) -> String {
    let mut text = String::from("# Generated Code\n\n");
    text.push_str(&format!("Generated on: {}\n", at.to_rfc3339()));
    text.push_str(&format!("Files included: {}\n\n## Files\n\n", entries.len()));
    for (i, (name, result)) in entries.iter().enumerate() {
        text.push_str(&format!("{}. {} ({})\n", i + 1, name, result.language.display_name()));
    }
    text
}

/// Build a zip holding every result plus a README.
pub fn build_archive(results: &[GeneratedCode], at: DateTime<Utc>) -> Result<Vec<u8>, CodegenError> {
    let mut taken = HashSet::from([README_NAME.to_string()]);
    let entries: Vec<(String, &GeneratedCode)> = results
        .iter()
        .map(|r| (unique_name(&mut taken, &r.filename), r))
        .collect();

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, result) in &entries {
        zip.start_file(name.as_str(), options)?;
        zip.write_all(result.code.as_bytes())?;
    }
    zip.start_file(README_NAME, options)?;
    zip.write_all(readme(&entries, at).as_bytes())?;

    Ok(zip.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use chrono::TimeZone;
    use std::io::Read;

    fn at() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    #[test]
    fn file_name_uses_millis() {
        assert_eq!(archive_file_name(at()), "generated-code-1700000000000.zip");
    }

    #[test]
    fn archive_contains_results_and_readme() {
        let results = vec![
            GeneratedCode::new(Language::TypeScript, "Person", "export interface Person {}".into()),
            GeneratedCode::new(Language::TypeScript, "Person", "export interface Person2 {}".into()),
            GeneratedCode {
                language: Language::Go,
                code: "x".into(),
                filename: "README.md".into(),
            },
        ];
        let bytes = build_archive(&results, at()).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut names: Vec<String> = archive.file_names().map(String::from).collect();
        names.sort();
        assert_eq!(names, ["Person-1.ts", "Person.ts", "README-1.md", "README.md"]);

        let mut readme = String::new();
        archive
            .by_name("README.md")
            .unwrap()
            .read_to_string(&mut readme)
            .unwrap();
        assert!(readme.contains("Files included: 3"));
        assert!(readme.contains("2. Person-1.ts (TypeScript)"));

        let mut second = String::new();
        archive
            .by_name("Person-1.ts")
            .unwrap()
            .read_to_string(&mut second)
            .unwrap();
        assert_eq!(second, "export interface Person2 {}");
    }

    #[test]
    fn unique_names_increment() {
        let mut taken = HashSet::new();
        assert_eq!(unique_name(&mut taken, "a.rs"), "a.rs");
        assert_eq!(unique_name(&mut taken, "a.rs"), "a-1.rs");
        assert_eq!(unique_name(&mut taken, "a.rs"), "a-2.rs");
        assert_eq!(unique_name(&mut taken, "noext"), "noext");
        assert_eq!(unique_name(&mut taken, "noext"), "noext-1");
        assert_eq!(unique_name(&mut taken, ""), "generated");
    }
}
