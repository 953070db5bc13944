use std::path::Path;

use tracing::debug;

use crate::csv::{parse_csv, CsvRow};
use crate::error::DirectoryError;
use crate::model::{columns, Page, PoliticianQuery, PoliticianRecord};
use crate::states::{resolve_state_code, resolve_zip_to_state};

/// Reads the source file and answers `query` against it.
///
/// The file is re-read on every call; nothing is cached between queries.
pub async fn query_politicians(
    source: &Path,
    query: &PoliticianQuery,
) -> Result<Page<PoliticianRecord>, DirectoryError> {
    let text = tokio::fs::read_to_string(source)
        .await
        .map_err(|e| DirectoryError::SourceUnavailable {
            path: source.to_path_buf(),
            source: e,
        })?;
    Ok(query_records(&text, query))
}

/// Runs the filter/paginate pipeline over CSV text.
pub fn query_records(csv_text: &str, query: &PoliticianQuery) -> Page<PoliticianRecord> {
    let mut data: Vec<PoliticianRecord> = parse_csv(csv_text).iter().map(to_record).collect();
    let parsed = data.len();

    let name_query = lower(query.query.as_deref());
    if !name_query.is_empty() {
        data.retain(|r| r.name.to_lowercase().contains(&name_query));
    }

    let target_state = desired_state(query.zip.as_deref(), query.state.as_deref());
    if let Some(code) = target_state {
        data.retain(|r| {
            r.state
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case(code))
        });
    }

    let party = lower(query.party.as_deref());
    if !party.is_empty() {
        data.retain(|r| contains_lower(r.party.as_deref(), &party));
    }
    let role = lower(query.role.as_deref().map(str::trim));
    if !role.is_empty() {
        data.retain(|r| contains_lower(r.role.as_deref(), &role));
    }
    let stance = lower(query.stance.as_deref().map(str::trim));
    if !stance.is_empty() {
        data.retain(|r| contains_lower(r.stance.as_deref(), &stance));
    }

    debug!(
        parsed,
        matched = data.len(),
        state = target_state.unwrap_or("-"),
        "politician query filtered"
    );

    Page::paginate(&data, query.page(), query.page_size())
}

/// Picks the state to filter on: the ZIP if it resolves, else the state param.
pub fn desired_state(zip: Option<&str>, state: Option<&str>) -> Option<&'static str> {
    let zip = zip.map(str::trim).filter(|z| !z.is_empty());
    let state = state.map(str::trim).filter(|s| !s.is_empty());
    zip.and_then(resolve_zip_to_state)
        .or_else(|| state.and_then(resolve_state_code))
}

pub fn to_record(row: &CsvRow) -> PoliticianRecord {
    let state = resolve_state_code(row.field(columns::STATE));
    let raw_name = row.field(columns::NAME);
    let name = if raw_name.is_empty() { "-" } else { raw_name };

    PoliticianRecord {
        id: slugify(&format!("{raw_name}-{}", state.unwrap_or(""))),
        name: name.to_string(),
        stance: non_empty(row.field(columns::STANCE)),
        role: non_empty(row.field(columns::ROLE)),
        state: state.map(str::to_string),
        party: non_empty(row.field(columns::PARTY)),
    }
}

/// Lowercases, keeps ASCII alphanumerics and collapses every other run into one `-`.
pub fn slugify(s: &str) -> String {
    let lowered = s.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut last_dash = false;
    for ch in lowered.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    out.trim_matches('-').to_string()
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn lower(value: Option<&str>) -> String {
    value.map(str::to_lowercase).unwrap_or_default()
}

fn contains_lower(field: Option<&str>, needle: &str) -> bool {
    field.unwrap_or("").to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "Name,Stance on crypto,Role,State,Party
Jane Doe,Strongly Supportive,Senator,California,Democrat
John Roe,Neutral,Representative,TX,Republican
";

    fn q() -> PoliticianQuery {
        PoliticianQuery::default()
    }

    fn names(page: &Page<PoliticianRecord>) -> Vec<&str> {
        page.data.iter().map(|r| r.name.as_str()).collect()
    }

    fn numbered_source(n: usize) -> String {
        let mut text = String::from("Name,Stance on crypto,Role,State,Party\n");
        for i in 0..n {
            let state = if i % 2 == 0 { "Ohio" } else { "WY" };
            text.push_str(&format!("Person {i:02},Supportive,Senator,{state},Independent\n"));
        }
        text
    }

    #[test]
    fn state_filter_matches_resolved_name() {
        let page = query_records(
            SOURCE,
            &PoliticianQuery {
                state: Some("CA".to_string()),
                ..q()
            },
        );
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].name, "Jane Doe");
        assert_eq!(page.data[0].state.as_deref(), Some("CA"));
        assert_eq!(page.data[0].id, "jane-doe-ca");
    }

    #[test]
    fn zip_filter_resolves_state() {
        let page = query_records(
            SOURCE,
            &PoliticianQuery {
                zip: Some("75201".to_string()),
                ..q()
            },
        );
        assert_eq!(names(&page), vec!["John Roe"]);
    }

    #[test]
    fn zip_beats_conflicting_state() {
        let page = query_records(
            SOURCE,
            &PoliticianQuery {
                zip: Some("75201".to_string()),
                state: Some("California".to_string()),
                ..q()
            },
        );
        assert_eq!(names(&page), vec!["John Roe"]);
    }

    #[test]
    fn unresolved_zip_falls_back_to_state() {
        let page = query_records(
            SOURCE,
            &PoliticianQuery {
                zip: Some("00100".to_string()),
                state: Some("california".to_string()),
                ..q()
            },
        );
        assert_eq!(names(&page), vec!["Jane Doe"]);
    }

    #[test]
    fn unresolvable_state_param_applies_no_state_filter() {
        let page = query_records(
            SOURCE,
            &PoliticianQuery {
                state: Some("Atlantis".to_string()),
                ..q()
            },
        );
        assert_eq!(page.total, 2);
    }

    #[test]
    fn substring_filters_are_case_insensitive() {
        let by_name = query_records(
            SOURCE,
            &PoliticianQuery {
                query: Some("ROE".to_string()),
                ..q()
            },
        );
        assert_eq!(names(&by_name), vec!["John Roe"]);

        let combined = query_records(
            SOURCE,
            &PoliticianQuery {
                party: Some("dem".to_string()),
                role: Some("  sen ".to_string()),
                stance: Some("strongly".to_string()),
                ..q()
            },
        );
        assert_eq!(names(&combined), vec!["Jane Doe"]);

        let none = query_records(
            SOURCE,
            &PoliticianQuery {
                party: Some("green".to_string()),
                ..q()
            },
        );
        assert_eq!(none.total, 0);
        assert_eq!(none.total_pages, 1);
    }

    #[test]
    fn records_without_state_never_match_a_state_filter() {
        let source = "Name,Stance on crypto,Role,State,Party\nAl,,,-,\nBo,,,NA,\nCy,,,OH,\n";
        let all = query_records(source, &q());
        assert_eq!(all.data[0].state, None);
        assert_eq!(all.data[0].id, "al");
        assert_eq!(all.data[0].stance, None);

        let ohio = query_records(
            source,
            &PoliticianQuery {
                state: Some("oh".to_string()),
                ..q()
            },
        );
        assert_eq!(names(&ohio), vec!["Cy"]);
    }

    #[test]
    fn empty_name_becomes_dash() {
        let page = query_records("Name,State\n,TX\n", &q());
        assert_eq!(page.data[0].name, "-");
        assert_eq!(page.data[0].id, "tx");
    }

    #[test]
    fn pagination_preserves_source_order() {
        let source = numbered_source(25);
        let second = query_records(
            &source,
            &PoliticianQuery {
                page: Some(2),
                ..q()
            },
        );
        assert_eq!(second.total, 25);
        assert_eq!(second.total_pages, 3);
        assert_eq!(second.data.first().map(|r| r.name.as_str()), Some("Person 10"));
        assert_eq!(second.data.last().map(|r| r.name.as_str()), Some("Person 19"));

        let clamped = query_records(
            &source,
            &PoliticianQuery {
                page: Some(99),
                ..q()
            },
        );
        assert_eq!(clamped.page, 3);
        assert_eq!(clamped.data.len(), 5);

        let ohio = query_records(
            &source,
            &PoliticianQuery {
                state: Some("Ohio".to_string()),
                page_size: Some(5),
                ..q()
            },
        );
        assert_eq!(ohio.total, 13);
        assert_eq!(ohio.total_pages, 3);
        assert_eq!(
            names(&ohio),
            vec!["Person 00", "Person 02", "Person 04", "Person 06", "Person 08"]
        );
    }

    #[test]
    fn same_query_twice_is_identical() {
        let query = PoliticianQuery {
            query: Some("j".to_string()),
            ..q()
        };
        assert_eq!(query_records(SOURCE, &query), query_records(SOURCE, &query));
    }

    #[test]
    fn slug_collapses_punctuation() {
        assert_eq!(slugify("Doe, Jane-CA"), "doe-jane-ca");
        assert_eq!(slugify("  José  O'Neil -"), "jos-o-neil");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn slug_lowercases_before_filtering() {
        // KELVIN SIGN lowercases to ASCII 'k'
        assert_eq!(slugify("\u{212A}im Lee-CA"), "kim-lee-ca");
        assert_eq!(slugify("ÉMILE"), "mile");
    }

    #[tokio::test]
    async fn reads_source_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "directory-core-{}-reads_source_from_disk.csv",
            std::process::id()
        ));
        tokio::fs::write(&path, SOURCE).await.unwrap();

        let query = PoliticianQuery {
            state: Some("TX".to_string()),
            ..q()
        };
        let first = query_politicians(&path, &query).await.unwrap();
        let second = query_politicians(&path, &query).await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(names(&first), vec!["John Roe"]);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn missing_source_is_an_error() {
        let path = std::env::temp_dir().join("directory-core-does-not-exist.csv");
        let err = query_politicians(&path, &q()).await.unwrap_err();
        assert!(matches!(err, DirectoryError::SourceUnavailable { .. }));
        assert!(err.to_string().starts_with("failed to read source"));
    }
}
