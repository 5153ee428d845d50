//! End-to-end test: dataset files through the loaders, the database, the
//! filter factory, the limiter, and both exporters.

use std::io::Write;

use neo_catalog::extract::{load_approaches, load_neos};
use neo_catalog::write::{write_to_csv, write_to_json};
use neo_catalog::{create_filters, limit, NeoDatabase, NeoError, QueryMatch, QueryOptions};
use tempfile::NamedTempFile;

const NEOS_CSV: &str = "\
id,spkid,full_name,pdes,name,diameter,albedo,pha
a0000433,2000433,433 Eros (A898 PA),433,Eros,16.84,0.25,N
a0001862,2001862,1862 Apollo (1932 HA),1862,Apollo,1.5,0.25,Y
a0002101,2002101,2101 Adonis (1936 CA),2101,Adonis,0.60,,Y
bK20A00B,3999999,(2020 AB),2020 AB,,,,
";

const CAD_JSON: &str = r#"{
    "signature": {"source": "NASA/JPL SBDB Close Approach Data API", "version": "1.1"},
    "count": 6,
    "fields": ["des", "orbit_id", "jd", "cd", "dist", "v_rel", "v_inf"],
    "data": [
        ["433", "657", "2458849.5", "2020-Jan-01 00:00", "0.15", "5.0", "4.9"],
        ["1862", "312", "2458863.7", "2020-Jan-15 06:30", "0.025", "18.2", "18.1"],
        ["2101", "88", "2458880.5", "2020-Feb-01 00:00", "0.09", "11.0", "10.9"],
        ["433", "657", "2459293.0", "2021-Mar-19 12:00", "0.30", "7.5", "7.4"],
        ["2020 AB", "4", "2458850.2", "2020-Jan-01 17:15", "0.002", "9.7", "9.6"],
        ["99942", "199", "2458855.5", "2020-Jan-07 00:00", "0.07", "6.1", "6.0"]
    ]
}"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn load_db() -> NeoDatabase {
    let neo_file = write_temp(NEOS_CSV);
    let cad_file = write_temp(CAD_JSON);
    NeoDatabase::new(
        load_neos(neo_file.path()).expect("NEO fixture should load"),
        load_approaches(cad_file.path()).expect("approach fixture should load"),
    )
}

#[test]
fn test_load_and_link() {
    let db = load_db();
    assert_eq!(db.neos().len(), 4);
    assert_eq!(db.approaches().len(), 6);

    let eros = db.get_neo_by_designation("433").expect("Eros should load");
    assert_eq!(eros.name.as_deref(), Some("Eros"));
    assert_eq!(eros.approaches.len(), 2);

    // 99942 never appears on the NEO side; its approach stays orphaned.
    let orphan = &db.approaches()[5];
    assert_eq!(orphan.designation, "99942");
    assert!(db.neo_for(orphan).is_none());
}

#[test]
fn test_lookups_match_loaded_records() {
    let db = load_db();
    assert_eq!(
        db.get_neo_by_name("Apollo").unwrap().designation,
        "1862"
    );
    assert!(db.get_neo_by_designation("99942").is_none());
    assert!(db.get_neo_by_name("2020 AB").is_none());
}

#[test]
fn test_unfiltered_query_preserves_dataset_order() {
    let db = load_db();
    let matches: Vec<QueryMatch<'_>> = db.query(&[]).collect::<Result<_, _>>().unwrap();
    let designations: Vec<_> = matches
        .iter()
        .map(|m| m.approach.designation.as_str())
        .collect();
    assert_eq!(
        designations,
        vec!["433", "1862", "2101", "433", "2020 AB", "99942"]
    );
}

#[test]
fn test_filtered_query_through_factory() {
    let db = load_db();

    // January 2020, within 0.1 au.
    let options = QueryOptions {
        start_date: Some("2020-01-01".parse().unwrap()),
        end_date: Some("2020-01-31".parse().unwrap()),
        distance_max: Some(0.1),
        ..QueryOptions::default()
    };
    let filters = create_filters(&options);
    let matches: Vec<QueryMatch<'_>> = db.query(&filters).collect::<Result<_, _>>().unwrap();

    let designations: Vec<_> = matches
        .iter()
        .map(|m| m.approach.designation.as_str())
        .collect();
    assert_eq!(designations, vec!["1862", "2020 AB", "99942"]);
}

#[test]
fn test_exact_date_matches_any_time_of_day() {
    let db = load_db();
    let options = QueryOptions {
        date: Some("2020-01-01".parse().unwrap()),
        ..QueryOptions::default()
    };
    let filters = create_filters(&options);
    let matches: Vec<QueryMatch<'_>> = db
        .query(&filters)
        .collect::<Result<_, _>>()
        .unwrap();

    // Midnight and 17:15 both fall on the date; nothing from other days.
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].approach.time_str(), "2020-01-01 00:00");
    assert_eq!(matches[1].approach.time_str(), "2020-01-01 17:15");
}

#[test]
fn test_hazardous_filter_errors_on_orphan_but_matches_first() {
    let db = load_db();
    let options = QueryOptions {
        hazardous: Some(true),
        ..QueryOptions::default()
    };
    let filters = create_filters(&options);

    let mut results = db.query(&filters);
    assert_eq!(results.next().unwrap().unwrap().approach.designation, "1862");
    assert_eq!(results.next().unwrap().unwrap().approach.designation, "2101");
    assert!(matches!(
        results.next().unwrap(),
        Err(NeoError::MissingLinkage { .. })
    ));
    assert!(results.next().is_none());
}

#[test]
fn test_hazardous_filter_with_distance_guard_skips_orphan() {
    let db = load_db();
    let options = QueryOptions {
        distance_max: Some(0.05),
        hazardous: Some(true),
        ..QueryOptions::default()
    };
    let filters = create_filters(&options);
    let matches: Vec<QueryMatch<'_>> = db
        .query(&filters)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].approach.designation, "1862");
}

#[test]
fn test_diameter_filter_skips_unmeasured_neos() {
    let db = load_db();
    // The distance guard admits 1862 and 2020 AB and rejects the orphan
    // before the diameter filter can dereference it.
    let options = QueryOptions {
        distance_max: Some(0.05),
        diameter_min: Some(0.0),
        ..QueryOptions::default()
    };
    let filters = create_filters(&options);
    let matches: Vec<QueryMatch<'_>> = db
        .query(&filters)
        .collect::<Result<_, _>>()
        .unwrap();

    // 2020 AB passes the distance guard but its NaN diameter satisfies no
    // bound, not even a zero one.
    let designations: Vec<_> = matches
        .iter()
        .map(|m| m.approach.designation.as_str())
        .collect();
    assert_eq!(designations, vec!["1862"]);
}

#[test]
fn test_limit_composes_with_query() {
    let db = load_db();
    let capped: Vec<QueryMatch<'_>> = limit(db.query(&[]), Some(3))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(capped.len(), 3);

    let uncapped: Vec<QueryMatch<'_>> = limit(db.query(&[]), None)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(uncapped.len(), 6);
}

#[test]
fn test_csv_export_round_trips() {
    let db = load_db();
    let options = QueryOptions {
        distance_max: Some(0.1),
        ..QueryOptions::default()
    };
    let filters = create_filters(&options);
    let matches: Vec<QueryMatch<'_>> = db
        .query(&filters)
        .collect::<Result<_, _>>()
        .unwrap();

    let out = NamedTempFile::new().unwrap();
    write_to_csv(matches.iter().copied(), out.path()).unwrap();

    let mut reader = csv::Reader::from_path(out.path()).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows.len(), matches.len());
    assert_eq!(&rows[0][0], "2020-01-15 06:30");
    assert_eq!(&rows[0][3], "1862");
    assert_eq!(&rows[0][4], "Apollo");
    assert_eq!(&rows[0][6], "true");
}

#[test]
fn test_json_export_round_trips() {
    let db = load_db();
    let matches: Vec<QueryMatch<'_>> = db.query(&[]).collect::<Result<_, _>>().unwrap();

    let out = NamedTempFile::new().unwrap();
    write_to_json(matches.iter().copied(), out.path()).unwrap();

    let text = std::fs::read_to_string(out.path()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 6);
    assert_eq!(entries[0]["neo"]["name"], "Eros");
    assert_eq!(entries[4]["neo"]["name"], serde_json::Value::Null);
    assert_eq!(entries[5]["neo"]["designation"], "99942");
}
