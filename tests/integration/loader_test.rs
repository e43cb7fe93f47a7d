use std::fs::File;
use std::sync::Arc;

use arrow::array::{Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use mimic_insights::async_io::{AsyncTableLoader, load_tables_parallel};
use mimic_insights::models::{Admission, LabEvent, Patient, TableRecord};
use mimic_insights::reader::{TableFormat, TableLoader, locate_table};
use mimic_insights::{InsightsError, MimicTable};

use crate::utils::{ScratchDir, ts};

const LABEVENTS_CSV: &str = "\
ROW_ID,SUBJECT_ID,HADM_ID,ITEMID,CHARTTIME,VALUE,VALUENUM,VALUEUOM,FLAG
1,3,145834,50820,2101-10-12 16:07:00,7.39,7.39,units,
2,3,145834,50800,2101-10-12 18:17:00,ART,,,
3,3,,50802,2101-10-12 18:17:00,-1,-1,mEq/L,abnormal
";

const ADMISSIONS_CSV: &str = "\
row_id,subject_id,hadm_id,admittime,dischtime,deathtime,insurance,hospital_expire_flag
21,22,165315,2196-04-09 12:26:00,2196-04-10 15:54:00,,Private,0
22,23,152223,2153-09-03 07:15:00,2153-09-08 19:10:00,,Medicare,1
";

#[test]
fn test_csv_projection_and_types() -> mimic_insights::Result<()> {
    let dir = ScratchDir::new("csv_projection");
    dir.write("LABEVENTS.csv", LABEVENTS_CSV);

    let loader = TableLoader::new(dir.path(), 2);
    let batches = loader.load_batches(MimicTable::LabEvents)?;
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].schema(), MimicTable::LabEvents.schema());

    let events = loader.load::<LabEvent>()?;
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].hadm_id, Some(145_834));
    assert_eq!(events[0].value, Some(7.39));
    assert_eq!(events[0].flag, None);
    assert_eq!(events[1].value, None);
    assert_eq!(events[2].hadm_id, None);
    assert!(events[2].is_flagged());
    Ok(())
}

#[test]
fn test_lowercase_headers_resolve() -> mimic_insights::Result<()> {
    let dir = ScratchDir::new("lowercase");
    dir.write("admissions.csv", ADMISSIONS_CSV);

    let (_, format) = locate_table(dir.path(), MimicTable::Admissions)?;
    assert_eq!(format, TableFormat::Csv);

    let admissions = TableLoader::new(dir.path(), 1024).load::<Admission>()?;
    assert_eq!(admissions.len(), 2);
    assert_eq!(admissions[1].insurance.as_deref(), Some("Medicare"));
    assert_eq!(admissions[1].hospital_expire_flag, Some(1));
    assert_eq!(admissions[0].admit_time, Some(ts("2196-04-09 12:26:00")));
    Ok(())
}

#[test]
fn test_missing_column_is_an_error() {
    let dir = ScratchDir::new("missing_column");
    dir.write("PATIENTS.csv", "ROW_ID,SUBJECT_ID,GENDER\n1,2,M\n");

    let err = TableLoader::new(dir.path(), 1024)
        .load::<Patient>()
        .unwrap_err();
    match err {
        InsightsError::MissingColumn { table, column } => {
            assert_eq!(table, "PATIENTS");
            assert_eq!(column, "DOB");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_table_and_empty_table() {
    let dir = ScratchDir::new("missing_table");
    let err = TableLoader::new(dir.path(), 1024).load::<Patient>().unwrap_err();
    assert!(matches!(err, InsightsError::TableNotFound { .. }));

    dir.write("PATIENTS.csv", "SUBJECT_ID,DOB\n");
    let err = TableLoader::new(dir.path(), 1024).load::<Patient>().unwrap_err();
    assert!(matches!(err, InsightsError::EmptyTable(_)));
}

#[test]
fn test_invalid_timestamp_is_an_error() {
    let dir = ScratchDir::new("bad_timestamp");
    dir.write("PATIENTS.csv", "SUBJECT_ID,DOB\n1,yesterday\n");
    let err = TableLoader::new(dir.path(), 1024).load::<Patient>().unwrap_err();
    assert!(matches!(err, InsightsError::Deserialize { .. }));
}

/// Parquet file with `Int32` ids, to exercise casting to the table schema
fn write_patients_parquet(dir: &ScratchDir) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("SUBJECT_ID", DataType::Int32, false),
        Field::new("GENDER", DataType::Utf8, true),
        Field::new("DOB", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        Arc::clone(&schema),
        vec![
            Arc::new(Int32Array::from(vec![1, 2])),
            Arc::new(StringArray::from(vec![Some("F"), Some("M")])),
            Arc::new(StringArray::from(vec![Some("2100-01-01 00:00:00"), None])),
        ],
    )
    .unwrap();

    let file = File::create(dir.path().join("PATIENTS.parquet")).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

#[test]
fn test_parquet_preferred_and_cast() -> mimic_insights::Result<()> {
    let dir = ScratchDir::new("parquet_cast");
    write_patients_parquet(&dir);
    dir.write("PATIENTS.csv", "SUBJECT_ID,DOB\n99,2100-01-01\n");

    let (_, format) = locate_table(dir.path(), MimicTable::Patients)?;
    assert_eq!(format, TableFormat::Parquet);

    let patients = TableLoader::new(dir.path(), 1024).load::<Patient>()?;
    assert_eq!(patients.len(), 2);
    assert_eq!(patients[0].subject_id, 1);
    assert_eq!(patients[1].date_of_birth, None);
    Ok(())
}

#[tokio::test]
async fn test_async_loader_matches_sync() -> mimic_insights::Result<()> {
    let dir = ScratchDir::new("async_loader");
    write_patients_parquet(&dir);
    dir.write("LABEVENTS.csv", LABEVENTS_CSV);

    let loader = AsyncTableLoader::new(dir.path(), 1024);
    let tables = [MimicTable::Patients, MimicTable::LabEvents, MimicTable::Patients];
    let batches = load_tables_parallel(&loader, &tables).await?;
    assert_eq!(batches.len(), 2);

    let events = LabEvent::from_batches(&batches[&MimicTable::LabEvents])?;
    let sync_events = TableLoader::new(dir.path(), 1024).load::<LabEvent>()?;
    assert_eq!(events, sync_events);

    let patients = loader.load::<Patient>().await?;
    assert_eq!(patients.len(), 2);
    Ok(())
}
