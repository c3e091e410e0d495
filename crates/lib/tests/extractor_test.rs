//! # Rule-Based Extractor Tests

mod common;

use common::setup_tracing;
use sarabun::providers::extractor::{extract_fields, FieldExtractor, RegexFieldExtractor};
use sarabun::{completeness_check, RecipientRank};

const TRAVEL_REQUEST: &str =
    "ขออนุมัติเดินทางไปราชการจังหวัดเชียงใหม่ ระหว่างวันที่ 1-5 กันยายน 2568 ตามหนังสือ สทช 123/2568 เรียน ผู้อำนวยการสำนักบริหาร";

#[test]
fn recovers_document_number_and_year() {
    let fields = extract_fields(TRAVEL_REQUEST).unwrap();
    assert_eq!(fields.doc_number.as_deref(), Some("สทช 123/2568"));
    assert_eq!(fields.year_be.as_deref(), Some("2568"));
}

#[test]
fn recovers_province_and_date_range() {
    let fields = extract_fields(TRAVEL_REQUEST).unwrap();
    assert_eq!(fields.location.as_deref(), Some("เชียงใหม่"));
    assert_eq!(fields.date_range.as_deref(), Some("1-5 กันยายน 2568"));
}

#[test]
fn detects_rank_from_titles() {
    let fields = extract_fields(TRAVEL_REQUEST).unwrap();
    assert_eq!(fields.recipient_rank, Some(RecipientRank::AgencyHead));

    let pm = extract_fields("กราบเรียน นายกรัฐมนตรี เพื่อโปรดทราบ").unwrap();
    assert_eq!(pm.recipient_rank, Some(RecipientRank::HeadOfGovernment));

    let minister = extract_fields("เรียน รัฐมนตรีว่าการกระทรวงดิจิทัล").unwrap();
    assert_eq!(minister.recipient_rank, Some(RecipientRank::Minister));
}

#[test]
fn recovers_subject_and_recipient_agency() {
    let fields = extract_fields(
        "ขอให้จัดทำหนังสือส่งถึงกระทรวงพาณิชย์ เรื่อง ขอความอนุเคราะห์ข้อมูลผู้ประกอบการ",
    )
    .unwrap();
    assert_eq!(fields.recipient_agency.as_deref(), Some("กระทรวงพาณิชย์"));
    assert_eq!(
        fields.subject.as_deref(),
        Some("ขอความอนุเคราะห์ข้อมูลผู้ประกอบการ")
    );
}

#[test]
fn unmatched_fields_stay_missing_for_the_clarification_loop() {
    let fields = extract_fields("จัดทำเอกสารหนึ่งฉบับ").unwrap();
    let missing = completeness_check(&fields);
    assert!(missing.contains("recipient_rank"));
    assert!(missing.contains("subject"));
}

#[tokio::test]
async fn trait_wrapper_matches_the_free_function() {
    setup_tracing();
    let via_trait = RegexFieldExtractor::new()
        .extract(TRAVEL_REQUEST)
        .await
        .unwrap();
    let direct = extract_fields(TRAVEL_REQUEST).unwrap();
    assert_eq!(via_trait, direct);
}
