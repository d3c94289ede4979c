//! Store write contract integration tests:
//! - group transactions and per-document savepoints
//! - re-processing (campaign upsert, appended metric and insight rows)
//! - foreign key integrity
//! - store summary aggregates

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use ces_core::entities::{CampaignRecord, CulturalInsight, MetricObservation, ProcessedCampaign};
use ces_core::enums::{CulturalCategory, MetricKind};
use ces_core::ids::campaign_id;
use ces_core::scores::CesScores;
use ces_db::{CampaignSink, CesDb, DatabaseError};

async fn test_db() -> CesDb {
    CesDb::open_local(":memory:").await.unwrap()
}

fn metric(kind: MetricKind, value: f64, context: &str) -> MetricObservation {
    MetricObservation {
        kind,
        numeric_value: Some(value),
        text_value: value.to_string(),
        unit: Some("%".to_string()),
        context: context.to_string(),
    }
}

fn insight(element: &str, category: CulturalCategory, impact_score: f64) -> CulturalInsight {
    CulturalInsight {
        element: element.to_string(),
        category,
        context: format!("the {element} story"),
        impact_score,
    }
}

fn processed(name: &str, brand: &str, overall: f64) -> ProcessedCampaign {
    ProcessedCampaign {
        campaign: CampaignRecord {
            id: campaign_id(name, brand, "2023"),
            campaign_name: name.to_string(),
            brand: brand.to_string(),
            agency: "Hive".to_string(),
            year: 2023,
            category: "General".to_string(),
            subcategory: None,
            market: "Philippines".to_string(),
            award_metal: Some("Silver".to_string()),
            scores: CesScores {
                business_results: 0.6,
                market_impact: 0.5,
                creativity: 0.4,
                cultural_relevance: 0.55,
                efficiency: 0.5,
                overall,
            },
            summary: "Sales grew by 15%".to_string(),
            raw_content: "Sales grew by 15%".to_string(),
        },
        metrics: vec![
            metric(MetricKind::Percentage, 15.0, "15% this quarter"),
            metric(MetricKind::Growth, 15.0, "grew by 15%"),
        ],
        insights: vec![insight("kapwa", CulturalCategory::Values, 0.5)],
    }
}

async fn persist_group(db: &CesDb, campaigns: &[ProcessedCampaign]) {
    db.begin_group().await.unwrap();
    for campaign in campaigns {
        db.persist(campaign).await.unwrap();
    }
    db.commit_group().await.unwrap();
}

// ---------------------------------------------------------------------------
// Group and savepoint behaviour
// ---------------------------------------------------------------------------

#[tokio::test]
async fn committed_group_is_readable() {
    let db = test_db().await;
    let record = processed("Bottles", "Acme", 0.5);
    persist_group(&db, std::slice::from_ref(&record)).await;

    let id = &record.campaign.id;
    assert_eq!(db.get_campaign(id).await.unwrap(), record.campaign);
    assert_eq!(db.metrics_for_campaign(id).await.unwrap(), record.metrics);
    assert_eq!(db.insights_for_campaign(id).await.unwrap(), record.insights);
}

#[tokio::test]
async fn failed_document_leaves_no_partial_rows() {
    let db = test_db().await;
    let good = processed("Good", "Acme", 0.5);
    let mut bad = processed("Bad", "Acme", 0.5);
    // Impact above 1.0 violates the insight CHECK after the campaign and
    // metrics rows were already written.
    bad.insights.push(insight("fiesta", CulturalCategory::Festivals, 1.5));

    db.begin_group().await.unwrap();
    db.persist(&good).await.unwrap();
    let err = db.persist(&bad).await.unwrap_err();
    assert!(matches!(err, DatabaseError::LibSql(_)), "{err}");
    db.commit_group().await.unwrap();

    assert_eq!(db.campaign_count().await.unwrap(), 1);
    assert!(matches!(
        db.get_campaign(&bad.campaign.id).await,
        Err(DatabaseError::NoResult)
    ));
    assert!(db.metrics_for_campaign(&bad.campaign.id).await.unwrap().is_empty());
    assert_eq!(db.metric_count().await.unwrap(), 2);
    assert_eq!(db.insight_count().await.unwrap(), 1);
}

#[tokio::test]
async fn failed_reprocess_keeps_previous_rows() {
    let db = test_db().await;
    let first = processed("Bottles", "Acme", 0.5);
    persist_group(&db, std::slice::from_ref(&first)).await;

    let mut second = processed("Bottles", "Acme", 0.9);
    second.insights = vec![insight("fiesta", CulturalCategory::Festivals, 2.0)];
    db.begin_group().await.unwrap();
    assert!(db.persist(&second).await.is_err());
    db.commit_group().await.unwrap();

    let id = &first.campaign.id;
    assert_eq!(db.get_campaign(id).await.unwrap(), first.campaign);
    assert_eq!(db.insights_for_campaign(id).await.unwrap(), first.insights);
}

#[tokio::test]
async fn rolled_back_group_discards_everything() {
    let db = test_db().await;
    db.begin_group().await.unwrap();
    db.persist(&processed("A", "Acme", 0.5)).await.unwrap();
    db.persist(&processed("B", "Acme", 0.5)).await.unwrap();
    db.rollback_group().await.unwrap();

    assert_eq!(db.campaign_count().await.unwrap(), 0);
    assert_eq!(db.metric_count().await.unwrap(), 0);
}

#[tokio::test]
async fn persist_outside_group_commits_immediately() {
    let db = test_db().await;
    db.persist(&processed("Solo", "Acme", 0.5)).await.unwrap();
    assert_eq!(db.campaign_count().await.unwrap(), 1);
}

#[tokio::test]
async fn commit_without_group_is_unavailable() {
    let db = test_db().await;
    assert!(matches!(
        db.commit_group().await,
        Err(DatabaseError::Unavailable(_))
    ));
}

// ---------------------------------------------------------------------------
// Re-processing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reprocessing_upserts_campaign_and_appends_children() {
    let db = test_db().await;
    let first = processed("Bottles", "Acme", 0.5);
    persist_group(&db, std::slice::from_ref(&first)).await;

    let mut second = processed("Bottles", "Acme", 0.7);
    second.metrics.truncate(1);
    second.insights = vec![
        insight("fiesta", CulturalCategory::Festivals, 0.7),
        insight("adobo", CulturalCategory::Food, 0.5),
    ];
    persist_group(&db, std::slice::from_ref(&second)).await;

    let id = &second.campaign.id;
    assert_eq!(db.campaign_count().await.unwrap(), 1);
    assert_eq!(db.get_campaign(id).await.unwrap(), second.campaign);

    let expected_metrics: Vec<_> = first.metrics.iter().chain(&second.metrics).cloned().collect();
    assert_eq!(db.metrics_for_campaign(id).await.unwrap(), expected_metrics);
    let expected_insights: Vec<_> = first.insights.iter().chain(&second.insights).cloned().collect();
    assert_eq!(db.insights_for_campaign(id).await.unwrap(), expected_insights);
}

#[tokio::test]
async fn repeated_runs_keep_one_campaign_and_append_children() {
    let db = test_db().await;
    let record = processed("Bottles", "Acme", 0.5);
    for _ in 0..3 {
        persist_group(&db, std::slice::from_ref(&record)).await;
    }
    assert_eq!(db.campaign_count().await.unwrap(), 1);
    assert_eq!(db.metric_count().await.unwrap(), 6);
    assert_eq!(db.insight_count().await.unwrap(), 3);
}

#[tokio::test]
async fn same_id_twice_in_one_group_keeps_both_documents_rows() {
    let db = test_db().await;
    let first = processed("Dup", "Acme", 0.5);
    let mut second = processed("Dup", "Acme", 0.6);
    second.metrics = vec![metric(MetricKind::Numeric, 2.0, "2 million viewers")];
    second.insights = Vec::new();
    persist_group(&db, &[first.clone(), second.clone()]).await;

    let id = &first.campaign.id;
    assert_eq!(db.campaign_count().await.unwrap(), 1);
    assert_eq!(db.get_campaign(id).await.unwrap(), second.campaign);
    assert_eq!(db.metrics_for_campaign(id).await.unwrap().len(), 3);
    assert_eq!(db.insights_for_campaign(id).await.unwrap(), first.insights);
}

// ---------------------------------------------------------------------------
// Integrity
// ---------------------------------------------------------------------------

#[tokio::test]
async fn metric_without_campaign_is_rejected() {
    let db = test_db().await;
    let result = db
        .insert_metrics("missing", &[metric(MetricKind::Numeric, 1.0, "1 store")])
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn null_numeric_value_round_trips() {
    let db = test_db().await;
    let mut record = processed("Digits", "Acme", 0.5);
    record.metrics = vec![MetricObservation {
        kind: MetricKind::Numeric,
        numeric_value: None,
        text_value: "\u{665}".to_string(),
        unit: None,
        context: "\u{665} winners".to_string(),
    }];
    persist_group(&db, std::slice::from_ref(&record)).await;

    let stored = db.metrics_for_campaign(&record.campaign.id).await.unwrap();
    assert_eq!(stored, record.metrics);
}

#[tokio::test]
async fn file_backed_store_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ces.db");
    let path = path.to_str().unwrap();
    let record = processed("Bottles", "Acme", 0.5);
    {
        let db = CesDb::open_local(path).await.unwrap();
        persist_group(&db, std::slice::from_ref(&record)).await;
    }
    let db = CesDb::open_local(path).await.unwrap();
    assert_eq!(
        db.get_campaign(&record.campaign.id).await.unwrap(),
        record.campaign
    );
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[tokio::test]
async fn summary_aggregates_brands_and_categories() {
    let db = test_db().await;
    let mut beta = processed("Beta One", "Beta", 0.8);
    beta.insights = vec![
        insight("fiesta", CulturalCategory::Festivals, 0.7),
        insight("kapwa", CulturalCategory::Values, 0.9),
    ];
    persist_group(
        &db,
        &[
            processed("Acme One", "Acme", 0.4),
            processed("Acme Two", "Acme", 0.6),
            beta,
        ],
    )
    .await;

    let summary = db.summary().await.unwrap();
    assert_eq!(summary.campaigns, 3);
    let avg = summary.average_overall_score.unwrap();
    assert!((avg - 0.6).abs() < 1e-9, "{avg}");
    assert_eq!(summary.metrics, 6);
    assert_eq!(summary.cultural_insights, 4);

    let brands: Vec<(&str, usize)> = summary
        .top_brands
        .iter()
        .map(|b| (b.brand.as_str(), b.campaigns))
        .collect();
    assert_eq!(brands, vec![("Beta", 1), ("Acme", 2)]);
    assert!((summary.top_brands[1].average_score - 0.5).abs() < 1e-9);

    let values = &summary.insight_categories[0];
    assert_eq!(values.category, "values");
    assert_eq!(values.insights, 3);
    assert!((values.average_impact - (0.5 + 0.5 + 0.9) / 3.0).abs() < 1e-9);
    assert_eq!(summary.insight_categories[1].category, "festivals");
}

#[tokio::test]
async fn top_brands_is_limited_to_five() {
    let db = test_db().await;
    let campaigns: Vec<_> = (0..7)
        .map(|i| processed(&format!("C{i}"), &format!("Brand {i}"), 0.1 * f64::from(i)))
        .collect();
    persist_group(&db, &campaigns).await;

    let summary = db.summary().await.unwrap();
    assert_eq!(summary.top_brands.len(), 5);
    assert_eq!(summary.top_brands[0].brand, "Brand 6");
}
